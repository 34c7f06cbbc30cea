use serde::{Deserialize, Serialize};

/// Loan terms offered by every financing plan, in ascending order.
pub const OFFERED_TERMS: [u32; 9] = [24, 36, 48, 60, 72, 84, 96, 108, 120];

/// Ceiling on vehicle age plus loan term, in months (15 years).
pub const MAX_COMBINED_MONTHS: u32 = 180;

pub fn is_offered_term(term: u32) -> bool {
    OFFERED_TERMS.contains(&term)
}

/// A term is disabled once the vehicle would be older than the ceiling at the last installment.
pub fn is_term_disabled(term: u32, vehicle_age_months: u32) -> bool {
    vehicle_age_months.saturating_add(term) > MAX_COMBINED_MONTHS
}

/// First offered term still eligible for a vehicle of the given age.
pub fn first_eligible_term(vehicle_age_months: u32) -> Option<u32> {
    OFFERED_TERMS
        .iter()
        .copied()
        .find(|term| !is_term_disabled(*term, vehicle_age_months))
}

/// Selector entry describing one offered term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermOption {
    pub months: u32,
    pub disabled: bool,
    pub selected: bool,
}

pub fn term_options(selected: u32, vehicle_age_months: u32) -> Vec<TermOption> {
    OFFERED_TERMS
        .iter()
        .map(|&months| TermOption {
            months,
            disabled: is_term_disabled(months, vehicle_age_months),
            selected: months == selected,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disables_terms_past_the_combined_ceiling() {
        assert!(is_term_disabled(120, 61));
        assert!(!is_term_disabled(120, 60));
        assert!(!is_term_disabled(24, 156));
        assert!(is_term_disabled(24, 157));
    }

    #[test]
    fn first_eligible_term_walks_terms_in_ascending_order() {
        assert_eq!(first_eligible_term(0), Some(24));
        assert_eq!(first_eligible_term(156), Some(24));
        assert_eq!(first_eligible_term(157), None);
    }

    #[test]
    fn term_options_flag_selection_and_eligibility() {
        let options = term_options(60, 100);
        assert_eq!(options.len(), OFFERED_TERMS.len());

        let selected: Vec<u32> = options
            .iter()
            .filter(|option| option.selected)
            .map(|option| option.months)
            .collect();
        assert_eq!(selected, vec![60]);

        let disabled: Vec<u32> = options
            .iter()
            .filter(|option| option.disabled)
            .map(|option| option.months)
            .collect();
        assert_eq!(disabled, vec![84, 96, 108, 120]);
    }

    #[test]
    fn only_listed_terms_are_offered() {
        assert!(is_offered_term(108));
        assert!(!is_offered_term(12));
        assert!(!is_offered_term(61));
    }
}
