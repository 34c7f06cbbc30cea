use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::QuoteError;
use crate::financing::terms::{first_eligible_term, is_offered_term, is_term_disabled};
use crate::financing::vehicle::vehicle_age_months;
use crate::financing::warranty::WarrantySelection;

/// Raw state of one calculator form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorInput {
    /// Amount exactly as typed; parsed lazily so partial input never fails.
    pub principal: String,
    pub term: u32,
    pub registration_year: i32,
    pub registration_month: u32,
    pub warranty: WarrantySelection,
}

impl CalculatorInput {
    /// Form defaults: 10 000 €, shortest term, January of the given year, no warranty.
    pub fn with_registration_year(registration_year: i32) -> Self {
        Self {
            principal: "10000".to_string(),
            term: 24,
            registration_year,
            registration_month: 1,
            warranty: WarrantySelection::default(),
        }
    }
}

/// Correction applied while normalizing an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputAdjustment {
    /// The selected term became ineligible and the first eligible term was picked instead.
    TermReselected { from: u32, to: u32 },
    /// The warranty tier does not offer the selected duration.
    WarrantyDurationClamped { from: u8, to: u8 },
}

/// Input after cross-field rules ran, ready for pricing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedInput {
    pub input: CalculatorInput,
    pub vehicle_age_months: u32,
    pub adjustments: Vec<InputAdjustment>,
}

/// Apply the dependent-field rules after an input change.
///
/// Runs the warranty duration clamp and re-selects the term when the vehicle age made it
/// ineligible. Fails when the term is not offered, the registration month is out of range,
/// or the vehicle is too old for every term.
pub fn normalize_input(
    mut input: CalculatorInput,
    today: NaiveDate,
) -> Result<NormalizedInput, QuoteError> {
    if !(1..=12).contains(&input.registration_month) {
        return Err(QuoteError::InvalidRegistrationMonth(input.registration_month));
    }
    if !is_offered_term(input.term) {
        return Err(QuoteError::UnsupportedTerm(input.term));
    }

    let vehicle_age_months =
        vehicle_age_months(input.registration_year, input.registration_month, today);
    let mut adjustments = Vec::new();

    if let Some(previous) = input.warranty.normalize() {
        debug!(
            tier = ?input.warranty.tier,
            from = previous,
            to = input.warranty.duration_years,
            "clamped warranty duration"
        );
        adjustments.push(InputAdjustment::WarrantyDurationClamped {
            from: previous,
            to: input.warranty.duration_years,
        });
    }

    if is_term_disabled(input.term, vehicle_age_months) {
        let replacement = first_eligible_term(vehicle_age_months)
            .ok_or(QuoteError::NoEligibleTerm { vehicle_age_months })?;
        debug!(
            from = input.term,
            to = replacement,
            vehicle_age_months,
            "re-selected ineligible term"
        );
        adjustments.push(InputAdjustment::TermReselected {
            from: input.term,
            to: replacement,
        });
        input.term = replacement;
    }

    Ok(NormalizedInput {
        input,
        vehicle_age_months,
        adjustments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::financing::warranty::WarrantyTier;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
    }

    fn input(term: u32, registration_year: i32, registration_month: u32) -> CalculatorInput {
        CalculatorInput {
            term,
            registration_month,
            ..CalculatorInput::with_registration_year(registration_year)
        }
    }

    #[test]
    fn keeps_eligible_selections_untouched() {
        let normalized = normalize_input(input(120, 2020, 6), today()).expect("normalizes");
        assert_eq!(normalized.vehicle_age_months, 60);
        assert_eq!(normalized.input.term, 120);
        assert!(normalized.adjustments.is_empty());
    }

    #[test]
    fn reselects_first_eligible_term_when_vehicle_is_too_old() {
        // 61 months old: 120 is out, so the shortest term is picked.
        let normalized = normalize_input(input(120, 2020, 5), today()).expect("normalizes");
        assert_eq!(normalized.vehicle_age_months, 61);
        assert_eq!(normalized.input.term, 24);
        assert_eq!(
            normalized.adjustments,
            vec![InputAdjustment::TermReselected { from: 120, to: 24 }]
        );
    }

    #[test]
    fn fails_when_no_term_is_eligible() {
        let err = normalize_input(input(24, 2012, 1), today()).expect_err("too old");
        assert!(matches!(
            err,
            QuoteError::NoEligibleTerm {
                vehicle_age_months: 161
            }
        ));
    }

    #[test]
    fn clamps_gran_ocasion_duration() {
        let mut raw = input(36, 2024, 1);
        raw.warranty = WarrantySelection {
            included: true,
            tier: WarrantyTier::GranOcasion,
            duration_years: 3,
            heavy_vehicle: false,
        };

        let normalized = normalize_input(raw, today()).expect("normalizes");
        assert_eq!(normalized.input.warranty.duration_years, 1);
        assert_eq!(
            normalized.adjustments,
            vec![InputAdjustment::WarrantyDurationClamped { from: 3, to: 1 }]
        );
    }

    #[test]
    fn rejects_terms_outside_the_offer() {
        let err = normalize_input(input(30, 2024, 1), today()).expect_err("term rejected");
        assert!(matches!(err, QuoteError::UnsupportedTerm(30)));
    }

    #[test]
    fn rejects_out_of_range_registration_months() {
        for month in [0, 13] {
            let err = normalize_input(input(24, 2024, month), today()).expect_err("month rejected");
            assert!(matches!(err, QuoteError::InvalidRegistrationMonth(m) if m == month));
        }
    }

    #[test]
    fn normalization_is_idempotent() {
        let first = normalize_input(input(120, 2018, 3), today()).expect("normalizes");
        let second = normalize_input(first.input.clone(), today()).expect("normalizes");
        assert_eq!(second.input, first.input);
        assert!(second.adjustments.is_empty());
    }
}
