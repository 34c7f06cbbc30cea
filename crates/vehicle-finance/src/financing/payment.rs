use std::str::FromStr;

use rust_decimal::Decimal;

use super::plans::CoefficientTable;

/// Whether free text is acceptable in the amount field: empty, or digits with at most one point.
pub fn is_amount_input(raw: &str) -> bool {
    let mut seen_point = false;
    raw.chars().all(|ch| match ch {
        '0'..='9' => true,
        '.' if !seen_point => {
            seen_point = true;
            true
        }
        _ => false,
    })
}

/// Parse a principal typed into the amount field.
///
/// Returns `None` for anything that is not a number (empty text, a lone point, signs,
/// letters, surrounding whitespace), mirroring a "not-a-number" sentinel. Zero parses to
/// `Some(0)`. Digits beyond the `Decimal` range are not a number either.
pub fn parse_principal(raw: &str) -> Option<Decimal> {
    if !is_amount_input(raw) {
        return None;
    }

    let (whole, fraction) = raw.split_once('.').unwrap_or((raw, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    let whole = if whole.is_empty() { "0" } else { whole };
    if fraction.is_empty() {
        Decimal::from_str(whole).ok()
    } else {
        Decimal::from_str(&format!("{whole}.{fraction}")).ok()
    }
}

/// Estimated monthly installment: `(principal + warranty_cost) * coefficient[term]`.
///
/// A missing or non-positive principal yields zero, the "nothing to show yet" state.
/// A term absent from the table also yields zero; callers validate terms beforehand.
/// Totals that overflow the `Decimal` range yield zero as well.
pub fn monthly_payment(
    principal: Option<Decimal>,
    term: u32,
    coefficients: &CoefficientTable,
    warranty_cost: Decimal,
) -> Decimal {
    let principal = match principal {
        Some(amount) if amount > Decimal::ZERO => amount,
        _ => return Decimal::ZERO,
    };

    coefficients
        .get(term)
        .and_then(|coefficient| {
            principal
                .checked_add(warranty_cost)
                .and_then(|total| total.checked_mul(coefficient))
        })
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::financing::plans::FinancingPlan;
    use crate::financing::terms::OFFERED_TERMS;

    fn dec(raw: &str) -> Decimal {
        Decimal::from_str(raw).expect("valid decimal")
    }

    #[test]
    fn amount_filter_accepts_digits_and_a_single_point() {
        assert!(is_amount_input(""));
        assert!(is_amount_input("15000"));
        assert!(is_amount_input("15000.50"));
        assert!(is_amount_input(".5"));
        assert!(is_amount_input("7."));
        assert!(!is_amount_input("1.2.3"));
        assert!(!is_amount_input("-5"));
        assert!(!is_amount_input("1e5"));
        assert!(!is_amount_input("12 000"));
    }

    #[test]
    fn parses_partial_amounts_like_the_form_does() {
        assert_eq!(parse_principal("10000"), Some(dec("10000")));
        assert_eq!(parse_principal("7."), Some(dec("7")));
        assert_eq!(parse_principal(".5"), Some(dec("0.5")));
        assert_eq!(parse_principal("0"), Some(Decimal::ZERO));
        assert_eq!(parse_principal("."), None);
        assert_eq!(parse_principal(""), None);
        assert_eq!(parse_principal("abc"), None);
        assert_eq!(parse_principal("-5"), None);
    }

    #[test]
    fn payment_is_principal_times_coefficient_without_warranty() {
        let principal = dec("12345.67");
        for plan in FinancingPlan::ALL {
            let table = CoefficientTable::for_plan(plan);
            for term in OFFERED_TERMS {
                let coefficient = table.get(term).expect("term priced");
                assert_eq!(
                    monthly_payment(Some(principal), term, &table, Decimal::ZERO),
                    principal * coefficient,
                    "{plan} {term}"
                );
            }
        }
    }

    #[test]
    fn invalid_principals_yield_zero_payment() {
        let table = CoefficientTable::cash();
        for raw in ["", "abc", "-5", "0"] {
            let payment = monthly_payment(parse_principal(raw), 60, &table, Decimal::from(750));
            assert_eq!(payment, Decimal::ZERO, "principal {raw:?}");
        }
    }

    #[test]
    fn warranty_cost_is_financed_with_the_principal() {
        let table = CoefficientTable::cash();
        let payment = monthly_payment(Some(dec("10000")), 60, &table, Decimal::from(1500));
        assert_eq!(payment, dec("11500") * dec("0.0214201"));
    }

    #[test]
    fn rejects_surrounding_whitespace_like_the_amount_filter() {
        assert!(!is_amount_input(" 10000 "));
        assert_eq!(parse_principal(" 10000 "), None);
        assert_eq!(parse_principal("10000\n"), None);
    }

    #[test]
    fn amounts_beyond_decimal_range_are_not_a_number() {
        let too_large = "100000000000000000000000000000";
        assert!(is_amount_input(too_large));
        assert_eq!(parse_principal(too_large), None);

        let table = CoefficientTable::cash();
        let payment = monthly_payment(parse_principal(too_large), 60, &table, Decimal::ZERO);
        assert_eq!(payment, Decimal::ZERO);
    }

    #[test]
    fn overflowing_principal_plus_warranty_yields_zero_payment() {
        let largest = parse_principal(&Decimal::MAX.to_string());
        assert_eq!(largest, Some(Decimal::MAX));

        let table = CoefficientTable::cash();
        assert_eq!(
            monthly_payment(largest, 60, &table, Decimal::from(750)),
            Decimal::ZERO
        );
    }

    #[test]
    fn unknown_terms_yield_zero_payment() {
        let table = CoefficientTable::financed();
        assert_eq!(
            monthly_payment(Some(dec("10000")), 61, &table, Decimal::ZERO),
            Decimal::ZERO
        );
    }
}
