use rust_decimal::{Decimal, RoundingStrategy};

/// Render an amount as Spanish-locale euros, e.g. `12.345,68 €`.
///
/// Two decimals, rounded half away from zero. Thousands are grouped with `.` only when the
/// integer part has five or more digits, matching the `es-ES` minimum grouping rule.
pub fn format_eur(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);

    let text = rounded.abs().to_string();
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!("{sign}{},{cents} €", group_thousands(whole))
}

fn group_thousands(digits: &str) -> String {
    if digits.len() < 5 {
        return digits.to_string();
    }

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}
