use chrono::{Datelike, NaiveDate};

/// Whole months elapsed between the registration month and `today`, floored at zero.
///
/// `registration_month` is 1-indexed (January = 1). Future registrations yield zero.
pub fn vehicle_age_months(
    registration_year: i32,
    registration_month: u32,
    today: NaiveDate,
) -> u32 {
    let years = i64::from(today.year()) - i64::from(registration_year);
    let months = i64::from(today.month()) - i64::from(registration_month);
    let age = years * 12 + months;
    u32::try_from(age.max(0)).unwrap_or(u32::MAX)
}
