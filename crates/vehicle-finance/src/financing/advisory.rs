/// Term that triggers the manual-review advisory for older vehicles.
pub const REVIEW_TERM: u32 = 120;

/// Vehicle age (months) from which the longest term needs a manual review.
pub const REVIEW_MIN_VEHICLE_AGE: u32 = 24;

pub const REVIEW_MESSAGE: &str = "Revisar con el departamento de financiación";

/// Non-blocking flag: the term stays selectable, the operation is just routed for review.
pub fn needs_review(term: u32, vehicle_age_months: u32) -> bool {
    term == REVIEW_TERM && vehicle_age_months >= REVIEW_MIN_VEHICLE_AGE
}
