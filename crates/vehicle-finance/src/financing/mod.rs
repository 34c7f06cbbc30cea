//! Vehicle financing: coefficient tables, warranty pricing, term eligibility and the
//! per-plan payment calculator.

pub mod advisory;
pub mod calculator;
pub mod format;
pub mod payment;
pub mod plans;
pub mod rate_sheet;
pub mod terms;
pub mod vehicle;
pub mod warranty;

pub use advisory::{needs_review, REVIEW_MESSAGE};
pub use calculator::{
    compare_plans, normalize_input, CalculatorInput, FinancingCalculator, InputAdjustment,
    NormalizedInput, PaymentQuote, QuoteComparison, QuoteError,
};
pub use format::format_eur;
pub use payment::{is_amount_input, monthly_payment, parse_principal};
pub use plans::{CoefficientTable, FinancingPlan};
pub use rate_sheet::{RateSheet, RateSheetError};
pub use terms::{
    first_eligible_term, is_offered_term, is_term_disabled, term_options, TermOption,
    MAX_COMBINED_MONTHS, OFFERED_TERMS,
};
pub use vehicle::vehicle_age_months;
pub use warranty::{
    warranty_cost, ClassPrices, VehicleClass, WarrantyPriceTable, WarrantySelection, WarrantyTier,
};
