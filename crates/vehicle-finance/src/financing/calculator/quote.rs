use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::input::InputAdjustment;
use crate::financing::plans::FinancingPlan;
use crate::financing::terms::TermOption;
use crate::financing::warranty::WarrantySelection;

/// Priced outcome of one calculator for one input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentQuote {
    pub plan: FinancingPlan,
    pub plan_label: String,
    pub interest_rate: String,
    /// Parsed principal; `None` when the amount is not a number.
    pub principal: Option<Decimal>,
    pub term: u32,
    pub coefficient: Decimal,
    pub vehicle_age_months: u32,
    pub term_options: Vec<TermOption>,
    pub warranty: WarrantySelection,
    pub warranty_cost: Decimal,
    pub monthly_payment: Decimal,
    pub formatted_payment: String,
    pub needs_review: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
    pub adjustments: Vec<InputAdjustment>,
}

impl PaymentQuote {
    pub fn has_payment(&self) -> bool {
        self.monthly_payment > Decimal::ZERO
    }
}

/// Cash and financed quotes for the same input, side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteComparison {
    pub cash: PaymentQuote,
    pub financed: PaymentQuote,
}

impl QuoteComparison {
    /// Extra monthly cost of the financed-price plan over the cash-price plan.
    pub fn monthly_difference(&self) -> Decimal {
        self.financed.monthly_payment - self.cash.monthly_payment
    }

    pub fn quotes(&self) -> [&PaymentQuote; 2] {
        [&self.cash, &self.financed]
    }
}
