//! Calculator pipeline: normalize the form input, price the warranty and the installment,
//! then raise the review advisory.

mod input;
mod quote;

pub use input::{normalize_input, CalculatorInput, InputAdjustment, NormalizedInput};
pub use quote::{PaymentQuote, QuoteComparison};

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use super::advisory::{needs_review, REVIEW_MESSAGE};
use super::format::format_eur;
use super::payment::{monthly_payment, parse_principal};
use super::plans::FinancingPlan;
use super::rate_sheet::RateSheet;
use super::terms::term_options;

/// Stateless calculator bound to one financing plan.
#[derive(Debug, Clone)]
pub struct FinancingCalculator {
    plan: FinancingPlan,
    rates: Arc<RateSheet>,
}

impl FinancingCalculator {
    pub fn new(plan: FinancingPlan, rates: Arc<RateSheet>) -> Self {
        Self { plan, rates }
    }

    pub fn plan(&self) -> FinancingPlan {
        self.plan
    }

    pub fn quote(
        &self,
        input: CalculatorInput,
        today: NaiveDate,
    ) -> Result<PaymentQuote, QuoteError> {
        let normalized = normalize_input(input, today)?;
        self.price(normalized)
    }

    /// Price an input that already went through [`normalize_input`].
    pub fn price(&self, normalized: NormalizedInput) -> Result<PaymentQuote, QuoteError> {
        let NormalizedInput {
            input,
            vehicle_age_months,
            adjustments,
        } = normalized;

        let coefficients = self.rates.coefficients(self.plan);
        let coefficient = coefficients
            .get(input.term)
            .ok_or(QuoteError::MissingCoefficient {
                plan: self.plan,
                term: input.term,
            })?;

        let principal = parse_principal(&input.principal);
        let warranty_cost = self.rates.warranty.cost(&input.warranty);
        let payment = monthly_payment(principal, input.term, coefficients, warranty_cost);
        let review = needs_review(input.term, vehicle_age_months);

        debug!(
            plan = %self.plan,
            term = input.term,
            vehicle_age_months,
            %warranty_cost,
            %payment,
            review,
            "priced calculator input"
        );

        Ok(PaymentQuote {
            plan: self.plan,
            plan_label: self.plan.label().to_string(),
            interest_rate: self.plan.interest_rate_label().to_string(),
            principal,
            term: input.term,
            coefficient,
            vehicle_age_months,
            term_options: term_options(input.term, vehicle_age_months),
            warranty: input.warranty,
            warranty_cost,
            monthly_payment: payment,
            formatted_payment: format_eur(payment),
            needs_review: review,
            advisory: review.then(|| REVIEW_MESSAGE.to_string()),
            adjustments,
        })
    }
}

/// Quote the same input under both plans. Each plan runs its own pipeline.
pub fn compare_plans(
    rates: &Arc<RateSheet>,
    input: CalculatorInput,
    today: NaiveDate,
) -> Result<QuoteComparison, QuoteError> {
    let cash = FinancingCalculator::new(FinancingPlan::Cash, Arc::clone(rates))
        .quote(input.clone(), today)?;
    let financed =
        FinancingCalculator::new(FinancingPlan::Financed, Arc::clone(rates)).quote(input, today)?;
    Ok(QuoteComparison { cash, financed })
}

#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("vehicle is {vehicle_age_months} months old; no financing term fits the 180-month limit")]
    NoEligibleTerm { vehicle_age_months: u32 },
    #[error("term of {0} months is not offered")]
    UnsupportedTerm(u32),
    #[error("registration month {0} must be between 1 and 12")]
    InvalidRegistrationMonth(u32),
    #[error("{plan} rate sheet has no coefficient for {term} months")]
    MissingCoefficient { plan: FinancingPlan, term: u32 },
}
