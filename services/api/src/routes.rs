use crate::infra::{deserialize_optional_date, today_or, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use vehicle_finance::error::AppError;
use vehicle_finance::financing::{
    compare_plans, CalculatorInput, FinancingCalculator, FinancingPlan, PaymentQuote,
    QuoteComparison, WarrantySelection, WarrantyTier, OFFERED_TERMS,
};

/// Warranty block of a quote request; its presence means the warranty is included.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WarrantyRequest {
    pub(crate) tier: WarrantyTier,
    pub(crate) duration_years: u8,
    #[serde(default)]
    pub(crate) suv: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CalculatorRequest {
    #[serde(default)]
    pub(crate) principal: String,
    pub(crate) term: u32,
    pub(crate) registration_year: i32,
    pub(crate) registration_month: u32,
    #[serde(default)]
    pub(crate) warranty: Option<WarrantyRequest>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

impl CalculatorRequest {
    fn into_input(self) -> (CalculatorInput, NaiveDate) {
        let warranty = self
            .warranty
            .map(|warranty| WarrantySelection {
                included: true,
                tier: warranty.tier,
                duration_years: warranty.duration_years,
                heavy_vehicle: warranty.suv,
            })
            .unwrap_or_default();

        let input = CalculatorInput {
            principal: self.principal,
            term: self.term,
            registration_year: self.registration_year,
            registration_month: self.registration_month,
            warranty,
        };
        (input, today_or(self.today))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuoteRequest {
    pub(crate) plan: FinancingPlan,
    #[serde(flatten)]
    pub(crate) calculator: CalculatorRequest,
}

#[derive(Debug, Serialize)]
pub(crate) struct PlanView {
    pub(crate) plan: FinancingPlan,
    pub(crate) label: &'static str,
    pub(crate) interest_rate: &'static str,
    pub(crate) coefficients: BTreeMap<u32, Decimal>,
}

#[derive(Debug, Serialize)]
pub(crate) struct WarrantyTierView {
    pub(crate) tier: WarrantyTier,
    pub(crate) label: &'static str,
    pub(crate) durations: &'static [u8],
    pub(crate) standard: BTreeMap<u8, Decimal>,
    pub(crate) suv: BTreeMap<u8, Decimal>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PlansResponse {
    pub(crate) terms: Vec<u32>,
    pub(crate) plans: Vec<PlanView>,
    pub(crate) warranties: Vec<WarrantyTierView>,
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/plans", get(plans_endpoint))
        .route("/api/v1/quotes", post(quote_endpoint))
        .route("/api/v1/quotes/compare", post(compare_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn plans_endpoint(Extension(state): Extension<AppState>) -> Json<PlansResponse> {
    let plans = FinancingPlan::ALL
        .iter()
        .map(|&plan| PlanView {
            plan,
            label: plan.label(),
            interest_rate: plan.interest_rate_label(),
            coefficients: state.rates.coefficients(plan).iter().collect(),
        })
        .collect();

    let warranties = state
        .rates
        .warranty
        .iter()
        .map(|(tier, prices)| WarrantyTierView {
            tier,
            label: tier.label(),
            durations: tier.allowed_durations(),
            standard: prices.standard.clone(),
            suv: prices.suv.clone(),
        })
        .collect();

    Json(PlansResponse {
        terms: OFFERED_TERMS.to_vec(),
        plans,
        warranties,
    })
}

pub(crate) async fn quote_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<QuoteRequest>,
) -> Result<Json<PaymentQuote>, AppError> {
    let QuoteRequest { plan, calculator } = payload;
    let (input, today) = calculator.into_input();
    let quote = FinancingCalculator::new(plan, Arc::clone(&state.rates)).quote(input, today)?;
    Ok(Json(quote))
}

pub(crate) async fn compare_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<CalculatorRequest>,
) -> Result<Json<QuoteComparison>, AppError> {
    let (input, today) = payload.into_input();
    let comparison = compare_plans(&state.rates, input, today)?;
    Ok(Json(comparison))
}
