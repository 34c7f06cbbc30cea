//! Vehicle financing calculator: payment estimates for cash-price and financed-price plans,
//! with term eligibility by vehicle age and optional extended warranty.

pub mod config;
pub mod error;
pub mod financing;
pub mod telemetry;
