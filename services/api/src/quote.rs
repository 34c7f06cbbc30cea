use crate::infra::{parse_date, parse_registration, today_or};
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use std::fmt::Write as _;
use std::sync::Arc;
use vehicle_finance::config::AppConfig;
use vehicle_finance::error::AppError;
use vehicle_finance::financing::{
    compare_plans, format_eur, CalculatorInput, FinancingCalculator, FinancingPlan,
    InputAdjustment, PaymentQuote, RateSheet, VehicleClass, WarrantySelection, WarrantyTier,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum PlanArg {
    Cash,
    Financed,
}

impl From<PlanArg> for FinancingPlan {
    fn from(value: PlanArg) -> Self {
        match value {
            PlanArg::Cash => FinancingPlan::Cash,
            PlanArg::Financed => FinancingPlan::Financed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum TierArg {
    Premium,
    GranOcasion,
}

impl From<TierArg> for WarrantyTier {
    fn from(value: TierArg) -> Self {
        match value {
            TierArg::Premium => WarrantyTier::Premium,
            TierArg::GranOcasion => WarrantyTier::GranOcasion,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Amount to finance in euros (digits with an optional decimal point)
    #[arg(long)]
    pub(crate) amount: String,
    /// Loan term in months (24, 36, 48, 60, 72, 84, 96, 108 or 120)
    #[arg(long)]
    pub(crate) term: u32,
    /// Vehicle registration month (YYYY-MM)
    #[arg(long, value_parser = parse_registration)]
    pub(crate) registration: (i32, u32),
    /// Quote a single plan instead of both side by side
    #[arg(long, value_enum)]
    pub(crate) plan: Option<PlanArg>,
    /// Include an extended warranty of the given tier
    #[arg(long, value_enum)]
    pub(crate) warranty: Option<TierArg>,
    /// Warranty duration in years
    #[arg(long, default_value_t = 1)]
    pub(crate) warranty_years: u8,
    /// Price the warranty for an SUV / 4x4
    #[arg(long)]
    pub(crate) suv: bool,
    /// Evaluation date used to age the vehicle (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

impl QuoteArgs {
    fn to_input(&self) -> CalculatorInput {
        let (registration_year, registration_month) = self.registration;
        let warranty = match self.warranty {
            Some(tier) => WarrantySelection {
                included: true,
                tier: tier.into(),
                duration_years: self.warranty_years,
                heavy_vehicle: self.suv,
            },
            None => WarrantySelection {
                heavy_vehicle: self.suv,
                ..WarrantySelection::default()
            },
        };

        CalculatorInput {
            principal: self.amount.clone(),
            term: self.term,
            registration_year,
            registration_month,
            warranty,
        }
    }
}

fn load_rates() -> Result<Arc<RateSheet>, AppError> {
    let config = AppConfig::load()?;
    Ok(Arc::new(config.rates.load_sheet()?))
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let rates = load_rates()?;
    let today = today_or(args.today);
    let input = args.to_input();

    println!("Vehicle financing quote ({today})");
    match args.plan {
        Some(plan) => {
            let quote = FinancingCalculator::new(plan.into(), rates).quote(input, today)?;
            print!("{}", render_quote(&quote));
        }
        None => {
            let comparison = compare_plans(&rates, input, today)?;
            for quote in comparison.quotes() {
                print!("{}", render_quote(quote));
            }
            println!(
                "\nFinanced plan difference: {} per month",
                format_eur(comparison.monthly_difference())
            );
        }
    }

    Ok(())
}

pub(crate) fn run_plans() -> Result<(), AppError> {
    let rates = load_rates()?;
    print!("{}", render_rate_sheet(&rates));
    Ok(())
}

pub(crate) fn render_quote(quote: &PaymentQuote) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{} ({})", quote.plan_label, quote.interest_rate);
    let _ = writeln!(
        out,
        "  Vehicle age: {} months | Term: {} months (coefficient {})",
        quote.vehicle_age_months, quote.term, quote.coefficient
    );

    let disabled: Vec<String> = quote
        .term_options
        .iter()
        .filter(|option| option.disabled)
        .map(|option| option.months.to_string())
        .collect();
    if !disabled.is_empty() {
        let _ = writeln!(out, "  Unavailable terms: {}", disabled.join(", "));
    }

    for adjustment in &quote.adjustments {
        match adjustment {
            InputAdjustment::TermReselected { from, to } => {
                let _ = writeln!(
                    out,
                    "  Note: {from} months exceeds the vehicle age limit, using {to} months"
                );
            }
            InputAdjustment::WarrantyDurationClamped { from, to } => {
                let _ = writeln!(
                    out,
                    "  Note: {from}-year warranty not offered for this tier, using {to} year(s)"
                );
            }
        }
    }

    if quote.warranty.included {
        let class = match quote.warranty.vehicle_class() {
            VehicleClass::Standard => "standard",
            VehicleClass::Suv => "SUV/4x4",
        };
        let _ = writeln!(
            out,
            "  Warranty: {} {} year(s), {} -> {}",
            quote.warranty.tier.label(),
            quote.warranty.duration_years,
            class,
            format_eur(quote.warranty_cost)
        );
    }

    let _ = writeln!(out, "  Monthly payment: {}", quote.formatted_payment);
    if let Some(advisory) = &quote.advisory {
        let _ = writeln!(out, "  ! {advisory}");
    }
    out
}

pub(crate) fn render_rate_sheet(rates: &RateSheet) -> String {
    let mut out = String::new();
    for plan in FinancingPlan::ALL {
        let _ = writeln!(out, "{} ({})", plan.label(), plan.interest_rate_label());
        for (term, coefficient) in rates.coefficients(plan).iter() {
            let _ = writeln!(out, "  {term:>3} months  {coefficient}");
        }
    }

    let _ = writeln!(out, "Warranty prices");
    for (tier, prices) in rates.warranty.iter() {
        for (class, table) in [("standard", &prices.standard), ("suv", &prices.suv)] {
            let durations: Vec<String> = table
                .iter()
                .map(|(years, price)| format!("{years}y {}", format_eur(*price)))
                .collect();
            let _ = writeln!(out, "  {} {class}: {}", tier.label(), durations.join(", "));
        }
    }
    out
}
