use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::plans::{CoefficientTable, FinancingPlan};
use super::terms::OFFERED_TERMS;
use super::warranty::{VehicleClass, WarrantyPriceTable, WarrantyTier};

/// Immutable pricing configuration shared by every calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSheet {
    pub cash: CoefficientTable,
    pub financed: CoefficientTable,
    pub warranty: WarrantyPriceTable,
}

impl Default for RateSheet {
    fn default() -> Self {
        Self::standard()
    }
}

impl RateSheet {
    /// Built-in reference tables.
    pub fn standard() -> Self {
        Self {
            cash: CoefficientTable::cash(),
            financed: CoefficientTable::financed(),
            warranty: WarrantyPriceTable::standard(),
        }
    }

    pub fn coefficients(&self, plan: FinancingPlan) -> &CoefficientTable {
        match plan {
            FinancingPlan::Cash => &self.cash,
            FinancingPlan::Financed => &self.financed,
        }
    }

    /// Load and validate a JSON rate sheet.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RateSheetError> {
        let sheet: RateSheet = serde_json::from_reader(reader)?;
        sheet.validate()?;
        Ok(sheet)
    }

    pub fn from_path(path: &Path) -> Result<Self, RateSheetError> {
        let file = File::open(path).map_err(|source| RateSheetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Check the structural invariants every calculator relies on.
    ///
    /// Coefficients that do not decrease with the term are accepted but logged.
    pub fn validate(&self) -> Result<(), RateSheetError> {
        for plan in FinancingPlan::ALL {
            let table = self.coefficients(plan);
            let terms: Vec<u32> = table.terms().collect();
            if terms != OFFERED_TERMS {
                return Err(RateSheetError::TermCoverage { plan, terms });
            }
            if let Some((term, coefficient)) =
                table.iter().find(|(_, coefficient)| *coefficient <= Decimal::ZERO)
            {
                return Err(RateSheetError::NonPositiveCoefficient {
                    plan,
                    term,
                    coefficient,
                });
            }
            let out_of_order = table.non_decreasing_terms();
            if !out_of_order.is_empty() {
                warn!(%plan, terms = ?out_of_order, "coefficients do not decrease with term");
            }
        }

        for tier in WarrantyTier::ALL {
            let prices = self
                .warranty
                .tier(tier)
                .ok_or(RateSheetError::MissingWarrantyTier(tier))?;
            for class in [VehicleClass::Standard, VehicleClass::Suv] {
                let durations: Vec<u8> = prices.for_class(class).keys().copied().collect();
                if durations != tier.allowed_durations() {
                    return Err(RateSheetError::WarrantyDurations {
                        tier,
                        class,
                        durations,
                    });
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RateSheetError {
    #[error("failed to read rate sheet {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("rate sheet is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{plan} coefficients must cover exactly the offered terms, found {terms:?}")]
    TermCoverage { plan: FinancingPlan, terms: Vec<u32> },
    #[error("{plan} coefficient for {term} months must be positive, found {coefficient}")]
    NonPositiveCoefficient {
        plan: FinancingPlan,
        term: u32,
        coefficient: Decimal,
    },
    #[error("warranty tier {0:?} has no prices")]
    MissingWarrantyTier(WarrantyTier),
    #[error("warranty tier {tier:?} ({class:?}) prices unexpected durations {durations:?}")]
    WarrantyDurations {
        tier: WarrantyTier,
        class: VehicleClass,
        durations: Vec<u8>,
    },
}
