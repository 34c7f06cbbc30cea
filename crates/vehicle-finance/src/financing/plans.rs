use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The two financing products quoted side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancingPlan {
    /// Financing over the cash price of the vehicle.
    Cash,
    /// Financing over the financed price of the vehicle.
    Financed,
}

impl FinancingPlan {
    pub const ALL: [FinancingPlan; 2] = [FinancingPlan::Cash, FinancingPlan::Financed];

    pub fn label(&self) -> &'static str {
        match self {
            FinancingPlan::Cash => "Precio Contado",
            FinancingPlan::Financed => "Precio Financiado",
        }
    }

    pub fn interest_rate_label(&self) -> &'static str {
        match self {
            FinancingPlan::Cash => "4,99% T.I.N.",
            FinancingPlan::Financed => "9,99% T.I.N.",
        }
    }
}

impl fmt::Display for FinancingPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinancingPlan::Cash => f.write_str("cash"),
            FinancingPlan::Financed => f.write_str("financed"),
        }
    }
}

/// Per-euro monthly payment multipliers keyed by term in months.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoefficientTable(BTreeMap<u32, Decimal>);

impl CoefficientTable {
    pub fn new(entries: BTreeMap<u32, Decimal>) -> Self {
        Self(entries)
    }

    /// Reference table for the cash-price plan (4,99% T.I.N.).
    pub fn cash() -> Self {
        Self::from_scaled(&[
            (24, 482_992),
            (36, 333_337),
            (48, 258_705),
            (60, 214_201),
            (72, 184_802),
            (84, 163_969),
            (96, 148_665),
            (108, 136_140),
            (120, 126_620),
        ])
    }

    /// Reference table for the financed-price plan (9,99% T.I.N.).
    pub fn financed() -> Self {
        Self::from_scaled(&[
            (24, 508_023),
            (36, 358_878),
            (48, 284_919),
            (60, 241_171),
            (72, 212_585),
            (84, 192_596),
            (96, 178_195),
            (108, 168_177),
            (120, 160_917),
        ])
    }

    pub fn for_plan(plan: FinancingPlan) -> Self {
        match plan {
            FinancingPlan::Cash => Self::cash(),
            FinancingPlan::Financed => Self::financed(),
        }
    }

    // Coefficients are published with seven decimal places.
    fn from_scaled(entries: &[(u32, i64)]) -> Self {
        Self(
            entries
                .iter()
                .map(|&(term, mantissa)| (term, Decimal::new(mantissa, 7)))
                .collect(),
        )
    }

    pub fn get(&self, term: u32) -> Option<Decimal> {
        self.0.get(&term).copied()
    }

    pub fn terms(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, Decimal)> + '_ {
        self.0.iter().map(|(term, coefficient)| (*term, *coefficient))
    }

    /// Terms whose coefficient is not strictly lower than the previous (shorter) term.
    pub fn non_decreasing_terms(&self) -> Vec<u32> {
        self.0
            .iter()
            .zip(self.0.iter().skip(1))
            .filter(|((_, shorter), (_, longer))| longer >= shorter)
            .map(|(_, (term, _))| *term)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::financing::terms::OFFERED_TERMS;
    use std::str::FromStr;

    #[test]
    fn reference_tables_cover_every_offered_term() {
        for plan in FinancingPlan::ALL {
            let table = CoefficientTable::for_plan(plan);
            let terms: Vec<u32> = table.terms().collect();
            assert_eq!(terms, OFFERED_TERMS.to_vec(), "{plan} table terms");
        }
    }

    #[test]
    fn reference_coefficients_keep_published_precision() {
        let cash = CoefficientTable::cash();
        assert_eq!(cash.get(60), Some(Decimal::from_str("0.0214201").unwrap()));
        assert_eq!(cash.get(108), Some(Decimal::from_str("0.0136140").unwrap()));

        let financed = CoefficientTable::financed();
        assert_eq!(financed.get(24), Some(Decimal::from_str("0.0508023").unwrap()));
        assert_eq!(financed.get(12), None);
    }

    #[test]
    fn reference_coefficients_decrease_with_term() {
        assert!(CoefficientTable::cash().non_decreasing_terms().is_empty());
        assert!(CoefficientTable::financed().non_decreasing_terms().is_empty());
    }

    #[test]
    fn reports_terms_breaking_the_decreasing_order() {
        let mut entries = BTreeMap::new();
        entries.insert(24, Decimal::new(5, 2));
        entries.insert(36, Decimal::new(6, 2));
        entries.insert(48, Decimal::new(4, 2));
        let table = CoefficientTable::new(entries);
        assert_eq!(table.non_decreasing_terms(), vec![36]);
    }

    #[test]
    fn financed_plan_costs_more_per_euro_than_cash() {
        let cash = CoefficientTable::cash();
        let financed = CoefficientTable::financed();
        for term in OFFERED_TERMS {
            assert!(financed.get(term) > cash.get(term), "term {term}");
        }
    }
}
