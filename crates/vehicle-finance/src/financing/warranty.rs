use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Extended-warranty product level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarrantyTier {
    Premium,
    GranOcasion,
}

impl WarrantyTier {
    pub const ALL: [WarrantyTier; 2] = [WarrantyTier::Premium, WarrantyTier::GranOcasion];

    /// Durations (years) offered for the tier.
    pub fn allowed_durations(&self) -> &'static [u8] {
        match self {
            WarrantyTier::Premium => &[1, 2, 3],
            WarrantyTier::GranOcasion => &[1, 2],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WarrantyTier::Premium => "Premium",
            WarrantyTier::GranOcasion => "Gran Ocasión",
        }
    }
}

/// Vehicle class used to price the warranty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleClass {
    Standard,
    Suv,
}

impl VehicleClass {
    pub fn from_heavy_flag(is_heavy_vehicle: bool) -> Self {
        if is_heavy_vehicle {
            VehicleClass::Suv
        } else {
            VehicleClass::Standard
        }
    }
}

/// Warranty choice as captured from the calculator form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarrantySelection {
    pub included: bool,
    pub tier: WarrantyTier,
    pub duration_years: u8,
    pub heavy_vehicle: bool,
}

impl Default for WarrantySelection {
    fn default() -> Self {
        Self {
            included: false,
            tier: WarrantyTier::Premium,
            duration_years: 1,
            heavy_vehicle: false,
        }
    }
}

impl WarrantySelection {
    pub fn vehicle_class(&self) -> VehicleClass {
        VehicleClass::from_heavy_flag(self.heavy_vehicle)
    }

    /// Clamp the duration back to one year when the tier does not offer it.
    ///
    /// Returns the previous duration when a clamp happened.
    pub fn normalize(&mut self) -> Option<u8> {
        if self.tier == WarrantyTier::GranOcasion && self.duration_years > 2 {
            let previous = self.duration_years;
            self.duration_years = 1;
            return Some(previous);
        }
        None
    }
}

/// Flat warranty prices for one tier, split by vehicle class and duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassPrices {
    pub standard: BTreeMap<u8, Decimal>,
    pub suv: BTreeMap<u8, Decimal>,
}

impl ClassPrices {
    fn from_euros(standard: &[(u8, i64)], suv: &[(u8, i64)]) -> Self {
        let collect = |entries: &[(u8, i64)]| -> BTreeMap<u8, Decimal> {
            entries
                .iter()
                .map(|&(years, euros)| (years, Decimal::from(euros)))
                .collect()
        };
        Self {
            standard: collect(standard),
            suv: collect(suv),
        }
    }

    pub fn for_class(&self, class: VehicleClass) -> &BTreeMap<u8, Decimal> {
        match class {
            VehicleClass::Standard => &self.standard,
            VehicleClass::Suv => &self.suv,
        }
    }
}

/// Warranty prices keyed by tier, vehicle class and duration in years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WarrantyPriceTable(BTreeMap<WarrantyTier, ClassPrices>);

impl WarrantyPriceTable {
    pub fn new(tiers: BTreeMap<WarrantyTier, ClassPrices>) -> Self {
        Self(tiers)
    }

    pub fn standard() -> Self {
        let mut tiers = BTreeMap::new();
        tiers.insert(
            WarrantyTier::Premium,
            ClassPrices::from_euros(
                &[(1, 750), (2, 1500), (3, 2250)],
                &[(1, 900), (2, 1800), (3, 2700)],
            ),
        );
        tiers.insert(
            WarrantyTier::GranOcasion,
            ClassPrices::from_euros(&[(1, 499), (2, 1295)], &[(1, 599), (2, 1395)]),
        );
        Self(tiers)
    }

    pub fn tier(&self, tier: WarrantyTier) -> Option<&ClassPrices> {
        self.0.get(&tier)
    }

    pub fn price(
        &self,
        tier: WarrantyTier,
        class: VehicleClass,
        duration_years: u8,
    ) -> Option<Decimal> {
        self.tier(tier)
            .and_then(|prices| prices.for_class(class).get(&duration_years))
            .copied()
    }

    /// Cost added to the financed principal.
    ///
    /// Durations the tier does not price resolve to zero instead of failing.
    pub fn cost(&self, selection: &WarrantySelection) -> Decimal {
        warranty_cost(
            self,
            selection.included,
            selection.tier,
            selection.duration_years,
            selection.heavy_vehicle,
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (WarrantyTier, &ClassPrices)> + '_ {
        self.0.iter().map(|(tier, prices)| (*tier, prices))
    }
}

pub fn warranty_cost(
    table: &WarrantyPriceTable,
    included: bool,
    tier: WarrantyTier,
    duration_years: u8,
    is_heavy_vehicle: bool,
) -> Decimal {
    if !included {
        return Decimal::ZERO;
    }
    table
        .price(
            tier,
            VehicleClass::from_heavy_flag(is_heavy_vehicle),
            duration_years,
        )
        .unwrap_or(Decimal::ZERO)
}
