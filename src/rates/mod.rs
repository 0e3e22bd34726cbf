//! Versioned rate tables: stamp duty bands, ABSD, property tax, bank packages,
//! lending limits, BUC milestones and seller-side tables

mod absd;
mod brackets;
mod lenders;
mod parameters;
mod progress;
mod seller;
pub mod loader;

pub use absd::{AbsdRow, AbsdTable};
pub use brackets::{PropertyTaxSchedules, TaxBracket, TieredSchedule};
pub use lenders::{LenderOffer, LenderTable, RateKind, DEFAULT_SORA_3M};
pub use parameters::{LeaseDutyRules, LendingLimits, PARAMETER_TERMS};
pub use progress::{Milestone, ProgressSchedule};
pub use seller::{ResaleLevyRow, ResaleLevyTable, SellerTables, SsdBand, SsdSchedule};

use crate::error::CalcResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for every table the calculators read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTables {
    /// Label of the table set, e.g. "IRAS-2024"
    pub version: String,
    pub bsd: TieredSchedule,
    pub absd: AbsdTable,
    pub property_tax: PropertyTaxSchedules,
    pub lenders: LenderTable,
    pub limits: LendingLimits,
    pub progress: ProgressSchedule,
    pub seller: SellerTables,
    pub lease: LeaseDutyRules,
}

impl RateTables {
    /// Built-in 2024 IRAS / MAS / HDB figures
    pub fn singapore_2024() -> Self {
        Self {
            version: "IRAS-2024".to_string(),
            bsd: TieredSchedule::bsd_2024(),
            absd: AbsdTable::singapore_2024(),
            property_tax: PropertyTaxSchedules::default(),
            lenders: LenderTable::sample_2024(),
            limits: LendingLimits::default(),
            progress: ProgressSchedule::buc_standard(),
            seller: SellerTables::default(),
            lease: LeaseDutyRules::default(),
        }
    }

    /// Load tables from CSV files in the default location (data/rates/)
    pub fn from_csv() -> CalcResult<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_RATES_PATH))
    }

    /// Load tables from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> CalcResult<Self> {
        loader::load_rate_tables(path)
    }

    /// Apply one scalar override from parameters.csv; false if the term is unknown
    pub fn apply_parameter(&mut self, term: &str, value: f64) -> bool {
        match term {
            "sora_3m" => {
                self.lenders.sora_3m = value;
                true
            }
            "cpf_accrued_rate" => {
                self.seller.cpf_accrued_rate = value;
                true
            }
            _ => self.limits.apply(term, value) || self.lease.apply(term, value),
        }
    }

    /// Every scalar parameter with its current value
    pub fn parameter_terms(&self) -> Vec<(&'static str, f64)> {
        let mut terms = self.limits.terms();
        terms.push(("sora_3m", self.lenders.sora_3m));
        terms.push(("cpf_accrued_rate", self.seller.cpf_accrued_rate));
        terms.extend(self.lease.terms());
        terms
    }
}

impl Default for RateTables {
    fn default() -> Self {
        Self::singapore_2024()
    }
}
