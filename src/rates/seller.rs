//! Seller-side tables: SSD by holding period, HDB resale levy, CPF accrued interest

use crate::buyer::FlatType;
use serde::{Deserialize, Serialize};

/// SSD rate for sales within `max_holding_years` of purchase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SsdBand {
    pub max_holding_years: f64,
    /// Percent of selling price
    pub rate: f64,
}

/// Seller's Stamp Duty schedule, bands in ascending holding period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SsdSchedule {
    bands: Vec<SsdBand>,
}

impl SsdSchedule {
    pub fn from_bands(mut bands: Vec<SsdBand>) -> Self {
        bands.sort_by(|a, b| a.max_holding_years.total_cmp(&b.max_holding_years));
        Self { bands }
    }

    /// Residential SSD for property bought on or after 11 March 2017
    pub fn residential_2017() -> Self {
        Self::from_bands(vec![
            SsdBand { max_holding_years: 1.0, rate: 12.0 },
            SsdBand { max_holding_years: 2.0, rate: 8.0 },
            SsdBand { max_holding_years: 3.0, rate: 4.0 },
        ])
    }

    pub fn bands(&self) -> &[SsdBand] {
        &self.bands
    }

    /// Rate in percent; zero once the holding period reaches the last band
    pub fn rate_for(&self, holding_years: f64) -> f64 {
        self.bands
            .iter()
            .find(|band| holding_years < band.max_holding_years)
            .map(|band| band.rate)
            .unwrap_or(0.0)
    }
}

impl Default for SsdSchedule {
    fn default() -> Self {
        Self::residential_2017()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResaleLevyRow {
    pub flat_type: FlatType,
    pub levy: f64,
}

/// Resale levy owed on a second subsidised flat, keyed by the first flat's type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResaleLevyTable {
    rows: Vec<ResaleLevyRow>,
}

impl ResaleLevyTable {
    pub fn from_rows(rows: Vec<ResaleLevyRow>) -> Self {
        Self { rows }
    }

    pub fn hdb_2024() -> Self {
        Self::from_rows(vec![
            ResaleLevyRow { flat_type: FlatType::TwoRoom, levy: 15_000.0 },
            ResaleLevyRow { flat_type: FlatType::ThreeRoom, levy: 30_000.0 },
            ResaleLevyRow { flat_type: FlatType::FourRoom, levy: 40_000.0 },
            ResaleLevyRow { flat_type: FlatType::FiveRoom, levy: 45_000.0 },
            ResaleLevyRow { flat_type: FlatType::Executive, levy: 50_000.0 },
            ResaleLevyRow { flat_type: FlatType::Ec, levy: 55_000.0 },
        ])
    }

    pub fn rows(&self) -> &[ResaleLevyRow] {
        &self.rows
    }

    pub fn levy_for(&self, flat_type: FlatType) -> f64 {
        self.rows
            .iter()
            .find(|row| row.flat_type == flat_type)
            .map(|row| row.levy)
            .unwrap_or(0.0)
    }
}

impl Default for ResaleLevyTable {
    fn default() -> Self {
        Self::hdb_2024()
    }
}

/// Everything the net-proceeds calculation looks up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerTables {
    pub ssd: SsdSchedule,
    pub resale_levy: ResaleLevyTable,
    /// CPF Ordinary Account rate accrued on housing withdrawals
    pub cpf_accrued_rate: f64,
}

impl Default for SellerTables {
    fn default() -> Self {
        Self {
            ssd: SsdSchedule::default(),
            resale_levy: ResaleLevyTable::default(),
            cpf_accrued_rate: 0.025,
        }
    }
}
