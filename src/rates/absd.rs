//! Additional Buyer's Stamp Duty rates by residency and existing property count

use crate::buyer::Citizenship;
use serde::{Deserialize, Serialize};

/// ABSD percentages for one residency status
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbsdRow {
    pub citizenship: Citizenship,
    /// Rate when no property is owned yet (percent)
    pub first: f64,
    /// Rate when one property is owned (percent)
    pub second: f64,
    /// Rate when two or more are owned (percent)
    pub subsequent: f64,
}

/// ABSD lookup table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsdTable {
    rows: Vec<AbsdRow>,
}

impl AbsdTable {
    pub fn from_rows(rows: Vec<AbsdRow>) -> Self {
        Self { rows }
    }

    /// Rates in force from April 2023
    pub fn singapore_2024() -> Self {
        Self {
            rows: vec![
                AbsdRow { citizenship: Citizenship::Citizen, first: 0.0, second: 20.0, subsequent: 30.0 },
                AbsdRow { citizenship: Citizenship::Pr, first: 5.0, second: 30.0, subsequent: 35.0 },
                AbsdRow { citizenship: Citizenship::Foreigner, first: 60.0, second: 60.0, subsequent: 60.0 },
            ],
        }
    }

    pub fn rows(&self) -> &[AbsdRow] {
        &self.rows
    }

    /// ABSD rate in percent; `property_count` is the count held before this purchase
    pub fn rate(&self, citizenship: Citizenship, property_count: u32) -> f64 {
        let Some(row) = self.rows.iter().find(|r| r.citizenship == citizenship) else {
            log::warn!("no ABSD row for {}, assuming 0%", citizenship);
            return 0.0;
        };
        match property_count {
            0 => row.first,
            1 => row.second,
            _ => row.subsequent,
        }
    }
}

impl Default for AbsdTable {
    fn default() -> Self {
        Self::singapore_2024()
    }
}
