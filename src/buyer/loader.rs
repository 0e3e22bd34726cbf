//! Load purchase scenarios from CSV for batch assessment
//!
//! Amount columns follow the parse-with-default policy (blank or garbage = 0);
//! enumerations and the property count are parsed strictly.

use super::{BuyerProfile, PropertyOrder};
use crate::error::{CalcError, CalcResult};
use crate::format::{parse_amount, parse_count};
use csv::Reader;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One buyer + property combination to assess
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseScenario {
    pub scenario_id: u32,
    pub profile: BuyerProfile,
    pub order: PropertyOrder,
}

/// Raw CSV row; every column is text so the parse policy is applied here
#[derive(Debug, Deserialize)]
struct CsvRow {
    scenario_id: u32,
    citizenship: String,
    #[serde(default)]
    is_first_time: String,
    #[serde(default)]
    property_count: String,
    #[serde(default)]
    annual_income: String,
    #[serde(default)]
    cpf_savings: String,
    #[serde(default)]
    cash_savings: String,
    property_type: String,
    #[serde(default)]
    property_price: String,
}

impl CsvRow {
    fn to_scenario(self) -> CalcResult<PurchaseScenario> {
        let is_first_time = match self.is_first_time.trim().to_ascii_lowercase().as_str() {
            "" | "no" | "n" | "false" | "0" => false,
            "yes" | "y" | "true" | "1" => true,
            other => {
                return Err(CalcError::invalid_input(
                    "is_first_time",
                    format!("scenario {}: expected yes/no, got '{}'", self.scenario_id, other),
                ))
            }
        };

        Ok(PurchaseScenario {
            scenario_id: self.scenario_id,
            profile: BuyerProfile {
                citizenship: self.citizenship.parse()?,
                is_first_time,
                property_count: parse_count("property_count", &self.property_count)?,
                annual_income: parse_amount(&self.annual_income),
                cpf_savings: parse_amount(&self.cpf_savings),
                cash_savings: parse_amount(&self.cash_savings),
            },
            order: PropertyOrder {
                property_type: self.property_type.parse()?,
                property_price: parse_amount(&self.property_price),
            },
        })
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> CalcResult<Vec<PurchaseScenario>> {
    let reader = Reader::from_path(path)?;
    collect_scenarios(reader)
}

/// Load scenarios from any reader (string buffer, stdin, ...)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> CalcResult<Vec<PurchaseScenario>> {
    collect_scenarios(Reader::from_reader(reader))
}

fn collect_scenarios<R: std::io::Read>(mut reader: Reader<R>) -> CalcResult<Vec<PurchaseScenario>> {
    let mut scenarios = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.to_scenario()?);
    }
    log::info!("loaded {} purchase scenarios", scenarios.len());
    Ok(scenarios)
}
