//! Buyer and property input records

use crate::error::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Residency status of the buyer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Citizenship {
    /// Singapore Citizen
    Citizen,
    /// Singapore Permanent Resident
    Pr,
    Foreigner,
}

impl Citizenship {
    pub fn as_str(&self) -> &'static str {
        match self {
            Citizenship::Citizen => "citizen",
            Citizenship::Pr => "pr",
            Citizenship::Foreigner => "foreigner",
        }
    }

    /// Property types open to this residency status.
    /// PRs cannot buy landed homes; foreigners are limited to condominiums.
    pub fn eligible_property_types(&self) -> &'static [PropertyType] {
        match self {
            Citizenship::Citizen => &[
                PropertyType::Hdb,
                PropertyType::Condo,
                PropertyType::Ec,
                PropertyType::Landed,
            ],
            Citizenship::Pr => &[PropertyType::Hdb, PropertyType::Condo, PropertyType::Ec],
            Citizenship::Foreigner => &[PropertyType::Condo],
        }
    }

    pub fn may_buy(&self, property_type: PropertyType) -> bool {
        self.eligible_property_types().contains(&property_type)
    }
}

impl FromStr for Citizenship {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "citizen" | "sc" => Ok(Citizenship::Citizen),
            "pr" | "permanent resident" => Ok(Citizenship::Pr),
            "foreigner" => Ok(Citizenship::Foreigner),
            other => Err(CalcError::invalid_input(
                "citizenship",
                format!("unknown citizenship '{}'", other),
            )),
        }
    }
}

impl fmt::Display for Citizenship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Class of residential property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Hdb,
    Condo,
    /// Executive Condominium
    Ec,
    Landed,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Hdb => "hdb",
            PropertyType::Condo => "condo",
            PropertyType::Ec => "ec",
            PropertyType::Landed => "landed",
        }
    }

    /// Condo, EC and landed follow the private-property financing rules
    pub fn is_private(&self) -> bool {
        !matches!(self, PropertyType::Hdb)
    }

    /// MSR only binds on HDB flats and ECs
    pub fn msr_applies(&self) -> bool {
        matches!(self, PropertyType::Hdb | PropertyType::Ec)
    }
}

impl FromStr for PropertyType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hdb" => Ok(PropertyType::Hdb),
            "condo" => Ok(PropertyType::Condo),
            "ec" => Ok(PropertyType::Ec),
            "landed" => Ok(PropertyType::Landed),
            other => Err(CalcError::invalid_input(
                "property_type",
                format!("unknown property type '{}'", other),
            )),
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HDB flat type, used for the resale levy lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlatType {
    #[serde(rename = "2-room")]
    TwoRoom,
    #[serde(rename = "3-room")]
    ThreeRoom,
    #[serde(rename = "4-room")]
    FourRoom,
    #[serde(rename = "5-room")]
    FiveRoom,
    #[serde(rename = "executive")]
    Executive,
    #[serde(rename = "ec")]
    Ec,
}

impl FlatType {
    pub const ALL: [FlatType; 6] = [
        FlatType::TwoRoom,
        FlatType::ThreeRoom,
        FlatType::FourRoom,
        FlatType::FiveRoom,
        FlatType::Executive,
        FlatType::Ec,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FlatType::TwoRoom => "2-room",
            FlatType::ThreeRoom => "3-room",
            FlatType::FourRoom => "4-room",
            FlatType::FiveRoom => "5-room",
            FlatType::Executive => "executive",
            FlatType::Ec => "ec",
        }
    }
}

impl FromStr for FlatType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        FlatType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| {
                CalcError::invalid_input("flat_type", format!("unknown flat type '{}'", s.trim()))
            })
    }
}

impl fmt::Display for FlatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The buyer's circumstances going into a purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyerProfile {
    pub citizenship: Citizenship,

    /// First-time buyer (grant rules)
    #[serde(default)]
    pub is_first_time: bool,

    /// Residential properties already owned before this purchase
    #[serde(default)]
    pub property_count: u32,

    pub annual_income: f64,
    pub cpf_savings: f64,
    pub cash_savings: f64,
}

impl BuyerProfile {
    /// Reject negative or non-finite amounts
    pub fn validate(&self) -> CalcResult<()> {
        check_amount("annual_income", self.annual_income)?;
        check_amount("cpf_savings", self.cpf_savings)?;
        check_amount("cash_savings", self.cash_savings)?;
        Ok(())
    }

    /// Reject a property type this buyer's residency does not allow
    pub fn check_eligible(&self, property_type: PropertyType) -> CalcResult<()> {
        if self.citizenship.may_buy(property_type) {
            return Ok(());
        }
        Err(CalcError::invalid_input(
            "property_type",
            format!("a {} buyer cannot purchase {} property", self.citizenship, property_type),
        ))
    }
}

/// What is being bought and for how much
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyOrder {
    pub property_type: PropertyType,
    pub property_price: f64,
}

impl PropertyOrder {
    pub fn validate(&self) -> CalcResult<()> {
        if !self.property_price.is_finite() || self.property_price <= 0.0 {
            return Err(CalcError::invalid_input(
                "property_price",
                "must be a positive amount",
            ));
        }
        Ok(())
    }
}

fn check_amount(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(field, "must be a number"));
    }
    if value < 0.0 {
        return Err(CalcError::invalid_input(field, "must not be negative"));
    }
    Ok(())
}
