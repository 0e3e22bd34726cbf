//! Scalar policy parameters: servicing ratios, LTV caps, fees, lease duty rules

use serde::{Deserialize, Serialize};

/// Loan limits and fixed purchase costs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LendingLimits {
    /// Total Debt Servicing Ratio
    pub tdsr: f64,
    /// Mortgage Servicing Ratio (HDB / EC)
    pub msr: f64,
    /// Annual rate used to size the TDSR loan
    pub stress_rate: f64,
    pub stress_tenure_years: f64,
    pub ltv_hdb: f64,
    pub ltv_private: f64,
    /// Minimum cash share of price for private property
    pub min_cash_private: f64,
    /// Flat conveyancing estimate
    pub legal_fees: f64,
    pub renovation_hdb: f64,
    pub renovation_condo: f64,
    pub renovation_landed: f64,
}

impl Default for LendingLimits {
    fn default() -> Self {
        Self {
            tdsr: 0.55,
            msr: 0.30,
            stress_rate: 0.035,
            stress_tenure_years: 25.0,
            ltv_hdb: 0.80,
            ltv_private: 0.75,
            min_cash_private: 0.05,
            legal_fees: 3_000.0,
            renovation_hdb: 50_000.0,
            renovation_condo: 80_000.0,
            renovation_landed: 120_000.0,
        }
    }
}

/// Stamp duty on tenancy agreements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseDutyRules {
    pub rate: f64,
    /// Leases up to this many years pay on total rent; longer ones on 4x average annual rent
    pub full_term_years: f64,
    pub minimum_duty: f64,
}

impl Default for LeaseDutyRules {
    fn default() -> Self {
        Self {
            rate: 0.004,
            full_term_years: 4.0,
            minimum_duty: 1.0,
        }
    }
}

/// Parameter terms understood in `parameters.csv`
pub const PARAMETER_TERMS: [&str; 16] = [
    "tdsr",
    "msr",
    "stress_rate",
    "stress_tenure_years",
    "ltv_hdb",
    "ltv_private",
    "min_cash_private",
    "legal_fees",
    "renovation_hdb",
    "renovation_condo",
    "renovation_landed",
    "sora_3m",
    "cpf_accrued_rate",
    "lease_rate",
    "lease_full_term_years",
    "lease_min_duty",
];

impl LendingLimits {
    /// Apply one named override; returns false when the term is not a lending limit
    pub fn apply(&mut self, term: &str, value: f64) -> bool {
        let slot = match term {
            "tdsr" => &mut self.tdsr,
            "msr" => &mut self.msr,
            "stress_rate" => &mut self.stress_rate,
            "stress_tenure_years" => &mut self.stress_tenure_years,
            "ltv_hdb" => &mut self.ltv_hdb,
            "ltv_private" => &mut self.ltv_private,
            "min_cash_private" => &mut self.min_cash_private,
            "legal_fees" => &mut self.legal_fees,
            "renovation_hdb" => &mut self.renovation_hdb,
            "renovation_condo" => &mut self.renovation_condo,
            "renovation_landed" => &mut self.renovation_landed,
            _ => return false,
        };
        *slot = value;
        true
    }

    pub fn terms(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("tdsr", self.tdsr),
            ("msr", self.msr),
            ("stress_rate", self.stress_rate),
            ("stress_tenure_years", self.stress_tenure_years),
            ("ltv_hdb", self.ltv_hdb),
            ("ltv_private", self.ltv_private),
            ("min_cash_private", self.min_cash_private),
            ("legal_fees", self.legal_fees),
            ("renovation_hdb", self.renovation_hdb),
            ("renovation_condo", self.renovation_condo),
            ("renovation_landed", self.renovation_landed),
        ]
    }
}

impl LeaseDutyRules {
    pub fn apply(&mut self, term: &str, value: f64) -> bool {
        match term {
            "lease_rate" => self.rate = value,
            "lease_full_term_years" => self.full_term_years = value,
            "lease_min_duty" => self.minimum_duty = value,
            _ => return false,
        }
        true
    }

    pub fn terms(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("lease_rate", self.rate),
            ("lease_full_term_years", self.full_term_years),
            ("lease_min_duty", self.minimum_duty),
        ]
    }
}
