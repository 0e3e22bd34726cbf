//! Sample bank mortgage packages for loan comparison
//!
//! These are illustrative rates, not a live feed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sample 3-month compounded SORA, percent
pub const DEFAULT_SORA_3M: f64 = 3.05;

/// Fixed or SORA-pegged package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateKind {
    Fixed,
    Floating,
}

impl fmt::Display for RateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateKind::Fixed => f.write_str("Fixed"),
            RateKind::Floating => f.write_str("Floating"),
        }
    }
}

/// One bank package as configured
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LenderOffer {
    pub bank: String,
    pub kind: RateKind,
    /// Headline rate for fixed packages (percent)
    #[serde(default)]
    pub fixed_rate: f64,
    /// Spread over SORA for floating packages (percent)
    #[serde(default)]
    pub spread: f64,
    /// Lock-in / fixed period description, e.g. "2-3"
    #[serde(default)]
    pub lock_in_years: Option<String>,
    /// Spread over SORA once the package reprices (percent)
    pub subsequent_spread: f64,
}

impl LenderOffer {
    fn fixed(bank: &str, rate: f64, lock_in_years: &str, subsequent_spread: f64) -> Self {
        Self {
            bank: bank.to_string(),
            kind: RateKind::Fixed,
            fixed_rate: rate,
            spread: 0.0,
            lock_in_years: Some(lock_in_years.to_string()),
            subsequent_spread,
        }
    }

    fn floating(bank: &str, spread: f64) -> Self {
        Self {
            bank: bank.to_string(),
            kind: RateKind::Floating,
            fixed_rate: 0.0,
            spread,
            lock_in_years: None,
            subsequent_spread: spread,
        }
    }

    /// Rate charged today (percent)
    pub fn effective_rate(&self, sora_3m: f64) -> f64 {
        match self.kind {
            RateKind::Fixed => self.fixed_rate,
            RateKind::Floating => sora_3m + self.spread,
        }
    }

    /// Pricing after any fixed period, e.g. "3M SORA + 0.80%"
    pub fn subsequent_description(&self) -> String {
        format!("3M SORA + {:.2}%", self.subsequent_spread)
    }
}

/// Benchmark rate plus the packages priced off it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LenderTable {
    pub sora_3m: f64,
    pub offers: Vec<LenderOffer>,
}

impl LenderTable {
    pub fn sample_2024() -> Self {
        Self {
            sora_3m: DEFAULT_SORA_3M,
            offers: vec![
                LenderOffer::fixed("DBS", 2.75, "2-3", 0.80),
                LenderOffer::floating("DBS", 0.80),
                LenderOffer::fixed("OCBC", 2.40, "3", 0.80),
                LenderOffer::floating("OCBC", 0.80),
                LenderOffer::fixed("UOB", 2.85, "3", 0.80),
                LenderOffer::floating("UOB", 0.80),
                LenderOffer::fixed("HSBC", 3.75, "2-3", 0.65),
                LenderOffer::floating("HSBC", 0.65),
            ],
        }
    }
}

impl Default for LenderTable {
    fn default() -> Self {
        Self::sample_2024()
    }
}
