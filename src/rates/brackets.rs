//! Progressive tiered schedules (BSD, property tax by Annual Value)
//!
//! Each band carries a marginal rate; the tax on an amount is the cumulative
//! sum of every band's slice, so the result is continuous at every threshold.

use crate::error::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};

/// One band of a tiered schedule: applies `rate` to the slice up to `upper`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Upper bound of the band; `None` for the open top band
    pub upper: Option<f64>,
    /// Marginal rate as a decimal (0.03 = 3%)
    pub rate: f64,
}

impl TaxBracket {
    pub fn new(upper: f64, rate: f64) -> Self {
        Self {
            upper: Some(upper),
            rate,
        }
    }

    pub fn open(rate: f64) -> Self {
        Self { upper: None, rate }
    }
}

/// Ordered bands starting at zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieredSchedule {
    brackets: Vec<TaxBracket>,
}

impl TieredSchedule {
    /// Build a schedule; bounds must strictly increase and only the last band may be open
    pub fn new(name: &str, brackets: Vec<TaxBracket>) -> CalcResult<Self> {
        if brackets.is_empty() {
            return Err(CalcError::invalid_table(name, "no brackets"));
        }

        let mut lower = 0.0;
        for (i, bracket) in brackets.iter().enumerate() {
            if !bracket.rate.is_finite() || bracket.rate < 0.0 {
                return Err(CalcError::invalid_table(
                    name,
                    format!("bracket {} has an invalid rate {}", i + 1, bracket.rate),
                ));
            }
            match bracket.upper {
                Some(upper) if upper > lower => lower = upper,
                Some(upper) => {
                    return Err(CalcError::invalid_table(
                        name,
                        format!("bracket {} bound {} does not exceed {}", i + 1, upper, lower),
                    ))
                }
                None if i + 1 != brackets.len() => {
                    return Err(CalcError::invalid_table(
                        name,
                        format!("open bracket {} is not the last", i + 1),
                    ))
                }
                None => {}
            }
        }

        Ok(Self { brackets })
    }

    /// 2024 Buyer's Stamp Duty bands
    pub fn bsd_2024() -> Self {
        Self {
            brackets: vec![
                TaxBracket::new(180_000.0, 0.01),
                TaxBracket::new(360_000.0, 0.02),
                TaxBracket::new(1_000_000.0, 0.03),
                TaxBracket::open(0.04),
            ],
        }
    }

    /// 2024 owner-occupied property tax on Annual Value (first $8,000 tax-free)
    pub fn owner_occupied_2024() -> Self {
        Self {
            brackets: vec![
                TaxBracket::new(8_000.0, 0.0),
                TaxBracket::new(30_000.0, 0.04),
                TaxBracket::new(40_000.0, 0.05),
                TaxBracket::new(55_000.0, 0.06),
                TaxBracket::new(70_000.0, 0.10),
                TaxBracket::new(85_000.0, 0.14),
                TaxBracket::new(100_000.0, 0.20),
                TaxBracket::new(130_000.0, 0.26),
                TaxBracket::open(0.32),
            ],
        }
    }

    /// 2024 non-owner-occupied property tax on Annual Value
    pub fn rented_2024() -> Self {
        Self {
            brackets: vec![
                TaxBracket::new(30_000.0, 0.12),
                TaxBracket::new(45_000.0, 0.20),
                TaxBracket::new(60_000.0, 0.28),
                TaxBracket::new(100_000.0, 0.36),
                TaxBracket::open(0.36),
            ],
        }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Cumulative tax on `amount`; non-positive or non-finite amounts owe nothing
    pub fn tax_on(&self, amount: f64) -> f64 {
        if !amount.is_finite() || amount <= 0.0 {
            return 0.0;
        }

        let mut tax = 0.0;
        let mut lower = 0.0;
        for bracket in &self.brackets {
            if amount <= lower {
                break;
            }
            let top = match bracket.upper {
                Some(upper) => amount.min(upper),
                None => amount,
            };
            tax += (top - lower) * bracket.rate;
            match bracket.upper {
                Some(upper) => lower = upper,
                None => break,
            }
        }
        tax
    }
}

/// Owner-occupied and rented property tax schedules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyTaxSchedules {
    pub owner_occupied: TieredSchedule,
    pub rented: TieredSchedule,
}

impl Default for PropertyTaxSchedules {
    fn default() -> Self {
        Self {
            owner_occupied: TieredSchedule::owner_occupied_2024(),
            rented: TieredSchedule::rented_2024(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bsd_first_band_is_flat_one_percent() {
        let bsd = TieredSchedule::bsd_2024();
        for price in [1.0, 50_000.0, 123_456.78, 179_999.0, 180_000.0] {
            assert_relative_eq!(bsd.tax_on(price), price * 0.01, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_bsd_known_values() {
        let bsd = TieredSchedule::bsd_2024();
        assert_relative_eq!(bsd.tax_on(360_000.0), 5_400.0, max_relative = 1e-12);
        assert_relative_eq!(bsd.tax_on(1_000_000.0), 24_600.0, max_relative = 1e-12);
        assert_relative_eq!(bsd.tax_on(1_500_000.0), 44_600.0, max_relative = 1e-12);
    }

    #[test]
    fn test_continuity_at_boundaries() {
        let bsd = TieredSchedule::bsd_2024();
        for boundary in [180_000.0, 360_000.0, 1_000_000.0] {
            let below = bsd.tax_on(boundary - 1e-6);
            let at = bsd.tax_on(boundary);
            let above = bsd.tax_on(boundary + 1e-6);
            assert!((at - below).abs() < 1e-6, "jump below {}", boundary);
            assert!((above - at).abs() < 1e-6, "jump above {}", boundary);
        }
    }

    #[test]
    fn test_property_tax_schedules() {
        let owner = TieredSchedule::owner_occupied_2024();
        assert_eq!(owner.tax_on(8_000.0), 0.0);
        // 22,000 * 4% + 10,000 * 5% + 2,000 * 6%
        assert_relative_eq!(owner.tax_on(42_000.0), 880.0 + 500.0 + 120.0, max_relative = 1e-12);

        let rented = TieredSchedule::rented_2024();
        // 30,000 * 12% + 12,000 * 20%
        assert_relative_eq!(rented.tax_on(42_000.0), 3_600.0 + 2_400.0, max_relative = 1e-12);
        // top band
        assert_relative_eq!(
            rented.tax_on(150_000.0),
            3_600.0 + 3_000.0 + 4_200.0 + 14_400.0 + 18_000.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_non_positive_amounts() {
        let bsd = TieredSchedule::bsd_2024();
        assert_eq!(bsd.tax_on(0.0), 0.0);
        assert_eq!(bsd.tax_on(-10.0), 0.0);
        assert_eq!(bsd.tax_on(f64::NAN), 0.0);
    }

    #[test]
    fn test_schedule_validation() {
        assert!(TieredSchedule::new("bsd", vec![]).is_err());
        assert!(TieredSchedule::new(
            "bsd",
            vec![TaxBracket::new(100.0, 0.01), TaxBracket::new(50.0, 0.02)]
        )
        .is_err());
        assert!(TieredSchedule::new(
            "bsd",
            vec![TaxBracket::open(0.01), TaxBracket::new(50.0, 0.02)]
        )
        .is_err());
        let ok = TieredSchedule::new(
            "bsd",
            vec![TaxBracket::new(100.0, 0.01), TaxBracket::open(0.02)],
        )
        .unwrap();
        assert_relative_eq!(ok.tax_on(150.0), 1.0 + 1.0, max_relative = 1e-12);
    }
}
