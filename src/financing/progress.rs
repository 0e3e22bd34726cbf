//! Progressive payment schedule for a building under construction

use crate::rates::ProgressSchedule;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMilestone {
    pub label: String,
    pub percentage: f64,
    pub payment_amount: f64,
    /// Running total paid up to and including this stage
    pub cumulative_amount: f64,
}

/// Apply each stage's percentage to `price`; empty when the price is not positive
pub fn progress_payments(schedule: &ProgressSchedule, price: f64) -> Vec<PaymentMilestone> {
    if !price.is_finite() || price <= 0.0 {
        return Vec::new();
    }

    let mut cumulative_amount = 0.0;
    schedule
        .milestones()
        .iter()
        .map(|milestone| {
            let payment_amount = price * (milestone.percentage / 100.0);
            cumulative_amount += payment_amount;
            PaymentMilestone {
                label: milestone.label.clone(),
                percentage: milestone.percentage,
                payment_amount,
                cumulative_amount,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_final_cumulative_equals_price() {
        let schedule = ProgressSchedule::buc_standard();
        for price in [850_000.0, 1_234_567.0, 3_999_999.99] {
            let stages = progress_payments(&schedule, price);
            assert_eq!(stages.len(), 5);
            let total_pct: f64 = stages.iter().map(|s| s.percentage).sum();
            assert_eq!(total_pct, 100.0);
            assert_relative_eq!(stages[4].cumulative_amount, price, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_stage_amounts() {
        let stages = progress_payments(&ProgressSchedule::buc_standard(), 1_000_000.0);
        let amounts: Vec<f64> = stages.iter().map(|s| s.payment_amount).collect();
        assert_eq!(amounts, vec![100_000.0, 600_000.0, 150_000.0, 50_000.0, 100_000.0]);
        assert_eq!(stages[1].cumulative_amount, 700_000.0);
        assert_eq!(stages[0].label, "Upon Option Fee & Signing of S&P Agreement");
    }

    #[test]
    fn test_non_positive_price() {
        let schedule = ProgressSchedule::buc_standard();
        assert!(progress_payments(&schedule, 0.0).is_empty());
        assert!(progress_payments(&schedule, -5.0).is_empty());
        assert!(progress_payments(&schedule, f64::NAN).is_empty());
    }
}
