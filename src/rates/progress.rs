//! Progressive payment milestones for buildings under construction

use crate::error::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub label: String,
    /// Percent of purchase price due at this stage
    pub percentage: f64,
}

/// Ordered BUC payment stages; percentages always total 100
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSchedule {
    milestones: Vec<Milestone>,
}

impl ProgressSchedule {
    pub fn new(milestones: Vec<Milestone>) -> CalcResult<Self> {
        if milestones.is_empty() {
            return Err(CalcError::invalid_table("progress_schedule", "no milestones"));
        }
        if let Some(bad) = milestones
            .iter()
            .find(|m| !m.percentage.is_finite() || m.percentage < 0.0 || m.percentage > 100.0)
        {
            return Err(CalcError::invalid_table(
                "progress_schedule",
                format!("'{}' has percentage {}", bad.label, bad.percentage),
            ));
        }
        let total: f64 = milestones.iter().map(|m| m.percentage).sum();
        if (total - 100.0).abs() > 1e-9 {
            return Err(CalcError::invalid_table(
                "progress_schedule",
                format!("percentages sum to {}", total),
            ));
        }
        Ok(Self { milestones })
    }

    /// Standard schedule under the Housing Developers (Control and Licensing) Act
    pub fn buc_standard() -> Self {
        let stage = |label: &str, percentage: f64| Milestone {
            label: label.to_string(),
            percentage,
        };
        Self {
            milestones: vec![
                stage("Upon Option Fee & Signing of S&P Agreement", 10.0),
                stage("During Construction", 60.0),
                stage("Upon Temporary Occupation Permit (TOP)", 15.0),
                stage("Upon Certificate of Statutory Completion (CSC)", 5.0),
                stage("Final Payment (after 12-month defect liability period)", 10.0),
            ],
        }
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    pub fn total_percentage(&self) -> f64 {
        self.milestones.iter().map(|m| m.percentage).sum()
    }
}

impl Default for ProgressSchedule {
    fn default() -> Self {
        Self::buc_standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_schedule_sums_to_100() {
        let schedule = ProgressSchedule::buc_standard();
        assert_eq!(schedule.milestones().len(), 5);
        assert_eq!(schedule.total_percentage(), 100.0);
        assert!(ProgressSchedule::new(schedule.milestones().to_vec()).is_ok());
    }

    #[test]
    fn test_rejects_bad_totals() {
        let short = vec![Milestone {
            label: "Deposit".to_string(),
            percentage: 90.0,
        }];
        assert!(matches!(
            ProgressSchedule::new(short),
            Err(CalcError::InvalidTable { .. })
        ));
        assert!(ProgressSchedule::new(vec![]).is_err());
    }
}
