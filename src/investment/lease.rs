//! Stamp duty on tenancy agreements

use crate::rates::LeaseDutyRules;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseDuty {
    pub total_rent: f64,
    pub average_annual_rent: f64,
    /// Duty payable, never below the minimum
    pub duty: f64,
}

/// Duty on a lease of `years` (fractional allowed) at `monthly_rent`.
///
/// Short leases pay the rate on total rent; longer leases pay it on four times
/// the average annual rent. `None` for non-positive or non-numeric input.
pub fn lease_stamp_duty(monthly_rent: f64, years: f64, rules: &LeaseDutyRules) -> Option<LeaseDuty> {
    if !(monthly_rent.is_finite() && monthly_rent > 0.0 && years.is_finite() && years > 0.0) {
        return None;
    }

    let total_rent = monthly_rent * years * 12.0;
    let average_annual_rent = total_rent / years;
    let raw_duty = if years <= rules.full_term_years {
        total_rent * rules.rate
    } else {
        (average_annual_rent * rules.full_term_years) * rules.rate
    };

    Some(LeaseDuty {
        total_rent,
        average_annual_rent,
        duty: raw_duty.max(rules.minimum_duty),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_two_year_lease() {
        let result = lease_stamp_duty(3_500.0, 2.0, &LeaseDutyRules::default()).unwrap();
        assert_eq!(result.total_rent, 84_000.0);
        assert_relative_eq!(result.duty, 336.0, max_relative = 1e-12);
    }

    #[test]
    fn test_long_lease_uses_four_times_average_rent() {
        let result = lease_stamp_duty(3_500.0, 5.0, &LeaseDutyRules::default()).unwrap();
        assert_relative_eq!(result.average_annual_rent, 42_000.0, max_relative = 1e-12);
        assert_relative_eq!(result.duty, 672.0, max_relative = 1e-12);
        assert!(result.duty >= 1.0);
    }

    #[test]
    fn test_four_years_is_still_short_term() {
        let rules = LeaseDutyRules::default();
        let four = lease_stamp_duty(2_000.0, 4.0, &rules).unwrap();
        let longer = lease_stamp_duty(2_000.0, 6.5, &rules).unwrap();
        assert_relative_eq!(four.duty, 384.0, max_relative = 1e-12);
        // duty caps at four years' rent
        assert_relative_eq!(longer.duty, four.duty, max_relative = 1e-12);
    }

    #[test]
    fn test_minimum_duty() {
        let result = lease_stamp_duty(10.0, 0.5, &LeaseDutyRules::default()).unwrap();
        assert_eq!(result.duty, 1.0);
    }

    #[test]
    fn test_invalid_input() {
        let rules = LeaseDutyRules::default();
        assert!(lease_stamp_duty(0.0, 2.0, &rules).is_none());
        assert!(lease_stamp_duty(3_500.0, -1.0, &rules).is_none());
        assert!(lease_stamp_duty(f64::NAN, 2.0, &rules).is_none());
    }
}
