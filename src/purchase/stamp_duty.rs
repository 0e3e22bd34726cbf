//! Buyer's Stamp Duty and Additional Buyer's Stamp Duty

use crate::buyer::Citizenship;
use crate::format::non_negative;
use crate::rates::{AbsdTable, TieredSchedule};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StampDuties {
    /// Whole dollars
    pub bsd: f64,
    /// Whole dollars
    pub absd: f64,
    /// Percent
    pub absd_rate: f64,
    /// `bsd + absd`
    pub total: f64,
}

/// BSD on the progressive bands plus ABSD by residency and properties already held
pub fn stamp_duties(
    property_price: f64,
    citizenship: Citizenship,
    property_count: u32,
    bsd_schedule: &TieredSchedule,
    absd_table: &AbsdTable,
) -> StampDuties {
    let price = non_negative(property_price);
    let bsd = bsd_schedule.tax_on(price).round();
    let absd_rate = absd_table.rate(citizenship, property_count);
    let absd = (price * (absd_rate / 100.0)).round();

    log::debug!(
        "stamp duty on {:.0}: BSD {:.0}, ABSD {}% = {:.0}",
        price,
        bsd,
        absd_rate,
        absd
    );

    StampDuties {
        bsd,
        absd,
        absd_rate,
        total: bsd + absd,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duties(price: f64, citizenship: Citizenship, count: u32) -> StampDuties {
        stamp_duties(
            price,
            citizenship,
            count,
            &TieredSchedule::bsd_2024(),
            &AbsdTable::singapore_2024(),
        )
    }

    #[test]
    fn test_citizen_first_property_one_million() {
        let result = duties(1_000_000.0, Citizenship::Citizen, 0);
        assert_eq!(result.bsd, 24_600.0);
        assert_eq!(result.absd, 0.0);
        assert_eq!(result.absd_rate, 0.0);
        assert_eq!(result.total, 24_600.0);
    }

    #[test]
    fn test_small_price_is_one_percent() {
        for price in [10_000.0, 99_999.0, 180_000.0] {
            let result = duties(price, Citizenship::Citizen, 0);
            assert_eq!(result.bsd, (price * 0.01).round());
        }
    }

    #[test]
    fn test_absd_applied() {
        let result = duties(1_500_000.0, Citizenship::Pr, 1);
        assert_eq!(result.bsd, 44_600.0);
        assert_eq!(result.absd_rate, 30.0);
        assert_eq!(result.absd, 450_000.0);
        assert_eq!(result.total, 494_600.0);

        let result = duties(2_000_000.0, Citizenship::Foreigner, 0);
        assert_eq!(result.absd, 1_200_000.0);
    }

    #[test]
    fn test_total_is_sum_of_rounded_parts() {
        let result = duties(360_050.0, Citizenship::Pr, 0);
        assert_eq!(result.total, result.bsd + result.absd);
        for price in [123_456.78, 777_777.77, 1_234_567.89] {
            let result = duties(price, Citizenship::Citizen, 2);
            assert_eq!(result.total, result.bsd + result.absd);
        }
    }

    #[test]
    fn test_zero_price() {
        let result = duties(0.0, Citizenship::Foreigner, 3);
        assert_eq!(result.total, 0.0);
        assert_eq!(result.absd_rate, 60.0);
    }
}
