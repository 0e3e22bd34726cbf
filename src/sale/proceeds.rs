//! Cash left to the seller after loan, CPF refund, fees and duties

use crate::buyer::FlatType;
use crate::format::non_negative;
use crate::rates::{ResaleLevyTable, SellerTables, SsdSchedule};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DAYS_PER_YEAR: f64 = 365.25;

/// CPF principal withdrawn for the purchase plus interest that would have accrued
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CpfRefund {
    pub principal: f64,
    pub accrued_interest: f64,
    pub total_refund: f64,
}

/// Refund owed to the CPF account: `principal * (1 + rate)^years`.
/// Zero when nothing was used or the holding period is zero.
pub fn cpf_refund(principal: f64, years_owned: f64, accrued_rate: f64) -> CpfRefund {
    let principal = non_negative(principal);
    let years_owned = non_negative(years_owned);
    if principal == 0.0 || years_owned == 0.0 {
        return CpfRefund::default();
    }

    let total_refund = principal * (1.0 + accrued_rate).powf(years_owned);
    CpfRefund {
        principal,
        accrued_interest: total_refund - principal,
        total_refund,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SellerStampDuty {
    /// Percent of selling price
    pub rate: f64,
    pub amount: f64,
    pub applicable: bool,
    pub holding_period_years: Option<f64>,
}

/// Years between two dates, counted as days / 365.25
pub fn holding_period_years(purchase_date: NaiveDate, sale_date: NaiveDate) -> f64 {
    (sale_date - purchase_date).num_days() as f64 / DAYS_PER_YEAR
}

/// SSD on `selling_price`; nothing is due without a purchase date or price.
/// A purchase date after the sale date counts as a zero holding period.
pub fn sellers_stamp_duty(
    selling_price: f64,
    purchase_date: Option<NaiveDate>,
    sale_date: NaiveDate,
    schedule: &SsdSchedule,
) -> SellerStampDuty {
    let selling_price = non_negative(selling_price);
    let Some(purchase_date) = purchase_date else {
        return SellerStampDuty::default();
    };
    if selling_price == 0.0 {
        return SellerStampDuty::default();
    }

    let mut holding = holding_period_years(purchase_date, sale_date);
    if holding < 0.0 {
        log::warn!("purchase date {} is after sale date {}", purchase_date, sale_date);
        holding = 0.0;
    }
    let rate = schedule.rate_for(holding);
    SellerStampDuty {
        rate,
        amount: selling_price * (rate / 100.0),
        applicable: rate > 0.0,
        holding_period_years: Some(holding),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ResaleLevy {
    pub applicable: bool,
    pub amount: f64,
    pub flat_type: Option<FlatType>,
}

/// Levy payable on the next subsidised flat; informational only
pub fn resale_levy(first_flat: Option<FlatType>, table: &ResaleLevyTable) -> ResaleLevy {
    match first_flat {
        Some(flat_type) => ResaleLevy {
            applicable: true,
            amount: table.levy_for(flat_type),
            flat_type: Some(flat_type),
        },
        None => ResaleLevy::default(),
    }
}

fn default_agent_commission() -> f64 {
    2.0
}

fn default_legal_fees() -> f64 {
    3_000.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleInputs {
    pub selling_price: f64,
    #[serde(default)]
    pub outstanding_loan: f64,
    /// CPF principal used for the purchase
    #[serde(default)]
    pub cpf_used: f64,
    #[serde(default)]
    pub years_owned: f64,
    /// Percent of selling price
    #[serde(default = "default_agent_commission")]
    pub agent_commission: f64,
    #[serde(default = "default_legal_fees")]
    pub legal_fees: f64,
    /// Only needed when the property was bought within the SSD window
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    pub sale_date: NaiveDate,
    /// First flat type, when the seller is moving to a new subsidised flat
    #[serde(default)]
    pub first_flat_type: Option<FlatType>,
    #[serde(default)]
    pub upgrading_costs: Option<f64>,
}

impl SaleInputs {
    pub fn new(selling_price: f64, sale_date: NaiveDate) -> Self {
        Self {
            selling_price,
            outstanding_loan: 0.0,
            cpf_used: 0.0,
            years_owned: 0.0,
            agent_commission: default_agent_commission(),
            legal_fees: default_legal_fees(),
            purchase_date: None,
            sale_date,
            first_flat_type: None,
            upgrading_costs: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleProceeds {
    pub selling_price: f64,
    pub outstanding_loan: f64,
    pub cpf_refund: CpfRefund,
    pub agent_fee: f64,
    pub legal_fees: f64,
    pub ssd: SellerStampDuty,
    pub upgrading_costs: f64,
    /// Not deducted from proceeds
    pub resale_levy: ResaleLevy,
    pub total_deductions: f64,
    /// May be negative when deductions exceed the price
    pub net_cash_proceeds: f64,
}

impl SaleProceeds {
    /// Net proceeds clamped at zero for display
    pub fn display_net_proceeds(&self) -> f64 {
        self.net_cash_proceeds.max(0.0)
    }

    /// Labelled non-zero slices of the selling price, for charting
    pub fn breakdown(&self) -> Vec<(&'static str, f64)> {
        let mut slices = vec![
            ("Loan Repayment", self.outstanding_loan),
            ("CPF Refund", self.cpf_refund.total_refund),
            ("Fees (Agent/Legal)", self.agent_fee + self.legal_fees),
        ];
        if self.ssd.applicable {
            slices.push(("Seller's Stamp Duty", self.ssd.amount));
        }
        slices.push(("Upgrading Costs", self.upgrading_costs));
        slices.push(("Cash Proceeds", self.display_net_proceeds()));
        slices.retain(|(_, value)| *value > 0.0);
        slices
    }
}

/// Net sale proceeds; `None` when the selling price is not positive
pub fn sale_proceeds(inputs: &SaleInputs, tables: &SellerTables) -> Option<SaleProceeds> {
    let selling_price = non_negative(inputs.selling_price);
    if selling_price == 0.0 {
        return None;
    }

    let outstanding_loan = non_negative(inputs.outstanding_loan);
    let legal_fees = non_negative(inputs.legal_fees);
    let upgrading_costs = inputs.upgrading_costs.map(non_negative).unwrap_or(0.0);
    let agent_fee = selling_price * (non_negative(inputs.agent_commission) / 100.0);

    let refund = cpf_refund(inputs.cpf_used, inputs.years_owned, tables.cpf_accrued_rate);
    let ssd = sellers_stamp_duty(selling_price, inputs.purchase_date, inputs.sale_date, &tables.ssd);
    let levy = resale_levy(inputs.first_flat_type, &tables.resale_levy);

    let total_deductions =
        outstanding_loan + refund.total_refund + agent_fee + legal_fees + ssd.amount + upgrading_costs;
    let net_cash_proceeds = selling_price - total_deductions;

    if net_cash_proceeds < 0.0 {
        log::info!("sale leaves a cash deficit of {:.0}", -net_cash_proceeds);
    }

    Some(SaleProceeds {
        selling_price,
        outstanding_loan,
        cpf_refund: refund,
        agent_fee,
        legal_fees,
        ssd,
        upgrading_costs,
        resale_levy: levy,
        total_deductions,
        net_cash_proceeds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_cpf_refund_five_years() {
        let refund = cpf_refund(100_000.0, 5.0, 0.025);
        assert_relative_eq!(refund.total_refund, 100_000.0 * 1.025_f64.powi(5), max_relative = 1e-12);
        assert_abs_diff_eq!(refund.total_refund, 113_140.82, epsilon = 0.01);
        assert_relative_eq!(refund.accrued_interest, refund.total_refund - 100_000.0);
    }

    #[test]
    fn test_cpf_refund_zero_cases() {
        assert_eq!(cpf_refund(0.0, 5.0, 0.025), CpfRefund::default());
        assert_eq!(cpf_refund(100_000.0, 0.0, 0.025), CpfRefund::default());
    }

    #[test]
    fn test_ssd_by_holding_period() {
        let schedule = SsdSchedule::residential_2017();
        let sale = date(2024, 6, 1);

        let ssd = sellers_stamp_duty(1_000_000.0, Some(date(2023, 12, 1)), sale, &schedule);
        assert_eq!(ssd.rate, 12.0);
        assert_eq!(ssd.amount, 120_000.0);
        assert!(ssd.applicable);

        let ssd = sellers_stamp_duty(1_000_000.0, Some(date(2022, 12, 1)), sale, &schedule);
        assert_eq!(ssd.rate, 8.0);

        let ssd = sellers_stamp_duty(1_000_000.0, Some(date(2021, 12, 1)), sale, &schedule);
        assert_eq!(ssd.rate, 4.0);

        let ssd = sellers_stamp_duty(1_000_000.0, Some(date(2020, 1, 1)), sale, &schedule);
        assert_eq!(ssd.rate, 0.0);
        assert!(!ssd.applicable);
        assert!(ssd.holding_period_years.unwrap() > 4.0);

        let none = sellers_stamp_duty(1_000_000.0, None, sale, &schedule);
        assert_eq!(none, SellerStampDuty::default());
    }

    #[test]
    fn test_ssd_purchase_after_sale_is_zero_holding() {
        let schedule = SsdSchedule::residential_2017();
        let ssd = sellers_stamp_duty(1_000_000.0, Some(date(2025, 1, 1)), date(2024, 6, 1), &schedule);
        assert_eq!(ssd.holding_period_years, Some(0.0));
        assert_eq!(ssd.rate, 12.0);
        assert!(holding_period_years(date(2025, 1, 1), date(2024, 6, 1)) < 0.0);
    }

    #[test]
    fn test_resale_levy_is_informational() {
        let tables = SellerTables::default();
        let mut inputs = SaleInputs::new(600_000.0, date(2024, 6, 1));
        inputs.legal_fees = 0.0;
        inputs.agent_commission = 0.0;
        inputs.first_flat_type = Some(FlatType::FourRoom);

        let result = sale_proceeds(&inputs, &tables).unwrap();
        assert!(result.resale_levy.applicable);
        assert_eq!(result.resale_levy.amount, 40_000.0);
        assert_eq!(result.net_cash_proceeds, 600_000.0);
    }

    #[test]
    fn test_net_proceeds() {
        let tables = SellerTables::default();
        let inputs = SaleInputs {
            selling_price: 1_000_000.0,
            outstanding_loan: 400_000.0,
            cpf_used: 100_000.0,
            years_owned: 5.0,
            agent_commission: 2.0,
            legal_fees: 3_000.0,
            purchase_date: Some(date(2023, 12, 1)),
            sale_date: date(2024, 6, 1),
            first_flat_type: None,
            upgrading_costs: Some(10_000.0),
        };

        let result = sale_proceeds(&inputs, &tables).unwrap();
        assert_eq!(result.agent_fee, 20_000.0);
        assert_eq!(result.ssd.amount, 120_000.0);
        let expected_deductions = 400_000.0 + result.cpf_refund.total_refund + 20_000.0 + 3_000.0 + 120_000.0 + 10_000.0;
        assert_relative_eq!(result.total_deductions, expected_deductions, max_relative = 1e-12);
        assert_relative_eq!(result.net_cash_proceeds, 1_000_000.0 - expected_deductions, max_relative = 1e-12);

        let labels: Vec<&str> = result.breakdown().iter().map(|(label, _)| *label).collect();
        assert_eq!(
            labels,
            vec![
                "Loan Repayment",
                "CPF Refund",
                "Fees (Agent/Legal)",
                "Seller's Stamp Duty",
                "Upgrading Costs",
                "Cash Proceeds"
            ]
        );
    }

    #[test]
    fn test_negative_proceeds_preserved_but_clamped_for_display() {
        let tables = SellerTables::default();
        let mut inputs = SaleInputs::new(500_000.0, date(2024, 6, 1));
        inputs.outstanding_loan = 480_000.0;
        inputs.cpf_used = 100_000.0;
        inputs.years_owned = 10.0;

        let result = sale_proceeds(&inputs, &tables).unwrap();
        assert!(result.net_cash_proceeds < 0.0);
        assert_eq!(result.display_net_proceeds(), 0.0);
        assert!(result.breakdown().iter().all(|(label, _)| *label != "Cash Proceeds"));
    }

    #[test]
    fn test_zero_price_is_none() {
        let inputs = SaleInputs::new(0.0, date(2024, 6, 1));
        assert!(sale_proceeds(&inputs, &SellerTables::default()).is_none());
    }
}
