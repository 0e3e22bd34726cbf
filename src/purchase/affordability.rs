//! Upfront cash and CPF needed to complete a purchase

use super::eligibility::LoanEligibility;
use super::stamp_duty::StampDuties;
use crate::buyer::{BuyerProfile, PropertyOrder, PropertyType};
use crate::format::{format_sgd, non_negative};
use crate::rates::LendingLimits;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Affordability {
    /// min(TDSR loan, LTV cap)
    pub loan_amount: f64,
    pub ltv_loan_limit: f64,
    pub total_downpayment: f64,
    /// Cash share of the downpayment
    pub total_cash_for_downpayment: f64,
    pub actual_cpf_used: f64,
    pub legal_fees: f64,
    /// Cash downpayment + stamp duties + legal fees
    pub total_upfront_cash_required: f64,
    /// Upfront cash + CPF used
    pub total_initial_outlay: f64,
    /// Typical renovation budget for the property class; not part of the outlay
    pub renovation_estimate: f64,
    /// Set when cash savings fall short of the upfront cash
    pub shortfall_warning: Option<String>,
}

impl Affordability {
    pub fn cash_shortfall(&self, cash_savings: f64) -> f64 {
        (self.total_upfront_cash_required - non_negative(cash_savings)).max(0.0)
    }
}

fn ltv_ratio(property_type: PropertyType, limits: &LendingLimits) -> f64 {
    match property_type {
        PropertyType::Hdb => limits.ltv_hdb,
        PropertyType::Condo | PropertyType::Ec | PropertyType::Landed => limits.ltv_private,
    }
}

fn renovation_estimate(property_type: PropertyType, limits: &LendingLimits) -> f64 {
    match property_type {
        PropertyType::Hdb => limits.renovation_hdb,
        PropertyType::Condo | PropertyType::Ec => limits.renovation_condo,
        PropertyType::Landed => limits.renovation_landed,
    }
}

/// Split the downpayment between CPF and cash and total the upfront cash.
///
/// Private property needs at least `min_cash_private` of the price in cash; CPF
/// covers the rest of the downpayment as far as savings allow. HDB downpayments
/// draw on CPF first.
pub fn affordability(
    profile: &BuyerProfile,
    order: &PropertyOrder,
    eligibility: &LoanEligibility,
    duties: &StampDuties,
    limits: &LendingLimits,
) -> Affordability {
    let price = non_negative(order.property_price);
    let cpf_savings = non_negative(profile.cpf_savings);
    let cash_savings = non_negative(profile.cash_savings);

    let ltv_loan_limit = price * ltv_ratio(order.property_type, limits);
    let loan_amount = eligibility.max_loan.min(ltv_loan_limit);
    let total_downpayment = price - loan_amount;

    let (total_cash_for_downpayment, actual_cpf_used) = if order.property_type.is_private() {
        let cash_minimum = price * limits.min_cash_private;
        let cpf_payable = (total_downpayment - cash_minimum).max(0.0);
        let cpf_used = cpf_payable.min(cpf_savings);
        (cash_minimum + (cpf_payable - cpf_used), cpf_used)
    } else {
        let cpf_used = total_downpayment.min(cpf_savings);
        (total_downpayment - cpf_used, cpf_used)
    };

    let legal_fees = limits.legal_fees;
    let total_upfront_cash_required = total_cash_for_downpayment + duties.total + legal_fees;
    let total_initial_outlay = total_upfront_cash_required + actual_cpf_used;

    let shortfall_warning = if cash_savings < total_upfront_cash_required {
        let message = format!(
            "Your cash savings of {} are insufficient for the required total upfront cash of {}. You have a shortfall of {}.",
            format_sgd(cash_savings),
            format_sgd(total_upfront_cash_required),
            format_sgd(total_upfront_cash_required - cash_savings),
        );
        log::info!("affordability shortfall: {:.0}", total_upfront_cash_required - cash_savings);
        Some(message)
    } else {
        None
    };

    Affordability {
        loan_amount,
        ltv_loan_limit,
        total_downpayment,
        total_cash_for_downpayment,
        actual_cpf_used,
        legal_fees,
        total_upfront_cash_required,
        total_initial_outlay,
        renovation_estimate: renovation_estimate(order.property_type, limits),
        shortfall_warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buyer::Citizenship;
    use crate::purchase::{loan_eligibility, stamp_duties};
    use crate::rates::{AbsdTable, TieredSchedule};
    use approx::assert_relative_eq;

    fn profile(income: f64, cpf: f64, cash: f64) -> BuyerProfile {
        BuyerProfile {
            citizenship: Citizenship::Citizen,
            is_first_time: true,
            property_count: 0,
            annual_income: income,
            cpf_savings: cpf,
            cash_savings: cash,
        }
    }

    fn run(profile: &BuyerProfile, order: &PropertyOrder) -> Affordability {
        let limits = LendingLimits::default();
        let eligibility = loan_eligibility(profile.annual_income, &limits);
        let duties = stamp_duties(
            order.property_price,
            profile.citizenship,
            profile.property_count,
            &TieredSchedule::bsd_2024(),
            &AbsdTable::singapore_2024(),
        );
        affordability(profile, order, &eligibility, &duties, &limits)
    }

    #[test]
    fn test_condo_ltv_bound_with_enough_cpf() {
        let order = PropertyOrder {
            property_type: PropertyType::Condo,
            property_price: 1_000_000.0,
        };
        let result = run(&profile(240_000.0, 500_000.0, 200_000.0), &order);

        assert_eq!(result.ltv_loan_limit, 750_000.0);
        assert_eq!(result.loan_amount, 750_000.0);
        assert_eq!(result.total_downpayment, 250_000.0);
        assert_eq!(result.total_cash_for_downpayment, 50_000.0);
        assert_eq!(result.actual_cpf_used, 200_000.0);
        // 50k cash + 24.6k BSD + 3k legal
        assert_eq!(result.total_upfront_cash_required, 77_600.0);
        assert_eq!(result.total_initial_outlay, 277_600.0);
        assert_eq!(result.renovation_estimate, 80_000.0);
        assert!(result.shortfall_warning.is_none());
    }

    #[test]
    fn test_condo_cpf_shortfall_falls_back_to_cash() {
        let order = PropertyOrder {
            property_type: PropertyType::Condo,
            property_price: 1_000_000.0,
        };
        let result = run(&profile(240_000.0, 120_000.0, 500_000.0), &order);
        assert_eq!(result.actual_cpf_used, 120_000.0);
        assert_eq!(result.total_cash_for_downpayment, 130_000.0);
    }

    #[test]
    fn test_hdb_cpf_first() {
        let order = PropertyOrder {
            property_type: PropertyType::Hdb,
            property_price: 500_000.0,
        };
        let result = run(&profile(120_000.0, 60_000.0, 100_000.0), &order);
        assert_eq!(result.loan_amount, 400_000.0);
        assert_eq!(result.actual_cpf_used, 60_000.0);
        assert_eq!(result.total_cash_for_downpayment, 40_000.0);
        assert_eq!(result.renovation_estimate, 50_000.0);
    }

    #[test]
    fn test_tdsr_bound_loan() {
        let order = PropertyOrder {
            property_type: PropertyType::Landed,
            property_price: 3_000_000.0,
        };
        let result = run(&profile(120_000.0, 0.0, 0.0), &order);
        assert_eq!(result.loan_amount, 1_098_630.0);
        assert_eq!(result.total_downpayment, 3_000_000.0 - 1_098_630.0);
    }

    #[test]
    fn test_shortfall_warning_message() {
        let order = PropertyOrder {
            property_type: PropertyType::Hdb,
            property_price: 500_000.0,
        };
        let result = run(&profile(120_000.0, 0.0, 10_000.0), &order);
        // 100k cash downpayment + 9.6k BSD + 3k legal
        assert_eq!(result.total_upfront_cash_required, 112_600.0);
        assert_eq!(
            result.shortfall_warning.as_deref(),
            Some("Your cash savings of S$10,000 are insufficient for the required total upfront cash of S$112,600. You have a shortfall of S$102,600.")
        );
        assert_eq!(result.cash_shortfall(10_000.0), 102_600.0);
    }

    #[test]
    fn test_outlay_invariant() {
        let incomes = [0.0, 60_000.0, 150_000.0, 400_000.0];
        let cpfs = [0.0, 50_000.0, 300_000.0];
        let types = [PropertyType::Hdb, PropertyType::Condo, PropertyType::Ec, PropertyType::Landed];
        for income in incomes {
            for cpf in cpfs {
                for property_type in types {
                    let order = PropertyOrder {
                        property_type,
                        property_price: 1_350_000.0,
                    };
                    let result = run(&profile(income, cpf, 80_000.0), &order);
                    assert_relative_eq!(
                        result.total_initial_outlay,
                        result.total_upfront_cash_required + result.actual_cpf_used
                    );
                    assert!(result.actual_cpf_used <= cpf);
                }
            }
        }
    }
}
