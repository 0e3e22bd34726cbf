//! Calculator with pre-loaded rate tables
//!
//! Loads the tables once, then runs any number of calculations against them.
//! Purchase assessments validate their inputs first; the free functions in the
//! component modules stay lenient.

use crate::buyer::{BuyerProfile, PropertyOrder, PurchaseScenario};
use crate::error::CalcResult;
use crate::financing::{
    amortization_schedule, compare_loans, progress_payments, AmortizationSchedule, ComparisonRequest, LoanComparison,
    PaymentMilestone,
};
use crate::investment::{lease_stamp_duty, rental_analysis, LeaseDuty, RentalAnalysis, RentalInputs};
use crate::purchase::{
    affordability, grant_eligibility, loan_eligibility, ownership_notice, stamp_duties, Affordability,
    LoanEligibility, OwnershipNotice, StampDuties,
};
use crate::rates::RateTables;
use crate::sale::{sale_proceeds, SaleInputs, SaleProceeds};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything shown for a prospective purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseReport {
    pub loan_eligibility: LoanEligibility,
    pub stamp_duties: StampDuties,
    pub affordability: Affordability,
    pub grants: Vec<String>,
    pub ownership_notice: OwnershipNotice,
}

/// Pre-loaded calculator
///
/// # Example
/// ```ignore
/// let calc = Calculator::from_csv_path(Path::new("data/rates"))?;
/// let report = calc.assess_purchase(&profile, &order)?;
/// println!("{}", format_sgd(report.affordability.total_upfront_cash_required));
/// ```
#[derive(Debug, Clone)]
pub struct Calculator {
    tables: RateTables,
}

impl Calculator {
    /// Calculator on the built-in 2024 tables
    pub fn new() -> Self {
        Self {
            tables: RateTables::singapore_2024(),
        }
    }

    /// Load tables from the default data/rates directory
    pub fn from_csv() -> CalcResult<Self> {
        Ok(Self {
            tables: RateTables::from_csv()?,
        })
    }

    pub fn from_csv_path(path: &Path) -> CalcResult<Self> {
        Ok(Self {
            tables: RateTables::from_csv_path(path)?,
        })
    }

    pub fn with_tables(tables: RateTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &RateTables {
        &self.tables
    }

    pub fn tables_mut(&mut self) -> &mut RateTables {
        &mut self.tables
    }

    pub fn loan_eligibility(&self, annual_income: f64) -> LoanEligibility {
        loan_eligibility(annual_income, &self.tables.limits)
    }

    pub fn stamp_duties(&self, profile: &BuyerProfile, order: &PropertyOrder) -> StampDuties {
        stamp_duties(
            order.property_price,
            profile.citizenship,
            profile.property_count,
            &self.tables.bsd,
            &self.tables.absd,
        )
    }

    /// Full purchase report after validating the profile, the order and the
    /// buyer's eligibility for the property type
    pub fn assess_purchase(&self, profile: &BuyerProfile, order: &PropertyOrder) -> CalcResult<PurchaseReport> {
        profile.validate()?;
        order.validate()?;
        profile.check_eligible(order.property_type)?;

        let eligibility = self.loan_eligibility(profile.annual_income);
        let duties = self.stamp_duties(profile, order);
        let breakdown = affordability(profile, order, &eligibility, &duties, &self.tables.limits);

        Ok(PurchaseReport {
            grants: grant_eligibility(profile.citizenship, order.property_type),
            ownership_notice: ownership_notice(profile.citizenship),
            loan_eligibility: eligibility,
            stamp_duties: duties,
            affordability: breakdown,
        })
    }

    /// Assess scenarios in parallel; results keep the input order
    pub fn assess_batch(&self, scenarios: &[PurchaseScenario]) -> Vec<(u32, CalcResult<PurchaseReport>)> {
        log::info!("assessing {} scenarios on tables '{}'", scenarios.len(), self.tables.version);
        scenarios
            .par_iter()
            .map(|s| (s.scenario_id, self.assess_purchase(&s.profile, &s.order)))
            .collect()
    }

    pub fn rental_analysis(&self, inputs: &RentalInputs) -> Option<RentalAnalysis> {
        rental_analysis(inputs, &self.tables.property_tax)
    }

    pub fn compare_loans(&self, request: &ComparisonRequest) -> LoanComparison {
        compare_loans(&self.tables.lenders, request, self.tables.limits.msr)
    }

    /// Repayment schedule at the TDSR stress rate, or at `annual_rate` when given
    pub fn amortization(&self, principal: f64, annual_rate: Option<f64>, tenure_years: f64) -> AmortizationSchedule {
        let rate = annual_rate.unwrap_or(self.tables.limits.stress_rate);
        amortization_schedule(principal, rate, tenure_years)
    }

    pub fn progress_payments(&self, price: f64) -> Vec<PaymentMilestone> {
        progress_payments(&self.tables.progress, price)
    }

    pub fn sale_proceeds(&self, inputs: &SaleInputs) -> Option<SaleProceeds> {
        sale_proceeds(inputs, &self.tables.seller)
    }

    pub fn lease_stamp_duty(&self, monthly_rent: f64, years: f64) -> Option<LeaseDuty> {
        lease_stamp_duty(monthly_rent, years, &self.tables.lease)
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buyer::{Citizenship, PropertyType};
    use crate::error::CalcError;

    fn profile() -> BuyerProfile {
        BuyerProfile {
            citizenship: Citizenship::Citizen,
            is_first_time: true,
            property_count: 0,
            annual_income: 150_000.0,
            cpf_savings: 120_000.0,
            cash_savings: 150_000.0,
        }
    }

    fn order() -> PropertyOrder {
        PropertyOrder {
            property_type: PropertyType::Condo,
            property_price: 1_000_000.0,
        }
    }

    #[test]
    fn test_assess_purchase() {
        let calc = Calculator::new();
        let report = calc.assess_purchase(&profile(), &order()).unwrap();
        assert_eq!(report.stamp_duties.total, 24_600.0);
        assert_eq!(report.affordability.loan_amount, 750_000.0);
        assert_eq!(report.grants.len(), 1);
        assert_eq!(
            report.affordability.total_initial_outlay,
            report.affordability.total_upfront_cash_required + report.affordability.actual_cpf_used
        );
    }

    #[test]
    fn test_assess_purchase_rejects_bad_input() {
        let calc = Calculator::new();
        let mut bad_order = order();
        bad_order.property_price = 0.0;
        assert!(matches!(
            calc.assess_purchase(&profile(), &bad_order),
            Err(CalcError::InvalidInput { .. })
        ));

        let mut bad_profile = profile();
        bad_profile.cpf_savings = -5.0;
        assert!(calc.assess_purchase(&bad_profile, &order()).is_err());
    }

    #[test]
    fn test_assess_purchase_enforces_residency_rules() {
        let calc = Calculator::new();
        let foreigner = BuyerProfile {
            citizenship: Citizenship::Foreigner,
            ..profile()
        };
        let hdb = PropertyOrder {
            property_type: PropertyType::Hdb,
            property_price: 500_000.0,
        };
        assert!(matches!(
            calc.assess_purchase(&foreigner, &hdb),
            Err(CalcError::InvalidInput { ref field, .. }) if field == "property_type"
        ));
        assert!(calc.assess_purchase(&foreigner, &order()).is_ok());

        let pr = BuyerProfile {
            citizenship: Citizenship::Pr,
            ..profile()
        };
        let landed = PropertyOrder {
            property_type: PropertyType::Landed,
            property_price: 3_000_000.0,
        };
        assert!(calc.assess_purchase(&pr, &landed).is_err());
        assert!(calc.assess_purchase(&pr, &hdb).is_ok());
        assert!(calc.assess_purchase(&profile(), &landed).is_ok());
    }

    #[test]
    fn test_idempotent() {
        let calc = Calculator::new();
        let a = calc.assess_purchase(&profile(), &order()).unwrap();
        let b = calc.assess_purchase(&profile(), &order()).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            a.affordability.total_upfront_cash_required.to_bits(),
            b.affordability.total_upfront_cash_required.to_bits()
        );
    }

    #[test]
    fn test_batch_preserves_order_and_errors() {
        let calc = Calculator::new();
        let mut scenarios: Vec<PurchaseScenario> = (1..=20)
            .map(|id| PurchaseScenario {
                scenario_id: id,
                profile: profile(),
                order: PropertyOrder {
                    property_type: PropertyType::Hdb,
                    property_price: 400_000.0 + id as f64 * 10_000.0,
                },
            })
            .collect();
        scenarios[4].order.property_price = -1.0;
        scenarios[9].profile.citizenship = Citizenship::Foreigner;

        let results = calc.assess_batch(&scenarios);
        assert_eq!(results.len(), 20);
        for (i, (id, result)) in results.iter().enumerate() {
            assert_eq!(*id, i as u32 + 1);
            assert_eq!(result.is_err(), i == 4 || i == 9);
        }
    }

    #[test]
    fn test_custom_tables_flow_through() {
        let mut calc = Calculator::new();
        calc.tables_mut().limits.ltv_private = 0.55;
        let report = calc.assess_purchase(&profile(), &order()).unwrap();
        assert_eq!(report.affordability.loan_amount, 550_000.0);
    }

    #[test]
    fn test_other_components_use_tables() {
        let calc = Calculator::new();
        assert_eq!(calc.progress_payments(1_000_000.0).len(), 5);
        assert!(calc.lease_stamp_duty(3_500.0, 2.0).is_some());
        assert_eq!(
            calc.compare_loans(&ComparisonRequest {
                principal: 500_000.0,
                tenure_years: 25.0,
                monthly_income: None,
                property_type: None,
            })
            .offers
            .len(),
            8
        );
        assert_eq!(calc.amortization(100_000.0, None, 10.0).rows.len(), 120);
    }
}
