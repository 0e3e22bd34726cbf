//! Side-by-side bank package comparison

use super::amortization::monthly_payment;
use crate::buyer::PropertyType;
use crate::format::non_negative;
use crate::rates::{LenderTable, RateKind};
use serde::{Deserialize, Serialize};

/// What the borrower wants to compare
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    pub principal: f64,
    pub tenure_years: f64,
    /// Gross monthly income, needed for the MSR check
    #[serde(default)]
    pub monthly_income: Option<f64>,
    #[serde(default)]
    pub property_type: Option<PropertyType>,
}

/// One priced package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanOffer {
    pub bank: String,
    pub kind: RateKind,
    /// Rate charged today (percent)
    pub rate: f64,
    pub monthly_repayment: f64,
    /// Repayment is above the MSR ceiling
    pub exceeds_msr: bool,
    pub lock_in_years: Option<String>,
    pub subsequent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanComparison {
    /// Sorted by monthly repayment, cheapest first
    pub offers: Vec<LoanOffer>,
    /// MSR repayment ceiling, when MSR applies and income is known
    pub msr_limit: Option<f64>,
}

impl LoanComparison {
    pub fn cheapest(&self) -> Option<&LoanOffer> {
        self.offers.first()
    }

    pub fn any_exceeds_msr(&self) -> bool {
        self.offers.iter().any(|offer| offer.exceeds_msr)
    }
}

/// Price every package in `table` and sort ascending by monthly repayment
pub fn compare_loans(table: &LenderTable, request: &ComparisonRequest, msr_ratio: f64) -> LoanComparison {
    let principal = non_negative(request.principal);
    let tenure = non_negative(request.tenure_years);

    let msr_limit = match (request.property_type, request.monthly_income) {
        (Some(property_type), Some(income)) if property_type.msr_applies() && income > 0.0 => {
            Some(income * msr_ratio)
        }
        _ => None,
    };

    let mut offers: Vec<LoanOffer> = table
        .offers
        .iter()
        .map(|lender| {
            let rate = lender.effective_rate(table.sora_3m);
            let monthly_repayment = monthly_payment(principal, rate / 100.0, tenure);
            LoanOffer {
                bank: lender.bank.clone(),
                kind: lender.kind,
                rate,
                monthly_repayment,
                exceeds_msr: msr_limit.is_some_and(|limit| monthly_repayment > limit),
                lock_in_years: lender.lock_in_years.clone(),
                subsequent: lender.subsequent_description(),
            }
        })
        .collect();

    offers.sort_by(|a, b| a.monthly_repayment.total_cmp(&b.monthly_repayment));

    log::debug!(
        "compared {} packages for principal {:.0} over {} years",
        offers.len(),
        principal,
        tenure
    );

    LoanComparison { offers, msr_limit }
}
