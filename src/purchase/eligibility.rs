//! Maximum loan from income under the TDSR ceiling

use crate::financing::max_principal;
use crate::format::non_negative;
use crate::rates::LendingLimits;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanEligibility {
    pub monthly_income: f64,
    /// Monthly repayment allowed under TDSR
    pub max_debt_service: f64,
    /// Rounded to the nearest dollar
    pub max_loan: f64,
}

/// Size the loan whose stress-rate instalment equals the TDSR allowance.
/// Negative or non-numeric income is treated as zero.
pub fn loan_eligibility(annual_income: f64, limits: &LendingLimits) -> LoanEligibility {
    let monthly_income = non_negative(annual_income) / 12.0;
    let max_debt_service = monthly_income * limits.tdsr;
    let max_loan = max_principal(max_debt_service, limits.stress_rate, limits.stress_tenure_years).round();

    log::debug!(
        "TDSR allowance {:.2}/month supports a loan of {:.0}",
        max_debt_service,
        max_loan
    );

    LoanEligibility {
        monthly_income,
        max_debt_service,
        max_loan,
    }
}
