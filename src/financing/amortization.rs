//! Level-payment mortgage math
//!
//! Rates are annual decimals (0.035 = 3.5%), compounded monthly.

use serde::{Deserialize, Serialize};

/// Longest tenure a month-by-month schedule is built for
pub const MAX_SCHEDULE_YEARS: f64 = 100.0;

fn months_in(tenure_years: f64) -> f64 {
    tenure_years * 12.0
}

/// Monthly instalment that repays `principal` over `tenure_years`.
/// Returns 0 when principal, rate or tenure is not positive. Once the
/// compounding factor overflows the payment is interest-only.
pub fn monthly_payment(principal: f64, annual_rate: f64, tenure_years: f64) -> f64 {
    if !(principal > 0.0 && annual_rate > 0.0 && tenure_years > 0.0) {
        return 0.0;
    }
    let r = annual_rate / 12.0;
    let n = months_in(tenure_years);
    let growth = (1.0 + r).powf(n);
    if !growth.is_finite() {
        return principal * r;
    }
    principal * (r * growth) / (growth - 1.0)
}

/// Largest principal that `payment` can service; inverse of [`monthly_payment`].
/// A zero rate amortizes linearly.
pub fn max_principal(payment: f64, annual_rate: f64, tenure_years: f64) -> f64 {
    if !(payment > 0.0 && tenure_years > 0.0) {
        return 0.0;
    }
    let n = months_in(tenure_years);
    if annual_rate <= 0.0 {
        return payment * n;
    }
    let r = annual_rate / 12.0;
    let growth = (1.0 + r).powf(n);
    if !growth.is_finite() {
        return payment / r;
    }
    payment * ((growth - 1.0) / (r * growth))
}

/// A single month of an amortization schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub opening_balance: f64,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub closing_balance: f64,
}

/// Month-by-month repayment of a loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub monthly_payment: f64,
    pub rows: Vec<AmortizationRow>,
}

impl AmortizationSchedule {
    pub fn total_interest(&self) -> f64 {
        self.rows.iter().map(|row| row.interest).sum()
    }

    pub fn total_paid(&self) -> f64 {
        self.rows.iter().map(|row| row.payment).sum()
    }

    /// Interest and principal per loan year
    pub fn yearly_totals(&self) -> Vec<(u32, f64, f64)> {
        let mut years: Vec<(u32, f64, f64)> = Vec::new();
        for row in &self.rows {
            let year = (row.month - 1) / 12 + 1;
            match years.last_mut() {
                Some(last) if last.0 == year => {
                    last.1 += row.interest;
                    last.2 += row.principal;
                }
                _ => years.push((year, row.interest, row.principal)),
            }
        }
        years
    }
}

/// Full schedule; tenure is rounded to whole months and the last payment clears the balance.
/// Empty when the tenure is under a month or longer than [`MAX_SCHEDULE_YEARS`].
pub fn amortization_schedule(principal: f64, annual_rate: f64, tenure_years: f64) -> AmortizationSchedule {
    let empty = AmortizationSchedule {
        monthly_payment: 0.0,
        rows: Vec::new(),
    };
    if tenure_years > MAX_SCHEDULE_YEARS {
        log::warn!("tenure of {} years exceeds the {} year schedule limit", tenure_years, MAX_SCHEDULE_YEARS);
        return empty;
    }
    let months = months_in(tenure_years).round();
    if !(principal > 0.0) || !(months >= 1.0) {
        return empty;
    }
    let months = months as u32;
    let r = if annual_rate > 0.0 { annual_rate / 12.0 } else { 0.0 };
    let payment = if r > 0.0 {
        monthly_payment(principal, annual_rate, months as f64 / 12.0)
    } else {
        principal / months as f64
    };

    let mut rows = Vec::with_capacity(months as usize);
    let mut balance = principal;
    for month in 1..=months {
        let interest = balance * r;
        let mut principal_part = payment - interest;
        if month == months {
            principal_part = balance;
        }
        let closing = balance - principal_part;
        rows.push(AmortizationRow {
            month,
            opening_balance: balance,
            payment: interest + principal_part,
            interest,
            principal: principal_part,
            closing_balance: closing,
        });
        balance = closing;
    }

    AmortizationSchedule {
        monthly_payment: payment,
        rows,
    }
}
