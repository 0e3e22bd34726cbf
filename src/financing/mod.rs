//! Mortgage math, bank package comparison and BUC progress payments

pub mod amortization;
mod comparison;
mod progress;

pub use amortization::{amortization_schedule, max_principal, monthly_payment, AmortizationRow, AmortizationSchedule};
pub use comparison::{compare_loans, ComparisonRequest, LoanComparison, LoanOffer};
pub use progress::{progress_payments, PaymentMilestone};
