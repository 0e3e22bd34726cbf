//! Singapore property calculators - purchase, financing, investment and sale
//!
//! This library provides:
//! - Loan eligibility under TDSR, LTV-capped loan sizing and upfront cash breakdown
//! - Buyer's Stamp Duty, ABSD, Seller's Stamp Duty and lease stamp duty
//! - Bank package comparison, amortization schedules and BUC progress payments
//! - Rental yield / cash flow with progressive property tax
//! - Seller's net proceeds including CPF refund with accrued interest
//!
//! Rates live in swappable [`rates::RateTables`], loadable from CSV.

pub mod buyer;
pub mod calculator;
pub mod error;
pub mod financing;
pub mod format;
pub mod investment;
pub mod purchase;
pub mod rates;
pub mod sale;

// Re-export commonly used types
pub use buyer::{BuyerProfile, Citizenship, FlatType, PropertyOrder, PropertyType};
pub use calculator::{Calculator, PurchaseReport};
pub use error::{CalcError, CalcResult};
pub use rates::RateTables;
