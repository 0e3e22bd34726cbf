//! Investment-side calculations: rental yield and lease stamp duty

mod lease;
mod rental;

pub use lease::{lease_stamp_duty, LeaseDuty};
pub use rental::{
    property_tax, rental_analysis, AnnualBreakdown, MonthlyBreakdown, MortgageTerms, Occupancy, RentalAnalysis,
    RentalInputs,
};
