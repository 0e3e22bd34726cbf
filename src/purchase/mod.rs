//! Purchase-side calculations: loan eligibility, stamp duties, affordability, grants

mod affordability;
mod eligibility;
mod grants;
mod stamp_duty;

pub use affordability::{affordability, Affordability};
pub use eligibility::{loan_eligibility, LoanEligibility};
pub use grants::{grant_eligibility, ownership_notice, NoticeLevel, OwnershipNotice};
pub use stamp_duty::{stamp_duties, StampDuties};
