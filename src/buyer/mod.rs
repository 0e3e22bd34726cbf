//! Buyer profiles, property orders and batch scenario loading

mod data;
pub mod loader;

pub use data::{BuyerProfile, Citizenship, FlatType, PropertyOrder, PropertyType};
pub use loader::{load_scenarios, load_scenarios_from_reader, PurchaseScenario};
