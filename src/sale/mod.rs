//! Seller-side calculations

mod proceeds;

pub use proceeds::{
    cpf_refund, holding_period_years, resale_levy, sale_proceeds, sellers_stamp_duty, CpfRefund, ResaleLevy,
    SaleInputs, SaleProceeds, SellerStampDuty,
};
