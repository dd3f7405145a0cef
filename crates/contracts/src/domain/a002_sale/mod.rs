pub mod aggregate;
pub mod dto;

pub use aggregate::{Sale, SaleCustomer, SaleLine, SaleTotals};
pub use dto::{SaleDraft, SaleLineDraft};
