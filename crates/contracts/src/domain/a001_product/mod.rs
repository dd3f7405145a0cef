pub mod adapter;
pub mod aggregate;
pub mod dto;
pub mod filter;
pub mod taxonomy;

pub use aggregate::{Presentation, Product};
