//! Core data structures.

pub mod outcome;
pub mod product;
pub mod supplier;

pub use outcome::{CheckOutcome, RunSummary};
pub use product::{OUT_OF_STOCK, Product, StockUpdate};
pub use supplier::Supplier;
