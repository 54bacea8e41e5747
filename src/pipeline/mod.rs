//! Pipeline entry point for batch stock checks.

pub mod check;

pub use check::run_check;
