//! Shared domain types for the salary fairness pipeline.

pub mod types;

pub use types::*;
