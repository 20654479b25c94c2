//! Reporting: fairness classification and formatted terminal output.

pub mod fairness;
pub mod format;

pub use fairness::*;
pub use format::*;
