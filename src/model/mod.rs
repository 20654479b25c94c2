//! Regression model: category encoding, least-squares solve, fit/predict.

pub mod encoding;
pub mod ols;
pub mod regression;

pub use encoding::*;
pub use ols::*;
pub use regression::*;
