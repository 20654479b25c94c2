//! Chart artifacts (SVG).

pub mod charts;

pub use charts::*;
