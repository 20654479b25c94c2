//! Data-preparation stages: cleaning, experience grouping, train/test
//! splitting, and synthetic sample generation.

pub mod clean;
pub mod group;
pub mod sample;
pub mod split;

pub use clean::*;
pub use group::*;
pub use sample::*;
pub use split::*;
