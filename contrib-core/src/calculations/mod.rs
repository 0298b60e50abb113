//! Retirement savings projections.
//!
//! All arithmetic is carried out in [`rust_decimal::Decimal`]; rounding is
//! applied only when values are displayed.

pub mod common;
pub mod impact;

pub use impact::{ANNUAL_GROWTH_RATE, ImpactCalculator, ImpactError, ImpactResult, Projection};
