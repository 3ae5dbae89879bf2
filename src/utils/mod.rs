//! Utility modules for common functionality.
//!
//! - constants: Constants for the application
//! - logging: Logging utilities
//! - metrics: Metrics utilities
//! - parsing: Percentage and amount parsing
//! - tests: Builders for test fixtures

pub mod constants;
pub mod logging;
pub mod metrics;
pub mod parsing;

pub mod tests;

pub use constants::*;
