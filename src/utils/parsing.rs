//! Parsing utilities
//!
//! This module provides utilities for parsing and formatting on-chain quantities:
//! percentage strings into parts-per-billion and planck amounts into token units.

use alloy::primitives::U256;
use rust_decimal::{prelude::ToPrimitive, Decimal};
use std::str::FromStr;

/// Parts per billion in one percent.
pub const PERBILL_PER_PERCENT: u32 = 10_000_000;

/// Parts per billion in one whole.
pub const PERBILL_ONE: u32 = 1_000_000_000;

/// Parses a percentage string such as `"5%"`, `"5.00%"` or `"12.5"` into parts per billion.
///
/// The conversion is exact: inputs with more precision than a billionth, negative
/// values and values above 100% are rejected.
pub fn parse_percent_to_perbill(s: &str) -> Result<u32, String> {
	let trimmed = s.trim().trim_end_matches('%').trim();
	let cleaned = trimmed.replace(',', "");
	let percent = Decimal::from_str(&cleaned)
		.map_err(|e| format!("Invalid percentage: '{}'. Error: {}", s, e))?;

	if percent.is_sign_negative() || percent > Decimal::from(100) {
		return Err(format!("Percentage out of range: '{}'", s));
	}

	let perbill = percent * Decimal::from(PERBILL_PER_PERCENT);
	if !perbill.fract().is_zero() {
		return Err(format!("Percentage too precise: '{}'", s));
	}

	perbill
		.to_u32()
		.ok_or_else(|| format!("Percentage out of range: '{}'", s))
}

/// Formats parts per billion as a percentage string with trailing zeros removed.
pub fn format_perbill_as_percent(perbill: u32) -> String {
	let percent = Decimal::from(perbill) / Decimal::from(PERBILL_PER_PERCENT);
	format!("{}%", percent.normalize())
}

/// Returns `10^exp` as a 256-bit integer.
pub fn pow10(exp: u32) -> U256 {
	(0..exp).fold(U256::from(1u8), |acc, _| acc * U256::from(10u8))
}

/// Formats a planck amount in whole token units, e.g. `15_000_000_000` with 10 decimals as `"1.5"`.
pub fn format_units(amount: U256, decimals: u32) -> String {
	let unit = pow10(decimals);
	let whole = amount / unit;
	let fraction = amount % unit;

	if fraction.is_zero() {
		return whole.to_string();
	}

	let fraction = format!("{:0>width$}", fraction.to_string(), width = decimals as usize);
	format!("{}.{}", whole, fraction.trim_end_matches('0'))
}

/// Parses a decimal or `0x` prefixed hexadecimal string into a 256-bit integer.
pub fn parse_u256(s: &str) -> Result<U256, String> {
	U256::from_str(s.trim()).map_err(|e| format!("Invalid amount: '{}'. Error: {}", s, e))
}
