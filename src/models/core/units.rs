//! Monetary amounts and commission rates.
//!
//! Both types are exact: amounts are 256-bit planck values and commissions are
//! parts-per-billion rationals, so comparisons never depend on how a value was
//! rendered by the node (`"1%"` and `"1.00%"` are the same commission).

use std::{fmt, str::FromStr};

use alloy::primitives::U256;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::utils::parsing::{
	format_perbill_as_percent, format_units, parse_percent_to_perbill, parse_u256, PERBILL_ONE,
};

/// Planck denominated balance with arbitrary precision up to 256 bits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(U256);

impl Amount {
	pub const ZERO: Amount = Amount(U256::ZERO);

	pub fn new(value: U256) -> Self {
		Self(value)
	}

	pub fn as_u256(&self) -> U256 {
		self.0
	}

	pub fn is_zero(&self) -> bool {
		self.0.is_zero()
	}

	pub fn saturating_sub(self, other: Amount) -> Amount {
		Amount(self.0.saturating_sub(other.0))
	}

	pub fn saturating_add(self, other: Amount) -> Amount {
		Amount(self.0.saturating_add(other.0))
	}

	/// Formats the amount in whole units of the given number of decimals
	pub fn to_units(&self, decimals: u32) -> String {
		format_units(self.0, decimals)
	}
}

impl From<u64> for Amount {
	fn from(value: u64) -> Self {
		Self(U256::from(value))
	}
}

impl From<u128> for Amount {
	fn from(value: u128) -> Self {
		Self(U256::from(value))
	}
}

impl From<U256> for Amount {
	fn from(value: U256) -> Self {
		Self(value)
	}
}

impl FromStr for Amount {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		parse_u256(s).map(Amount)
	}
}

impl fmt::Display for Amount {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Serialize for Amount {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.0.to_string())
	}
}

/// Wire forms accepted for amounts and commissions
#[derive(Deserialize)]
#[serde(untagged)]
enum NumericRepr {
	Text(String),
	Integer(u64),
	Float(f64),
}

impl<'de> Deserialize<'de> for Amount {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		match NumericRepr::deserialize(deserializer)? {
			NumericRepr::Text(text) => text.parse().map_err(de::Error::custom),
			NumericRepr::Integer(value) => Ok(Amount::from(value)),
			NumericRepr::Float(value) => Err(de::Error::custom(format!(
				"amounts must be integers, got {}",
				value
			))),
		}
	}
}

/// Commission rate held as parts per billion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Commission(u32);

impl Commission {
	pub const ZERO: Commission = Commission(0);

	/// Builds a commission from parts per billion, clamped to 100%
	pub fn from_perbill(parts: u32) -> Self {
		Self(parts.min(PERBILL_ONE))
	}

	pub fn perbill(&self) -> u32 {
		self.0
	}

	/// Applies the rate to an amount, rounding down; `None` on overflow
	pub fn checked_mul_floor(&self, value: U256) -> Option<U256> {
		value
			.checked_mul(U256::from(self.0))
			.map(|scaled| scaled / U256::from(PERBILL_ONE))
	}
}

impl FromStr for Commission {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		parse_percent_to_perbill(s).map(Commission)
	}
}

impl fmt::Display for Commission {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&format_perbill_as_percent(self.0))
	}
}

impl Serialize for Commission {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.to_string())
	}
}

impl<'de> Deserialize<'de> for Commission {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		match NumericRepr::deserialize(deserializer)? {
			NumericRepr::Text(text) => text.parse().map_err(de::Error::custom),
			NumericRepr::Integer(value) => value.to_string().parse().map_err(de::Error::custom),
			NumericRepr::Float(value) => value.to_string().parse().map_err(de::Error::custom),
		}
	}
}
