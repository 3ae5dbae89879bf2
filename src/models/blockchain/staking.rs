//! Staking storage records as decoded from relay chain state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Amount, Commission, EraIndex};

/// Stake of a single nominator behind a validator
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IndividualExposure {
	pub who: String,
	pub value: Amount,
}

/// `staking.erasStakersClipped` entry: the full rewarded exposure in a single record
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LegacyExposure {
	pub total: Amount,
	pub own: Amount,
	#[serde(default)]
	pub others: Vec<IndividualExposure>,
}

/// `staking.erasStakersOverview` entry of paged staking
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureOverview {
	pub total: Amount,
	pub own: Amount,
	pub nominator_count: u32,
	pub page_count: u32,
}

/// `staking.erasStakersPaged` page
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposurePage {
	pub page_total: Amount,
	#[serde(default)]
	pub others: Vec<IndividualExposure>,
}

/// `staking.erasRewardPoints` for one era
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EraRewardPoints {
	pub total: u32,
	#[serde(default)]
	pub individual: BTreeMap<String, u32>,
}

impl EraRewardPoints {
	pub fn points_of(&self, validator_id: &str) -> u32 {
		self.individual.get(validator_id).copied().unwrap_or_default()
	}
}

/// `staking.validators` / `staking.erasValidatorPrefs` entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValidatorPrefs {
	pub commission: Commission,
	#[serde(default)]
	pub blocked: bool,
}

/// An account's stake behind one validator in one era
///
/// Derived while scanning exposure data and discarded after the computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EraExposureRecord {
	pub era: EraIndex,
	pub validator_id: String,
	/// Stake of the account, its own bond when it is the validator itself
	pub account_stake: Amount,
	pub validator_total: Amount,
	pub is_validator: bool,
}
