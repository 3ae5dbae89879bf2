//! Point-in-time copy of the chain state read by the staking computations.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::{
	Amount, ChainId, EraIndex, EraRewardPoints, ExposureOverview, ExposurePage, LegacyExposure,
	ValidatorPrefs,
};

/// Staking storage of a single era
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EraSnapshot {
	/// Total payout of the era, absent until the era has ended
	pub validator_reward: Option<Amount>,
	pub reward_points: EraRewardPoints,
	pub validator_prefs: BTreeMap<String, ValidatorPrefs>,
	pub stakers_clipped: BTreeMap<String, LegacyExposure>,
	pub stakers_overview: BTreeMap<String, ExposureOverview>,
	pub stakers_paged: BTreeMap<String, Vec<ExposurePage>>,
	/// Validators whose rewards for the era were already paid out
	pub claimed: BTreeSet<String>,
}

/// Chain state snapshot served by the in-memory chain client
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainSnapshot {
	pub chain: ChainId,
	pub active_era: EraIndex,
	#[serde(default)]
	pub existential_deposit: Amount,
	#[serde(default)]
	pub eras: BTreeMap<EraIndex, EraSnapshot>,
	/// Current preferences of every validator
	#[serde(default)]
	pub validators: BTreeMap<String, ValidatorPrefs>,
	/// Result of the `NominationPoolsApi::pending_rewards` runtime call per member
	#[serde(default)]
	pub pool_pending_rewards: BTreeMap<String, Amount>,
}

impl ChainSnapshot {
	pub fn new(chain: ChainId, active_era: EraIndex) -> Self {
		Self {
			chain,
			active_era,
			existential_deposit: Amount::ZERO,
			eras: BTreeMap::new(),
			validators: BTreeMap::new(),
			pool_pending_rewards: BTreeMap::new(),
		}
	}

	pub fn era(&self, era: EraIndex) -> Option<&EraSnapshot> {
		self.eras.get(&era)
	}

	pub fn era_mut(&mut self, era: EraIndex) -> &mut EraSnapshot {
		self.eras.entry(era).or_default()
	}
}
