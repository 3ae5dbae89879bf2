//! Test helper utilities for chain snapshots
//!
//! - `SnapshotBuilder`: Builder for creating test ChainSnapshot instances

use crate::models::{
	Amount, ChainId, ChainSnapshot, EraIndex, ExposureOverview, ExposurePage, IndividualExposure,
	LegacyExposure, ValidatorPrefs,
};

/// Builder for creating test ChainSnapshot instances
///
/// Exposures added through the builder are written in both storage
/// generations so the snapshot serves legacy and paged resolvers alike.
pub struct SnapshotBuilder {
	snapshot: ChainSnapshot,
	page_size: usize,
}

impl Default for SnapshotBuilder {
	fn default() -> Self {
		Self {
			snapshot: ChainSnapshot::new(ChainId::Polkadot, 100),
			page_size: 512,
		}
	}
}

impl SnapshotBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn chain(mut self, chain: ChainId) -> Self {
		self.snapshot.chain = chain;
		self
	}

	pub fn active_era(mut self, era: EraIndex) -> Self {
		self.snapshot.active_era = era;
		self
	}

	pub fn existential_deposit(mut self, amount: u64) -> Self {
		self.snapshot.existential_deposit = Amount::from(amount);
		self
	}

	pub fn page_size(mut self, page_size: usize) -> Self {
		self.page_size = page_size.max(1);
		self
	}

	pub fn payout(mut self, era: EraIndex, amount: u64) -> Self {
		self.snapshot.era_mut(era).validator_reward = Some(Amount::from(amount));
		self
	}

	pub fn points(mut self, era: EraIndex, validator: &str, points: u32) -> Self {
		let reward_points = &mut self.snapshot.era_mut(era).reward_points;
		reward_points.total += points;
		*reward_points
			.individual
			.entry(validator.to_string())
			.or_default() += points;
		self
	}

	pub fn era_commission(mut self, era: EraIndex, validator: &str, rate: &str) -> Self {
		self.snapshot.era_mut(era).validator_prefs.insert(
			validator.to_string(),
			ValidatorPrefs {
				commission: rate.parse().unwrap_or_default(),
				blocked: false,
			},
		);
		self
	}

	pub fn commission(mut self, validator: &str, rate: &str) -> Self {
		self.snapshot.validators.insert(
			validator.to_string(),
			ValidatorPrefs {
				commission: rate.parse().unwrap_or_default(),
				blocked: false,
			},
		);
		self
	}

	/// Adds a validator's exposure; nominators are in reward order
	pub fn exposure(
		mut self,
		era: EraIndex,
		validator: &str,
		own: u64,
		nominators: &[(&str, u64)],
	) -> Self {
		let others: Vec<IndividualExposure> = nominators
			.iter()
			.map(|(who, value)| IndividualExposure {
				who: who.to_string(),
				value: Amount::from(*value),
			})
			.collect();
		let total = Amount::from(own + nominators.iter().map(|(_, value)| value).sum::<u64>());

		let pages: Vec<ExposurePage> = others
			.chunks(self.page_size)
			.map(|chunk| ExposurePage {
				page_total: chunk
					.iter()
					.fold(Amount::ZERO, |sum, nominator| sum.saturating_add(nominator.value)),
				others: chunk.to_vec(),
			})
			.collect();

		let era_snapshot = self.snapshot.era_mut(era);
		era_snapshot.stakers_overview.insert(
			validator.to_string(),
			ExposureOverview {
				total,
				own: Amount::from(own),
				nominator_count: others.len() as u32,
				page_count: pages.len() as u32,
			},
		);
		era_snapshot
			.stakers_paged
			.insert(validator.to_string(), pages);
		era_snapshot.stakers_clipped.insert(
			validator.to_string(),
			LegacyExposure {
				total,
				own: Amount::from(own),
				others,
			},
		);
		self
	}

	pub fn claimed(mut self, era: EraIndex, validator: &str) -> Self {
		self.snapshot.era_mut(era).claimed.insert(validator.to_string());
		self
	}

	pub fn pool_pending_rewards(mut self, address: &str, amount: u64) -> Self {
		self.snapshot
			.pool_pending_rewards
			.insert(address.to_string(), Amount::from(amount));
		self
	}

	pub fn build(self) -> ChainSnapshot {
		self.snapshot
	}
}
