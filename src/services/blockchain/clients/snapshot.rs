//! In-memory chain client serving a [`ChainSnapshot`].
//!
//! Used to replay recorded observations offline and as the chain fixture of
//! the engine's tests. The snapshot can be swapped at runtime to simulate the
//! chain advancing.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
	models::{
		Amount, ChainId, ChainSnapshot, EraIndex, EraRewardPoints, EraSnapshot, ExposureOverview,
		ExposurePage, LegacyExposure, ValidatorPrefs,
	},
	services::blockchain::{BlockChainError, ChainQueryClient},
};

/// Chain client answering every query from a snapshot held in memory
pub struct SnapshotClient {
	chain: ChainId,
	snapshot: RwLock<ChainSnapshot>,
}

impl SnapshotClient {
	pub fn new(snapshot: ChainSnapshot) -> Self {
		Self {
			chain: snapshot.chain,
			snapshot: RwLock::new(snapshot),
		}
	}

	/// Replaces the served state; the chain must stay the same
	pub async fn update(&self, snapshot: ChainSnapshot) -> Result<(), BlockChainError> {
		if snapshot.chain != self.chain {
			return Err(BlockChainError::internal_error(format!(
				"snapshot for {} given to client of {}",
				snapshot.chain, self.chain
			)));
		}
		*self.snapshot.write().await = snapshot;
		Ok(())
	}

	async fn with_era<T>(&self, era: EraIndex, f: impl FnOnce(&EraSnapshot) -> T) -> Option<T> {
		self.snapshot.read().await.era(era).map(f)
	}
}

#[async_trait]
impl ChainQueryClient for SnapshotClient {
	fn chain(&self) -> ChainId {
		self.chain
	}

	async fn existential_deposit(&self) -> Result<Amount, BlockChainError> {
		Ok(self.snapshot.read().await.existential_deposit)
	}

	async fn eras_validator_reward(
		&self,
		era: EraIndex,
	) -> Result<Option<Amount>, BlockChainError> {
		Ok(self
			.with_era(era, |snapshot| snapshot.validator_reward)
			.await
			.flatten())
	}

	async fn eras_reward_points(&self, era: EraIndex) -> Result<EraRewardPoints, BlockChainError> {
		Ok(self
			.with_era(era, |snapshot| snapshot.reward_points.clone())
			.await
			.unwrap_or_default())
	}

	async fn eras_validator_prefs(
		&self,
		era: EraIndex,
		validator: &str,
	) -> Result<ValidatorPrefs, BlockChainError> {
		Ok(self
			.with_era(era, |snapshot| snapshot.validator_prefs.get(validator).cloned())
			.await
			.flatten()
			.unwrap_or_default())
	}

	async fn validator_prefs(
		&self,
		validator: &str,
	) -> Result<Option<ValidatorPrefs>, BlockChainError> {
		Ok(self.snapshot.read().await.validators.get(validator).cloned())
	}

	async fn eras_stakers_clipped(
		&self,
		era: EraIndex,
		validator: &str,
	) -> Result<Option<LegacyExposure>, BlockChainError> {
		Ok(self
			.with_era(era, |snapshot| snapshot.stakers_clipped.get(validator).cloned())
			.await
			.flatten())
	}

	async fn eras_stakers_clipped_validators(
		&self,
		era: EraIndex,
	) -> Result<Vec<String>, BlockChainError> {
		Ok(self
			.with_era(era, |snapshot| snapshot.stakers_clipped.keys().cloned().collect())
			.await
			.unwrap_or_default())
	}

	async fn eras_stakers_overview(
		&self,
		era: EraIndex,
		validator: &str,
	) -> Result<Option<ExposureOverview>, BlockChainError> {
		Ok(self
			.with_era(era, |snapshot| snapshot.stakers_overview.get(validator).cloned())
			.await
			.flatten())
	}

	async fn eras_stakers_overview_validators(
		&self,
		era: EraIndex,
	) -> Result<Vec<String>, BlockChainError> {
		Ok(self
			.with_era(era, |snapshot| snapshot.stakers_overview.keys().cloned().collect())
			.await
			.unwrap_or_default())
	}

	async fn eras_stakers_paged(
		&self,
		era: EraIndex,
		validator: &str,
		page: u32,
	) -> Result<Option<ExposurePage>, BlockChainError> {
		Ok(self
			.with_era(era, |snapshot| {
				snapshot
					.stakers_paged
					.get(validator)
					.and_then(|pages| pages.get(page as usize))
					.cloned()
			})
			.await
			.flatten())
	}

	async fn rewards_claimed(&self, era: EraIndex, validator: &str) -> Result<bool, BlockChainError> {
		Ok(self
			.with_era(era, |snapshot| snapshot.claimed.contains(validator))
			.await
			.unwrap_or(false))
	}

	async fn pool_pending_rewards(&self, address: &str) -> Result<Amount, BlockChainError> {
		Ok(self
			.snapshot
			.read()
			.await
			.pool_pending_rewards
			.get(address)
			.copied()
			.unwrap_or_default())
	}
}
