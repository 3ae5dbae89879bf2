//! Validator exposure lookups.
//!
//! Only the first [`MAX_EXPOSED_NOMINATORS`] nominators of a validator are
//! rewarded. Relay chains store exposures in one of two generations of
//! storage, each served by its own [`ExposureStrategy`]; the scanning logic
//! on top of them is shared by [`ExposureResolver`].
//!
//! [`MAX_EXPOSED_NOMINATORS`]: crate::utils::constants::MAX_EXPOSED_NOMINATORS

use std::{borrow::Cow, sync::Arc};

use async_trait::async_trait;

use crate::{
	models::{Amount, EraExposureRecord, EraIndex, IndividualExposure, StakingApi},
	services::{
		blockchain::{BlockChainError, ChainQueryClient},
		staking::StakingError,
	},
	utils::constants::MAX_EXPOSED_NOMINATORS,
};

/// Stake summary of a validator in an era
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorStake {
	pub total: Amount,
	pub own: Amount,
	pub page_count: u32,
	/// Nominators read together with the summary, when storage keeps them in
	/// the same record
	pub others: Option<Vec<IndividualExposure>>,
}

/// Access to one generation of exposure storage
#[async_trait]
pub trait ExposureStrategy: Send + Sync {
	fn api(&self) -> StakingApi;

	/// Validators holding an exposure in the era
	async fn era_validators(
		&self,
		client: &dyn ChainQueryClient,
		era: EraIndex,
	) -> Result<Vec<String>, BlockChainError>;

	/// Stake summary of a validator, `None` when it was not active in the era
	async fn stake(
		&self,
		client: &dyn ChainQueryClient,
		era: EraIndex,
		validator: &str,
	) -> Result<Option<ValidatorStake>, BlockChainError>;

	/// Nominator stakes on one page below the stake's `page_count`
	async fn page(
		&self,
		client: &dyn ChainQueryClient,
		era: EraIndex,
		validator: &str,
		page: u32,
	) -> Result<Vec<IndividualExposure>, BlockChainError>;
}

/// Single page `erasStakersClipped` storage
pub struct LegacyStakers;

#[async_trait]
impl ExposureStrategy for LegacyStakers {
	fn api(&self) -> StakingApi {
		StakingApi::Legacy
	}

	async fn era_validators(
		&self,
		client: &dyn ChainQueryClient,
		era: EraIndex,
	) -> Result<Vec<String>, BlockChainError> {
		client.eras_stakers_clipped_validators(era).await
	}

	async fn stake(
		&self,
		client: &dyn ChainQueryClient,
		era: EraIndex,
		validator: &str,
	) -> Result<Option<ValidatorStake>, BlockChainError> {
		Ok(client
			.eras_stakers_clipped(era, validator)
			.await?
			.map(|exposure| ValidatorStake {
				total: exposure.total,
				own: exposure.own,
				page_count: 1,
				others: Some(exposure.others),
			}))
	}

	async fn page(
		&self,
		client: &dyn ChainQueryClient,
		era: EraIndex,
		validator: &str,
		page: u32,
	) -> Result<Vec<IndividualExposure>, BlockChainError> {
		if page > 0 {
			return Ok(Vec::new());
		}
		Ok(client
			.eras_stakers_clipped(era, validator)
			.await?
			.map(|exposure| exposure.others)
			.unwrap_or_default())
	}
}

/// `erasStakersOverview` plus `erasStakersPaged` storage
pub struct PagedStakers;

#[async_trait]
impl ExposureStrategy for PagedStakers {
	fn api(&self) -> StakingApi {
		StakingApi::Paged
	}

	async fn era_validators(
		&self,
		client: &dyn ChainQueryClient,
		era: EraIndex,
	) -> Result<Vec<String>, BlockChainError> {
		client.eras_stakers_overview_validators(era).await
	}

	async fn stake(
		&self,
		client: &dyn ChainQueryClient,
		era: EraIndex,
		validator: &str,
	) -> Result<Option<ValidatorStake>, BlockChainError> {
		Ok(client
			.eras_stakers_overview(era, validator)
			.await?
			.map(|overview| ValidatorStake {
				total: overview.total,
				own: overview.own,
				page_count: overview.page_count,
				others: None,
			}))
	}

	async fn page(
		&self,
		client: &dyn ChainQueryClient,
		era: EraIndex,
		validator: &str,
		page: u32,
	) -> Result<Vec<IndividualExposure>, BlockChainError> {
		// the overview counted this page, so its absence means pruned or partial storage
		client
			.eras_stakers_paged(era, validator, page)
			.await?
			.map(|page| page.others)
			.ok_or_else(|| {
				BlockChainError::storage_not_found(format!(
					"erasStakersPaged({}, {}, {})",
					era, validator, page
				))
			})
	}
}

/// Resolves exposure membership on top of the strategy of a chain
#[derive(Clone)]
pub struct ExposureResolver {
	strategy: Arc<dyn ExposureStrategy>,
	max_exposed: usize,
}

impl ExposureResolver {
	/// Creates a resolver for the storage generation a chain exposes
	pub fn new(api: StakingApi) -> Self {
		let strategy: Arc<dyn ExposureStrategy> = match api {
			StakingApi::Legacy => Arc::new(LegacyStakers),
			StakingApi::Paged => Arc::new(PagedStakers),
		};
		Self {
			strategy,
			max_exposed: MAX_EXPOSED_NOMINATORS,
		}
	}

	/// Lowers the rewarded nominator cutoff; it can never exceed the protocol limit
	pub fn with_max_exposed(mut self, max_exposed: usize) -> Result<Self, StakingError> {
		if max_exposed == 0 || max_exposed > MAX_EXPOSED_NOMINATORS {
			return Err(StakingError::InvalidConfig(format!(
				"max exposed nominators must be within 1..={}, got {}",
				MAX_EXPOSED_NOMINATORS, max_exposed
			)));
		}
		self.max_exposed = max_exposed;
		Ok(self)
	}

	pub fn api(&self) -> StakingApi {
		self.strategy.api()
	}

	pub fn max_exposed(&self) -> usize {
		self.max_exposed
	}

	/// Whether `account` is rewarded in `era` by any of `validator_ids`
	///
	/// Validators are checked in order and the scan stops at the first exposure.
	pub async fn is_exposed(
		&self,
		client: &dyn ChainQueryClient,
		era: EraIndex,
		account: &str,
		validator_ids: &[String],
	) -> Result<bool, StakingError> {
		for validator in validator_ids {
			if validator == account {
				return Ok(true);
			}
			let Some(stake) = self.strategy.stake(client, era, validator).await? else {
				continue;
			};
			if stake.total.is_zero() {
				continue;
			}
			if self
				.find_nominator(client, era, validator, &stake, account)
				.await?
				.is_some()
			{
				tracing::debug!(era, validator = %validator, "account is exposed");
				return Ok(true);
			}
		}
		Ok(false)
	}

	/// Every rewarded stake of `account` in `era`
	///
	/// Scans all validators of the era once, so the result does not depend on
	/// the account's current nominations.
	pub async fn era_exposure(
		&self,
		client: &dyn ChainQueryClient,
		era: EraIndex,
		account: &str,
	) -> Result<Vec<EraExposureRecord>, StakingError> {
		let mut records = Vec::new();

		for validator in self.strategy.era_validators(client, era).await? {
			let Some(stake) = self.strategy.stake(client, era, &validator).await? else {
				continue;
			};
			if stake.total.is_zero() {
				continue;
			}

			let is_validator = validator == account;
			let account_stake = if is_validator {
				Some(stake.own)
			} else {
				self.find_nominator(client, era, &validator, &stake, account)
					.await?
			};

			if let Some(account_stake) = account_stake {
				records.push(EraExposureRecord {
					era,
					validator_id: validator,
					account_stake,
					validator_total: stake.total,
					is_validator,
				});
			}
		}

		Ok(records)
	}

	/// Stake of `account` among the rewarded nominators of a validator
	async fn find_nominator(
		&self,
		client: &dyn ChainQueryClient,
		era: EraIndex,
		validator: &str,
		stake: &ValidatorStake,
		account: &str,
	) -> Result<Option<Amount>, StakingError> {
		let mut seen = 0usize;

		for page in 0..stake.page_count {
			let nominators: Cow<[IndividualExposure]> = match (page, stake.others.as_deref()) {
				(0, Some(others)) => Cow::Borrowed(others),
				_ => Cow::Owned(self.strategy.page(client, era, validator, page).await?),
			};
			if nominators.is_empty() {
				break;
			}
			for nominator in nominators.iter() {
				if seen >= self.max_exposed {
					return Ok(None);
				}
				seen += 1;
				if nominator.who == account {
					return Ok(Some(nominator.value));
				}
			}
		}

		Ok(None)
	}
}
