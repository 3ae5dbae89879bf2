//! Chain query interface consumed by the engine.
//!
//! The RPC client itself lives outside this crate; implementations of this
//! trait adapt it and hand back already decoded storage values.

use async_trait::async_trait;

use crate::{
	models::{
		Amount, ChainId, EraIndex, EraRewardPoints, ExposureOverview, ExposurePage,
		LegacyExposure, ValidatorPrefs,
	},
	services::blockchain::BlockChainError,
};

/// Read access to the state of one chain
///
/// Storage lookups for absent keys return `Ok(None)`; `Err` is reserved for
/// transport or decoding failures.
#[async_trait]
pub trait ChainQueryClient: Send + Sync {
	/// Chain this client is connected to
	fn chain(&self) -> ChainId;

	/// `balances.existentialDeposit` constant
	async fn existential_deposit(&self) -> Result<Amount, BlockChainError>;

	/// `staking.erasValidatorReward`, absent until the era has been paid
	async fn eras_validator_reward(&self, era: EraIndex)
		-> Result<Option<Amount>, BlockChainError>;

	/// `staking.erasRewardPoints`
	async fn eras_reward_points(&self, era: EraIndex) -> Result<EraRewardPoints, BlockChainError>;

	/// `staking.erasValidatorPrefs`, the commission a validator charged in an era
	async fn eras_validator_prefs(
		&self,
		era: EraIndex,
		validator: &str,
	) -> Result<ValidatorPrefs, BlockChainError>;

	/// `staking.validators`, current preferences of a validator
	async fn validator_prefs(&self, validator: &str)
		-> Result<Option<ValidatorPrefs>, BlockChainError>;

	/// `staking.erasStakersClipped` for one validator
	async fn eras_stakers_clipped(
		&self,
		era: EraIndex,
		validator: &str,
	) -> Result<Option<LegacyExposure>, BlockChainError>;

	/// Validators with an `erasStakersClipped` entry in the era
	async fn eras_stakers_clipped_validators(
		&self,
		era: EraIndex,
	) -> Result<Vec<String>, BlockChainError>;

	/// `staking.erasStakersOverview` for one validator
	async fn eras_stakers_overview(
		&self,
		era: EraIndex,
		validator: &str,
	) -> Result<Option<ExposureOverview>, BlockChainError>;

	/// Validators with an `erasStakersOverview` entry in the era
	async fn eras_stakers_overview_validators(
		&self,
		era: EraIndex,
	) -> Result<Vec<String>, BlockChainError>;

	/// `staking.erasStakersPaged` page of one validator
	async fn eras_stakers_paged(
		&self,
		era: EraIndex,
		validator: &str,
		page: u32,
	) -> Result<Option<ExposurePage>, BlockChainError>;

	/// Whether the validator's rewards for the era were already paid out
	async fn rewards_claimed(&self, era: EraIndex, validator: &str)
		-> Result<bool, BlockChainError>;

	/// `NominationPoolsApi::pending_rewards` runtime call
	async fn pool_pending_rewards(&self, address: &str) -> Result<Amount, BlockChainError>;
}
