//! Mock implementations of the engine's collaborators.
//!
//! - [`MockChainQueryClient`] - chain queries without a node
//! - [`MockAccountRepository`] - account store with scripted failures
//! - [`MockEventSink`] - event hand-off with scripted failures

use account_monitor::{
	models::{
		Account, Amount, ChainId, EraIndex, EraRewardPoints, ExposureOverview, ExposurePage,
		LegacyExposure, ValidatorPrefs,
	},
	repositories::{AccountRepositoryTrait, RepositoryError},
	services::{
		blockchain::{BlockChainError, ChainQueryClient},
		notification::{EmitterTask, EventSink, NotificationError},
	},
};

use async_trait::async_trait;
use mockall::mock;

mock! {
	/// Mock implementation of the chain query trait.
	pub ChainQueryClient {}

	#[async_trait]
	impl ChainQueryClient for ChainQueryClient {
		fn chain(&self) -> ChainId;
		async fn existential_deposit(&self) -> Result<Amount, BlockChainError>;
		async fn eras_validator_reward(&self, era: EraIndex) -> Result<Option<Amount>, BlockChainError>;
		async fn eras_reward_points(&self, era: EraIndex) -> Result<EraRewardPoints, BlockChainError>;
		async fn eras_validator_prefs(&self, era: EraIndex, validator: &str) -> Result<ValidatorPrefs, BlockChainError>;
		async fn validator_prefs(&self, validator: &str) -> Result<Option<ValidatorPrefs>, BlockChainError>;
		async fn eras_stakers_clipped(&self, era: EraIndex, validator: &str) -> Result<Option<LegacyExposure>, BlockChainError>;
		async fn eras_stakers_clipped_validators(&self, era: EraIndex) -> Result<Vec<String>, BlockChainError>;
		async fn eras_stakers_overview(&self, era: EraIndex, validator: &str) -> Result<Option<ExposureOverview>, BlockChainError>;
		async fn eras_stakers_overview_validators(&self, era: EraIndex) -> Result<Vec<String>, BlockChainError>;
		async fn eras_stakers_paged(&self, era: EraIndex, validator: &str, page: u32) -> Result<Option<ExposurePage>, BlockChainError>;
		async fn rewards_claimed(&self, era: EraIndex, validator: &str) -> Result<bool, BlockChainError>;
		async fn pool_pending_rewards(&self, address: &str) -> Result<Amount, BlockChainError>;
	}
}

mock! {
	/// Mock implementation of the account repository.
	pub AccountRepository {}

	#[async_trait]
	impl AccountRepositoryTrait for AccountRepository {
		async fn get(&self, chain: ChainId, address: &str) -> Result<Option<Account>, RepositoryError>;
		async fn set(&self, chain: ChainId, account: Account) -> Result<(), RepositoryError>;
		async fn remove(&self, chain: ChainId, address: &str) -> Result<Option<Account>, RepositoryError>;
		async fn get_all(&self) -> Result<Vec<Account>, RepositoryError>;
	}
}

mock! {
	/// Mock implementation of the event sink.
	pub EventSink {}

	#[async_trait]
	impl EventSink for EventSink {
		async fn emit(&self, task: EmitterTask) -> Result<(), NotificationError>;
	}
}
