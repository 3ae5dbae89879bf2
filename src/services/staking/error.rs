//! Staking computation error types.

use thiserror::Error;

use crate::services::blockchain::BlockChainError;

/// Errors aborting an exposure or reward computation
#[derive(Debug, Error)]
pub enum StakingError {
	#[error("Chain query failed: {0}")]
	Chain(#[from] BlockChainError),

	#[error("Invalid staking configuration: {0}")]
	InvalidConfig(String),

	#[error("Reward arithmetic overflowed: {0}")]
	Overflow(String),
}
