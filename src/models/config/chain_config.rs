//! Per chain configuration.

use serde::{Deserialize, Serialize};

use crate::models::{config::ConfigLoader, ChainId, StakingApi};

/// Settings of a monitored chain
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChainConfig {
	pub chain: ChainId,
	/// Staking storage generation; selects the exposure scanning strategy
	#[serde(default)]
	pub staking_api: StakingApi,
}

impl ChainConfig {
	pub fn new(chain: ChainId, staking_api: StakingApi) -> Self {
		Self { chain, staking_api }
	}
}

impl ConfigLoader for ChainConfig {
	const DEFAULT_DIR: &'static str = "config/chains";

	fn validate(&self) -> Result<(), String> {
		Ok(())
	}
}
