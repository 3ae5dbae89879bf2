//! Engine wide settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
	models::config::{ConfigError, ConfigLoader},
	utils::constants::{
		DEFAULT_REWARD_WINDOW_ERAS, DEFAULT_TIMESTAMP_BUFFER, MAX_EXPOSED_NOMINATORS,
		MAX_REWARD_WINDOW_ERAS,
	},
};

/// Tunables of the diffing and staking computations
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
	/// Number of past eras scanned for unclaimed rewards
	pub reward_window_eras: u32,
	/// Rewarded nominators per validator; exposure scans never look further
	pub max_exposed_nominators: usize,
	/// Timestamps closer than this to the cached value are not reported
	pub timestamp_buffer: u64,
	/// Initial state of the global notification silence switch
	pub silence_notifications: bool,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			reward_window_eras: DEFAULT_REWARD_WINDOW_ERAS,
			max_exposed_nominators: MAX_EXPOSED_NOMINATORS,
			timestamp_buffer: DEFAULT_TIMESTAMP_BUFFER,
			silence_notifications: false,
		}
	}
}

impl EngineConfig {
	/// Load `engine.json` from the configuration directory, falling back to defaults
	pub fn load(config_dir: Option<&Path>) -> Result<Self, ConfigError> {
		let dir = config_dir.unwrap_or(Path::new(Self::DEFAULT_DIR));
		let path = dir.join("engine.json");
		if !path.exists() {
			tracing::info!(path = %path.display(), "No engine configuration found, using defaults");
			return Ok(Self::default());
		}
		Self::load_from_path(&path)
	}
}

impl ConfigLoader for EngineConfig {
	const DEFAULT_DIR: &'static str = "config";

	fn validate(&self) -> Result<(), String> {
		if self.reward_window_eras == 0 || self.reward_window_eras > MAX_REWARD_WINDOW_ERAS {
			return Err(format!(
				"reward_window_eras must be between 1 and {}",
				MAX_REWARD_WINDOW_ERAS
			));
		}

		if self.max_exposed_nominators == 0 || self.max_exposed_nominators > MAX_EXPOSED_NOMINATORS
		{
			return Err(format!(
				"max_exposed_nominators must be between 1 and {}",
				MAX_EXPOSED_NOMINATORS
			));
		}

		Ok(())
	}
}
