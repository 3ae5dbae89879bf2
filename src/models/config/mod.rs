//! Configuration loading and validation.
//!
//! Every configurable type is read from JSON. Collections (chains, accounts,
//! tasks, snapshots) live one entry per file in a directory and are keyed by
//! file stem; the engine settings are a single `engine.json`.

use std::path::Path;

use serde::de::DeserializeOwned;

mod chain_config;
mod engine_config;
mod error;
mod registry_config;

pub use chain_config::ChainConfig;
pub use engine_config::EngineConfig;
pub use error::ConfigError;

/// Common interface for loading configuration files
pub trait ConfigLoader: Sized + DeserializeOwned {
	/// Directory searched when no path is given
	const DEFAULT_DIR: &'static str;

	/// Load every valid entry of a directory, keyed by file stem
	///
	/// Files that fail to parse or validate are skipped with a warning.
	fn load_all<T>(path: Option<&Path>) -> Result<T, ConfigError>
	where
		T: FromIterator<(String, Self)>,
	{
		let dir = path.unwrap_or(Path::new(Self::DEFAULT_DIR));
		let mut pairs = Vec::new();

		if !dir.exists() {
			return Err(ConfigError::missing_directory(dir));
		}

		let entries = std::fs::read_dir(dir).map_err(|e| ConfigError::unreadable(dir, e))?;
		for entry in entries {
			let entry = entry.map_err(|e| ConfigError::unreadable(dir, e))?;
			let path = entry.path();

			if !Self::is_json_file(&path) {
				continue;
			}

			let name = path
				.file_stem()
				.and_then(|s| s.to_str())
				.unwrap_or("unknown")
				.to_string();

			match Self::load_from_path(&path) {
				Ok(config) => pairs.push((name, config)),
				Err(e) => tracing::warn!(file = %path.display(), error = %e, "Skipping configuration file"),
			}
		}

		Ok(T::from_iter(pairs))
	}

	/// Load and validate a single file
	fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
		let file = std::fs::File::open(path).map_err(|e| ConfigError::unreadable(path, e))?;
		let config: Self =
			serde_json::from_reader(file).map_err(|e| ConfigError::malformed(path, e))?;

		if let Err(message) = config.validate() {
			return Err(ConfigError::invalid(path, message));
		}

		Ok(config)
	}

	fn validate(&self) -> Result<(), String>;

	fn is_json_file(path: &Path) -> bool {
		path.extension()
			.map(|ext| ext.to_string_lossy().to_lowercase() == "json")
			.unwrap_or(false)
	}
}
