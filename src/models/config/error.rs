//! Configuration error types.
//!
//! Every error names the file, directory or task it was raised for, so a
//! bad entry in a directory of accounts or tasks can be found directly.

use log::error;
use std::{
	error::Error,
	fmt,
	path::{Path, PathBuf},
};

use crate::models::ChainId;

#[derive(Debug)]
pub enum ConfigError {
	/// A required configuration directory does not exist
	MissingDirectory(PathBuf),

	/// A file or directory exists but could not be read
	Unreadable { path: PathBuf, message: String },

	/// A file is not valid JSON for the entry it holds
	Malformed { path: PathBuf, message: String },

	/// A file parsed but one of its values is out of range
	Invalid { path: PathBuf, message: String },

	/// A task watches a chain that has no snapshot to serve it
	UnknownChain { task: String, chain: ChainId },
}

impl ConfigError {
	fn format_message(&self) -> String {
		match self {
			Self::MissingDirectory(path) => {
				format!("Configuration directory {} not found", path.display())
			}
			Self::Unreadable { path, message } => {
				format!("Cannot read {}: {}", path.display(), message)
			}
			Self::Malformed { path, message } => {
				format!("Malformed entry {}: {}", path.display(), message)
			}
			Self::Invalid { path, message } => {
				format!("Invalid entry {}: {}", path.display(), message)
			}
			Self::UnknownChain { task, chain } => {
				format!("Task {} watches {} which has no snapshot", task, chain)
			}
		}
	}

	fn logged(self) -> Self {
		error!("{}", self.format_message());
		self
	}

	pub fn missing_directory(path: &Path) -> Self {
		Self::MissingDirectory(path.to_path_buf()).logged()
	}

	pub fn unreadable(path: &Path, err: std::io::Error) -> Self {
		Self::Unreadable {
			path: path.to_path_buf(),
			message: err.to_string(),
		}
		.logged()
	}

	pub fn malformed(path: &Path, err: serde_json::Error) -> Self {
		Self::Malformed {
			path: path.to_path_buf(),
			message: err.to_string(),
		}
		.logged()
	}

	pub fn invalid(path: &Path, message: impl Into<String>) -> Self {
		Self::Invalid {
			path: path.to_path_buf(),
			message: message.into(),
		}
		.logged()
	}

	pub fn unknown_chain(task: impl Into<String>, chain: ChainId) -> Self {
		Self::UnknownChain {
			task: task.into(),
			chain,
		}
		.logged()
	}

	/// File or directory the error was raised for, if any
	pub fn path(&self) -> Option<&Path> {
		match self {
			Self::MissingDirectory(path)
			| Self::Unreadable { path, .. }
			| Self::Malformed { path, .. }
			| Self::Invalid { path, .. } => Some(path),
			Self::UnknownChain { .. } => None,
		}
	}
}

impl fmt::Display for ConfigError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for ConfigError {}
