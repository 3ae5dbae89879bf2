//! Callback error types and handling.
//!
//! Every failure inside a callback is one of these. They are logged and
//! turned into a failed dispatch; none of them is fatal.

use log::error;
use std::{error::Error, fmt};

use crate::{
	repositories::RepositoryError,
	services::{
		blockchain::BlockChainError, notification::NotificationError, staking::StakingError,
	},
};

/// Represents possible errors during a callback
#[derive(Debug)]
pub enum CallbackError {
	/// The account or the sub-state a task needs is missing
	PreconditionError(String),
	/// The delivered value does not belong to the task kind
	UnexpectedValue(String),
	/// A chain query failed
	ChainError(String),
	/// Reading or writing the account failed
	RepositoryError(String),
	/// Handing the event to the sink failed
	NotificationError(String),
	/// An exposure or reward computation failed
	ComputationError(String),
}

impl CallbackError {
	/// Formats the error message based on the error type
	fn format_message(&self) -> String {
		match self {
			Self::PreconditionError(msg) => format!("Precondition failed: {}", msg),
			Self::UnexpectedValue(msg) => format!("Unexpected value: {}", msg),
			Self::ChainError(msg) => format!("Chain error: {}", msg),
			Self::RepositoryError(msg) => format!("Repository error: {}", msg),
			Self::NotificationError(msg) => format!("Notification error: {}", msg),
			Self::ComputationError(msg) => format!("Computation error: {}", msg),
		}
	}

	/// Creates a new precondition error with logging
	pub fn precondition_error(msg: impl Into<String>) -> Self {
		let error = Self::PreconditionError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new unexpected value error with logging
	pub fn unexpected_value(msg: impl Into<String>) -> Self {
		let error = Self::UnexpectedValue(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new chain error with logging
	pub fn chain_error(msg: impl Into<String>) -> Self {
		let error = Self::ChainError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new repository error with logging
	pub fn repository_error(msg: impl Into<String>) -> Self {
		let error = Self::RepositoryError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new notification error with logging
	pub fn notification_error(msg: impl Into<String>) -> Self {
		let error = Self::NotificationError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new computation error with logging
	pub fn computation_error(msg: impl Into<String>) -> Self {
		let error = Self::ComputationError(msg.into());
		error!("{}", error.format_message());
		error
	}
}

impl From<BlockChainError> for CallbackError {
	fn from(error: BlockChainError) -> Self {
		Self::chain_error(error.to_string())
	}
}

impl From<RepositoryError> for CallbackError {
	fn from(error: RepositoryError) -> Self {
		Self::repository_error(error.to_string())
	}
}

impl From<NotificationError> for CallbackError {
	fn from(error: NotificationError) -> Self {
		Self::notification_error(error.to_string())
	}
}

impl From<StakingError> for CallbackError {
	fn from(error: StakingError) -> Self {
		match error {
			StakingError::Chain(error) => Self::from(error),
			other => Self::computation_error(other.to_string()),
		}
	}
}

impl fmt::Display for CallbackError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for CallbackError {}
