//! Blockchain error types and handling.
//!
//! This module provides the error type returned by chain queries, covering
//! connectivity, request processing and missing storage entries.

use log::error;

use crate::models::ChainId;

/// Represents possible errors that can occur during chain queries
#[derive(Debug)]
pub enum BlockChainError {
	/// Errors related to network connectivity issues
	ConnectionError(String),

	/// Errors related to malformed requests or undecodable responses
	RequestError(String),

	/// No client is registered for the chain
	ClientNotFound(ChainId),

	/// A storage entry the caller requires is absent
	StorageNotFound(String),

	/// Internal errors within the chain client
	InternalError(String),
}

impl BlockChainError {
	/// Formats the error message based on the error type
	fn format_message(&self) -> String {
		match self {
			Self::ConnectionError(msg) => format!("Connection error: {}", msg),
			Self::RequestError(msg) => format!("Request error: {}", msg),
			Self::ClientNotFound(chain) => format!("No client for chain: {}", chain),
			Self::StorageNotFound(msg) => format!("Storage not found: {}", msg),
			Self::InternalError(msg) => format!("Internal error: {}", msg),
		}
	}

	/// Creates a new connection error with logging
	pub fn connection_error(msg: impl Into<String>) -> Self {
		let error = Self::ConnectionError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new request error with logging
	pub fn request_error(msg: impl Into<String>) -> Self {
		let error = Self::RequestError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new client not found error with logging
	pub fn client_not_found(chain: ChainId) -> Self {
		let error = Self::ClientNotFound(chain);
		error!("{}", error.format_message());
		error
	}

	/// Creates a new storage not found error with logging
	pub fn storage_not_found(msg: impl Into<String>) -> Self {
		let error = Self::StorageNotFound(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new internal error with logging
	pub fn internal_error(msg: impl Into<String>) -> Self {
		let error = Self::InternalError(msg.into());
		error!("{}", error.format_message());
		error
	}
}

// Standard error trait implementations
impl std::fmt::Display for BlockChainError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl std::error::Error for BlockChainError {}
