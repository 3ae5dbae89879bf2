//! Notification error types and handling.
//!
//! Provides error types for handing events over to the event sink,
//! including closed channels and output failures.

use log::error;
use std::{error::Error, fmt};

/// Represents possible errors while emitting events
#[derive(Debug)]
pub enum NotificationError {
	/// The receiving side of the sink is gone
	ChannelClosed(String),
	/// The event could not be encoded
	SerializationError(String),
	/// Writing the event out failed
	IoError(String),
	/// Internal errors
	InternalError(String),
}

impl NotificationError {
	/// Formats the error message based on the error type
	fn format_message(&self) -> String {
		match self {
			Self::ChannelClosed(msg) => format!("Channel closed: {}", msg),
			Self::SerializationError(msg) => format!("Serialization error: {}", msg),
			Self::IoError(msg) => format!("IO error: {}", msg),
			Self::InternalError(msg) => format!("Internal error: {}", msg),
		}
	}

	/// Creates a new channel closed error with logging
	pub fn channel_closed(msg: impl Into<String>) -> Self {
		let error = Self::ChannelClosed(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new serialization error with logging
	pub fn serialization_error(msg: impl Into<String>) -> Self {
		let error = Self::SerializationError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new IO error with logging
	pub fn io_error(msg: impl Into<String>) -> Self {
		let error = Self::IoError(msg.into());
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

impl From<serde_json::Error> for NotificationError {
	fn from(error: serde_json::Error) -> Self {
		Self::serialization_error(error.to_string())
	}
}

impl From<std::io::Error> for NotificationError {
	fn from(error: std::io::Error) -> Self {
		Self::io_error(error.to_string())
	}
}

impl fmt::Display for NotificationError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for NotificationError {}
