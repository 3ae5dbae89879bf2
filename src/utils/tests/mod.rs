//! Test helper utilities
//!
//! This module contains test helper utilities for the application.
//!
//! - `builders`: Test helper utilities for creating test instances of models

pub mod builders {
	pub mod account;
	pub mod snapshot;
	pub mod task;
}

pub use builders::{account::AccountBuilder, snapshot::SnapshotBuilder, task::TaskBuilder};
