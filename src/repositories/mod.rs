//! Repositories for state owned outside the engine.
//!
//! - `account`: imported accounts and their cached chain state

mod account;
mod error;

pub use account::{AccountRepository, AccountRepositoryTrait};
pub use error::RepositoryError;
