//! Chain query interfaces and implementations.
//!
//! Provides the read-only view of a chain the engine needs:
//!
//! - Chain query trait consumed by the resolvers and callbacks
//! - Snapshot backed client for offline replay and tests
//! - Error handling for chain queries
//! - Client pool holding one client per chain

mod client;
mod clients;
mod error;
mod pool;

pub use client::ChainQueryClient;
pub use clients::SnapshotClient;
pub use error::BlockChainError;
pub use pool::ClientPool;
