//! Chain client implementations.
//!
//! Only the snapshot client lives in this crate; RPC backed clients are
//! provided by the embedding application through [`ChainQueryClient`].
//!
//! [`ChainQueryClient`]: crate::services::blockchain::ChainQueryClient

mod snapshot;

pub use snapshot::SnapshotClient;
