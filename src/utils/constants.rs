//! Constants used across the engine.

/// Nominators per validator that earn rewards; the protocol clips exposures here.
pub const MAX_EXPOSED_NOMINATORS: usize = 512;

/// Past eras scanned for unclaimed nominator rewards by default.
pub const DEFAULT_REWARD_WINDOW_ERAS: u32 = 7;

/// Upper bound of the reward window; staking history depth on Polkadot.
pub const MAX_REWARD_WINDOW_ERAS: u32 = 84;

/// Timestamp changes smaller than this are not reported.
pub const DEFAULT_TIMESTAMP_BUFFER: u64 = 20;

/// Action name of the single task type handed to the event sink.
pub const PERSIST_EVENT_ACTION: &str = "persist-event";
