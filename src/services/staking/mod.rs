//! Staking computations over relay chain storage.
//!
//! - `exposure`: rewarded nominator lookups for both storage generations
//! - `rewards`: unclaimed reward accumulation over a window of eras
//! - `error`: errors aborting a computation

mod error;
mod exposure;
mod rewards;

pub use error::StakingError;
pub use exposure::{ExposureResolver, ExposureStrategy, LegacyStakers, PagedStakers, ValidatorStake};
pub use rewards::{
	to_planck, validator_share, EraReward, RewardAccumulator, RewardSummary, ShareInput,
};
