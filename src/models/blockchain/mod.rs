//! Chain storage model implementations.
//!
//! This module contains type definitions for the relay chain storage the
//! staking computations read: exposures in both storage generations, reward
//! points and validator preferences, plus a snapshot form of all of it.

mod snapshot;
mod staking;

pub use snapshot::{ChainSnapshot, EraSnapshot};
pub use staking::{
	EraExposureRecord, EraRewardPoints, ExposureOverview, ExposurePage, IndividualExposure,
	LegacyExposure, ValidatorPrefs,
};
