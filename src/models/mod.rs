//! Domain models and data structures for account monitoring.
//!
//! This module contains all the core data structures used throughout the application:
//!
//! - `blockchain`: Staking storage records and chain snapshots
//! - `config`: Configuration loading and validation
//! - `core`: Core domain models (Account, SubscriptionTask, EventCallback)

mod blockchain;
mod config;
mod core;

// Re-export blockchain types
pub use blockchain::{
	ChainSnapshot, EraExposureRecord, EraRewardPoints, EraSnapshot, ExposureOverview,
	ExposurePage, IndividualExposure, LegacyExposure, ValidatorPrefs,
};

// Re-export core types
pub use core::{
	Account, AccountBalance, Amount, ChainId, ChainValue, Commission, CommissionChangeRate,
	EraIndex, EventCallback, EventWho, NominatingData, NominationPoolData, Nominations,
	Notification, NotificationPolicy, ObservedValue, PoolCommission, PoolCommissionCurrent,
	PoolRoles, StakingApi, SubscriptionTask, TaskAction, TaskCategory, ValidatorCommission,
};

// Re-export config types
pub use config::{ChainConfig, ConfigError, ConfigLoader, EngineConfig};
