//! Core domain models for account monitoring.
//!
//! This module contains the fundamental data structures that represent:
//! - Chains: supported networks and their staking storage generation
//! - Tasks: the on-chain facts a subscription watches
//! - Accounts: imported accounts and their cached chain state
//! - Events: accepted changes and the notifications that accompany them

mod account;
mod chain;
mod event;
mod task;
mod units;
mod value;

pub use account::{
	Account, AccountBalance, CommissionChangeRate, NominatingData, NominationPoolData,
	PoolCommission, PoolCommissionCurrent, PoolRoles, ValidatorCommission,
};
pub use chain::{ChainId, EraIndex, StakingApi};
pub use event::{EventCallback, EventWho, Notification};
pub use task::{NotificationPolicy, SubscriptionTask, TaskAction, TaskCategory};
pub use units::{Amount, Commission};
pub use value::{ChainValue, Nominations, ObservedValue};
