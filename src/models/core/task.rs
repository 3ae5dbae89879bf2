//! Subscription tasks describing which on-chain fact is being watched.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::ChainId;

/// Kind of fact a subscription task tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskAction {
	BalanceFree,
	BalanceFrozen,
	BalanceReserved,
	BalanceSpendable,
	PoolRewards,
	PoolState,
	PoolName,
	PoolRoles,
	PoolCommission,
	NominatingEraRewards,
	NominatingExposure,
	NominatingCommission,
	NominatingNominations,
	ChainTimestamp,
	ChainCurrentSlot,
}

/// Grouping used when events are displayed and counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskCategory {
	Balances,
	NominationPools,
	Nominating,
	Chain,
}

impl TaskAction {
	pub const ALL: [TaskAction; 15] = [
		TaskAction::BalanceFree,
		TaskAction::BalanceFrozen,
		TaskAction::BalanceReserved,
		TaskAction::BalanceSpendable,
		TaskAction::PoolRewards,
		TaskAction::PoolState,
		TaskAction::PoolName,
		TaskAction::PoolRoles,
		TaskAction::PoolCommission,
		TaskAction::NominatingEraRewards,
		TaskAction::NominatingExposure,
		TaskAction::NominatingCommission,
		TaskAction::NominatingNominations,
		TaskAction::ChainTimestamp,
		TaskAction::ChainCurrentSlot,
	];

	pub fn category(&self) -> TaskCategory {
		match self {
			TaskAction::BalanceFree
			| TaskAction::BalanceFrozen
			| TaskAction::BalanceReserved
			| TaskAction::BalanceSpendable => TaskCategory::Balances,
			TaskAction::PoolRewards
			| TaskAction::PoolState
			| TaskAction::PoolName
			| TaskAction::PoolRoles
			| TaskAction::PoolCommission => TaskCategory::NominationPools,
			TaskAction::NominatingEraRewards
			| TaskAction::NominatingExposure
			| TaskAction::NominatingCommission
			| TaskAction::NominatingNominations => TaskCategory::Nominating,
			TaskAction::ChainTimestamp | TaskAction::ChainCurrentSlot => TaskCategory::Chain,
		}
	}

	/// Whether the task must be bound to an account
	pub fn requires_account(&self) -> bool {
		self.category() != TaskCategory::Chain
	}

	/// Serialized kebab-case name, also used as a metrics label
	pub fn as_str(&self) -> &'static str {
		match self {
			TaskAction::BalanceFree => "balance-free",
			TaskAction::BalanceFrozen => "balance-frozen",
			TaskAction::BalanceReserved => "balance-reserved",
			TaskAction::BalanceSpendable => "balance-spendable",
			TaskAction::PoolRewards => "pool-rewards",
			TaskAction::PoolState => "pool-state",
			TaskAction::PoolName => "pool-name",
			TaskAction::PoolRoles => "pool-roles",
			TaskAction::PoolCommission => "pool-commission",
			TaskAction::NominatingEraRewards => "nominating-era-rewards",
			TaskAction::NominatingExposure => "nominating-exposure",
			TaskAction::NominatingCommission => "nominating-commission",
			TaskAction::NominatingNominations => "nominating-nominations",
			TaskAction::ChainTimestamp => "chain-timestamp",
			TaskAction::ChainCurrentSlot => "chain-current-slot",
		}
	}
}

impl fmt::Display for TaskAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl TaskCategory {
	pub fn as_str(&self) -> &'static str {
		match self {
			TaskCategory::Balances => "balances",
			TaskCategory::NominationPools => "nominationPools",
			TaskCategory::Nominating => "nominating",
			TaskCategory::Chain => "chain",
		}
	}
}

/// How a task's callbacks are surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationPolicy {
	/// Notify on change when OS notifications are enabled
	#[default]
	Default,
	/// Never raise OS notifications for regular callbacks
	None,
	/// Every callback is a forced re-evaluation
	OneShot,
}

/// A monitored fact on a chain, optionally bound to an account
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionTask {
	pub action: TaskAction,
	pub chain: ChainId,
	#[serde(default)]
	pub account: Option<String>,
	#[serde(default)]
	pub policy: NotificationPolicy,
	#[serde(default = "default_enable_os_notifications")]
	pub enable_os_notifications: bool,
}

fn default_enable_os_notifications() -> bool {
	true
}

impl SubscriptionTask {
	pub fn new(action: TaskAction, chain: ChainId, account: Option<String>) -> Self {
		Self {
			action,
			chain,
			account,
			policy: NotificationPolicy::Default,
			enable_os_notifications: true,
		}
	}

	/// OS notifications for non forced callbacks of this task
	pub fn os_notifications_enabled(&self) -> bool {
		self.enable_os_notifications && self.policy != NotificationPolicy::None
	}

	/// Whether every invocation of this task is forced
	pub fn is_one_shot(&self) -> bool {
		self.policy == NotificationPolicy::OneShot
	}

	/// Checks the task is consistent with its action
	pub fn validate(&self) -> Result<(), String> {
		match (&self.account, self.action.requires_account()) {
			(None, true) => Err(format!("Task {} requires an account", self.action)),
			(Some(address), true) if address.trim().is_empty() => {
				Err(format!("Task {} has an empty account address", self.action))
			}
			(Some(_), false) => Err(format!("Task {} is chain wide", self.action)),
			_ => Ok(()),
		}
	}
}
