//! Values delivered by the subscription layer and the comparable form kept in the cache.

use serde::{Deserialize, Serialize};

use crate::models::{
	AccountBalance, Amount, EraIndex, PoolCommission, PoolRoles, ValidatorCommission,
};

/// Nomination targets of a staker
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Nominations {
	pub targets: Vec<String>,
	#[serde(default)]
	pub submitted_in: EraIndex,
}

/// Decoded value handed to a callback by the RPC subscription layer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ChainValue {
	/// `system.account` data for balance tasks
	AccountData(AccountBalance),
	/// Change on the pool reward account; pending rewards are queried by the handler
	PoolRewardTick,
	PoolState(String),
	PoolName(String),
	PoolRoles(PoolRoles),
	PoolCommission(PoolCommission),
	/// `staking.activeEra` for era driven nominating tasks
	ActiveEra(EraIndex),
	Nominations(Nominations),
	/// `timestamp.now` in milliseconds
	Timestamp(u64),
	CurrentSlot(u64),
}

impl ChainValue {
	pub fn kind(&self) -> &'static str {
		match self {
			ChainValue::AccountData(_) => "accountData",
			ChainValue::PoolRewardTick => "poolRewardTick",
			ChainValue::PoolState(_) => "poolState",
			ChainValue::PoolName(_) => "poolName",
			ChainValue::PoolRoles(_) => "poolRoles",
			ChainValue::PoolCommission(_) => "poolCommission",
			ChainValue::ActiveEra(_) => "activeEra",
			ChainValue::Nominations(_) => "nominations",
			ChainValue::Timestamp(_) => "timestamp",
			ChainValue::CurrentSlot(_) => "currentSlot",
		}
	}
}

/// Last observed value of a task, in the representation the equality policy compares
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservedValue {
	Amount(Amount),
	Timestamp(u64),
	Slot(u64),
	Era(EraIndex),
	Text(String),
	PoolRoles(PoolRoles),
	PoolCommission(PoolCommission),
	Validators(Vec<ValidatorCommission>),
	Targets(Vec<String>),
}
