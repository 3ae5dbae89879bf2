//! Imported accounts and the chain state cached for them.

use serde::{Deserialize, Serialize};

use crate::models::{Amount, ChainId, Commission, EraIndex};

/// Free, reserved and frozen balances of an account
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
	pub nonce: u64,
	pub free: Amount,
	pub reserved: Amount,
	pub frozen: Amount,
}

impl AccountBalance {
	/// Balance that can be transferred without reaping the account
	///
	/// `free - max(frozen - reserved, existential_deposit)`, saturating at zero.
	pub fn spendable(&self, existential_deposit: Amount) -> Amount {
		let locked = self.frozen.saturating_sub(self.reserved).max(existential_deposit);
		self.free.saturating_sub(locked)
	}
}

/// Accounts holding a nomination pool role
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolRoles {
	#[serde(default)]
	pub depositor: Option<String>,
	#[serde(default)]
	pub root: Option<String>,
	#[serde(default)]
	pub nominator: Option<String>,
	#[serde(default)]
	pub bouncer: Option<String>,
}

/// Current commission rate of a pool and the account receiving it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolCommissionCurrent {
	pub rate: Commission,
	pub payee: String,
}

/// Limit on how fast a pool may raise its commission
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionChangeRate {
	pub max_increase: Commission,
	pub min_delay: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolCommission {
	#[serde(default)]
	pub current: Option<PoolCommissionCurrent>,
	#[serde(default)]
	pub max: Option<Commission>,
	#[serde(default)]
	pub change_rate: Option<CommissionChangeRate>,
	#[serde(default)]
	pub throttle_from: Option<u64>,
}

/// Nomination pool membership of an account
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NominationPoolData {
	pub pool_id: u32,
	#[serde(default)]
	pub pending_rewards: Amount,
	#[serde(default)]
	pub state: String,
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub roles: PoolRoles,
	#[serde(default)]
	pub commission: PoolCommission,
}

/// A nominated validator and its last observed commission
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorCommission {
	pub validator_id: String,
	pub commission: Commission,
}

/// Direct nominating state of an account
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NominatingData {
	#[serde(default)]
	pub exposed: bool,
	#[serde(default)]
	pub last_checked_era: EraIndex,
	#[serde(default)]
	pub submitted_in: EraIndex,
	#[serde(default)]
	pub validators: Vec<ValidatorCommission>,
}

impl NominatingData {
	pub fn validator_ids(&self) -> Vec<String> {
		self.validators
			.iter()
			.map(|validator| validator.validator_id.clone())
			.collect()
	}
}

/// An account identified by address and chain
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
	pub address: String,
	pub chain: ChainId,
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub balance: Option<AccountBalance>,
	#[serde(default)]
	pub nomination_pool_data: Option<NominationPoolData>,
	#[serde(default)]
	pub nominating_data: Option<NominatingData>,
}

impl Account {
	pub fn new(address: impl Into<String>, chain: ChainId) -> Self {
		Self {
			address: address.into(),
			chain,
			name: String::new(),
			balance: None,
			nomination_pool_data: None,
			nominating_data: None,
		}
	}

	/// Name shown to the user, falling back to a shortened address
	pub fn display_name(&self) -> String {
		if !self.name.is_empty() {
			return self.name.clone();
		}
		let chars: Vec<char> = self.address.chars().collect();
		if chars.len() <= 12 {
			return self.address.clone();
		}
		let head: String = chars[..6].iter().collect();
		let tail: String = chars[chars.len() - 6..].iter().collect();
		format!("{}...{}", head, tail)
	}
}
