//! Test helper utilities for accounts
//!
//! - `AccountBuilder`: Builder for creating test Account instances

use crate::models::{
	Account, AccountBalance, Amount, ChainId, NominatingData, NominationPoolData, PoolCommission,
	PoolRoles, ValidatorCommission,
};

/// Builder for creating test Account instances
pub struct AccountBuilder {
	account: Account,
}

impl Default for AccountBuilder {
	fn default() -> Self {
		Self {
			account: Account::new("15oF4uVJwmo4TdGW7VfQxNLavjCXviqxT9S1MgbjMNHr6Sp5", ChainId::Polkadot),
		}
	}
}

impl AccountBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn address(mut self, address: &str) -> Self {
		self.account.address = address.to_string();
		self
	}

	pub fn chain(mut self, chain: ChainId) -> Self {
		self.account.chain = chain;
		self
	}

	pub fn name(mut self, name: &str) -> Self {
		self.account.name = name.to_string();
		self
	}

	pub fn balance(mut self, free: u64, reserved: u64, frozen: u64) -> Self {
		self.account.balance = Some(AccountBalance {
			nonce: 0,
			free: Amount::from(free),
			reserved: Amount::from(reserved),
			frozen: Amount::from(frozen),
		});
		self
	}

	pub fn pool(mut self, pool_id: u32) -> Self {
		self.account.nomination_pool_data = Some(NominationPoolData {
			pool_id,
			pending_rewards: Amount::ZERO,
			state: "Open".to_string(),
			name: format!("Pool {}", pool_id),
			roles: PoolRoles::default(),
			commission: PoolCommission::default(),
		});
		self
	}

	pub fn pool_data(mut self, data: NominationPoolData) -> Self {
		self.account.nomination_pool_data = Some(data);
		self
	}

	/// Nominates the given validators at the given commissions
	pub fn nominating(mut self, validators: &[(&str, &str)], last_checked_era: u32) -> Self {
		self.account.nominating_data = Some(NominatingData {
			exposed: false,
			last_checked_era,
			submitted_in: 0,
			validators: validators
				.iter()
				.map(|(id, rate)| ValidatorCommission {
					validator_id: id.to_string(),
					commission: rate.parse().unwrap_or_default(),
				})
				.collect(),
		});
		self
	}

	pub fn build(self) -> Account {
		self.account
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_builder() {
		let account = AccountBuilder::new()
			.address("A")
			.chain(ChainId::Kusama)
			.balance(10, 1, 2)
			.pool(7)
			.nominating(&[("V1", "5%")], 3)
			.build();

		assert_eq!(account.address, "A");
		assert_eq!(account.chain, ChainId::Kusama);
		assert_eq!(account.balance.unwrap().frozen, Amount::from(2u64));
		assert_eq!(account.nomination_pool_data.unwrap().pool_id, 7);
		let nominating = account.nominating_data.unwrap();
		assert_eq!(nominating.validators[0].commission.perbill(), 50_000_000);
	}
}
