//! Account store.
//!
//! Accounts are the unit of persisted mutation: a callback reads one, changes
//! a sub-state and writes it back whole. Durable storage belongs to the host
//! application; the in-memory repository here is loaded from JSON files.

use std::{collections::HashMap, path::Path};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
	models::{Account, ChainId, ConfigLoader},
	repositories::error::RepositoryError,
};

#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
	async fn get(&self, chain: ChainId, address: &str) -> Result<Option<Account>, RepositoryError>;
	async fn set(&self, chain: ChainId, account: Account) -> Result<(), RepositoryError>;
	async fn remove(&self, chain: ChainId, address: &str) -> Result<Option<Account>, RepositoryError>;
	async fn get_all(&self) -> Result<Vec<Account>, RepositoryError>;
}

#[derive(Debug, Default)]
pub struct AccountRepository {
	accounts: RwLock<HashMap<(ChainId, String), Account>>,
}

impl AccountRepository {
	/// Loads every account file of a directory
	pub fn new(path: Option<&Path>) -> Result<Self, RepositoryError> {
		let accounts: HashMap<String, Account> = Account::load_all(path)
			.map_err(|e| RepositoryError::load_error(format!("Failed to load accounts: {}", e)))?;
		Ok(Self::from_accounts(accounts.into_values()))
	}

	pub fn from_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
		let accounts = accounts
			.into_iter()
			.map(|account| ((account.chain, account.address.clone()), account))
			.collect();
		Self {
			accounts: RwLock::new(accounts),
		}
	}
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
	async fn get(&self, chain: ChainId, address: &str) -> Result<Option<Account>, RepositoryError> {
		Ok(self
			.accounts
			.read()
			.await
			.get(&(chain, address.to_string()))
			.cloned())
	}

	async fn set(&self, chain: ChainId, account: Account) -> Result<(), RepositoryError> {
		if account.chain != chain {
			return Err(RepositoryError::validation_error(format!(
				"Account {} belongs to {}, not {}",
				account.address, account.chain, chain
			)));
		}
		self.accounts
			.write()
			.await
			.insert((chain, account.address.clone()), account);
		Ok(())
	}

	async fn remove(&self, chain: ChainId, address: &str) -> Result<Option<Account>, RepositoryError> {
		Ok(self
			.accounts
			.write()
			.await
			.remove(&(chain, address.to_string())))
	}

	async fn get_all(&self) -> Result<Vec<Account>, RepositoryError> {
		let mut accounts: Vec<Account> = self.accounts.read().await.values().cloned().collect();
		accounts.sort_by(|a, b| (a.chain, &a.address).cmp(&(b.chain, &b.address)));
		Ok(accounts)
	}
}
