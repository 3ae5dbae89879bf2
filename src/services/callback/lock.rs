//! Keyed mutual exclusion for callbacks.
//!
//! Callbacks for the same (action, chain, account) run one after another so
//! two overlapping observations cannot both pass the change check. Callbacks
//! bound to the same account are serialized as well, since each of them
//! writes the whole account back.

use std::{collections::HashMap, hash::Hash, sync::Arc};

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::{models::ChainId, services::cache::CacheKey};

/// Key of the per account lock
pub type AccountKey = (ChainId, String);

#[derive(Debug)]
pub struct KeyedLock<K> {
	locks: Arc<RwLock<HashMap<K, Arc<Mutex<()>>>>>,
}

impl<K> Clone for KeyedLock<K> {
	fn clone(&self) -> Self {
		Self {
			locks: self.locks.clone(),
		}
	}
}

impl<K> Default for KeyedLock<K> {
	fn default() -> Self {
		Self {
			locks: Arc::new(RwLock::new(HashMap::new())),
		}
	}
}

impl<K: Eq + Hash + Clone> KeyedLock<K> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Waits for exclusive access to `key`; released when the guard drops
	pub async fn lock(&self, key: &K) -> OwnedMutexGuard<()> {
		self.mutex(key).await.lock_owned().await
	}

	async fn mutex(&self, key: &K) -> Arc<Mutex<()>> {
		// Fast path: Read lock
		if let Some(mutex) = self.locks.read().await.get(key) {
			return mutex.clone();
		}

		// Slow path: Write lock
		let mut locks = self.locks.write().await;
		locks.entry(key.clone()).or_default().clone()
	}
}

/// Guards held for the duration of one callback
pub(crate) struct CallbackGuard {
	_subscription: OwnedMutexGuard<()>,
	_account: Option<OwnedMutexGuard<()>>,
}

/// Subscription and account locks of the engine
///
/// The subscription lock is always taken before the account lock.
#[derive(Debug, Clone, Default)]
pub(crate) struct CallbackLocks {
	subscriptions: KeyedLock<CacheKey>,
	accounts: KeyedLock<AccountKey>,
}

impl CallbackLocks {
	pub async fn acquire(&self, key: &CacheKey) -> CallbackGuard {
		let subscription = self.subscriptions.lock(key).await;
		let account = match &key.account {
			Some(address) => Some(self.accounts.lock(&(key.chain, address.clone())).await),
			None => None,
		};
		CallbackGuard {
			_subscription: subscription,
			_account: account,
		}
	}
}
