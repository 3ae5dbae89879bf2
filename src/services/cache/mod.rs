//! Last observed value per subscription.
//!
//! The cache holds what each subscription reported last so the next callback
//! can tell whether the chain actually changed. It is shared by every
//! callback and lives only as long as the process.

use std::{collections::HashMap, fmt, sync::Arc};

use tokio::sync::RwLock;

use crate::models::{ChainId, ObservedValue, SubscriptionTask, TaskAction};

/// Identifies one subscription slot
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
	pub action: TaskAction,
	pub chain: ChainId,
	pub account: Option<String>,
}

impl CacheKey {
	pub fn new(action: TaskAction, chain: ChainId, account: Option<String>) -> Self {
		Self {
			action,
			chain,
			account,
		}
	}
}

impl From<&SubscriptionTask> for CacheKey {
	fn from(task: &SubscriptionTask) -> Self {
		Self::new(task.action, task.chain, task.account.clone())
	}
}

impl fmt::Display for CacheKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.account {
			Some(account) => write!(f, "{}:{}:{}", self.action, self.chain, account),
			None => write!(f, "{}:{}", self.action, self.chain),
		}
	}
}

/// Shared map from subscription to its last observed value
///
/// Cloning gives another handle to the same map.
#[derive(Debug, Clone, Default)]
pub struct ValueCache {
	entries: Arc<RwLock<HashMap<CacheKey, ObservedValue>>>,
}

impl ValueCache {
	pub fn new() -> Self {
		Self::default()
	}

	pub async fn get(&self, key: &CacheKey) -> Option<ObservedValue> {
		self.entries.read().await.get(key).cloned()
	}

	/// Stores the value, replacing the previous observation of the slot
	pub async fn set(&self, key: CacheKey, value: ObservedValue) {
		self.entries.write().await.insert(key, value);
	}

	/// Forgets a slot, used when a subscription is cancelled
	pub async fn remove(&self, key: &CacheKey) -> Option<ObservedValue> {
		self.entries.write().await.remove(key)
	}

	pub async fn len(&self) -> usize {
		self.entries.read().await.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.entries.read().await.is_empty()
	}
}

/// A subscription task together with the cache its callbacks read and write
#[derive(Debug, Clone)]
pub struct ApiCallEntry {
	pub task: SubscriptionTask,
	cache: ValueCache,
}

impl ApiCallEntry {
	pub fn new(task: SubscriptionTask, cache: ValueCache) -> Self {
		Self { task, cache }
	}

	pub fn key(&self) -> CacheKey {
		CacheKey::from(&self.task)
	}

	pub async fn cached(&self) -> Option<ObservedValue> {
		self.cache.get(&self.key()).await
	}

	pub async fn store(&self, value: ObservedValue) {
		self.cache.set(self.key(), value).await;
	}

	pub async fn forget(&self) {
		self.cache.remove(&self.key()).await;
	}
}
