//! Collaborators shared by every callback.

use std::{collections::HashMap, sync::Arc};

use crate::{
	models::{ChainConfig, ChainId, EngineConfig, StakingApi, SubscriptionTask},
	repositories::AccountRepositoryTrait,
	services::{
		blockchain::ClientPool,
		cache::{ApiCallEntry, ValueCache},
		callback::lock::CallbackLocks,
		equality::EqualityPolicy,
		notification::{EventSink, NotificationSettings},
		staking::{ExposureResolver, RewardAccumulator, StakingError},
	},
};

/// Everything a callback reads from or writes to
///
/// Cloning is cheap; clones share the cache, locks and collaborators.
#[derive(Clone)]
pub struct CallbackContext {
	pub cache: ValueCache,
	pub accounts: Arc<dyn AccountRepositoryTrait>,
	pub sink: Arc<dyn EventSink>,
	pub clients: ClientPool,
	pub settings: NotificationSettings,
	pub equality: EqualityPolicy,
	pub rewards: RewardAccumulator,
	resolvers: HashMap<ChainId, ExposureResolver>,
	locks: CallbackLocks,
}

impl CallbackContext {
	pub fn new(
		accounts: Arc<dyn AccountRepositoryTrait>,
		sink: Arc<dyn EventSink>,
		clients: ClientPool,
	) -> Self {
		Self {
			cache: ValueCache::new(),
			accounts,
			sink,
			clients,
			settings: NotificationSettings::default(),
			equality: EqualityPolicy::default(),
			rewards: RewardAccumulator::default(),
			resolvers: HashMap::new(),
			locks: CallbackLocks::default(),
		}
	}

	/// Applies engine settings and builds one exposure resolver per configured chain
	pub fn configure(
		mut self,
		engine: &EngineConfig,
		chains: &[ChainConfig],
	) -> Result<Self, StakingError> {
		self.settings = NotificationSettings::new(engine.silence_notifications);
		self.equality = EqualityPolicy::new(engine.timestamp_buffer);
		self.rewards = RewardAccumulator::new(engine.reward_window_eras)?;
		for chain in chains {
			let resolver = ExposureResolver::new(chain.staking_api)
				.with_max_exposed(engine.max_exposed_nominators)?;
			self.resolvers.insert(chain.chain, resolver);
		}
		Ok(self)
	}

	pub fn with_resolver(mut self, chain: ChainId, resolver: ExposureResolver) -> Self {
		self.resolvers.insert(chain, resolver);
		self
	}

	pub fn with_settings(mut self, settings: NotificationSettings) -> Self {
		self.settings = settings;
		self
	}

	/// Resolver of a chain, paged storage when the chain was not configured
	pub fn resolver(&self, chain: ChainId) -> ExposureResolver {
		self.resolvers
			.get(&chain)
			.cloned()
			.unwrap_or_else(|| ExposureResolver::new(StakingApi::default()))
	}

	/// Binds a task to this context's cache
	pub fn entry(&self, task: SubscriptionTask) -> ApiCallEntry {
		ApiCallEntry::new(task, self.cache.clone())
	}

	pub(crate) fn locks(&self) -> &CallbackLocks {
		&self.locks
	}
}
