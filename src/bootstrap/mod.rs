//! Bootstrap module for initializing services and replaying observations.
//!
//! This module wires the engine from a configuration directory and feeds it
//! observations recorded as JSON lines.
//!
//! # Layout of the configuration directory
//! - `engine.json`: engine settings, optional
//! - `chains/`: staking storage generation per chain, optional
//! - `snapshots/`: chain state served to the callbacks, one file per chain
//! - `accounts/`: imported accounts
//! - `tasks/`: subscription tasks

use std::{
	collections::{BTreeMap, HashMap},
	error::Error,
	io::BufRead,
	path::Path,
	sync::Arc,
};

use serde::Deserialize;

use crate::{
	models::{
		ChainConfig, ChainId, ChainSnapshot, ChainValue, ConfigError, ConfigLoader, EngineConfig,
		SubscriptionTask, TaskAction,
	},
	repositories::{AccountRepository, AccountRepositoryTrait},
	services::{
		blockchain::{ClientPool, SnapshotClient},
		cache::{ApiCallEntry, CacheKey},
		callback::{dispatch, CallbackContext},
		notification::EventSink,
	},
	utils::metrics::update_subscription_metrics,
};

/// Type alias for handling ServiceResult
pub type Result<T> = std::result::Result<T, Box<dyn Error>>;

/// Initialized engine with the subscriptions it serves
pub struct EngineServices {
	pub engine: EngineConfig,
	pub context: CallbackContext,
	pub tasks: BTreeMap<String, SubscriptionTask>,
}

impl EngineServices {
	/// Entry of the configured task matching the key, or a default task
	pub fn entry(&self, key: &CacheKey) -> ApiCallEntry {
		let task = self
			.tasks
			.values()
			.find(|task| CacheKey::from(*task) == *key)
			.cloned()
			.unwrap_or_else(|| {
				tracing::debug!(task = %key, "no configured task, using defaults");
				SubscriptionTask::new(key.action, key.chain, key.account.clone())
			});
		self.context.entry(task)
	}
}

fn load_optional<T: ConfigLoader>(dir: &Path) -> std::result::Result<Vec<T>, ConfigError> {
	if !dir.exists() {
		return Ok(Vec::new());
	}
	let entries: BTreeMap<String, T> = T::load_all(Some(dir))?;
	Ok(entries.into_values().collect())
}

/// Initializes all required services from a configuration directory.
///
/// # Errors
/// Returns an error if a configuration file cannot be loaded or a task refers
/// to a chain without a snapshot.
pub async fn initialize_services(
	config_dir: &Path,
	sink: Arc<dyn EventSink>,
) -> Result<EngineServices> {
	let engine = EngineConfig::load(Some(config_dir))?;
	let chains: Vec<ChainConfig> = load_optional(&config_dir.join("chains"))?;
	let snapshots: Vec<ChainSnapshot> = load_optional(&config_dir.join("snapshots"))?;
	let tasks: BTreeMap<String, SubscriptionTask> =
		SubscriptionTask::load_all(Some(&config_dir.join("tasks")))?;
	let accounts = Arc::new(AccountRepository::new(Some(&config_dir.join("accounts")))?);

	let clients = ClientPool::new();
	for snapshot in snapshots {
		tracing::info!(chain = %snapshot.chain, era = snapshot.active_era, "Loaded chain snapshot");
		clients.register(Arc::new(SnapshotClient::new(snapshot))).await;
	}

	let available: Vec<ChainId> = clients.chains().await;
	for (name, task) in &tasks {
		if !available.contains(&task.chain) {
			return Err(ConfigError::unknown_chain(name.as_str(), task.chain).into());
		}
		if let Some(address) = &task.account {
			if accounts.get(task.chain, address).await?.is_none() {
				tracing::warn!(task = %name, account = %address, "Task refers to an unknown account");
			}
		}
	}

	update_subscription_metrics(tasks.values());

	let context = CallbackContext::new(accounts, sink, clients).configure(&engine, &chains)?;
	tracing::info!(
		tasks = tasks.len(),
		chains = available.len(),
		"Services initialized"
	);

	Ok(EngineServices {
		engine,
		context,
		tasks,
	})
}

/// One recorded subscription value
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
	pub action: TaskAction,
	pub chain: ChainId,
	#[serde(default)]
	pub account: Option<String>,
	pub value: ChainValue,
	#[serde(default, alias = "one_shot")]
	pub one_shot: bool,
}

impl Observation {
	pub fn key(&self) -> CacheKey {
		CacheKey::new(self.action, self.chain, self.account.clone())
	}
}

/// Counts of a replay run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
	pub handled: usize,
	pub failed: usize,
	pub invalid: usize,
	/// Handled observations per action
	pub per_action: HashMap<TaskAction, usize>,
}

/// Dispatches every observation line in order
///
/// Blank lines are ignored and lines that do not parse are counted as invalid.
pub async fn replay<R: BufRead>(services: &EngineServices, reader: R) -> Result<ReplaySummary> {
	let mut summary = ReplaySummary::default();

	for (index, line) in reader.lines().enumerate() {
		let line = line?;
		if line.trim().is_empty() {
			continue;
		}

		let observation: Observation = match serde_json::from_str(&line) {
			Ok(observation) => observation,
			Err(e) => {
				tracing::warn!(line = index + 1, error = %e, "Skipping invalid observation");
				summary.invalid += 1;
				continue;
			}
		};

		let entry = services.entry(&observation.key());
		if dispatch(&services.context, &entry, observation.value, observation.one_shot).await {
			summary.handled += 1;
			*summary.per_action.entry(observation.action).or_default() += 1;
		} else {
			summary.failed += 1;
		}
	}

	Ok(summary)
}
