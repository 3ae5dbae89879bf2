//! Test helper utilities for subscription tasks
//!
//! - `TaskBuilder`: Builder for creating test SubscriptionTask instances

use crate::models::{ChainId, NotificationPolicy, SubscriptionTask, TaskAction};

/// Builder for creating test SubscriptionTask instances
pub struct TaskBuilder {
	task: SubscriptionTask,
}

impl Default for TaskBuilder {
	fn default() -> Self {
		Self {
			task: SubscriptionTask::new(
				TaskAction::BalanceFree,
				ChainId::Polkadot,
				Some("15oF4uVJwmo4TdGW7VfQxNLavjCXviqxT9S1MgbjMNHr6Sp5".to_string()),
			),
		}
	}
}

impl TaskBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn action(mut self, action: TaskAction) -> Self {
		self.task.action = action;
		if !action.requires_account() {
			self.task.account = None;
		}
		self
	}

	pub fn chain(mut self, chain: ChainId) -> Self {
		self.task.chain = chain;
		self
	}

	pub fn account(mut self, address: &str) -> Self {
		self.task.account = Some(address.to_string());
		self
	}

	pub fn policy(mut self, policy: NotificationPolicy) -> Self {
		self.task.policy = policy;
		self
	}

	pub fn os_notifications(mut self, enabled: bool) -> Self {
		self.task.enable_os_notifications = enabled;
		self
	}

	pub fn build(self) -> SubscriptionTask {
		self.task
	}
}
