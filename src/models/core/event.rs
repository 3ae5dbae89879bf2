//! Events describing accepted changes and the notifications that accompany them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ChainId, SubscriptionTask, TaskAction, TaskCategory};

/// Who an event is about
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "origin", rename_all = "camelCase")]
pub enum EventWho {
	#[serde(rename_all = "camelCase")]
	Account {
		address: String,
		chain: ChainId,
		account_name: String,
	},
	Chain { chain: ChainId },
}

/// Record of a detected change
///
/// Built once per accepted change and never mutated afterwards; clones are deep copies.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCallback {
	pub uid: Uuid,
	pub category: TaskCategory,
	pub task_action: TaskAction,
	pub who: EventWho,
	pub title: String,
	pub subtitle: String,
	pub data: serde_json::Value,
	pub timestamp: DateTime<Utc>,
	pub stale: bool,
}

impl EventCallback {
	pub fn new(
		task: &SubscriptionTask,
		who: EventWho,
		title: impl Into<String>,
		subtitle: impl Into<String>,
		data: serde_json::Value,
	) -> Self {
		Self {
			uid: Uuid::new_v4(),
			category: task.action.category(),
			task_action: task.action,
			who,
			title: title.into(),
			subtitle: subtitle.into(),
			data,
			timestamp: Utc::now(),
			stale: false,
		}
	}

	pub fn chain(&self) -> ChainId {
		match &self.who {
			EventWho::Account { chain, .. } | EventWho::Chain { chain } => *chain,
		}
	}
}

/// OS notification shown alongside an event
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Notification {
	pub title: String,
	pub body: String,
}

impl Notification {
	pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			body: body.into(),
		}
	}
}
