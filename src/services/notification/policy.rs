//! Whether an accepted change is accompanied by an OS notification.

use std::sync::{
	atomic::{AtomicBool, Ordering},
	Arc,
};

use crate::models::SubscriptionTask;

/// Global notification switches shared with the settings owner
///
/// The silence flag is read on every callback, so toggling it takes effect
/// for the next event without rebuilding any service.
#[derive(Debug, Clone, Default)]
pub struct NotificationSettings {
	silenced: Arc<AtomicBool>,
}

impl NotificationSettings {
	pub fn new(silenced: bool) -> Self {
		Self {
			silenced: Arc::new(AtomicBool::new(silenced)),
		}
	}

	pub fn is_silenced(&self) -> bool {
		self.silenced.load(Ordering::SeqCst)
	}

	pub fn set_silenced(&self, silenced: bool) {
		self.silenced.store(silenced, Ordering::SeqCst);
	}
}

/// One-shot refreshes always notify; otherwise the global silence flag must be
/// off and the task must allow OS notifications
pub fn should_notify(
	task: &SubscriptionTask,
	is_one_shot: bool,
	settings: &NotificationSettings,
) -> bool {
	is_one_shot || (!settings.is_silenced() && task.os_notifications_enabled())
}
