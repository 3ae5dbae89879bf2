//! Hand-off of accepted events to the event sink.
//!
//! The engine produces a single kind of task, `persist-event`, carrying the
//! event and the optional notification. Storing the event and showing the
//! notification is up to whoever receives it.

use std::io::Write;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, Mutex};

use crate::{
	models::{EventCallback, Notification},
	services::notification::NotificationError,
	utils::constants::PERSIST_EVENT_ACTION,
};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistEventPayload {
	pub event: EventCallback,
	pub notification: Option<Notification>,
	pub is_one_shot: bool,
}

/// Task handed to the event sink
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EmitterTask {
	pub action: String,
	pub payload: PersistEventPayload,
}

impl EmitterTask {
	pub fn persist_event(
		event: EventCallback,
		notification: Option<Notification>,
		is_one_shot: bool,
	) -> Self {
		Self {
			action: PERSIST_EVENT_ACTION.to_string(),
			payload: PersistEventPayload {
				event,
				notification,
				is_one_shot,
			},
		}
	}
}

/// Receiver of emitted tasks
#[async_trait]
pub trait EventSink: Send + Sync {
	async fn emit(&self, task: EmitterTask) -> Result<(), NotificationError>;
}

/// Forwards tasks over a tokio channel
#[derive(Debug, Clone)]
pub struct ChannelEventSink {
	sender: mpsc::Sender<EmitterTask>,
}

impl ChannelEventSink {
	pub fn new(sender: mpsc::Sender<EmitterTask>) -> Self {
		Self { sender }
	}

	/// Creates a sink and the receiver draining it
	pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<EmitterTask>) {
		let (sender, receiver) = mpsc::channel(buffer);
		(Self::new(sender), receiver)
	}
}

#[async_trait]
impl EventSink for ChannelEventSink {
	async fn emit(&self, task: EmitterTask) -> Result<(), NotificationError> {
		self.sender
			.send(task)
			.await
			.map_err(|e| NotificationError::channel_closed(e.to_string()))
	}
}

/// Writes every task as one JSON line
pub struct JsonLinesEventSink<W: Write + Send> {
	writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesEventSink<W> {
	pub fn new(writer: W) -> Self {
		Self {
			writer: Mutex::new(writer),
		}
	}

	pub fn into_inner(self) -> W {
		self.writer.into_inner()
	}
}

#[async_trait]
impl<W: Write + Send> EventSink for JsonLinesEventSink<W> {
	async fn emit(&self, task: EmitterTask) -> Result<(), NotificationError> {
		let line = serde_json::to_string(&task)?;
		let mut writer = self.writer.lock().await;
		writeln!(writer, "{}", line)?;
		writer.flush()?;
		Ok(())
	}
}
