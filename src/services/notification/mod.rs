//! Notification decisions and the event hand-off.
//!
//! - `policy`: whether an event is accompanied by an OS notification
//! - `emitter`: the `persist-event` task and the sinks receiving it

mod emitter;
mod error;
mod policy;

pub use emitter::{ChannelEventSink, EmitterTask, EventSink, JsonLinesEventSink, PersistEventPayload};
pub use error::NotificationError;
pub use policy::{should_notify, NotificationSettings};
