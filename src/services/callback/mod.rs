//! Subscription callbacks.
//!
//! A callback receives the decoded value of one subscription, decides whether
//! it is a change and, when it is, updates the account, the value cache and
//! emits one event. Handlers are plain functions over a [`CallbackContext`].

mod context;
mod dispatcher;
mod error;
mod handlers;
mod lock;

pub use context::CallbackContext;
pub use dispatcher::{dispatch, try_dispatch, CallbackOutcome};
pub use error::CallbackError;
pub use lock::{AccountKey, KeyedLock};
