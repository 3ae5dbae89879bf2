//! Core services of the engine.
//!
//! - `blockchain`: chain query interface, client pool and snapshot client
//! - `cache`: last observed value per subscription
//! - `callback`: per task handlers and the dispatcher
//! - `equality`: change detection
//! - `notification`: notification policy and event sinks
//! - `staking`: exposure and reward computations

pub mod blockchain;
pub mod cache;
pub mod callback;
pub mod equality;
pub mod notification;
pub mod staking;
