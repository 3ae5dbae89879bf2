//! Account subscription engine for Polkadot-family chains.
//!
//! The engine receives values from chain subscriptions, compares them with the
//! last value seen for the same subscription and, when something changed,
//! updates the stored account and emits an event for the user interface.
//!
//! # Architecture
//! - Models: accounts, subscription tasks, chain values and emitted events
//! - Repositories: account storage
//! - Services: value cache, equality policy, staking computations, callbacks
//!   and the event emitter
//! - Bootstrap: wiring from a configuration directory and observation replay

pub mod bootstrap;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;
