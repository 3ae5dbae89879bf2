//! Metrics module for the application.
//!
//! - This module contains the global Prometheus registry.
//! - Defines counters for callbacks and emitted events and gauges for subscriptions.

use lazy_static::lazy_static;
use prometheus::{CounterVec, Encoder, GaugeVec, Opts, Registry, TextEncoder};

use crate::models::SubscriptionTask;

lazy_static! {
	// Global Prometheus registry.
	pub static ref REGISTRY: Registry = Registry::new();

	// Counter Vector of handled callbacks per task action and outcome.
	pub static ref CALLBACKS_TOTAL: CounterVec = {
		let counter = CounterVec::new(
			Opts::new("callbacks_total", "Subscription callbacks handled"),
			&["action", "outcome"]
		).unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Counter Vector of events handed to the sink per category.
	pub static ref EVENTS_EMITTED: CounterVec = {
		let counter = CounterVec::new(
			Opts::new("events_emitted_total", "Events handed to the event sink"),
			&["category"]
		).unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Gauge Vector of active subscriptions per chain.
	pub static ref SUBSCRIPTIONS: GaugeVec = {
		let gauge = GaugeVec::new(
			Opts::new("subscriptions", "Active subscription tasks per chain"),
			&["chain"]
		).unwrap();
		REGISTRY.register(Box::new(gauge.clone())).unwrap();
		gauge
	};
}

/// Gather all metrics and encode into the provided format.
pub fn gather_metrics() -> Result<Vec<u8>, Box<dyn std::error::Error>> {
	let encoder = TextEncoder::new();
	let metric_families = REGISTRY.gather();
	let mut buffer = Vec::new();
	encoder.encode(&metric_families, &mut buffer)?;
	Ok(buffer)
}

/// Sets the per chain subscription gauges from the active tasks.
pub fn update_subscription_metrics<'a>(tasks: impl IntoIterator<Item = &'a SubscriptionTask>) {
	let mut counts = std::collections::HashMap::new();
	for task in tasks {
		*counts.entry(task.chain).or_insert(0usize) += 1;
	}

	SUBSCRIPTIONS.reset();
	for (chain, count) in counts {
		SUBSCRIPTIONS
			.with_label_values(&[chain.name()])
			.set(count as f64);
	}
}
