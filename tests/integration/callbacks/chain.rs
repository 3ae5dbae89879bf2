use account_monitor::{
	models::{ChainId, ChainValue, EventWho, TaskAction},
	repositories::AccountRepositoryTrait,
	services::callback::CallbackOutcome,
	utils::tests::{SnapshotBuilder, TaskBuilder},
};

use crate::integration::common::setup_harness;

#[tokio::test]
async fn test_timestamp_within_buffer_is_unchanged() {
	let mut harness = setup_harness(
		SnapshotBuilder::new().chain(ChainId::Kusama).build(),
		Vec::new(),
	)
	.await;
	let entry = harness.entry(
		TaskBuilder::new()
			.action(TaskAction::ChainTimestamp)
			.chain(ChainId::Kusama)
			.build(),
	);

	let mut outcomes = Vec::new();
	for timestamp in [1000, 1015, 1025] {
		outcomes.push(
			harness
				.dispatch(&entry, ChainValue::Timestamp(timestamp), false)
				.await
				.unwrap(),
		);
	}
	assert_eq!(
		outcomes,
		vec![
			CallbackOutcome::Emitted,
			CallbackOutcome::Unchanged,
			CallbackOutcome::Emitted
		]
	);

	let events = harness.events();
	assert_eq!(events.len(), 2);
	assert_eq!(events[1].payload.event.data["timestamp"], 1025);
	assert_eq!(
		events[1].payload.event.who,
		EventWho::Chain {
			chain: ChainId::Kusama
		}
	);
}

#[tokio::test]
async fn test_current_slot_compares_exactly() {
	let mut harness = setup_harness(SnapshotBuilder::new().build(), Vec::new()).await;
	let entry = harness.entry(
		TaskBuilder::new()
			.action(TaskAction::ChainCurrentSlot)
			.build(),
	);

	for slot in [41, 41, 42] {
		harness
			.dispatch(&entry, ChainValue::CurrentSlot(slot), false)
			.await
			.unwrap();
	}

	let slots: Vec<u64> = harness
		.events()
		.iter()
		.map(|task| task.payload.event.data["slot"].as_u64().unwrap())
		.collect();
	assert_eq!(slots, vec![41, 42]);
}

#[tokio::test]
async fn test_chain_tasks_do_not_need_accounts() {
	let mut harness = setup_harness(SnapshotBuilder::new().build(), Vec::new()).await;
	let entry = harness.entry(
		TaskBuilder::new()
			.action(TaskAction::ChainTimestamp)
			.os_notifications(false)
			.build(),
	);

	let outcome = harness
		.dispatch(&entry, ChainValue::Timestamp(7), false)
		.await
		.unwrap();
	assert_eq!(outcome, CallbackOutcome::Emitted);
	assert!(harness.accounts.get_all().await.unwrap().is_empty());
	assert!(harness.events()[0].payload.notification.is_none());
}
