use std::sync::{
	atomic::{AtomicUsize, Ordering},
	Arc,
};

use account_monitor::{
	models::{
		AccountBalance, Amount, ChainId, ChainValue, NotificationPolicy, ObservedValue, TaskAction,
	},
	repositories::{AccountRepository, AccountRepositoryTrait},
	services::{
		blockchain::ClientPool,
		callback::{try_dispatch, CallbackContext, CallbackError, CallbackOutcome},
		notification::{EmitterTask, EventSink, JsonLinesEventSink, NotificationError},
	},
	utils::tests::{AccountBuilder, SnapshotBuilder, TaskBuilder},
};

use crate::integration::{common::setup_harness, mocks::MockEventSink};

const ALICE: &str = "15oF4uVJwmo4TdGW7VfQxNLavjCXviqxT9S1MgbjMNHr6Sp5";

fn free(amount: u64) -> ChainValue {
	ChainValue::AccountData(AccountBalance {
		nonce: 0,
		free: Amount::from(amount),
		..Default::default()
	})
}

#[tokio::test]
async fn test_policy_none_emits_without_notification() {
	let mut harness = setup_harness(
		SnapshotBuilder::new().build(),
		vec![AccountBuilder::new().balance(1, 0, 0).build()],
	)
	.await;
	let entry = harness.entry(
		TaskBuilder::new()
			.action(TaskAction::BalanceFree)
			.policy(NotificationPolicy::None)
			.build(),
	);

	harness.dispatch(&entry, free(2), false).await.unwrap();
	let events = harness.events();
	assert_eq!(events.len(), 1);
	assert!(events[0].payload.notification.is_none());
}

#[tokio::test]
async fn test_one_shot_policy_forces_every_callback() {
	let mut harness = setup_harness(
		SnapshotBuilder::new().build(),
		vec![AccountBuilder::new().balance(1, 0, 0).build()],
	)
	.await;
	harness.context.settings.set_silenced(true);
	let entry = harness.entry(
		TaskBuilder::new()
			.action(TaskAction::BalanceFree)
			.policy(NotificationPolicy::OneShot)
			.build(),
	);

	for _ in 0..2 {
		let outcome = harness.dispatch(&entry, free(1), false).await.unwrap();
		assert_eq!(outcome, CallbackOutcome::Emitted);
	}

	let events = harness.events();
	assert_eq!(events.len(), 2);
	assert!(events
		.iter()
		.all(|task| task.payload.is_one_shot && task.payload.notification.is_some()));
}

#[tokio::test]
async fn test_silence_toggle_applies_to_next_event() {
	let mut harness = setup_harness(
		SnapshotBuilder::new().build(),
		vec![AccountBuilder::new().balance(1, 0, 0).build()],
	)
	.await;
	let entry = harness.entry(TaskBuilder::new().action(TaskAction::BalanceFree).build());

	harness.dispatch(&entry, free(2), false).await.unwrap();
	harness.context.settings.set_silenced(true);
	harness.dispatch(&entry, free(3), false).await.unwrap();

	let notified: Vec<bool> = harness
		.events()
		.iter()
		.map(|task| task.payload.notification.is_some())
		.collect();
	assert_eq!(notified, vec![true, false]);
}

async fn stored_free(accounts: &AccountRepository) -> Amount {
	accounts
		.get(ChainId::Polkadot, ALICE)
		.await
		.unwrap()
		.unwrap()
		.balance
		.unwrap()
		.free
}

#[tokio::test]
async fn test_sink_failure_leaves_change_to_be_reported_again() {
	let accounts = Arc::new(AccountRepository::from_accounts(vec![AccountBuilder::new()
		.balance(1, 0, 0)
		.build()]));
	let calls = AtomicUsize::new(0);
	let mut sink = MockEventSink::new();
	sink.expect_emit().times(2).returning(move |_| {
		if calls.fetch_add(1, Ordering::SeqCst) == 0 {
			Err(NotificationError::channel_closed("receiver dropped"))
		} else {
			Ok(())
		}
	});

	let context = CallbackContext::new(accounts.clone(), Arc::new(sink), ClientPool::new());
	let entry = context.entry(TaskBuilder::new().action(TaskAction::BalanceFree).build());

	let result = try_dispatch(&context, &entry, free(2), false).await;
	assert!(matches!(result, Err(CallbackError::NotificationError(_))));
	assert_eq!(entry.cached().await, None);
	assert_eq!(stored_free(&accounts).await, Amount::from(1u64));

	let outcome = try_dispatch(&context, &entry, free(2), false).await.unwrap();
	assert_eq!(outcome, CallbackOutcome::Emitted);
	assert_eq!(
		entry.cached().await,
		Some(ObservedValue::Amount(Amount::from(2u64)))
	);
	assert_eq!(stored_free(&accounts).await, Amount::from(2u64));
}

#[tokio::test]
async fn test_sink_failure_restores_previous_observation() {
	let accounts = Arc::new(AccountRepository::from_accounts(vec![AccountBuilder::new()
		.balance(1, 0, 0)
		.build()]));
	let calls = AtomicUsize::new(0);
	let mut sink = MockEventSink::new();
	sink.expect_emit().times(3).returning(move |_| {
		if calls.fetch_add(1, Ordering::SeqCst) == 1 {
			Err(NotificationError::channel_closed("receiver dropped"))
		} else {
			Ok(())
		}
	});

	let context = CallbackContext::new(accounts, Arc::new(sink), ClientPool::new());
	let entry = context.entry(TaskBuilder::new().action(TaskAction::BalanceFree).build());

	try_dispatch(&context, &entry, free(2), false).await.unwrap();
	assert!(try_dispatch(&context, &entry, free(3), false).await.is_err());
	assert_eq!(
		entry.cached().await,
		Some(ObservedValue::Amount(Amount::from(2u64)))
	);

	let outcome = try_dispatch(&context, &entry, free(3), false).await.unwrap();
	assert_eq!(outcome, CallbackOutcome::Emitted);
}

#[tokio::test]
async fn test_json_lines_sink_writes_one_line_per_event() {
	let mut harness = setup_harness(
		SnapshotBuilder::new().build(),
		vec![AccountBuilder::new().balance(1, 0, 0).build()],
	)
	.await;
	let entry = harness.entry(TaskBuilder::new().action(TaskAction::BalanceFree).build());
	harness.dispatch(&entry, free(5), false).await.unwrap();
	harness.dispatch(&entry, free(6), false).await.unwrap();

	let sink = JsonLinesEventSink::new(Vec::new());
	for task in harness.events() {
		sink.emit(task).await.unwrap();
	}
	let output = String::from_utf8(sink.into_inner()).unwrap();

	let lines: Vec<EmitterTask> = output
		.lines()
		.map(|line| serde_json::from_str(line).unwrap())
		.collect();
	assert_eq!(lines.len(), 2);
	assert_eq!(lines[1].action, "persist-event");
	assert_eq!(lines[1].payload.event.data["free"], "6");
}
