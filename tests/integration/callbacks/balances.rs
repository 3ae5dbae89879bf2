use std::{sync::Arc, time::Duration};

use account_monitor::{
	models::{Account, AccountBalance, Amount, ChainId, ChainValue, ObservedValue, TaskAction},
	repositories::{AccountRepository, AccountRepositoryTrait, RepositoryError},
	services::{
		blockchain::{BlockChainError, ClientPool},
		callback::{dispatch, try_dispatch, CallbackContext, CallbackError, CallbackOutcome},
		notification::{ChannelEventSink, NotificationSettings},
	},
	utils::tests::{AccountBuilder, SnapshotBuilder, TaskBuilder},
};
use async_trait::async_trait;

use crate::integration::{
	common::setup_harness,
	mocks::{MockAccountRepository, MockChainQueryClient, MockEventSink},
};

const ALICE: &str = "15oF4uVJwmo4TdGW7VfQxNLavjCXviqxT9S1MgbjMNHr6Sp5";

fn account_data(free: u64, reserved: u64, frozen: u64) -> ChainValue {
	ChainValue::AccountData(AccountBalance {
		nonce: 1,
		free: Amount::from(free),
		reserved: Amount::from(reserved),
		frozen: Amount::from(frozen),
	})
}

#[tokio::test]
async fn test_free_balance_change_updates_account_cache_and_emits() {
	let mut harness = setup_harness(
		SnapshotBuilder::new().build(),
		vec![AccountBuilder::new().name("Main").balance(100, 0, 0).build()],
	)
	.await;
	let entry = harness.entry(TaskBuilder::new().action(TaskAction::BalanceFree).build());

	let outcome = harness
		.dispatch(&entry, account_data(150, 0, 0), false)
		.await
		.unwrap();
	assert_eq!(outcome, CallbackOutcome::Emitted);

	let account = harness.account(ChainId::Polkadot, ALICE).await;
	assert_eq!(account.balance.unwrap().free, Amount::from(150u64));
	assert_eq!(
		entry.cached().await,
		Some(ObservedValue::Amount(Amount::from(150u64)))
	);

	let events = harness.events();
	assert_eq!(events.len(), 1);
	let payload = &events[0].payload;
	assert_eq!(events[0].action, "persist-event");
	assert_eq!(payload.event.task_action, TaskAction::BalanceFree);
	assert_eq!(payload.event.data["free"], "150");
	assert_eq!(payload.event.title, "Free Balance");
	assert!(payload.notification.is_some());
	assert!(!payload.is_one_shot);
}

#[tokio::test]
async fn test_repeated_value_is_reported_once() {
	let mut harness = setup_harness(
		SnapshotBuilder::new().build(),
		vec![AccountBuilder::new().balance(100, 0, 0).build()],
	)
	.await;
	let entry = harness.entry(TaskBuilder::new().action(TaskAction::BalanceFree).build());

	for expected in [CallbackOutcome::Emitted, CallbackOutcome::Unchanged, CallbackOutcome::Unchanged] {
		let outcome = harness
			.dispatch(&entry, account_data(150, 0, 0), false)
			.await
			.unwrap();
		assert_eq!(outcome, expected);
	}
	assert_eq!(harness.events().len(), 1);
}

#[tokio::test]
async fn test_first_value_matching_stored_balance_is_unchanged() {
	let mut harness = setup_harness(
		SnapshotBuilder::new().build(),
		vec![AccountBuilder::new().balance(100, 7, 0).build()],
	)
	.await;
	let entry = harness.entry(TaskBuilder::new().action(TaskAction::BalanceReserved).build());

	let outcome = harness
		.dispatch(&entry, account_data(999, 7, 0), false)
		.await
		.unwrap();
	assert_eq!(outcome, CallbackOutcome::Unchanged);
	assert!(harness.events().is_empty());
	assert_eq!(entry.cached().await, None);
}

#[tokio::test]
async fn test_one_shot_reports_unchanged_value() {
	let mut harness = setup_harness(
		SnapshotBuilder::new().build(),
		vec![AccountBuilder::new().balance(100, 0, 0).build()],
	)
	.await;
	harness.context.settings.set_silenced(true);
	let entry = harness.entry(TaskBuilder::new().action(TaskAction::BalanceFree).build());

	harness
		.dispatch(&entry, account_data(150, 0, 0), false)
		.await
		.unwrap();
	let outcome = harness
		.dispatch(&entry, account_data(150, 0, 0), true)
		.await
		.unwrap();
	assert_eq!(outcome, CallbackOutcome::Emitted);

	let events = harness.events();
	assert_eq!(events.len(), 2);
	// silenced, so only the forced run carries a notification
	assert!(events[0].payload.notification.is_none());
	assert!(events[1].payload.is_one_shot);
	assert!(events[1].payload.notification.is_some());
}

#[tokio::test]
async fn test_missing_balance_record_fails_without_side_effects() {
	let mut harness = setup_harness(
		SnapshotBuilder::new().build(),
		vec![AccountBuilder::new().build()],
	)
	.await;
	let entry = harness.entry(TaskBuilder::new().action(TaskAction::BalanceFrozen).build());

	let result = harness.dispatch(&entry, account_data(1, 2, 3), false).await;
	assert!(matches!(result, Err(CallbackError::PreconditionError(_))));
	assert!(harness.events().is_empty());
	assert_eq!(entry.cached().await, None);
	assert!(harness
		.account(ChainId::Polkadot, ALICE)
		.await
		.balance
		.is_none());
}

#[tokio::test]
async fn test_unknown_account_fails() {
	let mut harness = setup_harness(SnapshotBuilder::new().build(), Vec::new()).await;
	let entry = harness.entry(TaskBuilder::new().action(TaskAction::BalanceFree).build());

	let result = harness.dispatch(&entry, account_data(1, 0, 0), false).await;
	assert!(matches!(result, Err(CallbackError::PreconditionError(_))));
	assert!(harness.events().is_empty());
}

#[tokio::test]
async fn test_value_of_another_kind_is_rejected() {
	let harness = setup_harness(
		SnapshotBuilder::new().build(),
		vec![AccountBuilder::new().balance(100, 0, 0).build()],
	)
	.await;
	let entry = harness.entry(TaskBuilder::new().action(TaskAction::BalanceFree).build());

	let result = harness.dispatch(&entry, ChainValue::Timestamp(5), false).await;
	assert!(matches!(result, Err(CallbackError::UnexpectedValue(_))));
}

#[tokio::test]
async fn test_spendable_balance_uses_existential_deposit() {
	let mut harness = setup_harness(
		SnapshotBuilder::new().existential_deposit(10).build(),
		vec![AccountBuilder::new().balance(100, 0, 0).build()],
	)
	.await;
	let entry = harness.entry(TaskBuilder::new().action(TaskAction::BalanceSpendable).build());

	// free 100, locked max(30 - 5, 10) = 25
	let outcome = harness
		.dispatch(&entry, account_data(100, 5, 30), false)
		.await
		.unwrap();
	assert_eq!(outcome, CallbackOutcome::Emitted);

	let events = harness.events();
	assert_eq!(events[0].payload.event.data["spendable"], "75");
	let balance = harness.account(ChainId::Polkadot, ALICE).await.balance.unwrap();
	assert_eq!(balance.frozen, Amount::from(30u64));
	assert_eq!(balance.reserved, Amount::from(5u64));
}

#[tokio::test]
async fn test_chain_failure_leaves_state_untouched() {
	let repository = Arc::new(AccountRepository::from_accounts(
		vec![AccountBuilder::new().balance(100, 0, 0).build()],
	));

	let mut client = MockChainQueryClient::new();
	client.expect_chain().return_const(ChainId::Polkadot);
	client
		.expect_existential_deposit()
		.times(1)
		.returning(|| Err(BlockChainError::connection_error("node unreachable")));
	let clients = ClientPool::new();
	clients.register(Arc::new(client)).await;

	let mut sink = MockEventSink::new();
	sink.expect_emit().times(0);

	let context = CallbackContext::new(repository.clone(), Arc::new(sink), clients);
	let entry = context.entry(TaskBuilder::new().action(TaskAction::BalanceSpendable).build());

	let result = try_dispatch(&context, &entry, account_data(500, 0, 0), false).await;
	assert!(matches!(result, Err(CallbackError::ChainError(_))));
	assert_eq!(entry.cached().await, None);

	let account = repository.get(ChainId::Polkadot, ALICE).await.unwrap().unwrap();
	assert_eq!(account.balance.unwrap().free, Amount::from(100u64));
}

#[tokio::test]
async fn test_failed_account_write_does_not_cache_or_emit() {
	let mut accounts = MockAccountRepository::new();
	accounts
		.expect_get()
		.returning(|_, _| Ok(Some(AccountBuilder::new().balance(100, 0, 0).build())));
	accounts
		.expect_set()
		.times(1)
		.returning(|_, _| Err(RepositoryError::internal_error("disk full")));

	let mut sink = MockEventSink::new();
	sink.expect_emit().times(0);

	let context = CallbackContext::new(Arc::new(accounts), Arc::new(sink), ClientPool::new())
		.with_settings(NotificationSettings::new(false));
	let entry = context.entry(TaskBuilder::new().action(TaskAction::BalanceFree).build());

	assert!(!dispatch(&context, &entry, account_data(150, 0, 0), false).await);
	assert_eq!(entry.cached().await, None);
}

/// Account store whose reads take a while, widening the window between a
/// callback loading an account and writing it back
struct SlowAccountRepository {
	inner: AccountRepository,
}

#[async_trait]
impl AccountRepositoryTrait for SlowAccountRepository {
	async fn get(&self, chain: ChainId, address: &str) -> Result<Option<Account>, RepositoryError> {
		tokio::time::sleep(Duration::from_millis(20)).await;
		self.inner.get(chain, address).await
	}

	async fn set(&self, chain: ChainId, account: Account) -> Result<(), RepositoryError> {
		self.inner.set(chain, account).await
	}

	async fn remove(&self, chain: ChainId, address: &str) -> Result<Option<Account>, RepositoryError> {
		self.inner.remove(chain, address).await
	}

	async fn get_all(&self) -> Result<Vec<Account>, RepositoryError> {
		self.inner.get_all().await
	}
}

#[tokio::test]
async fn test_concurrent_tasks_on_one_account_keep_both_writes() {
	let accounts = Arc::new(SlowAccountRepository {
		inner: AccountRepository::from_accounts(vec![AccountBuilder::new().balance(1, 1, 0).build()]),
	});
	let (sink, mut receiver) = ChannelEventSink::channel(8);
	let context = CallbackContext::new(accounts.clone(), Arc::new(sink), ClientPool::new());
	let free = context.entry(TaskBuilder::new().action(TaskAction::BalanceFree).build());
	let reserved = context.entry(TaskBuilder::new().action(TaskAction::BalanceReserved).build());

	let (free_outcome, reserved_outcome) = tokio::join!(
		try_dispatch(&context, &free, account_data(50, 70, 0), false),
		try_dispatch(&context, &reserved, account_data(50, 70, 0), false),
	);
	assert_eq!(free_outcome.unwrap(), CallbackOutcome::Emitted);
	assert_eq!(reserved_outcome.unwrap(), CallbackOutcome::Emitted);

	let balance = accounts
		.get(ChainId::Polkadot, ALICE)
		.await
		.unwrap()
		.unwrap()
		.balance
		.unwrap();
	assert_eq!(balance.free, Amount::from(50u64));
	assert_eq!(balance.reserved, Amount::from(70u64));
	assert!(receiver.try_recv().is_ok());
	assert!(receiver.try_recv().is_ok());
}
