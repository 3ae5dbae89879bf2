//! Shared setup for the callback tests.

use std::sync::Arc;

use account_monitor::{
	models::{Account, ChainId, ChainSnapshot, ChainValue, SubscriptionTask},
	repositories::{AccountRepository, AccountRepositoryTrait},
	services::{
		blockchain::{ClientPool, SnapshotClient},
		cache::ApiCallEntry,
		callback::{try_dispatch, CallbackContext, CallbackError, CallbackOutcome},
		notification::{ChannelEventSink, EmitterTask},
	},
};
use tokio::sync::mpsc;

/// Engine wired to one snapshot client, an in-memory account store and a
/// channel sink
pub struct Harness {
	pub context: CallbackContext,
	pub accounts: Arc<AccountRepository>,
	pub client: Arc<SnapshotClient>,
	receiver: mpsc::Receiver<EmitterTask>,
}

pub async fn setup_harness(snapshot: ChainSnapshot, accounts: Vec<Account>) -> Harness {
	let repository = Arc::new(AccountRepository::from_accounts(accounts));
	let client = Arc::new(SnapshotClient::new(snapshot));
	let clients = ClientPool::new();
	clients.register(client.clone()).await;

	let (sink, receiver) = ChannelEventSink::channel(64);
	let context = CallbackContext::new(repository.clone(), Arc::new(sink), clients);

	Harness {
		context,
		accounts: repository,
		client,
		receiver,
	}
}

impl Harness {
	pub fn entry(&self, task: SubscriptionTask) -> ApiCallEntry {
		self.context.entry(task)
	}

	pub async fn dispatch(
		&self,
		entry: &ApiCallEntry,
		value: ChainValue,
		is_one_shot: bool,
	) -> Result<CallbackOutcome, CallbackError> {
		try_dispatch(&self.context, entry, value, is_one_shot).await
	}

	/// Events emitted since the last call
	pub fn events(&mut self) -> Vec<EmitterTask> {
		let mut events = Vec::new();
		while let Ok(task) = self.receiver.try_recv() {
			events.push(task);
		}
		events
	}

	pub async fn account(&self, chain: ChainId, address: &str) -> Account {
		self.accounts
			.get(chain, address)
			.await
			.unwrap()
			.expect("account is imported")
	}
}
