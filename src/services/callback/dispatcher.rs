//! Routing of observations to their handlers and committing accepted changes.
//!
//! Handlers only read: they load state, query the chain and decide. Writes
//! happen afterwards in [`commit`], in a fixed order (account, cache, event),
//! so a failed read never leaves anything half updated. When the event cannot
//! be emitted the account and cache are restored to what they held before.

use std::fmt;

use crate::{
	models::{
		Account, ChainId, ChainValue, EventCallback, EventWho, Notification, ObservedValue,
		TaskAction,
	},
	services::{
		cache::ApiCallEntry,
		callback::{
			handlers::{balances, chain, nominating, pools},
			CallbackContext, CallbackError,
		},
		notification::{should_notify, EmitterTask},
	},
	utils::metrics::{CALLBACKS_TOTAL, EVENTS_EMITTED},
};

/// Result of a successful callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackOutcome {
	/// Nothing changed; no write, no event
	Unchanged,
	/// State was updated and an event emitted
	Emitted,
	/// State was updated but the change is not reported
	Suppressed,
}

impl CallbackOutcome {
	pub fn as_str(&self) -> &'static str {
		match self {
			CallbackOutcome::Unchanged => "unchanged",
			CallbackOutcome::Emitted => "emitted",
			CallbackOutcome::Suppressed => "suppressed",
		}
	}
}

impl fmt::Display for CallbackOutcome {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// An accepted change, ready to be written
#[derive(Debug, Clone)]
pub(crate) struct Change {
	/// Mutated account to persist, `None` for tasks without account state
	pub account: Option<Account>,
	pub who: EventWho,
	pub observed: ObservedValue,
	pub title: String,
	pub subtitle: String,
	pub data: serde_json::Value,
}

/// What a handler decided about an observation
#[derive(Debug)]
pub(crate) enum Decision {
	Unchanged,
	/// Commit the change without reporting it
	Silent(Change),
	Emit(Change),
}

/// Handles one observation, logging failures
///
/// Returns `false` when the callback failed; state is then left untouched.
pub async fn dispatch(
	ctx: &CallbackContext,
	entry: &ApiCallEntry,
	value: ChainValue,
	is_one_shot: bool,
) -> bool {
	let action = entry.task.action;
	match try_dispatch(ctx, entry, value, is_one_shot).await {
		Ok(outcome) => {
			tracing::debug!(task = %entry.key(), %outcome, "callback handled");
			CALLBACKS_TOTAL
				.with_label_values(&[action.as_str(), outcome.as_str()])
				.inc();
			true
		}
		Err(e) => {
			tracing::error!(task = %entry.key(), error = %e, "callback failed");
			CALLBACKS_TOTAL
				.with_label_values(&[action.as_str(), "failed"])
				.inc();
			false
		}
	}
}

/// Handles one observation, returning what happened
///
/// Callbacks for the same subscription, and callbacks bound to the same
/// account, are serialized. A one-shot run is requested either by the caller
/// or by the task's notification policy.
pub async fn try_dispatch(
	ctx: &CallbackContext,
	entry: &ApiCallEntry,
	value: ChainValue,
	is_one_shot: bool,
) -> Result<CallbackOutcome, CallbackError> {
	let _guard = ctx.locks().acquire(&entry.key()).await;
	let one_shot = is_one_shot || entry.task.is_one_shot();

	let decision = match entry.task.action {
		TaskAction::BalanceFree
		| TaskAction::BalanceFrozen
		| TaskAction::BalanceReserved => balances::balance_field(ctx, entry, value, one_shot).await?,
		TaskAction::BalanceSpendable => balances::spendable(ctx, entry, value, one_shot).await?,
		TaskAction::PoolRewards => pools::pending_rewards(ctx, entry, value, one_shot).await?,
		TaskAction::PoolState | TaskAction::PoolName => {
			pools::metadata(ctx, entry, value, one_shot).await?
		}
		TaskAction::PoolRoles => pools::roles(ctx, entry, value, one_shot).await?,
		TaskAction::PoolCommission => pools::commission(ctx, entry, value, one_shot).await?,
		TaskAction::NominatingEraRewards => {
			nominating::era_rewards(ctx, entry, value, one_shot).await?
		}
		TaskAction::NominatingExposure => nominating::exposure(ctx, entry, value, one_shot).await?,
		TaskAction::NominatingCommission => {
			nominating::commission(ctx, entry, value, one_shot).await?
		}
		TaskAction::NominatingNominations => {
			nominating::nominations(ctx, entry, value, one_shot).await?
		}
		TaskAction::ChainTimestamp => chain::timestamp(ctx, entry, value, one_shot).await?,
		TaskAction::ChainCurrentSlot => chain::current_slot(ctx, entry, value, one_shot).await?,
	};

	match decision {
		Decision::Unchanged => Ok(CallbackOutcome::Unchanged),
		Decision::Silent(change) => {
			commit(ctx, entry, change, one_shot, false).await?;
			Ok(CallbackOutcome::Suppressed)
		}
		Decision::Emit(change) => {
			commit(ctx, entry, change, one_shot, true).await?;
			Ok(CallbackOutcome::Emitted)
		}
	}
}

async fn commit(
	ctx: &CallbackContext,
	entry: &ApiCallEntry,
	change: Change,
	one_shot: bool,
	emit: bool,
) -> Result<(), CallbackError> {
	let previous_value = entry.cached().await;
	let previous_account = match &change.account {
		Some(account) => Some((
			account.chain,
			account.address.clone(),
			ctx.accounts.get(account.chain, &account.address).await?,
		)),
		None => None,
	};

	if let Some(account) = change.account {
		ctx.accounts.set(account.chain, account).await?;
	}
	entry.store(change.observed).await;

	if !emit {
		return Ok(());
	}

	let event = EventCallback::new(
		&entry.task,
		change.who,
		change.title,
		change.subtitle,
		change.data,
	);
	let notification = should_notify(&entry.task, one_shot, &ctx.settings)
		.then(|| Notification::new(event.title.clone(), event.subtitle.clone()));
	let category = event.category;

	if let Err(e) = ctx
		.sink
		.emit(EmitterTask::persist_event(event, notification, one_shot))
		.await
	{
		rollback(ctx, entry, previous_account, previous_value).await;
		return Err(e.into());
	}
	EVENTS_EMITTED.with_label_values(&[category.as_str()]).inc();
	Ok(())
}

/// Puts back the account and cached value a failed emission replaced, so the
/// next observation detects the change again
async fn rollback(
	ctx: &CallbackContext,
	entry: &ApiCallEntry,
	previous_account: Option<(ChainId, String, Option<Account>)>,
	previous_value: Option<ObservedValue>,
) {
	match previous_value {
		Some(value) => entry.store(value).await,
		None => entry.forget().await,
	}

	let restored = match previous_account {
		Some((chain, _, Some(account))) => ctx.accounts.set(chain, account).await,
		Some((chain, address, None)) => ctx.accounts.remove(chain, &address).await.map(|_| ()),
		None => Ok(()),
	};
	if let Err(e) = restored {
		tracing::error!(task = %entry.key(), error = %e, "failed to restore account");
	}
}

/// Loads the account a task is bound to
pub(crate) async fn load_account(
	ctx: &CallbackContext,
	entry: &ApiCallEntry,
) -> Result<Account, CallbackError> {
	let task = &entry.task;
	let address = task.account.as_deref().ok_or_else(|| {
		CallbackError::precondition_error(format!("task {} has no account", task.action))
	})?;

	ctx.accounts
		.get(task.chain, address)
		.await?
		.ok_or_else(|| {
			CallbackError::precondition_error(format!(
				"account {} is not imported on {}",
				address, task.chain
			))
		})
}

/// Whether the observation is a change, comparing against the cache and,
/// when nothing is cached yet, against the stored state
pub(crate) async fn is_unchanged(
	ctx: &CallbackContext,
	entry: &ApiCallEntry,
	observed: &ObservedValue,
	stored: Option<ObservedValue>,
	one_shot: bool,
) -> bool {
	if one_shot {
		return false;
	}
	let cached = entry.cached().await.or(stored);
	ctx.equality
		.unchanged(entry.task.action, observed, cached.as_ref())
}

pub(crate) fn unexpected(entry: &ApiCallEntry, value: &ChainValue) -> CallbackError {
	CallbackError::unexpected_value(format!(
		"{} delivered to task {}",
		value.kind(),
		entry.task.action
	))
}

pub(crate) fn account_who(account: &Account) -> EventWho {
	EventWho::Account {
		address: account.address.clone(),
		chain: account.chain,
		account_name: account.display_name(),
	}
}
