//! Nomination pool tasks.

use serde_json::json;

use crate::{
	models::{Account, ChainValue, NominationPoolData, ObservedValue, TaskAction},
	services::{
		cache::ApiCallEntry,
		callback::{
			dispatcher::{account_who, is_unchanged, load_account, unexpected, Change, Decision},
			handlers::balances::format_amount,
			CallbackContext, CallbackError,
		},
	},
};

fn pool_data(account: &mut Account) -> Result<&mut NominationPoolData, CallbackError> {
	let address = account.address.clone();
	account.nomination_pool_data.as_mut().ok_or_else(|| {
		CallbackError::precondition_error(format!("account {} is not in a nomination pool", address))
	})
}

/// Pending pool rewards, re-queried on every reward tick
///
/// A drop to zero (rewards claimed) updates the state without an event unless
/// the run is one-shot.
pub(crate) async fn pending_rewards(
	ctx: &CallbackContext,
	entry: &ApiCallEntry,
	value: ChainValue,
	one_shot: bool,
) -> Result<Decision, CallbackError> {
	if !matches!(value, ChainValue::PoolRewardTick) {
		return Err(unexpected(entry, &value));
	}

	let mut account = load_account(ctx, entry).await?;
	let stored = pool_data(&mut account)?.pending_rewards;

	let client = ctx.clients.get(account.chain).await?;
	let pending = client.pool_pending_rewards(&account.address).await?;

	let observed = ObservedValue::Amount(pending);
	if is_unchanged(ctx, entry, &observed, Some(ObservedValue::Amount(stored)), one_shot).await {
		return Ok(Decision::Unchanged);
	}

	let pool = pool_data(&mut account)?;
	pool.pending_rewards = pending;
	let pool_id = pool.pool_id;

	let change = Change {
		who: account_who(&account),
		observed,
		title: "Pool Rewards".to_string(),
		subtitle: format!(
			"{}: {} pending",
			account.display_name(),
			format_amount(account.chain, pending)
		),
		data: json!({ "poolId": pool_id, "pendingRewards": pending }),
		account: Some(account),
	};

	if pending.is_zero() && !one_shot {
		Ok(Decision::Silent(change))
	} else {
		Ok(Decision::Emit(change))
	}
}

/// Pool state or pool name
pub(crate) async fn metadata(
	ctx: &CallbackContext,
	entry: &ApiCallEntry,
	value: ChainValue,
	one_shot: bool,
) -> Result<Decision, CallbackError> {
	let action = entry.task.action;
	let text = match (action, value) {
		(TaskAction::PoolState, ChainValue::PoolState(state)) => state,
		(TaskAction::PoolName, ChainValue::PoolName(name)) => name,
		(_, value) => return Err(unexpected(entry, &value)),
	};

	let mut account = load_account(ctx, entry).await?;
	let pool = pool_data(&mut account)?;
	let (key, title, field) = match action {
		TaskAction::PoolState => ("state", "Pool State", &mut pool.state),
		_ => ("name", "Pool Name", &mut pool.name),
	};

	let observed = ObservedValue::Text(text.clone());
	if is_unchanged(ctx, entry, &observed, Some(ObservedValue::Text(field.clone())), one_shot).await
	{
		return Ok(Decision::Unchanged);
	}

	let previous = std::mem::replace(field, text.clone());
	let pool_id = pool.pool_id;

	Ok(Decision::Emit(Change {
		who: account_who(&account),
		observed,
		title: title.to_string(),
		subtitle: format!("Pool {}: {}", pool_id, text),
		data: json!({ "poolId": pool_id, key: text, "previous": previous }),
		account: Some(account),
	}))
}

/// Depositor, root, nominator and bouncer of the pool
pub(crate) async fn roles(
	ctx: &CallbackContext,
	entry: &ApiCallEntry,
	value: ChainValue,
	one_shot: bool,
) -> Result<Decision, CallbackError> {
	let ChainValue::PoolRoles(received) = value else {
		return Err(unexpected(entry, &value));
	};

	let mut account = load_account(ctx, entry).await?;
	let pool = pool_data(&mut account)?;

	let observed = ObservedValue::PoolRoles(received.clone());
	let stored = ObservedValue::PoolRoles(pool.roles.clone());
	if is_unchanged(ctx, entry, &observed, Some(stored), one_shot).await {
		return Ok(Decision::Unchanged);
	}

	let previous = std::mem::replace(&mut pool.roles, received.clone());
	let pool_id = pool.pool_id;

	Ok(Decision::Emit(Change {
		who: account_who(&account),
		observed,
		title: "Pool Roles".to_string(),
		subtitle: format!("Roles of pool {} changed", pool_id),
		data: json!({ "poolId": pool_id, "roles": received, "previous": previous }),
		account: Some(account),
	}))
}

/// Commission settings of the pool
pub(crate) async fn commission(
	ctx: &CallbackContext,
	entry: &ApiCallEntry,
	value: ChainValue,
	one_shot: bool,
) -> Result<Decision, CallbackError> {
	let ChainValue::PoolCommission(received) = value else {
		return Err(unexpected(entry, &value));
	};

	let mut account = load_account(ctx, entry).await?;
	let pool = pool_data(&mut account)?;

	let observed = ObservedValue::PoolCommission(received.clone());
	let stored = ObservedValue::PoolCommission(pool.commission.clone());
	if is_unchanged(ctx, entry, &observed, Some(stored), one_shot).await {
		return Ok(Decision::Unchanged);
	}

	let previous = std::mem::replace(&mut pool.commission, received.clone());
	let pool_id = pool.pool_id;
	let subtitle = match &received.current {
		Some(current) => format!("Pool {} commission is {}", pool_id, current.rate),
		None => format!("Pool {} commission changed", pool_id),
	};

	Ok(Decision::Emit(Change {
		who: account_who(&account),
		observed,
		title: "Pool Commission".to_string(),
		subtitle,
		data: json!({ "poolId": pool_id, "commission": received, "previous": previous }),
		account: Some(account),
	}))
}
