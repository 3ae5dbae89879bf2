//! Balance tasks.

use serde_json::json;

use crate::{
	models::{AccountBalance, Amount, ChainId, ChainValue, ObservedValue, TaskAction},
	services::{
		cache::ApiCallEntry,
		callback::{
			dispatcher::{account_who, is_unchanged, load_account, unexpected, Change, Decision},
			CallbackContext, CallbackError,
		},
	},
};

pub(crate) fn format_amount(chain: ChainId, amount: Amount) -> String {
	format!("{} {}", amount.to_units(chain.decimals()), chain.currency())
}

fn field(action: TaskAction, balance: &AccountBalance) -> Amount {
	match action {
		TaskAction::BalanceFrozen => balance.frozen,
		TaskAction::BalanceReserved => balance.reserved,
		_ => balance.free,
	}
}

fn field_mut(action: TaskAction, balance: &mut AccountBalance) -> &mut Amount {
	match action {
		TaskAction::BalanceFrozen => &mut balance.frozen,
		TaskAction::BalanceReserved => &mut balance.reserved,
		_ => &mut balance.free,
	}
}

fn field_name(action: TaskAction) -> (&'static str, &'static str) {
	match action {
		TaskAction::BalanceFrozen => ("frozen", "Frozen Balance"),
		TaskAction::BalanceReserved => ("reserved", "Reserved Balance"),
		_ => ("free", "Free Balance"),
	}
}

/// Free, frozen or reserved balance
pub(crate) async fn balance_field(
	ctx: &CallbackContext,
	entry: &ApiCallEntry,
	value: ChainValue,
	one_shot: bool,
) -> Result<Decision, CallbackError> {
	let ChainValue::AccountData(received) = value else {
		return Err(unexpected(entry, &value));
	};
	let action = entry.task.action;

	let mut account = load_account(ctx, entry).await?;
	let Some(balance) = account.balance.as_mut() else {
		return Err(CallbackError::precondition_error(format!(
			"account {} has no balance record",
			account.address
		)));
	};

	let amount = field(action, &received);
	let observed = ObservedValue::Amount(amount);
	let stored = ObservedValue::Amount(field(action, balance));
	if is_unchanged(ctx, entry, &observed, Some(stored), one_shot).await {
		return Ok(Decision::Unchanged);
	}

	*field_mut(action, balance) = amount;
	let (key, title) = field_name(action);
	let subtitle = format!(
		"{}: {}",
		account.display_name(),
		format_amount(account.chain, amount)
	);

	Ok(Decision::Emit(Change {
		who: account_who(&account),
		observed,
		title: title.to_string(),
		subtitle,
		data: json!({ key: amount }),
		account: Some(account),
	}))
}

/// Spendable balance, `free - max(frozen - reserved, existential deposit)`
pub(crate) async fn spendable(
	ctx: &CallbackContext,
	entry: &ApiCallEntry,
	value: ChainValue,
	one_shot: bool,
) -> Result<Decision, CallbackError> {
	let ChainValue::AccountData(received) = value else {
		return Err(unexpected(entry, &value));
	};

	let mut account = load_account(ctx, entry).await?;
	let Some(balance) = account.balance.as_ref() else {
		return Err(CallbackError::precondition_error(format!(
			"account {} has no balance record",
			account.address
		)));
	};

	let client = ctx.clients.get(account.chain).await?;
	let existential_deposit = client.existential_deposit().await?;

	let amount = received.spendable(existential_deposit);
	let observed = ObservedValue::Amount(amount);
	let stored = ObservedValue::Amount(balance.spendable(existential_deposit));
	if is_unchanged(ctx, entry, &observed, Some(stored), one_shot).await {
		return Ok(Decision::Unchanged);
	}

	account.balance = Some(received);
	let subtitle = format!(
		"{}: {}",
		account.display_name(),
		format_amount(account.chain, amount)
	);

	Ok(Decision::Emit(Change {
		who: account_who(&account),
		observed,
		title: "Spendable Balance".to_string(),
		subtitle,
		data: json!({ "spendable": amount }),
		account: Some(account),
	}))
}
