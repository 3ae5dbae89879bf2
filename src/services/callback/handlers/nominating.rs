//! Direct nominating tasks.
//!
//! Era driven tasks (rewards, exposure, commission) are triggered by the
//! active era subscription and query the chain for the data they report.

use std::collections::BTreeSet;

use serde_json::json;

use crate::{
	models::{
		Account, ChainValue, Commission, NominatingData, ObservedValue, ValidatorCommission,
	},
	services::{
		blockchain::ChainQueryClient,
		cache::ApiCallEntry,
		callback::{
			dispatcher::{account_who, is_unchanged, load_account, unexpected, Change, Decision},
			handlers::balances::format_amount,
			CallbackContext, CallbackError,
		},
	},
};

fn nominating_data(account: &mut Account) -> Result<&mut NominatingData, CallbackError> {
	let address = account.address.clone();
	account.nominating_data.as_mut().ok_or_else(|| {
		CallbackError::precondition_error(format!("account {} is not nominating", address))
	})
}

/// Current commission of each validator, keeping the known rate of validators
/// that no longer have preferences on chain
async fn current_commissions(
	client: &dyn ChainQueryClient,
	validators: &[ValidatorCommission],
) -> Result<Vec<ValidatorCommission>, CallbackError> {
	let mut current = Vec::with_capacity(validators.len());
	for validator in validators {
		let commission = client
			.validator_prefs(&validator.validator_id)
			.await?
			.map(|prefs| prefs.commission)
			.unwrap_or(validator.commission);
		current.push(ValidatorCommission {
			validator_id: validator.validator_id.clone(),
			commission,
		});
	}
	Ok(current)
}

/// Unclaimed rewards over the window preceding the new active era
///
/// Zero rewards are cached so the era is not recomputed, but only reported on
/// a one-shot run.
pub(crate) async fn era_rewards(
	ctx: &CallbackContext,
	entry: &ApiCallEntry,
	value: ChainValue,
	one_shot: bool,
) -> Result<Decision, CallbackError> {
	let ChainValue::ActiveEra(era) = value else {
		return Err(unexpected(entry, &value));
	};

	let observed = ObservedValue::Era(era);
	if is_unchanged(ctx, entry, &observed, None, one_shot).await {
		return Ok(Decision::Unchanged);
	}

	let account = load_account(ctx, entry).await?;
	let client = ctx.clients.get(account.chain).await?;
	let resolver = ctx.resolver(account.chain);
	let summary = ctx
		.rewards
		.unclaimed_rewards(client.as_ref(), &resolver, era, &account.address)
		.await?;
	let total = summary.total();

	let change = Change {
		who: account_who(&account),
		observed,
		title: "Unclaimed Nominating Rewards".to_string(),
		subtitle: format!(
			"{}: {}",
			account.display_name(),
			format_amount(account.chain, total)
		),
		data: json!({ "era": era, "rewards": total, "eras": summary.eras }),
		account: None,
	};

	if total.is_zero() && !one_shot {
		Ok(Decision::Silent(change))
	} else {
		Ok(Decision::Emit(change))
	}
}

/// Whether the account is rewarded in the new active era
pub(crate) async fn exposure(
	ctx: &CallbackContext,
	entry: &ApiCallEntry,
	value: ChainValue,
	one_shot: bool,
) -> Result<Decision, CallbackError> {
	let ChainValue::ActiveEra(era) = value else {
		return Err(unexpected(entry, &value));
	};

	let mut account = load_account(ctx, entry).await?;
	let nominating = nominating_data(&mut account)?;

	let observed = ObservedValue::Era(era);
	let stored = ObservedValue::Era(nominating.last_checked_era);
	if is_unchanged(ctx, entry, &observed, Some(stored), one_shot).await {
		return Ok(Decision::Unchanged);
	}

	let validator_ids = nominating.validator_ids();
	let client = ctx.clients.get(account.chain).await?;
	let exposed = ctx
		.resolver(account.chain)
		.is_exposed(client.as_ref(), era, &account.address, &validator_ids)
		.await?;

	let nominating = nominating_data(&mut account)?;
	nominating.exposed = exposed;
	nominating.last_checked_era = era;

	let subtitle = if exposed {
		format!("{} is exposed in era {}", account.display_name(), era)
	} else {
		format!("{} is not exposed in era {}", account.display_name(), era)
	};

	Ok(Decision::Emit(Change {
		who: account_who(&account),
		observed,
		title: "Era Exposure".to_string(),
		subtitle,
		data: json!({ "era": era, "exposed": exposed }),
		account: Some(account),
	}))
}

/// Commission changes of the nominated validators
pub(crate) async fn commission(
	ctx: &CallbackContext,
	entry: &ApiCallEntry,
	value: ChainValue,
	one_shot: bool,
) -> Result<Decision, CallbackError> {
	let ChainValue::ActiveEra(_) = value else {
		return Err(unexpected(entry, &value));
	};

	let mut account = load_account(ctx, entry).await?;
	let client = ctx.clients.get(account.chain).await?;
	let nominating = nominating_data(&mut account)?;

	let current = current_commissions(client.as_ref(), &nominating.validators).await?;
	let observed = ObservedValue::Validators(current.clone());
	let stored = ObservedValue::Validators(nominating.validators.clone());
	if is_unchanged(ctx, entry, &observed, Some(stored), one_shot).await {
		return Ok(Decision::Unchanged);
	}

	let changes: Vec<serde_json::Value> = current
		.iter()
		.filter_map(|validator| {
			let previous = nominating
				.validators
				.iter()
				.find(|known| known.validator_id == validator.validator_id)
				.map(|known| known.commission)?;
			(previous != validator.commission).then(|| {
				json!({
					"validatorId": validator.validator_id,
					"previous": previous,
					"current": validator.commission,
				})
			})
		})
		.collect();

	nominating.validators = current;
	let subtitle = match changes.len() {
		0 => format!("{}: validator commissions", account.display_name()),
		1 => format!("{}: 1 validator changed commission", account.display_name()),
		n => format!("{}: {} validators changed commission", account.display_name(), n),
	};

	Ok(Decision::Emit(Change {
		who: account_who(&account),
		observed,
		title: "Validator Commission".to_string(),
		subtitle,
		data: json!({ "changes": changes }),
		account: Some(account),
	}))
}

/// Changes to the nominated validator set
///
/// An account without nominating state starts one with its first nominations.
pub(crate) async fn nominations(
	ctx: &CallbackContext,
	entry: &ApiCallEntry,
	value: ChainValue,
	one_shot: bool,
) -> Result<Decision, CallbackError> {
	let ChainValue::Nominations(received) = value else {
		return Err(unexpected(entry, &value));
	};

	let mut account = load_account(ctx, entry).await?;
	let known = account
		.nominating_data
		.as_ref()
		.map(NominatingData::validator_ids)
		.unwrap_or_default();

	let observed = ObservedValue::Targets(received.targets.clone());
	let previous = match entry.cached().await {
		Some(ObservedValue::Targets(targets)) => targets,
		_ => known,
	};
	if is_unchanged(
		ctx,
		entry,
		&observed,
		Some(ObservedValue::Targets(previous.clone())),
		one_shot,
	)
	.await
	{
		return Ok(Decision::Unchanged);
	}

	let client = ctx.clients.get(account.chain).await?;
	let mut validators = Vec::with_capacity(received.targets.len());
	for target in &received.targets {
		let commission = client
			.validator_prefs(target)
			.await?
			.map(|prefs| prefs.commission)
			.unwrap_or(Commission::ZERO);
		validators.push(ValidatorCommission {
			validator_id: target.clone(),
			commission,
		});
	}

	let before: BTreeSet<&String> = previous.iter().collect();
	let after: BTreeSet<&String> = received.targets.iter().collect();
	let added: Vec<&String> = after.difference(&before).copied().collect();
	let removed: Vec<&String> = before.difference(&after).copied().collect();
	let data = json!({
		"added": added,
		"removed": removed,
		"submittedIn": received.submitted_in,
	});

	let nominating = account.nominating_data.get_or_insert_with(NominatingData::default);
	nominating.validators = validators;
	nominating.submitted_in = received.submitted_in;

	let subtitle = format!(
		"{}: {} added, {} removed",
		account.display_name(),
		added.len(),
		removed.len()
	);

	Ok(Decision::Emit(Change {
		who: account_who(&account),
		observed,
		title: "Nominations".to_string(),
		subtitle,
		data,
		account: Some(account),
	}))
}
