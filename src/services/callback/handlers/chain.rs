//! Chain wide tasks. They carry no account state.

use serde_json::json;

use crate::{
	models::{ChainValue, EventWho, ObservedValue},
	services::{
		cache::ApiCallEntry,
		callback::{
			dispatcher::{is_unchanged, unexpected, Change, Decision},
			CallbackContext, CallbackError,
		},
	},
};

fn chain_change(entry: &ApiCallEntry, observed: ObservedValue, title: &str, value: u64) -> Change {
	let chain = entry.task.chain;
	let key = match observed {
		ObservedValue::Slot(_) => "slot",
		_ => "timestamp",
	};
	Change {
		account: None,
		who: EventWho::Chain { chain },
		observed,
		title: title.to_string(),
		subtitle: format!("{}: {}", chain, value),
		data: json!({ key: value }),
	}
}

/// `timestamp.now`, reported once it moved by at least the buffer
pub(crate) async fn timestamp(
	ctx: &CallbackContext,
	entry: &ApiCallEntry,
	value: ChainValue,
	one_shot: bool,
) -> Result<Decision, CallbackError> {
	let ChainValue::Timestamp(now) = value else {
		return Err(unexpected(entry, &value));
	};

	let observed = ObservedValue::Timestamp(now);
	if is_unchanged(ctx, entry, &observed, None, one_shot).await {
		return Ok(Decision::Unchanged);
	}
	Ok(Decision::Emit(chain_change(entry, observed, "Timestamp", now)))
}

/// `babe.currentSlot`
pub(crate) async fn current_slot(
	ctx: &CallbackContext,
	entry: &ApiCallEntry,
	value: ChainValue,
	one_shot: bool,
) -> Result<Decision, CallbackError> {
	let ChainValue::CurrentSlot(slot) = value else {
		return Err(unexpected(entry, &value));
	};

	let observed = ObservedValue::Slot(slot);
	if is_unchanged(ctx, entry, &observed, None, one_shot).await {
		return Ok(Decision::Unchanged);
	}
	Ok(Decision::Emit(chain_change(entry, observed, "Current Slot", slot)))
}
