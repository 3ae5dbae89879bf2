//! Change detection between a new observation and the cached one.
//!
//! Each task kind is compared in the way that matches its data: amounts and
//! slots exactly, timestamps with a hysteresis buffer, pool records field by
//! field, and validator or nomination lists as sets.

use crate::{
	models::{
		CommissionChangeRate, ObservedValue, PoolCommission, PoolCommissionCurrent, PoolRoles,
		TaskAction, ValidatorCommission,
	},
	utils::constants::DEFAULT_TIMESTAMP_BUFFER,
};

/// How observations of a task kind are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
	Exact,
	/// Equal when the difference is below the buffer
	Hysteresis(u64),
	/// Explicit field comparators
	Structural,
	/// Order insensitive list comparison
	Set,
}

/// Decides whether an observation is a change worth reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EqualityPolicy {
	timestamp_buffer: u64,
}

impl Default for EqualityPolicy {
	fn default() -> Self {
		Self::new(DEFAULT_TIMESTAMP_BUFFER)
	}
}

impl EqualityPolicy {
	pub fn new(timestamp_buffer: u64) -> Self {
		Self { timestamp_buffer }
	}

	pub fn comparison(&self, action: TaskAction) -> Comparison {
		match action {
			TaskAction::ChainTimestamp => Comparison::Hysteresis(self.timestamp_buffer),
			TaskAction::PoolRoles | TaskAction::PoolCommission => Comparison::Structural,
			TaskAction::NominatingCommission | TaskAction::NominatingNominations => {
				Comparison::Set
			}
			_ => Comparison::Exact,
		}
	}

	/// Returns true when `observed` carries no change relative to `cached`
	///
	/// Nothing cached, or a cached value of another kind, always counts as a change.
	pub fn unchanged(
		&self,
		action: TaskAction,
		observed: &ObservedValue,
		cached: Option<&ObservedValue>,
	) -> bool {
		let Some(cached) = cached else {
			return false;
		};

		match (self.comparison(action), observed, cached) {
			(Comparison::Hysteresis(buffer), ObservedValue::Timestamp(a), ObservedValue::Timestamp(b)) => {
				a.abs_diff(*b) < buffer
			}
			(Comparison::Structural, ObservedValue::PoolRoles(a), ObservedValue::PoolRoles(b)) => {
				pool_roles_equal(a, b)
			}
			(
				Comparison::Structural,
				ObservedValue::PoolCommission(a),
				ObservedValue::PoolCommission(b),
			) => pool_commission_equal(a, b),
			(Comparison::Set, ObservedValue::Validators(a), ObservedValue::Validators(b)) => {
				validators_equal(a, b)
			}
			(Comparison::Set, ObservedValue::Targets(a), ObservedValue::Targets(b)) => {
				set_equal(a, b, |target| target.clone())
			}
			(Comparison::Exact, observed, cached) => observed == cached,
			_ => false,
		}
	}
}

/// Order insensitive equality of two lists
///
/// Both sides are sorted by `key` and compared pairwise, so the result does
/// not depend on argument order.
pub fn set_equal<T, K, F>(a: &[T], b: &[T], key: F) -> bool
where
	T: PartialEq,
	K: Ord,
	F: Fn(&T) -> K,
{
	if a.len() != b.len() {
		return false;
	}

	let mut left: Vec<&T> = a.iter().collect();
	let mut right: Vec<&T> = b.iter().collect();
	left.sort_by_key(|item| key(item));
	right.sort_by_key(|item| key(item));

	left.iter().zip(right.iter()).all(|(l, r)| l == r)
}

pub fn validators_equal(a: &[ValidatorCommission], b: &[ValidatorCommission]) -> bool {
	set_equal(a, b, |validator| {
		(validator.validator_id.clone(), validator.commission)
	})
}

pub fn pool_roles_equal(a: &PoolRoles, b: &PoolRoles) -> bool {
	a.depositor == b.depositor
		&& a.root == b.root
		&& a.nominator == b.nominator
		&& a.bouncer == b.bouncer
}

pub fn pool_commission_equal(a: &PoolCommission, b: &PoolCommission) -> bool {
	current_equal(a.current.as_ref(), b.current.as_ref())
		&& a.max.map(|rate| rate.perbill()) == b.max.map(|rate| rate.perbill())
		&& change_rate_equal(a.change_rate.as_ref(), b.change_rate.as_ref())
		&& a.throttle_from == b.throttle_from
}

fn current_equal(a: Option<&PoolCommissionCurrent>, b: Option<&PoolCommissionCurrent>) -> bool {
	match (a, b) {
		(Some(a), Some(b)) => a.rate.perbill() == b.rate.perbill() && a.payee == b.payee,
		(None, None) => true,
		_ => false,
	}
}

fn change_rate_equal(a: Option<&CommissionChangeRate>, b: Option<&CommissionChangeRate>) -> bool {
	match (a, b) {
		(Some(a), Some(b)) => {
			a.max_increase.perbill() == b.max_increase.perbill() && a.min_delay == b.min_delay
		}
		(None, None) => true,
		_ => false,
	}
}
