use account_monitor::models::{Commission, ValidatorCommission};
use proptest::prelude::*;

const MAX_VALIDATORS: usize = 16;

pub fn validator_id_strategy() -> impl Strategy<Value = String> {
	"V[0-9]{1,3}".prop_map(|id| id.to_string())
}

pub fn commission_strategy() -> impl Strategy<Value = Commission> {
	(0u32..=1_000_000_000).prop_map(Commission::from_perbill)
}

pub fn validators_strategy() -> impl Strategy<Value = Vec<ValidatorCommission>> {
	prop::collection::vec(
		(validator_id_strategy(), commission_strategy()).prop_map(|(validator_id, commission)| {
			ValidatorCommission {
				validator_id,
				commission,
			}
		}),
		0..MAX_VALIDATORS,
	)
}

pub fn targets_strategy() -> impl Strategy<Value = Vec<String>> {
	prop::collection::vec(validator_id_strategy(), 0..MAX_VALIDATORS)
}
