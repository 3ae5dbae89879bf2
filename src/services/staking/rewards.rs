//! Unclaimed nominator rewards over a bounded window of past eras.
//!
//! Shares are accumulated in 256-bit integers scaled by 10^18 and truncated to
//! planck once, when the total is read. Commission is applied as an exact
//! parts-per-billion rational.

use alloy::primitives::U256;
use serde::Serialize;

use crate::{
	models::{Amount, Commission, EraIndex},
	services::{
		blockchain::ChainQueryClient,
		staking::{ExposureResolver, StakingError},
	},
	utils::{
		constants::{DEFAULT_REWARD_WINDOW_ERAS, MAX_REWARD_WINDOW_ERAS},
		parsing::pow10,
	},
};

/// Fixed point scale of accumulated shares
const SHARE_DECIMALS: u32 = 18;

fn share_scale() -> U256 {
	pow10(SHARE_DECIMALS)
}

/// Inputs of one validator's payout split for one era
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareInput {
	pub era_payout: Amount,
	pub validator_points: u32,
	pub total_points: u32,
	pub commission: Commission,
	pub account_stake: Amount,
	pub validator_total: Amount,
	pub is_validator: bool,
}

/// Scaled share of the account in one validator's payout
///
/// `available = payout * points / total_points`, `cut = commission * available`
/// and the account gets `(available - cut) * stake / total`, plus `cut` when it
/// is the validator. Zero total points or zero total stake yield zero.
///
/// # Errors
/// Returns [`StakingError::Overflow`] when an intermediate product does not
/// fit in 256 bits.
pub fn validator_share(input: &ShareInput) -> Result<U256, StakingError> {
	if input.total_points == 0 || input.validator_total.is_zero() {
		return Ok(U256::ZERO);
	}
	let overflow = |step: &str| {
		StakingError::Overflow(format!(
			"{} of payout {} with stake {}",
			step, input.era_payout, input.account_stake
		))
	};

	let available = input
		.era_payout
		.as_u256()
		.checked_mul(share_scale())
		.and_then(|scaled| scaled.checked_mul(U256::from(input.validator_points)))
		.ok_or_else(|| overflow("validator payout"))?
		/ U256::from(input.total_points);
	let cut = input
		.commission
		.checked_mul_floor(available)
		.ok_or_else(|| overflow("commission"))?;
	let distributed = (available - cut)
		.checked_mul(input.account_stake.as_u256())
		.ok_or_else(|| overflow("nominator share"))?
		/ input.validator_total.as_u256();

	if input.is_validator {
		distributed
			.checked_add(cut)
			.ok_or_else(|| overflow("validator share"))
	} else {
		Ok(distributed)
	}
}

/// Truncates a scaled share to planck
pub fn to_planck(scaled: U256) -> Amount {
	Amount::new(scaled / share_scale())
}

/// Reward of one era
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EraReward {
	pub era: EraIndex,
	pub amount: Amount,
}

/// Unclaimed rewards of an account over the window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewardSummary {
	pub eras: Vec<EraReward>,
	scaled_total: U256,
}

impl RewardSummary {
	/// Sum of every era, truncated once
	pub fn total(&self) -> Amount {
		to_planck(self.scaled_total)
	}

	pub fn is_zero(&self) -> bool {
		self.total().is_zero()
	}
}

/// Computes unclaimed rewards for the eras preceding the active one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardAccumulator {
	window_eras: u32,
}

impl Default for RewardAccumulator {
	fn default() -> Self {
		Self {
			window_eras: DEFAULT_REWARD_WINDOW_ERAS,
		}
	}
}

impl RewardAccumulator {
	pub fn new(window_eras: u32) -> Result<Self, StakingError> {
		if window_eras == 0 || window_eras > MAX_REWARD_WINDOW_ERAS {
			return Err(StakingError::InvalidConfig(format!(
				"reward window must be within 1..={} eras, got {}",
				MAX_REWARD_WINDOW_ERAS, window_eras
			)));
		}
		Ok(Self { window_eras })
	}

	pub fn window_eras(&self) -> u32 {
		self.window_eras
	}

	/// Eras scanned for an active era, newest first
	///
	/// Runs from `active_era - 1` down to `max(active_era - window, 1)`.
	pub fn window(&self, active_era: EraIndex) -> Vec<EraIndex> {
		let Some(newest) = active_era.checked_sub(1) else {
			return Vec::new();
		};
		let oldest = newest.saturating_sub(self.window_eras - 1).max(1);
		(oldest..=newest).rev().collect()
	}

	/// Unclaimed rewards of `account` as of `active_era`
	///
	/// Any failed query aborts the computation; no partial sum is returned.
	pub async fn unclaimed_rewards(
		&self,
		client: &dyn ChainQueryClient,
		resolver: &ExposureResolver,
		active_era: EraIndex,
		account: &str,
	) -> Result<RewardSummary, StakingError> {
		let mut summary = RewardSummary::default();

		for era in self.window(active_era) {
			let Some(era_payout) = client.eras_validator_reward(era).await? else {
				tracing::debug!(era, "no payout recorded yet");
				continue;
			};

			let exposures = resolver.era_exposure(client, era, account).await?;
			if exposures.is_empty() {
				continue;
			}

			let points = client.eras_reward_points(era).await?;
			let mut era_total = U256::ZERO;

			for exposure in exposures {
				if client.rewards_claimed(era, &exposure.validator_id).await? {
					continue;
				}
				let prefs = client
					.eras_validator_prefs(era, &exposure.validator_id)
					.await?;

				let share = validator_share(&ShareInput {
					era_payout,
					validator_points: points.points_of(&exposure.validator_id),
					total_points: points.total,
					commission: prefs.commission,
					account_stake: exposure.account_stake,
					validator_total: exposure.validator_total,
					is_validator: exposure.is_validator,
				})?;
				era_total = era_total
					.checked_add(share)
					.ok_or_else(|| StakingError::Overflow(format!("era {} total", era)))?;
			}

			if !era_total.is_zero() {
				summary.eras.push(EraReward {
					era,
					amount: to_planck(era_total),
				});
				summary.scaled_total = summary
					.scaled_total
					.checked_add(era_total)
					.ok_or_else(|| StakingError::Overflow("window total".to_string()))?;
			}
		}

		Ok(summary)
	}
}
