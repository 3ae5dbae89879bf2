//! Loaders for imported accounts, subscription tasks and chain snapshots.

use crate::models::{config::ConfigLoader, Account, ChainSnapshot, SubscriptionTask};

impl ConfigLoader for Account {
	const DEFAULT_DIR: &'static str = "config/accounts";

	fn validate(&self) -> Result<(), String> {
		if self.address.trim().is_empty() {
			return Err("Account address must not be empty".to_string());
		}

		if let Some(nominating) = &self.nominating_data {
			if nominating.submitted_in > nominating.last_checked_era && nominating.last_checked_era != 0
			{
				return Err(format!(
					"Account {}: nominations submitted in era {} after last checked era {}",
					self.address, nominating.submitted_in, nominating.last_checked_era
				));
			}
		}

		Ok(())
	}
}

impl ConfigLoader for SubscriptionTask {
	const DEFAULT_DIR: &'static str = "config/tasks";

	fn validate(&self) -> Result<(), String> {
		SubscriptionTask::validate(self)
	}
}

impl ConfigLoader for ChainSnapshot {
	const DEFAULT_DIR: &'static str = "config/snapshots";

	fn validate(&self) -> Result<(), String> {
		if let Some((era, _)) = self.eras.iter().next_back() {
			if *era > self.active_era {
				return Err(format!(
					"Snapshot for {} has data for era {} beyond active era {}",
					self.chain, era, self.active_era
				));
			}
		}

		for (era, snapshot) in &self.eras {
			let individual: u64 = snapshot
				.reward_points
				.individual
				.values()
				.map(|points| u64::from(*points))
				.sum();
			if individual > u64::from(snapshot.reward_points.total) {
				return Err(format!(
					"Era {}: individual reward points exceed the era total",
					era
				));
			}
		}

		Ok(())
	}
}
