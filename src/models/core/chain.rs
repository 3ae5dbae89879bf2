//! Supported chains and their static properties.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Era index as reported by the staking pallet
pub type EraIndex = u32;

/// Chains an account or task can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum ChainId {
	#[serde(rename = "Polkadot Relay")]
	Polkadot,
	#[serde(rename = "Kusama Relay")]
	Kusama,
	#[serde(rename = "Westend Relay")]
	Westend,
	#[serde(rename = "Polkadot Asset Hub")]
	PolkadotAssetHub,
	#[serde(rename = "Kusama Asset Hub")]
	KusamaAssetHub,
	#[serde(rename = "Westend Asset Hub")]
	WestendAssetHub,
}

impl ChainId {
	/// Every supported chain, relay chains first
	pub const ALL: [ChainId; 6] = [
		ChainId::Polkadot,
		ChainId::Kusama,
		ChainId::Westend,
		ChainId::PolkadotAssetHub,
		ChainId::KusamaAssetHub,
		ChainId::WestendAssetHub,
	];

	/// Number of decimals of the native token
	pub fn decimals(&self) -> u32 {
		match self {
			ChainId::Polkadot | ChainId::PolkadotAssetHub => 10,
			_ => 12,
		}
	}

	/// Native token symbol
	pub fn currency(&self) -> &'static str {
		match self {
			ChainId::Polkadot | ChainId::PolkadotAssetHub => "DOT",
			ChainId::Kusama | ChainId::KusamaAssetHub => "KSM",
			ChainId::Westend | ChainId::WestendAssetHub => "WND",
		}
	}

	/// Human readable name, identical to the serialized form
	pub fn name(&self) -> &'static str {
		match self {
			ChainId::Polkadot => "Polkadot Relay",
			ChainId::Kusama => "Kusama Relay",
			ChainId::Westend => "Westend Relay",
			ChainId::PolkadotAssetHub => "Polkadot Asset Hub",
			ChainId::KusamaAssetHub => "Kusama Asset Hub",
			ChainId::WestendAssetHub => "Westend Asset Hub",
		}
	}
}

impl fmt::Display for ChainId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Generation of the staking storage a chain exposes
///
/// `Legacy` chains store one clipped exposure per validator and era, `Paged`
/// chains split nominator stakes into an overview plus numbered pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StakingApi {
	Legacy,
	#[default]
	Paged,
}
