//! Client pool for chain query clients.
//!
//! Holds one client per chain behind an `RwLock` so callbacks running
//! concurrently can share them. Clients are registered once at startup by the
//! code owning the RPC connections.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;

use crate::{
	models::ChainId,
	services::blockchain::{BlockChainError, ChainQueryClient},
};

/// Shared registry of chain clients indexed by chain
#[derive(Clone, Default)]
pub struct ClientPool {
	clients: Arc<RwLock<HashMap<ChainId, Arc<dyn ChainQueryClient>>>>,
}

impl ClientPool {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a client under the chain it reports, replacing any previous one
	pub async fn register(&self, client: Arc<dyn ChainQueryClient>) {
		let chain = client.chain();
		self.clients.write().await.insert(chain, client);
	}

	/// Returns the client of a chain
	pub async fn get(&self, chain: ChainId) -> Result<Arc<dyn ChainQueryClient>, BlockChainError> {
		self.clients
			.read()
			.await
			.get(&chain)
			.cloned()
			.ok_or_else(|| BlockChainError::client_not_found(chain))
	}

	/// Drops the client of a chain, e.g. after its connection was closed
	pub async fn remove(&self, chain: ChainId) -> Option<Arc<dyn ChainQueryClient>> {
		self.clients.write().await.remove(&chain)
	}

	pub async fn chains(&self) -> Vec<ChainId> {
		let mut chains: Vec<ChainId> = self.clients.read().await.keys().copied().collect();
		chains.sort();
		chains
	}
}
