//! Core blockchain client interface.
//!
//! This module defines the node operations the block watcher depends on. Concrete
//! clients translate them into the node's wire protocol.

use alloy::primitives::B256;
use async_trait::async_trait;

use crate::{
	models::{Block, BlockId},
	services::blockchain::BlockChainError,
};

/// Defines the node interface used by the block watcher
#[async_trait]
pub trait BlockChainClient: Send + Sync {
	/// Cheap liveness check against the node
	async fn is_connected(&self) -> bool;

	/// Retrieves the latest block number from the blockchain
	///
	/// # Returns
	/// * `Result<u64, BlockChainError>` - The latest block number or an error
	async fn get_latest_block_number(&self) -> Result<u64, BlockChainError>;

	/// Retrieves one block with full transaction bodies
	///
	/// # Arguments
	/// * `id` - Height or hash of the block
	///
	/// # Returns
	/// * `Result<Block, BlockChainError>` - The block, `BlockNotFound` when the node
	///   does not know it yet
	async fn get_block(&self, id: BlockId) -> Result<Block, BlockChainError>;

	/// Installs a node-side filter reporting new block hashes
	///
	/// # Returns
	/// * `Result<String, BlockChainError>` - The filter identifier
	async fn new_block_filter(&self) -> Result<String, BlockChainError>;

	/// Returns the block hashes reported by a filter since the previous poll
	///
	/// # Arguments
	/// * `filter_id` - Identifier returned by `new_block_filter`
	async fn get_filter_changes(&self, filter_id: &str) -> Result<Vec<B256>, BlockChainError>;
}
