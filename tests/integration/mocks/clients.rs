//! Mock implementation of the node client.

use alloy::primitives::B256;
use async_trait::async_trait;
use buy_alert_monitor::{
	models::{Block, BlockId},
	services::blockchain::{BlockChainClient, BlockChainError},
};
use mockall::mock;

mock! {
	/// Mock node client.
	///
	/// Simulates node responses without network calls.
	pub BlockChainClient {}

	#[async_trait]
	impl BlockChainClient for BlockChainClient {
		async fn is_connected(&self) -> bool;
		async fn get_latest_block_number(&self) -> Result<u64, BlockChainError>;
		async fn get_block(&self, id: BlockId) -> Result<Block, BlockChainError>;
		async fn new_block_filter(&self) -> Result<String, BlockChainError>;
		async fn get_filter_changes(&self, filter_id: &str) -> Result<Vec<B256>, BlockChainError>;
	}
}
