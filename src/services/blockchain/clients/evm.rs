//! EVM-compatible blockchain client implementation.
//!
//! Translates the block watcher's node operations into Ethereum JSON-RPC calls.

use alloy::primitives::B256;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

use crate::{
	models::{Block, BlockId},
	services::blockchain::{
		client::BlockChainClient,
		transports::{BlockchainTransport, HttpTransportClient},
		BlockChainError,
	},
	utils::HttpRetryConfig,
};

/// Client implementation for Ethereum Virtual Machine (EVM) compatible blockchains
#[derive(Debug)]
pub struct EvmClient<T: BlockchainTransport> {
	/// The underlying JSON-RPC transport
	transport: T,
}

impl<T: BlockchainTransport> EvmClient<T> {
	/// Creates a new EVM client instance with a specific transport client
	pub fn new_with_transport(transport: T) -> Self {
		Self { transport }
	}

	/// Sends a request and returns its `result` field
	async fn request<P>(&self, method: &str, params: Option<P>) -> Result<Value, BlockChainError>
	where
		P: Into<Value> + Send + Clone + serde::Serialize,
	{
		let mut response = self.transport.send_raw_request(method, params).await?;
		response
			.get_mut("result")
			.map(Value::take)
			.ok_or_else(|| BlockChainError::request_error(format!("{}: missing 'result' field", method)))
	}
}

impl EvmClient<HttpTransportClient> {
	/// Creates a new EVM client connected to `url`
	///
	/// # Arguments
	/// * `url` - http(s) JSON-RPC endpoint
	/// * `timeout` - Upper bound for a single request
	///
	/// # Returns
	/// * `Result<Self, BlockChainError>` - New client instance or connection error
	pub async fn new(url: &str, timeout: Duration) -> Result<Self, BlockChainError> {
		let transport = HttpTransportClient::connect(url, timeout, &HttpRetryConfig::default()).await?;
		Ok(Self::new_with_transport(transport))
	}
}

fn parse_quantity(method: &str, value: &Value) -> Result<u64, BlockChainError> {
	let hex_str = value
		.as_str()
		.ok_or_else(|| BlockChainError::request_error(format!("{}: result is not a string", method)))?;

	u64::from_str_radix(hex_str.trim_start_matches("0x"), 16).map_err(|e| {
		BlockChainError::request_error(format!("{}: failed to parse quantity: {}", method, e))
	})
}

#[async_trait]
impl<T: BlockchainTransport> BlockChainClient for EvmClient<T> {
	async fn is_connected(&self) -> bool {
		self.transport
			.send_raw_request("net_version", Some(json!([])))
			.await
			.is_ok()
	}

	async fn get_latest_block_number(&self) -> Result<u64, BlockChainError> {
		let result = self.request::<Value>("eth_blockNumber", None).await?;
		parse_quantity("eth_blockNumber", &result)
	}

	async fn get_block(&self, id: BlockId) -> Result<Block, BlockChainError> {
		let (method, params) = match id {
			BlockId::Number(number) => (
				"eth_getBlockByNumber",
				json!([format!("0x{:x}", number), true]),
			),
			BlockId::Hash(hash) => ("eth_getBlockByHash", json!([format!("{:#x}", hash), true])),
		};

		let block_data = self.request(method, Some(params)).await?;
		if block_data.is_null() {
			return Err(BlockChainError::block_not_found(id));
		}

		serde_json::from_value(block_data)
			.map_err(|e| BlockChainError::request_error(format!("Failed to parse block {}: {}", id, e)))
	}

	async fn new_block_filter(&self) -> Result<String, BlockChainError> {
		let result = self.request::<Value>("eth_newBlockFilter", None).await?;
		result
			.as_str()
			.map(str::to_string)
			.ok_or_else(|| BlockChainError::request_error("eth_newBlockFilter: result is not a string"))
	}

	async fn get_filter_changes(&self, filter_id: &str) -> Result<Vec<B256>, BlockChainError> {
		let result = self
			.request("eth_getFilterChanges", Some(json!([filter_id])))
			.await?;
		serde_json::from_value(result).map_err(|e| {
			BlockChainError::request_error(format!("Failed to parse filter changes: {}", e))
		})
	}
}
