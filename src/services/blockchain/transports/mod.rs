//! Network transport implementations for blockchain clients.
//!
//! Provides the JSON-RPC over HTTP transport used by the EVM client.

mod http;

use crate::services::blockchain::BlockChainError;
pub use http::HttpTransportClient;
use serde::Serialize;
use serde_json::{json, Value};

/// Base trait for blockchain transport clients
#[async_trait::async_trait]
pub trait BlockchainTransport: Send + Sync {
	/// Get the URL being used by the transport
	fn url(&self) -> &str;

	/// Send a raw JSON-RPC request and return the full response envelope
	async fn send_raw_request<P>(
		&self,
		method: &str,
		params: Option<P>,
	) -> Result<Value, BlockChainError>
	where
		P: Into<Value> + Send + Clone + Serialize;

	/// Builds the JSON-RPC 2.0 request body
	fn build_request<P>(&self, id: u64, method: &str, params: Option<P>) -> Value
	where
		P: Into<Value> + Send + Clone + Serialize,
	{
		json!({
			"jsonrpc": "2.0",
			"id": id,
			"method": method,
			"params": params.map(|p| p.into()).unwrap_or_else(|| json!([]))
		})
	}
}
