//! HTTP transport implementation for blockchain interactions.
//!
//! Sends JSON-RPC requests to a single node endpoint through a client with retry
//! middleware. Transient HTTP failures are retried inside the middleware; whatever
//! still fails is classified for the caller:
//!
//! - transport failures and non-success HTTP statuses become connection errors
//! - request timeouts become timeout errors
//! - JSON-RPC `error` objects and undecodable bodies become request errors

use std::{
	sync::atomic::{AtomicU64, Ordering},
	time::Duration,
};

use reqwest::Client;
use reqwest_middleware::ClientWithMiddleware;
use serde::Serialize;
use serde_json::{json, Value};
use url::Url;

use crate::{
	services::blockchain::{transports::BlockchainTransport, BlockChainError},
	utils::{create_retryable_http_client, HttpRetryConfig},
};

/// JSON-RPC client bound to one node URL
#[derive(Debug)]
pub struct HttpTransportClient {
	/// Retrying HTTP client for network requests
	client: ClientWithMiddleware,
	/// Validated node endpoint
	url: Url,
	/// Monotonic JSON-RPC request id
	next_id: AtomicU64,
}

impl HttpTransportClient {
	/// Creates a transport without contacting the node
	///
	/// # Arguments
	/// * `url` - http(s) endpoint of the node
	/// * `timeout` - Upper bound for a single HTTP request
	/// * `retry_config` - Middleware retry settings
	pub fn new(
		url: &str,
		timeout: Duration,
		retry_config: &HttpRetryConfig,
	) -> Result<Self, BlockChainError> {
		let url = Url::parse(url)
			.map_err(|e| BlockChainError::internal_error(format!("Invalid node URL: {}", e)))?;
		if url.scheme() != "http" && url.scheme() != "https" {
			return Err(BlockChainError::internal_error(format!(
				"Unsupported node URL scheme: {}",
				url.scheme()
			)));
		}

		let base_client = Client::builder()
			.timeout(timeout)
			.connect_timeout(timeout)
			.build()
			.map_err(|e| {
				BlockChainError::internal_error(format!("Failed to build HTTP client: {}", e))
			})?;

		Ok(Self {
			client: create_retryable_http_client(retry_config, base_client),
			url,
			next_id: AtomicU64::new(1),
		})
	}

	/// Creates a transport and verifies the node answers `net_version`
	///
	/// # Returns
	/// * `Result<Self, BlockChainError>` - The transport, or a connection error when the
	///   node is unreachable
	pub async fn connect(
		url: &str,
		timeout: Duration,
		retry_config: &HttpRetryConfig,
	) -> Result<Self, BlockChainError> {
		let transport = Self::new(url, timeout, retry_config)?;
		transport.test_connection().await?;
		Ok(transport)
	}

	/// Sends `net_version` and expects a successful JSON-RPC answer
	pub async fn test_connection(&self) -> Result<(), BlockChainError> {
		self.send_raw_request("net_version", Some(json!([])))
			.await
			.map(|_| ())
			.map_err(|e| BlockChainError::connection_error(e.to_string()))
	}

	fn classify_send_error(&self, method: &str, err: reqwest_middleware::Error) -> BlockChainError {
		match err {
			reqwest_middleware::Error::Reqwest(e) if e.is_timeout() => {
				BlockChainError::timeout_error(format!("{} timed out: {}", method, e))
			}
			e => BlockChainError::connection_error(format!(
				"{} request to {} failed: {}",
				method,
				self.url.host_str().unwrap_or("node"),
				e
			)),
		}
	}
}

#[async_trait::async_trait]
impl BlockchainTransport for HttpTransportClient {
	fn url(&self) -> &str {
		self.url.as_str()
	}

	async fn send_raw_request<P>(
		&self,
		method: &str,
		params: Option<P>,
	) -> Result<Value, BlockChainError>
	where
		P: Into<Value> + Send + Clone + Serialize,
	{
		let id = self.next_id.fetch_add(1, Ordering::Relaxed);
		let request_body = self.build_request(id, method, params);

		let response = self
			.client
			.post(self.url.clone())
			.header("Content-Type", "application/json")
			.body(request_body.to_string())
			.send()
			.await
			.map_err(|e| self.classify_send_error(method, e))?;

		let status = response.status();
		if !status.is_success() {
			return Err(BlockChainError::connection_error(format!(
				"{} returned HTTP {}",
				method, status
			)));
		}

		let json_response: Value = response.json().await.map_err(|e| {
			if e.is_timeout() {
				BlockChainError::timeout_error(format!("{} timed out: {}", method, e))
			} else {
				BlockChainError::request_error(format!("Failed to decode {} response: {}", method, e))
			}
		})?;

		if let Some(error) = json_response.get("error").filter(|e| !e.is_null()) {
			let message = error
				.get("message")
				.and_then(|m| m.as_str())
				.unwrap_or("unknown error");
			return Err(BlockChainError::request_error(format!(
				"{} rejected by node: {}",
				method, message
			)));
		}

		Ok(json_response)
	}
}
