//! Blockchain error types and handling.
//!
//! This module provides the error type for node operations. Errors are split into
//! two classes that the poll loop treats differently: connection-class errors (the
//! node is unreachable or unhealthy) trigger a backoff and reconnect, while
//! fetch-class errors (malformed or missing data, timeouts) are retried on the next
//! iteration without reconnecting.

use crate::services::blockwatcher::BlockWatcherError;

use log::error;

/// Represents possible errors that can occur during blockchain operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockChainError {
	/// Errors related to network connectivity issues
	ConnectionError(String),

	/// Errors related to malformed requests or invalid responses
	RequestError(String),

	/// When a requested block cannot be found on the blockchain
	///
	/// Contains the identifier of the block that was not found
	BlockNotFound(String),

	/// A single request took longer than the configured timeout
	TimeoutError(String),

	/// Internal errors within the blockchain client
	InternalError(String),
}

impl BlockChainError {
	/// Formats the error message based on the error type
	fn format_message(&self) -> String {
		match self {
			Self::ConnectionError(msg) => format!("Connection error: {}", msg),
			Self::RequestError(msg) => format!("Request error: {}", msg),
			Self::BlockNotFound(id) => format!("Block not found: {}", id),
			Self::TimeoutError(msg) => format!("Timeout error: {}", msg),
			Self::InternalError(msg) => format!("Internal error: {}", msg),
		}
	}

	/// Creates a new connection error with logging
	pub fn connection_error(msg: impl Into<String>) -> Self {
		let error = Self::ConnectionError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new request error with logging
	pub fn request_error(msg: impl Into<String>) -> Self {
		let error = Self::RequestError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new block not found error with logging
	pub fn block_not_found(id: impl std::fmt::Display) -> Self {
		let error = Self::BlockNotFound(id.to_string());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new timeout error with logging
	pub fn timeout_error(msg: impl Into<String>) -> Self {
		let error = Self::TimeoutError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new internal error with logging
	pub fn internal_error(msg: impl Into<String>) -> Self {
		let error = Self::InternalError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Whether the error means the node itself is unreachable or unhealthy
	pub fn is_connection_error(&self) -> bool {
		matches!(self, Self::ConnectionError(_))
	}
}

// Standard error trait implementations
impl std::fmt::Display for BlockChainError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl std::error::Error for BlockChainError {}

/// Conversion from BlockChainError to BlockWatcherError
impl From<BlockChainError> for BlockWatcherError {
	fn from(err: BlockChainError) -> Self {
		if err.is_connection_error() {
			BlockWatcherError::connect_error(err.to_string())
		} else {
			BlockWatcherError::fetch_error(err.to_string())
		}
	}
}
