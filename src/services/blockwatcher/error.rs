//! Block watcher error types and handling.
//!
//! Provides error types for the poll loop. The variant decides the recovery path:
//! connect errors back off and reconnect, fetch and cursor errors retry the same
//! height after the poll interval.

use log::error;
use std::{error::Error, fmt};

/// Represents possible errors during block watching operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockWatcherError {
	/// The node is unreachable or lost our filter
	ConnectError(String),
	/// A single request failed or returned unusable data
	FetchError(String),
	/// A block did not continue the cursor
	CursorError(String),
}

impl BlockWatcherError {
	fn format_message(&self) -> String {
		match self {
			Self::ConnectError(msg) => format!("Connect error: {}", msg),
			Self::FetchError(msg) => format!("Fetch error: {}", msg),
			Self::CursorError(msg) => format!("Cursor error: {}", msg),
		}
	}

	/// Creates a new connect error with logging
	pub fn connect_error(msg: impl Into<String>) -> Self {
		let error = Self::ConnectError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new fetch error with logging
	pub fn fetch_error(msg: impl Into<String>) -> Self {
		let error = Self::FetchError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new cursor error with logging
	pub fn cursor_error(msg: impl Into<String>) -> Self {
		let error = Self::CursorError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Whether recovery requires a reconnect
	pub fn requires_reconnect(&self) -> bool {
		matches!(self, Self::ConnectError(_))
	}
}

impl fmt::Display for BlockWatcherError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for BlockWatcherError {}
