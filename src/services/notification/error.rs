//! Notification error types and handling.
//!
//! Provides error types for notification-related operations,
//! including network issues and messaging API rejections.

use log::error;
use std::{error::Error, fmt};

/// Represents possible errors during notification operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
	/// The request never produced a response (DNS, TLS, timeout, reset)
	NetworkError(String),
	/// The messaging API answered but rejected the request
	ApiError(String),
	/// Configuration-related errors
	ConfigError(String),
}

impl NotificationError {
	/// Formats the error message based on the error type
	fn format_message(&self) -> String {
		match self {
			Self::NetworkError(msg) => format!("Network error: {}", msg),
			Self::ApiError(msg) => format!("API error: {}", msg),
			Self::ConfigError(msg) => format!("Config error: {}", msg),
		}
	}

	/// Creates a new network error with logging
	pub fn network_error(msg: impl Into<String>) -> Self {
		let error = Self::NetworkError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new API error with logging
	pub fn api_error(msg: impl Into<String>) -> Self {
		let error = Self::ApiError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new configuration error with logging
	pub fn config_error(msg: impl Into<String>) -> Self {
		let error = Self::ConfigError(msg.into());
		error!("{}", error.format_message());
		error
	}
}

impl From<reqwest::Error> for NotificationError {
	fn from(error: reqwest::Error) -> Self {
		// Strip the URL so the bot token never ends up in logs
		Self::network_error(error.without_url().to_string())
	}
}

impl fmt::Display for NotificationError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for NotificationError {}
