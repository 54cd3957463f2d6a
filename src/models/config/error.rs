//! Configuration error types.
//!
//! This module defines the error types that can occur while loading and
//! validating the service configuration. Every configuration error is fatal:
//! the service refuses to start and no loop is ever spawned.

use log::error;
use std::{error::Error, fmt};

/// Errors that can occur during configuration operations
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::enum_variant_names)]
pub enum ConfigError {
	/// A required setting is not present
	MissingError(String),

	/// Configuration validation failed
	ValidationError(String),

	/// A setting could not be parsed into its expected type
	ParseError(String),
}

impl ConfigError {
	/// Format the error message for display
	fn format_message(&self) -> String {
		match self {
			Self::MissingError(msg) => format!("Missing setting: {}", msg),
			Self::ValidationError(msg) => format!("Validation error: {}", msg),
			Self::ParseError(msg) => format!("Parse error: {}", msg),
		}
	}

	/// Create a new missing setting error and log it
	pub fn missing_error(key: impl Into<String>) -> Self {
		let error = Self::MissingError(key.into());
		error!("{}", error.format_message());
		error
	}

	/// Create a new validation error and log it
	pub fn validation_error(msg: impl Into<String>) -> Self {
		let error = Self::ValidationError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Create a new parse error and log it
	pub fn parse_error(msg: impl Into<String>) -> Self {
		let error = Self::ParseError(msg.into());
		error!("{}", error.format_message());
		error
	}
}

impl fmt::Display for ConfigError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for ConfigError {}
