//! Configuration loading and validation.
//!
//! Settings come from the process environment (optionally seeded from a `.env`
//! file by the binary). They are read and validated once at startup.

mod app_config;
mod error;

pub use app_config::{
	AppConfig, BrandingConfig, ControlConfig, MetricsConfig, ScanMode, WatcherConfig,
};
pub use error::ConfigError;

/// Common interface for loading configuration from a key/value source
pub trait ConfigLoader: Sized {
	/// Loads and validates the configuration using `lookup` to resolve keys
	fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>;

	/// Validates cross-field constraints after loading
	fn validate(&self) -> Result<(), ConfigError>;

	/// Loads the configuration from the process environment
	fn load_from_env() -> Result<Self, ConfigError> {
		Self::load_with(|key| std::env::var(key).ok())
	}
}
