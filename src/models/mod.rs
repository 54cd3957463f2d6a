//! Domain models and data structures for the buy alert monitor.
//!
//! This module contains all the core data structures used throughout the application:
//!
//! - `blockchain`: Block and transaction types returned by the node
//! - `config`: Configuration loading and validation
//! - `core`: Core domain models (MatchCriteria, AlertEvent, LoopId, etc.)

mod blockchain;
mod config;
mod core;

pub use blockchain::{Block, BlockId, Transaction};

pub use config::{
	AppConfig, BrandingConfig, ConfigError, ConfigLoader, ControlConfig, MetricsConfig, ScanMode,
	WatcherConfig,
};

pub use core::{
	to_display_value, AlertEvent, ControlStatus, LinkButton, LoopExit, LoopId, MatchCriteria,
	NotificationContent, DISPLAY_DECIMALS,
};
