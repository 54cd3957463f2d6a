//! Service configuration read from environment variables.

use alloy::primitives::{address, utils::parse_units, utils::ParseUnits, Address, U256};
use std::{str::FromStr, time::Duration};
use url::Url;

use crate::models::{config::ConfigError, ConfigLoader, MatchCriteria};

const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
const DEFAULT_EXPLORER_TX_URL: &str = "https://bscscan.com/tx/";
const DEFAULT_EXPLORER_TOKEN_URL: &str = "https://bscscan.com/token/";
const DEFAULT_LOGO_URL: &str = "https://www.agamacoin.com/agama-logo-new.png";
const DEFAULT_TOKEN_ADDRESS: Address = address!("2119de8f257d27662991198389e15bf8d1f4ab24");
const DEFAULT_METRICS_ADDRESS: &str = "127.0.0.1:8081";
const DEFAULT_REMINDER_TEXT: &str = "⏰ *Reminder* ⏰\n\nBuy alerts are live! Every purchase \
	above the minimum is announced here as soon as it lands on-chain.";

/// How the poll loop discovers new blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
	/// Compare the node head with the cursor and walk every height in between
	#[default]
	Sequential,
	/// Poll a node-side new-block filter and fetch each reported block by hash
	BlockFilter,
}

impl FromStr for ScanMode {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"sequential" => Ok(ScanMode::Sequential),
			"block-filter" | "block_filter" | "filter" => Ok(ScanMode::BlockFilter),
			other => Err(ConfigError::parse_error(format!(
				"SCAN_MODE must be 'sequential' or 'block-filter', got '{}'",
				other
			))),
		}
	}
}

/// Timing and discovery settings of the block poll loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatcherConfig {
	/// Sleep between scans once the cursor has caught up with the head
	pub poll_interval: Duration,
	/// First delay before reconnecting after a connection failure
	pub reconnect_backoff: Duration,
	/// Upper bound for the reconnect delay (equal to the base for a fixed delay)
	pub reconnect_backoff_max: Duration,
	/// Upper bound for a single node request
	pub fetch_timeout: Duration,
	/// Maximum number of blocks processed before the head is queried again
	pub max_blocks_per_scan: Option<u64>,
	/// Block discovery strategy
	pub scan_mode: ScanMode,
}

impl Default for WatcherConfig {
	fn default() -> Self {
		Self {
			poll_interval: Duration::from_secs(5),
			reconnect_backoff: Duration::from_secs(15),
			reconnect_backoff_max: Duration::from_secs(15),
			fetch_timeout: Duration::from_secs(30),
			max_blocks_per_scan: None,
			scan_mode: ScanMode::Sequential,
		}
	}
}

/// Texts and links used when rendering notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandingConfig {
	pub token_name: String,
	pub token_symbol: String,
	pub logo_url: Option<String>,
	/// Explorer prefix, the transaction hash is appended to it
	pub explorer_tx_url: String,
	pub buy_url: Option<String>,
}

impl BrandingConfig {
	/// Explorer page of a token contract, used as the default buy link
	pub fn token_page_url(token: &Address) -> String {
		format!("{}{:#x}", DEFAULT_EXPLORER_TOKEN_URL, token)
	}
}

impl Default for BrandingConfig {
	fn default() -> Self {
		Self {
			token_name: "AgamaCoin".to_string(),
			token_symbol: "BNB".to_string(),
			logo_url: Some(DEFAULT_LOGO_URL.to_string()),
			explorer_tx_url: DEFAULT_EXPLORER_TX_URL.to_string(),
			buy_url: Some(Self::token_page_url(&DEFAULT_TOKEN_ADDRESS)),
		}
	}
}

/// Chat command surface settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlConfig {
	pub enabled: bool,
	/// Chats whose commands are obeyed
	pub chat_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsConfig {
	pub enabled: bool,
	pub address: String,
}

/// Complete configuration of the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
	pub telegram_bot_token: String,
	pub telegram_chat_id: String,
	pub telegram_api_url: String,
	pub node_rpc_url: String,
	pub criteria: MatchCriteria,
	pub base_unit_decimals: u8,
	pub watcher: WatcherConfig,
	pub reminder_interval: Duration,
	pub reminder_text: String,
	pub branding: BrandingConfig,
	pub control: ControlConfig,
	pub metrics: MetricsConfig,
	pub autostart_alerts: bool,
}

impl ConfigLoader for AppConfig {
	fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
		let required = |key: &str| get(key).ok_or_else(|| ConfigError::missing_error(key));

		let telegram_bot_token = required("TELEGRAM_BOT_TOKEN")?;
		let telegram_chat_id = required("TELEGRAM_CHAT_ID")?;
		let node_rpc_url = required("NODE_RPC_URL")?;

		let base_unit_decimals = match get("BASE_UNIT_DECIMALS") {
			Some(raw) => raw.parse::<u8>().map_err(|e| {
				ConfigError::parse_error(format!("BASE_UNIT_DECIMALS '{}': {}", raw, e))
			})?,
			None => 18,
		};

		let target_address = parse_address(&required("TARGET_ADDRESS")?)?;
		let min_value = match (get("MIN_VALUE_BASE_UNIT"), get("MIN_VALUE")) {
			(Some(raw), _) => U256::from_str_radix(&raw, 10).map_err(|e| {
				ConfigError::parse_error(format!("MIN_VALUE_BASE_UNIT '{}': {}", raw, e))
			})?,
			(None, Some(raw)) => parse_display_value(&raw, base_unit_decimals)?,
			(None, None) => return Err(ConfigError::missing_error("MIN_VALUE")),
		};

		let secs = |key: &str, default: u64| -> Result<Duration, ConfigError> {
			parse_u64(get(key), key, default).map(Duration::from_secs)
		};

		let reconnect_backoff = secs("RECONNECT_BACKOFF_SECONDS", 15)?;
		let watcher = WatcherConfig {
			poll_interval: secs("POLL_INTERVAL_SECONDS", 5)?,
			reconnect_backoff,
			reconnect_backoff_max: secs(
				"RECONNECT_BACKOFF_MAX_SECONDS",
				reconnect_backoff.as_secs(),
			)?,
			fetch_timeout: secs("FETCH_TIMEOUT_SECONDS", 30)?,
			max_blocks_per_scan: get("MAX_BLOCKS_PER_SCAN")
				.map(|raw| parse_u64(Some(raw), "MAX_BLOCKS_PER_SCAN", 0))
				.transpose()?,
			scan_mode: get("SCAN_MODE")
				.map(|raw| raw.parse::<ScanMode>())
				.transpose()?
				.unwrap_or_default(),
		};

		let defaults = BrandingConfig::default();
		let branding = BrandingConfig {
			token_name: get("TOKEN_NAME").unwrap_or(defaults.token_name),
			token_symbol: get("TOKEN_SYMBOL").unwrap_or(defaults.token_symbol),
			logo_url: get("TOKEN_LOGO_URL").or(defaults.logo_url),
			explorer_tx_url: get("EXPLORER_TX_URL").unwrap_or(defaults.explorer_tx_url),
			buy_url: Some(
				get("BUY_URL").unwrap_or_else(|| BrandingConfig::token_page_url(&target_address)),
			),
		};

		let control = ControlConfig {
			enabled: parse_bool(get("CONTROL_ENABLED"), "CONTROL_ENABLED", true)?,
			chat_ids: get("CONTROL_CHAT_IDS")
				.map(|raw| {
					raw.split(',')
						.map(|id| id.trim().to_string())
						.filter(|id| !id.is_empty())
						.collect()
				})
				.unwrap_or_else(|| vec![telegram_chat_id.clone()]),
		};

		let metrics = MetricsConfig {
			enabled: parse_bool(get("METRICS_ENABLED"), "METRICS_ENABLED", false)?,
			address: get("METRICS_ADDRESS").unwrap_or_else(|| DEFAULT_METRICS_ADDRESS.to_string()),
		};

		let config = AppConfig {
			telegram_bot_token,
			telegram_chat_id,
			telegram_api_url: get("TELEGRAM_API_URL")
				.unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
			node_rpc_url,
			criteria: MatchCriteria::new(target_address, min_value),
			base_unit_decimals,
			watcher,
			reminder_interval: secs("REMINDER_INTERVAL_SECONDS", 3600)?,
			reminder_text: get("REMINDER_TEXT")
				.map(|text| text.replace("\\n", "\n"))
				.unwrap_or_else(|| DEFAULT_REMINDER_TEXT.to_string()),
			branding,
			control,
			metrics,
			autostart_alerts: parse_bool(get("AUTOSTART_ALERTS"), "AUTOSTART_ALERTS", false)?,
		};

		config.validate()?;
		Ok(config)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		let url = Url::parse(&self.node_rpc_url).map_err(|e| {
			ConfigError::validation_error(format!("NODE_RPC_URL is not a valid URL: {}", e))
		})?;
		if !matches!(url.scheme(), "http" | "https") {
			return Err(ConfigError::validation_error(
				"NODE_RPC_URL must start with http:// or https://",
			));
		}

		if Url::parse(&self.telegram_api_url).is_err() {
			return Err(ConfigError::validation_error(
				"TELEGRAM_API_URL is not a valid URL",
			));
		}

		if self.base_unit_decimals > 77 {
			return Err(ConfigError::validation_error(
				"BASE_UNIT_DECIMALS must be at most 77",
			));
		}

		if self.watcher.poll_interval.is_zero() {
			return Err(ConfigError::validation_error(
				"POLL_INTERVAL_SECONDS must be greater than 0",
			));
		}

		if self.watcher.reconnect_backoff.is_zero() {
			return Err(ConfigError::validation_error(
				"RECONNECT_BACKOFF_SECONDS must be greater than 0",
			));
		}

		if self.watcher.reconnect_backoff_max < self.watcher.reconnect_backoff {
			return Err(ConfigError::validation_error(
				"RECONNECT_BACKOFF_MAX_SECONDS must not be lower than RECONNECT_BACKOFF_SECONDS",
			));
		}

		if self.watcher.fetch_timeout.is_zero() {
			return Err(ConfigError::validation_error(
				"FETCH_TIMEOUT_SECONDS must be greater than 0",
			));
		}

		if self.watcher.max_blocks_per_scan == Some(0) {
			return Err(ConfigError::validation_error(
				"MAX_BLOCKS_PER_SCAN must be greater than 0",
			));
		}

		if self.reminder_interval.is_zero() {
			return Err(ConfigError::validation_error(
				"REMINDER_INTERVAL_SECONDS must be greater than 0",
			));
		}

		Ok(())
	}
}

/// Parses a 0x-prefixed 20-byte hex address, accepting any letter casing
fn parse_address(raw: &str) -> Result<Address, ConfigError> {
	let hex = raw
		.strip_prefix("0x")
		.or_else(|| raw.strip_prefix("0X"))
		.ok_or_else(|| ConfigError::parse_error(format!("TARGET_ADDRESS '{}' must start with 0x", raw)))?;

	if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
		return Err(ConfigError::parse_error(format!(
			"TARGET_ADDRESS '{}' must contain 40 hex characters",
			raw
		)));
	}

	Address::from_str(&hex.to_ascii_lowercase())
		.map_err(|e| ConfigError::parse_error(format!("TARGET_ADDRESS '{}': {}", raw, e)))
}

/// Converts a display-unit amount such as `0.025` into base units without rounding
fn parse_display_value(raw: &str, decimals: u8) -> Result<U256, ConfigError> {
	match parse_units(raw, decimals) {
		Ok(ParseUnits::U256(value)) => Ok(value),
		Ok(ParseUnits::I256(_)) => Err(ConfigError::validation_error(format!(
			"MIN_VALUE '{}' must not be negative",
			raw
		))),
		Err(e) => Err(ConfigError::parse_error(format!("MIN_VALUE '{}': {}", raw, e))),
	}
}

fn parse_u64(raw: Option<String>, key: &str, default: u64) -> Result<u64, ConfigError> {
	match raw {
		Some(raw) => raw
			.parse::<u64>()
			.map_err(|e| ConfigError::parse_error(format!("{} '{}': {}", key, raw, e))),
		None => Ok(default),
	}
}

fn parse_bool(raw: Option<String>, key: &str, default: bool) -> Result<bool, ConfigError> {
	match raw.as_deref().map(str::to_ascii_lowercase).as_deref() {
		None => Ok(default),
		Some("true") | Some("1") | Some("yes") => Ok(true),
		Some("false") | Some("0") | Some("no") => Ok(false),
		Some(other) => Err(ConfigError::parse_error(format!(
			"{} must be true or false, got '{}'",
			key, other
		))),
	}
}
