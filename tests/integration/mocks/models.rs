//! Builders for test data.

use alloy::primitives::{address, Address, B256, U256, U64};
use buy_alert_monitor::models::{
	AppConfig, Block, ConfigLoader, MatchCriteria, Transaction, WatcherConfig,
};
use std::{collections::HashMap, time::Duration};

pub const TARGET: Address = address!("2119de8f257d27662991198389e15bf8d1f4ab24");

/// 0.025 with 18 decimals
pub const MIN_VALUE: u64 = 25_000_000_000_000_000;

pub fn test_criteria() -> MatchCriteria {
	MatchCriteria::new(TARGET, U256::from(MIN_VALUE))
}

pub fn block_hash(number: u64) -> B256 {
	B256::from(U256::from(number))
}

pub fn create_test_transaction(hash_byte: u8, to: Option<Address>, value: u64) -> Transaction {
	Transaction {
		hash: B256::with_last_byte(hash_byte),
		from: Some(Address::with_last_byte(0xaa)),
		to,
		value: U256::from(value),
	}
}

pub fn create_test_block(number: u64, transactions: Vec<Transaction>) -> Block {
	Block {
		number: U64::from(number),
		hash: block_hash(number),
		transactions,
	}
}

pub fn test_watcher_config() -> WatcherConfig {
	WatcherConfig {
		poll_interval: Duration::from_secs(5),
		reconnect_backoff: Duration::from_secs(15),
		reconnect_backoff_max: Duration::from_secs(15),
		fetch_timeout: Duration::from_secs(30),
		..Default::default()
	}
}

pub fn test_env() -> HashMap<&'static str, String> {
	HashMap::from([
		("TELEGRAM_BOT_TOKEN", "test-token".to_string()),
		("TELEGRAM_CHAT_ID", "@agama_alerts".to_string()),
		("NODE_RPC_URL", "https://bsc.example.org".to_string()),
		("TARGET_ADDRESS", "0x2119DE8F257D27662991198389E15BF8D1F4AB24".to_string()),
		("MIN_VALUE", "0.025".to_string()),
		("CONTROL_CHAT_IDS", "-1001".to_string()),
	])
}

pub fn test_app_config() -> AppConfig {
	let env = test_env();
	AppConfig::load_with(|key| env.get(key).cloned()).unwrap()
}
