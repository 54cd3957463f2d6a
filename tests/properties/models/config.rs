//! Property-based tests for configuration parsing.

use alloy::primitives::U256;
use buy_alert_monitor::models::{AppConfig, ConfigLoader};
use proptest::prelude::*;
use std::collections::HashMap;

use crate::properties::strategies::{address_strategy, mixed_case_hex};

fn load(overrides: &[(&'static str, String)]) -> Result<AppConfig, buy_alert_monitor::models::ConfigError> {
	let mut env: HashMap<&'static str, String> = HashMap::from([
		("TELEGRAM_BOT_TOKEN", "test-token".to_string()),
		("TELEGRAM_CHAT_ID", "@agama_alerts".to_string()),
		("NODE_RPC_URL", "https://bsc.example.org".to_string()),
		("TARGET_ADDRESS", "0x2119de8f257d27662991198389e15bf8d1f4ab24".to_string()),
		("MIN_VALUE", "0.025".to_string()),
	]);
	env.extend(overrides.iter().cloned());
	AppConfig::load_with(|key| env.get(key).cloned())
}

proptest! {
	#[test]
	fn test_target_address_casing_is_irrelevant(
		(address, raw) in address_strategy().prop_flat_map(|a| (Just(a), mixed_case_hex(a))),
	) {
		let config = load(&[("TARGET_ADDRESS", raw)]).unwrap();
		prop_assert_eq!(config.criteria.target_address, address);
	}

	#[test]
	fn test_min_value_converts_without_rounding(
		whole in 0u64..1_000_000,
		fraction in 0u64..1_000_000_000_000_000_000,
	) {
		let raw = format!("{}.{:018}", whole, fraction);
		let config = load(&[("MIN_VALUE", raw)]).unwrap();

		let expected = U256::from(whole) * U256::from(10u64.pow(18)) + U256::from(fraction);
		prop_assert_eq!(config.criteria.min_value, expected);
	}

	#[test]
	fn test_malformed_address_is_rejected(raw in "0x[0-9a-fA-F]{0,39}|[0-9a-fA-F]{40}") {
		prop_assert!(load(&[("TARGET_ADDRESS", raw)]).is_err());
	}
}
