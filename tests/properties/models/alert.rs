//! Property-based tests for base-unit to display-unit conversion.

use alloy::primitives::U256;
use buy_alert_monitor::models::to_display_value;
use proptest::prelude::*;
use rust_decimal::Decimal;

proptest! {
	#[test]
	fn test_display_value_within_half_a_step(value in any::<u128>().prop_map(|v| v >> 32)) {
		let display = to_display_value(U256::from(value), 18);
		let exact = Decimal::from_i128_with_scale(value as i128, 18);
		let half_step = Decimal::new(5, 5);

		prop_assert_eq!(display.scale(), 4);
		prop_assert!((display - exact).abs() <= half_step);
	}

	#[test]
	fn test_display_value_is_monotonic(a in any::<u64>(), b in any::<u64>()) {
		let (low, high) = if a <= b { (a, b) } else { (b, a) };
		prop_assert!(
			to_display_value(U256::from(low), 18) <= to_display_value(U256::from(high), 18)
		);
	}

	#[test]
	fn test_whole_units_are_exact(units in 0u64..1_000_000_000, decimals in 0u8..=18) {
		let base = U256::from(units) * U256::from(10u8).pow(U256::from(decimals));
		prop_assert_eq!(to_display_value(base, decimals), Decimal::from(units));
	}
}
