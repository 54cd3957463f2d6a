//! Alert event built for each matching transaction.

use alloy::primitives::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Transaction;

/// Number of decimal places shown in notifications
pub const DISPLAY_DECIMALS: u32 = 4;

/// A matched payment, ready to be rendered into a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertEvent {
	/// Original value in base units
	pub value_in_base_unit: U256,
	/// Value in display units, rounded half-to-even to four decimals
	pub display_value: Decimal,
	/// 0x-prefixed transaction hash
	pub tx_hash: String,
}

impl AlertEvent {
	/// Builds an alert from a matched transaction
	///
	/// # Arguments
	/// * `tx` - The matched transaction
	/// * `decimals` - Number of decimals between base and display unit (18 for BNB/ETH)
	pub fn from_transaction(tx: &Transaction, decimals: u8) -> Self {
		Self {
			value_in_base_unit: tx.value,
			display_value: to_display_value(tx.value, decimals),
			tx_hash: tx.hash_hex(),
		}
	}

	/// Display value formatted with exactly four decimals
	pub fn formatted_value(&self) -> String {
		format!("{:.4}", self.display_value)
	}
}

/// Converts a base-unit amount into a display-unit decimal
///
/// The conversion is done in integer arithmetic: the value is scaled down to four
/// decimals with half-to-even rounding (`0.03125` shows as `0.0312`, `0.03135` as
/// `0.0314`) before being turned into a `Decimal`. Amounts too large for `Decimal`
/// saturate at `Decimal::MAX`.
pub fn to_display_value(value: U256, decimals: u8) -> Decimal {
	let decimals = u32::from(decimals);
	let scaled = if decimals > DISPLAY_DECIMALS {
		let divisor = U256::from(10u8).pow(U256::from(decimals - DISPLAY_DECIMALS));
		let (quotient, remainder) = value.div_rem(divisor);
		let doubled = remainder.saturating_mul(U256::from(2u8));
		let round_up = doubled > divisor || (doubled == divisor && quotient.bit(0));
		if round_up {
			quotient + U256::from(1u8)
		} else {
			quotient
		}
	} else {
		value.saturating_mul(U256::from(10u8).pow(U256::from(DISPLAY_DECIMALS - decimals)))
	};

	i128::try_from(scaled)
		.ok()
		.and_then(|scaled| Decimal::try_from_i128_with_scale(scaled, DISPLAY_DECIMALS).ok())
		.unwrap_or(Decimal::MAX)
}
