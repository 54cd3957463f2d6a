use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Criteria a transaction must satisfy to raise an alert
///
/// Addresses are stored as 20-byte values, so comparison is independent of the
/// hex casing used in configuration or returned by the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCriteria {
	/// Contract address payments must be sent to
	pub target_address: Address,
	/// Minimum value in base units (inclusive)
	pub min_value: U256,
}

impl MatchCriteria {
	pub fn new(target_address: Address, min_value: U256) -> Self {
		Self {
			target_address,
			min_value,
		}
	}
}
