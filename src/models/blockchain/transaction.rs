//! EVM transaction data structures.

use alloy::primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

/// A transaction body as delivered inside a full block
///
/// The recipient is `None` for contract-creation transactions. The value is kept
/// in base units (wei equivalent) and is never converted for comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
	/// Transaction hash
	pub hash: B256,
	/// Sender address, when the node reports it
	#[serde(default)]
	pub from: Option<Address>,
	/// Recipient address (None for contract creation)
	#[serde(default)]
	pub to: Option<Address>,
	/// Native value transferred, in base units
	pub value: U256,
}

impl Transaction {
	/// Get the transaction hash
	pub fn hash(&self) -> &B256 {
		&self.hash
	}

	/// Get the transaction recipient address (None for contract creation)
	pub fn to(&self) -> Option<&Address> {
		self.to.as_ref()
	}

	/// Get the transaction value in base units
	pub fn value(&self) -> &U256 {
		&self.value
	}

	/// Lowercase 0x-prefixed hex form of the hash, as used in explorer links
	pub fn hash_hex(&self) -> String {
		format!("{:#x}", self.hash)
	}
}
