//! EVM block data structures.

use alloy::primitives::{B256, U64};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Transaction;

/// A block fetched with full transaction bodies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
	/// Block height
	pub number: U64,
	/// Block hash
	pub hash: B256,
	/// Transactions in block order
	#[serde(default)]
	pub transactions: Vec<Transaction>,
}

impl Block {
	/// Get the block number
	pub fn number(&self) -> u64 {
		self.number.to::<u64>()
	}
}

/// Identifier used to request a specific block from the node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockId {
	/// Block at the given height
	Number(u64),
	/// Block with the given hash
	Hash(B256),
}

impl fmt::Display for BlockId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			BlockId::Number(number) => write!(f, "{}", number),
			BlockId::Hash(hash) => write!(f, "{:#x}", hash),
		}
	}
}

impl From<u64> for BlockId {
	fn from(number: u64) -> Self {
		BlockId::Number(number)
	}
}

impl From<B256> for BlockId {
	fn from(hash: B256) -> Self {
		BlockId::Hash(hash)
	}
}
