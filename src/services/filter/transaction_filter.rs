//! Payment matching against the configured criteria.
//!
//! A transaction matches when it is sent to the target address and carries at least
//! the minimum value. Comparisons are done on 20-byte addresses and base-unit
//! integers, so address casing and decimal rounding never influence the result.

use crate::models::{Block, MatchCriteria, Transaction};

/// Stateless predicate over transactions
pub struct TransactionFilter;

impl TransactionFilter {
	/// Returns true when `tx` pays `criteria.target_address` at least `criteria.min_value`
	///
	/// Contract-creation transactions (no recipient) never match.
	pub fn matches(tx: &Transaction, criteria: &MatchCriteria) -> bool {
		match tx.to() {
			Some(to) => *to == criteria.target_address && *tx.value() >= criteria.min_value,
			None => false,
		}
	}

	/// Returns the matching transactions of a block in block order
	pub fn filter_block<'a>(block: &'a Block, criteria: &MatchCriteria) -> Vec<&'a Transaction> {
		block
			.transactions
			.iter()
			.filter(|tx| Self::matches(tx, criteria))
			.collect()
	}
}
