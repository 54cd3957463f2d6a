//! Property-based tests for payment matching.

use alloy::primitives::{Address, U256, U64};
use buy_alert_monitor::{
	models::{Block, MatchCriteria, Transaction},
	services::filter::TransactionFilter,
};
use proptest::{prelude::*, test_runner::Config};

use crate::properties::strategies::{
	address_strategy, transaction_strategy, transactions_strategy, value_strategy,
};

// Target, a second address and a block of transactions sent mostly to either
prop_compose! {
	fn block_with_recipients()(
		target in address_strategy(),
		other in address_strategy(),
	)(
		target in Just(target),
		txs in transactions_strategy(vec![target, other]),
	) -> (Address, Vec<Transaction>) {
		(target, txs)
	}
}

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn test_threshold_is_inclusive(
		target in address_strategy(),
		min in value_strategy(),
		tx in transaction_strategy(vec![Address::ZERO]),
	) {
		let criteria = MatchCriteria::new(target, min);
		let mut tx = tx;
		tx.to = Some(target);

		tx.value = min;
		prop_assert!(TransactionFilter::matches(&tx, &criteria));

		if min > U256::ZERO {
			tx.value = min - U256::from(1u8);
			prop_assert!(!TransactionFilter::matches(&tx, &criteria));
		}
		if min < U256::MAX {
			tx.value = min + U256::from(1u8);
			prop_assert!(TransactionFilter::matches(&tx, &criteria));
		}
	}

	#[test]
	fn test_contract_creation_never_matches(
		target in address_strategy(),
		tx in transaction_strategy(vec![Address::ZERO]),
	) {
		let mut tx = tx;
		tx.to = None;
		prop_assert!(!TransactionFilter::matches(&tx, &MatchCriteria::new(target, U256::ZERO)));
	}

	#[test]
	fn test_other_recipients_never_match(
		target in address_strategy(),
		tx in transaction_strategy(vec![Address::ZERO]),
	) {
		prop_assume!(tx.to != Some(target));
		prop_assert!(!TransactionFilter::matches(&tx, &MatchCriteria::new(target, U256::ZERO)));
	}

	#[test]
	fn test_filter_block_keeps_matches_in_block_order(
		(target, txs) in block_with_recipients(),
		min in any::<u64>().prop_map(U256::from),
	) {
		let criteria = MatchCriteria::new(target, min);
		let block = Block {
			number: U64::from(1u64),
			hash: Default::default(),
			transactions: txs,
		};

		let matched = TransactionFilter::filter_block(&block, &criteria);
		let expected: Vec<&Transaction> = block
			.transactions
			.iter()
			.filter(|tx| tx.to == Some(target) && tx.value >= min)
			.collect();
		prop_assert_eq!(matched, expected);
	}
}
