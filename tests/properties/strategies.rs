use alloy::primitives::{Address, B256, U256};
use buy_alert_monitor::models::Transaction;
use proptest::{option, prelude::*};

const MAX_TRANSACTIONS: usize = 20;

pub fn address_strategy() -> impl Strategy<Value = Address> {
	any::<[u8; 20]>().prop_map(Address::from)
}

pub fn value_strategy() -> impl Strategy<Value = U256> {
	prop_oneof![
		any::<u64>().prop_map(U256::from),
		any::<u128>().prop_map(U256::from),
		any::<[u8; 32]>().prop_map(U256::from_be_bytes),
	]
}

/// Transactions whose recipient is drawn mostly from `recipients`
pub fn transaction_strategy(recipients: Vec<Address>) -> impl Strategy<Value = Transaction> {
	(
		any::<[u8; 32]>(),
		option::weighted(0.9, prop_oneof![
			3 => prop::sample::select(recipients),
			1 => address_strategy(),
		]),
		value_strategy(),
	)
		.prop_map(|(hash, to, value)| Transaction {
			hash: B256::from(hash),
			from: None,
			to,
			value,
		})
}

pub fn transactions_strategy(recipients: Vec<Address>) -> impl Strategy<Value = Vec<Transaction>> {
	prop::collection::vec(transaction_strategy(recipients), 0..MAX_TRANSACTIONS)
}

/// Renders `address` as hex with a random letter casing per character
pub fn mixed_case_hex(address: Address) -> impl Strategy<Value = String> {
	let hex = format!("{:x}", address);
	prop::collection::vec(any::<bool>(), 40).prop_map(move |upper| {
		let body: String = hex
			.chars()
			.zip(upper)
			.map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
			.collect();
		format!("0x{}", body)
	})
}
