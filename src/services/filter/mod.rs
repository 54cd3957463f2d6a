//! Transaction filtering.
//!
//! Decides which transactions of a block are payments worth alerting on.

mod transaction_filter;

pub use transaction_filter::TransactionFilter;
