//! Blockchain data models.
//!
//! Normalized views of the blocks and transactions returned by an EVM-compatible
//! node. Only the fields needed for payment detection are kept; everything else in
//! the JSON-RPC payload is ignored during deserialization.

mod block;
mod transaction;

pub use block::{Block, BlockId};
pub use transaction::Transaction;
