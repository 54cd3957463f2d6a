//! Position of the poll loop on the chain.

use crate::services::blockwatcher::BlockWatcherError;

/// Last block height whose transactions have been fully processed
///
/// The height only moves forward one block at a time. Blocks at or below the
/// initial height are never inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainCursor {
	height: u64,
}

impl ChainCursor {
	/// Creates a cursor positioned at the current chain head
	pub fn new(head: u64) -> Self {
		Self { height: head }
	}

	/// Last examined height
	pub fn current(&self) -> u64 {
		self.height
	}

	/// Height of the next block to examine
	pub fn next_height(&self) -> u64 {
		self.height.saturating_add(1)
	}

	/// Moves the cursor to `height`, which must be exactly `current() + 1`
	pub fn advance_to(&mut self, height: u64) -> Result<(), BlockWatcherError> {
		if height != self.next_height() {
			return Err(BlockWatcherError::cursor_error(format!(
				"cannot advance from {} to {}",
				self.height, height
			)));
		}
		self.height = height;
		Ok(())
	}
}
