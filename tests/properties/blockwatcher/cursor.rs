//! Property-based tests for cursor movement.

use buy_alert_monitor::services::blockwatcher::ChainCursor;
use proptest::prelude::*;

proptest! {
	#[test]
	fn test_cursor_only_moves_one_block_forward(
		head in 0u64..u64::MAX / 2,
		attempts in prop::collection::vec(0u64..64, 1..50),
	) {
		let mut cursor = ChainCursor::new(head);

		for offset in attempts {
			let before = cursor.current();
			let requested = head + offset;
			let result = cursor.advance_to(requested);

			if requested == before + 1 {
				prop_assert!(result.is_ok());
				prop_assert_eq!(cursor.current(), requested);
			} else {
				prop_assert!(result.is_err());
				prop_assert_eq!(cursor.current(), before);
			}
			prop_assert!(cursor.current() >= head);
		}
	}
}
