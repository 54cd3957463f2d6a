//! Cancellation shared between the controller and a running loop.

use std::time::Duration;

pub use tokio_util::sync::CancellationToken;

/// Sleeps for `duration` unless `cancel` fires first
///
/// # Returns
/// * `true` if the full duration elapsed, `false` if the sleep was cut short
pub async fn sleep_or_cancel(cancel: &CancellationToken, duration: Duration) -> bool {
	tokio::select! {
		_ = cancel.cancelled() => false,
		_ = tokio::time::sleep(duration) => !cancel.is_cancelled(),
	}
}
