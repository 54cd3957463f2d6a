//! Reconnect delay policy for long-running loops.
//!
//! Unlike a bounded retry helper, a backoff policy never gives up: it only says how
//! long to wait before the next attempt. Delays are generated with `backon` builders
//! configured without a maximum number of attempts.

use backon::{BackoffBuilder, ConstantBuilder, ExponentialBuilder};
use std::time::Duration;

/// Delay policy used between reconnect attempts
#[derive(Clone, Debug, PartialEq)]
pub enum BackoffPolicy {
	/// Same delay before every attempt
	Fixed { delay: Duration },
	/// Delay grows by `factor` after every failed attempt, capped at `max_delay`
	Exponential {
		initial_delay: Duration,
		max_delay: Duration,
		factor: f32,
	},
}

impl BackoffPolicy {
	/// Builds a fixed policy when both bounds are equal, an exponential one otherwise
	///
	/// # Arguments
	/// * `initial_delay` - Delay before the first retry
	/// * `max_delay` - Largest delay ever returned
	pub fn from_bounds(initial_delay: Duration, max_delay: Duration) -> Self {
		if max_delay <= initial_delay {
			BackoffPolicy::Fixed {
				delay: initial_delay,
			}
		} else {
			BackoffPolicy::Exponential {
				initial_delay,
				max_delay,
				factor: 2.0,
			}
		}
	}

	/// Starts a fresh delay sequence
	pub fn start(&self) -> Backoff {
		let (inner, fallback): (Box<dyn backon::Backoff + Send + Sync>, Duration) = match self {
			BackoffPolicy::Fixed { delay } => (
				Box::new(
					ConstantBuilder::default()
						.with_delay(*delay)
						.without_max_times()
						.build(),
				),
				*delay,
			),
			BackoffPolicy::Exponential {
				initial_delay,
				max_delay,
				factor,
			} => (
				Box::new(
					ExponentialBuilder::default()
						.with_min_delay(*initial_delay)
						.with_max_delay(*max_delay)
						.with_factor(*factor)
						.without_max_times()
						.build(),
				),
				*max_delay,
			),
		};

		Backoff {
			inner,
			fallback,
			attempts: 0,
		}
	}
}

/// An in-progress delay sequence
pub struct Backoff {
	inner: Box<dyn backon::Backoff + Send + Sync>,
	fallback: Duration,
	attempts: u32,
}

impl Backoff {
	/// Returns the delay to wait before the next attempt
	pub fn next_delay(&mut self) -> Duration {
		self.attempts = self.attempts.saturating_add(1);
		self.inner.next().unwrap_or(self.fallback)
	}

	/// Number of delays handed out so far
	pub fn attempts(&self) -> u32 {
		self.attempts
	}
}

impl std::fmt::Debug for Backoff {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Backoff")
			.field("fallback", &self.fallback)
			.field("attempts", &self.attempts)
			.finish()
	}
}
