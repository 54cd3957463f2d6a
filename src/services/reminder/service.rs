//! Reminder loop.
//!
//! Waits one full interval before every broadcast, so stopping the loop before the
//! first interval elapses sends nothing. Delivery failures are logged and the loop
//! keeps its schedule.

use async_trait::async_trait;
use std::{sync::Arc, time::Duration};
use tracing::{info, warn};

use crate::{
	models::{LoopExit, NotificationContent},
	services::{
		lifecycle::{sleep_or_cancel, CancellationToken, ManagedLoop},
		notification::Notifier,
	},
	utils::metrics::{NOTIFICATION_FAILURES, REMINDERS_SENT},
};

/// Broadcasts the same reminder at a fixed interval
pub struct ReminderService<N: Notifier> {
	notifier: Arc<N>,
	destination: String,
	content: NotificationContent,
	interval: Duration,
}

impl<N: Notifier> ReminderService<N> {
	pub fn new(
		notifier: Arc<N>,
		destination: impl Into<String>,
		content: NotificationContent,
		interval: Duration,
	) -> Self {
		Self {
			notifier,
			destination: destination.into(),
			content,
			interval,
		}
	}
}

#[async_trait]
impl<N: Notifier + 'static> ManagedLoop for ReminderService<N> {
	async fn run(&self, cancel: CancellationToken) -> LoopExit {
		info!(interval_secs = self.interval.as_secs(), "reminder broadcast scheduled");

		while sleep_or_cancel(&cancel, self.interval).await {
			match self.notifier.send(&self.destination, &self.content).await {
				Ok(()) => {
					REMINDERS_SENT.inc();
					info!("reminder sent");
				}
				Err(e) => {
					NOTIFICATION_FAILURES.inc();
					warn!("failed to send reminder: {}", e);
				}
			}
		}

		LoopExit::Cancelled
	}
}
