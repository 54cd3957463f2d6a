//! Dispatch of matched transactions to the messaging channel.
//!
//! Every match produces exactly one notification attempt. Delivery failures are
//! logged and counted, never propagated: a failed send neither stops the remaining
//! dispatches of the block nor the poll loop.

use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
	models::{AlertEvent, Transaction},
	services::notification::{MessageBuilder, Notifier},
	utils::metrics::{ALERTS_SENT, NOTIFICATION_FAILURES},
};

/// Turns matched transactions into alerts and sends them
pub struct EventDispatcher<N: Notifier> {
	notifier: Arc<N>,
	destination: String,
	messages: MessageBuilder,
	decimals: u8,
}

impl<N: Notifier> EventDispatcher<N> {
	/// Creates a dispatcher
	///
	/// # Arguments
	/// * `notifier` - Messaging channel
	/// * `destination` - Recipient passed to the notifier on every send
	/// * `messages` - Renders the alert content
	/// * `decimals` - Base-unit to display-unit exponent
	pub fn new(
		notifier: Arc<N>,
		destination: impl Into<String>,
		messages: MessageBuilder,
		decimals: u8,
	) -> Self {
		Self {
			notifier,
			destination: destination.into(),
			messages,
			decimals,
		}
	}

	/// Sends one alert for `tx`
	///
	/// # Returns
	/// * `bool` - Whether the notifier accepted the message
	pub async fn dispatch(&self, tx: &Transaction) -> bool {
		let event = AlertEvent::from_transaction(tx, self.decimals);
		let content = self.messages.alert(&event);

		match self.notifier.send(&self.destination, &content).await {
			Ok(()) => {
				ALERTS_SENT.inc();
				info!(tx_hash = %event.tx_hash, amount = %event.formatted_value(), "alert sent");
				true
			}
			Err(e) => {
				NOTIFICATION_FAILURES.inc();
				warn!(tx_hash = %event.tx_hash, "failed to send alert: {}", e);
				false
			}
		}
	}

	/// Dispatches every match concurrently and waits until all have settled
	///
	/// # Returns
	/// * `usize` - Number of alerts delivered
	pub async fn dispatch_all(&self, txs: &[&Transaction]) -> usize {
		join_all(txs.iter().map(|tx| self.dispatch(tx)))
			.await
			.into_iter()
			.filter(|delivered| *delivered)
			.count()
	}
}
