//! Metrics module for the application.
//!
//! - This module contains the global Prometheus registry.
//! - Defines specific metrics for the block watcher, dispatcher and managed loops.

pub mod server;

use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, IntGauge, IntGaugeVec, Opts, Registry, TextEncoder};

use crate::models::LoopId;

lazy_static! {
	// Global Prometheus registry.
	pub static ref REGISTRY: Registry = Registry::new();

	// Counter of blocks fully processed by the poll loop.
	pub static ref BLOCKS_SCANNED: IntCounter = {
		let counter = IntCounter::new("blocks_scanned_total", "Blocks fully processed by the poll loop").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Counter of transactions that matched the criteria.
	pub static ref TRANSACTIONS_MATCHED: IntCounter = {
		let counter = IntCounter::new("transactions_matched_total", "Transactions matching the alert criteria").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Counter of alert notifications delivered.
	pub static ref ALERTS_SENT: IntCounter = {
		let counter = IntCounter::new("alerts_sent_total", "Alert notifications delivered").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Counter of notifications the messaging channel rejected.
	pub static ref NOTIFICATION_FAILURES: IntCounter = {
		let counter = IntCounter::new("notification_failures_total", "Notifications that failed to send").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Counter of reminder broadcasts delivered.
	pub static ref REMINDERS_SENT: IntCounter = {
		let counter = IntCounter::new("reminders_sent_total", "Reminder broadcasts delivered").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Counter of reconnect cycles entered by the poll loop.
	pub static ref NODE_RECONNECTS: IntCounter = {
		let counter = IntCounter::new("node_reconnects_total", "Reconnect cycles entered after node failures").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Gauge of the last block height examined.
	pub static ref CURSOR_HEIGHT: IntGauge = {
		let gauge = IntGauge::new("cursor_height", "Last block height examined by the poll loop").unwrap();
		REGISTRY.register(Box::new(gauge.clone())).unwrap();
		gauge
	};

	// Gauge Vector reporting whether each managed loop is running
	pub static ref LOOP_RUNNING: IntGaugeVec = {
		let gauge = IntGaugeVec::new(
			Opts::new("loop_running", "1 when the managed loop is running"),
			&["loop"]
		).unwrap();
		REGISTRY.register(Box::new(gauge.clone())).unwrap();
		gauge
	};
}

/// Gather all metrics and encode into the provided format.
pub fn gather_metrics() -> Result<Vec<u8>, Box<dyn std::error::Error>> {
	let encoder = TextEncoder::new();
	let metric_families = REGISTRY.gather();
	let mut buffer = Vec::new();
	encoder.encode(&metric_families, &mut buffer)?;
	Ok(buffer)
}

/// Forces registration of every metric so the first scrape reports zeros
pub fn init_metrics() {
	lazy_static::initialize(&BLOCKS_SCANNED);
	lazy_static::initialize(&TRANSACTIONS_MATCHED);
	lazy_static::initialize(&ALERTS_SENT);
	lazy_static::initialize(&NOTIFICATION_FAILURES);
	lazy_static::initialize(&REMINDERS_SENT);
	lazy_static::initialize(&NODE_RECONNECTS);
	lazy_static::initialize(&CURSOR_HEIGHT);
	for loop_id in LoopId::ALL {
		set_loop_running(loop_id, false);
	}
}

/// Records the running state of a managed loop
pub fn set_loop_running(loop_id: LoopId, running: bool) {
	LOOP_RUNNING
		.with_label_values(&[loop_id.as_str()])
		.set(i64::from(running));
}

/// Records the last processed block height
pub fn set_cursor_height(height: u64) {
	CURSOR_HEIGHT.set(i64::try_from(height).unwrap_or(i64::MAX));
}
