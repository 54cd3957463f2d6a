//! Buy alert monitor entry point.
//!
//! # Flow
//! 1. Loads `.env` and applies command line overrides
//! 2. Loads and validates the configuration (fatal on error)
//! 3. Connects to the node (fatal when unreachable)
//! 4. Starts the alert loop when autostart is enabled
//! 5. Starts the metrics server and the chat control listener when enabled
//! 6. Stops every loop on Ctrl+C

use buy_alert_monitor::{
	bootstrap::{create_control_listener, initialize_services},
	models::{AppConfig, ConfigLoader, LoopId},
	services::lifecycle::CancellationToken,
	utils::{
		logging::setup_logging,
		metrics::{init_metrics, server::create_metrics_server},
	},
};

use clap::{Arg, Command};
use dotenvy::dotenv;
use std::env::{set_var, var};
use tracing::{error, info};

/// Sets `key` from a command line value unless the environment already has it
fn set_env_default(key: &str, value: &str) {
	if var(key).is_err() {
		set_var(key, value);
	}
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let matches = Command::new("buy-alert-monitor")
		.version(env!("CARGO_PKG_VERSION"))
		.about(
			"Watches an EVM chain for payments to a contract and posts buy alerts to Telegram.",
		)
		.arg(
			Arg::new("log-level")
				.long("log-level")
				.help("Set log level (trace, debug, info, warn, error)")
				.value_name("LEVEL"),
		)
		.arg(
			Arg::new("metrics")
				.long("metrics")
				.help("Enable metrics server")
				.action(clap::ArgAction::SetTrue),
		)
		.arg(
			Arg::new("metrics-address")
				.long("metrics-address")
				.help("Address to start the metrics server on (default: 127.0.0.1:8081)")
				.value_name("HOST:PORT"),
		)
		.arg(
			Arg::new("autostart")
				.long("autostart")
				.help("Start the buy alert loop immediately")
				.action(clap::ArgAction::SetTrue),
		)
		.arg(
			Arg::new("no-control")
				.long("no-control")
				.help("Do not listen for chat commands")
				.action(clap::ArgAction::SetTrue),
		)
		.get_matches();

	dotenv().ok();

	if let Some(level) = matches.get_one::<String>("log-level") {
		set_env_default("LOG_LEVEL", level);
	}
	if matches.get_flag("metrics") {
		set_env_default("METRICS_ENABLED", "true");
	}
	if let Some(address) = matches.get_one::<String>("metrics-address") {
		set_env_default("METRICS_ADDRESS", address);
	}
	if matches.get_flag("autostart") {
		set_env_default("AUTOSTART_ALERTS", "true");
	}
	if matches.get_flag("no-control") {
		set_var("CONTROL_ENABLED", "false");
	}

	if let Err(e) = setup_logging() {
		eprintln!("Failed to setup logging: {}", e);
	}

	let config = AppConfig::load_from_env()
		.map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

	let services = initialize_services(&config)
		.await
		.map_err(|e| anyhow::anyhow!("Failed to initialize services: {}", e))?;

	init_metrics();

	if config.autostart_alerts {
		let status = services.controller.start(LoopId::AlertPolling).await;
		info!("{}", status);
	}

	let metrics_server = if config.metrics.enabled {
		match create_metrics_server(config.metrics.address.clone(), services.controller.clone()) {
			Ok(server) => Some(tokio::spawn(server)),
			Err(e) => {
				error!("Failed to create metrics server: {}", e);
				None
			}
		}
	} else {
		info!("Metrics server disabled. Use --metrics flag or METRICS_ENABLED=true to enable");
		None
	};

	let control_cancel = CancellationToken::new();
	let control_task = create_control_listener(&config, &services).map(|listener| {
		let cancel = control_cancel.clone();
		tokio::spawn(async move { listener.run(cancel).await })
	});
	if control_task.is_none() {
		info!("Chat control disabled");
	}

	info!("Service started. Press Ctrl+C to shutdown");

	if let Err(e) = tokio::signal::ctrl_c().await {
		error!("Error waiting for Ctrl+C: {}", e);
	}
	info!("Shutdown signal received, stopping services...");

	control_cancel.cancel();
	services.controller.shutdown().await;
	if let Some(task) = control_task {
		if let Err(e) = task.await {
			error!("Control listener ended abnormally: {}", e);
		}
	}
	if let Some(server) = metrics_server {
		server.abort();
	}

	let last_height = *services.progress.borrow();
	match last_height {
		Some(height) => info!(block = height, "Shutdown complete"),
		None => info!("Shutdown complete"),
	}
	Ok(())
}
