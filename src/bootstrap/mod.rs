//! Bootstrap module for wiring the services together.
//!
//! Builds the node client, the notifier and the two managed loops from an
//! `AppConfig`, and hands back the lifecycle controller that owns the loops.
//!
//! # Services
//! - `EvmClient`: node access over JSON-RPC
//! - `TelegramNotifier`: alert delivery and control updates
//! - `BlockWatcherService`: the alert polling loop
//! - `ReminderService`: the reminder broadcast loop
//! - `TaskLifecycleController`: start/stop of both loops

use std::{error::Error, sync::Arc, time::Duration};
use tokio::sync::watch;
use tracing::info;

use crate::{
	models::AppConfig,
	services::{
		blockchain::{BlockChainClient, EvmClient},
		blockwatcher::BlockWatcherService,
		control::{ControlListener, ControlSurface},
		lifecycle::TaskLifecycleController,
		notification::{EventDispatcher, MessageBuilder, Notifier, TelegramNotifier},
		reminder::ReminderService,
	},
};

/// Type alias for handling ServiceResult
pub type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;

/// Timeout applied to every Bot API request
const TELEGRAM_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Everything the binary needs after startup
pub struct AppServices {
	pub controller: Arc<TaskLifecycleController>,
	pub notifier: Arc<TelegramNotifier>,
	/// Last height processed by the alert loop
	pub progress: watch::Receiver<Option<u64>>,
}

/// Builds both managed loops around the given collaborators
///
/// # Arguments
/// * `config` - Validated application configuration
/// * `client` - Node client used by the alert loop
/// * `notifier` - Messaging channel shared by both loops
///
/// # Returns
/// The controller owning the loops, and a receiver for the alert loop's progress
pub fn build_controller<C, N>(
	config: &AppConfig,
	client: Arc<C>,
	notifier: Arc<N>,
) -> (Arc<TaskLifecycleController>, watch::Receiver<Option<u64>>)
where
	C: BlockChainClient + 'static,
	N: Notifier + 'static,
{
	let messages = MessageBuilder::new(config.branding.clone());

	let dispatcher = Arc::new(EventDispatcher::new(
		notifier.clone(),
		config.telegram_chat_id.clone(),
		messages.clone(),
		config.base_unit_decimals,
	));
	let watcher = Arc::new(BlockWatcherService::new(
		client,
		dispatcher,
		config.criteria,
		config.watcher.clone(),
	));
	let progress = watcher.subscribe();

	let reminder = Arc::new(ReminderService::new(
		notifier,
		config.telegram_chat_id.clone(),
		messages.reminder(&config.reminder_text),
		config.reminder_interval,
	));

	(Arc::new(TaskLifecycleController::new(watcher, reminder)), progress)
}

/// Initializes all required services.
///
/// # Errors
/// Returns an error if the node cannot be reached or the notifier cannot be built
pub async fn initialize_services(config: &AppConfig) -> Result<AppServices> {
	info!(url = %redact_url(&config.node_rpc_url), "connecting to node");
	let client = Arc::new(EvmClient::new(&config.node_rpc_url, config.watcher.fetch_timeout).await?);
	info!("connected to node");

	let notifier = Arc::new(TelegramNotifier::new(
		Some(config.telegram_api_url.clone()),
		config.telegram_bot_token.clone(),
		TELEGRAM_REQUEST_TIMEOUT,
	)?);

	let (controller, progress) = build_controller(config, client, notifier.clone());
	Ok(AppServices {
		controller,
		notifier,
		progress,
	})
}

/// Creates the chat control listener when enabled
pub fn create_control_listener(
	config: &AppConfig,
	services: &AppServices,
) -> Option<ControlListener<TelegramNotifier>> {
	if !config.control.enabled || config.control.chat_ids.is_empty() {
		return None;
	}
	Some(ControlListener::new(
		services.notifier.clone(),
		ControlSurface::new(services.controller.clone()),
		config.control.chat_ids.clone(),
	))
}

/// Strips path and query from a node URL, provider URLs often embed API keys
pub fn redact_url(raw: &str) -> String {
	match url::Url::parse(raw) {
		Ok(url) => format!("{}://{}", url.scheme(), url.host_str().unwrap_or("unknown")),
		Err(_) => "<invalid url>".to_string(),
	}
}
