//! Long-polling listener for control updates.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::{sync::Arc, time::Duration};
use tracing::{debug, info, warn};

use crate::services::{
	control::{CommandParseError, ControlCommand, ControlReply, ControlSurface, Update},
	lifecycle::{sleep_or_cancel, CancellationToken},
	notification::{NotificationError, TelegramNotifier},
};

/// Source of chat updates and sink for replies
#[async_trait]
pub trait UpdateSource: Send + Sync {
	/// Long-polls for updates with `update_id >= offset`
	async fn get_updates(&self, offset: i64, wait: Duration) -> Result<Vec<Update>, NotificationError>;

	/// Sends a reply to a chat
	async fn reply(&self, chat_id: i64, reply: &ControlReply) -> Result<(), NotificationError>;

	/// Acknowledges a pressed menu button
	async fn answer_callback(&self, callback_id: &str, text: &str) -> Result<(), NotificationError>;
}

fn menu_keyboard() -> Value {
	let rows: Vec<Value> = ControlSurface::menu()
		.iter()
		.map(|(label, command)| json!([{ "text": label, "callback_data": command.callback_data() }]))
		.collect();
	json!({ "inline_keyboard": rows })
}

#[async_trait]
impl UpdateSource for TelegramNotifier {
	async fn get_updates(&self, offset: i64, wait: Duration) -> Result<Vec<Update>, NotificationError> {
		let body = json!({
			"offset": offset,
			"timeout": wait.as_secs(),
			"allowed_updates": ["message", "callback_query"],
		});
		let result = self.call_method("getUpdates", &body, Some(wait)).await?;
		serde_json::from_value(result)
			.map_err(|e| NotificationError::api_error(format!("Failed to parse updates: {}", e)))
	}

	async fn reply(&self, chat_id: i64, reply: &ControlReply) -> Result<(), NotificationError> {
		let mut body = json!({ "chat_id": chat_id, "text": reply.text });
		if reply.show_menu {
			body["reply_markup"] = menu_keyboard();
		}
		self.call_method("sendMessage", &body, None).await.map(|_| ())
	}

	async fn answer_callback(&self, callback_id: &str, text: &str) -> Result<(), NotificationError> {
		let body = json!({ "callback_query_id": callback_id, "text": text });
		self.call_method("answerCallbackQuery", &body, None)
			.await
			.map(|_| ())
	}
}

/// Receives commands from allowed chats and executes them
pub struct ControlListener<S: UpdateSource> {
	source: Arc<S>,
	surface: ControlSurface,
	allowed_chats: Vec<String>,
	poll_wait: Duration,
	error_delay: Duration,
}

impl<S: UpdateSource> ControlListener<S> {
	/// Creates a listener
	///
	/// # Arguments
	/// * `source` - Update channel
	/// * `surface` - Executes the parsed commands
	/// * `allowed_chats` - Chat ids or `@usernames` whose commands are obeyed
	pub fn new(source: Arc<S>, surface: ControlSurface, allowed_chats: Vec<String>) -> Self {
		Self {
			source,
			surface,
			allowed_chats,
			poll_wait: Duration::from_secs(30),
			error_delay: Duration::from_secs(5),
		}
	}

	/// Handles one update; replies are best effort
	pub async fn handle_update(&self, update: Update) {
		if let Some(message) = update.message {
			let Some(text) = message.text.as_deref() else {
				return;
			};
			if !message.chat.is_listed(&self.allowed_chats) {
				debug!(chat_id = message.chat.id, "ignoring message from unlisted chat");
				return;
			}

			let reply = match text.parse::<ControlCommand>() {
				Ok(command) => {
					info!(chat_id = message.chat.id, ?command, "control command received");
					self.surface.execute(command).await
				}
				Err(CommandParseError::NotACommand) => return,
				Err(e) => ControlReply {
					text: format!("{}. Send /menu for the available actions.", e),
					show_menu: false,
				},
			};
			if let Err(e) = self.source.reply(message.chat.id, &reply).await {
				warn!(chat_id = message.chat.id, "failed to send control reply: {}", e);
			}
		} else if let Some(callback) = update.callback_query {
			let allowed = callback
				.message
				.as_ref()
				.is_some_and(|m| m.chat.is_listed(&self.allowed_chats));
			let (answer, chat_reply) = if !allowed {
				("Not authorized".to_string(), None)
			} else {
				match ControlCommand::from_callback(callback.data.as_deref().unwrap_or_default()) {
					Ok(command) => {
						info!(?command, "control button pressed");
						let reply = self.surface.execute(command).await;
						(reply.text.clone(), Some(reply))
					}
					Err(e) => (e.to_string(), None),
				}
			};

			if let Err(e) = self.source.answer_callback(&callback.id, &answer).await {
				warn!("failed to answer callback: {}", e);
			}
			if let (Some(reply), Some(message)) = (chat_reply, callback.message) {
				if let Err(e) = self.source.reply(message.chat.id, &reply).await {
					warn!(chat_id = message.chat.id, "failed to send control reply: {}", e);
				}
			}
		}
	}

	/// Polls for updates until cancelled
	pub async fn run(&self, cancel: CancellationToken) {
		info!(chats = self.allowed_chats.len(), "control listener started");
		let mut offset = 0i64;

		while !cancel.is_cancelled() {
			let result = tokio::select! {
				biased;
				_ = cancel.cancelled() => break,
				result = self.source.get_updates(offset, self.poll_wait) => result,
			};

			match result {
				Ok(updates) => {
					for update in updates {
						offset = offset.max(update.update_id + 1);
						self.handle_update(update).await;
					}
				}
				Err(e) => {
					warn!("failed to poll control updates: {}", e);
					if !sleep_or_cancel(&cancel, self.error_delay).await {
						break;
					}
				}
			}
		}
		info!("control listener stopped");
	}
}
