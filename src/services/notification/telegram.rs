//! Telegram notification implementation.
//!
//! Talks to the Telegram Bot API. Content with an image is sent with `sendPhoto` and
//! the text as caption, plain content with `sendMessage`. Link buttons are rendered
//! as an inline keyboard with one button per row. Text uses the legacy Markdown parse
//! mode.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use crate::{
	models::NotificationContent,
	services::notification::{NotificationError, Notifier},
};

/// Default Bot API endpoint
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Implementation of Telegram notifications via the Bot API
#[derive(Clone)]
pub struct TelegramNotifier {
	/// HTTP client, shared by every request
	client: Client,
	/// Bot API base URL without trailing slash
	base_url: String,
	/// Telegram bot token
	token: String,
	/// Per-request timeout
	timeout: Duration,
}

impl TelegramNotifier {
	/// Creates a new Telegram notifier instance
	///
	/// # Arguments
	/// * `base_url` - Bot API URL, `None` for the public endpoint
	/// * `token` - Telegram bot token
	/// * `timeout` - Request timeout; long polls add their own wait on top
	pub fn new(
		base_url: Option<String>,
		token: String,
		timeout: Duration,
	) -> Result<Self, NotificationError> {
		if token.trim().is_empty() {
			return Err(NotificationError::config_error("Telegram bot token is empty"));
		}

		let client = Client::builder()
			.timeout(timeout)
			.build()
			.map_err(|e| NotificationError::config_error(format!("Failed to build client: {}", e)))?;

		Ok(Self {
			client,
			base_url: base_url
				.unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string())
				.trim_end_matches('/')
				.to_string(),
			token,
			timeout,
		})
	}

	/// Builds the URL of a Bot API method
	pub fn method_url(&self, method: &str) -> String {
		format!("{}/bot{}/{}", self.base_url, self.token, method)
	}

	/// Builds the `sendPhoto` or `sendMessage` call for `content`
	///
	/// # Returns
	/// * `(&str, Value)` - The method name and its JSON body
	pub fn build_payload(&self, chat_id: &str, content: &NotificationContent) -> (&'static str, Value) {
		let mut payload = match &content.image_url {
			Some(image_url) => json!({
				"chat_id": chat_id,
				"photo": image_url,
				"caption": content.text,
				"parse_mode": "Markdown",
			}),
			None => json!({
				"chat_id": chat_id,
				"text": content.text,
				"parse_mode": "Markdown",
				"disable_web_page_preview": true,
			}),
		};

		if !content.buttons.is_empty() {
			let rows: Vec<Value> = content
				.buttons
				.iter()
				.map(|button| json!([{ "text": button.label, "url": button.url }]))
				.collect();
			payload["reply_markup"] = json!({ "inline_keyboard": rows });
		}

		let method = if content.image_url.is_some() {
			"sendPhoto"
		} else {
			"sendMessage"
		};
		(method, payload)
	}

	/// Calls a Bot API method and returns its `result`
	///
	/// # Arguments
	/// * `method` - Bot API method name, e.g. `sendMessage`
	/// * `body` - JSON parameters
	/// * `extra_timeout` - Added to the client timeout, used by long polling
	pub async fn call_method(
		&self,
		method: &str,
		body: &Value,
		extra_timeout: Option<Duration>,
	) -> Result<Value, NotificationError> {
		let mut request = self.client.post(self.method_url(method)).json(body);
		if let Some(extra) = extra_timeout {
			request = request.timeout(self.timeout + extra);
		}

		let response = request.send().await?;
		let status = response.status();
		let body: Value = response.json().await.map_err(|e| {
			NotificationError::api_error(format!(
				"{} returned undecodable body (HTTP {}): {}",
				method,
				status,
				e.without_url()
			))
		})?;

		if !status.is_success() || body.get("ok").and_then(Value::as_bool) != Some(true) {
			let description = body
				.get("description")
				.and_then(Value::as_str)
				.unwrap_or("no description");
			return Err(NotificationError::api_error(format!(
				"{} failed (HTTP {}): {}",
				method, status, description
			)));
		}

		Ok(body.get("result").cloned().unwrap_or(Value::Null))
	}
}

#[async_trait]
impl Notifier for TelegramNotifier {
	/// Sends a formatted message to Telegram
	///
	/// # Arguments
	/// * `destination` - Chat id or `@channel` name
	/// * `content` - Content to send
	///
	/// # Returns
	/// * `Result<(), NotificationError>` - Success or error
	async fn send(
		&self,
		destination: &str,
		content: &NotificationContent,
	) -> Result<(), NotificationError> {
		let (method, payload) = self.build_payload(destination, content);
		self.call_method(method, &payload, None).await.map(|_| ())
	}
}
