//! Subset of the Telegram `getUpdates` payload used by the control surface.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Update {
	pub update_id: i64,
	#[serde(default)]
	pub message: Option<Message>,
	#[serde(default)]
	pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
	pub message_id: i64,
	pub chat: Chat,
	#[serde(default)]
	pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Chat {
	pub id: i64,
	#[serde(default)]
	pub username: Option<String>,
}

impl Chat {
	/// Whether this chat appears in `allowed`, by numeric id or `@username`
	pub fn is_listed(&self, allowed: &[String]) -> bool {
		let id = self.id.to_string();
		allowed.iter().any(|entry| {
			entry == &id
				|| self
					.username
					.as_deref()
					.is_some_and(|name| entry.trim_start_matches('@').eq_ignore_ascii_case(name))
		})
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CallbackQuery {
	pub id: String,
	#[serde(default)]
	pub data: Option<String>,
	#[serde(default)]
	pub message: Option<Message>,
}
