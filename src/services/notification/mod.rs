//! Notification service implementation.
//!
//! Turns matched transactions into messages and delivers them:
//!
//! - `Notifier`: the messaging channel interface
//! - `TelegramNotifier`: Telegram Bot API implementation
//! - `MessageBuilder`: renders alert and reminder content
//! - `EventDispatcher`: fans matches of one block out to the notifier

use async_trait::async_trait;

mod dispatcher;
mod error;
mod message;
mod telegram;

pub use dispatcher::EventDispatcher;
pub use error::NotificationError;
pub use message::MessageBuilder;
pub use telegram::TelegramNotifier;

use crate::models::NotificationContent;

/// Interface for messaging channels
#[async_trait]
pub trait Notifier: Send + Sync {
	/// Sends one message
	///
	/// # Arguments
	/// * `destination` - Channel specific recipient (a chat id for Telegram)
	/// * `content` - Text, optional image and link buttons
	///
	/// # Returns
	/// * `Result<(), NotificationError>` - Success or the reason delivery failed
	async fn send(
		&self,
		destination: &str,
		content: &NotificationContent,
	) -> Result<(), NotificationError>;
}
