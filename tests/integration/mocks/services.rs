//! Mock implementations of the messaging collaborators.

use async_trait::async_trait;
use buy_alert_monitor::{
	models::NotificationContent,
	services::{
		control::{ControlReply, Update, UpdateSource},
		notification::{NotificationError, Notifier},
	},
};
use mockall::mock;
use std::time::Duration;

mock! {
	pub Notifier {}

	#[async_trait]
	impl Notifier for Notifier {
		async fn send(
			&self,
			destination: &str,
			content: &NotificationContent,
		) -> Result<(), NotificationError>;
	}
}

mock! {
	pub UpdateSource {}

	#[async_trait]
	impl UpdateSource for UpdateSource {
		async fn get_updates(&self, offset: i64, wait: Duration) -> Result<Vec<Update>, NotificationError>;
		async fn reply(&self, chat_id: i64, reply: &ControlReply) -> Result<(), NotificationError>;
		async fn answer_callback(&self, callback_id: &str, text: &str) -> Result<(), NotificationError>;
	}
}
