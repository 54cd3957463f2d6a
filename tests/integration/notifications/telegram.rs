use std::time::Duration;

use buy_alert_monitor::services::{
	control::{ControlReply, UpdateSource},
	notification::TelegramNotifier,
};
use mockito::Matcher;
use serde_json::json;

fn notifier(server: &mockito::ServerGuard) -> TelegramNotifier {
	TelegramNotifier::new(Some(server.url()), "test-token".to_string(), Duration::from_secs(5))
		.unwrap()
}

#[tokio::test]
async fn test_get_updates_parses_messages() {
	let mut server = mockito::Server::new_async().await;
	let mock = server
		.mock("POST", "/bottest-token/getUpdates")
		.match_body(Matcher::PartialJson(json!({ "offset": 5, "timeout": 1 })))
		.with_status(200)
		.with_body(
			json!({
				"ok": true,
				"result": [{
					"update_id": 5,
					"message": {
						"message_id": 3,
						"chat": { "id": -1001, "type": "supergroup" },
						"text": "/status"
					}
				}]
			})
			.to_string(),
		)
		.create_async()
		.await;

	let updates = notifier(&server)
		.get_updates(5, Duration::from_secs(1))
		.await
		.unwrap();

	assert_eq!(updates.len(), 1);
	assert_eq!(updates[0].message.as_ref().unwrap().text.as_deref(), Some("/status"));
	mock.assert_async().await;
}

#[tokio::test]
async fn test_menu_reply_carries_callback_keyboard() {
	let mut server = mockito::Server::new_async().await;
	let mock = server
		.mock("POST", "/bottest-token/sendMessage")
		.match_body(Matcher::PartialJson(json!({
			"chat_id": -1001,
			"reply_markup": {
				"inline_keyboard": [
					[{ "callback_data": "start_alerts" }],
					[{ "callback_data": "stop_alerts" }],
					[{ "callback_data": "start_reminder" }],
					[{ "callback_data": "stop_reminder" }],
					[{ "callback_data": "status" }]
				]
			}
		})))
		.with_status(200)
		.with_body(r#"{"ok":true,"result":{"message_id":9}}"#)
		.create_async()
		.await;

	let reply = ControlReply {
		text: "Choose an action:".to_string(),
		show_menu: true,
	};
	notifier(&server).reply(-1001, &reply).await.unwrap();
	mock.assert_async().await;
}

#[tokio::test]
async fn test_answer_callback() {
	let mut server = mockito::Server::new_async().await;
	let mock = server
		.mock("POST", "/bottest-token/answerCallbackQuery")
		.match_body(Matcher::PartialJson(json!({ "callback_query_id": "cb-1" })))
		.with_status(200)
		.with_body(r#"{"ok":true,"result":true}"#)
		.create_async()
		.await;

	notifier(&server)
		.answer_callback("cb-1", "Buy alerts started")
		.await
		.unwrap();
	mock.assert_async().await;
}
