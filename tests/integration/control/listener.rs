use std::sync::Arc;

use crate::integration::mocks::{MockUpdateSource, TARGET};
use async_trait::async_trait;
use buy_alert_monitor::{
	models::{LoopExit, LoopId},
	services::{
		control::{CallbackQuery, Chat, ControlListener, ControlSurface, Message, Update},
		lifecycle::{CancellationToken, ManagedLoop, TaskLifecycleController},
	},
};
use mockall::predicate::{always, eq};

struct IdleLoop;

#[async_trait]
impl ManagedLoop for IdleLoop {
	async fn run(&self, cancel: CancellationToken) -> LoopExit {
		cancel.cancelled().await;
		LoopExit::Cancelled
	}
}

fn controller() -> Arc<TaskLifecycleController> {
	Arc::new(TaskLifecycleController::new(Arc::new(IdleLoop), Arc::new(IdleLoop)))
}

fn listener(
	source: MockUpdateSource,
	controller: Arc<TaskLifecycleController>,
) -> ControlListener<MockUpdateSource> {
	ControlListener::new(
		Arc::new(source),
		ControlSurface::new(controller),
		vec!["-1001".to_string()],
	)
}

fn message(chat_id: i64, text: &str) -> Message {
	Message {
		message_id: 1,
		chat: Chat {
			id: chat_id,
			username: None,
		},
		text: Some(text.to_string()),
	}
}

fn text_update(chat_id: i64, text: &str) -> Update {
	Update {
		update_id: 1,
		message: Some(message(chat_id, text)),
		callback_query: None,
	}
}

#[tokio::test]
async fn test_command_from_allowed_chat_is_executed() {
	let controller = controller();
	let mut source = MockUpdateSource::new();
	source
		.expect_reply()
		.with(eq(-1001), always())
		.times(1)
		.returning(|_, reply| {
			assert_eq!(reply.text, "Buy alerts started");
			Ok(())
		});

	listener(source, controller.clone())
		.handle_update(text_update(-1001, "/start_alerts"))
		.await;

	assert_eq!(
		controller.status(LoopId::AlertPolling).await.to_string(),
		"Buy alerts running"
	);
	controller.shutdown().await;
}

#[tokio::test]
async fn test_command_from_unlisted_chat_is_ignored() {
	let controller = controller();
	let mut source = MockUpdateSource::new();
	source.expect_reply().never();

	listener(source, controller.clone())
		.handle_update(text_update(42, "/start_alerts"))
		.await;

	assert_eq!(
		controller.status(LoopId::AlertPolling).await.to_string(),
		"Buy alerts not running"
	);
}

#[tokio::test]
async fn test_plain_chat_text_gets_no_reply() {
	let mut source = MockUpdateSource::new();
	source.expect_reply().never();

	listener(source, controller())
		.handle_update(text_update(-1001, &format!("sent to {}", TARGET)))
		.await;
}

#[tokio::test]
async fn test_menu_button_answers_callback_and_replies() {
	let controller = controller();
	let mut source = MockUpdateSource::new();
	source
		.expect_answer_callback()
		.withf(|id, text| id == "cb-1" && text == "Reminder broadcast not running")
		.times(1)
		.returning(|_, _| Ok(()));
	source
		.expect_reply()
		.times(1)
		.returning(|_, reply| {
			assert_eq!(reply.text, "Reminder broadcast not running");
			Ok(())
		});

	let update = Update {
		update_id: 2,
		message: None,
		callback_query: Some(CallbackQuery {
			id: "cb-1".to_string(),
			data: Some("stop_reminder".to_string()),
			message: Some(message(-1001, "Choose an action:")),
		}),
	};
	listener(source, controller).handle_update(update).await;
}

#[tokio::test]
async fn test_run_advances_offset_and_stops_on_cancel() {
	let controller = controller();
	let cancel = CancellationToken::new();
	let mut source = MockUpdateSource::new();

	let mut sequence = mockall::Sequence::new();
	source
		.expect_get_updates()
		.with(eq(0), always())
		.times(1)
		.in_sequence(&mut sequence)
		.returning(|_, _| {
			Ok(vec![Update {
				update_id: 7,
				..text_update(-1001, "/status")
			}])
		});
	let stop = cancel.clone();
	source
		.expect_get_updates()
		.with(eq(8), always())
		.times(1)
		.in_sequence(&mut sequence)
		.returning(move |_, _| {
			stop.cancel();
			Ok(vec![])
		});
	source.expect_reply().times(1).returning(|_, reply| {
		assert_eq!(reply.text, "Buy alerts not running\nReminder broadcast not running");
		Ok(())
	});

	listener(source, controller).run(cancel).await;
}
