use std::{sync::Arc, time::Duration};

use crate::integration::mocks::{test_app_config, MockBlockChainClient, MockNotifier};
use buy_alert_monitor::{
	bootstrap::build_controller,
	models::{ControlStatus, LoopId},
};

fn idle_client() -> MockBlockChainClient {
	let mut client = MockBlockChainClient::new();
	client.expect_is_connected().returning(|| true);
	client.expect_get_latest_block_number().returning(|| Ok(100));
	client
}

#[tokio::test]
async fn test_double_start_reports_already_running() {
	let config = test_app_config();
	let (controller, mut progress) =
		build_controller(&config, Arc::new(idle_client()), Arc::new(MockNotifier::new()));

	assert_eq!(
		controller.start(LoopId::AlertPolling).await,
		ControlStatus::Started(LoopId::AlertPolling)
	);
	assert_eq!(
		controller.start(LoopId::AlertPolling).await.to_string(),
		"Buy alerts already running"
	);

	tokio::time::timeout(Duration::from_secs(5), progress.wait_for(|h| *h == Some(100)))
		.await
		.expect("alert loop did not start")
		.unwrap();

	assert_eq!(
		controller.stop(LoopId::AlertPolling).await,
		ControlStatus::Stopped(LoopId::AlertPolling)
	);
	controller.shutdown().await;
}

#[tokio::test]
async fn test_stop_never_started_reports_not_running() {
	let config = test_app_config();
	let (controller, _) =
		build_controller(&config, Arc::new(idle_client()), Arc::new(MockNotifier::new()));

	assert_eq!(
		controller.stop(LoopId::ReminderBroadcast).await.to_string(),
		"Reminder broadcast not running"
	);
	assert_eq!(
		controller.stop(LoopId::AlertPolling).await.to_string(),
		"Buy alerts not running"
	);
}

#[tokio::test]
async fn test_alert_loop_without_node_ends_not_running() {
	let config = test_app_config();
	let mut client = MockBlockChainClient::new();
	client.expect_is_connected().returning(|| false);
	let (controller, _) = build_controller(&config, Arc::new(client), Arc::new(MockNotifier::new()));

	controller.start(LoopId::AlertPolling).await;
	tokio::time::sleep(Duration::from_millis(50)).await;

	assert_eq!(
		controller.status(LoopId::AlertPolling).await,
		ControlStatus::NotRunning(LoopId::AlertPolling)
	);
}

#[tokio::test(start_paused = true)]
async fn test_reminder_stopped_before_first_interval_sends_nothing() {
	let config = test_app_config();
	let mut notifier = MockNotifier::new();
	notifier.expect_send().never();
	let (controller, _) = build_controller(&config, Arc::new(idle_client()), Arc::new(notifier));

	controller.start(LoopId::ReminderBroadcast).await;
	tokio::time::sleep(config.reminder_interval / 2).await;
	assert_eq!(
		controller.stop(LoopId::ReminderBroadcast).await,
		ControlStatus::Stopped(LoopId::ReminderBroadcast)
	);
	controller.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_loops_are_independent() {
	let config = test_app_config();
	let mut notifier = MockNotifier::new();
	notifier.expect_send().returning(|_, _| Ok(()));
	let (controller, _) = build_controller(&config, Arc::new(idle_client()), Arc::new(notifier));

	controller.start(LoopId::AlertPolling).await;
	controller.start(LoopId::ReminderBroadcast).await;
	controller.stop(LoopId::ReminderBroadcast).await;
	tokio::time::sleep(Duration::from_secs(1)).await;

	assert_eq!(
		controller.status_all().await,
		vec![
			ControlStatus::Running(LoopId::AlertPolling),
			ControlStatus::NotRunning(LoopId::ReminderBroadcast),
		]
	);
	controller.shutdown().await;
}
