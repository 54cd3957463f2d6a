//! Mapping of control commands onto the lifecycle controller.

use std::sync::Arc;

use crate::{
	models::LoopId,
	services::{control::ControlCommand, lifecycle::TaskLifecycleController},
};

/// Text sent back after a command, optionally with the action menu attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlReply {
	pub text: String,
	pub show_menu: bool,
}

impl ControlReply {
	fn text(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			show_menu: false,
		}
	}
}

/// Executes control commands; every command yields a definite reply
pub struct ControlSurface {
	controller: Arc<TaskLifecycleController>,
}

impl ControlSurface {
	pub fn new(controller: Arc<TaskLifecycleController>) -> Self {
		Self { controller }
	}

	/// Buttons of the action menu as `(label, command)`, one per row
	pub fn menu() -> [(&'static str, ControlCommand); 5] {
		[
			("▶️ Start buy alerts", ControlCommand::Start(LoopId::AlertPolling)),
			("⏹ Stop buy alerts", ControlCommand::Stop(LoopId::AlertPolling)),
			("▶️ Start reminder", ControlCommand::Start(LoopId::ReminderBroadcast)),
			("⏹ Stop reminder", ControlCommand::Stop(LoopId::ReminderBroadcast)),
			("ℹ️ Status", ControlCommand::Status),
		]
	}

	pub async fn execute(&self, command: ControlCommand) -> ControlReply {
		match command {
			ControlCommand::Start(loop_id) => {
				ControlReply::text(self.controller.start(loop_id).await.to_string())
			}
			ControlCommand::Stop(loop_id) => {
				ControlReply::text(self.controller.stop(loop_id).await.to_string())
			}
			ControlCommand::Status => {
				let lines: Vec<String> = self
					.controller
					.status_all()
					.await
					.iter()
					.map(ToString::to_string)
					.collect();
				ControlReply::text(lines.join("\n"))
			}
			ControlCommand::Menu => ControlReply {
				text: "Choose an action:".to_string(),
				show_menu: true,
			},
		}
	}
}
