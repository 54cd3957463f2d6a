//! Control command parsing.

use std::str::FromStr;
use thiserror::Error;

use crate::models::LoopId;

/// Operation requested from the control surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
	Start(LoopId),
	Stop(LoopId),
	Status,
	Menu,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandParseError {
	#[error("not a command")]
	NotACommand,
	#[error("unknown command: {0}")]
	Unknown(String),
}

impl ControlCommand {
	/// Callback payload used by the menu buttons
	pub fn callback_data(&self) -> &'static str {
		match self {
			ControlCommand::Start(LoopId::AlertPolling) => "start_alerts",
			ControlCommand::Stop(LoopId::AlertPolling) => "stop_alerts",
			ControlCommand::Start(LoopId::ReminderBroadcast) => "start_reminder",
			ControlCommand::Stop(LoopId::ReminderBroadcast) => "stop_reminder",
			ControlCommand::Status => "status",
			ControlCommand::Menu => "menu",
		}
	}

	/// Parses a menu button payload, e.g. `stop_reminder`
	pub fn from_callback(data: &str) -> Result<Self, CommandParseError> {
		match data.trim() {
			"start_alerts" => Ok(ControlCommand::Start(LoopId::AlertPolling)),
			"stop_alerts" => Ok(ControlCommand::Stop(LoopId::AlertPolling)),
			"start_reminder" => Ok(ControlCommand::Start(LoopId::ReminderBroadcast)),
			"stop_reminder" => Ok(ControlCommand::Stop(LoopId::ReminderBroadcast)),
			"status" => Ok(ControlCommand::Status),
			"menu" | "start" | "help" => Ok(ControlCommand::Menu),
			other => Err(CommandParseError::Unknown(other.to_string())),
		}
	}
}

impl FromStr for ControlCommand {
	type Err = CommandParseError;

	/// Parses chat text such as `/start_alerts` or `/status@SomeBot extra words`
	fn from_str(text: &str) -> Result<Self, Self::Err> {
		let first = text.split_whitespace().next().unwrap_or_default();
		let command = first.strip_prefix('/').ok_or(CommandParseError::NotACommand)?;
		let command = command.split('@').next().unwrap_or_default();
		Self::from_callback(&command.to_ascii_lowercase())
	}
}
