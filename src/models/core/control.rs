//! Loop identities and the status values reported by the lifecycle controller.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical name of a managed background loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopId {
	/// Block polling and payment alerts
	AlertPolling,
	/// Periodic reminder broadcast
	ReminderBroadcast,
}

impl LoopId {
	pub const ALL: [LoopId; 2] = [LoopId::AlertPolling, LoopId::ReminderBroadcast];

	/// Human readable name used in status replies
	pub fn display_name(&self) -> &'static str {
		match self {
			LoopId::AlertPolling => "Buy alerts",
			LoopId::ReminderBroadcast => "Reminder broadcast",
		}
	}

	/// Label used for metrics and log fields
	pub fn as_str(&self) -> &'static str {
		match self {
			LoopId::AlertPolling => "alert_polling",
			LoopId::ReminderBroadcast => "reminder_broadcast",
		}
	}
}

impl fmt::Display for LoopId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// Outcome of a lifecycle control operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlStatus {
	Started(LoopId),
	AlreadyRunning(LoopId),
	Stopped(LoopId),
	NotRunning(LoopId),
	Running(LoopId),
}

impl ControlStatus {
	pub fn loop_id(&self) -> LoopId {
		match self {
			ControlStatus::Started(id)
			| ControlStatus::AlreadyRunning(id)
			| ControlStatus::Stopped(id)
			| ControlStatus::NotRunning(id)
			| ControlStatus::Running(id) => *id,
		}
	}
}

impl fmt::Display for ControlStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ControlStatus::Started(id) => write!(f, "{} started", id.display_name()),
			ControlStatus::AlreadyRunning(id) => {
				write!(f, "{} already running", id.display_name())
			}
			ControlStatus::Stopped(id) => write!(f, "{} stopped", id.display_name()),
			ControlStatus::NotRunning(id) => write!(f, "{} not running", id.display_name()),
			ControlStatus::Running(id) => write!(f, "{} running", id.display_name()),
		}
	}
}

/// Terminal state returned by a loop's run method
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopExit {
	/// Cancellation was requested and the loop exited cleanly
	Cancelled,
	/// The initial connection failed, the loop never started scanning
	NotStarted(String),
}
