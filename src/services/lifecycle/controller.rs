//! Task lifecycle controller.
//!
//! Each loop identity has at most one live instance. Starting a running loop reports
//! `AlreadyRunning`, stopping an idle one reports `NotRunning`. A loop whose task has
//! returned on its own (for example because its first connection attempt failed)
//! counts as not running and can be started again.

use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::{info, warn};

use crate::{
	models::{ControlStatus, LoopExit, LoopId},
	services::lifecycle::CancellationToken,
	utils::metrics::set_loop_running,
};

/// A long-running loop that can be started and cancelled by the controller
#[async_trait]
pub trait ManagedLoop: Send + Sync + 'static {
	/// Runs until cancelled or until the loop cannot start
	///
	/// # Arguments
	/// * `cancel` - Token checked at iteration boundaries and during every sleep
	///
	/// # Returns
	/// * `LoopExit` - Terminal state of the loop; never an error
	async fn run(&self, cancel: CancellationToken) -> LoopExit;
}

/// Bookkeeping for one spawned loop instance
struct LoopHandle {
	cancel: CancellationToken,
	task: JoinHandle<LoopExit>,
}

impl LoopHandle {
	/// Running means spawned, not finished and not asked to stop
	fn is_running(&self) -> bool {
		!self.task.is_finished() && !self.cancel.is_cancelled()
	}
}

/// Starts and stops the managed loops by identity
pub struct TaskLifecycleController {
	loops: HashMap<LoopId, Arc<dyn ManagedLoop>>,
	handles: Mutex<HashMap<LoopId, LoopHandle>>,
}

impl TaskLifecycleController {
	/// Creates a controller for the alert polling and reminder broadcast loops
	pub fn new(alert_polling: Arc<dyn ManagedLoop>, reminder: Arc<dyn ManagedLoop>) -> Self {
		let loops = HashMap::from([
			(LoopId::AlertPolling, alert_polling),
			(LoopId::ReminderBroadcast, reminder),
		]);
		Self {
			loops,
			handles: Mutex::new(HashMap::new()),
		}
	}

	/// Starts a loop unless an instance is already running
	///
	/// Returns without waiting for a stopped predecessor. The new instance waits for
	/// it inside its own task, so at most one instance per loop runs at any time.
	pub async fn start(&self, loop_id: LoopId) -> ControlStatus {
		let mut handles = self.handles.lock().await;

		let previous = match handles.remove(&loop_id) {
			Some(previous) if previous.is_running() => {
				handles.insert(loop_id, previous);
				return ControlStatus::AlreadyRunning(loop_id);
			}
			Some(previous) => Some(previous.task),
			None => None,
		};

		let Some(managed) = self.loops.get(&loop_id).cloned() else {
			return ControlStatus::NotRunning(loop_id);
		};

		let cancel = CancellationToken::new();
		let token = cancel.clone();
		let task = tokio::spawn(async move {
			if let Some(previous) = previous {
				if let Err(e) = previous.await {
					warn!(loop_id = %loop_id, "previous instance ended abnormally: {}", e);
				}
			}
			if token.is_cancelled() {
				info!(loop_id = %loop_id, "stopped before the previous instance settled");
				return LoopExit::Cancelled;
			}

			set_loop_running(loop_id, true);
			let exit = managed.run(token).await;
			match &exit {
				LoopExit::Cancelled => info!(loop_id = %loop_id, "loop stopped"),
				LoopExit::NotStarted(reason) => {
					warn!(loop_id = %loop_id, "loop could not start: {}", reason)
				}
			}
			set_loop_running(loop_id, false);
			exit
		});

		handles.insert(loop_id, LoopHandle { cancel, task });
		info!(loop_id = %loop_id, "loop started");
		ControlStatus::Started(loop_id)
	}

	/// Requests cancellation of a running loop and returns without waiting
	pub async fn stop(&self, loop_id: LoopId) -> ControlStatus {
		let handles = self.handles.lock().await;
		match handles.get(&loop_id) {
			Some(handle) if handle.is_running() => {
				handle.cancel.cancel();
				info!(loop_id = %loop_id, "stop requested");
				ControlStatus::Stopped(loop_id)
			}
			_ => ControlStatus::NotRunning(loop_id),
		}
	}

	/// Reports whether a loop is running
	pub async fn status(&self, loop_id: LoopId) -> ControlStatus {
		let handles = self.handles.lock().await;
		match handles.get(&loop_id) {
			Some(handle) if handle.is_running() => ControlStatus::Running(loop_id),
			_ => ControlStatus::NotRunning(loop_id),
		}
	}

	/// Reports the state of every loop in a stable order
	pub async fn status_all(&self) -> Vec<ControlStatus> {
		let mut statuses = Vec::with_capacity(LoopId::ALL.len());
		for loop_id in LoopId::ALL {
			statuses.push(self.status(loop_id).await);
		}
		statuses
	}

	/// Cancels every loop and waits for all of them to settle
	pub async fn shutdown(&self) {
		let drained: Vec<(LoopId, LoopHandle)> = self.handles.lock().await.drain().collect();
		for (_, handle) in &drained {
			handle.cancel.cancel();
		}
		for (loop_id, handle) in drained {
			if let Err(e) = handle.task.await {
				warn!(loop_id = %loop_id, "loop task ended abnormally: {}", e);
			}
		}
		info!("all loops stopped");
	}
}
