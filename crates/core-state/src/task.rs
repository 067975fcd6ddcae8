//! Cancellable background work.
//!
//! At most one task runs at a time. The worker owns nothing but its closure
//! and a [`CancelToken`]; it reports back once through a single-slot
//! channel with commands for the owning thread to apply. While a task runs
//! the editor sits in [`InputMode::Task`].

use crate::EditorState;
use crate::command::Command;
use crate::mode::InputMode;
use crate::status::StatusMsg;
use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError, bounded};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Cooperative cancellation flag shared with a worker.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("task was cancelled")]
    Cancelled,
    #[error("{0}")]
    Failed(String),
    #[error("task worker exited without a result")]
    Disconnected,
}

#[derive(Debug)]
pub struct TaskResult {
    pub task_id: u64,
    pub outcome: Result<Vec<Command>, TaskError>,
}

#[derive(Debug)]
pub(crate) struct TaskState {
    id: u64,
    cancel: CancelToken,
    receiver: Receiver<TaskResult>,
    prev_input_mode: InputMode,
}

impl EditorState {
    /// Run `f` on a worker thread, cancelling any task already running.
    pub fn start_task<F>(&mut self, name: &str, f: F)
    where
        F: FnOnce(&CancelToken) -> Result<Vec<Command>, TaskError> + Send + 'static,
    {
        self.cancel_task_if_running();

        self.next_task_id += 1;
        let task_id = self.next_task_id;
        let cancel = CancelToken::new();
        let (sender, receiver) = bounded(1);
        let prev_input_mode = self.input_mode;

        let worker_token = cancel.clone();
        let spawned = thread::Builder::new()
            .name(format!("corvid-task-{name}"))
            .spawn(move || {
                let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| f(&worker_token)))
                    .unwrap_or_else(|_| Err(TaskError::Failed("task panicked".to_string())));
                // The receiver is gone once the task was cancelled.
                let _ = sender.send(TaskResult { task_id, outcome });
            });
        if let Err(e) = spawned {
            error!(target: "state.task", task_id, error = %e, "task_spawn_failed");
            self.set_status_msg(StatusMsg::error(format!("Could not start task: {e}")));
            return;
        }

        info!(target: "state.task", task_id, name, "task_started");
        self.task = Some(TaskState {
            id: task_id,
            cancel,
            receiver,
            prev_input_mode,
        });
        self.set_input_mode_raw(InputMode::Task);
    }

    /// Signal the running task and return to the mode it interrupted. Its
    /// result, if it still produces one, is discarded.
    pub fn cancel_task_if_running(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };
        info!(target: "state.task", task_id = task.id, "task_cancelled");
        task.cancel.cancel();
        self.set_input_mode_raw(task.prev_input_mode);
    }

    pub fn is_task_running(&self) -> bool {
        self.task.is_some()
    }

    /// Channel the running task reports on, for callers that multiplex it
    /// with other event sources. Hand what it yields to
    /// [`EditorState::apply_task_result`].
    pub fn task_result_receiver(&self) -> Option<Receiver<TaskResult>> {
        self.task.as_ref().map(|t| t.receiver.clone())
    }

    /// Apply the task result if one is ready. Returns whether a result was
    /// applied.
    pub fn poll_task_result(&mut self) -> bool {
        let Some(task) = self.task.as_ref() else {
            return false;
        };
        match task.receiver.try_recv() {
            Ok(result) => {
                self.apply_task_result(result);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                let task_id = task.id;
                self.apply_task_result(TaskResult {
                    task_id,
                    outcome: Err(TaskError::Disconnected),
                });
                true
            }
        }
    }

    /// Block until the running task reports, then apply its result.
    pub fn wait_for_task(&mut self) {
        let Some(task) = self.task.as_ref() else {
            return;
        };
        let result = task.receiver.recv().unwrap_or(TaskResult {
            task_id: task.id,
            outcome: Err(TaskError::Disconnected),
        });
        self.apply_task_result(result);
    }

    /// Like [`EditorState::wait_for_task`], but gives up after `timeout`.
    /// A task that has not reported by then is cancelled with an error
    /// status. Returns whether the task finished on its own.
    pub fn wait_for_task_timeout(&mut self, timeout: Duration) -> bool {
        let Some(task) = self.task.as_ref() else {
            return true;
        };
        let task_id = task.id;
        let result = match task.receiver.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Disconnected) => TaskResult {
                task_id,
                outcome: Err(TaskError::Disconnected),
            },
            Err(RecvTimeoutError::Timeout) => {
                warn!(target: "state.task", task_id, timeout_ms = timeout.as_millis() as u64, "task_timed_out");
                self.cancel_task_if_running();
                self.set_status_msg(StatusMsg::error("Task timed out"));
                return false;
            }
        };
        self.apply_task_result(result);
        true
    }

    /// Finish the task that produced `result`. Results from a task that has
    /// since been cancelled or replaced are ignored.
    pub fn apply_task_result(&mut self, result: TaskResult) {
        match self.task.as_ref() {
            Some(task) if task.id == result.task_id => {}
            _ => {
                debug!(target: "state.task", task_id = result.task_id, "stale_task_result_ignored");
                return;
            }
        }
        let Some(task) = self.task.take() else {
            return;
        };
        self.set_input_mode_raw(task.prev_input_mode);
        match result.outcome {
            Ok(commands) => {
                info!(target: "state.task", task_id = task.id, commands = commands.len(), "task_finished");
                for command in &commands {
                    command.apply(self);
                }
            }
            Err(e) => {
                warn!(target: "state.task", task_id = task.id, error = %e, "task_failed");
                self.set_status_msg(StatusMsg::error(e.to_string()));
            }
        }
    }
}
