//! Prep countdown on tokio timers

use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info};

use super::{RepeatingScheduler, TaskId};
use crate::{controller::Command, state::AppState};

/// Scheduler that runs each countdown as a tokio task sending its id every period
#[derive(Debug)]
pub struct TokioScheduler {
    tick_tx: mpsc::UnboundedSender<TaskId>,
    handles: HashMap<TaskId, JoinHandle<()>>,
}

impl TokioScheduler {
    /// Create a scheduler and the receiving end its ticks arrive on
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TaskId>) {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        (
            Self {
                tick_tx,
                handles: HashMap::new(),
            },
            tick_rx,
        )
    }

    pub fn active_count(&self) -> usize {
        self.handles.len()
    }
}

impl RepeatingScheduler for TokioScheduler {
    fn schedule(&mut self, task: TaskId, period: Duration) {
        let tx = self.tick_tx.clone();
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(task).is_err() {
                    debug!("Tick receiver closed, stopping {}", task);
                    break;
                }
            }
        });
        if let Some(previous) = self.handles.insert(task, handle) {
            previous.abort();
        }
    }

    fn cancel(&mut self, task: TaskId) {
        if let Some(handle) = self.handles.remove(&task) {
            handle.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }
}

/// Background task that feeds countdown ticks into the walkthrough
pub async fn countdown_task(state: Arc<AppState>, mut tick_rx: mpsc::UnboundedReceiver<TaskId>) {
    info!("Starting countdown task");

    while let Some(task) = tick_rx.recv().await {
        if let Err(e) = state.apply(Command::Tick(task)) {
            error!("Failed to apply countdown tick: {}", e);
        }
    }

    info!("Countdown task stopped");
}
