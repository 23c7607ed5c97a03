//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use crate::{
    controller::{Command, Effect, Snapshot, WalkthroughController},
    recipe::Recipe,
    tasks::{TaskId, TokioScheduler},
};

/// Main application state that owns the walkthrough controller
#[derive(Debug)]
pub struct AppState {
    /// The single walkthrough served by this process
    pub controller: Arc<Mutex<WalkthroughController<TokioScheduler>>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last user action and when it happened
    pub last_action: Arc<Mutex<Option<(String, DateTime<Utc>)>>>,
    /// Channel for snapshot updates
    pub snapshot_tx: watch::Sender<Snapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<Snapshot>,
}

impl AppState {
    /// Create a new AppState for `recipe`
    ///
    /// The returned receiver carries countdown ticks and should be handed to
    /// `countdown_task`. Commands that start a countdown must run inside a
    /// tokio runtime.
    pub fn new(port: u16, host: String, recipe: Recipe) -> (Self, mpsc::UnboundedReceiver<TaskId>) {
        let (scheduler, tick_rx) = TokioScheduler::new();
        let controller = WalkthroughController::new(recipe, scheduler);
        let (snapshot_tx, snapshot_rx) = watch::channel(controller.snapshot());

        let state = Self {
            controller: Arc::new(Mutex::new(controller)),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        };
        (state, tick_rx)
    }

    /// Dispatch a command and publish the resulting snapshot
    ///
    /// The snapshot is published and the last action recorded while the
    /// controller lock is held, so the watch channel and `/status` always
    /// follow dispatch order.
    pub fn apply(&self, command: Command) -> Result<(Vec<Effect>, Snapshot), String> {
        let mut controller = self.controller.lock()
            .map_err(|e| format!("Failed to lock walkthrough: {}", e))?;

        let effects = controller.dispatch(command);
        let snapshot = controller.snapshot();

        // Ticks are not user actions
        if !matches!(command, Command::Tick(_)) {
            if let Ok(mut last_action) = self.last_action.lock() {
                *last_action = Some((command.name().to_string(), Utc::now()));
            }
            debug!("Applied {} with {} effects", command.name(), effects.len());
        }

        if let Err(e) = self.snapshot_tx.send(snapshot.clone()) {
            warn!("Failed to send snapshot update: {}", e);
        }
        drop(controller);

        Ok((effects, snapshot))
    }

    /// Get current walkthrough snapshot
    pub fn get_snapshot(&self) -> Result<Snapshot, String> {
        self.controller.lock()
            .map(|controller| controller.snapshot())
            .map_err(|e| format!("Failed to lock walkthrough: {}", e))
    }

    /// Subscribe to snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        match self.last_action.lock().ok().and_then(|a| a.clone()) {
            Some((action, time)) => (Some(action), Some(time)),
            None => (None, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::tasks::countdown_task;

    #[tokio::test]
    async fn apply_tracks_last_action_and_publishes() {
        let (state, _tick_rx) = AppState::new(0, "127.0.0.1".to_string(), Recipe::sample());
        let mut rx = state.subscribe();

        let (effects, snapshot) = state.apply(Command::Start).unwrap();
        assert_eq!(effects, vec![Effect::ScrollIntoView { index: 0 }]);
        assert_eq!(snapshot.cursor, 0);

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().cursor, 0);
        assert_eq!(state.get_last_action().0.as_deref(), Some("start"));
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_task_drives_timer() {
        let recipe = Recipe::sample().with_prep_minutes(Some(1));
        let (state, tick_rx) = AppState::new(0, "127.0.0.1".to_string(), recipe);
        let state = Arc::new(state);
        tokio::spawn(countdown_task(Arc::clone(&state), tick_rx));

        state.apply(Command::Start).unwrap();
        tokio::time::sleep(Duration::from_millis(5500)).await;
        assert_eq!(state.get_snapshot().unwrap().timer.text, "00:55");

        tokio::time::sleep(Duration::from_secs(60)).await;
        let snapshot = state.get_snapshot().unwrap();
        assert_eq!(snapshot.timer.text, "00:00");
        assert!(snapshot.timer.time_up);
        assert!(!snapshot.timer.running);
        // Ticks do not count as user actions
        assert_eq!(state.get_last_action().0.as_deref(), Some("start"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn published_snapshot_matches_controller_under_concurrent_ticks() {
        let recipe = Recipe::sample().with_prep_minutes(Some(1));
        let (state, _tick_rx) = AppState::new(0, "127.0.0.1".to_string(), recipe);
        let state = Arc::new(state);
        let rx = state.subscribe();

        state.apply(Command::Start).unwrap();
        let task = state.controller.lock().unwrap().countdown().unwrap();

        let mut workers = Vec::new();
        for worker in 0..4 {
            let state = Arc::clone(&state);
            workers.push(tokio::task::spawn_blocking(move || {
                for i in 0..200 {
                    let command = match (worker % 2, i % 3) {
                        (0, _) => Command::Tick(task),
                        (_, 0) => Command::Reset,
                        (_, 1) => Command::Start,
                        _ => Command::Advance,
                    };
                    state.apply(command).unwrap();
                }
            }));
        }
        for worker in workers {
            worker.await.unwrap();
        }

        assert_eq!(*rx.borrow(), state.get_snapshot().unwrap());

        // A tick followed by a reset leaves the channel on the reset state
        state.apply(Command::Start).unwrap();
        let task = state.controller.lock().unwrap().countdown().unwrap();
        state.apply(Command::Tick(task)).unwrap();
        state.apply(Command::Reset).unwrap();
        let published = rx.borrow().clone();
        assert_eq!(published, state.get_snapshot().unwrap());
        assert_eq!(published.cursor, -1);
        assert!(!published.timer.running);
        assert_eq!(published.timer.text, "01:00");
    }

    #[tokio::test]
    async fn last_action_and_time_move_together() {
        let (state, _tick_rx) = AppState::new(0, "127.0.0.1".to_string(), Recipe::sample());
        assert_eq!(state.get_last_action(), (None, None));

        state.apply(Command::Start).unwrap();
        let (action, started_at) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("start"));

        state.apply(Command::TogglePanel(crate::state::Panel::Steps)).unwrap();
        let (action, toggled_at) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("toggle-steps"));
        assert!(toggled_at.unwrap() >= started_at.unwrap());
    }

    #[test]
    fn uptime_format() {
        let (state, _tick_rx) = AppState::new(0, "127.0.0.1".to_string(), Recipe::sample());
        assert!(state.get_uptime().ends_with('s'));
    }
}
