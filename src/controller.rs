//! Recipe walkthrough controller
//!
//! Every user action and every countdown tick enters through
//! [`WalkthroughController::dispatch`]. The controller never touches a clock
//! directly; it asks its [`RepeatingScheduler`] to fire ticks and tracks the
//! single live countdown by [`TaskId`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    recipe::Recipe,
    state::{
        walkthrough_state::Advance, Controls, Panel, Panels, StepSequence, StepStatus,
        TimerState, WalkthroughState,
    },
    tasks::{ManualScheduler, RepeatingScheduler, TaskId},
};

/// Countdown tick period
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// How long the completion glow stays on the progress bar
pub const COMPLETION_PULSE_MS: u64 = 800;

/// Input to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Advance,
    Reset,
    TogglePanel(Panel),
    Tick(TaskId),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Advance => "advance",
            Command::Reset => "reset",
            Command::TogglePanel(Panel::Ingredients) => "toggle-ingredients",
            Command::TogglePanel(Panel::Steps) => "toggle-steps",
            Command::Tick(_) => "tick",
        }
    }
}

/// Cosmetic output for the host to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    ScrollIntoView { index: usize },
    CompletionPulse { duration_ms: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepView {
    pub index: usize,
    pub text: String,
    pub status: StepStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressView {
    pub value: u8,
    pub min: u8,
    pub max: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerView {
    pub text: String,
    pub enabled: bool,
    pub remaining_seconds: u64,
    pub running: bool,
    pub time_up: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelView {
    pub panel: Panel,
    pub expanded: bool,
    pub hidden: bool,
    pub label: String,
}

/// Full presentational state of one walkthrough
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub title: String,
    pub ingredients: Vec<String>,
    pub cursor: i64,
    pub total_steps: usize,
    pub steps: Vec<StepView>,
    pub progress: ProgressView,
    pub timer: TimerView,
    pub controls: Controls,
    pub panels: Vec<PanelView>,
}

/// Drives one recipe walkthrough
#[derive(Debug)]
pub struct WalkthroughController<S> {
    title: String,
    ingredients: Vec<String>,
    walkthrough: WalkthroughState,
    timer: TimerState,
    panels: Panels,
    scheduler: S,
    countdown: Option<TaskId>,
    next_task: u64,
}

impl<S: RepeatingScheduler> WalkthroughController<S> {
    pub fn new(recipe: Recipe, scheduler: S) -> Self {
        let Recipe {
            title,
            prep_minutes,
            ingredients,
            steps,
        } = recipe;
        Self {
            title,
            ingredients,
            walkthrough: WalkthroughState::new(StepSequence::new(steps)),
            timer: TimerState::new(prep_minutes),
            panels: Panels::default(),
            scheduler,
            countdown: None,
            next_task: 0,
        }
    }

    /// Apply a command and return the cosmetic effects it produced
    pub fn dispatch(&mut self, command: Command) -> Vec<Effect> {
        match command {
            Command::Start => self.start(),
            Command::Advance => self.advance(),
            Command::Reset => {
                self.reset();
                Vec::new()
            }
            Command::TogglePanel(panel) => {
                self.toggle_panel(panel);
                Vec::new()
            }
            Command::Tick(task) => {
                self.tick(task);
                Vec::new()
            }
        }
    }

    pub fn start(&mut self) -> Vec<Effect> {
        let active = self.walkthrough.start();
        info!("Walkthrough started with {} steps", self.walkthrough.steps().len());
        self.start_countdown();
        active
            .map(|index| vec![Effect::ScrollIntoView { index }])
            .unwrap_or_default()
    }

    pub fn advance(&mut self) -> Vec<Effect> {
        match self.walkthrough.advance() {
            Advance::Ignored => {
                debug!("Advance ignored, walkthrough is not running");
                Vec::new()
            }
            Advance::Moved(index) => {
                debug!("Advanced to step {}", index);
                vec![Effect::ScrollIntoView { index }]
            }
            Advance::Completed => {
                info!("Walkthrough complete");
                vec![Effect::CompletionPulse {
                    duration_ms: COMPLETION_PULSE_MS,
                }]
            }
        }
    }

    pub fn reset(&mut self) {
        self.walkthrough.reset();
        self.stop_countdown();
        self.timer.reset();
        info!("Walkthrough reset");
    }

    pub fn toggle_panel(&mut self, panel: Panel) {
        let expanded = self.panels.get_mut(panel).toggle();
        debug!("Panel {} expanded={}", panel.name(), expanded);
    }

    pub fn tick(&mut self, task: TaskId) {
        if self.countdown != Some(task) {
            debug!("Dropping stale tick from {}", task);
            return;
        }
        if self.timer.tick() {
            info!("Prep timer finished");
            self.stop_countdown();
        }
    }

    fn start_countdown(&mut self) {
        if !self.timer.is_enabled() {
            return;
        }
        self.stop_countdown();
        self.next_task += 1;
        let task = TaskId(self.next_task);
        self.timer.restart();
        self.scheduler.schedule(task, TICK_PERIOD);
        self.countdown = Some(task);
        info!("Prep countdown {} started at {}", task, self.timer.display());
    }

    fn stop_countdown(&mut self) {
        if let Some(task) = self.countdown.take() {
            self.scheduler.cancel(task);
            self.timer.running = false;
            debug!("Cancelled countdown {}", task);
        }
    }

    pub fn cursor(&self) -> i64 {
        self.walkthrough.cursor_index()
    }

    pub fn status(&self, index: usize) -> StepStatus {
        self.walkthrough.status(index)
    }

    pub fn progress(&self) -> u8 {
        self.walkthrough.progress_percent()
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    pub fn timer_text(&self) -> String {
        self.timer.display()
    }

    pub fn controls(&self) -> Controls {
        self.walkthrough.controls()
    }

    pub fn panels(&self) -> Panels {
        self.panels
    }

    pub fn countdown(&self) -> Option<TaskId> {
        self.countdown
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn snapshot(&self) -> Snapshot {
        let steps = self
            .walkthrough
            .steps()
            .iter()
            .enumerate()
            .map(|(index, text)| StepView {
                index,
                text: text.to_string(),
                status: self.walkthrough.status(index),
            })
            .collect();

        let panels = Panel::ALL
            .iter()
            .map(|&panel| {
                let state = self.panels.get(panel);
                PanelView {
                    panel,
                    expanded: state.is_expanded(),
                    hidden: !state.is_expanded(),
                    label: state.label(panel),
                }
            })
            .collect();

        Snapshot {
            title: self.title.clone(),
            ingredients: self.ingredients.clone(),
            cursor: self.cursor(),
            total_steps: self.walkthrough.steps().len(),
            steps,
            progress: ProgressView {
                value: self.progress(),
                min: 0,
                max: 100,
            },
            timer: TimerView {
                text: self.timer.display(),
                enabled: self.timer.is_enabled(),
                remaining_seconds: self.timer.remaining_seconds,
                running: self.timer.running,
                time_up: self.timer.time_up,
            },
            controls: self.controls(),
            panels,
        }
    }
}

impl WalkthroughController<ManualScheduler> {
    /// Move the fake clock forward, delivering every tick that came due
    pub fn run_for(&mut self, by: Duration) {
        for task in self.scheduler.advance(by) {
            self.dispatch(Command::Tick(task));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(steps: usize, prep_minutes: u64) -> Recipe {
        Recipe {
            title: "Test".to_string(),
            prep_minutes,
            ingredients: vec!["salt".to_string()],
            steps: (0..steps).map(|i| format!("step {}", i + 1)).collect(),
        }
    }

    fn controller(steps: usize, prep_minutes: u64) -> WalkthroughController<ManualScheduler> {
        WalkthroughController::new(recipe(steps, prep_minutes), ManualScheduler::new())
    }

    #[test]
    fn three_step_scenario() {
        let mut c = controller(3, 1);
        assert_eq!(c.timer_text(), "01:00");

        let effects = c.dispatch(Command::Start);
        assert_eq!(effects, vec![Effect::ScrollIntoView { index: 0 }]);
        assert_eq!(c.cursor(), 0);
        assert_eq!(c.timer_text(), "01:00");
        assert!(c.timer().running);

        c.dispatch(Command::Advance);
        assert_eq!(c.cursor(), 1);
        assert_eq!(c.status(0), StepStatus::Done);
        assert_eq!(c.status(1), StepStatus::Active);

        c.dispatch(Command::Advance);
        assert_eq!(c.cursor(), 2);

        let effects = c.dispatch(Command::Advance);
        assert_eq!(
            effects,
            vec![Effect::CompletionPulse {
                duration_ms: COMPLETION_PULSE_MS
            }]
        );
        assert_eq!(c.cursor(), 3);
        assert_eq!(c.progress(), 100);
        assert!(!c.controls().advance_enabled);
        assert!(!c.controls().start_enabled);
        assert!(c.controls().reset_enabled);
        assert!((0..3).all(|i| c.status(i) == StepStatus::Done));

        assert!(c.dispatch(Command::Advance).is_empty());
        assert_eq!(c.cursor(), 3);
    }

    #[test]
    fn restarting_keeps_a_single_countdown() {
        let mut c = controller(2, 1);
        c.dispatch(Command::Start);
        let first = c.countdown();
        c.dispatch(Command::Start);

        assert_eq!(c.scheduler().active_tasks().len(), 1);
        assert_ne!(c.countdown(), first);

        c.run_for(Duration::from_secs(1));
        assert_eq!(c.timer().remaining_seconds, 59);
    }

    #[test]
    fn stale_tick_is_ignored() {
        let mut c = controller(2, 1);
        c.dispatch(Command::Start);
        let old = c.countdown().unwrap();
        c.dispatch(Command::Start);

        c.dispatch(Command::Tick(old));
        assert_eq!(c.timer().remaining_seconds, 60);
    }

    #[test]
    fn countdown_reaches_zero_and_cancels_itself() {
        let mut c = controller(2, 1);
        c.dispatch(Command::Start);

        c.run_for(Duration::from_secs(59));
        assert_eq!(c.timer_text(), "00:01");
        assert!(!c.timer().time_up);

        c.run_for(Duration::from_secs(5));
        assert_eq!(c.timer_text(), "00:00");
        assert!(c.timer().time_up);
        assert!(!c.timer().running);
        assert_eq!(c.countdown(), None);
        assert!(c.scheduler().active_tasks().is_empty());
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut c = controller(3, 2);
        c.dispatch(Command::Start);
        c.dispatch(Command::Advance);
        c.run_for(Duration::from_secs(10));

        c.dispatch(Command::Reset);
        assert_eq!(c.cursor(), -1);
        assert_eq!(c.progress(), 0);
        assert_eq!(c.timer_text(), "02:00");
        assert!(!c.timer().time_up);
        assert!(c.scheduler().active_tasks().is_empty());
        assert_eq!(c.controls(), Controls::idle());
        assert!((0..3).all(|i| c.status(i) == StepStatus::Pending));

        // Ticks after reset change nothing
        c.run_for(Duration::from_secs(10));
        assert_eq!(c.timer_text(), "02:00");
    }

    #[test]
    fn zero_prep_never_schedules() {
        let mut c = controller(2, 0);
        c.dispatch(Command::Start);
        assert_eq!(c.countdown(), None);
        assert!(c.scheduler().active_tasks().is_empty());
        assert_eq!(c.timer_text(), "00:00");
        assert!(!c.timer().time_up);
    }

    #[test]
    fn countdown_keeps_running_after_completion() {
        let mut c = controller(1, 1);
        c.dispatch(Command::Start);
        c.dispatch(Command::Advance);
        c.run_for(Duration::from_secs(3));
        assert_eq!(c.timer_text(), "00:57");
    }

    #[test]
    fn toggle_panel_round_trips() {
        let mut c = controller(2, 0);
        let before = c.snapshot().panels;

        c.dispatch(Command::TogglePanel(Panel::Ingredients));
        let toggled = c.snapshot().panels;
        assert!(!toggled[0].expanded);
        assert!(toggled[0].hidden);
        assert_eq!(toggled[0].label, "Show Ingredients");
        assert!(toggled[1].expanded);

        c.dispatch(Command::TogglePanel(Panel::Ingredients));
        assert_eq!(c.snapshot().panels, before);
        assert_eq!(c.cursor(), -1);
    }

    #[test]
    fn controllers_are_independent() {
        let mut a = controller(2, 1);
        let b = controller(2, 1);
        a.dispatch(Command::Start);
        assert_eq!(a.cursor(), 0);
        assert_eq!(b.cursor(), -1);
        assert!(b.scheduler().active_tasks().is_empty());
    }

    #[test]
    fn snapshot_reports_progress_and_steps() {
        let mut c = controller(4, 1);
        c.dispatch(Command::Start);
        c.dispatch(Command::Advance);
        let snapshot = c.snapshot();
        assert_eq!(snapshot.cursor, 1);
        assert_eq!(snapshot.total_steps, 4);
        assert_eq!(snapshot.progress.value, 25);
        assert_eq!(snapshot.steps[0].status, StepStatus::Done);
        assert_eq!(snapshot.steps[1].status, StepStatus::Active);
        assert_eq!(snapshot.steps[1].text, "step 2");
        assert_eq!(snapshot.timer.text, "01:00");
        assert!(snapshot.timer.enabled);
    }
}
