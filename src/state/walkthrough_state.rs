//! Step sequence, cursor, and derived step status

use serde::{Deserialize, Serialize};

/// Ordered, fixed list of step instructions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSequence {
    steps: Vec<String>,
}

impl StepSequence {
    pub fn new(steps: Vec<String>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(String::as_str)
    }
}

/// Position in the walkthrough
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    NotStarted,
    Active(usize),
    Complete,
}

impl Cursor {
    /// Integer form: -1 before start, the step index while active, and the
    /// step count once complete
    pub fn as_index(&self, total_steps: usize) -> i64 {
        match self {
            Cursor::NotStarted => -1,
            Cursor::Active(index) => *index as i64,
            Cursor::Complete => total_steps as i64,
        }
    }

    /// Number of steps already finished
    pub fn completed(&self, total_steps: usize) -> usize {
        match self {
            Cursor::NotStarted => 0,
            Cursor::Active(index) => *index,
            Cursor::Complete => total_steps,
        }
    }
}

/// Status of one step relative to the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Active,
    Done,
}

/// Enabled state of the three walkthrough controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub start_enabled: bool,
    pub advance_enabled: bool,
    pub reset_enabled: bool,
}

impl Controls {
    pub fn idle() -> Self {
        Self {
            start_enabled: true,
            advance_enabled: false,
            reset_enabled: false,
        }
    }

    pub fn running() -> Self {
        Self {
            start_enabled: false,
            advance_enabled: true,
            reset_enabled: true,
        }
    }

    pub fn finished() -> Self {
        Self {
            start_enabled: false,
            advance_enabled: false,
            reset_enabled: true,
        }
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::idle()
    }
}

/// Result of moving the cursor forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Walkthrough not running, nothing changed
    Ignored,
    /// The step at this index is now active
    Moved(usize),
    /// The last step was just finished
    Completed,
}

/// Cursor and controls over a step sequence
#[derive(Debug, Clone)]
pub struct WalkthroughState {
    steps: StepSequence,
    cursor: Cursor,
    controls: Controls,
}

impl WalkthroughState {
    pub fn new(steps: StepSequence) -> Self {
        Self {
            steps,
            cursor: Cursor::NotStarted,
            controls: Controls::idle(),
        }
    }

    pub fn steps(&self) -> &StepSequence {
        &self.steps
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn cursor_index(&self) -> i64 {
        self.cursor.as_index(self.steps.len())
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn is_complete(&self) -> bool {
        self.cursor == Cursor::Complete
    }

    /// Jump to the first step. Returns the newly active index, if any.
    pub fn start(&mut self) -> Option<usize> {
        self.controls = Controls::running();
        if self.steps.is_empty() {
            self.cursor = Cursor::Complete;
            self.controls = Controls::finished();
            return None;
        }
        self.cursor = Cursor::Active(0);
        Some(0)
    }

    /// Mark the current step done and move to the next one
    pub fn advance(&mut self) -> Advance {
        let Cursor::Active(index) = self.cursor else {
            return Advance::Ignored;
        };
        let next = index + 1;
        if next >= self.steps.len() {
            self.cursor = Cursor::Complete;
            self.controls = Controls::finished();
            Advance::Completed
        } else {
            self.cursor = Cursor::Active(next);
            Advance::Moved(next)
        }
    }

    /// Back to the not-started state
    pub fn reset(&mut self) {
        self.cursor = Cursor::NotStarted;
        self.controls = Controls::idle();
    }

    pub fn status(&self, index: usize) -> StepStatus {
        match self.cursor {
            Cursor::NotStarted => StepStatus::Pending,
            Cursor::Complete => StepStatus::Done,
            Cursor::Active(current) if index < current => StepStatus::Done,
            Cursor::Active(current) if index == current => StepStatus::Active,
            Cursor::Active(_) => StepStatus::Pending,
        }
    }

    pub fn statuses(&self) -> Vec<StepStatus> {
        (0..self.steps.len()).map(|i| self.status(i)).collect()
    }

    /// Completed share of the sequence as a whole percentage, halves rounded up
    pub fn progress_percent(&self) -> u8 {
        let total = self.steps.len();
        if total == 0 {
            return 0;
        }
        let completed = self.cursor.completed(total);
        let percent = (200 * completed + total) / (2 * total);
        percent.min(100) as u8
    }
}
