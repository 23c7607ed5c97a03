//! State management module
//!
//! This module contains all state-related structures and their management logic.

pub mod app_state;
pub mod panel_state;
pub mod timer_state;
pub mod walkthrough_state;

// Re-export main types
pub use app_state::AppState;
pub use panel_state::{Panel, PanelState, Panels};
pub use timer_state::{format_seconds, TimerState};
pub use walkthrough_state::{Controls, Cursor, StepSequence, StepStatus, WalkthroughState};
