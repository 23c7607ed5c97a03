//! Background tasks module
//!
//! This module contains the countdown scheduling that runs alongside the HTTP server.

pub mod countdown;
pub mod scheduler;

// Re-export main types
pub use countdown::{countdown_task, TokioScheduler};
pub use scheduler::{ManualScheduler, RepeatingScheduler, TaskId};
