//! Recipe Walkthrough - A state-managed HTTP server that guides a cook
//! through recipe steps
//!
//! This library provides the walkthrough controller (cursor, prep countdown,
//! progress and collapsible panels), the scheduling capability it runs its
//! countdown on, and an HTTP API that drives it.

pub mod api;
pub mod config;
pub mod controller;
pub mod recipe;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use controller::{Command, Effect, Snapshot, WalkthroughController};
pub use recipe::Recipe;
pub use state::AppState;
pub use utils::signals::shutdown_signal;
