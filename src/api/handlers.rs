//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    controller::Command,
    state::{AppState, Panel},
};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

/// Run a command against the walkthrough and wrap the result
fn run_command(
    state: &AppState,
    command: Command,
    message: impl Into<String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.apply(command) {
        Ok((effects, snapshot)) => Ok(Json(ApiResponse::new(message.into(), effects, snapshot))),
        Err(e) => {
            error!("Failed to apply {}: {}", command.name(), e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Begin (or restart) the walkthrough
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    info!("Start endpoint called");
    run_command(&state, Command::Start, "Walkthrough started")
}

/// Handle POST /advance - Finish the current step and move on
pub async fn advance_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    info!("Advance endpoint called");
    run_command(&state, Command::Advance, "Advanced to next step")
}

/// Handle POST /reset - Return to the not-started state
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    info!("Reset endpoint called");
    run_command(&state, Command::Reset, "Walkthrough reset")
}

/// Handle POST /panels/:panel/toggle - Show or hide a content panel
pub async fn toggle_panel_handler(
    State(state): State<Arc<AppState>>,
    Path(panel_name): Path<String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let Some(panel) = Panel::from_name(&panel_name) else {
        warn!("Unknown panel requested: {}", panel_name);
        return Err(StatusCode::NOT_FOUND);
    };

    info!("Toggle endpoint called for {} panel", panel.name());
    run_command(
        &state,
        Command::TogglePanel(panel),
        format!("Toggled {} panel", panel.name()),
    )
}

/// Handle GET /status - Return current walkthrough status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let walkthrough = match state.get_snapshot() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get walkthrough snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        walkthrough,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
