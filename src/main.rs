//! Recipe Walkthrough - A state-managed HTTP server that guides a cook
//! through recipe steps
//!
//! This is the main entry point for the recipe-walkthrough application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use recipe_walkthrough::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::countdown_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("recipe_walkthrough={},tower_http=info", config.log_level()))
        .init();

    info!("Starting recipe-walkthrough server v{}", env!("CARGO_PKG_VERSION"));

    let recipe = config.load_recipe().await.map_err(anyhow::Error::msg)?;
    info!("Configuration: host={}, port={}, recipe='{}', steps={}, prep={}min",
          config.host, config.port, recipe.title, recipe.steps.len(), recipe.prep_minutes);

    // Create application state
    let (state, tick_rx) = AppState::new(config.port, config.host.clone(), recipe);
    let state = Arc::new(state);

    // Start the countdown background task
    let countdown_state = Arc::clone(&state);
    tokio::spawn(async move {
        countdown_task(countdown_state, tick_rx).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start                - Start or restart the walkthrough");
    info!("  POST /advance              - Finish the current step");
    info!("  POST /reset                - Reset the walkthrough");
    info!("  POST /panels/:panel/toggle - Toggle the ingredients or steps panel");
    info!("  GET  /status               - Current steps, progress and timer");
    info!("  GET  /health               - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
