// File: services/dripper_backend/src/main.rs
use dripper_backend::{build_app, AppState};
use dripper_common::{
    logging::{self, log_error, log_result},
    DripperError,
};
use dripper_config::{load_config, AppConfig};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            logging::init();
            log_error(e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    // Held until exit so buffered log lines reach the file.
    let _log_guard = match logging::init_from_config(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            logging::init();
            log_error(e, "Failed to initialize file logging");
            return ExitCode::FAILURE;
        }
    };

    match serve(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error(e, "Server stopped with an error");
            ExitCode::FAILURE
        }
    }
}

async fn serve(config: Arc<AppConfig>) -> Result<(), DripperError> {
    let state = AppState::new(config.clone())?;
    let app = build_app(&state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = log_result(
        TcpListener::bind(&addr).await,
        &format!("Starting server at http://{}", addr),
        &format!("Failed to bind {}", addr),
    )?;
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log_error(e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
