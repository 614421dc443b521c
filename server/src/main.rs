use std::process::ExitCode;

use dotenvy::dotenv;
use greeter_server::{AppState, config::Config, router};
use tracing::{error, info, warn};

fn tracing_level(debug: bool) -> tracing::Level {
    if debug || cfg!(debug_assertions) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let env_result = dotenv();
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_file(true)
        .with_line_number(true)
        .with_max_level(tracing_level(config.as_ref().is_ok_and(|c| c.debug)))
        .init();

    if env_result.is_err() {
        warn!("There is no corresponding .env file");
    }

    let config = match config {
        Ok(config) => config,
        Err(err) => {
            error!("Failed to load configuration: {err}");
            return ExitCode::FAILURE;
        }
    };
    if config.has_ephemeral_key() {
        warn!("SECRET_KEY is not set; signing flash cookies with a per-process random key");
    }

    let addr = config.addr();
    let app = router(AppState::new(config));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind tcp listener to {}: {}", addr, err);
            return ExitCode::FAILURE;
        }
    };
    info!("Listening on http://{}", addr);

    let serve_result = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await;
    match serve_result {
        Ok(()) => {
            info!("Server shutdown gracefully");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Failed to serve app: {}", err);
            error!("Error details: {:?}", err);
            ExitCode::FAILURE
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_level() {
        assert_eq!(tracing_level(true), tracing::Level::DEBUG);

        if cfg!(debug_assertions) {
            assert_eq!(tracing_level(false), tracing::Level::DEBUG);
        } else {
            assert_eq!(tracing_level(false), tracing::Level::INFO);
        }
    }
}
