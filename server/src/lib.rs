//! HTTP layer for the greeter.
//!
//! [`router`] wires the handlers in [`routes`] together with request tracing,
//! security headers and the panic adapters: submissions that panic go back to
//! the form, panics anywhere else render the 500 page. All process state lives
//! in [`AppState`], built once from [`config::Config`].

use std::sync::Arc;

use axum::{
    Router,
    extract::FromRef,
    middleware,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub mod config;
pub mod flash;
pub mod routes;
mod security;

use config::Config;
use security::security_headers;

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.config.key().clone()
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    let greet_panics = CatchPanicLayer::custom(routes::greet_panic_handler(
        state.config.key().clone(),
    ));

    Router::new()
        .route(
            "/",
            get(routes::index).fallback(routes::method_not_allowed),
        )
        .route(
            "/greet",
            post(routes::greet)
                .fallback(routes::method_not_allowed)
                .layer(greet_panics),
        )
        .route("/health", get(routes::health_handler))
        .fallback(routes::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(security_headers))
                .layer(CatchPanicLayer::custom(routes::handle_panic)),
        )
        .with_state(state)
}
