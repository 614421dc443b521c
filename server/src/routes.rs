//! Request handlers: the form page, the submission endpoint, health checks
//! and the error pages.

use std::any::Any;

use axum::{
    Form,
    extract::rejection::FormRejection,
    http::{Method, StatusCode, Uri},
    response::{Html, IntoResponse, Json, Redirect, Response},
};
use axum_extra::extract::cookie::{Key, SignedCookieJar};
use greeter_app::{
    AppError, error::GreetError, error_page, flash::FlashMessage, greet_page,
    handler::{self, Outcome, handle_submission}, index_page,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::flash;

#[derive(Debug, Deserialize)]
pub struct GreetForm {
    pub username: Option<String>,
}

/// Renders the input form, consuming any pending flash messages.
pub async fn index(jar: SignedCookieJar) -> (SignedCookieJar, Html<String>) {
    let (jar, flashes) = flash::take(jar);
    (jar, Html(index_page(flashes)))
}

/// Handles a name submission.
///
/// Accepted names render the greeting directly; rejected ones redirect back
/// to the form with their messages stored in the flash cookie.
pub async fn greet(jar: SignedCookieJar, form: Result<Form<GreetForm>, FormRejection>) -> Response {
    let outcome = handle_submission(form.map(|Form(form)| form.username));
    let flashes = outcome.flashes();

    match outcome {
        Outcome::Success(name) | Outcome::Warned(name, _) => {
            Html(greet_page(name.escaped(), flashes)).into_response()
        }
        Outcome::Rejected { .. } => redirect_home(jar, &flashes),
    }
}

fn redirect_home(jar: SignedCookieJar, flashes: &[FlashMessage]) -> Response {
    match flash::push(jar, flashes) {
        Ok(jar) => (jar, Redirect::to("/")).into_response(),
        Err(err) => {
            let fault = GreetError::InternalFault(err.to_string());
            error!(error = %fault, "Failed to store flash messages");
            Redirect::to("/").into_response()
        }
    }
}

// Health check handler
pub async fn health_handler() -> Result<Json<serde_json::Value>, StatusCode> {
    Ok(Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": "greeter",
        "version": env!("CARGO_PKG_VERSION")
    })))
}

pub async fn not_found(uri: Uri) -> Response {
    info!(%uri, "No route matched");
    error_response(AppError::NotFound)
}

pub async fn method_not_allowed(method: Method, uri: Uri) -> Response {
    info!(%method, %uri, "Method not allowed");
    error_response(AppError::MethodNotAllowed)
}

/// Maps a panic escaping any handler to the generic error page.
///
/// The panic message is logged; the page only shows the status.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let fault = GreetError::InternalFault(panic_detail(panic.as_ref()));
    error!(error = %fault, "Unhandled exception");
    error_response(AppError::Internal)
}

/// Panic adapter for the submission endpoint.
///
/// A panic while handling a submission is treated like any other rejection:
/// the user is sent back to the form with a generic flash message signed by
/// `key`.
pub fn greet_panic_handler(
    key: Key,
) -> impl Fn(Box<dyn Any + Send + 'static>) -> Response + Clone + Send + Sync + 'static {
    move |panic| {
        let outcome = handler::fault(panic_detail(panic.as_ref()));
        redirect_home(SignedCookieJar::new(key.clone()), &outcome.flashes())
    }
}

fn panic_detail(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown panic payload".to_string()
    }
}

fn error_response(error: AppError) -> Response {
    (error.status_code(), Html(error_page(error))).into_response()
}
