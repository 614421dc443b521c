//! This module defines the `error_template` component, which renders the page
//! shown for routing misses and unexpected faults.
//!
//! It includes an `AppError` enum for the HTTP-level errors the server maps to
//! a page, each carrying its own status code.

use http::status::StatusCode;
use leptos::{
    html::{a, div, h1, p},
    prelude::*,
};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("Internal Server Error")]
    Internal,
}

impl AppError {
    /// Returns the HTTP status code associated with the error.
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Renders a generic error page for `error`.
///
/// Only the status code and its canonical reason are shown; fault details stay
/// in the logs.
pub fn component(error: AppError) -> impl IntoView {
    let error_code = error.status_code().as_u16();

    div().class("error").child((
        h1().child("Error"),
        p().class("error-code").child(format!("{error_code} | {error}")),
        a().href("/").child("Go back home"),
    ))
}
