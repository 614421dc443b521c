//! Decides what happens to a submitted name.
//!
//! A submission moves from validation to one of three outcomes: a greeting,
//! a greeting with a warning, or a rejection that sends the user back to the
//! input form. Nothing here fails; every error is folded into an [`Outcome`].

use std::fmt;

use tracing::{error, info, warn};

use crate::error::GreetError;
use crate::flash::FlashMessage;
use crate::sanitize::{EscapedText, escape_html, is_space, sanitize};

/// A name that has passed through [`sanitize`] and is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedName(String);

impl SanitizedName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Escapes the name for embedding in a page.
    pub fn escaped(&self) -> EscapedText {
        escape_html(&self.0)
    }
}

impl fmt::Display for SanitizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-blocking notices attached to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    InvalidCharactersRemoved,
}

impl Warning {
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidCharactersRemoved => "Invalid characters removed from input",
        }
    }

    pub fn flash(self) -> FlashMessage {
        FlashMessage::warning(self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Greet the user; the input was already clean.
    Success(SanitizedName),
    /// Greet the user, and tell them their input was altered.
    Warned(SanitizedName, Warning),
    /// Send the user back to the form. `warning` is set when sanitization
    /// altered the input before it was found unusable.
    Rejected {
        error: GreetError,
        warning: Option<Warning>,
    },
}

impl Outcome {
    fn rejected(error: GreetError) -> Self {
        Self::Rejected {
            error,
            warning: None,
        }
    }

    /// Messages to show the user, warnings first.
    pub fn flashes(&self) -> Vec<FlashMessage> {
        match self {
            Self::Success(_) => Vec::new(),
            Self::Warned(_, warning) => vec![warning.flash()],
            Self::Rejected { error, warning } => warning
                .iter()
                .map(|w| w.flash())
                .chain(std::iter::once(error.flash()))
                .collect(),
        }
    }
}

/// Validates and sanitizes a submitted username.
///
/// `None` means the field was absent from the form.
///
/// # Examples
///
/// ```
/// use greeter_app::handler::{Outcome, handle};
///
/// match handle(Some("Alice123")) {
///     Outcome::Success(name) => assert_eq!(name.as_str(), "Alice123"),
///     other => panic!("unexpected outcome: {other:?}"),
/// }
/// ```
pub fn handle(raw_username: Option<&str>) -> Outcome {
    let raw = raw_username.unwrap_or_default();
    let trimmed = raw.trim_matches(is_space);

    if trimmed.is_empty() {
        warn!("Greeting rejected: no name submitted");
        return Outcome::rejected(GreetError::EmptyInput);
    }

    let sanitized = sanitize(trimmed);

    let warning = if sanitized == trimmed {
        None
    } else {
        warn!(
            target: "security",
            kind = "sanitization-diff",
            original = ?raw,
            "Potential XSS attempt detected"
        );
        Some(Warning::InvalidCharactersRemoved)
    };

    if sanitized.is_empty() {
        info!("Greeting rejected: no valid characters left after sanitization");
        return Outcome::Rejected {
            error: GreetError::AllCharactersInvalid,
            warning,
        };
    }

    info!(username = %sanitized, "Greeting user");
    let name = SanitizedName(sanitized);
    match warning {
        Some(warning) => Outcome::Warned(name, warning),
        None => Outcome::Success(name),
    }
}

/// Handles a submission whose form body may have failed to decode.
///
/// A decoding failure becomes [`GreetError::MalformedRequest`]; its detail is
/// logged and kept out of the user message.
pub fn handle_submission<E>(submission: Result<Option<String>, E>) -> Outcome
where
    E: fmt::Display,
{
    match submission {
        Ok(raw) => handle(raw.as_deref()),
        Err(err) => {
            error!(error = %err, "Bad request error");
            Outcome::rejected(GreetError::MalformedRequest(err.to_string()))
        }
    }
}

/// Folds an unexpected fault raised while handling a submission into a
/// rejection. The detail is logged; the user only sees the generic message.
pub fn fault(detail: impl Into<String>) -> Outcome {
    let error = GreetError::InternalFault(detail.into());
    error!(error = %error, "Unhandled exception");
    Outcome::rejected(error)
}
