//! Error taxonomy for name submissions.
//!
//! Every variant sends the request back to the input form with the
//! variant's user message. Diagnostic detail carried by
//! [`GreetError::MalformedRequest`] and [`GreetError::InternalFault`] is for
//! logs only and never reaches the page.

use thiserror::Error;

use crate::flash::FlashMessage;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GreetError {
    #[error("empty")]
    EmptyInput,
    #[error("all characters invalid")]
    AllCharactersInvalid,
    #[error("malformed request: {0}")]
    MalformedRequest(String),
    #[error("internal error: {0}")]
    InternalFault(String),
}

impl GreetError {
    /// Message shown to the user. Generic for faults.
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyInput => "Please enter your name!",
            Self::AllCharactersInvalid => {
                "Please enter a valid name using only letters and numbers"
            }
            Self::MalformedRequest(_) => "Something went wrong with your request!",
            Self::InternalFault(_) => "An unexpected error occurred!",
        }
    }

    pub fn flash(&self) -> FlashMessage {
        FlashMessage::error(self.user_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flash::FlashCategory;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            GreetError::EmptyInput.user_message(),
            "Please enter your name!"
        );
        assert_eq!(
            GreetError::AllCharactersInvalid.user_message(),
            "Please enter a valid name using only letters and numbers"
        );
    }

    #[test]
    fn test_fault_messages_hide_detail() {
        let malformed = GreetError::MalformedRequest("missing boundary".to_string());
        let internal = GreetError::InternalFault("index out of bounds".to_string());

        assert!(!malformed.user_message().contains("boundary"));
        assert!(!internal.user_message().contains("index"));
        assert_eq!(
            internal.to_string(),
            "internal error: index out of bounds"
        );
    }

    #[test]
    fn test_flash_is_error_category() {
        let flash = GreetError::EmptyInput.flash();
        assert_eq!(flash.category, FlashCategory::Error);
        assert_eq!(flash.message, "Please enter your name!");
    }
}
