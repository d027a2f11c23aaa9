//! Validation errors raised by the onboarding flow and the parent gate.
//!
//! None of these are fatal: the screen that produced one shows the message
//! inline and re-prompts. The `Display` text is what the child (or parent)
//! actually sees.

use super::orchestrator::ScreenState;
use thiserror::Error;

/// Errors that block a screen transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// Profile submitted with a blank nickname
    #[error("Please tell us what we should call you!")]
    EmptyName,

    /// Nickname longer than the input allows
    #[error("Nicknames can be at most {max} characters")]
    NameTooLong { max: usize },

    /// Access code is not exactly four digits
    #[error("{0}")]
    CodeFormat(&'static str),

    /// Confirmation code differs from the one first entered
    #[error("PINs do not match. Please try again.")]
    CodeMismatch,

    /// Parent gate attempt does not equal the stored code
    #[error("Incorrect PIN. Please try again.")]
    IncorrectCode,

    /// Operation invoked from a screen it does not belong to
    #[error("cannot do that from the {actual} screen (expected {expected})")]
    OutOfOrder {
        expected: ScreenState,
        actual: ScreenState,
    },
}

impl FlowError {
    /// Error for a code that was submitted with missing digits
    pub fn code_format() -> Self {
        FlowError::CodeFormat("Please enter a 4-digit PIN")
    }

    /// Error for a confirmation that was submitted with missing digits
    pub fn confirm_format() -> Self {
        FlowError::CodeFormat("Please confirm your 4-digit PIN")
    }

    /// True for the two code-setup validation kinds
    pub fn is_code_error(&self) -> bool {
        matches!(self, FlowError::CodeFormat(_) | FlowError::CodeMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_shown_inline() {
        assert_eq!(
            FlowError::CodeMismatch.to_string(),
            "PINs do not match. Please try again."
        );
        assert_eq!(
            FlowError::code_format().to_string(),
            "Please enter a 4-digit PIN"
        );
        assert_eq!(
            FlowError::confirm_format().to_string(),
            "Please confirm your 4-digit PIN"
        );
        assert_eq!(
            FlowError::IncorrectCode.to_string(),
            "Incorrect PIN. Please try again."
        );
    }

    #[test]
    fn test_out_of_order_names_screens() {
        let err = FlowError::OutOfOrder {
            expected: ScreenState::CodeSetup,
            actual: ScreenState::InitialSetup,
        };
        assert_eq!(
            err.to_string(),
            "cannot do that from the initial-setup screen (expected code-setup)"
        );
        assert!(!err.is_code_error());
        assert!(FlowError::CodeMismatch.is_code_error());
    }
}
