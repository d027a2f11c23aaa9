//! Side panel opened from the main screen: the child's card, recent chats,
//! achievements and the "For Parents Only" gate.

use super::access_code::DigitBuffer;
use super::error::FlowError;

/// PIN prompt shown over the panel
#[derive(Debug, Clone, Default)]
pub struct PinPrompt {
    digits: DigitBuffer,
    error: Option<FlowError>,
}

impl PinPrompt {
    pub fn digits(&self) -> &DigitBuffer {
        &self.digits
    }

    pub fn error(&self) -> Option<&FlowError> {
        self.error.as_ref()
    }

    pub fn push_digit(&mut self, c: char) {
        if self.digits.push(c) {
            self.error = None;
        }
    }

    pub fn backspace(&mut self) {
        self.digits.pop();
        self.error = None;
    }

    /// Verify is offered only once four digits are in
    pub fn can_verify(&self) -> bool {
        self.digits.is_complete()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfilePanel {
    open: bool,
    prompt: Option<PinPrompt>,
}

impl ProfilePanel {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closing the panel also drops any half-typed PIN
    pub fn close(&mut self) {
        self.open = false;
        self.prompt = None;
    }

    pub fn prompt(&self) -> Option<&PinPrompt> {
        self.prompt.as_ref()
    }

    pub fn prompt_mut(&mut self) -> Option<&mut PinPrompt> {
        self.prompt.as_mut()
    }

    pub fn open_prompt(&mut self) {
        if self.open {
            self.prompt = Some(PinPrompt::default());
        }
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
    }

    /// Run the typed PIN through `unlock`.
    ///
    /// On success the panel closes; on failure the error is kept for display
    /// and the digits stay as typed.
    pub fn verify<F>(&mut self, unlock: F) -> Result<(), FlowError>
    where
        F: FnOnce(&str) -> Result<(), FlowError>,
    {
        let Some(prompt) = self.prompt.as_mut() else {
            return Ok(());
        };
        if !prompt.can_verify() {
            return Err(FlowError::code_format());
        }
        match unlock(prompt.digits.as_str()) {
            Ok(()) => {
                self.close();
                Ok(())
            }
            Err(e) => {
                prompt.error = Some(e.clone());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(panel: &mut ProfilePanel, digits: &str) {
        let prompt = panel.prompt_mut().unwrap();
        for c in digits.chars() {
            prompt.push_digit(c);
        }
    }

    fn check(attempt: &str) -> Result<(), FlowError> {
        if attempt == "1234" {
            Ok(())
        } else {
            Err(FlowError::IncorrectCode)
        }
    }

    #[test]
    fn test_prompt_requires_open_panel() {
        let mut panel = ProfilePanel::default();
        panel.open_prompt();
        assert!(panel.prompt().is_none());
        panel.open();
        panel.open_prompt();
        assert!(panel.prompt().is_some());
    }

    #[test]
    fn test_verify_needs_four_digits() {
        let mut panel = ProfilePanel::default();
        panel.open();
        panel.open_prompt();
        typed(&mut panel, "12");
        assert!(!panel.prompt().unwrap().can_verify());

        let mut called = false;
        let result = panel.verify(|_| {
            called = true;
            Ok(())
        });
        assert!(result.is_err());
        assert!(!called);
        assert!(panel.is_open());
    }

    #[test]
    fn test_wrong_pin_shows_error_until_edit() {
        let mut panel = ProfilePanel::default();
        panel.open();
        panel.open_prompt();
        typed(&mut panel, "9999");

        assert_eq!(panel.verify(check), Err(FlowError::IncorrectCode));
        let prompt = panel.prompt().unwrap();
        assert_eq!(
            prompt.error().unwrap().to_string(),
            "Incorrect PIN. Please try again."
        );

        panel.prompt_mut().unwrap().backspace();
        assert!(panel.prompt().unwrap().error().is_none());
    }

    #[test]
    fn test_correct_pin_closes_panel() {
        let mut panel = ProfilePanel::default();
        panel.open();
        panel.open_prompt();
        typed(&mut panel, "12345");
        assert_eq!(panel.prompt().unwrap().digits().as_str(), "1234");

        assert!(panel.verify(check).is_ok());
        assert!(!panel.is_open());
        assert!(panel.prompt().is_none());
    }
}
