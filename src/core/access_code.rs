//! Parent access code and the two-step (create, confirm) entry pad.

use super::error::FlowError;
use std::fmt;

/// Number of digits in an access code
pub const CODE_LEN: usize = 4;

/// A four-digit parent code, held in memory for the session only
#[derive(Clone, PartialEq, Eq)]
pub struct AccessCode(String);

impl AccessCode {
    /// Accepts exactly four ASCII digits
    pub fn parse(code: &str) -> Result<Self, FlowError> {
        if code.len() == CODE_LEN && code.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(code.to_string()))
        } else {
            Err(FlowError::code_format())
        }
    }

    /// Equality check used by the parent gate
    pub fn matches(&self, attempt: &str) -> bool {
        self.0 == attempt
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Never print the digits in logs
impl fmt::Debug for AccessCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessCode(****)")
    }
}

/// Step of the entry pad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeStep {
    Create,
    Confirm,
}

/// Fixed-size digit buffer for one step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigitBuffer {
    digits: String,
}

impl DigitBuffer {
    /// Append a digit; non-digits and overflow are ignored
    pub fn push(&mut self, c: char) -> bool {
        if c.is_ascii_digit() && self.digits.len() < CODE_LEN {
            self.digits.push(c);
            true
        } else {
            false
        }
    }

    pub fn pop(&mut self) -> Option<char> {
        self.digits.pop()
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn is_complete(&self) -> bool {
        self.digits.len() == CODE_LEN
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// One entry per slot, `None` for an empty slot
    pub fn slots(&self) -> [Option<char>; CODE_LEN] {
        let mut slots = [None; CODE_LEN];
        for (slot, c) in slots.iter_mut().zip(self.digits.chars()) {
            *slot = Some(c);
        }
        slots
    }
}

/// What a submit on the entry pad produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeEntryOutcome {
    /// First code accepted, now waiting for the confirmation
    AwaitingConfirmation,
    /// Both entries match
    Confirmed(AccessCode),
    /// Validation failed; the message is also kept in `error()`
    Rejected(FlowError),
}

/// Two-step entry pad state for the code-setup screen
#[derive(Debug, Clone)]
pub struct CodeEntry {
    step: CodeStep,
    code: DigitBuffer,
    confirm: DigitBuffer,
    show_digits: bool,
    error: Option<FlowError>,
}

impl Default for CodeEntry {
    fn default() -> Self {
        Self::new(false)
    }
}

impl CodeEntry {
    pub fn new(show_digits: bool) -> Self {
        Self {
            step: CodeStep::Create,
            code: DigitBuffer::default(),
            confirm: DigitBuffer::default(),
            show_digits,
            error: None,
        }
    }

    pub fn step(&self) -> CodeStep {
        self.step
    }

    pub fn error(&self) -> Option<&FlowError> {
        self.error.as_ref()
    }

    pub fn show_digits(&self) -> bool {
        self.show_digits
    }

    pub fn toggle_show_digits(&mut self) {
        self.show_digits = !self.show_digits;
    }

    /// Buffer for the step currently shown
    pub fn current(&self) -> &DigitBuffer {
        match self.step {
            CodeStep::Create => &self.code,
            CodeStep::Confirm => &self.confirm,
        }
    }

    fn current_mut(&mut self) -> &mut DigitBuffer {
        match self.step {
            CodeStep::Create => &mut self.code,
            CodeStep::Confirm => &mut self.confirm,
        }
    }

    pub fn push_digit(&mut self, c: char) {
        if self.current_mut().push(c) {
            self.error = None;
        }
    }

    pub fn backspace(&mut self) {
        self.current_mut().pop();
        self.error = None;
    }

    /// Whether the submit button is enabled
    pub fn can_submit(&self) -> bool {
        self.current().is_complete()
    }

    pub fn submit(&mut self) -> CodeEntryOutcome {
        match self.step {
            CodeStep::Create => {
                if !self.code.is_complete() {
                    return self.reject(FlowError::code_format());
                }
                self.step = CodeStep::Confirm;
                self.error = None;
                CodeEntryOutcome::AwaitingConfirmation
            }
            CodeStep::Confirm => {
                if !self.confirm.is_complete() {
                    return self.reject(FlowError::confirm_format());
                }
                if self.code.as_str() != self.confirm.as_str() {
                    self.confirm.clear();
                    return self.reject(FlowError::CodeMismatch);
                }
                match AccessCode::parse(self.code.as_str()) {
                    Ok(code) => {
                        self.error = None;
                        CodeEntryOutcome::Confirmed(code)
                    }
                    Err(e) => self.reject(e),
                }
            }
        }
    }

    /// "Back to create": wipe both entries
    pub fn reset(&mut self) {
        self.step = CodeStep::Create;
        self.code.clear();
        self.confirm.clear();
        self.error = None;
    }

    /// Record an error raised outside the pad (e.g. by the orchestrator)
    pub fn set_error(&mut self, error: FlowError) {
        self.error = Some(error);
    }

    fn reject(&mut self, error: FlowError) -> CodeEntryOutcome {
        self.error = Some(error.clone());
        CodeEntryOutcome::Rejected(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_code(entry: &mut CodeEntry, code: &str) {
        for c in code.chars() {
            entry.push_digit(c);
        }
    }

    #[test]
    fn test_parse_requires_four_digits() {
        assert!(AccessCode::parse("1234").is_ok());
        assert_eq!(AccessCode::parse("12"), Err(FlowError::code_format()));
        assert!(AccessCode::parse("12345").is_err());
        assert!(AccessCode::parse("12a4").is_err());
        assert!(AccessCode::parse("").is_err());
    }

    #[test]
    fn test_debug_hides_digits() {
        let code = AccessCode::parse("4321").unwrap();
        assert_eq!(format!("{:?}", code), "AccessCode(****)");
    }

    #[test]
    fn test_buffer_ignores_non_digits_and_overflow() {
        let mut buf = DigitBuffer::default();
        assert!(!buf.push('x'));
        for c in "98765".chars() {
            buf.push(c);
        }
        assert_eq!(buf.as_str(), "9876");
        assert_eq!(buf.slots(), [Some('9'), Some('8'), Some('7'), Some('6')]);
    }

    #[test]
    fn test_short_code_rejected() {
        let mut entry = CodeEntry::default();
        type_code(&mut entry, "12");
        assert!(!entry.can_submit());
        assert_eq!(
            entry.submit(),
            CodeEntryOutcome::Rejected(FlowError::code_format())
        );
        assert_eq!(entry.step(), CodeStep::Create);
    }

    #[test]
    fn test_matching_confirmation() {
        let mut entry = CodeEntry::default();
        type_code(&mut entry, "1234");
        assert_eq!(entry.submit(), CodeEntryOutcome::AwaitingConfirmation);
        assert_eq!(entry.current().as_str(), "");
        type_code(&mut entry, "1234");
        match entry.submit() {
            CodeEntryOutcome::Confirmed(code) => assert_eq!(code.as_str(), "1234"),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_mismatch_clears_confirmation_only() {
        let mut entry = CodeEntry::default();
        type_code(&mut entry, "1234");
        entry.submit();
        type_code(&mut entry, "4321");
        assert_eq!(
            entry.submit(),
            CodeEntryOutcome::Rejected(FlowError::CodeMismatch)
        );
        assert_eq!(entry.step(), CodeStep::Confirm);
        assert_eq!(entry.current().as_str(), "");
        assert_eq!(entry.error(), Some(&FlowError::CodeMismatch));

        // Typing clears the error, and the original code is still held
        entry.push_digit('1');
        assert!(entry.error().is_none());
        type_code(&mut entry, "234");
        assert!(matches!(entry.submit(), CodeEntryOutcome::Confirmed(_)));
    }

    #[test]
    fn test_incomplete_confirmation_message() {
        let mut entry = CodeEntry::default();
        type_code(&mut entry, "1234");
        entry.submit();
        type_code(&mut entry, "1");
        assert_eq!(
            entry.submit(),
            CodeEntryOutcome::Rejected(FlowError::confirm_format())
        );
    }

    #[test]
    fn test_reset_returns_to_create() {
        let mut entry = CodeEntry::default();
        type_code(&mut entry, "1234");
        entry.submit();
        type_code(&mut entry, "12");
        entry.reset();
        assert_eq!(entry.step(), CodeStep::Create);
        assert_eq!(entry.current().as_str(), "");
        assert!(entry.error().is_none());
    }
}
