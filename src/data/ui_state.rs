//! UI State - Focus, text inputs and selection state
//!
//! This module contains UI state that is independent of rendering.
//! Frontends read from these structures; the core mutates them on input.

use tui_textarea::TextArea;

use crate::core::profile::NAME_MAX_CHARS;

/// Focusable rows of the profile setup form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SetupField {
    #[default]
    Nickname,
    Gender,
    Age,
    Submit,
}

impl SetupField {
    const ORDER: [SetupField; 4] = [
        SetupField::Nickname,
        SetupField::Gender,
        SetupField::Age,
        SetupField::Submit,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Application UI state
#[derive(Clone, Debug)]
pub struct UiState {
    /// Nickname box on the profile setup screen
    pub nickname_input: TextArea<'static>,

    /// Focused row on the profile setup screen
    pub setup_focus: SetupField,

    /// Message box on the chat tab
    pub chat_input: TextArea<'static>,

    /// Highlighted suggestion chip, if the child is browsing them
    pub chip_cursor: Option<usize>,

    /// Buddy message picked for read-aloud (None = latest)
    pub message_cursor: Option<u64>,

    /// Status bar text
    pub status_text: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub fn new() -> Self {
        let mut nickname_input = TextArea::default();
        nickname_input.set_placeholder_text("Type your name here...");

        let mut chat_input = TextArea::default();
        chat_input.set_placeholder_text("Ask me anything...");

        Self {
            nickname_input,
            setup_focus: SetupField::default(),
            chat_input,
            chip_cursor: None,
            message_cursor: None,
            status_text: String::new(),
        }
    }

    /// Current nickname text (single line)
    pub fn nickname(&self) -> String {
        self.nickname_input.lines().join("")
    }

    /// Nickname box is full
    pub fn nickname_full(&self) -> bool {
        self.nickname().chars().count() >= NAME_MAX_CHARS
    }

    pub fn chat_text(&self) -> String {
        self.chat_input.lines().join("\n")
    }

    /// Empty the chat box after sending
    pub fn clear_chat_input(&mut self) {
        self.chat_input.select_all();
        self.chat_input.cut();
    }

    /// Move the chip highlight; `None` means the text box has focus
    pub fn move_chip_cursor(&mut self, delta: isize, chips: usize) {
        if chips == 0 {
            self.chip_cursor = None;
            return;
        }
        let next = match self.chip_cursor {
            None if delta > 0 => Some(0),
            None => None,
            Some(i) => {
                let i = i as isize + delta;
                if i < 0 {
                    None
                } else {
                    Some((i as usize).min(chips - 1))
                }
            }
        };
        self.chip_cursor = next;
    }
}
