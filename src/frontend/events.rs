//! Frontend-agnostic input events.
//!
//! The terminal frontend translates its native crossterm event stream into
//! this enum so the core logic only handles one event shape.

use crossterm::event::{KeyCode, KeyModifiers};

/// Events emitted by the frontend, converted to one format
#[derive(Debug, Clone, PartialEq)]
pub enum FrontendEvent {
    /// Keyboard input
    Key {
        code: KeyCode,
        modifiers: KeyModifiers,
    },
    /// Terminal resize
    Resize { width: u16, height: u16 },
    /// Paste event (bracketed paste)
    Paste { text: String },
    /// Application quit signal
    Quit,
}

impl FrontendEvent {
    /// Create a key event
    pub fn key(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self::Key { code, modifiers }
    }

    /// Create a resize event
    pub fn resize(width: u16, height: u16) -> Self {
        Self::Resize { width, height }
    }

    /// Create a paste event
    pub fn paste(text: String) -> Self {
        Self::Paste { text }
    }

    /// Create a quit event
    pub fn quit() -> Self {
        Self::Quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_creation() {
        let key_event = FrontendEvent::key(KeyCode::Char('a'), KeyModifiers::NONE);
        assert!(matches!(key_event, FrontendEvent::Key { .. }));

        let resize_event = FrontendEvent::resize(120, 40);
        assert!(matches!(
            resize_event,
            FrontendEvent::Resize {
                width: 120,
                height: 40
            }
        ));

        assert_eq!(
            FrontendEvent::paste("Mia".to_string()),
            FrontendEvent::Paste {
                text: "Mia".to_string()
            }
        );
        assert_eq!(FrontendEvent::quit(), FrontendEvent::Quit);
    }
}
