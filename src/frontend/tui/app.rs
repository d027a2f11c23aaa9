use super::{main_screen, onboarding, parent_dashboard};
use crate::core::{AppCore, Screen};
use crate::frontend::{Frontend, FrontendEvent};
use crate::theme::AppTheme;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, buffer::Buffer, layout::Rect, Terminal};
use std::io;
use std::time::Duration;

/// TUI Frontend using ratatui
///
/// This frontend renders the application using ratatui (terminal UI library)
/// and handles events via crossterm.
pub struct TuiFrontend {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    poll_timeout: Duration,
    theme: AppTheme,
    restored: bool,
}

impl TuiFrontend {
    /// Create a new TUI frontend
    ///
    /// Initializes terminal in raw mode, enables bracketed paste, and enters alternate screen.
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
            .context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor()?;

        Ok(Self {
            terminal,
            poll_timeout: Duration::from_millis(16), // ~60 FPS
            theme: AppTheme::default(),
            restored: false,
        })
    }

    /// Convert crossterm event to FrontendEvent
    fn convert_event(event: Event) -> Option<FrontendEvent> {
        match event {
            Event::Key(key_event) => {
                // Only process key press events (ignore repeats and releases)
                if key_event.kind != KeyEventKind::Press {
                    return None;
                }
                Some(FrontendEvent::key(key_event.code, key_event.modifiers))
            }
            Event::Resize(w, h) => Some(FrontendEvent::resize(w, h)),
            Event::Paste(text) => Some(FrontendEvent::paste(text)),
            _ => None,
        }
    }
}

/// Draw the screen the orchestrator currently resolves to
pub fn draw_screen(core: &AppCore, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    match core.orchestrator.screen() {
        Screen::ProfileSetup | Screen::Confirmation { .. } | Screen::CodeSetup { .. } => {
            onboarding::render(core, area, buf, theme)
        }
        Screen::Main { profile, .. } => main_screen::render(core, profile, area, buf, theme),
        Screen::ParentView { profile, .. } => {
            if let Some(main) = core.main.as_ref() {
                parent_dashboard::render(&main.dashboard, profile, area, buf, theme);
            }
        }
    }
}

impl Frontend for TuiFrontend {
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>> {
        let mut events = Vec::new();

        // Wait up to one frame for the first event, then drain the rest
        let mut timeout = self.poll_timeout;
        while event::poll(timeout)? {
            if let Ok(ev) = event::read() {
                if let Some(frontend_event) = Self::convert_event(ev) {
                    events.push(frontend_event);
                }
            }
            timeout = Duration::ZERO;
        }

        Ok(events)
    }

    fn render(&mut self, core: &AppCore) -> Result<()> {
        let theme = &self.theme;
        self.terminal.draw(|f| {
            let area = f.area();
            draw_screen(core, area, f.buffer_mut(), theme);
        })?;
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TuiFrontend {
    fn drop(&mut self) {
        // Ensure terminal is restored even if cleanup() wasn't called
        let _ = self.cleanup();
    }
}
