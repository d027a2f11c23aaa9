//! TUI Frontend (ratatui-based)
//!
//! This module implements the Frontend trait using ratatui for terminal rendering.
//! It wraps crossterm for event handling and terminal management.

pub mod app;
pub mod chat_view;
pub mod main_screen;
pub mod onboarding;
pub mod parent_dashboard;
pub mod popup;
pub mod progress_bar;
pub mod tabs;

pub use app::TuiFrontend;

/// Buffer contents as text, one line per row, with the filler cell after
/// each double-width glyph dropped
#[cfg(test)]
pub(crate) fn buffer_text(buf: &ratatui::buffer::Buffer) -> String {
    use ratatui::text::Span;

    let mut out = String::new();
    for y in 0..buf.area.height {
        let mut x = 0;
        while x < buf.area.width {
            let symbol = buf[(x, y)].symbol();
            out.push_str(symbol);
            x += Span::raw(symbol).width().max(1) as u16;
        }
        out.push('\n');
    }
    out
}
