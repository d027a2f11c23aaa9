//! Chat tab: message history, suggestion chips and the input box.

use crate::core::chat::{ChatSession, Role};
use crate::core::profile::Profile;
use crate::data::UiState;
use crate::theme::AppTheme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

/// Everything the chat tab reads
pub struct ChatView<'a> {
    pub chat: &'a ChatSession,
    pub ui: &'a UiState,
    pub profile: &'a Profile,
    pub buddy_name: &'a str,
    /// Message currently being read aloud
    pub playing: Option<u64>,
    pub speech_enabled: bool,
}

impl ChatView<'_> {
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
        let chips = self.chat.suggestions();
        let chip_height = if chips.is_empty() {
            0
        } else {
            chips.len() as u16 + 1
        };

        let [history, chip_area, input, hint] = Layout::vertical([
            Constraint::Min(3),
            Constraint::Length(chip_height),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_history(history, buf, theme);
        if !chips.is_empty() {
            self.render_chips(chip_area, buf, theme);
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border(self.ui.chip_cursor.is_none()));
        let text_area = block.inner(input);
        block.render(input, buf);
        Widget::render(&self.ui.chat_input, text_area, buf);

        let speech = if self.speech_enabled {
            "Ctrl+S: read aloud   Ctrl+R: voice off"
        } else {
            "Ctrl+R: voice on"
        };
        Line::from(Span::styled(
            format!(
                "Enter: send   ↑/↓: ideas   Ctrl+↑/↓: pick message   {}   F2: profile",
                speech
            ),
            Style::default().fg(theme.text_disabled),
        ))
        .render(hint, buf);
    }

    fn message_lines(&self, theme: &AppTheme) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let latest_buddy = self.chat.last_buddy_message().map(|m| m.id);
        let cursor = self.ui.message_cursor.or(latest_buddy);

        for message in self.chat.messages() {
            let (who, color) = match message.role {
                Role::User => (
                    format!("{} {}", self.profile.avatar(), self.profile.display_name()),
                    theme.bubble_user,
                ),
                Role::Buddy => (format!("🤖 {}", self.buddy_name), theme.bubble_buddy),
            };

            let mut header = Vec::new();
            let picked = message.role == Role::Buddy && cursor == Some(message.id);
            header.push(Span::raw(if picked { "▶ " } else { "  " }));
            header.push(Span::styled(
                who,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
            header.push(Span::styled(
                format!("  {}", message.sent_at.format("%H:%M")),
                Style::default().fg(theme.text_disabled),
            ));
            if self.playing == Some(message.id) {
                header.push(Span::styled(
                    "  🔊 speaking",
                    Style::default().fg(theme.status_success),
                ));
            }
            lines.push(Line::from(header));
            for text in message.text.lines() {
                lines.push(Line::from(Span::styled(
                    format!("  {}", text),
                    Style::default().fg(theme.text_primary),
                )));
            }
            lines.push(Line::default());
        }

        if self.chat.is_waiting() {
            lines.push(Line::from(Span::styled(
                format!("  🤖 {} is thinking...", self.buddy_name),
                Style::default()
                    .fg(theme.text_secondary)
                    .add_modifier(Modifier::ITALIC),
            )));
        }
        lines
    }

    fn render_history(&self, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border(false));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let lines = self.message_lines(theme);
        // Estimated wrapped height, used to keep the newest message in view
        let width = inner.width as usize;
        let rows: usize = lines
            .iter()
            .map(|line| line.width().max(1).div_ceil(width))
            .sum();
        let scroll = rows.saturating_sub(inner.height as usize) as u16;

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .render(inner, buf);
    }

    fn render_chips(&self, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
        let mut lines = vec![Line::from(Span::styled(
            "Ideas to talk about:",
            Style::default().fg(theme.text_secondary),
        ))];
        for (i, chip) in self.chat.suggestions().iter().enumerate() {
            let selected = self.ui.chip_cursor == Some(i);
            let style = if selected {
                Style::default()
                    .fg(theme.text_primary)
                    .bg(theme.chip_selected)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.chip)
            };
            lines.push(Line::from(vec![
                Span::raw(if selected { " ▶ " } else { "   " }),
                Span::styled(format!(" {} ", chip), style),
            ]));
        }
        Paragraph::new(lines).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::tui::buffer_text;
    use crate::content::ContentPack;
    use crate::core::chat::ChatSettings;
    use crate::core::profile::Gender;
    use crate::core::responder::Responder;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session() -> ChatSession {
        let content = ContentPack::embedded().unwrap();
        let responder = Responder::new(content.responses).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        ChatSession::new(responder, ChatSettings::default(), "Mia", "Friday", &mut rng)
    }

    #[test]
    fn test_greeting_and_chips_rendered() {
        let theme = AppTheme::default();
        let chat = session();
        let ui = UiState::new();
        let profile = Profile::new("Mia", Gender::Girl, 8).unwrap();
        let view = ChatView {
            chat: &chat,
            ui: &ui,
            profile: &profile,
            buddy_name: "Buddy",
            playing: Some(0),
            speech_enabled: true,
        };

        let area = Rect::new(0, 0, 100, 24);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf, &theme);
        let text = buffer_text(&buf);
        assert!(text.contains("Happy Friday, Mia!"));
        assert!(text.contains("Ideas to talk about:"));
        assert!(text.contains("speaking"));
        assert!(text.contains(&chat.suggestions()[0]));
    }
}
