//! Modal boxes drawn over the current screen: notices and the parent PIN pad.

use crate::core::access_code::DigitBuffer;
use crate::core::profile_panel::PinPrompt;
use crate::theme::AppTheme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Rect of at most `width` x `height`, centered in `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Bordered box with a cleared background; returns the inner area
pub fn modal_frame(title: &str, rect: Rect, buf: &mut Buffer, theme: &AppTheme) -> Rect {
    Clear.render(rect, buf);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border(true))
        .title(Span::styled(format!(" {} ", title), theme.title()));
    let inner = block.inner(rect);
    block.render(rect, buf);
    inner
}

/// One-message popup closed by any key
pub fn render_notice(text: &str, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let width = 56;
    // Rough wrap estimate plus borders and the hint line
    let lines = (text.chars().count() as u16 / (width - 4)) + 1;
    let rect = centered_rect(width, lines + 5, area);
    let inner = modal_frame("Notice", rect, buf, theme);

    let body = vec![
        Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(theme.text_primary),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Press any key to continue",
            Style::default().fg(theme.text_secondary),
        )),
    ];
    Paragraph::new(body)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}

/// Digit slots such as `[ 1 ][ 2 ][ _ ][ _ ]`, masked unless `show` is set
pub fn digit_slots(digits: &DigitBuffer, show: bool, theme: &AppTheme) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, slot) in digits.slots().iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let (glyph, style) = match slot {
            Some(c) if show => (c.to_string(), Style::default().fg(theme.text_primary)),
            Some(_) => ("•".to_string(), Style::default().fg(theme.text_primary)),
            None => ("_".to_string(), Style::default().fg(theme.text_disabled)),
        };
        spans.push(Span::styled(
            format!("[ {} ]", glyph),
            style.add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

/// "For Parents Only" PIN modal shown over the profile panel
pub fn render_pin_prompt(prompt: &PinPrompt, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let rect = centered_rect(44, 11, area);
    let inner = modal_frame("🔒 Parent Access", rect, buf, theme);

    let mut body = vec![
        Line::from(Span::styled(
            "Enter your 4-digit PIN",
            Style::default().fg(theme.text_secondary),
        )),
        Line::default(),
        digit_slots(prompt.digits(), false, theme),
        Line::default(),
    ];
    match prompt.error() {
        Some(error) => body.push(Line::from(Span::styled(error.to_string(), theme.error()))),
        None => body.push(Line::default()),
    }
    body.push(Line::default());
    body.push(Line::from(vec![
        Span::styled(" Verify ", theme.button(true, prompt.can_verify())),
        Span::raw("  "),
        Span::styled(
            "Esc cancel",
            Style::default().fg(theme.text_secondary),
        ),
    ]));

    Paragraph::new(body)
        .alignment(Alignment::Center)
        .render(inner, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::tui::buffer_text;

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect(10, 4, area), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_rect(50, 50, area), area);
    }

    #[test]
    fn test_digit_slots_masking() {
        let theme = AppTheme::default();
        let mut digits = DigitBuffer::default();
        digits.push('4');
        digits.push('2');
        let masked: String = digit_slots(&digits, false, &theme)
            .spans
            .iter()
            .map(|s| s.content.to_string())
            .collect();
        assert_eq!(masked, "[ • ] [ • ] [ _ ] [ _ ]");
        let shown: String = digit_slots(&digits, true, &theme)
            .spans
            .iter()
            .map(|s| s.content.to_string())
            .collect();
        assert_eq!(shown, "[ 4 ] [ 2 ] [ _ ] [ _ ]");
    }

    #[test]
    fn test_pin_prompt_shows_error() {
        let theme = AppTheme::default();
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        let mut panel = crate::core::profile_panel::ProfilePanel::default();
        panel.open();
        panel.open_prompt();
        for c in "9999".chars() {
            panel.prompt_mut().unwrap().push_digit(c);
        }
        let _ = panel.verify(|_| Err(crate::core::FlowError::IncorrectCode));
        render_pin_prompt(panel.prompt().unwrap(), area, &mut buf, &theme);
        assert!(buffer_text(&buf).contains("Incorrect PIN. Please try again."));
    }

    #[test]
    fn test_notice_renders_hint() {
        let theme = AppTheme::default();
        let area = Rect::new(0, 0, 70, 20);
        let mut buf = Buffer::empty(area);
        render_notice("Creating new story...", area, &mut buf, &theme);
        let text = buffer_text(&buf);
        assert!(text.contains("Creating new story..."));
        assert!(text.contains("Press any key to continue"));
    }
}
