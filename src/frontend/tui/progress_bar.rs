//! Horizontal fill bars: the onboarding step indicator and percent meters.
//!
//! Both draw straight into the buffer so the label can sit centered on top of
//! the fill, splitting its background at the fill edge.

use crate::theme::AppTheme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Labels of the three onboarding steps
pub const STEP_LABELS: [&str; 3] = ["Create Profile", "Confirm Details", "Setup PIN"];

/// Fill fraction for `step` (1-based) of `total`: (step - 1) / (total - 1)
pub fn step_fill(step: u8, total: u8) -> f64 {
    if total <= 1 {
        return 1.0;
    }
    let step = step.clamp(1, total);
    f64::from(step - 1) / f64::from(total - 1)
}

/// A single-row bar with text centered on it
pub struct ProgressBar {
    ratio: f64,
    text: String,
    fill: Color,
    empty: Color,
    text_color: Color,
}

impl ProgressBar {
    pub fn new(ratio: f64, text: impl Into<String>, theme: &AppTheme) -> Self {
        Self {
            ratio: ratio.clamp(0.0, 1.0),
            text: text.into(),
            fill: theme.progress_fill,
            empty: theme.progress_empty,
            text_color: theme.text_primary,
        }
    }

    /// Percent meter, e.g. quest progress
    pub fn percent(percent: u8, theme: &AppTheme) -> Self {
        let percent = percent.min(100);
        Self::new(f64::from(percent) / 100.0, format!("{}%", percent), theme)
    }

    pub fn fill_color(mut self, color: Color) -> Self {
        self.fill = color;
        self
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let width = area.width;
        let split = (self.ratio * f64::from(width)).round() as u16;
        let y = area.y;

        for i in 0..width {
            let x = area.x + i;
            let bg = if i < split { self.fill } else { self.empty };
            buf[(x, y)].set_char(' ').set_bg(bg);
        }

        let text_width = self.text.chars().count() as u16;
        if text_width == 0 || text_width > width {
            return;
        }
        let start = area.x + (width - text_width) / 2;
        for (i, c) in self.text.chars().enumerate() {
            let x = start + i as u16;
            let bg = if x - area.x < split { self.fill } else { self.empty };
            buf[(x, y)]
                .set_char(c)
                .set_fg(self.text_color)
                .set_bg(bg);
        }
    }
}

/// Onboarding step indicator: step labels above a fill bar
pub struct StepProgress {
    step: u8,
}

impl StepProgress {
    pub fn new(step: u8) -> Self {
        Self { step }
    }

    /// Needs two rows
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
        if area.height < 2 || area.width == 0 {
            return;
        }

        let mut spans = Vec::new();
        for (i, label) in STEP_LABELS.iter().enumerate() {
            let number = i as u8 + 1;
            let style = if number == self.step {
                Style::default()
                    .fg(theme.form_label_focused)
                    .add_modifier(Modifier::BOLD)
            } else if number < self.step {
                Style::default().fg(theme.status_success)
            } else {
                Style::default().fg(theme.text_disabled)
            };
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            let marker = if number < self.step { "✓" } else { "●" };
            spans.push(Span::styled(format!("{} {}", marker, label), style));
        }
        Line::from(spans)
            .centered()
            .render(Rect { height: 1, ..area }, buf);

        let total = STEP_LABELS.len() as u8;
        let bar = ProgressBar::new(
            step_fill(self.step, total),
            format!("Step {} of {}", self.step, total),
            theme,
        );
        bar.render(
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
            buf,
        );
    }
}
