//! Parent dashboard screen.

use super::progress_bar::ProgressBar;
use crate::core::dashboard::{format_duration, limit_label, Dashboard};
use crate::core::profile::Profile;
use crate::theme::AppTheme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, Widget},
};

fn section(title: &str, area: Rect, buf: &mut Buffer, theme: &AppTheme) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border(false))
        .title(Span::styled(format!(" {} ", title), theme.title()));
    let inner = block.inner(area);
    block.render(area, buf);
    inner
}

pub fn render(
    dashboard: &Dashboard,
    profile: &Profile,
    area: Rect,
    buf: &mut Buffer,
    theme: &AppTheme,
) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(10),
        Constraint::Length(1),
    ])
    .areas(area);

    Paragraph::new(vec![
        Line::from(Span::styled("👨‍👩‍👧 Parent Dashboard", theme.title())),
        Line::from(Span::styled(
            format!(
                "Monitor your child's learning journey · signed in from {}'s profile",
                profile.display_name()
            ),
            Style::default().fg(theme.text_secondary),
        )),
    ])
    .render(header, buf);

    let [left, right] =
        Layout::horizontal([Constraint::Length(36), Constraint::Min(30)]).areas(body);

    let [children_area, safety_area, limit_area] = Layout::vertical([
        Constraint::Length(dashboard.children().len() as u16 + 3),
        Constraint::Length(dashboard.data().safety_features.len() as u16 + 2),
        Constraint::Length(4),
    ])
    .areas(left);

    render_children(dashboard, children_area, buf, theme);
    render_safety(dashboard, safety_area, buf, theme);
    render_time_limit(dashboard, limit_area, buf, theme);

    let progress_rows = dashboard.data().learning_progress.len() as u16;
    let [stats_area, activity_area, progress_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Min(4),
        Constraint::Length(progress_rows * 2 + 2),
    ])
    .areas(right);

    render_stats(dashboard, stats_area, buf, theme);
    render_activity(dashboard, activity_area, buf, theme);
    render_progress(dashboard, progress_area, buf, theme);

    Line::from(Span::styled(
        "c: next child   t: change time limit   Esc/b: back to app",
        Style::default().fg(theme.text_disabled),
    ))
    .render(footer, buf);
}

fn render_children(dashboard: &Dashboard, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let inner = section("Select Child", area, buf, theme);
    let mut lines = Vec::new();
    for (i, child) in dashboard.children().iter().enumerate() {
        let selected = i == dashboard.selected_child_index();
        let style = if selected {
            theme.button(true, true)
        } else {
            Style::default().fg(theme.text_primary)
        };
        lines.push(Line::from(vec![
            Span::raw(if selected { "▶ " } else { "  " }),
            Span::styled(
                format!(" {} {} ({}) ", child.avatar, child.name, child.age),
                style,
            ),
        ]));
    }
    lines.push(Line::from(Span::styled(
        "  + Add Child (coming soon)",
        Style::default().fg(theme.text_disabled),
    )));
    Paragraph::new(lines).render(inner, buf);
}

fn render_safety(dashboard: &Dashboard, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let inner = section("Safety Features", area, buf, theme);
    let lines: Vec<Line> = dashboard
        .data()
        .safety_features
        .iter()
        .map(|feature| {
            Line::from(vec![
                Span::styled(feature.clone(), Style::default().fg(theme.text_primary)),
                Span::styled("  ✓ Active", Style::default().fg(theme.status_success)),
            ])
        })
        .collect();
    Paragraph::new(lines).render(inner, buf);
}

fn render_time_limit(dashboard: &Dashboard, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let inner = section("Daily Time Limit", area, buf, theme);
    let label = dashboard
        .daily_limit_minutes()
        .map(limit_label)
        .unwrap_or_else(|| "No limit".to_string());
    Paragraph::new(vec![
        Line::from(Span::styled(
            format!("◀ {} ▶", label),
            Style::default()
                .fg(theme.form_label_focused)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "press t to change",
            Style::default().fg(theme.text_disabled),
        )),
    ])
    .render(inner, buf);
}

fn render_stats(dashboard: &Dashboard, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let cards = [
        ("💬 Total Messages", dashboard.total_messages().to_string()),
        ("⏱ Total Time", format_duration(dashboard.total_seconds())),
        (
            "📅 Active Days",
            dashboard.data().daily_stats.len().to_string(),
        ),
        (
            "📊 Daily Average",
            format_duration(dashboard.average_daily_seconds()),
        ),
    ];
    let areas = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);
    for ((title, value), card) in cards.iter().zip(areas.iter()) {
        let inner = section(title, *card, buf, theme);
        Line::from(Span::styled(
            value.clone(),
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ))
        .centered()
        .render(inner, buf);
    }
}

fn render_activity(dashboard: &Dashboard, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let inner = section("Recent Activity", area, buf, theme);
    let header = Row::new(["Date", "Messages", "Time", "Topics"]).style(
        Style::default()
            .fg(theme.text_secondary)
            .add_modifier(Modifier::BOLD),
    );
    let rows = dashboard.data().daily_stats.iter().rev().map(|day| {
        Row::new([
            Cell::from(day.date.clone()),
            Cell::from(day.messages_sent.to_string()),
            Cell::from(format_duration(day.session_seconds)),
            Cell::from(day.topics.clone()),
        ])
        .style(Style::default().fg(theme.text_primary))
    });
    Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(9),
            Constraint::Length(8),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .render(inner, buf);
}

fn render_progress(dashboard: &Dashboard, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let inner = section("Learning Progress", area, buf, theme);
    let mut y = inner.y;
    for stat in &dashboard.data().learning_progress {
        if y + 2 > inner.y + inner.height {
            break;
        }
        Line::from(Span::styled(
            stat.label.clone(),
            Style::default().fg(theme.text_secondary),
        ))
        .render(Rect::new(inner.x, y, inner.width, 1), buf);
        ProgressBar::percent(stat.percent, theme)
            .render(Rect::new(inner.x, y + 1, inner.width.min(40), 1), buf);
        y += 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentPack;
    use crate::core::profile::Gender;
    use crate::frontend::tui::buffer_text;

    fn draw(dashboard: &Dashboard) -> String {
        let theme = AppTheme::default();
        let area = Rect::new(0, 0, 120, 36);
        let mut buf = Buffer::empty(area);
        let profile = Profile::new("Mia", Gender::Girl, 8).unwrap();
        render(dashboard, &profile, area, &mut buf, &theme);
        buffer_text(&buf)
    }

    #[test]
    fn test_dashboard_shows_totals_and_limit() {
        let mut dashboard = Dashboard::new(ContentPack::embedded().unwrap().dashboard);
        let text = draw(&dashboard);
        assert!(text.contains("Parent Dashboard"));
        assert!(text.contains("92"));
        assert!(text.contains("2h 1m"));
        assert!(text.contains("30 minutes"));
        assert!(text.contains("Curiosity Level"));

        dashboard.cycle_time_limit();
        assert!(draw(&dashboard).contains("1 hour"));
    }
}
