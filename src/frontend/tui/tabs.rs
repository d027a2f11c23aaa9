//! Creatives, Quests and Games tab bodies.

use super::popup::centered_rect;
use super::progress_bar::ProgressBar;
use crate::core::creatives::{CreativeKind, CreativesTab, GalleryEntry};
use crate::core::games::{EmojiCharades, GameScreen, GamesTab, OptionMark};
use crate::core::profile::Profile;
use crate::core::quests::{Difficulty, QuestBoard};
use crate::theme::AppTheme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

fn panel(title: &str, area: Rect, buf: &mut Buffer, theme: &AppTheme) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border(false))
        .title(Span::styled(format!(" {} ", title), theme.title()));
    let inner = block.inner(area);
    block.render(area, buf);
    inner
}

fn hint(text: &str, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(theme.text_disabled),
    ))
    .render(area, buf);
}

fn difficulty_color(difficulty: Difficulty, theme: &AppTheme) -> Color {
    match difficulty {
        Difficulty::Easy => theme.status_success,
        Difficulty::Medium => theme.status_warning,
        Difficulty::Hard => theme.status_error,
    }
}

/// Parse `#rrggbb`; anything else falls back to the theme fill
fn hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

pub fn render_creatives(
    tab: &CreativesTab,
    profile: &Profile,
    area: Rect,
    buf: &mut Buffer,
    theme: &AppTheme,
) {
    let [switcher, lists, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    let mut spans = Vec::new();
    for option in [CreativeKind::Stories, CreativeKind::Paintings] {
        let style = if option == tab.kind() {
            theme.button(true, true)
        } else {
            Style::default().fg(theme.text_secondary)
        };
        spans.push(Span::styled(format!(" {} ", option.label()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans).render(switcher, buf);

    let [mine_area, public_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(lists);

    let mine = tab.mine(profile.display_name(), profile.avatar());
    let inner = panel("✨ My Creations", mine_area, buf, theme);
    gallery(&mine, inner, buf, theme);

    let public = tab.public();
    let inner = panel("🌍 Community Gallery", public_area, buf, theme);
    gallery(&public, inner, buf, theme);

    hint("←/→: stories or paintings   Enter: create new", footer, buf, theme);
}

fn gallery(entries: &[GalleryEntry<'_>], area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let mut lines = Vec::new();
    for entry in entries {
        let mut title = vec![Span::styled(
            entry.title.to_string(),
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        )];
        if !entry.colors.is_empty() {
            title.push(Span::raw(" "));
            for color in entry.colors {
                let color = hex_color(color).unwrap_or(theme.progress_fill);
                title.push(Span::styled("■", Style::default().fg(color)));
            }
        }
        lines.push(Line::from(title));
        lines.push(Line::from(Span::styled(
            entry.preview.to_string(),
            Style::default().fg(theme.text_secondary),
        )));
        lines.push(Line::from(Span::styled(
            format!(
                "{} {} · {} · 👀 {} · ❤️ {}",
                entry.avatar, entry.author, entry.created_at, entry.views, entry.likes
            ),
            Style::default().fg(theme.text_disabled),
        )));
        lines.push(Line::default());
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Nothing here yet!",
            Style::default().fg(theme.text_disabled),
        )));
    }
    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

pub fn render_quests(board: &QuestBoard, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let [filters, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    let mut spans = Vec::new();
    for (i, category) in board.categories().iter().enumerate() {
        let selected = i == board.category_index();
        let style = if selected {
            theme.button(true, true)
        } else {
            Style::default().fg(theme.text_secondary)
        };
        spans.push(Span::styled(
            format!(" {} {} ", category.icon, category.name),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans).render(filters, buf);

    let inner = panel("Learning Adventures", body, buf, theme);
    let visible = board.visible();
    if visible.is_empty() {
        Paragraph::new(Span::styled(
            "No quests in this category yet.",
            Style::default().fg(theme.text_disabled),
        ))
        .render(inner, buf);
    }

    // Three rows per quest: title, details, progress bar
    let mut y = inner.y;
    for (i, quest) in visible.iter().enumerate() {
        if y + 3 > inner.y + inner.height {
            break;
        }
        let selected = i == board.selected_index();
        let status = if quest.completed {
            Span::styled(" ✅ Done", Style::default().fg(theme.status_success))
        } else if quest.active {
            Span::styled(" ▶ In progress", Style::default().fg(theme.status_warning))
        } else {
            Span::raw("")
        };
        let title_style = if selected {
            Style::default()
                .fg(theme.form_label_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_primary)
        };
        Line::from(vec![
            Span::raw(if selected { "▶ " } else { "  " }),
            Span::raw(format!("{} ", quest.icon)),
            Span::styled(quest.title.clone(), title_style),
            Span::raw("  "),
            Span::styled(
                quest.difficulty.label(),
                Style::default().fg(difficulty_color(quest.difficulty, theme)),
            ),
            status,
        ])
        .render(Rect::new(inner.x, y, inner.width, 1), buf);

        Line::from(Span::styled(
            format!(
                "    {} · ⏱ {} · 🏆 {}",
                quest.description, quest.duration, quest.reward
            ),
            Style::default().fg(theme.text_secondary),
        ))
        .render(Rect::new(inner.x, y + 1, inner.width, 1), buf);

        let bar_width = inner.width.saturating_sub(4).min(40);
        let fill = if quest.completed {
            theme.status_success
        } else {
            theme.progress_fill
        };
        ProgressBar::percent(quest.progress, theme)
            .fill_color(fill)
            .render(Rect::new(inner.x + 4, y + 2, bar_width, 1), buf);

        y += 4;
    }

    hint(
        "←/→: category   ↑/↓: choose   Enter: start quest",
        footer,
        buf,
        theme,
    );
}

pub fn render_games(games: &GamesTab, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    match games.screen() {
        GameScreen::Menu => render_game_menu(games, area, buf, theme),
        GameScreen::Playing(game) if game.is_complete() => {
            render_charades_result(game, area, buf, theme)
        }
        GameScreen::Playing(game) => render_charades(game, area, buf, theme),
    }
}

fn render_game_menu(games: &GamesTab, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let [body, footer] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);
    let inner = panel("🎮 Fun Games", body, buf, theme);

    let mut lines = Vec::new();
    for (i, game) in games.games().iter().enumerate() {
        let selected = i == games.selected_index();
        let title_style = if selected {
            Style::default()
                .fg(theme.form_label_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_primary)
        };
        let badge = if game.playable {
            Span::styled(" PLAY NOW ", theme.button(selected, true))
        } else {
            Span::styled(" Coming soon ", Style::default().fg(theme.text_disabled))
        };
        lines.push(Line::from(vec![
            Span::raw(if selected { "▶ " } else { "  " }),
            Span::raw(format!("{} ", game.icon)),
            Span::styled(game.title.clone(), title_style),
            Span::raw("  "),
            badge,
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "    {} · {} · ages {} · {}",
                game.description,
                game.category,
                game.age_range,
                game.difficulty.label()
            ),
            Style::default().fg(theme.text_secondary),
        )));
        lines.push(Line::default());
    }
    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .render(inner, buf);

    hint("↑/↓: choose   Enter: play", footer, buf, theme);
}

fn render_charades(game: &EmojiCharades, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let Some(round) = game.current_round() else {
        return;
    };
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    Line::from(vec![
        Span::styled("🎭 Emoji Charades", theme.title()),
        Span::raw("   "),
        Span::styled(
            format!(
                "Round {}/{}   Score: {}",
                game.round_number(),
                game.total_rounds(),
                game.score()
            ),
            Style::default().fg(theme.text_secondary),
        ),
    ])
    .render(header, buf);

    let inner = panel("Guess the emojis!", body, buf, theme);
    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(
            round.emojis.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            round.question.clone(),
            Style::default().fg(theme.text_primary),
        )),
        Line::default(),
    ];
    for (i, option) in round.options.iter().enumerate() {
        let (prefix, style) = match game.option_mark(i) {
            OptionMark::Correct => (
                "✅",
                Style::default()
                    .fg(Color::Black)
                    .bg(theme.status_success)
                    .add_modifier(Modifier::BOLD),
            ),
            OptionMark::Wrong => (
                "❌",
                Style::default().fg(Color::White).bg(theme.status_error),
            ),
            OptionMark::Dimmed => ("  ", Style::default().fg(theme.text_disabled)),
            OptionMark::Open if i == game.cursor() => ("▶ ", theme.button(true, true)),
            OptionMark::Open => ("  ", Style::default().fg(theme.text_primary)),
        };
        lines.push(Line::from(vec![
            Span::raw(format!("{} ", prefix)),
            Span::styled(format!(" {}. {} ", i + 1, option), style),
        ]));
    }
    if game.showing_result() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("The answer is: {}", round.correct),
            Style::default().fg(theme.text_secondary),
        )));
    }
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(inner, buf);

    hint(
        "1-4 or ←/→ + Enter: answer   Esc: back to games",
        footer,
        buf,
        theme,
    );
}

fn render_charades_result(game: &EmojiCharades, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let rect = centered_rect(50, 11, area);
    let inner = panel("🎉 Game Complete!", rect, buf, theme);
    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            format!("You scored {} out of {}!", game.score(), game.total_rounds()),
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            game.achievement(),
            Style::default().fg(theme.form_label_focused),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled(" Play Again (r) ", theme.button(true, true)),
            Span::raw("  "),
            Span::styled(" Back to Games (b) ", theme.button(false, true)),
        ]),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(inner, buf);
}
