//! Main screen: top bar, tab strip, the active tab, and the profile panel
//! with its parent PIN prompt drawn on top.

use super::chat_view::ChatView;
use super::popup::{modal_frame, render_notice, render_pin_prompt};
use super::tabs;
use crate::core::dashboard::Dashboard;
use crate::core::main_app::{MainApp, MainTab};
use crate::core::profile::Profile;
use crate::core::AppCore;
use crate::theme::AppTheme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

const PANEL_WIDTH: u16 = 44;

pub fn render(core: &AppCore, profile: &Profile, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let Some(main) = core.main.as_ref() else {
        return;
    };

    let [top, tabs_row, body] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(5),
    ])
    .areas(area);

    render_top_bar(main, profile, &core.weekday, top, buf, theme);
    render_tab_strip(main.tab, tabs_row, buf, theme);

    match main.tab {
        MainTab::Chat => ChatView {
            chat: &main.chat,
            ui: &core.ui,
            profile,
            buddy_name: &core.config.ui.buddy_name,
            playing: core.speech.playing(),
            speech_enabled: core.speech.is_enabled(),
        }
        .render(body, buf, theme),
        MainTab::Creatives => tabs::render_creatives(&main.creatives, profile, body, buf, theme),
        MainTab::Quests => tabs::render_quests(&main.quests, body, buf, theme),
        MainTab::Games => tabs::render_games(&main.games, body, buf, theme),
    }

    if main.panel.is_open() {
        let width = PANEL_WIDTH.min(area.width);
        let panel_area = Rect {
            x: area.x + area.width - width,
            width,
            ..area
        };
        render_profile_panel(profile, &main.dashboard, panel_area, buf, theme);
        if let Some(prompt) = main.panel.prompt() {
            render_pin_prompt(prompt, area, buf, theme);
        }
    }

    if let Some(notice) = &main.notice {
        render_notice(notice, area, buf, theme);
    }
}

fn render_top_bar(
    main: &MainApp,
    profile: &Profile,
    weekday: &str,
    area: Rect,
    buf: &mut Buffer,
    theme: &AppTheme,
) {
    let bar = main.top_bar(profile, weekday);
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.border(false));
    let inner = block.inner(area);
    block.render(area, buf);

    let [left, right] =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(24)]).areas(inner);
    Paragraph::new(vec![
        Line::from(Span::styled(bar.title, theme.title())),
        Line::from(Span::styled(
            bar.subtitle,
            Style::default().fg(theme.text_secondary),
        )),
    ])
    .render(left, buf);

    Paragraph::new(vec![
        Line::from(vec![
            Span::raw(format!("{} ", profile.avatar())),
            Span::styled(
                profile.display_name().to_string(),
                Style::default()
                    .fg(theme.text_primary)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            "F2: profile",
            Style::default().fg(theme.text_disabled),
        )),
    ])
    .alignment(Alignment::Right)
    .render(right, buf);
}

fn render_tab_strip(active: MainTab, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let mut spans = Vec::new();
    for tab in MainTab::ALL {
        let style = if tab == active {
            theme.button(true, true)
        } else {
            Style::default().fg(theme.text_secondary)
        };
        spans.push(Span::styled(format!(" {} ", tab.label()), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        "Tab/Shift+Tab: switch",
        Style::default().fg(theme.text_disabled),
    ));
    Line::from(spans).render(area, buf);
}

fn render_profile_panel(
    profile: &Profile,
    dashboard: &Dashboard,
    area: Rect,
    buf: &mut Buffer,
    theme: &AppTheme,
) {
    Clear.render(area, buf);
    let inner = modal_frame("Profile", area, buf, theme);
    let data = dashboard.data();
    let heading = |text: &str| {
        Line::from(Span::styled(
            text.to_string(),
            Style::default()
                .fg(theme.window_title)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let secondary = Style::default().fg(theme.text_secondary);

    let mut lines = vec![
        Line::from(vec![
            Span::raw(format!("{}  ", profile.avatar())),
            Span::styled(
                profile.display_name().to_string(),
                Style::default()
                    .fg(theme.text_primary)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("{} years old", profile.age()),
            secondary,
        )),
        Line::from(vec![
            Span::styled(" Switch Profile ", theme.button(false, false)),
            Span::raw(" "),
            Span::styled(" Add Profile ", theme.button(false, false)),
        ]),
        Line::from(Span::styled(
            "Coming soon!",
            Style::default().fg(theme.text_disabled),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled(" 🔒 For Parents Only (p) ", theme.button(true, true)),
            Span::styled("  Esc: close", Style::default().fg(theme.text_disabled)),
        ]),
        Line::default(),
        heading("💬 Chat History"),
    ];
    for entry in &data.chat_history {
        lines.push(Line::from(vec![
            Span::styled(entry.topic.clone(), Style::default().fg(theme.text_primary)),
            Span::styled(
                format!("  {} · {} msgs", entry.date, entry.messages),
                secondary,
            ),
        ]));
    }

    lines.push(Line::default());
    lines.push(heading("🏆 Achievements"));
    for achievement in &data.achievements {
        lines.push(Line::from(vec![
            Span::raw(format!("{} ", achievement.icon)),
            Span::styled(
                achievement.title.clone(),
                Style::default().fg(theme.text_primary),
            ),
            Span::styled(format!(" - {}", achievement.description), secondary),
        ]));
    }

    let journey = &data.journey;
    lines.push(Line::default());
    lines.push(heading("📈 Learning Journey"));
    lines.push(Line::from(Span::styled(
        format!(
            "{} Questions Asked · {} Topics Explored · {} Days Active",
            journey.questions_asked, journey.topics_explored, journey.days_active
        ),
        secondary,
    )));

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::content::ContentPack;
    use crate::core::scheduler::ManualClock;
    use crate::frontend::tui::buffer_text;
    use crate::frontend::FrontendEvent;
    use crate::tts::testing::fake_manager;
    use crossterm::event::{KeyCode, KeyModifiers};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn app_at_main() -> AppCore {
        let (speech, _) = fake_manager();
        let mut app = AppCore::new(
            Config::default(),
            ContentPack::embedded().unwrap(),
            speech,
            Box::new(ManualClock::new()),
            StdRng::seed_from_u64(1),
            "Sunday".to_string(),
        )
        .unwrap();
        let keys = "Leo".chars().map(KeyCode::Char).chain([
            KeyCode::Enter,
            KeyCode::Enter,
            KeyCode::Char('1'),
            KeyCode::Char('2'),
            KeyCode::Char('3'),
            KeyCode::Char('4'),
            KeyCode::Enter,
            KeyCode::Char('1'),
            KeyCode::Char('2'),
            KeyCode::Char('3'),
            KeyCode::Char('4'),
            KeyCode::Enter,
        ]);
        for code in keys {
            app.handle_event(FrontendEvent::key(code, KeyModifiers::NONE));
        }
        app
    }

    fn draw(app: &AppCore) -> String {
        let theme = AppTheme::default();
        let area = Rect::new(0, 0, 120, 36);
        let mut buf = Buffer::empty(area);
        let profile = app.orchestrator.profile().unwrap();
        render(app, profile, area, &mut buf, &theme);
        buffer_text(&buf)
    }

    #[test]
    fn test_chat_tab_top_bar() {
        let app = app_at_main();
        let text = draw(&app);
        assert!(text.contains("Happy Sunday, Leo!"));
        assert!(text.contains("Ready for adventure?"));
    }

    #[test]
    fn test_quests_top_bar_progress() {
        let mut app = app_at_main();
        app.handle_event(FrontendEvent::key(KeyCode::Tab, KeyModifiers::NONE));
        app.handle_event(FrontendEvent::key(KeyCode::Tab, KeyModifiers::NONE));
        let text = draw(&app);
        assert!(text.contains("1/6 completed"));
    }

    #[test]
    fn test_profile_panel_and_pin_prompt() {
        let mut app = app_at_main();
        app.handle_event(FrontendEvent::key(KeyCode::F(2), KeyModifiers::NONE));
        let text = draw(&app);
        assert!(text.contains("For Parents Only"));
        assert!(text.contains("Chat History"));

        app.handle_event(FrontendEvent::key(KeyCode::Char('p'), KeyModifiers::NONE));
        assert!(draw(&app).contains("Enter your 4-digit PIN"));
    }

    #[test]
    fn test_notice_overlay() {
        let mut app = app_at_main();
        app.handle_event(FrontendEvent::key(KeyCode::Tab, KeyModifiers::NONE));
        app.handle_event(FrontendEvent::key(KeyCode::Enter, KeyModifiers::NONE));
        assert!(draw(&app).contains("Press any key to continue"));
    }
}
