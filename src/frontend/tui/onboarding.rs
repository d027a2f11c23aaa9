//! Onboarding screens: profile setup, confirmation card and PIN setup.

use super::popup::{centered_rect, digit_slots, modal_frame};
use super::progress_bar::StepProgress;
use crate::core::access_code::{CodeEntry, CodeStep};
use crate::core::profile::{Gender, Profile, ProfileDraft};
use crate::core::{AppCore, Screen};
use crate::data::{SetupField, UiState};
use crate::theme::AppTheme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

const CARD_WIDTH: u16 = 64;
const CARD_HEIGHT: u16 = 26;

/// Draw whichever onboarding screen the orchestrator resolves to
pub fn render(core: &AppCore, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let step = core.orchestrator.state().onboarding_step().unwrap_or(1);
    let card = centered_rect(CARD_WIDTH, CARD_HEIGHT, area);
    let inner = modal_frame(&core.config.ui.app_title, card, buf, theme);

    let [progress_area, _, body] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(inner);
    StepProgress::new(step).render(progress_area, buf, theme);

    match core.orchestrator.screen() {
        Screen::ProfileSetup => render_profile_setup(
            &core.ui,
            &core.draft,
            core.setup_error.as_ref().map(ToString::to_string),
            body,
            buf,
            theme,
        ),
        Screen::Confirmation { profile } => render_confirmation(profile, body, buf, theme),
        Screen::CodeSetup { .. } => render_code_setup(&core.code_entry, body, buf, theme),
        Screen::Main { .. } | Screen::ParentView { .. } => {}
    }
}

fn label(text: &str, focused: bool, theme: &AppTheme) -> Line<'static> {
    let style = if focused {
        Style::default()
            .fg(theme.form_label_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.form_label)
    };
    let marker = if focused { "▶ " } else { "  " };
    Line::from(Span::styled(format!("{}{}", marker, text), style))
}

fn render_profile_setup(
    ui: &UiState,
    draft: &ProfileDraft,
    error: Option<String>,
    area: Rect,
    buf: &mut Buffer,
    theme: &AppTheme,
) {
    let [header, name_label, name_box, gender_label, gender_row, age_label, age_row, _, submit, error_row] =
        Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .areas(area);

    Paragraph::new(vec![
        Line::from(draft.preview_avatar()),
        Line::from(Span::styled("Create Your Profile", theme.title())),
        Line::from(Span::styled(
            "Let's set up your amazing adventure! 🌟",
            Style::default().fg(theme.text_secondary),
        )),
    ])
    .alignment(Alignment::Center)
    .render(header, buf);

    let focus = ui.setup_focus;

    label("What should we call you?", focus == SetupField::Nickname, theme)
        .render(name_label, buf);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border(focus == SetupField::Nickname));
    let text_area = block.inner(name_box);
    block.render(name_box, buf);
    Widget::render(&ui.nickname_input, text_area, buf);

    label("I am a...", focus == SetupField::Gender, theme).render(gender_label, buf);
    let mut spans = vec![Span::raw("  ")];
    for gender in Gender::ALL {
        let selected = gender == draft.gender;
        let style = if selected {
            theme.button(focus == SetupField::Gender, true)
        } else {
            Style::default().fg(theme.text_secondary)
        };
        spans.push(Span::styled(
            format!(" {} {} ", gender.emoji(), gender.label()),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans).render(gender_row, buf);

    label("How old are you?", focus == SetupField::Age, theme).render(age_label, buf);
    let arrow = |enabled: bool| {
        if enabled {
            Style::default().fg(theme.text_primary)
        } else {
            Style::default().fg(theme.text_disabled)
        }
    };
    Line::from(vec![
        Span::raw("  "),
        Span::styled("◀ ", arrow(draft.can_decrement_age())),
        Span::styled(
            format!("{}", draft.age),
            Style::default()
                .fg(theme.form_label_focused)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶", arrow(draft.can_increment_age())),
        Span::styled(" years old", Style::default().fg(theme.text_secondary)),
    ])
    .render(age_row, buf);

    Line::from(Span::styled(
        " Create My Profile! 🚀 ",
        theme.button(focus == SetupField::Submit, draft.can_submit()),
    ))
    .centered()
    .render(submit, buf);

    if let Some(error) = error {
        Paragraph::new(Span::styled(error, theme.error()))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(error_row, buf);
    } else {
        Line::from(Span::styled(
            "Tab: next field   ←/→: change   Enter: create",
            Style::default().fg(theme.text_disabled),
        ))
        .centered()
        .render(error_row, buf);
    }
}

fn render_confirmation(profile: &Profile, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let secondary = Style::default().fg(theme.text_secondary);
    let lines = vec![
        Line::from("🎉"),
        Line::from(Span::styled("Profile Created!", theme.title())),
        Line::from(Span::styled(
            format!("Welcome to Kid Chat, {}! 🌟", profile.display_name()),
            secondary,
        )),
        Line::default(),
        Line::from(vec![
            Span::raw(profile.avatar().to_string()),
            Span::raw("  "),
            Span::styled(
                profile.display_name().to_string(),
                Style::default()
                    .fg(theme.text_primary)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!(
                "{} years old • {}",
                profile.age(),
                profile.gender().display_name()
            ),
            secondary,
        )),
        Line::default(),
        Line::from(Span::styled("Family Profiles", theme.title())),
        Line::from(vec![
            Span::styled(
                format!(" {} {} ", profile.avatar(), profile.display_name()),
                Style::default().fg(theme.status_success),
            ),
            Span::raw("  "),
            Span::styled(" + Add Profile ", theme.button(false, false)),
        ]),
        Line::from(Span::styled(
            "* Multiple profiles feature coming soon!",
            Style::default().fg(theme.text_disabled),
        )),
        Line::default(),
        Line::from(Span::styled(" Continue to PIN Setup ➜ ", theme.button(true, true))),
        Line::default(),
        Line::from(Span::styled(
            "🎯 Did you know? Kids your age ask about 300 questions per day!",
            secondary,
        )),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

fn render_code_setup(entry: &CodeEntry, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
    let secondary = Style::default().fg(theme.text_secondary);
    let (title, subtitle, button) = match entry.step() {
        CodeStep::Create => (
            "Set Parent PIN",
            "Create a 4-digit PIN for parent access 🔒",
            "Continue ➜",
        ),
        CodeStep::Confirm => (
            "Confirm PIN",
            "Please enter your PIN again to confirm ✅",
            "Complete Setup ➜",
        ),
    };

    let mut lines = vec![
        Line::from("🛡️"),
        Line::from(Span::styled(title, theme.title())),
        Line::from(Span::styled(subtitle, secondary)),
        Line::default(),
        digit_slots(entry.current(), entry.show_digits(), theme),
        Line::default(),
        Line::from(Span::styled(
            if entry.show_digits() {
                "Tab: Hide PIN"
            } else {
                "Tab: Show PIN"
            },
            secondary,
        )),
        Line::default(),
    ];

    match entry.error() {
        Some(error) => lines.push(Line::from(Span::styled(error.to_string(), theme.error()))),
        None => lines.push(Line::default()),
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!(" {} ", button),
        theme.button(true, entry.can_submit()),
    )));
    if entry.step() == CodeStep::Confirm {
        lines.push(Line::from(Span::styled(
            "Esc: Back to Create PIN",
            secondary,
        )));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "This PIN keeps settings and reports for parents only. 🛡️",
        Style::default().fg(theme.text_disabled),
    )));

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}
