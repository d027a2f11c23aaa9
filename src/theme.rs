//! Application-wide colors
//!
//! One bright, high-contrast palette shared by every screen. Renderers never
//! hard-code colors; they read them from [`AppTheme`].

use ratatui::style::{Color, Modifier, Style};

/// Complete application theme defining all UI colors
#[derive(Debug, Clone)]
pub struct AppTheme {
    pub name: String,

    // Window colors
    pub window_border: Color,
    pub window_border_focused: Color,
    pub window_title: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_disabled: Color,

    // Chat bubbles
    pub bubble_user: Color,
    pub bubble_buddy: Color,
    pub chip: Color,
    pub chip_selected: Color,

    // Form colors
    pub form_label: Color,
    pub form_label_focused: Color,
    pub form_error: Color,

    // Status/Indicator colors
    pub status_success: Color,
    pub status_warning: Color,
    pub status_error: Color,

    // Progress bars
    pub progress_fill: Color,
    pub progress_empty: Color,

    // Interactive elements
    pub button_normal: Color,
    pub button_active: Color,
    pub button_disabled: Color,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self::kid()
    }
}

impl AppTheme {
    /// Purple/pink/sunshine palette
    pub fn kid() -> Self {
        Self {
            name: "kid".to_string(),
            window_border: Color::Rgb(167, 139, 250),
            window_border_focused: Color::Rgb(236, 72, 153),
            window_title: Color::Rgb(124, 58, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(203, 213, 225),
            text_disabled: Color::Rgb(100, 116, 139),
            bubble_user: Color::Rgb(96, 165, 250),
            bubble_buddy: Color::Rgb(250, 204, 21),
            chip: Color::Rgb(253, 186, 116),
            chip_selected: Color::Rgb(236, 72, 153),
            form_label: Color::Rgb(203, 213, 225),
            form_label_focused: Color::Rgb(250, 204, 21),
            form_error: Color::Rgb(248, 113, 113),
            status_success: Color::Rgb(74, 222, 128),
            status_warning: Color::Rgb(251, 191, 36),
            status_error: Color::Rgb(248, 113, 113),
            progress_fill: Color::Rgb(167, 139, 250),
            progress_empty: Color::Rgb(51, 65, 85),
            button_normal: Color::Rgb(124, 58, 237),
            button_active: Color::Rgb(236, 72, 153),
            button_disabled: Color::Rgb(71, 85, 105),
        }
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.window_title)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self, focused: bool) -> Style {
        let color = if focused {
            self.window_border_focused
        } else {
            self.window_border
        };
        Style::default().fg(color)
    }

    /// Button label style; disabled buttons are greyed out
    pub fn button(&self, focused: bool, enabled: bool) -> Style {
        let bg = match (enabled, focused) {
            (false, _) => self.button_disabled,
            (true, true) => self.button_active,
            (true, false) => self.button_normal,
        };
        Style::default()
            .fg(Color::White)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.form_error)
    }
}
