//! Child profile record and the draft edited on the setup screen.

use super::error::FlowError;

/// Longest nickname the setup form accepts
pub const NAME_MAX_CHARS: usize = 20;

/// Youngest supported age
pub const MIN_AGE: u8 = 6;

/// Oldest supported age
pub const MAX_AGE: u8 = 12;

/// Age the stepper starts at
pub const DEFAULT_AGE: u8 = 8;

/// Gender category picked on the setup screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gender {
    #[default]
    Boy,
    Girl,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Boy, Gender::Girl, Gender::Other];

    /// Label on the selection buttons
    pub fn label(self) -> &'static str {
        match self {
            Gender::Boy => "Boy",
            Gender::Girl => "Girl",
            Gender::Other => "Other",
        }
    }

    /// Label on the confirmation card ("Other" reads as "Kid" there)
    pub fn display_name(self) -> &'static str {
        match self {
            Gender::Boy => "Boy",
            Gender::Girl => "Girl",
            Gender::Other => "Kid",
        }
    }

    /// Emoji on the selection buttons
    pub fn emoji(self) -> &'static str {
        match self {
            Gender::Boy => "👦",
            Gender::Girl => "👧",
            Gender::Other => "🧒",
        }
    }

    /// Avatar choices for this category; the first one is used
    pub fn avatars(self) -> &'static [&'static str] {
        match self {
            Gender::Boy => &["👦", "🧒", "👶", "🎯", "⚽", "🚀", "🦖", "🤖"],
            Gender::Girl => &["👧", "🧒", "👶", "🌸", "🦄", "🌈", "🎨", "⭐"],
            Gender::Other => &["🧒", "👶", "🌟", "🎈", "🎭", "🎪", "🎵", "🌺"],
        }
    }

    pub fn default_avatar(self) -> &'static str {
        self.avatars()[0]
    }

    pub fn next(self) -> Self {
        match self {
            Gender::Boy => Gender::Girl,
            Gender::Girl => Gender::Other,
            Gender::Other => Gender::Boy,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Gender::Boy => Gender::Other,
            Gender::Girl => Gender::Boy,
            Gender::Other => Gender::Girl,
        }
    }
}

/// The child's display identity, immutable once created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    display_name: String,
    gender: Gender,
    age: u8,
    avatar: String,
}

impl Profile {
    /// Build a profile, trimming the name and clamping the age
    pub fn new(display_name: &str, gender: Gender, age: u8) -> Result<Self, FlowError> {
        let name = display_name.trim();
        if name.is_empty() {
            return Err(FlowError::EmptyName);
        }
        if name.chars().count() > NAME_MAX_CHARS {
            return Err(FlowError::NameTooLong {
                max: NAME_MAX_CHARS,
            });
        }

        Ok(Self {
            display_name: name.to_string(),
            gender,
            age: age.clamp(MIN_AGE, MAX_AGE),
            avatar: gender.default_avatar().to_string(),
        })
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn avatar(&self) -> &str {
        &self.avatar
    }
}

/// Editable state behind the profile setup screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDraft {
    pub nickname: String,
    pub gender: Gender,
    pub age: u8,
}

impl Default for ProfileDraft {
    fn default() -> Self {
        Self {
            nickname: String::new(),
            gender: Gender::default(),
            age: DEFAULT_AGE,
        }
    }
}

impl ProfileDraft {
    /// Replace the nickname, keeping only the first NAME_MAX_CHARS characters
    pub fn set_nickname(&mut self, text: &str) {
        self.nickname = text.chars().take(NAME_MAX_CHARS).collect();
    }

    pub fn increment_age(&mut self) {
        self.age = self.age.saturating_add(1).min(MAX_AGE);
    }

    pub fn decrement_age(&mut self) {
        self.age = self.age.saturating_sub(1).max(MIN_AGE);
    }

    pub fn can_increment_age(&self) -> bool {
        self.age < MAX_AGE
    }

    pub fn can_decrement_age(&self) -> bool {
        self.age > MIN_AGE
    }

    /// Avatar previewed for the current gender selection
    pub fn preview_avatar(&self) -> &'static str {
        self.gender.default_avatar()
    }

    /// Whether the submit button is enabled
    pub fn can_submit(&self) -> bool {
        !self.nickname.trim().is_empty()
    }

    pub fn build(&self) -> Result<Profile, FlowError> {
        Profile::new(&self.nickname, self.gender, self.age)
    }
}
