//! Quests tab: learning adventures filtered by category.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestCategory {
    pub id: String,
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Quest {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub duration: String,
    pub reward: String,
    pub icon: String,
    /// Percent complete, 0..=100
    pub progress: u8,
    pub completed: bool,
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestCatalog {
    pub categories: Vec<QuestCategory>,
    pub quests: Vec<Quest>,
}

/// Category id that disables filtering
pub const ALL_CATEGORY: &str = "all";

/// Browsing state for the Quests tab
#[derive(Debug, Clone)]
pub struct QuestBoard {
    catalog: QuestCatalog,
    category_index: usize,
    selected: usize,
}

impl QuestBoard {
    pub fn new(catalog: QuestCatalog) -> Self {
        Self {
            catalog,
            category_index: 0,
            selected: 0,
        }
    }

    pub fn categories(&self) -> &[QuestCategory] {
        &self.catalog.categories
    }

    pub fn category_index(&self) -> usize {
        self.category_index
    }

    pub fn category_id(&self) -> &str {
        self.catalog
            .categories
            .get(self.category_index)
            .map(|c| c.id.as_str())
            .unwrap_or(ALL_CATEGORY)
    }

    pub fn next_category(&mut self) {
        let len = self.catalog.categories.len().max(1);
        self.category_index = (self.category_index + 1) % len;
        self.selected = 0;
    }

    pub fn previous_category(&mut self) {
        let len = self.catalog.categories.len().max(1);
        self.category_index = (self.category_index + len - 1) % len;
        self.selected = 0;
    }

    /// Quests in the current category
    pub fn visible(&self) -> Vec<&Quest> {
        let category = self.category_id();
        self.catalog
            .quests
            .iter()
            .filter(|q| category == ALL_CATEGORY || q.category == category)
            .collect()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_quest(&self) -> Option<&Quest> {
        self.visible().get(self.selected).copied()
    }

    /// Notice shown when the selected quest is started
    pub fn start_selected(&self) -> Option<String> {
        let quest = self.selected_quest()?;
        tracing::info!(quest = %quest.title, "Quest started");
        Some(start_message(quest))
    }

    /// (completed, total) across every quest
    pub fn progress_summary(&self) -> (usize, usize) {
        let completed = self.catalog.quests.iter().filter(|q| q.completed).count();
        (completed, self.catalog.quests.len())
    }
}

fn start_message(quest: &Quest) -> String {
    if quest.completed {
        format!(
            "🎉 Quest \"{}\" already completed! You earned: {}",
            quest.title, quest.reward
        )
    } else if quest.active {
        format!(
            "📖 Continuing quest \"{}\"... (Demo mode - this would open the quest interface!)",
            quest.title
        )
    } else {
        format!(
            "🚀 Starting quest \"{}\"... (Demo mode - this would begin the learning adventure!)",
            quest.title
        )
    }
}
