//! The steady-state screen: four tabs, a profile side panel and a one-line
//! notice area for demo messages.

use super::chat::ChatSession;
use super::creatives::CreativesTab;
use super::dashboard::Dashboard;
use super::games::GamesTab;
use super::profile::Profile;
use super::profile_panel::ProfilePanel;
use super::quests::QuestBoard;
use crate::content::ContentPack;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MainTab {
    #[default]
    Chat,
    Creatives,
    Quests,
    Games,
}

impl MainTab {
    pub const ALL: [MainTab; 4] = [
        MainTab::Chat,
        MainTab::Creatives,
        MainTab::Quests,
        MainTab::Games,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MainTab::Chat => "💬 Chat",
            MainTab::Creatives => "🎨 Creatives",
            MainTab::Quests => "🗺️ Quests",
            MainTab::Games => "🎮 Games",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Title and subtitle of the top bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopBar {
    pub title: String,
    pub subtitle: String,
}

pub struct MainApp {
    pub tab: MainTab,
    pub chat: ChatSession,
    pub creatives: CreativesTab,
    pub quests: QuestBoard,
    pub games: GamesTab,
    pub panel: ProfilePanel,
    pub dashboard: Dashboard,
    /// Demo message waiting to be dismissed
    pub notice: Option<String>,
}

impl MainApp {
    pub fn new(chat: ChatSession, content: &ContentPack) -> Self {
        Self {
            tab: MainTab::default(),
            chat,
            creatives: CreativesTab::new(content.creatives.clone()),
            quests: QuestBoard::new(content.quests.clone()),
            games: GamesTab::new(content.games.clone()),
            panel: ProfilePanel::default(),
            dashboard: Dashboard::new(content.dashboard.clone()),
            notice: None,
        }
    }

    pub fn top_bar(&self, profile: &Profile, weekday: &str) -> TopBar {
        match self.tab {
            MainTab::Chat => TopBar {
                title: format!("Happy {}, {}! 👋", weekday, profile.display_name()),
                subtitle: "Ready for adventure? ✨".to_string(),
            },
            MainTab::Creatives => TopBar {
                title: "Creative Studio".to_string(),
                subtitle: "Stories and paintings by kids like you".to_string(),
            },
            MainTab::Quests => {
                let (done, total) = self.quests.progress_summary();
                TopBar {
                    title: "Quests".to_string(),
                    subtitle: format!("{}/{} completed", done, total),
                }
            }
            MainTab::Games => TopBar {
                title: "Games".to_string(),
                subtitle: "Play, think and have fun".to_string(),
            },
        }
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        let notice = notice.into();
        tracing::debug!(%notice, "Notice");
        self.notice = Some(notice);
    }
}
