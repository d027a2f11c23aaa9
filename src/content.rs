//! Mock content pack: reply templates and the quest, game, gallery and
//! dashboard catalogs.
//!
//! The defaults are compiled in from `defaults/content/`. A file with the same
//! name under `<data dir>/content/` replaces the embedded one, so replies and
//! catalogs can be tweaked without rebuilding.

use crate::core::creatives::CreativesCatalog;
use crate::core::dashboard::DashboardData;
use crate::core::games::GameCatalog;
use crate::core::quests::QuestCatalog;
use crate::core::responder::ResponseTable;
use anyhow::{Context, Result};
use include_dir::{include_dir, Dir};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

static CONTENT_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/defaults/content");

const RESPONSES_FILE: &str = "responses.toml";
const QUESTS_FILE: &str = "quests.toml";
const GAMES_FILE: &str = "games.toml";
const CREATIVES_FILE: &str = "creatives.toml";
const DASHBOARD_FILE: &str = "dashboard.toml";

/// Everything the screens display that is not produced by the user
#[derive(Debug, Clone)]
pub struct ContentPack {
    pub responses: ResponseTable,
    pub quests: QuestCatalog,
    pub games: GameCatalog,
    pub creatives: CreativesCatalog,
    pub dashboard: DashboardData,
}

impl ContentPack {
    /// Load only the compiled-in defaults
    pub fn embedded() -> Result<Self> {
        Self::load(None)
    }

    /// Load the pack, preferring files found in `override_dir`
    pub fn load(override_dir: Option<&Path>) -> Result<Self> {
        Ok(Self {
            responses: load_file(override_dir, RESPONSES_FILE)?,
            quests: load_file(override_dir, QUESTS_FILE)?,
            games: load_file(override_dir, GAMES_FILE)?,
            creatives: load_file(override_dir, CREATIVES_FILE)?,
            dashboard: load_file(override_dir, DASHBOARD_FILE)?,
        })
    }
}

fn load_file<T: DeserializeOwned>(override_dir: Option<&Path>, name: &str) -> Result<T> {
    if let Some(dir) = override_dir {
        let path = dir.join(name);
        if path.exists() {
            let contents = fs::read_to_string(&path)
                .context(format!("Failed to read content file: {:?}", path))?;
            tracing::info!("Using content override {:?}", path);
            return toml::from_str(&contents)
                .context(format!("Failed to parse content file: {:?}", path));
        }
    }

    let contents = CONTENT_DIR
        .get_file(name)
        .and_then(|f| f.contents_utf8())
        .context(format!("Missing embedded content file {}", name))?;
    toml::from_str(contents).context(format!("Failed to parse embedded content file {}", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_pack_parses() {
        let pack = ContentPack::embedded().unwrap();
        assert_eq!(pack.responses.topics.len(), 4);
        assert_eq!(pack.responses.fallbacks.len(), 3);
        assert_eq!(pack.responses.starter_topics.len(), 10);
        assert_eq!(pack.responses.follow_up_prompts.len(), 6);
        assert_eq!(pack.quests.quests.len(), 6);
        assert_eq!(pack.games.games.len(), 6);
        assert_eq!(pack.games.charades.len(), 5);
        assert_eq!(pack.creatives.stories.len(), 4);
        assert_eq!(pack.creatives.paintings.len(), 3);
        assert_eq!(pack.dashboard.children.len(), 2);
    }

    #[test]
    fn test_override_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(RESPONSES_FILE),
            r#"
starter_topics = ["🐝 Bees?"]
follow_up_prompts = ["More!", "Again!"]
topics = []

[[fallbacks]]
text = "Buzz!"
suggestions = []
"#,
        )
        .unwrap();

        let pack = ContentPack::load(Some(dir.path())).unwrap();
        assert_eq!(pack.responses.fallbacks[0].text, "Buzz!");
        // Files without an override still come from the embedded pack
        assert_eq!(pack.quests.quests.len(), 6);
    }

    #[test]
    fn test_broken_override_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(QUESTS_FILE), "quests = 5").unwrap();
        assert!(ContentPack::load(Some(dir.path())).is_err());
    }
}
