//! Creatives tab: stories and paintings, split into the child's own items and
//! the public gallery.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CreativeItem {
    pub title: String,
    pub preview: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    pub created_at: String,
    pub views: u32,
    pub likes: u32,
    /// Made by the current child
    #[serde(default)]
    pub own: bool,
    /// Palette swatches, paintings only
    #[serde(default)]
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreativesCatalog {
    pub stories: Vec<CreativeItem>,
    pub paintings: Vec<CreativeItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreativeKind {
    #[default]
    Stories,
    Paintings,
}

impl CreativeKind {
    pub fn label(self) -> &'static str {
        match self {
            CreativeKind::Stories => "📚 Stories",
            CreativeKind::Paintings => "🎨 Paintings",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            CreativeKind::Stories => "story",
            CreativeKind::Paintings => "painting",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            CreativeKind::Stories => CreativeKind::Paintings,
            CreativeKind::Paintings => CreativeKind::Stories,
        }
    }
}

/// An item ready to draw, with authorship resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry<'a> {
    pub title: &'a str,
    pub preview: &'a str,
    pub author: &'a str,
    pub avatar: &'a str,
    pub created_at: &'a str,
    pub views: u32,
    pub likes: u32,
    pub colors: &'a [String],
}

#[derive(Debug, Clone)]
pub struct CreativesTab {
    catalog: CreativesCatalog,
    kind: CreativeKind,
}

impl CreativesTab {
    pub fn new(catalog: CreativesCatalog) -> Self {
        Self {
            catalog,
            kind: CreativeKind::default(),
        }
    }

    pub fn kind(&self) -> CreativeKind {
        self.kind
    }

    pub fn toggle_kind(&mut self) {
        self.kind = self.kind.toggle();
    }

    fn items(&self) -> &[CreativeItem] {
        match self.kind {
            CreativeKind::Stories => &self.catalog.stories,
            CreativeKind::Paintings => &self.catalog.paintings,
        }
    }

    /// The child's own items, attributed to `name` and `avatar`
    pub fn mine<'a>(&'a self, name: &'a str, avatar: &'a str) -> Vec<GalleryEntry<'a>> {
        self.items()
            .iter()
            .filter(|item| item.own)
            .map(|item| entry(item, name, avatar))
            .collect()
    }

    pub fn public(&self) -> Vec<GalleryEntry<'_>> {
        self.items()
            .iter()
            .filter(|item| !item.own)
            .map(|item| {
                entry(
                    item,
                    item.author.as_deref().unwrap_or("Someone"),
                    item.avatar.as_deref().unwrap_or("🙂"),
                )
            })
            .collect()
    }

    pub fn create_notice(&self) -> String {
        format!(
            "Creating new {}... (Demo mode - this would open the {} creator!)",
            self.kind.noun(),
            self.kind.noun()
        )
    }
}

fn entry<'a>(item: &'a CreativeItem, author: &'a str, avatar: &'a str) -> GalleryEntry<'a> {
    GalleryEntry {
        title: &item.title,
        preview: &item.preview,
        author,
        avatar,
        created_at: &item.created_at,
        views: item.views,
        likes: item.likes,
        colors: &item.colors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentPack;

    fn tab() -> CreativesTab {
        CreativesTab::new(ContentPack::embedded().unwrap().creatives)
    }

    #[test]
    fn test_own_items_use_profile_identity() {
        let tab = tab();
        let mine = tab.mine("Mia", "🦋");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "The Magical Dragon Friend");
        assert_eq!(mine[0].author, "Mia");
        assert_eq!(mine[0].avatar, "🦋");
    }

    #[test]
    fn test_public_items_keep_their_authors() {
        let tab = tab();
        let public = tab.public();
        assert_eq!(public.len(), 3);
        assert_eq!(public[0].author, "Emma");
        assert!(public.iter().all(|e| e.author != "Mia"));
    }

    #[test]
    fn test_toggle_kind_switches_lists() {
        let mut tab = tab();
        tab.toggle_kind();
        assert_eq!(tab.kind(), CreativeKind::Paintings);
        assert_eq!(tab.public().len(), 2);
        assert_eq!(tab.mine("Mia", "🦋")[0].colors.len(), 4);
        assert!(tab.create_notice().starts_with("Creating new painting..."));

        tab.toggle_kind();
        assert!(tab.create_notice().starts_with("Creating new story..."));
    }
}
