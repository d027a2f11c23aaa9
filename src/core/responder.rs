//! Canned reply generator for the chat buddy.
//!
//! There is no model behind the chat: a message is scanned for topic keywords
//! and answered with that topic's template, or with a random encouraging
//! fallback. Randomness always comes from the caller's RNG so a seeded RNG
//! gives repeatable conversations.

use aho_corasick::AhoCorasick;
use anyhow::{bail, Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

/// Reply text plus the follow-up chips shown under it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Reply {
    pub text: String,
    pub suggestions: Vec<String>,
}

/// One keyword-routed topic
#[derive(Debug, Clone, Deserialize)]
pub struct TopicEntry {
    pub name: String,
    pub keywords: Vec<String>,
    pub text: String,
    pub suggestions: Vec<String>,
}

/// Deserialized form of `responses.toml`
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseTable {
    pub starter_topics: Vec<String>,
    pub follow_up_prompts: Vec<String>,
    pub topics: Vec<TopicEntry>,
    pub fallbacks: Vec<Reply>,
}

/// Keyword matcher over a [`ResponseTable`]
pub struct Responder {
    table: ResponseTable,
    matcher: AhoCorasick,
    /// Pattern index -> topic index
    pattern_topic: Vec<usize>,
}

impl Responder {
    pub fn new(table: ResponseTable) -> Result<Self> {
        if table.fallbacks.is_empty() {
            bail!("responses need at least one fallback reply");
        }
        if table.starter_topics.is_empty() {
            bail!("responses need at least one starter topic");
        }
        if table.follow_up_prompts.is_empty() {
            bail!("responses need at least one follow-up prompt");
        }

        let mut patterns = Vec::new();
        let mut pattern_topic = Vec::new();
        for (idx, topic) in table.topics.iter().enumerate() {
            for keyword in &topic.keywords {
                patterns.push(keyword.as_str());
                pattern_topic.push(idx);
            }
        }

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&patterns)
            .context("Failed to build reply keyword matcher")?;

        tracing::debug!(
            topics = table.topics.len(),
            keywords = patterns.len(),
            "Responder ready"
        );

        Ok(Self {
            table,
            matcher,
            pattern_topic,
        })
    }

    /// Name of the topic a message routes to, if any.
    /// Earlier topics in the table win over later ones.
    pub fn match_topic(&self, message: &str) -> Option<&TopicEntry> {
        self.matcher
            .find_overlapping_iter(message)
            .map(|m| self.pattern_topic[m.pattern().as_usize()])
            .min()
            .map(|idx| &self.table.topics[idx])
    }

    /// Pick the reply for `message`
    pub fn respond<R: Rng + ?Sized>(&self, message: &str, rng: &mut R) -> Reply {
        if let Some(topic) = self.match_topic(message) {
            tracing::debug!(topic = %topic.name, "Reply routed by keyword");
            return Reply {
                text: topic.text.clone(),
                suggestions: topic.suggestions.clone(),
            };
        }

        // Non-empty, checked in new()
        let idx = rng.gen_range(0..self.table.fallbacks.len());
        self.table.fallbacks[idx].clone()
    }

    /// `count` distinct starter topics in random order
    pub fn topic_suggestions<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<String> {
        self.table
            .starter_topics
            .choose_multiple(rng, count)
            .cloned()
            .collect()
    }

    /// Two or three distinct "tell me more" style prompts
    pub fn follow_up_prompts<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<String> {
        let count = rng.gen_range(2..=3);
        self.table
            .follow_up_prompts
            .choose_multiple(rng, count)
            .cloned()
            .collect()
    }

    pub fn table(&self) -> &ResponseTable {
        &self.table
    }
}
