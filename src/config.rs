//! Configuration loader/writer plus the typed settings structures.
//!
//! Everything lives under one data directory (`~/.kid-chat` unless
//! `KID_CHAT_DIR` or `--data-dir` says otherwise). On first run the embedded
//! `defaults/config.toml` is written there so parents can edit it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::chat::ChatSettings;

// Embed default configuration at compile time
const DEFAULT_CONFIG: &str = include_str!("../defaults/config.toml");

const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "kid-chat.log";
const CONTENT_DIR: &str = "content";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub games: GamesConfig,
    #[serde(default)]
    pub tts: TtsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_app_title")]
    pub app_title: String,
    #[serde(default = "default_buddy_name")]
    pub buddy_name: String,
    #[serde(default)]
    pub show_code_default: bool,
}

fn default_app_title() -> String {
    "Kid Chat".to_string()
}

fn default_buddy_name() -> String {
    "Buddy".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            app_title: default_app_title(),
            buddy_name: default_buddy_name(),
            show_code_default: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_think_min_ms")]
    pub think_min_ms: u64,
    #[serde(default = "default_think_max_ms")]
    pub think_max_ms: u64,
    #[serde(default = "default_suggestion_delay_ms")]
    pub suggestion_delay_ms: u64,
    #[serde(default = "default_suggestion_count")]
    pub suggestion_count: usize,
    #[serde(default = "default_true")]
    pub auto_speak: bool,
}

fn default_think_min_ms() -> u64 {
    1000
}

fn default_think_max_ms() -> u64 {
    2000
}

fn default_suggestion_delay_ms() -> u64 {
    800
}

fn default_suggestion_count() -> usize {
    3
}

fn default_true() -> bool {
    true
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            think_min_ms: default_think_min_ms(),
            think_max_ms: default_think_max_ms(),
            suggestion_delay_ms: default_suggestion_delay_ms(),
            suggestion_count: default_suggestion_count(),
            auto_speak: default_true(),
        }
    }
}

impl ChatConfig {
    pub fn settings(&self) -> ChatSettings {
        ChatSettings {
            think_min: Duration::from_millis(self.think_min_ms),
            think_max: Duration::from_millis(self.think_max_ms),
            suggestion_delay: Duration::from_millis(self.suggestion_delay_ms),
            suggestion_count: self.suggestion_count,
            auto_speak: self.auto_speak,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamesConfig {
    #[serde(default = "default_round_advance_ms")]
    pub round_advance_ms: u64,
}

fn default_round_advance_ms() -> u64 {
    2000
}

impl Default for GamesConfig {
    fn default() -> Self {
        Self {
            round_advance_ms: default_round_advance_ms(),
        }
    }
}

impl GamesConfig {
    pub fn round_advance(&self) -> Duration {
        Duration::from_millis(self.round_advance_ms)
    }
}

/// Text-to-speech settings
///
/// Rate and pitch are relative to the engine's normal value (1.0 = normal,
/// 0.5 = slow/low, 2.0 = fast/high). Volume runs from 0.0 to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TtsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_tts_rate")]
    pub rate: f32,
    #[serde(default = "default_tts_pitch")]
    pub pitch: f32,
    #[serde(default = "default_tts_volume")]
    pub volume: f32,
}

fn default_tts_rate() -> f32 {
    0.8 // A little slower than normal for young listeners
}

fn default_tts_pitch() -> f32 {
    1.2
}

fn default_tts_volume() -> f32 {
    0.8
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            rate: default_tts_rate(),
            pitch: default_tts_pitch(),
            volume: default_tts_volume(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the data directory, extracting defaults first
    pub fn load(data_dir: &Path) -> Result<Self> {
        Self::extract_defaults(data_dir)?;
        Self::load_from_path(&Self::config_path(data_dir))
    }

    /// Load config from a custom file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).context(format!("Failed to read config file: {:?}", path))?;
        let config: Config =
            toml::from_str(&contents).context(format!("Failed to parse config file: {:?}", path))?;

        for issue in config.validate() {
            tracing::warn!("Config issue in {:?}: {}", path, issue);
        }
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents).context(format!("Failed to write config file: {:?}", path))?;
        Ok(())
    }

    /// Values that parse but make no sense; empty when the config is usable as is
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.chat.think_min_ms > self.chat.think_max_ms {
            issues.push(format!(
                "chat.think_min_ms ({}) is greater than chat.think_max_ms ({})",
                self.chat.think_min_ms, self.chat.think_max_ms
            ));
        }
        if self.chat.suggestion_count == 0 {
            issues.push("chat.suggestion_count is 0, no starter topics will show".to_string());
        }
        if !(0.0..=1.0).contains(&self.tts.volume) {
            issues.push(format!("tts.volume ({}) must be between 0.0 and 1.0", self.tts.volume));
        }
        for (name, value) in [("rate", self.tts.rate), ("pitch", self.tts.pitch)] {
            if !(0.5..=2.0).contains(&value) {
                issues.push(format!("tts.{} ({}) must be between 0.5 and 2.0", name, value));
            }
        }
        if self.ui.buddy_name.trim().is_empty() {
            issues.push("ui.buddy_name is empty".to_string());
        }
        issues
    }

    /// Write the default config into `data_dir` if it is not there yet
    fn extract_defaults(data_dir: &Path) -> Result<()> {
        fs::create_dir_all(data_dir)
            .context(format!("Failed to create data directory: {:?}", data_dir))?;

        let config_path = Self::config_path(data_dir);
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG).context("Failed to write config.toml")?;
            tracing::info!("Extracted default config to {:?}", config_path);
        }
        Ok(())
    }

    /// Get the base kid-chat directory (~/.kid-chat/)
    /// Can be overridden with KID_CHAT_DIR environment variable
    pub fn base_dir() -> Result<PathBuf> {
        if let Ok(custom_dir) = std::env::var("KID_CHAT_DIR") {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".kid-chat"))
    }

    pub fn config_path(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE)
    }

    pub fn log_path(data_dir: &Path) -> PathBuf {
        data_dir.join(LOG_FILE)
    }

    /// Directory whose files replace the embedded content pack
    pub fn content_dir(data_dir: &Path) -> PathBuf {
        data_dir.join(CONTENT_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_default_matches_code_defaults() {
        let parsed: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, Config::default());
        assert!(parsed.validate().is_empty());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str("[chat]\nthink_min_ms = 10\n").unwrap();
        assert_eq!(config.chat.think_min_ms, 10);
        assert_eq!(config.chat.think_max_ms, 2000);
        assert_eq!(config.games.round_advance_ms, 2000);
        assert_eq!(config.tts.rate, 0.8);
        assert_eq!(config.ui.buddy_name, "Buddy");
    }

    #[test]
    fn test_load_extracts_defaults_on_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("kid-chat");

        let config = Config::load(&data_dir).unwrap();
        assert_eq!(config, Config::default());
        assert!(Config::config_path(&data_dir).exists());
    }

    #[test]
    fn test_load_keeps_user_edits() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            Config::config_path(dir.path()),
            "[ui]\nbuddy_name = \"Robo\"\n[tts]\nenabled = false\n",
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.ui.buddy_name, "Robo");
        assert!(!config.tts.enabled);
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.toml");
        let mut config = Config::default();
        config.games.round_advance_ms = 500;
        config.chat.auto_speak = false;

        config.save(&path).unwrap();
        assert_eq!(Config::load_from_path(&path).unwrap(), config);
    }

    #[test]
    fn test_validate_flags_bad_values() {
        let mut config = Config::default();
        config.chat.think_min_ms = 3000;
        config.tts.volume = 1.5;
        config.tts.pitch = 4.0;
        let issues = config.validate();
        assert_eq!(issues.len(), 3);
        assert!(issues[0].contains("think_min_ms"));
    }

    #[test]
    fn test_broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[chat\n").unwrap();
        assert!(Config::load_from_path(&path).is_err());
    }
}
