use carousel::clipboard::DEFAULT_FALLBACK_COMMAND;
use carousel::controller::{
    DEFAULT_DRAG_THRESHOLD, DEFAULT_FEEDBACK_TTL, DEFAULT_INTERVAL, DEFAULT_RESUME_AFTER,
};
use carousel::opener::DEFAULT_OPEN_COMMAND;
use carousel::{
    CarouselSettings, CommandClipboard, CommandOpener, Item, ItemError, TagStyles, item,
};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::Deserialize;
use serde_with::{DurationMilliSeconds, serde_as};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AutoplayConfig {
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "interval_ms")]
    pub interval: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "resume_after_ms")]
    pub resume_after: Duration,
    pub reduced_motion: bool,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            resume_after: DEFAULT_RESUME_AFTER,
            reduced_motion: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub drag_threshold: f64,
    pub double_click_opens: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            double_click_opens: true,
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    pub fallback_command: String,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "feedback_ms")]
    pub feedback: Duration,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            fallback_command: DEFAULT_FALLBACK_COMMAND.to_string(),
            feedback: DEFAULT_FEEDBACK_TTL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OpenerConfig {
    pub command: String,
}

impl Default for OpenerConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_OPEN_COMMAND.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub autoplay: AutoplayConfig,
    #[serde(default)]
    pub gestures: GestureConfig,
    #[serde(default)]
    pub clipboard: ClipboardConfig,
    #[serde(default)]
    pub opener: OpenerConfig,
    #[serde(default)]
    pub tags: TagStyles,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Config {
    pub fn settings(&self) -> CarouselSettings {
        CarouselSettings {
            interval: self.autoplay.interval,
            resume_after: self.autoplay.resume_after,
            feedback_ttl: self.clipboard.feedback,
            reduced_motion: self.autoplay.reduced_motion,
            drag_threshold: self.gestures.drag_threshold,
            double_click_opens: self.gestures.double_click_opens,
        }
    }

    pub fn opener(&self) -> CommandOpener {
        CommandOpener::parse(&self.opener.command).unwrap_or_else(|e| {
            log::warn!("Ignoring opener '{}': {}", self.opener.command, e);
            CommandOpener::default()
        })
    }

    pub fn fallback_clipboard(&self) -> CommandClipboard {
        CommandClipboard::parse(&self.clipboard.fallback_command).unwrap_or_else(|e| {
            log::warn!(
                "Ignoring clipboard command '{}': {}",
                self.clipboard.fallback_command,
                e
            );
            CommandClipboard::default()
        })
    }

    /// Makes relative thumbnail paths relative to `base` instead of the working directory.
    fn resolve_thumbnails(&mut self, base: &Path) {
        for thumb in self.items.iter_mut().filter_map(|i| i.thumbnail.as_mut()) {
            if thumb.is_relative() {
                *thumb = base.join(&*thumb);
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("Invalid items: {0}")]
    Items(#[from] ItemError),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "showcase", "showcase")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Reads `path`, or the built-in config when it does not exist. `SHOWCASE_*` variables override both.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder();
    let builder = if path.exists() {
        builder.add_source(config::File::from(path))
    } else {
        builder.add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ))
    };

    let s = builder
        .add_source(
            config::Environment::with_prefix("SHOWCASE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut config: Config = s.try_deserialize()?;
    item::validate(&config.items)?;
    if let Some(base) = path.parent() {
        config.resolve_thumbnails(base);
    }
    Ok(config)
}

pub fn default_config() -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ))
        .build()?;
    let config: Config = s.try_deserialize()?;
    item::validate(&config.items)?;
    Ok(config)
}

/// Falls back to the built-in config when the user's file is broken, so the window still opens.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    match load_config(path) {
        Ok(c) => Ok(c),
        Err(e) => {
            log::error!("Failed to load {}: {}", path.display(), e);
            default_config()
        }
    }
}

pub fn write_default_config(path: &Path) -> std::io::Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(path.to_path_buf())
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(config_path: PathBuf, tx: Sender<AppEvent>) {
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carousel::Accent;

    #[test]
    fn test_default_config_parses() {
        let config = default_config().unwrap();
        assert_eq!(config.items.len(), 4);
        assert_eq!(config.autoplay.interval, Duration::from_millis(4000));
        assert_eq!(config.clipboard.feedback, Duration::from_millis(1100));
        assert_eq!(config.items[1].accent, Accent::new(250, 204, 21));

        let badge = config.tags.badge("PyTorch", Accent::default());
        assert_eq!(badge.abbr, "PT");
    }

    #[test]
    fn test_settings_mapping() {
        let config = Config {
            autoplay: AutoplayConfig {
                interval: Duration::from_millis(5000),
                reduced_motion: true,
                ..AutoplayConfig::default()
            },
            gestures: GestureConfig {
                double_click_opens: false,
                ..GestureConfig::default()
            },
            ..Config::default()
        };

        let settings = config.settings();
        assert_eq!(settings.interval, Duration::from_millis(5000));
        assert_eq!(settings.resume_after, DEFAULT_RESUME_AFTER);
        assert!(settings.reduced_motion);
        assert!(!settings.double_click_opens);
    }

    #[test]
    fn test_sections_deserialize_with_defaults() {
        let config: Config = serde_json::from_str(
            r#"{
                "autoplay": { "interval_ms": 5000 },
                "items": [{ "id": "a", "title": "A", "url": "https://a.dev", "thumb": "img/a.webp" }]
            }"#,
        )
        .unwrap();

        assert_eq!(config.autoplay.interval, Duration::from_millis(5000));
        assert_eq!(config.autoplay.resume_after, DEFAULT_RESUME_AFTER);
        assert_eq!(config.gestures, GestureConfig::default());
        assert_eq!(config.opener.command, "xdg-open");
    }

    #[test]
    fn test_relative_thumbnails_follow_config_dir() {
        let mut config: Config = serde_json::from_str(
            r#"{ "items": [
                { "id": "a", "title": "A", "url": "https://a.dev", "thumb": "img/a.webp" },
                { "id": "b", "title": "B", "url": "https://b.dev", "thumb": "/abs/b.webp" },
                { "id": "c", "title": "C", "url": "https://c.dev" }
            ] }"#,
        )
        .unwrap();

        config.resolve_thumbnails(Path::new("/home/me/.config/showcase"));

        assert_eq!(
            config.items[0].thumbnail,
            Some(PathBuf::from("/home/me/.config/showcase/img/a.webp"))
        );
        assert_eq!(config.items[1].thumbnail, Some(PathBuf::from("/abs/b.webp")));
        assert_eq!(config.items[2].thumbnail, None);
    }

    #[test]
    fn test_bad_commands_fall_back() {
        let mut config = Config::default();
        config.opener.command = "\"unterminated".to_string();
        config.clipboard.fallback_command = String::new();

        assert_eq!(config.opener(), CommandOpener::default());
        assert_eq!(config.fallback_clipboard(), CommandClipboard::default());
    }

    #[test]
    fn test_missing_file_uses_builtin_items() {
        let config = load_config(Path::new("/nonexistent/showcase/config.toml")).unwrap();
        assert_eq!(config.items[0].id.as_str(), "slackbot");
    }
}
