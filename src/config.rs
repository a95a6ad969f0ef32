use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub cache: CacheConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    pub base_url: String,
    pub page_size: u32,
    pub snippets_path: String,
    pub my_snippets_path: String,
    pub campaign_id: Option<String>,
    /// Location used when the fragment carries no `vol_loc`.
    pub default_location: String,
    pub fallback_location: String,
    pub fallback_distance: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            page_size: 10,
            snippets_path: "/ui_snippets".to_string(),
            my_snippets_path: "/ui_my_snippets".to_string(),
            campaign_id: None,
            default_location: String::new(),
            fallback_location: "USA".to_string(),
            fallback_distance: "1500".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_entries: 32 }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "afg=info,warn".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        if !path.is_file() {
            return Err(AppError::invalid_argument(format!(
                "config path is not a regular file: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path).map_err(|source| {
            AppError::io_with_context(source, format!("failed to read config: {}", path.display()))
        })?;
        Self::parse(&raw, &path.display().to_string())
    }

    pub fn from_toml_str(raw: &str) -> AppResult<Self> {
        Self::parse(raw, "config")
    }

    fn parse(raw: &str, origin: &str) -> AppResult<Self> {
        toml::from_str::<Self>(raw)
            .map(Self::sanitized)
            .map_err(|source| AppError::config(format!("failed to parse {origin}: {source}")))
    }

    fn sanitized(mut self) -> Self {
        self.search.page_size = self.search.page_size.max(1);
        self.cache.max_entries = self.cache.max_entries.max(1);
        while self.search.base_url.ends_with('/') {
            self.search.base_url.pop();
        }
        if self
            .search
            .campaign_id
            .as_deref()
            .is_some_and(|id| id.trim().is_empty())
        {
            self.search.campaign_id = None;
        }
        self
    }
}

const CONFIG_PATH_ENV: &str = "AFG_CONFIG_PATH";

/// `$AFG_CONFIG_PATH`, else `afg/config.toml` under the XDG config dir.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = env_path(CONFIG_PATH_ENV) {
        return Some(explicit);
    }
    let config_dir =
        env_path("XDG_CONFIG_HOME").or_else(|| env_path("HOME").map(|home| home.join(".config")))?;
    Some(config_dir.join("afg").join("config.toml"))
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
