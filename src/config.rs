//! Configuration loading for noteworthy.
//!
//! Two separate things live here: the [`Query`] describing what to look for
//! (from flags or a `key=value` arguments file), and the optional
//! [`Settings`] loaded from `noteworthy.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const SETTINGS_FILE: &str = "noteworthy.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("missing required value: {0}")]
    MissingValue(&'static str),
    #[error("cannot locate the executable directory")]
    NoExecutableDir,
}

/// What the user is looking for. Built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Eclipse release, e.g. "4.30"
    pub eclipse_version: String,
    /// Substring of the feature title (case-insensitive)
    pub title_to_match: String,
    /// Substring of the page title; empty matches every page
    pub page_to_match: String,
}

impl Query {
    /// Create a query, rejecting an empty version or title
    pub fn new(
        eclipse_version: impl Into<String>,
        title_to_match: impl Into<String>,
        page_to_match: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let query = Self {
            eclipse_version: eclipse_version.into(),
            title_to_match: title_to_match.into(),
            page_to_match: page_to_match.into(),
        };

        if query.eclipse_version.is_empty() {
            return Err(ConfigError::MissingValue("EclipseVersion"));
        }
        if query.title_to_match.is_empty() {
            return Err(ConfigError::MissingValue("TitleToMatch"));
        }

        Ok(query)
    }

    /// Load a query from a `key=value` arguments file
    pub fn from_args_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_args_file(&content)
    }

    /// Parse the `EclipseVersion=`, `TitleToMatch=`, `PageToMatch=` lines.
    ///
    /// Lines without `=` and unknown keys are skipped. Values are kept
    /// verbatim after the first `=`.
    pub fn parse_args_file(content: &str) -> Result<Self, ConfigError> {
        let mut eclipse_version = String::new();
        let mut title_to_match = String::new();
        let mut page_to_match = String::new();

        for line in content.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            match key {
                "EclipseVersion" => eclipse_version = value.to_string(),
                "TitleToMatch" => title_to_match = value.to_string(),
                "PageToMatch" => page_to_match = value.to_string(),
                _ => {}
            }
        }

        Self::new(eclipse_version, title_to_match, page_to_match)
    }

    /// `<executable dir>/.vscode/args`
    pub fn default_args_file() -> Result<PathBuf, ConfigError> {
        let exe = std::env::current_exe()?;
        let dir = exe.parent().ok_or(ConfigError::NoExecutableDir)?;
        Ok(dir.join(".vscode").join("args"))
    }
}

/// Where the release notes live
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsSettings {
    /// Root of the news site, without trailing slash
    pub base_url: String,
    /// Page names fetched for every run, in order
    pub pages: Vec<String>,
}

/// HTTP client options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Overrides the built-in User-Agent
    pub user_agent: Option<String>,
}

/// Root settings structure. Every field has a default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub news: NewsSettings,
    pub http: HttpSettings,
}

impl Settings {
    /// Load settings from `explicit`, or from the first file found in the
    /// standard locations. No file at all means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match Self::find_settings_file() {
                Some(path) => Self::load_from(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Load settings from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Check the current directory, then `~/.config/noteworthy/`
    fn find_settings_file() -> Option<PathBuf> {
        let local = PathBuf::from(SETTINGS_FILE);
        if local.exists() {
            return Some(local);
        }

        let home = dirs::home_dir()?
            .join(".config")
            .join("noteworthy")
            .join(SETTINGS_FILE);
        home.exists().then_some(home)
    }
}

impl NewsSettings {
    /// `{base_url}/{version}/{page}.php` for every configured page
    pub fn page_urls(&self, eclipse_version: &str) -> Vec<String> {
        let base = self.base_url.trim_end_matches('/');
        self.pages
            .iter()
            .map(|page| format!("{base}/{eclipse_version}/{page}.php"))
            .collect()
    }
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.eclipse.org/eclipse/news".to_string(),
            pages: ["jdt", "platform", "platform_isv", "pde"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: None,
        }
    }
}
