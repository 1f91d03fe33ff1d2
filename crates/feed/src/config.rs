//! Feed configuration
//!
//! Loaded from JSON (every field optional) and then overridden by CLI
//! flags. Missing fields take the defaults below.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;
use uuid::Uuid;

use crate::error::{FeedError, Result};

/// Feed fetched when nothing else is configured
pub const DEFAULT_SOURCE: &str = "https://www.linux.com/rss/feeds.php";

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Run identifier, shows up in every log line of a retrieval
    pub id: String,
    pub source: String,
    pub timeout_secs: u64,
    pub max_body_bytes: usize,
    pub user_agent: String,
    /// Element that scopes the search (first entry of the feed)
    pub item_tag: String,
    /// Element whose text is extracted inside the scope
    pub content_tag: String,
    /// Search the whole document when the feed has no item at all
    pub fallback_to_root: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            source: DEFAULT_SOURCE.to_string(),
            timeout_secs: 30,
            max_body_bytes: 8 * 1024 * 1024,
            user_agent: concat!("rss-latest/", env!("CARGO_PKG_VERSION")).to_string(),
            item_tag: "item".to_string(),
            content_tag: "description".to_string(),
            fallback_to_root: true,
        }
    }
}

/// Settings given on the command line; `None` keeps the loaded value
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub source: Option<String>,
    pub timeout_secs: Option<u64>,
    pub item_tag: Option<String>,
    pub content_tag: Option<String>,
}

impl FeedConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded feed config");
        Self::from_json_str(&json)
    }

    /// Layer command-line values over this config, then validate the result
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) -> Result<()> {
        if let Some(source) = overrides.source {
            self.source = source;
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.timeout_secs = timeout;
        }
        if let Some(tag) = overrides.item_tag {
            self.item_tag = tag;
        }
        if let Some(tag) = overrides.content_tag {
            self.content_tag = tag;
        }
        self.validate()
    }

    /// Reject configurations that can only fail later
    pub fn validate(&self) -> Result<()> {
        if self.item_tag.trim().is_empty() || self.content_tag.trim().is_empty() {
            return Err(FeedError::Config("tag names must not be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(FeedError::Config("timeout_secs must be positive".to_string()));
        }
        if self.max_body_bytes == 0 {
            return Err(FeedError::Config("max_body_bytes must be positive".to_string()));
        }
        self.source_url().map(|_| ())
    }

    /// Parsed source URL, http(s) only
    pub fn source_url(&self) -> Result<Url> {
        let url = Url::parse(&self.source).map_err(|source| FeedError::InvalidUrl {
            url: self.source.clone(),
            source,
        })?;
        check_scheme(&url)?;
        Ok(url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

pub(crate) fn check_scheme(url: &Url) -> Result<()> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(FeedError::UnsupportedScheme(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FeedConfig::default();
        assert_eq!(config.source, DEFAULT_SOURCE);
        assert_eq!(config.item_tag, "item");
        assert_eq!(config.content_tag, "description");
        assert!(config.fallback_to_root);
        assert!(config.validate().is_ok());
        assert!(Uuid::parse_str(&config.id).is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            FeedConfig::from_json_str(r#"{"source": "http://localhost/feed", "timeout_secs": 5}"#)
                .unwrap();
        assert_eq!(config.source, "http://localhost/feed");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.content_tag, "description");
    }

    #[test]
    fn test_invalid_configs() {
        assert!(matches!(
            FeedConfig::from_json_str(r#"{"source": "ftp://example.com/feed"}"#),
            Err(FeedError::UnsupportedScheme(s)) if s == "ftp"
        ));
        assert!(matches!(
            FeedConfig::from_json_str(r#"{"source": "not a url"}"#),
            Err(FeedError::InvalidUrl { .. })
        ));
        assert!(matches!(
            FeedConfig::from_json_str(r#"{"content_tag": " "}"#),
            Err(FeedError::Config(_))
        ));
        assert!(matches!(
            FeedConfig::from_json_str(r#"{"timeout_secs": "x"}"#),
            Err(FeedError::Json(_))
        ));
    }

    #[test]
    fn test_overrides_replace_only_given_values() {
        let mut config = FeedConfig::from_json_str(
            r#"{"source": "http://localhost/feed", "timeout_secs": 5, "item_tag": "entry"}"#,
        )
        .unwrap();

        config
            .apply_overrides(ConfigOverrides {
                timeout_secs: Some(12),
                content_tag: Some("summary".into()),
                ..ConfigOverrides::default()
            })
            .unwrap();

        assert_eq!(config.source, "http://localhost/feed");
        assert_eq!(config.timeout_secs, 12);
        assert_eq!(config.item_tag, "entry");
        assert_eq!(config.content_tag, "summary");

        let before = config.clone();
        config.apply_overrides(ConfigOverrides::default()).unwrap();
        assert_eq!(config.source, before.source);
        assert_eq!(config.timeout_secs, before.timeout_secs);
    }

    #[test]
    fn test_overrides_are_validated() {
        let mut config = FeedConfig::default();
        let err = config
            .apply_overrides(ConfigOverrides {
                source: Some("file:///etc/passwd".into()),
                ..ConfigOverrides::default()
            })
            .unwrap_err();
        assert!(matches!(err, FeedError::UnsupportedScheme(s) if s == "file"));

        let mut config = FeedConfig::default();
        assert!(matches!(
            config.apply_overrides(ConfigOverrides {
                timeout_secs: Some(0),
                ..ConfigOverrides::default()
            }),
            Err(FeedError::Config(_))
        ));
    }

    #[test]
    fn test_from_json_file() {
        let path = std::env::temp_dir().join(format!("feed-config-{}.json", Uuid::now_v7()));
        std::fs::write(&path, r#"{"item_tag": "entry", "content_tag": "summary"}"#).unwrap();

        let config = FeedConfig::from_json_file(&path).unwrap();
        assert_eq!(config.item_tag, "entry");
        assert_eq!(config.content_tag, "summary");

        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            FeedConfig::from_json_file(&path),
            Err(FeedError::Io(_))
        ));
    }
}
