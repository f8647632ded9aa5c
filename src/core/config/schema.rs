//! core::config::schema
//!
//! Publication configuration types.
//!
//! # Example
//!
//! ```toml
//! me = "https://website.example"
//! locale = "en-GB"
//! time_zone = "Europe/London"
//!
//! [tokens]
//! uid = "a1b2c3"
//!
//! [post_types.note]
//! name = "Note"
//!
//! [post_types.note.post]
//! path = "src/notes/{yyyy}-{MM}-{dd}-{slug}.md"
//! url = "notes/{yyyy}/{MM}/{dd}/{slug}/"
//! ```
//!
//! # Validation
//!
//! Values are validated after parsing: `me` must be an absolute URL, the
//! time zone must be a recognised setting and every post type needs both
//! templates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::date::Zone;

/// Time zone settings that are not zone names.
const ZONE_KEYWORDS: &[&str] = &["client", "server"];

/// Configuration of the publication posts are written to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Publication {
    /// Canonical root URL of the publication.
    pub me: String,

    /// Locale for month names in templates (default: `en`)
    pub locale: Option<String>,

    /// `client`, `server`, an IANA zone name or a `±HH:MM` designator
    /// (default: `UTC`)
    #[serde(alias = "timeZone")]
    pub time_zone: Option<String>,

    /// Separator used when deriving slugs (default: `-`)
    #[serde(alias = "slugSeparator")]
    pub slug_separator: Option<String>,

    /// Publication-level template values, such as `uid`
    pub tokens: BTreeMap<String, String>,

    /// Post type configuration keyed by post type name
    #[serde(alias = "postTypes")]
    pub post_types: BTreeMap<String, PostTypeConfig>,
}

impl Publication {
    /// Create a publication rooted at `me` with default settings.
    pub fn new(me: impl Into<String>) -> Self {
        Self {
            me: me.into(),
            ..Default::default()
        }
    }

    /// Add a post type.
    pub fn with_post_type(mut self, post_type: impl Into<String>, config: PostTypeConfig) -> Self {
        self.post_types.insert(post_type.into(), config);
        self
    }

    /// Add a publication-level template token.
    pub fn with_token(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tokens.insert(name.into(), value.into());
        self
    }

    pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = Some(time_zone.into());
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Whether the publication is missing its root URL.
    pub fn is_empty(&self) -> bool {
        self.me.trim().is_empty()
    }

    /// Time zone setting, `UTC` unless configured.
    pub fn time_zone(&self) -> &str {
        self.time_zone.as_deref().unwrap_or("UTC")
    }

    /// Slug separator, `-` unless configured.
    pub fn slug_separator(&self) -> &str {
        self.slug_separator.as_deref().unwrap_or("-")
    }

    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = url::Url::parse(&self.me).map_err(|e| {
            ConfigError::InvalidValue(format!("invalid publication URL '{}': {}", self.me, e))
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidValue(format!(
                "publication URL '{}' cannot be a base URL",
                self.me
            )));
        }

        if let Some(time_zone) = &self.time_zone {
            if !ZONE_KEYWORDS.contains(&time_zone.as_str()) {
                time_zone
                    .parse::<Zone>()
                    .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
            }
        }

        for (post_type, config) in &self.post_types {
            config.validate(post_type)?;
        }

        Ok(())
    }
}

/// Configuration for one post type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PostTypeConfig {
    /// Display name, e.g. "Note"
    pub name: String,

    /// Templates for the post file
    pub post: PostTemplates,
}

impl PostTypeConfig {
    pub fn new(name: impl Into<String>, path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            post: PostTemplates {
                path: path.into(),
                url: url.into(),
            },
        }
    }

    fn validate(&self, post_type: &str) -> Result<(), ConfigError> {
        if self.post.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue(format!(
                "post type '{}' has no path template",
                post_type
            )));
        }
        if self.post.url.trim().is_empty() {
            return Err(ConfigError::InvalidValue(format!(
                "post type '{}' has no URL template",
                post_type
            )));
        }
        Ok(())
    }
}

/// Path and URL templates.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PostTemplates {
    /// Storage path template
    pub path: String,

    /// Public URL template, relative to the publication root
    pub url: String,
}
