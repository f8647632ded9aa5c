//! core::config
//!
//! Publication configuration schema and loading.
//!
//! # Overview
//!
//! A [`Publication`] names the site's root URL, its locale and time zone
//! setting, and the path/URL templates of each post type. Configuration is
//! read-only input to rendering; it is loaded once by the embedding
//! application and passed by reference into every call.
//!
//! # Example
//!
//! ```
//! use postdata::core::config::{get_post_type_config, Publication};
//!
//! let publication = Publication::from_toml_str(r#"
//!     me = "https://website.example"
//!
//!     [post_types.note]
//!     name = "Note"
//!     post = { path = "notes/{slug}.md", url = "notes/{slug}/" }
//! "#).unwrap();
//!
//! let note = get_post_type_config("note", &publication.post_types).unwrap();
//! assert_eq!(note.name, "Note");
//! ```

pub mod schema;

pub use schema::{PostTemplates, PostTypeConfig, Publication};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

impl Publication {
    /// Parse and validate a publication from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` for malformed TOML and
    /// `ConfigError::InvalidValue` if validation fails.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let publication: Publication =
            toml::from_str(contents).map_err(|e| ConfigError::ParseError {
                path: PathBuf::from("<inline>"),
                message: e.to_string(),
            })?;
        publication.validate()?;
        Ok(publication)
    }

    /// Read, parse and validate a publication config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let publication: Publication =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        publication.validate()?;
        Ok(publication)
    }

    /// Configuration for a post type, if one exists.
    pub fn post_type_config(&self, post_type: &str) -> Option<&PostTypeConfig> {
        get_post_type_config(post_type, &self.post_types)
    }
}

/// Look up the configuration for a post type.
pub fn get_post_type_config<'a>(
    post_type: &str,
    post_types: &'a BTreeMap<String, PostTypeConfig>,
) -> Option<&'a PostTypeConfig> {
    post_types.get(post_type)
}
