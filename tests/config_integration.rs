//! Integration tests for publication configuration loading.
//!
//! These tests write config files into a temp directory and load them
//! through `Publication::load`.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use postdata::core::config::{get_post_type_config, ConfigError, Publication};

/// Temp directory holding one config file.
struct TestConfig {
    dir: TempDir,
}

impl TestConfig {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    fn write(&self, contents: &str) -> PathBuf {
        let path = self.dir.path().join("publication.toml");
        fs::write(&path, contents).expect("write config");
        path
    }
}

#[test]
fn loads_full_config() {
    let config = TestConfig::new();
    let path = config.write(
        r#"
me = "https://website.example"
locale = "de"
time_zone = "Europe/Berlin"
slug_separator = "_"

[tokens]
uid = "abc123"

[post_types.note]
name = "Note"
[post_types.note.post]
path = "src/notes/{yyyy}/{MM}/{slug}.md"
url = "notes/{yyyy}/{MM}/{slug}/"

[post_types.photo]
name = "Photo"
post = { path = "src/photos/{slug}.md", url = "photos/{slug}/" }
"#,
    );

    let publication = Publication::load(&path).unwrap();
    assert_eq!(publication.me, "https://website.example");
    assert_eq!(publication.time_zone(), "Europe/Berlin");
    assert_eq!(publication.slug_separator(), "_");
    assert_eq!(publication.tokens.get("uid").map(String::as_str), Some("abc123"));

    let note = get_post_type_config("note", &publication.post_types).unwrap();
    assert_eq!(note.post.url, "notes/{yyyy}/{MM}/{slug}/");
    assert!(get_post_type_config("article", &publication.post_types).is_none());
}

#[test]
fn accepts_camel_case_aliases() {
    let config = TestConfig::new();
    let path = config.write(
        r#"
me = "https://website.example"
timeZone = "client"

[postTypes.note]
name = "Note"
post = { path = "{slug}.md", url = "{slug}" }
"#,
    );

    let publication = Publication::load(&path).unwrap();
    assert_eq!(publication.time_zone(), "client");
    assert!(publication.post_type_config("note").is_some());
}

#[test]
fn missing_file_is_read_error() {
    let config = TestConfig::new();
    let result = Publication::load(&config.dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::ReadError { .. })));
}

#[test]
fn unknown_keys_are_parse_errors() {
    let config = TestConfig::new();
    let path = config.write("me = \"https://website.example\"\ntheme = \"dark\"\n");
    let result = Publication::load(&path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn invalid_values_are_rejected() {
    let config = TestConfig::new();

    let path = config.write("me = \"not a url\"\n");
    assert!(matches!(
        Publication::load(&path),
        Err(ConfigError::InvalidValue(_))
    ));

    let path = config.write("me = \"https://website.example\"\ntime_zone = \"Atlantis/Capital\"\n");
    assert!(matches!(
        Publication::load(&path),
        Err(ConfigError::InvalidValue(_))
    ));

    let path = config.write(
        r#"
me = "https://website.example"
[post_types.note]
name = "Note"
post = { path = "", url = "notes/{slug}/" }
"#,
    );
    assert!(matches!(
        Publication::load(&path),
        Err(ConfigError::InvalidValue(_))
    ));
}
