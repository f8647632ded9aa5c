//! permalink
//!
//! Canonical URLs for rendered post paths.
//!
//! The rendered URL template is relative to the publication root. It is
//! joined onto the root's path the way a filesystem path join works:
//! duplicate slashes collapse, `.` and `..` segments are resolved, and a
//! trailing slash is kept.

use thiserror::Error;
use url::Url;

/// Errors from permalink resolution.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PermalinkError {
    #[error("invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },
}

/// Join a publication root URL with a rendered relative path.
///
/// # Errors
///
/// Returns `PermalinkError::InvalidBaseUrl` if `base_url` is not an
/// absolute URL that can carry a path.
///
/// # Example
///
/// ```
/// use postdata::permalink::get_permalink;
///
/// let url = get_permalink("https://website.example", "notes/2020/foo/").unwrap();
/// assert_eq!(url, "https://website.example/notes/2020/foo/");
///
/// let url = get_permalink("https://website.example/blog/", "/notes//foo").unwrap();
/// assert_eq!(url, "https://website.example/blog/notes/foo");
/// ```
pub fn get_permalink(base_url: &str, path: &str) -> Result<String, PermalinkError> {
    let mut url = Url::parse(base_url).map_err(|e| PermalinkError::InvalidBaseUrl {
        url: base_url.to_string(),
        message: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(PermalinkError::InvalidBaseUrl {
            url: base_url.to_string(),
            message: "URL cannot carry a path".to_string(),
        });
    }

    let joined = join_paths(url.path(), path);
    url.set_path(&joined);
    url.set_query(None);
    url.set_fragment(None);

    Ok(url.to_string())
}

/// Join and normalise two URL paths.
fn join_paths(base: &str, relative: &str) -> String {
    let combined = format!("{}/{}", base, relative);

    let mut segments: Vec<&str> = Vec::new();
    for segment in combined.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut joined = format!("/{}", segments.join("/"));
    if combined.ends_with('/') && joined.len() > 1 {
        joined.push('/');
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_root_and_path() {
        assert_eq!(
            get_permalink("https://website.example", "notes/foo").unwrap(),
            "https://website.example/notes/foo"
        );
        assert_eq!(
            get_permalink("https://website.example/", "/notes/foo/").unwrap(),
            "https://website.example/notes/foo/"
        );
    }

    #[test]
    fn keeps_base_path() {
        assert_eq!(
            get_permalink("https://website.example/blog", "2020/01/foo").unwrap(),
            "https://website.example/blog/2020/01/foo"
        );
    }

    #[test]
    fn collapses_slashes_and_dots() {
        assert_eq!(
            get_permalink("https://website.example//blog//", "./a//b/../c/").unwrap(),
            "https://website.example/blog/a/c/"
        );
    }

    #[test]
    fn drops_query_and_fragment() {
        assert_eq!(
            get_permalink("https://website.example/?draft=1#top", "notes/foo").unwrap(),
            "https://website.example/notes/foo"
        );
    }

    #[test]
    fn empty_path_is_root() {
        assert_eq!(
            get_permalink("https://website.example", "").unwrap(),
            "https://website.example/"
        );
    }

    #[test]
    fn invalid_base_urls() {
        for base in ["", "website.example", "/notes", "mailto:me@website.example"] {
            assert!(
                matches!(
                    get_permalink(base, "notes/foo"),
                    Err(PermalinkError::InvalidBaseUrl { .. })
                ),
                "{base}"
            );
        }
    }

    #[test]
    fn join_paths_cases() {
        assert_eq!(join_paths("/", ""), "/");
        assert_eq!(join_paths("/", "a"), "/a");
        assert_eq!(join_paths("/a/", "../../b"), "/b");
    }
}
