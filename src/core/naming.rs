//! core::naming
//!
//! Slug generation for post paths and URLs.
//!
//! # Features
//!
//! - Generate slugs from a post name or content excerpt
//! - Generate short random identifiers when no text is available

/// Maximum number of words taken from content when deriving a slug.
const EXCERPT_WORDS: usize = 5;

/// Generate a URL slug from free text.
///
/// Converts the first line of the text into a slug:
/// - Lowercase
/// - Spaces and underscores become the separator
/// - Remove other punctuation
/// - Truncate to a reasonable length
///
/// # Example
///
/// ```
/// use postdata::core::naming::slugify;
///
/// assert_eq!(slugify("My Favourite Sandwich", "-"), "my-favourite-sandwich");
/// assert_eq!(slugify("Café au lait", "_"), "café_au_lait");
/// ```
pub fn slugify(text: &str, separator: &str) -> String {
    let first_line = text.lines().next().unwrap_or("");

    let words: Vec<String> = first_line
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect();

    let mut slug = String::new();
    for word in words {
        let extra = if slug.is_empty() { 0 } else { separator.chars().count() };
        if slug.chars().count() + extra + word.chars().count() > 50 {
            break;
        }
        if !slug.is_empty() {
            slug.push_str(separator);
        }
        slug.push_str(&word);
    }
    slug
}

/// Generate a slug from the first few words of content.
pub fn excerpt_slug(text: &str, separator: &str) -> String {
    let excerpt = text
        .split_whitespace()
        .take(EXCERPT_WORDS)
        .collect::<Vec<_>>()
        .join(" ");
    slugify(&excerpt, separator)
}

/// Generate a random five-character lowercase alphanumeric string.
///
/// # Example
///
/// ```
/// use postdata::core::naming::random_string;
///
/// let s = random_string();
/// assert_eq!(s.len(), 5);
/// assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn random_string() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..5].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Hello World", "-"), "hello-world");
        assert_eq!(slugify("fix: something", "-"), "fix-something");
        assert_eq!(slugify("Add feature", "_"), "add_feature");
    }

    #[test]
    fn slugify_removes_punctuation() {
        assert_eq!(slugify("What's new? [WIP]", "-"), "whats-new-wip");
        assert_eq!(slugify("Test: foo/bar", "-"), "test-foobar");
        assert_eq!(slugify("  spaced -- out  ", "-"), "spaced-out");
    }

    #[test]
    fn slugify_handles_empty() {
        assert_eq!(slugify("", "-"), "");
        assert_eq!(slugify("!!!", "-"), "");
    }

    #[test]
    fn slugify_uses_first_line() {
        assert_eq!(slugify("First line\nSecond line", "-"), "first-line");
    }

    #[test]
    fn slugify_truncates_on_word_boundary() {
        let long = "word ".repeat(30);
        let slug = slugify(&long, "-");
        assert!(slug.len() <= 50);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn excerpt_takes_first_words() {
        assert_eq!(
            excerpt_slug("I ate a cheese sandwich today, which was nice", "-"),
            "i-ate-a-cheese-sandwich"
        );
    }

    #[test]
    fn random_strings_differ() {
        assert_ne!(random_string(), random_string());
    }
}
