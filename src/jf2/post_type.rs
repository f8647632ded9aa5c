//! jf2::post_type
//!
//! IndieWeb post type discovery.
//!
//! Response properties are checked first, in priority order. A post with
//! none of them is an article when it has a name that is not just the
//! start of its content, and a note otherwise.

use super::PostTypeDiscovery;
use crate::core::types::{PropertyBag, PropertyValue};

/// Properties that imply a post type, highest priority first.
const IMPLIED_TYPES: &[(&str, &str)] = &[
    ("rsvp", "rsvp"),
    ("in-reply-to", "reply"),
    ("repost-of", "repost"),
    ("like-of", "like"),
    ("bookmark-of", "bookmark"),
    ("quotation-of", "quotation"),
    ("checkin", "checkin"),
    ("video", "video"),
    ("audio", "audio"),
    ("photo", "photo"),
];

/// Default [`PostTypeDiscovery`].
///
/// # Example
///
/// ```
/// use postdata::core::types::PropertyBag;
/// use postdata::jf2::{DiscoveredPostType, PostTypeDiscovery};
/// use serde_json::json;
///
/// let props = PropertyBag::try_from(json!({"like-of": "https://example.com"})).unwrap();
/// assert_eq!(DiscoveredPostType.post_type(&props), "like");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscoveredPostType;

impl PostTypeDiscovery for DiscoveredPostType {
    fn post_type(&self, properties: &PropertyBag) -> String {
        if properties.get_str("type") == Some("event") {
            return "event".to_string();
        }

        for (property, post_type) in IMPLIED_TYPES {
            if properties.get(property).is_some_and(has_value) {
                return post_type.to_string();
            }
        }

        let name = properties
            .get_str("name")
            .map(collapse_whitespace)
            .unwrap_or_default();
        if name.is_empty() {
            return "note".to_string();
        }

        let content = content_text(properties)
            .map(collapse_whitespace)
            .unwrap_or_default();
        if content.is_empty() || !content.starts_with(&name) {
            return "article".to_string();
        }

        "note".to_string()
    }
}

fn has_value(value: &PropertyValue) -> bool {
    match value {
        PropertyValue::Scalar(scalar) => scalar.as_str().map_or(true, |s| !s.trim().is_empty()),
        PropertyValue::List(items) => !items.is_empty(),
        PropertyValue::Object(bag) => !bag.is_empty(),
    }
}

fn content_text(properties: &PropertyBag) -> Option<&str> {
    ["content.text", "content.value", "content", "summary"]
        .iter()
        .find_map(|path| properties.lookup(path)?.first()?.as_str())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
