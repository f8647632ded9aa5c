//! template::resolvers
//!
//! Strategies for turning a `{token}` into text.
//!
//! Each resolver answers for the tokens it understands and returns `None`
//! for everything else. A [`ResolverChain`] asks its resolvers in order and
//! takes the first answer.

use chrono::{DateTime, FixedOffset, Locale};

use crate::core::config::Publication;
use crate::core::types::PropertyBag;
use crate::date::format::{format_pattern, is_date_token};

/// Resolve a single template token.
pub trait TokenResolver {
    fn resolve(&self, token: &str) -> Option<String>;
}

/// Date tokens such as `yyyy` or `MM`, formatted from one date.
#[derive(Debug, Clone)]
pub struct DateTokens {
    date: DateTime<FixedOffset>,
    locale: Locale,
}

impl DateTokens {
    pub fn new(date: DateTime<FixedOffset>, locale: Locale) -> Self {
        Self { date, locale }
    }
}

impl TokenResolver for DateTokens {
    fn resolve(&self, token: &str) -> Option<String> {
        if is_date_token(token) {
            Some(format_pattern(&self.date, token, self.locale))
        } else {
            None
        }
    }
}

/// Post properties, looked up by dotted/bracket path.
///
/// Lists resolve to their first item. `slug` falls back to `mp-slug`.
#[derive(Debug, Clone, Copy)]
pub struct PropertyTokens<'a> {
    properties: &'a PropertyBag,
}

impl<'a> PropertyTokens<'a> {
    pub fn new(properties: &'a PropertyBag) -> Self {
        Self { properties }
    }
}

impl TokenResolver for PropertyTokens<'_> {
    fn resolve(&self, token: &str) -> Option<String> {
        let value = self
            .properties
            .lookup(token)
            .and_then(|value| value.to_template_string());

        match value {
            Some(value) => Some(value),
            None if token == "slug" => self
                .properties
                .lookup("mp-slug")
                .and_then(|value| value.to_template_string()),
            None => None,
        }
    }
}

/// Publication-level values: the configured `tokens` table, then `me`.
#[derive(Debug, Clone, Copy)]
pub struct PublicationTokens<'a> {
    publication: &'a Publication,
}

impl<'a> PublicationTokens<'a> {
    pub fn new(publication: &'a Publication) -> Self {
        Self { publication }
    }
}

impl TokenResolver for PublicationTokens<'_> {
    fn resolve(&self, token: &str) -> Option<String> {
        if let Some(value) = self.publication.tokens.get(token) {
            return Some(value.clone());
        }
        match token {
            "me" if !self.publication.is_empty() => Some(self.publication.me.clone()),
            _ => None,
        }
    }
}

/// `uuid`: a fresh random UUID for every occurrence.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidToken;

impl TokenResolver for UuidToken {
    fn resolve(&self, token: &str) -> Option<String> {
        (token == "uuid").then(|| uuid::Uuid::new_v4().to_string())
    }
}

/// Resolvers tried in a fixed priority order.
#[derive(Default)]
pub struct ResolverChain<'a> {
    resolvers: Vec<Box<dyn TokenResolver + 'a>>,
}

impl<'a> ResolverChain<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a resolver with lower priority than those already present.
    pub fn push(&mut self, resolver: impl TokenResolver + 'a) -> &mut Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl TokenResolver for ResolverChain<'_> {
    fn resolve(&self, token: &str) -> Option<String> {
        self.resolvers.iter().find_map(|resolver| resolver.resolve(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn props() -> PropertyBag {
        PropertyBag::try_from(json!({
            "name": "Hello",
            "mp-slug": "hello-world",
            "category": ["first", "second"],
            "content": {"text": "Body"},
            "yyyy": "shadowed"
        }))
        .unwrap()
    }

    #[test]
    fn date_tokens_only_answer_date_tokens() {
        let date = Utc.with_ymd_and_hms(2020, 3, 4, 0, 0, 0).unwrap().fixed_offset();
        let resolver = DateTokens::new(date, Locale::en_US);
        assert_eq!(resolver.resolve("yyyy").as_deref(), Some("2020"));
        assert_eq!(resolver.resolve("MMM").as_deref(), Some("Mar"));
        assert_eq!(resolver.resolve("slug"), None);
    }

    #[test]
    fn property_tokens() {
        let props = props();
        let resolver = PropertyTokens::new(&props);
        assert_eq!(resolver.resolve("name").as_deref(), Some("Hello"));
        assert_eq!(resolver.resolve("category").as_deref(), Some("first"));
        assert_eq!(resolver.resolve("category[1]").as_deref(), Some("second"));
        assert_eq!(resolver.resolve("content.text").as_deref(), Some("Body"));
        assert_eq!(resolver.resolve("content"), None);
        assert_eq!(resolver.resolve("missing"), None);
    }

    #[test]
    fn null_and_boolean_properties_do_not_resolve() {
        let props = PropertyBag::try_from(json!({
            "slug": null,
            "draft": true,
            "flags": [false]
        }))
        .unwrap();
        let resolver = PropertyTokens::new(&props);
        assert_eq!(resolver.resolve("slug"), None);
        assert_eq!(resolver.resolve("draft"), None);
        assert_eq!(resolver.resolve("flags"), None);
    }

    #[test]
    fn slug_falls_back_to_mp_slug() {
        let props = props();
        assert_eq!(
            PropertyTokens::new(&props).resolve("slug").as_deref(),
            Some("hello-world")
        );
    }

    #[test]
    fn publication_tokens() {
        let publication = Publication::new("https://website.example").with_token("uid", "abc");
        let resolver = PublicationTokens::new(&publication);
        assert_eq!(resolver.resolve("uid").as_deref(), Some("abc"));
        assert_eq!(resolver.resolve("me").as_deref(), Some("https://website.example"));
        assert_eq!(resolver.resolve("other"), None);
    }

    #[test]
    fn uuid_token() {
        let first = UuidToken.resolve("uuid").unwrap();
        assert_eq!(first.len(), 36);
        assert_ne!(Some(first), UuidToken.resolve("uuid"));
        assert_eq!(UuidToken.resolve("uid"), None);
    }

    #[test]
    fn chain_uses_priority_order() {
        let props = props();
        let date = Utc.with_ymd_and_hms(2020, 3, 4, 0, 0, 0).unwrap().fixed_offset();
        let publication = Publication::new("https://website.example").with_token("name", "pub");

        let mut chain = ResolverChain::new();
        chain
            .push(DateTokens::new(date, Locale::en_US))
            .push(PropertyTokens::new(&props))
            .push(PublicationTokens::new(&publication));

        assert_eq!(chain.len(), 3);
        // Date tokens win over a property of the same name
        assert_eq!(chain.resolve("yyyy").as_deref(), Some("2020"));
        // Properties win over publication tokens
        assert_eq!(chain.resolve("name").as_deref(), Some("Hello"));
        assert_eq!(chain.resolve("me").as_deref(), Some("https://website.example"));
        assert_eq!(chain.resolve("nothing"), None);
    }
}
