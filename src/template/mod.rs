//! template
//!
//! Path and URL templates.
//!
//! # Syntax
//!
//! A template is literal text with `{token}` placeholders. Tokens are
//! resolved in priority order:
//!
//! 1. Date tokens (`yyyy`, `MM`, `d`, ...), formatted from the post's date
//! 2. Post properties by dotted/bracket path (`slug`, `content.text`,
//!    `category[0]`); lists use their first item
//! 3. Publication tokens (the `[tokens]` table, then `me`)
//! 4. `uuid`, a random UUID
//!
//! A token nothing resolves is left in place, braces included, so a
//! misconfigured template shows up in the rendered path instead of failing
//! the request.
//!
//! # Example
//!
//! ```
//! use postdata::core::config::Publication;
//! use postdata::core::types::PropertyBag;
//! use postdata::date::SystemClock;
//! use postdata::template::{render_path, RenderOptions};
//! use serde_json::json;
//!
//! let properties = PropertyBag::try_from(json!({
//!     "slug": "foo",
//!     "uploaded": "2020-01-01"
//! })).unwrap();
//!
//! let path = render_path(
//!     "{yyyy}/{MM}/{slug}",
//!     &properties,
//!     &Publication::default(),
//!     &RenderOptions::default(),
//!     &SystemClock,
//! ).unwrap();
//! assert_eq!(path, "2020/01/foo");
//! ```

pub mod resolvers;

use chrono::{DateTime, FixedOffset};
use tracing::debug;

use crate::core::config::Publication;
use crate::core::types::{PropertyBag, PropertyValue, Scalar};
use crate::date::{is_date_token, resolve_locale, Clock, DateError, ParsedDate, Zone};
use resolvers::{
    DateTokens, PropertyTokens, PublicationTokens, ResolverChain, TokenResolver, UuidToken,
};

/// Where date tokens take their date from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateSource {
    /// The first of these properties holding a non-empty string, falling
    /// back to the clock's current time.
    Properties(Vec<String>),
    /// Always the clock's current time.
    Now,
}

impl Default for DateSource {
    fn default() -> Self {
        DateSource::Properties(vec!["published".to_string(), "uploaded".to_string()])
    }
}

impl DateSource {
    /// The date to format, as wall-clock time in the publication's zone.
    ///
    /// # Errors
    ///
    /// - `DateError::Parse` if the chosen property is not a date
    /// - `DateError::InvalidTimeZone` if the publication's zone is unknown
    pub fn resolve(
        &self,
        properties: &PropertyBag,
        publication: &Publication,
        clock: &dyn Clock,
    ) -> Result<DateTime<FixedOffset>, DateError> {
        let raw = match self {
            DateSource::Properties(names) => names
                .iter()
                .filter_map(|name| properties.get_str(name))
                .find(|value| !value.is_empty()),
            DateSource::Now => None,
        };

        let parsed = match raw {
            Some(value) => ParsedDate::parse(value)?,
            None => ParsedDate::Instant(clock.now().fixed_offset()),
        };

        let zone = publication_zone(publication.time_zone(), &parsed)?;
        Ok(parsed.resolve(&zone))
    }
}

/// The zone dates are shown in for a publication's time zone setting.
///
/// With `client`, a date keeps the offset it was written with.
fn publication_zone(setting: &str, date: &ParsedDate) -> Result<Zone, DateError> {
    match setting {
        "client" => Ok(match date {
            ParsedDate::Instant(dt) => Zone::Fixed(*dt.offset()),
            ParsedDate::Floating(_) => Zone::Utc,
        }),
        "server" => Ok(Zone::Local),
        other => other.parse(),
    }
}

/// Options for [`render_path`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub date_source: DateSource,
}

/// Render a path or URL template for a post.
///
/// The date is only resolved when the template contains a date token.
///
/// # Errors
///
/// Returns a `DateError` if a date token is present and the post's date
/// cannot be parsed, or the publication's time zone is unknown. Unresolved
/// tokens are never an error.
pub fn render_path(
    template: &str,
    properties: &PropertyBag,
    publication: &Publication,
    options: &RenderOptions,
    clock: &dyn Clock,
) -> Result<String, DateError> {
    let mut chain = ResolverChain::new();

    if template_tokens(template).any(is_date_token) {
        let date = options.date_source.resolve(properties, publication, clock)?;
        chain.push(DateTokens::new(
            date,
            resolve_locale(publication.locale.as_deref()),
        ));
    }

    chain
        .push(PropertyTokens::new(properties))
        .push(PublicationTokens::new(publication))
        .push(UuidToken);

    Ok(supplant_with(template, |token| chain.resolve(token)))
}

/// Substitute top-level string and number properties into a template.
///
/// Other shapes (lists, objects, booleans) are left unresolved.
///
/// ```
/// use postdata::core::types::PropertyBag;
/// use postdata::template::supplant;
/// use serde_json::json;
///
/// let values = PropertyBag::try_from(json!({
///     "array": ["Array"],
///     "string": "string",
///     "number": 1
/// })).unwrap();
/// assert_eq!(supplant("{array} {string} {number}", &values), "{array} string 1");
/// ```
pub fn supplant(template: &str, values: &PropertyBag) -> String {
    supplant_with(template, |token| match values.get(token)? {
        PropertyValue::Scalar(Scalar::String(s)) => Some(s.clone()),
        PropertyValue::Scalar(Scalar::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Substitute every `{token}` with the resolver's answer, keeping tokens
/// it cannot answer verbatim.
pub fn supplant_with<F>(template: &str, resolve: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(template.len());

    for piece in pieces(template) {
        match piece {
            Piece::Literal(text) => out.push_str(text),
            Piece::Token(token) => match resolve(token) {
                Some(value) => out.push_str(&value),
                None => {
                    debug!(token, template, "template token left unresolved");
                    out.push('{');
                    out.push_str(token);
                    out.push('}');
                }
            },
        }
    }

    out
}

/// Tokens in a template, in order of appearance.
pub fn template_tokens(template: &str) -> impl Iterator<Item = &str> {
    pieces(template).into_iter().filter_map(|piece| match piece {
        Piece::Token(token) => Some(token),
        Piece::Literal(_) => None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'a> {
    Literal(&'a str),
    Token(&'a str),
}

/// Split a template into literal text and `{token}` spans.
///
/// A token is the text between a `{` and the next `}` with no brace in
/// between. Unbalanced braces are literal.
fn pieces(template: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find(['{', '}']) {
            Some(close) if after.as_bytes()[close] == b'}' => {
                if open > 0 {
                    pieces.push(Piece::Literal(&rest[..open]));
                }
                pieces.push(Piece::Token(&after[..close]));
                rest = &after[close + 1..];
            }
            Some(next_open) => {
                pieces.push(Piece::Literal(&rest[..open + 1 + next_open]));
                rest = &after[next_open..];
            }
            None => break,
        }
    }

    if !rest.is_empty() {
        pieces.push(Piece::Literal(rest));
    }
    pieces
}
