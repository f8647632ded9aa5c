//! jf2::normalise
//!
//! Default property normalisation.

use super::{NormaliseError, Normaliser};
use crate::core::config::Publication;
use crate::core::naming::{excerpt_slug, random_string, slugify};
use crate::core::types::{PropertyBag, PropertyValue};
use crate::date::{get_date, Clock};

/// Minimal JF2 normaliser.
///
/// - `published` is stamped with the current time when missing and
///   converted to the publication's time zone setting
/// - a plain string `content` becomes `{text}`
/// - `mp-slug` is derived from `name`, then from the content text, then
///   generated at random, unless a `slug` or `mp-slug` is already present
#[derive(Debug, Clone, Copy, Default)]
pub struct Jf2Normaliser;

impl Normaliser for Jf2Normaliser {
    fn normalise(
        &self,
        publication: &Publication,
        mut properties: PropertyBag,
        clock: &dyn Clock,
    ) -> Result<PropertyBag, NormaliseError> {
        let published = match properties.get("published") {
            None => String::new(),
            Some(value) => value
                .first()
                .and_then(PropertyValue::as_str)
                .map(str::to_string)
                .ok_or_else(|| NormaliseError::InvalidProperty {
                    property: "published".to_string(),
                    message: "expected a date string".to_string(),
                })?,
        };
        properties.insert(
            "published",
            get_date(publication.time_zone(), &published, clock)?,
        );

        if let Some(content) = normalise_content(properties.get("content")) {
            properties.insert("content", content);
        }

        if !properties.contains_key("slug") && !properties.contains_key("mp-slug") {
            let slug = derive_slug(&properties, publication.slug_separator());
            properties.insert("mp-slug", slug);
        }

        Ok(properties)
    }
}

/// Content in its object form, if it needs rewriting.
fn normalise_content(content: Option<&PropertyValue>) -> Option<PropertyValue> {
    let content = content?;
    match content.first()? {
        PropertyValue::Scalar(scalar) => {
            let text = scalar.as_str()?;
            let mut object = PropertyBag::new();
            object.insert("text", text);
            Some(PropertyValue::Object(object))
        }
        PropertyValue::Object(object) if content.is_list() => {
            Some(PropertyValue::Object(object.clone()))
        }
        _ => None,
    }
}

fn derive_slug(properties: &PropertyBag, separator: &str) -> String {
    let from_name = properties
        .get_str("name")
        .map(|name| slugify(name, separator))
        .unwrap_or_default();
    if !from_name.is_empty() {
        return from_name;
    }

    let from_content = properties
        .lookup("content.text")
        .and_then(PropertyValue::as_str)
        .map(|text| excerpt_slug(text, separator))
        .unwrap_or_default();
    if !from_content.is_empty() {
        return from_content;
    }

    random_string()
}
