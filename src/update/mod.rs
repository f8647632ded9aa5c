//! update
//!
//! Structural edits to a property bag.
//!
//! # Operations
//!
//! | operation | effect |
//! |---|---|
//! | [`add_properties`] | append values, upgrading scalars to lists |
//! | [`replace_entries`] | overwrite values wholesale |
//! | [`delete_properties`] | remove whole properties |
//! | [`delete_entries`] | remove listed values from list properties |
//!
//! Every operation borrows its input and returns a new bag; the input is
//! never modified. [`UpdateOperation`] bundles the operations of a single
//! update request and applies them in a fixed order.
//!
//! # Example
//!
//! ```
//! use postdata::core::types::PropertyBag;
//! use postdata::update::{add_properties, delete_entries};
//! use serde_json::json;
//!
//! let props = PropertyBag::try_from(json!({"category": ["a"]})).unwrap();
//! let added = add_properties(&props, &PropertyBag::try_from(json!({"category": ["b"]})).unwrap());
//! assert_eq!(added, PropertyBag::try_from(json!({"category": ["a", "b"]})).unwrap());
//!
//! let deleted = delete_entries(&added, &PropertyBag::try_from(json!({"category": ["a", "b"]})).unwrap()).unwrap();
//! assert!(deleted.is_empty());
//! ```

mod operation;

pub use operation::{DeleteOperation, UpdateOperation};

use thiserror::Error;

use crate::core::types::{PropertyBag, PropertyValue};

/// Errors from update operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpdateError {
    /// Per-entry deletion targeted a property that is not a list.
    #[error("cannot delete entries from '{property}': value is not an array")]
    NotAnArray { property: String },

    /// The update request contained no operation.
    #[error("no update operation provided")]
    EmptyOperation,
}

/// Add values to properties.
///
/// - absent key: the value is set as given
/// - existing list: new values are appended in order
/// - existing scalar or object: upgraded to a list of the old value
///   followed by the new values
pub fn add_properties(properties: &PropertyBag, additions: &PropertyBag) -> PropertyBag {
    let mut updated = properties.clone();

    for (key, value) in additions.iter() {
        let merged = match updated.get(key) {
            None => value.clone(),
            Some(existing) => {
                let mut items = existing.clone().into_list();
                items.extend(value.clone().into_list());
                PropertyValue::List(items)
            }
        };
        updated.insert(key, merged);
    }

    updated
}

/// Replace property values wholesale.
pub fn replace_entries(properties: &PropertyBag, replacements: &PropertyBag) -> PropertyBag {
    let mut updated = properties.clone();
    for (key, value) in replacements.iter() {
        updated.insert(key, value.clone());
    }
    updated
}

/// Remove whole properties. Absent keys are ignored.
pub fn delete_properties<S: AsRef<str>>(properties: &PropertyBag, keys: &[S]) -> PropertyBag {
    let mut updated = properties.clone();
    for key in keys {
        updated.remove(key.as_ref());
    }
    updated
}

/// Remove specific values from list properties.
///
/// Values are matched by equality, not position. A property whose list
/// becomes empty is removed. Absent keys are ignored.
///
/// # Errors
///
/// Returns `UpdateError::NotAnArray` if a targeted property holds a scalar
/// or an object.
pub fn delete_entries(properties: &PropertyBag, entries: &PropertyBag) -> Result<PropertyBag, UpdateError> {
    let mut updated = properties.clone();

    for (key, value) in entries.iter() {
        let remove = value.clone().into_list();

        let kept: Vec<PropertyValue> = match updated.get(key) {
            None => continue,
            Some(PropertyValue::List(items)) => items
                .iter()
                .filter(|item| !remove.contains(item))
                .cloned()
                .collect(),
            Some(_) => {
                return Err(UpdateError::NotAnArray {
                    property: key.to_string(),
                })
            }
        };

        if kept.is_empty() {
            updated.remove(key);
        } else {
            updated.insert(key, PropertyValue::List(kept));
        }
    }

    Ok(updated)
}
