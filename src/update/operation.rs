//! update::operation
//!
//! The operations carried by a single update request.

use serde::{Deserialize, Serialize};

use super::{add_properties, delete_entries, delete_properties, replace_entries, UpdateError};
use crate::core::types::PropertyBag;

/// What to delete: whole properties, or entries within properties.
///
/// Chosen by shape: a JSON array of names deletes properties, a JSON object
/// of name to values deletes entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeleteOperation {
    Properties(Vec<String>),
    Entries(PropertyBag),
}

/// An update request.
///
/// Any combination of the three operations may be present. They are
/// applied in the order add, replace, delete, each against the result of
/// the previous one.
///
/// # Example
///
/// ```
/// use postdata::core::types::PropertyBag;
/// use postdata::update::UpdateOperation;
/// use serde_json::json;
///
/// let operation: UpdateOperation = serde_json::from_value(json!({
///     "add": {"category": ["b"]},
///     "delete": ["draft"]
/// })).unwrap();
///
/// let props = PropertyBag::try_from(json!({"category": ["a"], "draft": true})).unwrap();
/// let updated = operation.apply(&props).unwrap();
/// assert_eq!(updated, PropertyBag::try_from(json!({"category": ["a", "b"]})).unwrap());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateOperation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add: Option<PropertyBag>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace: Option<PropertyBag>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<DeleteOperation>,
}

impl UpdateOperation {
    pub fn add(additions: PropertyBag) -> Self {
        Self {
            add: Some(additions),
            ..Default::default()
        }
    }

    pub fn replace(replacements: PropertyBag) -> Self {
        Self {
            replace: Some(replacements),
            ..Default::default()
        }
    }

    pub fn delete_properties<S: Into<String>>(keys: impl IntoIterator<Item = S>) -> Self {
        Self {
            delete: Some(DeleteOperation::Properties(
                keys.into_iter().map(Into::into).collect(),
            )),
            ..Default::default()
        }
    }

    pub fn delete_entries(entries: PropertyBag) -> Self {
        Self {
            delete: Some(DeleteOperation::Entries(entries)),
            ..Default::default()
        }
    }

    /// Whether no operation is present.
    pub fn is_empty(&self) -> bool {
        self.add.is_none() && self.replace.is_none() && self.delete.is_none()
    }

    /// Apply the operations in order: add, replace, delete.
    ///
    /// # Errors
    ///
    /// - `UpdateError::EmptyOperation` if no operation is present
    /// - `UpdateError::NotAnArray` from entry deletion
    pub fn apply(&self, properties: &PropertyBag) -> Result<PropertyBag, UpdateError> {
        if self.is_empty() {
            return Err(UpdateError::EmptyOperation);
        }

        let mut updated = properties.clone();

        if let Some(additions) = &self.add {
            updated = add_properties(&updated, additions);
        }

        if let Some(replacements) = &self.replace {
            updated = replace_entries(&updated, replacements);
        }

        updated = match &self.delete {
            Some(DeleteOperation::Properties(keys)) => delete_properties(&updated, keys.as_slice()),
            Some(DeleteOperation::Entries(entries)) => delete_entries(&updated, entries)?,
            None => updated,
        };

        Ok(updated)
    }
}
