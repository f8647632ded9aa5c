//! core::types
//!
//! Strong types for JF2 post data.
//!
//! # Types
//!
//! - [`Scalar`] - A leaf value (string, number, boolean or null)
//! - [`PropertyValue`] - Tagged value: scalar, list or nested object
//! - [`PropertyBag`] - Ordered mapping from property name to value
//! - [`PostRecord`] - A storage path paired with its properties
//!
//! # Shapes
//!
//! JF2 properties come in mixed shapes. A `category` may be a single string
//! or a list of strings; `content` is usually an object with `html` and
//! `text` members. Modelling the shapes as an enum lets the update engine
//! match on them explicitly.
//!
//! # Examples
//!
//! ```
//! use postdata::core::types::{PropertyBag, PropertyValue};
//! use serde_json::json;
//!
//! let bag = PropertyBag::try_from(json!({
//!     "name": "Hello",
//!     "category": ["a", "b"],
//!     "content": { "text": "Hi there" }
//! })).unwrap();
//!
//! assert_eq!(bag.get("name"), Some(&PropertyValue::from("Hello")));
//! assert_eq!(bag.lookup("category[1]"), Some(&PropertyValue::from("b")));
//! assert_eq!(bag.lookup("content.text"), Some(&PropertyValue::from("Hi there")));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Errors from type conversion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("properties must be an object, found {0}")]
    NotAnObject(&'static str),
}

/// A leaf property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Scalar {
    /// Borrow the string content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    /// Render the scalar as it appears inside a path or URL.
    ///
    /// Only strings and numbers have a template form.
    pub fn to_template_string(&self) -> Option<String> {
        match self {
            Scalar::Number(n) => Some(n.to_string()),
            Scalar::String(s) => Some(s.clone()),
            Scalar::Null | Scalar::Bool(_) => None,
        }
    }
}

/// A property value of any JF2 shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum PropertyValue {
    /// A single string, number, boolean or null.
    Scalar(Scalar),
    /// An ordered list of values.
    List(Vec<PropertyValue>),
    /// A nested object such as `content: {html, text}`.
    Object(PropertyBag),
}

impl PropertyValue {
    /// Borrow the string content of a scalar string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Scalar(s) => s.as_str(),
            _ => None,
        }
    }

    /// Borrow the list items, if this is a list.
    pub fn as_list(&self) -> Option<&[PropertyValue]> {
        match self {
            PropertyValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the nested object, if this is one.
    pub fn as_object(&self) -> Option<&PropertyBag> {
        match self {
            PropertyValue::Object(bag) => Some(bag),
            _ => None,
        }
    }

    /// Whether this is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, PropertyValue::List(_))
    }

    /// The first item of a list, or the value itself otherwise.
    ///
    /// Returns `None` for an empty list.
    pub fn first(&self) -> Option<&PropertyValue> {
        match self {
            PropertyValue::List(items) => items.first(),
            other => Some(other),
        }
    }

    /// Convert into a list, wrapping non-list values in a single-item list.
    pub fn into_list(self) -> Vec<PropertyValue> {
        match self {
            PropertyValue::List(items) => items,
            other => vec![other],
        }
    }

    /// Render the value for template substitution.
    ///
    /// Lists render their first item. Objects, booleans and null have no
    /// string form and yield `None`.
    pub fn to_template_string(&self) -> Option<String> {
        match self.first()? {
            PropertyValue::Scalar(s) => s.to_template_string(),
            PropertyValue::List(_) | PropertyValue::Object(_) => None,
        }
    }
}

impl From<Value> for PropertyValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => PropertyValue::Scalar(Scalar::Null),
            Value::Bool(b) => PropertyValue::Scalar(Scalar::Bool(b)),
            Value::Number(n) => PropertyValue::Scalar(Scalar::Number(n)),
            Value::String(s) => PropertyValue::Scalar(Scalar::String(s)),
            Value::Array(items) => {
                PropertyValue::List(items.into_iter().map(PropertyValue::from).collect())
            }
            Value::Object(map) => PropertyValue::Object(PropertyBag::from(map)),
        }
    }
}

impl From<PropertyValue> for Value {
    fn from(value: PropertyValue) -> Self {
        match value {
            PropertyValue::Scalar(Scalar::Null) => Value::Null,
            PropertyValue::Scalar(Scalar::Bool(b)) => Value::Bool(b),
            PropertyValue::Scalar(Scalar::Number(n)) => Value::Number(n),
            PropertyValue::Scalar(Scalar::String(s)) => Value::String(s),
            PropertyValue::List(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            PropertyValue::Object(bag) => Value::from(bag),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Scalar(Scalar::String(s))
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Scalar(Scalar::Bool(b))
    }
}

impl From<i64> for PropertyValue {
    fn from(n: i64) -> Self {
        PropertyValue::Scalar(Scalar::Number(n.into()))
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(items: Vec<PropertyValue>) -> Self {
        PropertyValue::List(items)
    }
}

impl From<PropertyBag> for PropertyValue {
    fn from(bag: PropertyBag) -> Self {
        PropertyValue::Object(bag)
    }
}

/// An ordered mapping from property name to value.
///
/// Keys are case-sensitive and unique. Insertion order is preserved;
/// replacing an existing key keeps its position. Equality ignores order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct PropertyBag(Vec<(String, PropertyValue)>);

impl PropertyBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut PropertyValue> {
        self.0.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Get a string-valued property.
    ///
    /// For a list, the first item is used.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)?.first()?.as_str()
    }

    /// Insert a value, returning the previous value for the key.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        let key = key.into();
        let value = value.into();
        match self.get_mut(&key) {
            Some(existing) => Some(std::mem::replace(existing, value)),
            None => {
                self.0.push((key, value));
                None
            }
        }
    }

    /// Remove a key, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        let index = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(index).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look up a value by dotted/bracket path, e.g. `content.text` or
    /// `photo[0].url`.
    ///
    /// Numeric segments index into lists. Returns `None` when any segment
    /// is missing or the shape does not allow descending further.
    pub fn lookup(&self, path: &str) -> Option<&PropertyValue> {
        let segments = parse_path(path)?;
        let (first, rest) = segments.split_first()?;

        let mut current = match first {
            PathSegment::Key(key) => self.get(key)?,
            PathSegment::Index(index) => self.get(&index.to_string())?,
        };

        for segment in rest {
            current = match (current, segment) {
                (PropertyValue::Object(bag), PathSegment::Key(key)) => bag.get(key)?,
                (PropertyValue::Object(bag), PathSegment::Index(index)) => {
                    bag.get(&index.to_string())?
                }
                (PropertyValue::List(items), PathSegment::Index(index)) => items.get(*index)?,
                (PropertyValue::List(items), PathSegment::Key(key)) => {
                    items.get(key.parse::<usize>().ok()?)?
                }
                (PropertyValue::Scalar(_), _) => return None,
            };
        }

        Some(current)
    }
}

impl PartialEq for PropertyBag {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl FromIterator<(String, PropertyValue)> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = (String, PropertyValue)>>(iter: I) -> Self {
        let mut bag = PropertyBag::new();
        for (key, value) in iter {
            bag.insert(key, value);
        }
        bag
    }
}

impl IntoIterator for PropertyBag {
    type Item = (String, PropertyValue);
    type IntoIter = std::vec::IntoIter<(String, PropertyValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<Map<String, Value>> for PropertyBag {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter()
            .map(|(k, v)| (k, PropertyValue::from(v)))
            .collect()
    }
}

impl TryFrom<Value> for PropertyBag {
    type Error = TypeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(PropertyBag::from(map)),
            Value::Null => Err(TypeError::NotAnObject("null")),
            Value::Bool(_) => Err(TypeError::NotAnObject("boolean")),
            Value::Number(_) => Err(TypeError::NotAnObject("number")),
            Value::String(_) => Err(TypeError::NotAnObject("string")),
            Value::Array(_) => Err(TypeError::NotAnObject("array")),
        }
    }
}

impl From<PropertyBag> for Value {
    fn from(bag: PropertyBag) -> Self {
        Value::Object(
            bag.into_iter()
                .map(|(k, v)| (k, Value::from(v)))
                .collect::<Map<String, Value>>(),
        )
    }
}

/// One step of a property path.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PathSegment {
    Key(String),
    Index(usize),
}

/// Split `a.b[0][1].c` into segments. Returns `None` for malformed paths.
fn parse_path(path: &str) -> Option<Vec<PathSegment>> {
    let mut segments = Vec::new();

    for part in path.split('.') {
        let (key, mut brackets) = match part.find('[') {
            Some(pos) => (&part[..pos], &part[pos..]),
            None => (part, ""),
        };

        if !key.is_empty() {
            segments.push(PathSegment::Key(key.to_string()));
        } else if brackets.is_empty() {
            return None;
        }

        while !brackets.is_empty() {
            let close = brackets.find(']')?;
            if !brackets.starts_with('[') {
                return None;
            }
            let inner = brackets[1..close].trim_matches(|c| c == '"' || c == '\'');
            let segment = match inner.parse::<usize>() {
                Ok(index) => PathSegment::Index(index),
                Err(_) if !inner.is_empty() => PathSegment::Key(inner.to_string()),
                Err(_) => return None,
            };
            segments.push(segment);
            brackets = &brackets[close + 1..];
        }
    }

    if segments.is_empty() {
        None
    } else {
        Some(segments)
    }
}

/// A post as persisted by the store: where it lives and what it says.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Storage path rendered from the post type's path template.
    pub path: String,
    /// JF2 properties, including `url` and `post-type`.
    pub properties: PropertyBag,
}

impl PostRecord {
    /// The canonical URL stored in `properties.url`.
    pub fn url(&self) -> Option<&str> {
        self.properties.get_str("url")
    }
}
