//! Sort options and their engine-facing descriptors.
//!
//! Callers describe ordering with a [`SortSpec`]: attribute names mapped to a
//! [`SortValue`]. Each entry resolves to a [`SortDescriptor`] carrying a plain
//! ascending flag, which is what the search engine consumes.

use std::str::FromStr;

use serde::Deserialize;

use crate::error::{FinderError, Result};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Resolves a direction token.
    ///
    /// Exactly four spellings are recognized: `ASC` and `DESC`, plus their
    /// symbol forms `:ASC` and `:DESC`. Matching is case-sensitive.
    pub fn from_token(token: &str) -> Result<Self> {
        match token {
            "ASC" | ":ASC" => Ok(Dir::Asc),
            "DESC" | ":DESC" => Ok(Dir::Desc),
            other => Err(FinderError::UnsupportedSortValue(other.to_string())),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "ASC",
            Dir::Desc => "DESC",
        }
    }
}

impl FromStr for Dir {
    type Err = FinderError;

    fn from_str(s: &str) -> Result<Self> {
        Dir::from_token(s)
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A sort direction as supplied by the caller, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortValue {
    /// A genuine boolean; `true` means ascending.
    Bool(bool),
    /// An already typed direction.
    Dir(Dir),
    /// A raw token, resolved with [`Dir::from_token`].
    Token(String),
}

impl SortValue {
    /// Resolves this value to an ascending flag.
    pub fn ascending(&self) -> Result<bool> {
        match self {
            SortValue::Bool(b) => Ok(*b),
            SortValue::Dir(dir) => Ok(dir.is_asc()),
            SortValue::Token(token) => Dir::from_token(token).map(Dir::is_asc),
        }
    }

    /// Converts a loose JSON direction.
    ///
    /// Booleans are kept as booleans. Strings become tokens as-is; any other
    /// JSON value becomes a token of its JSON text, which never resolves.
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Bool(b) => SortValue::Bool(*b),
            serde_json::Value::String(s) => SortValue::Token(s.clone()),
            other => SortValue::Token(other.to_string()),
        }
    }
}

impl From<bool> for SortValue {
    fn from(b: bool) -> Self {
        SortValue::Bool(b)
    }
}

impl From<Dir> for SortValue {
    fn from(dir: Dir) -> Self {
        SortValue::Dir(dir)
    }
}

impl From<&str> for SortValue {
    fn from(token: &str) -> Self {
        SortValue::Token(token.to_string())
    }
}

impl From<String> for SortValue {
    fn from(token: String) -> Self {
        SortValue::Token(token)
    }
}

/// Ordered mapping of attribute name to sort direction.
///
/// Setting an attribute that is already present replaces its direction in
/// place, keeping its original position.
///
/// ```
/// use nanostore_finder::{Dir, SortSpec};
///
/// let sort = SortSpec::new().by("age", Dir::Desc).by("name", "ASC");
/// assert_eq!(sort.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "serde_json::Map<String, serde_json::Value>")]
pub struct SortSpec {
    entries: Vec<(String, SortValue)>,
}

impl SortSpec {
    /// Creates an empty sort spec.
    pub fn new() -> Self {
        SortSpec::default()
    }

    /// Adds or replaces the direction for `attribute`.
    pub fn by(mut self, attribute: impl Into<String>, value: impl Into<SortValue>) -> Self {
        self.insert(attribute, value);
        self
    }

    /// Adds or replaces the direction for `attribute`.
    pub fn insert(&mut self, attribute: impl Into<String>, value: impl Into<SortValue>) {
        let attribute = attribute.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == attribute) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((attribute, value)),
        }
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SortValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds a sort spec from a JSON object, keeping key order.
    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        match json {
            serde_json::Value::Object(map) => Ok(Self::from_json_map(map)),
            other => Err(FinderError::InvalidArguments(format!(
                "sort options must be a mapping, got {other}"
            ))),
        }
    }

    fn from_json_map(map: &serde_json::Map<String, serde_json::Value>) -> Self {
        map.iter().fold(SortSpec::new(), |spec, (name, value)| {
            spec.by(name.as_str(), SortValue::from_json(value))
        })
    }
}

impl TryFrom<serde_json::Map<String, serde_json::Value>> for SortSpec {
    type Error = FinderError;

    fn try_from(map: serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        Ok(SortSpec::from_json_map(&map))
    }
}

/// Engine-facing sort key: an attribute and an ascending flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortDescriptor {
    /// The attribute to sort by.
    pub attribute: String,
    /// `true` for ascending order.
    pub ascending: bool,
}

impl SortDescriptor {
    /// Creates a new sort descriptor.
    pub fn new(attribute: impl Into<String>, ascending: bool) -> Self {
        SortDescriptor {
            attribute: attribute.into(),
            ascending,
        }
    }
}
