//! Comparison values carried by predicates.
//!
//! The [`Value`] enum is the owned right-hand side of a predicate: what the
//! engine compares an attribute name or a stored value against.

use crate::error::{FinderError, Result};

/// Comparison value for a predicate.
///
/// # Example
///
/// ```
/// use nanostore_finder::{Value, Number};
///
/// let name: Value = "Bob".into();
/// let age: Value = 30i64.into();
///
/// assert_eq!(name.as_str(), Some("Bob"));
/// assert_eq!(age.as_number(), Some(Number::I64(30)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// String value.
    String(String),
    /// Numeric value.
    Number(Number),
    /// Date value (milliseconds since Unix epoch).
    Date(Timestamp),
    /// Boolean value.
    Bool(bool),
    /// Explicit null.
    Null,
}

impl Value {
    /// Returns `true` if this is a `Null` value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the date value, if present.
    pub fn as_date(&self) -> Option<Timestamp> {
        match self {
            Value::Date(t) => Some(*t),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Converts a JSON scalar into a comparison value.
    ///
    /// Arrays and objects are not comparison values and are rejected.
    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        match json {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
            serde_json::Value::String(s) => Ok(Value::String(s.clone())),
            serde_json::Value::Number(n) => Ok(Value::Number(Number::from_json(n))),
            other => Err(FinderError::InvalidArguments(format!(
                "{other} is not a comparison value"
            ))),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s:?}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Date(t) => write!(f, "@{}", t.as_millis()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => write!(f, "null"),
        }
    }
}

/// Numeric value supporting all common numeric types.
///
/// Numbers keep their source width: `I64` for signed integers, `U64` for
/// unsigned integers and `F64` for floating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    fn from_json(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::I64(i)
        } else if let Some(u) = n.as_u64() {
            Number::U64(u)
        } else {
            // serde_json numbers are always representable as one of the three
            Number::F64(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($source:ty),*) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }

            impl From<$source> for Value {
                fn from(n: $source) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

/// Date represented as milliseconds since Unix epoch.
///
/// ```
/// use nanostore_finder::Timestamp;
///
/// let created = Timestamp::from_millis(1_706_500_000_000);
/// assert_eq!(created.as_millis(), 1_706_500_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Creates a new timestamp from milliseconds since Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Returns the timestamp as milliseconds since Unix epoch.
    pub fn as_millis(self) -> i64 {
        self.0
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<Timestamp> for Value {
    fn from(t: Timestamp) -> Self {
        Value::Date(t)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_extractors() {
        assert_eq!(Value::from("hello").as_str(), Some("hello"));
        assert_eq!(Value::from(42i32).as_number(), Some(Number::I64(42)));
        assert_eq!(
            Value::from(Timestamp(1000)).as_date(),
            Some(Timestamp(1000))
        );
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert!(Value::from(None::<&str>).is_null());

        // Wrong type returns None
        assert_eq!(Value::from("test").as_number(), None);
        assert_eq!(Value::from(1u8).as_str(), None);
    }

    #[test]
    fn from_json_scalars() {
        assert_eq!(Value::from_json(&json!("Bob")), Ok(Value::from("Bob")));
        assert_eq!(Value::from_json(&json!(30)), Ok(Value::from(30i64)));
        assert_eq!(
            Value::from_json(&json!(u64::MAX)),
            Ok(Value::Number(Number::U64(u64::MAX)))
        );
        assert_eq!(Value::from_json(&json!(1.5)), Ok(Value::from(1.5f64)));
        assert_eq!(Value::from_json(&json!(false)), Ok(Value::Bool(false)));
        assert_eq!(Value::from_json(&json!(null)), Ok(Value::Null));
    }

    #[test]
    fn from_json_rejects_containers() {
        assert!(matches!(
            Value::from_json(&json!([1, 2])),
            Err(FinderError::InvalidArguments(_))
        ));
        assert!(matches!(
            Value::from_json(&json!({"a": 1})),
            Err(FinderError::InvalidArguments(_))
        ));
    }

    #[test]
    fn display() {
        assert_eq!(Value::from("Bob").to_string(), "\"Bob\"");
        assert_eq!(Value::from(30u8).to_string(), "30");
        assert_eq!(Value::Date(Timestamp(5)).to_string(), "@5");
        assert_eq!(Value::Null.to_string(), "null");
    }
}
