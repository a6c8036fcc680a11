//! Values shared by table columns, records and bound form fields
//!
//! [`FieldValue`] is the dynamically typed value a form field holds and a
//! record stores. [`DefaultValue`] is what a column or field declares as its
//! default: either a static value or a sentinel resolved at use time.

use std::fmt;

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Date format used for date values
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date-time format used when displaying date-time values
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A dynamically typed field or column value
///
/// # Examples
///
/// ```rust
/// use tableform::value::FieldValue;
///
/// let value = FieldValue::from("Book title");
/// assert_eq!(value.as_str(), Some("Book title"));
/// assert!(value.is_truthy());
/// assert!(!FieldValue::Int(0).is_truthy());
/// ```
///
/// Strings always deserialize as [`FieldValue::Text`]; date and date-time
/// fields parse text into their own variants when bound.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// No value
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Floating-point number
    Float(f64),
    /// Text
    Text(String),
    /// Date and time without timezone
    #[serde(skip_deserializing)]
    DateTime(NaiveDateTime),
    /// Calendar date
    #[serde(skip_deserializing)]
    Date(NaiveDate),
}

impl FieldValue {
    /// Check if this is [`FieldValue::Null`]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Truthiness of the value
    ///
    /// Null, `false`, zero, and blank text are falsy. Everything else is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::Text(s) => !s.trim().is_empty(),
            Self::Date(_) | Self::DateTime(_) => true,
        }
    }

    /// Borrow the text, if this is a text value
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer, if this is an integer value
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the float, if this is a float value
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get the boolean, if this is a boolean value
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Coerce to an integer
    ///
    /// Floats are truncated, booleans map to 0/1 and text is parsed after
    /// trimming. Returns `None` when no integer can be produced.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn coerce_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Self::Bool(b) => Some(i64::from(*b)),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Coerce to a float
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn coerce_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_FORMAT)),
            Self::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A declared default, possibly computed at use time
///
/// In a schema file a static default is written `default = { value = 0 }`
/// and a use-time default as `default = "now"`, `"today"` or `"uuid4"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultValue {
    /// A fixed value
    Value(FieldValue),
    /// The current local date and time
    Now,
    /// The current local date
    Today,
    /// A freshly generated version 4 UUID, as text
    Uuid4,
}

impl DefaultValue {
    /// The null default
    #[must_use]
    pub const fn null() -> Self {
        Self::Value(FieldValue::Null)
    }

    /// Resolve the default into a concrete value
    ///
    /// Use-time sentinels are evaluated on every call.
    #[must_use]
    pub fn resolve(&self) -> FieldValue {
        match self {
            Self::Value(value) => value.clone(),
            Self::Now => FieldValue::DateTime(Local::now().naive_local()),
            Self::Today => FieldValue::Date(Local::now().date_naive()),
            Self::Uuid4 => FieldValue::Text(uuid::Uuid::new_v4().to_string()),
        }
    }

    /// Check if this default is computed at use time
    #[must_use]
    pub const fn is_dynamic(&self) -> bool {
        !matches!(self, Self::Value(_))
    }
}

impl Default for DefaultValue {
    fn default() -> Self {
        Self::null()
    }
}

impl From<FieldValue> for DefaultValue {
    fn from(value: FieldValue) -> Self {
        Self::Value(value)
    }
}

macro_rules! static_default_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for DefaultValue {
                fn from(value: $ty) -> Self {
                    Self::Value(FieldValue::from(value))
                }
            }
        )*
    };
}

static_default_from!(bool, i64, i32, f64, &str, String, NaiveDate, NaiveDateTime);
