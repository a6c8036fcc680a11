//! Form field descriptors and input configuration
//!
//! Defines the field kinds a generated form can hold and the descriptor
//! ([`FormField`]) a converter produces for each table column.

use serde::Serialize;

use super::validators::Validator;
use crate::value::{DefaultValue, FieldValue};

/// HTML input types used by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    /// Text input (default)
    #[default]
    Text,
    /// Number input
    Number,
    /// Date input
    Date,
    /// Date and time input
    DateTimeLocal,
    /// Checkbox
    Checkbox,
}

impl InputType {
    /// Get the HTML type attribute value
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::DateTimeLocal => "datetime-local",
            Self::Checkbox => "checkbox",
        }
    }
}

/// One selectable option of a select field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Choice {
    /// Submitted value
    pub value: FieldValue,
    /// Display text
    pub label: String,
}

impl Choice {
    /// Create a new choice
    #[must_use]
    pub fn new(value: impl Into<FieldValue>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl<V: Into<FieldValue>, L: Into<String>> From<(V, L)> for Choice {
    fn from((value, label): (V, L)) -> Self {
        Self::new(value, label)
    }
}

/// A bare integer choice, labelled with its own value
impl From<i64> for Choice {
    fn from(value: i64) -> Self {
        Self::new(value, value.to_string())
    }
}

/// How a select field coerces submitted values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Coerce {
    /// Keep values as text
    #[default]
    Text,
    /// Parse values as integers
    Int,
}

impl Coerce {
    /// Coerce a value, returning `None` when it cannot be converted
    #[must_use]
    pub fn apply(self, value: &FieldValue) -> Option<FieldValue> {
        match self {
            Self::Int => value.coerce_int().map(FieldValue::Int),
            Self::Text => match value {
                FieldValue::Null => None,
                FieldValue::Text(_) => Some(value.clone()),
                other => Some(FieldValue::Text(other.to_string())),
            },
        }
    }
}

/// Kind of form field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// Integer input
    Integer,
    /// Single-line text
    String,
    /// Multi-line text
    TextArea,
    /// Boolean toggle
    Boolean,
    /// Floating-point number
    Float,
    /// Date without time
    Date,
    /// Date and time
    DateTime,
    /// Single selection from a list of choices
    Select {
        /// Available choices, assigned by the caller
        choices: Vec<Choice>,
        /// Coercion of submitted values
        coerce: Coerce,
    },
}

impl FieldKind {
    /// Short kind name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::String => "string",
            Self::TextArea => "textarea",
            Self::Boolean => "boolean",
            Self::Float => "float",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Select { .. } => "select",
        }
    }

    /// Input type used when rendering, for kinds rendered as `<input>`
    #[must_use]
    pub const fn input_type(&self) -> Option<InputType> {
        match self {
            Self::Integer | Self::Float => Some(InputType::Number),
            Self::String => Some(InputType::Text),
            Self::Boolean => Some(InputType::Checkbox),
            Self::Date => Some(InputType::Date),
            Self::DateTime => Some(InputType::DateTimeLocal),
            Self::TextArea | Self::Select { .. } => None,
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A form field descriptor
///
/// # Examples
///
/// ```rust
/// use tableform::forms::{FormField, Validator};
///
/// let field = FormField::string("title")
///     .label("Book Title")
///     .validator(Validator::data_required());
///
/// assert_eq!(field.label, "Book Title");
/// assert!(field.is_required());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    /// Field name (used for form submission)
    pub name: String,
    /// Field kind
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Label text
    pub label: String,
    /// Default used when no other data is supplied
    pub default: DefaultValue,
    /// Validators in run order
    pub validators: Vec<Validator>,
    /// Help text shown below the field
    pub description: Option<String>,
    /// Element ID (defaults to name if not set)
    pub id: Option<String>,
    /// CSS class(es)
    pub class: Option<String>,
}

impl FormField {
    /// Create a new integer field
    #[must_use]
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    /// Create a new single-line text field
    #[must_use]
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::String)
    }

    /// Create a new multi-line text field
    #[must_use]
    pub fn textarea(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::TextArea)
    }

    /// Create a new boolean field
    #[must_use]
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    /// Create a new float field
    #[must_use]
    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Float)
    }

    /// Create a new date field
    #[must_use]
    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Date)
    }

    /// Create a new date-time field
    #[must_use]
    pub fn datetime(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::DateTime)
    }

    /// Create a new select field with no choices
    #[must_use]
    pub fn select(name: impl Into<String>, coerce: Coerce) -> Self {
        Self::new(
            name,
            FieldKind::Select {
                choices: Vec::new(),
                coerce,
            },
        )
    }

    fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            kind,
            default: DefaultValue::null(),
            validators: Vec::new(),
            description: None,
            id: None,
            class: None,
        }
    }

    /// Set the label
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the default
    #[must_use]
    pub fn default(mut self, default: impl Into<DefaultValue>) -> Self {
        self.default = default.into();
        self
    }

    /// Append a validator
    #[must_use]
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Replace all validators
    #[must_use]
    pub fn validators(mut self, validators: Vec<Validator>) -> Self {
        self.validators = validators;
        self
    }

    /// Set help text
    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Set element ID (overrides default which is the field name)
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set CSS class
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Set select choices; ignored for other kinds
    #[must_use]
    pub fn choices<I, C>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Choice>,
    {
        if let FieldKind::Select {
            choices: ref mut current,
            ..
        } = self.kind
        {
            *current = choices.into_iter().map(Into::into).collect();
        }
        self
    }

    /// Get the effective ID (custom ID or field name)
    #[must_use]
    pub fn effective_id(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }

    /// Check if a required-data validator is attached
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.validators.iter().any(Validator::is_required)
    }

    /// Tightest maximum length among attached length validators
    #[must_use]
    pub fn max_length(&self) -> Option<usize> {
        self.validators
            .iter()
            .filter_map(|v| match v {
                Validator::Length { max, .. } => *max,
                Validator::DataRequired { .. } => None,
            })
            .min()
    }

    /// Check if this field is a select
    #[must_use]
    pub const fn is_select(&self) -> bool {
        matches!(self.kind, FieldKind::Select { .. })
    }

    /// Select choices, if this field is a select
    #[must_use]
    pub fn choice_list(&self) -> Option<&[Choice]> {
        match &self.kind {
            FieldKind::Select { choices, .. } => Some(choices),
            _ => None,
        }
    }
}
