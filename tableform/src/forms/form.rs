//! Bound form instances
//!
//! A [`Form`] holds one [`BoundField`] per field of its class. Each bound
//! field carries the processed data, the raw submitted strings and the
//! errors found while processing and validating.

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;

use super::data::FormData;
use super::errors::{FieldError, ValidationErrors};
use super::field::{Choice, Coerce, FieldKind, FormField};
use super::validators::Failure;
use crate::error::{Result, TableFormError};
use crate::schema::Record;
use crate::value::{FieldValue, DATE_FORMAT};

/// Accepted date-time input formats, tried in order
pub const DATETIME_INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const FALSE_VALUES: [&str; 2] = ["", "false"];

const INVALID_INTEGER: &str = "Not a valid integer value.";
const INVALID_FLOAT: &str = "Not a valid float value.";
const INVALID_DATE: &str = "Not a valid date value.";
const INVALID_DATETIME: &str = "Not a valid datetime value.";
const INVALID_COERCE: &str = "Invalid Choice: could not coerce.";
const INVALID_CHOICE: &str = "Not a valid choice.";

/// A field bound to data
#[derive(Debug, Clone, PartialEq)]
pub struct BoundField {
    field: FormField,
    data: FieldValue,
    raw_data: Vec<String>,
    process_errors: Vec<FieldError>,
    errors: Vec<FieldError>,
}

impl BoundField {
    pub(crate) const fn new(field: FormField) -> Self {
        Self {
            field,
            data: FieldValue::Null,
            raw_data: Vec::new(),
            process_errors: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// The field descriptor
    #[must_use]
    pub const fn field(&self) -> &FormField {
        &self.field
    }

    /// Field name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.field.name
    }

    /// Processed data
    #[must_use]
    pub const fn data(&self) -> &FieldValue {
        &self.data
    }

    /// Replace the processed data
    pub fn set_data(&mut self, data: impl Into<FieldValue>) {
        self.data = data.into();
    }

    /// Raw submitted strings
    #[must_use]
    pub fn raw_data(&self) -> &[String] {
        &self.raw_data
    }

    /// Errors from the last processing and validation
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Errors raised while processing input
    #[must_use]
    pub fn process_errors(&self) -> &[FieldError] {
        &self.process_errors
    }

    /// Process an initial value and optional submitted data
    ///
    /// Without an initial value the field default is resolved. Submitted
    /// data, when given, is parsed on top of the initial value.
    pub fn process(&mut self, formdata: Option<&FormData>, initial: Option<FieldValue>) {
        self.process_errors.clear();
        self.raw_data.clear();

        let initial = initial.unwrap_or_else(|| self.field.default.resolve());
        if let Err(message) = self.process_data(initial) {
            self.process_errors.push(FieldError::with_code(message, "process"));
        }

        if let Some(formdata) = formdata {
            let raw = formdata.get_all(&self.field.name).to_vec();
            if let Err(message) = self.process_formdata(&raw) {
                self.process_errors.push(FieldError::with_code(message, "process"));
            }
            self.raw_data = raw;
        }
    }

    fn process_data(&mut self, value: FieldValue) -> std::result::Result<(), &'static str> {
        let processed = match &self.field.kind {
            FieldKind::Select { coerce, .. } => Ok(coerce.apply(&value).unwrap_or(FieldValue::Null)),
            FieldKind::Boolean => Ok(FieldValue::Bool(is_set(&value))),
            FieldKind::Date => match value {
                FieldValue::Text(ref text) if text.trim().is_empty() => Ok(FieldValue::Null),
                FieldValue::Text(ref text) => NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
                    .map(FieldValue::Date)
                    .map_err(|_| INVALID_DATE),
                other => Ok(other),
            },
            FieldKind::DateTime => match value {
                FieldValue::Text(ref text) if text.trim().is_empty() => Ok(FieldValue::Null),
                FieldValue::Text(ref text) => parse_datetime(text).ok_or(INVALID_DATETIME),
                other => Ok(other),
            },
            FieldKind::Integer if !value.is_null() => {
                value.coerce_int().map(FieldValue::Int).ok_or(INVALID_INTEGER)
            }
            FieldKind::Float if !value.is_null() => {
                value.coerce_float().map(FieldValue::Float).ok_or(INVALID_FLOAT)
            }
            _ => Ok(value),
        };
        self.store(processed)
    }

    fn process_formdata(&mut self, values: &[String]) -> std::result::Result<(), &'static str> {
        if matches!(self.field.kind, FieldKind::Boolean) {
            let checked = values
                .first()
                .is_some_and(|v| !FALSE_VALUES.contains(&v.as_str()));
            self.data = FieldValue::Bool(checked);
            return Ok(());
        }

        let Some(first) = values.first() else {
            return Ok(());
        };

        let parsed = match &self.field.kind {
            FieldKind::String | FieldKind::TextArea => Ok(FieldValue::Text(first.clone())),
            FieldKind::Integer => first
                .trim()
                .parse()
                .map(FieldValue::Int)
                .map_err(|_| INVALID_INTEGER),
            FieldKind::Float => first
                .trim()
                .parse()
                .map(FieldValue::Float)
                .map_err(|_| INVALID_FLOAT),
            FieldKind::Date => {
                NaiveDate::parse_from_str(values.join(" ").trim(), DATE_FORMAT)
                    .map(FieldValue::Date)
                    .map_err(|_| INVALID_DATE)
            }
            FieldKind::DateTime => parse_datetime(&values.join(" ")).ok_or(INVALID_DATETIME),
            // A value that cannot be coerced leaves the data untouched
            FieldKind::Select { coerce, .. } => {
                match coerce.apply(&FieldValue::Text(first.clone())) {
                    Some(value) => Ok(value),
                    None => return Err(INVALID_COERCE),
                }
            }
            FieldKind::Boolean => return Ok(()),
        };
        self.store(parsed)
    }

    fn store(
        &mut self,
        result: std::result::Result<FieldValue, &'static str>,
    ) -> std::result::Result<(), &'static str> {
        match result {
            Ok(value) => {
                self.data = value;
                Ok(())
            }
            Err(message) => {
                self.data = FieldValue::Null;
                Err(message)
            }
        }
    }

    /// Validate the processed data
    ///
    /// Returns `true` if the field has no errors afterwards.
    pub fn validate(&mut self) -> bool {
        self.errors = self.process_errors.clone();

        if let FieldKind::Select { choices, coerce } = &self.field.kind {
            if !choice_matches(choices, *coerce, &self.data) {
                self.errors.push(FieldError::with_code(INVALID_CHOICE, "choice"));
            }
        }

        for validator in &self.field.validators {
            match validator.check(&self.data) {
                Ok(()) => {}
                Err(Failure::Continue(message)) => {
                    self.errors.push(FieldError::with_code(message, validator.name()));
                }
                Err(Failure::Stop(message)) => {
                    self.errors.clear();
                    self.errors.push(FieldError::with_code(message, validator.name()));
                    break;
                }
            }
        }

        self.errors.is_empty()
    }

    /// Current value as an input string
    ///
    /// Submitted strings are echoed back as-is; otherwise the data is
    /// formatted for the field's input type.
    #[must_use]
    pub fn value_string(&self) -> String {
        if let Some(raw) = self.raw_data.first() {
            return raw.clone();
        }
        match (&self.field.kind, &self.data) {
            (FieldKind::DateTime, FieldValue::DateTime(dt)) => {
                dt.format(DATETIME_INPUT_FORMATS[1]).to_string()
            }
            (_, data) => data.to_string(),
        }
    }

    /// Check if a choice is the selected one
    #[must_use]
    pub fn is_selected(&self, choice: &Choice) -> bool {
        match &self.field.kind {
            FieldKind::Select { coerce, .. } => {
                !self.data.is_null() && coerce.apply(&choice.value).as_ref() == Some(&self.data)
            }
            _ => false,
        }
    }

    fn set_choices(&mut self, new_choices: Vec<Choice>) -> Result<()> {
        match &mut self.field.kind {
            FieldKind::Select { choices, .. } => {
                *choices = new_choices;
                Ok(())
            }
            _ => Err(TableFormError::NotASelectField(self.field.name.clone())),
        }
    }
}

fn parse_datetime(text: &str) -> Option<FieldValue> {
    DATETIME_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text.trim(), format).ok())
        .map(FieldValue::DateTime)
}

/// Any value other than null, `false`, zero or empty text checks a box
fn is_set(value: &FieldValue) -> bool {
    match value {
        FieldValue::Text(text) => !text.is_empty(),
        other => other.is_truthy(),
    }
}

fn choice_matches(choices: &[Choice], coerce: Coerce, data: &FieldValue) -> bool {
    choices
        .iter()
        .any(|choice| coerce.apply(&choice.value).as_ref() == Some(data))
}

/// A form instance with bound fields
///
/// # Examples
///
/// ```rust
/// use tableform::forms::{Choice, FormClass, FormData, FormField, Coerce};
///
/// let class = FormClass::new("BookForm")
///     .with_field(FormField::select("book_author", Coerce::Int));
///
/// let formdata = FormData::new().with("book_author", "1");
/// let mut form = class.from_formdata(&formdata);
/// form.set_choices("book_author", vec![Choice::new(1_i64, "alice")])?;
///
/// assert!(form.validate());
/// # Ok::<(), tableform::TableFormError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    class_name: String,
    fields: IndexMap<String, BoundField>,
    errors: ValidationErrors,
}

impl Form {
    pub(crate) fn new(class_name: String, fields: IndexMap<String, BoundField>) -> Self {
        Self {
            class_name,
            fields,
            errors: ValidationErrors::new(),
        }
    }

    /// Name of the form class this instance was created from
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Look up a bound field
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&BoundField> {
        self.fields.get(name)
    }

    /// Look up a bound field mutably
    pub fn field_mut(&mut self, name: &str) -> Option<&mut BoundField> {
        self.fields.get_mut(name)
    }

    /// Bound fields in order
    pub fn fields(&self) -> impl Iterator<Item = &BoundField> {
        self.fields.values()
    }

    /// Processed data of one field
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name).map(BoundField::data)
    }

    /// Processed data of every field, in field order
    #[must_use]
    pub fn data(&self) -> IndexMap<String, FieldValue> {
        self.fields
            .iter()
            .map(|(name, field)| (name.clone(), field.data.clone()))
            .collect()
    }

    /// Assign the choices of a select field
    ///
    /// # Errors
    ///
    /// Returns [`TableFormError::UnknownField`] if the form has no such
    /// field, or [`TableFormError::NotASelectField`] if it is not a select.
    pub fn set_choices<I, C>(&mut self, name: &str, choices: I) -> Result<()>
    where
        I: IntoIterator<Item = C>,
        C: Into<Choice>,
    {
        let field = self
            .fields
            .get_mut(name)
            .ok_or_else(|| TableFormError::UnknownField(name.to_string()))?;
        field.set_choices(choices.into_iter().map(Into::into).collect())
    }

    /// Validate every field
    ///
    /// Returns `true` if no field has errors.
    pub fn validate(&mut self) -> bool {
        self.errors.clear();
        for (name, field) in &mut self.fields {
            if !field.validate() {
                for error in &field.errors {
                    self.errors.push(name.clone(), error.clone());
                }
            }
        }
        tracing::debug!(
            form = %self.class_name,
            errors = self.errors.count(),
            "Validated form"
        );
        !self.errors.has_errors()
    }

    /// Errors from the last validation
    #[must_use]
    pub const fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Write every field's data onto a record
    pub fn populate_obj<R: Record + ?Sized>(&self, record: &mut R) {
        for (name, field) in &self.fields {
            record.set(name, field.data.clone());
        }
    }
}
