//! Form classes
//!
//! A [`FormClass`] is a named, ordered set of field descriptors. It is the
//! value the table-form builder produces, and the factory for bound
//! [`Form`] instances.

use indexmap::IndexMap;
use serde::Serialize;

use super::data::FormData;
use super::field::FormField;
use super::form::{BoundField, Form};
use crate::schema::{Record, Row};

/// Name of the base form class
pub const BASE_FORM_NAME: &str = "Form";

/// Sources a form instance draws its data from
///
/// Per field, a record attribute wins over a keyword value, which wins over
/// the field default. Non-empty submitted form data is applied on top.
#[derive(Clone, Copy, Default)]
pub struct FormInput<'a> {
    /// Submitted form data
    pub formdata: Option<&'a FormData>,
    /// Object to read initial values from
    pub record: Option<&'a dyn Record>,
    /// Keyword values
    pub data: Option<&'a Row>,
}

impl<'a> FormInput<'a> {
    /// Empty input: every field takes its default
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set submitted form data
    #[must_use]
    pub const fn formdata(mut self, formdata: &'a FormData) -> Self {
        self.formdata = Some(formdata);
        self
    }

    /// Set the record to read initial values from
    #[must_use]
    pub const fn record(mut self, record: &'a dyn Record) -> Self {
        self.record = Some(record);
        self
    }

    /// Set keyword values
    #[must_use]
    pub const fn data(mut self, data: &'a Row) -> Self {
        self.data = Some(data);
        self
    }
}

/// A named, ordered collection of form fields
///
/// # Examples
///
/// ```rust
/// use tableform::forms::{FormClass, FormField};
///
/// let base = FormClass::base().with_field(FormField::string("csrf_token"));
/// let form_class = base.derive("BookForm", [FormField::string("title")]);
///
/// assert_eq!(form_class.name(), "BookForm");
/// assert_eq!(form_class.field_names(), vec!["csrf_token", "title"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormClass {
    name: String,
    fields: IndexMap<String, FormField>,
}

impl FormClass {
    /// Create an empty form class
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    /// The empty base form class
    #[must_use]
    pub fn base() -> Self {
        Self::new(BASE_FORM_NAME)
    }

    /// Add a field; a field with the same name is replaced in place
    #[must_use]
    pub fn with_field(mut self, field: FormField) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    /// Derive a new class from this one
    ///
    /// The new class starts with this class's fields and then adds `fields`
    /// in order. A field named like an inherited one drops the inherited
    /// field and takes its place among `fields`, so `fields` keep their
    /// order.
    #[must_use]
    pub fn derive<I>(&self, name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = FormField>,
    {
        let mut derived = Self {
            name: name.into(),
            fields: self.fields.clone(),
        };
        for field in fields {
            derived.fields.shift_remove(&field.name);
            derived.fields.insert(field.name.clone(), field);
        }
        derived
    }

    /// Class name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a field descriptor
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.get(name)
    }

    /// Field descriptors in order
    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.fields.values()
    }

    /// Field names in order
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the class has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Instantiate with every field at its default
    #[must_use]
    pub fn instantiate(&self) -> Form {
        self.process(FormInput::new())
    }

    /// Instantiate from keyword values
    #[must_use]
    pub fn with_data(&self, data: &Row) -> Form {
        self.process(FormInput::new().data(data))
    }

    /// Instantiate from an existing record
    #[must_use]
    pub fn from_record(&self, record: &dyn Record) -> Form {
        self.process(FormInput::new().record(record))
    }

    /// Instantiate from submitted form data
    #[must_use]
    pub fn from_formdata(&self, formdata: &FormData) -> Form {
        self.process(FormInput::new().formdata(formdata))
    }

    /// Instantiate from any combination of sources
    #[must_use]
    pub fn process(&self, input: FormInput<'_>) -> Form {
        let formdata = input.formdata.filter(|data| !data.is_empty());
        let fields = self
            .fields
            .iter()
            .map(|(name, field)| {
                let initial = input
                    .record
                    .and_then(|record| record.get(name))
                    .or_else(|| input.data.and_then(|data| data.get(name)));
                let mut bound = BoundField::new(field.clone());
                bound.process(formdata, initial);
                (name.clone(), bound)
            })
            .collect();
        Form::new(self.name.clone(), fields)
    }
}

impl Default for FormClass {
    fn default() -> Self {
        Self::base()
    }
}
