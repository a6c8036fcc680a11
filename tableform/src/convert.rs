//! Column to form field conversion
//!
//! A [`Converter`] turns one table column into a form field descriptor.
//! [`TableConverter`] is the default implementation: a registry mapping each
//! [`ColumnType`] to a conversion function, which callers can extend,
//! override or replace wholesale.
//!
//! # Examples
//!
//! ```rust
//! use tableform::convert::{Converter, FieldArgs, TableConverter};
//! use tableform::schema::{Column, ColumnType, Table};
//!
//! let table = Table::new("Book").column(Column::varchar("title").required());
//! let column = table.get_column("title").unwrap();
//!
//! let field = TableConverter::default()
//!     .convert(&table, column, Some(&FieldArgs::new().label("Book Title")))
//!     .unwrap();
//!
//! assert_eq!(field.label, "Book Title");
//! assert_eq!(field.validators.len(), 2);
//! ```

use std::collections::HashMap;

use inflector::Inflector;
use serde::{Deserialize, Serialize};

use crate::config::ConverterSettings;
use crate::forms::{Coerce, FormField, Validator};
use crate::schema::{Column, ColumnType, Table};
use crate::value::DefaultValue;

/// Maximum length enforced on string and UUID fields
pub const STRING_MAX_LENGTH: usize = 255;

/// Caller overrides for one generated field
///
/// Every set option replaces the value derived from the column. A validator
/// list replaces the derived (empty) list; a required column still gets its
/// required-data validator appended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldArgs {
    /// Label text
    pub label: Option<String>,
    /// Default value
    pub default: Option<DefaultValue>,
    /// Validators
    pub validators: Option<Vec<Validator>>,
    /// Help text
    pub description: Option<String>,
}

impl FieldArgs {
    /// No overrides
    #[must_use]
    pub fn new() -> Self {
        <Self as Default>::default()
    }

    /// Override the label
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Override the default
    #[must_use]
    pub fn default(mut self, default: impl Into<DefaultValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Replace the validator list
    #[must_use]
    pub fn validators(mut self, validators: Vec<Validator>) -> Self {
        self.validators = Some(validators);
        self
    }

    /// Append one validator to the override list
    #[must_use]
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.get_or_insert_with(Vec::new).push(validator);
        self
    }

    /// Set help text
    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }
}

/// Field construction arguments handed to a conversion function
///
/// Built fresh for every conversion and passed by value, so a conversion
/// function may extend the validator list without affecting other fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldKwargs {
    /// Label text
    pub label: String,
    /// Default value
    pub default: DefaultValue,
    /// Validators in run order
    pub validators: Vec<Validator>,
    /// Help text
    pub description: Option<String>,
}

impl FieldKwargs {
    /// Derive arguments from a column and optional caller overrides
    #[must_use]
    pub fn for_column(column: &Column, args: Option<&FieldArgs>) -> Self {
        let args = args.cloned().unwrap_or_default();
        let mut validators = args.validators.unwrap_or_default();
        if column.required {
            validators.push(Validator::data_required());
        }
        Self {
            label: args.label.unwrap_or_else(|| column.name.to_title_case()),
            default: args.default.unwrap_or_else(|| column.effective_default()),
            validators,
            description: args.description,
        }
    }

    /// Apply these arguments to a field descriptor
    #[must_use]
    pub fn apply(self, field: FormField) -> FormField {
        let field = field
            .label(self.label)
            .default(self.default)
            .validators(self.validators);
        match self.description {
            Some(text) => field.description(text),
            None => field,
        }
    }
}

/// A conversion function for one column type
pub type ConvertFn = fn(&Table, &Column, FieldKwargs) -> Option<FormField>;

/// Turns table columns into form fields
pub trait Converter {
    /// Convert one column, or return `None` to leave it out of the form
    fn convert(
        &self,
        table: &Table,
        column: &Column,
        field_args: Option<&FieldArgs>,
    ) -> Option<FormField>;
}

impl<F> Converter for F
where
    F: Fn(&Table, &Column, Option<&FieldArgs>) -> Option<FormField>,
{
    fn convert(
        &self,
        table: &Table,
        column: &Column,
        field_args: Option<&FieldArgs>,
    ) -> Option<FormField> {
        self(table, column, field_args)
    }
}

/// Integer field for integer-like columns
#[must_use]
pub fn convert_int_field(_table: &Table, column: &Column, kwargs: FieldKwargs) -> Option<FormField> {
    Some(kwargs.apply(FormField::integer(&column.name)))
}

/// Single-line string field with a length limit
#[must_use]
pub fn convert_char_field(
    _table: &Table,
    column: &Column,
    mut kwargs: FieldKwargs,
) -> Option<FormField> {
    kwargs.validators.push(Validator::max_length(STRING_MAX_LENGTH));
    Some(kwargs.apply(FormField::string(&column.name)))
}

/// Multi-line text field
#[must_use]
pub fn convert_text_field(_table: &Table, column: &Column, kwargs: FieldKwargs) -> Option<FormField> {
    Some(kwargs.apply(FormField::textarea(&column.name)))
}

/// String field for UUIDs, with a length limit
#[must_use]
pub fn convert_uuid_field(table: &Table, column: &Column, kwargs: FieldKwargs) -> Option<FormField> {
    convert_char_field(table, column, kwargs)
}

/// Boolean toggle
#[must_use]
pub fn convert_boolean_field(
    _table: &Table,
    column: &Column,
    kwargs: FieldKwargs,
) -> Option<FormField> {
    Some(kwargs.apply(FormField::boolean(&column.name)))
}

/// Float field for numeric columns
///
/// Declared precision and scale are not carried over; the field accepts any
/// float.
#[must_use]
pub fn convert_float_field(
    _table: &Table,
    column: &Column,
    kwargs: FieldKwargs,
) -> Option<FormField> {
    Some(kwargs.apply(FormField::float(&column.name)))
}

/// Date-time field for timestamps
#[must_use]
pub fn convert_datetime_field(
    _table: &Table,
    column: &Column,
    kwargs: FieldKwargs,
) -> Option<FormField> {
    Some(kwargs.apply(FormField::datetime(&column.name)))
}

/// Date field
#[must_use]
pub fn convert_date_field(_table: &Table, column: &Column, kwargs: FieldKwargs) -> Option<FormField> {
    Some(kwargs.apply(FormField::date(&column.name)))
}

/// Integer-coerced select for foreign keys
///
/// Choices start empty. The caller assigns them from the referenced table's
/// rows before validating.
#[must_use]
pub fn convert_select_field(
    _table: &Table,
    column: &Column,
    kwargs: FieldKwargs,
) -> Option<FormField> {
    Some(kwargs.apply(FormField::select(&column.name, Coerce::Int)))
}

/// Registry-backed default converter
#[derive(Debug, Clone)]
pub struct TableConverter {
    converters: HashMap<ColumnType, ConvertFn>,
    warn_unmapped: bool,
}

impl TableConverter {
    /// Converter with the default mapping
    #[must_use]
    pub fn new() -> Self {
        Self::with_converters(Self::default_converters())
    }

    /// The default column type mapping
    #[must_use]
    pub fn default_converters() -> HashMap<ColumnType, ConvertFn> {
        [
            (ColumnType::Varchar, convert_char_field as ConvertFn),
            (ColumnType::Text, convert_text_field),
            (ColumnType::Uuid, convert_uuid_field),
            (ColumnType::Boolean, convert_boolean_field),
            (ColumnType::Serial, convert_int_field),
            (ColumnType::Integer, convert_int_field),
            (ColumnType::SmallInt, convert_int_field),
            (ColumnType::BigInt, convert_int_field),
            (ColumnType::Numeric, convert_float_field),
            (ColumnType::Decimal, convert_float_field),
            (ColumnType::Real, convert_float_field),
            (ColumnType::DoublePrecision, convert_float_field),
            (ColumnType::Timestamp, convert_datetime_field),
            (ColumnType::Date, convert_date_field),
            (ColumnType::ForeignKey, convert_select_field),
        ]
        .into_iter()
        .collect()
    }

    /// Converter using exactly `converters`, without the defaults
    #[must_use]
    pub const fn with_converters(converters: HashMap<ColumnType, ConvertFn>) -> Self {
        Self {
            converters,
            warn_unmapped: true,
        }
    }

    /// Default converter configured from settings
    #[must_use]
    pub fn from_settings(settings: &ConverterSettings) -> Self {
        Self::new().warn_unmapped(settings.warn_unmapped)
    }

    /// Whether skipped columns are logged at warn level
    #[must_use]
    pub const fn warn_unmapped(mut self, enabled: bool) -> Self {
        self.warn_unmapped = enabled;
        self
    }

    /// Add or replace the conversion for one column type
    #[must_use]
    pub fn register(mut self, ty: ColumnType, convert: ConvertFn) -> Self {
        self.converters.insert(ty, convert);
        self
    }

    /// Remove the conversion for one column type
    #[must_use]
    pub fn unregister(mut self, ty: ColumnType) -> Self {
        self.converters.remove(&ty);
        self
    }

    /// Conversion function for a column type
    #[must_use]
    pub fn get(&self, ty: ColumnType) -> Option<ConvertFn> {
        self.converters.get(&ty).copied()
    }

    /// Check if a column type has a conversion
    #[must_use]
    pub fn supports(&self, ty: ColumnType) -> bool {
        self.converters.contains_key(&ty)
    }
}

impl Default for TableConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for TableConverter {
    fn convert(
        &self,
        table: &Table,
        column: &Column,
        field_args: Option<&FieldArgs>,
    ) -> Option<FormField> {
        let Some(convert) = self.get(column.ty) else {
            if self.warn_unmapped {
                tracing::warn!(
                    table = %table.name(),
                    column = %column.name,
                    column_type = %column.ty,
                    "No converter for column type, skipping column"
                );
            }
            return None;
        };

        let kwargs = FieldKwargs::for_column(column, field_args);
        let field = convert(table, column, kwargs);
        if let Some(ref field) = field {
            tracing::trace!(
                table = %table.name(),
                column = %column.name,
                kind = %field.kind,
                "Converted column"
            );
        }
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FieldKind;
    use crate::value::FieldValue;

    fn convert(column: Column, args: Option<&FieldArgs>) -> Option<FormField> {
        let table = Table::new("Book").column(column.clone());
        TableConverter::default().convert(&table, &column, args)
    }

    #[test]
    fn test_label_is_title_case() {
        let field = convert(Column::date("released_date"), None).unwrap();
        assert_eq!(field.label, "Released Date");
    }

    #[test]
    fn test_default_from_column() {
        let field = convert(Column::integer("rating").default(3_i64), None).unwrap();
        assert_eq!(field.default, DefaultValue::from(3_i64));

        let field = convert(Column::varchar("title"), None).unwrap();
        assert_eq!(field.default.resolve(), FieldValue::from(""));
    }

    #[test]
    fn test_varchar_gets_length_after_required() {
        let field = convert(Column::varchar("title").required(), None).unwrap();
        assert_eq!(
            field.validators,
            vec![
                Validator::data_required(),
                Validator::max_length(STRING_MAX_LENGTH)
            ]
        );
    }

    #[test]
    fn test_caller_validators_keep_length() {
        let args = FieldArgs::new().validator(Validator::length(Some(3), None));
        let field = convert(Column::uuid("token"), Some(&args)).unwrap();
        assert_eq!(
            field.validators,
            vec![
                Validator::length(Some(3), None),
                Validator::max_length(STRING_MAX_LENGTH)
            ]
        );
    }

    #[test]
    fn test_overrides_win() {
        let args = FieldArgs::new()
            .label("Score")
            .default(5_i64)
            .description("Out of ten");
        let field = convert(Column::integer("rating"), Some(&args)).unwrap();
        assert_eq!(field.label, "Score");
        assert_eq!(field.default, DefaultValue::from(5_i64));
        assert_eq!(field.description.as_deref(), Some("Out of ten"));
    }

    #[test]
    fn test_kinds_per_column_type() {
        let cases = [
            (Column::serial("id"), "integer"),
            (Column::big_int("views"), "integer"),
            (Column::text("content"), "textarea"),
            (Column::boolean("released"), "boolean"),
            (Column::numeric("price").digits(5, 2), "float"),
            (Column::new("ratio", ColumnType::DoublePrecision), "float"),
            (Column::timestamp("created"), "datetime"),
            (Column::date("released_date"), "date"),
        ];
        for (column, kind) in cases {
            let field = convert(column, None).unwrap();
            assert_eq!(field.kind.as_str(), kind, "{}", field.name);
            assert!(field.validators.is_empty());
        }
    }

    #[test]
    fn test_foreign_key_select() {
        let field = convert(Column::foreign_key("book_author", "Author"), None).unwrap();
        assert_eq!(
            field.kind,
            FieldKind::Select {
                choices: Vec::new(),
                coerce: Coerce::Int
            }
        );
    }

    #[test]
    fn test_unmapped_type_is_skipped() {
        assert!(convert(Column::new("payload", ColumnType::Jsonb), None).is_none());
    }

    #[test]
    fn test_register_and_unregister() {
        let converter = TableConverter::default()
            .register(ColumnType::Json, convert_text_field)
            .unregister(ColumnType::Boolean);
        assert!(converter.supports(ColumnType::Json));
        assert!(!converter.supports(ColumnType::Boolean));
        assert!(converter.get(ColumnType::Varchar).is_some());
    }

    #[test]
    fn test_full_replacement() {
        let converter = TableConverter::with_converters(HashMap::from([(
            ColumnType::Varchar,
            convert_text_field as ConvertFn,
        )]));
        let table = Table::new("Book")
            .column(Column::varchar("title"))
            .column(Column::integer("rating"));

        let title = converter.convert(&table, &table.columns()[0], None).unwrap();
        assert_eq!(title.kind.as_str(), "textarea");
        assert!(converter.convert(&table, &table.columns()[1], None).is_none());
    }

    #[test]
    fn test_closure_converter() {
        let only_strings = |table: &Table, column: &Column, args: Option<&FieldArgs>| {
            (column.ty == ColumnType::Varchar)
                .then(|| TableConverter::default().convert(table, column, args))
                .flatten()
        };
        let table = Table::new("Book")
            .column(Column::varchar("title"))
            .column(Column::integer("rating"));

        assert!(only_strings.convert(&table, &table.columns()[0], None).is_some());
        assert!(only_strings.convert(&table, &table.columns()[1], None).is_none());
    }
}
