//! Form classes from table descriptions
//!
//! [`table_fields`] converts a table's columns into ordered field
//! descriptors; [`table_form`] wraps them into a [`FormClass`] derived from a
//! base class. [`TableFormBuilder`] offers the same operations fluently.
//!
//! # Examples
//!
//! ```rust
//! use tableform::builder::TableFormBuilder;
//! use tableform::schema::{Column, Table};
//! use tableform::schema::Row;
//! use tableform::value::FieldValue;
//!
//! let book = Table::new("Book")
//!     .column(Column::serial("id"))
//!     .column(Column::varchar("title").required())
//!     .column(Column::integer("rating"));
//!
//! let form_class = TableFormBuilder::new(&book).only(["title"]).build();
//! assert_eq!(form_class.name(), "BookForm");
//!
//! let form = form_class.with_data(&Row::new().with("title", "Book title"));
//! assert_eq!(form.data().len(), 1);
//! assert_eq!(form.get("title"), Some(&FieldValue::from("Book title")));
//! ```

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use inflector::Inflector;

use crate::convert::{Converter, FieldArgs, TableConverter};
use crate::forms::{FormClass, FormField};
use crate::schema::Table;

/// Which columns of a table become fields
///
/// A non-empty `only` set wins over `exclude`. Names matching no column are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldFilter {
    /// Keep only these columns
    pub only: Option<HashSet<String>>,
    /// Drop these columns
    pub exclude: Option<HashSet<String>>,
}

impl FieldFilter {
    /// Keep every column
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Keep only the named columns
    #[must_use]
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            only: Some(names.into_iter().map(Into::into).collect()),
            exclude: None,
        }
    }

    /// Keep every column except the named ones
    #[must_use]
    pub fn exclude<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            only: None,
            exclude: Some(names.into_iter().map(Into::into).collect()),
        }
    }

    /// Check if a column passes the filter
    #[must_use]
    pub fn retains(&self, name: &str) -> bool {
        match (&self.only, &self.exclude) {
            (Some(only), _) if !only.is_empty() => only.contains(name),
            (_, Some(exclude)) if !exclude.is_empty() => !exclude.contains(name),
            _ => true,
        }
    }
}

/// Convert a table's retained columns into field descriptors
///
/// Fields come out in column declaration order. Columns the converter
/// declines are left out. Without a converter, [`TableConverter::default`]
/// is used.
#[must_use]
pub fn table_fields(
    table: &Table,
    filter: &FieldFilter,
    field_args: &HashMap<String, FieldArgs>,
    converter: Option<&dyn Converter>,
) -> IndexMap<String, FormField> {
    let default_converter;
    let converter: &dyn Converter = match converter {
        Some(converter) => converter,
        None => {
            default_converter = TableConverter::default();
            &default_converter
        }
    };

    let fields: IndexMap<String, FormField> = table
        .columns()
        .iter()
        .filter(|column| filter.retains(&column.name))
        .filter_map(|column| {
            converter
                .convert(table, column, field_args.get(&column.name))
                .map(|field| (column.name.clone(), field))
        })
        .collect();

    tracing::debug!(
        table = %table.name(),
        columns = table.columns().len(),
        fields = fields.len(),
        "Converted table columns"
    );
    fields
}

/// Build a form class for a table
///
/// The class is named after the table's storage name (see [`form_name`])
/// and derives from `base`: inherited fields come first, then the table
/// fields in column order. A table field named like an inherited one
/// replaces it and keeps its column position.
#[must_use]
pub fn table_form(
    table: &Table,
    base: &FormClass,
    filter: &FieldFilter,
    field_args: &HashMap<String, FieldArgs>,
    converter: Option<&dyn Converter>,
) -> FormClass {
    let fields = table_fields(table, filter, field_args, converter);
    let form_class = base.derive(form_name(table), fields.into_values());
    tracing::debug!(
        form = %form_class.name(),
        base = %base.name(),
        fields = form_class.len(),
        "Built form class"
    );
    form_class
}

/// Form class name for a table: the storage name in `PascalCase` plus `Form`
#[must_use]
pub fn form_name(table: &Table) -> String {
    format!("{}Form", table.tablename().to_pascal_case())
}

/// Fluent form of [`table_fields`] and [`table_form`]
pub struct TableFormBuilder<'a> {
    table: &'a Table,
    base: FormClass,
    filter: FieldFilter,
    field_args: HashMap<String, FieldArgs>,
    converter: Option<&'a dyn Converter>,
}

impl<'a> TableFormBuilder<'a> {
    /// Start building a form for `table`
    #[must_use]
    pub fn new(table: &'a Table) -> Self {
        Self {
            table,
            base: FormClass::base(),
            filter: FieldFilter::all(),
            field_args: HashMap::new(),
            converter: None,
        }
    }

    /// Derive from this base class instead of the empty one
    #[must_use]
    pub fn base(mut self, base: FormClass) -> Self {
        self.base = base;
        self
    }

    /// Keep only the named columns
    #[must_use]
    pub fn only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter.only = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Drop the named columns
    #[must_use]
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter.exclude = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Replace the whole filter
    #[must_use]
    pub fn filter(mut self, filter: FieldFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Override construction arguments for one field
    #[must_use]
    pub fn field_args(mut self, name: impl Into<String>, args: FieldArgs) -> Self {
        self.field_args.insert(name.into(), args);
        self
    }

    /// Use a custom converter
    #[must_use]
    pub fn converter(mut self, converter: &'a dyn Converter) -> Self {
        self.converter = Some(converter);
        self
    }

    /// The field descriptors, without building a class
    #[must_use]
    pub fn fields(&self) -> IndexMap<String, FormField> {
        table_fields(self.table, &self.filter, &self.field_args, self.converter)
    }

    /// Build the form class
    #[must_use]
    pub fn build(&self) -> FormClass {
        table_form(
            self.table,
            &self.base,
            &self.filter,
            &self.field_args,
            self.converter,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Column;

    fn task() -> Table {
        Table::new("TaskItem")
            .column(Column::serial("id"))
            .column(Column::varchar("name"))
            .column(Column::boolean("completed"))
    }

    #[test]
    fn test_filter_only_wins() {
        let filter = FieldFilter {
            only: Some(["name".to_string()].into()),
            exclude: Some(["name".to_string()].into()),
        };
        assert!(filter.retains("name"));
        assert!(!filter.retains("id"));
    }

    #[test]
    fn test_empty_only_keeps_everything() {
        let filter = FieldFilter::only(Vec::<String>::new());
        assert!(filter.retains("id"));

        let filter = FieldFilter {
            only: Some(HashSet::new()),
            exclude: Some(["id".to_string()].into()),
        };
        assert!(!filter.retains("id"));
        assert!(filter.retains("name"));
    }

    #[test]
    fn test_only_keeps_table_order() {
        let fields = table_fields(
            &task(),
            &FieldFilter::only(["completed", "id", "missing"]),
            &HashMap::new(),
            None,
        );
        assert_eq!(fields.keys().collect::<Vec<_>>(), ["id", "completed"]);
    }

    #[test]
    fn test_form_name_uses_storage_name() {
        assert_eq!(form_name(&task()), "TaskItemForm");
        assert_eq!(
            form_name(&Table::new("Task").with_tablename("todo_entries")),
            "TodoEntriesForm"
        );
    }

    #[test]
    fn test_builder_with_base() {
        let base = FormClass::base().with_field(FormField::string("csrf_token"));
        let form_class = TableFormBuilder::new(&task())
            .base(base)
            .exclude(["id"])
            .build();
        assert_eq!(
            form_class.field_names(),
            vec!["csrf_token", "name", "completed"]
        );
    }

    #[test]
    fn test_base_override_keeps_column_order() {
        let table = Table::new("Note")
            .column(Column::serial("id"))
            .column(Column::varchar("title"))
            .column(Column::text("content"));
        let base = FormClass::base()
            .with_field(FormField::string("title"))
            .with_field(FormField::string("csrf_token"));

        let form_class = TableFormBuilder::new(&table).base(base).build();
        assert_eq!(
            form_class.field_names(),
            vec!["csrf_token", "id", "title", "content"]
        );
        assert_eq!(form_class.field("title").unwrap().max_length(), Some(255));
    }

    #[test]
    fn test_custom_converter_declines_columns() {
        let no_booleans = |table: &Table, column: &crate::schema::Column, args: Option<&FieldArgs>| {
            (column.ty != crate::schema::ColumnType::Boolean)
                .then(|| TableConverter::default().convert(table, column, args))
                .flatten()
        };
        let table = task();
        let fields = TableFormBuilder::new(&table).converter(&no_booleans).fields();
        assert_eq!(fields.keys().collect::<Vec<_>>(), ["id", "name"]);
    }
}
