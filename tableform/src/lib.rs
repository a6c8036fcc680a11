//! tableform: form classes generated from table metadata
//!
//! Describe a table once (in code or in a TOML schema file) and get a form
//! class with one field per column: labels from column names, defaults from
//! column defaults, required and length validators from column constraints,
//! and integer-coerced selects for foreign keys.
//!
//! # Quick Start
//!
//! ```rust
//! use tableform::prelude::*;
//!
//! let author = Table::new("Author")
//!     .column(Column::serial("id"))
//!     .column(Column::varchar("name").required());
//!
//! let book = Table::new("Book")
//!     .column(Column::serial("id"))
//!     .column(Column::varchar("title").required())
//!     .column(Column::foreign_key("book_author", author.name()));
//!
//! let form_class = TableFormBuilder::new(&book).exclude(["id"]).build();
//! assert_eq!(form_class.name(), "BookForm");
//!
//! let formdata = FormData::new().with("title", "Dune").with("book_author", "1");
//! let mut form = form_class.from_formdata(&formdata);
//! form.set_choices("book_author", [(1_i64, "alice"), (2_i64, "bob")])?;
//!
//! assert!(form.validate());
//! # Ok::<(), tableform::TableFormError>(())
//! ```
//!
//! # Modules
//!
//! - [`schema`]: tables, columns and records
//! - [`convert`]: the column to field converter registry
//! - [`builder`]: `table_fields` / `table_form`
//! - [`forms`]: form classes, bound forms, validators and HTML rendering
//! - [`config`] and [`observability`]: settings and logging for binaries

// Lint configuration is handled at the workspace level in Cargo.toml
#![allow(clippy::missing_errors_doc)]

pub mod builder;
pub mod config;
pub mod convert;
pub mod error;
pub mod forms;
pub mod observability;
pub mod schema;
pub mod value;

pub use error::{Result, TableFormError};

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! ```rust
    //! use tableform::prelude::*;
    //! ```

    pub use crate::builder::{form_name, table_fields, table_form, FieldFilter, TableFormBuilder};
    pub use crate::config::TableFormConfig;
    pub use crate::convert::{Converter, FieldArgs, TableConverter};
    pub use crate::error::TableFormError;
    pub use crate::forms::{
        Choice, Coerce, FieldKind, Form, FormClass, FormData, FormField, FormInput,
        FormRenderOptions, FormRenderer, ValidationErrors, Validator,
    };
    pub use crate::schema::{Column, ColumnType, Record, Row, Schema, Table};
    pub use crate::value::{DefaultValue, FieldValue};
}
