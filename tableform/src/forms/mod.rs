//! Form classes, bound forms and HTML rendering
//!
//! This is the form layer generated classes plug into. A [`FormClass`] is a
//! named, ordered set of [`FormField`] descriptors; instantiating it yields a
//! [`Form`] whose fields are bound to data drawn from a record, keyword
//! values, field defaults and submitted [`FormData`].
//!
//! # Examples
//!
//! ```rust
//! use tableform::forms::{FormClass, FormData, FormField, FormRenderer, Validator};
//!
//! let class = FormClass::new("TaskForm")
//!     .with_field(FormField::string("name").validator(Validator::data_required()))
//!     .with_field(FormField::boolean("completed"));
//!
//! let formdata = FormData::new().with("name", "Write docs").with("completed", "y");
//! let mut form = class.from_formdata(&formdata);
//! assert!(form.validate());
//!
//! let html = FormRenderer::default().render(&form, "/tasks", "post");
//! assert!(html.contains(r#"name="completed""#));
//! ```
//!
//! # Processing order
//!
//! For each field, the initial value is the record attribute if the record
//! has one, else the keyword value, else the resolved field default.
//! Non-empty submitted data is then parsed on top of it, and parsing
//! failures are kept as processing errors until validation.

mod class;
mod data;
mod errors;
mod field;
mod form;
mod render;
mod validators;

pub use class::{FormClass, FormInput, BASE_FORM_NAME};
pub use data::FormData;
pub use errors::{FieldError, ValidationErrors};
pub use field::{Choice, Coerce, FieldKind, FormField, InputType};
pub use form::{BoundField, Form, DATETIME_INPUT_FORMATS};
pub use render::{escape_attr, escape_html, FormRenderOptions, FormRenderer};
pub use validators::{Validator, REQUIRED_MESSAGE};
