//! Bind values to a form and print the resulting data as JSON

use anyhow::Result;
use clap::Args;
use indexmap::IndexMap;
use serde::Serialize;
use tableform::prelude::*;

use super::{FormArgs, TableArgs};

/// Process submitted values and show the field data
#[derive(Debug, Clone, Args)]
pub struct DataCommand {
    /// Table selection and field options
    #[command(flatten)]
    pub table: TableArgs,

    /// Submitted values, choices and validation
    #[command(flatten)]
    pub form: FormArgs,
}

#[derive(Debug, Serialize)]
struct DataOutput<'a> {
    form: &'a str,
    data: IndexMap<String, FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    valid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a ValidationErrors>,
}

impl DataCommand {
    /// Build the JSON document
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be loaded or choices do not fit.
    pub fn run(&self, config: &TableFormConfig) -> Result<String> {
        let form_class = self.table.form_class(config)?;
        let form = self.form.bind(&form_class)?;

        let output = DataOutput {
            form: form.class_name(),
            data: form.data(),
            valid: self.form.validate.then(|| !form.errors().has_errors()),
            errors: self.form.validate.then(|| form.errors()),
        };
        Ok(serde_json::to_string_pretty(&output)?)
    }

    /// Print the JSON document
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be loaded or choices do not fit.
    pub fn execute(&self, config: &TableFormConfig) -> Result<()> {
        println!("{}", self.run(config)?);
        Ok(())
    }
}
