//! CLI command implementations
//!
//! Every command loads one table from a schema file, builds its form class
//! and prints something about it. Commands return their output as a string
//! so they can be tested without capturing stdout.

pub mod data;
pub mod fields;
pub mod render;

pub use data::DataCommand;
pub use fields::FieldsCommand;
pub use render::RenderCommand;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tableform::prelude::*;

/// Arguments selecting a table and the columns to turn into fields
#[derive(Debug, Clone, Args)]
pub struct TableArgs {
    /// Schema file (TOML)
    pub schema: PathBuf,

    /// Table class name or storage name
    pub table: String,

    /// Only include these columns
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Exclude these columns
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Override a field label, as `field=Label`
    #[arg(long = "label", value_name = "FIELD=LABEL", value_parser = parse_pair)]
    pub labels: Vec<(String, String)>,
}

impl TableArgs {
    /// Load the schema and build the selected table's form class
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be loaded or has no such table.
    pub fn form_class(&self, config: &TableFormConfig) -> Result<FormClass> {
        let schema = Schema::load(&self.schema)
            .with_context(|| format!("Failed to load schema {}", self.schema.display()))?;
        let table = schema.require_table(&self.table)?;

        let field_args: HashMap<String, FieldArgs> = self
            .labels
            .iter()
            .map(|(name, label)| (name.clone(), FieldArgs::new().label(label)))
            .collect();
        let filter = FieldFilter {
            only: Some(self.only.iter().cloned().collect()),
            exclude: Some(self.exclude.iter().cloned().collect()),
        };
        let converter = TableConverter::from_settings(&config.converter);

        Ok(table_form(
            table,
            &FormClass::base(),
            &filter,
            &field_args,
            Some(&converter as &dyn Converter),
        ))
    }
}

/// Arguments supplying data to a form instance
#[derive(Debug, Clone, Default, Args)]
pub struct FormArgs {
    /// Submit a value, as `field=value`
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_pair)]
    pub values: Vec<(String, String)>,

    /// Add a select choice, as `field=value:label`
    #[arg(long = "choices", value_name = "FIELD=VALUE:LABEL", value_parser = parse_choice)]
    pub choices: Vec<(String, Choice)>,

    /// Validate the form after binding
    #[arg(long)]
    pub validate: bool,
}

impl FormArgs {
    /// Instantiate `form_class` with the submitted values and choices
    ///
    /// # Errors
    ///
    /// Returns an error if choices target a missing or non-select field.
    pub fn bind(&self, form_class: &FormClass) -> Result<Form> {
        let formdata: FormData = self.values.iter().cloned().collect();
        let mut form = form_class.from_formdata(&formdata);

        let mut names: Vec<&str> = Vec::new();
        for (name, _) in &self.choices {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
        for name in names {
            let choices = self
                .choices
                .iter()
                .filter(|(field, _)| field == name)
                .map(|(_, choice)| choice.clone());
            form.set_choices(name, choices)
                .with_context(|| format!("Cannot assign choices to `{name}`"))?;
        }

        if self.validate {
            form.validate();
        }
        Ok(form)
    }
}

/// Parse `key=value`
///
/// # Errors
///
/// Returns an error if there is no `=` or the key is empty.
pub fn parse_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected `name=value`, got `{s}`")),
    }
}

/// Parse `field=value:label`; the label defaults to the value
///
/// # Errors
///
/// Returns an error if the field part is missing.
pub fn parse_choice(s: &str) -> Result<(String, Choice), String> {
    let (field, rest) = parse_pair(s)?;
    let (value, label) = rest.split_once(':').unwrap_or((&rest, &rest));
    let value = value
        .parse::<i64>()
        .map_or_else(|_| FieldValue::from(value), FieldValue::Int);
    Ok((field, Choice::new(value, label)))
}
