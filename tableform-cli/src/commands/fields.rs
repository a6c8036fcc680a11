//! List the fields a table converts to

use std::fmt::Write as _;

use anyhow::Result;
use clap::Args;
use console::{style, Emoji};
use tableform::prelude::*;

use super::TableArgs;

static INFO: Emoji = Emoji("ℹ", "i");

/// Show the generated form class
#[derive(Debug, Clone, Args)]
pub struct FieldsCommand {
    /// Table selection and field options
    #[command(flatten)]
    pub table: TableArgs,
}

impl FieldsCommand {
    /// Build the field listing
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be loaded.
    pub fn run(&self, config: &TableFormConfig) -> Result<String> {
        listing(&self.table.form_class(config)?)
    }

    /// Print the field listing
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be loaded.
    pub fn execute(&self, config: &TableFormConfig) -> Result<()> {
        let form_class = self.table.form_class(config)?;

        println!(
            "\n{} {} ({} fields)",
            INFO,
            style(form_class.name()).bold(),
            style(form_class.len()).cyan()
        );
        println!("{}", "─".repeat(80));
        print!("{}", listing(&form_class)?);
        println!();
        Ok(())
    }
}

fn listing(form_class: &FormClass) -> Result<String> {
    let mut out = String::new();

    writeln!(
        out,
        "{:<20} {:<10} {:<24} {}",
        "Name", "Kind", "Label", "Validators"
    )?;
    for field in form_class.fields() {
        let validators = field
            .validators
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            out,
            "{:<20} {:<10} {:<24} {}",
            field.name,
            field.kind.as_str(),
            field.label,
            validators
        )?;
    }
    Ok(out)
}
