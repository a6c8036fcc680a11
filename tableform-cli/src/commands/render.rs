//! Render a form to HTML

use anyhow::Result;
use clap::Args;
use tableform::prelude::*;

use super::{FormArgs, TableArgs};

/// Render the generated form as HTML
#[derive(Debug, Clone, Args)]
pub struct RenderCommand {
    /// Table selection and field options
    #[command(flatten)]
    pub table: TableArgs,

    /// Submitted values, choices and validation
    #[command(flatten)]
    pub form: FormArgs,

    /// Form action URL
    #[arg(long, default_value = "")]
    pub action: String,

    /// HTTP method
    #[arg(long, default_value = "post")]
    pub method: String,
}

impl RenderCommand {
    /// Produce the HTML
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be loaded or choices do not fit.
    pub fn run(&self, config: &TableFormConfig) -> Result<String> {
        let form_class = self.table.form_class(config)?;
        let form = self.form.bind(&form_class)?;
        let renderer = FormRenderer::new(config.render.clone());
        Ok(renderer.render(&form, &self.action, &self.method))
    }

    /// Print the HTML
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be loaded or choices do not fit.
    pub fn execute(&self, config: &TableFormConfig) -> Result<()> {
        println!("{}", self.run(config)?);
        Ok(())
    }
}
