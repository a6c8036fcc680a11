//! Form rendering to HTML
//!
//! Renders bound forms to HTML strings with proper escaping and validation
//! error display.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use super::errors::FieldError;
use super::field::{Choice, FieldKind, InputType};
use super::form::{BoundField, Form};

/// Options for customizing form rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormRenderOptions {
    /// CSS class for form groups (wrapper around label + input + errors)
    pub group_class: String,
    /// CSS class for labels
    pub label_class: String,
    /// CSS class for input elements
    pub input_class: String,
    /// CSS class for error messages
    pub error_class: String,
    /// CSS class for help text
    pub help_class: String,
    /// CSS class for submit button
    pub submit_class: String,
    /// CSS class applied to inputs with errors
    pub input_error_class: String,
    /// Submit button text; no button when empty
    pub submit_text: String,
    /// Whether to wrap fields in a div
    pub wrap_fields: bool,
}

impl Default for FormRenderOptions {
    fn default() -> Self {
        Self {
            group_class: "form-group".into(),
            label_class: "form-label".into(),
            input_class: "form-input".into(),
            error_class: "form-error".into(),
            help_class: "form-help".into(),
            submit_class: "form-submit".into(),
            input_error_class: "form-input-error".into(),
            submit_text: "Submit".into(),
            wrap_fields: true,
        }
    }
}

/// Renders forms to HTML
#[derive(Debug, Clone, Default)]
pub struct FormRenderer {
    options: FormRenderOptions,
}

impl FormRenderer {
    /// Create a renderer with custom options
    #[must_use]
    pub const fn new(options: FormRenderOptions) -> Self {
        Self { options }
    }

    /// Rendering options in use
    #[must_use]
    pub const fn options(&self) -> &FormRenderOptions {
        &self.options
    }

    /// Render a complete `<form>` element
    #[must_use]
    pub fn render(&self, form: &Form, action: &str, method: &str) -> String {
        let mut html = String::with_capacity(1024);

        html.push_str("<form");
        write_attr(&mut html, "action", action);
        write_attr(&mut html, "method", method);
        html.push_str(">\n");

        html.push_str(&self.render_fields(form));

        if !self.options.submit_text.is_empty() {
            let _ = writeln!(
                html,
                r#"  <button type="submit" class="{}">{}</button>"#,
                escape_attr(&self.options.submit_class),
                escape_html(&self.options.submit_text)
            );
        }

        html.push_str("</form>");
        html
    }

    /// Render only the fields, in form order
    #[must_use]
    pub fn render_fields(&self, form: &Form) -> String {
        form.fields().map(|field| self.render_field(field)).collect()
    }

    /// Render a single bound field with its label, errors and help text
    #[must_use]
    pub fn render_field(&self, bound: &BoundField) -> String {
        let options = &self.options;
        let field = bound.field();
        let mut html = String::with_capacity(256);
        let errors = bound.errors();
        let has_errors = !errors.is_empty();
        let is_checkbox = matches!(field.kind, FieldKind::Boolean);

        if options.wrap_fields {
            let _ = writeln!(html, r#"  <div class="{}">"#, escape_attr(&options.group_class));
        }

        // Checkbox label comes after input
        if !is_checkbox {
            let _ = writeln!(
                html,
                r#"    <label for="{}" class="{}">{}</label>"#,
                escape_attr(field.effective_id()),
                escape_attr(&options.label_class),
                escape_html(&field.label)
            );
        }

        let input_html = match &field.kind {
            FieldKind::TextArea => self.render_textarea(bound, has_errors),
            FieldKind::Select { choices, .. } => self.render_select(bound, choices, has_errors),
            FieldKind::Boolean => self.render_checkbox(bound, has_errors),
            kind => self.render_input(bound, kind.input_type().unwrap_or_default(), has_errors),
        };
        html.push_str(&input_html);

        if is_checkbox {
            let _ = writeln!(
                html,
                r#" <label for="{}" class="{}">{}</label>"#,
                escape_attr(field.effective_id()),
                escape_attr(&options.label_class),
                escape_html(&field.label)
            );
        }

        self.render_errors(&mut html, errors);

        if let Some(ref help) = field.description {
            let _ = writeln!(
                html,
                r#"    <span class="{}">{}</span>"#,
                escape_attr(&options.help_class),
                escape_html(help)
            );
        }

        if options.wrap_fields {
            html.push_str("  </div>\n");
        }

        html
    }

    fn render_errors(&self, html: &mut String, errors: &[FieldError]) {
        for error in errors {
            let _ = writeln!(
                html,
                r#"    <span class="{}">{}</span>"#,
                escape_attr(&self.options.error_class),
                escape_html(&error.message)
            );
        }
    }

    fn render_input(&self, bound: &BoundField, input_type: InputType, has_errors: bool) -> String {
        let field = bound.field();
        let mut html = String::with_capacity(128);

        html.push_str("    <input");
        write_attr(&mut html, "type", input_type.as_str());
        write_attr(&mut html, "name", &field.name);
        write_attr(&mut html, "id", field.effective_id());
        write_attr(&mut html, "class", &self.build_input_class(bound, has_errors));
        write_attr(&mut html, "value", &bound.value_string());

        match field.kind {
            FieldKind::Float => write_attr(&mut html, "step", "any"),
            FieldKind::DateTime => write_attr(&mut html, "step", "1"),
            _ => {}
        }
        if field.is_required() {
            html.push_str(" required");
        }
        if let Some(len) = field.max_length() {
            write_attr(&mut html, "maxlength", &len.to_string());
        }

        html.push_str(">\n");
        html
    }

    fn render_textarea(&self, bound: &BoundField, has_errors: bool) -> String {
        let field = bound.field();
        let mut html = String::with_capacity(128);

        html.push_str("    <textarea");
        write_attr(&mut html, "name", &field.name);
        write_attr(&mut html, "id", field.effective_id());
        write_attr(&mut html, "class", &self.build_input_class(bound, has_errors));

        if field.is_required() {
            html.push_str(" required");
        }

        html.push('>');
        html.push_str(&escape_html(&bound.value_string()));
        html.push_str("</textarea>\n");
        html
    }

    fn render_select(&self, bound: &BoundField, choices: &[Choice], has_errors: bool) -> String {
        let field = bound.field();
        let mut html = String::with_capacity(256);

        html.push_str("    <select");
        write_attr(&mut html, "name", &field.name);
        write_attr(&mut html, "id", field.effective_id());
        write_attr(&mut html, "class", &self.build_input_class(bound, has_errors));
        if field.is_required() {
            html.push_str(" required");
        }
        html.push_str(">\n");

        for choice in choices {
            html.push_str("      <option");
            write_attr(&mut html, "value", &choice.value.to_string());
            if bound.is_selected(choice) {
                html.push_str(" selected");
            }
            html.push('>');
            html.push_str(&escape_html(&choice.label));
            html.push_str("</option>\n");
        }

        html.push_str("    </select>\n");
        html
    }

    fn render_checkbox(&self, bound: &BoundField, has_errors: bool) -> String {
        let field = bound.field();
        let mut html = String::with_capacity(128);

        html.push_str("    <input");
        write_attr(&mut html, "type", InputType::Checkbox.as_str());
        write_attr(&mut html, "name", &field.name);
        write_attr(&mut html, "id", field.effective_id());
        write_attr(&mut html, "class", &self.build_input_class(bound, has_errors));
        write_attr(&mut html, "value", "y");

        if bound.data().is_truthy() {
            html.push_str(" checked");
        }
        if field.is_required() {
            html.push_str(" required");
        }

        html.push('>');
        html
    }

    fn build_input_class(&self, bound: &BoundField, has_errors: bool) -> String {
        let mut classes = vec![self.options.input_class.as_str()];

        if let Some(ref class) = bound.field().class {
            classes.push(class.as_str());
        }
        if has_errors {
            classes.push(self.options.input_error_class.as_str());
        }

        classes.retain(|c| !c.is_empty());
        classes.join(" ")
    }
}

fn write_attr(html: &mut String, name: &str, value: &str) {
    html.push(' ');
    html.push_str(name);
    html.push_str("=\"");
    html.push_str(&escape_attr(value));
    html.push('"');
}

/// Escape a string for use in an HTML attribute
#[must_use]
pub fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape a string for use as HTML text content
#[must_use]
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{Coerce, FormClass, FormData, FormField, Validator};

    fn book_class() -> FormClass {
        FormClass::new("BookForm")
            .with_field(
                FormField::string("title")
                    .label("Title")
                    .validator(Validator::data_required())
                    .validator(Validator::max_length(255)),
            )
            .with_field(FormField::textarea("content").description("Plain text"))
            .with_field(FormField::boolean("published").label("Published"))
            .with_field(FormField::select("book_author", Coerce::Int).label("Book Author"))
    }

    #[test]
    fn test_render_form_tag() {
        let form = book_class().instantiate();
        let html = FormRenderer::default().render(&form, "/books", "post");

        assert!(html.starts_with(r#"<form action="/books" method="post">"#));
        assert!(html.contains(r#"<button type="submit" class="form-submit">Submit</button>"#));
        assert!(html.ends_with("</form>"));
    }

    #[test]
    fn test_render_input_attributes() {
        let form = book_class().instantiate();
        let html = FormRenderer::default().render_fields(&form);

        assert!(html.contains(r#"<label for="title" class="form-label">Title</label>"#));
        assert!(html.contains(r#"type="text" name="title""#));
        assert!(html.contains(r#" required maxlength="255""#));
        assert!(html.contains(r#"<span class="form-help">Plain text</span>"#));
    }

    #[test]
    fn test_render_textarea_content() {
        let formdata = FormData::new().with("content", "Spice <must> flow");
        let form = book_class().from_formdata(&formdata);
        let html = FormRenderer::default().render_fields(&form);

        assert!(html.contains(
            r#"<textarea name="content" id="content" class="form-input">Spice &lt;must&gt; flow</textarea>"#
        ));
    }

    #[test]
    fn test_render_select_marks_selected() {
        let formdata = FormData::new().with("book_author", "2");
        let mut form = book_class().from_formdata(&formdata);
        form.set_choices("book_author", [(1_i64, "alice"), (2_i64, "bob")])
            .unwrap();

        let html = FormRenderer::default().render_fields(&form);
        assert!(html.contains(r#"<option value="1">alice</option>"#));
        assert!(html.contains(r#"<option value="2" selected>bob</option>"#));
    }

    #[test]
    fn test_render_errors_and_error_class() {
        let mut form = book_class().from_formdata(&FormData::new().with("title", ""));
        assert!(!form.validate());

        let html = FormRenderer::default().render_fields(&form);
        assert!(html.contains("form-input form-input-error"));
        assert!(html.contains(r#"<span class="form-error">This field is required.</span>"#));
        assert!(html.contains(r#"<span class="form-error">Not a valid choice.</span>"#));
    }

    #[test]
    fn test_render_checkbox_checked() {
        let formdata = FormData::new().with("published", "y");
        let form = book_class().from_formdata(&formdata);
        let html = FormRenderer::default().render_fields(&form);

        assert!(html.contains(r#"type="checkbox" name="published""#));
        assert!(html.contains(" checked>"));
    }

    #[test]
    fn test_render_escapes_values() {
        let formdata = FormData::new().with("title", r#"<b>"Dune"</b>"#);
        let form = book_class().from_formdata(&formdata);
        let html = FormRenderer::default().render_fields(&form);

        assert!(html.contains(r#"value="&lt;b&gt;&quot;Dune&quot;&lt;/b&gt;""#));
    }

    #[test]
    fn test_custom_options() {
        let options = FormRenderOptions {
            wrap_fields: false,
            submit_text: String::new(),
            ..FormRenderOptions::default()
        };
        let form = book_class().instantiate();
        let html = FormRenderer::new(options).render(&form, "/", "post");

        assert!(!html.contains("form-group"));
        assert!(!html.contains("<button"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_attr(r#"say "hi""#), "say &quot;hi&quot;");
    }
}
