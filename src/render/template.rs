//! Templated rendering: a view model over [`Form`] handed to a template engine.

use handlebars::Handlebars;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::RenderConfig;
use crate::domain::{Field, Form};
use crate::errors::RenderError;
use crate::utils::html::escape_html;

use super::{icons, FormRenderer};

pub const SCREEN_VIEW: &str = "screen";
const SCREEN_TEMPLATE: &str = include_str!("screen.hbs");

/// Renders a named view against a JSON context.
pub trait TemplateEngine: Send + Sync {
    fn process(&self, view: &str, context: &Value) -> Result<String, RenderError>;
}

/// Handlebars registry with the `screen` view preloaded.
pub struct HandlebarsEngine {
    registry: Handlebars<'static>,
}

impl HandlebarsEngine {
    pub fn new() -> Result<Self, RenderError> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(escape_html);
        registry
            .register_template_string(SCREEN_VIEW, SCREEN_TEMPLATE)
            .map_err(Box::new)?;
        Ok(Self { registry })
    }
}

impl TemplateEngine for HandlebarsEngine {
    fn process(&self, view: &str, context: &Value) -> Result<String, RenderError> {
        Ok(self.registry.render(view, context)?)
    }
}

/// Stands in for an engine that could not be constructed.
pub struct UnavailableEngine {
    reason: String,
}

impl UnavailableEngine {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl TemplateEngine for UnavailableEngine {
    fn process(&self, _view: &str, _context: &Value) -> Result<String, RenderError> {
        Err(RenderError::Unavailable(self.reason.clone()))
    }
}

/// Primary strategy: builds the view model and asks the engine for the page.
pub struct TemplateRenderer {
    engine: Box<dyn TemplateEngine>,
    config: RenderConfig,
}

impl TemplateRenderer {
    pub fn new(engine: impl TemplateEngine + 'static, config: RenderConfig) -> Self {
        Self {
            engine: Box::new(engine),
            config,
        }
    }
}

impl FormRenderer for TemplateRenderer {
    fn render_form(&self, title: &str, form: &Form) -> Result<String, RenderError> {
        let context = serde_json::to_value(PageView::new(title, form, &self.config))?;
        debug!(view = %self.config.view_name, rows = form.rows().len(), "rendering template");
        self.engine.process(&self.config.view_name, &context)
    }
}

#[derive(Debug, Serialize)]
struct PageView<'a> {
    title: &'a str,
    stylesheet_href: &'a str,
    script_href: &'a str,
    submit_label: &'a str,
    debounce_ms: u64,
    search_svg: &'static str,
    form: FormView<'a>,
}

impl<'a> PageView<'a> {
    fn new(title: &'a str, form: &'a Form, config: &'a RenderConfig) -> Self {
        Self {
            title,
            stylesheet_href: &config.stylesheet_href,
            script_href: &config.script_href,
            submit_label: &config.submit_label,
            debounce_ms: config.lookup_debounce_ms,
            search_svg: icons::SEARCH,
            form: FormView {
                columns: form.columns(),
                rows: form
                    .rows()
                    .iter()
                    .map(|row| row.iter().map(FieldView::from_field).collect())
                    .collect(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct FormView<'a> {
    columns: usize,
    rows: Vec<Vec<FieldView<'a>>>,
}

/// Flat per-field context. Scalars are stringified so a numeric `0` stays truthy;
/// the `has_*` flags mark optional attributes that are present but possibly empty.
#[derive(Debug, Default, Serialize)]
struct FieldView<'a> {
    kind: &'static str,
    input_type: &'static str,
    name: &'a str,
    label: &'a str,
    label_for: String,
    icon_svg: Option<&'static str>,
    value: Option<String>,
    min: Option<String>,
    max: Option<String>,
    options: Vec<OptionView<'a>>,
    code_name: String,
    name_id: String,
    code: Option<&'a str>,
    display_name: Option<&'a str>,
    id_value: Option<&'a str>,
    lookup_url: Option<&'a str>,
    has_value: bool,
    has_code: bool,
    has_lookup_url: bool,
}

#[derive(Debug, Serialize)]
struct OptionView<'a> {
    id: &'a str,
    label: &'a str,
    selected: bool,
}

impl<'a> FieldView<'a> {
    fn from_field(field: &'a Field) -> Self {
        let base = Self {
            kind: field.kind().as_str(),
            input_type: "text",
            name: field.name(),
            label: field.label(),
            label_for: field.name().to_string(),
            icon_svg: field.icon().map(icons::glyph),
            ..Self::default()
        };

        let view = match field {
            Field::Text(text) => Self {
                value: text.value.clone(),
                ..base
            },
            Field::Number(number) => Self {
                input_type: "number",
                value: number.value.map(|v| v.to_string()),
                min: number.min.map(|v| v.to_string()),
                max: number.max.map(|v| v.to_string()),
                ..base
            },
            Field::Date(date) => Self {
                input_type: "date",
                value: date.value.clone(),
                ..base
            },
            Field::Select(select) => Self {
                icon_svg: None,
                options: select
                    .options()
                    .iter()
                    .map(|option| OptionView {
                        id: &option.id,
                        label: &option.label,
                        selected: select.is_selected(option),
                    })
                    .collect(),
                ..base
            },
            Field::Reference(reference) => Self {
                icon_svg: None,
                label_for: reference.code_input_name(),
                code_name: reference.code_input_name(),
                name_id: reference.name_element_id(),
                code: reference.code.as_deref(),
                display_name: reference.display_name.as_deref(),
                id_value: reference.id_value.as_deref(),
                lookup_url: reference.lookup_url.as_deref(),
                ..base
            },
            Field::Other(_) => Self {
                icon_svg: None,
                ..base
            },
        };

        Self {
            has_value: view.value.is_some(),
            has_code: view.code.is_some(),
            has_lookup_url: view.lookup_url.is_some(),
            ..view
        }
    }
}
