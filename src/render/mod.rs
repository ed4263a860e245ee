//! Turning screens into HTML: a templated primary strategy and a hand-built
//! fallback that takes over whenever the primary fails.

pub mod fallback;
pub mod icons;
pub mod template;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error, warn};

use crate::config::RenderConfig;
use crate::domain::Form;
use crate::errors::RenderError;
use crate::form::{FormBuilder, Screen};

pub use fallback::FallbackRenderer;
pub use template::{HandlebarsEngine, TemplateEngine, TemplateRenderer, UnavailableEngine};

/// One way of turning a titled [`Form`] into a page.
pub trait FormRenderer: Send + Sync {
    fn render_form(&self, title: &str, form: &Form) -> Result<String, RenderError>;
}

/// Runs `primary`; any error or panic is logged and answered by `fallback`.
pub fn render_or_degrade(
    primary: &dyn FormRenderer,
    fallback: &FallbackRenderer,
    title: &str,
    form: &Form,
) -> String {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| primary.render_form(title, form)))
        .unwrap_or_else(|payload| Err(RenderError::Panicked(panic_message(payload.as_ref()))));

    match outcome {
        Ok(html) => html,
        Err(err) => {
            warn!(title, error = %err, "primary rendering failed, using fallback");
            fallback.document(title, form)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Renders [`Screen`]s. Always returns a page.
pub struct Renderer {
    primary: Option<TemplateRenderer>,
    fallback: FallbackRenderer,
}

impl Renderer {
    /// Handlebars primary with `config`. A registry that cannot be built is
    /// kept as an unavailable engine so every render degrades to the fallback.
    pub fn new(config: RenderConfig) -> Self {
        let primary = match HandlebarsEngine::new() {
            Ok(engine) => TemplateRenderer::new(engine, config.clone()),
            Err(err) => {
                warn!(error = %err, "template engine unavailable");
                TemplateRenderer::new(UnavailableEngine::new(err.to_string()), config.clone())
            }
        };
        Self {
            primary: Some(primary),
            fallback: FallbackRenderer::new(config),
        }
    }

    pub fn with_engine(engine: impl TemplateEngine + 'static, config: RenderConfig) -> Self {
        Self {
            primary: Some(TemplateRenderer::new(engine, config.clone())),
            fallback: FallbackRenderer::new(config),
        }
    }

    pub fn fallback_only(config: RenderConfig) -> Self {
        Self {
            primary: None,
            fallback: FallbackRenderer::new(config),
        }
    }

    pub fn render<S: Screen + ?Sized>(&self, screen: &S) -> String {
        let mut builder = FormBuilder::new();
        let form = match screen.create_form(&mut builder, screen.dto()) {
            Ok(form) => form,
            Err(err) => {
                error!(screen = screen.title(), error = %err, "screen failed to build its form");
                Form::new(1)
            }
        };
        self.render_form(screen.title(), &form)
    }

    pub fn render_form(&self, title: &str, form: &Form) -> String {
        match &self.primary {
            Some(primary) => render_or_degrade(primary, &self.fallback, title, form),
            None => {
                debug!(title, "rendering with fallback only");
                self.fallback.document(title, form)
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}
