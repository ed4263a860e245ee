use thiserror::Error;

/// Misuse of the [`FormBuilder`](crate::form::FormBuilder) protocol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("no form under construction; call `create` before `{0}`")]
    NoCurrentForm(&'static str),
}

/// Failures of the primary (templated) rendering strategy.
///
/// None of these ever reach a caller of
/// [`Renderer::render`](crate::render::Renderer::render); they only decide
/// that the fallback strategy takes over.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),
    #[error("template registration failed: {0}")]
    Registration(#[from] Box<handlebars::TemplateError>),
    #[error("context serialization failed: {0}")]
    Context(#[from] serde_json::Error),
    #[error("template engine unavailable: {0}")]
    Unavailable(String),
    #[error("template engine panicked: {0}")]
    Panicked(String),
}

/// Errors raised while loading or saving [`RenderConfig`](crate::config::RenderConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
