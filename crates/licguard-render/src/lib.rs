//! Rendering of scan summaries: handlebars text for people, JSON for tools.

#![forbid(unsafe_code)]

mod color;
mod json;
mod model;
mod text;

pub use json::render_json;
pub use model::{RenderableModule, RenderableSummary};
pub use text::{DEFAULT_TEMPLATE, TextRenderer};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("invalid template: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("failed to render template: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),
}
