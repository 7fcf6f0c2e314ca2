/* src/server/engine/rust/src/render.rs */

use skogz_core::Props;

/// Markup returned by the rendering engine for one component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
  /// Meta/style insertions for `<head>`.
  pub head: String,
  /// Static component markup, no attached behavior.
  pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
  #[error("render failed: {0}")]
  Failed(String),
  #[error("invalid props: {0}")]
  InvalidProps(String),
}

impl RenderError {
  pub fn failed(msg: impl Into<String>) -> Self {
    Self::Failed(msg.into())
  }
}

/// Server half of the UI rendering engine: component + props -> markup.
pub trait RenderEngine<C>: Send + Sync {
  fn render(&self, component: &C, props: &Props) -> Result<Rendered, RenderError>;
}
