/* src/server/core/rust/src/template.rs */

use std::path::{Path, PathBuf};
use std::sync::Arc;

use skogz_core::BoxFuture;
use skogz_engine::CompiledTemplate;

use crate::config::{Mode, ServerConfig};
use crate::errors::SkogzError;

/// Development-time rewrite of the raw template (e.g. injecting a bundler's
/// client script) before placeholders are located.
pub trait TemplateTransform: Send + Sync {
  fn transform(&self, url: String, html: String) -> BoxFuture<Result<String, SkogzError>>;
}

/// Leaves the template untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransform;

impl TemplateTransform for IdentityTransform {
  fn transform(&self, _url: String, html: String) -> BoxFuture<Result<String, SkogzError>> {
    Box::pin(async move { Ok(html) })
  }
}

/// Where the base document comes from.
#[derive(Clone)]
pub enum TemplateSource {
  /// Read and compiled once at startup.
  Production(Arc<CompiledTemplate>),
  /// Read, transformed and compiled on every request.
  Development { path: PathBuf, transform: Arc<dyn TemplateTransform> },
}

impl TemplateSource {
  /// Load the build-output template. Fails fast on a missing file or a
  /// missing placeholder.
  pub fn production(path: &Path) -> Result<Self, SkogzError> {
    let html = std::fs::read_to_string(path)
      .map_err(|source| SkogzError::TemplateIo { path: path.to_path_buf(), source })?;
    Ok(Self::Production(Arc::new(CompiledTemplate::compile(&html)?)))
  }

  pub fn development(path: impl Into<PathBuf>, transform: Arc<dyn TemplateTransform>) -> Self {
    Self::Development { path: path.into(), transform }
  }

  pub fn from_config(
    config: &ServerConfig,
    transform: Arc<dyn TemplateTransform>,
  ) -> Result<Self, SkogzError> {
    match config.mode {
      Mode::Production => Self::production(&config.template_path()),
      Mode::Development => Ok(Self::development(config.template_path(), transform)),
    }
  }

  /// Template for the request at `url`.
  pub async fn load(&self, url: &str) -> Result<Arc<CompiledTemplate>, SkogzError> {
    match self {
      Self::Production(template) => Ok(template.clone()),
      Self::Development { path, transform } => {
        let html = tokio::fs::read_to_string(path)
          .await
          .map_err(|source| SkogzError::TemplateIo { path: path.clone(), source })?;
        let html = transform.transform(url.to_string(), html).await?;
        Ok(Arc::new(CompiledTemplate::compile(&html)?))
      }
    }
  }
}
