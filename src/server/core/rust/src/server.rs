/* src/server/core/rust/src/server.rs */

use std::sync::Arc;

use skogz_core::{Component, LoaderError, RouteTable};
use skogz_engine::RenderEngine;

use crate::config::ServerConfig;
use crate::errors::SkogzError;
use crate::loader::{LoaderExecutor, LoaderFailureHook};
use crate::renderer::ServerRenderer;
use crate::template::{IdentityTransform, TemplateSource, TemplateTransform};

/// Everything an HTTP adapter needs to serve pages.
pub struct SkogzParts<C, E> {
  pub renderer: Arc<ServerRenderer<C, E>>,
  pub config: ServerConfig,
}

/// Collects the route table, the rendering engine and the server settings.
/// Framework adapters turn it into a listening server.
pub struct SkogzServer<C, E> {
  routes: Arc<RouteTable<C>>,
  engine: E,
  config: ServerConfig,
  transform: Arc<dyn TemplateTransform>,
  on_loader_failure: Option<LoaderFailureHook>,
}

impl<C: Component, E: RenderEngine<C>> SkogzServer<C, E> {
  pub fn new(routes: impl Into<Arc<RouteTable<C>>>, engine: E) -> Self {
    Self {
      routes: routes.into(),
      engine,
      config: ServerConfig::default(),
      transform: Arc::new(IdentityTransform),
      on_loader_failure: None,
    }
  }

  pub fn config(mut self, config: ServerConfig) -> Self {
    self.config = config;
    self
  }

  /// Hook applied to the development template before each request.
  pub fn template_transform(mut self, transform: impl TemplateTransform + 'static) -> Self {
    self.transform = Arc::new(transform);
    self
  }

  pub fn on_loader_failure<F>(mut self, hook: F) -> Self
  where
    F: Fn(&str, &LoaderError) + Send + Sync + 'static,
  {
    self.on_loader_failure = Some(Arc::new(hook));
    self
  }

  pub fn server_config(&self) -> &ServerConfig {
    &self.config
  }

  /// Consume the builder. In production this reads the template, so a
  /// missing file or placeholder is reported before the server binds.
  pub fn into_parts(self) -> Result<SkogzParts<C, E>, SkogzError> {
    let templates = TemplateSource::from_config(&self.config, self.transform)?;
    let mut executor = LoaderExecutor::new(self.config.loader_policy);
    if let Some(hook) = self.on_loader_failure {
      executor = executor.on_failure(hook);
    }
    let renderer =
      ServerRenderer::new(self.routes, self.engine, templates, executor, self.config.base.clone());
    tracing::info!(
      mode = ?self.config.mode,
      base = %self.config.base,
      routes = renderer.routes().len(),
      fingerprint = %renderer.fingerprint(),
      "skogz server assembled"
    );
    Ok(SkogzParts { renderer: Arc::new(renderer), config: self.config })
  }
}
