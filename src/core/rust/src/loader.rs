/* src/core/rust/src/loader.rs */

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Zero-argument data loader attached to a route. Only the server invokes it.
pub type LoaderFn =
  Arc<dyn Fn() -> BoxFuture<Result<serde_json::Value, LoaderError>> + Send + Sync>;

/// Wrap an async function or closure into a [`LoaderFn`].
pub fn loader_fn<F, Fut>(f: F) -> LoaderFn
where
  F: Fn() -> Fut + Send + Sync + 'static,
  Fut: Future<Output = Result<serde_json::Value, LoaderError>> + Send + 'static,
{
  Arc::new(move || Box::pin(f()))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoaderError {
  #[error("loader failed: {0}")]
  Failed(String),
  #[error("loader panicked: {0}")]
  Panicked(String),
}

impl LoaderError {
  pub fn failed(msg: impl Into<String>) -> Self {
    Self::Failed(msg.into())
  }
}

/// JSON value produced by a loader, or `{}` when the route has none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoaderResult(serde_json::Value);

impl LoaderResult {
  pub fn new(value: serde_json::Value) -> Self {
    Self(value)
  }

  pub fn empty() -> Self {
    Self(serde_json::Value::Object(serde_json::Map::new()))
  }

  pub fn as_value(&self) -> &serde_json::Value {
    &self.0
  }

  pub fn into_value(self) -> serde_json::Value {
    self.0
  }

  /// True for `{}` and `null`.
  pub fn is_empty(&self) -> bool {
    match &self.0 {
      serde_json::Value::Object(map) => map.is_empty(),
      serde_json::Value::Null => true,
      _ => false,
    }
  }
}

impl Default for LoaderResult {
  fn default() -> Self {
    Self::empty()
  }
}

impl From<serde_json::Value> for LoaderResult {
  fn from(value: serde_json::Value) -> Self {
    Self(value)
  }
}
