/* src/server/core/rust/src/loader.rs */

use std::any::Any;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use skogz_core::{LoaderError, LoaderFn, LoaderResult, Route};

/// What a failing loader does to its request. Applied uniformly to every route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoaderPolicy {
  /// Log, notify the failure hook, and render with `{}`.
  #[default]
  Degrade,
  /// Fail the request with a 500.
  Fail,
}

impl FromStr for LoaderPolicy {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "degrade" => Ok(Self::Degrade),
      "fail" => Ok(Self::Fail),
      other => Err(format!("unknown loader policy {other:?}")),
    }
  }
}

/// Observer called with the route path for every loader failure.
pub type LoaderFailureHook = Arc<dyn Fn(&str, &LoaderError) + Send + Sync>;

/// Runs a route's loader at most once per request.
#[derive(Clone, Default)]
pub struct LoaderExecutor {
  policy: LoaderPolicy,
  on_failure: Option<LoaderFailureHook>,
}

impl fmt::Debug for LoaderExecutor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("LoaderExecutor")
      .field("policy", &self.policy)
      .field("on_failure", &self.on_failure.is_some())
      .finish()
  }
}

impl LoaderExecutor {
  pub fn new(policy: LoaderPolicy) -> Self {
    Self { policy, on_failure: None }
  }

  pub fn on_failure(mut self, hook: LoaderFailureHook) -> Self {
    self.on_failure = Some(hook);
    self
  }

  pub fn policy(&self) -> LoaderPolicy {
    self.policy
  }

  /// Routes without a loader yield `{}` with no side effects. Otherwise the
  /// loader runs on its own task, so a panic surfaces as
  /// [`LoaderError::Panicked`] instead of tearing down the request.
  pub async fn execute<C>(&self, route: &Route<C>) -> Result<LoaderResult, LoaderError> {
    let Some(loader) = route.loader() else {
      return Ok(LoaderResult::empty());
    };

    match run(loader).await {
      Ok(value) => Ok(LoaderResult::new(value)),
      Err(err) => {
        if let Some(hook) = &self.on_failure {
          hook(route.path(), &err);
        }
        match self.policy {
          LoaderPolicy::Degrade => {
            tracing::warn!(path = route.path(), error = %err, "loader failed, rendering with empty result");
            Ok(LoaderResult::empty())
          }
          LoaderPolicy::Fail => Err(err),
        }
      }
    }
  }
}

async fn run(loader: &LoaderFn) -> Result<serde_json::Value, LoaderError> {
  match tokio::spawn(loader()).await {
    Ok(result) => result,
    Err(join_err) if join_err.is_panic() => {
      Err(LoaderError::Panicked(panic_message(join_err.into_panic())))
    }
    Err(join_err) => Err(LoaderError::Panicked(join_err.to_string())),
  }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
  if let Some(s) = payload.downcast_ref::<&str>() {
    (*s).to_string()
  } else if let Some(s) = payload.downcast_ref::<String>() {
    s.clone()
  } else {
    "non-string panic payload".to_string()
  }
}
