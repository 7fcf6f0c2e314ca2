/* src/core/rust/src/route.rs */

use std::collections::HashMap;
use std::fmt;
use std::future::Future;

use crate::loader::{LoaderError, LoaderFn, loader_fn};

/// Reserved key of the not-found fallback. Never matched against a URL path.
pub const ERROR_KEY: &str = "error";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteTableError {
  #[error("route path {0:?} must start with '/'")]
  InvalidPath(String),
  #[error("route path {0:?} is reserved for the error route")]
  ReservedPath(String),
  #[error("duplicate route path {0:?}")]
  DuplicatePath(String),
  #[error("route table has no error route")]
  MissingErrorRoute,
  #[error("route table declares the error route more than once")]
  DuplicateErrorRoute,
}

/// A path bound to a component and an optional loader.
pub struct Route<C> {
  path: String,
  component: C,
  loader: Option<LoaderFn>,
}

impl<C> Route<C> {
  pub fn path(&self) -> &str {
    &self.path
  }

  pub fn component(&self) -> &C {
    &self.component
  }

  pub fn loader(&self) -> Option<&LoaderFn> {
    self.loader.as_ref()
  }

  pub fn has_loader(&self) -> bool {
    self.loader.is_some()
  }

  pub fn is_error(&self) -> bool {
    self.path == ERROR_KEY
  }
}

impl<C: fmt::Debug> fmt::Debug for Route<C> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Route")
      .field("path", &self.path)
      .field("component", &self.component)
      .field("loader", &self.loader.is_some())
      .finish()
  }
}

/// Immutable path -> route mapping with a mandatory error fallback.
///
/// Lookup is exact string equality: no parameters, no trailing-slash
/// normalization, no prefixes. Built once through [`RouteTableBuilder`] and
/// shared read-only afterwards.
pub struct RouteTable<C> {
  routes: Vec<Route<C>>,
  index: HashMap<String, usize>,
  error: Route<C>,
}

impl<C> RouteTable<C> {
  pub fn builder() -> RouteTableBuilder<C> {
    RouteTableBuilder::new()
  }

  /// The route registered under `path`, or the error route.
  pub fn resolve(&self, path: &str) -> &Route<C> {
    self.lookup(path).unwrap_or(&self.error)
  }

  pub fn lookup(&self, path: &str) -> Option<&Route<C>> {
    self.index.get(path).map(|&i| &self.routes[i])
  }

  pub fn error_route(&self) -> &Route<C> {
    &self.error
  }

  /// Declared routes in declaration order, error route excluded.
  pub fn routes(&self) -> impl Iterator<Item = &Route<C>> {
    self.routes.iter()
  }

  pub fn paths(&self) -> impl Iterator<Item = &str> {
    self.routes.iter().map(Route::path)
  }

  pub fn len(&self) -> usize {
    self.routes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.routes.is_empty()
  }
}

impl<C: fmt::Debug> fmt::Debug for RouteTable<C> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RouteTable").field("routes", &self.routes).field("error", &self.error).finish()
  }
}

pub struct RouteTableBuilder<C> {
  routes: Vec<Route<C>>,
  error: Option<C>,
  problem: Option<RouteTableError>,
}

impl<C> RouteTableBuilder<C> {
  fn new() -> Self {
    Self { routes: Vec::new(), error: None, problem: None }
  }

  pub fn route(self, path: impl Into<String>, component: C) -> Self {
    self.push(path.into(), component, None)
  }

  pub fn route_with_loader<F, Fut>(self, path: impl Into<String>, component: C, loader: F) -> Self
  where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<serde_json::Value, LoaderError>> + Send + 'static,
  {
    self.push(path.into(), component, Some(loader_fn(loader)))
  }

  pub fn route_with_loader_fn(self, path: impl Into<String>, component: C, loader: LoaderFn) -> Self {
    self.push(path.into(), component, Some(loader))
  }

  /// Register the not-found fallback. It never has a loader.
  pub fn error(mut self, component: C) -> Self {
    if self.error.is_some() {
      self.problem.get_or_insert(RouteTableError::DuplicateErrorRoute);
    } else {
      self.error = Some(component);
    }
    self
  }

  pub fn build(self) -> Result<RouteTable<C>, RouteTableError> {
    if let Some(problem) = self.problem {
      return Err(problem);
    }
    let component = self.error.ok_or(RouteTableError::MissingErrorRoute)?;

    let mut index = HashMap::with_capacity(self.routes.len());
    for (i, route) in self.routes.iter().enumerate() {
      if index.insert(route.path.clone(), i).is_some() {
        return Err(RouteTableError::DuplicatePath(route.path.clone()));
      }
    }

    Ok(RouteTable {
      routes: self.routes,
      index,
      error: Route { path: ERROR_KEY.to_string(), component, loader: None },
    })
  }

  fn push(mut self, path: String, component: C, loader: Option<LoaderFn>) -> Self {
    if self.problem.is_none() {
      if path == ERROR_KEY {
        self.problem = Some(RouteTableError::ReservedPath(path));
        return self;
      }
      if !path.starts_with('/') {
        self.problem = Some(RouteTableError::InvalidPath(path));
        return self;
      }
    }
    self.routes.push(Route { path, component, loader });
    self
  }
}
