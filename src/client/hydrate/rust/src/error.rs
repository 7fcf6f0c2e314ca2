/* src/client/hydrate/rust/src/error.rs */

use skogz_core::RouteFingerprint;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HydrateError {
  #[error("document carries no embedded loader result")]
  MissingState,
  #[error("embedded state is malformed: {0}")]
  MalformedState(String),
  #[error("mount node #{0} not found")]
  MissingMountNode(String),
  #[error("route table mismatch: server {server}, client {client}")]
  RouteTableMismatch { server: RouteFingerprint, client: RouteFingerprint },
  #[error("location {0:?} is outside the configured base prefix")]
  OutsideBase(String),
  #[error("hydrate engine failed: {0}")]
  Engine(String),
  #[error("page already hydrated")]
  AlreadyHydrated,
  #[error("no browser window available")]
  NotInBrowser,
}

impl HydrateError {
  pub fn engine(msg: impl Into<String>) -> Self {
    Self::Engine(msg.into())
  }
}
