/* src/core/rust/src/component.rs */

/// A component reference as stored in a route table.
///
/// The rendering engine decides what a component actually is; this crate only
/// needs a stable identity so that two independently built tables can be
/// compared. The id must be the same string in the server and client builds.
pub trait Component: Send + Sync {
  fn id(&self) -> &str;
}

impl Component for &'static str {
  fn id(&self) -> &str {
    self
  }
}

impl Component for String {
  fn id(&self) -> &str {
    self
  }
}
