/* src/client/hydrate/rust/src/host.rs */

use skogz_core::{EmbeddedState, Props};

use crate::error::HydrateError;

/// The environment a page is hydrated in: current location, the embedded
/// state slot and the DOM.
pub trait HydrationHost {
  /// Handle to the element the component attaches to.
  type Target;

  /// Current path, base prefix included.
  fn pathname(&self) -> String;

  /// Raw query string, with or without the leading `?`.
  fn search(&self) -> String;

  /// Read the embedded state and clear its slot. A second call yields `None`.
  fn take_state(&mut self) -> Result<Option<EmbeddedState>, HydrateError>;

  fn mount_target(&self, id: &str) -> Option<Self::Target>;
}

/// Client half of the UI rendering engine: attaches behavior to existing
/// markup instead of producing it.
pub trait HydrateEngine<C, T> {
  type Instance;

  fn hydrate(&self, component: &C, target: T, props: Props) -> Result<Self::Instance, HydrateError>;
}
