/* src/client/hydrate/rust/src/hydrator.rs */

use skogz_core::{
  BasePath, Component, DEFAULT_MOUNT_ID, QueryParams, RouteFingerprint, RouteTable, build_props,
};

use crate::error::HydrateError;
use crate::host::{HydrateEngine, HydrationHost};

/// Attaches the component for the current location to server-rendered markup.
pub struct Hydrator<'a, C> {
  routes: &'a RouteTable<C>,
  fingerprint: RouteFingerprint,
  base: BasePath,
  mount_id: String,
}

impl<'a, C: Component> Hydrator<'a, C> {
  pub fn new(routes: &'a RouteTable<C>) -> Self {
    Self {
      routes,
      fingerprint: routes.fingerprint(),
      base: BasePath::root(),
      mount_id: DEFAULT_MOUNT_ID.to_string(),
    }
  }

  /// Must match the server's base prefix.
  pub fn base(mut self, base: BasePath) -> Self {
    self.base = base;
    self
  }

  pub fn mount_id(mut self, id: impl Into<String>) -> Self {
    self.mount_id = id.into();
    self
  }

  pub fn fingerprint(&self) -> RouteFingerprint {
    self.fingerprint
  }

  /// Resolve the location, consume the embedded state and hand the matching
  /// component to `engine`.
  ///
  /// Fails fast when the document was rendered from a different route table.
  pub fn hydrate<H, E>(&self, host: &mut H, engine: &E) -> Result<E::Instance, HydrateError>
  where
    H: HydrationHost,
    E: HydrateEngine<C, H::Target>,
  {
    let pathname = host.pathname();
    let Some(path) = self.base.strip(&pathname) else {
      return Err(HydrateError::OutsideBase(pathname));
    };
    let query = QueryParams::parse(&host.search());
    let route = self.routes.resolve(&path);

    let state = host.take_state()?.ok_or(HydrateError::MissingState)?;
    match state.fingerprint {
      Some(server) if server != self.fingerprint => {
        return Err(HydrateError::RouteTableMismatch { server, client: self.fingerprint });
      }
      Some(_) => {}
      None => log::warn!("document carries no route fingerprint, skipping parity check"),
    }

    let target = host
      .mount_target(&self.mount_id)
      .ok_or_else(|| HydrateError::MissingMountNode(self.mount_id.clone()))?;
    let props = build_props(&query, &state.result);
    log::debug!("hydrating {} as {}", path, route.component().id());
    engine.hydrate(route.component(), target, props)
  }
}
