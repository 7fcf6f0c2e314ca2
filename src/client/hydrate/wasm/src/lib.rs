/* src/client/hydrate/wasm/src/lib.rs */

use std::sync::atomic::{AtomicBool, Ordering};

use js_sys::{JSON, Reflect};
use skogz_hydrate::skogz_core::{
  Component, EmbeddedState, LOADER_RESULT_GLOBAL, LoaderResult, ROUTE_FINGERPRINT_GLOBAL,
  RouteFingerprint,
};
use skogz_hydrate::{HydrateEngine, HydrateError, HydrationHost, Hydrator};
use wasm_bindgen::JsValue;
use web_sys::{Element, Window};

pub use skogz_hydrate;

static HYDRATED: AtomicBool = AtomicBool::new(false);

/// Route panics and `log` records to the browser console.
pub fn init_logging() {
  console_error_panic_hook::set_once();
  // Already initialized when a second entry point calls this.
  let _ = console_log::init_with_level(log::Level::Debug);
}

/// Hydrate the current page. Only the first call per page does anything.
pub fn hydrate_once<C, E>(hydrator: &Hydrator<'_, C>, engine: &E) -> Result<E::Instance, HydrateError>
where
  C: Component,
  E: HydrateEngine<C, Element>,
{
  let mut host = claim(&HYDRATED, BrowserHost::new)?;
  let instance = hydrator.hydrate(&mut host, engine);
  if let Err(err) = &instance {
    log::error!("hydration failed: {err}");
  }
  instance
}

/// Build the host, then take the flag. A host that cannot be built leaves
/// the flag untouched so a later call can still hydrate.
fn claim<H>(
  flag: &AtomicBool,
  host: impl FnOnce() -> Result<H, HydrateError>,
) -> Result<H, HydrateError> {
  if flag.load(Ordering::SeqCst) {
    return Err(HydrateError::AlreadyHydrated);
  }
  let host = host()?;
  if flag.swap(true, Ordering::SeqCst) {
    return Err(HydrateError::AlreadyHydrated);
  }
  Ok(host)
}

/// The live page: `window.location`, the state globals and the DOM.
pub struct BrowserHost {
  window: Window,
}

impl BrowserHost {
  pub fn new() -> Result<Self, HydrateError> {
    web_sys::window().map(|window| Self { window }).ok_or(HydrateError::NotInBrowser)
  }

  fn global(&self, name: &str) -> Result<JsValue, HydrateError> {
    Reflect::get(&self.window, &JsValue::from_str(name)).map_err(|e| malformed(&e))
  }

  fn clear_global(&self, name: &str) {
    if Reflect::delete_property(&self.window, &JsValue::from_str(name)).is_err() {
      log::warn!("could not clear window.{name}");
    }
  }
}

impl HydrationHost for BrowserHost {
  type Target = Element;

  fn pathname(&self) -> String {
    self.window.location().pathname().unwrap_or_else(|_| "/".to_string())
  }

  fn search(&self) -> String {
    self.window.location().search().unwrap_or_default()
  }

  fn take_state(&mut self) -> Result<Option<EmbeddedState>, HydrateError> {
    let result = self.global(LOADER_RESULT_GLOBAL)?;
    let fingerprint = self.global(ROUTE_FINGERPRINT_GLOBAL)?;
    self.clear_global(LOADER_RESULT_GLOBAL);
    self.clear_global(ROUTE_FINGERPRINT_GLOBAL);

    if result.is_undefined() {
      return Ok(None);
    }
    let json = JSON::stringify(&result).map_err(|e| malformed(&e))?;
    decode_state(&String::from(json), fingerprint.as_string().as_deref()).map(Some)
  }

  fn mount_target(&self, id: &str) -> Option<Element> {
    self.window.document()?.get_element_by_id(id)
  }
}

/// Turn the raw global values into typed state.
fn decode_state(result_json: &str, fingerprint: Option<&str>) -> Result<EmbeddedState, HydrateError> {
  let value: serde_json::Value =
    serde_json::from_str(result_json).map_err(|e| HydrateError::MalformedState(e.to_string()))?;
  let fingerprint = fingerprint
    .map(str::parse::<RouteFingerprint>)
    .transpose()
    .map_err(|e| HydrateError::MalformedState(e.to_string()))?;
  Ok(EmbeddedState { result: LoaderResult::new(value), fingerprint })
}

fn malformed(err: &JsValue) -> HydrateError {
  HydrateError::MalformedState(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn decodes_result_and_fingerprint() {
    let state = decode_state(r#"{"value":42}"#, Some("0000abcd")).unwrap();
    assert_eq!(state.result.as_value(), &json!({"value": 42}));
    assert_eq!(state.fingerprint, Some(RouteFingerprint::from_raw(0xabcd)));
  }

  #[test]
  fn fingerprint_is_optional() {
    let state = decode_state("null", None).unwrap();
    assert!(state.result.is_empty());
    assert_eq!(state.fingerprint, None);
  }

  #[test]
  fn failed_host_does_not_consume_the_flag() {
    let flag = AtomicBool::new(false);

    let missing = claim(&flag, || Err::<(), _>(HydrateError::NotInBrowser));
    assert_eq!(missing, Err(HydrateError::NotInBrowser));
    assert!(!flag.load(Ordering::SeqCst));

    assert_eq!(claim(&flag, || Ok(1)), Ok(1));
    assert_eq!(claim(&flag, || Ok(2)), Err(HydrateError::AlreadyHydrated));
  }

  #[test]
  fn rejects_malformed_values() {
    assert!(matches!(decode_state("{", None), Err(HydrateError::MalformedState(_))));
    assert!(matches!(decode_state("{}", Some("xyz")), Err(HydrateError::MalformedState(_))));
  }
}
