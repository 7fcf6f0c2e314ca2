/* demo/app/src/client.rs */

use serde_json::Value;
use skogz_core::{BasePath, Component, Props};
use skogz_hydrate::{HydrateEngine, HydrateError, Hydrator};
use skogz_hydrate_wasm::{hydrate_once, init_logging};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::components::{COUNTER_ATTR, Page};
use crate::routes::routes;

/// A hydrated page.
pub struct Mounted {
  pub page: Page,
}

/// Attaches behavior to the server markup; never re-renders it.
struct ClientEngine;

impl HydrateEngine<Page, Element> for ClientEngine {
  type Instance = Mounted;

  fn hydrate(&self, page: &Page, target: Element, props: Props) -> Result<Mounted, HydrateError> {
    if target.inner_html() != page.body(&props) {
      log::warn!("server markup for {} differs from the client render", page.id());
    }
    if *page == Page::Count {
      attach_counter(&target, &props)?;
    }
    Ok(Mounted { page: *page })
  }
}

fn attach_counter(root: &Element, props: &Props) -> Result<(), HydrateError> {
  let button = root
    .query_selector(&format!("[{COUNTER_ATTR}]"))
    .map_err(|_| HydrateError::engine("invalid counter selector"))?
    .ok_or_else(|| HydrateError::engine("counter button missing from server markup"))?;

  let mut count = props.get("value").and_then(Value::as_i64).unwrap_or(0);
  let label = button.clone();
  let on_click = Closure::<dyn FnMut()>::new(move || {
    count += 1;
    label.set_text_content(Some(&format!("count is {count}")));
  });
  button
    .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
    .map_err(|_| HydrateError::engine("could not attach click handler"))?;
  // Lives as long as the page.
  on_click.forget();
  Ok(())
}

/// Client entry, called once by the page's module script.
#[wasm_bindgen]
pub fn hydrate() -> Result<(), JsValue> {
  init_logging();
  let routes = routes().map_err(|e| JsValue::from_str(&e.to_string()))?;
  // Baked in at build time, must match the server's BASE.
  let base = BasePath::new(option_env!("BASE").unwrap_or("/"));
  let hydrator = Hydrator::new(&routes).base(base);

  let mounted =
    hydrate_once(&hydrator, &ClientEngine).map_err(|e| JsValue::from_str(&e.to_string()))?;
  log::info!("hydrated {}", mounted.page.id());
  Ok(())
}
