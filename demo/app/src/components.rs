/* demo/app/src/components.rs */

use serde_json::Value;
use skogz_core::{Component, Props, QUERY_PARAMS_PROP};

/// Marks the counter button the client attaches its click handler to.
pub const COUNTER_ATTR: &str = "data-skogz-counter";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
  Root,
  Pong,
  Count,
  User,
  Clock,
  NotFound,
}

impl Component for Page {
  fn id(&self) -> &str {
    match self {
      Self::Root => "Root",
      Self::Pong => "Pong",
      Self::Count => "Count",
      Self::User => "User",
      Self::Clock => "Clock",
      Self::NotFound => "NotFound",
    }
  }
}

impl Page {
  pub fn title(self) -> &'static str {
    match self {
      Self::Root => "skogz",
      Self::Pong => "pong",
      Self::Count => "counter",
      Self::User => "user",
      Self::Clock => "clock",
      Self::NotFound => "not found",
    }
  }

  pub fn head(self) -> String {
    format!("<title>{}</title>", self.title())
  }

  /// Static markup for this page. The client recomputes it to check the
  /// server markup before attaching behavior.
  pub fn body(self, props: &Props) -> String {
    match self {
      Self::Root => {
        "<main><h1>skogz</h1><p>Rendered on the server, hydrated in the browser.</p></main>"
          .to_string()
      }
      Self::Pong => "<main><p>pong</p></main>".to_string(),
      Self::Count => {
        let value = props.get("value").and_then(Value::as_i64).unwrap_or(0);
        format!("<main><button type=\"button\" {COUNTER_ATTR}>count is {value}</button></main>")
      }
      Self::User => {
        let name = props
          .get(QUERY_PARAMS_PROP)
          .and_then(|q| q.get("name"))
          .and_then(Value::as_str)
          .unwrap_or("stranger");
        format!("<main><p>Hello, {}!</p></main>", escape_html(name))
      }
      Self::Clock => {
        let at = props.get("renderedAt").and_then(Value::as_str).unwrap_or("unknown");
        format!("<main><p>Rendered at <time>{}</time></p></main>", escape_html(at))
      }
      Self::NotFound => "<main><h1>Not found</h1></main>".to_string(),
    }
  }
}

pub fn escape_html(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for c in text.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(c),
    }
  }
  out
}

#[cfg(feature = "ssr")]
pub use server::DemoEngine;

#[cfg(feature = "ssr")]
mod server {
  use skogz_core::{BasePath, Props};
  use skogz_engine::{RenderEngine, RenderError, Rendered};

  use super::Page;

  /// String renderer for [`Page`]. The head also carries the client
  /// bootstrap, with the bundle path under the server's base prefix.
  #[derive(Debug, Clone)]
  pub struct DemoEngine {
    bootstrap: String,
  }

  impl DemoEngine {
    pub fn new(base: &BasePath) -> Self {
      let prefix = if base.is_root() { "" } else { base.as_str() };
      let bootstrap = format!(
        "<script type=\"module\">import init, {{ hydrate }} from \"{prefix}/pkg/skogz_demo.js\";await init();hydrate();</script>"
      );
      Self { bootstrap }
    }
  }

  impl Default for DemoEngine {
    fn default() -> Self {
      Self::new(&BasePath::root())
    }
  }

  impl RenderEngine<Page> for DemoEngine {
    fn render(&self, page: &Page, props: &Props) -> Result<Rendered, RenderError> {
      Ok(Rendered { head: format!("{}{}", page.head(), self.bootstrap), body: page.body(props) })
    }
  }

}
