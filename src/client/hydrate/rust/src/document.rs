/* src/client/hydrate/rust/src/document.rs */

use skogz_core::{EmbeddedState, parse_state_script};

use crate::error::HydrateError;
use crate::host::HydrationHost;

/// Host over a rendered HTML string, for hydrating outside a browser (tests,
/// prerender checks). The mount target is the node's inner markup.
#[derive(Debug, Clone)]
pub struct DocumentHost {
  pathname: String,
  search: String,
  html: String,
  state_taken: bool,
}

impl DocumentHost {
  /// `url` is the request target, e.g. `/user?name=Ada`.
  pub fn new(url: &str, html: impl Into<String>) -> Self {
    let (pathname, search) = url.split_once('?').unwrap_or((url, ""));
    Self {
      pathname: pathname.to_string(),
      search: search.to_string(),
      html: html.into(),
      state_taken: false,
    }
  }

  pub fn html(&self) -> &str {
    &self.html
  }
}

impl HydrationHost for DocumentHost {
  type Target = String;

  fn pathname(&self) -> String {
    self.pathname.clone()
  }

  fn search(&self) -> String {
    self.search.clone()
  }

  fn take_state(&mut self) -> Result<Option<EmbeddedState>, HydrateError> {
    if self.state_taken {
      return Ok(None);
    }
    self.state_taken = true;
    parse_state_script(&self.html).map_err(|e| HydrateError::MalformedState(e.to_string()))
  }

  fn mount_target(&self, id: &str) -> Option<String> {
    inner_markup(&self.html, id).map(str::to_string)
  }
}

/// Inner markup of the element carrying `id`, nested same-name tags included.
fn inner_markup<'a>(html: &'a str, id: &str) -> Option<&'a str> {
  let needle = format!("id=\"{id}\"");
  // `data-id="app"` also contains the needle; a real attribute follows whitespace.
  let attr_at = html
    .match_indices(&needle)
    .map(|(at, _)| at)
    .find(|&at| html[..at].ends_with(|c: char| c.is_ascii_whitespace()))?;
  let open_at = html[..attr_at].rfind('<')?;
  let tag: String =
    html[open_at + 1..].chars().take_while(char::is_ascii_alphanumeric).collect();
  if tag.is_empty() {
    return None;
  }
  let content_start = attr_at + html[attr_at..].find('>')? + 1;

  let open_tag = format!("<{tag}");
  let close_tag = format!("</{tag}>");
  let mut depth = 1usize;
  let mut cursor = content_start;
  loop {
    let rest = &html[cursor..];
    let next_close = rest.find(&close_tag)?;
    match rest.find(&open_tag) {
      Some(next_open) if next_open < next_close => {
        depth += 1;
        cursor += next_open + open_tag.len();
      }
      _ => {
        depth -= 1;
        if depth == 0 {
          return Some(&html[content_start..cursor + next_close]);
        }
        cursor += next_close + close_tag.len();
      }
    }
  }
}
