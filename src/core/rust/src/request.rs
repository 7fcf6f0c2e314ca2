/* src/core/rust/src/request.rs */

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::route::{Route, RouteTable};

/// Normalized base prefix the app is mounted under: `/` or `/segment[/...]`
/// without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePath(String);

impl BasePath {
  pub fn new(raw: &str) -> Self {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() { Self::root() } else { Self(format!("/{trimmed}")) }
  }

  pub fn root() -> Self {
    Self("/".to_string())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn is_root(&self) -> bool {
    self.0 == "/"
  }

  /// Strip the prefix from a request path. `None` when the path lies outside
  /// the base; an empty remainder resolves to `/`.
  pub fn strip(&self, path: &str) -> Option<String> {
    if self.is_root() {
      return Some(if path.is_empty() { "/".to_string() } else { path.to_string() });
    }
    let rest = path.strip_prefix(self.0.as_str())?;
    if rest.is_empty() {
      Some("/".to_string())
    } else if rest.starts_with('/') {
      Some(rest.to_string())
    } else {
      None
    }
  }
}

impl Default for BasePath {
  fn default() -> Self {
    Self::root()
  }
}

impl fmt::Display for BasePath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Query string as a string -> string mapping. Repeated keys keep the last
/// value. Serialized as a JSON object with keys in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
  /// Parse `a=1&b=two` (leading `?` allowed) with form-urlencoded rules.
  pub fn parse(raw: &str) -> Self {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    url::form_urlencoded::parse(raw.as_bytes()).into_owned().collect()
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.0.get(key).map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  pub fn to_json(&self) -> serde_json::Value {
    serde_json::Value::Object(
      self.0.iter().map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone()))).collect(),
    )
  }
}

impl FromIterator<(String, String)> for QueryParams {
  fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}

/// Per-request view: path with the base stripped, parsed query, and the route
/// it resolved to. Built the same way on both sides.
pub struct RequestContext<'a, C> {
  pub path: String,
  pub query: QueryParams,
  pub route: &'a Route<C>,
}

impl<'a, C> RequestContext<'a, C> {
  /// `None` when `raw_path` lies outside `base`.
  pub fn new(
    table: &'a RouteTable<C>,
    base: &BasePath,
    raw_path: &str,
    query: QueryParams,
  ) -> Option<Self> {
    let path = base.strip(raw_path)?;
    let route = table.resolve(&path);
    Some(Self { path, query, route })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn base_normalization() {
    assert_eq!(BasePath::new("/").as_str(), "/");
    assert_eq!(BasePath::new("").as_str(), "/");
    assert_eq!(BasePath::new("app").as_str(), "/app");
    assert_eq!(BasePath::new("/app/").as_str(), "/app");
    assert_eq!(BasePath::new(" /nested/app/ ").as_str(), "/nested/app");
  }

  #[test]
  fn root_base_passes_paths_through() {
    let base = BasePath::root();
    assert_eq!(base.strip("/count").as_deref(), Some("/count"));
    assert_eq!(base.strip("/").as_deref(), Some("/"));
    assert_eq!(base.strip("").as_deref(), Some("/"));
  }

  #[test]
  fn bare_base_resolves_to_root() {
    let base = BasePath::new("/app/");
    assert_eq!(base.strip("/app").as_deref(), Some("/"));
    assert_eq!(base.strip("/app/").as_deref(), Some("/"));
  }

  #[test]
  fn base_is_stripped() {
    let base = BasePath::new("/app");
    assert_eq!(base.strip("/app/count").as_deref(), Some("/count"));
    assert_eq!(base.strip("/app/a/b").as_deref(), Some("/a/b"));
  }

  #[test]
  fn paths_outside_base() {
    let base = BasePath::new("/app");
    assert_eq!(base.strip("/"), None);
    assert_eq!(base.strip("/application"), None);
    assert_eq!(base.strip("/other/app"), None);
  }

  #[test]
  fn query_parsing() {
    let q = QueryParams::parse("name=Ada&lang=en");
    assert_eq!(q.get("name"), Some("Ada"));
    assert_eq!(q.get("lang"), Some("en"));
    assert_eq!(q.len(), 2);
  }

  #[test]
  fn query_decoding_and_leading_question_mark() {
    let q = QueryParams::parse("?greeting=hello+world&sym=%26%3D&flag");
    assert_eq!(q.get("greeting"), Some("hello world"));
    assert_eq!(q.get("sym"), Some("&="));
    assert_eq!(q.get("flag"), Some(""));
  }

  #[test]
  fn repeated_query_keys_keep_last() {
    assert_eq!(QueryParams::parse("a=1&a=2").get("a"), Some("2"));
  }

  #[test]
  fn empty_query() {
    assert!(QueryParams::parse("").is_empty());
    assert!(QueryParams::parse("?").is_empty());
    assert_eq!(QueryParams::parse("").to_json(), serde_json::json!({}));
  }

  #[test]
  fn query_to_json() {
    let q = QueryParams::parse("name=Ada");
    assert_eq!(q.to_json(), serde_json::json!({"name": "Ada"}));
    assert_eq!(serde_json::to_value(&q).unwrap(), q.to_json());
  }

  #[test]
  fn context_resolution() {
    let table = RouteTable::builder().route("/", "root").route("/user", "user").error("error").build().unwrap();
    let base = BasePath::new("/app");

    let ctx = RequestContext::new(&table, &base, "/app", QueryParams::default()).unwrap();
    assert_eq!(ctx.path, "/");
    assert_eq!(*ctx.route.component(), "root");

    let ctx = RequestContext::new(&table, &base, "/app/user", QueryParams::parse("name=Ada")).unwrap();
    assert_eq!(*ctx.route.component(), "user");
    assert_eq!(ctx.query.get("name"), Some("Ada"));

    let ctx = RequestContext::new(&table, &base, "/app/nope", QueryParams::default()).unwrap();
    assert!(ctx.route.is_error());

    assert!(RequestContext::new(&table, &base, "/elsewhere", QueryParams::default()).is_none());
  }
}
