/* src/core/rust/src/state.rs */

//! Embedded-state transport: the server writes one value into a well-known
//! global, the client reads it once at startup.

use crate::loader::LoaderResult;
use crate::parity::RouteFingerprint;

/// Global the loader result is assigned to.
pub const LOADER_RESULT_GLOBAL: &str = "__skogzLoaderResult";
/// Global carrying the server's route table fingerprint.
pub const ROUTE_FINGERPRINT_GLOBAL: &str = "__skogzRoutes";
/// Element id the client hydrates into.
pub const DEFAULT_MOUNT_ID: &str = "app";

/// What the server hands to the client alongside the markup.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedState {
  pub result: LoaderResult,
  pub fingerprint: Option<RouteFingerprint>,
}

#[derive(Debug, thiserror::Error)]
pub enum StateParseError {
  #[error("embedded loader result is not valid JSON: {0}")]
  Json(#[from] serde_json::Error),
  #[error("embedded route fingerprint is malformed: {0:?}")]
  Fingerprint(String),
}

/// Read the embedded state back out of a rendered document.
///
/// Returns `Ok(None)` when the document carries no state script. Used by
/// headless hosts and tests; browsers read the globals directly.
pub fn parse_state_script(html: &str) -> Result<Option<EmbeddedState>, StateParseError> {
  // Page text cannot contain `<script>` unescaped, and the state slot follows
  // the body, so the last full opener is the real one.
  let marker = format!("<script>window.{LOADER_RESULT_GLOBAL} = ");
  let Some(start) = html.rfind(&marker) else {
    return Ok(None);
  };
  let rest = &html[start + marker.len()..];
  // `<` never appears unescaped inside the payload, so the first closing tag
  // ends the script.
  let body = rest.find("</script>").map_or(rest, |end| &rest[..end]);
  let body = body.trim_end().trim_end_matches(';');

  let fp_marker = format!(";window.{ROUTE_FINGERPRINT_GLOBAL} = ");
  let (json, fingerprint) = match body.rsplit_once(&fp_marker) {
    Some((json, tail)) => {
      let raw = tail.trim().trim_matches('"');
      let fingerprint = raw.parse().map_err(|_| StateParseError::Fingerprint(raw.to_string()))?;
      (json, Some(fingerprint))
    }
    None => (body, None),
  };

  let value: serde_json::Value = serde_json::from_str(json.trim())?;
  Ok(Some(EmbeddedState { result: LoaderResult::new(value), fingerprint }))
}
