/* src/core/rust/src/props.rs */

use crate::loader::LoaderResult;
use crate::request::QueryParams;

/// Prop name under which the parsed query string is passed.
pub const QUERY_PARAMS_PROP: &str = "queryParams";

pub type Props = serde_json::Map<String, serde_json::Value>;

/// Merge the query string and a loader result into component props.
///
/// Top-level keys of an object result are spread first, then `queryParams` is
/// written, so a loader can never shadow it. Non-object results add no keys.
pub fn build_props(query: &QueryParams, result: &LoaderResult) -> Props {
  let mut props = match result.as_value() {
    serde_json::Value::Object(map) => map.clone(),
    _ => Props::new(),
  };
  props.insert(QUERY_PARAMS_PROP.to_string(), query.to_json());
  props
}
