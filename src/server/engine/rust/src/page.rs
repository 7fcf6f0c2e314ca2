/* src/server/engine/rust/src/page.rs */

use skogz_core::{LOADER_RESULT_GLOBAL, LoaderResult, ROUTE_FINGERPRINT_GLOBAL, RouteFingerprint};

use crate::escape::escape_json_for_script;
use crate::render::Rendered;
use crate::template::CompiledTemplate;

/// `<script>` tag assigning the loader result and the route table fingerprint
/// to their well-known globals.
pub fn state_script(result: &LoaderResult, fingerprint: RouteFingerprint) -> String {
  let json = escape_json_for_script(&result.as_value().to_string());
  format!(
    "<script>window.{LOADER_RESULT_GLOBAL} = {json};window.{ROUTE_FINGERPRINT_GLOBAL} = \"{fingerprint}\";</script>"
  )
}

/// Assemble the final document from a template, the rendered fragments and
/// the loader result.
pub fn assemble_page(
  template: &CompiledTemplate,
  rendered: &Rendered,
  result: &LoaderResult,
  fingerprint: RouteFingerprint,
) -> String {
  template.assemble(&rendered.head, &rendered.body, &state_script(result, fingerprint))
}
