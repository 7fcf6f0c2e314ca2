/* src/server/engine/rust/src/lib.rs */

pub mod escape;
pub mod page;
pub mod render;
pub mod template;

// Public API re-exports
pub use escape::escape_json_for_script;
pub use page::{assemble_page, state_script};
pub use render::{RenderEngine, RenderError, Rendered};
pub use template::{
  CompiledTemplate, HEAD_PLACEHOLDER, HTML_PLACEHOLDER, STATE_PLACEHOLDER, TemplateError,
};
