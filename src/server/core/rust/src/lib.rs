/* src/server/core/rust/src/lib.rs */

pub mod config;
pub mod errors;
pub mod loader;
pub mod renderer;
pub mod server;
pub mod template;

// Re-exports for ergonomic use
pub use config::{CONFIG_FILE, ConfigError, Mode, ServerConfig, find_config};
pub use errors::SkogzError;
pub use loader::{LoaderExecutor, LoaderFailureHook, LoaderPolicy};
pub use renderer::{Document, ServerRenderer};
pub use server::{SkogzParts, SkogzServer};
pub use template::{IdentityTransform, TemplateSource, TemplateTransform};

pub use skogz_core;
pub use skogz_engine;
