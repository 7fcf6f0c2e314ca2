/* src/client/hydrate/rust/src/lib.rs */

//! Client half of the skogz protocol. The hydrator reads the current
//! location, resolves it against the same route table the server used, takes
//! the embedded loader result exactly once and hands the matching component to
//! a hydrate engine. It never runs a loader.

mod document;
mod error;
mod host;
mod hydrator;

pub use document::DocumentHost;
pub use error::HydrateError;
pub use host::{HydrateEngine, HydrationHost};
pub use hydrator::Hydrator;

pub use skogz_core;
