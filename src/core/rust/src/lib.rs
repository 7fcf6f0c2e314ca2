/* src/core/rust/src/lib.rs */

//! Shared half of the skogz render/hydrate protocol.
//!
//! Both the server entry and the client entry build their route table from the
//! same declarative source through this crate, resolve paths with the same
//! rule, and build component props with the same merge. Nothing here touches
//! the network, the filesystem or the DOM, so the crate compiles for `wasm32`.

pub mod component;
pub mod loader;
pub mod parity;
pub mod props;
pub mod request;
pub mod route;
pub mod state;

pub use component::Component;
pub use loader::{BoxFuture, LoaderError, LoaderFn, LoaderResult, loader_fn};
pub use parity::{ParityError, RouteFingerprint, check_parity, fnv1a_32};
pub use props::{Props, QUERY_PARAMS_PROP, build_props};
pub use request::{BasePath, QueryParams, RequestContext};
pub use route::{ERROR_KEY, Route, RouteTable, RouteTableBuilder, RouteTableError};
pub use state::{
  DEFAULT_MOUNT_ID, EmbeddedState, LOADER_RESULT_GLOBAL, ROUTE_FINGERPRINT_GLOBAL, StateParseError,
  parse_state_script,
};
