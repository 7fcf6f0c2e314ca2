/* demo/app/src/lib.rs */

//! Both entry points build their table from [`routes::routes`]: the server
//! binary with the `ssr` feature (default), the wasm module with
//! `--no-default-features --features hydrate`.

pub mod components;
pub mod routes;

#[cfg(feature = "hydrate")]
mod client;

#[cfg(feature = "hydrate")]
pub use client::hydrate;
