/* demo/app/src/routes.rs */

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{Value, json};
use skogz_core::{LoaderError, RouteTable, RouteTableError};

use crate::components::Page;

/// The one route table. Any change here reaches the server and the client
/// together.
pub fn routes() -> Result<RouteTable<Page>, RouteTableError> {
  RouteTable::builder()
    .route("/", Page::Root)
    .route("/pong", Page::Pong)
    .route_with_loader("/count", Page::Count, count)
    .route("/user", Page::User)
    .route_with_loader("/clock", Page::Clock, clock)
    .error(Page::NotFound)
    .build()
}

async fn count() -> Result<Value, LoaderError> {
  Ok(json!({ "value": 42 }))
}

/// Different on every request; the client must reuse the server's value.
async fn clock() -> Result<Value, LoaderError> {
  let now = SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map_err(|e| LoaderError::failed(e.to_string()))?;
  Ok(json!({ "renderedAt": now.as_millis().to_string() }))
}
