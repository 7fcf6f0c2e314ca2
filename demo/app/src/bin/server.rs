/* demo/app/src/bin/server.rs */

use anyhow::Context;
use skogz_demo::components::DemoEngine;
use skogz_demo::routes::routes;
use skogz_server::{ServerConfig, SkogzServer};
use skogz_server_axum::IntoAxumRouter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "skogz_server=info,skogz_server_axum=info,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let config = ServerConfig::discover().context("loading server configuration")?;
  let routes = routes().context("building route table")?;

  SkogzServer::new(routes, DemoEngine::new(&config.base))
    .config(config)
    .on_loader_failure(|path, err| tracing::error!(%path, error = %err, "loader failed"))
    .serve()
    .await
    .context("serving")?;
  Ok(())
}
