/* src/server/adapter/axum/src/lib.rs */

mod error;
mod handler;

use skogz_server::SkogzServer;
use skogz_server::skogz_core::Component;
use skogz_server::skogz_engine::RenderEngine;

pub use error::ServeError;
/// Re-export skogz-server core for convenience
pub use skogz_server;

/// Extension trait that converts a `SkogzServer` into an Axum router.
pub trait IntoAxumRouter {
  fn into_axum_router(self) -> Result<axum::Router, skogz_server::SkogzError>;
  fn serve(self) -> impl std::future::Future<Output = Result<(), ServeError>> + Send;
}

impl<C, E> IntoAxumRouter for SkogzServer<C, E>
where
  C: Component + 'static,
  E: RenderEngine<C> + 'static,
{
  fn into_axum_router(self) -> Result<axum::Router, skogz_server::SkogzError> {
    let parts = self.into_parts()?;
    Ok(handler::build_router(parts.renderer, parts.config.mode, &parts.config.static_dir()))
  }

  async fn serve(self) -> Result<(), ServeError> {
    let addr = self.server_config().addr();
    let base = self.server_config().base.clone();
    let router = self.into_axum_router()?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, %base, "skogz server listening");
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;
    tracing::info!("skogz server stopped");
    Ok(())
  }
}

async fn shutdown_signal() {
  if let Err(err) = tokio::signal::ctrl_c().await {
    tracing::warn!(error = %err, "failed to install Ctrl+C handler");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests;
