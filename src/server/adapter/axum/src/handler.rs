/* src/server/adapter/axum/src/handler.rs */

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::extract::{OriginalUri, State};
use axum::response::Html;
use skogz_server::skogz_core::{Component, QueryParams};
use skogz_server::skogz_engine::RenderEngine;
use skogz_server::{Mode, ServerRenderer, SkogzError};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::AxumError;

pub(crate) struct AppState<C, E> {
  pub renderer: Arc<ServerRenderer<C, E>>,
  pub mode: Mode,
}

/// Static assets first; anything the asset directory does not hold is
/// rendered as a page.
pub(crate) fn build_router<C, E>(
  renderer: Arc<ServerRenderer<C, E>>,
  mode: Mode,
  static_dir: &Path,
) -> Router
where
  C: Component + 'static,
  E: RenderEngine<C> + 'static,
{
  let base = renderer.base().clone();
  let state = Arc::new(AppState { renderer, mode });
  let pages = Router::new().fallback(render_page::<C, E>).with_state(state);

  let assets = ServeDir::new(static_dir)
    .append_index_html_on_directories(false)
    .call_fallback_on_method_not_allowed(true)
    .fallback(pages.clone());

  // Outside a non-root base, requests still reach the renderer, which answers 404.
  let router = if base.is_root() {
    Router::new().fallback_service(assets)
  } else {
    Router::new().nest_service(base.as_str(), assets).fallback_service(pages)
  };

  let router = router.layer(TraceLayer::new_for_http());
  if mode.is_production() { router.layer(CompressionLayer::new()) } else { router }
}

async fn render_page<C, E>(
  State(state): State<Arc<AppState<C, E>>>,
  OriginalUri(uri): OriginalUri,
) -> Result<Html<String>, AxumError>
where
  C: Component + 'static,
  E: RenderEngine<C> + 'static,
{
  let path = uri.path().to_string();
  let query = QueryParams::parse(uri.query().unwrap_or(""));
  let mode = state.mode;

  // Own task per render: a panicking engine fails this request only.
  let renderer = state.renderer.clone();
  let task_path = path.clone();
  let outcome = tokio::spawn(async move { renderer.render(&task_path, query).await })
    .await
    .map_err(|e| SkogzError::Task(e.to_string()))
    .and_then(|result| result);

  match outcome {
    Ok(doc) => Ok(Html(doc.html)),
    Err(err) => {
      if err.status() == 404 {
        tracing::debug!(%path, "request outside base");
      } else {
        tracing::error!(%path, error = %err.diagnostic(Mode::Development), "page render failed");
      }
      Err(AxumError(err, mode))
    }
  }
}
