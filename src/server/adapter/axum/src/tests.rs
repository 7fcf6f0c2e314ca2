/* src/server/adapter/axum/src/tests.rs */

use std::path::Path;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use skogz_server::skogz_core::{Props, RouteTable, parse_state_script};
use skogz_server::skogz_engine::{RenderError, Rendered};
use skogz_server::{Mode, ServerConfig};
use tower::ServiceExt;

use super::*;

const DOC: &str = "<html><head><!--app-head--></head><body><div id=\"app\"><!--app-html--></div><!--skogz-loader-result--></body></html>";

struct TagEngine;

impl RenderEngine<&'static str> for TagEngine {
  fn render(&self, component: &&'static str, props: &Props) -> Result<Rendered, RenderError> {
    if *component == "Panics" {
      panic!("engine bug");
    }
    Ok(Rendered {
      head: String::new(),
      body: format!("<{component}>{}</{component}>", serde_json::Value::Object(props.clone())),
    })
  }
}

fn routes() -> RouteTable<&'static str> {
  RouteTable::builder()
    .route("/", "Home")
    .route_with_loader("/count", "Count", || async { Ok(json!({"value": 42})) })
    .route("/user", "User")
    .route("/panics", "Panics")
    .error("NotFound")
    .build()
    .unwrap()
}

fn project(root: &Path, base: &str) -> ServerConfig {
  std::fs::write(root.join("index.html"), DOC).unwrap();
  std::fs::create_dir_all(root.join("public")).unwrap();
  std::fs::write(root.join("public/robots.txt"), "User-agent: *").unwrap();
  ServerConfig {
    root: root.to_path_buf(),
    mode: Mode::Development,
    base: skogz_server::skogz_core::BasePath::new(base),
    ..ServerConfig::default()
  }
}

async fn get(router: &axum::Router, uri: &str) -> (StatusCode, String) {
  let response =
    router.clone().oneshot(Request::get(uri).body(Body::empty()).unwrap()).await.unwrap();
  let status = response.status();
  let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
  (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn router(root: &Path, base: &str) -> axum::Router {
  SkogzServer::new(routes(), TagEngine).config(project(root, base)).into_axum_router().unwrap()
}

#[tokio::test]
async fn serves_rendered_pages() {
  let dir = tempfile::tempdir().unwrap();
  let router = router(dir.path(), "/");

  let (status, body) = get(&router, "/count").await;
  assert_eq!(status, StatusCode::OK);
  assert!(body.contains("<Count>{\"queryParams\":{},\"value\":42}</Count>"));
  let state = parse_state_script(&body).unwrap().unwrap();
  assert_eq!(state.result.as_value(), &json!({"value": 42}));
}

#[tokio::test]
async fn unknown_paths_render_the_error_page() {
  let dir = tempfile::tempdir().unwrap();
  let router = router(dir.path(), "/");

  let (status, body) = get(&router, "/does-not-exist").await;
  assert_eq!(status, StatusCode::OK);
  assert!(body.contains("<NotFound>"));
}

#[tokio::test]
async fn query_string_becomes_props() {
  let dir = tempfile::tempdir().unwrap();
  let router = router(dir.path(), "/");

  let (_, body) = get(&router, "/user?name=Ada&name=Grace").await;
  assert!(body.contains("<User>{\"queryParams\":{\"name\":\"Grace\"}}</User>"));
}

#[tokio::test]
async fn static_assets_take_precedence() {
  let dir = tempfile::tempdir().unwrap();
  let router = router(dir.path(), "/");

  let (status, body) = get(&router, "/robots.txt").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, "User-agent: *");
}

#[tokio::test]
async fn base_prefix_scopes_pages_and_assets() {
  let dir = tempfile::tempdir().unwrap();
  let router = router(dir.path(), "/app");

  let (status, body) = get(&router, "/app/count").await;
  assert_eq!(status, StatusCode::OK);
  assert!(body.contains("<Count>"));

  let (status, body) = get(&router, "/app/robots.txt").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, "User-agent: *");

  let (status, _) = get(&router, "/other").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn engine_panic_is_a_500_with_diagnostics() {
  let dir = tempfile::tempdir().unwrap();
  let router = router(dir.path(), "/");

  let (status, body) = get(&router, "/panics").await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert!(body.starts_with("render task aborted"));

  // The server keeps serving afterwards.
  let (status, _) = get(&router, "/").await;
  assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn missing_dev_template_is_a_500() {
  let dir = tempfile::tempdir().unwrap();
  let router = router(dir.path(), "/");
  std::fs::remove_file(dir.path().join("index.html")).unwrap();

  let (status, body) = get(&router, "/").await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert!(body.contains("failed to read template"));
  assert!(body.contains("caused by"));
}
