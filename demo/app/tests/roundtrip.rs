/* demo/app/tests/roundtrip.rs */

#![cfg(feature = "ssr")]

use skogz_core::{Component, Props, QueryParams};
use skogz_demo::components::{DemoEngine, Page};
use skogz_demo::routes::routes;
use skogz_hydrate::{DocumentHost, HydrateEngine, HydrateError, Hydrator};
use skogz_server::{Mode, ServerConfig, SkogzParts, SkogzServer};

/// Headless stand-in for the browser engine: checks the server markup
/// against a client-side render of the same props.
struct Verify;

impl HydrateEngine<Page, String> for Verify {
  type Instance = (Page, Props);

  fn hydrate(&self, page: &Page, markup: String, props: Props) -> Result<(Page, Props), HydrateError> {
    if markup != page.body(&props) {
      return Err(HydrateError::engine(format!("markup mismatch for {}", page.id())));
    }
    Ok((*page, props))
  }
}

fn server(dir: &std::path::Path) -> SkogzParts<Page, DemoEngine> {
  let template = std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/index.html")).unwrap();
  std::fs::create_dir_all(dir.join("dist/client")).unwrap();
  std::fs::write(dir.join("dist/client/index.html"), template).unwrap();
  let config =
    ServerConfig { root: dir.to_path_buf(), mode: Mode::Production, ..ServerConfig::default() };
  SkogzServer::new(routes().unwrap(), DemoEngine::default()).config(config).into_parts().unwrap()
}

async fn round_trip(url: &str) -> (Page, Props) {
  let dir = tempfile::tempdir().unwrap();
  let parts = server(dir.path());
  let (path, query) = url.split_once('?').unwrap_or((url, ""));
  let doc = parts.renderer.render(path, QueryParams::parse(query)).await.unwrap();

  let client_routes = routes().unwrap();
  let mut host = DocumentHost::new(url, doc.html);
  Hydrator::new(&client_routes).hydrate(&mut host, &Verify).unwrap()
}

#[tokio::test]
async fn every_page_hydrates_against_its_server_markup() {
  for url in ["/", "/pong", "/count", "/user?name=Ada", "/clock", "/missing"] {
    let (page, _) = round_trip(url).await;
    assert_eq!(page, *routes().unwrap().resolve(url.split('?').next().unwrap()).component());
  }
}

#[tokio::test]
async fn client_reuses_the_server_clock() {
  let dir = tempfile::tempdir().unwrap();
  let parts = server(dir.path());
  let doc = parts.renderer.render("/clock", QueryParams::default()).await.unwrap();
  let server_value = doc.result.as_value()["renderedAt"].clone();

  tokio::time::sleep(std::time::Duration::from_millis(5)).await;

  let client_routes = routes().unwrap();
  let mut host = DocumentHost::new("/clock", doc.html);
  let (page, props) = Hydrator::new(&client_routes).hydrate(&mut host, &Verify).unwrap();
  assert_eq!(page, Page::Clock);
  assert_eq!(props["renderedAt"], server_value);
}

#[tokio::test]
async fn counter_starts_at_loader_value() {
  let (page, props) = round_trip("/count").await;
  assert_eq!(page, Page::Count);
  assert_eq!(props["value"], 42);
}

#[tokio::test]
async fn query_text_resembling_the_state_assignment() {
  let (page, props) = round_trip("/user?name=window.__skogzLoaderResult%20%3D%20").await;
  assert_eq!(page, Page::User);
  assert_eq!(props["queryParams"]["name"], "window.__skogzLoaderResult = ");
}
