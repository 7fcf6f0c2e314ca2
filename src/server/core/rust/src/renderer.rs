/* src/server/core/rust/src/renderer.rs */

use std::sync::Arc;

use skogz_core::{
  BasePath, Component, LoaderResult, QueryParams, RequestContext, RouteFingerprint, RouteTable,
  build_props,
};
use skogz_engine::{RenderEngine, assemble_page};

use crate::errors::SkogzError;
use crate::loader::LoaderExecutor;
use crate::template::TemplateSource;

/// A fully assembled page.
#[derive(Debug, Clone)]
pub struct Document {
  pub html: String,
  /// Table path that matched, or the error key for the fallback page.
  pub route_path: String,
  pub result: LoaderResult,
}

/// Request path in, complete HTML document out.
pub struct ServerRenderer<C, E> {
  routes: Arc<RouteTable<C>>,
  engine: E,
  templates: TemplateSource,
  executor: LoaderExecutor,
  fingerprint: RouteFingerprint,
  base: BasePath,
}

impl<C: Component, E: RenderEngine<C>> ServerRenderer<C, E> {
  pub fn new(
    routes: Arc<RouteTable<C>>,
    engine: E,
    templates: TemplateSource,
    executor: LoaderExecutor,
    base: BasePath,
  ) -> Self {
    let fingerprint = routes.fingerprint();
    Self { routes, engine, templates, executor, fingerprint, base }
  }

  pub fn routes(&self) -> &RouteTable<C> {
    &self.routes
  }

  pub fn base(&self) -> &BasePath {
    &self.base
  }

  pub fn fingerprint(&self) -> RouteFingerprint {
    self.fingerprint
  }

  /// Resolve, load, render and assemble. Unknown paths render the error
  /// route with status 200; only paths outside the base prefix are rejected.
  #[tracing::instrument(level = "debug", skip(self, query), fields(route = tracing::field::Empty))]
  pub async fn render(&self, request_path: &str, query: QueryParams) -> Result<Document, SkogzError> {
    let ctx = RequestContext::new(&self.routes, &self.base, request_path, query)
      .ok_or_else(|| SkogzError::OutsideBase(request_path.to_string()))?;
    let route = ctx.route;
    tracing::Span::current().record("route", route.path());

    let template = self.templates.load(request_path).await?;

    let result = self
      .executor
      .execute(route)
      .await
      .map_err(|source| SkogzError::Loader { path: ctx.path.clone(), source })?;

    let props = build_props(&ctx.query, &result);
    let rendered = self
      .engine
      .render(route.component(), &props)
      .map_err(|source| SkogzError::Render { path: ctx.path.clone(), source })?;

    let html = assemble_page(&template, &rendered, &result, self.fingerprint);
    tracing::debug!(bytes = html.len(), "page assembled");
    Ok(Document { html, route_path: route.path().to_string(), result })
  }
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::{AtomicUsize, Ordering};

  use super::*;
  use serde_json::json;
  use skogz_core::{ERROR_KEY, LoaderError, Props, parse_state_script};
  use skogz_engine::{CompiledTemplate, RenderError, Rendered};

  use crate::loader::LoaderPolicy;

  const DOC: &str = "<html><head><!--app-head--></head><body><div id=\"app\"><!--app-html--></div><!--skogz-loader-result--></body></html>";

  /// Renders `<component>{props}</component>`.
  struct EchoEngine;

  impl RenderEngine<&'static str> for EchoEngine {
    fn render(&self, component: &&'static str, props: &Props) -> Result<Rendered, RenderError> {
      if *component == "Broken" {
        return Err(RenderError::failed("cannot render"));
      }
      Ok(Rendered {
        head: format!("<title>{component}</title>"),
        body: format!("<{component}>{}</{component}>", serde_json::Value::Object(props.clone())),
      })
    }
  }

  async fn unavailable() -> Result<serde_json::Value, LoaderError> {
    Err(LoaderError::failed("database unavailable"))
  }

  fn table(count_calls: Arc<AtomicUsize>) -> Arc<RouteTable<&'static str>> {
    let table = RouteTable::builder()
      .route("/", "Home")
      .route("/pong", "Pong")
      .route_with_loader("/count", "Count", move || {
        let calls = count_calls.clone();
        async move {
          calls.fetch_add(1, Ordering::SeqCst);
          Ok(json!({"value": 42}))
        }
      })
      .route("/user", "User")
      .route_with_loader("/flaky", "Flaky", unavailable)
      .route("/broken", "Broken")
      .error("NotFound")
      .build()
      .unwrap();
    Arc::new(table)
  }

  fn renderer(
    policy: LoaderPolicy,
    base: &str,
  ) -> (ServerRenderer<&'static str, EchoEngine>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let templates = TemplateSource::Production(Arc::new(CompiledTemplate::compile(DOC).unwrap()));
    let renderer = ServerRenderer::new(
      table(calls.clone()),
      EchoEngine,
      templates,
      LoaderExecutor::new(policy),
      BasePath::new(base),
    );
    (renderer, calls)
  }

  #[tokio::test]
  async fn renders_static_route() {
    let (renderer, _) = renderer(LoaderPolicy::Degrade, "/");
    let doc = renderer.render("/", QueryParams::default()).await.unwrap();

    assert_eq!(doc.route_path, "/");
    assert!(doc.html.contains("<head><title>Home</title></head>"));
    assert!(doc.html.contains("<div id=\"app\"><Home>{\"queryParams\":{}}</Home></div>"));
    let state = parse_state_script(&doc.html).unwrap().unwrap();
    assert!(state.result.is_empty());
    assert_eq!(state.fingerprint, Some(renderer.fingerprint()));
  }

  #[tokio::test]
  async fn unknown_path_renders_error_route() {
    let (renderer, _) = renderer(LoaderPolicy::Degrade, "/");
    let doc = renderer.render("/does-not-exist", QueryParams::default()).await.unwrap();

    assert_eq!(doc.route_path, ERROR_KEY);
    assert!(doc.html.contains("<NotFound>"));
    assert!(doc.result.is_empty());
  }

  #[tokio::test]
  async fn loader_result_is_spread_and_embedded() {
    let (renderer, calls) = renderer(LoaderPolicy::Degrade, "/");
    let doc = renderer.render("/count", QueryParams::default()).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(doc.html.contains("<Count>{\"queryParams\":{},\"value\":42}</Count>"));
    let state = parse_state_script(&doc.html).unwrap().unwrap();
    assert_eq!(state.result.as_value(), &json!({"value": 42}));
  }

  #[tokio::test]
  async fn query_params_reach_the_component() {
    let (renderer, calls) = renderer(LoaderPolicy::Degrade, "/");
    let doc = renderer.render("/user", QueryParams::parse("name=Ada")).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(doc.html.contains("<User>{\"queryParams\":{\"name\":\"Ada\"}}</User>"));
  }

  #[tokio::test]
  async fn rendering_is_repeatable() {
    let (renderer, calls) = renderer(LoaderPolicy::Degrade, "/");
    let first = renderer.render("/count", QueryParams::default()).await.unwrap();
    let second = renderer.render("/count", QueryParams::default()).await.unwrap();

    assert_eq!(first.html, second.html);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
  }

  #[tokio::test]
  async fn base_prefix_is_stripped() {
    let (renderer, _) = renderer(LoaderPolicy::Degrade, "/app");

    let doc = renderer.render("/app/count", QueryParams::default()).await.unwrap();
    assert_eq!(doc.route_path, "/count");

    let doc = renderer.render("/app", QueryParams::default()).await.unwrap();
    assert_eq!(doc.route_path, "/");

    let err = renderer.render("/elsewhere", QueryParams::default()).await.unwrap_err();
    assert!(matches!(err, SkogzError::OutsideBase(_)));
    assert_eq!(err.status(), 404);
  }

  #[tokio::test]
  async fn failing_loader_degrades_to_empty_result() {
    let (renderer, _) = renderer(LoaderPolicy::Degrade, "/");
    let doc = renderer.render("/flaky", QueryParams::default()).await.unwrap();

    assert!(doc.result.is_empty());
    assert!(doc.html.contains("<Flaky>{\"queryParams\":{}}</Flaky>"));
  }

  #[tokio::test]
  async fn failing_loader_fails_request_under_fail_policy() {
    let (renderer, _) = renderer(LoaderPolicy::Fail, "/");
    let err = renderer.render("/flaky", QueryParams::default()).await.unwrap_err();

    assert!(matches!(err, SkogzError::Loader { ref path, .. } if path == "/flaky"));
    assert_eq!(err.status(), 500);
  }

  #[tokio::test]
  async fn render_failures_surface() {
    let (renderer, _) = renderer(LoaderPolicy::Degrade, "/");
    let err = renderer.render("/broken", QueryParams::default()).await.unwrap_err();
    assert!(matches!(err, SkogzError::Render { .. }));
  }
}
