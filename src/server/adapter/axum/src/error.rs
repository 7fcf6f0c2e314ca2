/* src/server/adapter/axum/src/error.rs */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use skogz_server::{Mode, SkogzError};

/// Newtype so `SkogzError` can implement `IntoResponse` here. Carries the
/// mode, which decides how much of the cause chain reaches the client.
pub(crate) struct AxumError(pub SkogzError, pub Mode);

impl IntoResponse for AxumError {
  fn into_response(self) -> Response {
    let Self(err, mode) = self;
    let status = StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, err.diagnostic(mode)).into_response()
  }
}

/// Failure to start or run the HTTP server.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
  #[error(transparent)]
  Setup(#[from] SkogzError),
  #[error("server i/o error")]
  Io(#[from] std::io::Error),
}
