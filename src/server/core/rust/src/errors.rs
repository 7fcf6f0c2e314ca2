/* src/server/core/rust/src/errors.rs */

use std::error::Error as _;
use std::fmt::Write as _;
use std::path::PathBuf;

use skogz_core::LoaderError;
use skogz_engine::{RenderError, TemplateError};

use crate::config::Mode;

#[derive(Debug, thiserror::Error)]
pub enum SkogzError {
  #[error(transparent)]
  Template(#[from] TemplateError),
  #[error("failed to read template {}", path.display())]
  TemplateIo {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("template transform failed: {0}")]
  Transform(String),
  #[error("loader for {path} failed")]
  Loader {
    path: String,
    #[source]
    source: LoaderError,
  },
  #[error("rendering {path} failed")]
  Render {
    path: String,
    #[source]
    source: RenderError,
  },
  #[error("render task aborted: {0}")]
  Task(String),
  #[error("path {0:?} is outside the configured base prefix")]
  OutsideBase(String),
}

impl SkogzError {
  /// HTTP status this failure maps to.
  pub fn status(&self) -> u16 {
    match self {
      Self::OutsideBase(_) => 404,
      _ => 500,
    }
  }

  /// Response body for a failed request: the whole cause chain in
  /// development, the top-level message in production.
  pub fn diagnostic(&self, mode: Mode) -> String {
    let mut out = self.to_string();
    if mode == Mode::Production {
      return out;
    }
    let mut source = self.source();
    while let Some(cause) = source {
      let _ = write!(out, "\n  caused by: {cause}");
      source = cause.source();
    }
    out
  }
}
