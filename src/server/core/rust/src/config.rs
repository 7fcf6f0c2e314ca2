/* src/server/core/rust/src/config.rs */

use std::path::{Path, PathBuf};

use serde::Deserialize;
use skogz_core::BasePath;

use crate::loader::LoaderPolicy;

/// Optional project file, discovered upward from the working directory.
pub const CONFIG_FILE: &str = "skogz.toml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
  /// Template read fresh on every request and passed through the transform hook.
  #[default]
  Development,
  /// Template read once from the client build output.
  Production,
}

impl Mode {
  /// `production` (any case) selects production; anything else is development.
  pub fn from_env_value(value: &str) -> Self {
    if value.trim().eq_ignore_ascii_case("production") { Self::Production } else { Self::Development }
  }

  pub fn is_production(self) -> bool {
    self == Self::Production
  }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("failed to read {}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("failed to parse {}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },
  #[error("invalid {key} value {value:?}")]
  InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
  #[serde(default)]
  server: ServerSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServerSection {
  port: Option<u16>,
  base: Option<String>,
  mode: Option<Mode>,
  root: Option<PathBuf>,
  client_dir: Option<PathBuf>,
  dev_template: Option<PathBuf>,
  public_dir: Option<PathBuf>,
  loader_policy: Option<LoaderPolicy>,
}

/// Process-wide server settings, fixed at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
  pub port: u16,
  pub base: BasePath,
  pub mode: Mode,
  /// Project root; relative paths below resolve against it.
  pub root: PathBuf,
  /// Client build output holding `index.html` and static assets.
  pub client_dir: PathBuf,
  /// Source template used in development.
  pub dev_template: PathBuf,
  /// Static assets served in development.
  pub public_dir: PathBuf,
  pub loader_policy: LoaderPolicy,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      port: 5173,
      base: BasePath::root(),
      mode: Mode::Development,
      root: PathBuf::from("."),
      client_dir: PathBuf::from("dist/client"),
      dev_template: PathBuf::from("index.html"),
      public_dir: PathBuf::from("public"),
      loader_policy: LoaderPolicy::default(),
    }
  }
}

impl ServerConfig {
  /// Defaults overridden by the process environment.
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::default().apply_env(|key| std::env::var(key).ok())
  }

  /// Find `skogz.toml` upward from the working directory (if any), then apply
  /// environment overrides.
  pub fn discover() -> Result<Self, ConfigError> {
    let cwd = std::env::current_dir()
      .map_err(|source| ConfigError::Io { path: PathBuf::from("."), source })?;
    let config = match find_config(&cwd) {
      Some(path) => Self::load(&path)?,
      None => Self::default(),
    };
    config.apply_env(|key| std::env::var(key).ok())
  }

  /// Load a `skogz.toml`. Relative `root` resolves against the file's directory.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path)
      .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    let mut config = Self::parse(&content)
      .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
    if config.root.is_relative() {
      if let Some(dir) = path.parent() {
        config.root = dir.join(&config.root);
      }
    }
    Ok(config)
  }

  fn parse(content: &str) -> Result<Self, toml::de::Error> {
    let file: ConfigFile = toml::from_str(content)?;
    let section = file.server;
    let defaults = Self::default();
    Ok(Self {
      port: section.port.unwrap_or(defaults.port),
      base: section.base.as_deref().map_or(defaults.base, BasePath::new),
      mode: section.mode.unwrap_or(defaults.mode),
      root: section.root.unwrap_or(defaults.root),
      client_dir: section.client_dir.unwrap_or(defaults.client_dir),
      dev_template: section.dev_template.unwrap_or(defaults.dev_template),
      public_dir: section.public_dir.unwrap_or(defaults.public_dir),
      loader_policy: section.loader_policy.unwrap_or(defaults.loader_policy),
    })
  }

  /// Apply `PORT`, `BASE`, `NODE_ENV` / `SKOGZ_ENV` and `SKOGZ_LOADER_POLICY`.
  /// `SKOGZ_ENV` wins over `NODE_ENV` when both are set.
  pub fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
    if let Some(port) = lookup("PORT") {
      self.port =
        port.trim().parse().map_err(|_| ConfigError::InvalidValue { key: "PORT", value: port })?;
    }
    if let Some(base) = lookup("BASE") {
      self.base = BasePath::new(&base);
    }
    if let Some(mode) = lookup("SKOGZ_ENV").or_else(|| lookup("NODE_ENV")) {
      self.mode = Mode::from_env_value(&mode);
    }
    if let Some(policy) = lookup("SKOGZ_LOADER_POLICY") {
      self.loader_policy = policy
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key: "SKOGZ_LOADER_POLICY", value: policy })?;
    }
    Ok(self)
  }

  /// Template file for the current mode.
  pub fn template_path(&self) -> PathBuf {
    match self.mode {
      Mode::Production => self.root.join(&self.client_dir).join("index.html"),
      Mode::Development => self.root.join(&self.dev_template),
    }
  }

  /// Directory served as static assets for the current mode.
  pub fn static_dir(&self) -> PathBuf {
    match self.mode {
      Mode::Production => self.root.join(&self.client_dir),
      Mode::Development => self.root.join(&self.public_dir),
    }
  }

  pub fn addr(&self) -> String {
    format!("0.0.0.0:{}", self.port)
  }
}

/// Walk upward from `start` to find `skogz.toml`, like Cargo.toml discovery.
pub fn find_config(start: &Path) -> Option<PathBuf> {
  let mut dir = start.to_path_buf();
  loop {
    let candidate = dir.join(CONFIG_FILE);
    if candidate.is_file() {
      return Some(candidate);
    }
    if !dir.pop() {
      return None;
    }
  }
}
