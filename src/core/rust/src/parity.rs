/* src/core/rust/src/parity.rs */

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::component::Component;
use crate::route::{ERROR_KEY, RouteTable};

const FNV_OFFSET: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// Standard FNV-1a 32-bit hash.
pub fn fnv1a_32(input: &str) -> u32 {
  let mut hash = FNV_OFFSET;
  for byte in input.bytes() {
    hash ^= u32::from(byte);
    hash = hash.wrapping_mul(FNV_PRIME);
  }
  hash
}

/// Hash of a route table's key set and per-key component identity.
///
/// Two tables with the same fingerprint resolve every path to components with
/// the same id. Rendered as 8 lowercase hex chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteFingerprint(u32);

impl RouteFingerprint {
  pub fn from_raw(raw: u32) -> Self {
    Self(raw)
  }

  pub fn raw(self) -> u32 {
    self.0
  }
}

impl fmt::Display for RouteFingerprint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:08x}", self.0)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route fingerprint {0:?}")]
pub struct ParseFingerprintError(String);

impl FromStr for RouteFingerprint {
  type Err = ParseFingerprintError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.len() != 8 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
      return Err(ParseFingerprintError(s.to_string()));
    }
    u32::from_str_radix(s, 16).map(Self).map_err(|_| ParseFingerprintError(s.to_string()))
  }
}

/// `path -> component id`, error route included under its reserved key.
fn identity_map<C: Component>(table: &RouteTable<C>) -> BTreeMap<&str, &str> {
  let mut map: BTreeMap<&str, &str> = table.routes().map(|r| (r.path(), r.component().id())).collect();
  map.insert(ERROR_KEY, table.error_route().component().id());
  map
}

impl<C: Component> RouteTable<C> {
  /// Order-independent fingerprint; see [`RouteFingerprint`].
  pub fn fingerprint(&self) -> RouteFingerprint {
    let mut canonical = String::new();
    for (path, id) in identity_map(self) {
      canonical.push_str(path);
      canonical.push('\0');
      canonical.push_str(id);
      canonical.push('\n');
    }
    RouteFingerprint(fnv1a_32(&canonical))
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
  "server and client route tables diverge (only on server: {only_server:?}, only on client: {only_client:?}, different component: {mismatched:?})"
)]
pub struct ParityError {
  pub only_server: Vec<String>,
  pub only_client: Vec<String>,
  pub mismatched: Vec<String>,
}

/// Compare two independently built tables key by key.
pub fn check_parity<S: Component, K: Component>(
  server: &RouteTable<S>,
  client: &RouteTable<K>,
) -> Result<(), ParityError> {
  let server_map = identity_map(server);
  let client_map = identity_map(client);

  let mut err = ParityError { only_server: Vec::new(), only_client: Vec::new(), mismatched: Vec::new() };
  for (path, id) in &server_map {
    match client_map.get(path) {
      None => err.only_server.push((*path).to_string()),
      Some(other) if other != id => err.mismatched.push((*path).to_string()),
      Some(_) => {}
    }
  }
  for path in client_map.keys() {
    if !server_map.contains_key(path) {
      err.only_client.push((*path).to_string());
    }
  }

  if err.only_server.is_empty() && err.only_client.is_empty() && err.mismatched.is_empty() {
    Ok(())
  } else {
    Err(err)
  }
}
