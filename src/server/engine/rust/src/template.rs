/* src/server/engine/rust/src/template.rs */

//! Base HTML document with three substitution points.

/// Replaced with the head fragment (meta/style insertions).
pub const HEAD_PLACEHOLDER: &str = "<!--app-head-->";
/// Replaced with the server-rendered component markup.
pub const HTML_PLACEHOLDER: &str = "<!--app-html-->";
/// Replaced with the embedded-state `<script>` tag.
pub const STATE_PLACEHOLDER: &str = "<!--skogz-loader-result-->";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
  #[error("template is missing the {0} placeholder")]
  MissingPlaceholder(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
  Head,
  Html,
  State,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
  Text(String),
  Slot(Slot),
}

/// A template split at the first occurrence of each placeholder.
///
/// Positions are taken from the original text, so markup substituted into one
/// slot is never scanned for the other placeholders. Later occurrences of a
/// placeholder stay in the output as plain comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTemplate {
  parts: Vec<Part>,
}

impl CompiledTemplate {
  pub fn compile(html: &str) -> Result<Self, TemplateError> {
    let mut cuts = Vec::with_capacity(3);
    for (placeholder, slot) in
      [(HEAD_PLACEHOLDER, Slot::Head), (HTML_PLACEHOLDER, Slot::Html), (STATE_PLACEHOLDER, Slot::State)]
    {
      let pos = html.find(placeholder).ok_or(TemplateError::MissingPlaceholder(placeholder))?;
      cuts.push((pos, placeholder.len(), slot));
    }
    cuts.sort_by_key(|&(pos, _, _)| pos);

    let mut parts = Vec::with_capacity(7);
    let mut cursor = 0;
    for (pos, len, slot) in cuts {
      if pos > cursor {
        parts.push(Part::Text(html[cursor..pos].to_string()));
      }
      parts.push(Part::Slot(slot));
      cursor = pos + len;
    }
    if cursor < html.len() {
      parts.push(Part::Text(html[cursor..].to_string()));
    }
    Ok(Self { parts })
  }

  /// Perform the three substitutions.
  pub fn assemble(&self, head: &str, body: &str, state_script: &str) -> String {
    let extra = head.len() + body.len() + state_script.len();
    let mut out = String::with_capacity(self.text_len() + extra);
    for part in &self.parts {
      match part {
        Part::Text(text) => out.push_str(text),
        Part::Slot(Slot::Head) => out.push_str(head),
        Part::Slot(Slot::Html) => out.push_str(body),
        Part::Slot(Slot::State) => out.push_str(state_script),
      }
    }
    out
  }

  fn text_len(&self) -> usize {
    self
      .parts
      .iter()
      .map(|p| match p {
        Part::Text(t) => t.len(),
        Part::Slot(_) => 0,
      })
      .sum()
  }
}
