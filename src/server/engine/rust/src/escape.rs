/* src/server/engine/rust/src/escape.rs */

/// Make serialized JSON safe to embed inside a `<script>` element.
///
/// Walks the JSON text tracking whether the current position is inside a
/// JSON string (handling `\"` and `\\` correctly). Inside strings, `<`, `>`
/// and `&` become `\u003c`, `\u003e` and `\u0026` so no value can close the
/// script tag or open a comment, and non-ASCII codepoints become `\uXXXX`
/// (surrogate pairs outside the BMP). The result parses to the same value.
pub fn escape_json_for_script(json: &str) -> String {
  let mut out = String::with_capacity(json.len());
  let mut in_string = false;
  let mut chars = json.chars();

  while let Some(ch) = chars.next() {
    if !in_string {
      if ch == '"' {
        in_string = true;
      }
      out.push(ch);
      continue;
    }

    match ch {
      '\\' => {
        out.push(ch);
        if let Some(next) = chars.next() {
          out.push(next);
        }
      }
      '"' => {
        in_string = false;
        out.push(ch);
      }
      '<' => out.push_str("\\u003c"),
      '>' => out.push_str("\\u003e"),
      '&' => out.push_str("\\u0026"),
      c if u32::from(c) > 0x7F => push_unicode_escape(&mut out, u32::from(c)),
      c => out.push(c),
    }
  }
  out
}

fn push_unicode_escape(out: &mut String, code: u32) {
  use std::fmt::Write;
  if code > 0xFFFF {
    let adjusted = code - 0x1_0000;
    let hi = (adjusted >> 10) + 0xD800;
    let lo = (adjusted & 0x3FF) + 0xDC00;
    let _ = write!(out, "\\u{hi:04x}\\u{lo:04x}");
  } else {
    let _ = write!(out, "\\u{code:04x}");
  }
}
