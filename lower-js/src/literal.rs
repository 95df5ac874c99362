//! Decoding of string, template and regular expression token text.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LiteralErrorKind {
  InvalidEscape,
  UnexpectedEnd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiteralError {
  pub kind: LiteralErrorKind,
  pub offset: usize,
}

fn invalid(offset: usize) -> LiteralError {
  LiteralError {
    kind: LiteralErrorKind::InvalidEscape,
    offset,
  }
}

fn unexpected_end(offset: usize) -> LiteralError {
  LiteralError {
    kind: LiteralErrorKind::UnexpectedEnd,
    offset,
  }
}

/// Templates reject the legacy octal forms (`\1`, `\01`) and `\8`/`\9` that sloppy strings accept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EscapeMode {
  String,
  Template,
}

fn hex_value(hex: &str, offset: usize) -> Result<u32, LiteralError> {
  if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
    return Err(invalid(offset));
  }
  u32::from_str_radix(hex, 16).map_err(|_| invalid(offset))
}

/// Decodes the escape sequence following a backslash. Returns the number of bytes consumed after
/// the backslash and the decoded character (none for line continuations).
fn decode_escape_sequence(
  raw: &str,
  escape_start: usize,
  mode: EscapeMode,
) -> Result<(usize, Option<char>), LiteralError> {
  let Some(first) = raw.chars().next() else {
    return Err(unexpected_end(escape_start));
  };
  match first {
    '\r' => {
      let mut consumed = first.len_utf8();
      if raw[consumed..].starts_with('\n') {
        consumed += '\n'.len_utf8();
      }
      Ok((consumed, None))
    }
    '\n' | '\u{2028}' | '\u{2029}' => Ok((first.len_utf8(), None)),
    'b' => Ok((1, Some('\x08'))),
    'f' => Ok((1, Some('\x0c'))),
    'n' => Ok((1, Some('\n'))),
    'r' => Ok((1, Some('\r'))),
    't' => Ok((1, Some('\t'))),
    'v' => Ok((1, Some('\x0b'))),
    '0' if mode == EscapeMode::Template => match raw[1..].chars().next() {
      Some(c) if c.is_ascii_digit() => Err(invalid(escape_start)),
      _ => Ok((1, Some('\0'))),
    },
    '1'..='9' if mode == EscapeMode::Template => Err(invalid(escape_start)),
    '0'..='7' => {
      // Legacy octal escapes take up to three digits, with a maximum of \377.
      let mut consumed = 1;
      let mut value = first as u32 - '0' as u32;
      let max_len = if first <= '3' { 3 } else { 2 };
      for ch in raw[1..].chars().take(max_len - 1) {
        match ch.to_digit(8) {
          Some(d) => {
            consumed += 1;
            value = (value << 3) + d;
          }
          None => break,
        }
      }
      let c = char::from_u32(value).ok_or_else(|| invalid(escape_start))?;
      Ok((consumed, Some(c)))
    }
    'x' => {
      let hex = raw.get(1..3).ok_or_else(|| unexpected_end(escape_start))?;
      let cp = hex_value(hex, escape_start)?;
      let c = char::from_u32(cp).ok_or_else(|| invalid(escape_start))?;
      Ok((3, Some(c)))
    }
    'u' => {
      let after_u = &raw[1..];
      if let Some(braced) = after_u.strip_prefix('{') {
        let end = braced.find('}').ok_or_else(|| unexpected_end(escape_start))?;
        let value = hex_value(&braced[..end], escape_start)?;
        if value > 0x10FFFF {
          return Err(invalid(escape_start));
        }
        // JavaScript strings are UTF-16; lone surrogates become U+FFFD so they fit in a `String`.
        let cp = char::from_u32(value).unwrap_or('\u{FFFD}');
        Ok((1 + 1 + end + 1, Some(cp)))
      } else {
        let hex = after_u.get(..4).ok_or_else(|| unexpected_end(escape_start))?;
        let value = hex_value(hex, escape_start)?;
        let consumed = 1 + 4;
        // Combine surrogate pairs so sequences like `\uD83D\uDE00` decode to one scalar.
        if (0xD800..=0xDBFF).contains(&value) {
          if let Some(low_hex) = after_u.get(4..10).and_then(|r| r.strip_prefix("\\u")) {
            if let Ok(low) = hex_value(low_hex, escape_start) {
              if (0xDC00..=0xDFFF).contains(&low) {
                let combined = 0x10000 + ((value - 0xD800) << 10) + (low - 0xDC00);
                if let Some(cp) = char::from_u32(combined) {
                  return Ok((consumed + 6, Some(cp)));
                }
              }
            }
          }
        }
        Ok((consumed, Some(char::from_u32(value).unwrap_or('\u{FFFD}'))))
      }
    }
    c => Ok((c.len_utf8(), Some(c))),
  }
}

fn decode(raw: &str, mode: EscapeMode) -> Result<String, LiteralError> {
  let mut norm = String::with_capacity(raw.len());
  let mut offset = 0;
  while let Some(ch) = raw[offset..].chars().next() {
    if ch == '\\' {
      let after_backslash = offset + 1;
      let (consumed, addition) = decode_escape_sequence(&raw[after_backslash..], offset, mode)?;
      if let Some(c) = addition {
        norm.push(c);
      }
      offset = after_backslash + consumed;
    } else {
      norm.push(ch);
      offset += ch.len_utf8();
    }
  }
  Ok(norm)
}

/// Decodes a StringLiteral token including its quotes.
pub fn normalise_literal_string(raw: &str) -> Result<String, LiteralError> {
  let quote = raw.chars().next().ok_or_else(|| unexpected_end(0))?;
  if raw.len() < 2 || !raw.ends_with(quote) {
    return Err(unexpected_end(raw.len()));
  }
  decode(&raw[1..raw.len() - 1], EscapeMode::String)
}

/// The raw characters of a template token, between its delimiters (`` ` ``, `}`, `${`).
pub fn template_raw(raw: &str) -> &str {
  let start = if raw.starts_with('`') || raw.starts_with('}') { 1 } else { 0 };
  let end = if raw.ends_with("${") {
    raw.len() - 2
  } else if raw.ends_with('`') && raw.len() > start {
    raw.len() - 1
  } else {
    raw.len()
  };
  raw.get(start..end.max(start)).unwrap_or("")
}

/// The cooked value of a template chunk. `None` when an escape is invalid, which tagged templates
/// permit.
pub fn template_cooked(raw_chunk: &str) -> Option<String> {
  // Line terminators are normalized to LF in both raw and cooked values.
  decode(
    &raw_chunk.replace("\r\n", "\n").replace('\r', "\n"),
    EscapeMode::Template,
  )
  .ok()
}

/// Splits `/body/flags` into its body and flags.
pub fn split_regex(raw: &str) -> Option<(&str, &str)> {
  let body = raw.strip_prefix('/')?;
  let end = body.rfind('/')?;
  Some((&body[..end], &body[end + 1..]))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decodes_string_escapes() {
    assert_eq!(normalise_literal_string(r#"'a\nb'"#).unwrap(), "a\nb");
    assert_eq!(normalise_literal_string(r#""\x41B\u{43}""#).unwrap(), "ABC");
    assert_eq!(normalise_literal_string(r#"'\uD83D\uDE00'"#).unwrap(), "\u{1F600}");
    assert_eq!(normalise_literal_string(r#"'\101'"#).unwrap(), "A");
    assert_eq!(normalise_literal_string("'a\\\nb'").unwrap(), "ab");
    assert_eq!(normalise_literal_string(r#"'\q'"#).unwrap(), "q");
  }

  #[test]
  fn reports_bad_escapes() {
    assert_eq!(
      normalise_literal_string(r#"'\xZZ'"#).unwrap_err().kind,
      LiteralErrorKind::InvalidEscape
    );
    assert_eq!(
      normalise_literal_string(r#"'\u12'"#).unwrap_err().kind,
      LiteralErrorKind::UnexpectedEnd
    );
  }

  #[test]
  fn template_chunks() {
    assert_eq!(template_raw("`abc`"), "abc");
    assert_eq!(template_raw("`a${"), "a");
    assert_eq!(template_raw("}b${"), "b");
    assert_eq!(template_raw("}c`"), "c");
    assert_eq!(template_cooked(r"\n"), Some("\n".to_string()));
    assert_eq!(template_cooked(r"\unicode"), None);
    assert_eq!(template_cooked(r"a\0b"), Some("a\0b".to_string()));
  }

  #[test]
  fn templates_reject_octal_escapes() {
    assert_eq!(template_cooked(r"\1"), None);
    assert_eq!(template_cooked(r"\01"), None);
    assert_eq!(template_cooked(r"\8"), None);
    // Strings still take them.
    assert_eq!(normalise_literal_string(r#"'\1'"#).unwrap(), "\u{1}");
    assert_eq!(normalise_literal_string(r#"'\8'"#).unwrap(), "8");
  }

  #[test]
  fn splits_regex() {
    assert_eq!(split_regex("/a\\/b/gi"), Some(("a\\/b", "gi")));
    assert_eq!(split_regex("x"), None);
  }
}
