/// Writes a JavaScript string literal delimited by double quotes, escaping characters that would
/// otherwise terminate or change the meaning of the literal. Non-ASCII characters are kept as
/// UTF-8 except the line separators U+2028/U+2029.
pub fn write_string_literal(out: &mut String, value: &str) {
  out.push('"');
  let mut chars = value.chars().peekable();
  while let Some(ch) = chars.next() {
    match ch {
      '\\' => out.push_str("\\\\"),
      '"' => out.push_str("\\\""),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      '\0' => {
        // `\0` followed by a digit would be read as a legacy octal escape.
        if chars.peek().is_some_and(|c| c.is_ascii_digit()) {
          out.push_str("\\x00");
        } else {
          out.push_str("\\0");
        }
      }
      '\u{2028}' => out.push_str("\\u2028"),
      '\u{2029}' => out.push_str("\\u2029"),
      ch if ch < '\u{20}' || ch == '\u{7f}' => {
        out.push_str(&format!("\\x{:02X}", ch as u32));
      }
      ch => out.push(ch),
    }
  }
  out.push('"');
}

pub fn string_literal(value: &str) -> String {
  let mut out = String::with_capacity(value.len() + 2);
  write_string_literal(&mut out, value);
  out
}

#[cfg(test)]
mod tests {
  use super::string_literal;

  #[test]
  fn escapes_quotes_and_backslashes() {
    assert_eq!(string_literal("a\"b\\c"), "\"a\\\"b\\\\c\"");
    assert_eq!(string_literal("it's"), "\"it's\"");
  }

  #[test]
  fn escapes_control_characters() {
    assert_eq!(string_literal("a\nb\tc"), "\"a\\nb\\tc\"");
    assert_eq!(string_literal("a\u{0007}b"), "\"a\\x07b\"");
    assert_eq!(string_literal("\u{0}1"), "\"\\x001\"");
    assert_eq!(string_literal("\u{0}a"), "\"\\0a\"");
  }

  #[test]
  fn keeps_unicode_but_escapes_line_separators() {
    assert_eq!(string_literal("é\u{2028}"), "\"é\\u2028\"");
  }
}
