//! Helpers for reading the source around preserved nodes.

fn is_js_whitespace(c: char) -> bool {
  c.is_whitespace() || c == '\u{feff}'
}

pub fn is_line_terminator(c: char) -> bool {
  matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Byte length of the whitespace and comments starting `text`, or `None` if a comment there is
/// never closed.
pub fn trivia_len(text: &str) -> Option<usize> {
  let mut rest = text;
  loop {
    rest = rest.trim_start_matches(is_js_whitespace);
    if let Some(comment) = rest.strip_prefix("//") {
      rest = match comment.find(is_line_terminator) {
        Some(end) => &comment[end..],
        None => "",
      };
    } else if let Some(comment) = rest.strip_prefix("/*") {
      let end = comment.find("*/")?;
      rest = &comment[end + 2..];
    } else {
      return Some(text.len() - rest.len());
    };
  }
}

/// Whether `text` holds nothing but whitespace and comments, and can be copied between two
/// tokens without changing the meaning of the program.
pub fn is_trivia(text: &str) -> bool {
  trivia_len(text) == Some(text.len())
}

fn is_word_char(c: char) -> bool {
  c.is_alphanumeric() || c == '_' || c == '$'
}

/// Reads `tokens` in order from `pos`, allowing whitespace and comments before each one, and
/// returns the position just past the last.
pub fn after_tokens(source: &str, mut pos: usize, tokens: &[&str]) -> Option<usize> {
  for token in tokens {
    pos += trivia_len(source.get(pos..)?)?;
    let rest = source.get(pos..)?.strip_prefix(token)?;
    // `static` must not match the start of `staticKey`.
    if token.ends_with(is_word_char) && rest.starts_with(is_word_char) {
      return None;
    };
    pos += token.len();
  }
  Some(pos)
}

/// Byte offset of the start of the line containing `pos`.
pub fn line_start(source: &str, pos: usize) -> usize {
  source[..pos]
    .rfind(is_line_terminator)
    .map(|i| i + source[i..].chars().next().map_or(1, char::len_utf8))
    .unwrap_or(0)
}

/// The spaces and tabs starting the line containing `pos`.
pub fn line_indent(source: &str, pos: usize) -> &str {
  let start = line_start(source, pos);
  let line = &source[start..];
  let len = line.len() - line.trim_start_matches([' ', '\t']).len();
  &line[..len]
}

/// Length of the `#!` line starting the source, if any, excluding its line terminator.
pub fn hashbang_len(source: &str) -> usize {
  if !source.starts_with("#!") {
    return 0;
  };
  source.find(is_line_terminator).unwrap_or(source.len())
}

#[cfg(test)]
mod tests {
  use super::after_tokens;
  use super::hashbang_len;
  use super::is_trivia;
  use super::line_indent;
  use super::trivia_len;

  #[test]
  fn recognizes_comments_and_whitespace() {
    assert!(is_trivia(""));
    assert!(is_trivia(" \n\t"));
    assert!(is_trivia(" // note\n  /* block\n */ "));
    assert!(is_trivia("// trailing"));
    assert!(!is_trivia("/* unterminated"));
    assert!(!is_trivia(" ; "));
    assert!(!is_trivia("/ 2"));
  }

  #[test]
  fn measures_leading_trivia() {
    assert_eq!(trivia_len(" /* a */ x"), Some(9));
    assert_eq!(trivia_len("x"), Some(0));
    assert_eq!(trivia_len(" /* open"), None);
  }

  #[test]
  fn reads_delimiters_through_comments() {
    let source = "f(a /* x */ , /* y */ ...b)";
    assert_eq!(after_tokens(source, 3, &[",", "..."]), Some(25));
    assert_eq!(after_tokens(source, 3, &[")"]), None);
    assert_eq!(after_tokens("static {}", 0, &["static", "{"]), Some(8));
    assert_eq!(after_tokens("staticKey", 0, &["static"]), None);
  }

  #[test]
  fn finds_line_indentation() {
    let source = "a\n  b\n\tc";
    assert_eq!(line_indent(source, 0), "");
    assert_eq!(line_indent(source, 4), "  ");
    assert_eq!(line_indent(source, source.len()), "\t");
  }

  #[test]
  fn measures_hashbang() {
    assert_eq!(hashbang_len("#!/usr/bin/env node\nx"), 19);
    assert_eq!(hashbang_len("x"), 0);
  }
}
