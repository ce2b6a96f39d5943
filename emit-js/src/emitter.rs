//! Boundary-aware text writer used by the printers.
//!
//! When callers emit token-like fragments (keywords, identifiers, numbers,
//! punctuation, copied source), the [`Emitter`] inserts the minimal whitespace
//! required to prevent the concatenation from being lexed as a different token
//! (e.g. `returnx`, `a++b`, `a--b`, `a<!--b`).

use parse_js::loc::Loc;
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// Controls how syntax is printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EmitMode {
  /// Nodes without edits are copied from the source byte-for-byte; edited nodes are printed like
  /// [`EmitMode::Canonical`].
  #[default]
  Preserve,
  /// Every node is printed from syntax, one statement per line.
  Canonical,
  /// Every node is printed from syntax, only inserting whitespace where tokens would merge.
  Minified,
}

#[derive(Clone, Copy, Debug)]
pub struct EmitOptions {
  pub mode: EmitMode,
  /// One level of indentation for printed blocks.
  pub indent: &'static str,
}

impl EmitOptions {
  pub fn preserve() -> EmitOptions {
    EmitOptions {
      mode: EmitMode::Preserve,
      indent: "  ",
    }
  }

  pub fn canonical() -> EmitOptions {
    EmitOptions {
      mode: EmitMode::Canonical,
      indent: "  ",
    }
  }

  pub fn minified() -> EmitOptions {
    EmitOptions {
      mode: EmitMode::Minified,
      indent: "",
    }
  }
}

impl Default for EmitOptions {
  fn default() -> Self {
    EmitOptions::preserve()
  }
}

impl From<EmitMode> for EmitOptions {
  fn from(mode: EmitMode) -> Self {
    match mode {
      EmitMode::Preserve => EmitOptions::preserve(),
      EmitMode::Canonical => EmitOptions::canonical(),
      EmitMode::Minified => EmitOptions::minified(),
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmitErrorKind {
  /// The tree has a shape that has no source form, such as an empty sequence.
  Unsupported(&'static str),
  /// A node's location lies outside the source it is being preserved from.
  LocOutOfBounds,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmitError {
  pub kind: EmitErrorKind,
  pub loc: Option<Loc>,
}

impl EmitError {
  pub(crate) fn unsupported(message: &'static str) -> Self {
    Self {
      kind: EmitErrorKind::Unsupported(message),
      loc: None,
    }
  }

  pub(crate) fn with_loc(mut self, loc: Loc) -> Self {
    if self.loc.is_none() {
      self.loc = Some(loc);
    }
    self
  }
}

impl Display for EmitError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match &self.kind {
      EmitErrorKind::Unsupported(message) => write!(f, "cannot emit {}", message)?,
      EmitErrorKind::LocOutOfBounds => write!(f, "node location outside of source")?,
    };
    if let Some(loc) = self.loc {
      write!(f, " around loc [{}:{}]", loc.0, loc.1)?;
    };
    Ok(())
  }
}

impl Error for EmitError {}

pub type EmitResult<T = ()> = Result<T, EmitError>;

pub(crate) fn with_node_context<T>(loc: Loc, f: impl FnOnce() -> EmitResult<T>) -> EmitResult<T> {
  f().map_err(|err| err.with_loc(loc))
}

#[derive(Debug, Clone)]
pub struct Emitter {
  out: String,
  opts: EmitOptions,
  trailing: Boundary,
  html_start: HtmlStart,
  // Written after every line break.
  indent: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
  None,
  Word,
  Number,
  Plus,
  PlusPlus,
  Minus,
  MinusMinus,
  Slash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leading {
  Word,
  Number,
  Plus,
  Minus,
  Slash,
  Star,
  Other,
}

// Tracks the start of the current line, as `<!--` anywhere and `-->` at a line start open comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HtmlStart {
  Start,
  Lt,
  LtBang,
  LtBangDash,
  Dash,
  DashDash,
  Other,
}

impl Emitter {
  pub fn new(opts: EmitOptions) -> Self {
    Emitter {
      out: String::new(),
      opts,
      trailing: Boundary::None,
      html_start: HtmlStart::Start,
      indent: String::new(),
    }
  }

  /// A new empty emitter with the same options and indentation, for printing a fragment that is
  /// inspected before being appended with [`Emitter::write_str`].
  pub fn fragment(&self) -> Emitter {
    Emitter {
      indent: self.indent.clone(),
      ..Emitter::new(self.opts)
    }
  }

  pub fn mode(&self) -> EmitMode {
    self.opts.mode
  }

  pub fn options(&self) -> EmitOptions {
    self.opts
  }

  pub fn as_str(&self) -> &str {
    &self.out
  }

  pub fn into_string(self) -> String {
    self.out
  }

  pub fn is_empty(&self) -> bool {
    self.out.is_empty()
  }

  pub fn indent(&self) -> &str {
    &self.indent
  }

  /// Replaces the indentation written after line breaks, returning the previous one.
  pub fn set_indent(&mut self, indent: String) -> String {
    std::mem::replace(&mut self.indent, indent)
  }

  /// Runs `f` with one more level of indentation.
  pub fn indented<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
    let inner = format!("{}{}", self.indent, self.opts.indent);
    let outer = self.set_indent(inner);
    let res = f(self);
    self.indent = outer;
    res
  }

  /// Writes a fragment of one or more tokens, inserting a space first if its first character would
  /// merge with the previous token.
  pub fn write_str(&mut self, text: &str) {
    let bytes = text.as_bytes();
    let Some(first) = bytes.iter().position(|b| !b.is_ascii_whitespace()) else {
      self.push(text);
      if !text.is_empty() {
        self.trailing = Boundary::None;
      };
      return;
    };
    if first == 0 {
      self.insert_boundary(classify_leading(bytes[0]));
    };
    self.push(text);
    self.trailing = match bytes.last() {
      Some(b) if b.is_ascii_whitespace() => Boundary::None,
      _ => classify_trailing(bytes),
    };
  }

  pub fn write_keyword(&mut self, keyword: &str) {
    self.insert_boundary(Leading::Word);
    self.push(keyword);
    self.trailing = Boundary::Word;
  }

  pub fn write_identifier(&mut self, identifier: &str) {
    self.write_keyword(identifier);
  }

  pub fn write_number(&mut self, number: &str) {
    self.write_str(number);
    if !number.is_empty() {
      self.trailing = Boundary::Number;
    };
  }

  pub fn write_punct(&mut self, punct: &str) {
    self.write_str(punct);
  }

  /// Writes a space, except when minifying.
  pub fn write_sep(&mut self) {
    if self.opts.mode != EmitMode::Minified {
      self.push(" ");
      self.trailing = Boundary::None;
    };
  }

  /// Starts a new indented line, except when minifying.
  pub fn write_newline(&mut self) {
    if self.opts.mode != EmitMode::Minified {
      self.out.push('\n');
      self.html_start = HtmlStart::Start;
      let indent = self.indent.clone();
      self.out.push_str(&indent);
      self.trailing = Boundary::None;
    };
  }

  /// Writes a binary operator, spaced unless minifying.
  pub fn write_operator(&mut self, op: &str) {
    let word = op.as_bytes()[0].is_ascii_alphabetic();
    if self.opts.mode == EmitMode::Minified {
      if word {
        self.write_keyword(op);
      } else {
        self.write_punct(op);
      };
    } else {
      self.write_sep();
      self.write_str(op);
      self.write_sep();
    };
  }

  fn insert_boundary(&mut self, next: Leading) {
    if needs_space(self.trailing, next) {
      self.push(" ");
      self.trailing = Boundary::None;
    }
  }

  fn push(&mut self, text: &str) {
    if would_start_html_comment(self.html_start, text.as_bytes()) {
      self.out.push(' ');
      self.html_start = HtmlStart::Other;
    };
    self.out.push_str(text);
    for &b in text.as_bytes() {
      self.html_start = next_html_start(self.html_start, b).0;
    }
  }
}

fn needs_space(prev: Boundary, next: Leading) -> bool {
  matches!(
    (prev, next),
    (Boundary::Word | Boundary::Number, Leading::Word | Leading::Number)
      | (Boundary::Plus | Boundary::PlusPlus, Leading::Plus)
      | (Boundary::Minus | Boundary::MinusMinus, Leading::Minus)
      | (Boundary::Slash, Leading::Slash | Leading::Star)
  )
}

fn classify_leading(ch: u8) -> Leading {
  match ch {
    b'0'..=b'9' => Leading::Number,
    b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'$' | b'\\' | 0x80..=0xff => Leading::Word,
    b'+' => Leading::Plus,
    b'-' => Leading::Minus,
    b'/' => Leading::Slash,
    b'*' => Leading::Star,
    _ => Leading::Other,
  }
}

fn classify_trailing(bytes: &[u8]) -> Boundary {
  let n = bytes.len();
  let prev = if n >= 2 { bytes[n - 2] } else { 0 };
  match bytes[n - 1] {
    b'0'..=b'9' => Boundary::Number,
    b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'$' | 0x80..=0xff => Boundary::Word,
    b'+' if prev == b'+' => Boundary::PlusPlus,
    b'+' => Boundary::Plus,
    b'-' if prev == b'-' => Boundary::MinusMinus,
    b'-' => Boundary::Minus,
    b'/' => Boundary::Slash,
    _ => Boundary::None,
  }
}

fn would_start_html_comment(mut state: HtmlStart, bytes: &[u8]) -> bool {
  for &byte in bytes {
    let (next, hazard) = next_html_start(state, byte);
    if hazard {
      return true;
    }
    state = next;
  }
  false
}

fn next_html_start(state: HtmlStart, byte: u8) -> (HtmlStart, bool) {
  if matches!(byte, b'\n' | b'\r') {
    return (HtmlStart::Start, false);
  }
  if byte.is_ascii_whitespace() {
    let next = if state == HtmlStart::Start {
      HtmlStart::Start
    } else {
      HtmlStart::Other
    };
    return (next, false);
  }
  match (state, byte) {
    (HtmlStart::Start | HtmlStart::Other, b'<') => (HtmlStart::Lt, false),
    (HtmlStart::Start, b'-') => (HtmlStart::Dash, false),
    (HtmlStart::Lt, b'!') => (HtmlStart::LtBang, false),
    (HtmlStart::LtBang, b'-') => (HtmlStart::LtBangDash, false),
    (HtmlStart::LtBangDash, b'-') => (HtmlStart::Other, true),
    (HtmlStart::Dash, b'-') => (HtmlStart::DashDash, false),
    (HtmlStart::DashDash, b'>') => (HtmlStart::Other, true),
    _ => (HtmlStart::Other, false),
  }
}

#[cfg(test)]
mod tests {
  use super::classify_leading;
  use super::EmitOptions;
  use super::Emitter;
  use super::Leading;

  #[test]
  fn classifies_the_first_byte_of_each_fragment() {
    assert_eq!(classify_leading(b'7'), Leading::Number);
    assert_eq!(classify_leading(b'$'), Leading::Word);
    assert_eq!(classify_leading(b'-'), Leading::Minus);
    assert_eq!(classify_leading(b'/'), Leading::Slash);
    assert_eq!(classify_leading(b'('), Leading::Other);
  }

  #[test]
  fn separates_words_only_when_needed() {
    let mut em = Emitter::new(EmitOptions::minified());
    em.write_keyword("return");
    em.write_identifier("value");
    em.write_punct(";");
    em.write_keyword("typeof");
    em.write_punct("(");
    assert_eq!(em.as_str(), "return value;typeof(");
  }

  #[test]
  fn disambiguates_adjacent_operators() {
    let mut em = Emitter::new(EmitOptions::minified());
    em.write_identifier("a");
    em.write_punct("++");
    em.write_punct("+");
    em.write_identifier("b");
    em.write_punct("-");
    em.write_punct("-");
    em.write_identifier("c");
    assert_eq!(em.as_str(), "a++ +b- -c");
  }

  #[test]
  fn breaks_html_comment_openers() {
    let mut em = Emitter::new(EmitOptions::minified());
    em.write_identifier("a");
    em.write_punct("<");
    em.write_punct("!");
    em.write_punct("--");
    em.write_identifier("b");
    assert_eq!(em.as_str(), "a<! --b");
  }

  #[test]
  fn indents_new_lines() {
    let mut em = Emitter::new(EmitOptions::canonical());
    em.write_punct("{");
    em.indented(|em| {
      em.write_newline();
      em.write_identifier("a");
    });
    em.write_newline();
    em.write_punct("}");
    assert_eq!(em.as_str(), "{\n  a\n}");
  }
}
