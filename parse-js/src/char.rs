use ahash::HashSet;
use ahash::HashSetExt;
use core::ops::RangeInclusive;
use once_cell::sync::Lazy;

#[derive(Clone)]
pub struct CharFilter {
  chars: HashSet<char>,
}

impl CharFilter {
  pub fn new() -> CharFilter {
    CharFilter {
      chars: HashSet::new(),
    }
  }

  pub fn add_char(&mut self, c: char) {
    self.chars.insert(c);
  }

  pub fn add_chars(&mut self, chars: RangeInclusive<char>) {
    for c in chars {
      self.chars.insert(c);
    }
  }

  pub fn has(&self, c: char) -> bool {
    self.chars.contains(&c)
  }
}

impl Default for CharFilter {
  fn default() -> Self {
    CharFilter::new()
  }
}

pub const ECMASCRIPT_LINE_TERMINATORS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

#[inline]
pub fn is_line_terminator(c: char) -> bool {
  ECMASCRIPT_LINE_TERMINATORS.contains(&c)
}

// Numeric separators are accepted anywhere within the digits; the lexer does not check placement.
fn digits_with_separator(digits: &[RangeInclusive<char>]) -> CharFilter {
  let mut filter = CharFilter::new();
  for r in digits {
    filter.add_chars(r.clone());
  }
  filter.add_char('_');
  filter
}

pub static DIGIT: Lazy<CharFilter> = Lazy::new(|| digits_with_separator(&['0'..='9']));

pub static DIGIT_BIN: Lazy<CharFilter> = Lazy::new(|| digits_with_separator(&['0'..='1']));

pub static DIGIT_HEX: Lazy<CharFilter> =
  Lazy::new(|| digits_with_separator(&['0'..='9', 'a'..='f', 'A'..='F']));

pub static DIGIT_OCT: Lazy<CharFilter> = Lazy::new(|| digits_with_separator(&['0'..='7']));

// Non-ASCII characters are handled separately by the lexer, which assumes any of them in
// identifier position belongs to the identifier.
pub static ID_START: Lazy<CharFilter> = Lazy::new(|| {
  let mut filter = CharFilter::new();
  filter.add_chars('a'..='z');
  filter.add_chars('A'..='Z');
  filter.add_char('_');
  filter.add_char('$');
  filter
});

pub static ID_CONTINUE: Lazy<CharFilter> = Lazy::new(|| {
  let mut filter = (*ID_START).clone();
  filter.add_chars('0'..='9');
  filter
});

#[inline]
fn is_non_ascii_id_char(c: char) -> bool {
  !c.is_ascii() && !c.is_whitespace() && c != '\u{FEFF}'
}

#[inline]
pub fn is_id_start(c: char) -> bool {
  is_non_ascii_id_char(c) || ID_START.has(c)
}

#[inline]
pub fn is_id_continue(c: char) -> bool {
  is_non_ascii_id_char(c) || ID_CONTINUE.has(c)
}
