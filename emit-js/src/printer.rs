use crate::edits::EditSet;
use crate::emitter::EmitError;
use crate::emitter::EmitErrorKind;
use crate::emitter::EmitMode;
use crate::emitter::EmitResult;
use crate::emitter::Emitter;
use crate::trivia::after_tokens;
use crate::trivia::is_line_terminator;
use crate::trivia::is_trivia;
use crate::trivia::line_indent;
use crate::trivia::line_start;
use parse_js::loc::Loc;

/// How a reprinted list of statements or members is spaced where no source can be copied.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Layout {
  /// One item per line.
  Lines,
  /// Everything on one line, separated by spaces.
  Inline,
}

/// Prints syntax into an [`Emitter`]. With a source and [`EmitMode::Preserve`], nodes whose range
/// holds no edit are copied from the source instead.
#[derive(Clone, Copy)]
pub(crate) struct Printer<'a> {
  source: Option<(&'a str, &'a EditSet)>,
}

impl<'a> Printer<'a> {
  pub fn detached() -> Printer<'a> {
    Printer { source: None }
  }

  pub fn with_source(source: &'a str, edits: &'a EditSet) -> Printer<'a> {
    Printer {
      source: Some((source, edits)),
    }
  }

  pub fn source(&self) -> Option<&'a str> {
    self.source.map(|(source, _)| source)
  }

  /// The source when nodes are being preserved.
  pub fn preserved_source(&self, em: &Emitter) -> Option<&'a str> {
    match em.mode() {
      EmitMode::Preserve => self.source(),
      EmitMode::Canonical | EmitMode::Minified => None,
    }
  }

  /// The original text of a node that can be copied verbatim.
  pub fn original(&self, em: &Emitter, loc: Loc) -> EmitResult<Option<&'a str>> {
    let Some((source, edits)) = self.source else {
      return Ok(None);
    };
    if em.mode() != EmitMode::Preserve || loc.is_empty() || edits.is_edited(loc) {
      return Ok(None);
    };
    match source.get(loc.0..loc.1) {
      Some(text) => Ok(Some(text)),
      None => Err(EmitError {
        kind: EmitErrorKind::LocOutOfBounds,
        loc: Some(loc),
      }),
    }
  }

  /// Source text between two nodes if it is only whitespace and comments.
  pub fn gap(&self, em: &Emitter, start: usize, end: usize) -> Option<&'a str> {
    let source = self.preserved_source(em)?;
    if start > end {
      return None;
    };
    source.get(start..end).filter(|text| is_trivia(text))
  }

  /// Source text from `start` to `end` if it holds exactly `tokens`, in order, among whitespace
  /// and comments.
  pub fn joint(&self, em: &Emitter, start: usize, end: usize, tokens: &[&str]) -> Option<&'a str> {
    let source = self.preserved_source(em)?;
    let text = source.get(start..end)?;
    let after = after_tokens(source, start, tokens)?;
    (after <= end && is_trivia(&source[after..end])).then_some(text)
  }

  /// Position just past `tokens` read from `pos`, when preserving.
  pub fn skip(&self, em: &Emitter, pos: usize, tokens: &[&str]) -> Option<usize> {
    after_tokens(self.preserved_source(em)?, pos, tokens)
  }

  /// Source text from `start` through the `close` delimiter ending a list, if only `tokens`, an
  /// optional trailing comma, whitespace and comments come before it.
  pub fn closing(
    &self,
    em: &Emitter,
    start: usize,
    tokens: &[&str],
    close: &str,
  ) -> Option<&'a str> {
    let source = self.preserved_source(em)?;
    let after = after_tokens(source, start, tokens)?;
    let end = after_tokens(source, after, &[close])
      .or_else(|| after_tokens(source, after, &[",", close]))?;
    source.get(start..end)
  }

  /// Whether a reprinted list within `loc` goes on one line or one item per line, following how
  /// the source wrote it.
  pub fn layout(&self, em: &Emitter, loc: Loc) -> Layout {
    let single_line = self
      .preserved_source(em)
      .and_then(|source| source.get(loc.0..loc.1))
      .is_some_and(|text| !text.contains(is_line_terminator));
    if single_line {
      Layout::Inline
    } else {
      Layout::Lines
    }
  }

  /// Separates the next item of a list within `parent`.
  pub fn separate(&self, em: &mut Emitter, layout: Layout, parent: Option<Loc>, child: Loc) {
    match layout {
      Layout::Inline => em.write_sep(),
      Layout::Lines => self.newline_for(em, parent, child),
    }
  }

  /// Separates the end of a list from the delimiter closing `parent`.
  pub fn separate_close(&self, em: &mut Emitter, layout: Layout, parent: Loc) {
    match layout {
      Layout::Inline => em.write_sep(),
      Layout::Lines => self.closing_newline(em, parent),
    }
  }

  /// Copies source found between two items, which already holds any line break before `next`.
  pub fn write_gap(&self, em: &mut Emitter, gap: &str, next: Loc) {
    em.write_str(gap);
    if gap.contains(is_line_terminator) {
      if let Some(source) = self.preserved_source(em) {
        if next.0 <= source.len() {
          em.set_indent(line_indent(source, next.0).to_string());
        };
      };
    };
  }

  /// Starts a new line for a child of `parent`. When preserving, the line is indented like the
  /// child's source line, or one level deeper than the current line if both share a line.
  pub fn newline_for(&self, em: &mut Emitter, parent: Option<Loc>, child: Loc) {
    if let Some(source) = self.preserved_source(em) {
      if child.0 < source.len() {
        let shares_line = parent
          .is_some_and(|parent| line_start(source, child.0) == line_start(source, parent.0));
        if !shares_line {
          em.set_indent(line_indent(source, child.0).to_string());
        };
      };
    };
    em.write_newline();
  }

  /// Starts the line that closes `parent`, such as its `}`.
  pub fn closing_newline(&self, em: &mut Emitter, parent: Loc) {
    if let Some(source) = self.preserved_source(em) {
      if parent.0 < source.len() {
        em.set_indent(line_indent(source, parent.0).to_string());
      };
    };
    em.write_newline();
  }

  /// Prints a comma-separated list between `open` and `close`. When preserving and `open_end` is
  /// the source position after the opening delimiter, the source between items and delimiters is
  /// copied wherever it holds only commas, whitespace and comments.
  pub(crate) fn comma_list<T>(
    &self,
    em: &mut Emitter,
    (open, open_end): (&str, Option<usize>),
    close: &str,
    items: &[T],
    loc: impl Fn(&T) -> Loc,
    mut item: impl FnMut(&mut Emitter, &T) -> EmitResult,
  ) -> EmitResult {
    em.write_punct(open);
    let mut prev_end = open_end;
    for (i, it) in items.iter().enumerate() {
      let it_loc = loc(it);
      let tokens: &[&str] = if i == 0 { &[] } else { &[","] };
      match prev_end.and_then(|start| self.joint(em, start, it_loc.0, tokens)) {
        Some(text) => em.write_str(text),
        None if i > 0 => {
          em.write_punct(",");
          em.write_sep();
        }
        None => {}
      };
      item(em, it)?;
      prev_end = Some(it_loc.1);
    }
    match prev_end.and_then(|start| self.closing(em, start, &[], close)) {
      Some(text) => em.write_str(text),
      None => em.write_punct(close),
    };
    Ok(())
  }
}
