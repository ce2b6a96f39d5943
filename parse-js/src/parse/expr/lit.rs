use super::pat::is_valid_pattern_identifier;
use super::ParseCtx;
use super::Parser;
use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::class_or_object::ClassOrObjVal;
use crate::ast::class_or_object::ObjMember;
use crate::ast::class_or_object::ObjMemberType;
use crate::ast::expr::lit::LitArrElem;
use crate::ast::expr::lit::LitArrExpr;
use crate::ast::expr::lit::LitBigIntExpr;
use crate::ast::expr::lit::LitBoolExpr;
use crate::ast::expr::lit::LitNullExpr;
use crate::ast::expr::lit::LitNumExpr;
use crate::ast::expr::lit::LitObjExpr;
use crate::ast::expr::lit::LitRegexExpr;
use crate::ast::expr::lit::LitStrExpr;
use crate::ast::expr::lit::LitTemplateExpr;
use crate::ast::expr::lit::LitTemplatePart;
use crate::ast::expr::IdExpr;
use crate::ast::node::Node;
use crate::char::is_line_terminator;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::loc::Loc;
use crate::num::JsNumber;
use crate::parse::unexpected;
use crate::token::TT;

pub fn normalise_literal_number(raw: &str) -> Option<JsNumber> {
  JsNumber::from_literal(raw)
}

/// Keeps the digits as written, minus the `n` suffix.
pub fn normalise_literal_bigint(raw: &str) -> Option<String> {
  let digits = raw.strip_suffix('n')?;
  if digits.is_empty() || digits.ends_with('_') {
    return None;
  };
  Some(digits.to_string())
}

#[derive(Clone, Copy, Debug)]
enum LiteralErrorKind {
  InvalidEscape,
  LineTerminator,
}

#[derive(Clone, Copy, Debug)]
struct LiteralError {
  kind: LiteralErrorKind,
  offset: usize,
}

fn hex_value(raw: &str) -> Option<u32> {
  if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_hexdigit()) {
    return None;
  };
  u32::from_str_radix(raw, 16).ok()
}

/// Decodes one escape sequence, `raw` starting right after the backslash. Returns the number of bytes consumed and the character, which is None for a line continuation.
fn decode_escape_sequence(raw: &str) -> Option<(usize, Option<char>)> {
  let first = raw.chars().next()?;
  Some(match first {
    '\r' => (if raw[1..].starts_with('\n') { 2 } else { 1 }, None),
    c if is_line_terminator(c) => (c.len_utf8(), None),
    'b' => (1, Some('\x08')),
    'f' => (1, Some('\x0c')),
    'n' => (1, Some('\n')),
    'r' => (1, Some('\r')),
    't' => (1, Some('\t')),
    'v' => (1, Some('\x0b')),
    '0'..='7' => {
      // Legacy octal escapes take up to three digits and never exceed 0o377.
      let max_len = if first <= '3' { 3 } else { 2 };
      let len = raw
        .bytes()
        .take(max_len)
        .take_while(|b| (b'0'..=b'7').contains(b))
        .count();
      let value = u32::from_str_radix(&raw[..len], 8).ok()?;
      (len, Some(char::from_u32(value)?))
    }
    'x' => (3, Some(char::from_u32(hex_value(raw.get(1..3)?)?)?)),
    'u' => {
      if raw[1..].starts_with('{') {
        let end = raw.find('}')?;
        (end + 1, Some(char::from_u32(hex_value(&raw[2..end])?)?))
      } else {
        let high = hex_value(raw.get(1..5)?)?;
        // A surrogate pair is written as two consecutive escapes.
        if (0xD800..0xDC00).contains(&high) && raw[5..].starts_with("\\u") {
          if let Some(low) = raw.get(7..11).and_then(hex_value) {
            if (0xDC00..0xE000).contains(&low) {
              let c = char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))?;
              return Some((11, Some(c)));
            };
          };
        };
        // A lone surrogate cannot be represented in a Rust string.
        (5, Some(char::from_u32(high).unwrap_or(char::REPLACEMENT_CHARACTER)))
      }
    }
    c => (c.len_utf8(), Some(c)),
  })
}

fn decode_literal(raw: &str) -> Result<String, LiteralError> {
  let mut out = String::with_capacity(raw.len());
  let mut i = 0;
  while let Some(c) = raw[i..].chars().next() {
    match c {
      '\\' => {
        let (len, decoded) = decode_escape_sequence(&raw[i + 1..]).ok_or(LiteralError {
          kind: LiteralErrorKind::InvalidEscape,
          offset: i,
        })?;
        if let Some(decoded) = decoded {
          out.push(decoded);
        };
        i += 1 + len;
      }
      '\n' | '\r' => {
        return Err(LiteralError {
          kind: LiteralErrorKind::LineTerminator,
          offset: i,
        })
      }
      c => {
        out.push(c);
        i += c.len_utf8();
      }
    };
  }
  Ok(out)
}

pub fn normalise_literal_string(raw: &str) -> Option<String> {
  if raw.len() < 2 {
    return None;
  }
  decode_literal(&raw[1..raw.len() - 1]).ok()
}

/// The raw text of a template part token, without its delimiters (a backtick or `}` before, a backtick or `${` after).
fn template_part_raw(raw: &str, is_end: bool) -> &str {
  let end = raw.len() - if is_end { 1 } else { 2 };
  raw.get(1..end).unwrap_or("")
}

impl<'a> Parser<'a> {
  pub fn lit_arr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<LitArrExpr>> {
    self.with_loc(|p| {
      p.require(TT::BracketOpen)?;
      let mut elements = Vec::<LitArrElem>::new();
      loop {
        if p.consume_if(TT::Comma).is_match() {
          elements.push(LitArrElem::Empty);
          continue;
        };
        if p.peek().typ == TT::BracketClose {
          break;
        };
        let rest = p.consume_if(TT::DotDotDot).is_match();
        let value = p.expr(ctx, [TT::Comma, TT::BracketClose])?;
        elements.push(if rest {
          LitArrElem::Rest(value)
        } else {
          LitArrElem::Single(value)
        });
        if p.peek().typ == TT::BracketClose {
          break;
        };
        p.require(TT::Comma)?;
      }
      p.require(TT::BracketClose)?;
      Ok(LitArrExpr { elements })
    })
  }

  pub fn lit_bigint(&mut self) -> SyntaxResult<Node<LitBigIntExpr>> {
    self.with_loc(|p| {
      let value = p.lit_bigint_val()?;
      Ok(LitBigIntExpr { value })
    })
  }

  pub fn lit_bigint_val(&mut self) -> SyntaxResult<String> {
    let t = self.require(TT::LiteralBigInt)?;
    normalise_literal_bigint(self.str(t.loc))
      .ok_or_else(|| t.loc.error(SyntaxErrorType::MalformedLiteralBigInt, None))
  }

  pub fn lit_bool(&mut self) -> SyntaxResult<Node<LitBoolExpr>> {
    self.with_loc(|p| {
      if p.consume_if(TT::LiteralTrue).is_match() {
        Ok(LitBoolExpr { value: true })
      } else {
        p.require(TT::LiteralFalse)?;
        Ok(LitBoolExpr { value: false })
      }
    })
  }

  pub fn lit_null(&mut self) -> SyntaxResult<Node<LitNullExpr>> {
    self.with_loc(|p| {
      p.require(TT::LiteralNull)?;
      Ok(LitNullExpr {})
    })
  }

  pub fn lit_num(&mut self) -> SyntaxResult<Node<LitNumExpr>> {
    self.with_loc(|p| {
      let value = p.lit_num_val()?;
      Ok(LitNumExpr { value })
    })
  }

  pub fn lit_num_val(&mut self) -> SyntaxResult<JsNumber> {
    let t = self.consume();
    if t.typ != TT::LiteralNumber {
      return Err(unexpected(&t, SyntaxErrorType::MalformedLiteralNumber));
    };
    normalise_literal_number(self.str(t.loc))
      .ok_or_else(|| t.loc.error(SyntaxErrorType::MalformedLiteralNumber, None))
  }

  pub fn lit_obj(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<LitObjExpr>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let members = p.repeat_until_tt(TT::BraceClose, |p| {
        let member = p.with_loc(|p| {
          if p.consume_if(TT::DotDotDot).is_match() {
            let val = p.expr(ctx, [TT::Comma, TT::BraceClose])?;
            return Ok(ObjMember {
              typ: ObjMemberType::Rest { val },
            });
          };
          let (key, val) = p.class_or_obj_member(ctx, false)?;
          let typ = match (key, val) {
            (ClassOrObjKey::Direct(key), ClassOrObjVal::Prop(None)) => {
              if !is_valid_pattern_identifier(key.stx.tt, ctx.rules) {
                return Err(key.error(SyntaxErrorType::ExpectedSyntax("identifier")));
              };
              // `{ a = 1 }` is only valid if this literal is later reinterpreted as a pattern.
              let initializer = p
                .consume_if(TT::Equals)
                .and_then(|| p.expr(ctx, [TT::Comma, TT::BraceClose]))?;
              ObjMemberType::Shorthand {
                id: key.map_stx(|k| IdExpr { name: k.key }),
                initializer,
              }
            }
            (ClassOrObjKey::Computed(key), ClassOrObjVal::Prop(None)) => {
              return Err(key.error(SyntaxErrorType::ExpectedSyntax("object literal value")));
            }
            (key, val) => ObjMemberType::Valued { key, val },
          };
          Ok(ObjMember { typ })
        })?;
        if p.peek().typ != TT::BraceClose {
          p.require(TT::Comma)?;
        };
        Ok(member)
      })?;
      p.require(TT::BraceClose)?;
      Ok(LitObjExpr { members })
    })
  }

  pub fn lit_regex(&mut self) -> SyntaxResult<Node<LitRegexExpr>> {
    self.with_loc(|p| {
      let t = p.consume_with_mode(LexMode::SlashIsRegex);
      if t.typ != TT::LiteralRegex {
        let err = if p.str(t.loc).starts_with('/') {
          SyntaxErrorType::LineTerminatorInRegex
        } else {
          SyntaxErrorType::RequiredTokenNotFound(TT::LiteralRegex)
        };
        return Err(unexpected(&t, err));
      };
      Ok(LitRegexExpr {
        value: p.string(t.loc),
      })
    })
  }

  pub fn lit_str(&mut self) -> SyntaxResult<Node<LitStrExpr>> {
    self.with_loc(|p| {
      let value = p.lit_str_val()?;
      Ok(LitStrExpr { value })
    })
  }

  pub fn lit_str_val(&mut self) -> SyntaxResult<String> {
    let t = self.consume();
    let raw = self.str(t.loc);
    let quoted = raw.starts_with(['"', '\'']);
    if t.typ != TT::LiteralString {
      let err = if quoted {
        SyntaxErrorType::LineTerminatorInString
      } else {
        SyntaxErrorType::RequiredTokenNotFound(TT::LiteralString)
      };
      return Err(unexpected(&t, err));
    };
    decode_literal(&raw[1..raw.len() - 1]).map_err(|err| {
      let typ = match err.kind {
        LiteralErrorKind::InvalidEscape => SyntaxErrorType::InvalidCharacterEscape,
        LiteralErrorKind::LineTerminator => SyntaxErrorType::LineTerminatorInString,
      };
      let start = t.loc.0 + 1 + err.offset;
      Loc(start, start + 1).error(typ, Some(TT::LiteralString))
    })
  }

  pub fn lit_template(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<LitTemplateExpr>> {
    self.with_loc(|p| {
      let parts = p.lit_template_parts(ctx)?;
      Ok(LitTemplateExpr { parts })
    })
  }

  /// Parses a template from its first part, keeping each string part's raw source text.
  pub fn lit_template_parts(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<LitTemplatePart>> {
    let t = self.consume();
    let mut is_end = match t.typ {
      TT::LiteralTemplatePartString => false,
      TT::LiteralTemplatePartStringEnd => true,
      _ => {
        return Err(unexpected(
          &t,
          SyntaxErrorType::ExpectedSyntax("template string part"),
        ))
      }
    };
    let mut parts = vec![LitTemplatePart::String(
      template_part_raw(self.str(t.loc), is_end).to_string(),
    )];
    while !is_end {
      let substitution = self.expr(ctx, [TT::BraceClose])?;
      parts.push(LitTemplatePart::Substitution(substitution));
      let string = self.consume_with_mode(LexMode::TemplateStrContinue);
      is_end = match string.typ {
        TT::LiteralTemplatePartString => false,
        TT::LiteralTemplatePartStringEnd => true,
        _ => {
          return Err(unexpected(
            &string,
            SyntaxErrorType::ExpectedSyntax("template string part"),
          ))
        }
      };
      parts.push(LitTemplatePart::String(
        template_part_raw(self.str(string.loc), is_end).to_string(),
      ));
    }
    Ok(parts)
  }
}

#[cfg(test)]
mod tests {
  use super::normalise_literal_bigint;
  use super::normalise_literal_string;

  #[test]
  fn decodes_string_escapes() {
    let decode = |raw: &str| normalise_literal_string(raw).unwrap();
    assert_eq!(decode(r#""a\nb""#), "a\nb");
    assert_eq!(decode(r#"'\x41B\u{43}'"#), "ABC");
    assert_eq!(decode(r#""😀""#), "\u{1F600}");
    assert_eq!(decode(r#""\101""#), "A");
    assert_eq!(decode("\"a\\\nb\""), "ab");
    assert_eq!(decode(r#""\q""#), "q");
    assert!(normalise_literal_string(r#""\x4""#).is_none());
  }

  #[test]
  fn keeps_bigint_digits() {
    assert_eq!(normalise_literal_bigint("0x1Fn").as_deref(), Some("0x1F"));
    assert_eq!(normalise_literal_bigint("10n").as_deref(), Some("10"));
    assert!(normalise_literal_bigint("10").is_none());
  }
}
