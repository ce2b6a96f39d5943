use crate::lex::lex_next;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::token::TT;
use crate::token::TT::*;

fn check<const N: usize>(code: &str, expecteds: [TT; N]) {
  let mut lexer = Lexer::new(code);
  for expected in expecteds {
    let t = lex_next(&mut lexer, LexMode::Standard);
    assert_eq!(t.typ, expected, "lexing {code:?}");
  }
  let t = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!(EOF, t.typ);
}

#[test]
fn test_lex_keywords() {
  check("class", [KeywordClass]);
  check("instanceof", [KeywordInstanceof]);
  check("let yield", [KeywordLet, KeywordYield]);
}

#[test]
fn test_lex_identifiers() {
  check("h929", [Identifier]);
  check("classy", [Identifier]);
  check("$el _x", [Identifier, Identifier]);
  check("caf\u{e9}", [Identifier]);
  check("\\u0066or", [Identifier]);
}

#[test]
fn test_lex_literal_numbers() {
  check("1", [LiteralNumber]);
  check("929", [LiteralNumber]);
  check(".929", [LiteralNumber]);
  check(". 929", [Dot, LiteralNumber]);
  check(". 929.2.", [Dot, LiteralNumber, Dot]);
  check(".929.2..", [LiteralNumber, LiteralNumber, Dot, Dot]);
  check("?.929", [Question, LiteralNumber]);
  check("?..929", [QuestionDot, LiteralNumber]);
  check("1_000_000", [LiteralNumber]);
  check("1e-7", [LiteralNumber]);
  check("0xFF", [LiteralNumber]);
  check("3x", [Invalid, Identifier]);
}

#[test]
fn test_lex_literal_bigints() {
  check("1n", [LiteralBigInt]);
  check("10000n", [LiteralBigInt]);
  check("0x800faceb00cn", [LiteralBigInt]);
  check("0b110101010n", [LiteralBigInt]);
  check("0o12077n", [LiteralBigInt]);
}

#[test]
fn test_lex_literal_strings() {
  check("'hello world'", [LiteralString]);
  check("\"a\\\"b\"", [LiteralString]);
  check("'line \\\ncontinued'", [LiteralString]);
  check("'hello world\n'", [Invalid]);
}

#[test]
fn test_lex_comments_and_line_terminators() {
  let mut lexer = Lexer::new("a /* x */ b // y\n/* z\n */ c");
  let a = lex_next(&mut lexer, LexMode::Standard);
  let b = lex_next(&mut lexer, LexMode::Standard);
  let c = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!((a.typ, b.typ, c.typ), (Identifier, Identifier, Identifier));
  assert!(!b.preceded_by_line_terminator);
  assert!(c.preceded_by_line_terminator);
  assert_eq!(&lexer[c.loc], "c");
}

#[test]
fn test_lex_html_comments() {
  check("<!-- hidden\nx", [Identifier]);
  check("-->\nx", [Identifier]);
  check("x-->y", [Identifier, HyphenHyphen, ChevronRight, Identifier]);
}

#[test]
fn test_lex_regex_depends_on_mode() {
  let mut lexer = Lexer::new("/a[/]b/gi");
  let t = lex_next(&mut lexer, LexMode::SlashIsRegex);
  assert_eq!(t.typ, LiteralRegex);
  assert_eq!(t.loc.1, 9);
  check("a / b / c", [Identifier, Slash, Identifier, Slash, Identifier]);
}

#[test]
fn test_lex_template_parts() {
  let mut lexer = Lexer::new("`a${ b }c`");
  let head = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!(head.typ, LiteralTemplatePartString);
  assert_eq!(&lexer[head.loc], "`a${");
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).typ, Identifier);
  let tail = lex_next(&mut lexer, LexMode::TemplateStrContinue);
  assert_eq!(tail.typ, LiteralTemplatePartStringEnd);
  assert_eq!(&lexer[tail.loc], "}c`");
}

#[test]
fn test_lex_punctuators_longest_match() {
  check(
    "a >>>= b ?? c ??= d?.e",
    [
      Identifier,
      ChevronRightChevronRightChevronRightEquals,
      Identifier,
      QuestionQuestion,
      Identifier,
      QuestionQuestionEquals,
      Identifier,
      QuestionDot,
      Identifier,
    ],
  );
  check("#priv", [PrivateMember]);
}
