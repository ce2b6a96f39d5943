use parse_js::ast::expr::Expr;
use parse_js::ast::stmt::Stmt;
use parse_js::error::SyntaxErrorType;
use parse_js::loc::Loc;
use parse_js::parse;

#[test]
fn parses_realistic_script() {
  let source = r#"
    'use strict';
    const cache = new Map();
    async function load(key, { retries = 3, ...rest } = {}) {
      if (cache.has(key)) return cache.get(key);
      for (let i = 0; i < retries; i++) {
        try {
          const value = await fetch(`/api/${key}?n=${i}`, rest);
          cache.set(key, value);
          return value;
        } catch (e) {
          if (i === retries - 1) throw e;
        }
      }
    }
    label: while (true) { do { break label } while (false) }
    var gen = function* () { yield* [1, 2n, 0x10, .5e3]; };
    x = a ? b : c ?? d, y ||= /re/g.test(z);
  "#;
  let top = parse(source).unwrap();
  assert_eq!(top.stx.body.len(), 6);
  assert!(matches!(top.stx.body[2].stx.as_ref(), Stmt::FunctionDecl(_)));
  assert!(matches!(top.stx.body[3].stx.as_ref(), Stmt::Label(_)));
}

#[test]
fn node_locations_index_into_source() {
  let source = "foo(bar);\nbaz";
  let top = parse(source).unwrap();
  let first = &top.stx.body[0];
  assert_eq!(&source[first.loc.0..first.loc.1], "foo(bar);");
  let Stmt::Expr(e) = top.stx.body[1].stx.as_ref() else {
    panic!("expected expression statement");
  };
  assert_eq!(e.stx.expr.loc, Loc(10, 13));
  assert!(matches!(e.stx.expr.stx.as_ref(), Expr::Id(_)));
}

#[test]
fn reports_unexpected_end() {
  let err = parse("if (a) {").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnexpectedEnd);
  let err = parse("f(").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnexpectedEnd);
}

#[test]
fn rejects_modules() {
  assert!(parse("import x from 'y';").is_err());
  assert!(parse("export const a = 1;").is_err());
}
