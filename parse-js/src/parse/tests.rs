use super::Parser;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::ast::stmt::ForInOfLhs;
use crate::ast::stmt::ForTripleStmtInit;
use crate::ast::stmt::Stmt;
use crate::ast::stx::TopLevel;
use crate::error::SyntaxErrorType;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::parse;
use crate::token::TT;
use serde_json::json;
use serde_json::to_string_pretty;
use serde_json::Value;
use similar::ChangeTag;
use similar::TextDiff;

fn assert_json_eq(actual: Value, expected: Value) {
  if actual == expected {
    return;
  };
  let expected_fmt = to_string_pretty(&expected).unwrap();
  let actual_fmt = to_string_pretty(&actual).unwrap();
  let mut msg = String::from("serialized tree differs:\n");
  let diff = TextDiff::from_lines(&expected_fmt, &actual_fmt);
  for change in diff.iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    msg.push_str(sign);
    msg.push_str(change.as_str().unwrap());
  }
  panic!("{}", msg);
}

fn body(source: &str) -> Vec<Node<Stmt>> {
  let top: Node<TopLevel> = parse(source).unwrap();
  top.stx.body
}

fn first_expr(source: &str) -> Node<Expr> {
  let mut stmts = body(source);
  match *stmts.remove(0).stx {
    Stmt::Expr(e) => e.stx.expr,
    other => panic!("expected expression statement, got {:?}", other),
  }
}

#[test]
fn test_parser() {
  let lexer = Lexer::new("let x = /a/ / 1;");
  let mut p = Parser::new(lexer);
  // Initial state.
  let cp = p.checkpoint();
  assert_eq!(p.next_tok_i, 0);

  // Peek the first token.
  let t = p.peek();
  assert_eq!(p.next_tok_i, 0);
  assert_eq!(p.buf.len(), 1);
  assert_eq!(t.typ, TT::KeywordLet);

  // Consume the first token.
  let t = p.consume();
  assert_eq!(p.next_tok_i, 1);
  assert_eq!(p.buf.len(), 1);
  assert_eq!(t.typ, TT::KeywordLet);

  // Consume the second token.
  let t = p.consume();
  assert_eq!(p.next_tok_i, 2);
  assert_eq!(p.buf.len(), 2);
  assert_eq!(t.typ, TT::Identifier);

  // Reset to a past point.
  p.restore_checkpoint(cp);
  assert_eq!(p.next_tok_i, 0);
  assert_eq!(p.buf.len(), 2);

  // Peek using a different mode, which should truncate the buffer.
  let t = p.peek_with_mode(LexMode::SlashIsRegex);
  assert_eq!(p.next_tok_i, 0);
  assert_eq!(p.buf.len(), 1);
  assert_eq!(t.typ, TT::KeywordLet);
}

#[test]
fn test_serialized_assignment() {
  let top = parse("a = b;").unwrap();
  assert_json_eq(
    serde_json::to_value(&top).unwrap(),
    json!({
      "body": [{
        "$t": "Expr",
        "expr": {
          "$t": "Binary",
          "operator": "Assignment",
          "left": { "$t": "IdPat", "name": "a" },
          "right": { "$t": "Id", "name": "b" },
        },
      }],
    }),
  );
}

#[test]
fn test_asi() {
  assert_eq!(body("a\nb").len(), 2);
  assert!(parse("a b").is_err());
  assert_eq!(body("{ a } b").len(), 2);
  // `return` followed by a line terminator returns nothing.
  let stmts = body("function f() { return\n1 }");
  let Stmt::FunctionDecl(f) = stmts[0].stx.as_ref() else {
    panic!("expected function declaration");
  };
  let crate::ast::func::FuncBody::Block(block) = &f.stx.function.stx.body else {
    panic!("expected block body");
  };
  assert_eq!(block.stx.body.len(), 2);
  assert!(matches!(block.stx.body[0].stx.as_ref(), Stmt::Return(r) if r.stx.value.is_none()));
}

#[test]
fn test_do_while_semicolon_is_optional() {
  let stmts = body("do x(); while (y) z()");
  assert_eq!(stmts.len(), 2);
  assert!(matches!(stmts[0].stx.as_ref(), Stmt::DoWhile(_)));
}

#[test]
fn test_throw_line_terminator() {
  let err = parse("throw\nnew Error()").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::LineTerminatorAfterThrow);
}

#[test]
fn test_try_requires_handler() {
  let err = parse("try {}").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::TryStatementHasNoCatchOrFinally);
  assert!(parse("try {} catch {}").is_ok());
  assert!(parse("try {} catch ({ message }) {} finally {}").is_ok());
}

#[test]
fn test_for_variants() {
  let stmts = body(
    "for (var i = 0, n = a.length; i < n; i++) {}
     for (const k in o);
     for (x.y of list) x;
     for (;;) break;",
  );
  let Stmt::ForTriple(triple) = stmts[0].stx.as_ref() else {
    panic!("expected for triple");
  };
  let ForTripleStmtInit::Decl(decl) = &triple.stx.init else {
    panic!("expected declaration init");
  };
  assert_eq!(decl.stx.declarators.len(), 2);
  assert!(triple.stx.cond.is_some() && triple.stx.post.is_some());

  let Stmt::ForIn(for_in) = stmts[1].stx.as_ref() else {
    panic!("expected for in");
  };
  assert!(matches!(for_in.stx.lhs, ForInOfLhs::Decl(_)));

  let Stmt::ForOf(for_of) = stmts[2].stx.as_ref() else {
    panic!("expected for of");
  };
  assert!(matches!(for_of.stx.lhs, ForInOfLhs::Assign(_)));

  let Stmt::ForTriple(empty) = stmts[3].stx.as_ref() else {
    panic!("expected for triple");
  };
  assert!(matches!(empty.stx.init, ForTripleStmtInit::None));
  assert!(empty.stx.cond.is_none());
}

#[test]
fn test_for_in_rejects_initialized_declarators() {
  assert!(parse("for (let a = 1 of b);").is_err());
  assert!(parse("for (let a, b in c);").is_err());
}

#[test]
fn test_let_as_identifier() {
  assert!(matches!(
    body("let = 1")[0].stx.as_ref(),
    Stmt::Expr(_)
  ));
  assert!(matches!(
    body("let [a] = b")[0].stx.as_ref(),
    Stmt::VarDecl(_)
  ));
}

#[test]
fn test_seq_is_flat() {
  let expr = first_expr("a, b, c, d;");
  let Expr::Seq(seq) = expr.stx.as_ref() else {
    panic!("expected sequence");
  };
  assert_eq!(seq.stx.exprs.len(), 4);
}

#[test]
fn test_call_spans_through_arguments() {
  let source = "f(a)(b, ...c)?.(d);";
  let expr = first_expr(source);
  let Expr::Call(outer) = expr.stx.as_ref() else {
    panic!("expected call");
  };
  assert!(outer.stx.optional_chaining);
  assert_eq!(&source[outer.loc.0..outer.loc.1], "f(a)(b, ...c)?.(d)");
  let Expr::Call(inner) = outer.stx.callee.stx.as_ref() else {
    panic!("expected chained call");
  };
  assert!(!inner.stx.optional_chaining);
  assert_eq!(&source[inner.loc.0..inner.loc.1], "f(a)(b, ...c)");
  let spread = &inner.stx.arguments[1];
  assert!(spread.stx.spread);
  assert_eq!(&source[spread.loc.0..spread.loc.1], "...c");
}

#[test]
fn test_arrow_ends_at_comma() {
  let expr = first_expr("x => x, y");
  let Expr::Seq(seq) = expr.stx.as_ref() else {
    panic!("expected sequence");
  };
  assert!(matches!(seq.stx.exprs[0].stx.as_ref(), Expr::ArrowFunc(_)));
  assert!(matches!(seq.stx.exprs[1].stx.as_ref(), Expr::Id(_)));
}

#[test]
fn test_destructuring_assignment() {
  let expr = first_expr("[a, { b = 1 }, ...c] = d");
  let Some((_, target, _)) = expr.stx.as_assignment() else {
    panic!("expected assignment");
  };
  assert!(matches!(target.stx.as_ref(), Expr::ArrPat(_)));
  assert!(parse("a + b = c").is_err());
}

#[test]
fn test_labels_and_switch() {
  let stmts = body(
    "outer: for (;;) { switch (x) { case 1: case 2: f(); break outer; default: continue outer } }",
  );
  let Stmt::Label(label) = stmts[0].stx.as_ref() else {
    panic!("expected label");
  };
  assert_eq!(label.stx.name, "outer");
  let Stmt::ForTriple(for_stmt) = label.stx.statement.stx.as_ref() else {
    panic!("expected for");
  };
  let Stmt::Block(block) = for_stmt.stx.body.stx.as_ref() else {
    panic!("expected block");
  };
  let Stmt::Switch(switch) = block.stx.body[0].stx.as_ref() else {
    panic!("expected switch");
  };
  assert_eq!(switch.stx.branches.len(), 3);
  assert!(switch.stx.branches[0].stx.body.is_empty());
  assert_eq!(switch.stx.branches[1].stx.body.len(), 2);
  assert!(switch.stx.branches[2].stx.case.is_none());
  assert!(matches!(
    switch.stx.branches[2].stx.body[0].stx.as_ref(),
    Stmt::Continue(c) if c.stx.label.as_deref() == Some("outer")
  ));
}

#[test]
fn test_class_declaration() {
  let stmts = body("class A extends B { static x = 1; #y; get z() { return 1 } static { init() } }");
  let Stmt::ClassDecl(class) = stmts[0].stx.as_ref() else {
    panic!("expected class");
  };
  assert_eq!(class.stx.name.stx.name, "A");
  assert!(class.stx.extends.is_some());
  assert_eq!(class.stx.members.len(), 4);
}

#[test]
fn test_hashbang() {
  assert_eq!(body("#!/usr/bin/env node\nx").len(), 1);
}
