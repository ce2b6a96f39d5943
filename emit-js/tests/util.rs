#![allow(dead_code)]

use parse_js::ast::expr::Expr;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::Stmt;
use parse_js::ast::stx::TopLevel;
use serde_json::Value;
use similar::ChangeTag;
use similar::TextDiff;

pub fn parse(source: &str) -> Node<TopLevel> {
  match parse_js::parse(source) {
    Ok(top) => top,
    Err(err) => panic!("failed to parse {source:?}: {err:?}"),
  }
}

/// The expression of the first statement, which must be an expression statement.
pub fn first_expr(source: &str) -> Node<Expr> {
  let mut top = parse(source);
  match *top.stx.body.remove(0).stx {
    Stmt::Expr(stmt) => stmt.stx.expr,
    other => panic!("expected expression statement, got {other:?}"),
  }
}

pub fn syntax_value(top: &Node<TopLevel>) -> Value {
  serde_json::to_value(top).expect("serialize syntax")
}

pub fn assert_text_eq(actual: &str, expected: &str) {
  if actual == expected {
    return;
  };
  let mut msg = String::from("emitted text differs:\n");
  for change in TextDiff::from_lines(expected, actual).iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    msg.push_str(sign);
    msg.push_str(&change.to_string());
    if change.missing_newline() {
      msg.push('\n');
    };
  }
  panic!("{msg}");
}
