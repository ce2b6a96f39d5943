use super::util::binary;
use super::util::block;
use super::util::block_exprs;
use super::util::check_expr_block;
use super::util::empty_stmt;
use super::util::seq;
use super::RewriteCtx;
use crate::err::Mismatch;
use crate::err::Rejected;
use crate::err::RuleResult;
use crate::options::WhileForm;
use parse_js::ast::expr::lit::LitBoolExpr;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::DoWhileStmt;
use parse_js::ast::stmt::ForTripleStmt;
use parse_js::ast::stmt::Stmt;
use parse_js::ast::stmt::WhileStmt;
use parse_js::operator::OperatorName;

const LOOP_BODY: &str = "loop body";

/// `for (i = 0; i < n; i++) { a; b; }` becomes `for (i = 0; i < n; a, b, i++) {}`.
pub fn for_loop(cx: &mut RewriteCtx, node: Node<ForTripleStmt>) -> RuleResult<Node<ForTripleStmt>, Node<Stmt>> {
  if let Err(reason) = check_expr_block(&node.stx.body, LOOP_BODY) {
    return Err(Rejected::new(node, reason));
  };
  let loc = node.loc;
  let ForTripleStmt {
    init,
    cond,
    post,
    body,
  } = *node.stx;
  let Some(post) = post else {
    let node = Node::new(loc, ForTripleStmt {
      init,
      cond,
      post: None,
      body,
    });
    return Err(Rejected::new(node, Mismatch::MissingUpdate));
  };
  let mut exprs = block_exprs(body);
  exprs.push(post);
  cx.record(loc);
  Ok(
    Node::new(loc, ForTripleStmt {
      init,
      cond,
      post: Some(seq(loc, exprs)),
      body: block(loc, Vec::new()),
    })
    .into_wrapped(),
  )
}

/// `while (t) { a; b; }` becomes `while (t && (a, b, true)) {}`, or `while ((a, b, t)) {}` in the
/// sequence form.
pub fn while_loop(cx: &mut RewriteCtx, node: Node<WhileStmt>) -> RuleResult<Node<WhileStmt>, Node<Stmt>> {
  if let Err(reason) = check_expr_block(&node.stx.body, LOOP_BODY) {
    return Err(Rejected::new(node, reason));
  };
  let loc = node.loc;
  let WhileStmt { condition, body } = *node.stx;
  let mut exprs = block_exprs(body);
  let condition = match cx.while_form() {
    WhileForm::AndTrue => {
      exprs.push(Node::new(loc, LitBoolExpr { value: true }).into_wrapped());
      binary(loc, OperatorName::LogicalAnd, condition, seq(loc, exprs))
    }
    WhileForm::Sequence => {
      exprs.push(condition);
      seq(loc, exprs)
    }
  };
  cx.record(loc);
  Ok(
    Node::new(loc, WhileStmt {
      condition,
      body: block(loc, Vec::new()),
    })
    .into_wrapped(),
  )
}

/// `do { a; b; } while (t)` becomes `while ((a, b, t));`.
pub fn do_while(cx: &mut RewriteCtx, node: Node<DoWhileStmt>) -> RuleResult<Node<DoWhileStmt>, Node<Stmt>> {
  if let Err(reason) = check_expr_block(&node.stx.body, LOOP_BODY) {
    return Err(Rejected::new(node, reason));
  };
  let loc = node.loc;
  let DoWhileStmt { condition, body } = *node.stx;
  let mut exprs = block_exprs(body);
  exprs.push(condition);
  cx.record(loc);
  Ok(
    Node::new(loc, WhileStmt {
      condition: seq(loc, exprs),
      body: empty_stmt(loc),
    })
    .into_wrapped(),
  )
}

#[cfg(test)]
mod tests {
  use crate::exprify_with_options;
  use crate::rewrite::tests::rewritten;
  use crate::ExprifyOptions;
  use crate::Rule;
  use crate::RuleSet;
  use crate::WhileForm;

  fn loops(source: &str) -> String {
    rewritten(
      source,
      RuleSet::none()
        .with(Rule::For)
        .with(Rule::While)
        .with(Rule::DoWhile),
    )
  }

  #[test]
  fn folds_for_bodies_into_the_update() {
    assert_eq!(
      loops("for (i = 0; i < n; i++) { f(i); g(i); }"),
      "for (i = 0; i < n; f(i), g(i), i++) {}"
    );
    assert_eq!(
      loops("for (;;i++) {\n  x += i\n}\nreturn_();"),
      "for (;; x += i, i++) {}\nreturn_();"
    );
  }

  #[test]
  fn skips_for_loops_it_cannot_fold() {
    for source in [
      "for (i = 0; i < n;) { f(i); }",
      "for (i = 0; i < n; i++) f(i);",
      "for (i = 0; i < n; i++) {}",
      "for (i = 0; i < n; i++) { if (a) f(i); }",
      "for (i = 0; i < n; i++) { let x = i; }",
    ] {
      assert_eq!(loops(source), source);
    }
  }

  #[test]
  fn folds_while_bodies_into_the_test() {
    assert_eq!(loops("while (i < n) { f(i); i++; }"), "while (i < n && (f(i), i++, true)) {}");
    let opts = ExprifyOptions::default()
      .with_rules(RuleSet::none().with(Rule::While))
      .with_while_form(WhileForm::Sequence);
    assert_eq!(
      exprify_with_options("while (i < n) { f(i); i++; }", &opts).unwrap(),
      "while (f(i), i++, i < n) {}"
    );
  }

  #[test]
  fn rewrites_do_while_as_while() {
    assert_eq!(loops("do { f(); g(); } while (t());"), "while (f(), g(), t());");
    assert_eq!(loops("do f(); while (t());"), "do f(); while (t());");
    assert_eq!(loops("do {} while (t());"), "do {} while (t());");
  }

  #[test]
  fn rewrites_nested_loops_from_the_outside_in() {
    // The outer loop holds a statement when it is entered, so only the inner loop is folded.
    assert_eq!(
      loops("while (a) { while (b) { f(); } }"),
      "while (a) { while (b && (f(), true)) {} }"
    );
  }
}
