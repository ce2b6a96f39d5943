use super::util::block;
use super::util::block_exprs;
use super::util::check_expr_block;
use super::util::expr_stmt;
use super::util::seq;
use super::util::target_value;
use super::util::Assignment;
use super::RewriteCtx;
use crate::err::Mismatch;
use crate::err::Rejected;
use crate::err::RuleResult;
use emit_js::emit_expr;
use emit_js::EmitOptions;
use parse_js::ast::expr::BinaryExpr;
use parse_js::ast::expr::CondExpr;
use parse_js::ast::expr::Expr;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::IfStmt;
use parse_js::ast::stmt::Stmt;
use parse_js::operator::OperatorName;

fn as_assignment(expr: &Node<Expr>) -> Option<&Node<BinaryExpr>> {
  match expr.stx.as_ref() {
    Expr::Binary(binary) if binary.stx.operator.is_assignment() => Some(binary),
    _ => None,
  }
}

fn is_short_circuit(operator: OperatorName) -> bool {
  matches!(
    operator,
    OperatorName::AssignmentLogicalAnd
      | OperatorName::AssignmentLogicalOr
      | OperatorName::AssignmentNullishCoalescing
  )
}

fn check_ternary(cond: &CondExpr) -> Result<(), Mismatch> {
  let cons = as_assignment(&cond.consequent).ok_or(Mismatch::NotAnAssignment("consequent"))?;
  let alt = as_assignment(&cond.alternate).ok_or(Mismatch::NotAnAssignment("alternate"))?;
  let operator = cons.stx.operator;
  if operator != alt.stx.operator {
    return Err(Mismatch::OperatorMismatch);
  };
  if is_short_circuit(operator) {
    return Err(Mismatch::ShortCircuitAssignment);
  };
  // Targets are the same when they print the same.
  let opts = EmitOptions::minified();
  if emit_expr(&cons.stx.left, opts)? != emit_expr(&alt.stx.left, opts)? {
    return Err(Mismatch::TargetMismatch);
  };
  Ok(())
}

/// `t ? (x = a) : (x = b)` becomes `x = t ? a : b`.
pub fn ternary(cx: &mut RewriteCtx, cond: Node<CondExpr>) -> RuleResult<Node<CondExpr>, Node<BinaryExpr>> {
  if let Err(reason) = check_ternary(&cond.stx) {
    return Err(Rejected::new(cond, reason));
  };
  let loc = cond.loc;
  let CondExpr {
    test,
    consequent,
    alternate,
  } = *cond.stx;
  match (Assignment::split(consequent), Assignment::split(alternate)) {
    (Ok(cons), Ok(alt)) => {
      let operator = cons.operator();
      let (target, cons_value) = cons.into_parts();
      let (_, alt_value) = alt.into_parts();
      cx.record(loc);
      let choice = Node::new(loc, CondExpr {
        test,
        consequent: cons_value,
        alternate: alt_value,
      });
      Ok(Node::new(loc, BinaryExpr {
        operator,
        left: target,
        right: choice.into_wrapped(),
      }))
    }
    (consequent, alternate) => {
      let cond = Node::new(loc, CondExpr {
        test,
        consequent: consequent.map_or_else(|expr| expr, Assignment::into_expr),
        alternate: alternate.map_or_else(|expr| expr, Assignment::into_expr),
      });
      Err(Rejected::new(cond, Mismatch::NotAnAssignment("branch")))
    }
  }
}

/// `if (t) { a; b; } else { c; }` becomes `t ? (a, b) : (c);`.
pub fn if_else(cx: &mut RewriteCtx, node: Node<IfStmt>) -> RuleResult<Node<IfStmt>, Node<Stmt>> {
  let checked = check_expr_block(&node.stx.consequent, "consequent").and_then(|_| {
    match &node.stx.alternate {
      Some(alternate) => check_expr_block(alternate, "alternate"),
      None => Err(Mismatch::NotABlock("alternate")),
    }
  });
  if let Err(reason) = checked {
    return Err(Rejected::new(node, reason));
  };
  let loc = node.loc;
  let IfStmt {
    test,
    consequent,
    alternate,
  } = *node.stx;
  let Some(alternate) = alternate else {
    let node = Node::new(loc, IfStmt {
      test,
      consequent,
      alternate: None,
    });
    return Err(Rejected::new(node, Mismatch::NotABlock("alternate")));
  };
  cx.record(loc);
  let choice = Node::new(loc, CondExpr {
    test,
    consequent: seq(loc, block_exprs(consequent)),
    alternate: seq(loc, block_exprs(alternate)),
  });
  Ok(expr_stmt(loc, choice.into_wrapped()))
}

// Returns the value the target holds when the assignment is skipped.
fn check_if_assign(stx: &IfStmt) -> Result<Node<Expr>, Mismatch> {
  if stx.alternate.is_some() {
    return Err(Mismatch::HasElse);
  };
  let Stmt::Block(block) = stx.consequent.stx.as_ref() else {
    return Err(Mismatch::NotABlock("consequent"));
  };
  let stmt = match block.stx.body.as_slice() {
    [] => return Err(Mismatch::EmptyBlock("consequent")),
    [stmt] => stmt,
    stmts => return Err(Mismatch::StatementCount(stmts.len())),
  };
  let Stmt::Expr(expr_stmt) = stmt.stx.as_ref() else {
    return Err(Mismatch::NotAnExpressionStatement("consequent"));
  };
  let assignment = as_assignment(&expr_stmt.stx.expr).ok_or(Mismatch::NotAnAssignment("consequent"))?;
  if assignment.stx.operator != OperatorName::Assignment {
    return Err(Mismatch::CompoundAssignment);
  };
  target_value(&assignment.stx.left)
}

/// `if (t) { x = a; }` becomes `x = t ? a : x;`.
pub fn if_assign(cx: &mut RewriteCtx, node: Node<IfStmt>) -> RuleResult<Node<IfStmt>, Node<Stmt>> {
  let fallback = match check_if_assign(&node.stx) {
    Ok(fallback) => fallback,
    Err(reason) => return Err(Rejected::new(node, reason)),
  };
  let loc = node.loc;
  let IfStmt {
    test, consequent, ..
  } = *node.stx;
  let cons_loc = consequent.loc;
  match block_exprs(consequent).pop().map(Assignment::split) {
    Some(Ok(assignment)) => {
      let (target, value) = assignment.into_parts();
      cx.record(loc);
      let choice = Node::new(loc, CondExpr {
        test,
        consequent: value,
        alternate: fallback,
      });
      let assignment = Node::new(loc, BinaryExpr {
        operator: OperatorName::Assignment,
        left: target,
        right: choice.into_wrapped(),
      });
      Ok(expr_stmt(loc, assignment.into_wrapped()))
    }
    other => {
      let body = other
        .map(|split| split.map_or_else(|expr| expr, Assignment::into_expr))
        .map(|expr| expr_stmt(expr.loc, expr));
      let node = Node::new(loc, IfStmt {
        test,
        consequent: block(cons_loc, body.into_iter().collect()),
        alternate: None,
      });
      Err(Rejected::new(node, Mismatch::NotAnAssignment("consequent")))
    }
  }
}

#[cfg(test)]
mod tests {
  use crate::rewrite::tests::rewritten;
  use crate::Rule;
  use crate::RuleSet;

  fn ternaries(source: &str) -> String {
    rewritten(source, RuleSet::none().with(Rule::Ternary))
  }

  fn if_else(source: &str) -> String {
    rewritten(source, RuleSet::none().with(Rule::IfElse))
  }

  fn if_assign(source: &str) -> String {
    rewritten(source, RuleSet::none().with(Rule::IfAssign))
  }

  #[test]
  fn hoists_assignments_out_of_ternaries() {
    assert_eq!(ternaries("a ? (x = 1) : (x = 2);"), "x = a ? 1 : 2;");
    assert_eq!(ternaries("a ? (o.p += 1) : (o.p += f());"), "o.p += a ? 1 : f();");
    assert_eq!(ternaries("y = a ? (x = 1) : (x = 2);"), "y = x = a ? 1 : 2;");
  }

  #[test]
  fn keeps_ternaries_that_do_not_assign_one_target() {
    for source in [
      "a ? (x = 1) : (y = 2);",
      "a ? (x = 1) : (x += 2);",
      "a ? (x ||= 1) : (x ||= 2);",
      "a ? (o[k] = 1) : (o.k = 2);",
      "a ? (x = 1) : f();",
      "a ? 1 : 2;",
    ] {
      assert_eq!(ternaries(source), source);
    }
  }

  #[test]
  fn turns_if_else_into_a_ternary() {
    assert_eq!(
      if_else("if (a) { f(); g(); } else { h(); }"),
      "a ? (f(), g()) : (h());"
    );
    assert_eq!(
      if_else("if (a) {\n  x = 1\n} else {\n  x = 2\n}\nf();"),
      "a ? (x = 1) : (x = 2);\nf();"
    );
  }

  #[test]
  fn keeps_if_else_with_other_statements() {
    for source in [
      "if (a) { return 1; } else { f(); }",
      "if (a) { f(); } else if (b) { g(); }",
      "if (a) f(); else { g(); }",
      "if (a) {} else { g(); }",
    ] {
      assert_eq!(if_else(source), source);
    }
  }

  #[test]
  fn turns_if_assignments_into_ternaries() {
    assert_eq!(if_assign("if (a) { x = 1; }"), "x = a ? 1 : x;");
    assert_eq!(if_assign("if (a > b) { o.max = a }"), "o.max = a > b ? a : o.max;");
    assert_eq!(if_assign("if (a) { (o[k] = v); }"), "o[k] = a ? v : o[k];");
  }

  #[test]
  fn keeps_if_statements_that_do_more_than_assign() {
    for source in [
      "if (a) { x = 1; y = 2; }",
      "if (a) { x += 1; }",
      "if (a) { f(); }",
      "if (a) { [x, y] = p; }",
      "if (a) x = 1;",
      "if (a) {}",
    ] {
      assert_eq!(if_assign(source), source);
    }
  }
}
