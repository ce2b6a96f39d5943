use super::util::binary;
use super::util::expr_stmt;
use super::util::seq;
use super::RewriteCtx;
use crate::err::Mismatch;
use crate::err::Rejected;
use crate::err::RuleResult;
use parse_js::ast::expr::Expr;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::decl::VarDecl;
use parse_js::ast::stmt::ForTripleStmtInit;
use parse_js::ast::stmt::Stmt;
use parse_js::operator::OperatorName;

/// `let a = 1, b, [c] = d;` becomes `a = 1; [c] = d;`.
pub fn declaration(cx: &mut RewriteCtx, decl: Node<VarDecl>) -> RuleResult<Node<VarDecl>, Vec<Node<Stmt>>> {
  let loc = decl.loc;
  let assignments = assignments(cx, decl)?;
  Ok(
    assignments
      .into_iter()
      .map(|assignment| expr_stmt(loc, assignment))
      .collect(),
  )
}

/// `for (let i = 0, j = n; ...)` becomes `for (i = 0, j = n; ...)`.
pub fn for_head(cx: &mut RewriteCtx, decl: Node<VarDecl>) -> RuleResult<Node<VarDecl>, ForTripleStmtInit> {
  let loc = decl.loc;
  let mut assignments = assignments(cx, decl)?;
  Ok(if assignments.len() > 1 {
    ForTripleStmtInit::Expr(seq(loc, assignments))
  } else {
    match assignments.pop() {
      Some(assignment) => ForTripleStmtInit::Expr(assignment),
      None => ForTripleStmtInit::None,
    }
  })
}

// Declarators without an initializer are dropped.
fn assignments(cx: &mut RewriteCtx, decl: Node<VarDecl>) -> RuleResult<Node<VarDecl>, Vec<Node<Expr>>> {
  if decl.stx.declarators.is_empty() {
    return Err(Rejected::new(decl, Mismatch::NoDeclarators));
  };
  let loc = decl.loc;
  cx.record(loc);
  Ok(
    decl
      .stx
      .declarators
      .into_iter()
      .filter_map(|declarator| {
        let value = declarator.initializer?;
        let target = declarator.pattern.stx.pat.into_stx::<Expr>();
        Some(binary(loc, OperatorName::Assignment, target, value))
      })
      .collect(),
  )
}

#[cfg(test)]
mod tests {
  use crate::rewrite::tests::rewritten;
  use crate::Rule;
  use crate::RuleSet;

  fn decls(source: &str) -> String {
    rewritten(source, RuleSet::none().with(Rule::VarDecl))
  }

  #[test]
  fn replaces_declarations_with_assignments() {
    assert_eq!(decls("let x = y;"), "x = y;");
    assert_eq!(decls("var a = 1, b = 2;\nf();"), "a = 1;\nb = 2;\nf();");
    assert_eq!(decls("const { a, b: [c] } = o;"), "({ a, b: [c] } = o);");
  }

  #[test]
  fn drops_uninitialized_declarators() {
    assert_eq!(decls("let x;\nf();"), "f();");
    assert_eq!(decls("var a, b = 1, c;"), "b = 1;");
  }

  #[test]
  fn fits_declarations_into_single_statement_slots() {
    assert_eq!(decls("if (t) var a = 1, b = 2;"), "if (t) {\n  a = 1;\n  b = 2;\n}");
    assert_eq!(decls("if (t) var a; else f();"), "if (t); else f();");
  }

  #[test]
  fn rewrites_for_heads() {
    assert_eq!(decls("for (let i = 0; i < n; i++) f(i);"), "for (i = 0; i < n; i++) f(i);");
    assert_eq!(decls("for (var i = 0, j; ;) ;"), "for (i = 0;;);");
    assert_eq!(decls("for (var i = 0, j = 1; ;) ;"), "for (i = 0, j = 1;;);");
    assert_eq!(decls("for (let i; ;) ;"), "for (;;);");
    assert_eq!(decls("for (const k in o) f(k);"), "for (const k in o) f(k);");
  }
}
