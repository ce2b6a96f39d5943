use crate::err::Mismatch;
use parse_js::ast::expr::lit::LitNullExpr;
use parse_js::ast::expr::BinaryExpr;
use parse_js::ast::expr::Expr;
use parse_js::ast::expr::IdExpr;
use parse_js::ast::expr::SeqExpr;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::BlockStmt;
use parse_js::ast::stmt::EmptyStmt;
use parse_js::ast::stmt::ExprStmt;
use parse_js::ast::stmt::Stmt;
use parse_js::loc::Loc;
use parse_js::operator::OperatorName;

pub fn expr_stmt(loc: Loc, expr: Node<Expr>) -> Node<Stmt> {
  Node::new(loc, ExprStmt { expr }).into_wrapped()
}

pub fn empty_stmt(loc: Loc) -> Node<Stmt> {
  Node::new(loc, EmptyStmt {}).into_wrapped()
}

pub fn block(loc: Loc, body: Vec<Node<Stmt>>) -> Node<Stmt> {
  Node::new(loc, BlockStmt { body }).into_wrapped()
}

pub fn seq(loc: Loc, exprs: Vec<Node<Expr>>) -> Node<Expr> {
  Node::new(loc, SeqExpr { exprs }).into_wrapped()
}

pub fn binary(loc: Loc, operator: OperatorName, left: Node<Expr>, right: Node<Expr>) -> Node<Expr> {
  Node::new(loc, BinaryExpr {
    operator,
    left,
    right,
  })
  .into_wrapped()
}

/// Fits replacement statements into a slot that holds exactly one statement.
pub fn single_stmt(loc: Loc, mut stmts: Vec<Node<Stmt>>) -> Node<Stmt> {
  match stmts.len() {
    0 => empty_stmt(loc),
    1 => stmts.pop().unwrap_or_else(|| empty_stmt(loc)),
    _ => block(loc, stmts),
  }
}

/// Moves a statement out of `slot`, leaving an empty statement to be overwritten.
pub fn take_stmt(slot: &mut Node<Stmt>) -> Node<Stmt> {
  let placeholder = empty_stmt(slot.loc);
  std::mem::replace(slot, placeholder)
}

/// Moves an expression out of `slot`, leaving `null` to be overwritten.
pub fn take_expr(slot: &mut Node<Expr>) -> Node<Expr> {
  let placeholder = Node::new(slot.loc, LitNullExpr {}).into_wrapped();
  std::mem::replace(slot, placeholder)
}

/// Checks that `stmt` is a non-empty block holding only expression statements.
pub fn check_expr_block(stmt: &Node<Stmt>, part: &'static str) -> Result<(), Mismatch> {
  let Stmt::Block(block) = stmt.stx.as_ref() else {
    return Err(Mismatch::NotABlock(part));
  };
  if block.stx.body.is_empty() {
    return Err(Mismatch::EmptyBlock(part));
  };
  if block
    .stx
    .body
    .iter()
    .any(|s| !matches!(s.stx.as_ref(), Stmt::Expr(_)))
  {
    return Err(Mismatch::NotAnExpressionStatement(part));
  };
  Ok(())
}

/// The expressions of a block accepted by [`check_expr_block`], in order.
pub fn block_exprs(stmt: Node<Stmt>) -> Vec<Node<Expr>> {
  match *stmt.stx {
    Stmt::Block(block) => block
      .stx
      .body
      .into_iter()
      .filter_map(|s| match *s.stx {
        Stmt::Expr(e) => Some(e.stx.expr),
        _ => None,
      })
      .collect(),
    _ => Vec::new(),
  }
}

/// An assignment expression taken apart, remembering the location of any enclosing parentheses.
pub struct Assignment {
  outer: Loc,
  node: Node<BinaryExpr>,
}

impl Assignment {
  pub fn split(expr: Node<Expr>) -> Result<Assignment, Node<Expr>> {
    let outer = expr.loc;
    match *expr.stx {
      Expr::Binary(node) if node.stx.operator.is_assignment() => Ok(Assignment { outer, node }),
      other => Err(Node::new(outer, other)),
    }
  }

  pub fn operator(&self) -> OperatorName {
    self.node.stx.operator
  }

  /// The assignment target and the assigned value.
  pub fn into_parts(self) -> (Node<Expr>, Node<Expr>) {
    let BinaryExpr { left, right, .. } = *self.node.stx;
    (left, right)
  }

  pub fn into_expr(self) -> Node<Expr> {
    Node::new(self.outer, Expr::Binary(self.node))
  }
}

/// Reads the value of an assignment target, such as `x` in `x = y`. Destructuring patterns do not
/// read back as the value they assign to.
pub fn target_value(target: &Node<Expr>) -> Result<Node<Expr>, Mismatch> {
  match target.stx.as_ref() {
    Expr::IdPat(id) => Ok(
      Node::new(id.loc, IdExpr {
        name: id.stx.name.clone(),
      })
      .into_wrapped(),
    ),
    Expr::Id(_) | Expr::Member(_) | Expr::ComputedMember(_) => Ok(target.clone()),
    _ => Err(Mismatch::DestructuringTarget),
  }
}
