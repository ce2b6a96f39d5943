mod cond;
mod decl;
mod loops;
mod util;

use crate::err::Rejected;
use crate::err::RuleResult;
use crate::options::ExprifyOptions;
use crate::options::Rule;
use crate::options::WhileForm;
use crate::stats::RewriteStats;
use derive_visitor::DriveMut;
use derive_visitor::VisitorMut;
use emit_js::EditSet;
use parse_js::ast::expr::Expr;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::BlockStmt;
use parse_js::ast::stmt::ForTripleStmt;
use parse_js::ast::stmt::ForTripleStmtInit;
use parse_js::ast::stmt::Stmt;
use parse_js::ast::stmt::SwitchBranch;
use parse_js::ast::stx::TopLevel;
use parse_js::loc::Loc;
use tracing::debug;
use tracing::trace;
use util::single_stmt;
use util::take_expr;
use util::take_stmt;

type TopLevelNode = Node<TopLevel>;
type BlockStmtNode = Node<BlockStmt>;
type SwitchBranchNode = Node<SwitchBranch>;
type StmtNode = Node<Stmt>;
type ForTripleStmtNode = Node<ForTripleStmt>;
type ExprNode = Node<Expr>;

/// State of a single rewrite pass: the enabled rules, the source ranges replaced so far and how
/// often each rule fired.
///
/// Every rule runs when its node is entered, before the node's children are visited. A
/// replacement is not offered to the rules again, but its children are.
#[derive(VisitorMut)]
#[visitor(
  TopLevelNode(enter),
  BlockStmtNode(enter),
  SwitchBranchNode(enter),
  StmtNode(enter),
  ForTripleStmtNode(enter),
  ExprNode(enter)
)]
pub struct RewriteCtx<'a> {
  opts: &'a ExprifyOptions,
  edits: EditSet,
  stats: RewriteStats,
}

impl<'a> RewriteCtx<'a> {
  pub fn new(opts: &'a ExprifyOptions) -> RewriteCtx<'a> {
    RewriteCtx {
      opts,
      edits: EditSet::new(),
      stats: RewriteStats::default(),
    }
  }

  pub fn edits(&self) -> &EditSet {
    &self.edits
  }

  pub fn stats(&self) -> &RewriteStats {
    &self.stats
  }

  pub fn into_parts(self) -> (EditSet, RewriteStats) {
    (self.edits, self.stats)
  }

  /// Marks `loc` as replaced, so the printer no longer copies any node containing it.
  pub(crate) fn record(&mut self, loc: Loc) {
    self.edits.record(loc);
  }

  pub(crate) fn while_form(&self) -> WhileForm {
    self.opts.while_form
  }

  fn enabled(&self, rule: Rule) -> bool {
    self.opts.rules.contains(rule)
  }

  /// Runs `f` on `node` if `rule` is enabled, handing the node back untouched when the rule is
  /// disabled or rejects it.
  fn apply<T, R>(
    &mut self,
    rule: Rule,
    loc: Loc,
    node: T,
    f: impl FnOnce(&mut Self, T) -> RuleResult<T, R>,
  ) -> Result<R, T> {
    if !self.enabled(rule) {
      return Err(node);
    };
    match f(self, node) {
      Ok(replacement) => {
        trace!(
          rule = rule.name(),
          start = loc.0,
          end = loc.1,
          "transformed {}",
          rule.construct()
        );
        self.stats.record_applied(rule);
        Ok(replacement)
      }
      Err(Rejected { node, reason }) => {
        debug!(
          rule = rule.name(),
          reason = %reason,
          start = loc.0,
          end = loc.1,
          "cannot transform {}: {}",
          rule.construct(),
          reason
        );
        self.stats.record_skipped(rule);
        Err(node)
      }
    }
  }

  // Declarations in a statement list are replaced by as many statements as they have
  // initialized declarators.
  fn rewrite_stmt_list(&mut self, stmts: &mut Vec<Node<Stmt>>) {
    if !self.enabled(Rule::VarDecl)
      || !stmts
        .iter()
        .any(|stmt| matches!(stmt.stx.as_ref(), Stmt::VarDecl(_)))
    {
      return;
    };
    let old = std::mem::take(stmts);
    for stmt in old {
      let loc = stmt.loc;
      match *stmt.stx {
        Stmt::VarDecl(decl) => match self.apply(Rule::VarDecl, loc, decl, decl::declaration) {
          Ok(replacement) => stmts.extend(replacement),
          Err(decl) => stmts.push(decl.into_wrapped()),
        },
        other => stmts.push(Node::new(loc, other)),
      };
    }
  }

  fn rewrite_stmt(&mut self, stmt: Node<Stmt>) -> Node<Stmt> {
    let loc = stmt.loc;
    match *stmt.stx {
      Stmt::VarDecl(decl) => self
        .apply(Rule::VarDecl, loc, decl, decl::declaration)
        .map(|stmts| single_stmt(loc, stmts))
        .unwrap_or_else(|decl| decl.into_wrapped()),
      Stmt::ForTriple(for_stmt) => self
        .apply(Rule::For, loc, for_stmt, loops::for_loop)
        .unwrap_or_else(|for_stmt| for_stmt.into_wrapped()),
      Stmt::While(while_stmt) => self
        .apply(Rule::While, loc, while_stmt, loops::while_loop)
        .unwrap_or_else(|while_stmt| while_stmt.into_wrapped()),
      Stmt::DoWhile(do_while) => self
        .apply(Rule::DoWhile, loc, do_while, loops::do_while)
        .unwrap_or_else(|do_while| do_while.into_wrapped()),
      Stmt::If(if_stmt) if if_stmt.stx.alternate.is_some() => self
        .apply(Rule::IfElse, loc, if_stmt, cond::if_else)
        .unwrap_or_else(|if_stmt| if_stmt.into_wrapped()),
      Stmt::If(if_stmt) => self
        .apply(Rule::IfAssign, loc, if_stmt, cond::if_assign)
        .unwrap_or_else(|if_stmt| if_stmt.into_wrapped()),
      other => Node::new(loc, other),
    }
  }

  fn enter_top_level_node(&mut self, node: &mut TopLevelNode) {
    self.rewrite_stmt_list(&mut node.stx.body);
  }

  fn enter_block_stmt_node(&mut self, node: &mut BlockStmtNode) {
    self.rewrite_stmt_list(&mut node.stx.body);
  }

  fn enter_switch_branch_node(&mut self, node: &mut SwitchBranchNode) {
    self.rewrite_stmt_list(&mut node.stx.body);
  }

  // Statement lists are flattened before their elements are entered, so a declaration seen here
  // occupies a single-statement slot such as an `if` branch or a loop body.
  fn enter_stmt_node(&mut self, node: &mut StmtNode) {
    let rule = match node.stx.as_ref() {
      Stmt::VarDecl(_) => Rule::VarDecl,
      Stmt::ForTriple(_) => Rule::For,
      Stmt::While(_) => Rule::While,
      Stmt::DoWhile(_) => Rule::DoWhile,
      Stmt::If(if_stmt) if if_stmt.stx.alternate.is_some() => Rule::IfElse,
      Stmt::If(_) => Rule::IfAssign,
      _ => return,
    };
    if !self.enabled(rule) {
      return;
    };
    let stmt = take_stmt(node);
    *node = self.rewrite_stmt(stmt);
  }

  fn enter_for_triple_stmt_node(&mut self, node: &mut ForTripleStmtNode) {
    if !self.enabled(Rule::VarDecl) || !matches!(node.stx.init, ForTripleStmtInit::Decl(_)) {
      return;
    };
    node.stx.init = match std::mem::replace(&mut node.stx.init, ForTripleStmtInit::None) {
      ForTripleStmtInit::Decl(decl) => {
        let loc = decl.loc;
        self
          .apply(Rule::VarDecl, loc, decl, decl::for_head)
          .unwrap_or_else(ForTripleStmtInit::Decl)
      }
      other => other,
    };
  }

  fn enter_expr_node(&mut self, node: &mut ExprNode) {
    if !self.enabled(Rule::Ternary) || !matches!(node.stx.as_ref(), Expr::Cond(_)) {
      return;
    };
    let expr = take_expr(node);
    // The outer node's range also covers any parentheses around the conditional.
    let outer = expr.loc;
    *node = match *expr.stx {
      Expr::Cond(cond) => {
        let loc = cond.loc;
        match self.apply(Rule::Ternary, loc, cond, cond::ternary) {
          Ok(assignment) => Node::new(outer, Expr::Binary(assignment)),
          Err(cond) => Node::new(outer, Expr::Cond(cond)),
        }
      }
      other => Node::new(outer, other),
    };
  }
}

/// Runs one rewrite pass over `top`, recording every replaced range in `cx`.
pub fn rewrite_top_level(top: &mut Node<TopLevel>, cx: &mut RewriteCtx) {
  cx.stats.passes += 1;
  top.drive_mut(cx);
}
