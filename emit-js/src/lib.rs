//! Prints `parse-js` syntax trees back to JavaScript.
//!
//! [`emit_js`] prints a whole program. In [`EmitMode::Preserve`] every node whose range holds no
//! recorded edit is copied from the original source, so formatting and comments of unchanged
//! regions survive a rewrite byte-for-byte.

mod asi;
mod edits;
mod emitter;
mod escape;
mod expr;
mod func;
mod pat;
mod precedence;
mod printer;
mod stmt;
mod trivia;

pub use edits::EditSet;
pub use emitter::EmitError;
pub use emitter::EmitErrorKind;
pub use emitter::EmitMode;
pub use emitter::EmitOptions;
pub use emitter::EmitResult;
pub use emitter::Emitter;

use parse_js::ast::expr::Expr;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::Stmt;
use parse_js::ast::stx::TopLevel;
use parse_js::loc::Loc;
use precedence::Prec;
use printer::Printer;

/// Prints a program parsed from `source`. `edits` lists the ranges whose syntax changed since
/// parsing.
pub fn emit_js(
  source: &str,
  top: &Node<TopLevel>,
  edits: &EditSet,
  opts: EmitOptions,
) -> EmitResult<String> {
  if opts.mode == EmitMode::Preserve && !edits.is_edited(Loc(0, source.len())) {
    return Ok(source.to_string());
  };
  let mut em = Emitter::new(opts);
  Printer::with_source(source, edits).top_level(&mut em, top)?;
  Ok(em.into_string())
}

/// Prints an expression without any source to preserve.
pub fn emit_expr(expr: &Node<Expr>, opts: EmitOptions) -> EmitResult<String> {
  let mut em = Emitter::new(opts);
  Printer::detached().expr(&mut em, expr, Prec::LOWEST)?;
  Ok(em.into_string())
}

/// Prints a statement without any source to preserve.
pub fn emit_stmt(stmt: &Node<Stmt>, opts: EmitOptions) -> EmitResult<String> {
  let mut em = Emitter::new(opts);
  Printer::detached().stmt(&mut em, stmt)?;
  Ok(em.into_string())
}

