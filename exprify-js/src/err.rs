use emit_js::EmitError;
use parse_js::error::SyntaxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExprifyError {
  #[error("syntax error: {0}")]
  Syntax(#[from] SyntaxError),
  #[error("failed to print rewritten code: {0}")]
  Emit(#[from] EmitError),
  #[error("unknown rule `{0}`")]
  InvalidRule(String),
}

/// Why a rule left a node untouched.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Mismatch {
  #[error("{0} is not a block")]
  NotABlock(&'static str),
  #[error("{0} is empty")]
  EmptyBlock(&'static str),
  #[error("{0} holds a statement that is not an expression statement")]
  NotAnExpressionStatement(&'static str),
  #[error("if statement has an else branch")]
  HasElse,
  #[error("consequent holds {0} statements instead of one")]
  StatementCount(usize),
  #[error("loop has no update clause")]
  MissingUpdate,
  #[error("{0} is not an assignment")]
  NotAnAssignment(&'static str),
  #[error("assignment is not a plain `=`")]
  CompoundAssignment,
  #[error("short-circuit assignment only runs when its condition holds")]
  ShortCircuitAssignment,
  #[error("branches assign with different operators")]
  OperatorMismatch,
  #[error("branches assign to different targets")]
  TargetMismatch,
  #[error("assignment target is a destructuring pattern")]
  DestructuringTarget,
  #[error("declaration has no declarators")]
  NoDeclarators,
  #[error("cannot compare assignment targets: {0}")]
  UnprintableTarget(#[from] EmitError),
}

/// A rule's refusal, handing back the node it was given.
#[derive(Debug)]
pub(crate) struct Rejected<T> {
  pub node: T,
  pub reason: Mismatch,
}

impl<T> Rejected<T> {
  pub fn new(node: T, reason: Mismatch) -> Self {
    Rejected { node, reason }
  }
}

pub(crate) type RuleResult<T, R> = Result<R, Rejected<T>>;
