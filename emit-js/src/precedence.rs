use parse_js::ast::expr::Expr;
use parse_js::ast::func::FuncBody;
use parse_js::ast::node::Node;
use parse_js::operator::Associativity;
use parse_js::operator::OperatorName;
use parse_js::operator::OPERATORS;

/// Wrapper around a precedence value with total ordering.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Prec(u8);

impl Prec {
  /// Any expression, including a comma sequence.
  pub const LOWEST: Prec = Prec(1);
  /// A single comma sequence element.
  pub const SEQ_ELEMENT: Prec = Prec(2);
  /// Call arguments, initializers, array elements, and other `AssignmentExpression` slots.
  pub const ASSIGNMENT: Prec = Prec(3);
  /// Conditional test, which cannot itself be a conditional or assignment.
  pub const SHORT_CIRCUIT: Prec = Prec(5);

  pub const fn new(value: u8) -> Self {
    Prec(value)
  }

  pub const fn tighter(self) -> Self {
    Prec(self.0 + 1)
  }
}

fn op_prec(op: OperatorName) -> Prec {
  Prec::new(OPERATORS[&op].precedence)
}

/// Precedence for `new X` without arguments.
pub fn new_without_args_prec() -> Prec {
  op_prec(OperatorName::New)
}

/// Precedence for optional chaining, member access, calls and `new X()`.
pub fn call_member_prec() -> Prec {
  op_prec(OperatorName::Call)
}

/// Precedence for atomic expressions (identifiers, literals, etc.).
pub fn primary_prec() -> Prec {
  call_member_prec().tighter()
}

#[derive(Clone, Copy, Debug)]
pub enum Side {
  Left,
  Right,
}

pub fn needs_parens(child_prec: Prec, min_prec: Prec) -> bool {
  child_prec < min_prec
}

pub fn child_min_prec_for_binary(op: OperatorName, side: Side) -> Prec {
  let operator = &OPERATORS[&op];
  let prec = Prec::new(operator.precedence);
  match (operator.associativity, side) {
    (Associativity::Left, Side::Left) | (Associativity::Right, Side::Right) => prec,
    (Associativity::Left, Side::Right) | (Associativity::Right, Side::Left) => prec.tighter(),
  }
}

/// Returns the precedence of an expression kind, derived from the parser's table so printed
/// output re-parses to the same tree.
pub fn expr_prec(expr: &Node<Expr>) -> Prec {
  match expr.stx.as_ref() {
    Expr::Binary(binary) => op_prec(binary.stx.operator),
    Expr::Cond(_) => op_prec(OperatorName::Conditional),
    Expr::Unary(unary) => op_prec(unary.stx.operator),
    Expr::UnaryPostfix(unary) => op_prec(unary.stx.operator),
    Expr::Yield(_) => op_prec(OperatorName::Yield),
    Expr::Seq(_) => op_prec(OperatorName::Comma),
    Expr::ArrowFunc(_) => Prec::ASSIGNMENT,
    Expr::New(new) if new.stx.arguments.is_none() => new_without_args_prec(),
    Expr::New(_)
    | Expr::Call(_)
    | Expr::Member(_)
    | Expr::ComputedMember(_)
    | Expr::TaggedTemplate(_)
    | Expr::Import(_) => call_member_prec(),
    Expr::Class(_)
    | Expr::Func(_)
    | Expr::Id(_)
    | Expr::ImportMeta(_)
    | Expr::NewTarget(_)
    | Expr::Super(_)
    | Expr::This(_)
    | Expr::LitArr(_)
    | Expr::LitBigInt(_)
    | Expr::LitBool(_)
    | Expr::LitNull(_)
    | Expr::LitNum(_)
    | Expr::LitObj(_)
    | Expr::LitRegex(_)
    | Expr::LitStr(_)
    | Expr::LitTemplate(_)
    | Expr::ArrPat(_)
    | Expr::IdPat(_)
    | Expr::ObjPat(_) => primary_prec(),
  }
}

/// Whether the left operand must be parenthesized for reasons other than precedence: a unary
/// operand of `**`, or mixing `??` with `&&`/`||` without grouping.
pub fn binary_operand_needs_parens(op: OperatorName, operand: &Node<Expr>, side: Side) -> bool {
  match operand.stx.as_ref() {
    Expr::Unary(_) if op == OperatorName::Exponentiation => matches!(side, Side::Left),
    Expr::Binary(inner) => {
      let mixes = |a: OperatorName, b: OperatorName| {
        a == OperatorName::NullishCoalescing
          && matches!(b, OperatorName::LogicalAnd | OperatorName::LogicalOr)
      };
      mixes(op, inner.stx.operator) || mixes(inner.stx.operator, op)
    }
    _ => false,
  }
}

/// Whether a chain of member accesses, calls and tagged templates starting at `expr` includes an
/// optional chain.
pub fn starts_with_optional_chaining(expr: &Node<Expr>) -> bool {
  match expr.stx.as_ref() {
    Expr::Member(member) => {
      member.stx.optional_chaining || starts_with_optional_chaining(&member.stx.left)
    }
    Expr::ComputedMember(member) => {
      member.stx.optional_chaining || starts_with_optional_chaining(&member.stx.object)
    }
    Expr::Call(call) => call.stx.optional_chaining || starts_with_optional_chaining(&call.stx.callee),
    Expr::TaggedTemplate(tagged) => starts_with_optional_chaining(&tagged.stx.function),
    _ => false,
  }
}

/// Whether `expr` used as a `new` callee would capture an argument list that belongs to a call
/// inside it, as in `new (f())()`.
pub fn new_callee_needs_parens(callee: &Node<Expr>) -> bool {
  fn contains_call(expr: &Node<Expr>) -> bool {
    match expr.stx.as_ref() {
      Expr::Call(_) => true,
      Expr::Member(member) => contains_call(&member.stx.left),
      Expr::ComputedMember(member) => contains_call(&member.stx.object),
      Expr::TaggedTemplate(tagged) => contains_call(&tagged.stx.function),
      _ => false,
    }
  }
  contains_call(callee) || starts_with_optional_chaining(callee)
}

/// Whether `expr` contains an `in` operator that is not enclosed by brackets of some kind, which
/// would end a `for` head's initializer early.
pub fn has_bare_in(expr: &Node<Expr>) -> bool {
  match expr.stx.as_ref() {
    Expr::Binary(binary) => {
      binary.stx.operator == OperatorName::In
        || has_bare_in(&binary.stx.left)
        || has_bare_in(&binary.stx.right)
    }
    Expr::Cond(cond) => {
      has_bare_in(&cond.stx.test)
        || has_bare_in(&cond.stx.consequent)
        || has_bare_in(&cond.stx.alternate)
    }
    Expr::Seq(seq) => seq.stx.exprs.iter().any(has_bare_in),
    Expr::Unary(unary) => has_bare_in(&unary.stx.argument),
    Expr::Yield(yield_) => yield_.stx.argument.as_ref().is_some_and(has_bare_in),
    Expr::ArrowFunc(arrow) => match &arrow.stx.func.stx.body {
      FuncBody::Expression(body) => has_bare_in(body),
      FuncBody::Block(_) => false,
    },
    _ => false,
  }
}

#[cfg(test)]
mod tests {
  use super::child_min_prec_for_binary;
  use super::Prec;
  use super::Side;
  use parse_js::operator::OperatorName;

  #[test]
  fn associativity_decides_which_side_is_tighter() {
    let add = child_min_prec_for_binary(OperatorName::Addition, Side::Left);
    assert_eq!(child_min_prec_for_binary(OperatorName::Addition, Side::Right), add.tighter());
    let exp = child_min_prec_for_binary(OperatorName::Exponentiation, Side::Right);
    assert_eq!(child_min_prec_for_binary(OperatorName::Exponentiation, Side::Left), exp.tighter());
    assert_eq!(
      child_min_prec_for_binary(OperatorName::Assignment, Side::Right),
      Prec::ASSIGNMENT
    );
  }
}
