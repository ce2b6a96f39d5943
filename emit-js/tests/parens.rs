use emit_js::emit_expr;
use emit_js::emit_stmt;
use emit_js::EmitErrorKind;
use emit_js::EmitOptions;
use parse_js::ast::expr::BinaryExpr;
use parse_js::ast::expr::CallArg;
use parse_js::ast::expr::CallExpr;
use parse_js::ast::expr::CondExpr;
use parse_js::ast::expr::Expr;
use parse_js::ast::expr::MemberExpr;
use parse_js::ast::expr::NewExpr;
use parse_js::ast::expr::SeqExpr;
use parse_js::ast::expr::UnaryExpr;
use parse_js::ast::func::FuncBody;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::ExprStmt;
use parse_js::ast::stmt::Stmt;
use parse_js::loc::Loc;
use parse_js::operator::OperatorName;
use util::first_expr;

mod util;

const LOC: Loc = Loc(0, 0);

fn min(expr: &Node<Expr>) -> String {
  emit_expr(expr, EmitOptions::minified()).unwrap()
}

fn binary(operator: OperatorName, left: Node<Expr>, right: Node<Expr>) -> Node<Expr> {
  Node::new(LOC, BinaryExpr {
    operator,
    left,
    right,
  })
  .into_wrapped()
}

fn arg(value: Node<Expr>) -> Node<CallArg> {
  Node::new(LOC, CallArg {
    spread: false,
    value,
  })
}

#[test]
fn binary_operands_are_wrapped_by_precedence() {
  let e = binary(OperatorName::Multiplication, first_expr("a + b"), first_expr("c"));
  assert_eq!(min(&e), "(a+b)*c");
  let e = binary(OperatorName::Subtraction, first_expr("a"), first_expr("b - c"));
  assert_eq!(min(&e), "a-(b-c)");
  let e = binary(OperatorName::Exponentiation, first_expr("a"), first_expr("b ** c"));
  assert_eq!(min(&e), "a**b**c");
}

#[test]
fn exponent_base_and_mixed_nullish_are_wrapped() {
  let e = binary(OperatorName::Exponentiation, first_expr("-a"), first_expr("b"));
  assert_eq!(min(&e), "(-a)**b");
  let e = binary(OperatorName::NullishCoalescing, first_expr("a || b"), first_expr("c"));
  assert_eq!(min(&e), "(a||b)??c");
}

#[test]
fn conditional_parts_are_wrapped() {
  let e: Node<Expr> = Node::new(LOC, CondExpr {
    test: first_expr("a = 1"),
    consequent: first_expr("b, c"),
    alternate: first_expr("d ? e : f"),
  })
  .into_wrapped();
  assert_eq!(min(&e), "(a=1)?(b,c):d?e:f");
}

#[test]
fn single_element_sequence_prints_its_element() {
  let seq: Node<Expr> = Node::new(LOC, SeqExpr {
    exprs: vec![first_expr("x = 1")],
  })
  .into_wrapped();
  let e: Node<Expr> = Node::new(LOC, CondExpr {
    test: first_expr("a"),
    consequent: seq.clone(),
    alternate: first_expr("x = 2"),
  })
  .into_wrapped();
  assert_eq!(min(&e), "a?(x=1):x=2");
  assert_eq!(min(&seq), "x=1");
}

#[test]
fn sequence_arguments_are_wrapped() {
  let e: Node<Expr> = Node::new(LOC, CallExpr {
    optional_chaining: false,
    callee: first_expr("f"),
    arguments: vec![arg(first_expr("a, b")), arg(first_expr("c"))],
  })
  .into_wrapped();
  assert_eq!(min(&e), "f((a,b),c)");
}

#[test]
fn member_objects_and_new_callees_are_wrapped() {
  let e: Node<Expr> = Node::new(LOC, MemberExpr {
    optional_chaining: false,
    left: first_expr("1"),
    right: "toString".to_string(),
  })
  .into_wrapped();
  assert_eq!(min(&e), "(1).toString");
  let e: Node<Expr> = Node::new(LOC, NewExpr {
    callee: first_expr("f()"),
    arguments: Some(Vec::new()),
  })
  .into_wrapped();
  assert_eq!(min(&e), "new (f())()");
}

#[test]
fn adjacent_signs_are_separated() {
  let e: Node<Expr> = Node::new(LOC, UnaryExpr {
    operator: OperatorName::UnaryNegation,
    argument: first_expr("-a"),
  })
  .into_wrapped();
  assert_eq!(min(&e), "- -a");
  let e = binary(OperatorName::Addition, first_expr("a"), first_expr("++b"));
  assert_eq!(min(&e), "a+ ++b");
}

#[test]
fn object_bodies_and_statements_are_wrapped() {
  let mut arrow = first_expr("() => 1");
  match arrow.stx.as_mut() {
    Expr::ArrowFunc(f) => f.stx.func.stx.body = FuncBody::Expression(first_expr("({ a: 1 })")),
    other => panic!("expected arrow function, got {other:?}"),
  };
  assert_eq!(min(&arrow), "()=>({a:1})");

  let stmt: Node<Stmt> = Node::new(LOC, ExprStmt {
    expr: first_expr("({ a: 1 })"),
  })
  .into_wrapped();
  assert_eq!(emit_stmt(&stmt, EmitOptions::minified()).unwrap(), "({a:1});");
}

#[test]
fn empty_sequence_is_rejected() {
  let e: Node<Expr> = Node::new(LOC, SeqExpr { exprs: Vec::new() }).into_wrapped();
  let err = emit_expr(&e, EmitOptions::canonical()).unwrap_err();
  assert!(matches!(err.kind, EmitErrorKind::Unsupported(_)));
  assert_eq!(err.loc, Some(LOC));
}
