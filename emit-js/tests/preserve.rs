use emit_js::emit_js;
use emit_js::EditSet;
use emit_js::EmitOptions;
use parse_js::ast::expr::lit::LitArrElem;
use parse_js::ast::expr::lit::LitArrExpr;
use parse_js::ast::expr::BinaryExpr;
use parse_js::ast::expr::Expr;
use parse_js::ast::expr::IdExpr;
use parse_js::ast::func::FuncBody;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::ExprStmt;
use parse_js::ast::stmt::Stmt;
use parse_js::ast::stx::TopLevel;
use parse_js::loc::Loc;
use parse_js::operator::OperatorName;
use util::assert_text_eq;
use util::parse;

mod util;

fn id(loc: Loc, name: &str) -> Node<Expr> {
  Node::new(loc, IdExpr {
    name: name.to_string(),
  })
  .into_wrapped()
}

fn expr_stmt(loc: Loc, expr: Node<Expr>) -> Node<Stmt> {
  Node::new(loc, ExprStmt { expr }).into_wrapped()
}

/// Replaces `var`/`let` declarations in `stmts` with one assignment statement per declarator, all
/// carrying the declaration's location.
fn declarations_to_assignments(stmts: &mut Vec<Node<Stmt>>, edits: &mut EditSet) {
  let mut out = Vec::new();
  for stmt in stmts.drain(..) {
    let loc = stmt.loc;
    match *stmt.stx {
      Stmt::VarDecl(decl) => {
        edits.record(loc);
        for declarator in decl.stx.declarators {
          let target = declarator.pattern.stx.pat.into_stx::<Expr>();
          let Some(value) = declarator.initializer else {
            continue;
          };
          let assign = Node::new(loc, BinaryExpr {
            operator: OperatorName::Assignment,
            left: target,
            right: value,
          })
          .into_wrapped();
          out.push(expr_stmt(loc, assign));
        }
      }
      other => out.push(Node {
        loc,
        stx: Box::new(other),
      }),
    }
  }
  *stmts = out;
}

fn switch_branch_body(
  top: &mut Node<TopLevel>,
  index: usize,
  branch: usize,
) -> &mut Vec<Node<Stmt>> {
  match top.stx.body[index].stx.as_mut() {
    Stmt::Switch(switch) => &mut switch.stx.branches[branch].stx.body,
    other => panic!("expected switch statement, got {other:?}"),
  }
}

/// Marks the first occurrence of `text` in `source` as edited, so everything containing it is
/// reprinted while the tree itself stays unchanged.
fn edit_at(source: &str, text: &str) -> EditSet {
  let start = source.find(text).expect("text to edit");
  let mut edits = EditSet::new();
  edits.record(Loc(start, start + text.len()));
  edits
}

fn preserve_with_edit(source: &str, text: &str) -> String {
  let top = parse(source);
  emit_js(source, &top, &edit_at(source, text), EmitOptions::preserve()).unwrap()
}

fn function_body(top: &mut Node<TopLevel>, index: usize) -> &mut Vec<Node<Stmt>> {
  match top.stx.body[index].stx.as_mut() {
    Stmt::FunctionDecl(decl) => match &mut decl.stx.function.stx.body {
      FuncBody::Block(body) => &mut body.stx.body,
      other => panic!("expected block body, got {other:?}"),
    },
    other => panic!("expected function declaration, got {other:?}"),
  }
}

#[test]
fn unedited_source_is_returned_verbatim() {
  let source = "#!/usr/bin/env node\n// header\nlet a   = 1 ;\n\n/* gap */ if(a){b()}\n";
  let top = parse(source);
  let out = emit_js(source, &top, &EditSet::new(), EmitOptions::preserve()).unwrap();
  assert_eq!(out, source);
}

#[test]
fn edited_statement_keeps_surrounding_comments() {
  let source = "// header\nlet a = 1;   // trailing\nif (a) {\n    b  =  2;\n}\nc(  d  );\n";
  let mut top = parse(source);
  let mut edits = EditSet::new();
  declarations_to_assignments(&mut top.stx.body, &mut edits);
  let out = emit_js(source, &top, &edits, EmitOptions::preserve()).unwrap();
  assert_text_eq(
    &out,
    "// header\na = 1;   // trailing\nif (a) {\n    b  =  2;\n}\nc(  d  );\n",
  );
}

#[test]
fn statements_sharing_a_location_go_on_their_own_lines() {
  let source = "function f() {\n  var a = 1, b = 2;\n  return a + b;\n}\n";
  let mut top = parse(source);
  let mut edits = EditSet::new();
  declarations_to_assignments(function_body(&mut top, 0), &mut edits);
  let out = emit_js(source, &top, &edits, EmitOptions::preserve()).unwrap();
  assert_text_eq(
    &out,
    "function f() {\n  a = 1;\n  b = 2;\n  return a + b;\n}\n",
  );
}

#[test]
fn statements_sharing_a_line_with_their_block_stay_on_it() {
  let source = "function f() { var a = 1, b = 2; return a; }\n";
  let mut top = parse(source);
  let mut edits = EditSet::new();
  declarations_to_assignments(function_body(&mut top, 0), &mut edits);
  let out = emit_js(source, &top, &edits, EmitOptions::preserve()).unwrap();
  assert_text_eq(&out, "function f() { a = 1; b = 2; return a; }\n");
}

#[test]
fn one_line_blocks_are_spaced_evenly() {
  let source = "function f() {x();let a=1;return a}";
  let mut top = parse(source);
  let mut edits = EditSet::new();
  declarations_to_assignments(function_body(&mut top, 0), &mut edits);
  let out = emit_js(source, &top, &edits, EmitOptions::preserve()).unwrap();
  assert_text_eq(&out, "function f() { x(); a = 1; return a }");
}

#[test]
fn parameters_and_arguments_keep_their_comments() {
  let source = "f(/* a */ x, ...rest, function (/* p */ a, b = /* d */ 1) { y  =  1 });\n";
  assert_text_eq(
    &preserve_with_edit(source, "y  =  1"),
    "f(/* a */ x, ...rest, function(/* p */ a, b = /* d */ 1) { y = 1; });\n",
  );
  let source = "new C( // why\n  x,\n  async (/* v */ v) => { y  =  1 },\n);\n";
  assert_text_eq(
    &preserve_with_edit(source, "y  =  1"),
    "new C( // why\n  x,\n  async (/* v */ v) => { y = 1; },\n);\n",
  );
}

#[test]
fn object_members_keep_their_comments() {
  let source = "o = { /* head */ a: 1, // line\n  m() { y  =  1 } /* tail */ };\n";
  assert_text_eq(
    &preserve_with_edit(source, "y  =  1"),
    "o = { /* head */ a: 1, // line\n  m() { y = 1; } /* tail */ };\n",
  );
}

#[test]
fn array_holes_and_spreads_keep_their_comments() {
  let source = "a = [ /* first */ 1, , /* gap */ ...b, function () { y  =  1 }, ];\n";
  assert_text_eq(
    &preserve_with_edit(source, "y  =  1"),
    "a = [ /* first */ 1, , /* gap */ ...b, function() { y = 1; }, ];\n",
  );
}

#[test]
fn class_members_keep_their_comments() {
  let source =
    "class A {\n  // first\n  a = 1;\n  static { y  =  1 }\n  /* last */ m() {}\n}\n";
  assert_text_eq(
    &preserve_with_edit(source, "y  =  1"),
    "class A {\n  // first\n  a = 1;\n  static { y = 1; }\n  /* last */ m() {}\n}\n",
  );
}

#[test]
fn switch_labels_keep_their_comments() {
  let source = "switch (k) {\n  case 1: /* c */ y  =  1; break;\n  default:\n    f();\n}\n";
  assert_text_eq(
    &preserve_with_edit(source, "y  =  1;"),
    "switch (k) {\n  case 1: /* c */ y = 1; break;\n  default:\n    f();\n}\n",
  );
}

#[test]
fn case_bodies_follow_their_source_lines() {
  let source = "switch (k) {\n  case 1:\n    var a = 1, b = 2;\n  case 2: var c = 3, d = 4;\n}\n";
  let mut top = parse(source);
  let mut edits = EditSet::new();
  declarations_to_assignments(switch_branch_body(&mut top, 0, 0), &mut edits);
  declarations_to_assignments(switch_branch_body(&mut top, 0, 1), &mut edits);
  let out = emit_js(source, &top, &edits, EmitOptions::preserve()).unwrap();
  assert_text_eq(
    &out,
    "switch (k) {\n  case 1:\n    a = 1;\n    b = 2;\n  case 2: c = 3; d = 4;\n}\n",
  );
}

#[test]
fn replaced_statement_is_guarded_against_asi() {
  let source = "x = a\ny()\n";
  let mut top = parse(source);
  let loc = top.stx.body[1].loc;
  let arr = Node::new(loc, LitArrExpr {
    elements: vec![LitArrElem::Single(id(loc, "c"))],
  })
  .into_wrapped();
  top.stx.body[1] = expr_stmt(loc, arr);
  let mut edits = EditSet::new();
  edits.record(loc);
  let out = emit_js(source, &top, &edits, EmitOptions::preserve()).unwrap();
  assert_text_eq(&out, "x = a\n;[c];\n");
}

#[test]
fn canonical_and_minified_ignore_source_formatting() {
  let source = "if(a){b()}else{c()}";
  let top = parse(source);
  let canonical = emit_js(source, &top, &EditSet::new(), EmitOptions::canonical()).unwrap();
  assert_text_eq(&canonical, "if (a) {\n  b();\n} else {\n  c();\n}\n");
  let minified = emit_js(source, &top, &EditSet::new(), EmitOptions::minified()).unwrap();
  assert_eq!(minified, "if(a){b();}else{c();}");
}

#[test]
fn canonical_case_bodies_are_indented_below_their_label() {
  let source = "switch(k){case 1:a();break;default:b()}";
  let top = parse(source);
  let out = emit_js(source, &top, &EditSet::new(), EmitOptions::canonical()).unwrap();
  assert_text_eq(
    &out,
    "switch (k) {\n  case 1:\n    a();\n    break;\n  default:\n    b();\n}\n",
  );
}
