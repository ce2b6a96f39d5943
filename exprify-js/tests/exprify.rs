use emit_js::EmitMode;
use exprify_js::exprify;
use exprify_js::exprify_with_options;
use exprify_js::exprify_with_stats;
use exprify_js::ExprifyError;
use exprify_js::ExprifyOptions;
use exprify_js::Rule;
use exprify_js::RuleSet;
use exprify_js::EXAMPLE_PROGRAM;
use similar::ChangeTag;
use similar::TextDiff;

fn assert_code_eq(actual: &str, expected: &str) {
  if actual == expected {
    return;
  };
  let mut msg = String::from("rewritten code differs:\n");
  for change in TextDiff::from_lines(expected, actual).iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    msg.push_str(sign);
    msg.push_str(&change.to_string());
    if change.missing_newline() {
      msg.push('\n');
    };
  }
  panic!("{msg}");
}

const EXAMPLE_REWRITTEN: &str = "function strlen(str) {
  len = 0;
  for (i = 0; i < str.length; len++, i++) {}
  return len
}

function binarySearch(arr, target) {
  l = 0;
  r = arr.length - 1;
  while (l <= r) {
    mid = (l + r) >> 1;
    if (arr[mid] == target) {
      return mid
    } else arr[mid] < target ? (l = mid + 1) : (r = mid - 1);
  }
  return -1
}
";

#[test]
fn rewrites_the_example_program() {
  assert_code_eq(&exprify(EXAMPLE_PROGRAM).unwrap(), EXAMPLE_REWRITTEN);
}

#[test]
fn example_program_is_stable_after_one_pass() {
  let opts = ExprifyOptions::default().with_passes(4);
  let (out, stats) = exprify_with_stats(EXAMPLE_PROGRAM, &opts).unwrap();
  assert_code_eq(&out, EXAMPLE_REWRITTEN);
  assert_eq!(stats.passes, 2);
  assert_eq!(stats.applied(Rule::VarDecl), 5);
  assert_eq!(stats.applied(Rule::For), 1);
  assert_eq!(stats.applied(Rule::IfElse), 1);
  assert_eq!(stats.applied(Rule::While), 0);
  assert!(stats.skipped(Rule::While) >= 2);
}

#[test]
fn later_passes_rewrite_what_earlier_passes_produced() {
  let source = "if (a) { x = 1 } else { x = 2 }\n";
  assert_eq!(exprify(source).unwrap(), "a ? (x = 1) : (x = 2);\n");

  let opts = ExprifyOptions::default().with_passes(2);
  assert_eq!(exprify_with_options(source, &opts).unwrap(), "x = a ? 1 : 2;\n");

  let (out, stats) = exprify_with_stats(source, &ExprifyOptions::default().with_passes(10)).unwrap();
  assert_eq!(out, "x = a ? 1 : 2;\n");
  assert_eq!(stats.passes, 3);
  assert_eq!(stats.applied(Rule::IfElse), 1);
  assert_eq!(stats.applied(Rule::Ternary), 1);
  assert_eq!(stats.total_applied(), 2);
}

#[test]
fn zero_passes_run_one_pass() {
  let opts = ExprifyOptions::default().with_passes(0);
  assert_eq!(exprify_with_options("let a = 1;", &opts).unwrap(), "a = 1;");
}

#[test]
fn declarations_become_assignments_of_the_same_operands() {
  assert_eq!(
    exprify("let a = f(), b, [c] = d;").unwrap(),
    "a = f();\n[c] = d;"
  );
  assert_eq!(exprify("var u;").unwrap(), "");
}

#[test]
fn for_bodies_fold_into_the_update_clause() {
  let out = exprify("function f(){let x=1;for(let i=0;i<3;i++){x+=i}return x}").unwrap();
  assert_eq!(out, "function f() { x = 1; for (i = 0; i<3; x+=i, i++) {} return x }");
}

#[test]
fn if_else_becomes_a_single_ternary_statement() {
  assert_eq!(
    exprify("if (a) { f(); g() } else { h() }").unwrap(),
    "a ? (f(), g()) : (h());"
  );
}

#[test]
fn if_with_two_statements_is_left_alone() {
  let source = "if (a) {\n  x = 1;\n  y = 2;\n}\n";
  assert_eq!(exprify(source).unwrap(), source);
}

#[test]
fn unchanged_regions_keep_their_comments() {
  let source = "// keep\nlet a = 1; /* note */\nif (a) {\n  // inside\n  f();\n}\n";
  assert_code_eq(
    &exprify(source).unwrap(),
    "// keep\na = 1; /* note */\nif (a) {\n  // inside\n  f();\n}\n",
  );
}

#[test]
fn comments_inside_rewritten_functions_survive() {
  assert_eq!(
    exprify("function f(/* param doc */ a, b = /* dflt */ 1) { let x = 1 }").unwrap(),
    "function f(/* param doc */ a, b = /* dflt */ 1) { x = 1; }"
  );
  assert_eq!(
    exprify("call(/* arg */ 1, function () { let z = 3 });").unwrap(),
    "call(/* arg */ 1, function() { z = 3; });"
  );
}

#[test]
fn comments_between_members_and_case_labels_survive() {
  assert_eq!(
    exprify("const o = { /* head */ a: 1, m() { let y = 2 } /* tail */ };").unwrap(),
    "o = { /* head */ a: 1, m() { y = 2; } /* tail */ };"
  );
  assert_eq!(
    exprify("switch (k) { case 1: /* c */ let v = 1; break; default: f() }").unwrap(),
    "switch (k) { case 1: /* c */ v = 1; break; default: f() }"
  );
  let source = "class A {\n  /* kept */ static {\n    let s = 1;\n  }\n}\n";
  assert_code_eq(
    &exprify(source).unwrap(),
    "class A {\n  /* kept */ static {\n    s = 1;\n  }\n}\n",
  );
}

#[test]
fn syntax_errors_are_reported() {
  assert!(matches!(exprify("let = ;"), Err(ExprifyError::Syntax(_))));
  assert!(matches!(exprify("if (a) {"), Err(ExprifyError::Syntax(_))));
}

#[test]
fn output_can_be_reformatted() {
  let source = "if (a) {  x = 1  }";
  let canonical = ExprifyOptions::default().with_emit_mode(EmitMode::Canonical);
  assert_eq!(exprify_with_options(source, &canonical).unwrap(), "x = a ? 1 : x;\n");
  let minified = ExprifyOptions::default().with_emit_mode(EmitMode::Minified);
  assert_eq!(exprify_with_options(source, &minified).unwrap(), "x=a?1:x;");

  let untouched = canonical.with_rules(RuleSet::none());
  assert_eq!(exprify_with_options("let  a=1", &untouched).unwrap(), "let a = 1;\n");
}

#[test]
fn rules_can_be_disabled() {
  let source = "let a = 1;\ndo { a++; } while (a < 3);";
  let opts = ExprifyOptions::default().with_rules(RuleSet::all().without(Rule::VarDecl));
  assert_eq!(
    exprify_with_options(source, &opts).unwrap(),
    "let a = 1;\nwhile (a++, a < 3);"
  );
}
