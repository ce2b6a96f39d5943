use crate::err::ExprifyError;
use emit_js::EmitMode;
use serde::Deserialize;
use serde::Serialize;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

/// A single rewrite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
  /// `let x = y` becomes `x = y`.
  VarDecl,
  /// A `for` body moves into the update clause.
  For,
  /// A `while` body moves into the test.
  While,
  /// `do { a } while (b)` becomes `while ((a, b));`.
  DoWhile,
  /// `t ? (x = a) : (x = b)` becomes `x = t ? a : b`.
  Ternary,
  /// `if (t) { a } else { b }` becomes `t ? (a) : (b);`.
  IfElse,
  /// `if (t) { x = a }` becomes `x = t ? a : x;`.
  IfAssign,
}

impl Rule {
  pub const ALL: [Rule; 7] = [
    Rule::VarDecl,
    Rule::For,
    Rule::While,
    Rule::DoWhile,
    Rule::Ternary,
    Rule::IfElse,
    Rule::IfAssign,
  ];

  pub fn name(self) -> &'static str {
    match self {
      Rule::VarDecl => "var-decl",
      Rule::For => "for",
      Rule::While => "while",
      Rule::DoWhile => "do-while",
      Rule::Ternary => "ternary",
      Rule::IfElse => "if-else",
      Rule::IfAssign => "if-assign",
    }
  }

  /// The construct the rule rewrites, as used in log messages.
  pub fn construct(self) -> &'static str {
    match self {
      Rule::VarDecl => "variable declaration",
      Rule::For => "for statement",
      Rule::While => "while statement",
      Rule::DoWhile => "do while statement",
      Rule::Ternary => "ternary",
      Rule::IfElse => "if/else ternary",
      Rule::IfAssign => "if assignment statement",
    }
  }

  fn bit(self) -> u8 {
    1 << (self as u8)
  }
}

impl Display for Rule {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for Rule {
  type Err = ExprifyError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Rule::ALL
      .into_iter()
      .find(|rule| rule.name() == s)
      .ok_or_else(|| ExprifyError::InvalidRule(s.to_string()))
  }
}

/// The enabled rules. Every rule is enabled by default.
#[derive(Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<Rule>")]
pub struct RuleSet(u8);

impl RuleSet {
  pub fn all() -> RuleSet {
    RuleSet::from_iter(Rule::ALL)
  }

  pub fn none() -> RuleSet {
    RuleSet(0)
  }

  pub fn with(self, rule: Rule) -> RuleSet {
    RuleSet(self.0 | rule.bit())
  }

  pub fn without(self, rule: Rule) -> RuleSet {
    RuleSet(self.0 & !rule.bit())
  }

  pub fn contains(self, rule: Rule) -> bool {
    self.0 & rule.bit() != 0
  }

  pub fn is_empty(self) -> bool {
    self.0 == 0
  }

  pub fn iter(self) -> impl Iterator<Item = Rule> {
    Rule::ALL.into_iter().filter(move |rule| self.contains(*rule))
  }
}

impl Default for RuleSet {
  fn default() -> Self {
    RuleSet::all()
  }
}

impl FromIterator<Rule> for RuleSet {
  fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
    iter.into_iter().fold(RuleSet::none(), RuleSet::with)
  }
}

impl From<Vec<Rule>> for RuleSet {
  fn from(rules: Vec<Rule>) -> Self {
    rules.into_iter().collect()
  }
}

/// Parses a comma-separated list of rule names, such as `for,while,if-else`.
impl FromStr for RuleSet {
  type Err = ExprifyError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    s.split(',')
      .map(str::trim)
      .filter(|name| !name.is_empty())
      .map(Rule::from_str)
      .collect()
  }
}

impl fmt::Debug for RuleSet {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.debug_set().entries(self.iter().map(Rule::name)).finish()
  }
}

/// How a `while` body is folded into its test.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WhileForm {
  /// `while (t && (a, b, true));`, which keeps the loop's semantics.
  #[default]
  AndTrue,
  /// `while ((a, b, t));`, which also runs the body before the first test.
  Sequence,
}

#[derive(Deserialize)]
#[serde(remote = "EmitMode", rename_all = "kebab-case")]
enum EmitModeDef {
  Preserve,
  Canonical,
  Minified,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExprifyOptions {
  pub rules: RuleSet,
  pub while_form: WhileForm,
  #[serde(with = "EmitModeDef")]
  pub emit: EmitMode,
  /// Maximum number of rewrite passes. Passes stop early once one changes nothing.
  pub passes: usize,
}

impl ExprifyOptions {
  pub fn with_rules(mut self, rules: RuleSet) -> Self {
    self.rules = rules;
    self
  }

  pub fn with_while_form(mut self, while_form: WhileForm) -> Self {
    self.while_form = while_form;
    self
  }

  pub fn with_emit_mode(mut self, emit: EmitMode) -> Self {
    self.emit = emit;
    self
  }

  pub fn with_passes(mut self, passes: usize) -> Self {
    self.passes = passes;
    self
  }
}

impl Default for ExprifyOptions {
  fn default() -> Self {
    ExprifyOptions {
      rules: RuleSet::all(),
      while_form: WhileForm::default(),
      emit: EmitMode::Preserve,
      passes: 1,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::ExprifyOptions;
  use super::Rule;
  use super::RuleSet;
  use super::WhileForm;
  use crate::err::ExprifyError;
  use emit_js::EmitMode;

  #[test]
  fn parses_rule_lists() {
    let rules: RuleSet = "for, while,if-else".parse().unwrap();
    assert_eq!(
      rules.iter().collect::<Vec<_>>(),
      vec![Rule::For, Rule::While, Rule::IfElse]
    );
    assert!("".parse::<RuleSet>().unwrap().is_empty());
    assert!(matches!(
      "for,loop".parse::<RuleSet>(),
      Err(ExprifyError::InvalidRule(name)) if name == "loop"
    ));
  }

  #[test]
  fn builds_rule_sets() {
    let rules = RuleSet::all().without(Rule::Ternary);
    assert!(!rules.contains(Rule::Ternary));
    assert!(rules.contains(Rule::IfAssign));
    assert_eq!(rules.with(Rule::Ternary), RuleSet::all());
    assert_eq!(format!("{:?}", RuleSet::none().with(Rule::DoWhile)), "{\"do-while\"}");
  }

  #[test]
  fn loads_options_from_json() {
    let opts: ExprifyOptions = serde_json::from_str(
      r#"{"rules": ["var-decl", "if-assign"], "while_form": "sequence", "emit": "minified", "passes": 3}"#,
    )
    .unwrap();
    assert_eq!(opts.rules, RuleSet::none().with(Rule::VarDecl).with(Rule::IfAssign));
    assert_eq!(opts.while_form, WhileForm::Sequence);
    assert_eq!(opts.emit, EmitMode::Minified);
    assert_eq!(opts.passes, 3);

    let defaults: ExprifyOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(defaults.rules, RuleSet::all());
    assert_eq!(defaults.while_form, WhileForm::AndTrue);
    assert_eq!(defaults.emit, EmitMode::Preserve);
    assert_eq!(defaults.passes, 1);

    assert!(serde_json::from_str::<ExprifyOptions>(r#"{"rules": ["unrolling"]}"#).is_err());
    assert!(serde_json::from_str::<ExprifyOptions>(r#"{"pases": 2}"#).is_err());
  }
}
