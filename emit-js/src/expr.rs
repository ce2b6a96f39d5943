use crate::emitter::with_node_context;
use crate::emitter::EmitError;
use crate::emitter::EmitResult;
use crate::emitter::Emitter;
use crate::escape::string_literal;
use crate::precedence::binary_operand_needs_parens;
use crate::precedence::call_member_prec;
use crate::precedence::child_min_prec_for_binary;
use crate::precedence::expr_prec;
use crate::precedence::needs_parens;
use crate::precedence::new_callee_needs_parens;
use crate::precedence::new_without_args_prec;
use crate::precedence::starts_with_optional_chaining;
use crate::precedence::Prec;
use crate::precedence::Side;
use crate::printer::Printer;
use parse_js::ast::class_or_object::ClassOrObjKey;
use parse_js::ast::class_or_object::ClassOrObjVal;
use parse_js::ast::class_or_object::ObjMember;
use parse_js::ast::class_or_object::ObjMemberType;
use parse_js::ast::expr::lit::LitArrElem;
use parse_js::ast::expr::lit::LitTemplatePart;
use parse_js::ast::expr::BinaryExpr;
use parse_js::ast::expr::CallArg;
use parse_js::ast::expr::Expr;
use parse_js::ast::node::Node;
use parse_js::loc::Loc;
use parse_js::operator::OperatorName;
use parse_js::token::TT;

pub(crate) fn binary_operator_text(op: OperatorName) -> Option<&'static str> {
  Some(match op {
    OperatorName::Addition => "+",
    OperatorName::Assignment => "=",
    OperatorName::AssignmentAddition => "+=",
    OperatorName::AssignmentBitwiseAnd => "&=",
    OperatorName::AssignmentBitwiseLeftShift => "<<=",
    OperatorName::AssignmentBitwiseOr => "|=",
    OperatorName::AssignmentBitwiseRightShift => ">>=",
    OperatorName::AssignmentBitwiseUnsignedRightShift => ">>>=",
    OperatorName::AssignmentBitwiseXor => "^=",
    OperatorName::AssignmentDivision => "/=",
    OperatorName::AssignmentExponentiation => "**=",
    OperatorName::AssignmentLogicalAnd => "&&=",
    OperatorName::AssignmentLogicalOr => "||=",
    OperatorName::AssignmentMultiplication => "*=",
    OperatorName::AssignmentNullishCoalescing => "??=",
    OperatorName::AssignmentRemainder => "%=",
    OperatorName::AssignmentSubtraction => "-=",
    OperatorName::BitwiseAnd => "&",
    OperatorName::BitwiseLeftShift => "<<",
    OperatorName::BitwiseOr => "|",
    OperatorName::BitwiseRightShift => ">>",
    OperatorName::BitwiseUnsignedRightShift => ">>>",
    OperatorName::BitwiseXor => "^",
    OperatorName::Division => "/",
    OperatorName::Equality => "==",
    OperatorName::Exponentiation => "**",
    OperatorName::GreaterThan => ">",
    OperatorName::GreaterThanOrEqual => ">=",
    OperatorName::In => "in",
    OperatorName::Inequality => "!=",
    OperatorName::Instanceof => "instanceof",
    OperatorName::LessThan => "<",
    OperatorName::LessThanOrEqual => "<=",
    OperatorName::LogicalAnd => "&&",
    OperatorName::LogicalOr => "||",
    OperatorName::Multiplication => "*",
    OperatorName::NullishCoalescing => "??",
    OperatorName::Remainder => "%",
    OperatorName::StrictEquality => "===",
    OperatorName::StrictInequality => "!==",
    OperatorName::Subtraction => "-",
    _ => return None,
  })
}

fn unary_operator_text(op: OperatorName) -> Option<&'static str> {
  Some(match op {
    OperatorName::Await => "await",
    OperatorName::BitwiseNot => "~",
    OperatorName::Delete => "delete",
    OperatorName::LogicalNot => "!",
    OperatorName::PrefixDecrement => "--",
    OperatorName::PrefixIncrement => "++",
    OperatorName::Typeof => "typeof",
    OperatorName::UnaryNegation => "-",
    OperatorName::UnaryPlus => "+",
    OperatorName::Void => "void",
    _ => return None,
  })
}

/// The range of the syntax inside the `Node<Expr>` wrapper, which excludes grouping parentheses.
fn inner_loc(expr: &Node<Expr>) -> Loc {
  match expr.stx.as_ref() {
    Expr::ArrowFunc(n) => n.loc,
    Expr::Binary(n) => n.loc,
    Expr::Call(n) => n.loc,
    Expr::Class(n) => n.loc,
    Expr::ComputedMember(n) => n.loc,
    Expr::Cond(n) => n.loc,
    Expr::Func(n) => n.loc,
    Expr::Id(n) => n.loc,
    Expr::Import(n) => n.loc,
    Expr::ImportMeta(n) => n.loc,
    Expr::Member(n) => n.loc,
    Expr::New(n) => n.loc,
    Expr::NewTarget(n) => n.loc,
    Expr::Seq(n) => n.loc,
    Expr::Super(n) => n.loc,
    Expr::TaggedTemplate(n) => n.loc,
    Expr::This(n) => n.loc,
    Expr::Unary(n) => n.loc,
    Expr::UnaryPostfix(n) => n.loc,
    Expr::Yield(n) => n.loc,
    Expr::LitArr(n) => n.loc,
    Expr::LitBigInt(n) => n.loc,
    Expr::LitBool(n) => n.loc,
    Expr::LitNull(n) => n.loc,
    Expr::LitNum(n) => n.loc,
    Expr::LitObj(n) => n.loc,
    Expr::LitRegex(n) => n.loc,
    Expr::LitStr(n) => n.loc,
    Expr::LitTemplate(n) => n.loc,
    Expr::ArrPat(n) => n.loc,
    Expr::IdPat(n) => n.loc,
    Expr::ObjPat(n) => n.loc,
  }
}

/// Whether the expression's own range starts with grouping parentheses.
fn is_grouped(expr: &Node<Expr>) -> bool {
  expr.loc.0 < inner_loc(expr).0
}

fn starts_with_keyword(text: &str, keyword: &str) -> bool {
  text.strip_prefix(keyword).is_some_and(|rest| {
    !rest
      .chars()
      .next()
      .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$' || c == '\\')
  })
}

/// Whether printed expression text would be read as something other than an expression at the
/// start of a statement.
pub(crate) fn is_ambiguous_stmt_start(text: &str) -> bool {
  if text.starts_with('{') || starts_with_keyword(text, "function") || starts_with_keyword(text, "class") {
    return true;
  };
  if starts_with_keyword(text, "async") {
    let rest = text["async".len()..].trim_start_matches([' ', '\t']);
    if starts_with_keyword(rest, "function") {
      return true;
    };
  };
  starts_with_keyword(text, "let") && text["let".len()..].trim_start().starts_with('[')
}

impl<'a> Printer<'a> {
  pub fn expr(&self, em: &mut Emitter, expr: &Node<Expr>, min_prec: Prec) -> EmitResult {
    self.expr_wrapped(em, expr, needs_parens(expr_prec(expr), min_prec))
  }

  /// Prints `expr` into a separate buffer so its text can be inspected before it is written.
  pub fn expr_text(&self, em: &Emitter, expr: &Node<Expr>, min_prec: Prec) -> EmitResult<String> {
    let mut fragment = em.fragment();
    self.expr(&mut fragment, expr, min_prec)?;
    Ok(fragment.into_string())
  }

  pub fn expr_wrapped(&self, em: &mut Emitter, expr: &Node<Expr>, wrap: bool) -> EmitResult {
    with_node_context(expr.loc, || {
      if let Some(text) = self.original(em, expr.loc)? {
        let wrap = wrap && !is_grouped(expr);
        if wrap {
          em.write_punct("(");
        };
        em.write_str(text);
        if wrap {
          em.write_punct(")");
        };
        return Ok(());
      };
      if wrap {
        em.write_punct("(");
      };
      self.expr_syntax(em, expr)?;
      if wrap {
        em.write_punct(")");
      };
      Ok(())
    })
  }

  fn expr_syntax(&self, em: &mut Emitter, expr: &Node<Expr>) -> EmitResult {
    match expr.stx.as_ref() {
      Expr::ArrowFunc(arrow) => self.func(em, None, &arrow.stx.func),
      Expr::Binary(binary) => self.binary(em, binary),
      Expr::Call(call) => {
        let callee = &call.stx.callee;
        self.expr(em, callee, call_member_prec())?;
        let open = if call.stx.optional_chaining {
          em.write_punct("?.");
          self.skip(em, callee.loc.1, &["?.("])
        } else {
          self.skip(em, callee.loc.1, &["("])
        };
        self.call_args(em, open, &call.stx.arguments)
      }
      Expr::Class(class) => self.class(
        em,
        class.loc,
        class.stx.name.as_ref().map(|n| (n.stx.name.as_str(), n.loc)),
        class.stx.extends.as_ref(),
        &class.stx.members,
      ),
      Expr::ComputedMember(member) => {
        self.member_object(em, &member.stx.object)?;
        em.write_punct(if member.stx.optional_chaining { "?.[" } else { "[" });
        self.expr(em, &member.stx.member, Prec::LOWEST)?;
        em.write_punct("]");
        Ok(())
      }
      Expr::Cond(cond) => {
        self.expr(em, &cond.stx.test, Prec::SHORT_CIRCUIT)?;
        em.write_operator("?");
        self.expr(em, &cond.stx.consequent, Prec::ASSIGNMENT)?;
        em.write_operator(":");
        self.expr(em, &cond.stx.alternate, Prec::ASSIGNMENT)
      }
      Expr::Func(func) => self.func(
        em,
        func.stx.name.as_ref().map(|n| n.stx.name.as_str()),
        &func.stx.func,
      ),
      Expr::Id(id) => {
        em.write_identifier(&id.stx.name);
        Ok(())
      }
      Expr::Import(import) => {
        em.write_keyword("import");
        em.write_punct("(");
        self.expr(em, &import.stx.module, Prec::ASSIGNMENT)?;
        em.write_punct(")");
        Ok(())
      }
      Expr::ImportMeta(_) => {
        em.write_keyword("import");
        em.write_punct(".");
        em.write_identifier("meta");
        Ok(())
      }
      Expr::Member(member) => {
        self.member_object(em, &member.stx.left)?;
        em.write_punct(if member.stx.optional_chaining { "?." } else { "." });
        em.write_identifier(&member.stx.right);
        Ok(())
      }
      Expr::New(new) => {
        em.write_keyword("new");
        let callee = &new.stx.callee;
        let wrap =
          needs_parens(expr_prec(callee), call_member_prec()) || new_callee_needs_parens(callee);
        self.expr_wrapped(em, callee, wrap)?;
        match &new.stx.arguments {
          Some(args) => {
            let open = self.skip(em, callee.loc.1, &["("]);
            self.call_args(em, open, args)
          }
          None => Ok(()),
        }
      }
      Expr::NewTarget(_) => {
        em.write_keyword("new");
        em.write_punct(".");
        em.write_identifier("target");
        Ok(())
      }
      Expr::Seq(seq) => {
        if seq.stx.exprs.is_empty() {
          return Err(EmitError::unsupported("empty sequence expression"));
        };
        for (i, e) in seq.stx.exprs.iter().enumerate() {
          if i > 0 {
            em.write_punct(",");
            em.write_sep();
          };
          self.expr(em, e, Prec::SEQ_ELEMENT)?;
        }
        Ok(())
      }
      Expr::Super(_) => {
        em.write_keyword("super");
        Ok(())
      }
      Expr::TaggedTemplate(tagged) => {
        let function = &tagged.stx.function;
        let wrap = needs_parens(expr_prec(function), call_member_prec())
          || starts_with_optional_chaining(function);
        self.expr_wrapped(em, function, wrap)?;
        self.template(em, &tagged.stx.parts)
      }
      Expr::This(_) => {
        em.write_keyword("this");
        Ok(())
      }
      Expr::Unary(unary) => {
        let op = unary.stx.operator;
        let text = unary_operator_text(op).ok_or(EmitError::unsupported("unary operator"))?;
        if text.as_bytes()[0].is_ascii_alphabetic() {
          em.write_keyword(text);
        } else {
          em.write_punct(text);
        };
        self.expr(em, &unary.stx.argument, expr_prec(expr))
      }
      Expr::UnaryPostfix(unary) => {
        let text = match unary.stx.operator {
          OperatorName::PostfixIncrement => "++",
          OperatorName::PostfixDecrement => "--",
          _ => return Err(EmitError::unsupported("postfix operator")),
        };
        self.expr(em, &unary.stx.argument, new_without_args_prec())?;
        em.write_punct(text);
        Ok(())
      }
      Expr::Yield(yield_) => {
        em.write_keyword("yield");
        if yield_.stx.delegate {
          em.write_punct("*");
        };
        if let Some(argument) = &yield_.stx.argument {
          em.write_sep();
          self.expr(em, argument, Prec::ASSIGNMENT)?;
        };
        Ok(())
      }
      Expr::LitArr(arr) => {
        em.write_punct("[");
        let mut prev_end = self.skip(em, arr.loc.0, &["["]);
        // Delimiters since the previous element, and how they print when their source can't be
        // copied.
        let mut tokens: Vec<&str> = Vec::new();
        let mut delims = em.fragment();
        for (i, elem) in arr.stx.elements.iter().enumerate() {
          if i > 0 {
            tokens.push(",");
            delims.write_punct(",");
            if !matches!(elem, LitArrElem::Empty) {
              delims.write_sep();
            };
          };
          let e = match elem {
            LitArrElem::Single(e) => e,
            LitArrElem::Rest(e) => {
              tokens.push("...");
              delims.write_punct("...");
              e
            }
            LitArrElem::Empty => continue,
          };
          match prev_end.and_then(|start| self.joint(em, start, e.loc.0, &tokens)) {
            Some(text) => em.write_str(text),
            None => em.write_str(delims.as_str()),
          };
          tokens.clear();
          delims = em.fragment();
          self.expr(em, e, Prec::ASSIGNMENT)?;
          prev_end = Some(e.loc.1);
        }
        // A trailing hole needs its own comma, as one trailing comma is ignored.
        if matches!(arr.stx.elements.last(), Some(LitArrElem::Empty)) {
          tokens.push(",");
          delims.write_punct(",");
        };
        match prev_end.and_then(|start| self.closing(em, start, &tokens, "]")) {
          Some(text) => em.write_str(text),
          None => {
            em.write_str(delims.as_str());
            em.write_punct("]");
          }
        };
        Ok(())
      }
      Expr::LitBigInt(lit) => {
        em.write_number(&format!("{}n", lit.stx.value));
        Ok(())
      }
      Expr::LitBool(lit) => {
        em.write_keyword(if lit.stx.value { "true" } else { "false" });
        Ok(())
      }
      Expr::LitNull(_) => {
        em.write_keyword("null");
        Ok(())
      }
      Expr::LitNum(lit) => {
        if lit.stx.value.0.is_infinite() {
          em.write_number("1e999");
        } else {
          em.write_number(&lit.stx.value.to_string());
        };
        Ok(())
      }
      Expr::LitObj(obj) => {
        let open = self.skip(em, obj.loc.0, &["{"]);
        self.comma_list(em, ("{", open), "}", &obj.stx.members, |m| m.loc, |em, member| {
          self.obj_member(em, member)
        })
      }
      Expr::LitRegex(lit) => {
        em.write_str(&lit.stx.value);
        Ok(())
      }
      Expr::LitStr(lit) => {
        em.write_str(&string_literal(&lit.stx.value));
        Ok(())
      }
      Expr::LitTemplate(lit) => self.template(em, &lit.stx.parts),
      Expr::ArrPat(pat) => self.arr_pat(em, pat),
      Expr::IdPat(pat) => {
        em.write_identifier(&pat.stx.name);
        Ok(())
      }
      Expr::ObjPat(pat) => self.obj_pat(em, pat),
    }
  }

  fn binary(&self, em: &mut Emitter, binary: &Node<BinaryExpr>) -> EmitResult {
    let op = binary.stx.operator;
    let text = binary_operator_text(op).ok_or(EmitError::unsupported("binary operator"))?;
    let operand = |e: &Node<Expr>, side: Side| {
      needs_parens(expr_prec(e), child_min_prec_for_binary(op, side))
        || binary_operand_needs_parens(op, e, side)
    };
    self.expr_wrapped(em, &binary.stx.left, operand(&binary.stx.left, Side::Left))?;
    em.write_operator(text);
    self.expr_wrapped(em, &binary.stx.right, operand(&binary.stx.right, Side::Right))
  }

  fn member_object(&self, em: &mut Emitter, object: &Node<Expr>) -> EmitResult {
    if matches!(object.stx.as_ref(), Expr::LitNum(_)) {
      // `1.x` would be read as the number `1.` followed by `x`.
      let text = self.expr_text(em, object, call_member_prec())?;
      if text.bytes().all(|b| b.is_ascii_digit() || b == b'_') {
        em.write_punct("(");
        em.write_number(&text);
        em.write_punct(")");
      } else {
        em.write_number(&text);
      };
      return Ok(());
    };
    self.expr(em, object, call_member_prec())
  }

  /// Prints `(args)`, where `open` is the source position after the `(` when preserving.
  fn call_args(
    &self,
    em: &mut Emitter,
    open: Option<usize>,
    args: &[Node<CallArg>],
  ) -> EmitResult {
    self.comma_list(em, ("(", open), ")", args, |a| a.loc, |em, arg| {
      with_node_context(arg.loc, || {
        if let Some(text) = self.original(em, arg.loc)? {
          em.write_str(text);
          return Ok(());
        };
        if arg.stx.spread {
          em.write_punct("...");
        };
        self.expr(em, &arg.stx.value, Prec::ASSIGNMENT)
      })
    })
  }

  fn template(&self, em: &mut Emitter, parts: &[LitTemplatePart]) -> EmitResult {
    let mut text = String::from("`");
    for part in parts {
      match part {
        LitTemplatePart::String(raw) => text.push_str(raw),
        LitTemplatePart::Substitution(e) => {
          text.push_str("${");
          text.push_str(&self.expr_text(em, e, Prec::LOWEST)?);
          text.push('}');
        }
      };
    }
    text.push('`');
    em.write_str(&text);
    Ok(())
  }

  pub(crate) fn key(&self, em: &mut Emitter, key: &ClassOrObjKey) -> EmitResult {
    match key {
      ClassOrObjKey::Direct(direct) => {
        let direct = direct.stx.as_ref();
        match direct.tt {
          TT::LiteralString => em.write_str(&string_literal(&direct.key)),
          TT::LiteralNumber => em.write_number(&direct.key),
          TT::LiteralBigInt => em.write_number(&format!("{}n", direct.key)),
          _ => em.write_identifier(&direct.key),
        };
        Ok(())
      }
      ClassOrObjKey::Computed(expr) => {
        em.write_punct("[");
        self.expr(em, expr, Prec::ASSIGNMENT)?;
        em.write_punct("]");
        Ok(())
      }
    }
  }

  fn obj_member(&self, em: &mut Emitter, member: &Node<ObjMember>) -> EmitResult {
    with_node_context(member.loc, || {
      if let Some(text) = self.original(em, member.loc)? {
        em.write_str(text);
        return Ok(());
      };
      self.obj_member_syntax(em, member)
    })
  }

  fn obj_member_syntax(&self, em: &mut Emitter, member: &Node<ObjMember>) -> EmitResult {
    match &member.stx.typ {
      ObjMemberType::Valued { key, val } => match val {
        ClassOrObjVal::Prop(Some(value)) => {
          self.key(em, key)?;
          em.write_punct(":");
          em.write_sep();
          self.expr(em, value, Prec::ASSIGNMENT)
        }
        ClassOrObjVal::Prop(None) => Err(EmitError::unsupported("object property without value")),
        _ => self.class_or_obj_method(em, key, val),
      },
      ObjMemberType::Shorthand { id, initializer } => {
        em.write_identifier(&id.stx.name);
        if let Some(init) = initializer {
          em.write_operator("=");
          self.expr(em, init, Prec::ASSIGNMENT)?;
        };
        Ok(())
      }
      ObjMemberType::Rest { val } => {
        em.write_punct("...");
        self.expr(em, val, Prec::ASSIGNMENT)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::is_ambiguous_stmt_start;

  #[test]
  fn detects_ambiguous_statement_starts() {
    assert!(is_ambiguous_stmt_start("{}.x"));
    assert!(is_ambiguous_stmt_start("function () {}()"));
    assert!(is_ambiguous_stmt_start("async function () {}()"));
    assert!(is_ambiguous_stmt_start("class {}.name"));
    assert!(is_ambiguous_stmt_start("let [a] = b"));
    assert!(!is_ambiguous_stmt_start("let.x"));
    assert!(!is_ambiguous_stmt_start("functional()"));
    assert!(!is_ambiguous_stmt_start("async()"));
  }
}
