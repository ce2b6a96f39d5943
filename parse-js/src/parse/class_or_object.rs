use super::expr::pat::ParsePatternRules;
use super::ParseCtx;
use super::Parser;
use crate::ast::class_or_object::ClassElement;
use crate::ast::class_or_object::ClassMember;
use crate::ast::class_or_object::ClassOrObjGetter;
use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::class_or_object::ClassOrObjMemberDirectKey;
use crate::ast::class_or_object::ClassOrObjMethod;
use crate::ast::class_or_object::ClassOrObjSetter;
use crate::ast::class_or_object::ClassOrObjVal;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::operator::OperatorName;
use crate::operator::OPERATORS;
use crate::parse::unexpected;
use crate::token::Token;
use crate::token::TT;

/// Whether a modifier keyword such as `get` or `static` is followed by something that makes it a modifier rather than the member's own name.
fn modifies_next(next: &Token) -> bool {
  !matches!(
    next.typ,
    TT::ParenthesisOpen
      | TT::Equals
      | TT::Semicolon
      | TT::BraceClose
      | TT::Comma
      | TT::Colon
      | TT::EOF
  )
}

impl<'a> Parser<'a> {
  pub fn class_heritage(&mut self, ctx: ParseCtx) -> SyntaxResult<Option<Node<Expr>>> {
    self
      .consume_if(TT::KeywordExtends)
      .and_then(|| {
        self.expr_with_min_prec(ctx, OPERATORS[&OperatorName::New].precedence, [TT::BraceOpen])
      })
  }

  pub fn class_body(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<ClassElement>> {
    self.require(TT::BraceOpen)?;
    let mut members = Vec::new();
    loop {
      while self.consume_if(TT::Semicolon).is_match() {}
      if self.consume_if(TT::BraceClose).is_match() {
        break;
      };
      let (static_tok, next) = self.peek_2();
      if static_tok.typ == TT::KeywordStatic && next.typ == TT::BraceOpen {
        self.consume();
        let block = self.parse_func_block_body(ctx.with_rules(ParsePatternRules {
          await_allowed: false,
          yield_allowed: true,
        }))?;
        members.push(ClassElement::StaticBlock(block));
        continue;
      };
      let member = self.with_loc(|p| {
        let static_ = static_tok.typ == TT::KeywordStatic && modifies_next(&next);
        if static_ {
          p.consume();
        };
        let (key, val) = p.class_or_obj_member(ctx, true)?;
        if let ClassOrObjVal::Prop(_) = val {
          p.require_stmt_end()?;
        };
        Ok(ClassMember { key, static_, val })
      })?;
      members.push(ClassElement::Member(member));
    }
    Ok(members)
  }

  pub fn class_or_obj_key(&mut self, ctx: ParseCtx) -> SyntaxResult<ClassOrObjKey> {
    Ok(if self.peek().typ == TT::BracketOpen {
      ClassOrObjKey::Computed({
        self.require(TT::BracketOpen)?;
        let key = self.assignment_expr(ctx, [TT::BracketClose])?;
        self.require(TT::BracketClose)?;
        key
      })
    } else {
      ClassOrObjKey::Direct(self.with_loc(|p| {
        let t = p.peek();
        let key = match t.typ {
          TT::LiteralString => p.lit_str_val()?,
          TT::LiteralNumber => p.lit_num_val()?.to_string(),
          TT::LiteralBigInt => p.lit_bigint_val()?,
          TT::PrivateMember => p.consume_as_string(),
          t if t.is_identifier_name() => p.consume_as_string(),
          _ => {
            return Err(unexpected(
              &t,
              SyntaxErrorType::ExpectedSyntax("keyword or identifier"),
            ))
          }
        };
        Ok(ClassOrObjMemberDirectKey { key, tt: t.typ })
      })?)
    })
  }

  /// Parses a method, getter, setter or property after any `static`. For an object, a property without a value is a shorthand.
  pub fn class_or_obj_member(
    &mut self,
    ctx: ParseCtx,
    is_class: bool,
  ) -> SyntaxResult<(ClassOrObjKey, ClassOrObjVal)> {
    let (a, b) = self.peek_2();
    let is_async = a.typ == TT::KeywordAsync && modifies_next(&b) && !b.preceded_by_line_terminator;
    let accessor = matches!(a.typ, TT::KeywordGet | TT::KeywordSet)
      && modifies_next(&b)
      && b.typ != TT::Asterisk;
    if accessor {
      return self.class_or_obj_accessor(ctx, a.typ == TT::KeywordGet);
    };
    let start = self.checkpoint();
    if is_async {
      self.consume();
    };
    let generator = self.consume_if(TT::Asterisk).is_match();
    let key = self.class_or_obj_key(ctx)?;
    if is_async || generator || self.peek().typ == TT::ParenthesisOpen {
      let func_ctx = ctx.with_rules(ParsePatternRules {
        await_allowed: !is_async,
        yield_allowed: !generator,
      });
      let func = self.func(func_ctx, is_async, generator)?;
      let loc = self.since_checkpoint(&start);
      return Ok((key, Node::new(loc, ClassOrObjMethod { func }).into()));
    };
    let separator = if is_class { TT::Equals } else { TT::Colon };
    let value = if self.consume_if(separator).is_match() {
      let terminators = if is_class {
        [TT::Semicolon, TT::BraceClose]
      } else {
        [TT::Comma, TT::BraceClose]
      };
      Some(self.assignment_expr(ctx, terminators)?)
    } else {
      None
    };
    Ok((key, ClassOrObjVal::Prop(value)))
  }

  fn class_or_obj_accessor(
    &mut self,
    ctx: ParseCtx,
    getter: bool,
  ) -> SyntaxResult<(ClassOrObjKey, ClassOrObjVal)> {
    let start = self.checkpoint();
    self.consume();
    let key = self.class_or_obj_key(ctx)?;
    let func_ctx = ctx.with_rules(ParsePatternRules::script());
    let func = self.func(func_ctx, false, false)?;
    let loc = self.since_checkpoint(&start);
    let arity = func.stx.parameters.len();
    let val: ClassOrObjVal = if getter {
      if arity != 0 {
        return Err(func.error(SyntaxErrorType::ExpectedSyntax("getter without parameters")));
      };
      Node::new(loc, ClassOrObjGetter { func }).into()
    } else {
      if arity != 1 {
        return Err(func.error(SyntaxErrorType::ExpectedSyntax("setter with one parameter")));
      };
      Node::new(loc, ClassOrObjSetter { func }).into()
    };
    Ok((key, val))
  }
}
