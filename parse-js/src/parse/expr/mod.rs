pub mod lit;
pub mod pat;
pub mod util;

use super::ParseCtx;
use super::Parser;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::ArrowFuncExpr;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::CallArg;
use crate::ast::expr::CallExpr;
use crate::ast::expr::ClassExpr;
use crate::ast::expr::ComputedMemberExpr;
use crate::ast::expr::CondExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::FuncExpr;
use crate::ast::expr::IdExpr;
use crate::ast::expr::ImportExpr;
use crate::ast::expr::ImportMeta;
use crate::ast::expr::MemberExpr;
use crate::ast::expr::NewExpr;
use crate::ast::expr::NewTarget;
use crate::ast::expr::SeqExpr;
use crate::ast::expr::SuperExpr;
use crate::ast::expr::TaggedTemplateExpr;
use crate::ast::expr::ThisExpr;
use crate::ast::expr::UnaryExpr;
use crate::ast::expr::UnaryPostfixExpr;
use crate::ast::expr::YieldExpr;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ParamDecl;
use crate::ast::stmt::decl::PatDecl;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::operator::Associativity;
use crate::operator::OperatorName;
use crate::operator::OPERATORS;
use crate::parse::operator::infix_operator;
use crate::parse::operator::prefix_operator;
use crate::parse::unexpected;
use crate::token::TT;
use pat::is_valid_pattern_identifier;
use pat::ParsePatternRules;
use util::lhs_expr_to_assign_target;

fn prec(name: OperatorName) -> u8 {
  OPERATORS[&name].precedence
}

impl<'a> Parser<'a> {
  pub fn call_args(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<Node<CallArg>>> {
    self.require(TT::ParenthesisOpen)?;
    self.list_with_loc(TT::Comma, TT::ParenthesisClose, |p| {
      let spread = p.consume_if(TT::DotDotDot).is_match();
      let value = p.expr(ctx, [TT::Comma, TT::ParenthesisClose])?;
      Ok(CallArg { spread, value })
    })
  }

  /// Parses a full expression, including the comma operator. Parsing stops before any of `terminators` at the top level of the expression.
  pub fn expr<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    terminators: [TT; N],
  ) -> SyntaxResult<Node<Expr>> {
    self.expr_with_min_prec(ctx, 1, terminators)
  }

  /// Parses an expression that cannot contain a top-level comma, such as an argument or initializer.
  pub fn assignment_expr<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    terminators: [TT; N],
  ) -> SyntaxResult<Node<Expr>> {
    self.expr_with_min_prec(ctx, prec(OperatorName::Assignment), terminators)
  }

  /// Parses a parenthesised expression like `(a + b)`. The location is widened to include the parentheses.
  pub fn grouping(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Expr>> {
    let start = self.require(TT::ParenthesisOpen)?.loc;
    let mut expr = self.expr(ctx, [TT::ParenthesisClose])?;
    let end = self.require(TT::ParenthesisClose)?.loc;
    expr.loc = start + end;
    Ok(expr)
  }

  /// Tries to parse an arrow function, returning None without an error if the tokens are not an arrow function's parameters followed by `=>`.
  fn maybe_arrow_func_expr<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    terminators: [TT; N],
  ) -> SyntaxResult<Option<Node<ArrowFuncExpr>>> {
    let start = self.checkpoint();
    // `async => 1` has a parameter named `async`.
    let (first, after_async) = self.peek_2();
    let is_async = first.typ == TT::KeywordAsync
      && after_async.typ != TT::EqualsChevronRight
      && !after_async.preceded_by_line_terminator;
    if is_async {
      self.consume();
    };
    let params_ctx = ctx.with_rules(ParsePatternRules {
      await_allowed: !is_async && ctx.rules.await_allowed,
      ..ctx.rules
    });
    let parameters = if is_valid_pattern_identifier(self.peek().typ, params_ctx.rules) {
      let name = self.consume().loc;
      vec![Node::new(name, ParamDecl {
        rest: false,
        pattern: Node::new(name, PatDecl {
          pat: Node::new(name, IdPat {
            name: self.string(name),
          })
          .into_wrapped(),
        }),
        default_value: None,
      })]
    } else {
      match self.func_params(params_ctx) {
        Ok(params) => params,
        Err(_) => return Ok(None),
      }
    };
    let arrow = self.peek();
    if arrow.typ != TT::EqualsChevronRight {
      return Ok(None);
    };
    self.consume();
    if arrow.preceded_by_line_terminator {
      // Illegal under automatic semicolon insertion rules.
      return Err(arrow.error(SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters));
    };
    let body: FuncBody = if self.peek().typ == TT::BraceOpen {
      self.parse_func_block_body(params_ctx)?.into()
    } else {
      self.assignment_expr(params_ctx, terminators)?.into()
    };
    let loc = self.since_checkpoint(&start);
    let func = Node::new(loc, Func {
      arrow: true,
      async_: is_async,
      generator: false,
      parameters,
      body,
    });
    Ok(Some(Node::new(loc, ArrowFuncExpr { func })))
  }

  pub fn arrow_function_or_grouping_expr<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    terminators: [TT; N],
  ) -> SyntaxResult<Node<Expr>> {
    // Try to parse as an arrow function signature first, and backtrack to a grouping if that fails.
    // Once `=>` has been seen, it's definitely an arrow function and errors are not swallowed.
    match self.rewindable(|p| p.maybe_arrow_func_expr(ctx, terminators))? {
      Some(arrow) => Ok(arrow.into_wrapped()),
      None => self.grouping(ctx),
    }
  }

  pub fn func_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<FuncExpr>> {
    self.with_loc(|p| {
      let is_async = p.consume_if(TT::KeywordAsync).is_match();
      p.require(TT::KeywordFunction)?;
      let generator = p.consume_if(TT::Asterisk).is_match();
      // The name of a function expression is bound inside the function, so it follows the function's own rules.
      let fn_ctx = ctx.with_rules(ParsePatternRules {
        await_allowed: !is_async,
        yield_allowed: !generator,
      });
      let name = p.maybe_class_or_func_name(fn_ctx);
      let func = p.func(fn_ctx, is_async, generator)?;
      Ok(FuncExpr { name, func })
    })
  }

  pub fn class_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ClassExpr>> {
    self.with_loc(|p| {
      p.require(TT::KeywordClass)?;
      let name = p.maybe_class_or_func_name(ctx);
      let extends = p.class_heritage(ctx)?;
      let members = p.class_body(ctx)?;
      Ok(ClassExpr {
        name,
        extends,
        members,
      })
    })
  }

  pub fn id_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<IdExpr>> {
    self.with_loc(|p| {
      let name = p.id_name(ctx)?;
      Ok(IdExpr { name })
    })
  }

  /// Parses a raw valid identifier name as a string. To parse an IdExpr, use `id_expr`.
  pub fn id_name(&mut self, ctx: ParseCtx) -> SyntaxResult<String> {
    let t = self.consume();
    if !is_valid_pattern_identifier(t.typ, ctx.rules) {
      return Err(unexpected(&t, SyntaxErrorType::ExpectedSyntax("identifier")));
    };
    Ok(self.string(t.loc))
  }

  fn yield_expr<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    terminators: [TT; N],
  ) -> SyntaxResult<Node<Expr>> {
    Ok(
      self
        .with_loc(|p| {
          p.require(TT::KeywordYield)?;
          let delegate = p.consume_if_pred(|t| t.typ == TT::Asterisk && !t.preceded_by_line_terminator);
          let next = p.peek_with_mode(LexMode::SlashIsRegex);
          let has_argument = delegate.is_match()
            || !(next.preceded_by_line_terminator
              || terminators.contains(&next.typ)
              || matches!(
                next.typ,
                TT::ParenthesisClose
                  | TT::BracketClose
                  | TT::BraceClose
                  | TT::Comma
                  | TT::Semicolon
                  | TT::Colon
                  | TT::EOF
              ));
          let argument = if has_argument {
            Some(p.assignment_expr(ctx, terminators)?)
          } else {
            None
          };
          Ok(YieldExpr {
            delegate: delegate.is_match(),
            argument,
          })
        })?
        .into_wrapped(),
    )
  }

  /// Parses `new X(...)`, `new X` or `new.target`. Member accesses belong to the callee; the first argument list ends the `new`.
  fn new_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Expr>> {
    let start = self.checkpoint();
    let new_tok = self.require(TT::KeywordNew)?;
    if self.consume_if(TT::Dot).is_match() {
      let prop = self.consume();
      if self.str(prop.loc) != "target" {
        return Err(unexpected(
          &prop,
          SyntaxErrorType::ExpectedSyntax("`target` property"),
        ));
      };
      return Ok(Node::new(new_tok.loc + prop.loc, NewTarget {}).into_wrapped());
    };
    let mut callee = if self.peek().typ == TT::KeywordNew {
      self.new_expr(ctx)?
    } else {
      self.expr_operand(ctx, [])?
    };
    loop {
      let t = self.peek();
      callee = match t.typ {
        TT::Dot => {
          self.consume();
          self.member_access(callee, false)?
        }
        TT::BracketOpen => {
          self.consume();
          self.computed_member_access(ctx, callee, false)?
        }
        TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => {
          self.tagged_template(ctx, callee)?
        }
        _ => break,
      };
    }
    let arguments = if self.peek().typ == TT::ParenthesisOpen {
      Some(self.call_args(ctx)?)
    } else {
      None
    };
    let loc = self.since_checkpoint(&start);
    Ok(Node::new(loc, NewExpr { callee, arguments }).into_wrapped())
  }

  fn member_access(&mut self, left: Node<Expr>, optional_chaining: bool) -> SyntaxResult<Node<Expr>> {
    let right_tok = self.consume();
    if !right_tok.typ.is_identifier_name() && right_tok.typ != TT::PrivateMember {
      return Err(unexpected(
        &right_tok,
        SyntaxErrorType::ExpectedSyntax("member access property"),
      ));
    };
    let right = right_tok.loc;
    Ok(
      Node::new(left.loc + right, MemberExpr {
        optional_chaining,
        left,
        right: self.string(right),
      })
      .into_wrapped(),
    )
  }

  fn computed_member_access(
    &mut self,
    ctx: ParseCtx,
    object: Node<Expr>,
    optional_chaining: bool,
  ) -> SyntaxResult<Node<Expr>> {
    let member = self.expr(ctx, [TT::BracketClose])?;
    let end = self.require(TT::BracketClose)?;
    Ok(
      Node::new(object.loc + end.loc, ComputedMemberExpr {
        optional_chaining,
        object,
        member,
      })
      .into_wrapped(),
    )
  }

  fn tagged_template(&mut self, ctx: ParseCtx, function: Node<Expr>) -> SyntaxResult<Node<Expr>> {
    let start = self.checkpoint();
    let parts = self.lit_template_parts(ctx)?;
    let loc = function.loc + self.since_checkpoint(&start);
    Ok(Node::new(loc, TaggedTemplateExpr { function, parts }).into_wrapped())
  }

  fn expr_operand<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    terminators: [TT; N],
  ) -> SyntaxResult<Node<Expr>> {
    let t0 = self.peek_with_mode(LexMode::SlashIsRegex);
    // Handle unary operators before the operand.
    if let Some(operator) = prefix_operator(t0.typ)
      .filter(|operator| operator.name != OperatorName::Await || !ctx.rules.await_allowed)
    {
      return Ok(
        self
          .with_loc(|p| {
            p.consume_with_mode(LexMode::SlashIsRegex);
            let next_min_prec =
              operator.precedence + (operator.associativity == Associativity::Left) as u8;
            let argument = p.expr_with_min_prec(ctx, next_min_prec, terminators)?;
            Ok(UnaryExpr {
              operator: operator.name,
              argument,
            })
          })?
          .into_wrapped(),
      );
    };

    let (_, t1) = self.peek_2();
    #[rustfmt::skip]
    let expr: Node<Expr> = match t0.typ {
      TT::KeywordYield if !ctx.rules.yield_allowed => self.yield_expr(ctx, terminators)?,
      TT::KeywordNew => self.new_expr(ctx)?,
      TT::KeywordAsync if t1.typ == TT::KeywordFunction && !t1.preceded_by_line_terminator => {
        self.func_expr(ctx)?.into_wrapped()
      }
      TT::KeywordAsync if t1.typ != TT::EqualsChevronRight => {
        match self.rewindable(|p| p.maybe_arrow_func_expr(ctx, terminators))? {
          Some(arrow) => arrow.into_wrapped(),
          None => self.id_expr(ctx)?.into_wrapped(),
        }
      }
      typ if is_valid_pattern_identifier(typ, ctx.rules) => {
        if t1.typ == TT::EqualsChevronRight {
          match self.maybe_arrow_func_expr(ctx, terminators)? {
            Some(arrow) => arrow.into_wrapped(),
            None => return Err(t0.error(SyntaxErrorType::ExpectedSyntax("arrow function"))),
          }
        } else {
          self.id_expr(ctx)?.into_wrapped()
        }
      }
      TT::BracketOpen => self.lit_arr(ctx)?.into_wrapped(),
      TT::BraceOpen => self.lit_obj(ctx)?.into_wrapped(),
      TT::KeywordClass => self.class_expr(ctx)?.into_wrapped(),
      TT::KeywordFunction => self.func_expr(ctx)?.into_wrapped(),
      TT::KeywordImport => match t1.typ {
        TT::Dot => self.import_meta()?.into_wrapped(),
        TT::ParenthesisOpen => self.import_call(ctx)?.into_wrapped(),
        _ => return Err(t0.error(SyntaxErrorType::ExpectedSyntax("import expression"))),
      },
      TT::KeywordSuper => self.with_loc(|p| {
        p.consume();
        Ok(SuperExpr {})
      })?.into_wrapped(),
      TT::KeywordThis => self.with_loc(|p| {
        p.consume();
        Ok(ThisExpr {})
      })?.into_wrapped(),
      TT::LiteralBigInt => self.lit_bigint()?.into_wrapped(),
      TT::LiteralTrue | TT::LiteralFalse => self.lit_bool()?.into_wrapped(),
      TT::LiteralNull => self.lit_null()?.into_wrapped(),
      TT::LiteralNumber => self.lit_num()?.into_wrapped(),
      TT::LiteralRegex => self.lit_regex()?.into_wrapped(),
      TT::LiteralString => self.lit_str()?.into_wrapped(),
      TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => self.lit_template(ctx)?.into_wrapped(),
      TT::ParenthesisOpen => self.arrow_function_or_grouping_expr(ctx, terminators)?,
      // Only valid as the left operand of `in`, e.g. `#x in obj`.
      TT::PrivateMember => self.with_loc(|p| {
        let name = p.consume_as_string();
        Ok(IdExpr { name })
      })?.into_wrapped(),
      TT::Invalid if self.str(t0.loc).starts_with('/') => self.lit_regex()?.into_wrapped(),
      TT::Invalid if self.str(t0.loc).starts_with(['"', '\'']) => self.lit_str()?.into_wrapped(),
      TT::Invalid if self.str(t0.loc).starts_with(|c: char| c.is_ascii_digit() || c == '.') => {
        return Err(t0.error(SyntaxErrorType::MalformedLiteralNumber))
      }
      _ => return Err(unexpected(&t0, SyntaxErrorType::ExpectedSyntax("expression operand"))),
    };
    Ok(expr)
  }

  pub fn expr_with_min_prec<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    min_prec: u8,
    terminators: [TT; N],
  ) -> SyntaxResult<Node<Expr>> {
    let mut left = self.expr_operand(ctx, terminators)?;
    // Whether `left` is a sequence built by this call, which further commas extend.
    let mut open_seq = false;

    loop {
      let cp = self.checkpoint();
      let t = self.consume();

      if terminators.contains(&t.typ) {
        self.restore_checkpoint(cp);
        break;
      };

      // Nothing but a comma can follow an arrow function.
      if matches!(left.stx.as_ref(), Expr::ArrowFunc(_)) && t.typ != TT::Comma {
        self.restore_checkpoint(cp);
        break;
      };

      match t.typ {
        TT::PlusPlus | TT::HyphenHyphen if !t.preceded_by_line_terminator => {
          let operator_name = match t.typ {
            TT::PlusPlus => OperatorName::PostfixIncrement,
            _ => OperatorName::PostfixDecrement,
          };
          if prec(operator_name) < min_prec {
            self.restore_checkpoint(cp);
            break;
          };
          left = Node::new(left.loc + t.loc, UnaryPostfixExpr {
            operator: operator_name,
            argument: left,
          })
          .into_wrapped();
          continue;
        }
        TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => {
          self.restore_checkpoint(cp);
          left = self.tagged_template(ctx, left)?;
          continue;
        }
        _ => {}
      };

      let Some(operator) = infix_operator(t.typ) else {
        // Not part of this expression; the caller decides whether the token is valid here.
        self.restore_checkpoint(cp);
        break;
      };
      if operator.precedence < min_prec {
        self.restore_checkpoint(cp);
        break;
      };

      let next_min_prec =
        operator.precedence + (operator.associativity == Associativity::Left) as u8;

      left = match operator.name {
        OperatorName::Call | OperatorName::OptionalChainingCall => {
          self.restore_checkpoint(cp);
          if operator.name == OperatorName::OptionalChainingCall {
            // `?.(` is a single token, so the argument list is parsed here.
            self.consume();
            let arguments = self.list_with_loc(TT::Comma, TT::ParenthesisClose, |p| {
              let spread = p.consume_if(TT::DotDotDot).is_match();
              let value = p.expr(ctx, [TT::Comma, TT::ParenthesisClose])?;
              Ok(CallArg { spread, value })
            })?;
            let loc = left.loc + self.since_checkpoint(&cp);
            Node::new(loc, CallExpr {
              optional_chaining: true,
              callee: left,
              arguments,
            })
            .into_wrapped()
          } else {
            let arguments = self.call_args(ctx)?;
            let loc = left.loc + self.since_checkpoint(&cp);
            Node::new(loc, CallExpr {
              optional_chaining: false,
              callee: left,
              arguments,
            })
            .into_wrapped()
          }
        }
        OperatorName::ComputedMemberAccess => self.computed_member_access(ctx, left, false)?,
        OperatorName::OptionalChainingComputedMemberAccess => {
          self.computed_member_access(ctx, left, true)?
        }
        OperatorName::MemberAccess => self.member_access(left, false)?,
        OperatorName::OptionalChainingMemberAccess => self.member_access(left, true)?,
        OperatorName::Conditional => {
          let consequent = self.assignment_expr(ctx, [TT::Colon])?;
          self.require(TT::Colon)?;
          let alternate = self.expr_with_min_prec(
            ctx,
            prec(OperatorName::ConditionalAlternate),
            terminators,
          )?;
          Node::new(left.loc + alternate.loc, CondExpr {
            test: left,
            consequent,
            alternate,
          })
          .into_wrapped()
        }
        OperatorName::Comma => {
          let right = self.expr_with_min_prec(ctx, next_min_prec, terminators)?;
          let loc = left.loc + right.loc;
          if open_seq {
            let Expr::Seq(mut seq) = *left.stx else {
              unreachable!();
            };
            seq.stx.exprs.push(right);
            seq.loc = loc;
            Node::new(loc, Expr::Seq(seq))
          } else {
            open_seq = true;
            Node::new(loc, SeqExpr {
              exprs: vec![left, right],
            })
            .into_wrapped()
          }
        }
        _ => {
          if operator.name.is_assignment() {
            left = lhs_expr_to_assign_target(left, operator.name)?;
          };
          let right = self.expr_with_min_prec(ctx, next_min_prec, terminators)?;
          Node::new(left.loc + right.loc, BinaryExpr {
            operator: operator.name,
            left,
            right,
          })
          .into_wrapped()
        }
      };
      if operator.name != OperatorName::Comma {
        open_seq = false;
      };
    }

    Ok(left)
  }

  pub fn import_call(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ImportExpr>> {
    self.with_loc(|p| {
      p.require(TT::KeywordImport)?;
      p.require(TT::ParenthesisOpen)?;
      let module = p.assignment_expr(ctx, [TT::Comma, TT::ParenthesisClose])?;
      let _ = p.consume_if(TT::Comma);
      p.require(TT::ParenthesisClose)?;
      Ok(ImportExpr { module })
    })
  }

  pub fn import_meta(&mut self) -> SyntaxResult<Node<ImportMeta>> {
    self.with_loc(|p| {
      p.require(TT::KeywordImport)?;
      p.require(TT::Dot)?;
      let prop = p.consume();
      if p.str(prop.loc) != "meta" {
        return Err(unexpected(&prop, SyntaxErrorType::ExpectedSyntax("`meta` property")));
      };
      Ok(ImportMeta {})
    })
  }
}
