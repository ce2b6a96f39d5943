use super::ParseCtx;
use super::Parser;
use crate::ast::func::Func;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ParamDecl;
use crate::ast::stmt::BlockStmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Parses `(a, b = 1, ...rest)`. A rest parameter must come last.
  pub fn func_params(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<Node<ParamDecl>>> {
    self.require(TT::ParenthesisOpen)?;
    let parameters = self.list_with_loc(TT::Comma, TT::ParenthesisClose, |p| {
      let rest = p.consume_if(TT::DotDotDot).is_match();
      let pattern = p.pat_decl(ctx)?;
      let default_value = if rest {
        None
      } else {
        p.consume_if(TT::Equals)
          .and_then(|| p.assignment_expr(ctx, [TT::Comma, TT::ParenthesisClose]))?
      };
      Ok(ParamDecl {
        rest,
        pattern,
        default_value,
      })
    })?;
    if let Some(misplaced) = parameters
      .iter()
      .rev()
      .skip(1)
      .find(|param| param.stx.rest)
    {
      return Err(misplaced.error(SyntaxErrorType::ExpectedSyntax("rest parameter last")));
    };
    Ok(parameters)
  }

  /// Parses `{ ... }` of a function. The returned location includes the braces.
  pub fn parse_func_block_body(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<BlockStmt>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let body = p.stmts(ctx, TT::BraceClose)?;
      p.require(TT::BraceClose)?;
      Ok(BlockStmt { body })
    })
  }

  /// Parses the parameters and body of a non-arrow function. `ctx` must already carry the function's own rules.
  pub fn func(
    &mut self,
    ctx: ParseCtx,
    is_async: bool,
    generator: bool,
  ) -> SyntaxResult<Node<Func>> {
    self.with_loc(|p| {
      let parameters = p.func_params(ctx)?;
      let body = p.parse_func_block_body(ctx)?.into();
      Ok(Func {
        arrow: false,
        async_: is_async,
        generator,
        parameters,
        body,
      })
    })
  }
}
