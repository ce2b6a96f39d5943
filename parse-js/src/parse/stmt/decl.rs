use super::ParseCtx;
use super::Parser;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ClassDecl;
use crate::ast::stmt::decl::FuncDecl;
use crate::ast::stmt::decl::VarDecl;
use crate::ast::stmt::decl::VarDeclMode;
use crate::ast::stmt::decl::VarDeclarator;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::parse::expr::pat::ParsePatternRules;
use crate::parse::unexpected;
use crate::token::TT;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum VarDeclParseMode {
  // Standard parsing mode for var/let/const statement.
  Asi,
  // Parse as many valid declarators as possible, then break before the first invalid token (i.e. not a comma). Used by for-loop parser.
  Leftmost,
}

impl<'a> Parser<'a> {
  pub fn var_decl_mode(&mut self) -> SyntaxResult<VarDeclMode> {
    let t = self.consume();
    Ok(match t.typ {
      TT::KeywordLet => VarDeclMode::Let,
      TT::KeywordConst => VarDeclMode::Const,
      TT::KeywordVar => VarDeclMode::Var,
      _ => return Err(unexpected(&t, SyntaxErrorType::ExpectedSyntax("variable declaration"))),
    })
  }

  /// Parses a variable declaration, which contains one or more declarators, each with an optional initializer. Examples of variable declarations:
  /// - `const a = 1`
  /// - `let a, b = 2, c`
  /// - `var { a, b: [c] } = d`
  pub fn var_decl(
    &mut self,
    ctx: ParseCtx,
    parse_mode: VarDeclParseMode,
  ) -> SyntaxResult<Node<VarDecl>> {
    self.with_loc(|p| {
      let mode = p.var_decl_mode()?;
      let mut declarators = Vec::new();
      loop {
        let pattern = p.pat_decl(ctx)?;
        let initializer = p.consume_if(TT::Equals).and_then(|| match parse_mode {
          VarDeclParseMode::Asi => p.assignment_expr(ctx, [TT::Semicolon, TT::Comma]),
          // `in` would otherwise be read as the operator in `for (var a = b in c)`.
          VarDeclParseMode::Leftmost => {
            p.assignment_expr(ctx, [TT::Semicolon, TT::Comma, TT::KeywordIn])
          }
        })?;
        declarators.push(VarDeclarator {
          pattern,
          initializer,
        });
        if !p.consume_if(TT::Comma).is_match() {
          break;
        };
      }
      if parse_mode == VarDeclParseMode::Asi {
        p.require_stmt_end()?;
      };
      Ok(VarDecl { mode, declarators })
    })
  }

  pub fn func_decl(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<FuncDecl>> {
    self.with_loc(|p| {
      let is_async = p.consume_if(TT::KeywordAsync).is_match();
      p.require(TT::KeywordFunction)?;
      let generator = p.consume_if(TT::Asterisk).is_match();
      // The declared name is bound in the enclosing scope, so it follows the enclosing rules.
      let name = p.class_or_func_name(ctx)?;
      let fn_ctx = ctx.with_rules(ParsePatternRules {
        await_allowed: !is_async,
        yield_allowed: !generator,
      });
      let function = p.func(fn_ctx, is_async, generator)?;
      Ok(FuncDecl { name, function })
    })
  }

  pub fn class_decl(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ClassDecl>> {
    self.with_loc(|p| {
      p.require(TT::KeywordClass)?;
      let name = p.class_or_func_name(ctx)?;
      let extends = p.class_heritage(ctx)?;
      let members = p.class_body(ctx)?;
      Ok(ClassDecl {
        name,
        extends,
        members,
      })
    })
  }
}
