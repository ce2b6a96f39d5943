pub mod decl;

use decl::VarDeclParseMode;

use super::expr::pat::is_valid_pattern_identifier;
use super::expr::util::lit_to_pat;
use super::ParseCtx;
use super::Parser;
use crate::ast::node::Node;
use crate::ast::stmt::BlockStmt;
use crate::ast::stmt::BreakStmt;
use crate::ast::stmt::CatchBlock;
use crate::ast::stmt::ContinueStmt;
use crate::ast::stmt::DebuggerStmt;
use crate::ast::stmt::DoWhileStmt;
use crate::ast::stmt::EmptyStmt;
use crate::ast::stmt::ExprStmt;
use crate::ast::stmt::ForInOfLhs;
use crate::ast::stmt::ForInStmt;
use crate::ast::stmt::ForOfStmt;
use crate::ast::stmt::ForTripleStmt;
use crate::ast::stmt::ForTripleStmtInit;
use crate::ast::stmt::IfStmt;
use crate::ast::stmt::LabelStmt;
use crate::ast::stmt::ReturnStmt;
use crate::ast::stmt::Stmt;
use crate::ast::stmt::SwitchBranch;
use crate::ast::stmt::SwitchStmt;
use crate::ast::stmt::ThrowStmt;
use crate::ast::stmt::TryStmt;
use crate::ast::stmt::WhileStmt;
use crate::ast::stmt::WithStmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::Token;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn stmts(&mut self, ctx: ParseCtx, end: TT) -> SyntaxResult<Vec<Node<Stmt>>> {
    self.repeat_until_tt(end, |p| p.stmt(ctx))
  }

  /// Whether `let` starts a declaration rather than being used as an identifier.
  fn is_let_decl(ctx: ParseCtx, next: &Token) -> bool {
    next.typ == TT::BraceOpen
      || next.typ == TT::BracketOpen
      || is_valid_pattern_identifier(next.typ, ctx.rules)
  }

  pub fn stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Stmt>> {
    let (t0, t1) = self.peek_2();
    #[rustfmt::skip]
    let stmt: Node<Stmt> = match t0.typ {
      TT::BraceOpen => self.block_stmt(ctx)?.into_wrapped(),
      TT::KeywordBreak => self.break_stmt(ctx)?.into_wrapped(),
      TT::KeywordClass => self.class_decl(ctx)?.into_wrapped(),
      TT::KeywordConst | TT::KeywordVar => self.var_decl(ctx, VarDeclParseMode::Asi)?.into_wrapped(),
      TT::KeywordLet if Self::is_let_decl(ctx, &t1) => self.var_decl(ctx, VarDeclParseMode::Asi)?.into_wrapped(),
      TT::KeywordContinue => self.continue_stmt(ctx)?.into_wrapped(),
      TT::KeywordDebugger => self.debugger_stmt()?.into_wrapped(),
      TT::KeywordDo => self.do_while_stmt(ctx)?.into_wrapped(),
      TT::KeywordFor => self.for_stmt(ctx)?,
      TT::KeywordAsync if t1.typ == TT::KeywordFunction && !t1.preceded_by_line_terminator => self.func_decl(ctx)?.into_wrapped(),
      TT::KeywordFunction => self.func_decl(ctx)?.into_wrapped(),
      TT::KeywordIf => self.if_stmt(ctx)?.into_wrapped(),
      TT::KeywordReturn => self.return_stmt(ctx)?.into_wrapped(),
      TT::KeywordSwitch => self.switch_stmt(ctx)?.into_wrapped(),
      TT::KeywordThrow => self.throw_stmt(ctx)?.into_wrapped(),
      TT::KeywordTry => self.try_stmt(ctx)?.into_wrapped(),
      TT::KeywordWhile => self.while_stmt(ctx)?.into_wrapped(),
      TT::KeywordWith => self.with_stmt(ctx)?.into_wrapped(),
      TT::Semicolon => self.empty_stmt()?.into_wrapped(),
      t if is_valid_pattern_identifier(t, ctx.rules) && t1.typ == TT::Colon => self.label_stmt(ctx)?.into_wrapped(),
      _ => self.expr_stmt(ctx)?.into_wrapped(),
    };
    Ok(stmt)
  }

  pub fn label_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<LabelStmt>> {
    self.with_loc(|p| {
      let label_name = p.consume_as_string();
      p.require(TT::Colon)?;
      let statement = p.stmt(ctx)?;
      Ok(LabelStmt {
        name: label_name,
        statement,
      })
    })
  }

  pub fn empty_stmt(&mut self) -> SyntaxResult<Node<EmptyStmt>> {
    self.with_loc(|p| p.require(TT::Semicolon).map(|_| EmptyStmt {}))
  }

  pub fn block_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<BlockStmt>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let body = p.stmts(ctx, TT::BraceClose)?;
      p.require(TT::BraceClose)?;
      Ok(BlockStmt { body })
    })
  }

  // A label must be on the same line as its `break` or `continue`.
  fn break_or_continue_label(&mut self, ctx: ParseCtx) -> SyntaxResult<Option<String>> {
    let t = self.peek();
    let label = (is_valid_pattern_identifier(t.typ, ctx.rules) && !t.preceded_by_line_terminator)
      .then(|| self.consume_as_string());
    self.require_stmt_end()?;
    Ok(label)
  }

  pub fn break_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<BreakStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordBreak)?;
      let label = p.break_or_continue_label(ctx)?;
      Ok(BreakStmt { label })
    })
  }

  pub fn continue_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ContinueStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordContinue)?;
      let label = p.break_or_continue_label(ctx)?;
      Ok(ContinueStmt { label })
    })
  }

  pub fn debugger_stmt(&mut self) -> SyntaxResult<Node<DebuggerStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordDebugger)?;
      p.require_stmt_end()?;
      Ok(DebuggerStmt {})
    })
  }

  pub fn expr_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ExprStmt>> {
    self.with_loc(|p| {
      let expr = p.expr(ctx, [TT::Semicolon])?;
      p.require_stmt_end()?;
      Ok(ExprStmt { expr })
    })
  }

  fn for_in_of_lhs(&mut self, init: ForTripleStmtInit) -> SyntaxResult<ForInOfLhs> {
    match init {
      ForTripleStmtInit::Decl(decl) => {
        let single = decl.stx.declarators.len() == 1
          && decl.stx.declarators[0].initializer.is_none();
        if !single {
          return Err(decl.error(SyntaxErrorType::ExpectedSyntax(
            "single declarator without initializer",
          )));
        };
        Ok(ForInOfLhs::Decl(decl))
      }
      ForTripleStmtInit::Expr(expr) => Ok(ForInOfLhs::Assign(lit_to_pat(expr)?)),
      ForTripleStmtInit::None => {
        let t = self.peek();
        Err(t.error(SyntaxErrorType::ExpectedSyntax("for-in or for-of left-hand side")))
      }
    }
  }

  /// Parses `for (;;)`, `for (a in b)`, `for (a of b)`, and `for await (a of b)`. The header up to the first `;`, `in`, or `of` is shared, so it is parsed once and then reinterpreted.
  pub fn for_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Stmt>> {
    let start = self.checkpoint();
    self.require(TT::KeywordFor)?;
    let await_ = self.consume_if(TT::KeywordAwait).is_match();
    self.require(TT::ParenthesisOpen)?;
    let (t0, t1) = self.peek_2();
    let init = match t0.typ {
      TT::KeywordVar | TT::KeywordConst => {
        ForTripleStmtInit::Decl(self.var_decl(ctx, VarDeclParseMode::Leftmost)?)
      }
      TT::KeywordLet if Self::is_let_decl(ctx, &t1) => {
        ForTripleStmtInit::Decl(self.var_decl(ctx, VarDeclParseMode::Leftmost)?)
      }
      TT::Semicolon => ForTripleStmtInit::None,
      _ => ForTripleStmtInit::Expr(self.expr(ctx, [TT::Semicolon, TT::KeywordIn, TT::KeywordOf])?),
    };

    let t = self.consume();
    let stmt: Node<Stmt> = match t.typ {
      TT::KeywordIn | TT::KeywordOf => {
        let of = t.typ == TT::KeywordOf;
        let lhs = self.for_in_of_lhs(init)?;
        let rhs = if of {
          self.assignment_expr(ctx, [TT::ParenthesisClose])?
        } else {
          self.expr(ctx, [TT::ParenthesisClose])?
        };
        self.require(TT::ParenthesisClose)?;
        let body = self.stmt(ctx)?;
        let loc = self.since_checkpoint(&start);
        if of {
          Node::new(loc, ForOfStmt {
            await_,
            lhs,
            rhs,
            body,
          })
          .into_wrapped()
        } else {
          Node::new(loc, ForInStmt { lhs, rhs, body }).into_wrapped()
        }
      }
      TT::Semicolon if !await_ => {
        let cond = (self.peek().typ != TT::Semicolon)
          .then(|| self.expr(ctx, [TT::Semicolon]))
          .transpose()?;
        self.require(TT::Semicolon)?;
        let post = (self.peek().typ != TT::ParenthesisClose)
          .then(|| self.expr(ctx, [TT::ParenthesisClose]))
          .transpose()?;
        self.require(TT::ParenthesisClose)?;
        let body = self.stmt(ctx)?;
        let loc = self.since_checkpoint(&start);
        Node::new(loc, ForTripleStmt {
          init,
          cond,
          post,
          body,
        })
        .into_wrapped()
      }
      _ if await_ => return Err(t.error(SyntaxErrorType::RequiredTokenNotFound(TT::KeywordOf))),
      _ => return Err(t.error(SyntaxErrorType::RequiredTokenNotFound(TT::Semicolon))),
    };
    Ok(stmt)
  }

  pub fn if_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<IfStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordIf)?;
      p.require(TT::ParenthesisOpen)?;
      let test = p.expr(ctx, [TT::ParenthesisClose])?;
      p.require(TT::ParenthesisClose)?;
      let consequent = p.stmt(ctx)?;
      let alternate = p.consume_if(TT::KeywordElse).and_then(|| p.stmt(ctx))?;
      Ok(IfStmt {
        test,
        consequent,
        alternate,
      })
    })
  }

  pub fn return_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ReturnStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordReturn)?;
      let t = p.peek();
      let value = if t.preceded_by_line_terminator
        || matches!(t.typ, TT::Semicolon | TT::BraceClose | TT::EOF)
      {
        None
      } else {
        Some(p.expr(ctx, [TT::Semicolon])?)
      };
      p.require_stmt_end()?;
      Ok(ReturnStmt { value })
    })
  }

  pub fn throw_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ThrowStmt>> {
    self.with_loc(|p| {
      let start = p.require(TT::KeywordThrow)?;
      if p.peek().preceded_by_line_terminator {
        return Err(start.error(SyntaxErrorType::LineTerminatorAfterThrow));
      }
      let value = p.expr(ctx, [TT::Semicolon])?;
      p.require_stmt_end()?;
      Ok(ThrowStmt { value })
    })
  }

  pub fn try_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<TryStmt>> {
    self.with_loc(|p| {
      let start = p.require(TT::KeywordTry)?;
      let wrapped = p.block_stmt(ctx)?;
      let catch = p.consume_if(TT::KeywordCatch).and_then(|| {
        p.with_loc(|p| {
          // The binding is optional: `try {} catch {}`.
          let parameter = p.consume_if(TT::ParenthesisOpen).and_then(|| {
            let pattern = p.pat_decl(ctx)?;
            p.require(TT::ParenthesisClose)?;
            Ok(pattern)
          })?;
          let body = p.block_stmt(ctx)?;
          Ok(CatchBlock { parameter, body })
        })
      })?;
      let finally = p.consume_if(TT::KeywordFinally).and_then(|| p.block_stmt(ctx))?;
      if catch.is_none() && finally.is_none() {
        return Err(start.error(SyntaxErrorType::TryStatementHasNoCatchOrFinally));
      }
      Ok(TryStmt {
        wrapped,
        catch,
        finally,
      })
    })
  }

  pub fn while_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<WhileStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordWhile)?;
      p.require(TT::ParenthesisOpen)?;
      let condition = p.expr(ctx, [TT::ParenthesisClose])?;
      p.require(TT::ParenthesisClose)?;
      let body = p.stmt(ctx)?;
      Ok(WhileStmt { condition, body })
    })
  }

  pub fn with_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<WithStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordWith)?;
      p.require(TT::ParenthesisOpen)?;
      let object = p.expr(ctx, [TT::ParenthesisClose])?;
      p.require(TT::ParenthesisClose)?;
      let body = p.stmt(ctx)?;
      Ok(WithStmt { object, body })
    })
  }

  pub fn do_while_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<DoWhileStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordDo)?;
      let body = p.stmt(ctx)?;
      p.require(TT::KeywordWhile)?;
      p.require(TT::ParenthesisOpen)?;
      let condition = p.expr(ctx, [TT::ParenthesisClose])?;
      p.require(TT::ParenthesisClose)?;
      // The semicolon after `do ... while (x)` is always optional.
      let _ = p.consume_if(TT::Semicolon);
      Ok(DoWhileStmt { condition, body })
    })
  }

  pub fn switch_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<SwitchStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordSwitch)?;
      p.require(TT::ParenthesisOpen)?;
      let test = p.expr(ctx, [TT::ParenthesisClose])?;
      p.require(TT::ParenthesisClose)?;
      p.require(TT::BraceOpen)?;
      let branches = p.repeat_until_tt(TT::BraceClose, |p| {
        p.with_loc(|p| {
          let case = if p.consume_if(TT::KeywordCase).is_match() {
            Some(p.expr(ctx, [TT::Colon])?)
          } else {
            p.require(TT::KeywordDefault)?;
            None
          };
          p.require(TT::Colon)?;
          let mut body = Vec::new();
          while !matches!(
            p.peek().typ,
            TT::KeywordCase | TT::KeywordDefault | TT::BraceClose | TT::EOF
          ) {
            body.push(p.stmt(ctx)?);
          }
          Ok(SwitchBranch { case, body })
        })
      })?;
      p.require(TT::BraceClose)?;
      Ok(SwitchStmt { test, branches })
    })
  }
}
