use super::Parser;
use crate::ast::node::Node;
use crate::error::SyntaxResult;
use crate::token::TT;
use derive_visitor::Drive;
use derive_visitor::DriveMut;

impl<'a> Parser<'a> {
  /// Runs `f` and wraps its syntax in a node spanning every token it consumed.
  pub fn with_loc<S: Drive + DriveMut, F>(&mut self, f: F) -> SyntaxResult<Node<S>>
  where
    F: FnOnce(&mut Self) -> SyntaxResult<S>,
  {
    let start = self.checkpoint();
    f(self).map(|stx| Node::new(self.since_checkpoint(&start), stx))
  }

  /// Calls `f` until the next token is `end`, which is left unconsumed.
  pub fn repeat_until_tt<S, F>(&mut self, end: TT, f: F) -> SyntaxResult<Vec<S>>
  where
    F: Fn(&mut Self) -> SyntaxResult<S>,
  {
    let mut items = Vec::new();
    loop {
      if self.peek().typ == end {
        return Ok(items);
      };
      items.push(f(self)?);
    }
  }

  /// Parses `delim`-separated items up to and including `close`. A trailing `delim` is allowed.
  pub fn list_with_loc<S: Drive + DriveMut, F>(
    &mut self,
    delim: TT,
    close: TT,
    f: F,
  ) -> SyntaxResult<Vec<Node<S>>>
  where
    F: Fn(&mut Self) -> SyntaxResult<S>,
  {
    let mut items = Vec::new();
    loop {
      if self.consume_if(close).is_match() {
        return Ok(items);
      };
      items.push(self.with_loc(&f)?);
      if !self.consume_if(delim).is_match() {
        self.require(close)?;
        return Ok(items);
      };
    }
  }

  /// Runs `f` speculatively: when it yields `None`, every token it consumed is put back.
  pub fn rewindable<S, F>(&mut self, f: F) -> SyntaxResult<Option<S>>
  where
    F: FnOnce(&mut Self) -> SyntaxResult<Option<S>>,
  {
    let start = self.checkpoint();
    let result = f(self)?;
    if result.is_none() {
      self.restore_checkpoint(start);
    };
    Ok(result)
  }
}
