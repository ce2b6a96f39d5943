use crate::asi::needs_leading_semicolon;
use crate::emitter::with_node_context;
use crate::emitter::EmitError;
use crate::emitter::EmitResult;
use crate::emitter::Emitter;
use crate::expr::is_ambiguous_stmt_start;
use crate::precedence::has_bare_in;
use crate::precedence::Prec;
use crate::printer::Layout;
use crate::printer::Printer;
use crate::trivia::hashbang_len;
use parse_js::ast::expr::pat::Pat;
use parse_js::ast::expr::Expr;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::decl::VarDecl;
use parse_js::ast::stmt::decl::VarDeclMode;
use parse_js::ast::stmt::BlockStmt;
use parse_js::ast::stmt::ForInOfLhs;
use parse_js::ast::stmt::ForTripleStmtInit;
use parse_js::ast::stmt::Stmt;
use parse_js::ast::stmt::SwitchBranch;
use parse_js::ast::stmt::SwitchStmt;
use parse_js::ast::stmt::TryStmt;
use parse_js::ast::stx::TopLevel;
use parse_js::loc::Loc;

/// Whether a trailing `else` would attach to an `if` nested at the end of `stmt`.
fn ends_with_open_if(stmt: &Node<Stmt>) -> bool {
  match stmt.stx.as_ref() {
    Stmt::If(if_stmt) => match &if_stmt.stx.alternate {
      Some(alt) => ends_with_open_if(alt),
      None => true,
    },
    Stmt::Label(label) => ends_with_open_if(&label.stx.statement),
    Stmt::While(w) => ends_with_open_if(&w.stx.body),
    Stmt::With(w) => ends_with_open_if(&w.stx.body),
    Stmt::ForIn(f) => ends_with_open_if(&f.stx.body),
    Stmt::ForOf(f) => ends_with_open_if(&f.stx.body),
    Stmt::ForTriple(f) => ends_with_open_if(&f.stx.body),
    _ => false,
  }
}

impl<'a> Printer<'a> {
  pub fn top_level(&self, em: &mut Emitter, top: &Node<TopLevel>) -> EmitResult {
    let stmts = &top.stx.body;
    let source = self.source().unwrap_or("");
    let hashbang = hashbang_len(source);
    if hashbang > 0 {
      em.write_str(&source[..hashbang]);
    };
    if self.preserved_source(em).is_some() {
      self.stmt_list(em, None, Layout::Lines, Some(hashbang), hashbang > 0, stmts)?;
      match stmts.last() {
        Some(last) => match self.gap(em, last.loc.1, source.len()) {
          Some(gap) => em.write_str(gap),
          None if source.ends_with('\n') => em.write_str("\n"),
          None => {}
        },
        None if hashbang > 0 && source.ends_with('\n') => em.write_str("\n"),
        None => {}
      };
      return Ok(());
    };
    if hashbang > 0 && !stmts.is_empty() {
      em.write_str("\n");
    };
    self.stmt_list(em, None, Layout::Lines, None, false, stmts)?;
    if !stmts.is_empty() {
      em.write_newline();
    };
    Ok(())
  }

  /// Prints statements laid out by `layout`. When preserving, the source between two statements
  /// is copied if it only holds whitespace and comments, and `open` is where the source before the
  /// first statement starts. `separate_first` also separates the first statement from what comes
  /// before the list.
  fn stmt_list(
    &self,
    em: &mut Emitter,
    parent: Option<Loc>,
    layout: Layout,
    open: Option<usize>,
    separate_first: bool,
    stmts: &[Node<Stmt>],
  ) -> EmitResult {
    let mut prev: Option<(&Node<Stmt>, Option<char>)> = None;
    for stmt in stmts {
      let gap_start = match prev {
        Some((p, _)) => Some(p.loc.1),
        None => open,
      };
      let gap = gap_start
        .and_then(|start| self.gap(em, start, stmt.loc.0))
        .filter(|gap| !gap.is_empty());
      match gap {
        Some(gap) => self.write_gap(em, gap, stmt.loc),
        None if prev.is_some() || separate_first => self.separate(em, layout, parent, stmt.loc),
        None => {}
      };
      let text = self.stmt_text(em, stmt)?;
      if let Some((p, last_char)) = prev {
        if needs_leading_semicolon(last_char, p, &text) {
          em.write_punct(";");
        };
      };
      em.write_str(&text);
      prev = Some((stmt, text.chars().rev().find(|c| !c.is_whitespace())));
    }
    Ok(())
  }

  fn stmt_text(&self, em: &Emitter, stmt: &Node<Stmt>) -> EmitResult<String> {
    let mut fragment = em.fragment();
    self.stmt(&mut fragment, stmt)?;
    Ok(fragment.into_string())
  }

  pub fn stmt(&self, em: &mut Emitter, stmt: &Node<Stmt>) -> EmitResult {
    with_node_context(stmt.loc, || {
      if let Some(text) = self.original(em, stmt.loc)? {
        em.write_str(text);
        return Ok(());
      };
      self.stmt_syntax(em, stmt)
    })
  }

  fn stmt_syntax(&self, em: &mut Emitter, stmt: &Node<Stmt>) -> EmitResult {
    match stmt.stx.as_ref() {
      Stmt::Block(block) => self.braced_stmts(em, block.loc, &block.stx.body),
      Stmt::Break(brk) => self.jump(em, "break", brk.stx.label.as_deref()),
      Stmt::Continue(cont) => self.jump(em, "continue", cont.stx.label.as_deref()),
      Stmt::Debugger(_) => {
        em.write_keyword("debugger");
        em.write_punct(";");
        Ok(())
      }
      Stmt::DoWhile(do_while) => {
        em.write_keyword("do");
        self.body(em, &do_while.stx.body)?;
        em.write_sep();
        em.write_keyword("while");
        self.paren_expr(em, &do_while.stx.condition)?;
        em.write_punct(";");
        Ok(())
      }
      Stmt::Empty(_) => {
        em.write_punct(";");
        Ok(())
      }
      Stmt::Expr(expr_stmt) => {
        let text = self.expr_text(em, &expr_stmt.stx.expr, Prec::LOWEST)?;
        if is_ambiguous_stmt_start(&text) {
          em.write_punct("(");
          em.write_str(&text);
          em.write_punct(")");
        } else {
          em.write_str(&text);
        };
        em.write_punct(";");
        Ok(())
      }
      Stmt::ForIn(for_in) => {
        em.write_keyword("for");
        em.write_sep();
        em.write_punct("(");
        self.for_in_of_lhs(em, &for_in.stx.lhs, false)?;
        em.write_operator("in");
        self.expr(em, &for_in.stx.rhs, Prec::LOWEST)?;
        em.write_punct(")");
        self.body(em, &for_in.stx.body)
      }
      Stmt::ForOf(for_of) => {
        em.write_keyword("for");
        if for_of.stx.await_ {
          em.write_keyword("await");
        };
        em.write_sep();
        em.write_punct("(");
        self.for_in_of_lhs(em, &for_of.stx.lhs, true)?;
        em.write_operator("of");
        self.expr(em, &for_of.stx.rhs, Prec::ASSIGNMENT)?;
        em.write_punct(")");
        self.body(em, &for_of.stx.body)
      }
      Stmt::ForTriple(for_triple) => {
        let f = for_triple.stx.as_ref();
        em.write_keyword("for");
        em.write_sep();
        em.write_punct("(");
        match &f.init {
          ForTripleStmtInit::None => {}
          ForTripleStmtInit::Expr(init) => self.expr_wrapped(em, init, has_bare_in(init))?,
          ForTripleStmtInit::Decl(decl) => self.var_decl(em, decl, true)?,
        };
        em.write_punct(";");
        if let Some(cond) = &f.cond {
          em.write_sep();
          self.expr(em, cond, Prec::LOWEST)?;
        };
        em.write_punct(";");
        if let Some(post) = &f.post {
          em.write_sep();
          self.expr(em, post, Prec::LOWEST)?;
        };
        em.write_punct(")");
        self.body(em, &f.body)
      }
      Stmt::If(if_stmt) => {
        let i = if_stmt.stx.as_ref();
        em.write_keyword("if");
        self.paren_expr(em, &i.test)?;
        if i.alternate.is_some() && ends_with_open_if(&i.consequent) {
          em.write_sep();
          em.write_punct("{");
          em.write_sep();
          self.stmt(em, &i.consequent)?;
          em.write_sep();
          em.write_punct("}");
        } else {
          self.body(em, &i.consequent)?;
        };
        if let Some(alt) = &i.alternate {
          em.write_sep();
          em.write_keyword("else");
          self.body(em, alt)?;
        };
        Ok(())
      }
      Stmt::Label(label) => {
        em.write_identifier(&label.stx.name);
        em.write_punct(":");
        self.body(em, &label.stx.statement)
      }
      Stmt::Return(ret) => {
        em.write_keyword("return");
        if let Some(value) = &ret.stx.value {
          em.write_sep();
          self.expr(em, value, Prec::LOWEST)?;
        };
        em.write_punct(";");
        Ok(())
      }
      Stmt::Switch(switch) => self.switch(em, switch),
      Stmt::Throw(throw) => {
        em.write_keyword("throw");
        em.write_sep();
        self.expr(em, &throw.stx.value, Prec::LOWEST)?;
        em.write_punct(";");
        Ok(())
      }
      Stmt::Try(try_stmt) => self.try_stmt(em, try_stmt),
      Stmt::While(while_stmt) => {
        em.write_keyword("while");
        self.paren_expr(em, &while_stmt.stx.condition)?;
        self.body(em, &while_stmt.stx.body)
      }
      Stmt::With(with_stmt) => {
        em.write_keyword("with");
        self.paren_expr(em, &with_stmt.stx.object)?;
        self.body(em, &with_stmt.stx.body)
      }
      Stmt::ClassDecl(decl) => self.class(
        em,
        decl.loc,
        Some((&decl.stx.name.stx.name, decl.stx.name.loc)),
        decl.stx.extends.as_ref(),
        &decl.stx.members,
      ),
      Stmt::FunctionDecl(decl) => self.func(em, Some(&decl.stx.name.stx.name), &decl.stx.function),
      Stmt::VarDecl(decl) => {
        self.var_decl(em, decl, false)?;
        em.write_punct(";");
        Ok(())
      }
    }
  }

  fn paren_expr(&self, em: &mut Emitter, expr: &Node<Expr>) -> EmitResult {
    em.write_sep();
    em.write_punct("(");
    self.expr(em, expr, Prec::LOWEST)?;
    em.write_punct(")");
    Ok(())
  }

  fn jump(&self, em: &mut Emitter, keyword: &str, label: Option<&str>) -> EmitResult {
    em.write_keyword(keyword);
    if let Some(label) = label {
      em.write_identifier(label);
    };
    em.write_punct(";");
    Ok(())
  }

  /// Prints the single statement controlled by `if`, `else`, a loop, `with` or a label.
  fn body(&self, em: &mut Emitter, body: &Node<Stmt>) -> EmitResult {
    if !matches!(body.stx.as_ref(), Stmt::Empty(_)) {
      em.write_sep();
    };
    self.stmt(em, body)
  }

  pub fn block(&self, em: &mut Emitter, block: &Node<BlockStmt>) -> EmitResult {
    with_node_context(block.loc, || {
      if let Some(text) = self.original(em, block.loc)? {
        em.write_str(text);
        return Ok(());
      };
      self.braced_stmts(em, block.loc, &block.stx.body)
    })
  }

  fn braced_stmts(&self, em: &mut Emitter, loc: Loc, stmts: &[Node<Stmt>]) -> EmitResult {
    em.write_punct("{");
    // The source between the braces, if `loc` still covers a braced block.
    let inner = self.preserved_source(em).and_then(|source| {
      let bytes = source.as_bytes();
      let braced = loc.len() >= 2
        && bytes.get(loc.0) == Some(&b'{')
        && bytes.get(loc.1 - 1) == Some(&b'}');
      braced.then(|| (loc.0 + 1, loc.1 - 1))
    });
    let Some(last) = stmts.last() else {
      if let Some(gap) = inner.and_then(|(open, close)| self.gap(em, open, close)) {
        em.write_str(gap);
      };
      em.write_punct("}");
      return Ok(());
    };
    let layout = match inner {
      Some(_) => self.layout(em, loc),
      None => Layout::Lines,
    };
    em.indented(|em| {
      self.stmt_list(em, Some(loc), layout, inner.map(|(open, _)| open), true, stmts)
    })?;
    let gap = inner
      .and_then(|(_, close)| self.gap(em, last.loc.1, close))
      .filter(|gap| !gap.is_empty());
    match gap {
      Some(gap) => em.write_str(gap),
      None => self.separate_close(em, layout, loc),
    };
    em.write_punct("}");
    Ok(())
  }

  fn switch(&self, em: &mut Emitter, switch: &Node<SwitchStmt>) -> EmitResult {
    let s = switch.stx.as_ref();
    em.write_keyword("switch");
    self.paren_expr(em, &s.test)?;
    em.write_sep();
    em.write_punct("{");
    let layout = self.layout(em, switch.loc);
    let mut prev_end = self.skip(em, s.test.loc.1, &[")", "{"]);
    em.indented(|em| {
      for branch in &s.branches {
        let gap = prev_end
          .and_then(|start| self.gap(em, start, branch.loc.0))
          .filter(|gap| !gap.is_empty());
        match gap {
          Some(gap) => self.write_gap(em, gap, branch.loc),
          None => self.separate(em, layout, Some(switch.loc), branch.loc),
        };
        self.switch_branch(em, branch)?;
        prev_end = Some(branch.loc.1);
      }
      Ok::<_, EmitError>(())
    })?;
    match prev_end.and_then(|start| self.closing(em, start, &[], "}")) {
      Some(text) => em.write_str(text),
      None => {
        if !s.branches.is_empty() {
          self.separate_close(em, layout, switch.loc);
        };
        em.write_punct("}");
      }
    };
    Ok(())
  }

  fn switch_branch(&self, em: &mut Emitter, branch: &Node<SwitchBranch>) -> EmitResult {
    with_node_context(branch.loc, || {
      if let Some(text) = self.original(em, branch.loc)? {
        em.write_str(text);
        return Ok(());
      };
      let colon_end = match &branch.stx.case {
        Some(case) => {
          em.write_keyword("case");
          em.write_sep();
          self.expr(em, case, Prec::LOWEST)?;
          self.skip(em, case.loc.1, &[":"])
        }
        None => {
          em.write_keyword("default");
          self.skip(em, branch.loc.0, &["default", ":"])
        }
      };
      em.write_punct(":");
      let layout = self.layout(em, branch.loc);
      em.indented(|em| {
        self.stmt_list(em, Some(branch.loc), layout, colon_end, true, &branch.stx.body)
      })
    })
  }

  fn try_stmt(&self, em: &mut Emitter, try_stmt: &Node<TryStmt>) -> EmitResult {
    let t = try_stmt.stx.as_ref();
    em.write_keyword("try");
    em.write_sep();
    self.block(em, &t.wrapped)?;
    if let Some(catch) = &t.catch {
      em.write_sep();
      em.write_keyword("catch");
      if let Some(param) = &catch.stx.parameter {
        em.write_sep();
        em.write_punct("(");
        self.pat(em, &param.stx.pat)?;
        em.write_punct(")");
      };
      em.write_sep();
      self.block(em, &catch.stx.body)?;
    };
    if let Some(finally) = &t.finally {
      em.write_sep();
      em.write_keyword("finally");
      em.write_sep();
      self.block(em, finally)?;
    };
    Ok(())
  }

  fn for_in_of_lhs(&self, em: &mut Emitter, lhs: &ForInOfLhs, of: bool) -> EmitResult {
    match lhs {
      ForInOfLhs::Decl(decl) => self.var_decl(em, decl, true),
      ForInOfLhs::Assign(pat) => {
        // `for (let in o)` and `for (async of xs)` would start a declaration or an async arrow.
        let ambiguous = match pat.stx.as_ref() {
          Pat::Id(id) => id.stx.name == "let" || (of && id.stx.name == "async"),
          _ => false,
        };
        if ambiguous {
          em.write_punct("(");
        };
        self.pat(em, pat)?;
        if ambiguous {
          em.write_punct(")");
        };
        Ok(())
      }
    }
  }

  /// Prints a declaration without its terminating semicolon.
  fn var_decl(&self, em: &mut Emitter, decl: &Node<VarDecl>, in_for_head: bool) -> EmitResult {
    with_node_context(decl.loc, || {
      let d = decl.stx.as_ref();
      if d.declarators.is_empty() {
        return Err(EmitError::unsupported("declaration without declarators"));
      };
      em.write_keyword(match d.mode {
        VarDeclMode::Const => "const",
        VarDeclMode::Let => "let",
        VarDeclMode::Var => "var",
      });
      for (i, declarator) in d.declarators.iter().enumerate() {
        if i > 0 {
          em.write_punct(",");
        };
        em.write_sep();
        self.pat(em, &declarator.pattern.stx.pat)?;
        if let Some(init) = &declarator.initializer {
          em.write_operator("=");
          if in_for_head && has_bare_in(init) {
            self.expr_wrapped(em, init, true)?;
          } else {
            self.expr(em, init, Prec::ASSIGNMENT)?;
          };
        };
      }
      Ok(())
    })
  }
}
