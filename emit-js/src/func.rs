use crate::emitter::with_node_context;
use crate::emitter::EmitError;
use crate::emitter::EmitResult;
use crate::emitter::Emitter;
use crate::precedence::new_without_args_prec;
use crate::precedence::Prec;
use crate::printer::Printer;
use parse_js::ast::class_or_object::ClassElement;
use parse_js::ast::class_or_object::ClassOrObjKey;
use parse_js::ast::class_or_object::ClassOrObjVal;
use parse_js::ast::expr::Expr;
use parse_js::ast::func::Func;
use parse_js::ast::func::FuncBody;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::decl::ParamDecl;
use parse_js::loc::Loc;

impl<'a> Printer<'a> {
  /// Prints a function expression, declaration or arrow function.
  pub fn func(&self, em: &mut Emitter, name: Option<&str>, func: &Node<Func>) -> EmitResult {
    with_node_context(func.loc, || {
      let f = func.stx.as_ref();
      if f.async_ {
        em.write_keyword("async");
        if f.arrow {
          em.write_sep();
        };
      };
      if !f.arrow {
        em.write_keyword("function");
        if f.generator {
          em.write_punct("*");
        };
        if let Some(name) = name {
          if f.generator {
            em.write_sep();
          };
          em.write_identifier(name);
        };
      };
      // Arrow functions start at their `async` or parameters, others at the parameters.
      let open = match (f.arrow, f.async_) {
        (true, true) => self.skip(em, func.loc.0, &["async", "("]),
        _ => self.skip(em, func.loc.0, &["("]),
      };
      self.params(em, open, &f.parameters)?;
      if f.arrow {
        em.write_operator("=>");
      } else {
        em.write_sep();
      };
      self.func_body(em, &f.body)
    })
  }

  fn params(
    &self,
    em: &mut Emitter,
    open: Option<usize>,
    params: &[Node<ParamDecl>],
  ) -> EmitResult {
    self.comma_list(em, ("(", open), ")", params, |p| p.loc, |em, param| {
      with_node_context(param.loc, || {
        if let Some(text) = self.original(em, param.loc)? {
          em.write_str(text);
          return Ok(());
        };
        if param.stx.rest {
          em.write_punct("...");
        };
        self.pat(em, &param.stx.pattern.stx.pat)?;
        if let Some(default_value) = &param.stx.default_value {
          em.write_operator("=");
          self.expr(em, default_value, Prec::ASSIGNMENT)?;
        };
        Ok(())
      })
    })
  }

  fn func_body(&self, em: &mut Emitter, body: &FuncBody) -> EmitResult {
    match body {
      FuncBody::Block(block) => self.block(em, block),
      FuncBody::Expression(expr) => {
        let text = self.expr_text(em, expr, Prec::ASSIGNMENT)?;
        // A body starting with `{` would be read as a block.
        if text.starts_with('{') {
          em.write_punct("(");
          em.write_str(&text);
          em.write_punct(")");
        } else {
          em.write_str(&text);
        };
        Ok(())
      }
    }
  }

  /// Prints a method, getter or setter after its `static`, if any.
  pub(crate) fn class_or_obj_method(
    &self,
    em: &mut Emitter,
    key: &ClassOrObjKey,
    val: &ClassOrObjVal,
  ) -> EmitResult {
    let (func, accessor) = match val {
      ClassOrObjVal::Getter(getter) => (&getter.stx.func, Some("get")),
      ClassOrObjVal::Setter(setter) => (&setter.stx.func, Some("set")),
      ClassOrObjVal::Method(method) => (&method.stx.func, None),
      ClassOrObjVal::Prop(_) => return Err(EmitError::unsupported("property as method")),
    };
    with_node_context(func.loc, || {
      let f = func.stx.as_ref();
      if let Some(accessor) = accessor {
        em.write_keyword(accessor);
        em.write_sep();
      };
      if f.async_ {
        em.write_keyword("async");
        em.write_sep();
      };
      if f.generator {
        em.write_punct("*");
      };
      self.key(em, key)?;
      let open = self.skip(em, func.loc.0, &["("]);
      self.params(em, open, &f.parameters)?;
      em.write_sep();
      self.func_body(em, &f.body)
    })
  }

  /// Prints a class declaration or expression spanning `loc` in the source. When preserving, the
  /// source between members is copied if it only holds whitespace and comments.
  pub fn class(
    &self,
    em: &mut Emitter,
    loc: Loc,
    name: Option<(&str, Loc)>,
    extends: Option<&Node<Expr>>,
    members: &[ClassElement],
  ) -> EmitResult {
    em.write_keyword("class");
    if let Some((name, _)) = name {
      em.write_identifier(name);
    };
    if let Some(extends) = extends {
      em.write_keyword("extends");
      em.write_sep();
      self.expr(em, extends, new_without_args_prec())?;
    };
    em.write_sep();
    em.write_punct("{");
    let head_end = match (extends, name) {
      (Some(extends), _) => Some(extends.loc.1),
      (None, Some((_, name_loc))) => Some(name_loc.1),
      (None, None) => self.skip(em, loc.0, &["class"]),
    };
    let mut prev_end = head_end.and_then(|end| self.skip(em, end, &["{"]));
    let layout = self.layout(em, loc);
    em.indented(|em| {
      for member in members {
        let (member_loc, lead): (Loc, &[&str]) = match member {
          ClassElement::StaticBlock(block) => (block.loc, &["static"]),
          ClassElement::Member(member) => (member.loc, &[]),
        };
        let gap = prev_end
          .and_then(|start| self.joint(em, start, member_loc.0, lead))
          .filter(|gap| !gap.is_empty());
        let lead_written = match gap {
          Some(gap) => {
            self.write_gap(em, gap, member_loc);
            true
          }
          None => {
            self.separate(em, layout, Some(loc), member_loc);
            false
          }
        };
        self.class_element(em, member, lead_written)?;
        prev_end = Some(member_loc.1);
      }
      Ok::<_, EmitError>(())
    })?;
    match prev_end.and_then(|start| self.closing(em, start, &[], "}")) {
      Some(text) => em.write_str(text),
      None => {
        if !members.is_empty() {
          self.separate_close(em, layout, loc);
        };
        em.write_punct("}");
      }
    };
    Ok(())
  }

  /// Prints a class member. A static block's `static` is left out if `static_written`.
  fn class_element(
    &self,
    em: &mut Emitter,
    element: &ClassElement,
    static_written: bool,
  ) -> EmitResult {
    match element {
      ClassElement::StaticBlock(block) => {
        if !static_written {
          em.write_keyword("static");
          em.write_sep();
        };
        self.block(em, block)
      }
      ClassElement::Member(member) => with_node_context(member.loc, || {
        if let Some(text) = self.original(em, member.loc)? {
          em.write_str(text);
          return Ok(());
        };
        let member = member.stx.as_ref();
        if member.static_ {
          em.write_keyword("static");
          em.write_sep();
        };
        match &member.val {
          ClassOrObjVal::Prop(value) => {
            self.key(em, &member.key)?;
            if let Some(value) = value {
              em.write_operator("=");
              self.expr(em, value, Prec::ASSIGNMENT)?;
            };
            em.write_punct(";");
            Ok(())
          }
          val => self.class_or_obj_method(em, &member.key, val),
        }
      }),
    }
  }
}
