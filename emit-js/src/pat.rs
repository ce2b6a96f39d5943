use crate::emitter::with_node_context;
use crate::emitter::EmitResult;
use crate::emitter::Emitter;
use crate::precedence::call_member_prec;
use crate::precedence::Prec;
use crate::printer::Printer;
use parse_js::ast::expr::pat::ArrPat;
use parse_js::ast::expr::pat::ObjPat;
use parse_js::ast::expr::pat::ObjPatProp;
use parse_js::ast::expr::pat::Pat;
use parse_js::ast::expr::Expr;
use parse_js::ast::node::Node;

impl<'a> Printer<'a> {
  pub fn pat(&self, em: &mut Emitter, pat: &Node<Pat>) -> EmitResult {
    with_node_context(pat.loc, || {
      if let Some(text) = self.original(em, pat.loc)? {
        em.write_str(text);
        return Ok(());
      };
      match pat.stx.as_ref() {
        Pat::Arr(arr) => self.arr_pat(em, arr),
        Pat::Id(id) => {
          em.write_identifier(&id.stx.name);
          Ok(())
        }
        Pat::Obj(obj) => self.obj_pat(em, obj),
        Pat::Target(target) => self.expr(em, target, call_member_prec()),
      }
    })
  }

  fn default_value(&self, em: &mut Emitter, default_value: Option<&Node<Expr>>) -> EmitResult {
    if let Some(default_value) = default_value {
      em.write_operator("=");
      self.expr(em, default_value, Prec::ASSIGNMENT)?;
    };
    Ok(())
  }

  pub(crate) fn arr_pat(&self, em: &mut Emitter, arr: &Node<ArrPat>) -> EmitResult {
    em.write_punct("[");
    let elements = &arr.stx.elements;
    for (i, elem) in elements.iter().enumerate() {
      if i > 0 {
        em.write_punct(",");
        if elem.is_some() {
          em.write_sep();
        };
      };
      if let Some(elem) = elem {
        self.pat(em, &elem.target)?;
        self.default_value(em, elem.default_value.as_ref())?;
      };
    }
    match &arr.stx.rest {
      Some(rest) => {
        if !elements.is_empty() {
          em.write_punct(",");
          em.write_sep();
        };
        em.write_punct("...");
        self.pat(em, rest)?;
      }
      // A trailing hole needs its own comma, as one trailing comma is ignored.
      None if matches!(elements.last(), Some(None)) => em.write_punct(","),
      None => {}
    };
    em.write_punct("]");
    Ok(())
  }

  pub(crate) fn obj_pat(&self, em: &mut Emitter, obj: &Node<ObjPat>) -> EmitResult {
    em.write_punct("{");
    for (i, prop) in obj.stx.properties.iter().enumerate() {
      if i > 0 {
        em.write_punct(",");
        em.write_sep();
      };
      self.obj_pat_prop(em, prop)?;
    }
    if let Some(rest) = &obj.stx.rest {
      if !obj.stx.properties.is_empty() {
        em.write_punct(",");
        em.write_sep();
      };
      em.write_punct("...");
      self.pat(em, rest)?;
    };
    em.write_punct("}");
    Ok(())
  }

  fn obj_pat_prop(&self, em: &mut Emitter, prop: &Node<ObjPatProp>) -> EmitResult {
    with_node_context(prop.loc, || {
      let prop = prop.stx.as_ref();
      self.key(em, &prop.key)?;
      if !prop.shorthand {
        em.write_punct(":");
        em.write_sep();
        self.pat(em, &prop.target)?;
      };
      self.default_value(em, prop.default_value.as_ref())
    })
  }
}
