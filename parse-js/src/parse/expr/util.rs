use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::class_or_object::ClassOrObjMemberDirectKey;
use crate::ast::class_or_object::ClassOrObjVal;
use crate::ast::class_or_object::ObjMember;
use crate::ast::class_or_object::ObjMemberType;
use crate::ast::expr::lit::LitArrElem;
use crate::ast::expr::lit::LitArrExpr;
use crate::ast::expr::lit::LitObjExpr;
use crate::ast::expr::pat::ArrPat;
use crate::ast::expr::pat::ArrPatElem;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::pat::ObjPat;
use crate::ast::expr::pat::ObjPatProp;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::operator::OperatorName;
use crate::token::TT;

/// Splits `target = default` into its parts, as nested defaults inside a literal were parsed as assignments.
fn split_default(node: Node<Expr>) -> SyntaxResult<(Node<Pat>, Option<Node<Expr>>)> {
  match *node.stx {
    Expr::Binary(n) if n.stx.operator == OperatorName::Assignment => {
      let BinaryExpr { left, right, .. } = *n.stx;
      Ok((lit_to_pat(left)?, Some(right)))
    }
    stx => Ok((lit_to_pat(Node::new(node.loc, stx))?, None)),
  }
}

/// Converts a literal expression subtree into a pattern (assignment target).
/// `{ a: [b] }` could be an object literal or object pattern. This function is useful for when a pattern was misinterpreted as a literal expression, without needing to rewind and reparse.
pub fn lit_to_pat(node: Node<Expr>) -> SyntaxResult<Node<Pat>> {
  let loc = node.loc;
  match *node.stx {
    Expr::LitArr(n) => {
      let LitArrExpr { elements } = *n.stx;
      let mut pat_elements = Vec::<Option<ArrPatElem>>::new();
      let mut rest = None;
      for element in elements {
        if rest.is_some() {
          return Err(loc.error(SyntaxErrorType::InvalidAssigmentTarget, None));
        };
        match element {
          LitArrElem::Single(elem) => {
            let (target, default_value) = split_default(elem)?;
            pat_elements.push(Some(ArrPatElem {
              target,
              default_value,
            }));
          }
          LitArrElem::Rest(expr) => {
            rest = Some(lit_to_pat(expr)?);
          }
          LitArrElem::Empty => pat_elements.push(None),
        };
      }
      Ok(
        Node::new(loc, ArrPat {
          elements: pat_elements,
          rest,
        })
        .into_wrapped(),
      )
    }
    Expr::LitObj(n) => {
      let LitObjExpr { members } = *n.stx;
      let mut properties = Vec::new();
      let mut rest = None;
      for member in members {
        let loc = member.loc;
        if rest.is_some() {
          return Err(loc.error(SyntaxErrorType::InvalidAssigmentTarget, None));
        };
        let ObjMember { typ } = *member.stx;
        match typ {
          ObjMemberType::Valued { key, val } => {
            let ClassOrObjVal::Prop(Some(initializer)) = val else {
              return Err(loc.error(SyntaxErrorType::InvalidAssigmentTarget, None));
            };
            let (target, default_value) = split_default(initializer)?;
            properties.push(Node::new(loc, ObjPatProp {
              key,
              target,
              shorthand: false,
              default_value,
            }));
          }
          ObjMemberType::Shorthand { id, initializer } => {
            properties.push(Node::new(loc, ObjPatProp {
              key: ClassOrObjKey::Direct(Node::new(id.loc, ClassOrObjMemberDirectKey {
                key: id.stx.name.clone(),
                tt: TT::Identifier,
              })),
              target: Node::new(id.loc, IdPat {
                name: id.stx.name.clone(),
              })
              .into_wrapped(),
              shorthand: true,
              default_value: initializer,
            }));
          }
          ObjMemberType::Rest { val } => {
            rest = Some(lit_to_pat(val)?);
          }
        };
      }
      Ok(Node::new(loc, ObjPat { properties, rest }).into_wrapped())
    }
    Expr::Id(n) => Ok(
      Node::new(loc, IdPat {
        name: n.stx.name.clone(),
      })
      .into_wrapped(),
    ),
    // Already converted, e.g. `b = 1` in `[b = 1] = x` was parsed as an assignment.
    Expr::IdPat(n) => Ok(n.into_wrapped()),
    Expr::ArrPat(n) => Ok(n.into_wrapped()),
    Expr::ObjPat(n) => Ok(n.into_wrapped()),
    Expr::Member(m) if !m.stx.optional_chaining => {
      Ok(Node::new(loc, Pat::Target(Node::new(loc, Expr::Member(m)))))
    }
    Expr::ComputedMember(m) if !m.stx.optional_chaining => Ok(Node::new(
      loc,
      Pat::Target(Node::new(loc, Expr::ComputedMember(m))),
    )),
    _ => Err(loc.error(SyntaxErrorType::InvalidAssigmentTarget, None)),
  }
}

// Checking whether every object, array, or identifier operand is an assignment target up front is wasteful, so the LHS of an assignment is transformed into a target retroactively, raising an error if it can't be. A valid target is:
// - A chain of non-optional-chaining member, computed member, and call operators, not ending in a call.
// - A pattern, for plain `=` only.
pub fn lhs_expr_to_assign_target(
  lhs: Node<Expr>,
  operator_name: OperatorName,
) -> SyntaxResult<Node<Expr>> {
  match lhs.stx.as_ref() {
    e @ (Expr::LitArr(_) | Expr::LitObj(_) | Expr::Id(_)) => {
      if operator_name != OperatorName::Assignment && !matches!(e, Expr::Id(_)) {
        return Err(lhs.error(SyntaxErrorType::InvalidAssigmentTarget));
      }
      let root = lit_to_pat(lhs)?;
      Ok(root.into_stx())
    }
    // Only the last access matters here, e.g. `(a, b?.a ?? 3)[1] = x` is valid.
    Expr::ComputedMember(m) if !m.stx.optional_chaining => Ok(lhs),
    Expr::Member(m) if !m.stx.optional_chaining => Ok(lhs),
    _ => Err(lhs.error(SyntaxErrorType::InvalidAssigmentTarget)),
  }
}
