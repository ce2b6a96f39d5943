use super::expr::Expr;
use super::expr::IdExpr;
use super::func::Func;
use super::node::Node;
use super::stmt::BlockStmt;
use crate::token::TT;
use derive_more::derive::From;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

/// This is a node as the key may not the same as source[node.loc], due to decoding/normalization.
#[derive(Clone, Debug, Drive, DriveMut, Serialize)]
pub struct ClassOrObjMemberDirectKey {
  #[drive(skip)]
  pub key: String,
  // The original token type, so string and number keys can be printed back as written.
  #[drive(skip)]
  pub tt: TT,
}

// Direct keys are not variable usages, so they are not represented with IdExpr.
#[derive(Clone, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "$t")]
pub enum ClassOrObjKey {
  // Identifier, keyword, private name, string, or number.
  Direct(Node<ClassOrObjMemberDirectKey>),
  Computed(Node<Expr>),
}

#[derive(Clone, Debug, Drive, DriveMut, Serialize)]
pub struct ClassOrObjGetter {
  pub func: Node<Func>, // `parameters` is empty.
}

#[derive(Clone, Debug, Drive, DriveMut, Serialize)]
pub struct ClassOrObjMethod {
  pub func: Node<Func>,
}

#[derive(Clone, Debug, Drive, DriveMut, Serialize)]
pub struct ClassOrObjSetter {
  pub func: Node<Func>, // `parameters` contains exactly one ParamDecl.
}

#[derive(Clone, Debug, Drive, DriveMut, From, Serialize)]
pub enum ClassOrObjVal {
  Getter(Node<ClassOrObjGetter>),
  Setter(Node<ClassOrObjSetter>),
  Method(Node<ClassOrObjMethod>),
  // Must be Some if object, as shorthands are covered by ObjMemberType::Shorthand.
  // Unlike the others, this is not its own struct as if None, there is no source range.
  Prop(Option<Node<Expr>>),
}

#[derive(Clone, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "$t")]
pub enum ObjMemberType {
  Valued {
    key: ClassOrObjKey,
    val: ClassOrObjVal,
  },
  // `initializer` is only valid when the object literal is reinterpreted as a pattern, as in `({a = 1} = o)`.
  Shorthand {
    id: Node<IdExpr>,
    initializer: Option<Node<Expr>>,
  },
  Rest {
    val: Node<Expr>,
  },
}

// This is a node instead of an enum so that a member can be replaced in place.
#[derive(Clone, Debug, Drive, DriveMut, Serialize)]
pub struct ObjMember {
  pub typ: ObjMemberType,
}

#[derive(Clone, Debug, Drive, DriveMut, Serialize)]
pub struct ClassMember {
  pub key: ClassOrObjKey,
  #[drive(skip)]
  pub static_: bool,
  pub val: ClassOrObjVal,
}

#[derive(Clone, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "$t")]
pub enum ClassElement {
  Member(Node<ClassMember>),
  // `static { ... }`; the block's location includes its braces.
  StaticBlock(Node<BlockStmt>),
}
