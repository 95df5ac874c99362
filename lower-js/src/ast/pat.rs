use super::expr::Expr;
use super::expr::Property;
use super::list::ListElem;
use super::node::Node;
use super::ts::PatTs;
use crate::token::Token;
use derive_more::From;
use derive_more::TryInto;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize, From, TryInto)]
#[serde(untagged)]
pub enum Pat {
  Arr(Node<ArrPat>),
  Assign(Node<AssignPat>),
  Id(Node<IdPat>),
  Obj(Node<ObjPat>),
  Rest(Node<RestPat>),
}

super::impl_node_enum!(Pat {
  Arr => "ArrayPattern",
  Assign => "AssignmentPattern",
  Id => "Identifier",
  Obj => "ObjectPattern",
  Rest => "RestElement",
});

impl Pat {
  /// Mutable access to the dialect payload of the pattern kinds that carry one.
  pub fn ts_mut(&mut self) -> Option<&mut Option<Box<PatTs>>> {
    match self {
      Pat::Arr(n) => Some(&mut n.stx.ts),
      Pat::Id(n) => Some(&mut n.stx.ts),
      Pat::Obj(n) => Some(&mut n.stx.ts),
      Pat::Rest(n) => Some(&mut n.stx.ts),
      Pat::Assign(_) => None,
    }
  }
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize, From, TryInto)]
#[serde(untagged)]
pub enum ObjPatMember {
  Prop(Node<Property<Pat>>),
  Rest(Node<RestPat>),
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "Identifier")]
pub struct IdPat {
  #[drive(skip)]
  pub name: String,
  #[serde(flatten)]
  pub ts: Option<Box<PatTs>>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ObjectPattern", rename_all = "camelCase")]
pub struct ObjPat {
  pub properties: Vec<ListElem<ObjPatMember>>,
  #[serde(flatten)]
  pub ts: Option<Box<PatTs>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub open_brace: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub close_brace: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ArrayPattern", rename_all = "camelCase")]
pub struct ArrPat {
  /// `None` elements are elisions.
  pub elements: Vec<ListElem<Option<Pat>>>,
  #[serde(flatten)]
  pub ts: Option<Box<PatTs>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub open_bracket: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub close_bracket: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "RestElement", rename_all = "camelCase")]
pub struct RestPat {
  pub argument: Pat,
  #[serde(flatten)]
  pub ts: Option<Box<PatTs>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub ellipsis: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "AssignmentPattern", rename_all = "camelCase")]
pub struct AssignPat {
  pub left: Pat,
  pub right: Expr,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub eq: Option<Token>,
}
