use super::expr::Expr;
use super::expr::FuncExpr;
use super::node::Node;
use super::pat::IdPat;
use super::stmt::Stmt;
use super::ts::ClassTs;
use super::ts::MemberTs;
use crate::token::Token;
use derive_more::From;
use derive_more::TryInto;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

/// Fields shared by class declarations and class expressions.
#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
  pub id: Option<Node<IdPat>>,
  pub super_class: Option<Expr>,
  pub body: Node<ClassBody>,
  #[serde(flatten)]
  pub ts: Option<Box<ClassTs>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub class_keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub extends_keyword: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ClassBody", rename_all = "camelCase")]
pub struct ClassBody {
  pub body: Vec<ClassMember>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub open_brace: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub close_brace: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize, From, TryInto)]
#[serde(untagged)]
pub enum ClassMember {
  Method(Node<MethodDef>),
  Prop(Node<PropDef>),
  StaticBlock(Node<StaticBlock>),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
  Constructor,
  Method,
  Get,
  Set,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "MethodDefinition", rename_all = "camelCase")]
pub struct MethodDef {
  pub key: Expr,
  pub value: Node<FuncExpr>,
  #[drive(skip)]
  pub kind: MethodKind,
  #[drive(skip)]
  pub computed: bool,
  #[drive(skip)]
  #[serde(rename = "static")]
  pub static_: bool,
  #[serde(flatten)]
  pub ts: Option<Box<MemberTs>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub static_keyword: Option<Token>,
  /// The `get`/`set` soft keyword of an accessor.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub kind_keyword: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "PropertyDefinition", rename_all = "camelCase")]
pub struct PropDef {
  pub key: Expr,
  pub value: Option<Expr>,
  #[drive(skip)]
  pub computed: bool,
  #[drive(skip)]
  #[serde(rename = "static")]
  pub static_: bool,
  #[serde(flatten)]
  pub ts: Option<Box<MemberTs>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub static_keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub eq: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub semicolon: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "StaticBlock", rename_all = "camelCase")]
pub struct StaticBlock {
  pub body: Vec<Stmt>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub static_keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub open_brace: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub close_brace: Option<Token>,
}
