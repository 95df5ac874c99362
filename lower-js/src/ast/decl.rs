use super::class::Class;
use super::expr::Expr;
use super::func::Function;
use super::list::ListElem;
use super::node::Node;
use super::pat::Pat;
use super::ts::DeclareTs;
use crate::token::Token;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VarDeclKind {
  Const,
  Let,
  Var,
}

impl VarDeclKind {
  pub fn from_keyword(kw: &str) -> Option<VarDeclKind> {
    match kw {
      "const" => Some(VarDeclKind::Const),
      "let" => Some(VarDeclKind::Let),
      "var" => Some(VarDeclKind::Var),
      _ => None,
    }
  }
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "VariableDeclaration", rename_all = "camelCase")]
pub struct VarDecl {
  pub declarations: Vec<ListElem<Node<VarDeclarator>>>,
  #[drive(skip)]
  pub kind: VarDeclKind,
  #[serde(flatten)]
  pub ts: Option<Box<DeclareTs>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub semicolon: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "VariableDeclarator", rename_all = "camelCase")]
pub struct VarDeclarator {
  pub id: Pat,
  pub init: Option<Expr>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub eq: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "FunctionDeclaration")]
pub struct FuncDecl {
  #[serde(flatten)]
  pub func: Function,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ClassDeclaration")]
pub struct ClassDecl {
  #[serde(flatten)]
  pub class: Class,
}
