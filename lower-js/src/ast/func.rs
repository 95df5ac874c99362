use super::list::ListElem;
use super::node::Node;
use super::pat::IdPat;
use super::pat::Pat;
use super::stmt::BlockStmt;
use super::ts::FuncTs;
use crate::token::Token;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

/// Fields shared by function declarations, function expressions and methods. It carries no
/// `type`; the wrapping node decides which ESTree kind it is.
#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Function {
  pub id: Option<Node<IdPat>>,
  pub params: Vec<ListElem<Pat>>,
  pub body: Node<BlockStmt>,
  #[drive(skip)]
  #[serde(rename = "async")]
  pub async_: bool,
  #[drive(skip)]
  pub generator: bool,
  #[serde(flatten)]
  pub ts: Option<Box<FuncTs>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub async_keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub function_keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub star: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub open_paren: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub close_paren: Option<Token>,
}
