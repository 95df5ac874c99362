use super::decl::ClassDecl;
use super::decl::FuncDecl;
use super::expr::Expr;
use super::expr::IdExpr;
use super::lit::LitStrExpr;
use super::list::ListElem;
use super::node::Node;
use super::pat::IdPat;
use super::stmt::Stmt;
use crate::token::Token;
use crate::SourceType;
use derive_more::From;
use derive_more::TryInto;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "Program", rename_all = "camelCase")]
pub struct Program {
  #[drive(skip)]
  pub source_type: SourceType,
  pub body: Vec<Stmt>,
}

/// A name in an import or export clause: an identifier, or a string literal for arbitrary
/// module namespace names.
#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize, From, TryInto)]
#[serde(untagged)]
pub enum ModuleExportName {
  Id(Node<IdExpr>),
  Str(Node<LitStrExpr>),
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize, From, TryInto)]
#[serde(untagged)]
pub enum ImportSpecifier {
  Default(Node<ImportDefaultSpecifier>),
  Namespace(Node<ImportNamespaceSpecifier>),
  Named(Node<ImportNamedSpecifier>),
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ImportSpecifier", rename_all = "camelCase")]
pub struct ImportNamedSpecifier {
  pub imported: ModuleExportName,
  pub local: Node<IdPat>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub as_keyword: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ImportDefaultSpecifier")]
pub struct ImportDefaultSpecifier {
  pub local: Node<IdPat>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ImportNamespaceSpecifier", rename_all = "camelCase")]
pub struct ImportNamespaceSpecifier {
  pub local: Node<IdPat>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub star: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub as_keyword: Option<Token>,
}

/// `type: "json"` in `with { type: "json" }`.
#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ImportAttribute", rename_all = "camelCase")]
pub struct ImportAttribute {
  pub key: ModuleExportName,
  pub value: Node<LitStrExpr>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub colon: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ImportDeclaration", rename_all = "camelCase")]
pub struct ImportDecl {
  pub specifiers: Vec<ListElem<ImportSpecifier>>,
  pub source: Node<LitStrExpr>,
  pub attributes: Vec<ListElem<Node<ImportAttribute>>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub open_brace: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub close_brace: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub from_keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub semicolon: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ExportSpecifier", rename_all = "camelCase")]
pub struct ExportSpecifier {
  pub local: ModuleExportName,
  pub exported: ModuleExportName,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub as_keyword: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ExportNamedDeclaration", rename_all = "camelCase")]
pub struct ExportNamedDecl {
  pub declaration: Option<Stmt>,
  pub specifiers: Vec<ListElem<Node<ExportSpecifier>>>,
  pub source: Option<Node<LitStrExpr>>,
  pub attributes: Vec<ListElem<Node<ImportAttribute>>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub open_brace: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub close_brace: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub from_keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub semicolon: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize, From, TryInto)]
#[serde(untagged)]
pub enum ExportDefaultTarget {
  Class(Node<ClassDecl>),
  Func(Node<FuncDecl>),
  Expr(Expr),
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ExportDefaultDeclaration", rename_all = "camelCase")]
pub struct ExportDefaultDecl {
  pub declaration: ExportDefaultTarget,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub default_keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub semicolon: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ExportAllDeclaration", rename_all = "camelCase")]
pub struct ExportAllDecl {
  pub exported: Option<ModuleExportName>,
  pub source: Node<LitStrExpr>,
  pub attributes: Vec<ListElem<Node<ImportAttribute>>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub star: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub from_keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub semicolon: Option<Token>,
}
