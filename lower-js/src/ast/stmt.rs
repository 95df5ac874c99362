use super::decl::ClassDecl;
use super::decl::FuncDecl;
use super::decl::VarDecl;
use super::expr::Expr;
use super::expr::IdExpr;
use super::module::ExportAllDecl;
use super::module::ExportDefaultDecl;
use super::module::ExportNamedDecl;
use super::module::ImportDecl;
use super::node::Node;
use super::pat::Pat;
use super::ts::TsInterfaceDecl;
use super::ts::TsModuleDecl;
use super::ts::TsTypeAliasDecl;
use crate::token::Token;
use derive_more::From;
use derive_more::TryInto;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize, From, TryInto)]
#[serde(untagged)]
pub enum Stmt {
  Block(Node<BlockStmt>),
  Break(Node<BreakStmt>),
  Continue(Node<ContinueStmt>),
  Debugger(Node<DebuggerStmt>),
  DoWhile(Node<DoWhileStmt>),
  Empty(Node<EmptyStmt>),
  Expr(Node<ExprStmt>),
  For(Node<ForStmt>),
  ForIn(Node<ForInStmt>),
  ForOf(Node<ForOfStmt>),
  If(Node<IfStmt>),
  Label(Node<LabelStmt>),
  Return(Node<ReturnStmt>),
  Switch(Node<SwitchStmt>),
  Throw(Node<ThrowStmt>),
  Try(Node<TryStmt>),
  While(Node<WhileStmt>),
  With(Node<WithStmt>),

  // Declarations.
  ClassDecl(Node<ClassDecl>),
  FuncDecl(Node<FuncDecl>),
  VarDecl(Node<VarDecl>),

  // Module items.
  ExportAll(Node<ExportAllDecl>),
  ExportDefault(Node<ExportDefaultDecl>),
  ExportNamed(Node<ExportNamedDecl>),
  Import(Node<ImportDecl>),

  // Type-only declarations.
  TsInterface(Node<TsInterfaceDecl>),
  TsModule(Node<TsModuleDecl>),
  TsTypeAlias(Node<TsTypeAliasDecl>),
}

super::impl_node_enum!(Stmt {
  Block => "BlockStatement",
  Break => "BreakStatement",
  Continue => "ContinueStatement",
  Debugger => "DebuggerStatement",
  DoWhile => "DoWhileStatement",
  Empty => "EmptyStatement",
  Expr => "ExpressionStatement",
  For => "ForStatement",
  ForIn => "ForInStatement",
  ForOf => "ForOfStatement",
  If => "IfStatement",
  Label => "LabeledStatement",
  Return => "ReturnStatement",
  Switch => "SwitchStatement",
  Throw => "ThrowStatement",
  Try => "TryStatement",
  While => "WhileStatement",
  With => "WithStatement",
  ClassDecl => "ClassDeclaration",
  FuncDecl => "FunctionDeclaration",
  VarDecl => "VariableDeclaration",
  ExportAll => "ExportAllDeclaration",
  ExportDefault => "ExportDefaultDeclaration",
  ExportNamed => "ExportNamedDeclaration",
  Import => "ImportDeclaration",
  TsInterface => "TSInterfaceDeclaration",
  TsModule => "TSModuleDeclaration",
  TsTypeAlias => "TSTypeAliasDeclaration",
});

/// Also used for function bodies.
#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "BlockStatement", rename_all = "camelCase")]
pub struct BlockStmt {
  pub body: Vec<Stmt>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub open_brace: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub close_brace: Option<Token>,
}

impl BlockStmt {
  pub fn empty() -> BlockStmt {
    BlockStmt {
      body: Vec::new(),
      open_brace: None,
      close_brace: None,
    }
  }
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "BreakStatement", rename_all = "camelCase")]
pub struct BreakStmt {
  pub label: Option<Node<IdExpr>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub semicolon: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ContinueStatement", rename_all = "camelCase")]
pub struct ContinueStmt {
  pub label: Option<Node<IdExpr>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub semicolon: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "DebuggerStatement", rename_all = "camelCase")]
pub struct DebuggerStmt {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub semicolon: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "DoWhileStatement", rename_all = "camelCase")]
pub struct DoWhileStmt {
  pub body: Stmt,
  pub test: Expr,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub do_keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub while_keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub semicolon: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "EmptyStatement", rename_all = "camelCase")]
pub struct EmptyStmt {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub semicolon: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ExpressionStatement", rename_all = "camelCase")]
pub struct ExprStmt {
  pub expression: Expr,
  /// Raw directive text without quotes, for the directive prologue of a program or function.
  #[drive(skip)]
  #[serde(skip_serializing_if = "Option::is_none")]
  pub directive: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub semicolon: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize, From, TryInto)]
#[serde(untagged)]
pub enum ForInit {
  VarDecl(Node<VarDecl>),
  Expr(Expr),
}

/// Left side of a for-in/for-of head.
#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize, From, TryInto)]
#[serde(untagged)]
pub enum ForHead {
  VarDecl(Node<VarDecl>),
  Pat(Pat),
  Expr(Expr),
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ForStatement", rename_all = "camelCase")]
pub struct ForStmt {
  pub init: Option<ForInit>,
  pub test: Option<Expr>,
  pub update: Option<Expr>,
  pub body: Stmt,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub open_paren: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub close_paren: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ForInStatement", rename_all = "camelCase")]
pub struct ForInStmt {
  pub left: ForHead,
  pub right: Expr,
  pub body: Stmt,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub in_keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub open_paren: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub close_paren: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ForOfStatement", rename_all = "camelCase")]
pub struct ForOfStmt {
  #[drive(skip)]
  #[serde(rename = "await")]
  pub await_: bool,
  pub left: ForHead,
  pub right: Expr,
  pub body: Stmt,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub await_keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub of_keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub open_paren: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub close_paren: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "IfStatement", rename_all = "camelCase")]
pub struct IfStmt {
  pub test: Expr,
  pub consequent: Stmt,
  pub alternate: Option<Stmt>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub else_keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub open_paren: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub close_paren: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "LabeledStatement", rename_all = "camelCase")]
pub struct LabelStmt {
  pub label: Node<IdExpr>,
  pub body: Stmt,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub colon: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ReturnStatement", rename_all = "camelCase")]
pub struct ReturnStmt {
  pub argument: Option<Expr>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub semicolon: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "SwitchStatement", rename_all = "camelCase")]
pub struct SwitchStmt {
  pub discriminant: Expr,
  pub cases: Vec<Node<SwitchCase>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub open_brace: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub close_brace: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "SwitchCase", rename_all = "camelCase")]
pub struct SwitchCase {
  /// `None` for the default clause.
  pub test: Option<Expr>,
  pub consequent: Vec<Stmt>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub colon: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ThrowStatement", rename_all = "camelCase")]
pub struct ThrowStmt {
  pub argument: Expr,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub semicolon: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "TryStatement", rename_all = "camelCase")]
pub struct TryStmt {
  pub block: Node<BlockStmt>,
  pub handler: Option<Node<CatchClause>>,
  pub finalizer: Option<Node<BlockStmt>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub finally_keyword: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "CatchClause", rename_all = "camelCase")]
pub struct CatchClause {
  pub param: Option<Pat>,
  pub body: Node<BlockStmt>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub open_paren: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub close_paren: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "WhileStatement", rename_all = "camelCase")]
pub struct WhileStmt {
  pub test: Expr,
  pub body: Stmt,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub open_paren: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub close_paren: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "WithStatement", rename_all = "camelCase")]
pub struct WithStmt {
  pub object: Expr,
  pub body: Stmt,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub keyword: Option<Token>,
}
