use super::class::Class;
use super::func::Function;
use super::lit::LitBigIntExpr;
use super::lit::LitBoolExpr;
use super::lit::LitNullExpr;
use super::lit::LitNumExpr;
use super::lit::LitRegexExpr;
use super::lit::LitStrExpr;
use super::lit::TemplateElement;
use super::list::ListElem;
use super::node::Node;
use super::pat::Pat;
use super::stmt::BlockStmt;
use crate::token::Token;
use derive_more::From;
use derive_more::TryInto;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize, From, TryInto)]
#[serde(untagged)]
pub enum Expr {
  ArrowFunc(Node<ArrowFuncExpr>),
  Assign(Node<AssignExpr>),
  Await(Node<AwaitExpr>),
  Binary(Node<BinaryExpr>),
  Call(Node<CallExpr>),
  Chain(Node<ChainExpr>),
  Class(Node<ClassExpr>),
  Cond(Node<CondExpr>),
  Func(Node<FuncExpr>),
  Id(Node<IdExpr>),
  Import(Node<ImportExpr>),
  Logical(Node<LogicalExpr>),
  Member(Node<MemberExpr>),
  MetaProp(Node<MetaPropExpr>),
  New(Node<NewExpr>),
  PrivateName(Node<PrivateNameExpr>),
  Seq(Node<SeqExpr>),
  Super(Node<SuperExpr>),
  TaggedTemplate(Node<TaggedTemplateExpr>),
  Template(Node<TemplateExpr>),
  This(Node<ThisExpr>),
  Unary(Node<UnaryExpr>),
  Update(Node<UpdateExpr>),
  Yield(Node<YieldExpr>),

  // Literals.
  LitArr(Node<ArrayExpr>),
  LitBigInt(Node<LitBigIntExpr>),
  LitBool(Node<LitBoolExpr>),
  LitNull(Node<LitNullExpr>),
  LitNum(Node<LitNumExpr>),
  LitObj(Node<ObjectExpr>),
  LitRegex(Node<LitRegexExpr>),
  LitStr(Node<LitStrExpr>),
}

super::impl_node_enum!(Expr {
  ArrowFunc => "ArrowFunctionExpression",
  Assign => "AssignmentExpression",
  Await => "AwaitExpression",
  Binary => "BinaryExpression",
  Call => "CallExpression",
  Chain => "ChainExpression",
  Class => "ClassExpression",
  Cond => "ConditionalExpression",
  Func => "FunctionExpression",
  Id => "Identifier",
  Import => "ImportExpression",
  Logical => "LogicalExpression",
  Member => "MemberExpression",
  MetaProp => "MetaProperty",
  New => "NewExpression",
  PrivateName => "PrivateIdentifier",
  Seq => "SequenceExpression",
  Super => "Super",
  TaggedTemplate => "TaggedTemplateExpression",
  Template => "TemplateLiteral",
  This => "ThisExpression",
  Unary => "UnaryExpression",
  Update => "UpdateExpression",
  Yield => "YieldExpression",
  LitArr => "ArrayExpression",
  LitBigInt => "Literal",
  LitBool => "Literal",
  LitNull => "Literal",
  LitNum => "Literal",
  LitObj => "ObjectExpression",
  LitRegex => "Literal",
  LitStr => "Literal",
});

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize, From, TryInto)]
#[serde(untagged)]
pub enum ExprOrSpread {
  Expr(Expr),
  Spread(Node<SpreadElement>),
}

/// Left side of an assignment: a pattern when the target is pattern-convertible, otherwise the
/// expression itself (e.g. a member expression, or the target of a compound assignment).
#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize, From, TryInto)]
#[serde(untagged)]
pub enum AssignTarget {
  Pat(Pat),
  Expr(Expr),
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize, From, TryInto)]
#[serde(untagged)]
pub enum ArrowBody {
  Block(Node<BlockStmt>),
  Expr(Expr),
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize, From, TryInto)]
#[serde(untagged)]
pub enum ObjMember {
  Prop(Node<Property<Expr>>),
  Spread(Node<SpreadElement>),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Drive, DriveMut, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropKind {
  Init,
  Get,
  Set,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "Identifier")]
pub struct IdExpr {
  #[drive(skip)]
  pub name: String,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "PrivateIdentifier")]
pub struct PrivateNameExpr {
  /// Without the leading `#`.
  #[drive(skip)]
  pub name: String,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ThisExpression")]
pub struct ThisExpr {}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "Super")]
pub struct SuperExpr {}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ArrayExpression", rename_all = "camelCase")]
pub struct ArrayExpr {
  pub elements: Vec<ListElem<Option<ExprOrSpread>>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub open_bracket: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub close_bracket: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ObjectExpression", rename_all = "camelCase")]
pub struct ObjectExpr {
  pub properties: Vec<ListElem<ObjMember>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub open_brace: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub close_brace: Option<Token>,
}

/// An object member. `T` is `Expr` inside object literals and `Pat` inside object patterns.
#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "Property", rename_all = "camelCase")]
pub struct Property<T: Drive + DriveMut> {
  pub key: Expr,
  pub value: T,
  #[drive(skip)]
  pub kind: PropKind,
  #[drive(skip)]
  pub method: bool,
  #[drive(skip)]
  pub shorthand: bool,
  #[drive(skip)]
  pub computed: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub colon: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "SpreadElement", rename_all = "camelCase")]
pub struct SpreadElement {
  pub argument: Expr,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub ellipsis: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "TemplateLiteral")]
pub struct TemplateExpr {
  pub quasis: Vec<Node<TemplateElement>>,
  pub expressions: Vec<Expr>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "TaggedTemplateExpression")]
pub struct TaggedTemplateExpr {
  pub tag: Expr,
  pub quasi: Node<TemplateExpr>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "FunctionExpression")]
pub struct FuncExpr {
  #[serde(flatten)]
  pub func: Function,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ArrowFunctionExpression", rename_all = "camelCase")]
pub struct ArrowFuncExpr {
  /// Arrow functions are never named; kept for ESTree's shared function shape.
  #[drive(skip)]
  pub id: (),
  pub params: Vec<ListElem<Pat>>,
  pub body: ArrowBody,
  #[drive(skip)]
  #[serde(rename = "async")]
  pub async_: bool,
  #[drive(skip)]
  pub generator: bool,
  /// Whether the body is a bare expression.
  #[drive(skip)]
  pub expression: bool,
  #[serde(flatten)]
  pub ts: Option<Box<super::ts::FuncTs>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub async_keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub open_paren: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub close_paren: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub arrow: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ClassExpression")]
pub struct ClassExpr {
  #[serde(flatten)]
  pub class: Class,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "UnaryExpression", rename_all = "camelCase")]
pub struct UnaryExpr {
  #[drive(skip)]
  pub operator: String,
  #[drive(skip)]
  pub prefix: bool,
  pub argument: Expr,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub operator_token: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "UpdateExpression", rename_all = "camelCase")]
pub struct UpdateExpr {
  #[drive(skip)]
  pub operator: String,
  #[drive(skip)]
  pub prefix: bool,
  pub argument: Expr,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub operator_token: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "BinaryExpression", rename_all = "camelCase")]
pub struct BinaryExpr {
  pub left: Expr,
  #[drive(skip)]
  pub operator: String,
  pub right: Expr,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub operator_token: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "LogicalExpression", rename_all = "camelCase")]
pub struct LogicalExpr {
  pub left: Expr,
  #[drive(skip)]
  pub operator: String,
  pub right: Expr,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub operator_token: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "AssignmentExpression", rename_all = "camelCase")]
pub struct AssignExpr {
  #[drive(skip)]
  pub operator: String,
  pub left: AssignTarget,
  pub right: Expr,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub operator_token: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ConditionalExpression", rename_all = "camelCase")]
pub struct CondExpr {
  pub test: Expr,
  pub consequent: Expr,
  pub alternate: Expr,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub question: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub colon: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "CallExpression", rename_all = "camelCase")]
pub struct CallExpr {
  pub callee: Expr,
  pub arguments: Vec<ListElem<ExprOrSpread>>,
  #[drive(skip)]
  pub optional: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub question_dot: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub open_paren: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub close_paren: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "NewExpression", rename_all = "camelCase")]
pub struct NewExpr {
  pub callee: Expr,
  pub arguments: Vec<ListElem<ExprOrSpread>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub new_keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub open_paren: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub close_paren: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "MemberExpression", rename_all = "camelCase")]
pub struct MemberExpr {
  pub object: Expr,
  pub property: Expr,
  #[drive(skip)]
  pub computed: bool,
  #[drive(skip)]
  pub optional: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub dot: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub open_bracket: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub close_bracket: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ChainExpression")]
pub struct ChainExpr {
  pub expression: Expr,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "SequenceExpression")]
pub struct SeqExpr {
  pub expressions: Vec<Expr>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "YieldExpression", rename_all = "camelCase")]
pub struct YieldExpr {
  pub argument: Option<Expr>,
  #[drive(skip)]
  pub delegate: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub keyword: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "AwaitExpression", rename_all = "camelCase")]
pub struct AwaitExpr {
  pub argument: Expr,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub keyword: Option<Token>,
}

/// `new.target` and `import.meta`.
#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "MetaProperty")]
pub struct MetaPropExpr {
  pub meta: Node<IdExpr>,
  pub property: Node<IdExpr>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "ImportExpression", rename_all = "camelCase")]
pub struct ImportExpr {
  pub source: Expr,
  pub options: Option<Expr>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub keyword: Option<Token>,
}
