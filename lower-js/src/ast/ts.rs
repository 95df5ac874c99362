//! Type-annotation nodes and the typed dialect payloads attached to base nodes.
//!
//! Payloads are `Option<Box<...>>` fields flattened into their host node, so plain JavaScript
//! output never mentions them.

use super::expr::Expr;
use super::expr::IdExpr;
use super::list::ListElem;
use super::node::Node;
use super::pat::Pat;
use super::stmt::Stmt;
use crate::token::Token;
use derive_more::From;
use derive_more::TryInto;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::ser::SerializeMap;
use serde::Serialize;
use serde::Serializer;

#[derive(Clone, PartialEq, Debug, Default, Drive, DriveMut, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatTs {
  pub type_annotation: Option<Node<TypeAnnotation>>,
  #[drive(skip)]
  pub optional: bool,
}

#[derive(Clone, PartialEq, Debug, Default, Drive, DriveMut, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FuncTs {
  pub return_type: Option<Node<TypeAnnotation>>,
  #[drive(skip)]
  pub declare: bool,
}

#[derive(Clone, PartialEq, Debug, Default, Drive, DriveMut, Serialize)]
pub struct ClassTs {
  #[drive(skip)]
  pub declare: bool,
  #[drive(skip)]
  #[serde(rename = "abstract")]
  pub abstract_: bool,
}

#[derive(Clone, PartialEq, Debug, Default, Drive, DriveMut, Serialize)]
pub struct DeclareTs {
  #[drive(skip)]
  pub declare: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accessibility {
  Public,
  Protected,
  Private,
}

impl Accessibility {
  pub fn from_keyword(kw: &str) -> Option<Accessibility> {
    match kw {
      "public" => Some(Accessibility::Public),
      "protected" => Some(Accessibility::Protected),
      "private" => Some(Accessibility::Private),
      _ => None,
    }
  }
}

#[derive(Clone, PartialEq, Debug, Default, Drive, DriveMut, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberTs {
  #[drive(skip)]
  pub accessibility: Option<Accessibility>,
  #[drive(skip)]
  pub readonly: bool,
  #[drive(skip)]
  pub optional: bool,
  pub type_annotation: Option<Node<TypeAnnotation>>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "TSTypeAnnotation", rename_all = "camelCase")]
pub struct TypeAnnotation {
  pub type_annotation: TypeExpr,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub colon: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize, From, TryInto)]
#[serde(untagged)]
pub enum TypeExpr {
  Array(Node<ArrayType>),
  Function(Node<FunctionType>),
  Intersection(Node<IntersectionType>),
  Keyword(Node<KeywordType>),
  Literal(Node<LiteralType>),
  Reference(Node<TypeReference>),
  Tuple(Node<TupleType>),
  TypeLiteral(Node<TypeLiteral>),
  Union(Node<UnionType>),
}

super::impl_node_enum!(TypeExpr {
  Array => "TSArrayType",
  Function => "TSFunctionType",
  Intersection => "TSIntersectionType",
  Keyword => "TSKeywordType",
  Literal => "TSLiteralType",
  Reference => "TSTypeReference",
  Tuple => "TSTupleType",
  TypeLiteral => "TSTypeLiteral",
  Union => "TSUnionType",
});

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TypeKeyword {
  Any,
  BigInt,
  Boolean,
  Never,
  Null,
  Number,
  Object,
  String,
  Symbol,
  Undefined,
  Unknown,
  Void,
}

impl TypeKeyword {
  pub fn from_keyword(kw: &str) -> Option<TypeKeyword> {
    Some(match kw {
      "any" => TypeKeyword::Any,
      "bigint" => TypeKeyword::BigInt,
      "boolean" => TypeKeyword::Boolean,
      "never" => TypeKeyword::Never,
      "null" => TypeKeyword::Null,
      "number" => TypeKeyword::Number,
      "object" => TypeKeyword::Object,
      "string" => TypeKeyword::String,
      "symbol" => TypeKeyword::Symbol,
      "undefined" => TypeKeyword::Undefined,
      "unknown" => TypeKeyword::Unknown,
      "void" => TypeKeyword::Void,
      _ => return None,
    })
  }

  pub fn node_type(self) -> &'static str {
    match self {
      TypeKeyword::Any => "TSAnyKeyword",
      TypeKeyword::BigInt => "TSBigIntKeyword",
      TypeKeyword::Boolean => "TSBooleanKeyword",
      TypeKeyword::Never => "TSNeverKeyword",
      TypeKeyword::Null => "TSNullKeyword",
      TypeKeyword::Number => "TSNumberKeyword",
      TypeKeyword::Object => "TSObjectKeyword",
      TypeKeyword::String => "TSStringKeyword",
      TypeKeyword::Symbol => "TSSymbolKeyword",
      TypeKeyword::Undefined => "TSUndefinedKeyword",
      TypeKeyword::Unknown => "TSUnknownKeyword",
      TypeKeyword::Void => "TSVoidKeyword",
    }
  }
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut)]
pub struct KeywordType {
  #[drive(skip)]
  pub keyword: TypeKeyword,
}

// Each keyword is its own ESTree kind.
impl Serialize for KeywordType {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry("type", self.keyword.node_type())?;
    map.end()
  }
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize, From, TryInto)]
#[serde(untagged)]
pub enum EntityName {
  Id(Node<IdExpr>),
  Qualified(Node<QualifiedName>),
}

super::impl_node_enum!(EntityName {
  Id => "Identifier",
  Qualified => "TSQualifiedName",
});

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "TSQualifiedName")]
pub struct QualifiedName {
  pub left: EntityName,
  pub right: Node<IdExpr>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "TSTypeReference", rename_all = "camelCase")]
pub struct TypeReference {
  pub type_name: EntityName,
  pub type_arguments: Option<Node<TypeArguments>>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "TSTypeParameterInstantiation")]
pub struct TypeArguments {
  pub params: Vec<ListElem<TypeExpr>>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "TSArrayType", rename_all = "camelCase")]
pub struct ArrayType {
  pub element_type: TypeExpr,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "TSUnionType")]
pub struct UnionType {
  pub types: Vec<TypeExpr>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "TSIntersectionType")]
pub struct IntersectionType {
  pub types: Vec<TypeExpr>,
}

/// `literal` is a `Literal`, a `TemplateLiteral` or a negated numeric `UnaryExpression`.
#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "TSLiteralType")]
pub struct LiteralType {
  pub literal: Expr,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "TSTupleType", rename_all = "camelCase")]
pub struct TupleType {
  pub element_types: Vec<ListElem<TypeExpr>>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "TSFunctionType", rename_all = "camelCase")]
pub struct FunctionType {
  pub params: Vec<ListElem<Pat>>,
  pub return_type: Node<TypeAnnotation>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "TSTypeLiteral")]
pub struct TypeLiteral {
  pub members: Vec<Node<PropertySignature>>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "TSPropertySignature", rename_all = "camelCase")]
pub struct PropertySignature {
  pub key: Expr,
  #[drive(skip)]
  pub computed: bool,
  #[drive(skip)]
  pub optional: bool,
  #[drive(skip)]
  pub readonly: bool,
  pub type_annotation: Option<Node<TypeAnnotation>>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TsModuleKind {
  Module,
  Namespace,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "TSModuleDeclaration", rename_all = "camelCase")]
pub struct TsModuleDecl {
  pub id: EntityName,
  pub body: Node<TsModuleBlock>,
  #[drive(skip)]
  pub kind: TsModuleKind,
  #[drive(skip)]
  pub declare: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub keyword: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "TSModuleBlock", rename_all = "camelCase")]
pub struct TsModuleBlock {
  pub body: Vec<Stmt>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub open_brace: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub close_brace: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "TSTypeAliasDeclaration", rename_all = "camelCase")]
pub struct TsTypeAliasDecl {
  pub id: Node<IdExpr>,
  pub type_annotation: TypeExpr,
  #[drive(skip)]
  pub declare: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub keyword: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub eq: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub semicolon: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "TSInterfaceDeclaration", rename_all = "camelCase")]
pub struct TsInterfaceDecl {
  pub id: Node<IdExpr>,
  pub body: Node<TsInterfaceBody>,
  #[drive(skip)]
  pub declare: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub keyword: Option<Token>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "TSInterfaceBody", rename_all = "camelCase")]
pub struct TsInterfaceBody {
  pub body: Vec<Node<PropertySignature>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub open_brace: Option<Token>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub close_brace: Option<Token>,
}
