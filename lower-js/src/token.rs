use crate::cst::CstNode;
use crate::loc::Loc;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::ser::SerializeMap;
use serde::Serialize;
use serde::Serializer;

/// Lexical class of a surface token kept on the AST.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum TokenKind {
  Punctuator,
  Keyword,
  // Soft keywords (`get`, `async`, `of`, ...) are identifiers lexically.
  Identifier,
  Literal,
}

impl TokenKind {
  pub fn from_cst_kind(kind: &str) -> TokenKind {
    match kind {
      "Punctuator" => TokenKind::Punctuator,
      "Keyword" => TokenKind::Keyword,
      "IdentifierName" | "Identifier" | "PrivateIdentifier" => TokenKind::Identifier,
      _ => TokenKind::Literal,
    }
  }
}

/// One piece of concrete syntax. Tokens carry no semantic weight; they let downstream printers
/// reproduce the source faithfully.
#[derive(Clone, PartialEq, Eq, Debug, Drive, DriveMut)]
pub struct Token {
  #[drive(skip)]
  pub kind: TokenKind,
  #[drive(skip)]
  pub value: String,
  #[drive(skip)]
  pub loc: Loc,
}

impl Token {
  pub fn from_cst(node: &CstNode) -> Token {
    Token {
      kind: TokenKind::from_cst_kind(&node.kind),
      value: node.text().to_string(),
      loc: node.loc,
    }
  }
}

impl Serialize for Token {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(4))?;
    map.serialize_entry("type", &self.kind)?;
    map.serialize_entry("value", &self.value)?;
    map.serialize_entry("start", &self.loc.0)?;
    map.serialize_entry("end", &self.loc.1)?;
    map.end()
  }
}
