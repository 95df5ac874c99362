//! The concrete syntax tree handed over by the external grammar-driven parser.
//!
//! The tree is read-only here: lowering borrows it for the duration of a pass and never mutates
//! it. Node kinds are the ECMAScript grammar production names (`AdditiveExpression`,
//! `ClassElementName`, ...) and token kinds name the lexical class of the token (`Punctuator`,
//! `Keyword`, `IdentifierName`, ...).

pub mod sexpr;

use crate::error::LowerError;
use crate::error::LowerErrorType;
use crate::error::LowerResult;
use crate::loc::Loc;
use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CstNode {
  pub kind: String,
  /// Source text, present on tokens only.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub value: Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub children: Vec<CstNode>,
  #[serde(default)]
  pub loc: Loc,
}

/// Identity of a CST node within one pass. The tree is borrowed immutably for the whole pass, so a
/// node's address is stable and unique among live nodes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CstId(usize);

impl CstNode {
  pub fn node(kind: impl Into<String>, loc: Loc, children: Vec<CstNode>) -> CstNode {
    CstNode {
      kind: kind.into(),
      value: None,
      children,
      loc,
    }
  }

  pub fn token(kind: impl Into<String>, value: impl Into<String>, loc: Loc) -> CstNode {
    CstNode {
      kind: kind.into(),
      value: Some(value.into()),
      children: Vec::new(),
      loc,
    }
  }

  pub fn from_json(json: &str) -> serde_json::Result<CstNode> {
    serde_json::from_str(json)
  }

  pub fn id(&self) -> CstId {
    CstId(self as *const CstNode as usize)
  }

  pub fn is_token(&self) -> bool {
    self.children.is_empty() && self.value.is_some()
  }

  pub fn is(&self, kind: &str) -> bool {
    self.kind == kind
  }

  pub fn is_any(&self, kinds: &[&str]) -> bool {
    kinds.contains(&self.kind.as_str())
  }

  /// Token text, or the empty string for interior nodes.
  pub fn text(&self) -> &str {
    self.value.as_deref().unwrap_or("")
  }

  /// Whether this is a token with exactly the given text. Punctuators, keywords and soft keywords
  /// are all recognized this way, never by a reserved token kind.
  pub fn is_tok(&self, text: &str) -> bool {
    self.is_token() && self.text() == text
  }

  pub fn is_tok_any(&self, texts: &[&str]) -> bool {
    self.is_token() && texts.contains(&self.text())
  }

  /// Non-token children, in order.
  pub fn nodes(&self) -> impl Iterator<Item = &CstNode> {
    self.children.iter().filter(|c| !c.is_token())
  }

  pub fn tokens(&self) -> impl Iterator<Item = &CstNode> {
    self.children.iter().filter(|c| c.is_token())
  }

  pub fn child(&self, kind: &str) -> Option<&CstNode> {
    self.children.iter().find(|c| c.kind == kind)
  }

  pub fn child_any(&self, kinds: &[&str]) -> Option<&CstNode> {
    self.children.iter().find(|c| c.is_any(kinds))
  }

  pub fn has_tok(&self, text: &str) -> bool {
    self.children.iter().any(|c| c.is_tok(text))
  }

  pub fn tok(&self, text: &str) -> Option<&CstNode> {
    self.children.iter().find(|c| c.is_tok(text))
  }

  pub fn tok_pos(&self, text: &str) -> Option<usize> {
    self.children.iter().position(|c| c.is_tok(text))
  }

  /// The only non-token child, if there is exactly one.
  pub fn single_node(&self) -> Option<&CstNode> {
    let mut nodes = self.nodes();
    let first = nodes.next()?;
    nodes.next().is_none().then_some(first)
  }

  pub fn malformed(&self, expected: &'static str) -> LowerError {
    self.loc.error(LowerErrorType::MalformedCst(expected), &self.kind)
  }

  pub fn unsupported(&self) -> LowerError {
    self.loc.error(LowerErrorType::UnsupportedNodeKind, &self.kind)
  }

  pub fn require(&self, kind: &'static str) -> LowerResult<&CstNode> {
    self.child(kind).ok_or_else(|| self.malformed(kind))
  }

  pub fn require_any(&self, kinds: &[&str], expected: &'static str) -> LowerResult<&CstNode> {
    self.child_any(kinds).ok_or_else(|| self.malformed(expected))
  }

  pub fn require_node(&self, expected: &'static str) -> LowerResult<&CstNode> {
    self.nodes().next().ok_or_else(|| self.malformed(expected))
  }

  /// First child after the token `text`.
  pub fn after_tok(&self, text: &str) -> Option<&CstNode> {
    let pos = self.tok_pos(text)?;
    self.children.get(pos + 1)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn deserializes_from_json_with_default_loc() {
    let cst = CstNode::from_json(
      r#"{"kind":"IdentifierReference","children":[{"kind":"IdentifierName","value":"a","loc":[0,1]}]}"#,
    )
    .unwrap();
    assert_eq!(cst.loc, Loc(0, 0));
    assert_eq!(cst.children[0].loc, Loc(0, 1));
    assert!(cst.children[0].is_token());
    assert!(cst.children[0].is_tok("a"));
  }

  #[test]
  fn identity_distinguishes_equal_nodes() {
    let a = CstNode::token("IdentifierName", "x", Loc(0, 1));
    let b = a.clone();
    assert_eq!(a, b);
    assert_ne!(a.id(), b.id());
    assert_eq!(a.id(), a.id());
  }

  #[test]
  fn single_node_ignores_tokens() {
    let n = CstNode::node(
      "ParenthesizedExpression",
      Loc(0, 3),
      vec![
        CstNode::token("Punctuator", "(", Loc(0, 1)),
        CstNode::token("IdentifierName", "a", Loc(1, 2)),
        CstNode::node("IdentifierReference", Loc(1, 2), vec![]),
        CstNode::token("Punctuator", ")", Loc(2, 3)),
      ],
    );
    assert_eq!(n.single_node().map(|n| n.kind.as_str()), Some("IdentifierReference"));
    assert_eq!(n.tok_pos(")"), Some(3));
  }
}
