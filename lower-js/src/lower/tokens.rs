//! Surface tokens: picking punctuation and keywords out of a CST node's children, and pairing
//! comma-separated list items with their separators.

use crate::cst::CstNode;
use crate::token::Token;

/// Kinds that only group list items and are flattened away when reading a list.
pub static LIST_KINDS: &[&str] = &[
  "ArgumentList",
  "BindingElementList",
  "BindingElisionElement",
  "BindingList",
  "BindingPropertyList",
  "ElementList",
  "Elision",
  "ExportsList",
  "FormalParameterList",
  "ImportsList",
  "PropertyDefinitionList",
  "VariableDeclarationList",
  "WithEntries",
];

static DELIMITERS: &[&str] = &["(", ")", "[", "]", "{", "}"];

/// The first token child with this text.
pub fn tok(node: &CstNode, text: &str) -> Option<Token> {
  node.tok(text).map(Token::from_cst)
}

/// The last token child with this text, for closing delimiters of nodes that can nest the same
/// delimiter inside a child.
pub fn last_tok(node: &CstNode, text: &str) -> Option<Token> {
  node
    .children
    .iter()
    .rev()
    .find(|c| c.is_tok(text))
    .map(Token::from_cst)
}

pub fn tok_any(node: &CstNode, texts: &[&str]) -> Option<Token> {
  node
    .children
    .iter()
    .find(|c| c.is_tok_any(texts))
    .map(Token::from_cst)
}

#[derive(Clone, Copy, Debug)]
pub enum ListItem<'a> {
  Elem(&'a CstNode),
  /// `...` followed by its operand, when the grammar does not wrap them in one node.
  Spread(&'a CstNode, &'a CstNode),
}

impl<'a> ListItem<'a> {
  /// The node whose kind decides how the item is lowered.
  pub fn node(&self) -> &'a CstNode {
    match self {
      ListItem::Elem(n) => n,
      ListItem::Spread(_, n) => n,
    }
  }
}

/// One slot of a comma-separated list. An elided slot has no item.
#[derive(Clone, Debug)]
pub struct ListSlot<'a> {
  pub item: Option<ListItem<'a>>,
  pub comma: Option<Token>,
}

fn flatten_into<'a>(node: &'a CstNode, out: &mut Vec<&'a CstNode>) {
  for c in node.children.iter() {
    if !c.is_token() && c.is_any(LIST_KINDS) {
      flatten_into(c, out);
    } else {
      out.push(c);
    }
  }
}

/// The children of a list-bearing node with list groupings flattened and the enclosing
/// delimiters removed.
pub fn list_children(node: &CstNode) -> Vec<&CstNode> {
  let mut out = Vec::new();
  flatten_into(node, &mut out);
  out.retain(|c| !c.is_tok_any(DELIMITERS));
  out
}

/// Splits a flattened child sequence into slots. Each item takes the comma that follows it. A
/// comma with no item before it is an elision and becomes a slot of its own.
pub fn comma_slots<'a>(children: &[&'a CstNode]) -> Vec<ListSlot<'a>> {
  let mut slots = Vec::new();
  let mut pending: Option<ListItem<'a>> = None;
  let mut ellipsis: Option<&'a CstNode> = None;
  for &c in children {
    if c.is_tok(",") {
      slots.push(ListSlot {
        item: pending.take(),
        comma: Some(Token::from_cst(c)),
      });
      continue;
    }
    if c.is_tok("...") {
      ellipsis = Some(c);
      continue;
    }
    if let Some(prev) = pending.take() {
      // Two items with no separator between them; keep both.
      slots.push(ListSlot {
        item: Some(prev),
        comma: None,
      });
    }
    pending = Some(match ellipsis.take() {
      Some(dots) => ListItem::Spread(dots, c),
      None => ListItem::Elem(c),
    });
  }
  if let Some(item) = pending {
    slots.push(ListSlot {
      item: Some(item),
      comma: None,
    });
  }
  slots
}

/// `list_children` then `comma_slots`.
pub fn list_slots(node: &CstNode) -> Vec<ListSlot<'_>> {
  comma_slots(&list_children(node))
}
