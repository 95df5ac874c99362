//! A compact notation for writing CST fixtures by hand.
//!
//! `(Kind child child ...)` is an interior node and `(Kind "text")` is a token of kind `Kind`. A
//! bare `"text"` is a token whose kind is inferred from its text. Locations are synthesized by
//! laying tokens out left to right with one space between them.

use super::CstNode;
use crate::loc::Loc;
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

pub static RESERVED_WORDS: &[&str] = &[
  "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
  "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import",
  "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw", "true", "try",
  "typeof", "var", "void", "while", "with", "yield",
];

pub static TOKEN_KINDS: &[&str] = &[
  "Punctuator",
  "Keyword",
  "IdentifierName",
  "Identifier",
  "PrivateIdentifier",
  "NumericLiteral",
  "StringLiteral",
  "BooleanLiteral",
  "NullLiteral",
  "RegularExpressionLiteral",
  "NoSubstitutionTemplate",
  "TemplateHead",
  "TemplateMiddle",
  "TemplateTail",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SexprError {
  pub offset: usize,
  pub message: &'static str,
}

impl fmt::Display for SexprError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} at offset {}", self.message, self.offset)
  }
}

impl std::error::Error for SexprError {}

/// Kind a bare token gets from its text.
pub fn infer_token_kind(text: &str) -> &'static str {
  let Some(first) = text.chars().next() else {
    return "Punctuator";
  };
  match first {
    '\'' | '"' => "StringLiteral",
    '`' => "NoSubstitutionTemplate",
    '#' if text.len() > 1 => "PrivateIdentifier",
    '/' if text.len() > 2 && text[1..].contains('/') => "RegularExpressionLiteral",
    '0'..='9' => "NumericLiteral",
    '.' if text.len() > 1 && text[1..].starts_with(|c: char| c.is_ascii_digit()) => {
      "NumericLiteral"
    }
    c if c.is_alphabetic() || c == '_' || c == '$' => {
      if RESERVED_WORDS.contains(&text) {
        "Keyword"
      } else {
        "IdentifierName"
      }
    }
    _ => "Punctuator",
  }
}

struct Reader<'a> {
  chars: Peekable<Chars<'a>>,
  offset: usize,
  // Next synthesized source position.
  pos: usize,
}

impl<'a> Reader<'a> {
  fn err(&self, message: &'static str) -> SexprError {
    SexprError {
      offset: self.offset,
      message,
    }
  }

  fn bump(&mut self) -> Option<char> {
    let c = self.chars.next()?;
    self.offset += c.len_utf8();
    Some(c)
  }

  fn skip_ws(&mut self) {
    while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
      self.bump();
    }
  }

  fn string(&mut self) -> Result<String, SexprError> {
    // Opening quote.
    self.bump();
    let mut out = String::new();
    loop {
      match self.bump() {
        None => return Err(self.err("unterminated string")),
        Some('"') => return Ok(out),
        Some('\\') => match self.bump() {
          Some(c) => out.push(c),
          None => return Err(self.err("unterminated escape")),
        },
        Some(c) => out.push(c),
      }
    }
  }

  fn kind(&mut self) -> Result<String, SexprError> {
    let mut kind = String::new();
    while let Some(&c) = self.chars.peek() {
      if c.is_whitespace() || c == '(' || c == ')' || c == '"' {
        break;
      }
      kind.push(c);
      self.bump();
    }
    if kind.is_empty() {
      return Err(self.err("expected node kind"));
    }
    Ok(kind)
  }

  fn place(&mut self, text: &str) -> Loc {
    let loc = Loc(self.pos, self.pos + text.len());
    self.pos += text.len() + 1;
    loc
  }

  // Tokens are placed as they are read so that siblings come out in source order.
  fn item(&mut self) -> Result<CstNode, SexprError> {
    self.skip_ws();
    match self.chars.peek() {
      Some('"') => {
        let text = self.string()?;
        let loc = self.place(&text);
        Ok(CstNode::token(infer_token_kind(&text), text, loc))
      }
      Some('(') => self.node(),
      Some(_) => Err(self.err("expected `(` or string")),
      None => Err(self.err("unexpected end")),
    }
  }

  fn node(&mut self) -> Result<CstNode, SexprError> {
    self.bump();
    let kind = self.kind()?;
    let mut children = Vec::new();
    loop {
      self.skip_ws();
      match self.chars.peek() {
        Some(')') => {
          self.bump();
          break;
        }
        None => return Err(self.err("unclosed node")),
        _ => {}
      };
      children.push(self.item()?);
    }
    // `(Kind "text")` is a token of that kind when `Kind` is a token kind; otherwise it is a
    // production wrapping an inferred token, e.g. `(IdentifierReference "a")`.
    if children.len() == 1 && children[0].is_token() && TOKEN_KINDS.contains(&kind.as_str()) {
      let tok = children.remove(0);
      return Ok(CstNode {
        kind,
        value: tok.value,
        children: Vec::new(),
        loc: tok.loc,
      });
    }
    let loc = match (children.first(), children.last()) {
      (Some(first), Some(last)) => first.loc + last.loc,
      _ => Loc(self.pos, self.pos),
    };
    Ok(CstNode::node(kind, loc, children))
  }
}

impl CstNode {
  pub fn from_sexpr(src: &str) -> Result<CstNode, SexprError> {
    let mut reader = Reader {
      chars: src.chars().peekable(),
      offset: 0,
      pos: 0,
    };
    reader.skip_ws();
    if reader.chars.peek() != Some(&'(') {
      return Err(reader.err("expected `(`"));
    }
    let node = reader.node()?;
    reader.skip_ws();
    if reader.chars.peek().is_some() {
      return Err(reader.err("trailing input"));
    }
    Ok(node)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn reads_nested_nodes_with_synthesized_locations() {
    let cst = CstNode::from_sexpr(r#"(AdditiveExpression (IdentifierReference "a") "+" (IdentifierReference "bc"))"#).unwrap();
    assert_eq!(cst.kind, "AdditiveExpression");
    assert_eq!(cst.children.len(), 3);
    let a = &cst.children[0];
    assert_eq!(a.kind, "IdentifierReference");
    assert_eq!(a.children[0].kind, "IdentifierName");
    assert_eq!(a.children[0].loc, Loc(0, 1));
    assert_eq!(cst.children[1].kind, "Punctuator");
    assert_eq!(cst.children[1].loc, Loc(2, 3));
    assert_eq!(cst.children[2].loc, Loc(4, 6));
    assert_eq!(cst.loc, Loc(0, 6));
  }

  #[test]
  fn explicit_token_kind() {
    let cst = CstNode::from_sexpr(r#"(Keyword "let")"#).unwrap();
    assert!(cst.is_token());
    assert_eq!(cst.kind, "Keyword");
    assert_eq!(cst.text(), "let");
  }

  #[test]
  fn infers_token_kinds() {
    assert_eq!(infer_token_kind("{"), "Punctuator");
    assert_eq!(infer_token_kind("if"), "Keyword");
    assert_eq!(infer_token_kind("get"), "IdentifierName");
    assert_eq!(infer_token_kind("12"), "NumericLiteral");
    assert_eq!(infer_token_kind("'s'"), "StringLiteral");
    assert_eq!(infer_token_kind("#p"), "PrivateIdentifier");
    assert_eq!(infer_token_kind("/a/g"), "RegularExpressionLiteral");
    assert_eq!(infer_token_kind("/="), "Punctuator");
  }

  #[test]
  fn rejects_unclosed_input() {
    assert!(CstNode::from_sexpr("(Script").is_err());
    assert!(CstNode::from_sexpr("(Script) x").is_err());
  }
}
