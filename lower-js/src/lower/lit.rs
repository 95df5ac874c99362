use super::Lowerer;
use crate::ast::expr::Expr;
use crate::ast::expr::IdExpr;
use crate::ast::expr::PrivateNameExpr;
use crate::ast::expr::SuperExpr;
use crate::ast::expr::TemplateExpr;
use crate::ast::expr::ThisExpr;
use crate::ast::lit::LitBigIntExpr;
use crate::ast::lit::LitBoolExpr;
use crate::ast::lit::LitNullExpr;
use crate::ast::lit::LitNumExpr;
use crate::ast::lit::LitRegexExpr;
use crate::ast::lit::LitStrExpr;
use crate::ast::lit::RegexValue;
use crate::ast::lit::TemplateElement;
use crate::ast::lit::TemplateValue;
use crate::ast::node::Node;
use crate::ast::pat::IdPat;
use crate::cst::CstNode;
use crate::error::LowerResult;
use crate::literal::normalise_literal_string;
use crate::literal::split_regex;
use crate::literal::template_cooked;
use crate::literal::template_raw;
use crate::loc::Loc;
use crate::num::normalise_literal_bigint;
use crate::num::JsNumber;

static TEMPLATE_CHUNKS: &[&str] = &[
  "NoSubstitutionTemplate",
  "TemplateHead",
  "TemplateMiddle",
  "TemplateTail",
];

// Groupings inside a template literal that are read through.
static TEMPLATE_GROUPS: &[&str] = &["TemplateSpans", "TemplateMiddleList", "SubstitutionTemplate"];

/// The token carrying a name: the node itself, its first token, or the first token of its only
/// child production (`BindingIdentifier -> Identifier -> "x"`).
pub fn name_token(node: &CstNode) -> LowerResult<&CstNode> {
  if node.is_token() {
    return Ok(node);
  }
  if let Some(tok) = node.tokens().next() {
    return Ok(tok);
  }
  match node.single_node() {
    Some(inner) => name_token(inner),
    None => Err(node.malformed("name token")),
  }
}

pub fn id_node(node: &CstNode) -> LowerResult<Node<IdExpr>> {
  let tok = name_token(node)?;
  Ok(Node::new(node.loc, IdExpr {
    name: tok.text().to_string(),
  }))
}

pub fn id_pat_node(node: &CstNode) -> LowerResult<Node<IdPat>> {
  let tok = name_token(node)?;
  Ok(Node::new(node.loc, IdPat {
    name: tok.text().to_string(),
    ts: None,
  }))
}

/// Lowers a string literal in a position that only admits strings (module specifiers, import
/// attribute values).
pub fn string_literal(node: &CstNode) -> LowerResult<Node<LitStrExpr>> {
  let tok = name_token(node)?;
  let raw = tok.text();
  let value = normalise_literal_string(raw).map_err(|_| tok.malformed("string literal"))?;
  Ok(Node::new(node.loc, LitStrExpr {
    value,
    raw: raw.to_string(),
  }))
}

pub fn literal_token(tok: &CstNode, loc: Loc) -> LowerResult<Expr> {
  let raw = tok.text();
  let raw_owned = raw.to_string();
  let expr = match raw {
    "true" | "false" => Expr::LitBool(Node::new(loc, LitBoolExpr {
      value: raw == "true",
      raw: raw_owned,
    })),
    "null" => Expr::LitNull(Node::new(loc, LitNullExpr {
      value: (),
      raw: raw_owned,
    })),
    _ if raw.starts_with('"') || raw.starts_with('\'') => {
      let value = normalise_literal_string(raw).map_err(|_| tok.malformed("string literal"))?;
      Expr::LitStr(Node::new(loc, LitStrExpr {
        value,
        raw: raw_owned,
      }))
    }
    _ if tok.is("RegularExpressionLiteral") || raw.starts_with('/') => {
      let (pattern, flags) = split_regex(raw).ok_or_else(|| tok.malformed("regex literal"))?;
      Expr::LitRegex(Node::new(loc, LitRegexExpr {
        value: (),
        regex: RegexValue {
          pattern: pattern.to_string(),
          flags: flags.to_string(),
        },
        raw: raw_owned,
      }))
    }
    _ if raw.ends_with('n') => {
      let bigint = normalise_literal_bigint(raw).ok_or_else(|| tok.malformed("bigint literal"))?;
      Expr::LitBigInt(Node::new(loc, LitBigIntExpr {
        value: (),
        raw: raw_owned,
        bigint,
      }))
    }
    _ => {
      let value = JsNumber::from_literal(raw).ok_or_else(|| tok.malformed("numeric literal"))?;
      Expr::LitNum(Node::new(loc, LitNumExpr {
        value,
        raw: raw_owned,
      }))
    }
  };
  Ok(expr)
}

fn flatten_template<'a>(node: &'a CstNode, out: &mut Vec<&'a CstNode>) {
  for c in node.children.iter() {
    if !c.is_token() && c.is_any(TEMPLATE_GROUPS) {
      flatten_template(c, out);
    } else {
      out.push(c);
    }
  }
}

fn template_element(tok: &CstNode) -> Node<TemplateElement> {
  let text = tok.text();
  let raw = template_raw(text);
  let lead = usize::from(text.starts_with('`') || text.starts_with('}'));
  let trail = if text.ends_with("${") {
    2
  } else {
    usize::from(text.ends_with('`') && text.len() > lead)
  };
  let loc = Loc(tok.loc.0 + lead, tok.loc.1.saturating_sub(trail).max(tok.loc.0 + lead));
  Node::new(loc, TemplateElement {
    value: TemplateValue {
      raw: raw.replace("\r\n", "\n").replace('\r', "\n"),
      cooked: template_cooked(raw),
    },
    tail: tok.is("NoSubstitutionTemplate") || tok.is("TemplateTail") || text.ends_with('`'),
  })
}

impl<'s> Lowerer<'s> {
  pub fn id_expr(&mut self, node: &CstNode) -> LowerResult<Expr> {
    id_node(node).map(Expr::Id)
  }

  pub fn private_name(&mut self, node: &CstNode) -> LowerResult<Expr> {
    let tok = name_token(node)?;
    let name = tok.text();
    Ok(Expr::PrivateName(Node::new(node.loc, PrivateNameExpr {
      name: name.strip_prefix('#').unwrap_or(name).to_string(),
    })))
  }

  /// `this`, `super`, `true`, `false` and `null`, as bare keyword tokens or wrapped.
  pub fn keyword_expr(&mut self, node: &CstNode) -> LowerResult<Expr> {
    let tok = name_token(node)?;
    match tok.text() {
      "this" => Ok(Expr::This(Node::new(node.loc, ThisExpr {}))),
      "super" => Ok(Expr::Super(Node::new(node.loc, SuperExpr {}))),
      "true" | "false" | "null" => literal_token(tok, node.loc),
      _ => Err(node.unsupported()),
    }
  }

  pub fn literal(&mut self, node: &CstNode) -> LowerResult<Expr> {
    if node.is_token() {
      return literal_token(node, node.loc);
    }
    if let Some(tok) = node.tokens().next() {
      return literal_token(tok, node.loc);
    }
    let inner = node.single_node().ok_or_else(|| node.malformed("literal token"))?;
    let lowered = self.literal(inner)?;
    Ok(relocate(lowered, node.loc))
  }

  pub fn template(&mut self, node: &CstNode) -> LowerResult<Node<TemplateExpr>> {
    if node.is_token() {
      return Ok(Node::new(node.loc, TemplateExpr {
        quasis: vec![template_element(node)],
        expressions: Vec::new(),
      }));
    }
    let mut parts = Vec::new();
    flatten_template(node, &mut parts);
    let mut quasis = Vec::new();
    let mut expressions = Vec::new();
    for part in parts {
      if part.is_token() && part.is_any(TEMPLATE_CHUNKS) {
        quasis.push(template_element(part));
      } else if !part.is_token() {
        expressions.push(self.expr(part)?);
      }
    }
    if quasis.len() != expressions.len() + 1 {
      return Err(node.malformed("template chunks around each substitution"));
    }
    Ok(Node::new(node.loc, TemplateExpr {
      quasis,
      expressions,
    }))
  }
}

/// Gives a literal the span of the production wrapping it.
fn relocate(expr: Expr, loc: Loc) -> Expr {
  match expr {
    Expr::LitBigInt(n) => Expr::LitBigInt(Node { loc, ..n }),
    Expr::LitBool(n) => Expr::LitBool(Node { loc, ..n }),
    Expr::LitNull(n) => Expr::LitNull(Node { loc, ..n }),
    Expr::LitNum(n) => Expr::LitNum(Node { loc, ..n }),
    Expr::LitRegex(n) => Expr::LitRegex(Node { loc, ..n }),
    Expr::LitStr(n) => Expr::LitStr(Node { loc, ..n }),
    other => other,
  }
}
