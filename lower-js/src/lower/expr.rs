use super::lit::id_node;
use super::lit::id_pat_node;
use super::lit::literal_token;
use super::lit::name_token;
use super::operator::operator_token;
use super::tokens::list_slots;
use super::tokens::tok;
use super::tokens::ListItem;
use super::Lowerer;
use crate::ast::expr::AssignExpr;
use crate::ast::expr::AssignTarget;
use crate::ast::expr::ArrayExpr;
use crate::ast::expr::AwaitExpr;
use crate::ast::expr::CondExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::ExprOrSpread;
use crate::ast::expr::ObjMember;
use crate::ast::expr::ObjectExpr;
use crate::ast::expr::PrivateNameExpr;
use crate::ast::expr::PropKind;
use crate::ast::expr::Property;
use crate::ast::expr::SeqExpr;
use crate::ast::expr::SpreadElement;
use crate::ast::expr::UnaryExpr;
use crate::ast::expr::UpdateExpr;
use crate::ast::expr::YieldExpr;
use crate::ast::list::ListElem;
use crate::ast::node::Node;
use crate::ast::pat::Pat;
use crate::cst::CstNode;
use crate::error::LowerResult;
use crate::loc::Loc;
use crate::token::Token;

/// Method-shaped productions, which lower to a function value.
pub static METHOD_KINDS: &[&str] = &[
  "AsyncGeneratorMethod",
  "AsyncMethod",
  "GeneratorMethod",
  "MethodDefinition",
];

/// The key a token names: an identifier, a private name, or a string or numeric literal.
fn key_token(tok: &CstNode, loc: Loc) -> LowerResult<Expr> {
  let text = tok.text();
  if tok.is("PrivateIdentifier") || text.starts_with('#') {
    return Ok(Expr::PrivateName(Node::new(loc, PrivateNameExpr {
      name: text.trim_start_matches('#').to_string(),
    })));
  }
  let literal = tok.is_any(&["StringLiteral", "NumericLiteral"])
    || text.starts_with(|c: char| c == '"' || c == '\'' || c == '.' || c.is_ascii_digit());
  if literal {
    return literal_token(tok, loc);
  }
  id_node(tok).map(|mut id| {
    id.loc = loc;
    Expr::Id(id)
  })
}

impl<'s> Lowerer<'s> {
  /// An object or class member key and whether it is computed.
  pub fn property_key(&mut self, node: &CstNode) -> LowerResult<(Expr, bool)> {
    if node.is_token() {
      return Ok((key_token(node, node.loc)?, false));
    }
    if node.is("ComputedPropertyName") {
      let inner = node.require_node("computed key expression")?;
      return Ok((self.expr(inner)?, true));
    }
    if let Some(inner) = node.single_node() {
      return self.property_key(inner);
    }
    let tok = node.tokens().next().ok_or_else(|| node.malformed("property key"))?;
    Ok((key_token(tok, node.loc)?, false))
  }

  /// `...expr` inside an array literal, argument list or object literal.
  pub fn spread_element(&mut self, node: &CstNode) -> LowerResult<Node<SpreadElement>> {
    let argument = node.require_node("spread argument")?;
    Ok(Node::new(node.loc, SpreadElement {
      argument: self.expr(argument)?,
      ellipsis: tok(node, "..."),
    }))
  }

  /// One item of an array literal or argument list.
  pub fn expr_or_spread(&mut self, item: ListItem<'_>) -> LowerResult<ExprOrSpread> {
    Ok(match item {
      ListItem::Elem(n) if n.is("SpreadElement") => ExprOrSpread::Spread(self.spread_element(n)?),
      ListItem::Elem(n) => ExprOrSpread::Expr(self.expr(n)?),
      ListItem::Spread(dots, n) => ExprOrSpread::Spread(Node::new(dots.loc + n.loc, SpreadElement {
        argument: self.expr(n)?,
        ellipsis: Some(Token::from_cst(dots)),
      })),
    })
  }

  pub fn array_literal(&mut self, node: &CstNode) -> LowerResult<Expr> {
    let mut elements = Vec::new();
    for slot in list_slots(node) {
      let elem = match slot.item {
        Some(item) => Some(self.expr_or_spread(item)?),
        None => None,
      };
      elements.push(ListElem::new(elem, slot.comma));
    }
    Ok(Expr::LitArr(Node::new(node.loc, ArrayExpr {
      elements,
      open_bracket: tok(node, "["),
      close_bracket: tok(node, "]"),
    })))
  }

  pub fn object_literal(&mut self, node: &CstNode) -> LowerResult<Expr> {
    let mut properties = Vec::new();
    for slot in list_slots(node) {
      let member = match slot.item {
        None => return Err(node.malformed("property definition")),
        Some(ListItem::Elem(n)) => self.property_definition(n)?,
        Some(ListItem::Spread(dots, n)) => ObjMember::Spread(Node::new(dots.loc + n.loc, SpreadElement {
          argument: self.expr(n)?,
          ellipsis: Some(Token::from_cst(dots)),
        })),
      };
      properties.push(ListElem::new(member, slot.comma));
    }
    Ok(Expr::LitObj(Node::new(node.loc, ObjectExpr {
      properties,
      open_brace: tok(node, "{"),
      close_brace: tok(node, "}"),
    })))
  }

  fn property_definition(&mut self, node: &CstNode) -> LowerResult<ObjMember> {
    if !node.is("PropertyDefinition") {
      return self.property_content(node);
    }
    if let Some(dots) = node.tok("...") {
      let argument = node.after_tok("...").ok_or_else(|| node.malformed("spread argument"))?;
      return Ok(ObjMember::Spread(Node::new(node.loc, SpreadElement {
        argument: self.expr(argument)?,
        ellipsis: Some(Token::from_cst(dots)),
      })));
    }
    if let Some(colon_pos) = node.tok_pos(":") {
      let key = node.children[..colon_pos]
        .iter()
        .rev()
        .find(|c| !c.is_token())
        .or_else(|| node.children.first())
        .ok_or_else(|| node.malformed("property name"))?;
      let value = node.children[colon_pos + 1..]
        .iter()
        .find(|c| !c.is_token())
        .ok_or_else(|| node.malformed("property value"))?;
      let (key, computed) = self.property_key(key)?;
      let value = self.expr(value)?;
      return Ok(ObjMember::Prop(Node::new(node.loc, Property {
        key,
        value,
        kind: PropKind::Init,
        method: false,
        shorthand: false,
        computed,
        colon: Some(Token::from_cst(&node.children[colon_pos])),
      })));
    }
    let inner = node.single_node().ok_or_else(|| node.malformed("property definition"))?;
    let member = self.property_content(inner)?;
    Ok(match member {
      ObjMember::Prop(prop) => ObjMember::Prop(Node {
        loc: node.loc,
        ..prop
      }),
      spread => spread,
    })
  }

  // Shorthand, cover-initialized and method properties.
  fn property_content(&mut self, node: &CstNode) -> LowerResult<ObjMember> {
    if node.is_any(METHOD_KINDS) {
      return self.object_method(node).map(ObjMember::Prop);
    }
    if node.is("CoverInitializedName") {
      let name = node.require_node("identifier")?;
      let (eq, init) = initializer(node).ok_or_else(|| node.malformed("initializer"))?;
      let id = id_node(name)?;
      let right = self.expr(init)?;
      let value = Expr::Assign(Node::new(node.loc, AssignExpr {
        operator: "=".to_string(),
        left: AssignTarget::Pat(Pat::Id(id_pat_node(name)?)),
        right,
        operator_token: Some(Token::from_cst(eq)),
      }));
      return Ok(ObjMember::Prop(Node::new(node.loc, Property {
        key: Expr::Id(id),
        value,
        kind: PropKind::Init,
        method: false,
        shorthand: true,
        computed: false,
        colon: None,
      })));
    }
    // `IdentifierReference`, or a bare name token.
    let name = name_token(node)?;
    let id = id_node(name)?;
    let loc = node.loc;
    Ok(ObjMember::Prop(Node::new(loc, Property {
      key: Expr::Id(Node { loc, ..id.clone() }),
      value: Expr::Id(Node { loc, ..id }),
      kind: PropKind::Init,
      method: false,
      shorthand: true,
      computed: false,
      colon: None,
    })))
  }

  pub fn parenthesized(&mut self, node: &CstNode) -> LowerResult<Expr> {
    if node.has_tok("...") {
      // A rest element only makes sense as an arrow parameter list.
      return Err(node.malformed("expression"));
    }
    let inner = node.require_node("parenthesized expression")?;
    self.expr(inner)
  }

  pub fn update_expr(&mut self, node: &CstNode) -> LowerResult<Expr> {
    let (op, operand, prefix) = match node.children.as_slice() {
      [single] => return self.expr(single),
      [op, operand] if op.is_token() => (op, operand, true),
      [operand, op] => (op, operand, false),
      _ => return Err(node.malformed("operator and operand")),
    };
    let argument = self.expr(operand)?;
    Ok(Expr::Update(Node::new(node.loc, UpdateExpr {
      operator: op.text().to_string(),
      prefix,
      argument,
      operator_token: Some(Token::from_cst(op)),
    })))
  }

  pub fn unary_expr(&mut self, node: &CstNode) -> LowerResult<Expr> {
    let (op, operand) = match node.children.as_slice() {
      [single] => return self.expr(single),
      [op, operand] => (operator_token(op)?, operand),
      _ => return Err(node.malformed("operator and operand")),
    };
    let argument = self.expr(operand)?;
    Ok(Expr::Unary(Node::new(node.loc, UnaryExpr {
      operator: op.text().to_string(),
      prefix: true,
      argument,
      operator_token: Some(Token::from_cst(op)),
    })))
  }

  pub fn await_expr(&mut self, node: &CstNode) -> LowerResult<Expr> {
    let operand = node.require_node("await operand")?;
    Ok(Expr::Await(Node::new(node.loc, AwaitExpr {
      argument: self.expr(operand)?,
      keyword: tok(node, "await"),
    })))
  }

  pub fn cond_expr(&mut self, node: &CstNode) -> LowerResult<Expr> {
    let parts: Vec<&CstNode> = node.nodes().collect();
    match parts.as_slice() {
      [single] if !node.has_tok("?") => self.expr(single),
      [test, consequent, alternate] => {
        let test = self.expr(test)?;
        let consequent = self.expr(consequent)?;
        let alternate = self.expr(alternate)?;
        Ok(Expr::Cond(Node::new(node.loc, CondExpr {
          test,
          consequent,
          alternate,
          question: tok(node, "?"),
          colon: tok(node, ":"),
        })))
      }
      _ => Err(node.malformed("test, consequent and alternate")),
    }
  }

  pub fn assign_expr(&mut self, node: &CstNode) -> LowerResult<Expr> {
    let (lhs, op, rhs) = match node.children.as_slice() {
      [single] => return self.expr(single),
      [lhs, op, rhs] => (lhs, operator_token(op)?, rhs),
      _ => return Err(node.malformed("target, operator and value")),
    };
    let operator = op.text().to_string();
    let left = if operator == "=" {
      self.assign_target(lhs)?
    } else {
      AssignTarget::Expr(self.expr(lhs)?)
    };
    let right = self.expr(rhs)?;
    Ok(Expr::Assign(Node::new(node.loc, AssignExpr {
      operator,
      left,
      right,
      operator_token: Some(Token::from_cst(op)),
    })))
  }

  pub fn yield_expr(&mut self, node: &CstNode) -> LowerResult<Expr> {
    let argument = match node.nodes().next() {
      Some(arg) => Some(self.expr(arg)?),
      None => None,
    };
    Ok(Expr::Yield(Node::new(node.loc, YieldExpr {
      argument,
      delegate: node.has_tok("*"),
      keyword: tok(node, "yield"),
    })))
  }

  /// `Expression`: a comma sequence, possibly left-recursive.
  pub fn seq_expr(&mut self, node: &CstNode) -> LowerResult<Expr> {
    let mut operands = Vec::new();
    flatten_sequence(node, &mut operands);
    match operands.as_slice() {
      [] => Err(node.malformed("expression")),
      [single] => self.expr(single),
      _ => {
        let expressions = operands
          .into_iter()
          .map(|o| self.expr(o))
          .collect::<LowerResult<Vec<_>>>()?;
        Ok(Expr::Seq(Node::new(node.loc, SeqExpr { expressions })))
      }
    }
  }
}

fn flatten_sequence<'a>(node: &'a CstNode, out: &mut Vec<&'a CstNode>) {
  for c in node.nodes() {
    if c.is("Expression") {
      flatten_sequence(c, out);
    } else {
      out.push(c);
    }
  }
}

/// The `=` token and value of an initializer, whether wrapped in an `Initializer` production or
/// written inline.
pub fn initializer(node: &CstNode) -> Option<(&CstNode, &CstNode)> {
  if let Some(init) = node.child("Initializer") {
    let eq = init.tok("=")?;
    let value = init.after_tok("=")?;
    return Some((eq, value));
  }
  let eq = node.tok("=")?;
  let value = node.after_tok("=")?;
  Some((eq, value))
}
