use super::lit::id_pat_node;
use super::tokens::comma_slots;
use super::tokens::tok;
use super::tokens::ListItem;
use super::tokens::ListSlot;
use super::tokens::LIST_KINDS;
use super::Lowerer;
use crate::ast::decl::FuncDecl;
use crate::ast::expr::ArrowBody;
use crate::ast::expr::ArrowFuncExpr;
use crate::ast::expr::FuncExpr;
use crate::ast::func::Function;
use crate::ast::list::ListElem;
use crate::ast::node::Node;
use crate::ast::pat::Pat;
use crate::ast::pat::RestPat;
use crate::ast::stmt::BlockStmt;
use crate::cst::CstNode;
use crate::error::LowerResult;
use crate::token::Token;
use crate::Dialect;

/// Groupings a parameter list may arrive in.
static PARAM_GROUPS: &[&str] = &[
  "ArrowFormalParameters",
  "FormalParameters",
  "PropertySetParameterList",
  "UniqueFormalParameters",
];

/// Productions only the typed dialect attaches to a function head. The base lowering steps over
/// them.
pub static TYPED_HEAD_KINDS: &[&str] = &["TypeAnnotation", "TypeParameters"];

static CONCISE_BODY_KINDS: &[&str] = &["AsyncConciseBody", "ConciseBody"];

fn flatten_params<'a>(children: &'a [CstNode], out: &mut Vec<&'a CstNode>) {
  for c in children {
    if !c.is_token() && (c.is_any(PARAM_GROUPS) || c.is_any(LIST_KINDS)) {
      flatten_params(&c.children, out);
    } else if !c.is_tok_any(&["(", ")"]) {
      out.push(c);
    }
  }
}

// Reads the items of a cover list (`Expression` operands with commas) for arrow parameters.
fn flatten_cover<'a>(children: &'a [CstNode], out: &mut Vec<&'a CstNode>) {
  for c in children {
    if c.is("Expression") {
      flatten_cover(&c.children, out);
    } else if !c.is_tok_any(&["(", ")"]) {
      out.push(c);
    }
  }
}

/// Position of the `)` closing the parameter list opened at `open`.
pub fn close_paren_pos(node: &CstNode, open: usize) -> LowerResult<usize> {
  node.children[open..]
    .iter()
    .position(|c| c.is_tok(")"))
    .map(|p| p + open)
    .ok_or_else(|| node.malformed("`)`"))
}

impl<'s> Lowerer<'s> {
  /// Formal parameters given as the children between a function's parentheses.
  pub fn params(&mut self, node: &CstNode, children: &[CstNode]) -> LowerResult<Vec<ListElem<Pat>>> {
    let mut flat = Vec::new();
    flatten_params(children, &mut flat);
    let mut params = Vec::new();
    for ListSlot { item, comma } in comma_slots(&flat) {
      let param = match item {
        None => return Err(node.malformed("parameter")),
        Some(ListItem::Elem(n)) => self.pat(n)?,
        Some(ListItem::Spread(dots, n)) => Pat::Rest(Node::new(dots.loc + n.loc, RestPat {
          argument: self.pat(n)?,
          ts: None,
          ellipsis: Some(Token::from_cst(dots)),
        })),
      };
      params.push(ListElem::new(param, comma));
    }
    Ok(params)
  }

  /// Reads cover items (an arrow head written as a parenthesized expression, or the arguments of
  /// an `async(...)` head) as parameters.
  fn cover_params(&mut self, node: &CstNode, items: &[&CstNode]) -> LowerResult<Vec<ListElem<Pat>>> {
    let mut params = Vec::new();
    for ListSlot { item, comma } in comma_slots(items) {
      let param = match item {
        None => return Err(node.malformed("parameter")),
        Some(ListItem::Elem(n)) if n.is("SpreadElement") => {
          let target = n.require_node("rest target")?;
          Pat::Rest(Node::new(n.loc, RestPat {
            argument: self.pat(target)?,
            ts: None,
            ellipsis: tok(n, "..."),
          }))
        }
        Some(ListItem::Elem(n)) => self
          .cover_pat(n)?
          .map_err(|_| n.malformed("arrow parameter"))?,
        Some(ListItem::Spread(dots, n)) => Pat::Rest(Node::new(dots.loc + n.loc, RestPat {
          argument: self.pat(n)?,
          ts: None,
          ellipsis: Some(Token::from_cst(dots)),
        })),
      };
      params.push(ListElem::new(param, comma));
    }
    Ok(params)
  }

  /// Every function flavour, and the function value of a method. Modifiers are only read before
  /// the parameter list.
  pub fn base_function(&mut self, node: &CstNode) -> LowerResult<Function> {
    let open = node.tok_pos("(").ok_or_else(|| node.malformed("parameter list"))?;
    let close = close_paren_pos(node, open)?;
    let head = &node.children[..open];
    let head_tok = |text: &str| head.iter().find(|c| c.is_tok(text)).map(Token::from_cst);
    let id = match head.iter().find(|c| c.is("BindingIdentifier")) {
      Some(id) => Some(id_pat_node(id)?),
      None => None,
    };
    let params = self.params(node, &node.children[open + 1..close])?;
    let rest = &node.children[close + 1..];
    let body = if !rest.iter().any(|c| c.is_tok("{")) && self.strategy().dialect() == Dialect::Ts {
      // Overload and ambient signatures end at the parameter list (or its return type).
      Node::new(node.loc.at_end(), BlockStmt::empty())
    } else {
      self.braced_block(node, rest, true)?
    };
    let async_keyword = head_tok("async");
    let star = head_tok("*");
    Ok(Function {
      id,
      params,
      body,
      async_: async_keyword.is_some(),
      generator: star.is_some(),
      ts: None,
      async_keyword,
      function_keyword: head_tok("function"),
      star,
      open_paren: Some(Token::from_cst(&node.children[open])),
      close_paren: Some(Token::from_cst(&node.children[close])),
    })
  }

  pub fn func_expr(&mut self, node: &CstNode) -> LowerResult<Node<FuncExpr>> {
    let func = self.strategy().function(self, node)?;
    Ok(Node::new(node.loc, FuncExpr { func }))
  }

  pub fn func_decl(&mut self, node: &CstNode) -> LowerResult<Node<FuncDecl>> {
    let func = self.strategy().function(self, node)?;
    Ok(Node::new(node.loc, FuncDecl { func }))
  }

  pub fn base_arrow_function(&mut self, node: &CstNode) -> LowerResult<Node<ArrowFuncExpr>> {
    let arrow_pos = node.tok_pos("=>").ok_or_else(|| node.malformed("`=>`"))?;
    let head = &node.children[..arrow_pos];
    let mut async_keyword = head.iter().find(|c| c.is_tok("async")).map(Token::from_cst);
    let params_node = head
      .iter()
      .rev()
      .find(|c| !c.is_token() && !c.is_any(TYPED_HEAD_KINDS))
      .ok_or_else(|| node.malformed("arrow parameters"))?;
    let head = self.arrow_head(params_node)?;
    if head.async_keyword.is_some() {
      async_keyword = head.async_keyword;
    }
    let body = self.concise_body(node, &node.children[arrow_pos + 1..])?;
    Ok(Node::new(node.loc, ArrowFuncExpr {
      id: (),
      params: head.params,
      expression: matches!(body, ArrowBody::Expr(_)),
      body,
      async_: async_keyword.is_some(),
      generator: false,
      ts: None,
      async_keyword,
      open_paren: head.open_paren,
      close_paren: head.close_paren,
      arrow: Some(Token::from_cst(&node.children[arrow_pos])),
    }))
  }

  fn arrow_head(&mut self, node: &CstNode) -> LowerResult<ArrowHead> {
    let mut head = ArrowHead {
      params: Vec::new(),
      async_keyword: None,
      open_paren: tok(node, "("),
      close_paren: tok(node, ")"),
    };
    match node.kind.as_str() {
      "ArrowParameters" => {
        let mut inner = node.nodes();
        match (inner.next(), inner.next()) {
          (Some(only), None) => return self.arrow_head(only),
          // `() =>` written as bare parens.
          (None, _) if head.open_paren.is_some() && head.close_paren.is_some() => {}
          _ => return Err(node.malformed("arrow parameters")),
        }
      }
      "CoverParenthesizedExpressionAndArrowParameterList" => {
        let mut items = Vec::new();
        flatten_cover(&node.children, &mut items);
        head.params = self.cover_params(node, &items)?;
      }
      "ArrowFormalParameters" => {
        head.params = self.params(node, &node.children)?;
      }
      "AsyncArrowHead" => {
        head.async_keyword = tok(node, "async");
        let inner = node.require_node("arrow parameters")?;
        let inner = self.arrow_head(inner)?;
        head.params = inner.params;
        head.open_paren = inner.open_paren;
        head.close_paren = inner.close_paren;
      }
      "CoverCallExpressionAndAsyncArrowHead" => {
        // `async(a, b)`: the callee is the `async` keyword and the arguments are the parameters.
        let callee = node.require_node("async keyword")?;
        let args = node.require("Arguments")?;
        head.async_keyword = super::lit::name_token(callee).ok().map(Token::from_cst);
        let mut items = Vec::new();
        flatten_cover_args(args, &mut items);
        head.params = self.cover_params(node, &items)?;
        head.open_paren = tok(args, "(");
        head.close_paren = tok(args, ")");
      }
      _ => {
        head.params = vec![ListElem::bare(self.pat(node)?)];
      }
    }
    Ok(head)
  }

  fn concise_body(&mut self, node: &CstNode, rest: &[CstNode]) -> LowerResult<ArrowBody> {
    if rest.first().is_some_and(|c| c.is_tok("{")) {
      return self.braced_block(node, rest, true).map(ArrowBody::Block);
    }
    let body = rest
      .iter()
      .find(|c| !c.is_token())
      .ok_or_else(|| node.malformed("arrow body"))?;
    if body.is_any(CONCISE_BODY_KINDS) {
      return self.concise_body(body, &body.children);
    }
    self.expr(body).map(ArrowBody::Expr)
  }
}

struct ArrowHead {
  params: Vec<ListElem<Pat>>,
  async_keyword: Option<Token>,
  open_paren: Option<Token>,
  close_paren: Option<Token>,
}

fn flatten_cover_args<'a>(args: &'a CstNode, out: &mut Vec<&'a CstNode>) {
  for c in args.children.iter() {
    if !c.is_token() && c.is("ArgumentList") {
      flatten_cover_args(c, out);
    } else if !c.is_tok_any(&["(", ")"]) {
      out.push(c);
    }
  }
}
