//! Member access, calls, `new`, tagged templates and optional chains. The grammar gives these as a
//! base followed by a flat run of suffixes, which are folded left onto the base.

use super::lit::id_node;
use super::router::wrapped;
use super::router::WRAPPER_KINDS;
use super::tokens::list_slots;
use super::tokens::tok;
use super::tokens::ListSlot;
use super::Lowerer;
use crate::ast::expr::CallExpr;
use crate::ast::expr::ChainExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::ExprOrSpread;
use crate::ast::expr::ImportExpr;
use crate::ast::expr::MemberExpr;
use crate::ast::expr::MetaPropExpr;
use crate::ast::expr::NewExpr;
use crate::ast::expr::SuperExpr;
use crate::ast::expr::TaggedTemplateExpr;
use crate::ast::list::ListElem;
use crate::ast::node::Node;
use crate::cst::CstNode;
use crate::error::LowerResult;
use crate::token::Token;

static TEMPLATE_KINDS: &[&str] = &["NoSubstitutionTemplate", "TemplateLiteral"];

pub struct Arguments {
  pub list: Vec<ListElem<ExprOrSpread>>,
  pub open_paren: Option<Token>,
  pub close_paren: Option<Token>,
}

fn flatten_chain<'a>(node: &'a CstNode, out: &mut Vec<&'a CstNode>) {
  for c in node.children.iter() {
    if c.is("OptionalChain") {
      flatten_chain(c, out);
    } else {
      out.push(c);
    }
  }
}

impl<'s> Lowerer<'s> {
  pub fn arguments(&mut self, node: &CstNode) -> LowerResult<Arguments> {
    let mut list = Vec::new();
    for ListSlot { item, comma } in list_slots(node) {
      let item = item.ok_or_else(|| node.malformed("argument"))?;
      list.push(ListElem::new(self.expr_or_spread(item)?, comma));
    }
    Ok(Arguments {
      list,
      open_paren: tok(node, "("),
      close_paren: tok(node, ")"),
    })
  }

  /// Folds `suffixes` onto `acc`, one link per suffix.
  fn fold_suffixes(
    &mut self,
    node: &CstNode,
    mut acc: Expr,
    suffixes: &[&CstNode],
  ) -> LowerResult<Expr> {
    let mut question_dot: Option<&CstNode> = None;
    let mut i = 0;
    while let Some(&s) = suffixes.get(i) {
      let optional = question_dot.is_some();
      if s.is_tok("?.") {
        question_dot = Some(s);
        i += 1;
        continue;
      }
      if s.is_tok("[") {
        let prop = suffixes.get(i + 1).ok_or_else(|| node.malformed("computed member"))?;
        let close = suffixes
          .get(i + 2)
          .filter(|c| c.is_tok("]"))
          .ok_or_else(|| node.malformed("`]`"))?;
        let property = self.expr(prop)?;
        acc = Expr::Member(Node::new(acc.loc() + close.loc, MemberExpr {
          object: acc,
          property,
          computed: true,
          optional,
          dot: question_dot.map(Token::from_cst),
          open_bracket: Some(Token::from_cst(s)),
          close_bracket: Some(Token::from_cst(close)),
        }));
        i += 3;
      } else if s.is("Arguments") {
        let args = self.arguments(s)?;
        acc = Expr::Call(Node::new(acc.loc() + s.loc, CallExpr {
          callee: acc,
          arguments: args.list,
          optional,
          question_dot: question_dot.map(Token::from_cst),
          open_paren: args.open_paren,
          close_paren: args.close_paren,
        }));
        i += 1;
      } else if s.is_any(TEMPLATE_KINDS) {
        let quasi = self.template(s)?;
        acc = Expr::TaggedTemplate(Node::new(acc.loc() + s.loc, TaggedTemplateExpr {
          tag: acc,
          quasi,
        }));
        i += 1;
      } else {
        // `.name`, or the name right after `?.`.
        let (dot, name) = if s.is_tok(".") {
          let name = suffixes.get(i + 1).ok_or_else(|| node.malformed("property name"))?;
          i += 2;
          (Some(s), *name)
        } else if optional {
          i += 1;
          (question_dot, s)
        } else {
          return Err(s.unsupported());
        };
        let property = if name.is("PrivateIdentifier") || name.text().starts_with('#') {
          self.private_name(name)?
        } else {
          Expr::Id(id_node(name)?)
        };
        acc = Expr::Member(Node::new(acc.loc() + name.loc, MemberExpr {
          object: acc,
          property,
          computed: false,
          optional,
          dot: dot.map(Token::from_cst),
          open_bracket: None,
          close_bracket: None,
        }));
      }
      question_dot = None;
    }
    Ok(acc)
  }

  /// `MemberExpression`, `CallExpression` and `CoverCallExpressionAndAsyncArrowHead`.
  pub fn member_or_call(&mut self, node: &CstNode) -> LowerResult<Expr> {
    if node.children.first().is_some_and(|c| c.is_tok("new")) {
      return self.new_expr(node);
    }
    let (base, suffixes) = node
      .children
      .split_first()
      .ok_or_else(|| node.malformed("object or callee"))?;
    let acc = self.expr(base)?;
    let suffixes: Vec<&CstNode> = suffixes.iter().collect();
    self.fold_suffixes(node, acc, &suffixes)
  }

  /// `SuperProperty` and `SuperCall`.
  pub fn super_property(&mut self, node: &CstNode) -> LowerResult<Expr> {
    let (sup, suffixes) = node
      .children
      .split_first()
      .filter(|(sup, _)| sup.is_tok("super"))
      .ok_or_else(|| node.malformed("`super`"))?;
    let acc = Expr::Super(Node::new(sup.loc, SuperExpr {}));
    let suffixes: Vec<&CstNode> = suffixes.iter().collect();
    self.fold_suffixes(node, acc, &suffixes)
  }

  pub fn super_call(&mut self, node: &CstNode) -> LowerResult<Expr> {
    self.super_property(node)
  }

  pub fn new_expr(&mut self, node: &CstNode) -> LowerResult<Expr> {
    let Some(new_pos) = node.tok_pos("new") else {
      let inner = node.single_node().ok_or_else(|| node.malformed("new expression"))?;
      return self.expr(inner);
    };
    let callee = node.children[new_pos + 1..]
      .iter()
      .find(|c| !c.is_token())
      .ok_or_else(|| node.malformed("constructor"))?;
    let callee = self.expr(callee)?;
    let args = match node.child("Arguments") {
      Some(args) => self.arguments(args)?,
      None => Arguments {
        list: Vec::new(),
        open_paren: None,
        close_paren: None,
      },
    };
    Ok(Expr::New(Node::new(node.loc, NewExpr {
      callee,
      arguments: args.list,
      new_keyword: tok(node, "new"),
      open_paren: args.open_paren,
      close_paren: args.close_paren,
    })))
  }

  /// `new.target` and `import.meta`.
  pub fn meta_property(&mut self, node: &CstNode) -> LowerResult<Expr> {
    let names: Vec<&CstNode> = node.children.iter().filter(|c| !c.is_tok(".")).collect();
    let [meta, property] = names.as_slice() else {
      return Err(node.malformed("meta and property names"));
    };
    Ok(Expr::MetaProp(Node::new(node.loc, MetaPropExpr {
      meta: id_node(meta)?,
      property: id_node(property)?,
    })))
  }

  pub fn import_call(&mut self, node: &CstNode) -> LowerResult<Expr> {
    let operands: Vec<&CstNode> = match node.child("Arguments") {
      Some(args) => list_slots(args).into_iter().filter_map(|s| s.item).map(|i| i.node()).collect(),
      None => node.nodes().collect(),
    };
    let (source, options) = match operands.as_slice() {
      [source] => (self.expr(source)?, None),
      [source, options] => (self.expr(source)?, Some(self.expr(options)?)),
      _ => return Err(node.malformed("import source")),
    };
    Ok(Expr::Import(Node::new(node.loc, ImportExpr {
      source,
      options,
      keyword: tok(node, "import"),
    })))
  }

  /// `a?.b.c` as one `ChainExpression` whose links after `?.` are flagged optional.
  pub fn optional_expr(&mut self, node: &CstNode) -> LowerResult<Expr> {
    let (base, rest) = node
      .children
      .split_first()
      .ok_or_else(|| node.malformed("optional chain base"))?;
    let mut inner = base;
    while inner.is_any(WRAPPER_KINDS) {
      inner = wrapped(inner)?;
    }
    let acc = match self.expr(base)? {
      // `a?.b?.c` nests; there is only one chain. A parenthesized chain keeps its boundary.
      Expr::Chain(chain) if inner.is("OptionalExpression") => chain.stx.expression,
      other => other,
    };
    let mut suffixes = Vec::new();
    for c in rest {
      if c.is("OptionalChain") {
        flatten_chain(c, &mut suffixes);
      } else {
        suffixes.push(c);
      }
    }
    let expression = self.fold_suffixes(node, acc, &suffixes)?;
    Ok(Expr::Chain(Node::new(node.loc, ChainExpr { expression })))
  }
}
