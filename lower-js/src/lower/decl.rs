use super::expr::initializer;
use super::func::TYPED_HEAD_KINDS;
use super::lit::id_node;
use super::lit::id_pat_node;
use super::tokens::comma_slots;
use super::tokens::list_slots;
use super::tokens::tok;
use super::tokens::ListItem;
use super::tokens::ListSlot;
use super::tokens::LIST_KINDS;
use super::Lowerer;
use crate::ast::decl::VarDecl;
use crate::ast::decl::VarDeclKind;
use crate::ast::decl::VarDeclarator;
use crate::ast::expr::Expr;
use crate::ast::expr::PropKind;
use crate::ast::expr::Property;
use crate::ast::list::ListElem;
use crate::ast::node::Node;
use crate::ast::pat::ArrPat;
use crate::ast::pat::AssignPat;
use crate::ast::pat::ObjPat;
use crate::ast::pat::ObjPatMember;
use crate::ast::pat::Pat;
use crate::ast::pat::RestPat;
use crate::cst::CstNode;
use crate::error::LowerResult;
use crate::token::Token;

static DECLARATION_KEYWORDS: &[&str] = &["const", "let", "var"];

/// Declaration productions read through when collecting declarators.
static DECLARATION_GROUPS: &[&str] = &["ForDeclaration", "LexicalDeclaration", "VariableStatement"];

static DECLARATOR_KINDS: &[&str] = &["LexicalBinding", "VariableDeclaration"];

#[derive(Default)]
struct DeclarationParts<'a> {
  keyword: Option<&'a CstNode>,
  semicolon: Option<&'a CstNode>,
  // Declarator nodes and the commas between them.
  items: Vec<&'a CstNode>,
}

fn declaration_parts<'a>(children: &[&'a CstNode], parts: &mut DeclarationParts<'a>) {
  for &c in children {
    if c.is_tok_any(DECLARATION_KEYWORDS) {
      parts.keyword.get_or_insert(c);
    } else if c.is("LetOrConst") {
      if let Some(kw) = c.tokens().next() {
        parts.keyword.get_or_insert(kw);
      }
    } else if c.is_tok(";") {
      parts.semicolon = Some(c);
    } else if c.is_tok(",") {
      parts.items.push(c);
    } else if c.is_token() {
      continue;
    } else if c.is_any(LIST_KINDS) || c.is_any(DECLARATION_GROUPS) {
      let inner: Vec<&CstNode> = c.children.iter().collect();
      declaration_parts(&inner, parts);
    } else {
      parts.items.push(c);
    }
  }
}

/// The node a binding element wraps, skipping its initializer and any annotation.
fn binding_target(node: &CstNode) -> LowerResult<&CstNode> {
  node
    .nodes()
    .find(|c| !c.is("Initializer") && !c.is_any(TYPED_HEAD_KINDS))
    .ok_or_else(|| node.malformed("binding target"))
}

impl<'s> Lowerer<'s> {
  /// `VariableStatement` and `LexicalDeclaration`.
  pub fn var_decl(&mut self, node: &CstNode) -> LowerResult<Node<VarDecl>> {
    let children: Vec<&CstNode> = node.children.iter().collect();
    let decl = self.declaration_list(node, &children)?;
    Ok(Node { loc: node.loc, ..decl })
  }

  /// A declaration spread over `items`, which need not belong to one node: a `for` head holds
  /// `var` and its declarators directly.
  pub fn declaration_list(&mut self, node: &CstNode, items: &[&CstNode]) -> LowerResult<Node<VarDecl>> {
    let mut parts = DeclarationParts::default();
    declaration_parts(items, &mut parts);
    let keyword = parts.keyword.ok_or_else(|| node.malformed("`var`, `let` or `const`"))?;
    let kind = VarDeclKind::from_keyword(keyword.text())
      .ok_or_else(|| keyword.malformed("`var`, `let` or `const`"))?;
    let mut declarations = Vec::new();
    for ListSlot { item, comma } in comma_slots(&parts.items) {
      let declarator = match item {
        Some(ListItem::Elem(n)) => self.declarator(n)?,
        _ => return Err(node.malformed("declarator")),
      };
      declarations.push(ListElem::new(declarator, comma));
    }
    let last = declarations
      .last()
      .map(|d| d.elem.loc)
      .ok_or_else(|| node.malformed("declarator"))?;
    let end = parts.semicolon.map_or(last, |semi| last + semi.loc);
    Ok(Node::new(keyword.loc + end, VarDecl {
      declarations,
      kind,
      ts: None,
      keyword: Some(Token::from_cst(keyword)),
      semicolon: parts.semicolon.map(Token::from_cst),
    }))
  }

  fn declarator(&mut self, node: &CstNode) -> LowerResult<Node<VarDeclarator>> {
    if node.is_any(DECLARATOR_KINDS) {
      return self.strategy().variable_declarator(self, node);
    }
    // The binding of a `for (let x of ...)` head.
    let id = self.pat(node)?;
    Ok(Node::new(node.loc, VarDeclarator {
      id,
      init: None,
      eq: None,
    }))
  }

  pub fn base_variable_declarator(&mut self, node: &CstNode) -> LowerResult<Node<VarDeclarator>> {
    let target = binding_target(node)?;
    let id = self.pat(target)?;
    let (eq, init) = match initializer(node) {
      Some((eq, value)) => (Some(Token::from_cst(eq)), Some(self.expr(value)?)),
      None => (None, None),
    };
    Ok(Node::new(node.loc, VarDeclarator { id, init, eq }))
  }

  /// Binding productions: identifiers, object and array patterns and their elements.
  pub fn binding(&mut self, node: &CstNode) -> LowerResult<Pat> {
    match node.kind.as_str() {
      "BindingIdentifier" => Ok(Pat::Id(id_pat_node(node)?)),
      "ObjectBindingPattern" => self.object_binding(node),
      "ArrayBindingPattern" => self.array_binding(node),
      "BindingElement" | "SingleNameBinding" | "FormalParameter" | "BindingRestElement"
      | "FunctionRestParameter" => self.strategy().binding_element(self, node),
      "BindingPattern" | "CatchParameter" | "ForBinding" => {
        let inner = node.require_node("binding")?;
        self.pat(inner)
      }
      _ => Err(node.unsupported()),
    }
  }

  pub fn base_binding_element(&mut self, node: &CstNode) -> LowerResult<Pat> {
    match node.kind.as_str() {
      "FormalParameter" | "FunctionRestParameter" => {
        let inner = binding_target(node)?;
        self.pat(inner)
      }
      "BindingRestElement" => {
        let target = binding_target(node)?;
        Ok(Pat::Rest(Node::new(node.loc, RestPat {
          argument: self.pat(target)?,
          ts: None,
          ellipsis: tok(node, "..."),
        })))
      }
      _ => {
        let target = binding_target(node)?;
        let left = self.pat(target)?;
        match initializer(node) {
          Some((eq, value)) => Ok(Pat::Assign(Node::new(node.loc, AssignPat {
            left,
            right: self.expr(value)?,
            eq: Some(Token::from_cst(eq)),
          }))),
          None => Ok(left),
        }
      }
    }
  }

  fn object_binding(&mut self, node: &CstNode) -> LowerResult<Pat> {
    let mut properties = Vec::new();
    for ListSlot { item, comma } in list_slots(node) {
      let member = match item {
        None => return Err(node.malformed("binding property")),
        Some(ListItem::Spread(dots, n)) => ObjPatMember::Rest(Node::new(dots.loc + n.loc, RestPat {
          argument: self.pat(n)?,
          ts: None,
          ellipsis: Some(Token::from_cst(dots)),
        })),
        Some(ListItem::Elem(n)) => self.binding_property(n)?,
      };
      properties.push(ListElem::new(member, comma));
    }
    Ok(Pat::Obj(Node::new(node.loc, ObjPat {
      properties,
      ts: None,
      open_brace: tok(node, "{"),
      close_brace: tok(node, "}"),
    })))
  }

  fn binding_property(&mut self, node: &CstNode) -> LowerResult<ObjPatMember> {
    if node.is("BindingRestProperty") {
      let target = node.require_node("rest target")?;
      return Ok(ObjPatMember::Rest(Node::new(node.loc, RestPat {
        argument: self.pat(target)?,
        ts: None,
        ellipsis: tok(node, "..."),
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
      let value = self.pat(value)?;
      return Ok(ObjPatMember::Prop(Node::new(node.loc, Property {
        key,
        value,
        kind: PropKind::Init,
        method: false,
        shorthand: false,
        computed,
        colon: Some(Token::from_cst(&node.children[colon_pos])),
      })));
    }
    if node.is("BindingProperty") {
      let inner = node.require_node("binding property")?;
      let member = self.binding_property(inner)?;
      return Ok(match member {
        ObjPatMember::Prop(prop) => ObjPatMember::Prop(Node {
          loc: node.loc,
          ..prop
        }),
        rest => rest,
      });
    }
    // `{ a }` and `{ a = 1 }`.
    let name = if node.is("BindingIdentifier") {
      node
    } else {
      node.require("BindingIdentifier")?
    };
    let key = Expr::Id(id_node(name)?);
    let value = self.pat(node)?;
    Ok(ObjPatMember::Prop(Node::new(node.loc, Property {
      key,
      value,
      kind: PropKind::Init,
      method: false,
      shorthand: true,
      computed: false,
      colon: None,
    })))
  }

  fn array_binding(&mut self, node: &CstNode) -> LowerResult<Pat> {
    let mut elements = Vec::new();
    for ListSlot { item, comma } in list_slots(node) {
      let elem = match item {
        None => None,
        Some(ListItem::Elem(n)) => Some(self.pat(n)?),
        Some(ListItem::Spread(dots, n)) => Some(Pat::Rest(Node::new(dots.loc + n.loc, RestPat {
          argument: self.pat(n)?,
          ts: None,
          ellipsis: Some(Token::from_cst(dots)),
        }))),
      };
      elements.push(ListElem::new(elem, comma));
    }
    Ok(Pat::Arr(Node::new(node.loc, ArrPat {
      elements,
      ts: None,
      open_bracket: tok(node, "["),
      close_bracket: tok(node, "]"),
    })))
  }
}
