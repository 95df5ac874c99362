use super::expr::initializer;
use super::expr::METHOD_KINDS;
use super::lit::id_pat_node;
use super::tokens::tok;
use super::Lowerer;
use crate::ast::class::Class;
use crate::ast::class::ClassBody;
use crate::ast::class::ClassMember;
use crate::ast::class::MethodDef;
use crate::ast::class::MethodKind;
use crate::ast::class::PropDef;
use crate::ast::class::StaticBlock;
use crate::ast::decl::ClassDecl;
use crate::ast::expr::ClassExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::FuncExpr;
use crate::ast::expr::PropKind;
use crate::ast::expr::Property;
use crate::ast::node::Node;
use crate::ast::stmt::BlockStmt;
use crate::cst::CstNode;
use crate::error::LowerResult;
use crate::loc::Loc;
use crate::token::Token;

/// Words that may precede a member name as modifiers. The typed dialect's words are listed too so
/// the base lowering can step over them; only the typed dialect gives them meaning.
pub static MODIFIER_WORDS: &[&str] = &[
  "abstract",
  "accessor",
  "async",
  "declare",
  "get",
  "override",
  "private",
  "protected",
  "public",
  "readonly",
  "set",
  "static",
];

static CLASS_BODY_GROUPS: &[&str] = &["ClassBody", "ClassElementList"];

/// Whether `c` can start a member name (or another modifier), making the word before it a
/// modifier rather than the name itself.
fn starts_name(c: &CstNode) -> bool {
  !c.is_token() || c.is_tok_any(&["*", "["]) || !c.is("Punctuator")
}

/// The member production stripped of its `ClassElement` wrapper and of method-kind nesting such as
/// `MethodDefinition -> GeneratorMethod`, with the modifier tokens met on the way.
pub struct MemberHead<'a> {
  pub core: &'a CstNode,
  pub modifiers: Vec<&'a CstNode>,
  /// Index in `core.children` of the member name.
  pub key_index: usize,
}

impl<'a> MemberHead<'a> {
  pub fn read(node: &'a CstNode) -> LowerResult<MemberHead<'a>> {
    let mut modifiers = Vec::new();
    let mut cur = node;
    loop {
      let nested = if cur.is("ClassElement") {
        cur.nodes().next()
      } else if cur.is_any(METHOD_KINDS) && !cur.has_tok("(") {
        cur.nodes().find(|c| c.is_any(METHOD_KINDS))
      } else {
        None
      };
      let Some(inner) = nested else {
        break;
      };
      modifiers.extend(cur.children.iter().take_while(|c| c.is_token()));
      cur = inner;
    }
    let children = &cur.children;
    let mut i = 0;
    while let Some(c) = children.get(i) {
      let is_modifier = c.is_tok("*")
        || (c.is_tok_any(MODIFIER_WORDS) && children.get(i + 1).is_some_and(starts_name));
      if !is_modifier {
        break;
      }
      modifiers.push(c);
      i += 1;
    }
    if i >= children.len() {
      return Err(cur.malformed("member name"));
    }
    Ok(MemberHead {
      core: cur,
      modifiers,
      key_index: i,
    })
  }

  pub fn key(&self) -> &'a CstNode {
    &self.core.children[self.key_index]
  }

  pub fn modifier(&self, word: &str) -> Option<&'a CstNode> {
    self.modifiers.iter().copied().find(|c| c.is_tok(word))
  }

  /// `get` or `set` written before the name.
  pub fn accessor(&self) -> Option<&'a CstNode> {
    self.modifiers.iter().copied().find(|c| c.is_tok_any(&["get", "set"]))
  }
}

fn is_constructor_key(key: &Expr) -> bool {
  match key {
    Expr::Id(id) => id.stx.name == "constructor",
    Expr::LitStr(s) => s.stx.value == "constructor",
    _ => false,
  }
}

// Stray `;` tokens between members are dropped here.
fn class_elements<'a>(children: &'a [CstNode], out: &mut Vec<&'a CstNode>) {
  for c in children {
    if !c.is_token() && c.is_any(CLASS_BODY_GROUPS) {
      class_elements(&c.children, out);
    } else if !c.is_token() {
      out.push(c);
    }
  }
}

struct Method {
  key: Expr,
  computed: bool,
  value: Node<FuncExpr>,
  accessor: Option<Token>,
}

impl<'s> Lowerer<'s> {
  fn method_parts(&mut self, head: &MemberHead<'_>) -> LowerResult<Method> {
    let core = head.core;
    let (key, computed) = self.property_key(head.key())?;
    let mut func = self.strategy().function(self, core)?;
    // Modifiers can sit on a wrapper the function lowering never sees.
    if let Some(kw) = head.modifier("async") {
      func.async_ = true;
      func.async_keyword.get_or_insert_with(|| Token::from_cst(kw));
    }
    if let Some(star) = head.modifier("*") {
      func.generator = true;
      func.star.get_or_insert_with(|| Token::from_cst(star));
    }
    let start = core.tok("(").map_or(core.loc.0, |p| p.loc.0);
    Ok(Method {
      key,
      computed,
      value: Node::new(Loc(start, core.loc.1), FuncExpr { func }),
      accessor: head.accessor().map(Token::from_cst),
    })
  }

  /// A method, getter or setter in an object literal.
  pub fn object_method(&mut self, node: &CstNode) -> LowerResult<Node<Property<Expr>>> {
    let head = MemberHead::read(node)?;
    let method = self.method_parts(&head)?;
    let kind = match method.accessor.as_ref().map(|t| t.value.as_str()) {
      Some("get") => PropKind::Get,
      Some("set") => PropKind::Set,
      _ => PropKind::Init,
    };
    Ok(Node::new(node.loc, Property {
      key: method.key,
      value: Expr::Func(method.value),
      kind,
      method: kind == PropKind::Init,
      shorthand: false,
      computed: method.computed,
      colon: None,
    }))
  }

  pub fn base_method(&mut self, node: &CstNode) -> LowerResult<Node<MethodDef>> {
    let head = MemberHead::read(node)?;
    let method = self.method_parts(&head)?;
    let static_keyword = head.modifier("static").map(Token::from_cst);
    let kind = match method.accessor.as_ref().map(|t| t.value.as_str()) {
      Some("get") => MethodKind::Get,
      Some("set") => MethodKind::Set,
      _ if static_keyword.is_none() && !method.computed && is_constructor_key(&method.key) => {
        MethodKind::Constructor
      }
      _ => MethodKind::Method,
    };
    Ok(Node::new(node.loc, MethodDef {
      key: method.key,
      value: method.value,
      kind,
      computed: method.computed,
      static_: static_keyword.is_some(),
      ts: None,
      static_keyword,
      kind_keyword: method.accessor,
    }))
  }

  pub fn base_field(&mut self, node: &CstNode) -> LowerResult<Node<PropDef>> {
    let head = MemberHead::read(node)?;
    let (key, computed) = self.property_key(head.key())?;
    let (eq, value) = match initializer(head.core) {
      Some((eq, value)) => (Some(Token::from_cst(eq)), Some(self.expr(value)?)),
      None => (None, None),
    };
    let static_keyword = head.modifier("static").map(Token::from_cst);
    Ok(Node::new(node.loc, PropDef {
      key,
      value,
      computed,
      static_: static_keyword.is_some(),
      ts: None,
      static_keyword,
      eq,
      semicolon: tok(head.core, ";").or_else(|| tok(node, ";")),
    }))
  }

  fn static_block(&mut self, node: &CstNode) -> LowerResult<Node<StaticBlock>> {
    let block = self.braced_block(node, &node.children, false)?;
    let BlockStmt {
      body,
      open_brace,
      close_brace,
    } = *block.stx;
    Ok(Node::new(node.loc, StaticBlock {
      body,
      static_keyword: tok(node, "static"),
      open_brace,
      close_brace,
    }))
  }

  fn class_member(&mut self, node: &CstNode) -> LowerResult<Option<ClassMember>> {
    let core = if node.is("ClassElement") {
      match node.nodes().next() {
        Some(core) => core,
        // A lone `;`.
        None => return Ok(None),
      }
    } else {
      node
    };
    let member = if core.is("ClassStaticBlock") {
      ClassMember::StaticBlock(self.static_block(core)?)
    } else if core.is("FieldDefinition") {
      ClassMember::Prop(self.strategy().field(self, node)?)
    } else if core.is_any(METHOD_KINDS) {
      ClassMember::Method(self.strategy().method(self, node)?)
    } else {
      return Err(core.unsupported());
    };
    Ok(Some(member))
  }

  pub fn base_class(&mut self, node: &CstNode) -> LowerResult<Class> {
    let tail = match node.child("ClassTail") {
      Some(tail) => tail,
      None if node.has_tok("{") => node,
      None => return Err(node.malformed("class tail")),
    };
    let id = match node.child("BindingIdentifier") {
      Some(id) => Some(id_pat_node(id)?),
      None => None,
    };
    let heritage = tail.child("ClassHeritage");
    let super_class = match heritage {
      Some(h) => Some(self.expr(h.require_node("superclass")?)?),
      None => None,
    };
    let open = tail.tok_pos("{").ok_or_else(|| tail.malformed("class body"))?;
    let close = tail
      .children
      .iter()
      .rposition(|c| c.is_tok("}"))
      .filter(|&c| c > open)
      .ok_or_else(|| tail.malformed("`}`"))?;
    let mut elements = Vec::new();
    class_elements(&tail.children[open + 1..close], &mut elements);
    let mut body = Vec::new();
    for el in elements {
      if let Some(member) = self.class_member(el)? {
        body.push(member);
      }
    }
    let open_tok = &tail.children[open];
    let close_tok = &tail.children[close];
    Ok(Class {
      id,
      super_class,
      body: Node::new(open_tok.loc + close_tok.loc, ClassBody {
        body,
        open_brace: Some(Token::from_cst(open_tok)),
        close_brace: Some(Token::from_cst(close_tok)),
      }),
      ts: None,
      class_keyword: tok(node, "class"),
      extends_keyword: heritage.and_then(|h| tok(h, "extends")),
    })
  }

  pub fn class_expr(&mut self, node: &CstNode) -> LowerResult<Expr> {
    let class = self.strategy().class(self, node)?;
    Ok(Expr::Class(Node::new(node.loc, ClassExpr { class })))
  }

  pub fn class_decl(&mut self, node: &CstNode) -> LowerResult<Node<ClassDecl>> {
    let class = self.strategy().class(self, node)?;
    Ok(Node::new(node.loc, ClassDecl { class }))
  }
}
