//! Import and export declarations.

use super::lit::id_node;
use super::lit::id_pat_node;
use super::lit::name_token;
use super::lit::string_literal;
use super::tokens::list_children;
use super::tokens::list_slots;
use super::tokens::tok;
use super::tokens::ListItem;
use super::tokens::ListSlot;
use super::Lowerer;
use crate::ast::list::ListElem;
use crate::ast::lit::LitStrExpr;
use crate::ast::module::ExportAllDecl;
use crate::ast::module::ExportDefaultDecl;
use crate::ast::module::ExportDefaultTarget;
use crate::ast::module::ExportNamedDecl;
use crate::ast::module::ExportSpecifier;
use crate::ast::module::ImportAttribute;
use crate::ast::module::ImportDecl;
use crate::ast::module::ImportDefaultSpecifier;
use crate::ast::module::ImportNamedSpecifier;
use crate::ast::module::ImportNamespaceSpecifier;
use crate::ast::module::ImportSpecifier;
use crate::ast::module::ModuleExportName;
use crate::ast::node::Node;
use crate::ast::stmt::Stmt;
use crate::cst::CstNode;
use crate::error::LowerResult;
use crate::token::Token;
use derive_visitor::Drive;
use derive_visitor::DriveMut;

static DEFAULT_BINDING_KINDS: &[&str] = &["BindingIdentifier", "ImportedBinding", "ImportedDefaultBinding"];

static FUNCTION_DECL_KINDS: &[&str] = &[
  "AsyncFunctionDeclaration",
  "AsyncGeneratorDeclaration",
  "FunctionDeclaration",
  "GeneratorDeclaration",
];

/// An identifier or, for arbitrary namespace names, a string literal.
fn module_export_name(node: &CstNode) -> LowerResult<ModuleExportName> {
  let name = name_token(node)?;
  if name.is("StringLiteral") || name.text().starts_with(['"', '\'']) {
    return string_literal(node).map(ModuleExportName::Str);
  }
  id_node(node).map(ModuleExportName::Id)
}

/// The module specifier node, from a `FromClause` or written directly after `from`.
fn module_source(node: &CstNode) -> Option<&CstNode> {
  if let Some(from) = node.child("FromClause") {
    return from.nodes().next().or_else(|| from.after_tok("from"));
  }
  node
    .child("ModuleSpecifier")
    .or_else(|| node.after_tok("from"))
    .or_else(|| node.children.iter().find(|c| c.is("StringLiteral")))
}

fn from_keyword(node: &CstNode) -> Option<Token> {
  node
    .child("FromClause")
    .and_then(|from| tok(from, "from"))
    .or_else(|| tok(node, "from"))
}

/// `with { type: "json" }`.
fn with_clause(node: &CstNode) -> LowerResult<Vec<ListElem<Node<ImportAttribute>>>> {
  let Some(clause) = node.child("WithClause") else {
    return Ok(Vec::new());
  };
  let flat: Vec<&CstNode> = list_children(clause)
    .into_iter()
    .filter(|c| !c.is_tok_any(&["with", "assert"]))
    .collect();
  let mut attributes = Vec::new();
  for entry in flat.split(|c| c.is_tok(",")) {
    // A trailing comma leaves an empty group.
    if entry.is_empty() {
      continue;
    }
    let parts: Vec<&CstNode> = match entry {
      [single] if !single.is_token() && single.has_tok(":") => single.children.iter().collect(),
      _ => entry.to_vec(),
    };
    let [key, colon, value] = parts.as_slice() else {
      return Err(clause.malformed("import attribute"));
    };
    if !colon.is_tok(":") {
      return Err(clause.malformed("`:`"));
    }
    attributes.push(ListElem::bare(Node::new(key.loc + value.loc, ImportAttribute {
      key: module_export_name(key)?,
      value: string_literal(value)?,
      colon: Some(Token::from_cst(colon)),
    })));
  }
  // Attach the separating commas.
  let commas: Vec<&CstNode> = flat.iter().copied().filter(|c| c.is_tok(",")).collect();
  for (attr, comma) in attributes.iter_mut().zip(commas) {
    attr.comma = Some(Token::from_cst(comma));
  }
  Ok(attributes)
}

fn import_specifier(node: &CstNode) -> LowerResult<ImportSpecifier> {
  let named = match node.tok_pos("as") {
    Some(as_pos) => {
      let imported = node.children[..as_pos]
        .iter()
        .next_back()
        .ok_or_else(|| node.malformed("imported name"))?;
      let local = node.children[as_pos + 1..]
        .first()
        .ok_or_else(|| node.malformed("local binding"))?;
      ImportNamedSpecifier {
        imported: module_export_name(imported)?,
        local: id_pat_node(local)?,
        as_keyword: Some(Token::from_cst(&node.children[as_pos])),
      }
    }
    None => ImportNamedSpecifier {
      imported: ModuleExportName::Id(id_node(node)?),
      local: id_pat_node(node)?,
      as_keyword: None,
    },
  };
  Ok(ImportSpecifier::Named(Node::new(node.loc, named)))
}

fn export_specifier(node: &CstNode) -> LowerResult<Node<ExportSpecifier>> {
  let (local, exported, as_keyword) = match node.tok_pos("as") {
    Some(as_pos) => {
      let local = node.children[..as_pos]
        .iter()
        .next_back()
        .ok_or_else(|| node.malformed("local name"))?;
      let exported = node.children[as_pos + 1..]
        .first()
        .ok_or_else(|| node.malformed("exported name"))?;
      (
        module_export_name(local)?,
        module_export_name(exported)?,
        Some(Token::from_cst(&node.children[as_pos])),
      )
    }
    None => (module_export_name(node)?, module_export_name(node)?, None),
  };
  Ok(Node::new(node.loc, ExportSpecifier {
    local,
    exported,
    as_keyword,
  }))
}

struct NamedList<T: Drive + DriveMut> {
  items: Vec<ListElem<T>>,
  open_brace: Option<Token>,
  close_brace: Option<Token>,
}

fn named_list<T: Drive + DriveMut>(
  node: &CstNode,
  each: fn(&CstNode) -> LowerResult<T>,
) -> LowerResult<NamedList<T>> {
  let mut items = Vec::new();
  for ListSlot { item, comma } in list_slots(node) {
    let spec = match item {
      Some(ListItem::Elem(n)) => each(n)?,
      _ => return Err(node.malformed("specifier")),
    };
    items.push(ListElem::new(spec, comma));
  }
  Ok(NamedList {
    items,
    open_brace: tok(node, "{"),
    close_brace: tok(node, "}"),
  })
}

impl<'s> Lowerer<'s> {
  pub fn import_decl(&mut self, node: &CstNode) -> LowerResult<Stmt> {
    let source = module_source(node).ok_or_else(|| node.malformed("module specifier"))?;
    let source = string_literal(source)?;
    let mut specifiers: Vec<ListElem<ImportSpecifier>> = Vec::new();
    let mut open_brace = None;
    let mut close_brace = None;
    let clause = node.child("ImportClause");
    for c in clause.map_or(&[][..], |c| c.children.as_slice()) {
      if c.is_tok(",") {
        if let Some(last) = specifiers.last_mut() {
          last.comma = Some(Token::from_cst(c));
        }
      } else if c.is_any(DEFAULT_BINDING_KINDS) {
        specifiers.push(ListElem::bare(ImportSpecifier::Default(Node::new(
          c.loc,
          ImportDefaultSpecifier {
            local: id_pat_node(c)?,
          },
        ))));
      } else if c.is("NameSpaceImport") {
        let local = c.after_tok("as").ok_or_else(|| c.malformed("namespace binding"))?;
        specifiers.push(ListElem::bare(ImportSpecifier::Namespace(Node::new(
          c.loc,
          ImportNamespaceSpecifier {
            local: id_pat_node(local)?,
            star: tok(c, "*"),
            as_keyword: tok(c, "as"),
          },
        ))));
      } else if c.is("NamedImports") {
        let list = named_list(c, import_specifier)?;
        specifiers.extend(list.items);
        open_brace = list.open_brace;
        close_brace = list.close_brace;
      } else {
        return Err(c.unsupported());
      }
    }
    Ok(Stmt::Import(Node::new(node.loc, ImportDecl {
      specifiers,
      source,
      attributes: with_clause(node)?,
      keyword: tok(node, "import"),
      open_brace,
      close_brace,
      from_keyword: from_keyword(node),
      semicolon: tok(node, ";"),
    })))
  }

  pub fn export_decl(&mut self, node: &CstNode) -> LowerResult<Stmt> {
    let keyword = tok(node, "export");
    let semicolon = tok(node, ";");
    if let Some(default_keyword) = node.tok("default") {
      let declaration = self.export_default_target(node)?;
      return Ok(Stmt::ExportDefault(Node::new(node.loc, ExportDefaultDecl {
        declaration,
        keyword,
        default_keyword: Some(Token::from_cst(default_keyword)),
        semicolon,
      })));
    }

    let source: Option<Node<LitStrExpr>> = match module_source(node) {
      Some(source) => Some(string_literal(source)?),
      None => None,
    };
    let clause = node.child("ExportFromClause").unwrap_or(node);

    if let Some(star) = clause.tok("*") {
      let source = source.ok_or_else(|| node.malformed("`from` clause"))?;
      let exported = match clause.after_tok("as") {
        Some(name) => Some(module_export_name(name)?),
        None => None,
      };
      return Ok(Stmt::ExportAll(Node::new(node.loc, ExportAllDecl {
        exported,
        source,
        attributes: with_clause(node)?,
        keyword,
        star: Some(Token::from_cst(star)),
        from_keyword: from_keyword(node),
        semicolon,
      })));
    }

    if let Some(named) = clause.child("NamedExports") {
      let list = named_list(named, export_specifier)?;
      return Ok(Stmt::ExportNamed(Node::new(node.loc, ExportNamedDecl {
        declaration: None,
        specifiers: list.items,
        source,
        attributes: with_clause(node)?,
        keyword,
        open_brace: list.open_brace,
        close_brace: list.close_brace,
        from_keyword: from_keyword(node),
        semicolon,
      })));
    }

    let declaration = node
      .nodes()
      .next()
      .ok_or_else(|| node.malformed("exported declaration"))?;
    Ok(Stmt::ExportNamed(Node::new(node.loc, ExportNamedDecl {
      declaration: Some(self.stmt(declaration)?),
      specifiers: Vec::new(),
      source: None,
      attributes: Vec::new(),
      keyword,
      open_brace: None,
      close_brace: None,
      from_keyword: None,
      semicolon: None,
    })))
  }

  fn export_default_target(&mut self, node: &CstNode) -> LowerResult<ExportDefaultTarget> {
    let mut target = node
      .after_tok("default")
      .ok_or_else(|| node.malformed("default export"))?;
    while target.is("HoistableDeclaration") {
      target = super::router::wrapped(target)?;
    }
    Ok(if target.is_any(FUNCTION_DECL_KINDS) {
      ExportDefaultTarget::Func(self.func_decl(target)?)
    } else if target.is("ClassDeclaration") {
      ExportDefaultTarget::Class(self.class_decl(target)?)
    } else {
      ExportDefaultTarget::Expr(self.expr(target)?)
    })
  }
}
