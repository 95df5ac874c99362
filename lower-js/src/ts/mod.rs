//! The typed dialect: optional annotations, ambient `declare` forms, namespaces, type aliases and
//! interfaces. [`TsStrategy`] wraps the base strategy and only adds what the typed CST carries on
//! top of the base shape.

use crate::ast::class::Class;
use crate::ast::class::MethodDef;
use crate::ast::class::PropDef;
use crate::ast::decl::VarDeclarator;
use crate::ast::expr::ArrowFuncExpr;
use crate::ast::func::Function;
use crate::ast::node::Node;
use crate::ast::pat::Pat;
use crate::ast::stmt::BlockStmt;
use crate::ast::stmt::Stmt;
use crate::ast::ts::Accessibility;
use crate::ast::ts::ClassTs;
use crate::ast::ts::DeclareTs;
use crate::ast::ts::FuncTs;
use crate::ast::ts::MemberTs;
use crate::ast::ts::PatTs;
use crate::ast::ts::TsInterfaceBody;
use crate::ast::ts::TsInterfaceDecl;
use crate::ast::ts::TsModuleBlock;
use crate::ast::ts::TsModuleDecl;
use crate::ast::ts::TsModuleKind;
use crate::ast::ts::TsTypeAliasDecl;
use crate::cst::CstNode;
use crate::error::LowerResult;
use crate::loc::Loc;
use crate::lower::class::MemberHead;
use crate::lower::func::close_paren_pos;
use crate::lower::lit::id_node;
use crate::lower::strategy::EcmaStrategy;
use crate::lower::strategy::LowerStrategy;
use crate::lower::tokens::last_tok;
use crate::lower::tokens::tok;
use crate::lower::tokens::tok_any;
use crate::lower::Lowerer;
use crate::Dialect;
use crate::DialectGap;
use types::entity_name;
use types::entity_name_parts;

pub mod types;

static HERITAGE_KINDS: &[&str] = &["InterfaceExtendsClause", "InterfaceHeritage"];

static MODULE_BODY_KINDS: &[&str] = &["ModuleBlock", "NamespaceBody"];

/// Decorates a base strategy with the typed dialect.
#[derive(Clone, Copy, Debug, Default)]
pub struct TsStrategy<B = EcmaStrategy> {
  base: B,
}

impl<B: LowerStrategy> TsStrategy<B> {
  pub fn new(base: B) -> TsStrategy<B> {
    TsStrategy { base }
  }
}

/// Attaches the `?` and `: T` written on `node` to `pat`, or to the left side of a defaulted
/// pattern.
fn annotate_pat(lw: &mut Lowerer<'_>, pat: &mut Pat, node: &CstNode) -> LowerResult<()> {
  let type_annotation = match node.child("TypeAnnotation") {
    Some(ann) => Some(lw.type_annotation(ann)?),
    None => None,
  };
  let optional = node.has_tok("?");
  if type_annotation.is_none() && !optional {
    return Ok(());
  }
  let target = match pat {
    Pat::Assign(assign) => &mut assign.stx.left,
    other => other,
  };
  if let Some(ts) = target.ts_mut() {
    let ts = ts.get_or_insert_with(Box::<PatTs>::default);
    if type_annotation.is_some() {
      ts.type_annotation = type_annotation;
    }
    ts.optional |= optional;
  }
  Ok(())
}

/// The return annotation after the parameter list of a function-shaped node.
fn return_type_node(node: &CstNode) -> LowerResult<Option<&CstNode>> {
  let Some(open) = node.tok_pos("(") else {
    return Ok(None);
  };
  let close = close_paren_pos(node, open)?;
  Ok(node.children[close + 1..].iter().find(|c| c.is("TypeAnnotation")))
}

fn member_ts(lw: &mut Lowerer<'_>, head: &MemberHead<'_>) -> LowerResult<Option<Box<MemberTs>>> {
  let accessibility = head
    .modifiers
    .iter()
    .find_map(|m| Accessibility::from_keyword(m.text()));
  let readonly = head.modifier("readonly").is_some();
  // `?` right after the name.
  let optional = head
    .core
    .children
    .get(head.key_index + 1)
    .is_some_and(|c| c.is_tok("?"));
  let type_annotation = match head.core.child("TypeAnnotation") {
    Some(ann) if !head.core.has_tok("(") => Some(lw.type_annotation(ann)?),
    _ => None,
  };
  if accessibility.is_none() && !readonly && !optional && type_annotation.is_none() {
    return Ok(None);
  }
  Ok(Some(Box::new(MemberTs {
    accessibility,
    readonly,
    optional,
    type_annotation,
  })))
}

/// Sets `declare` on a declaration lowered inside `declare …` and widens it to the whole form.
fn mark_declare(stmt: &mut Stmt, loc: Loc) -> bool {
  match stmt {
    Stmt::VarDecl(decl) => {
      decl.loc = loc;
      decl.stx.ts = Some(Box::new(DeclareTs { declare: true }));
    }
    Stmt::ClassDecl(decl) => {
      decl.loc = loc;
      decl.stx.class.ts.get_or_insert_with(Box::<ClassTs>::default).declare = true;
    }
    Stmt::FuncDecl(decl) => {
      decl.loc = loc;
      decl.stx.func.ts.get_or_insert_with(Box::<FuncTs>::default).declare = true;
    }
    Stmt::TsInterface(decl) => {
      decl.loc = loc;
      decl.stx.declare = true;
    }
    Stmt::TsModule(decl) => {
      decl.loc = loc;
      decl.stx.declare = true;
    }
    Stmt::TsTypeAlias(decl) => {
      decl.loc = loc;
      decl.stx.declare = true;
    }
    _ => return false,
  }
  true
}

impl<B: LowerStrategy> LowerStrategy for TsStrategy<B> {
  fn dialect(&self) -> Dialect {
    Dialect::Ts
  }

  fn binding_element(&self, lw: &mut Lowerer<'_>, node: &CstNode) -> LowerResult<Pat> {
    let mut pat = self.base.binding_element(lw, node)?;
    annotate_pat(lw, &mut pat, node)?;
    Ok(pat)
  }

  fn variable_declarator(
    &self,
    lw: &mut Lowerer<'_>,
    node: &CstNode,
  ) -> LowerResult<Node<VarDeclarator>> {
    let mut decl = self.base.variable_declarator(lw, node)?;
    annotate_pat(lw, &mut decl.stx.id, node)?;
    Ok(decl)
  }

  fn function(&self, lw: &mut Lowerer<'_>, node: &CstNode) -> LowerResult<Function> {
    let head_end = node.tok_pos("(").unwrap_or(node.children.len());
    if let Some(tp) = node.children[..head_end].iter().find(|c| c.is("TypeParameters")) {
      lw.record_drop(DialectGap::TypeParameters, tp);
    }
    let mut func = self.base.function(lw, node)?;
    if let Some(ret) = return_type_node(node)? {
      func.ts.get_or_insert_with(Box::<FuncTs>::default).return_type = Some(lw.type_annotation(ret)?);
    }
    Ok(func)
  }

  fn arrow_function(
    &self,
    lw: &mut Lowerer<'_>,
    node: &CstNode,
  ) -> LowerResult<Node<ArrowFuncExpr>> {
    let arrow_pos = node.tok_pos("=>").unwrap_or(node.children.len());
    let head = &node.children[..arrow_pos];
    if let Some(tp) = head.iter().find(|c| c.is("TypeParameters")) {
      lw.record_drop(DialectGap::TypeParameters, tp);
    }
    let mut arrow = self.base.arrow_function(lw, node)?;
    if let Some(ret) = head.iter().find(|c| c.is("TypeAnnotation")) {
      arrow.stx.ts = Some(Box::new(FuncTs {
        return_type: Some(lw.type_annotation(ret)?),
        declare: false,
      }));
    }
    Ok(arrow)
  }

  fn class(&self, lw: &mut Lowerer<'_>, node: &CstNode) -> LowerResult<Class> {
    let tail = node.child("ClassTail");
    for holder in [Some(node), tail].into_iter().flatten() {
      if let Some(tp) = holder.child("TypeParameters") {
        lw.record_drop(DialectGap::TypeParameters, tp);
      }
      if let Some(implements) = holder.child("ImplementsClause") {
        lw.record_drop(DialectGap::ImplementsClause, implements);
      }
    }
    let mut class = self.base.class(lw, node)?;
    let abstract_ = node.has_tok("abstract");
    let declare = node.has_tok("declare");
    if abstract_ || declare {
      class.ts = Some(Box::new(ClassTs { declare, abstract_ }));
    }
    Ok(class)
  }

  fn method(&self, lw: &mut Lowerer<'_>, node: &CstNode) -> LowerResult<Node<MethodDef>> {
    let mut method = self.base.method(lw, node)?;
    let head = MemberHead::read(node)?;
    method.stx.ts = member_ts(lw, &head)?;
    Ok(method)
  }

  fn field(&self, lw: &mut Lowerer<'_>, node: &CstNode) -> LowerResult<Node<PropDef>> {
    let mut field = self.base.field(lw, node)?;
    let head = MemberHead::read(node)?;
    field.stx.ts = member_ts(lw, &head)?;
    Ok(field)
  }

  fn declaration(&self, lw: &mut Lowerer<'_>, node: &CstNode) -> Option<LowerResult<Stmt>> {
    let res = match node.kind.as_str() {
      "TypeAliasDeclaration" => type_alias(lw, node),
      "InterfaceDeclaration" => interface(lw, node),
      "NamespaceDeclaration" | "ModuleDeclaration" => namespace(lw, node),
      "AmbientDeclaration" => ambient(lw, node),
      _ => return self.base.declaration(lw, node),
    };
    Some(res)
  }
}

fn type_alias(lw: &mut Lowerer<'_>, node: &CstNode) -> LowerResult<Stmt> {
  if let Some(tp) = node.child("TypeParameters") {
    lw.record_drop(DialectGap::TypeParameters, tp);
  }
  let name = node.after_tok("type").ok_or_else(|| node.malformed("type alias name"))?;
  let ty = node.after_tok("=").ok_or_else(|| node.malformed("aliased type"))?;
  Ok(Stmt::TsTypeAlias(Node::new(node.loc, TsTypeAliasDecl {
    id: id_node(name)?,
    type_annotation: lw.type_expr(ty)?,
    declare: false,
    keyword: tok(node, "type"),
    eq: tok(node, "="),
    semicolon: tok(node, ";"),
  })))
}

fn interface(lw: &mut Lowerer<'_>, node: &CstNode) -> LowerResult<Stmt> {
  if let Some(tp) = node.child("TypeParameters") {
    lw.record_drop(DialectGap::TypeParameters, tp);
  }
  if let Some(heritage) = node.child_any(HERITAGE_KINDS) {
    lw.record_drop(DialectGap::InterfaceHeritage, heritage);
  } else if node.has_tok("extends") {
    lw.record_drop(DialectGap::InterfaceHeritage, node);
  }
  let name = node
    .after_tok("interface")
    .ok_or_else(|| node.malformed("interface name"))?;
  // The body arrives as an `ObjectType`/`InterfaceBody`, or as braces on the declaration itself.
  let holder = node.child_any(&["InterfaceBody", "ObjectType"]).unwrap_or(node);
  let body = Node::new(holder.loc, TsInterfaceBody {
    body: lw.type_members(holder)?,
    open_brace: tok(holder, "{"),
    close_brace: last_tok(holder, "}"),
  });
  Ok(Stmt::TsInterface(Node::new(node.loc, TsInterfaceDecl {
    id: id_node(name)?,
    body,
    declare: false,
    keyword: tok(node, "interface"),
  })))
}

fn namespace(lw: &mut Lowerer<'_>, node: &CstNode) -> LowerResult<Stmt> {
  let keyword = node
    .children
    .iter()
    .find(|c| c.is_tok_any(&["namespace", "module"]))
    .ok_or_else(|| node.malformed("`namespace` or `module`"))?;
  let kind = if keyword.is_tok("namespace") {
    TsModuleKind::Namespace
  } else {
    TsModuleKind::Module
  };
  let name = node
    .after_tok(keyword.text())
    .ok_or_else(|| node.malformed("namespace name"))?;
  if name.is("StringLiteral") || name.text().starts_with(['"', '\'']) {
    return Err(name.malformed("dotted namespace name"));
  }
  let id = if name.is_token() {
    // `namespace a.b { … }` with the name written as tokens on the declaration.
    let parts: Vec<&CstNode> = node
      .children
      .iter()
      .skip_while(|c| !std::ptr::eq(*c, name))
      .take_while(|c| c.is_token() && !c.is_tok("{"))
      .filter(|c| !c.is_tok("."))
      .collect();
    entity_name_parts(node, &parts)?
  } else {
    entity_name(name)?
  };
  let holder = node.child_any(MODULE_BODY_KINDS).unwrap_or(node);
  let block = lw.braced_block(holder, &holder.children, false)?;
  let BlockStmt {
    body,
    open_brace,
    close_brace,
  } = *block.stx;
  let body = Node::new(block.loc, TsModuleBlock {
    body,
    open_brace,
    close_brace,
  });
  Ok(Stmt::TsModule(Node::new(node.loc, TsModuleDecl {
    id,
    body,
    kind,
    declare: false,
    keyword: tok_any(node, &["namespace", "module"]),
  })))
}

fn ambient(lw: &mut Lowerer<'_>, node: &CstNode) -> LowerResult<Stmt> {
  let inner = node
    .after_tok("declare")
    .filter(|c| !c.is_token())
    .ok_or_else(|| node.malformed("declaration"))?;
  let mut stmt = lw.stmt(inner)?;
  if !mark_declare(&mut stmt, node.loc) {
    return Err(inner.unsupported());
  }
  Ok(stmt)
}

#[cfg(test)]
mod tests {
  use super::TsStrategy;
  use crate::cst::CstNode;
  use crate::lower::strategy::EcmaStrategy;
  use crate::lower::Lowerer;
  use crate::util::test::assert_estree_eq;
  use crate::Dialect;
  use crate::DialectGap;
  use crate::LowerOptions;
  use serde_json::json;
  use serde_json::Value;

  const TS: LowerOptions = LowerOptions {
    dialect: Dialect::Ts,
    source_type: None,
  };

  fn lower_stmt(src: &str) -> (Value, Vec<DialectGap>) {
    let cst = CstNode::from_sexpr(src).unwrap();
    let strategy = TsStrategy::new(EcmaStrategy);
    let mut lw = Lowerer::new(&strategy, TS);
    let stmt = lw.lower_stmt(&cst).unwrap();
    let gaps = lw.dropped().iter().map(|d| d.gap).collect();
    (serde_json::to_value(stmt).unwrap(), gaps)
  }

  #[test]
  fn annotated_declarator() {
    let (stmt, _) = lower_stmt(
      r#"(LexicalDeclaration (LetOrConst "let")
        (LexicalBinding (BindingIdentifier "x") (TypeAnnotation ":" (PredefinedType "number"))
          (Initializer "=" (NumericLiteral "1")))
        ";")"#,
    );
    assert_estree_eq(stmt, json!({
      "type": "VariableDeclaration",
      "kind": "let",
      "declarations": [{
        "type": "VariableDeclarator",
        "id": {
          "type": "Identifier",
          "name": "x",
          "typeAnnotation": {
            "type": "TSTypeAnnotation",
            "typeAnnotation": { "type": "TSNumberKeyword" },
          },
          "optional": false,
        },
        "init": { "type": "Literal", "value": 1, "raw": "1" },
      }],
    }));
  }

  #[test]
  fn optional_parameter_with_default_annotates_left_side() {
    let (stmt, _) = lower_stmt(
      r#"(FunctionDeclaration "function" (BindingIdentifier "f") "("
        (FormalParameters (FormalParameter (BindingElement (SingleNameBinding
          (BindingIdentifier "a") "?" (TypeAnnotation ":" (PredefinedType "string"))))))
        ")" (TypeAnnotation ":" (PredefinedType "void")) "{" "}")"#,
    );
    assert_eq!(stmt["params"][0]["optional"], json!(true));
    assert_eq!(
      stmt["params"][0]["typeAnnotation"]["typeAnnotation"]["type"],
      json!("TSStringKeyword")
    );
    assert_eq!(stmt["returnType"]["typeAnnotation"]["type"], json!("TSVoidKeyword"));
  }

  #[test]
  fn class_generics_and_implements_are_recorded() {
    let (stmt, gaps) = lower_stmt(
      r#"(ClassDeclaration "abstract" "class" (BindingIdentifier "C")
        (TypeParameters "<" "T" ">")
        (ClassTail (ImplementsClause "implements" (TypeReference (TypeName "I"))) "{" "}"))"#,
    );
    assert_eq!(gaps, vec![DialectGap::TypeParameters, DialectGap::ImplementsClause]);
    assert_eq!(stmt["abstract"], json!(true));
    assert_eq!(stmt["declare"], json!(false));
    assert_eq!(stmt["id"]["name"], json!("C"));
  }

  #[test]
  fn class_member_modifiers() {
    let (stmt, _) = lower_stmt(
      r#"(ClassDeclaration "class" (BindingIdentifier "C") (ClassTail "{"
        (ClassElement (FieldDefinition "private" "readonly" (ClassElementName "x") "?"
          (TypeAnnotation ":" (PredefinedType "number"))) ";")
        "}"))"#,
    );
    let field = &stmt["body"]["body"][0];
    assert_eq!(field["type"], json!("PropertyDefinition"));
    assert_eq!(field["accessibility"], json!("private"));
    assert_eq!(field["readonly"], json!(true));
    assert_eq!(field["optional"], json!(true));
    assert_eq!(field["key"]["name"], json!("x"));
  }

  #[test]
  fn type_alias_and_interface() {
    let (alias, gaps) = lower_stmt(
      r#"(TypeAliasDeclaration "type" (BindingIdentifier "A") (TypeParameters "<" "T" ">") "="
        (TypeReference (TypeName "B")) ";")"#,
    );
    assert_eq!(gaps, vec![DialectGap::TypeParameters]);
    assert_eq!(alias["type"], json!("TSTypeAliasDeclaration"));
    assert_eq!(alias["typeAnnotation"]["typeName"]["name"], json!("B"));

    let (iface, gaps) = lower_stmt(
      r#"(InterfaceDeclaration "interface" (BindingIdentifier "I")
        (InterfaceExtendsClause "extends" (TypeReference (TypeName "J")))
        (ObjectType "{" (PropertySignature "a" (TypeAnnotation ":" (PredefinedType "string"))) "}"))"#,
    );
    assert_eq!(gaps, vec![DialectGap::InterfaceHeritage]);
    assert_eq!(iface["body"]["type"], json!("TSInterfaceBody"));
    assert_eq!(iface["body"]["body"][0]["key"]["name"], json!("a"));
  }

  #[test]
  fn dotted_namespace() {
    let (ns, _) = lower_stmt(
      r#"(NamespaceDeclaration "namespace" (IdentifierPath "a" "." "b") "{"
        (ExpressionStatement (IdentifierReference "x") ";") "}")"#,
    );
    assert_eq!(ns["type"], json!("TSModuleDeclaration"));
    assert_eq!(ns["kind"], json!("namespace"));
    assert_eq!(ns["id"]["type"], json!("TSQualifiedName"));
    assert_eq!(ns["id"]["left"]["name"], json!("a"));
    assert_eq!(ns["id"]["right"]["name"], json!("b"));
    assert_eq!(ns["body"]["body"][0]["type"], json!("ExpressionStatement"));
  }

  #[test]
  fn ambient_declaration_sets_declare() {
    let (stmt, _) = lower_stmt(
      r#"(AmbientDeclaration "declare" (VariableStatement "var"
        (VariableDeclaration (BindingIdentifier "x") (TypeAnnotation ":" (PredefinedType "any")))
        ";"))"#,
    );
    assert_eq!(stmt["type"], json!("VariableDeclaration"));
    assert_eq!(stmt["declare"], json!(true));
    assert_eq!(stmt["start"], json!(0));
  }

  #[test]
  fn ambient_function_without_body() {
    let (stmt, _) = lower_stmt(
      r#"(AmbientDeclaration "declare" (FunctionDeclaration "function" (BindingIdentifier "f")
        "(" ")" (TypeAnnotation ":" (PredefinedType "void")) ";"))"#,
    );
    assert_eq!(stmt["type"], json!("FunctionDeclaration"));
    assert_eq!(stmt["declare"], json!(true));
    assert_eq!(stmt["body"]["body"], json!([]));
  }
}
