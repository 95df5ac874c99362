//! Type productions to `TS*` type nodes.

use crate::ast::expr::Expr;
use crate::ast::expr::UnaryExpr;
use crate::ast::list::ListElem;
use crate::ast::node::Node;
use crate::ast::ts::ArrayType;
use crate::ast::ts::EntityName;
use crate::ast::ts::FunctionType;
use crate::ast::ts::IntersectionType;
use crate::ast::ts::KeywordType;
use crate::ast::ts::LiteralType;
use crate::ast::ts::PropertySignature;
use crate::ast::ts::QualifiedName;
use crate::ast::ts::TupleType;
use crate::ast::ts::TypeAnnotation;
use crate::ast::ts::TypeArguments;
use crate::ast::ts::TypeExpr;
use crate::ast::ts::TypeKeyword;
use crate::ast::ts::TypeLiteral;
use crate::ast::ts::TypeReference;
use crate::ast::ts::UnionType;
use crate::cst::CstNode;
use crate::error::LowerResult;
use crate::loc::Loc;
use crate::lower::func::close_paren_pos;
use crate::lower::lit::id_node;
use crate::lower::lit::literal_token;
use crate::lower::tokens::comma_slots;
use crate::lower::tokens::list_slots;
use crate::lower::tokens::tok;
use crate::lower::tokens::ListItem;
use crate::lower::tokens::ListSlot;
use crate::lower::Lowerer;
use crate::token::Token;
use crate::DialectGap;

/// Type productions that stand for their only child.
static TYPE_WRAPPERS: &[&str] = &["NonArrayType", "PrimaryType", "Type"];

static TYPE_NAME_KINDS: &[&str] = &["IdentifierPath", "NamespaceName", "TypeName"];

static TYPE_MEMBER_GROUPS: &[&str] = &["ObjectTypeBody", "TypeBody", "TypeMemberList"];

static TYPE_LIST_GROUPS: &[&str] = &["TupleElementTypes", "TypeArgumentList"];

fn flatten_type_name<'a>(node: &'a CstNode, out: &mut Vec<&'a CstNode>) {
  for c in node.children.iter() {
    if c.is_tok(".") {
      continue;
    }
    if !c.is_token() && c.is_any(TYPE_NAME_KINDS) {
      flatten_type_name(c, out);
    } else {
      out.push(c);
    }
  }
}

/// A dotted name, folded left: `a.b.c` is `(a.b).c`.
pub fn entity_name(node: &CstNode) -> LowerResult<EntityName> {
  let mut parts = Vec::new();
  if node.is_token() || !node.is_any(TYPE_NAME_KINDS) {
    parts.push(node);
  } else {
    flatten_type_name(node, &mut parts);
  }
  entity_name_parts(node, &parts)
}

/// Folds already separated name parts; `node` is blamed when there are none.
pub fn entity_name_parts(node: &CstNode, parts: &[&CstNode]) -> LowerResult<EntityName> {
  let (first, rest) = parts
    .split_first()
    .ok_or_else(|| node.malformed("type name"))?;
  let mut name = EntityName::Id(id_node(first)?);
  for part in rest {
    let right = id_node(part)?;
    name = EntityName::Qualified(Node::new(name.loc() + right.loc, QualifiedName {
      left: name,
      right,
    }));
  }
  Ok(name)
}

fn flatten_operands<'a>(node: &'a CstNode, out: &mut Vec<&'a CstNode>) {
  for c in node.nodes() {
    if c.kind == node.kind {
      flatten_operands(c, out);
    } else {
      out.push(c);
    }
  }
}

fn flatten_type_list<'a>(children: &'a [CstNode], out: &mut Vec<&'a CstNode>) {
  for c in children {
    if !c.is_token() && c.is_any(TYPE_LIST_GROUPS) {
      flatten_type_list(&c.children, out);
    } else if !c.is_tok_any(&["<", ">"]) {
      out.push(c);
    }
  }
}

fn flatten_members<'a>(children: &'a [CstNode], out: &mut Vec<&'a CstNode>) {
  for c in children {
    if c.is_token() {
      continue;
    }
    if c.is_any(TYPE_MEMBER_GROUPS) {
      flatten_members(&c.children, out);
    } else {
      out.push(c);
    }
  }
}

fn keyword_type(token: &CstNode, loc: Loc) -> LowerResult<TypeExpr> {
  let keyword = TypeKeyword::from_keyword(token.text()).ok_or_else(|| token.unsupported())?;
  Ok(TypeExpr::Keyword(Node::new(loc, KeywordType { keyword })))
}

impl<'s> Lowerer<'s> {
  /// `TypeAnnotation` (`":" Type`), or the `"=>" Type` return of a function type.
  pub fn type_annotation(&mut self, node: &CstNode) -> LowerResult<Node<TypeAnnotation>> {
    let ty = node.require_node("type")?;
    Ok(Node::new(node.loc, TypeAnnotation {
      type_annotation: self.type_expr(ty)?,
      colon: tok(node, ":"),
    }))
  }

  pub fn type_expr(&mut self, node: &CstNode) -> LowerResult<TypeExpr> {
    if node.is_token() {
      return self.type_token(node, node);
    }
    match node.kind.as_str() {
      "UnionType" | "IntersectionType" => self.type_chain(node),
      "ArrayType" => {
        let element = node.require_node("element type")?;
        Ok(TypeExpr::Array(Node::new(node.loc, ArrayType {
          element_type: self.type_expr(element)?,
        })))
      }
      "PredefinedType" => {
        let keyword = node.tokens().next().ok_or_else(|| node.malformed("type keyword"))?;
        keyword_type(keyword, node.loc)
      }
      "TypeReference" => self.type_reference(node),
      "LiteralType" => self.literal_type(node),
      "TupleType" => self.tuple_type(node),
      "FunctionType" => self.function_type(node),
      "ObjectType" => {
        let members = self.type_members(node)?;
        Ok(TypeExpr::TypeLiteral(Node::new(node.loc, TypeLiteral { members })))
      }
      "ParenthesizedType" => {
        let inner = node.require_node("type")?;
        self.type_expr(inner)
      }
      _ if node.is_any(TYPE_WRAPPERS) => match node.single_node() {
        Some(inner) => self.type_expr(inner),
        None => {
          let token = node.tokens().next().ok_or_else(|| node.malformed("type"))?;
          self.type_token(token, node)
        }
      },
      _ => Err(node.unsupported()),
    }
  }

  // A bare token in type position: a keyword type or a literal type.
  fn type_token(&mut self, token: &CstNode, at: &CstNode) -> LowerResult<TypeExpr> {
    if TypeKeyword::from_keyword(token.text()).is_some() {
      return keyword_type(token, at.loc);
    }
    let literal = literal_token(token, at.loc)?;
    Ok(TypeExpr::Literal(Node::new(at.loc, LiteralType { literal })))
  }

  // `A | B | C` and `A & B`; a leading operator is allowed and a single operand is not wrapped.
  fn type_chain(&mut self, node: &CstNode) -> LowerResult<TypeExpr> {
    let mut operands = Vec::new();
    flatten_operands(node, &mut operands);
    if let [only] = operands.as_slice() {
      return self.type_expr(only);
    }
    let mut types = Vec::with_capacity(operands.len());
    for operand in operands {
      types.push(self.type_expr(operand)?);
    }
    Ok(if node.is("UnionType") {
      TypeExpr::Union(Node::new(node.loc, UnionType { types }))
    } else {
      TypeExpr::Intersection(Node::new(node.loc, IntersectionType { types }))
    })
  }

  fn type_reference(&mut self, node: &CstNode) -> LowerResult<TypeExpr> {
    let name = node
      .children
      .iter()
      .find(|c| !c.is("TypeArguments"))
      .ok_or_else(|| node.malformed("type name"))?;
    let type_arguments = match node.child("TypeArguments") {
      Some(args) => {
        let mut flat = Vec::new();
        flatten_type_list(&args.children, &mut flat);
        let mut params = Vec::new();
        for ListSlot { item, comma } in comma_slots(&flat) {
          let Some(ListItem::Elem(ty)) = item else {
            return Err(args.malformed("type argument"));
          };
          params.push(ListElem::new(self.type_expr(ty)?, comma));
        }
        Some(Node::new(args.loc, TypeArguments { params }))
      }
      None => None,
    };
    Ok(TypeExpr::Reference(Node::new(node.loc, TypeReference {
      type_name: entity_name(name)?,
      type_arguments,
    })))
  }

  fn literal_type(&mut self, node: &CstNode) -> LowerResult<TypeExpr> {
    let literal = if let Some(minus) = node.tok("-") {
      let operand = node
        .after_tok("-")
        .ok_or_else(|| node.malformed("numeric literal"))?;
      let argument = match operand.is_token() {
        true => literal_token(operand, operand.loc)?,
        false => self.literal(operand)?,
      };
      Expr::Unary(Node::new(node.loc, UnaryExpr {
        operator: "-".to_string(),
        prefix: true,
        argument,
        operator_token: Some(Token::from_cst(minus)),
      }))
    } else if let Some(template) = node.child_any(&["TemplateLiteral", "NoSubstitutionTemplate"]) {
      Expr::Template(self.template(template)?)
    } else {
      match node.single_node() {
        Some(inner) => self.literal(inner)?,
        None => self.literal(node)?,
      }
    };
    Ok(TypeExpr::Literal(Node::new(node.loc, LiteralType { literal })))
  }

  fn tuple_type(&mut self, node: &CstNode) -> LowerResult<TypeExpr> {
    let mut element_types = Vec::new();
    for ListSlot { item, comma } in list_slots(node) {
      let Some(ListItem::Elem(ty)) = item else {
        return Err(node.malformed("tuple element"));
      };
      element_types.push(ListElem::new(self.type_expr(ty)?, comma));
    }
    Ok(TypeExpr::Tuple(Node::new(node.loc, TupleType { element_types })))
  }

  fn function_type(&mut self, node: &CstNode) -> LowerResult<TypeExpr> {
    if let Some(tp) = node.child("TypeParameters") {
      self.record_drop(DialectGap::TypeParameters, tp);
    }
    let open = node.tok_pos("(").ok_or_else(|| node.malformed("parameter list"))?;
    let close = close_paren_pos(node, open)?;
    let params = self.params(node, &node.children[open + 1..close])?;
    let arrow = node.children[close + 1..]
      .iter()
      .position(|c| c.is_tok("=>"))
      .map(|p| p + close + 1)
      .ok_or_else(|| node.malformed("`=>`"))?;
    let ret = node.children[arrow + 1..]
      .iter()
      .find(|c| !c.is_tok_any(&[";", ","]))
      .ok_or_else(|| node.malformed("return type"))?;
    let return_type = Node::new(node.children[arrow].loc + ret.loc, TypeAnnotation {
      type_annotation: self.type_expr(ret)?,
      colon: None,
    });
    Ok(TypeExpr::Function(Node::new(node.loc, FunctionType {
      params,
      return_type,
    })))
  }

  /// Members of an object type or interface body.
  pub fn type_members(&mut self, node: &CstNode) -> LowerResult<Vec<Node<PropertySignature>>> {
    let open = node.tok_pos("{");
    let close = node.children.iter().rposition(|c| c.is_tok("}"));
    let children = match (open, close) {
      (Some(open), Some(close)) if close > open => &node.children[open + 1..close],
      _ => &node.children[..],
    };
    let mut flat = Vec::new();
    flatten_members(children, &mut flat);
    let mut members = Vec::with_capacity(flat.len());
    for member in flat {
      if !member.is("PropertySignature") {
        return Err(member.unsupported());
      }
      members.push(self.property_signature(member)?);
    }
    Ok(members)
  }

  fn property_signature(&mut self, node: &CstNode) -> LowerResult<Node<PropertySignature>> {
    let children = &node.children;
    // `readonly` is a modifier only when a name follows it.
    let readonly = children.first().is_some_and(|c| c.is_tok("readonly"))
      && children
        .get(1)
        .is_some_and(|c| !c.is_tok_any(&["?", ";", ","]) && !c.is("TypeAnnotation"));
    let key = children
      .get(usize::from(readonly))
      .ok_or_else(|| node.malformed("property name"))?;
    let (key, computed) = self.property_key(key)?;
    let type_annotation = match node.child("TypeAnnotation") {
      Some(ann) => Some(self.type_annotation(ann)?),
      None => None,
    };
    Ok(Node::new(node.loc, PropertySignature {
      key,
      computed,
      optional: node.has_tok("?"),
      readonly,
      type_annotation,
    }))
  }
}

#[cfg(test)]
mod tests {
  use super::entity_name;
  use crate::ast::ts::EntityName;
  use crate::ast::ts::TypeExpr;
  use crate::cst::CstNode;
  use crate::lower::strategy::EcmaStrategy;
  use crate::lower::Lowerer;
  use crate::ts::TsStrategy;
  use crate::util::test::assert_estree_eq;
  use crate::Dialect;
  use crate::DialectGap;
  use crate::LowerOptions;
  use serde_json::json;

  fn lower_type(src: &str) -> (serde_json::Value, Vec<DialectGap>) {
    let cst = CstNode::from_sexpr(src).unwrap();
    let strategy = TsStrategy::new(EcmaStrategy);
    let mut lw = Lowerer::new(&strategy, LowerOptions {
      dialect: Dialect::Ts,
      source_type: None,
    });
    let ty = lw.type_expr(&cst).unwrap();
    let gaps = lw.dropped().iter().map(|d| d.gap).collect();
    (serde_json::to_value(ty).unwrap(), gaps)
  }

  #[test]
  fn dotted_type_names_fold_left() {
    let cst = CstNode::from_sexpr(r#"(TypeName "a" "." "b" "." "c")"#).unwrap();
    let EntityName::Qualified(outer) = entity_name(&cst).unwrap() else {
      panic!("expected a qualified name");
    };
    assert_eq!(outer.stx.right.stx.name, "c");
    assert!(matches!(outer.stx.left, EntityName::Qualified(_)));
  }

  #[test]
  fn union_of_keywords_and_references() {
    let (ty, _) = lower_type(
      r#"(UnionType "|" (PredefinedType "string") "|" (ArrayType (TypeReference (TypeName "Foo")) "[" "]"))"#,
    );
    assert_estree_eq(ty, json!({
      "type": "TSUnionType",
      "types": [
        { "type": "TSStringKeyword" },
        {
          "type": "TSArrayType",
          "elementType": {
            "type": "TSTypeReference",
            "typeName": { "type": "Identifier", "name": "Foo" },
            "typeArguments": null,
          },
        },
      ],
    }));
  }

  #[test]
  fn single_operand_chain_is_not_wrapped() {
    let (ty, _) = lower_type(r#"(IntersectionType (PredefinedType "number"))"#);
    assert_estree_eq(ty, json!({ "type": "TSNumberKeyword" }));
  }

  #[test]
  fn negative_literal_type() {
    let (ty, _) = lower_type(r#"(LiteralType "-" (NumericLiteral "1"))"#);
    assert_estree_eq(ty, json!({
      "type": "TSLiteralType",
      "literal": {
        "type": "UnaryExpression",
        "operator": "-",
        "prefix": true,
        "argument": { "type": "Literal", "value": 1, "raw": "1" },
      },
    }));
  }

  #[test]
  fn function_type_drops_type_parameters() {
    let (ty, gaps) = lower_type(
      r#"(FunctionType (TypeParameters "<" "T" ">") "(" ")" "=>" (PredefinedType "void"))"#,
    );
    assert_eq!(gaps, vec![DialectGap::TypeParameters]);
    assert_estree_eq(ty, json!({
      "type": "TSFunctionType",
      "params": [],
      "returnType": {
        "type": "TSTypeAnnotation",
        "typeAnnotation": { "type": "TSVoidKeyword" },
      },
    }));
  }

  #[test]
  fn object_type_members() {
    let cst = CstNode::from_sexpr(
      r#"(ObjectType "{" (PropertySignature "readonly" "a" "?" (TypeAnnotation ":" (PredefinedType "number"))) ";" "}")"#,
    )
    .unwrap();
    let strategy = TsStrategy::new(EcmaStrategy);
    let mut lw = Lowerer::new(&strategy, LowerOptions::default());
    let TypeExpr::TypeLiteral(lit) = lw.type_expr(&cst).unwrap() else {
      panic!("expected a type literal");
    };
    let member = &lit.stx.members[0].stx;
    assert!(member.readonly);
    assert!(member.optional);
    assert!(member.type_annotation.is_some());
  }
}
