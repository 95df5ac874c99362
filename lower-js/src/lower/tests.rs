use super::cover::ResolvePattern;
use super::strategy::EcmaStrategy;
use super::Lowerer;
use crate::ast::class::ClassMember;
use crate::ast::class::MethodKind;
use crate::ast::expr::Expr;
use crate::ast::pat::Pat;
use crate::ast::stmt::ForHead;
use crate::ast::stmt::ForInit;
use crate::ast::stmt::Stmt;
use crate::cst::CstNode;
use crate::error::LowerErrorType;
use crate::loc::Loc;
use crate::util::test::assert_estree_eq;
use crate::LowerOptions;
use crate::SourceType;
use serde::Serialize;
use serde_json::json;
use serde_json::Value;

fn lowerer() -> Lowerer<'static> {
  Lowerer::new(&EcmaStrategy, LowerOptions::default())
}

fn cst(src: &str) -> CstNode {
  CstNode::from_sexpr(src).unwrap()
}

fn to_json<T: Serialize>(value: &T) -> Value {
  serde_json::to_value(value).unwrap()
}

fn expr(src: &str) -> Expr {
  lowerer().lower_expr(&cst(src)).unwrap()
}

fn stmt(src: &str) -> Stmt {
  lowerer().lower_stmt(&cst(src)).unwrap()
}

// Every node and token in the output carries a span that is not inverted.
fn assert_spans(value: &Value) {
  match value {
    Value::Object(map) => {
      if map.contains_key("type") {
        let start = map.get("start").and_then(Value::as_u64);
        let end = map.get("end").and_then(Value::as_u64);
        match (start, end) {
          (Some(start), Some(end)) => assert!(start <= end, "inverted span in {}", value),
          _ => panic!("missing span in {}", value),
        }
      }
      map.values().for_each(assert_spans);
    }
    Value::Array(items) => items.iter().for_each(assert_spans),
    _ => {}
  }
}

#[test]
fn subtraction_folds_left() {
  let e = expr(
    r#"(AdditiveExpression (IdentifierReference "a") "-" (IdentifierReference "b") "-" (IdentifierReference "c"))"#,
  );
  assert_estree_eq(
    to_json(&e),
    json!({
      "type": "BinaryExpression",
      "operator": "-",
      "left": {
        "type": "BinaryExpression",
        "operator": "-",
        "left": {"type": "Identifier", "name": "a"},
        "right": {"type": "Identifier", "name": "b"},
      },
      "right": {"type": "Identifier", "name": "c"},
    }),
  );
  let Expr::Binary(outer) = &e else {
    panic!("expected binary expression");
  };
  assert_eq!(outer.loc, Loc(0, 9));
  assert_eq!(outer.stx.left.loc(), Loc(0, 5));
}

#[test]
fn exponentiation_folds_right() {
  let flat = expr(
    r#"(ExponentiationExpression (IdentifierReference "a") "**" (IdentifierReference "b") "**" (IdentifierReference "c"))"#,
  );
  let nested = expr(
    r#"(ExponentiationExpression (IdentifierReference "a") "**" (ExponentiationExpression (IdentifierReference "b") "**" (IdentifierReference "c")))"#,
  );
  let expected = json!({
    "type": "BinaryExpression",
    "operator": "**",
    "left": {"type": "Identifier", "name": "a"},
    "right": {
      "type": "BinaryExpression",
      "operator": "**",
      "left": {"type": "Identifier", "name": "b"},
      "right": {"type": "Identifier", "name": "c"},
    },
  });
  assert_estree_eq(to_json(&flat), expected.clone());
  assert_estree_eq(to_json(&nested), expected);
  let Expr::Binary(outer) = &flat else {
    panic!("expected binary expression");
  };
  assert_eq!(outer.stx.right.loc(), Loc(5, 11));
}

#[test]
fn coalesce_is_logical() {
  let e = expr(r#"(CoalesceExpression (IdentifierReference "a") "??" (IdentifierReference "b"))"#);
  assert_eq!(e.type_name(), "LogicalExpression");
}

#[test]
fn sparse_array_keeps_holes() {
  let e = expr(r#"(ArrayLiteral "[" (Literal "1") "," "," (Literal "3") "]")"#);
  assert_estree_eq(
    to_json(&e),
    json!({
      "type": "ArrayExpression",
      "elements": [
        {"type": "Literal", "value": 1, "raw": "1"},
        null,
        {"type": "Literal", "value": 3, "raw": "3"},
      ],
    }),
  );
}

#[test]
fn trailing_comma_is_not_a_hole() {
  let Expr::LitArr(arr) = expr(r#"(ArrayLiteral "[" (IdentifierReference "a") "," "]")"#) else {
    panic!("expected array");
  };
  assert_eq!(arr.stx.elements.len(), 1);
  assert!(arr.stx.elements[0].comma.is_some());
}

#[test]
fn resolving_a_pattern_twice_changes_nothing() {
  let e = expr(
    r#"(ObjectLiteral "{" (IdentifierReference "a") "," (PropertyDefinition (PropertyName "b") ":" (ArrayLiteral "[" (IdentifierReference "c") "]")) "}")"#,
  );
  let once = e.resolve_pattern().unwrap();
  let twice = once.resolve_pattern().unwrap();
  assert_eq!(once, twice);
  assert_estree_eq(
    to_json(&once),
    json!({
      "type": "ObjectPattern",
      "properties": [
        {
          "type": "Property",
          "key": {"type": "Identifier", "name": "a"},
          "value": {"type": "Identifier", "name": "a"},
          "kind": "init",
          "method": false,
          "shorthand": true,
          "computed": false,
        },
        {
          "type": "Property",
          "key": {"type": "Identifier", "name": "b"},
          "value": {"type": "ArrayPattern", "elements": [{"type": "Identifier", "name": "c"}]},
          "kind": "init",
          "method": false,
          "shorthand": false,
          "computed": false,
        },
      ],
    }),
  );
}

#[test]
fn call_is_not_a_pattern() {
  let e = expr(r#"(CallExpression (IdentifierReference "f") (Arguments "(" ")"))"#);
  let err = e.resolve_pattern().unwrap_err();
  assert_eq!(err.kind, "CallExpression");
  assert_eq!(err.loc, e.loc());
}

#[test]
fn arrow_with_bare_empty_parens() {
  let Expr::ArrowFunc(arrow) = expr(r#"(ArrowFunction (ArrowParameters "(" ")") "=>" (NumericLiteral "1"))"#) else {
    panic!("expected arrow function");
  };
  assert!(arrow.stx.params.is_empty());
  assert!(arrow.stx.open_paren.is_some());
  assert!(arrow.stx.close_paren.is_some());
}

#[test]
fn arrow_parameters_with_several_nodes_are_malformed() {
  let err = lowerer()
    .lower_expr(&cst(
      r#"(ArrowFunction (ArrowParameters "(" (IdentifierReference "a") (IdentifierReference "b") ")") "=>" (NumericLiteral "1"))"#,
    ))
    .unwrap_err();
  assert_eq!(err.typ, LowerErrorType::MalformedCst("arrow parameters"));
  assert_eq!(err.kind, "ArrowParameters");
}

#[test]
fn destructuring_arrow_parameters() {
  let e = expr(
    r#"(ArrowFunction
      (ArrowParameters (CoverParenthesizedExpressionAndArrowParameterList "("
        (ObjectLiteral "{"
          (IdentifierReference "a") ","
          (CoverInitializedName (IdentifierReference "b") (Initializer "=" (Literal "1")))
        "}")
      ")"))
      "=>"
      (ConciseBody (IdentifierReference "a")))"#,
  );
  assert_estree_eq(
    to_json(&e),
    json!({
      "type": "ArrowFunctionExpression",
      "id": null,
      "params": [{
        "type": "ObjectPattern",
        "properties": [
          {
            "type": "Property",
            "key": {"type": "Identifier", "name": "a"},
            "value": {"type": "Identifier", "name": "a"},
            "kind": "init",
            "method": false,
            "shorthand": true,
            "computed": false,
          },
          {
            "type": "Property",
            "key": {"type": "Identifier", "name": "b"},
            "value": {
              "type": "AssignmentPattern",
              "left": {"type": "Identifier", "name": "b"},
              "right": {"type": "Literal", "value": 1, "raw": "1"},
            },
            "kind": "init",
            "method": false,
            "shorthand": true,
            "computed": false,
          },
        ],
      }],
      "body": {"type": "Identifier", "name": "a"},
      "async": false,
      "generator": false,
      "expression": true,
    }),
  );
}

#[test]
fn nested_destructuring_with_rest() {
  let e = expr(
    r#"(ArrowFunction
      (ArrowParameters (CoverParenthesizedExpressionAndArrowParameterList "("
        (ObjectLiteral "{"
          (IdentifierReference "a") ","
          (PropertyDefinition (PropertyName (LiteralPropertyName "b")) ":"
            (ArrayLiteral "[" (IdentifierReference "c") "," (SpreadElement "..." (IdentifierReference "d")) "]"))
        "}")
      ")"))
      "=>"
      (ConciseBody (IdentifierReference "a")))"#,
  );
  let json = to_json(&e);
  let params = json["params"].as_array().unwrap();
  assert_eq!(params.len(), 1);
  let props = &params[0]["properties"];
  assert_eq!(props[0]["shorthand"], json!(true));
  assert_eq!(props[1]["key"]["name"], json!("b"));
  let elements = &props[1]["value"];
  assert_eq!(elements["type"], json!("ArrayPattern"));
  assert_eq!(elements["elements"][0]["type"], json!("Identifier"));
  assert_eq!(elements["elements"][1]["type"], json!("RestElement"));
  assert_eq!(elements["elements"][1]["argument"]["name"], json!("d"));
}

#[test]
fn destructuring_assignment_target() {
  let Expr::Assign(assign) = expr(
    r#"(AssignmentExpression (ArrayLiteral "[" (IdentifierReference "a") "," (IdentifierReference "b") "]") "=" (IdentifierReference "c"))"#,
  ) else {
    panic!("expected assignment");
  };
  assert!(matches!(assign.stx.left, crate::ast::expr::AssignTarget::Pat(Pat::Arr(_))));
}

#[test]
fn pattern_entry_point() {
  let mut lw = lowerer();
  let pat = lw.lower_pat(&cst(r#"(BindingIdentifier "x")"#)).unwrap();
  assert!(matches!(pat, Pat::Id(_)));
  let pat = lw
    .lower_pat(&cst(r#"(ArrayLiteral "[" (IdentifierReference "a") "," (IdentifierReference "b") "]")"#))
    .unwrap();
  assert!(matches!(pat, Pat::Arr(_)));
  let err = lw
    .lower_pat(&cst(r#"(CallExpression (IdentifierReference "f") (Arguments "(" ")"))"#))
    .unwrap_err();
  assert_eq!(err.typ, LowerErrorType::MalformedCst("pattern"));
}

#[test]
fn cover_nodes_are_lowered_once_per_pass() {
  let node = cst(r#"(ArrayLiteral "[" (IdentifierReference "a") "]")"#);
  let mut lw = lowerer();
  let first = lw.expr(&node).unwrap();
  let second = lw.expr(&node).unwrap();
  assert_eq!(first, second);
  assert_eq!(lw.stats().cache_hits, 1);
  assert_eq!(lw.stats().cache_misses, 1);

  // Each entry point starts with an empty cache.
  let mut lw = lowerer();
  lw.lower_expr(&node).unwrap();
  lw.lower_expr(&node).unwrap();
  assert_eq!(lw.stats().cache_hits, 0);
}

#[test]
fn get_alone_is_a_method_name() {
  let Stmt::ClassDecl(decl) = stmt(
    r#"(ClassDeclaration "class" (BindingIdentifier "A") (ClassTail "{" (ClassBody
      (ClassElement (MethodDefinition "get" "(" (FormalParameters (FormalParameter (BindingIdentifier "x"))) ")" "{" "}"))
      (ClassElement (MethodDefinition "get" "x" "(" ")" "{" "}"))
      (ClassElement (MethodDefinition "constructor" "(" ")" "{" "}"))
      (ClassElement "static" (MethodDefinition "constructor" "(" ")" "{" "}"))
    ) "}"))"#,
  ) else {
    panic!("expected class declaration");
  };
  let kinds: Vec<(String, MethodKind, usize)> = decl
    .stx
    .class
    .body
    .stx
    .body
    .iter()
    .map(|m| match m {
      ClassMember::Method(m) => match &m.stx.key {
        Expr::Id(id) => (id.stx.name.clone(), m.stx.kind, m.stx.value.stx.func.params.len()),
        other => panic!("unexpected key {:?}", other),
      },
      other => panic!("unexpected member {:?}", other),
    })
    .collect();
  assert_eq!(kinds, vec![
    ("get".to_string(), MethodKind::Method, 1),
    ("x".to_string(), MethodKind::Get, 0),
    ("constructor".to_string(), MethodKind::Constructor, 0),
    ("constructor".to_string(), MethodKind::Method, 0),
  ]);
}

#[test]
fn class_fields_private_names_and_static_blocks() {
  let Stmt::ClassDecl(decl) = stmt(
    r##"(ClassDeclaration "class" (BindingIdentifier "C") (ClassHeritage "extends" (IdentifierReference "B")) "{" (ClassBody
      (ClassElement (FieldDefinition "#count" (Initializer "=" (Literal "0"))) ";")
      (ClassElement "static" (FieldDefinition "y") ";")
      (ClassElement (ClassStaticBlock "static" "{" (ClassStaticBlockBody (ExpressionStatement (MemberExpression (ThisExpression "this") "." "#count") ";")) "}"))
    ) "}")"##,
  ) else {
    panic!("expected class declaration");
  };
  assert_estree_eq(
    to_json(&decl),
    json!({
      "type": "ClassDeclaration",
      "id": {"type": "Identifier", "name": "C"},
      "superClass": {"type": "Identifier", "name": "B"},
      "body": {
        "type": "ClassBody",
        "body": [
          {
            "type": "PropertyDefinition",
            "key": {"type": "PrivateIdentifier", "name": "count"},
            "value": {"type": "Literal", "value": 0, "raw": "0"},
            "computed": false,
            "static": false,
          },
          {
            "type": "PropertyDefinition",
            "key": {"type": "Identifier", "name": "y"},
            "value": null,
            "computed": false,
            "static": true,
          },
          {
            "type": "StaticBlock",
            "body": [{
              "type": "ExpressionStatement",
              "expression": {
                "type": "MemberExpression",
                "object": {"type": "ThisExpression"},
                "property": {"type": "PrivateIdentifier", "name": "count"},
                "computed": false,
                "optional": false,
              },
            }],
          },
        ],
      },
    }),
  );
}

#[test]
fn three_clause_for_loop() {
  let Stmt::For(f) = stmt(
    r#"(ForStatement "for" "("
      (LexicalDeclaration (LetOrConst "let") (BindingList (LexicalBinding (BindingIdentifier "i") (Initializer "=" (Literal "0")))) ";")
      (RelationalExpression (IdentifierReference "i") "<" (IdentifierReference "n")) ";"
      (UpdateExpression (IdentifierReference "i") "++")
      ")" (Statement (EmptyStatement ";")))"#,
  ) else {
    panic!("expected for statement");
  };
  let Some(ForInit::VarDecl(decl)) = &f.stx.init else {
    panic!("expected declaration initializer");
  };
  assert_eq!(decl.stx.declarations.len(), 1);
  assert_eq!(f.stx.test.as_ref().map(Expr::type_name), Some("BinaryExpression"));
  let Some(Expr::Update(update)) = &f.stx.update else {
    panic!("expected update expression");
  };
  assert!(!update.stx.prefix);
  assert!(matches!(f.stx.body, Stmt::Empty(_)));
}

#[test]
fn for_loop_with_every_clause_empty() {
  let Stmt::For(f) = stmt(r#"(ForStatement "for" "(" ";" ";" ")" (EmptyStatement ";"))"#) else {
    panic!("expected for statement");
  };
  assert!(f.stx.init.is_none());
  assert!(f.stx.test.is_none());
  assert!(f.stx.update.is_none());
}

#[test]
fn for_in_with_var_binding() {
  let Stmt::ForIn(f) = stmt(
    r#"(ForInOfStatement "for" "(" "var" (ForBinding (BindingIdentifier "k")) "in" (IdentifierReference "o") ")" (EmptyStatement ";"))"#,
  ) else {
    panic!("expected for-in statement");
  };
  let ForHead::VarDecl(decl) = &f.stx.left else {
    panic!("expected declaration head");
  };
  assert!(decl.stx.declarations[0].elem.stx.init.is_none());
  assert!(matches!(decl.stx.declarations[0].elem.stx.id, Pat::Id(_)));
}

#[test]
fn for_of_target_kinds() {
  let Stmt::ForOf(f) = stmt(
    r#"(ForInOfStatement "for" "(" (LeftHandSideExpression (IdentifierReference "x")) "of" (IdentifierReference "xs") ")" (EmptyStatement ";"))"#,
  ) else {
    panic!("expected for-of statement");
  };
  assert!(!f.stx.await_);
  assert!(matches!(f.stx.left, ForHead::Pat(Pat::Id(_))));

  let Stmt::ForIn(f) = stmt(
    r#"(ForInOfStatement "for" "(" (MemberExpression (IdentifierReference "a") "." "b") "in" (IdentifierReference "o") ")" (EmptyStatement ";"))"#,
  ) else {
    panic!("expected for-in statement");
  };
  assert!(matches!(f.stx.left, ForHead::Expr(Expr::Member(_))));
}

#[test]
fn for_await_of() {
  let Stmt::ForOf(f) = stmt(
    r#"(ForInOfStatement "for" "await" "(" (ForDeclaration (LetOrConst "const") (ForBinding (BindingIdentifier "v"))) "of" (IdentifierReference "s") ")" (Block "{" "}"))"#,
  ) else {
    panic!("expected for-of statement");
  };
  assert!(f.stx.await_);
  assert!(f.stx.await_keyword.is_some());
  assert!(matches!(f.stx.left, ForHead::VarDecl(_)));
  assert!(matches!(f.stx.body, Stmt::Block(_)));
}

#[test]
fn optional_chain_marks_only_the_link_after_question_dot() {
  let e = expr(
    r#"(OptionalExpression (IdentifierReference "a") (OptionalChain "?." "b" "." "c" (Arguments "(" ")")))"#,
  );
  assert_estree_eq(
    to_json(&e),
    json!({
      "type": "ChainExpression",
      "expression": {
        "type": "CallExpression",
        "callee": {
          "type": "MemberExpression",
          "object": {
            "type": "MemberExpression",
            "object": {"type": "Identifier", "name": "a"},
            "property": {"type": "Identifier", "name": "b"},
            "computed": false,
            "optional": true,
          },
          "property": {"type": "Identifier", "name": "c"},
          "computed": false,
          "optional": false,
        },
        "arguments": [],
        "optional": false,
      },
    }),
  );
}

#[test]
fn parenthesized_chain_keeps_its_boundary() {
  let e = expr(
    r#"(OptionalExpression
      (ParenthesizedExpression "(" (OptionalExpression (IdentifierReference "a") (OptionalChain "?." "b")) ")")
      (OptionalChain "?." "c"))"#,
  );
  let json = to_json(&e);
  assert_eq!(json["type"], json!("ChainExpression"));
  assert_eq!(json["expression"]["optional"], json!(true));
  assert_eq!(json["expression"]["object"]["type"], json!("ChainExpression"));
  assert_eq!(json["expression"]["object"]["expression"]["property"]["name"], json!("b"));

  // Without parentheses the links join one chain.
  let e = expr(
    r#"(OptionalExpression
      (OptionalExpression (IdentifierReference "a") (OptionalChain "?." "b"))
      (OptionalChain "?." "c"))"#,
  );
  let json = to_json(&e);
  assert_eq!(json["type"], json!("ChainExpression"));
  assert_eq!(json["expression"]["object"]["type"], json!("MemberExpression"));
}

#[test]
fn tagged_template_with_octal_escape_has_no_cooked_value() {
  let e = expr(r#"(MemberExpression (IdentifierReference "tag") (TemplateLiteral "`\\1`"))"#);
  let json = to_json(&e);
  assert_eq!(json["type"], json!("TaggedTemplateExpression"));
  assert_eq!(json["quasi"]["quasis"][0]["value"], json!({"raw": "\\1", "cooked": null}));
}

#[test]
fn optional_computed_member() {
  let Expr::Chain(chain) = expr(r#"(OptionalExpression (IdentifierReference "a") (OptionalChain "?." "[" (Literal "0") "]"))"#) else {
    panic!("expected chain");
  };
  let Expr::Member(member) = &chain.stx.expression else {
    panic!("expected member");
  };
  assert!(member.stx.computed);
  assert!(member.stx.optional);
}

#[test]
fn switch_with_default() {
  let Stmt::Switch(s) = stmt(
    r#"(SwitchStatement "switch" "(" (IdentifierReference "x") ")" (CaseBlock "{"
      (CaseClauses (CaseClause "case" (Literal "1") ":" (BreakStatement "break" ";")))
      (DefaultClause "default" ":")
    "}"))"#,
  ) else {
    panic!("expected switch");
  };
  assert_eq!(s.stx.cases.len(), 2);
  assert!(s.stx.cases[0].stx.test.is_some());
  assert!(matches!(s.stx.cases[0].stx.consequent.as_slice(), [Stmt::Break(_)]));
  assert!(s.stx.cases[1].stx.test.is_none());
  assert!(s.stx.cases[1].stx.consequent.is_empty());
}

#[test]
fn try_catch_finally() {
  let s = stmt(
    r#"(TryStatement "try" (Block "{" "}")
      (Catch "catch" "(" (CatchParameter (BindingIdentifier "e")) ")" (Block "{" "}"))
      (Finally "finally" (Block "{" "}")))"#,
  );
  assert_estree_eq(
    to_json(&s),
    json!({
      "type": "TryStatement",
      "block": {"type": "BlockStatement", "body": []},
      "handler": {
        "type": "CatchClause",
        "param": {"type": "Identifier", "name": "e"},
        "body": {"type": "BlockStatement", "body": []},
      },
      "finalizer": {"type": "BlockStatement", "body": []},
    }),
  );
}

#[test]
fn catch_without_binding() {
  let Stmt::Try(t) = stmt(r#"(TryStatement "try" (Block "{" "}") (Catch "catch" (Block "{" "}")))"#) else {
    panic!("expected try");
  };
  let handler = t.stx.handler.as_ref().unwrap();
  assert!(handler.stx.param.is_none());
  assert!(t.stx.finalizer.is_none());
}

#[test]
fn try_needs_a_handler_or_finalizer() {
  let err = lowerer()
    .lower_stmt(&cst(r#"(TryStatement "try" (Block "{" "}"))"#))
    .unwrap_err();
  assert_eq!(err.code(), "LW0002");
  assert_eq!(err.kind, "TryStatement");
}

#[test]
fn labelled_loop_with_continue() {
  let s = stmt(
    r#"(LabelledStatement (LabelIdentifier "outer") ":" (LabelledItem (Statement (IterationStatement
      (WhileStatement "while" "(" (Literal "true") ")" (Statement (ContinueStatement "continue" (LabelIdentifier "outer") ";")))))))"#,
  );
  assert_estree_eq(
    to_json(&s),
    json!({
      "type": "LabeledStatement",
      "label": {"type": "Identifier", "name": "outer"},
      "body": {
        "type": "WhileStatement",
        "test": {"type": "Literal", "value": true, "raw": "true"},
        "body": {"type": "ContinueStatement", "label": {"type": "Identifier", "name": "outer"}},
      },
    }),
  );
}

#[test]
fn import_with_attributes() {
  let s = stmt(
    r#"(ImportDeclaration "import"
      (ImportClause (ImportedDefaultBinding (BindingIdentifier "a")) ","
        (NamedImports "{" (ImportsList
          (ImportSpecifier "b" "as" (ImportedBinding (BindingIdentifier "c"))) ","
          (ImportSpecifier (ImportedBinding (BindingIdentifier "d")))) "}"))
      (FromClause "from" (ModuleSpecifier "'./m.json'"))
      (WithClause "with" "{" (WithEntries (AttributeKey "type") ":" (Literal "'json'")) "}")
      ";")"#,
  );
  assert_estree_eq(
    to_json(&s),
    json!({
      "type": "ImportDeclaration",
      "specifiers": [
        {"type": "ImportDefaultSpecifier", "local": {"type": "Identifier", "name": "a"}},
        {
          "type": "ImportSpecifier",
          "imported": {"type": "Identifier", "name": "b"},
          "local": {"type": "Identifier", "name": "c"},
        },
        {
          "type": "ImportSpecifier",
          "imported": {"type": "Identifier", "name": "d"},
          "local": {"type": "Identifier", "name": "d"},
        },
      ],
      "source": {"type": "Literal", "value": "./m.json", "raw": "'./m.json'"},
      "attributes": [{
        "type": "ImportAttribute",
        "key": {"type": "Identifier", "name": "type"},
        "value": {"type": "Literal", "value": "json", "raw": "'json'"},
      }],
    }),
  );
}

#[test]
fn namespace_import() {
  let Stmt::Import(import) = stmt(
    r#"(ImportDeclaration "import" (ImportClause (NameSpaceImport "*" "as" (ImportedBinding (BindingIdentifier "ns")))) (FromClause "from" (ModuleSpecifier "'m'")) ";")"#,
  ) else {
    panic!("expected import");
  };
  assert_eq!(import.stx.specifiers.len(), 1);
  assert!(import.stx.attributes.is_empty());
  assert_eq!(import.stx.source.stx.value, "m");
}

#[test]
fn export_forms() {
  let named = stmt(
    r#"(ExportDeclaration "export" (NamedExports "{" (ExportsList (ExportSpecifier "x" "as" "default") "," (ExportSpecifier "y")) "}") ";")"#,
  );
  assert_estree_eq(
    to_json(&named),
    json!({
      "type": "ExportNamedDeclaration",
      "declaration": null,
      "specifiers": [
        {
          "type": "ExportSpecifier",
          "local": {"type": "Identifier", "name": "x"},
          "exported": {"type": "Identifier", "name": "default"},
        },
        {
          "type": "ExportSpecifier",
          "local": {"type": "Identifier", "name": "y"},
          "exported": {"type": "Identifier", "name": "y"},
        },
      ],
      "source": null,
      "attributes": [],
    }),
  );

  let Stmt::ExportAll(all) = stmt(
    r#"(ExportDeclaration "export" (ExportFromClause "*" "as" "ns") (FromClause "from" (ModuleSpecifier "'m'")) ";")"#,
  ) else {
    panic!("expected export all");
  };
  assert!(all.stx.exported.is_some());
  assert_eq!(all.stx.source.stx.value, "m");

  let Stmt::ExportDefault(default) = stmt(
    r#"(ExportDeclaration "export" "default" (HoistableDeclaration (FunctionDeclaration "function" "(" ")" "{" (FunctionBody) "}")))"#,
  ) else {
    panic!("expected export default");
  };
  assert_eq!(to_json(&default)["declaration"]["type"], "FunctionDeclaration");

  let Stmt::ExportNamed(decl) = stmt(
    r#"(ExportDeclaration "export" (Declaration (LexicalDeclaration (LetOrConst "const") (BindingList (LexicalBinding (BindingIdentifier "a") (Initializer "=" (Literal "1")))) ";")))"#,
  ) else {
    panic!("expected export declaration");
  };
  assert!(matches!(decl.stx.declaration, Some(Stmt::VarDecl(_))));
  assert!(decl.stx.specifiers.is_empty());
}

#[test]
fn directive_prologue() {
  let program = lowerer()
    .lower_program(&cst(
      r#"(Script (ScriptBody (StatementList
        (ExpressionStatement (Literal "'use strict'") ";")
        (ExpressionStatement (Literal "'other'") ";")
        (ExpressionStatement (IdentifierReference "a") ";")
        (ExpressionStatement (Literal "'late'") ";"))))"#,
    ))
    .unwrap();
  assert_eq!(program.stx.source_type, SourceType::Script);
  let directives: Vec<Option<&str>> = program
    .stx
    .body
    .iter()
    .map(|s| match s {
      Stmt::Expr(e) => e.stx.directive.as_deref(),
      other => panic!("unexpected statement {:?}", other),
    })
    .collect();
  assert_eq!(directives, vec![Some("use strict"), Some("other"), None, None]);
}

#[test]
fn parenthesized_string_is_not_a_directive() {
  let program = lowerer()
    .lower_program(&cst(
      r#"(Module (ExpressionStatement (ParenthesizedExpression "(" (Literal "'use strict'") ")") ";"))"#,
    ))
    .unwrap();
  assert_eq!(program.stx.source_type, SourceType::Module);
  let Stmt::Expr(e) = &program.stx.body[0] else {
    panic!("expected expression statement");
  };
  assert!(e.stx.directive.is_none());
}

#[test]
fn function_body_directives() {
  let Stmt::FuncDecl(f) = stmt(
    r#"(FunctionDeclaration "function" (BindingIdentifier "f") "(" ")" "{" (FunctionBody (ExpressionStatement (Literal "'use strict'") ";")) "}")"#,
  ) else {
    panic!("expected function");
  };
  let Stmt::Expr(e) = &f.stx.func.body.stx.body[0] else {
    panic!("expected expression statement");
  };
  assert_eq!(e.stx.directive.as_deref(), Some("use strict"));
}

#[test]
fn unknown_kind_is_named_in_the_error() {
  let err = lowerer().lower_expr(&cst(r#"(JsxElement "<" "a" ">")"#)).unwrap_err();
  assert_eq!(err.typ, LowerErrorType::UnsupportedNodeKind);
  assert_eq!(err.code(), "LW0001");
  assert_eq!(err.kind, "JsxElement");
  assert_eq!(err.loc, Loc(0, 5));
}

#[test]
fn missing_child_is_malformed() {
  let err = lowerer()
    .lower_stmt(&cst(r#"(ThrowStatement "throw" ";")"#))
    .unwrap_err();
  assert_eq!(err.typ, LowerErrorType::MalformedCst("thrown expression"));
}

#[test]
fn every_node_has_a_span() {
  let program = lowerer()
    .lower_program(&cst(
      r#"(Module
        (ImportDeclaration "import" (ImportClause (ImportedDefaultBinding (BindingIdentifier "a"))) (FromClause "from" (ModuleSpecifier "'m'")) ";")
        (LexicalDeclaration (LetOrConst "const") (BindingList (LexicalBinding (BindingIdentifier "f") (Initializer "="
          (ArrowFunction (ArrowParameters (CoverParenthesizedExpressionAndArrowParameterList "(" (ArrayLiteral "[" "," (IdentifierReference "x") "]") ")")) "=>"
            (ConciseBody "{" (FunctionBody (ReturnStatement "return" (TemplateLiteral (TemplateHead "`a${") (IdentifierReference "x") (TemplateTail "}b`")) ";")) "}")))))
          ";")
        (ClassDeclaration "class" (BindingIdentifier "K") (ClassTail "{" (ClassBody (ClassElement (MethodDefinition "m" "(" ")" "{" "}"))) "}")))"#,
    ))
    .unwrap();
  assert_spans(&to_json(&program));
}
