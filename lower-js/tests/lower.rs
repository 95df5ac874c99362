use lower_js::ast::list::elems;
use lower_js::ast::module::ImportSpecifier;
use lower_js::ast::stmt::Stmt;
use lower_js::cst::CstNode;
use lower_js::error::LowerErrorType;
use lower_js::loc::Loc;
use lower_js::lower;
use lower_js::lower_program;
use lower_js::Dialect;
use lower_js::DialectGap;
use lower_js::DroppedFeature;
use lower_js::LowerOptions;
use lower_js::SourceType;
use serde_json::json;
use serde_json::to_string_pretty;
use serde_json::Value;
use similar::ChangeTag;
use similar::TextDiff;
use std::io;
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

const TS: LowerOptions = LowerOptions {
  dialect: Dialect::Ts,
  source_type: None,
};

const TYPED_MODULE: &str = r#"(Module
  (InterfaceDeclaration "interface" (BindingIdentifier "I")
    (InterfaceExtendsClause "extends" (TypeReference (TypeName "J")))
    (ObjectType "{" "}"))
  (TypeAliasDeclaration "type" (BindingIdentifier "A") (TypeParameters "<" "T" ">") "="
    (TypeReference (TypeName "B")) ";"))"#;

fn sexpr(src: &str) -> CstNode {
  CstNode::from_sexpr(src).unwrap()
}

fn assert_json_eq(expected: Value, actual: Value) {
  if expected == actual {
    return;
  }
  let expected_fmt = to_string_pretty(&expected).unwrap();
  let actual_fmt = to_string_pretty(&actual).unwrap();
  let mut msg = "JSON mismatch:\n".to_string();
  for change in TextDiff::from_lines(&expected_fmt, &actual_fmt).iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    msg.push_str(&format!("{}{}", sign, change));
  }
  panic!("{}", msg);
}

#[test]
fn json_cst_to_estree() {
  let cst = CstNode::from_json(
    r#"{
      "kind": "Script",
      "loc": [0, 2],
      "children": [{
        "kind": "ExpressionStatement",
        "loc": [0, 2],
        "children": [
          {
            "kind": "IdentifierReference",
            "loc": [0, 1],
            "children": [{"kind": "IdentifierName", "value": "a", "loc": [0, 1]}]
          },
          {"kind": "Punctuator", "value": ";", "loc": [1, 2]}
        ]
      }]
    }"#,
  )
  .unwrap();
  let program = lower_program(&cst).unwrap();
  assert_json_eq(
    json!({
      "type": "Program",
      "sourceType": "script",
      "body": [{
        "type": "ExpressionStatement",
        "expression": {"type": "Identifier", "name": "a", "start": 0, "end": 1},
        "semicolon": {"type": "Punctuator", "value": ";", "start": 1, "end": 2},
        "start": 0,
        "end": 2,
      }],
      "start": 0,
      "end": 2,
    }),
    serde_json::to_value(&program).unwrap(),
  );
}

#[test]
fn typed_module_reports_dropped_features_in_source_order() {
  let out = lower(&sexpr(TYPED_MODULE), TS).unwrap();
  assert_eq!(out.program.stx.source_type, SourceType::Module);
  assert_eq!(out.dropped, vec![
    DroppedFeature {
      gap: DialectGap::InterfaceHeritage,
      loc: Loc(12, 21),
    },
    DroppedFeature {
      gap: DialectGap::TypeParameters,
      loc: Loc(33, 38),
    },
  ]);
  let program = serde_json::to_value(&out.program).unwrap();
  assert_eq!(program["body"][0]["type"], json!("TSInterfaceDeclaration"));
  assert_eq!(program["body"][0]["body"]["body"], json!([]));
  assert_eq!(program["body"][1]["type"], json!("TSTypeAliasDeclaration"));
  assert!(out.stats.nodes > 0);
}

#[test]
fn typed_declarations_are_unsupported_in_plain_js() {
  let err = lower(&sexpr(TYPED_MODULE), LowerOptions::default()).unwrap_err();
  assert_eq!(err.typ, LowerErrorType::UnsupportedNodeKind);
  assert_eq!(err.kind, "InterfaceDeclaration");
  assert_eq!(err.loc, Loc(0, 25));
  assert_eq!(err.code(), "LW0001");
}

#[test]
fn source_type_option_overrides_root_kind() {
  let cst = sexpr(r#"(Script (ExpressionStatement (IdentifierReference "a") ";"))"#);
  let out = lower(&cst, LowerOptions {
    dialect: Dialect::Js,
    source_type: Some(SourceType::Module),
  })
  .unwrap();
  assert_eq!(out.program.stx.source_type, SourceType::Module);
  assert!(out.dropped.is_empty());
}

#[test]
fn root_must_be_script_or_module() {
  let cst = sexpr(r#"(ExpressionStatement (IdentifierReference "a") ";")"#);
  let err = lower_program(&cst).unwrap_err();
  assert_eq!(err.typ, LowerErrorType::UnsupportedNodeKind);
  assert_eq!(err.kind, "ExpressionStatement");
}

#[test]
fn list_separators_are_kept_but_not_serialized() {
  let cst = sexpr(
    r#"(Module (ImportDeclaration "import"
      (ImportClause (ImportedDefaultBinding (BindingIdentifier "a")) ","
        (NamedImports "{" (ImportsList (ImportSpecifier (ImportedBinding (BindingIdentifier "b")))) "}"))
      (FromClause "from" (ModuleSpecifier "'m'")) ";"))"#,
  );
  let program = lower_program(&cst).unwrap();
  let Stmt::Import(import) = &program.stx.body[0] else {
    panic!("expected an import declaration");
  };
  let specifiers = &import.stx.specifiers;
  assert_eq!(specifiers[0].comma.as_ref().map(|c| c.value.as_str()), Some(","));
  assert!(specifiers[1].comma.is_none());
  let kinds: Vec<&str> = elems(specifiers)
    .map(|s| match s {
      ImportSpecifier::Default(_) => "default",
      ImportSpecifier::Named(_) => "named",
      ImportSpecifier::Namespace(_) => "namespace",
    })
    .collect();
  assert_eq!(kinds, vec!["default", "named"]);

  let json = serde_json::to_value(&program).unwrap();
  assert_eq!(json["body"][0]["specifiers"][0]["type"], json!("ImportDefaultSpecifier"));
  assert!(json["body"][0]["specifiers"][0].get("comma").is_none());
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
  fn text(&self) -> String {
    String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
  }
}

impl Write for Captured {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    self.0.lock().unwrap().extend_from_slice(buf);
    Ok(buf.len())
  }

  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}

impl<'a> MakeWriter<'a> for Captured {
  type Writer = Captured;

  fn make_writer(&'a self) -> Self::Writer {
    self.clone()
  }
}

#[test]
fn passes_are_traced() {
  let captured = Captured::default();
  let subscriber = tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_writer(captured.clone())
    .with_ansi(false)
    .finish();
  tracing::subscriber::with_default(subscriber, || {
    lower(&sexpr(TYPED_MODULE), TS).unwrap();
    lower(&sexpr(TYPED_MODULE), LowerOptions::default()).unwrap_err();
  });
  let log = captured.text();
  assert!(log.contains("lower_program"), "{}", log);
  assert!(log.contains("dropped dialect feature"), "{}", log);
  assert!(log.contains("InterfaceHeritage"), "{}", log);
  assert!(log.contains("lowering failed"), "{}", log);
  assert!(log.contains("LW0001"), "{}", log);
}

#[test]
fn independent_passes_run_in_parallel() {
  let cst = sexpr(
    r#"(Script
      (LexicalDeclaration (LetOrConst "const") (BindingList (LexicalBinding (BindingIdentifier "f") (Initializer "="
        (ArrowFunction (ArrowParameters (CoverParenthesizedExpressionAndArrowParameterList "(" (IdentifierReference "x") ")"))
          "=>" (AdditiveExpression (IdentifierReference "x") "+" (Literal "1")))))) ";")
      (ExpressionStatement (CallExpression (IdentifierReference "f") (Arguments "(" (Literal "2") ")")) ";"))"#,
  );
  let expected = serde_json::to_value(lower_program(&cst).unwrap()).unwrap();
  let results: Vec<Value> = std::thread::scope(|scope| {
    let handles: Vec<_> = (0..4)
      .map(|_| scope.spawn(|| serde_json::to_value(lower_program(&cst).unwrap()).unwrap()))
      .collect();
    handles.into_iter().map(|h| h.join().unwrap()).collect()
  });
  for result in results {
    assert_json_eq(expected.clone(), result);
  }
}
