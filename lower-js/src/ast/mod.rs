//! ESTree-shaped output tree.
//!
//! Every node is a [`node::Node`] holding its span and a boxed syntax struct. Each syntax struct
//! serializes its own ESTree `type`, so the enums over them (`Expr`, `Pat`, `Stmt`, ...) are
//! untagged.

/// Implements `loc()` and `type_name()` for an enum whose variants each wrap one `Node`.
macro_rules! impl_node_enum {
  ($enum:ident { $($variant:ident => $name:literal),* $(,)? }) => {
    impl $enum {
      pub fn loc(&self) -> $crate::loc::Loc {
        match self {
          $($enum::$variant(n) => n.loc,)*
        }
      }

      /// ESTree `type` of the wrapped node.
      pub fn type_name(&self) -> &'static str {
        match self {
          $($enum::$variant(_) => $name,)*
        }
      }
    }
  };
}

pub(crate) use impl_node_enum;

pub mod class;
pub mod decl;
pub mod expr;
pub mod func;
pub mod list;
pub mod lit;
pub mod module;
pub mod node;
pub mod pat;
pub mod stmt;
pub mod ts;

#[cfg(test)]
mod tests {
  use super::expr::Expr;
  use super::expr::IdExpr;
  use super::expr::ThisExpr;
  use super::node::Node;
  use super::pat::IdPat;
  use super::pat::Pat;
  use super::ts::PatTs;
  use crate::loc::Loc;
  use serde_json::json;

  #[test]
  fn enums_serialize_as_their_node() {
    let e = Expr::Id(Node::new(Loc(0, 1), IdExpr {
      name: "a".to_string(),
    }));
    assert_eq!(e.type_name(), "Identifier");
    assert_eq!(e.loc(), Loc(0, 1));
    assert_eq!(
      serde_json::to_value(&e).unwrap(),
      json!({"type": "Identifier", "name": "a", "start": 0, "end": 1})
    );
    let this = Expr::This(Node::new(Loc(2, 6), ThisExpr {}));
    assert_eq!(
      serde_json::to_value(&this).unwrap(),
      json!({"type": "ThisExpression", "start": 2, "end": 6})
    );
  }

  #[test]
  fn absent_dialect_payload_is_not_serialized() {
    let plain = Pat::Id(Node::new(Loc(0, 1), IdPat {
      name: "x".to_string(),
      ts: None,
    }));
    assert_eq!(
      serde_json::to_value(&plain).unwrap(),
      json!({"type": "Identifier", "name": "x", "start": 0, "end": 1})
    );
    let typed = Pat::Id(Node::new(Loc(0, 2), IdPat {
      name: "x".to_string(),
      ts: Some(Box::new(PatTs {
        type_annotation: None,
        optional: true,
      })),
    }));
    assert_eq!(
      serde_json::to_value(&typed).unwrap(),
      json!({
        "type": "Identifier",
        "name": "x",
        "typeAnnotation": null,
        "optional": true,
        "start": 0,
        "end": 2,
      })
    );
  }
}
