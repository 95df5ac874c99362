use crate::loc::Loc;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Formatter;
use std::error::Error;
use std::fmt::Display;

/// A stable classification of the fatal errors a lowering pass can raise.
///
/// Both indicate that the grammar accepted a shape this stage cannot represent, so neither is
/// recoverable: the pass aborts and no AST is returned.
///
/// Diagnostic codes (prefix `LW`) are assigned per variant and are stable:
/// - `LW0001`: [`LowerErrorType::UnsupportedNodeKind`]
/// - `LW0002`: [`LowerErrorType::MalformedCst`]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum LowerErrorType {
  /// No lowering rule is registered for the CST kind.
  UnsupportedNodeKind,
  /// A required child production is missing. The payload names what was expected.
  MalformedCst(&'static str),
}

#[derive(Clone)]
pub struct LowerError {
  pub typ: LowerErrorType,
  /// Kind of the offending CST node.
  pub kind: String,
  pub loc: Loc,
}

impl LowerError {
  pub fn new(typ: LowerErrorType, kind: &str, loc: Loc) -> LowerError {
    LowerError {
      typ,
      kind: kind.to_string(),
      loc,
    }
  }

  pub fn code(&self) -> &'static str {
    self.typ.code()
  }
}

impl Debug for LowerError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} around loc [{}:{}]", self, self.loc.0, self.loc.1)
  }
}

impl Display for LowerError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.typ.code(), self.typ.message(&self.kind))
  }
}

impl Error for LowerError {}

impl PartialEq for LowerError {
  fn eq(&self, other: &Self) -> bool {
    self.typ == other.typ && self.kind == other.kind
  }
}

impl Eq for LowerError {}

pub type LowerResult<T> = Result<T, LowerError>;

impl LowerErrorType {
  /// Stable diagnostic code for this error variant.
  pub fn code(&self) -> &'static str {
    match self {
      LowerErrorType::UnsupportedNodeKind => "LW0001",
      LowerErrorType::MalformedCst(_) => "LW0002",
    }
  }

  /// Human-readable message describing this error for a node of the given kind.
  pub fn message(&self, kind: &str) -> String {
    match self {
      LowerErrorType::UnsupportedNodeKind => {
        format!("no lowering rule for CST node kind `{}`", kind)
      }
      LowerErrorType::MalformedCst(expected) => {
        format!("malformed `{}` node: expected {}", kind, expected)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn messages_name_the_offending_kind() {
    let err = Loc(3, 9).error(LowerErrorType::UnsupportedNodeKind, "JsxElement");
    assert_eq!(err.code(), "LW0001");
    assert_eq!(
      err.to_string(),
      "LW0001: no lowering rule for CST node kind `JsxElement`"
    );
    assert_eq!(format!("{:?}", err), format!("{} around loc [3:9]", err));
  }

  #[test]
  fn malformed_names_expected_child() {
    let err = Loc(0, 4).error(LowerErrorType::MalformedCst("class tail"), "ClassDeclaration");
    assert_eq!(err.code(), "LW0002");
    assert!(err.to_string().contains("expected class tail"));
  }
}
