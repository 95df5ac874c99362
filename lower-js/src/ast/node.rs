use crate::loc::Loc;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;
use serde::Serializer;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Formatter;

#[derive(Clone, PartialEq, Drive, DriveMut)]
pub struct Node<S: Drive + DriveMut> {
  // Always set: copied from the CST node this was lowered from, or the zero span for synthesized
  // nodes.
  #[drive(skip)]
  pub loc: Loc,
  pub stx: Box<S>,
}

impl<S: Drive + DriveMut> Node<S> {
  pub fn new(loc: Loc, stx: S) -> Node<S> {
    Node {
      loc,
      stx: Box::new(stx),
    }
  }

  /// Builds a new node from this node's syntax, copying the location.
  pub fn derive_stx<T: Drive + DriveMut, F: FnOnce(&S) -> T>(&self, f: F) -> Node<T> {
    Node {
      loc: self.loc,
      stx: Box::new(f(&self.stx)),
    }
  }
}

impl<S: Debug + Drive + DriveMut> Debug for Node<S> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    self.stx.fmt(f)
  }
}

// ESTree puts the location next to the node's own fields.
#[derive(Serialize)]
struct NodeRepr<'a, S> {
  #[serde(flatten)]
  stx: &'a S,
  start: usize,
  end: usize,
}

impl<S: Serialize + Drive + DriveMut> Serialize for Node<S> {
  fn serialize<Se: Serializer>(&self, serializer: Se) -> Result<Se::Ok, Se::Error> {
    NodeRepr {
      stx: self.stx.as_ref(),
      start: self.loc.0,
      end: self.loc.1,
    }
    .serialize(serializer)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
  #[serde(tag = "type", rename = "Probe", rename_all = "camelCase")]
  struct Probe {
    #[drive(skip)]
    some_field: u32,
  }

  #[test]
  fn serializes_type_fields_and_span() {
    let node = Node::new(Loc(2, 7), Probe { some_field: 1 });
    assert_eq!(
      serde_json::to_value(&node).unwrap(),
      json!({"type": "Probe", "someField": 1, "start": 2, "end": 7})
    );
  }
}
