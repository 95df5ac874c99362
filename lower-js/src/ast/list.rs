use crate::token::Token;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;
use serde::Serializer;

/// One element of a comma-separated list together with the comma that follows it.
///
/// Elisions in sparse lists are wrappers whose `elem` is `None`. The last element before the
/// closing delimiter has no comma unless the source has a trailing one.
#[derive(Clone, PartialEq, Debug, Drive, DriveMut)]
pub struct ListElem<T: Drive + DriveMut> {
  pub elem: T,
  pub comma: Option<Token>,
}

impl<T: Drive + DriveMut> ListElem<T> {
  pub fn new(elem: T, comma: Option<Token>) -> ListElem<T> {
    ListElem { elem, comma }
  }

  pub fn bare(elem: T) -> ListElem<T> {
    ListElem { elem, comma: None }
  }

  pub fn map<U: Drive + DriveMut, F: FnOnce(T) -> U>(self, f: F) -> ListElem<U> {
    ListElem {
      elem: f(self.elem),
      comma: self.comma,
    }
  }
}

// ESTree lists are plain arrays; separators are only kept in memory.
impl<T: Serialize + Drive + DriveMut> Serialize for ListElem<T> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    self.elem.serialize(serializer)
  }
}

/// Strips the wrappers off a list.
pub fn elems<T: Drive + DriveMut>(list: &[ListElem<T>]) -> impl Iterator<Item = &T> {
  list.iter().map(|e| &e.elem)
}
