use crate::error::LowerError;
use crate::error::LowerErrorType;
use serde::Deserialize;
use serde::Serialize;
use std::cmp::max;
use std::cmp::min;
use std::ops::Add;

/// A location within the current source file expressed as UTF-8 byte offsets.
///
/// Every CST node carries one, and every AST node copies one from the CST node it was lowered
/// from. Synthesized nodes with no source counterpart use [`Loc::default`], the zero span.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  /// A zero-length location at the end of this one, for synthesized nodes that trail a
  /// production (such as the empty body of a bodiless signature).
  pub fn at_end(&self) -> Loc {
    Loc(self.1, self.1)
  }

  pub fn error(self, typ: LowerErrorType, kind: &str) -> LowerError {
    LowerError::new(typ, kind, self)
  }

  pub fn extend(&mut self, other: Loc) {
    self.0 = min(self.0, other.0);
    self.1 = max(self.1, other.1);
  }
}

impl Add for Loc {
  type Output = Loc;

  fn add(self, rhs: Self) -> Self::Output {
    let mut new = self;
    new.extend(rhs);
    new
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_loc_is_zero_span() {
    assert_eq!(Loc::default(), Loc(0, 0));
    assert_eq!(Loc(3, 8) + Loc(1, 5), Loc(1, 8));
    assert_eq!(Loc(3, 8).at_end(), Loc(8, 8));
  }
}
