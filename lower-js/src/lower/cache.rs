use crate::ast::expr::Expr;
use crate::ast::pat::Pat;
use crate::cst::CstId;
use ahash::HashMap;
use ahash::HashMapExt;
use serde::Serialize;

/// Which reading of a CST node a cached result belongs to. A cover production lowered as an
/// expression and the same node read as a pattern are separate entries.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Interp {
  Expr,
  Pat,
}

#[derive(Clone, Debug)]
enum Cached {
  Expr(Expr),
  Pat(Pat),
}

/// Per-pass side table from CST node identity to its lowered form.
///
/// Keys are node addresses, which are only meaningful while the tree is borrowed, so the table
/// must be cleared whenever a new pass starts.
#[derive(Default, Debug)]
pub struct MemoCache {
  entries: HashMap<(CstId, Interp), Cached>,
}

impl MemoCache {
  pub fn new() -> MemoCache {
    MemoCache {
      entries: HashMap::new(),
    }
  }

  pub fn clear(&mut self) {
    self.entries.clear();
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn get_expr(&self, id: CstId) -> Option<Expr> {
    match self.entries.get(&(id, Interp::Expr)) {
      Some(Cached::Expr(e)) => Some(e.clone()),
      _ => None,
    }
  }

  pub fn put_expr(&mut self, id: CstId, expr: Expr) {
    self.entries.insert((id, Interp::Expr), Cached::Expr(expr));
  }

  pub fn get_pat(&self, id: CstId) -> Option<Pat> {
    match self.entries.get(&(id, Interp::Pat)) {
      Some(Cached::Pat(p)) => Some(p.clone()),
      _ => None,
    }
  }

  pub fn put_pat(&mut self, id: CstId, pat: Pat) {
    self.entries.insert((id, Interp::Pat), Cached::Pat(pat));
  }
}

/// Counters for one pass.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Serialize)]
pub struct PassStats {
  /// CST nodes handed to the router.
  pub nodes: usize,
  pub cache_hits: usize,
  pub cache_misses: usize,
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ast::expr::IdExpr;
  use crate::ast::node::Node;
  use crate::ast::pat::IdPat;
  use crate::cst::CstNode;
  use crate::loc::Loc;

  #[test]
  fn interpretations_are_kept_apart() {
    let cst = CstNode::token("IdentifierName", "a", Loc(0, 1));
    let mut cache = MemoCache::new();
    cache.put_expr(
      cst.id(),
      Expr::Id(Node::new(cst.loc, IdExpr {
        name: "a".to_string(),
      })),
    );
    assert!(cache.get_expr(cst.id()).is_some());
    assert!(cache.get_pat(cst.id()).is_none());
    cache.put_pat(
      cst.id(),
      Pat::Id(Node::new(cst.loc, IdPat {
        name: "a".to_string(),
        ts: None,
      })),
    );
    assert_eq!(cache.len(), 2);
    cache.clear();
    assert!(cache.is_empty());
  }
}
