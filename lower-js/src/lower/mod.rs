use crate::ast::expr::Expr;
use crate::ast::module::Program;
use crate::ast::node::Node;
use crate::ast::pat::Pat;
use crate::ast::stmt::Stmt;
use crate::cst::CstNode;
use crate::error::LowerResult;
use crate::DialectGap;
use crate::DroppedFeature;
use crate::LowerOptions;
use cache::MemoCache;
use cache::PassStats;
use strategy::LowerStrategy;
use tracing::debug;
use tracing::debug_span;

pub mod cache;
pub mod class;
pub mod cover;
pub mod decl;
pub mod expr;
pub mod func;
pub mod lit;
pub mod member;
pub mod module;
pub mod operator;
pub mod router;
pub mod stmt;
pub mod strategy;
#[cfg(test)]
mod tests;
pub mod tokens;

/// State of one lowering pass over a CST.
///
/// Lowering methods live in the submodules as `impl Lowerer` blocks, one per family of
/// productions. The `lower_*` methods are pass entry points: each starts a fresh pass with an
/// empty memo cache. The unprefixed methods (`expr`, `stmt`, `binding`, ...) recurse within the
/// current pass and are what strategies call.
pub struct Lowerer<'s> {
  strategy: &'s dyn LowerStrategy,
  options: LowerOptions,
  cache: MemoCache,
  stats: PassStats,
  dropped: Vec<DroppedFeature>,
}

impl<'s> Lowerer<'s> {
  pub fn new(strategy: &'s dyn LowerStrategy, options: LowerOptions) -> Lowerer<'s> {
    Lowerer {
      strategy,
      options,
      cache: MemoCache::new(),
      stats: PassStats::default(),
      dropped: Vec::new(),
    }
  }

  /// The strategy is borrowed for `'s`, not from `self`, so it can be handed `self` mutably.
  pub fn strategy(&self) -> &'s dyn LowerStrategy {
    self.strategy
  }

  pub fn options(&self) -> LowerOptions {
    self.options
  }

  pub fn stats(&self) -> PassStats {
    self.stats
  }

  pub fn dropped(&self) -> &[DroppedFeature] {
    &self.dropped
  }

  pub fn take_dropped(&mut self) -> Vec<DroppedFeature> {
    std::mem::take(&mut self.dropped)
  }

  /// Records a dialect feature that has no AST representation.
  pub fn record_drop(&mut self, gap: DialectGap, node: &CstNode) {
    debug!(?gap, kind = %node.kind, start = node.loc.0, end = node.loc.1, "dropped dialect feature");
    self.dropped.push(DroppedFeature {
      gap,
      loc: node.loc,
    });
  }

  fn begin_pass(&mut self) {
    self.cache.clear();
  }

  fn end_pass<T>(&mut self, res: LowerResult<T>) -> LowerResult<T> {
    // Addresses are only stable while the caller keeps the tree borrowed.
    self.cache.clear();
    if let Err(err) = &res {
      debug!(
        code = err.code(),
        kind = %err.kind,
        start = err.loc.0,
        end = err.loc.1,
        "lowering failed"
      );
    }
    res
  }

  pub fn lower_program(&mut self, cst: &CstNode) -> LowerResult<Node<Program>> {
    let span = debug_span!(
      "lower_program",
      dialect = ?self.options.dialect,
      source_type = tracing::field::Empty,
      nodes = tracing::field::Empty,
      cache_hits = tracing::field::Empty,
    );
    let _entered = span.enter();
    self.begin_pass();
    let before = self.stats;
    let res = self.program(cst);
    if let Ok(program) = &res {
      span.record("source_type", tracing::field::debug(program.stx.source_type));
    }
    span.record("nodes", self.stats.nodes - before.nodes);
    span.record("cache_hits", self.stats.cache_hits - before.cache_hits);
    self.end_pass(res)
  }

  pub fn lower_expr(&mut self, cst: &CstNode) -> LowerResult<Expr> {
    self.begin_pass();
    let res = self.expr(cst);
    self.end_pass(res)
  }

  pub fn lower_stmt(&mut self, cst: &CstNode) -> LowerResult<Stmt> {
    self.begin_pass();
    let res = self.stmt(cst);
    self.end_pass(res)
  }

  /// Lowers a binding production (`BindingIdentifier`, `ObjectBindingPattern`, ...) or a cover
  /// expression read as an assignment pattern.
  pub fn lower_pat(&mut self, cst: &CstNode) -> LowerResult<Pat> {
    self.begin_pass();
    let res = self.pat(cst);
    self.end_pass(res)
  }
}
