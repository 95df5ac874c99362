use ast::module::Program;
use ast::node::Node;
use cst::CstNode;
use error::LowerResult;
use loc::Loc;
use lower::cache::PassStats;
use lower::strategy::EcmaStrategy;
use lower::strategy::LowerStrategy;
use lower::Lowerer;
use serde::Serialize;
use ts::TsStrategy;

pub mod ast;
pub mod cst;
pub mod error;
pub mod literal;
pub mod loc;
pub mod lower;
pub mod num;
pub mod token;
pub mod ts;
#[cfg(test)]
mod util;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dialect {
  #[default]
  Js,
  Ts,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
  Script,
  Module,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LowerOptions {
  pub dialect: Dialect,
  /// Inferred from the root CST kind (`Script` or `Module`) when not set.
  pub source_type: Option<SourceType>,
}

/// A dialect feature present in the CST that has no AST representation and was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DialectGap {
  /// `<T>` on a function, class, interface or type alias.
  TypeParameters,
  /// `implements` on a class.
  ImplementsClause,
  /// `extends` on an interface.
  InterfaceHeritage,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DroppedFeature {
  pub gap: DialectGap,
  pub loc: Loc,
}

#[derive(Debug)]
pub struct LowerOutput {
  pub program: Node<Program>,
  pub dropped: Vec<DroppedFeature>,
  pub stats: PassStats,
}

/// Lowers a `Script` or `Module` CST into an ESTree program.
pub fn lower(cst: &CstNode, options: LowerOptions) -> LowerResult<LowerOutput> {
  let ecma = EcmaStrategy;
  let ts = TsStrategy::new(EcmaStrategy);
  let strategy: &dyn LowerStrategy = match options.dialect {
    Dialect::Js => &ecma,
    Dialect::Ts => &ts,
  };
  let mut lowerer = Lowerer::new(strategy, options);
  let program = lowerer.lower_program(cst)?;
  Ok(LowerOutput {
    program,
    dropped: lowerer.take_dropped(),
    stats: lowerer.stats(),
  })
}

pub fn lower_program(cst: &CstNode) -> LowerResult<Node<Program>> {
  lower(cst, LowerOptions::default()).map(|out| out.program)
}
