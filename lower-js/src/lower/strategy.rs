use super::Lowerer;
use crate::ast::class::Class;
use crate::ast::class::MethodDef;
use crate::ast::class::PropDef;
use crate::ast::decl::VarDeclarator;
use crate::ast::expr::ArrowFuncExpr;
use crate::ast::func::Function;
use crate::ast::node::Node;
use crate::ast::pat::Pat;
use crate::ast::stmt::Stmt;
use crate::cst::CstNode;
use crate::error::LowerResult;
use crate::Dialect;

/// The constructs whose CST shape differs between dialects, one method per construct.
///
/// A dialect implements this by wrapping another strategy and delegating to it for everything it
/// leaves unchanged (see [`crate::ts::TsStrategy`]). Every method receives the same CST node the
/// base version would and must return the same output kind. Implementations recurse through
/// `lw`, which dispatches nested constructs back through the active strategy.
pub trait LowerStrategy: Send + Sync {
  fn dialect(&self) -> Dialect;

  /// `BindingElement`, `SingleNameBinding`, `FormalParameter`, `BindingRestElement` and
  /// `FunctionRestParameter`.
  fn binding_element(&self, lw: &mut Lowerer<'_>, node: &CstNode) -> LowerResult<Pat>;

  /// `VariableDeclaration` and `LexicalBinding`.
  fn variable_declarator(
    &self,
    lw: &mut Lowerer<'_>,
    node: &CstNode,
  ) -> LowerResult<Node<VarDeclarator>>;

  /// Function declarations and expressions of every flavour (plain, generator, async).
  fn function(&self, lw: &mut Lowerer<'_>, node: &CstNode) -> LowerResult<Function>;

  /// `ArrowFunction` and `AsyncArrowFunction`.
  fn arrow_function(&self, lw: &mut Lowerer<'_>, node: &CstNode)
    -> LowerResult<Node<ArrowFuncExpr>>;

  /// `ClassDeclaration` and `ClassExpression`.
  fn class(&self, lw: &mut Lowerer<'_>, node: &CstNode) -> LowerResult<Class>;

  /// Method-like class elements: `MethodDefinition` and its generator/async variants.
  fn method(&self, lw: &mut Lowerer<'_>, node: &CstNode) -> LowerResult<Node<MethodDef>>;

  /// `FieldDefinition`.
  fn field(&self, lw: &mut Lowerer<'_>, node: &CstNode) -> LowerResult<Node<PropDef>>;

  /// Statement-level kinds that only exist in this dialect. `None` means the kind is unknown
  /// here too.
  fn declaration(&self, lw: &mut Lowerer<'_>, node: &CstNode) -> Option<LowerResult<Stmt>>;
}

/// The base ECMAScript lowering.
#[derive(Clone, Copy, Debug, Default)]
pub struct EcmaStrategy;

impl LowerStrategy for EcmaStrategy {
  fn dialect(&self) -> Dialect {
    Dialect::Js
  }

  fn binding_element(&self, lw: &mut Lowerer<'_>, node: &CstNode) -> LowerResult<Pat> {
    lw.base_binding_element(node)
  }

  fn variable_declarator(
    &self,
    lw: &mut Lowerer<'_>,
    node: &CstNode,
  ) -> LowerResult<Node<VarDeclarator>> {
    lw.base_variable_declarator(node)
  }

  fn function(&self, lw: &mut Lowerer<'_>, node: &CstNode) -> LowerResult<Function> {
    lw.base_function(node)
  }

  fn arrow_function(
    &self,
    lw: &mut Lowerer<'_>,
    node: &CstNode,
  ) -> LowerResult<Node<ArrowFuncExpr>> {
    lw.base_arrow_function(node)
  }

  fn class(&self, lw: &mut Lowerer<'_>, node: &CstNode) -> LowerResult<Class> {
    lw.base_class(node)
  }

  fn method(&self, lw: &mut Lowerer<'_>, node: &CstNode) -> LowerResult<Node<MethodDef>> {
    lw.base_method(node)
  }

  fn field(&self, lw: &mut Lowerer<'_>, node: &CstNode) -> LowerResult<Node<PropDef>> {
    lw.base_field(node)
  }

  fn declaration(&self, _lw: &mut Lowerer<'_>, _node: &CstNode) -> Option<LowerResult<Stmt>> {
    None
  }
}
