//! Kind-keyed dispatch. Expression and statement lowering enter here; every nested production is
//! routed back through these tables.

use super::cover::ResolvePattern;
use super::operator::LEFT_CHAIN_KINDS;
use super::operator::RIGHT_CHAIN_KINDS;
use super::Lowerer;
use crate::ast::expr::AssignTarget;
use crate::ast::expr::Expr;
use crate::ast::pat::Pat;
use crate::ast::stmt::Stmt;
use crate::cst::CstNode;
use crate::error::LowerResult;
use ahash::HashMap;
use ahash::HashMapExt;
use once_cell::sync::Lazy;
use tracing::trace;

pub type ExprHandler = fn(&mut Lowerer<'_>, &CstNode) -> LowerResult<Expr>;
pub type StmtHandler = fn(&mut Lowerer<'_>, &CstNode) -> LowerResult<Stmt>;

/// Productions with exactly one non-token child that lower as that child.
pub static WRAPPER_KINDS: &[&str] = &[
  "BindingPattern",
  "BreakableStatement",
  "Declaration",
  "ExpressionBody",
  "HoistableDeclaration",
  "IterationStatement",
  "LabelledItem",
  "LeftHandSideExpression",
  "ModuleItem",
  "PrimaryExpression",
  "PrimaryType",
  "Statement",
  "StatementListItem",
  "Type",
];

/// Cover productions that may be lowered more than once per pass: first as an expression, then
/// again when an enclosing arrow or assignment reads them as a pattern.
pub static MEMOIZED_KINDS: &[&str] = &[
  "ArrayLiteral",
  "CoverCallExpressionAndAsyncArrowHead",
  "CoverParenthesizedExpressionAndArrowParameterList",
  "ObjectLiteral",
  "ParenthesizedExpression",
];

#[rustfmt::skip]
pub static EXPR_HANDLERS: Lazy<HashMap<&'static str, ExprHandler>> = Lazy::new(|| {
  let mut map = HashMap::<&'static str, ExprHandler>::new();
  for kind in ["IdentifierReference", "BindingIdentifier", "LabelIdentifier", "IdentifierName", "Identifier"] {
    map.insert(kind, |lw, n| lw.id_expr(n));
  }
  map.insert("PrivateIdentifier", |lw, n| lw.private_name(n));
  map.insert("ThisExpression", |lw, n| lw.keyword_expr(n));
  map.insert("Keyword", |lw, n| lw.keyword_expr(n));
  for kind in ["Literal", "NumericLiteral", "StringLiteral", "BooleanLiteral", "NullLiteral", "RegularExpressionLiteral"] {
    map.insert(kind, |lw, n| lw.literal(n));
  }
  map.insert("TemplateLiteral", |lw, n| lw.template(n).map(Expr::Template));
  map.insert("NoSubstitutionTemplate", |lw, n| lw.template(n).map(Expr::Template));
  map.insert("ArrayLiteral", |lw, n| lw.array_literal(n));
  map.insert("ObjectLiteral", |lw, n| lw.object_literal(n));
  map.insert("ParenthesizedExpression", |lw, n| lw.parenthesized(n));
  map.insert("CoverParenthesizedExpressionAndArrowParameterList", |lw, n| lw.parenthesized(n));
  map.insert("MemberExpression", |lw, n| lw.member_or_call(n));
  map.insert("CallExpression", |lw, n| lw.member_or_call(n));
  map.insert("CoverCallExpressionAndAsyncArrowHead", |lw, n| lw.member_or_call(n));
  map.insert("SuperProperty", |lw, n| lw.super_property(n));
  map.insert("SuperCall", |lw, n| lw.super_call(n));
  map.insert("NewTarget", |lw, n| lw.meta_property(n));
  map.insert("ImportMeta", |lw, n| lw.meta_property(n));
  map.insert("MetaProperty", |lw, n| lw.meta_property(n));
  map.insert("ImportCall", |lw, n| lw.import_call(n));
  map.insert("NewExpression", |lw, n| lw.new_expr(n));
  map.insert("OptionalExpression", |lw, n| lw.optional_expr(n));
  map.insert("UpdateExpression", |lw, n| lw.update_expr(n));
  map.insert("UnaryExpression", |lw, n| lw.unary_expr(n));
  map.insert("AwaitExpression", |lw, n| lw.await_expr(n));
  for &kind in LEFT_CHAIN_KINDS {
    map.insert(kind, |lw, n| lw.left_chain(n));
  }
  for &kind in RIGHT_CHAIN_KINDS {
    map.insert(kind, |lw, n| lw.right_chain(n));
  }
  map.insert("ConditionalExpression", |lw, n| lw.cond_expr(n));
  map.insert("AssignmentExpression", |lw, n| lw.assign_expr(n));
  map.insert("YieldExpression", |lw, n| lw.yield_expr(n));
  map.insert("Expression", |lw, n| lw.seq_expr(n));
  map.insert("ArrowFunction", |lw, n| lw.strategy().arrow_function(lw, n).map(Expr::ArrowFunc));
  map.insert("AsyncArrowFunction", |lw, n| lw.strategy().arrow_function(lw, n).map(Expr::ArrowFunc));
  for kind in ["FunctionExpression", "GeneratorExpression", "AsyncFunctionExpression", "AsyncGeneratorExpression"] {
    map.insert(kind, |lw, n| lw.func_expr(n).map(Expr::Func));
  }
  map.insert("ClassExpression", |lw, n| lw.class_expr(n));
  map
});

#[rustfmt::skip]
pub static STMT_HANDLERS: Lazy<HashMap<&'static str, StmtHandler>> = Lazy::new(|| {
  let mut map = HashMap::<&'static str, StmtHandler>::new();
  map.insert("BlockStatement", |lw, n| lw.block(n).map(Stmt::Block));
  map.insert("Block", |lw, n| lw.block(n).map(Stmt::Block));
  map.insert("VariableStatement", |lw, n| lw.var_decl(n).map(Stmt::VarDecl));
  map.insert("LexicalDeclaration", |lw, n| lw.var_decl(n).map(Stmt::VarDecl));
  map.insert("EmptyStatement", |lw, n| lw.empty_stmt(n));
  map.insert("ExpressionStatement", |lw, n| lw.expr_stmt(n));
  map.insert("IfStatement", |lw, n| lw.if_stmt(n));
  map.insert("DoWhileStatement", |lw, n| lw.do_while_stmt(n));
  map.insert("WhileStatement", |lw, n| lw.while_stmt(n));
  map.insert("ForStatement", |lw, n| lw.for_stmt(n));
  map.insert("ForInOfStatement", |lw, n| lw.for_stmt(n));
  map.insert("ContinueStatement", |lw, n| lw.continue_stmt(n));
  map.insert("BreakStatement", |lw, n| lw.break_stmt(n));
  map.insert("ReturnStatement", |lw, n| lw.return_stmt(n));
  map.insert("WithStatement", |lw, n| lw.with_stmt(n));
  map.insert("SwitchStatement", |lw, n| lw.switch_stmt(n));
  map.insert("LabelledStatement", |lw, n| lw.label_stmt(n));
  map.insert("ThrowStatement", |lw, n| lw.throw_stmt(n));
  map.insert("TryStatement", |lw, n| lw.try_stmt(n));
  map.insert("DebuggerStatement", |lw, n| lw.debugger_stmt(n));
  for kind in ["FunctionDeclaration", "GeneratorDeclaration", "AsyncFunctionDeclaration", "AsyncGeneratorDeclaration"] {
    map.insert(kind, |lw, n| lw.func_decl(n).map(Stmt::FuncDecl));
  }
  map.insert("ClassDeclaration", |lw, n| lw.class_decl(n).map(Stmt::ClassDecl));
  map.insert("ImportDeclaration", |lw, n| lw.import_decl(n));
  map.insert("ExportDeclaration", |lw, n| lw.export_decl(n));
  map
});

/// The child a wrapper production stands for: its only child, or its only non-token child.
pub fn wrapped(node: &CstNode) -> LowerResult<&CstNode> {
  match node.children.as_slice() {
    [only] => Ok(only),
    _ => node.single_node().ok_or_else(|| node.malformed("single child")),
  }
}

/// Kinds read directly as binding patterns, without going through an expression first.
static BINDING_KINDS: &[&str] = &[
  "ArrayBindingPattern",
  "BindingElement",
  "BindingIdentifier",
  "BindingRestElement",
  "CatchParameter",
  "ForBinding",
  "FormalParameter",
  "FunctionRestParameter",
  "ObjectBindingPattern",
  "SingleNameBinding",
];

impl<'s> Lowerer<'s> {
  /// Lowers any expression production.
  pub fn expr(&mut self, node: &CstNode) -> LowerResult<Expr> {
    self.stats.nodes += 1;
    let memoize = node.is_any(MEMOIZED_KINDS);
    if memoize {
      if let Some(hit) = self.cache.get_expr(node.id()) {
        self.stats.cache_hits += 1;
        trace!(kind = %node.kind, "memo hit");
        return Ok(hit);
      }
      self.stats.cache_misses += 1;
    }
    let expr = self.dispatch_expr(node)?;
    if memoize {
      self.cache.put_expr(node.id(), expr.clone());
    }
    Ok(expr)
  }

  fn dispatch_expr(&mut self, node: &CstNode) -> LowerResult<Expr> {
    if let Some(handler) = EXPR_HANDLERS.get(node.kind.as_str()) {
      return handler(self, node);
    }
    if node.is_any(WRAPPER_KINDS) {
      return self.expr(wrapped(node)?);
    }
    Err(node.unsupported())
  }

  /// Lowers any statement, declaration or module item.
  pub fn stmt(&mut self, node: &CstNode) -> LowerResult<Stmt> {
    self.stats.nodes += 1;
    if let Some(handler) = STMT_HANDLERS.get(node.kind.as_str()) {
      return handler(self, node);
    }
    if node.is_any(WRAPPER_KINDS) {
      return self.stmt(wrapped(node)?);
    }
    if let Some(res) = self.strategy().declaration(self, node) {
      return res;
    }
    Err(node.unsupported())
  }

  /// Lowers a binding production, or reads a cover expression as a pattern.
  pub fn pat(&mut self, node: &CstNode) -> LowerResult<Pat> {
    if node.is_any(BINDING_KINDS) || node.is("BindingPattern") {
      self.stats.nodes += 1;
      return self.binding(node);
    }
    match self.cover_pat(node)? {
      Ok(pat) => Ok(pat),
      Err(_) => Err(node.malformed("pattern")),
    }
  }

  /// Reads an expression-shaped node as a pattern. The outer result is fatal; the inner one is
  /// the expected "not a pattern" outcome.
  pub fn cover_pat(
    &mut self,
    node: &CstNode,
  ) -> LowerResult<Result<Pat, super::cover::UnconvertiblePattern>> {
    let memoize = node.is_any(MEMOIZED_KINDS);
    if memoize {
      if let Some(hit) = self.cache.get_pat(node.id()) {
        self.stats.cache_hits += 1;
        trace!(kind = %node.kind, "memo hit (pattern)");
        return Ok(Ok(hit));
      }
    }
    let expr = self.expr(node)?;
    let resolved = expr.resolve_pattern();
    if let (true, Ok(pat)) = (memoize, &resolved) {
      self.cache.put_pat(node.id(), pat.clone());
    }
    Ok(resolved)
  }

  /// The target of `=`, `for-in` and `for-of`: a pattern when convertible, otherwise the
  /// expression (e.g. `a.b = 1`).
  pub fn assign_target(&mut self, node: &CstNode) -> LowerResult<AssignTarget> {
    let expr = self.expr(node)?;
    Ok(match expr.resolve_pattern() {
      Ok(pat) => AssignTarget::Pat(pat),
      Err(_) => AssignTarget::Expr(expr),
    })
  }
}
