use super::Lowerer;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::LogicalExpr;
use crate::ast::node::Node;
use crate::cst::CstNode;
use crate::error::LowerResult;
use crate::token::Token;

/// Flat `[operand, op, operand, op, operand, ...]` productions that fold to the left.
pub static LEFT_CHAIN_KINDS: &[&str] = &[
  "AdditiveExpression",
  "BitwiseANDExpression",
  "BitwiseORExpression",
  "BitwiseXORExpression",
  "CoalesceExpression",
  "EqualityExpression",
  "LogicalANDExpression",
  "LogicalORExpression",
  "MultiplicativeExpression",
  "RelationalExpression",
  "ShiftExpression",
  "ShortCircuitExpression",
];

pub static RIGHT_CHAIN_KINDS: &[&str] = &["ExponentiationExpression"];

static LOGICAL_OPERATORS: &[&str] = &["||", "&&", "??"];

/// The operator token of an operator position: the token itself, or the single token inside a
/// one-level wrapper such as `MultiplicativeOperator`.
pub fn operator_token(op: &CstNode) -> LowerResult<&CstNode> {
  if op.is_token() {
    return Ok(op);
  }
  match (op.children.len(), op.children.first()) {
    (1, Some(tok)) if tok.is_token() => Ok(tok),
    _ => Err(op.malformed("operator token")),
  }
}

fn combine(left: Expr, op: &CstNode, right: Expr) -> Expr {
  let loc = left.loc() + right.loc();
  let operator = op.text().to_string();
  let operator_token = Some(Token::from_cst(op));
  if LOGICAL_OPERATORS.contains(&operator.as_str()) {
    Expr::Logical(Node::new(loc, LogicalExpr {
      left,
      operator,
      right,
      operator_token,
    }))
  } else {
    Expr::Binary(Node::new(loc, BinaryExpr {
      left,
      operator,
      right,
      operator_token,
    }))
  }
}

impl<'s> Lowerer<'s> {
  /// Lowers a left-associative chain: `a - b - c` is `(a - b) - c`.
  pub fn left_chain(&mut self, node: &CstNode) -> LowerResult<Expr> {
    let mut children = node.children.iter();
    let first = children.next().ok_or_else(|| node.malformed("operand"))?;
    let mut acc = self.expr(first)?;
    while let Some(op) = children.next() {
      let op = operator_token(op)?;
      let rhs = children.next().ok_or_else(|| node.malformed("right operand"))?;
      let right = self.expr(rhs)?;
      acc = combine(acc, op, right);
    }
    Ok(acc)
  }

  /// Lowers `a ** b ** c` as `a ** (b ** c)`. Accepts both the flat form and the right-recursive
  /// form where the right operand is itself an `ExponentiationExpression`.
  pub fn right_chain(&mut self, node: &CstNode) -> LowerResult<Expr> {
    self.fold_right(node, &node.children)
  }

  fn fold_right(&mut self, node: &CstNode, children: &[CstNode]) -> LowerResult<Expr> {
    match children {
      [] => Err(node.malformed("operand")),
      [single] => self.expr(single),
      [lhs, op, rest @ ..] => {
        let op = operator_token(op)?;
        let left = self.expr(lhs)?;
        let right = self.fold_right(node, rest)?;
        Ok(combine(left, op, right))
      }
    }
  }
}
