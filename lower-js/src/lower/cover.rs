//! Reinterpretation of an already-lowered expression as the pattern it covers, for arrow
//! parameters and destructuring assignment targets.

use crate::ast::expr::AssignTarget;
use crate::ast::expr::Expr;
use crate::ast::expr::ExprOrSpread;
use crate::ast::expr::ObjMember;
use crate::ast::expr::PropKind;
use crate::ast::expr::Property;
use crate::ast::list::ListElem;
use crate::ast::node::Node;
use crate::ast::pat::ArrPat;
use crate::ast::pat::AssignPat;
use crate::ast::pat::IdPat;
use crate::ast::pat::ObjPat;
use crate::ast::pat::ObjPatMember;
use crate::ast::pat::Pat;
use crate::ast::pat::RestPat;
use crate::loc::Loc;
use std::fmt;

/// The expression has no pattern reading. This is an expected outcome: callers fall back to the
/// expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnconvertiblePattern {
  /// ESTree type of the offending expression.
  pub kind: &'static str,
  pub loc: Loc,
}

impl fmt::Display for UnconvertiblePattern {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} at [{}:{}] is not a valid pattern",
      self.kind, self.loc.0, self.loc.1
    )
  }
}

impl std::error::Error for UnconvertiblePattern {}

pub type CoverResult<T> = Result<T, UnconvertiblePattern>;

pub trait ResolvePattern {
  fn resolve_pattern(&self) -> CoverResult<Pat>;
}

/// Already a pattern: identity.
impl ResolvePattern for Pat {
  fn resolve_pattern(&self) -> CoverResult<Pat> {
    Ok(self.clone())
  }
}

impl ResolvePattern for Expr {
  fn resolve_pattern(&self) -> CoverResult<Pat> {
    match self {
      Expr::Id(id) => Ok(Pat::Id(id.derive_stx(|id| IdPat {
        name: id.name.clone(),
        ts: None,
      }))),
      Expr::LitObj(obj) => {
        let properties = obj
          .stx
          .properties
          .iter()
          .map(|m| -> CoverResult<ListElem<ObjPatMember>> {
            let member = match &m.elem {
              ObjMember::Prop(prop) => ObjPatMember::Prop(resolve_property(prop)?),
              ObjMember::Spread(spread) => ObjPatMember::Rest(Node::new(spread.loc, RestPat {
                argument: spread.stx.argument.resolve_pattern()?,
                ts: None,
                ellipsis: spread.stx.ellipsis.clone(),
              })),
            };
            Ok(ListElem::new(member, m.comma.clone()))
          })
          .collect::<CoverResult<Vec<_>>>()?;
        Ok(Pat::Obj(Node::new(obj.loc, ObjPat {
          properties,
          ts: None,
          open_brace: obj.stx.open_brace.clone(),
          close_brace: obj.stx.close_brace.clone(),
        })))
      }
      Expr::LitArr(arr) => {
        let elements = arr
          .stx
          .elements
          .iter()
          .map(|e| -> CoverResult<ListElem<Option<Pat>>> {
            let elem = match &e.elem {
              None => None,
              Some(ExprOrSpread::Expr(expr)) => Some(expr.resolve_pattern()?),
              Some(ExprOrSpread::Spread(spread)) => Some(Pat::Rest(Node::new(spread.loc, RestPat {
                argument: spread.stx.argument.resolve_pattern()?,
                ts: None,
                ellipsis: spread.stx.ellipsis.clone(),
              }))),
            };
            Ok(ListElem::new(elem, e.comma.clone()))
          })
          .collect::<CoverResult<Vec<_>>>()?;
        Ok(Pat::Arr(Node::new(arr.loc, ArrPat {
          elements,
          ts: None,
          open_bracket: arr.stx.open_bracket.clone(),
          close_bracket: arr.stx.close_bracket.clone(),
        })))
      }
      Expr::Assign(assign) if assign.stx.operator == "=" => {
        Ok(Pat::Assign(Node::new(assign.loc, AssignPat {
          left: assign.stx.left.resolve_pattern()?,
          right: assign.stx.right.clone(),
          eq: assign.stx.operator_token.clone(),
        })))
      }
      other => Err(UnconvertiblePattern {
        kind: other.type_name(),
        loc: other.loc(),
      }),
    }
  }
}

impl ResolvePattern for AssignTarget {
  fn resolve_pattern(&self) -> CoverResult<Pat> {
    match self {
      AssignTarget::Pat(p) => p.resolve_pattern(),
      AssignTarget::Expr(e) => e.resolve_pattern(),
    }
  }
}

fn resolve_property(prop: &Node<Property<Expr>>) -> CoverResult<Node<Property<Pat>>> {
  let p = &prop.stx;
  if p.method || p.kind != PropKind::Init {
    return Err(UnconvertiblePattern {
      kind: "Property",
      loc: prop.loc,
    });
  }
  Ok(Node::new(prop.loc, Property {
    key: p.key.clone(),
    value: p.value.resolve_pattern()?,
    kind: PropKind::Init,
    method: false,
    shorthand: p.shorthand,
    computed: p.computed,
    colon: p.colon.clone(),
  }))
}

/// Resolves an expression to a pattern.
pub fn resolve_pattern(expr: &Expr) -> CoverResult<Pat> {
  expr.resolve_pattern()
}
