use crate::num::JsNumber;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

// All literal kinds share the ESTree `Literal` type and differ by the shape of `value`.

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "Literal")]
pub struct LitStrExpr {
  #[drive(skip)]
  pub value: String,
  #[drive(skip)]
  pub raw: String,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "Literal")]
pub struct LitNumExpr {
  #[drive(skip)]
  pub value: JsNumber,
  #[drive(skip)]
  pub raw: String,
}

/// `value` is always null in JSON; `bigint` holds the canonical decimal digits.
#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "Literal")]
pub struct LitBigIntExpr {
  #[drive(skip)]
  pub value: (),
  #[drive(skip)]
  pub raw: String,
  #[drive(skip)]
  pub bigint: String,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "Literal")]
pub struct LitBoolExpr {
  #[drive(skip)]
  pub value: bool,
  #[drive(skip)]
  pub raw: String,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "Literal")]
pub struct LitNullExpr {
  #[drive(skip)]
  pub value: (),
  #[drive(skip)]
  pub raw: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct RegexValue {
  pub pattern: String,
  pub flags: String,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "Literal")]
pub struct LitRegexExpr {
  #[drive(skip)]
  pub value: (),
  #[drive(skip)]
  pub raw: String,
  #[drive(skip)]
  pub regex: RegexValue,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct TemplateValue {
  pub raw: String,
  /// Absent when the chunk has an invalid escape (allowed in tagged templates).
  pub cooked: Option<String>,
}

#[derive(Clone, PartialEq, Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "type", rename = "TemplateElement")]
pub struct TemplateElement {
  #[drive(skip)]
  pub value: TemplateValue,
  #[drive(skip)]
  pub tail: bool,
}
