use serde_json::to_string_pretty;
use serde_json::Map;
use serde_json::Value;
use similar::ChangeTag;
use similar::TextDiff;

const TOKEN_TYPES: &[&str] = &["Punctuator", "Keyword", "Identifier", "Literal"];

fn is_token(value: &Value) -> bool {
  let Value::Object(map) = value else {
    return false;
  };
  map.len() == 4
    && map.contains_key("value")
    && map.contains_key("start")
    && map.contains_key("end")
    && map
      .get("type")
      .and_then(Value::as_str)
      .is_some_and(|t| TOKEN_TYPES.contains(&t))
}

fn strip_map(map: &mut Map<String, Value>, strip_tokens: bool) {
  map.remove("start");
  map.remove("end");
  if strip_tokens {
    map.retain(|_, v| !is_token(v));
  }
  for v in map.values_mut() {
    strip(v, strip_tokens);
  }
}

fn strip(value: &mut Value, strip_tokens: bool) {
  match value {
    Value::Object(map) => strip_map(map, strip_tokens),
    Value::Array(items) => {
      for item in items {
        strip(item, strip_tokens);
      }
    }
    _ => {}
  }
}

/// Removes spans and attached surface tokens, leaving the plain ESTree shape.
pub fn strip_locs_and_tokens(value: &mut Value) {
  strip(value, true);
}

fn diff_panic(expected: &Value, actual: &Value) -> ! {
  let expected_fmt = to_string_pretty(expected).unwrap();
  let actual_fmt = to_string_pretty(actual).unwrap();
  let mut msg = "JSON mismatch, got:\n".to_string();
  let diff = TextDiff::from_lines(&expected_fmt, &actual_fmt);
  for change in diff.iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    msg.push_str(sign);
    msg.push_str(change.as_str().unwrap());
    if change.missing_newline() {
      msg.push('\n');
    }
  }
  panic!("{}", msg);
}

/// Compares two ESTree values, ignoring spans and surface tokens.
pub fn assert_estree_eq(mut actual: Value, mut expected: Value) {
  strip_locs_and_tokens(&mut actual);
  strip_locs_and_tokens(&mut expected);
  if actual != expected {
    diff_panic(&expected, &actual);
  }
}

/// Compares two values exactly, spans included.
pub fn assert_json_eq(actual: Value, expected: Value) {
  if actual != expected {
    diff_panic(&expected, &actual);
  }
}
