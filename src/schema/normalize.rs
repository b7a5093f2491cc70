//! Normalization of YAML schema payloads into JSON values
//!
//! YAML mappings may use any value as a key; JSON objects only allow
//! strings. Normalization re-keys every mapping by the text form of its
//! keys, recursing through nested mappings and sequences.

use serde_json::{Map, Number, Value as JsonValue};
use serde_yaml::Value as YamlValue;

/// Convert a decoded YAML payload into a string-keyed JSON value
///
/// Sequences keep their order and length, scalars pass through and YAML
/// tags are dropped in favour of the tagged value. Non-finite floats have
/// no JSON form and become `null`. When two keys share a text form the
/// later entry wins.
pub fn normalize(payload: YamlValue) -> JsonValue {
    match payload {
        YamlValue::Null => JsonValue::Null,
        YamlValue::Bool(b) => JsonValue::Bool(b),
        YamlValue::Number(n) => number(&n),
        YamlValue::String(s) => JsonValue::String(s),
        YamlValue::Sequence(items) => JsonValue::Array(items.into_iter().map(normalize).collect()),
        YamlValue::Mapping(mapping) => JsonValue::Object(
            mapping
                .into_iter()
                .map(|(key, value)| (text_form(&key), normalize(value)))
                .collect::<Map<_, _>>(),
        ),
        YamlValue::Tagged(tagged) => normalize(tagged.value),
    }
}

/// Natural text form of a YAML value, as used for mapping keys
///
/// Integer `1` is `"1"`, `true` is `"true"` and null is `"null"`.
/// Collections, which YAML allows as complex keys, use their compact JSON
/// form.
pub fn text_form(value: &YamlValue) -> String {
    match value {
        YamlValue::Null => "null".to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::String(s) => s.clone(),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => normalize(value.clone()).to_string(),
        YamlValue::Tagged(tagged) => text_form(&tagged.value),
    }
}

fn number(n: &serde_yaml::Number) -> JsonValue {
    if let Some(i) = n.as_i64() {
        JsonValue::from(i)
    } else if let Some(u) = n.as_u64() {
        JsonValue::from(u)
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map_or(JsonValue::Null, JsonValue::Number)
    }
}
