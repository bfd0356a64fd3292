//! JSON to [`Value`] conversion.
//!
//! TOML manifests deserialize into `serde_json::Value` too, so this is the
//! single entry point from host documents into the core value model.

use std::collections::BTreeMap;

use propguard_core::Value;
use serde_json::Value as JsonValue;

use crate::intrinsic::Intrinsic;

/// Convert a JSON document into a candidate [`Value`].
///
/// Intrinsic-function objects become [`Value::Deferred`]. Integers that fit
/// `i64` stay integers; longer integer tokens keep their exact digits as
/// [`Value::BigInteger`].
pub fn value_from_json(json: JsonValue) -> Value {
    match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => {
                let text = n.to_string();
                if is_integer_token(&text) {
                    Value::BigInteger(text)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
        },
        JsonValue::String(s) => Value::String(s),
        JsonValue::Array(items) => Value::List(items.into_iter().map(value_from_json).collect()),
        JsonValue::Object(object) => match Intrinsic::from_object(&object) {
            Some(intrinsic) => Value::deferred(intrinsic),
            None => Value::Map(
                object
                    .into_iter()
                    .map(|(k, v)| (k, value_from_json(v)))
                    .collect::<BTreeMap<_, _>>(),
            ),
        },
    }
}

/// `-?[0-9]+`, the shape of a JSON integer with no fraction or exponent.
fn is_integer_token(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a command-line literal.
///
/// Valid JSON is converted structurally (`5`, `true`, `{"Ref":"P"}`);
/// anything else is taken as a bare string.
pub fn value_from_literal(text: &str) -> Value {
    match serde_json::from_str::<JsonValue>(text) {
        Ok(json) => value_from_json(json),
        Err(_) => Value::from(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use propguard_core::Validator;
    use serde_json::json;

    #[test]
    fn scalars_convert_directly() {
        assert_eq!(value_from_json(json!(null)), Value::Null);
        assert_eq!(value_from_json(json!(true)), Value::from(true));
        assert_eq!(value_from_json(json!(-5)), Value::from(-5));
        assert_eq!(value_from_json(json!(2.5)), Value::from(2.5));
        assert_eq!(value_from_json(json!("x")), Value::from("x"));
    }

    #[test]
    fn huge_unsigned_keeps_its_digits() {
        let v = value_from_json(json!(u64::MAX));
        assert_eq!(v, Value::BigInteger(u64::MAX.to_string()));
    }

    #[test]
    fn long_integer_literal_is_exact() {
        let digits = "123456789012345678901234567890";
        let v = value_from_literal(digits);
        assert_eq!(v, Value::BigInteger(digits.into()));
        assert_eq!(Validator::Integer.validate(&v).unwrap().to_string(), digits);

        let negative = value_from_literal("-99999999999999999999");
        assert_eq!(negative, Value::BigInteger("-99999999999999999999".into()));
    }

    #[test]
    fn exponent_stays_float() {
        assert!(matches!(value_from_literal("1e3"), Value::Float(_)));
        assert!(matches!(value_from_literal("2.5"), Value::Float(_)));
    }

    #[test]
    fn intrinsic_objects_become_deferred() {
        let v = value_from_json(json!({"Ref": "WebPort"}));
        assert!(v.is_deferred());
        assert_eq!(v.to_string(), "Ref(WebPort)");
    }

    #[test]
    fn nested_intrinsics_are_found() {
        let v = value_from_json(json!({"ports": [80, {"Ref": "Extra"}]}));
        let Value::Map(map) = v else {
            panic!("expected map");
        };
        let Value::List(items) = &map["ports"] else {
            panic!("expected list");
        };
        assert!(items[1].is_deferred());
    }

    #[test]
    fn literal_parsing_prefers_json() {
        assert_eq!(value_from_literal("5"), Value::from(5));
        assert_eq!(value_from_literal("\"5\""), Value::from("5"));
        assert_eq!(value_from_literal("my-bucket"), Value::from("my-bucket"));
        assert_eq!(value_from_literal("True"), Value::from("True"));
        assert!(value_from_literal(r#"{"Ref":"P"}"#).is_deferred());
    }
}
