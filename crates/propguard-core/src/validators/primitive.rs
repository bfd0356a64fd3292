//! Primitive coercers: boolean, integer, positive integer, integer range.

use crate::error::{ValidationError, ValidationResult};
use crate::value::Value;

/// Normalize a boolean marker to `"true"` or `"false"`.
///
/// Accepts `true`/`false`, `1`/`0`, and the strings `"1"`, `"true"`,
/// `"True"`, `"0"`, `"false"`, `"False"`. Case is exact.
pub fn boolean(value: &Value) -> ValidationResult<Value> {
    let truth = match value {
        Value::Bool(b) => Some(*b),
        Value::Integer(1) => Some(true),
        Value::Integer(0) => Some(false),
        Value::String(s) => match s.as_str() {
            "1" | "true" | "True" => Some(true),
            "0" | "false" | "False" => Some(false),
            _ => None,
        },
        _ => None,
    };

    match truth {
        Some(true) => Ok(Value::from("true")),
        Some(false) => Ok(Value::from("false")),
        None => Err(ValidationError::InvalidBoolean {
            value: value.to_string(),
        }),
    }
}

/// Accept anything that parses as a base-10 integer; return it unchanged.
pub fn integer(value: &Value) -> ValidationResult<Value> {
    parse_integer(value)?;
    Ok(value.clone())
}

/// Accept non-negative integers (zero included); return the input unchanged.
pub fn positive_integer(value: &Value) -> ValidationResult<Value> {
    if parse_integer(value)? < 0 {
        return Err(ValidationError::NotPositive {
            value: value.to_string(),
        });
    }
    Ok(value.clone())
}

/// Build a validator for the closed range `minimum..=maximum`.
///
/// The bounds are taken as given; `minimum > maximum` yields a validator that
/// rejects everything.
pub fn integer_range(
    minimum: i64,
    maximum: i64,
) -> impl Fn(&Value) -> ValidationResult<Value> + Copy + Send + Sync + 'static {
    move |value: &Value| check_range(value, minimum, maximum)
}

pub(crate) fn check_range(value: &Value, minimum: i64, maximum: i64) -> ValidationResult<Value> {
    let n = parse_integer(value)?;
    if n < i128::from(minimum) || n > i128::from(maximum) {
        return Err(ValidationError::OutOfRange {
            value: value.to_string(),
            min: minimum,
            max: maximum,
        });
    }
    Ok(value.clone())
}

/// Numeric reading of an integer-like candidate.
///
/// `i128` with saturation keeps arbitrarily long digit strings valid while
/// still comparing correctly against `i64` bounds.
pub(crate) fn parse_integer(value: &Value) -> ValidationResult<i128> {
    let parsed = match value {
        Value::Integer(n) => Some(i128::from(*n)),
        Value::Bool(b) => Some(i128::from(*b)),
        Value::BigInteger(digits) => parse_integer_literal(digits),
        // Truncates toward zero; `as` saturates at the i128 limits.
        Value::Float(x) if x.is_finite() => Some(x.trunc() as i128),
        Value::String(s) => parse_integer_literal(s),
        _ => None,
    };

    parsed.ok_or_else(|| ValidationError::InvalidInteger {
        value: value.to_string(),
    })
}

/// Parse a decimal literal: optional surrounding whitespace, one optional
/// sign, ASCII digits with single `_` separators between digits.
fn parse_integer_literal(text: &str) -> Option<i128> {
    let text = text.trim();
    let (negative, digits) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
    {
        return None;
    }

    let mut magnitude: i128 = 0;
    for c in digits.chars().filter(|&c| c != '_') {
        let digit = c.to_digit(10)?;
        magnitude = magnitude
            .saturating_mul(10)
            .saturating_add(i128::from(digit));
    }

    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_truthy_markers() {
        for v in [
            Value::from(true),
            Value::from(1),
            Value::from("1"),
            Value::from("true"),
            Value::from("True"),
        ] {
            assert_eq!(boolean(&v).unwrap(), Value::from("true"), "{v}");
        }
    }

    #[test]
    fn boolean_falsy_markers() {
        for v in [
            Value::from(false),
            Value::from(0),
            Value::from("0"),
            Value::from("false"),
            Value::from("False"),
        ] {
            assert_eq!(boolean(&v).unwrap(), Value::from("false"), "{v}");
        }
    }

    #[test]
    fn boolean_is_case_exact() {
        assert!(boolean(&Value::from("TRUE")).is_err());
        assert!(boolean(&Value::from("yes")).is_err());
        assert!(boolean(&Value::from(2)).is_err());
        assert!(boolean(&Value::Null).is_err());
        assert!(boolean(&Value::from(1.0)).is_err());
    }

    #[test]
    fn integer_returns_input_unchanged() {
        assert_eq!(integer(&Value::from("42")).unwrap(), Value::from("42"));
        assert_eq!(integer(&Value::from(-3)).unwrap(), Value::from(-3));
        assert_eq!(integer(&Value::from(" +7 ")).unwrap(), Value::from(" +7 "));
    }

    #[test]
    fn integer_rejects_non_numeric() {
        let err = integer(&Value::from("abc")).unwrap_err();
        assert_eq!(err.to_string(), "\"abc\" is not a valid integer");
        assert!(integer(&Value::from("1.5")).is_err());
        assert!(integer(&Value::from("")).is_err());
        assert!(integer(&Value::from("-")).is_err());
        assert!(integer(&Value::from("+ 5")).is_err());
        assert!(integer(&Value::Null).is_err());
        assert!(integer(&Value::from(vec![Value::from(1)])).is_err());
        assert!(integer(&Value::from(f64::NAN)).is_err());
    }

    #[test]
    fn integer_literal_grammar() {
        assert_eq!(parse_integer_literal("1_000"), Some(1000));
        assert_eq!(parse_integer_literal("-0"), Some(0));
        assert_eq!(parse_integer_literal("007"), Some(7));
        assert_eq!(parse_integer_literal("_1"), None);
        assert_eq!(parse_integer_literal("1_"), None);
        assert_eq!(parse_integer_literal("1__0"), None);
        assert_eq!(parse_integer_literal("0x10"), None);
    }

    #[test]
    fn oversized_literal_is_still_an_integer() {
        let huge = Value::from("123456789012345678901234567890123456789012345");
        assert!(integer(&huge).is_ok());
        assert!(positive_integer(&huge).is_ok());
        assert!(integer_range(0, 10)(&huge).is_err());
    }

    #[test]
    fn big_integer_passes_through_unchanged() {
        let big = Value::BigInteger("123456789012345678901234567890".into());
        assert_eq!(integer(&big).unwrap(), big);
        assert_eq!(positive_integer(&big).unwrap(), big);
        assert!(integer_range(i64::MIN, i64::MAX)(&big).is_err());

        let negative = Value::BigInteger("-123456789012345678901234567890".into());
        assert!(matches!(
            positive_integer(&negative),
            Err(ValidationError::NotPositive { .. })
        ));
    }

    #[test]
    fn float_and_bool_coerce_like_numbers() {
        assert_eq!(parse_integer(&Value::from(3.9)).unwrap(), 3);
        assert_eq!(parse_integer(&Value::from(-3.9)).unwrap(), -3);
        assert_eq!(parse_integer(&Value::from(true)).unwrap(), 1);
    }

    #[test]
    fn positive_integer_accepts_zero() {
        assert_eq!(positive_integer(&Value::from(0)).unwrap(), Value::from(0));
        assert_eq!(positive_integer(&Value::from(5)).unwrap(), Value::from(5));
        assert_eq!(
            positive_integer(&Value::from("5")).unwrap(),
            Value::from("5")
        );
    }

    #[test]
    fn positive_integer_rejects_negative() {
        let err = positive_integer(&Value::from(-1)).unwrap_err();
        assert_eq!(err, ValidationError::NotPositive { value: "-1".into() });
    }

    #[test]
    fn positive_integer_reports_invalid_integer_first() {
        assert!(matches!(
            positive_integer(&Value::from("x")),
            Err(ValidationError::InvalidInteger { .. })
        ));
    }

    #[test]
    fn integer_range_is_inclusive() {
        let check = integer_range(1, 10);
        assert!(check(&Value::from(0)).is_err());
        assert!(check(&Value::from(11)).is_err());
        for n in [1, 5, 10] {
            assert_eq!(check(&Value::from(n)).unwrap(), Value::from(n));
        }
        assert_eq!(check(&Value::from("10")).unwrap(), Value::from("10"));
    }

    #[test]
    fn integer_range_message_names_bounds() {
        let err = integer_range(1, 10)(&Value::from(11)).unwrap_err();
        assert_eq!(err.to_string(), "integer 11 must be between 1 and 10");
    }

    #[test]
    fn inverted_range_rejects_everything() {
        let check = integer_range(10, 1);
        assert!(check(&Value::from(5)).is_err());
    }
}
