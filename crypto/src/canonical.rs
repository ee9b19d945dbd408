//! Canonical JSON serialization.
//!
//! Rules:
//! - object keys sorted bytewise, no insignificant whitespace
//! - strings escaped exactly as `serde_json` escapes them
//! - integers written in plain decimal
//! - floats written in their shortest round-trip form (`0.95`, `1.0`, `1e21`),
//!   with negative zero folded to `0.0`
//!
//! Every float bit pattern maps to one rendering and back, so no digit of a
//! stored number escapes the hash.

use serde::Serialize;
use serde_json::{Number, Value};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("value is not representable as JSON: {0}")]
    Unrepresentable(String),
}

/// Serialize `value` into canonical bytes.
pub fn to_canonical_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CanonicalError> {
    let value =
        serde_json::to_value(value).map_err(|e| CanonicalError::Unrepresentable(e.to_string()))?;
    let mut out = Vec::with_capacity(256);
    write_canonical(&value, &mut out);
    Ok(out)
}

/// Append the canonical form of an already-built JSON value.
pub fn write_canonical(value: &Value, out: &mut Vec<u8>) {
    match value {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(true) => out.extend_from_slice(b"true"),
        Value::Bool(false) => out.extend_from_slice(b"false"),
        Value::Number(n) => write_number(n, out),
        Value::String(s) => write_string(s, out),
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_canonical(item, out);
            }
            out.push(b']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
            out.push(b'{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_string(key, out);
                out.push(b':');
                write_canonical(item, out);
            }
            out.push(b'}');
        }
    }
}

fn write_string(s: &str, out: &mut Vec<u8>) {
    // serde_json never fails to serialize a &str.
    if let Ok(escaped) = serde_json::to_string(s) {
        out.extend_from_slice(escaped.as_bytes());
    }
}

fn write_number(n: &Number, out: &mut Vec<u8>) {
    if let Some(i) = n.as_i64() {
        out.extend_from_slice(i.to_string().as_bytes());
    } else if let Some(u) = n.as_u64() {
        out.extend_from_slice(u.to_string().as_bytes());
    } else if n.as_f64() == Some(0.0) {
        out.extend_from_slice(b"0.0");
    } else {
        // serde_json renders finite floats with ryu's shortest round-trip form.
        out.extend_from_slice(n.to_string().as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn canon(v: Value) -> String {
        String::from_utf8(to_canonical_bytes(&v).unwrap()).unwrap()
    }

    #[test]
    fn sorts_keys_recursively() {
        let v = json!({"z": {"b": 1, "a": 2}, "a": null});
        assert_eq!(canon(v), r#"{"a":null,"z":{"a":2,"b":1}}"#);
    }

    #[test]
    fn floats_use_shortest_round_trip_form() {
        assert_eq!(canon(json!(0.95)), "0.95");
        assert_eq!(canon(json!(1.0)), "1.0");
        assert_eq!(canon(json!(0.1 + 0.2)), "0.30000000000000004");
        assert_eq!(canon(json!(-0.0)), "0.0");
        assert_eq!(canon(json!(-1.25)), "-1.25");
        assert_eq!(canon(json!(1.0e21)), "1e21");
    }

    #[test]
    fn every_float_digit_is_significant() {
        let a = canon(json!({"confidence_score": 0.123456781}));
        let b = canon(json!({"confidence_score": 0.123456782}));
        assert_eq!(a, r#"{"confidence_score":0.123456781}"#);
        assert_ne!(a, b);
    }

    #[test]
    fn integers_stay_integers() {
        assert_eq!(canon(json!([1, -2, 18446744073709551615u64])), "[1,-2,18446744073709551615]");
    }

    #[test]
    fn strings_are_escaped() {
        assert_eq!(canon(json!("a\"b\n")), r#""a\"b\n""#);
    }
}
