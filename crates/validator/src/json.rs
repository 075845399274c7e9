//! JSON glue for dynamic-map validation.
//!
//! Converts decoded `serde_json::Value`s into [`Value`]s and renders
//! validation failures as JSON reports.
//!
//! # Examples
//!
//! ```
//! use fieldwise_validator::json::value_map_from_json;
//! use fieldwise_validator::prelude::*;
//! use serde_json::json;
//!
//! let v = map(ValidatorMap::new().field("name", string().required()));
//!
//! let input = value_map_from_json(json!({ "name": "" })).unwrap();
//! let err = v.validate(&input).unwrap_err();
//!
//! assert_eq!(
//!     err.to_json_value(),
//!     json!({
//!         "code": "fields",
//!         "message": "name field: input value is required",
//!         "fields": [{
//!             "field": "name",
//!             "code": "empty",
//!             "message": "input value is required",
//!             "input": "\"\"",
//!         }],
//!     })
//! );
//! ```

use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Number, json};

use crate::foundation::{ErrorKind, FieldErrors, ValidationError};
use crate::object::{Value, ValueMap};

// ============================================================================
// DECODING
// ============================================================================

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => from_number(&n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            serde_json::Value::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

fn from_number(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Int(i)
    } else if let Some(u) = n.as_u64() {
        Value::UInt(u)
    } else {
        n.as_f64().map_or(Value::Null, Value::Float)
    }
}

/// Decodes a JSON object into a [`ValueMap`].
///
/// Anything other than an object fails with [`ErrorKind::InvalidType`],
/// carrying the rejected JSON as input.
///
/// Integral JSON numbers decode to [`Value::Int`] (or [`Value::UInt`]), so a
/// field bound to `number::<f64>()` rejects `1` and accepts `1.0`.
pub fn value_map_from_json(value: serde_json::Value) -> Result<ValueMap, ValidationError> {
    match value {
        serde_json::Value::Object(entries) => Ok(entries
            .into_iter()
            .map(|(k, v)| (k, Value::from(v)))
            .collect()),
        other => {
            tracing::debug!(kind = json_kind(&other), "expected a JSON object");
            Err(ValidationError::new(ErrorKind::InvalidType, &other))
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// ============================================================================
// REPORTS
// ============================================================================

impl Serialize for ErrorKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl ValidationError {
    /// Renders the error as a JSON report.
    ///
    /// Every report has `code` and `message`. A captured input adds `input`
    /// (its `Debug` rendering) and an aggregate adds `fields`.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let mut report = Map::new();
        report.insert("code".into(), json!(self.code()));
        report.insert("message".into(), json!(self.to_string()));
        if self.input().is_captured() && self.field_errors().is_none() {
            report.insert("input".into(), json!(self.input().as_debug()));
        }
        if let Some(fields) = self.field_errors() {
            report.insert("fields".into(), fields.to_json_value());
        }
        serde_json::Value::Object(report)
    }
}

impl FieldErrors {
    /// Renders the aggregate as a JSON array, one report per field.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        self.iter()
            .map(|entry| {
                let mut report = match entry.error().to_json_value() {
                    serde_json::Value::Object(report) => report,
                    _ => Map::new(),
                };
                report.insert("field".into(), json!(entry.field()));
                serde_json::Value::Object(report)
            })
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Validate;
    use crate::object::{ValidatorMap, map};
    use crate::validators::{number, string};

    #[test]
    fn numbers_prefer_signed() {
        assert_eq!(Value::from(json!(-3)), Value::Int(-3));
        assert_eq!(Value::from(json!(u64::MAX)), Value::UInt(u64::MAX));
        assert_eq!(Value::from(json!(0.5)), Value::Float(0.5));
    }

    #[test]
    fn integral_numbers_do_not_fit_float_fields() {
        let v = map(ValidatorMap::new().field("ratio", number::<f64>()));

        let whole = value_map_from_json(json!({ "ratio": 1 })).unwrap();
        assert!(v.validate(&whole).is_err_and(|e| e.is(ErrorKind::InvalidType)));

        let fractional = value_map_from_json(json!({ "ratio": 1.0 })).unwrap();
        assert!(v.validate(&fractional).is_ok());
    }

    #[test]
    fn nested_structures() {
        let value = Value::from(json!({ "tags": ["a", null] }));
        let Value::Map(entries) = value else {
            panic!("expected a map");
        };
        assert_eq!(
            entries.get("tags"),
            Some(&Value::List(vec![Value::from("a"), Value::Null]))
        );
    }

    #[test]
    fn non_objects_are_rejected() {
        let err = value_map_from_json(json!([1, 2])).unwrap_err();
        assert!(err.is(ErrorKind::InvalidType));
        assert_eq!(err.input_as::<serde_json::Value>(), Some(&json!([1, 2])));
    }

    #[test]
    fn error_kind_serializes_as_code() {
        assert_eq!(serde_json::to_value(ErrorKind::TooBig).unwrap(), json!("too_big"));
    }

    #[test]
    fn structural_failure_report() {
        let v = map(ValidatorMap::new().field("age", number::<i64>()));
        let input = value_map_from_json(json!({ "age": "old" })).unwrap();
        let report = v.validate(&input).unwrap_err().to_json_value();

        assert_eq!(report["code"], json!("invalid_type"));
        assert!(report.get("fields").is_none());
    }

    #[test]
    fn field_report_lists_every_failure() {
        let v = map(
            ValidatorMap::new()
                .field("a", string().required())
                .field("b", number::<i64>().max(1)),
        );
        let input = value_map_from_json(json!({ "a": "", "b": 2 })).unwrap();
        let report = v.validate(&input).unwrap_err().to_json_value();

        let fields = report["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0]["field"], json!("a"));
        assert_eq!(fields[1]["code"], json!("too_big"));
        assert_eq!(fields[1]["input"], json!("2"));
    }
}
