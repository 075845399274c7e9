//! Dynamic string-keyed maps
//!
//! [`Value`] is a small tagged union for data whose shape is only known at
//! runtime, such as decoded JSON or form input. [`MapValidator`] validates a
//! [`ValueMap`] against a [`ValidatorMap`].
//!
//! Integers are carried as `i64` (or `u64` above `i64::MAX`) and floats as
//! `f64`, so bind `number::<i64>()` rather than narrower widths.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::foundation::{
    AnyValidator, FieldError, FieldErrors, TypeTag, Validate, ValidationError, Validator,
    Violation,
};
use crate::object::ValidatorMap;

/// A string-keyed map of dynamic values.
pub type ValueMap = HashMap<String, Value>;

// ============================================================================
// VALUE
// ============================================================================

/// A dynamically typed value.
///
/// Each variant exposes its payload as one concrete Rust type, which is what
/// a bound validator must accept:
///
/// | Variant    | Payload type       |
/// |------------|--------------------|
/// | `Null`     | `()`               |
/// | `Bool`     | `bool`             |
/// | `Int`      | `i64`              |
/// | `UInt`     | `u64`              |
/// | `Float`    | `f64`              |
/// | `String`   | `String`           |
/// | `DateTime` | `DateTime<Utc>`    |
/// | `List`     | `Vec<Value>`       |
/// | `Map`      | [`ValueMap`]       |
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    DateTime(DateTime<Utc>),
    List(Vec<Value>),
    Map(ValueMap),
}

impl Value {
    /// The type of the payload.
    #[must_use]
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Self::Null => TypeTag::of::<()>(),
            Self::Bool(_) => TypeTag::of::<bool>(),
            Self::Int(_) => TypeTag::of::<i64>(),
            Self::UInt(_) => TypeTag::of::<u64>(),
            Self::Float(_) => TypeTag::of::<f64>(),
            Self::String(_) => TypeTag::of::<String>(),
            Self::DateTime(_) => TypeTag::of::<DateTime<Utc>>(),
            Self::List(_) => TypeTag::of::<Vec<Self>>(),
            Self::Map(_) => TypeTag::of::<ValueMap>(),
        }
    }

    /// The payload as a type-erased reference.
    #[must_use]
    pub fn as_any(&self) -> &dyn Any {
        match self {
            Self::Null => &(),
            Self::Bool(v) => v,
            Self::Int(v) => v,
            Self::UInt(v) => v,
            Self::Float(v) => v,
            Self::String(v) => v,
            Self::DateTime(v) => v,
            Self::List(v) => v,
            Self::Map(v) => v,
        }
    }

    /// Short lowercase name of the variant.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::DateTime(_) => "datetime",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v:?}"),
            Self::DateTime(v) => write!(f, "{}", v.to_rfc3339()),
            Self::List(items) => write!(f, "[{} items]", items.len()),
            Self::Map(entries) => write!(f, "{{{} entries}}", entries.len()),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from!(
    bool => Bool,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Int,
    u16 => Int,
    u32 => Int,
    u64 => UInt,
    f32 => Float,
    f64 => Float,
    String => String,
    &str => String,
    DateTime<Utc> => DateTime,
    Vec<Value> => List,
    ValueMap => Map,
);

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

// ============================================================================
// MAP VALIDATOR
// ============================================================================

/// Validates a [`ValueMap`] field by field.
///
/// Bindings are processed in sorted name order, in two passes:
///
/// 1. Every bound key must be present with a value of the validator's input
///    type. The first absent key fails with [`Violation::MissingField`] and
///    the first mistyped value with [`Violation::TypeMismatch`]; no field
///    validator runs.
/// 2. Every bound validator runs and failures are collected into a
///    [`FieldErrors`] aggregate.
///
/// Keys without a binding are ignored.
///
/// # Examples
///
/// ```
/// use fieldwise_validator::prelude::*;
///
/// let v = map(
///     ValidatorMap::new()
///         .field("id", string().required())
///         .field("port", number::<i64>().min(1).max(65535)),
/// );
///
/// let input = ValueMap::from([
///     ("id".to_owned(), Value::from("svc")),
///     ("port".to_owned(), Value::from(8080)),
/// ]);
/// assert!(v.validate(&input).is_ok());
///
/// let missing = ValueMap::from([("id".to_owned(), Value::from("svc"))]);
/// assert!(v.validate(&missing).is_err_and(|e| e.is(ErrorKind::FieldNotFound)));
/// ```
#[derive(Clone)]
pub struct MapValidator {
    chain: Validator<ValueMap>,
    fields: usize,
}

impl MapValidator {
    pub fn new(map: ValidatorMap<ValueMap>) -> Self {
        let bindings: Vec<(String, Arc<dyn AnyValidator>)> = map.into_entries().into_iter().collect();
        let fields = bindings.len();
        Self {
            chain: Validator::from_fn(move |input: &ValueMap| validate_entries(&bindings, input)),
            fields,
        }
    }

    /// Appends a map-level rule, run after the field passes succeed.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule<F>(mut self, check: F) -> Self
    where
        F: Fn(&ValueMap) -> Result<(), Violation> + Send + Sync + 'static,
    {
        self.chain = self.chain.rule(check);
        self
    }
}

fn validate_entries(
    bindings: &[(String, Arc<dyn AnyValidator>)],
    input: &ValueMap,
) -> Result<(), Violation> {
    let mut present = Vec::with_capacity(bindings.len());

    for (field, validator) in bindings {
        let Some(value) = input.get(field) else {
            tracing::debug!(field = %field, "bound field missing from map");
            return Err(Violation::MissingField {
                field: field.clone(),
            });
        };

        let expected = validator.accepts();
        let actual = value.type_tag();
        if expected != actual {
            tracing::debug!(
                field = %field,
                expected = expected.name(),
                actual = actual.name(),
                "map value has unexpected type"
            );
            return Err(Violation::TypeMismatch {
                field: field.clone(),
                expected: expected.name(),
                actual: actual.name(),
            });
        }

        present.push((field, validator, value));
    }

    let failures = present.into_iter().filter_map(|(field, validator, value)| {
        let error = validator.validate_any(value.as_any()).err()?;
        tracing::trace!(field = %field, code = error.code(), "field failed validation");
        Some(FieldError::new(field.clone(), error))
    });

    FieldErrors::collect(failures).map_err(Violation::Fields)
}

impl Validate for MapValidator {
    type Input = ValueMap;

    fn validate(&self, input: &ValueMap) -> Result<(), ValidationError> {
        self.chain.validate(input)
    }
}

impl fmt::Debug for MapValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapValidator")
            .field("fields", &self.fields)
            .field("rules", &self.chain.len())
            .finish()
    }
}

/// Builds a [`MapValidator`].
pub fn map(map: ValidatorMap<ValueMap>) -> MapValidator {
    MapValidator::new(map)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::ErrorKind;
    use crate::validators::{number, string};
    use pretty_assertions::assert_eq;

    fn entries<const N: usize>(pairs: [(&str, Value); N]) -> ValueMap {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v))
            .collect()
    }

    fn profile() -> MapValidator {
        map(ValidatorMap::new()
            .field("id", string().required())
            .field("name", string().max(5))
            .field("age", number::<i64>().min(0)))
    }

    #[test]
    fn payload_types() {
        assert!(Value::Null.type_tag().is::<()>());
        assert!(Value::from(3_u8).type_tag().is::<i64>());
        assert!(Value::from(u64::MAX).type_tag().is::<u64>());
        assert!(Value::from("x").type_tag().is::<String>());
        assert_eq!(Value::from(1.5).as_any().downcast_ref::<f64>(), Some(&1.5));
        assert_eq!(Value::from(None::<i64>), Value::Null);
    }

    #[test]
    fn valid_map() {
        let input = entries([
            ("id", "u-1".into()),
            ("name", "ann".into()),
            ("age", 42.into()),
        ]);
        assert!(profile().validate(&input).is_ok());
    }

    #[test]
    fn extra_keys_are_ignored() {
        let input = entries([
            ("id", "u-1".into()),
            ("name", "ann".into()),
            ("age", 42.into()),
            ("extra", Value::Null),
        ]);
        assert!(profile().validate(&input).is_ok());
    }

    #[test]
    fn missing_key_fails_before_any_rule() {
        let input = entries([("id", "".into()), ("name", "annabelle".into())]);
        let err = profile().validate(&input).unwrap_err();
        assert_eq!(
            err.violation(),
            &Violation::MissingField {
                field: "age".into()
            }
        );
        assert!(err.is(ErrorKind::FieldNotFound));
        assert_eq!(err.to_string(), "search age field: field does not exist");
    }

    #[test]
    fn mistyped_value_fails_before_any_rule() {
        let input = entries([
            ("id", "".into()),
            ("name", "ann".into()),
            ("age", "42".into()),
        ]);
        let err = profile().validate(&input).unwrap_err();
        assert!(err.is(ErrorKind::InvalidType));
        assert!(matches!(
            err.violation(),
            Violation::TypeMismatch { field, expected: "i64", actual }
                if field == "age" && actual.ends_with("String")
        ));
    }

    #[test]
    fn rule_failures_are_aggregated_in_name_order() {
        let input = entries([
            ("id", "".into()),
            ("name", "annabelle".into()),
            ("age", (-1).into()),
        ]);
        let err = profile().validate(&input).unwrap_err();
        let expected: FieldErrors = [
            FieldError::new("age", ErrorKind::TooSmall),
            FieldError::new("id", ErrorKind::Empty),
            FieldError::new("name", ErrorKind::TooBig),
        ]
        .into_iter()
        .collect();
        assert_eq!(err.field_errors(), Some(&expected));
    }

    #[test]
    fn nested_maps() {
        let inner = map(ValidatorMap::new().field("city", string().required()));
        let outer = map(ValidatorMap::new().field("address", inner));

        let input = entries([("address", Value::Map(entries([("city", "".into())])))]);
        let err = outer.validate(&input).unwrap_err();
        let nested = err
            .field_errors()
            .and_then(|f| f.get("address"))
            .and_then(ValidationError::field_errors)
            .unwrap();
        assert!(nested.get("city").is_some_and(|e| e.is(ErrorKind::Empty)));
    }
}
