//! Integration tests for dynamic-map validation.

use chrono::{DateTime, Duration, Utc};
use fieldwise_validator::prelude::*;
use pretty_assertions::assert_eq;

fn input<const N: usize>(pairs: [(&str, Value); N]) -> ValueMap {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v))
        .collect()
}

fn never<T>(_: &T) -> Result<(), Violation> {
    panic!("rule must not be evaluated")
}

#[test]
fn missing_field_aborts_before_any_rule() {
    let v = map(
        ValidatorMap::new()
            .field("a", string().rule(never))
            .field("b", string()),
    );

    let err = v.validate(&input([("a", "x".into())])).unwrap_err();
    assert_eq!(
        err.violation(),
        &Violation::MissingField { field: "b".into() }
    );
    assert!(err.field_errors().is_none());
}

#[test]
fn wrong_type_aborts_before_any_rule() {
    let v = map(
        ValidatorMap::new()
            .field("count", number::<i64>().rule(never))
            .field("label", string().rule(never)),
    );

    let err = v
        .validate(&input([("count", 3.into()), ("label", 4.into())]))
        .unwrap_err();
    assert!(err.is(ErrorKind::InvalidType));
    assert!(matches!(
        err.violation(),
        Violation::TypeMismatch { field, expected, actual: "i64" }
            if field == "label" && expected.ends_with("String")
    ));
}

#[test]
fn null_is_its_own_type() {
    let v = map(ValidatorMap::new().field("name", optional_string()));
    let err = v.validate(&input([("name", Value::Null)])).unwrap_err();
    assert!(err.is(ErrorKind::InvalidType));
}

#[test]
fn rule_failures_are_collected_in_sorted_order() {
    let v = map(
        ValidatorMap::new()
            .field("zeta", string().required())
            .field("alpha", number::<i64>().max(10))
            .field("mid", number::<f64>().min(0.0)),
    );

    let err = v
        .validate(&input([
            ("zeta", "".into()),
            ("alpha", 11.into()),
            ("mid", (-0.5).into()),
        ]))
        .unwrap_err();

    let fields: Vec<_> = err.field_errors().unwrap().fields().collect();
    assert_eq!(fields, ["alpha", "mid", "zeta"]);
}

#[test]
fn passing_fields_are_not_reported() {
    let v = map(
        ValidatorMap::new()
            .field("ok", string())
            .field("bad", string().required()),
    );

    let err = v
        .validate(&input([("ok", "fine".into()), ("bad", "".into())]))
        .unwrap_err();
    let fields = err.field_errors().unwrap();
    assert_eq!(fields.len(), 1);
    assert!(fields.get("bad").is_some_and(|e| e.is(ErrorKind::Empty)));
}

#[test]
fn timestamps_and_lists() {
    let deadline = Utc::now() + Duration::days(1);
    let v = map(
        ValidatorMap::new()
            .field("due", time().after(Utc::now))
            .field(
                "tags",
                Validator::<Vec<Value>>::new().rule(|tags| {
                    if tags.is_empty() {
                        Err(ErrorKind::Empty.into())
                    } else {
                        Ok(())
                    }
                }),
            ),
    );

    let ok = input([
        ("due", deadline.into()),
        ("tags", vec![Value::from("x")].into()),
    ]);
    assert!(v.validate(&ok).is_ok());

    let past: DateTime<Utc> = Utc::now() - Duration::days(1);
    let bad = input([("due", past.into()), ("tags", Vec::<Value>::new().into())]);
    let err = v.validate(&bad).unwrap_err();
    let fields = err.field_errors().unwrap();
    assert!(fields.get("due").is_some_and(|e| e.is(ErrorKind::TooSmall)));
    assert!(fields.get("tags").is_some_and(|e| e.is(ErrorKind::Empty)));
}

#[test]
fn map_level_rules_run_after_fields() {
    let v = map(
        ValidatorMap::new()
            .field("min", number::<i64>())
            .field("max", number::<i64>()),
    )
    .rule(|m| match (m.get("min"), m.get("max")) {
        (Some(Value::Int(lo)), Some(Value::Int(hi))) if lo > hi => {
            Err(Violation::message("min must not exceed max"))
        }
        _ => Ok(()),
    });

    assert!(v.validate(&input([("min", 1.into()), ("max", 2.into())])).is_ok());
    let err = v
        .validate(&input([("min", 3.into()), ("max", 2.into())]))
        .unwrap_err();
    assert_eq!(err.to_string(), "min must not exceed max");
}

#[test]
fn empty_binding_set_accepts_any_map() {
    let v = map(ValidatorMap::new());
    assert!(v.validate(&ValueMap::new()).is_ok());
    assert!(v.validate(&input([("anything", Value::Null)])).is_ok());
}
