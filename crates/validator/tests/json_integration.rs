//! Integration tests for JSON decoding and JSON error reports.

#![cfg(feature = "serde")]

use fieldwise_validator::json::value_map_from_json;
use fieldwise_validator::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn service() -> MapValidator {
    map(
        ValidatorMap::new()
            .field("name", string().required().max(16))
            .field("port", number::<i64>().min(1).max(65535))
            .field("replicas", number::<i64>().min(1))
            .field(
                "labels",
                map(ValidatorMap::new().field("team", string().required())),
            ),
    )
}

#[test]
fn valid_document() {
    let doc = json!({
        "name": "api",
        "port": 8080,
        "replicas": 3,
        "labels": { "team": "core", "tier": "web" },
        "ignored": [1, 2, 3],
    });
    let input = value_map_from_json(doc).unwrap();
    assert!(service().validate(&input).is_ok());
}

#[test]
fn invalid_document_report() {
    let doc = json!({
        "name": "",
        "port": 70000,
        "replicas": 1,
        "labels": { "team": "" },
    });
    let input = value_map_from_json(doc).unwrap();
    let err = service().validate(&input).unwrap_err();

    assert_eq!(
        err.to_json_value(),
        json!({
            "code": "fields",
            "message": "labels field: team field: input value is required\n\
                        name field: input value is required\n\
                        port field: input value is too big",
            "fields": [
                {
                    "field": "labels",
                    "code": "fields",
                    "message": "team field: input value is required",
                    "fields": [{
                        "field": "team",
                        "code": "empty",
                        "message": "input value is required",
                        "input": "\"\"",
                    }],
                },
                {
                    "field": "name",
                    "code": "empty",
                    "message": "input value is required",
                    "input": "\"\"",
                },
                {
                    "field": "port",
                    "code": "too_big",
                    "message": "input value is too big",
                    "input": "70000",
                },
            ],
        })
    );
}

#[test]
fn json_type_mismatch_is_structural() {
    let input = value_map_from_json(json!({
        "name": "api",
        "port": "8080",
        "replicas": 1,
        "labels": {},
    }))
    .unwrap();

    let err = service().validate(&input).unwrap_err();
    assert!(err.is(ErrorKind::InvalidType));
    assert!(err.to_string().starts_with("input "));
    assert!(err.to_string().ends_with("but expected i64: input is unexpected type"));
}

#[test]
fn floats_do_not_satisfy_integer_fields() {
    let input = value_map_from_json(json!({
        "name": "api",
        "port": 80.5,
        "replicas": 1,
        "labels": { "team": "core" },
    }))
    .unwrap();

    assert!(service().validate(&input).is_err_and(|e| e.is(ErrorKind::InvalidType)));
}

#[test]
fn top_level_must_be_an_object() {
    let err = value_map_from_json(json!("not an object")).unwrap_err();
    assert!(err.is(ErrorKind::InvalidType));
}
