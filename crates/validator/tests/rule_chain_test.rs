//! Integration tests for rule-chain semantics shared by every family.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use fieldwise_validator::prelude::*;
use regex::Regex;
use rstest::rstest;

// ============================================================================
// SHORT CIRCUIT
// ============================================================================

#[test]
fn failing_rule_stops_the_chain() {
    let chain = Validator::<String>::new()
        .rule(|_| Err(ErrorKind::MismatchPattern.into()))
        .rule(|_| panic!("must not run"));

    let err = chain.validate(&"input".to_owned()).unwrap_err();
    assert!(err.is(ErrorKind::MismatchPattern));
    assert_eq!(err.input_as::<String>().map(String::as_str), Some("input"));
}

#[test]
fn family_builders_short_circuit_too() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let v = number::<i32>().max(0).rule(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    assert!(v.validate(&1).is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(v.validate(&0).is_ok());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn custom_error_types_pass_through() {
    #[derive(Debug, thiserror::Error)]
    #[error("reserved word `{0}`")]
    struct Reserved(String);

    let v = string().rule(|s: &String| {
        if s == "admin" {
            Err(Violation::custom(Reserved(s.clone())))
        } else {
            Ok(())
        }
    });

    let err = v.validate(&"admin".to_owned()).unwrap_err();
    assert_eq!(err.kind(), None);
    assert_eq!(err.to_string(), "reserved word `admin`");
    assert!(matches!(err.violation(), Violation::Custom(_)));
}

// ============================================================================
// CONCRETE SCENARIOS
// ============================================================================

#[rstest]
#[case(2, None)]
#[case(4, None)]
#[case(5, Some(ErrorKind::TooBig))]
#[case(1, Some(ErrorKind::TooSmall))]
fn number_window(#[case] value: i32, #[case] expected: Option<ErrorKind>) {
    let v = number().min(2).max(4);
    assert_eq!(v.validate(&value).err().and_then(|e| e.kind()), expected);
}

#[rstest]
#[case("añb", None)]
#[case("añbç", Some(ErrorKind::TooBig))]
#[case("🦀🦀🦀", None)]
#[case("🦀🦀🦀🦀", Some(ErrorKind::TooBig))]
fn string_length_counts_codepoints(#[case] value: &str, #[case] expected: Option<ErrorKind>) {
    let v = string().max(3);
    assert_eq!(
        v.validate(&value.to_owned()).err().and_then(|e| e.kind()),
        expected
    );
}

// ============================================================================
// OPTIONAL VARIANTS
// ============================================================================

#[test]
fn absent_string_passes_everything_but_required() {
    let v = optional_string()
        .min(10)
        .max(0)
        .equal("x")
        .matches(Regex::new("^never$").unwrap())
        .one_of(["a"]);
    assert!(v.validate(&None).is_ok());
    assert!(v.required().validate(&None).is_err_and(|e| e.is(ErrorKind::Empty)));
}

#[test]
fn absent_number_passes_everything_but_required() {
    let v = optional_number::<i64>()
        .min(10)
        .max(0)
        .equal(5)
        .one_of([1, 2]);
    assert!(v.validate(&None).is_ok());
    assert!(v.required().validate(&None).is_err_and(|e| e.is(ErrorKind::Empty)));
}

#[test]
fn absent_time_passes_everything_but_required() {
    let epoch = DateTime::<Utc>::default;
    let v = optional_time()
        .after(Utc::now)
        .before(epoch)
        .eq_or_after(Utc::now)
        .eq_or_before(epoch)
        .equal(Utc::now)
        .after_date(Utc::now)
        .before_date(epoch)
        .eq_or_after_date(Utc::now)
        .eq_or_before_date(epoch)
        .equal_date(epoch);
    assert!(v.validate(&None).is_ok());
    assert!(v.required().validate(&None).is_err_and(|e| e.is(ErrorKind::Empty)));
}

#[test]
fn present_optional_values_are_checked() {
    assert!(
        optional_string()
            .max(1)
            .validate(&Some("ab".to_owned()))
            .is_err_and(|e| e.is(ErrorKind::TooBig))
    );
    assert!(
        optional_number::<u8>()
            .min(3)
            .validate(&Some(2))
            .is_err_and(|e| e.is(ErrorKind::TooSmall))
    );
    assert!(
        optional_time()
            .before(DateTime::<Utc>::default)
            .validate(&Some(Utc::now()))
            .is_err_and(|e| e.is(ErrorKind::TooBig))
    );
}
