//! String validators
//!
//! Lengths are counted in Unicode scalar values, so `"日本語"` has length 3.

use std::fmt;

use regex::Regex;

use crate::foundation::{ErrorKind, Validatable, Validate, ValidationError, Validator, Violation};
use crate::validators::when_present;

/// String-like values the string family can validate.
///
/// Covers `String`, `Box<str>`, `Arc<str>`, `Cow<'static, str>` and any
/// newtype that exposes its text through `AsRef<str>`.
pub trait Text: AsRef<str> + PartialEq + Validatable {}

impl<S> Text for S where S: AsRef<str> + PartialEq + Validatable {}

// ============================================================================
// RULES
// ============================================================================

fn check_required(value: &str) -> Result<(), Violation> {
    if value.is_empty() {
        Err(ErrorKind::Empty.into())
    } else {
        Ok(())
    }
}

fn check_min(value: &str, min: usize) -> Result<(), Violation> {
    if value.chars().count() < min {
        Err(ErrorKind::TooSmall.into())
    } else {
        Ok(())
    }
}

fn check_max(value: &str, max: usize) -> Result<(), Violation> {
    if value.chars().count() > max {
        Err(ErrorKind::TooBig.into())
    } else {
        Ok(())
    }
}

fn check_equal<S: PartialEq>(value: &S, expected: &S) -> Result<(), Violation> {
    if value == expected {
        Ok(())
    } else {
        Err(ErrorKind::NotEqual.into())
    }
}

fn check_matches(value: &str, pattern: &Regex) -> Result<(), Violation> {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(ErrorKind::MismatchPattern.into())
    }
}

fn check_one_of<S: PartialEq>(value: &S, allowed: &[S]) -> Result<(), Violation> {
    if allowed.contains(value) {
        Ok(())
    } else {
        Err(ErrorKind::MismatchPattern.into())
    }
}

// ============================================================================
// STRING VALIDATOR
// ============================================================================

/// Rule chain over a string-like value.
///
/// # Examples
///
/// ```
/// use fieldwise_validator::prelude::*;
/// use regex::Regex;
///
/// let slug = string()
///     .required()
///     .max(16)
///     .matches(Regex::new("^[a-z0-9-]+$").unwrap());
///
/// assert!(slug.validate(&"hello-world".to_owned()).is_ok());
/// assert!(
///     slug.validate(&"Hello World".to_owned())
///         .is_err_and(|e| e.is(ErrorKind::MismatchPattern))
/// );
/// ```
#[derive(Clone)]
pub struct StringValidator<S = String> {
    chain: Validator<S>,
}

impl<S: Text> StringValidator<S> {
    /// An empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            chain: Validator::new(),
        }
    }

    /// Fails with [`ErrorKind::Empty`] on the empty string.
    #[must_use = "builder methods must be chained or built"]
    pub fn required(self) -> Self {
        self.rule(|value: &S| check_required(value.as_ref()))
    }

    /// Fails with [`ErrorKind::TooSmall`] below `min` characters.
    #[must_use = "builder methods must be chained or built"]
    pub fn min(self, min: usize) -> Self {
        self.rule(move |value: &S| check_min(value.as_ref(), min))
    }

    /// Fails with [`ErrorKind::TooBig`] above `max` characters.
    #[must_use = "builder methods must be chained or built"]
    pub fn max(self, max: usize) -> Self {
        self.rule(move |value: &S| check_max(value.as_ref(), max))
    }

    /// Fails with [`ErrorKind::NotEqual`] unless the value equals `expected`.
    #[must_use = "builder methods must be chained or built"]
    pub fn equal(self, expected: impl Into<S>) -> Self {
        let expected = expected.into();
        self.rule(move |value: &S| check_equal(value, &expected))
    }

    /// Fails with [`ErrorKind::MismatchPattern`] unless `pattern` matches.
    ///
    /// The pattern is searched, not anchored; add `^` and `$` for a full
    /// match.
    #[must_use = "builder methods must be chained or built"]
    pub fn matches(self, pattern: Regex) -> Self {
        self.rule(move |value: &S| check_matches(value.as_ref(), &pattern))
    }

    /// Fails with [`ErrorKind::MismatchPattern`] unless the value is one of
    /// `allowed`.
    #[must_use = "builder methods must be chained or built"]
    pub fn one_of<I, V>(self, allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<S>,
    {
        let allowed: Vec<S> = allowed.into_iter().map(Into::into).collect();
        self.rule(move |value: &S| check_one_of(value, &allowed))
    }

    /// Appends a custom rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule<F>(mut self, check: F) -> Self
    where
        F: Fn(&S) -> Result<(), Violation> + Send + Sync + 'static,
    {
        self.chain = self.chain.rule(check);
        self
    }

    /// The underlying rule chain.
    #[must_use]
    pub fn into_validator(self) -> Validator<S> {
        self.chain
    }
}

impl<S: Text> Default for StringValidator<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Text> Validate for StringValidator<S> {
    type Input = S;

    fn validate(&self, input: &S) -> Result<(), ValidationError> {
        self.chain.validate(input)
    }
}

impl<S> fmt::Debug for StringValidator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringValidator")
            .field("rules", &self.chain.len())
            .finish()
    }
}

// ============================================================================
// OPTIONAL STRING VALIDATOR
// ============================================================================

/// Rule chain over an optional string-like value.
///
/// `None` passes every rule except [`required`](Self::required).
#[derive(Clone)]
pub struct OptionalStringValidator<S = String> {
    chain: Validator<Option<S>>,
}

impl<S: Text> OptionalStringValidator<S> {
    /// An empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            chain: Validator::new(),
        }
    }

    /// Fails with [`ErrorKind::Empty`] on `None`. A present empty string
    /// passes; chain [`min`](Self::min) to reject it.
    #[must_use = "builder methods must be chained or built"]
    pub fn required(mut self) -> Self {
        self.chain = self.chain.rule(|value: &Option<S>| match value {
            Some(_) => Ok(()),
            None => Err(ErrorKind::Empty.into()),
        });
        self
    }

    /// Fails with [`ErrorKind::TooSmall`] below `min` characters.
    #[must_use = "builder methods must be chained or built"]
    pub fn min(self, min: usize) -> Self {
        self.rule(move |value: &S| check_min(value.as_ref(), min))
    }

    /// Fails with [`ErrorKind::TooBig`] above `max` characters.
    #[must_use = "builder methods must be chained or built"]
    pub fn max(self, max: usize) -> Self {
        self.rule(move |value: &S| check_max(value.as_ref(), max))
    }

    /// Fails with [`ErrorKind::NotEqual`] unless the value equals `expected`.
    #[must_use = "builder methods must be chained or built"]
    pub fn equal(self, expected: impl Into<S>) -> Self {
        let expected = expected.into();
        self.rule(move |value: &S| check_equal(value, &expected))
    }

    /// Fails with [`ErrorKind::MismatchPattern`] unless `pattern` matches.
    #[must_use = "builder methods must be chained or built"]
    pub fn matches(self, pattern: Regex) -> Self {
        self.rule(move |value: &S| check_matches(value.as_ref(), &pattern))
    }

    /// Fails with [`ErrorKind::MismatchPattern`] unless the value is one of
    /// `allowed`.
    #[must_use = "builder methods must be chained or built"]
    pub fn one_of<I, V>(self, allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<S>,
    {
        let allowed: Vec<S> = allowed.into_iter().map(Into::into).collect();
        self.rule(move |value: &S| check_one_of(value, &allowed))
    }

    /// Appends a custom rule over the present value.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule<F>(mut self, check: F) -> Self
    where
        F: Fn(&S) -> Result<(), Violation> + Send + Sync + 'static,
    {
        self.chain = self.chain.rule(when_present(check));
        self
    }

    /// The underlying rule chain.
    #[must_use]
    pub fn into_validator(self) -> Validator<Option<S>> {
        self.chain
    }
}

impl<S: Text> Default for OptionalStringValidator<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Text> Validate for OptionalStringValidator<S> {
    type Input = Option<S>;

    fn validate(&self, input: &Option<S>) -> Result<(), ValidationError> {
        self.chain.validate(input)
    }
}

impl<S> fmt::Debug for OptionalStringValidator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionalStringValidator")
            .field("rules", &self.chain.len())
            .finish()
    }
}

// ============================================================================
// FACTORY FUNCTIONS
// ============================================================================

/// Starts a rule chain over `String`.
#[must_use]
pub fn string() -> StringValidator {
    StringValidator::new()
}

/// Starts a rule chain over any [`Text`] type.
#[must_use]
pub fn text<S: Text>() -> StringValidator<S> {
    StringValidator::new()
}

/// Starts a rule chain over `Option<String>`.
#[must_use]
pub fn optional_string() -> OptionalStringValidator {
    OptionalStringValidator::new()
}

/// Starts a rule chain over `Option<S>` for any [`Text`] type.
#[must_use]
pub fn optional_text<S: Text>() -> OptionalStringValidator<S> {
    OptionalStringValidator::new()
}

// ============================================================================
// TESTS
// ============================================================================
