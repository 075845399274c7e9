//! Error types for validation failures
//!
//! Errors come in three layers:
//!
//! - [`ErrorKind`] is the closed taxonomy every built-in rule reports.
//! - [`Violation`] is what a single rule returns when it rejects a value.
//! - [`ValidationError`] pairs a violation with a snapshot of the exact input
//!   that triggered it.
//!
//! Record and map validators aggregate per-field failures into
//! [`FieldErrors`], an ordered list of [`FieldError`]s. An aggregate is never
//! empty: collecting zero failures yields `Ok(())`.

use std::any::Any;
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::foundation::Validatable;

// ============================================================================
// ERROR KIND
// ============================================================================

/// The closed set of failure signals reported by built-in rules.
///
/// Identity is by variant, never by message text. Use [`ErrorKind::code`] for
/// a stable machine-readable identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ErrorKind {
    /// A value had a different runtime type than the validator accepts.
    #[error("input is unexpected type")]
    InvalidType,
    /// A bound field was absent from a dynamic map.
    #[error("field does not exist")]
    FieldNotFound,
    /// The value differs from the expected reference.
    #[error("input value is not equal expected value")]
    NotEqual,
    /// A required value was empty or absent.
    #[error("input value is required")]
    Empty,
    /// The value is above the configured upper bound.
    #[error("input value is too big")]
    TooBig,
    /// The value is below the configured lower bound.
    #[error("input value is too small")]
    TooSmall,
    /// The value matched neither the pattern nor the allowed set.
    #[error("input value is mismatch expected pattern")]
    MismatchPattern,
}

impl ErrorKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::InvalidType,
        Self::FieldNotFound,
        Self::NotEqual,
        Self::Empty,
        Self::TooBig,
        Self::TooSmall,
        Self::MismatchPattern,
    ];

    /// Stable snake_case identifier for programmatic handling.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidType => "invalid_type",
            Self::FieldNotFound => "field_not_found",
            Self::NotEqual => "not_equal",
            Self::Empty => "empty",
            Self::TooBig => "too_big",
            Self::TooSmall => "too_small",
            Self::MismatchPattern => "mismatch_pattern",
        }
    }
}

// ============================================================================
// VIOLATION
// ============================================================================

/// The failure signal a rule returns.
///
/// Built-in rules return [`Violation::Rule`]; record and map validators
/// return [`Violation::Fields`] or one of the structural variants; custom
/// rules wrap their own error type with [`Violation::custom`].
///
/// Equality is identity: kinds and field names must match, nested aggregates
/// compare recursively, custom errors compare by shared allocation.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum Violation {
    /// A built-in rule rejected the value.
    #[error(transparent)]
    Rule(#[from] ErrorKind),

    /// A dynamic map lacked a bound field.
    #[error("search {field} field: {}", ErrorKind::FieldNotFound)]
    MissingField {
        /// Name of the missing field.
        field: String,
    },

    /// A dynamic map value had a different type than its field validator.
    #[error("input {actual} type, but expected {expected}: {}", ErrorKind::InvalidType)]
    TypeMismatch {
        /// Name of the offending field.
        field: String,
        /// Type the field validator accepts.
        expected: &'static str,
        /// Type found in the map.
        actual: &'static str,
    },

    /// One or more fields of a record or map failed.
    #[error(transparent)]
    Fields(#[from] FieldErrors),

    /// A caller-supplied error from a custom rule.
    #[error(transparent)]
    Custom(Arc<dyn StdError + Send + Sync>),
}

impl Violation {
    /// Wraps an arbitrary error as a custom violation.
    pub fn custom<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(error))
    }

    /// Creates a custom violation carrying only a message.
    pub fn message(message: impl Into<Cow<'static, str>>) -> Self {
        Self::custom(Message(message.into()))
    }

    /// The taxonomy kind of this violation, if it has one.
    ///
    /// Aggregates and custom errors have no kind.
    #[must_use]
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Rule(kind) => Some(*kind),
            Self::MissingField { .. } => Some(ErrorKind::FieldNotFound),
            Self::TypeMismatch { .. } => Some(ErrorKind::InvalidType),
            Self::Fields(_) | Self::Custom(_) => None,
        }
    }

    /// Returns the nested aggregate if this violation is one.
    #[must_use]
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Fields(errors) => Some(errors),
            _ => None,
        }
    }

    /// Stable code: the kind's code, `"fields"` or `"custom"`.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Fields(_) => "fields",
            Self::Custom(_) => "custom",
            other => other.kind().map_or("custom", ErrorKind::code),
        }
    }
}

impl PartialEq for Violation {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Rule(a), Self::Rule(b)) => a == b,
            (Self::MissingField { field: a }, Self::MissingField { field: b }) => a == b,
            (
                Self::TypeMismatch {
                    field: f1,
                    expected: e1,
                    actual: a1,
                },
                Self::TypeMismatch {
                    field: f2,
                    expected: e2,
                    actual: a2,
                },
            ) => f1 == f2 && e1 == e2 && a1 == a2,
            (Self::Fields(a), Self::Fields(b)) => a == b,
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct Message(Cow<'static, str>);

// ============================================================================
// INPUT SNAPSHOT
// ============================================================================

/// A type-erased snapshot of the value that failed validation.
///
/// Holds a clone of the value (retrievable with [`Input::downcast_ref`]) and
/// its `Debug` rendering. Errors built without an input, such as expected
/// values in tests, carry an empty snapshot.
#[derive(Clone)]
pub struct Input {
    value: Option<Arc<dyn Any + Send + Sync>>,
    debug: Cow<'static, str>,
}

impl Input {
    /// Captures a clone of `value`.
    pub fn capture<T: Validatable>(value: &T) -> Self {
        Self {
            debug: Cow::Owned(format!("{value:?}")),
            value: Some(Arc::new(value.clone())),
        }
    }

    /// An empty snapshot.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            value: None,
            debug: Cow::Borrowed(""),
        }
    }

    /// Returns true if a value was captured.
    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.value.is_some()
    }

    /// Returns the captured value if it has type `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.as_deref()?.downcast_ref::<T>()
    }

    /// The `Debug` rendering of the captured value (empty if none).
    #[must_use]
    pub fn as_debug(&self) -> &str {
        &self.debug
    }
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_captured() {
            f.write_str(&self.debug)
        } else {
            f.write_str("<none>")
        }
    }
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A rule failure together with the input that triggered it.
///
/// Produced by a rule chain at the moment a rule fails. Displays as the
/// underlying violation's message. Equality compares violations only; the
/// captured input is diagnostic.
///
/// # Examples
///
/// ```
/// use fieldwise_validator::prelude::*;
///
/// let err = string().max(3).validate(&"hello".to_owned()).unwrap_err();
/// assert!(err.is(ErrorKind::TooBig));
/// assert_eq!(err.input_as::<String>().map(String::as_str), Some("hello"));
/// ```
#[derive(Debug, Clone)]
pub struct ValidationError {
    violation: Violation,
    input: Input,
}

impl ValidationError {
    /// Wraps `violation` together with a snapshot of `input`.
    pub fn new<T: Validatable>(violation: impl Into<Violation>, input: &T) -> Self {
        Self {
            violation: violation.into(),
            input: Input::capture(input),
        }
    }

    /// Wraps `violation` without capturing any input.
    pub fn without_input(violation: impl Into<Violation>) -> Self {
        Self {
            violation: violation.into(),
            input: Input::none(),
        }
    }

    /// The underlying violation.
    #[must_use]
    pub fn violation(&self) -> &Violation {
        &self.violation
    }

    /// Consumes the error and returns the underlying violation.
    #[must_use]
    pub fn into_violation(self) -> Violation {
        self.violation
    }

    /// The taxonomy kind, if the violation has one.
    #[must_use]
    pub fn kind(&self) -> Option<ErrorKind> {
        self.violation.kind()
    }

    /// Returns true if the violation is of the given kind.
    #[must_use]
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind() == Some(kind)
    }

    /// Stable code of the violation.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.violation.code()
    }

    /// The captured input snapshot.
    #[must_use]
    pub fn input(&self) -> &Input {
        &self.input
    }

    /// The captured input, if it has type `T`.
    #[must_use]
    pub fn input_as<T: Any>(&self) -> Option<&T> {
        self.input.downcast_ref()
    }

    /// The per-field aggregate, if this error came from a record or map.
    #[must_use]
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        self.violation.field_errors()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.violation, f)
    }
}

impl StdError for ValidationError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.violation.source()
    }
}

impl PartialEq for ValidationError {
    fn eq(&self, other: &Self) -> bool {
        self.violation == other.violation
    }
}

impl From<ErrorKind> for ValidationError {
    fn from(kind: ErrorKind) -> Self {
        Self::without_input(kind)
    }
}

impl From<Violation> for ValidationError {
    fn from(violation: Violation) -> Self {
        Self::without_input(violation)
    }
}

impl From<FieldErrors> for ValidationError {
    fn from(errors: FieldErrors) -> Self {
        Self::without_input(errors)
    }
}

// ============================================================================
// FIELD ERRORS
// ============================================================================

/// A failure attributed to one named field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field} field: {error}")]
pub struct FieldError {
    field: Cow<'static, str>,
    #[source]
    error: ValidationError,
}

impl FieldError {
    /// Creates a field error.
    pub fn new(field: impl Into<Cow<'static, str>>, error: impl Into<ValidationError>) -> Self {
        Self {
            field: field.into(),
            error: error.into(),
        }
    }

    /// Name of the failing field.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The field's failure.
    #[must_use]
    pub fn error(&self) -> &ValidationError {
        &self.error
    }

    /// Splits into field name and failure.
    #[must_use]
    pub fn into_parts(self) -> (Cow<'static, str>, ValidationError) {
        (self.field, self.error)
    }
}

/// Ordered per-field failures from one validation pass.
///
/// Order follows the record's declared field order (or the sorted binding
/// order of a dynamic map). Two aggregates are equal when they have the same
/// length, the same field names in the same order and equal violations,
/// recursively.
///
/// Renders as one `<field> field: <message>` line per entry.
///
/// Validators only produce non-empty aggregates, through
/// [`collect`](Self::collect). The [`FromIterator`] impl exists for building
/// expected values in assertions; an empty aggregate must not be wrapped into
/// a [`ValidationError`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    /// Turns collected failures into a result: no failures is success.
    pub fn collect<I>(errors: I) -> Result<(), Self>
    where
        I: IntoIterator<Item = FieldError>,
    {
        let errors: Vec<FieldError> = errors.into_iter().collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self { errors })
        }
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterates failures in aggregate order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// Names of the failing fields, in aggregate order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(FieldError::field)
    }

    /// The failure of `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.errors
            .iter()
            .find(|e| e.field() == field)
            .map(FieldError::error)
    }

    /// All failures as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[FieldError] {
        &self.errors
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl StdError for FieldErrors {}

impl FromIterator<FieldError> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

// ============================================================================
// TESTS
// ============================================================================
