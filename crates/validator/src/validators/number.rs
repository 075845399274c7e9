//! Numeric validators
//!
//! One generic family covers every primitive integer and float width.
//! Comparisons use `PartialOrd`, so a `NaN` input passes both bounds.

use std::fmt;

use crate::foundation::{ErrorKind, Validatable, Validate, ValidationError, Validator, Violation};
use crate::validators::when_present;

/// Ordered numeric values the number family can validate.
///
/// Implemented for all primitive integers and floats. A newtype over a number
/// opts in by deriving `Clone`, `Copy`, `Debug` and `PartialOrd`, then adding
/// an empty `impl Number for Newtype {}`.
pub trait Number: PartialOrd + Copy + Validatable {}

macro_rules! impl_number {
    ($($ty:ty),* $(,)?) => {
        $(impl Number for $ty {})*
    };
}

impl_number!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

// ============================================================================
// RULES
// ============================================================================

fn check_min<N: Number>(value: N, min: N) -> Result<(), Violation> {
    if min > value {
        Err(ErrorKind::TooSmall.into())
    } else {
        Ok(())
    }
}

fn check_max<N: Number>(value: N, max: N) -> Result<(), Violation> {
    if max < value {
        Err(ErrorKind::TooBig.into())
    } else {
        Ok(())
    }
}

fn check_equal<N: Number>(value: N, expected: N) -> Result<(), Violation> {
    if value == expected {
        Ok(())
    } else {
        Err(ErrorKind::NotEqual.into())
    }
}

fn check_one_of<N: Number>(value: N, allowed: &[N]) -> Result<(), Violation> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(ErrorKind::MismatchPattern.into())
    }
}

// ============================================================================
// NUMBER VALIDATOR
// ============================================================================

/// Rule chain over a number.
///
/// # Examples
///
/// ```
/// use fieldwise_validator::prelude::*;
///
/// let percent = number::<f64>().min(0.0).max(100.0);
/// assert!(percent.validate(&42.5).is_ok());
/// assert!(percent.validate(&100.1).is_err_and(|e| e.is(ErrorKind::TooBig)));
/// ```
#[derive(Clone)]
pub struct NumberValidator<N> {
    chain: Validator<N>,
}

impl<N: Number> NumberValidator<N> {
    /// An empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            chain: Validator::new(),
        }
    }

    /// Fails with [`ErrorKind::TooSmall`] when the value is below `min`.
    #[must_use = "builder methods must be chained or built"]
    pub fn min(self, min: N) -> Self {
        self.rule(move |value: &N| check_min(*value, min))
    }

    /// Fails with [`ErrorKind::TooBig`] when the value is above `max`.
    #[must_use = "builder methods must be chained or built"]
    pub fn max(self, max: N) -> Self {
        self.rule(move |value: &N| check_max(*value, max))
    }

    /// Fails with [`ErrorKind::NotEqual`] unless the value equals `expected`.
    #[must_use = "builder methods must be chained or built"]
    pub fn equal(self, expected: N) -> Self {
        self.rule(move |value: &N| check_equal(*value, expected))
    }

    /// Fails with [`ErrorKind::MismatchPattern`] unless the value is one of
    /// `allowed`.
    #[must_use = "builder methods must be chained or built"]
    pub fn one_of(self, allowed: impl IntoIterator<Item = N>) -> Self {
        let allowed: Vec<N> = allowed.into_iter().collect();
        self.rule(move |value: &N| check_one_of(*value, &allowed))
    }

    /// Appends a custom rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule<F>(mut self, check: F) -> Self
    where
        F: Fn(&N) -> Result<(), Violation> + Send + Sync + 'static,
    {
        self.chain = self.chain.rule(check);
        self
    }

    /// The underlying rule chain.
    #[must_use]
    pub fn into_validator(self) -> Validator<N> {
        self.chain
    }
}

impl<N: Number> Default for NumberValidator<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Number> Validate for NumberValidator<N> {
    type Input = N;

    fn validate(&self, input: &N) -> Result<(), ValidationError> {
        self.chain.validate(input)
    }
}

impl<N> fmt::Debug for NumberValidator<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumberValidator")
            .field("type", &std::any::type_name::<N>())
            .field("rules", &self.chain.len())
            .finish()
    }
}

// ============================================================================
// OPTIONAL NUMBER VALIDATOR
// ============================================================================

/// Rule chain over an optional number.
///
/// `None` passes every rule except [`required`](Self::required). Zero is a
/// present value, not an empty one.
#[derive(Clone)]
pub struct OptionalNumberValidator<N> {
    chain: Validator<Option<N>>,
}

impl<N: Number> OptionalNumberValidator<N> {
    /// An empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            chain: Validator::new(),
        }
    }

    /// Fails with [`ErrorKind::Empty`] on `None`.
    #[must_use = "builder methods must be chained or built"]
    pub fn required(mut self) -> Self {
        self.chain = self.chain.rule(|value: &Option<N>| match value {
            Some(_) => Ok(()),
            None => Err(ErrorKind::Empty.into()),
        });
        self
    }

    /// Fails with [`ErrorKind::TooSmall`] when the value is below `min`.
    #[must_use = "builder methods must be chained or built"]
    pub fn min(self, min: N) -> Self {
        self.rule(move |value: &N| check_min(*value, min))
    }

    /// Fails with [`ErrorKind::TooBig`] when the value is above `max`.
    #[must_use = "builder methods must be chained or built"]
    pub fn max(self, max: N) -> Self {
        self.rule(move |value: &N| check_max(*value, max))
    }

    /// Fails with [`ErrorKind::NotEqual`] unless the value equals `expected`.
    #[must_use = "builder methods must be chained or built"]
    pub fn equal(self, expected: N) -> Self {
        self.rule(move |value: &N| check_equal(*value, expected))
    }

    /// Fails with [`ErrorKind::MismatchPattern`] unless the value is one of
    /// `allowed`.
    #[must_use = "builder methods must be chained or built"]
    pub fn one_of(self, allowed: impl IntoIterator<Item = N>) -> Self {
        let allowed: Vec<N> = allowed.into_iter().collect();
        self.rule(move |value: &N| check_one_of(*value, &allowed))
    }

    /// Appends a custom rule over the present value.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule<F>(mut self, check: F) -> Self
    where
        F: Fn(&N) -> Result<(), Violation> + Send + Sync + 'static,
    {
        self.chain = self.chain.rule(when_present(check));
        self
    }

    /// The underlying rule chain.
    #[must_use]
    pub fn into_validator(self) -> Validator<Option<N>> {
        self.chain
    }
}

impl<N: Number> Default for OptionalNumberValidator<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Number> Validate for OptionalNumberValidator<N> {
    type Input = Option<N>;

    fn validate(&self, input: &Option<N>) -> Result<(), ValidationError> {
        self.chain.validate(input)
    }
}

impl<N> fmt::Debug for OptionalNumberValidator<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionalNumberValidator")
            .field("type", &std::any::type_name::<N>())
            .field("rules", &self.chain.len())
            .finish()
    }
}

// ============================================================================
// FACTORY FUNCTIONS
// ============================================================================

/// Starts a rule chain over `N`.
#[must_use]
pub fn number<N: Number>() -> NumberValidator<N> {
    NumberValidator::new()
}

/// Starts a rule chain over `Option<N>`.
#[must_use]
pub fn optional_number<N: Number>() -> OptionalNumberValidator<N> {
    OptionalNumberValidator::new()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(4, false)]
    #[case(5, true)]
    #[case(6, true)]
    fn min_is_inclusive(#[case] input: i32, #[case] ok: bool) {
        let result = number().min(5).validate(&input);
        assert_eq!(result.is_ok(), ok);
        assert!(result.is_ok() || result.is_err_and(|e| e.is(ErrorKind::TooSmall)));
    }

    #[rstest]
    #[case(4, true)]
    #[case(5, true)]
    #[case(6, false)]
    fn max_is_inclusive(#[case] input: i32, #[case] ok: bool) {
        let result = number().max(5).validate(&input);
        assert_eq!(result.is_ok(), ok);
        assert!(result.is_ok() || result.is_err_and(|e| e.is(ErrorKind::TooBig)));
    }

    #[test]
    fn equal() {
        let v = number::<u64>().equal(7);
        assert!(v.validate(&7).is_ok());
        assert!(v.validate(&8).is_err_and(|e| e.is(ErrorKind::NotEqual)));
    }

    #[test]
    fn one_of() {
        let v = number::<u16>().one_of([80, 443]);
        assert!(v.validate(&443).is_ok());
        assert!(v.validate(&8080).is_err_and(|e| e.is(ErrorKind::MismatchPattern)));
    }

    #[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
    struct Celsius(f64);

    impl Number for Celsius {}

    #[test]
    fn newtype_numbers() {
        let v = number().min(Celsius(-40.0)).max(Celsius(60.0));
        assert!(v.validate(&Celsius(21.5)).is_ok());
        assert!(v.validate(&Celsius(80.0)).is_err_and(|e| e.is(ErrorKind::TooBig)));
    }

    #[test]
    fn floats() {
        let v = number::<f32>().min(-1.5).max(1.5);
        assert!(v.validate(&0.0).is_ok());
        assert!(v.validate(&-1.6).is_err_and(|e| e.is(ErrorKind::TooSmall)));
        assert!(v.validate(&f32::NAN).is_ok());
    }

    #[test]
    fn wide_integers() {
        let v = number::<i128>().max(i128::from(u64::MAX));
        assert!(v.validate(&i128::from(u64::MAX)).is_ok());
        assert!(v.validate(&(i128::from(u64::MAX) + 1)).is_err());
    }

    #[test]
    fn optional_required() {
        let v = optional_number::<i32>().required();
        assert!(v.validate(&Some(0)).is_ok());
        assert!(v.validate(&None).is_err_and(|e| e.is(ErrorKind::Empty)));
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some(1), false)]
    #[case(Some(10), true)]
    #[case(Some(11), false)]
    fn optional_bounds_skip_none(#[case] input: Option<i32>, #[case] ok: bool) {
        let v = optional_number().min(2).max(10);
        assert_eq!(v.validate(&input).is_ok(), ok);
    }

    #[test]
    fn optional_failure_captures_option() {
        let err = optional_number::<u8>().max(1).validate(&Some(2)).unwrap_err();
        assert_eq!(err.input_as::<Option<u8>>(), Some(&Some(2)));
    }
}
