//! Time validators
//!
//! Comparison targets are producers (`Fn() -> DateTime<Tz>`) evaluated each
//! time the rule runs, so `time().before(Utc::now)` always compares against
//! the current moment rather than the moment the validator was built.
//!
//! The `*_date` variants compare calendar dates in the value's own time zone
//! and ignore the time of day.
//!
//! The zero instant is the Unix epoch, `1970-01-01T00:00:00Z`, which is what
//! `DateTime::<Utc>::default()` yields.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};

use crate::foundation::{ErrorKind, Validate, ValidationError, Validator, Violation};
use crate::validators::when_present;

/// Time zones whose instants can be validated.
///
/// Covers `Utc`, `FixedOffset` and `Local`.
pub trait Zone: TimeZone<Offset: Send + Sync + 'static> + 'static {}

impl<Tz> Zone for Tz where Tz: TimeZone<Offset: Send + Sync + 'static> + 'static {}

// ============================================================================
// RULES
// ============================================================================

fn is_zero<Tz: TimeZone>(value: &DateTime<Tz>) -> bool {
    value.timestamp() == 0 && value.timestamp_subsec_nanos() == 0
}

fn check_required<Tz: TimeZone>(value: &DateTime<Tz>) -> Result<(), Violation> {
    if is_zero(value) {
        Err(ErrorKind::Empty.into())
    } else {
        Ok(())
    }
}

fn check_after<T: PartialOrd>(value: &T, target: &T) -> Result<(), Violation> {
    if value > target {
        Ok(())
    } else {
        Err(ErrorKind::TooSmall.into())
    }
}

fn check_eq_or_after<T: PartialOrd>(value: &T, target: &T) -> Result<(), Violation> {
    if target > value {
        Err(ErrorKind::TooSmall.into())
    } else {
        Ok(())
    }
}

fn check_before<T: PartialOrd>(value: &T, target: &T) -> Result<(), Violation> {
    if value < target {
        Ok(())
    } else {
        Err(ErrorKind::TooBig.into())
    }
}

fn check_eq_or_before<T: PartialOrd>(value: &T, target: &T) -> Result<(), Violation> {
    if target < value {
        Err(ErrorKind::TooBig.into())
    } else {
        Ok(())
    }
}

fn check_equal<T: PartialEq>(value: &T, target: &T) -> Result<(), Violation> {
    if value == target {
        Ok(())
    } else {
        Err(ErrorKind::NotEqual.into())
    }
}

type Check<T> = fn(&T, &T) -> Result<(), Violation>;

/// Builds a rule comparing the value's instant against a fresh target.
fn instant<Tz, F>(check: Check<DateTime<Tz>>, target: F) -> impl Fn(&DateTime<Tz>) -> Result<(), Violation>
where
    Tz: Zone,
    F: Fn() -> DateTime<Tz>,
{
    move |value: &DateTime<Tz>| check(value, &target())
}

/// Builds a rule comparing the value's calendar date against a fresh target.
fn date<Tz, F>(
    check: Check<chrono::NaiveDate>,
    target: F,
) -> impl Fn(&DateTime<Tz>) -> Result<(), Violation>
where
    Tz: Zone,
    F: Fn() -> DateTime<Tz>,
{
    move |value: &DateTime<Tz>| check(&value.date_naive(), &target().date_naive())
}

// ============================================================================
// SHARED BUILDER SURFACE
// ============================================================================

macro_rules! time_rules {
    () => {
        /// Fails with [`ErrorKind::TooSmall`] unless the value is strictly
        /// after the target instant.
        #[must_use = "builder methods must be chained or built"]
        pub fn after<F>(self, target: F) -> Self
        where
            F: Fn() -> DateTime<Tz> + Send + Sync + 'static,
        {
            self.rule(instant(check_after, target))
        }

        /// Fails with [`ErrorKind::TooSmall`] unless the value's date is
        /// strictly after the target's date.
        #[must_use = "builder methods must be chained or built"]
        pub fn after_date<F>(self, target: F) -> Self
        where
            F: Fn() -> DateTime<Tz> + Send + Sync + 'static,
        {
            self.rule(date(check_after, target))
        }

        /// Fails with [`ErrorKind::TooSmall`] when the value is before the
        /// target instant.
        #[must_use = "builder methods must be chained or built"]
        pub fn eq_or_after<F>(self, target: F) -> Self
        where
            F: Fn() -> DateTime<Tz> + Send + Sync + 'static,
        {
            self.rule(instant(check_eq_or_after, target))
        }

        /// Fails with [`ErrorKind::TooSmall`] when the value's date is before
        /// the target's date.
        #[must_use = "builder methods must be chained or built"]
        pub fn eq_or_after_date<F>(self, target: F) -> Self
        where
            F: Fn() -> DateTime<Tz> + Send + Sync + 'static,
        {
            self.rule(date(check_eq_or_after, target))
        }

        /// Fails with [`ErrorKind::TooBig`] unless the value is strictly
        /// before the target instant.
        #[must_use = "builder methods must be chained or built"]
        pub fn before<F>(self, target: F) -> Self
        where
            F: Fn() -> DateTime<Tz> + Send + Sync + 'static,
        {
            self.rule(instant(check_before, target))
        }

        /// Fails with [`ErrorKind::TooBig`] unless the value's date is
        /// strictly before the target's date.
        #[must_use = "builder methods must be chained or built"]
        pub fn before_date<F>(self, target: F) -> Self
        where
            F: Fn() -> DateTime<Tz> + Send + Sync + 'static,
        {
            self.rule(date(check_before, target))
        }

        /// Fails with [`ErrorKind::TooBig`] when the value is after the
        /// target instant.
        #[must_use = "builder methods must be chained or built"]
        pub fn eq_or_before<F>(self, target: F) -> Self
        where
            F: Fn() -> DateTime<Tz> + Send + Sync + 'static,
        {
            self.rule(instant(check_eq_or_before, target))
        }

        /// Fails with [`ErrorKind::TooBig`] when the value's date is after
        /// the target's date.
        #[must_use = "builder methods must be chained or built"]
        pub fn eq_or_before_date<F>(self, target: F) -> Self
        where
            F: Fn() -> DateTime<Tz> + Send + Sync + 'static,
        {
            self.rule(date(check_eq_or_before, target))
        }

        /// Fails with [`ErrorKind::NotEqual`] unless the value is the same
        /// instant as the target.
        #[must_use = "builder methods must be chained or built"]
        pub fn equal<F>(self, target: F) -> Self
        where
            F: Fn() -> DateTime<Tz> + Send + Sync + 'static,
        {
            self.rule(instant(check_equal, target))
        }

        /// Fails with [`ErrorKind::NotEqual`] unless the value falls on the
        /// target's date.
        #[must_use = "builder methods must be chained or built"]
        pub fn equal_date<F>(self, target: F) -> Self
        where
            F: Fn() -> DateTime<Tz> + Send + Sync + 'static,
        {
            self.rule(date(check_equal, target))
        }
    };
}

// ============================================================================
// TIME VALIDATOR
// ============================================================================

/// Rule chain over a [`DateTime`].
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use fieldwise_validator::prelude::*;
///
/// let future = time().required().after(Utc::now);
///
/// assert!(future.validate(&(Utc::now() + Duration::hours(1))).is_ok());
/// assert!(
///     future
///         .validate(&(Utc::now() - Duration::hours(1)))
///         .is_err_and(|e| e.is(ErrorKind::TooSmall))
/// );
/// ```
pub struct TimeValidator<Tz: TimeZone = Utc> {
    chain: Validator<DateTime<Tz>>,
}

impl<Tz: Zone> TimeValidator<Tz> {
    /// An empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            chain: Validator::new(),
        }
    }

    /// Fails with [`ErrorKind::Empty`] on the zero instant.
    #[must_use = "builder methods must be chained or built"]
    pub fn required(self) -> Self {
        self.rule(check_required)
    }

    time_rules!();

    /// Appends a custom rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule<F>(mut self, check: F) -> Self
    where
        F: Fn(&DateTime<Tz>) -> Result<(), Violation> + Send + Sync + 'static,
    {
        self.chain = self.chain.rule(check);
        self
    }

    /// The underlying rule chain.
    #[must_use]
    pub fn into_validator(self) -> Validator<DateTime<Tz>> {
        self.chain
    }
}

impl<Tz: Zone> Default for TimeValidator<Tz> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tz: Zone> Validate for TimeValidator<Tz> {
    type Input = DateTime<Tz>;

    fn validate(&self, input: &DateTime<Tz>) -> Result<(), ValidationError> {
        self.chain.validate(input)
    }
}

impl<Tz: TimeZone> Clone for TimeValidator<Tz> {
    fn clone(&self) -> Self {
        Self {
            chain: self.chain.clone(),
        }
    }
}

impl<Tz: TimeZone> fmt::Debug for TimeValidator<Tz> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeValidator")
            .field("rules", &self.chain.len())
            .finish()
    }
}

// ============================================================================
// OPTIONAL TIME VALIDATOR
// ============================================================================

/// Rule chain over an optional [`DateTime`].
///
/// `None` passes every rule except [`required`](Self::required).
pub struct OptionalTimeValidator<Tz: TimeZone = Utc> {
    chain: Validator<Option<DateTime<Tz>>>,
}

impl<Tz: Zone> OptionalTimeValidator<Tz> {
    /// An empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            chain: Validator::new(),
        }
    }

    /// Fails with [`ErrorKind::Empty`] on `None` or the zero instant.
    #[must_use = "builder methods must be chained or built"]
    pub fn required(mut self) -> Self {
        self.chain = self
            .chain
            .rule(|value: &Option<DateTime<Tz>>| match value {
                Some(value) => check_required(value),
                None => Err(ErrorKind::Empty.into()),
            });
        self
    }

    time_rules!();

    /// Appends a custom rule over the present value.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule<F>(mut self, check: F) -> Self
    where
        F: Fn(&DateTime<Tz>) -> Result<(), Violation> + Send + Sync + 'static,
    {
        self.chain = self.chain.rule(when_present(check));
        self
    }

    /// The underlying rule chain.
    #[must_use]
    pub fn into_validator(self) -> Validator<Option<DateTime<Tz>>> {
        self.chain
    }
}

impl<Tz: Zone> Default for OptionalTimeValidator<Tz> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tz: Zone> Validate for OptionalTimeValidator<Tz> {
    type Input = Option<DateTime<Tz>>;

    fn validate(&self, input: &Option<DateTime<Tz>>) -> Result<(), ValidationError> {
        self.chain.validate(input)
    }
}

impl<Tz: TimeZone> Clone for OptionalTimeValidator<Tz> {
    fn clone(&self) -> Self {
        Self {
            chain: self.chain.clone(),
        }
    }
}

impl<Tz: TimeZone> fmt::Debug for OptionalTimeValidator<Tz> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionalTimeValidator")
            .field("rules", &self.chain.len())
            .finish()
    }
}

// ============================================================================
// FACTORY FUNCTIONS
// ============================================================================

/// Starts a rule chain over `DateTime<Utc>`.
#[must_use]
pub fn time() -> TimeValidator {
    TimeValidator::new()
}

/// Starts a rule chain over `DateTime<Tz>`.
#[must_use]
pub fn time_in<Tz: Zone>() -> TimeValidator<Tz> {
    TimeValidator::new()
}

/// Starts a rule chain over `Option<DateTime<Utc>>`.
#[must_use]
pub fn optional_time() -> OptionalTimeValidator {
    OptionalTimeValidator::new()
}

/// Starts a rule chain over `Option<DateTime<Tz>>`.
#[must_use]
pub fn optional_time_in<Tz: Zone>() -> OptionalTimeValidator<Tz> {
    OptionalTimeValidator::new()
}

// ============================================================================
// TESTS
// ============================================================================
