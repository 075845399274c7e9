//! Built-in validator families
//!
//! Each family is a typed builder over a [`Validator`](crate::foundation::Validator)
//! chain. Builder methods append rules in call order and the chain stops at
//! the first failure.
//!
//! # Families
//!
//! - **String**: required, rune-length bounds, equality, regex, allowed set
//! - **Number**: bounds, equality, allowed set, for every primitive number
//! - **Time**: lazily evaluated instant and calendar-date comparisons
//!
//! Every family has an `Optional*` twin over `Option<T>`. On the twin, every
//! rule except `required` passes when the value is `None`.
//!
//! # Examples
//!
//! ```
//! use fieldwise_validator::prelude::*;
//!
//! let username = string().required().min(3).max(20);
//! let age = number::<u8>().min(18);
//! let nickname = optional_string().max(12);
//!
//! assert!(username.validate(&"ferris".to_owned()).is_ok());
//! assert!(age.validate(&16).is_err());
//! assert!(nickname.validate(&None).is_ok());
//! ```

pub mod number;
pub mod string;
pub mod time;

pub use number::{Number, NumberValidator, OptionalNumberValidator, number, optional_number};
pub use string::{
    OptionalStringValidator, StringValidator, Text, optional_string, optional_text, string, text,
};
pub use time::{
    OptionalTimeValidator, TimeValidator, Zone, optional_time, optional_time_in, time, time_in,
};

use crate::foundation::Violation;

/// Lifts a rule over `T` into a rule over `Option<T>` that accepts `None`.
pub(crate) fn when_present<T, F>(check: F) -> impl Fn(&Option<T>) -> Result<(), Violation>
where
    F: Fn(&T) -> Result<(), Violation>,
{
    move |value: &Option<T>| value.as_ref().map_or(Ok(()), &check)
}
