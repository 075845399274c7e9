//! Core validation types and traits
//!
//! This module contains the fundamental building blocks of the validation
//! system:
//!
//! - **Traits**: [`Validate`], [`AnyValidator`], [`Validatable`]
//! - **Rule chains**: [`Validator`], [`Rule`]
//! - **Errors**: [`ErrorKind`], [`Violation`], [`ValidationError`],
//!   [`FieldErrors`]
//!
//! # Architecture
//!
//! ## 1. Type Safety
//!
//! Every validator is generic over its input. A chain built for `String`
//! cannot be run against an `i64`:
//!
//! ```
//! use fieldwise_validator::prelude::*;
//!
//! let name = string().required().max(20);
//! assert!(name.validate(&"ferris".to_owned()).is_ok());
//! ```
//!
//! ## 2. Type Erasure at the Edges
//!
//! Record and map validators hold validators for many field types at once.
//! They store them as [`AnyValidator`] trait objects and compare
//! [`TypeTag`]s before dispatching, so a mismatch is reported instead of
//! silently skipped.
//!
//! ## 3. Rich Error Information
//!
//! A failure keeps its [`ErrorKind`] for programmatic matching and a clone of
//! the rejected input for diagnostics:
//!
//! ```
//! use fieldwise_validator::prelude::*;
//!
//! let err = number::<u8>().max(10).validate(&42).unwrap_err();
//! assert!(err.is(ErrorKind::TooBig));
//! assert_eq!(err.input_as::<u8>(), Some(&42));
//! ```

pub mod chain;
pub mod error;
pub mod traits;

pub use chain::{Rule, Validator, rule};
pub use error::{ErrorKind, FieldError, FieldErrors, Input, ValidationError, Violation};
pub use traits::{AnyValidator, TypeTag, Validatable, Validate};

// ============================================================================
// TYPE ALIASES
// ============================================================================

/// A validation result using the standard [`ValidationError`].
pub type ValidationResult<T = ()> = Result<T, ValidationError>;
