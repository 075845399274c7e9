//! # fieldwise-validator
//!
//! Composable, type-safe value validation with per-field error reports.
//!
//! ## Quick Start
//!
//! ```
//! use fieldwise_validator::prelude::*;
//!
//! let username = string().required().min(3).max(20);
//! assert!(username.validate(&"alice".to_owned()).is_ok());
//!
//! let err = username.validate(&"al".to_owned()).unwrap_err();
//! assert!(err.is(ErrorKind::TooSmall));
//! ```
//!
//! ## Building Blocks
//!
//! - A [`Validator`](foundation::Validator) is an ordered rule chain over one
//!   type. The first failing rule stops it.
//! - The [`validators`] families ([`string`](validators::string),
//!   [`number`](validators::number), [`time`](validators::time) and their
//!   `optional_*` twins) are typed builders over such chains.
//! - An [`ObjectValidator`](object::ObjectValidator) binds validators to the
//!   fields of a [`Record`](object::Record), declared with [`record!`].
//!   Bindings are checked against the record's shape once, up front.
//! - A [`MapValidator`](object::MapValidator) does the same for a
//!   string-keyed [`ValueMap`](object::ValueMap), checking presence and types
//!   on every call.
//!
//! Record and map validators report every failing field at once as
//! [`FieldErrors`](foundation::FieldErrors).
//!
//! ## Records
//!
//! ```
//! use fieldwise_validator::prelude::*;
//! use fieldwise_validator::record;
//!
//! record! {
//!     pub struct User {
//!         pub id: String,
//!         pub name: String,
//!     }
//! }
//!
//! let user = object::<User>(
//!     ValidatorMap::new()
//!         .field("id", string().required())
//!         .field("name", string().max(10)),
//! );
//!
//! let err = user
//!     .validate(&User { id: String::new(), name: "a very long name".into() })
//!     .unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "id field: input value is required\nname field: input value is too big"
//! );
//! ```
//!
//! ## Features
//!
//! - `serde`: JSON decoding into [`ValueMap`](object::ValueMap), JSON error
//!   reports and `ErrorKind` serialization (see `json`).
//!
//! ## Logging
//!
//! Diagnostics go through [`tracing`]: rejected setups and structural map
//! failures at `debug`, per-field failures at `trace`. Nothing is emitted
//! unless a subscriber is installed.

// Errors carry an input snapshot; boxing them would add an allocation to every
// failing rule.
#![allow(clippy::result_large_err)]
#![allow(clippy::type_complexity)]

pub mod foundation;
#[cfg(feature = "serde")]
pub mod json;
mod macros;
pub mod object;
pub mod prelude;
pub mod validators;
