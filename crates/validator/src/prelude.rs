//! Prelude module for convenient imports.
//!
//! Provides a single `use fieldwise_validator::prelude::*;` import that brings
//! in all commonly needed traits, types, validator families and factories.
//!
//! # Examples
//!
//! ```
//! use fieldwise_validator::prelude::*;
//!
//! let username = string().required().min(3).max(20);
//! let age = number::<u8>().min(18);
//! assert!(username.validate(&"alice".to_owned()).is_ok());
//! assert!(age.validate(&17).is_err());
//! ```

// ============================================================================
// FOUNDATION: Core traits, errors, rule chains
// ============================================================================

pub use crate::foundation::{
    AnyValidator, ErrorKind, FieldError, FieldErrors, Input, Rule, TypeTag, Validatable, Validate,
    ValidationError, ValidationResult, Validator, Violation, rule,
};

// ============================================================================
// VALIDATORS: Built-in families
// ============================================================================

pub use crate::validators::{
    Number, NumberValidator, OptionalNumberValidator, OptionalStringValidator,
    OptionalTimeValidator, StringValidator, Text, TimeValidator, Zone, number, optional_number,
    optional_string, optional_text, optional_time, optional_time_in, string, text, time, time_in,
};

// ============================================================================
// OBJECTS: Records and dynamic maps
// ============================================================================

pub use crate::object::{
    FieldSpec, MapValidator, ObjectValidator, Record, RecordShape, SetupError, ValidatorMap,
    Value, ValueMap, map, object, try_object,
};
