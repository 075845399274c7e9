//! Core traits for the validation system
//!
//! [`Validate`] is the statically typed contract every validator implements.
//! [`AnyValidator`] is its type-erased counterpart, used wherever validators
//! for different field types live side by side in one collection.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::foundation::{ErrorKind, ValidationError};

// ============================================================================
// CORE VALIDATOR TRAIT
// ============================================================================

/// The core trait that all validators must implement.
///
/// Generic over the input type, so a string validator cannot be applied to a
/// number at compile time. Validation either succeeds or returns the first
/// failure as a [`ValidationError`].
///
/// # Examples
///
/// ```
/// use fieldwise_validator::prelude::*;
///
/// struct Even;
///
/// impl Validate for Even {
///     type Input = u32;
///
///     fn validate(&self, input: &u32) -> Result<(), ValidationError> {
///         if input % 2 == 0 {
///             Ok(())
///         } else {
///             Err(ValidationError::new(ErrorKind::MismatchPattern, input))
///         }
///     }
/// }
///
/// assert!(Even.validate(&4).is_ok());
/// assert!(Even.validate(&3).is_err());
/// ```
pub trait Validate {
    /// The type of input being validated.
    type Input: ?Sized;

    /// Validates the input value.
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;
}

impl<V: Validate + ?Sized> Validate for &V {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        (**self).validate(input)
    }
}

impl<V: Validate + ?Sized> Validate for Box<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        (**self).validate(input)
    }
}

impl<V: Validate + ?Sized> Validate for Arc<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        (**self).validate(input)
    }
}

// ============================================================================
// VALIDATABLE VALUES
// ============================================================================

/// Values a rule chain can validate.
///
/// Failures keep a clone of the offending value for diagnostics, and
/// validators are shared across threads, hence the bounds. Implemented
/// automatically for every qualifying type.
pub trait Validatable: Any + Clone + fmt::Debug + Send + Sync {}

impl<T> Validatable for T where T: Any + Clone + fmt::Debug + Send + Sync {}

// ============================================================================
// TYPE TAGS
// ============================================================================

/// Runtime identity of a type, with its name for error messages.
///
/// Two tags are equal when they describe the same type.
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// The tag of `T`.
    #[must_use]
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Returns true if this tag describes `T`.
    #[must_use]
    pub fn is<T: Any + ?Sized>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, as reported by [`std::any::type_name`].
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// ============================================================================
// TYPE-ERASED VALIDATORS
// ============================================================================

/// A validator whose input type is only known at runtime.
///
/// Implemented for every sized-input [`Validate`] type that is safe to share
/// across threads, so any validator can be bound to a record field or map
/// key. [`accepts`](AnyValidator::accepts) is what setup-time and map-time
/// type checks compare against.
pub trait AnyValidator: Send + Sync {
    /// The input type this validator accepts.
    fn accepts(&self) -> TypeTag;

    /// Validates a type-erased value.
    ///
    /// A value of the wrong type fails with [`ErrorKind::InvalidType`].
    fn validate_any(&self, value: &dyn Any) -> Result<(), ValidationError>;
}

impl<V> AnyValidator for V
where
    V: Validate + Send + Sync,
    V::Input: Sized + Any,
{
    fn accepts(&self) -> TypeTag {
        TypeTag::of::<V::Input>()
    }

    fn validate_any(&self, value: &dyn Any) -> Result<(), ValidationError> {
        match value.downcast_ref::<V::Input>() {
            Some(input) => self.validate(input),
            None => Err(ValidationError::without_input(ErrorKind::InvalidType)),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Positive;

    impl Validate for Positive {
        type Input = i64;

        fn validate(&self, input: &i64) -> Result<(), ValidationError> {
            if *input > 0 {
                Ok(())
            } else {
                Err(ValidationError::new(ErrorKind::TooSmall, input))
            }
        }
    }

    #[test]
    fn smart_pointers_delegate() {
        let boxed: Box<dyn Validate<Input = i64>> = Box::new(Positive);
        assert!(boxed.validate(&1).is_ok());
        assert!(Arc::new(Positive).validate(&0).is_err());
        assert!((&Positive).validate(&3).is_ok());
    }

    #[test]
    fn type_tags_compare_by_type() {
        assert_eq!(TypeTag::of::<String>(), TypeTag::of::<String>());
        assert_ne!(TypeTag::of::<String>(), TypeTag::of::<&'static str>());
        assert!(TypeTag::of::<i64>().is::<i64>());
        assert_eq!(TypeTag::of::<u8>().name(), "u8");
    }

    #[test]
    fn erased_validator_accepts_its_input_type() {
        let erased: &dyn AnyValidator = &Positive;
        assert_eq!(erased.accepts(), TypeTag::of::<i64>());
        assert!(erased.validate_any(&5_i64).is_ok());
        assert!(
            erased
                .validate_any(&-5_i64)
                .is_err_and(|e| e.is(ErrorKind::TooSmall))
        );
    }

    #[test]
    fn erased_validator_rejects_foreign_type() {
        let erased: &dyn AnyValidator = &Positive;
        let err = erased.validate_any(&"5").unwrap_err();
        assert!(err.is(ErrorKind::InvalidType));
    }
}
