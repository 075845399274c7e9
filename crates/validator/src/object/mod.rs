//! Record and dynamic-map validation
//!
//! A [`ValidatorMap`] binds field names to validators of possibly different
//! types. [`ObjectValidator`] applies one to a [`Record`] and checks every
//! binding against the record's declared shape once, at construction.
//! [`MapValidator`] applies one to a [`ValueMap`] and checks presence and
//! types on every call instead, since a map has no fixed shape.
//!
//! Both run every bound field and collect failures into a
//! [`FieldErrors`] aggregate instead of stopping at the first one.
//!
//! # Examples
//!
//! ```
//! use fieldwise_validator::prelude::*;
//!
//! fieldwise_validator::record! {
//!     pub struct Signup {
//!         pub email: String,
//!         pub age: u8,
//!     }
//! }
//!
//! let signup = object::<Signup>(
//!     ValidatorMap::new()
//!         .field("email", string().required())
//!         .field("age", number::<u8>().min(13)),
//! );
//!
//! let err = signup
//!     .validate(&Signup { email: String::new(), age: 9 })
//!     .unwrap_err();
//! let fields = err.field_errors().unwrap();
//! assert_eq!(fields.fields().collect::<Vec<_>>(), ["email", "age"]);
//! ```
//!
//! The target type must be a record; anything else is rejected at compile
//! time:
//!
//! ```compile_fail
//! use fieldwise_validator::prelude::*;
//!
//! let _ = object::<String>(ValidatorMap::new());
//! ```

pub mod map;

pub use map::{MapValidator, Value, ValueMap, map};

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::foundation::{
    AnyValidator, FieldError, FieldErrors, TypeTag, Validatable, Validate, ValidationError,
    Validator, Violation,
};

// ============================================================================
// RECORDS
// ============================================================================

/// A struct-like type whose fields can be looked up by name.
///
/// Usually implemented with the [`record!`](crate::record) macro.
pub trait Record: Validatable {
    /// The declared fields, in declaration order.
    fn shape() -> RecordShape;

    /// Borrows the field called `name`, or `None` if there is no such field.
    fn field(&self, name: &str) -> Option<&dyn Any>;
}

/// The declared name and fields of a [`Record`] type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordShape {
    name: &'static str,
    fields: Vec<FieldSpec>,
}

impl RecordShape {
    pub fn new(name: &'static str, fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        Self {
            name,
            fields: fields.into_iter().collect(),
        }
    }

    /// Name of the record type.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared fields, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Looks up a declared field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// One declared field: its name and type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    name: &'static str,
    ty: TypeTag,
}

impl FieldSpec {
    /// A field called `name` of type `T`.
    #[must_use]
    pub fn of<T: Any>(name: &'static str) -> Self {
        Self {
            name,
            ty: TypeTag::of::<T>(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn ty(&self) -> TypeTag {
        self.ty
    }
}

// ============================================================================
// VALIDATOR MAP
// ============================================================================

/// Field-name to validator bindings for a target of type `T`.
///
/// Each name maps to at most one validator; binding a name again replaces
/// the earlier validator. Validators may accept different types.
pub struct ValidatorMap<T> {
    entries: BTreeMap<String, Arc<dyn AnyValidator>>,
    _target: PhantomData<fn(&T)>,
}

impl<T> ValidatorMap<T> {
    /// No bindings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            _target: PhantomData,
        }
    }

    /// Binds `validator` to `name`.
    #[must_use = "builder methods must be chained or built"]
    pub fn field<V>(self, name: impl Into<String>, validator: V) -> Self
    where
        V: AnyValidator + 'static,
    {
        self.field_shared(name, Arc::new(validator))
    }

    /// Binds an already shared validator to `name`.
    #[must_use = "builder methods must be chained or built"]
    pub fn field_shared(mut self, name: impl Into<String>, validator: Arc<dyn AnyValidator>) -> Self {
        self.insert(name, validator);
        self
    }

    /// Binds `validator` to `name`, returning the validator it replaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        validator: Arc<dyn AnyValidator>,
    ) -> Option<Arc<dyn AnyValidator>> {
        self.entries.insert(name.into(), validator)
    }

    /// The validator bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn AnyValidator>> {
        self.entries.get(name)
    }

    /// Bound names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_entries(self) -> BTreeMap<String, Arc<dyn AnyValidator>> {
        self.entries
    }
}

impl<T> Default for ValidatorMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ValidatorMap<T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            _target: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ValidatorMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(name, v)| (name, v.accepts())))
            .finish()
    }
}

// ============================================================================
// SETUP ERRORS
// ============================================================================

/// A [`ValidatorMap`] that does not fit its record.
///
/// These are programming errors: they depend only on types and names, never
/// on the values being validated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SetupError {
    /// A binding names a field the record does not declare.
    #[error("{field} does not exist in {record}")]
    UnknownField {
        record: &'static str,
        field: String,
    },

    /// A binding's validator accepts a different type than the field holds.
    #[error("record field `{field}` type is {expected}, but field validator type is {actual}")]
    TypeMismatch {
        record: &'static str,
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
}

// ============================================================================
// OBJECT VALIDATOR
// ============================================================================

struct Binding {
    field: &'static str,
    validator: Arc<dyn AnyValidator>,
}

/// Validates a [`Record`] field by field.
///
/// Built from a [`ValidatorMap`] whose every binding names a declared field
/// of matching type. Validation runs each bound field's validator in the
/// record's declaration order and reports every failing field at once.
/// Fields without a binding are not checked. An empty map accepts every
/// record.
///
/// Record-level rules added with [`rule`](Self::rule) run after the field
/// pass, and only if it succeeded.
pub struct ObjectValidator<T> {
    chain: Validator<T>,
    shape: RecordShape,
}

impl<T: Record> ObjectValidator<T> {
    /// Checks `map` against `T`'s shape.
    ///
    /// Bindings are checked in sorted name order and the first problem is
    /// returned.
    pub fn try_new(map: ValidatorMap<T>) -> Result<Self, SetupError> {
        let shape = T::shape();
        let mut entries = map.into_entries();

        for (name, validator) in &entries {
            let Some(spec) = shape.field(name) else {
                tracing::debug!(record = shape.name(), field = %name, "binding names an undeclared field");
                return Err(SetupError::UnknownField {
                    record: shape.name(),
                    field: name.clone(),
                });
            };

            let accepts = validator.accepts();
            if spec.ty() != accepts {
                tracing::debug!(
                    record = shape.name(),
                    field = %name,
                    expected = spec.ty().name(),
                    actual = accepts.name(),
                    "binding validator type does not match field type"
                );
                return Err(SetupError::TypeMismatch {
                    record: shape.name(),
                    field: name.clone(),
                    expected: spec.ty().name(),
                    actual: accepts.name(),
                });
            }
        }

        let bindings: Vec<Binding> = shape
            .fields()
            .iter()
            .filter_map(|spec| {
                entries.remove(spec.name()).map(|validator| Binding {
                    field: spec.name(),
                    validator,
                })
            })
            .collect();

        tracing::trace!(
            record = shape.name(),
            bound = bindings.len(),
            declared = shape.fields().len(),
            "object validator ready"
        );

        Ok(Self {
            chain: Validator::from_fn(move |record: &T| validate_fields(&bindings, record)),
            shape,
        })
    }

    /// Like [`try_new`](Self::try_new), but panics on a setup error.
    pub fn new(map: ValidatorMap<T>) -> Self {
        match Self::try_new(map) {
            Ok(validator) => validator,
            Err(err) => panic!("invalid object validator: {err}"),
        }
    }

    /// Appends a record-level rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule<F>(mut self, check: F) -> Self
    where
        F: Fn(&T) -> Result<(), Violation> + Send + Sync + 'static,
    {
        self.chain = self.chain.rule(check);
        self
    }

    /// The shape this validator was checked against.
    #[must_use]
    pub fn shape(&self) -> &RecordShape {
        &self.shape
    }
}

fn validate_fields<T: Record>(bindings: &[Binding], record: &T) -> Result<(), Violation> {
    let failures = bindings.iter().filter_map(|binding| {
        let Some(value) = record.field(binding.field) else {
            panic!(
                "{} declares field `{}` but does not expose it",
                std::any::type_name::<T>(),
                binding.field
            );
        };

        let error = binding.validator.validate_any(value).err()?;
        tracing::trace!(field = binding.field, code = error.code(), "field failed validation");
        Some(FieldError::new(binding.field, error))
    });

    FieldErrors::collect(failures).map_err(Violation::Fields)
}

impl<T: Record> Validate for ObjectValidator<T> {
    type Input = T;

    fn validate(&self, input: &T) -> Result<(), ValidationError> {
        self.chain.validate(input)
    }
}

impl<T> Clone for ObjectValidator<T> {
    fn clone(&self) -> Self {
        Self {
            chain: self.chain.clone(),
            shape: self.shape.clone(),
        }
    }
}

impl<T> fmt::Debug for ObjectValidator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectValidator")
            .field("record", &self.shape.name())
            .field("rules", &self.chain.len())
            .finish()
    }
}

// ============================================================================
// FACTORY FUNCTIONS
// ============================================================================

/// Builds an [`ObjectValidator`], panicking if `map` does not fit `T`.
pub fn object<T: Record>(map: ValidatorMap<T>) -> ObjectValidator<T> {
    ObjectValidator::new(map)
}

/// Builds an [`ObjectValidator`], returning a [`SetupError`] if `map` does
/// not fit `T`.
pub fn try_object<T: Record>(map: ValidatorMap<T>) -> Result<ObjectValidator<T>, SetupError> {
    ObjectValidator::try_new(map)
}

// ============================================================================
// TESTS
// ============================================================================
