//! Ordered rule chains
//!
//! A [`Validator`] is a list of rules over one value type. Rules run in
//! insertion order and the first failure stops the chain.

use std::fmt;
use std::sync::Arc;

use crate::foundation::{Validatable, Validate, ValidationError, Violation};

/// A single check over `T`.
///
/// Returning `Err` rejects the value. Rules are shared behind an [`Arc`] so
/// chains stay cheap to clone and can be validated from many threads.
pub type Rule<T> = Arc<dyn Fn(&T) -> Result<(), Violation> + Send + Sync>;

/// Wraps a closure as a [`Rule`].
pub fn rule<T, F>(check: F) -> Rule<T>
where
    F: Fn(&T) -> Result<(), Violation> + Send + Sync + 'static,
{
    Arc::new(check)
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// An ordered, short-circuiting chain of rules over `T`.
///
/// Builder methods take the chain by value, so a chain that has been handed
/// to a record or map validator can no longer change.
///
/// # Examples
///
/// ```
/// use fieldwise_validator::prelude::*;
///
/// let even = Validator::<u32>::new().rule(|n| {
///     if n % 2 == 0 {
///         Ok(())
///     } else {
///         Err(Violation::message("odd"))
///     }
/// });
///
/// assert!(even.validate(&2).is_ok());
/// assert_eq!(even.validate(&3).unwrap_err().to_string(), "odd");
/// ```
pub struct Validator<T> {
    rules: Vec<Rule<T>>,
}

impl<T> Validator<T> {
    /// An empty chain; accepts every value.
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// A chain with the given rules, in order.
    pub fn from_rules(rules: impl IntoIterator<Item = Rule<T>>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// A chain with a single closure rule.
    pub fn from_fn<F>(check: F) -> Self
    where
        F: Fn(&T) -> Result<(), Violation> + Send + Sync + 'static,
    {
        Self {
            rules: vec![rule(check)],
        }
    }

    /// Appends a rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn append(mut self, rule: Rule<T>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Appends rules, in order.
    #[must_use = "builder methods must be chained or built"]
    pub fn append_all(mut self, rules: impl IntoIterator<Item = Rule<T>>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Appends a closure rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule<F>(self, check: F) -> Self
    where
        F: Fn(&T) -> Result<(), Violation> + Send + Sync + 'static,
    {
        self.append(rule(check))
    }

    /// Number of rules in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rules, in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[Rule<T>] {
        &self.rules
    }
}

impl<T: Validatable> Validate for Validator<T> {
    type Input = T;

    fn validate(&self, input: &T) -> Result<(), ValidationError> {
        for rule in &self.rules {
            if let Err(violation) = rule(input) {
                return Err(ValidationError::new(violation, input));
            }
        }
        Ok(())
    }
}

impl<T> Default for Validator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Validator<T> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
        }
    }
}

impl<T> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("rules", &self.rules.len())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
