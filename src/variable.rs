//! Definition of the variable module
//!
//! A variable is anything that identifies an axis of a `Factor`: a name, an integer id, an
//! interned symbol. The library only needs to compare, hash, clone and print them.

use crate::error::{FactorError, Reason, Result};

use indexmap::IndexMap;
use itertools::Itertools;

use std::fmt::Debug;
use std::hash::Hash;


/// Bound satisfied by every type usable as a random variable identifier.
pub trait Variable: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Variable for T {}


/// An `Assignment` of value indices to `Variable`s. Insertion order is kept, so iterating an
/// `Assignment` is deterministic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment<V: Variable> {
    values: IndexMap<V, usize>,
}

impl<V: Variable> Assignment<V> {

    /// Create an empty `Assignment`
    pub fn new() -> Self {
        Assignment { values: IndexMap::new() }
    }

    /// Assign `value` to `var`, replacing any previous value
    pub fn set(&mut self, var: &V, value: usize) {
        self.values.insert(var.clone(), value);
    }

    /// Builder-style `set`
    pub fn with(mut self, var: &V, value: usize) -> Self {
        self.set(var, value);
        self
    }

    /// Retrieve the value assigned to `var`, if any
    pub fn get(&self, var: &V) -> Option<&usize> {
        self.values.get(var)
    }

    pub fn contains(&self, var: &V) -> bool {
        self.values.contains_key(var)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(Variable, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&V, &usize)> {
        self.values.iter()
    }

}

impl<V: Variable> Default for Assignment<V> {
    fn default() -> Self {
        Assignment::new()
    }
}

impl<V: Variable> FromIterator<(V, usize)> for Assignment<V> {
    fn from_iter<I: IntoIterator<Item = (V, usize)>>(iter: I) -> Self {
        Assignment { values: iter.into_iter().collect() }
    }
}


/// Verify that no `Variable` appears in `scope` more than once.
///
/// # Errors
/// * `Reason::DuplicateVariable`, naming the repeated `Variable`s
pub fn check_unique<V: Variable>(scope: &[V]) -> Result<()> {
    let dups: Vec<&V> = scope.iter().duplicates().collect();
    if dups.is_empty() {
        Ok(())
    } else {
        Err(FactorError::invalid(
            Reason::DuplicateVariable,
            format!("{:?} repeated in scope {:?}", dups, scope)
        ))
    }
}


/// Find the axis of `var` within `scope`.
///
/// # Errors
/// * `Reason::UnknownVariable` if `var` is not in `scope`
pub fn axis_of<V: Variable>(scope: &[V], var: &V) -> Result<usize> {
    scope.iter().position(|v| v == var).ok_or_else(|| {
        FactorError::invalid(
            Reason::UnknownVariable,
            format!("{:?} is not in scope {:?}", var, scope)
        )
    })
}
