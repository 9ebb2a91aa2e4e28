//! Definition of the factor module
//!
//! A `Factor` represents a relationship between some set of `Variable`s: a function from each
//! joint assignment of its scope to a non-negative real value, stored as a dense `Table` whose
//! axis `i` belongs to the `i`th variable of the scope.

use crate::error::{FactorError, Reason, Result};
use crate::table::Table;
use crate::variable::{self, Assignment, Variable};

use ndarray::IxDyn;

mod align;
mod ops;

pub use self::align::Alignment;
pub use self::ops::joint;


#[derive(Clone, Debug, PartialEq)]
pub enum Factor<V: Variable> {
    /// A `Factor` over some scope whose table has not been provided. Every operation rejects it.
    Empty {
        /// The scope of the `Factor`
        variables: Vec<V>,
    },

    /// A `Factor` over some scope of variables. Represented as a table as described in Koller &
    /// Friedman.
    TableFactor {
        /// The scope of the `Factor`. Axis `i` of `table` corresponds to `variables[i]`.
        variables: Vec<V>,

        /// The values of the `Factor` table.
        table: Table,
    }
}


impl<V: Variable> Factor<V> {

    /// Create a `Factor` over `variables` with no table
    pub fn empty(variables: Vec<V>) -> Self {
        Factor::Empty { variables }
    }


    /// Create a new `Factor`
    ///
    /// # Args
    /// * `variables`: the scope of the `Factor`, in axis order
    /// * `table`: the values, one axis per variable, each axis as long as that variable's
    ///   cardinality. A scope with no variables takes a 0-dimensional table.
    ///
    /// # Errors
    /// * `Reason::MalformedFactor` if the number of variables is not the number of table
    ///   dimensions, or if some axis has length zero
    /// * `Reason::DuplicateVariable` if a variable appears twice in `variables`
    pub fn new(variables: Vec<V>, table: Table) -> Result<Self> {
        if variables.len() != table.ndim() {
            return Err(FactorError::invalid(
                Reason::MalformedFactor,
                format!("{} variables for a table of rank {}", variables.len(), table.ndim())
            ));
        }

        if table.shape().contains(&0) {
            return Err(FactorError::invalid(
                Reason::MalformedFactor,
                format!("table of shape {:?} has an axis of length zero", table.shape())
            ));
        }

        variable::check_unique(&variables)?;

        Ok(Factor::TableFactor { variables, table })
    }


    /// Check if the `Factor` has no table
    pub fn is_none(&self) -> bool {
        match self {
            Factor::Empty { .. } => true,
            Factor::TableFactor { .. } => false,
        }
    }


    /// Retrieve the scope of the `Factor`, in axis order
    pub fn variables(&self) -> &[V] {
        match self {
            Factor::Empty { variables } => variables,
            Factor::TableFactor { variables, .. } => variables,
        }
    }


    /// Retrieve the table of the `Factor`, if it has one
    pub fn distribution(&self) -> Option<&Table> {
        match self {
            Factor::Empty { .. } => None,
            Factor::TableFactor { table, .. } => Some(table),
        }
    }


    /// Retrieve the cardinality of each variable in the scope, if the `Factor` has a table
    pub fn shape(&self) -> Option<&[usize]> {
        self.distribution().map(|t| t.shape())
    }


    /// The axis of `var`, if it is in the scope of the `Factor`
    pub fn axis_of(&self, var: &V) -> Option<usize> {
        self.variables().iter().position(|v| v == var)
    }


    /// The number of values `var` takes, if it is in the scope of a non-empty `Factor`
    pub fn cardinality(&self, var: &V) -> Option<usize> {
        let axis = self.axis_of(var)?;
        self.shape().map(|s| s[axis])
    }


    /// Borrow the scope and table, rejecting an empty `Factor`
    pub(crate) fn parts(&self) -> Result<(&[V], &Table)> {
        match self {
            Factor::Empty { variables } => Err(FactorError::invalid(
                Reason::EmptyFactor,
                format!("factor over {:?} has no table", variables)
            )),
            Factor::TableFactor { variables, table } => Ok((variables, table)),
        }
    }


    /// Retrieve the value for a complete assignment over the scope of this `Factor`
    ///
    /// # Args
    /// * `assignment`: a full assignment to the scope of the `Factor`. The assignment's scope may
    ///   be a superset of the `Factor`'s scope.
    ///
    /// # Errors
    /// * `Reason::EmptyFactor` if the `Factor` has no table
    /// * `Reason::IncompleteAssignment` if some variable of the scope is unassigned
    /// * `Reason::ValueOutOfRange` if an assigned value is not below its variable's cardinality
    pub fn value(&self, assignment: &Assignment<V>) -> Result<f64> {
        let (variables, table) = self.parts()?;

        let missing: Vec<&V> = variables.iter().filter(|v| !assignment.contains(v)).collect();
        if !missing.is_empty() {
            return Err(FactorError::invalid(
                Reason::IncompleteAssignment,
                format!("no value for {:?}", missing)
            ));
        }

        let mut idx = Vec::with_capacity(variables.len());
        for (v, &card) in variables.iter().zip(table.shape()) {
            let val = assignment.get(v).copied().unwrap_or_default();
            if val >= card {
                return Err(FactorError::invalid(
                    Reason::ValueOutOfRange,
                    format!("index {} for {:?} of cardinality {}", val, v, card)
                ));
            }
            idx.push(val);
        }

        Ok(table[IxDyn(&idx)])
    }


    /// The sum of every entry in the table
    ///
    /// # Errors
    /// * `Reason::EmptyFactor` if the `Factor` has no table
    pub fn total(&self) -> Result<f64> {
        let (_, table) = self.parts()?;
        Ok(table.sum())
    }

}
