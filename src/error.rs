//! Defines the `FactorError` type for the factorial library
//!
//! Every failure in the library is an invalid argument supplied by the caller. The `Reason`
//! carried by the error tells the caller which check rejected the input, so it can branch on the
//! failure without matching on message text.

use std::fmt;
use std::result;

use thiserror::Error;

pub type Result<T> = result::Result<T, FactorError>;


/// The check that rejected an argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reason {

    /// The table does not agree with the scope it was built for (rank mismatch, or an axis of
    /// length zero)
    MalformedFactor,

    /// A variable was present multiple times in a scope
    DuplicateVariable,

    /// An operand was an empty `Factor` (one without a table)
    EmptyFactor,

    /// The operands of a product share no variables
    UnalignableFactors,

    /// A variable has a different cardinality in each operand
    IncompatibleShapes,

    /// A variable was requested that is not in the scope of the `Factor`
    UnknownVariable,

    /// A value index is not smaller than the cardinality of its variable
    ValueOutOfRange,

    /// A sequence of `Factor`s was required, but none were given
    EmptyInput,

    /// Represents an incomplete assignment where a complete assignment was required
    IncompleteAssignment,

    /// Exactly what it sounds like
    DivisionByZero,

    /// Normalization of a `Factor` whose entries sum to zero
    ZeroPartition,
}

impl Reason {

    fn description(&self) -> &'static str {
        match *self {
            Reason::MalformedFactor => "data is incorrect",
            Reason::DuplicateVariable => "a variable was encountered twice",
            Reason::EmptyFactor => "one of the factors is empty",
            Reason::UnalignableFactors => "no common variables",
            Reason::IncompatibleShapes => "common variables have different cardinality",
            Reason::UnknownVariable => "variables not in factor",
            Reason::ValueOutOfRange => "value out of range",
            Reason::EmptyInput => "empty sequence",
            Reason::IncompleteAssignment => "missing assignments to the required variables",
            Reason::DivisionByZero => "encountered division by zero",
            Reason::ZeroPartition => "factor entries sum to zero",
        }
    }

}

impl fmt::Display for Reason {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.description())
    }

}


#[derive(Clone, Debug, PartialEq, Error)]
pub enum FactorError {

    /// An argument failed validation. `detail` names the offending variables or values.
    #[error("invalid argument: {reason} ({detail})")]
    InvalidArgument { reason: Reason, detail: String },

}

impl FactorError {

    pub(crate) fn invalid<S: Into<String>>(reason: Reason, detail: S) -> Self {
        let detail = detail.into();
        log::debug!("rejecting argument: {}: {}", reason, detail);
        FactorError::InvalidArgument { reason, detail }
    }

    /// The check that produced this error
    pub fn reason(&self) -> Reason {
        match *self {
            FactorError::InvalidArgument { reason, .. } => reason,
        }
    }

}
