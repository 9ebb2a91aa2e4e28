//! Discrete factors and the algebra over them.
//!
//! A `Factor` maps every joint assignment of its scope to a non-negative value. The operations in
//! this crate (product, marginalization, reduction, division and the joint distribution of many
//! factors) are the building blocks of exact inference such as variable elimination. Each one is
//! a pure function: it validates its arguments and returns a new `Factor`, or a `FactorError`
//! carrying the `Reason` the arguments were rejected.

pub mod error;
pub mod factor;
pub mod init;
pub mod table;
pub mod variable;

pub use crate::error::{FactorError, Reason, Result};
pub use crate::factor::{joint, Alignment, Factor};
pub use crate::init::Initialization;
pub use crate::table::Table;
pub use crate::variable::{Assignment, Variable};
