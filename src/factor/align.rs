//! Alignment of two `Factor`s by variable identity.
//!
//! Two factors are aligned by splitting their scopes into the variables only the left operand
//! has, the shared variables and the variables only the right operand has. The left table is then
//! read as `[x_only][shared]` and the right one as `[shared][y_only]`, so that after padding with
//! singleton axes both line up with the output layout `[x_only][shared][y_only]`.

use super::Factor;
use crate::error::{FactorError, Reason, Result};
use crate::variable::{self, Variable};

use std::collections::HashSet;


/// The layout of the product of two `Factor`s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alignment<V: Variable> {
    x_only: Vec<V>,
    shared: Vec<V>,
    y_only: Vec<V>,

    /// axes of the left table in `[x_only][shared]` order
    x_perm: Vec<usize>,

    /// axes of the right table in `[shared][y_only]` order
    y_perm: Vec<usize>,

    /// cardinalities of the output variables
    shape: Vec<usize>,
}


impl<V: Variable> Alignment<V> {

    /// Align `x` with `y`.
    ///
    /// Shared variables are ordered by their position in `x`. Variables exclusive to one operand
    /// keep their order within that operand.
    ///
    /// # Errors
    /// * `Reason::EmptyFactor` if either operand has no table
    /// * `Reason::UnalignableFactors` if the operands share no variable
    /// * `Reason::IncompatibleShapes` if a shared variable has a different cardinality in each
    ///   operand
    pub fn new(x: &Factor<V>, y: &Factor<V>) -> Result<Self> {
        let (vx, vy) = (x.variables(), y.variables());

        let in_x: HashSet<&V> = vx.iter().collect();
        let in_y: HashSet<&V> = vy.iter().collect();

        let shared: Vec<V> = vx.iter().filter(|v| in_y.contains(v)).cloned().collect();
        let x_only: Vec<V> = vx.iter().filter(|v| !in_y.contains(v)).cloned().collect();
        let y_only: Vec<V> = vy.iter().filter(|v| !in_x.contains(v)).cloned().collect();

        let (_, tx) = x.parts()?;
        let (_, ty) = y.parts()?;

        if shared.is_empty() {
            return Err(FactorError::invalid(
                Reason::UnalignableFactors,
                format!("{:?} and {:?} have no common variables", vx, vy)
            ));
        }

        let x_perm = x_only.iter()
                           .chain(shared.iter())
                           .map(|v| variable::axis_of(vx, v))
                           .collect::<Result<Vec<usize>>>()?;
        let y_perm = shared.iter()
                           .chain(y_only.iter())
                           .map(|v| variable::axis_of(vy, v))
                           .collect::<Result<Vec<usize>>>()?;

        // x_perm ends with the shared axes of x, y_perm starts with the shared axes of y
        let x_shared = &x_perm[x_only.len()..];
        let y_shared = &y_perm[..shared.len()];
        for ((v, &ix), &iy) in shared.iter().zip(x_shared).zip(y_shared) {
            let (cx, cy) = (tx.shape()[ix], ty.shape()[iy]);
            if cx != cy {
                return Err(FactorError::invalid(
                    Reason::IncompatibleShapes,
                    format!("{:?} has cardinality {} and {}", v, cx, cy)
                ));
            }
        }

        let shape: Vec<usize> = x_perm.iter()
                                      .map(|&i| tx.shape()[i])
                                      .chain(y_perm[shared.len()..].iter().map(|&i| ty.shape()[i]))
                                      .collect();

        log::trace!("aligned {:?} with {:?}: shared {:?}", vx, vy, shared);

        Ok(Alignment { x_only, shared, y_only, x_perm, y_perm, shape })
    }


    /// Variables only in the left operand, in its order
    pub fn x_only(&self) -> &[V] {
        &self.x_only
    }

    /// Variables in both operands, in the left operand's order
    pub fn shared(&self) -> &[V] {
        &self.shared
    }

    /// Variables only in the right operand, in its order
    pub fn y_only(&self) -> &[V] {
        &self.y_only
    }

    /// Axis permutation taking the left table to `[x_only][shared]`
    pub fn x_permutation(&self) -> &[usize] {
        &self.x_perm
    }

    /// Axis permutation taking the right table to `[shared][y_only]`
    pub fn y_permutation(&self) -> &[usize] {
        &self.y_perm
    }

    /// Cardinalities of the output scope
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// The output scope, `x_only ++ shared ++ y_only`
    pub fn variables(&self) -> Vec<V> {
        self.x_only.iter()
                   .chain(self.shared.iter())
                   .chain(self.y_only.iter())
                   .cloned()
                   .collect()
    }

}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;

    fn ones(vars: &[&'static str], shape: &[usize]) -> Factor<&'static str> {
        Factor::new(vars.to_vec(), Table::ones(shape.to_vec())).expect("Unexpected error")
    }

    #[test]
    fn simple_chain() {
        let x = ones(&["a", "b"], &[3, 2]);
        let y = ones(&["b", "c"], &[2, 4]);

        let al = Alignment::new(&x, &y).unwrap();
        assert_eq!(&["a"], al.x_only());
        assert_eq!(&["b"], al.shared());
        assert_eq!(&["c"], al.y_only());
        assert_eq!(&[0, 1], al.x_permutation());
        assert_eq!(&[0, 1], al.y_permutation());
        assert_eq!(vec!["a", "b", "c"], al.variables());
        assert_eq!(&[3, 2, 4], al.shape());
    }

    #[test]
    fn permutes_scattered_variables() {
        let x = ones(&["s", "a", "t", "b"], &[2, 3, 4, 5]);
        let y = ones(&["c", "t", "s"], &[6, 4, 2]);

        let al = Alignment::new(&x, &y).unwrap();
        assert_eq!(&["a", "b"], al.x_only());
        assert_eq!(&["s", "t"], al.shared());
        assert_eq!(&["c"], al.y_only());

        // x is read as [a, b, s, t], y as [s, t, c]
        assert_eq!(&[1, 3, 0, 2], al.x_permutation());
        assert_eq!(&[2, 1, 0], al.y_permutation());
        assert_eq!(vec!["a", "b", "s", "t", "c"], al.variables());
        assert_eq!(&[3, 5, 2, 4, 6], al.shape());
    }

    #[test]
    fn identical_scopes() {
        let x = ones(&["a", "b"], &[2, 3]);
        let y = ones(&["b", "a"], &[3, 2]);

        let al = Alignment::new(&x, &y).unwrap();
        assert!(al.x_only().is_empty());
        assert!(al.y_only().is_empty());
        assert_eq!(&["a", "b"], al.shared());
        assert_eq!(&[1, 0], al.y_permutation());
        assert_eq!(&[2, 3], al.shape());
    }

    #[test]
    fn errors() {
        let x = ones(&["a", "b"], &[3, 2]);

        let err = Alignment::new(&x, &ones(&["c"], &[2])).expect_err("missing error");
        assert_eq!(Reason::UnalignableFactors, err.reason());

        let err = Alignment::new(&x, &ones(&["b", "c"], &[3, 2])).expect_err("missing error");
        assert_eq!(Reason::IncompatibleShapes, err.reason());

        let err = Alignment::new(&x, &Factor::empty(vec!["b"])).expect_err("missing error");
        assert_eq!(Reason::EmptyFactor, err.reason());

        // an empty operand is reported before anything else is checked
        let err = Alignment::new(&Factor::empty(vec!["z"]), &x).expect_err("missing error");
        assert_eq!(Reason::EmptyFactor, err.reason());
    }

}
