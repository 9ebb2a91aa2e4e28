//! The algebra over `Factor`s: product, marginalization, reduction, division and the joint
//! distribution of a sequence of factors.
//!
//! Every operation validates its arguments before computing anything and returns a freshly
//! allocated `Factor`. The inputs are never modified.

use super::{Alignment, Factor};
use crate::error::{FactorError, Reason, Result};
use crate::table;
use crate::variable::{self, Assignment, Variable};

use std::collections::HashSet;


impl<V: Variable> Factor<V> {

    /// Product of this `Factor` and another `Factor` that have intersecting scope.
    ///
    /// Defined in Koller & Friedman Section 4.2.1
    ///
    /// # Args
    /// * `other`: the `Factor` to multiply with.
    ///
    /// # Returns
    /// A new `Factor` over `x_only ++ shared ++ y_only` (see `Alignment`), where every entry is
    /// `self[x_only, shared] * other[shared, y_only]`.
    ///
    /// # Errors
    /// * `Reason::EmptyFactor` if either operand has no table
    /// * `Reason::UnalignableFactors` if the scopes do not intersect
    /// * `Reason::IncompatibleShapes` if a shared variable has a different cardinality in each
    pub fn product(&self, other: &Self) -> Result<Self> {
        let al = Alignment::new(self, other)?;
        let (_, tx) = self.parts()?;
        let (_, ty) = other.parts()?;

        // [x_only][shared][1...] * [1...][shared][y_only]
        let px = table::extend(table::permute(tx, al.x_permutation()), 0, al.y_only().len());
        let py = table::extend(table::permute(ty, al.y_permutation()), al.x_only().len(), 0);
        let out = table::broadcast_zip(&px, &py, al.shape(), |a, b| a * b)?;

        let phi = Factor::new(al.variables(), out)?;
        log::trace!("product of {:?} and {:?} is over {:?}", self.variables(), other.variables(), phi.variables());
        Ok(phi)
    }


    /// Marginalize the `Factor` over the given `Variable`s by summing them out.
    ///
    /// Defined in Koller & Friedman 9.3.1
    ///
    /// # Returns
    /// a `Factor` over the remaining variables, in their original order. Marginalizing over the
    /// whole scope yields a 0-dimensional `Factor` holding the sum of all entries.
    ///
    /// # Errors
    /// * `Reason::EmptyFactor` if the `Factor` has no table
    /// * `Reason::UnknownVariable` if one of `vars` is not in the scope
    pub fn marginalize(&self, vars: &[V]) -> Result<Self> {
        let (scope, tbl) = self.parts()?;

        let axes = vars.iter()
                       .map(|v| variable::axis_of(scope, v))
                       .collect::<Result<Vec<usize>>>()?;

        let removed: HashSet<&V> = vars.iter().collect();
        let new_scope: Vec<V> = scope.iter().filter(|v| !removed.contains(v)).cloned().collect();

        log::trace!("summing {:?} out of {:?}", vars, scope);
        Factor::new(new_scope, table::sum_axes(tbl, &axes))
    }


    /// Reduce the `Factor` to the context `var = value`, dropping `var` from the scope.
    ///
    /// Defined in Koller & Friedman 4.2.3
    ///
    /// # Returns
    /// the slice of the table at `value` along the axis of `var`. The remaining variables keep
    /// their order.
    ///
    /// # Errors
    /// * `Reason::EmptyFactor` if the `Factor` has no table
    /// * `Reason::UnknownVariable` if `var` is not in the scope
    /// * `Reason::ValueOutOfRange` if `value` is not below the cardinality of `var`
    pub fn reduce(&self, var: &V, value: usize) -> Result<Self> {
        let (scope, tbl) = self.parts()?;
        let axis = variable::axis_of(scope, var)?;

        let card = tbl.shape()[axis];
        if value >= card {
            return Err(FactorError::invalid(
                Reason::ValueOutOfRange,
                format!("index {} for {:?} of cardinality {}", value, var, card)
            ));
        }

        let new_scope: Vec<V> = scope.iter().filter(|&v| v != var).cloned().collect();
        Factor::new(new_scope, table::slice(tbl, axis, value))
    }


    /// Reduce the `Factor` over the given partial assignment.
    ///
    /// Evidence on variables outside the scope is ignored, so an assignment disjoint from the
    /// scope returns an equal `Factor`, and a complete one returns a 0-dimensional `Factor`.
    ///
    /// # Errors
    /// * `Reason::EmptyFactor` if the `Factor` has no table
    /// * `Reason::ValueOutOfRange` if an observed value is out of range for its variable
    pub fn condition(&self, evidence: &Assignment<V>) -> Result<Self> {
        let (scope, _) = self.parts()?;

        let observed: Vec<(&V, usize)> = scope.iter()
                                              .filter_map(|v| evidence.get(v).map(|&val| (v, val)))
                                              .collect();

        let mut phi = self.clone();
        for (v, val) in observed {
            phi = phi.reduce(v, val)?;
        }
        Ok(phi)
    }


    /// `Factor` division. Calculates `Psi(X, Y) = Phi1(X, Y) / Phi2(Y)` where `Phi1 = self` and
    /// `Phi2 = other`.
    ///
    /// Defined in Koller & Friedman Section 10.3.1
    ///
    /// # Notes
    /// In the context of this operation, 0/0 is defined as 0. However, X/0, where X != 0, is still
    /// undefined.
    ///
    /// # Returns
    /// a new `Factor` over the scope of `self`, in the same order
    ///
    /// # Errors
    /// * `Reason::EmptyFactor` if either operand has no table
    /// * `Reason::UnknownVariable` if the scope of `other` is not a subset of the scope of `self`
    /// * `Reason::IncompatibleShapes` if a variable has a different cardinality in each operand
    /// * `Reason::DivisionByZero` if a nonzero entry would be divided by zero
    pub fn divide(&self, other: &Self) -> Result<Self> {
        let (vx, tx) = self.parts()?;
        let (vy, ty) = other.parts()?;

        let positions = vy.iter()
                          .map(|v| variable::axis_of(vx, v))
                          .collect::<Result<Vec<usize>>>()?;

        for ((v, &ix), &cy) in vy.iter().zip(&positions).zip(ty.shape()) {
            let cx = tx.shape()[ix];
            if cx != cy {
                return Err(FactorError::invalid(
                    Reason::IncompatibleShapes,
                    format!("{:?} has cardinality {} and {}", v, cx, cy)
                ));
            }
        }

        // read the denominator in the numerator's variable order, then pad the missing axes
        let mut order: Vec<usize> = (0..vy.len()).collect();
        order.sort_by_key(|&i| positions[i]);
        let missing: Vec<usize> = (0..vx.len()).filter(|i| !positions.contains(i)).collect();
        let den = table::insert_singletons(table::permute(ty, &order), &missing);

        let num = tx.view();
        let (n, d) = table::broadcast_pair(&num, &den, tx.shape())?;
        if n.iter().zip(d.iter()).any(|(&a, &b)| b == 0. && a != 0.) {
            return Err(FactorError::invalid(
                Reason::DivisionByZero,
                format!("dividing {:?} by {:?}", vx, vy)
            ));
        }

        let out = table::broadcast_zip(&num, &den, tx.shape(), |a, b| if b == 0. { 0. } else { a / b })?;
        Factor::new(vx.to_vec(), out)
    }


    /// Scale the `Factor` so its entries sum to one.
    ///
    /// # Errors
    /// * `Reason::EmptyFactor` if the `Factor` has no table
    /// * `Reason::ZeroPartition` if the entries sum to zero
    pub fn normalize(&self) -> Result<Self> {
        let (scope, tbl) = self.parts()?;

        let z = tbl.sum();
        if z == 0. {
            return Err(FactorError::invalid(
                Reason::ZeroPartition,
                format!("factor over {:?}", scope)
            ));
        }

        Factor::new(scope.to_vec(), tbl / z)
    }

}


/// The joint distribution of a sequence of `Factor`s: their product, folded from the left.
///
/// # Returns
/// `factors[0] * factors[1] * ... * factors[n - 1]`, each product laid out as described in
/// `Factor::product`
///
/// # Errors
/// * `Reason::EmptyInput` if `factors` is empty
/// * `Reason::EmptyFactor` if any of `factors` has no table. This is checked before multiplying.
/// * the first error of any product in the fold, for example `Reason::UnalignableFactors` if the
///   accumulated scope shares nothing with the next `Factor`
pub fn joint<'a, V, I>(factors: I) -> Result<Factor<V>>
    where V: Variable + 'a,
          I: IntoIterator<Item = &'a Factor<V>>
{
    let factors: Vec<&Factor<V>> = factors.into_iter().collect();

    for phi in factors.iter() {
        phi.parts()?;
    }

    let (first, rest) = factors.split_first().ok_or_else(|| {
        FactorError::invalid(Reason::EmptyInput, "joint distribution of no factors")
    })?;

    let mut psi = (*first).clone();
    for phi in rest {
        psi = psi.product(phi)?;
    }

    log::trace!("joint of {} factors is over {:?}", factors.len(), psi.variables());
    Ok(psi)
}
