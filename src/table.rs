//! The dense tensor substrate underneath every `Factor`.
//!
//! A `Table` is an `ndarray` array of `f64`: a data buffer together with its shape and strides.
//! The helpers here are the only tensor operations the factor algebra needs. Broadcasting is never
//! left implicit: operands are extended with singleton axes and then explicitly broadcast to the
//! output shape, which turns the singleton axes into stride-0 views.

use crate::error::{FactorError, Reason, Result};

use ndarray::{ArrayViewD, Axis, IxDyn, Zip};

/// Alias f64 ndarray::ArrayD as Table
pub type Table = ndarray::ArrayD<f64>;


/// View `table` with its axes reordered, so that axis `i` of the view is axis `perm[i]` of
/// `table`. No data is copied.
///
/// `perm` must be a permutation of `0..table.ndim()`.
pub fn permute<'a>(table: &'a Table, perm: &[usize]) -> ArrayViewD<'a, f64> {
    debug_assert_eq!(table.ndim(), perm.len());
    table.view().permuted_axes(perm.to_vec())
}


/// Extend a view with `leading` singleton axes in front and `trailing` singleton axes behind.
pub fn extend<'a>(view: ArrayViewD<'a, f64>, leading: usize, trailing: usize) -> ArrayViewD<'a, f64> {
    let mut view = view;
    for _ in 0..leading {
        view = view.insert_axis(Axis(0));
    }
    for _ in 0..trailing {
        let end = view.ndim();
        view = view.insert_axis(Axis(end));
    }
    view
}


/// Insert a singleton axis at each of `axes`, given in ascending order as positions in the
/// extended view.
pub fn insert_singletons<'a>(view: ArrayViewD<'a, f64>, axes: &[usize]) -> ArrayViewD<'a, f64> {
    axes.iter().fold(view, |v, &ax| v.insert_axis(Axis(ax)))
}


/// Broadcast both operands to `shape` and combine them elementwise with `f`.
///
/// The operands must already have the rank of `shape`; each axis must either match `shape` or be
/// a singleton.
///
/// # Errors
/// * `Reason::IncompatibleShapes` if either operand can not be broadcast to `shape`
pub fn broadcast_zip<F>(
    a: &ArrayViewD<f64>,
    b: &ArrayViewD<f64>,
    shape: &[usize],
    f: F,
) -> Result<Table>
    where F: Fn(f64, f64) -> f64
{
    let (a, b) = broadcast_pair(a, b, shape)?;
    Ok(Zip::from(a).and(b).map_collect(|&x, &y| f(x, y)))
}


/// Broadcast both operands to `shape`, yielding stride-0 views over their singleton axes.
pub fn broadcast_pair<'a>(
    a: &'a ArrayViewD<f64>,
    b: &'a ArrayViewD<f64>,
    shape: &[usize],
) -> Result<(ArrayViewD<'a, f64>, ArrayViewD<'a, f64>)> {
    let target = IxDyn(shape);
    let incompatible = |got: &[usize]| {
        FactorError::invalid(
            Reason::IncompatibleShapes,
            format!("can not broadcast {:?} to {:?}", got, shape)
        )
    };

    let a = a.broadcast(target.clone()).ok_or_else(|| incompatible(a.shape()))?;
    let b = b.broadcast(target).ok_or_else(|| incompatible(b.shape()))?;
    Ok((a, b))
}


/// Sum `table` over each of `axes`, removing them. Repeated axes are summed once.
///
/// Summing over every axis produces a 0-dimensional table holding the total.
pub fn sum_axes(table: &Table, axes: &[usize]) -> Table {
    let mut axes = axes.to_vec();
    axes.sort_unstable();
    axes.dedup();

    // remove the highest axes first so the lower indices stay valid
    axes.into_iter().rev().fold(table.clone(), |acc, ax| acc.sum_axis(Axis(ax)))
}


/// Fix `axis` of `table` at `index`, dropping that axis.
///
/// `index` must be smaller than the length of `axis`.
pub fn slice(table: &Table, axis: usize, index: usize) -> Table {
    table.index_axis(Axis(axis), index).to_owned()
}


#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::{arr0, array};

    #[test]
    fn permute_swaps_axes() {
        let t = array![[1., 2., 3.], [4., 5., 6.]].into_dyn();
        let p = permute(&t, &[1, 0]);

        assert_eq!(&[3, 2], p.shape());
        assert_eq!(array![[1., 4.], [2., 5.], [3., 6.]].into_dyn(), p);
    }

    #[test]
    fn extend_adds_singletons() {
        let t = array![1., 2.].into_dyn();
        let v = extend(t.view(), 2, 1);
        assert_eq!(&[1, 1, 2, 1], v.shape());

        let v = extend(t.view(), 0, 0);
        assert_eq!(&[2], v.shape());
    }

    #[test]
    fn insert_between() {
        let t = array![[1., 2., 3.], [4., 5., 6.]].into_dyn();
        let v = insert_singletons(t.view(), &[0, 2, 4]);
        assert_eq!(&[1, 2, 1, 3, 1], v.shape());
        assert_eq!(6., v[IxDyn(&[0, 1, 0, 2, 0])]);
    }

    #[test]
    fn broadcast_outer_product() {
        let a = array![1., 2.].into_dyn();
        let b = array![10., 20., 30.].into_dyn();

        let a = extend(a.view(), 0, 1);
        let b = extend(b.view(), 1, 0);
        let out = broadcast_zip(&a, &b, &[2, 3], |x, y| x * y).unwrap();

        assert_eq!(array![[10., 20., 30.], [20., 40., 60.]].into_dyn(), out);
    }

    #[test]
    fn broadcast_mismatch() {
        let a = array![1., 2.].into_dyn();
        let b = array![1., 2., 3.].into_dyn();

        let err = broadcast_zip(&a.view(), &b.view(), &[2], |x, y| x + y).expect_err("missing error");
        assert_eq!(Reason::IncompatibleShapes, err.reason());
    }

    #[test]
    fn sum_over_axes() {
        let t = array![[[1., 2.], [3., 4.]], [[5., 6.], [7., 8.]]].into_dyn();

        assert_eq!(array![[4., 6.], [12., 14.]].into_dyn(), sum_axes(&t, &[1]));
        assert_eq!(array![14., 22.].into_dyn(), sum_axes(&t, &[2, 0]));
        assert_eq!(array![14., 22.].into_dyn(), sum_axes(&t, &[0, 2, 0]));
        assert_eq!(arr0(36.).into_dyn(), sum_axes(&t, &[0, 1, 2]));
        assert_eq!(t, sum_axes(&t, &[]));
    }

    #[test]
    fn slice_drops_axis() {
        let t = array![[1., 2., 3.], [4., 5., 6.]].into_dyn();

        assert_eq!(array![4., 5., 6.].into_dyn(), slice(&t, 0, 1));
        assert_eq!(array![3., 6.].into_dyn(), slice(&t, 1, 2));
    }

}
