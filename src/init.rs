//! Module containing initialization routines for the tables of `Factor`s.

use crate::error::{FactorError, Reason, Result};
use crate::factor::Factor;
use crate::table::Table;
use crate::variable::Variable;

use ndarray::IxDyn;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::Rng;


/// Defines possible ways to fill the table of a `Factor`.
#[derive(Clone, Debug)]
pub enum Initialization<'a> {
    /// A uniform distribution over all joint assignments
    Uniform,

    /// Random weights, normalized to sum to one
    Random,

    /// A Multinomial distribution with parameters ```p_0, p_1...```.
    /// Note that this `Initialization` is valid only for a scope of one `Variable`.
    Multinomial(&'a [f64]),

    /// User defined table
    Table(Table)
}


impl<'a> Initialization<'a> {

    /// Construct a `Factor`, initialized based on ```self```
    ///
    /// # Args
    /// * `variables`: the scope of the `Factor`, in axis order
    /// * `cardinalities`: the number of values of each variable
    ///
    /// # Errors
    /// * `Reason::MalformedFactor` if there is not one cardinality per variable, a cardinality is
    ///   zero, or a `Multinomial` is requested for a scope that is not a single variable
    /// * `Reason::IncompatibleShapes` if a user table or `Multinomial` does not have the requested
    ///   shape
    /// * `Reason::DuplicateVariable` if a variable appears twice
    pub fn build<V: Variable>(self, variables: Vec<V>, cardinalities: &[usize]) -> Result<Factor<V>> {
        self.build_using(variables, cardinalities, &mut rand::thread_rng())
    }


    /// As `build`, drawing any random weights from `rng`
    pub fn build_using<V, R>(self, variables: Vec<V>, cardinalities: &[usize], rng: &mut R) -> Result<Factor<V>>
        where V: Variable,
              R: Rng + ?Sized
    {
        if variables.len() != cardinalities.len() {
            return Err(FactorError::invalid(
                Reason::MalformedFactor,
                format!("{} cardinalities for {} variables", cardinalities.len(), variables.len())
            ));
        }

        let shape = IxDyn(cardinalities);

        let tbl = match self {
            Initialization::Uniform => {
                // normalizing constant is just the number of elements
                let z: usize = cardinalities.iter().product();
                Table::from_elem(shape, 1. / (z as f64))
            },
            Initialization::Random => {
                let mut tbl = Table::random_using(shape, Uniform::new(1.0, 100.0), rng);
                let z = tbl.sum();
                tbl.mapv_inplace(|e| e / z);
                tbl
            },
            Initialization::Multinomial(ps) => {
                if variables.len() != 1 {
                    return Err(FactorError::invalid(
                        Reason::MalformedFactor,
                        format!("multinomial over {} variables", variables.len())
                    ));
                }
                Table::from_shape_vec(IxDyn(&[ps.len()]), ps.to_vec()).map_err(|e| {
                    FactorError::invalid(Reason::MalformedFactor, e.to_string())
                })?
            },
            Initialization::Table(tbl) => tbl,
        };

        if tbl.shape() != cardinalities {
            return Err(FactorError::invalid(
                Reason::IncompatibleShapes,
                format!("table of shape {:?} for cardinalities {:?}", tbl.shape(), cardinalities)
            ));
        }

        Factor::new(variables, tbl)
    }

}
