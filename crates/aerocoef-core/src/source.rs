//! The retrieval contract shared by all coefficient strategies.

use std::fmt::Debug;

use crate::{CoefficientGrid, CoefficientVector, GridError};

/// Anything that can produce the coefficient vector of a grid point.
///
/// Strategies are free to look values up in a precomputed table (as
/// [`CoefficientGrid`] does) or to compute them on demand. Either way, the
/// index tuple has one component per declared variable and addresses sample
/// points in the same row-major convention as
/// [`CoefficientGrid::to_flat_index`].
///
/// Implementations must fail rather than return arbitrary values when the
/// grid shape is not final, the index tuple is out of range, or no data is
/// available.
///
/// # Examples
///
/// ```
/// use aerocoef_core::{BoxedCoefficientSource, CoefficientGrid, CoefficientSource};
///
/// let mut grid = CoefficientGrid::new(2);
/// grid.set_variable_count(1)?;
/// grid.set_samples(0_usize, &[0.0, 1.0])?;
/// grid.set_table(vec![[0.1, 0.2].try_into()?, [0.3, 0.4].try_into()?])?;
///
/// let source: BoxedCoefficientSource = Box::new(grid);
/// assert_eq!(source.coefficients(&[1])?.as_slice(), &[0.3, 0.4]);
/// # Ok::<(), aerocoef_core::GridError>(())
/// ```
pub trait CoefficientSource: Debug {
    /// Returns the coefficient vector of the grid point identified by `indices`.
    ///
    /// # Errors
    ///
    /// Returns an error if `indices` does not address a grid point, or if the
    /// source has no data for it yet.
    fn coefficients(&self, indices: &[usize]) -> Result<CoefficientVector, GridError>;
}

/// A boxed coefficient source that can be shared across threads.
pub type BoxedCoefficientSource = Box<dyn CoefficientSource + Send + Sync>;

impl CoefficientSource for CoefficientGrid {
    fn coefficients(&self, indices: &[usize]) -> Result<CoefficientVector, GridError> {
        self.coefficients_at(indices).cloned()
    }
}

impl<T> CoefficientSource for &T
where
    T: CoefficientSource + ?Sized,
{
    fn coefficients(&self, indices: &[usize]) -> Result<CoefficientVector, GridError> {
        (**self).coefficients(indices)
    }
}

impl<T> CoefficientSource for Box<T>
where
    T: CoefficientSource + ?Sized,
{
    fn coefficients(&self, indices: &[usize]) -> Result<CoefficientVector, GridError> {
        (**self).coefficients(indices)
    }
}
