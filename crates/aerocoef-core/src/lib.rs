//! Core data structures for aerodynamic coefficient databases.
//!
//! This crate stores precomputed aerodynamic coefficient vectors tabulated over
//! a small set of independent flow variables (Mach number, angles of attack
//! and sideslip, Reynolds number) and provides a uniform way to retrieve the
//! vector of one combination of sample points.
//!
//! # Overview
//!
//! 1. **Variables** - [`variable`]: the reserved [`IndependentVariable`] roles
//!    and the [`VariableKey`] used to address a grid slot by index or by role.
//!
//! 2. **Grid** - [`grid`]: [`CoefficientGrid`] owns the declared variables,
//!    their sample points and the flat coefficient table, and maps index
//!    tuples onto table offsets.
//!
//! 3. **Index mapping** - [`indices`]: the row-major mixed-radix mapping and
//!    the [`GridIndices`] iterator over every grid point.
//!
//! 4. **Retrieval** - [`source`]: the [`CoefficientSource`] trait implemented
//!    by every coefficient strategy, including the grid's own table lookup.
//!
//! 5. **Collaborators** - [`reference`] holds the [`ReferenceQuantities`]
//!    strategies normalise with, and [`dto`] the serializable
//!    [`CoefficientGridDto`] snapshot.
//!
//! The grid holds no synchronization primitives. Populate it through `&mut`
//! access first, then share it read-only.
//!
//! # Examples
//!
//! ```
//! use aerocoef_core::{CoefficientGrid, CoefficientSource, CoefficientVector, IndependentVariable};
//!
//! let mut grid = CoefficientGrid::new(2);
//! grid.set_variable_count(2)?;
//! grid.assign_role(IndependentVariable::MachNumber, 0)?;
//! grid.assign_role(IndependentVariable::AngleOfAttack, 1)?;
//! grid.set_samples(IndependentVariable::MachNumber, &[0.5, 1.0, 2.0])?;
//! grid.set_samples(IndependentVariable::AngleOfAttack, &[0.0, 5.0])?;
//!
//! let table = grid
//!     .indices()?
//!     .map(|tuple| {
//!         let values = grid.sample_values(&tuple)?;
//!         CoefficientVector::from_slice(&[0.02 * values[0], 0.1 * values[1]])
//!     })
//!     .collect::<Result<Vec<_>, _>>()?;
//! grid.set_table(table)?;
//!
//! // Mach 1.0, 5 degrees
//! assert_eq!(grid.coefficients(&[1, 1])?.as_slice(), &[0.02, 0.5]);
//! # Ok::<(), aerocoef_core::GridError>(())
//! ```

pub mod coefficients;
pub mod dto;
pub mod error;
pub mod grid;
pub mod indices;
pub mod reference;
pub mod source;
pub mod variable;

pub use self::{
    coefficients::CoefficientVector,
    dto::{CoefficientGridDto, VariableDto},
    error::GridError,
    grid::CoefficientGrid,
    indices::GridIndices,
    reference::{ReferenceError, ReferenceQuantities},
    source::{BoxedCoefficientSource, CoefficientSource},
    variable::{IndependentVariable, VariableKey},
};
