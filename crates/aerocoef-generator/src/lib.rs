//! Coefficient generation strategies for aerodynamic coefficient grids.
//!
//! This crate fills the table of an [`aerocoef_core::CoefficientGrid`]
//! with a concrete strategy, or serves the strategy's results directly.
//!
//! # Overview
//!
//! - [`CaseEvaluator`] is the seam for strategies: it computes the
//!   coefficient vector of one [`FlowCondition`].
//! - [`CoefficientGenerator`] runs an evaluator over every grid point, in flat
//!   offset order, and stores the table in one step.
//! - [`OnTheFlySource`] implements [`aerocoef_core::CoefficientSource`] by
//!   evaluating on each query.
//! - [`NewtonianFlatPlate`] is an empirical strategy based on modified
//!   Newtonian impact theory.
//!
//! # Examples
//!
//! ```
//! use aerocoef_core::{CoefficientGrid, CoefficientSource, IndependentVariable, ReferenceQuantities};
//! use aerocoef_generator::{CoefficientGenerator, GenerationOptions, NewtonianFlatPlate};
//!
//! let reference = ReferenceQuantities::new(2.0, 1.0, [0.0; 3])?;
//! let plate = NewtonianFlatPlate::new(2.0, [0.0; 3], reference)?;
//!
//! let mut grid = CoefficientGrid::new(6);
//! grid.set_variable_count(2)?;
//! grid.assign_role(IndependentVariable::MachNumber, 0)?;
//! grid.assign_role(IndependentVariable::AngleOfAttack, 1)?;
//! grid.set_samples(IndependentVariable::MachNumber, &[5.0, 10.0, 20.0])?;
//! grid.set_samples(IndependentVariable::AngleOfAttack, &[0.0, 10.0, 20.0, 30.0])?;
//!
//! CoefficientGenerator::new(&plate)
//!     .with_options(GenerationOptions { parallel: true })
//!     .generate(&mut grid)?;
//!
//! let at_mach_10 = grid.coefficients(&[1, 3])?;
//! assert!(at_mach_10[2] > 0.0); // lift
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{condition::*, evaluator::*, generator::*, newtonian::*, on_the_fly::*};

mod condition;
mod evaluator;
mod generator;
pub mod newtonian;
mod on_the_fly;
