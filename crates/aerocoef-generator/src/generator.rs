use std::time::{Duration, Instant};

use aerocoef_core::{CoefficientGrid, CoefficientVector, GridError};
use rayon::prelude::*;

use crate::{CaseEvaluator, EvaluationError, FlowCondition};

/// Errors reported by a generation pass.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum GenerationError {
    /// The grid rejected the pass (shape not final, arity mismatch, ...).
    #[display("grid error: {_0}")]
    Grid(GridError),
    /// The strategy failed at one grid point.
    #[display("evaluation failed at case {offset}: {source}")]
    #[from(skip)]
    Evaluation {
        /// Flat offset of the failing grid point.
        offset: usize,
        /// Underlying failure.
        source: EvaluationError,
    },
}

/// Options controlling a generation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Evaluate grid points on the rayon thread pool instead of sequentially.
    pub parallel: bool,
}

/// Summary of a completed generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationStats {
    /// Number of evaluated grid points, equal to the table length.
    pub case_count: usize,
    /// Wall-clock time spent evaluating and storing the table.
    pub elapsed: Duration,
}

/// Fills the coefficient table of a grid by running a [`CaseEvaluator`]
/// over every grid point.
///
/// The pass is all-or-nothing: the table is built completely before it is
/// stored, so a failing evaluation leaves the grid untouched.
///
/// # Examples
///
/// ```
/// use aerocoef_core::{CoefficientGrid, CoefficientSource, IndependentVariable, ReferenceQuantities};
/// use aerocoef_generator::{CoefficientGenerator, NewtonianFlatPlate};
///
/// let reference = ReferenceQuantities::new(1.0, 1.0, [0.0; 3])?;
/// let plate = NewtonianFlatPlate::new(1.0, [0.0; 3], reference)?;
///
/// let mut grid = CoefficientGrid::new(6);
/// grid.set_variable_count(1)?;
/// grid.assign_role(IndependentVariable::AngleOfAttack, 0)?;
/// grid.set_samples(IndependentVariable::AngleOfAttack, &[0.0, 10.0, 20.0])?;
///
/// let stats = CoefficientGenerator::new(&plate).generate(&mut grid)?;
/// assert_eq!(stats.case_count, 3);
/// assert_eq!(grid.coefficients(&[0])?.as_slice(), &[0.0; 6]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CoefficientGenerator<'a> {
    evaluator: &'a dyn CaseEvaluator,
    options: GenerationOptions,
}

impl<'a> CoefficientGenerator<'a> {
    /// Creates a sequential generator running `evaluator`.
    #[must_use]
    pub fn new(evaluator: &'a dyn CaseEvaluator) -> Self {
        Self {
            evaluator,
            options: GenerationOptions::default(),
        }
    }

    /// Returns this generator with `options`.
    #[must_use]
    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the generation options.
    #[must_use]
    pub fn options(&self) -> GenerationOptions {
        self.options
    }

    /// Evaluates every grid point and stores the resulting table in `grid`.
    ///
    /// Entries are stored in flat-offset order, so afterwards the table length
    /// equals the product of the grid's point counts.
    ///
    /// # Errors
    ///
    /// - [`GenerationError::Grid`] if the grid shape is not final, or the
    ///   evaluator's arity differs from the grid's.
    /// - [`GenerationError::Evaluation`] for the first failing grid point.
    pub fn generate(&self, grid: &mut CoefficientGrid) -> Result<GenerationStats, GenerationError> {
        let start = Instant::now();
        let table = self.tabulate(grid)?;
        let case_count = table.len();
        grid.set_table(table)?;
        let elapsed = start.elapsed();
        log::info!(
            "{} generated {case_count} cases in {elapsed:?}",
            self.evaluator.name()
        );
        Ok(GenerationStats {
            case_count,
            elapsed,
        })
    }

    /// Evaluates every grid point without storing the result.
    ///
    /// # Errors
    ///
    /// Same as [`generate`](Self::generate).
    pub fn tabulate(&self, grid: &CoefficientGrid) -> Result<Vec<CoefficientVector>, GenerationError> {
        if self.evaluator.arity() != grid.arity() {
            return Err(GridError::ArityMismatch {
                expected: grid.arity(),
                actual: self.evaluator.arity(),
            }
            .into());
        }
        let case_count = grid.case_count()?;
        log::debug!(
            "evaluating {case_count} cases with {} (parallel: {})",
            self.evaluator.name(),
            self.options.parallel
        );
        if self.options.parallel {
            (0..case_count)
                .into_par_iter()
                .map(|offset| self.evaluate_case(grid, offset))
                .collect()
        } else {
            (0..case_count)
                .map(|offset| self.evaluate_case(grid, offset))
                .collect()
        }
    }

    fn evaluate_case(
        &self,
        grid: &CoefficientGrid,
        offset: usize,
    ) -> Result<CoefficientVector, GenerationError> {
        let indices = grid.from_flat_index(offset)?;
        let condition = FlowCondition::at(grid, &indices)?;
        log::trace!("case {offset}: {condition:?}");
        let vector = self
            .evaluator
            .evaluate(&condition)
            .map_err(|source| GenerationError::Evaluation { offset, source })?;
        if vector.arity() != grid.arity() {
            return Err(GridError::ArityMismatch {
                expected: grid.arity(),
                actual: vector.arity(),
            }
            .into());
        }
        Ok(vector)
    }
}

#[cfg(test)]
mod tests {
    use aerocoef_core::{CoefficientSource as _, IndependentVariable};

    use super::*;

    /// Stores `[mach, alpha]` so table contents reveal the evaluated condition.
    #[derive(Debug)]
    struct Echo;

    impl CaseEvaluator for Echo {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn arity(&self) -> usize {
            2
        }

        fn evaluate(&self, condition: &FlowCondition) -> Result<CoefficientVector, EvaluationError> {
            let mach = condition.require(IndependentVariable::MachNumber)?;
            let alpha = condition.require(IndependentVariable::AngleOfAttack)?;
            if mach > 5.0 {
                return Err(EvaluationError::OutOfDomain {
                    role: IndependentVariable::MachNumber,
                    value: mach,
                    reason: "Mach number must not exceed 5",
                });
            }
            Ok(CoefficientVector::from_slice(&[mach, alpha]).unwrap())
        }
    }

    /// Returns vectors of the wrong arity.
    #[derive(Debug)]
    struct Liar;

    impl CaseEvaluator for Liar {
        fn name(&self) -> &'static str {
            "liar"
        }

        fn arity(&self) -> usize {
            2
        }

        fn evaluate(&self, _: &FlowCondition) -> Result<CoefficientVector, EvaluationError> {
            Ok(CoefficientVector::zeros(3))
        }
    }

    fn mach_alpha_grid(mach: &[f64], alpha: &[f64]) -> CoefficientGrid {
        let mut grid = CoefficientGrid::new(2);
        grid.set_variable_count(2).unwrap();
        grid.assign_role(IndependentVariable::MachNumber, 0).unwrap();
        grid.assign_role(IndependentVariable::AngleOfAttack, 1).unwrap();
        grid.set_samples(IndependentVariable::MachNumber, mach).unwrap();
        grid.set_samples(IndependentVariable::AngleOfAttack, alpha).unwrap();
        grid
    }

    #[test]
    fn test_table_follows_flat_index() {
        let mut grid = mach_alpha_grid(&[0.5, 1.0, 2.0], &[0.0, 5.0]);
        let stats = CoefficientGenerator::new(&Echo).generate(&mut grid).unwrap();
        assert_eq!(stats.case_count, 6);
        assert_eq!(grid.table().unwrap().len(), grid.case_count().unwrap());
        for tuple in grid.indices().unwrap() {
            let expected = grid.sample_values(&tuple).unwrap();
            assert_eq!(grid.coefficients(&tuple).unwrap().as_slice(), &expected[..]);
        }
        assert_eq!(grid.table().unwrap()[3].as_slice(), &[1.0, 5.0]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mach: Vec<_> = (1..=5).map(f64::from).collect();
        let alpha: Vec<_> = (0..40).map(|a| f64::from(a) * 0.5).collect();
        let grid = mach_alpha_grid(&mach, &alpha);
        let sequential = CoefficientGenerator::new(&Echo).tabulate(&grid).unwrap();
        let parallel = CoefficientGenerator::new(&Echo)
            .with_options(GenerationOptions { parallel: true })
            .tabulate(&grid)
            .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_failure_leaves_grid_untouched() {
        let mut grid = mach_alpha_grid(&[1.0, 6.0], &[0.0]);
        grid.allocate_table().unwrap();
        let before = grid.clone();
        let err = CoefficientGenerator::new(&Echo).generate(&mut grid).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::Evaluation {
                offset: 1,
                source: EvaluationError::OutOfDomain { .. }
            }
        ));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_missing_role() {
        let mut grid = CoefficientGrid::new(2);
        grid.set_variable_count(1).unwrap();
        grid.assign_role(IndependentVariable::MachNumber, 0).unwrap();
        grid.set_samples(IndependentVariable::MachNumber, &[2.0]).unwrap();
        let err = CoefficientGenerator::new(&Echo).generate(&mut grid).unwrap_err();
        assert_eq!(
            err,
            GenerationError::Evaluation {
                offset: 0,
                source: EvaluationError::MissingVariable {
                    role: IndependentVariable::AngleOfAttack
                }
            }
        );
    }

    #[test]
    fn test_shape_must_be_final() {
        let mut grid = CoefficientGrid::new(2);
        grid.set_variable_count(2).unwrap();
        grid.set_samples(0_usize, &[1.0]).unwrap();
        assert_eq!(
            CoefficientGenerator::new(&Echo).generate(&mut grid),
            Err(GenerationError::Grid(GridError::PointCountNotDeclared {
                slot: 1
            }))
        );
    }

    #[test]
    fn test_arity_checked() {
        let mut grid = CoefficientGrid::new(3);
        grid.set_variable_count(0).unwrap();
        assert_eq!(
            CoefficientGenerator::new(&Echo).generate(&mut grid),
            Err(GenerationError::Grid(GridError::ArityMismatch {
                expected: 3,
                actual: 2
            }))
        );

        let mut grid = mach_alpha_grid(&[1.0], &[0.0]);
        assert_eq!(
            CoefficientGenerator::new(&Liar).generate(&mut grid),
            Err(GenerationError::Grid(GridError::ArityMismatch {
                expected: 2,
                actual: 3
            }))
        );
        assert!(!grid.is_table_allocated());
    }
}
