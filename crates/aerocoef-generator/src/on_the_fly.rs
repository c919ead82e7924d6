use aerocoef_core::{CoefficientGrid, CoefficientSource, CoefficientVector, GridError};

use crate::{CaseEvaluator, CoefficientGenerator, FlowCondition, GenerationError, GenerationOptions};

/// A [`CoefficientSource`] that evaluates a strategy on every query instead
/// of reading a precomputed table.
///
/// The grid only supplies the shape and sample points; its coefficient table
/// is never read.
///
/// # Examples
///
/// ```
/// use aerocoef_core::{CoefficientGrid, CoefficientSource, IndependentVariable, ReferenceQuantities};
/// use aerocoef_generator::{NewtonianFlatPlate, OnTheFlySource};
///
/// let reference = ReferenceQuantities::new(1.0, 1.0, [0.0; 3])?;
/// let plate = NewtonianFlatPlate::new(1.0, [0.0; 3], reference)?;
///
/// let mut grid = CoefficientGrid::new(6);
/// grid.set_variable_count(1)?;
/// grid.assign_role(IndependentVariable::AngleOfAttack, 0)?;
/// grid.set_samples(IndependentVariable::AngleOfAttack, &[0.0, 90.0])?;
///
/// let source = OnTheFlySource::new(grid, plate)?;
/// assert!((source.coefficients(&[1])?[0] - 2.0).abs() < 1e-12);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct OnTheFlySource<E> {
    grid: CoefficientGrid,
    evaluator: E,
}

impl<E> OnTheFlySource<E>
where
    E: CaseEvaluator,
{
    /// Combines a grid whose shape is final with a strategy of the same arity.
    ///
    /// # Errors
    ///
    /// - Any error of [`CoefficientGrid::case_count`].
    /// - [`GridError::ArityMismatch`] if the arities differ.
    pub fn new(grid: CoefficientGrid, evaluator: E) -> Result<Self, GridError> {
        grid.case_count()?;
        if evaluator.arity() != grid.arity() {
            return Err(GridError::ArityMismatch {
                expected: grid.arity(),
                actual: evaluator.arity(),
            });
        }
        Ok(Self { grid, evaluator })
    }

    /// Returns the grid.
    #[must_use]
    pub fn grid(&self) -> &CoefficientGrid {
        &self.grid
    }

    /// Returns the strategy.
    #[must_use]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Evaluates every grid point and returns the grid with its table filled.
    ///
    /// # Errors
    ///
    /// Returns the error of [`CoefficientGenerator::generate`].
    pub fn into_tabulated(self, options: GenerationOptions) -> Result<CoefficientGrid, GenerationError> {
        let Self {
            mut grid,
            evaluator,
        } = self;
        CoefficientGenerator::new(&evaluator)
            .with_options(options)
            .generate(&mut grid)?;
        Ok(grid)
    }
}

impl<E> CoefficientSource for OnTheFlySource<E>
where
    E: CaseEvaluator,
{
    fn coefficients(&self, indices: &[usize]) -> Result<CoefficientVector, GridError> {
        let condition = FlowCondition::at(&self.grid, indices)?;
        let vector = self
            .evaluator
            .evaluate(&condition)
            .map_err(|err| GridError::EvaluationFailed {
                message: err.to_string(),
            })?;
        if vector.arity() != self.grid.arity() {
            return Err(GridError::ArityMismatch {
                expected: self.grid.arity(),
                actual: vector.arity(),
            });
        }
        Ok(vector)
    }
}

#[cfg(test)]
mod tests {
    use aerocoef_core::{IndependentVariable, ReferenceQuantities};

    use super::*;
    use crate::{EvaluationError, NewtonianFlatPlate};

    /// Declares arity 2 but returns three components.
    #[derive(Debug)]
    struct Oversized;

    impl CaseEvaluator for Oversized {
        fn name(&self) -> &'static str {
            "oversized"
        }

        fn arity(&self) -> usize {
            2
        }

        fn evaluate(&self, _: &FlowCondition) -> Result<CoefficientVector, EvaluationError> {
            Ok(CoefficientVector::zeros(3))
        }
    }

    fn plate() -> NewtonianFlatPlate {
        let reference = ReferenceQuantities::new(1.0, 1.0, [0.0; 3]).unwrap();
        NewtonianFlatPlate::new(1.0, [0.0; 3], reference).unwrap()
    }

    fn mach_alpha_grid() -> CoefficientGrid {
        let mut grid = CoefficientGrid::new(6);
        grid.set_variable_count(2).unwrap();
        grid.assign_role(IndependentVariable::MachNumber, 0).unwrap();
        grid.assign_role(IndependentVariable::AngleOfAttack, 1).unwrap();
        grid.set_samples(IndependentVariable::MachNumber, &[0.5, 3.0, 6.0])
            .unwrap();
        grid.set_samples(IndependentVariable::AngleOfAttack, &[0.0, 5.0, 10.0])
            .unwrap();
        grid
    }

    #[test]
    fn test_matches_tabulated_lookup() {
        let source = OnTheFlySource::new(mach_alpha_grid(), plate()).unwrap();
        let tabulated = source.clone().into_tabulated(GenerationOptions::default());
        // Mach 0.5 is outside the strategy's domain
        assert!(matches!(
            tabulated,
            Err(GenerationError::Evaluation { offset: 0, .. })
        ));

        let mut grid = mach_alpha_grid();
        grid.set_samples(IndependentVariable::MachNumber, &[2.0, 3.0, 6.0])
            .unwrap();
        let source = OnTheFlySource::new(grid, plate()).unwrap();
        let tabulated = source
            .clone()
            .into_tabulated(GenerationOptions { parallel: true })
            .unwrap();
        for tuple in tabulated.indices().unwrap() {
            assert_eq!(source.coefficients(&tuple), tabulated.coefficients(&tuple));
        }
    }

    #[test]
    fn test_evaluation_failure_is_reported() {
        let source = OnTheFlySource::new(mach_alpha_grid(), plate()).unwrap();
        assert!(
            source
                .coefficients(&[0, 1])
                .unwrap_err()
                .is_evaluation_failed()
        );
        assert!(source.coefficients(&[1, 1]).is_ok());
    }

    #[test]
    fn test_bounds_enforced() {
        let source = OnTheFlySource::new(mach_alpha_grid(), plate()).unwrap();
        assert!(
            source
                .coefficients(&[1, 3])
                .unwrap_err()
                .is_sample_position_out_of_range()
        );
        assert!(source.coefficients(&[1]).unwrap_err().is_index_tuple_length());
    }

    #[test]
    fn test_requires_final_shape_and_arity() {
        let mut grid = CoefficientGrid::new(6);
        grid.set_variable_count(1).unwrap();
        assert_eq!(
            OnTheFlySource::new(grid, plate()).unwrap_err(),
            GridError::PointCountNotDeclared { slot: 0 }
        );
        let mut grid = CoefficientGrid::new(3);
        grid.set_variable_count(0).unwrap();
        assert!(
            OnTheFlySource::new(grid, plate())
                .unwrap_err()
                .is_arity_mismatch()
        );
    }

    #[test]
    fn test_rejects_vector_of_wrong_arity() {
        let mut grid = CoefficientGrid::new(2);
        grid.set_variable_count(1).unwrap();
        grid.set_samples(0_usize, &[1.0, 2.0]).unwrap();
        let source = OnTheFlySource::new(grid, Oversized).unwrap();
        assert_eq!(
            source.coefficients(&[0]),
            Err(GridError::ArityMismatch {
                expected: 2,
                actual: 3
            })
        );
    }
}
