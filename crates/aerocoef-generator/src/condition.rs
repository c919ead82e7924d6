//! Flow conditions resolved at a single grid point.

use aerocoef_core::{CoefficientGrid, GridError, IndependentVariable};

use crate::EvaluationError;

/// The value of every assigned role at one grid point.
///
/// Slots without a role do not contribute; roles that are not part of the
/// grid read as `None`.
///
/// # Examples
///
/// ```
/// use aerocoef_core::{CoefficientGrid, IndependentVariable};
/// use aerocoef_generator::FlowCondition;
///
/// let mut grid = CoefficientGrid::new(1);
/// grid.set_variable_count(1)?;
/// grid.assign_role(IndependentVariable::AngleOfAttack, 0)?;
/// grid.set_samples(IndependentVariable::AngleOfAttack, &[0.0, 10.0])?;
///
/// let condition = FlowCondition::at(&grid, &[1])?;
/// assert_eq!(condition.angle_of_attack(), Some(10.0));
/// assert_eq!(condition.mach_number(), None);
/// # Ok::<(), aerocoef_core::GridError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlowCondition {
    values: [Option<f64>; IndependentVariable::COUNT],
}

impl FlowCondition {
    /// Creates a condition with no values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this condition with `role` set to `value`.
    #[must_use]
    pub fn with(mut self, role: IndependentVariable, value: f64) -> Self {
        self.values[role.ordinal()] = Some(value);
        self
    }

    /// Resolves the condition at the grid point identified by `indices`.
    ///
    /// # Errors
    ///
    /// Returns the error of [`CoefficientGrid::to_flat_index`] if `indices`
    /// does not address a grid point.
    pub fn at(grid: &CoefficientGrid, indices: &[usize]) -> Result<Self, GridError> {
        grid.to_flat_index(indices)?;
        let mut condition = Self::new();
        for role in IndependentVariable::ALL {
            if let Some(slot) = grid.role_slot(role) {
                condition.values[role.ordinal()] = Some(grid.sample_point(slot, indices[slot])?);
            }
        }
        Ok(condition)
    }

    /// Returns the value of `role`, if present.
    #[must_use]
    pub fn get(&self, role: IndependentVariable) -> Option<f64> {
        self.values[role.ordinal()]
    }

    /// Returns the value of `role`.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::MissingVariable`] if the role is absent.
    pub fn require(&self, role: IndependentVariable) -> Result<f64, EvaluationError> {
        self.get(role)
            .ok_or(EvaluationError::MissingVariable { role })
    }

    /// Mach number, if present.
    #[must_use]
    pub fn mach_number(&self) -> Option<f64> {
        self.get(IndependentVariable::MachNumber)
    }

    /// Angle of attack, if present.
    #[must_use]
    pub fn angle_of_attack(&self) -> Option<f64> {
        self.get(IndependentVariable::AngleOfAttack)
    }

    /// Angle of sideslip, if present.
    #[must_use]
    pub fn angle_of_sideslip(&self) -> Option<f64> {
        self.get(IndependentVariable::AngleOfSideslip)
    }

    /// Reynolds number, if present.
    #[must_use]
    pub fn reynolds_number(&self) -> Option<f64> {
        self.get(IndependentVariable::ReynoldsNumber)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_resolved_through_slots() {
        let mut grid = CoefficientGrid::new(1);
        grid.set_variable_count(3).unwrap();
        // slot order differs from role order
        grid.assign_role(IndependentVariable::ReynoldsNumber, 0).unwrap();
        grid.assign_role(IndependentVariable::MachNumber, 2).unwrap();
        grid.set_samples(0_usize, &[1.0e5, 1.0e6]).unwrap();
        grid.set_samples(1_usize, &[42.0]).unwrap();
        grid.set_samples(2_usize, &[2.0, 4.0, 6.0]).unwrap();

        let condition = FlowCondition::at(&grid, &[1, 0, 2]).unwrap();
        assert_eq!(condition.reynolds_number(), Some(1.0e6));
        assert_eq!(condition.mach_number(), Some(6.0));
        assert_eq!(condition.angle_of_attack(), None);
        assert_eq!(condition.angle_of_sideslip(), None);
    }

    #[test]
    fn test_out_of_range_indices() {
        let mut grid = CoefficientGrid::new(1);
        grid.set_variable_count(1).unwrap();
        grid.assign_role(IndependentVariable::MachNumber, 0).unwrap();
        grid.set_samples(IndependentVariable::MachNumber, &[2.0]).unwrap();
        assert!(
            FlowCondition::at(&grid, &[1])
                .unwrap_err()
                .is_sample_position_out_of_range()
        );
        assert!(FlowCondition::at(&grid, &[]).unwrap_err().is_index_tuple_length());
    }

    #[test]
    fn test_require() {
        let condition = FlowCondition::new().with(IndependentVariable::AngleOfSideslip, 3.0);
        assert_eq!(condition.require(IndependentVariable::AngleOfSideslip), Ok(3.0));
        assert_eq!(
            condition.require(IndependentVariable::MachNumber),
            Err(EvaluationError::MissingVariable {
                role: IndependentVariable::MachNumber
            })
        );
    }
}
