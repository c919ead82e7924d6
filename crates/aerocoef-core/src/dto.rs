//! Serializable snapshot of a coefficient grid.
//!
//! [`CoefficientGridDto`] is the persistence boundary of a grid. Loading goes
//! through the grid's public accessors, so a snapshot that violates any shape
//! invariant is rejected with the same [`GridError`] the accessor would
//! report.
//!
//! JSON has no representation for NaN or infinities, so a snapshot only holds
//! finite sample points and coefficients.

use serde::{Deserialize, Serialize};

use crate::{CoefficientGrid, CoefficientVector, GridError, IndependentVariable};

/// Serializable form of one variable slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDto {
    /// Role assigned to the slot, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<IndependentVariable>,
    /// Sample points in index order.
    pub points: Vec<f64>,
}

/// Serializable form of a grid whose shape is final.
///
/// Conversion in either direction fails with
/// [`GridError::NonFiniteSamplePoint`] or [`GridError::NonFiniteCoefficient`]
/// if a value is NaN or infinite, including sample points never set.
///
/// # Examples
///
/// ```
/// use aerocoef_core::{CoefficientGrid, CoefficientGridDto, IndependentVariable};
///
/// let mut grid = CoefficientGrid::new(1);
/// grid.set_variable_count(1)?;
/// grid.assign_role(IndependentVariable::MachNumber, 0)?;
/// grid.set_samples(IndependentVariable::MachNumber, &[0.8, 1.2])?;
///
/// let dto = CoefficientGridDto::try_from(&grid)?;
/// let restored = CoefficientGrid::try_from(dto)?;
/// assert_eq!(restored, grid);
/// # Ok::<(), aerocoef_core::GridError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientGridDto {
    /// Number of components of each coefficient vector.
    pub arity: usize,
    /// One entry per slot, in slot order.
    pub variables: Vec<VariableDto>,
    /// Coefficient table in flat-offset order, if allocated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<Vec<CoefficientVector>>,
}

impl TryFrom<&CoefficientGrid> for CoefficientGridDto {
    type Error = GridError;

    fn try_from(grid: &CoefficientGrid) -> Result<Self, Self::Error> {
        let shape = grid.shape()?;
        let variables = (0..shape.len())
            .map(|slot| {
                Ok(VariableDto {
                    role: grid.role_at(slot),
                    points: grid.sample_points(slot)?.to_vec(),
                })
            })
            .collect::<Result<_, GridError>>()?;
        let dto = Self {
            arity: grid.arity(),
            variables,
            table: grid.table().ok().map(<[CoefficientVector]>::to_vec),
        };
        dto.check_finite()?;
        Ok(dto)
    }
}

impl CoefficientGridDto {
    fn check_finite(&self) -> Result<(), GridError> {
        for (slot, variable) in self.variables.iter().enumerate() {
            if let Some(position) = variable.points.iter().position(|v| !v.is_finite()) {
                return Err(GridError::NonFiniteSamplePoint { slot, position });
            }
        }
        let mut table = self.table.iter().flatten();
        if let Some(offset) = table.position(|v| v.iter().any(|c| !c.is_finite())) {
            return Err(GridError::NonFiniteCoefficient { offset });
        }
        Ok(())
    }
}

impl TryFrom<CoefficientGridDto> for CoefficientGrid {
    type Error = GridError;

    fn try_from(dto: CoefficientGridDto) -> Result<Self, Self::Error> {
        crate::coefficients::check_arity(dto.arity)?;
        dto.check_finite()?;
        let mut grid = Self::new(dto.arity);
        grid.set_variable_count(dto.variables.len())?;
        for (slot, variable) in dto.variables.iter().enumerate() {
            if let Some(role) = variable.role {
                if grid.role_slot(role).is_some() {
                    return Err(GridError::DuplicateRole { role });
                }
                grid.assign_role(role, slot)?;
            }
            grid.set_samples(slot, &variable.points)?;
        }
        if let Some(table) = dto.table {
            grid.set_table(table)?;
        }
        Ok(grid)
    }
}
