//! The coefficient grid: declared flow variables, their sample points and
//! the flat coefficient table.

use crate::{
    CoefficientVector, GridError, GridIndices, IndependentVariable, VariableKey,
    coefficients::check_arity,
    indices::{self, checked_case_count},
};

/// A rectangular lattice of flow conditions with one coefficient vector per
/// grid point.
///
/// The grid owns the per-variable sample points and the flat coefficient
/// table exclusively. Its shape is declared in order:
///
/// 1. [`set_variable_count`](Self::set_variable_count) declares how many
///    variables participate (at most [`IndependentVariable::COUNT`]);
/// 2. [`assign_role`](Self::assign_role) optionally maps roles such as the
///    Mach number onto slots;
/// 3. [`set_point_count`](Self::set_point_count) allocates the sample points
///    of each slot, which are then filled with
///    [`set_sample_point`](Self::set_sample_point).
///
/// Once every slot has a point count the shape is final and the coefficient
/// table, whose length is always the product of the point counts, can be
/// allocated and populated. Changing a point count discards the table.
///
/// # Examples
///
/// ```
/// use aerocoef_core::{CoefficientGrid, CoefficientSource, IndependentVariable};
///
/// let mut grid = CoefficientGrid::new(3);
/// grid.set_variable_count(2)?;
/// grid.assign_role(IndependentVariable::MachNumber, 0)?;
/// grid.assign_role(IndependentVariable::AngleOfAttack, 1)?;
/// grid.set_samples(IndependentVariable::MachNumber, &[0.5, 1.0, 2.0])?;
/// grid.set_samples(IndependentVariable::AngleOfAttack, &[0.0, 5.0])?;
///
/// assert_eq!(grid.case_count()?, 6);
/// assert_eq!(grid.to_flat_index(&[1, 1])?, 3);
///
/// grid.allocate_table()?;
/// grid.set_coefficients(&[1, 1], [0.1, 0.0, 0.4].try_into()?)?;
/// assert_eq!(grid.coefficients(&[1, 1])?.as_slice(), &[0.1, 0.0, 0.4]);
/// # Ok::<(), aerocoef_core::GridError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientGrid {
    arity: usize,
    /// `None` until [`set_variable_count`](Self::set_variable_count) is called.
    variable_count: Option<usize>,
    /// Slot assigned to each role, indexed by [`IndependentVariable::ordinal`].
    roles: [Option<usize>; IndependentVariable::COUNT],
    /// Sample points per slot; `None` until the slot's point count is declared.
    samples: Vec<Option<Vec<f64>>>,
    /// Invariant: when present, its length equals the case count.
    table: Option<Vec<CoefficientVector>>,
}

impl CoefficientGrid {
    /// Creates an empty grid storing coefficient vectors of `arity` components.
    ///
    /// # Panics
    ///
    /// Panics if `arity` is not in `1..=CoefficientVector::MAX_ARITY`.
    #[must_use]
    pub fn new(arity: usize) -> Self {
        assert!(
            check_arity(arity).is_ok(),
            "Coefficient arity must be 1-{}, got {arity}",
            CoefficientVector::MAX_ARITY
        );
        Self {
            arity,
            variable_count: None,
            roles: [None; IndependentVariable::COUNT],
            samples: Vec::new(),
            table: None,
        }
    }

    /// Returns the number of components of every stored coefficient vector.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Returns the declared variable count, or 0 if none was declared.
    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.variable_count.unwrap_or(0)
    }

    /// Returns `true` once [`set_variable_count`](Self::set_variable_count)
    /// has been called.
    #[must_use]
    pub fn is_variable_count_declared(&self) -> bool {
        self.variable_count.is_some()
    }

    /// Declares how many independent variables participate in the grid.
    ///
    /// This is a full reset: point counts, sample points, role assignments
    /// and the coefficient table are all discarded, and the grid must be
    /// redeclared before any query succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::VariableCountTooLarge`] if `count` exceeds
    /// [`IndependentVariable::COUNT`]. The grid is left unchanged in that case.
    pub fn set_variable_count(&mut self, count: usize) -> Result<(), GridError> {
        if count > IndependentVariable::COUNT {
            return Err(GridError::VariableCountTooLarge {
                count,
                max: IndependentVariable::COUNT,
            });
        }
        if self.table.is_some() {
            log::warn!("redeclaring variable count discards a populated coefficient table");
        }
        log::debug!("declaring {count} independent variables");
        self.variable_count = Some(count);
        self.roles = [None; IndependentVariable::COUNT];
        self.samples = vec![None; count];
        self.table = None;
        Ok(())
    }

    /// Maps `role` onto `slot`.
    ///
    /// Re-assigning a role moves it to the new slot. A slot holds at most one
    /// role.
    ///
    /// # Errors
    ///
    /// - [`GridError::VariableCountNotDeclared`] before `set_variable_count`.
    /// - [`GridError::SlotOutOfRange`] if `slot >= variable_count`.
    /// - [`GridError::SlotAlreadyAssigned`] if another role occupies `slot`.
    pub fn assign_role(&mut self, role: IndependentVariable, slot: usize) -> Result<(), GridError> {
        let slot = self.check_slot(slot)?;
        if let Some(assigned) = self.role_at(slot).filter(|&assigned| assigned != role) {
            return Err(GridError::SlotAlreadyAssigned { slot, assigned });
        }
        log::debug!("assigning {role} to slot {slot}");
        self.roles[role.ordinal()] = Some(slot);
        Ok(())
    }

    /// Returns the slot assigned to `role`, if any.
    #[must_use]
    pub fn role_slot(&self, role: IndependentVariable) -> Option<usize> {
        self.roles[role.ordinal()]
    }

    /// Returns the role assigned to `slot`, if any.
    #[must_use]
    pub fn role_at(&self, slot: usize) -> Option<IndependentVariable> {
        IndependentVariable::ALL
            .into_iter()
            .find(|&role| self.role_slot(role) == Some(slot))
    }

    /// Resolves a slot index or role to a slot index.
    ///
    /// # Errors
    ///
    /// - [`GridError::VariableCountNotDeclared`] before `set_variable_count`.
    /// - [`GridError::SlotOutOfRange`] for a slot not in `[0, variable_count)`.
    /// - [`GridError::RoleNotAssigned`] for a role without a slot.
    pub fn resolve(&self, key: impl Into<VariableKey>) -> Result<usize, GridError> {
        match key.into() {
            VariableKey::Slot(slot) => self.check_slot(slot),
            VariableKey::Role(role) => {
                self.declared_count()?;
                self.role_slot(role)
                    .ok_or(GridError::RoleNotAssigned { role })
            }
        }
    }

    /// Declares the number of sample points of one variable.
    ///
    /// The variable's sample points are reallocated to `count` entries, all
    /// reading as NaN until set, and any coefficient table is discarded.
    ///
    /// # Errors
    ///
    /// - Any error of [`resolve`](Self::resolve).
    /// - [`GridError::EmptyVariable`] if `count` is zero.
    /// - [`GridError::AllocationFailed`] if `count` points cannot be allocated.
    pub fn set_point_count(
        &mut self,
        key: impl Into<VariableKey>,
        count: usize,
    ) -> Result<(), GridError> {
        let key = key.into();
        let slot = self.resolve(key)?;
        if count == 0 {
            return Err(GridError::EmptyVariable { key });
        }
        let points = filled(count, f64::NAN)?;
        log::debug!("declaring {count} sample points for {key}");
        self.samples[slot] = Some(points);
        self.table = None;
        Ok(())
    }

    /// Declares the point count of one variable and fills its sample points
    /// from `points`.
    ///
    /// # Errors
    ///
    /// Same as [`set_point_count`](Self::set_point_count), with `points.len()`
    /// as the count.
    pub fn set_samples(
        &mut self,
        key: impl Into<VariableKey>,
        points: &[f64],
    ) -> Result<(), GridError> {
        let key = key.into();
        self.set_point_count(key, points.len())?;
        let slot = self.resolve(key)?;
        if let Some(samples) = &mut self.samples[slot] {
            samples.copy_from_slice(points);
        }
        Ok(())
    }

    /// Returns the number of sample points of one variable.
    ///
    /// # Errors
    ///
    /// - Any error of [`resolve`](Self::resolve).
    /// - [`GridError::PointCountNotDeclared`] if the point count is not set.
    pub fn point_count(&self, key: impl Into<VariableKey>) -> Result<usize, GridError> {
        self.sample_points(key).map(<[f64]>::len)
    }

    /// Returns all sample points of one variable in index order.
    ///
    /// # Errors
    ///
    /// Same as [`point_count`](Self::point_count).
    pub fn sample_points(&self, key: impl Into<VariableKey>) -> Result<&[f64], GridError> {
        let slot = self.resolve(key)?;
        self.samples_of(slot)
    }

    /// Returns one sample point of one variable.
    ///
    /// # Errors
    ///
    /// - Any error of [`point_count`](Self::point_count).
    /// - [`GridError::SamplePositionOutOfRange`] if `position` is not in
    ///   `[0, point_count)`.
    pub fn sample_point(
        &self,
        key: impl Into<VariableKey>,
        position: usize,
    ) -> Result<f64, GridError> {
        let slot = self.resolve(key)?;
        let samples = self.samples_of(slot)?;
        samples
            .get(position)
            .copied()
            .ok_or(GridError::SamplePositionOutOfRange {
                slot,
                position,
                point_count: samples.len(),
            })
    }

    /// Sets one sample point of one variable.
    ///
    /// Each variable has its own storage: writing a point of one role never
    /// affects another role.
    ///
    /// # Errors
    ///
    /// Same as [`sample_point`](Self::sample_point).
    pub fn set_sample_point(
        &mut self,
        key: impl Into<VariableKey>,
        position: usize,
        value: f64,
    ) -> Result<(), GridError> {
        let slot = self.resolve(key)?;
        let samples = self.samples[slot]
            .as_mut()
            .ok_or(GridError::PointCountNotDeclared { slot })?;
        let point_count = samples.len();
        let sample = samples
            .get_mut(position)
            .ok_or(GridError::SamplePositionOutOfRange {
                slot,
                position,
                point_count,
            })?;
        *sample = value;
        Ok(())
    }

    /// Returns the point count of every slot, in slot order.
    ///
    /// # Errors
    ///
    /// - [`GridError::VariableCountNotDeclared`] before `set_variable_count`.
    /// - [`GridError::PointCountNotDeclared`] for the first slot whose point
    ///   count is missing.
    pub fn shape(&self) -> Result<Vec<usize>, GridError> {
        self.declared_count()?;
        self.samples
            .iter()
            .enumerate()
            .map(|(slot, samples)| {
                samples
                    .as_ref()
                    .map(Vec::len)
                    .ok_or(GridError::PointCountNotDeclared { slot })
            })
            .collect()
    }

    /// Returns `true` once every declared slot has a point count.
    #[must_use]
    pub fn is_shape_final(&self) -> bool {
        self.variable_count.is_some() && self.samples.iter().all(Option::is_some)
    }

    /// Returns the number of grid points, the product of all point counts.
    ///
    /// # Errors
    ///
    /// - Any error of [`shape`](Self::shape).
    /// - [`GridError::CaseCountOverflow`] if the product overflows.
    pub fn case_count(&self) -> Result<usize, GridError> {
        let shape = self.shape()?;
        checked_case_count(&shape).ok_or(GridError::CaseCountOverflow)
    }

    /// Converts an index tuple into its offset in the coefficient table.
    ///
    /// The mapping is row-major: the last slot varies fastest.
    ///
    /// # Errors
    ///
    /// - Any error of [`case_count`](Self::case_count).
    /// - [`GridError::IndexTupleLength`] if `indices` does not have one
    ///   component per variable.
    /// - [`GridError::SamplePositionOutOfRange`] for the first out-of-range
    ///   component.
    pub fn to_flat_index(&self, indices: &[usize]) -> Result<usize, GridError> {
        let shape = self.checked_shape()?;
        self.check_indices(&shape, indices)?;
        Ok(indices::compose(&shape, indices))
    }

    /// Converts a table offset back into its index tuple.
    ///
    /// # Errors
    ///
    /// - Any error of [`case_count`](Self::case_count).
    /// - [`GridError::OffsetOutOfRange`] if `offset >= case_count`.
    pub fn from_flat_index(&self, offset: usize) -> Result<Vec<usize>, GridError> {
        let shape = self.checked_shape()?;
        let case_count = checked_case_count(&shape).ok_or(GridError::CaseCountOverflow)?;
        if offset >= case_count {
            return Err(GridError::OffsetOutOfRange { offset, case_count });
        }
        Ok(indices::decompose(&shape, offset))
    }

    /// Returns an iterator over every index tuple in table order.
    ///
    /// # Errors
    ///
    /// Same as [`case_count`](Self::case_count).
    pub fn indices(&self) -> Result<GridIndices, GridError> {
        Ok(GridIndices::new(self.checked_shape()?))
    }

    /// Returns the sample value of every slot at one grid point, in slot order.
    ///
    /// # Errors
    ///
    /// Same as [`to_flat_index`](Self::to_flat_index).
    pub fn sample_values(&self, indices: &[usize]) -> Result<Vec<f64>, GridError> {
        self.to_flat_index(indices)?;
        Ok(self
            .samples
            .iter()
            .flatten()
            .zip(indices)
            .map(|(samples, &i)| samples[i])
            .collect())
    }

    /// Verifies that every slot holds finite, strictly monotonic sample points.
    ///
    /// Points may be increasing or decreasing; a single point is accepted.
    /// This is not enforced on write since points are filled one at a time.
    ///
    /// # Errors
    ///
    /// - Any error of [`shape`](Self::shape).
    /// - [`GridError::NotMonotonic`] for the first offending slot and position.
    pub fn check_monotonic(&self) -> Result<(), GridError> {
        self.shape()?;
        for (slot, samples) in self.samples.iter().flatten().enumerate() {
            if let Some(position) = samples.iter().position(|v| !v.is_finite()) {
                return Err(GridError::NotMonotonic { slot, position });
            }
            let increasing = samples.len() < 2 || samples[0] < samples[1];
            let breaks = samples.windows(2).position(|pair| {
                if increasing {
                    pair[0] >= pair[1]
                } else {
                    pair[0] <= pair[1]
                }
            });
            if let Some(position) = breaks {
                return Err(GridError::NotMonotonic {
                    slot,
                    position: position + 1,
                });
            }
        }
        Ok(())
    }

    /// Returns `true` if the coefficient table is allocated.
    #[must_use]
    pub fn is_table_allocated(&self) -> bool {
        self.table.is_some()
    }

    /// Allocates the coefficient table with one zero vector per grid point,
    /// replacing any previous table.
    ///
    /// # Errors
    ///
    /// - Any error of [`case_count`](Self::case_count).
    /// - [`GridError::AllocationFailed`] if the table cannot be allocated.
    pub fn allocate_table(&mut self) -> Result<(), GridError> {
        let case_count = self.case_count()?;
        let table = filled(case_count, CoefficientVector::zeros(self.arity))?;
        log::debug!("allocating coefficient table with {case_count} cases");
        self.table = Some(table);
        Ok(())
    }

    /// Replaces the coefficient table with `table`, ordered by flat offset.
    ///
    /// # Errors
    ///
    /// - Any error of [`case_count`](Self::case_count).
    /// - [`GridError::TableLengthMismatch`] if `table.len()` differs from the
    ///   case count.
    /// - [`GridError::ArityMismatch`] for the first vector of the wrong arity.
    pub fn set_table(&mut self, table: Vec<CoefficientVector>) -> Result<(), GridError> {
        let expected = self.case_count()?;
        if table.len() != expected {
            return Err(GridError::TableLengthMismatch {
                expected,
                actual: table.len(),
            });
        }
        for vector in &table {
            self.check_vector(vector)?;
        }
        self.table = Some(table);
        Ok(())
    }

    /// Discards the coefficient table and returns it, if allocated.
    pub fn take_table(&mut self) -> Option<Vec<CoefficientVector>> {
        self.table.take()
    }

    /// Returns the coefficient table ordered by flat offset.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::TableNotAllocated`] if no table is allocated.
    pub fn table(&self) -> Result<&[CoefficientVector], GridError> {
        self.table.as_deref().ok_or(GridError::TableNotAllocated)
    }

    /// Returns the stored coefficient vector of one grid point.
    ///
    /// # Errors
    ///
    /// - Any error of [`to_flat_index`](Self::to_flat_index).
    /// - [`GridError::TableNotAllocated`] if no table is allocated.
    pub fn coefficients_at(&self, indices: &[usize]) -> Result<&CoefficientVector, GridError> {
        let offset = self.to_flat_index(indices)?;
        Ok(&self.table()?[offset])
    }

    /// Stores the coefficient vector of one grid point.
    ///
    /// # Errors
    ///
    /// - [`GridError::ArityMismatch`] if `vector` has the wrong arity.
    /// - Any error of [`coefficients_at`](Self::coefficients_at).
    pub fn set_coefficients(
        &mut self,
        indices: &[usize],
        vector: CoefficientVector,
    ) -> Result<(), GridError> {
        self.check_vector(&vector)?;
        let offset = self.to_flat_index(indices)?;
        let table = self.table.as_mut().ok_or(GridError::TableNotAllocated)?;
        table[offset] = vector;
        Ok(())
    }

    fn declared_count(&self) -> Result<usize, GridError> {
        self.variable_count.ok_or(GridError::VariableCountNotDeclared)
    }

    fn check_slot(&self, slot: usize) -> Result<usize, GridError> {
        let variable_count = self.declared_count()?;
        if slot < variable_count {
            Ok(slot)
        } else {
            Err(GridError::SlotOutOfRange {
                slot,
                variable_count,
            })
        }
    }

    fn samples_of(&self, slot: usize) -> Result<&[f64], GridError> {
        self.samples[slot]
            .as_deref()
            .ok_or(GridError::PointCountNotDeclared { slot })
    }

    /// Shape whose case count is known to fit in `usize`.
    fn checked_shape(&self) -> Result<Vec<usize>, GridError> {
        let shape = self.shape()?;
        checked_case_count(&shape).ok_or(GridError::CaseCountOverflow)?;
        Ok(shape)
    }

    fn check_indices(&self, shape: &[usize], indices: &[usize]) -> Result<(), GridError> {
        if indices.len() != shape.len() {
            return Err(GridError::IndexTupleLength {
                expected: shape.len(),
                actual: indices.len(),
            });
        }
        for (slot, (&position, &point_count)) in indices.iter().zip(shape).enumerate() {
            if position >= point_count {
                return Err(GridError::SamplePositionOutOfRange {
                    slot,
                    position,
                    point_count,
                });
            }
        }
        Ok(())
    }

    fn check_vector(&self, vector: &CoefficientVector) -> Result<(), GridError> {
        if vector.arity() == self.arity {
            Ok(())
        } else {
            Err(GridError::ArityMismatch {
                expected: self.arity,
                actual: vector.arity(),
            })
        }
    }
}

fn filled<T: Clone>(count: usize, value: T) -> Result<Vec<T>, GridError> {
    let mut values = Vec::new();
    values
        .try_reserve_exact(count)
        .map_err(|_| GridError::AllocationFailed { count })?;
    values.resize(count, value);
    Ok(values)
}
