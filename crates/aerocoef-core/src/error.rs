//! Error types reported by grid operations.

use crate::{IndependentVariable, VariableKey};

/// A contract violation reported by a [`CoefficientGrid`](crate::CoefficientGrid)
/// or a [`CoefficientSource`](crate::CoefficientSource).
///
/// Errors fall into two groups:
///
/// - **shape-contract violations**: a slot, role, sample position, index tuple,
///   table length or coefficient arity that does not match the declared shape;
/// - **ordering violations**: an operation called before the state it depends
///   on was declared (variable count, point counts, coefficient table).
///
/// Operations returning an error leave the grid unmodified.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum GridError {
    /// The requested variable count exceeds the number of reserved roles.
    #[display("variable count {count} exceeds the maximum of {max}")]
    VariableCountTooLarge {
        /// Requested count.
        count: usize,
        /// Maximum supported count.
        max: usize,
    },
    /// A per-variable operation was called before `set_variable_count`.
    #[display("variable count has not been declared")]
    VariableCountNotDeclared,
    /// A slot index is not in `[0, variable_count)`.
    #[display("slot {slot} is out of range for {variable_count} variables")]
    SlotOutOfRange {
        /// Requested slot.
        slot: usize,
        /// Declared variable count.
        variable_count: usize,
    },
    /// A role was used before being assigned to a slot.
    #[display("{role} has not been assigned to a slot")]
    RoleNotAssigned {
        /// The unassigned role.
        role: IndependentVariable,
    },
    /// A slot is already mapped to another role.
    #[display("slot {slot} is already assigned to {assigned}")]
    SlotAlreadyAssigned {
        /// Requested slot.
        slot: usize,
        /// Role currently occupying the slot.
        assigned: IndependentVariable,
    },
    /// A serialized grid maps the same role onto more than one slot.
    #[display("{role} is assigned to more than one slot")]
    DuplicateRole {
        /// The duplicated role.
        role: IndependentVariable,
    },
    /// A variable was declared with zero sample points.
    #[display("{key} must have at least one sample point")]
    EmptyVariable {
        /// The variable being declared.
        key: VariableKey,
    },
    /// The point count of a slot has not been declared yet.
    #[display("point count of slot {slot} has not been declared")]
    PointCountNotDeclared {
        /// Slot without a point count.
        slot: usize,
    },
    /// A sample position is not in `[0, point_count)`.
    #[display("sample position {position} is out of range for slot {slot} with {point_count} points")]
    SamplePositionOutOfRange {
        /// Slot being accessed.
        slot: usize,
        /// Requested position.
        position: usize,
        /// Declared point count of the slot.
        point_count: usize,
    },
    /// An index tuple does not have one component per declared variable.
    #[display("index tuple has {actual} components, expected {expected}")]
    IndexTupleLength {
        /// Declared variable count.
        expected: usize,
        /// Length of the supplied tuple.
        actual: usize,
    },
    /// A flat offset is not in `[0, case_count)`.
    #[display("flat offset {offset} is out of range for {case_count} cases")]
    OffsetOutOfRange {
        /// Requested offset.
        offset: usize,
        /// Number of cases in the grid.
        case_count: usize,
    },
    /// Storage for sample points or the coefficient table could not be allocated.
    #[display("cannot allocate storage for {count} entries")]
    AllocationFailed {
        /// Requested number of entries.
        count: usize,
    },
    /// The product of point counts does not fit in `usize`.
    #[display("case count overflows")]
    CaseCountOverflow,
    /// A coefficient table was supplied whose length differs from the case count.
    #[display("coefficient table has {actual} entries, expected {expected}")]
    TableLengthMismatch {
        /// Case count of the grid.
        expected: usize,
        /// Supplied table length.
        actual: usize,
    },
    /// The coefficient table was read before it was allocated.
    #[display("coefficient table has not been allocated")]
    TableNotAllocated,
    /// A coefficient vector does not have the grid's arity.
    #[display("coefficient vector has {actual} components, expected {expected}")]
    ArityMismatch {
        /// Arity of the grid.
        expected: usize,
        /// Arity of the supplied vector.
        actual: usize,
    },
    /// A coefficient arity outside `1..=CoefficientVector::MAX_ARITY`.
    #[display("coefficient arity {arity} is not in 1..={max}")]
    InvalidArity {
        /// Requested arity.
        arity: usize,
        /// Largest supported arity.
        max: usize,
    },
    /// A strategy computing coefficients on demand failed at a grid point.
    #[display("coefficient evaluation failed: {message}")]
    EvaluationFailed {
        /// Description of the failure.
        message: String,
    },
    /// A snapshot would hold a NaN or infinite sample point.
    #[display("sample point {position} of slot {slot} is not finite")]
    NonFiniteSamplePoint {
        /// Offending slot.
        slot: usize,
        /// Offending position.
        position: usize,
    },
    /// A snapshot would hold a NaN or infinite coefficient.
    #[display("coefficient vector at flat offset {offset} is not finite")]
    NonFiniteCoefficient {
        /// Flat offset of the offending vector.
        offset: usize,
    },
    /// The sample points of a slot are not strictly monotonic.
    #[display("sample points of slot {slot} are not strictly monotonic at position {position}")]
    NotMonotonic {
        /// Offending slot.
        slot: usize,
        /// First position breaking monotonicity (or holding a non-finite value).
        position: usize,
    },
}

impl GridError {
    /// Returns `true` if the error is an ordering violation, i.e. an operation
    /// was called before the state it depends on had been declared.
    ///
    /// ```
    /// use aerocoef_core::GridError;
    ///
    /// assert!(GridError::TableNotAllocated.is_ordering_violation());
    /// assert!(!GridError::CaseCountOverflow.is_ordering_violation());
    /// ```
    #[must_use]
    pub fn is_ordering_violation(&self) -> bool {
        matches!(
            self,
            Self::VariableCountNotDeclared
                | Self::RoleNotAssigned { .. }
                | Self::PointCountNotDeclared { .. }
                | Self::TableNotAllocated
        )
    }
}
