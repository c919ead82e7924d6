//! Independent flow variables and the keys used to address grid slots.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// An independent flow variable with a reserved semantic role.
///
/// A [`CoefficientGrid`](crate::CoefficientGrid) stores its sample points in
/// numbered slots. Each role is mapped onto one of those slots at setup time
/// with [`CoefficientGrid::assign_role`](crate::CoefficientGrid::assign_role).
///
/// # Examples
///
/// ```
/// use aerocoef_core::IndependentVariable;
///
/// assert_eq!(IndependentVariable::ALL.len(), 4);
/// assert_eq!(IndependentVariable::MachNumber.to_string(), "Mach number");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndependentVariable {
    /// Free-stream Mach number.
    MachNumber,
    /// Angle of attack.
    AngleOfAttack,
    /// Angle of sideslip.
    AngleOfSideslip,
    /// Reynolds number.
    ReynoldsNumber,
}

impl IndependentVariable {
    /// Number of reserved roles, and the maximum number of slots in a grid.
    pub const COUNT: usize = 4;

    /// Array containing all roles in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::MachNumber,
        Self::AngleOfAttack,
        Self::AngleOfSideslip,
        Self::ReynoldsNumber,
    ];

    /// Returns the position of this role in [`IndependentVariable::ALL`].
    #[must_use]
    pub const fn ordinal(self) -> usize {
        match self {
            Self::MachNumber => 0,
            Self::AngleOfAttack => 1,
            Self::AngleOfSideslip => 2,
            Self::ReynoldsNumber => 3,
        }
    }

    /// Returns a human-readable name of the role.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MachNumber => "Mach number",
            Self::AngleOfAttack => "angle of attack",
            Self::AngleOfSideslip => "angle of sideslip",
            Self::ReynoldsNumber => "Reynolds number",
        }
    }
}

impl Display for IndependentVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Addresses one variable slot of a grid, either directly or through a role.
///
/// Most grid accessors take `impl Into<VariableKey>`, so both a raw slot
/// index and an [`IndependentVariable`] can be passed.
///
/// ```
/// use aerocoef_core::{IndependentVariable, VariableKey};
///
/// assert_eq!(VariableKey::from(2_usize), VariableKey::Slot(2));
/// assert_eq!(
///     VariableKey::from(IndependentVariable::AngleOfAttack),
///     VariableKey::Role(IndependentVariable::AngleOfAttack),
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::From)]
pub enum VariableKey {
    /// A raw slot index.
    Slot(usize),
    /// A role that resolves to its assigned slot.
    Role(IndependentVariable),
}

impl Display for VariableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slot(slot) => write!(f, "slot {slot}"),
            Self::Role(role) => Display::fmt(role, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_matches_all() {
        for (i, role) in IndependentVariable::ALL.into_iter().enumerate() {
            assert_eq!(role.ordinal(), i);
        }
    }

    #[test]
    fn test_key_display() {
        assert_eq!(VariableKey::Slot(3).to_string(), "slot 3");
        assert_eq!(
            VariableKey::Role(IndependentVariable::ReynoldsNumber).to_string(),
            "Reynolds number"
        );
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&IndependentVariable::AngleOfSideslip).unwrap();
        assert_eq!(json, "\"angle_of_sideslip\"");
    }
}
