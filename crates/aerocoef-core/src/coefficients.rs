//! Fixed-arity aerodynamic coefficient vectors.

use std::{
    fmt::{self, Display},
    ops::Index,
};

use serde::{Deserialize, Serialize};
use tinyvec::ArrayVec;

use crate::GridError;

/// The small set of aerodynamic coefficients associated with one grid point.
///
/// A vector holds between 1 and [`CoefficientVector::MAX_ARITY`] components
/// (three force and three moment coefficients at most), stored inline.
/// The meaning and order of the components is a convention of the strategy
/// that produced them.
///
/// # Examples
///
/// ```
/// use aerocoef_core::CoefficientVector;
///
/// let v = CoefficientVector::from_slice(&[0.02, 0.0, 0.35]).unwrap();
/// assert_eq!(v.arity(), 3);
/// assert_eq!(v[2], 0.35);
/// assert!(CoefficientVector::from_slice(&[0.0; 7]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<f64>", try_from = "Vec<f64>")]
pub struct CoefficientVector {
    components: ArrayVec<[f64; CoefficientVector::MAX_ARITY]>,
}

impl CoefficientVector {
    /// Largest number of components a vector can hold.
    pub const MAX_ARITY: usize = 6;

    /// Creates a vector of `arity` zero components.
    ///
    /// # Panics
    ///
    /// Panics if `arity` is not in `1..=MAX_ARITY`.
    #[must_use]
    pub fn zeros(arity: usize) -> Self {
        assert!(
            (1..=Self::MAX_ARITY).contains(&arity),
            "Coefficient arity must be 1-{}, got {arity}",
            Self::MAX_ARITY
        );
        let mut components = ArrayVec::new();
        components.resize(arity, 0.0);
        Self { components }
    }

    /// Creates a vector from a slice of components.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidArity`] if the slice is empty or longer than
    /// [`CoefficientVector::MAX_ARITY`].
    pub fn from_slice(components: &[f64]) -> Result<Self, GridError> {
        check_arity(components.len())?;
        Ok(Self {
            components: components.iter().copied().collect(),
        })
    }

    /// Returns the number of components.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.components.len()
    }

    /// Returns the components as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        self.components.as_slice()
    }

    /// Returns a mutable view of the components.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        self.components.as_mut_slice()
    }

    /// Returns an iterator over the components.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.components.iter().copied()
    }
}

/// Validates a coefficient arity.
pub(crate) fn check_arity(arity: usize) -> Result<(), GridError> {
    if (1..=CoefficientVector::MAX_ARITY).contains(&arity) {
        Ok(())
    } else {
        Err(GridError::InvalidArity {
            arity,
            max: CoefficientVector::MAX_ARITY,
        })
    }
}

impl Index<usize> for CoefficientVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.components[index]
    }
}

impl<const N: usize> TryFrom<[f64; N]> for CoefficientVector {
    type Error = GridError;

    fn try_from(components: [f64; N]) -> Result<Self, GridError> {
        Self::from_slice(&components)
    }
}

impl TryFrom<Vec<f64>> for CoefficientVector {
    type Error = GridError;

    fn try_from(components: Vec<f64>) -> Result<Self, GridError> {
        Self::from_slice(&components)
    }
}

impl From<CoefficientVector> for Vec<f64> {
    fn from(vector: CoefficientVector) -> Self {
        vector.components.to_vec()
    }
}

impl Display for CoefficientVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, c) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            Display::fmt(&c, f)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let v = CoefficientVector::zeros(4);
        assert_eq!(v.as_slice(), &[0.0; 4]);
    }

    #[test]
    #[should_panic(expected = "Coefficient arity must be 1-6, got 0")]
    fn test_zeros_rejects_zero_arity() {
        let _ = CoefficientVector::zeros(0);
    }

    #[test]
    fn test_from_slice_bounds() {
        assert_eq!(
            CoefficientVector::from_slice(&[]),
            Err(GridError::InvalidArity { arity: 0, max: 6 })
        );
        assert!(CoefficientVector::from_slice(&[1.0; 6]).is_ok());
        assert_eq!(
            CoefficientVector::from_slice(&[1.0; 7]),
            Err(GridError::InvalidArity { arity: 7, max: 6 })
        );
    }

    #[test]
    fn test_display() {
        let v = CoefficientVector::try_from([0.5, -1.25]).unwrap();
        assert_eq!(v.to_string(), "[0.5, -1.25]");
    }

    #[test]
    fn test_serde_as_plain_list() {
        let v = CoefficientVector::try_from([0.1, 0.2, 0.3]).unwrap();
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[0.1,0.2,0.3]");
        let back: CoefficientVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
        assert!(serde_json::from_str::<CoefficientVector>("[]").is_err());
    }
}
