//! Reference quantities used to normalise forces and moments into coefficients.

use serde::{Deserialize, Serialize};

/// An invalid reference quantity.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum ReferenceError {
    /// The reference area is not a positive finite number.
    #[display("reference area must be positive and finite, got {_0}")]
    InvalidArea(#[error(not(source))] f64),
    /// The reference length is not a positive finite number.
    #[display("reference length must be positive and finite, got {_0}")]
    InvalidLength(#[error(not(source))] f64),
    /// A coordinate of the moment reference point is not finite.
    #[display("moment reference point must be finite, got {_0:?}")]
    InvalidMomentReferencePoint(#[error(not(source))] [f64; 3]),
}

/// Geometric reference quantities of a vehicle.
///
/// The coefficient grid itself never uses these; generation strategies need
/// them to turn raw forces and moments into dimensionless coefficients.
///
/// # Examples
///
/// ```
/// use aerocoef_core::ReferenceQuantities;
///
/// let reference = ReferenceQuantities::new(2.0, 1.5, [0.5, 0.0, 0.0])?;
/// assert_eq!(reference.area(), 2.0);
/// assert!(ReferenceQuantities::new(-1.0, 1.0, [0.0; 3]).is_err());
/// # Ok::<(), aerocoef_core::ReferenceError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawReferenceQuantities")]
pub struct ReferenceQuantities {
    area: f64,
    length: f64,
    moment_reference_point: [f64; 3],
}

impl ReferenceQuantities {
    /// Creates validated reference quantities.
    ///
    /// # Errors
    ///
    /// Returns a [`ReferenceError`] if `area` or `length` is not positive and
    /// finite, or if the moment reference point has a non-finite coordinate.
    pub fn new(
        area: f64,
        length: f64,
        moment_reference_point: [f64; 3],
    ) -> Result<Self, ReferenceError> {
        if !(area.is_finite() && area > 0.0) {
            return Err(ReferenceError::InvalidArea(area));
        }
        if !(length.is_finite() && length > 0.0) {
            return Err(ReferenceError::InvalidLength(length));
        }
        if !moment_reference_point.iter().all(|c| c.is_finite()) {
            return Err(ReferenceError::InvalidMomentReferencePoint(
                moment_reference_point,
            ));
        }
        Ok(Self {
            area,
            length,
            moment_reference_point,
        })
    }

    /// Reference area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Reference length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Point about which moment coefficients are taken.
    #[must_use]
    pub fn moment_reference_point(&self) -> [f64; 3] {
        self.moment_reference_point
    }
}

#[derive(Deserialize)]
struct RawReferenceQuantities {
    area: f64,
    length: f64,
    moment_reference_point: [f64; 3],
}

impl TryFrom<RawReferenceQuantities> for ReferenceQuantities {
    type Error = ReferenceError;

    fn try_from(raw: RawReferenceQuantities) -> Result<Self, Self::Error> {
        Self::new(raw.area, raw.length, raw.moment_reference_point)
    }
}
