//! Modified Newtonian impact theory for an inclined flat plate.
//!
//! The windward side of the plate sees the pressure coefficient
//! `Cp = Cp_max * sin²θ`, where `θ` is the local inclination of the flow to the
//! plate, and the leeward side sees `Cp = 0`. `Cp_max` is the stagnation
//! pressure coefficient behind a normal shock at the free-stream Mach number,
//! or 2 (classical Newtonian flow) when the grid has no Mach number.
//!
//! The plate lies in the body x-y plane with its normal along body z. Angles
//! are in degrees.

use aerocoef_core::{CoefficientVector, IndependentVariable, ReferenceError, ReferenceQuantities};

use crate::{CaseEvaluator, EvaluationError, FlowCondition};

/// Ratio of specific heats of air.
pub const AIR_RATIO_OF_SPECIFIC_HEATS: f64 = 1.4;

/// Flat-plate strategy producing `[C_D, C_S, C_L, C_l, C_m, C_n]`.
///
/// Force coefficients are in wind axes (drag, side force, lift), moment
/// coefficients in body axes about the reference point (roll, pitch, yaw).
/// The pressure resultant acts at the plate centroid.
///
/// Requires the angle of attack; Mach number and angle of sideslip are used
/// when present. The Reynolds number is ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewtonianFlatPlate {
    plate_area: f64,
    centroid: [f64; 3],
    reference: ReferenceQuantities,
    ratio_of_specific_heats: f64,
}

impl NewtonianFlatPlate {
    /// Creates a plate of `plate_area` whose pressure resultant acts at
    /// `centroid`, normalised by `reference`.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::InvalidArea`] if `plate_area` is not positive
    /// and finite, and [`ReferenceError::InvalidMomentReferencePoint`] if the
    /// centroid is not finite.
    pub fn new(
        plate_area: f64,
        centroid: [f64; 3],
        reference: ReferenceQuantities,
    ) -> Result<Self, ReferenceError> {
        if !(plate_area.is_finite() && plate_area > 0.0) {
            return Err(ReferenceError::InvalidArea(plate_area));
        }
        if !centroid.iter().all(|c| c.is_finite()) {
            return Err(ReferenceError::InvalidMomentReferencePoint(centroid));
        }
        Ok(Self {
            plate_area,
            centroid,
            reference,
            ratio_of_specific_heats: AIR_RATIO_OF_SPECIFIC_HEATS,
        })
    }

    /// Returns this plate using `gamma` as the ratio of specific heats.
    ///
    /// # Panics
    ///
    /// Panics if `gamma` is not greater than 1.
    #[must_use]
    pub fn with_ratio_of_specific_heats(mut self, gamma: f64) -> Self {
        assert!(gamma > 1.0, "Ratio of specific heats must exceed 1, got {gamma}");
        self.ratio_of_specific_heats = gamma;
        self
    }

    /// Returns the reference quantities.
    #[must_use]
    pub fn reference(&self) -> &ReferenceQuantities {
        &self.reference
    }

    /// Stagnation pressure coefficient behind a normal shock (Rayleigh pitot
    /// formula).
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::OutOfDomain`] unless `mach > 1`.
    pub fn stagnation_pressure_coefficient(&self, mach: f64) -> Result<f64, EvaluationError> {
        if !(mach.is_finite() && mach > 1.0) {
            return Err(EvaluationError::OutOfDomain {
                role: IndependentVariable::MachNumber,
                value: mach,
                reason: "modified Newtonian flow requires supersonic Mach numbers",
            });
        }
        let g = self.ratio_of_specific_heats;
        let m2 = mach * mach;
        let pitot = ((g + 1.0).powi(2) * m2 / (4.0 * g * m2 - 2.0 * (g - 1.0))).powf(g / (g - 1.0))
            * (1.0 - g + 2.0 * g * m2)
            / (g + 1.0);
        Ok(2.0 / (g * m2) * (pitot - 1.0))
    }
}

impl CaseEvaluator for NewtonianFlatPlate {
    fn name(&self) -> &'static str {
        "Newtonian flat plate"
    }

    fn arity(&self) -> usize {
        6
    }

    fn evaluate(&self, condition: &FlowCondition) -> Result<CoefficientVector, EvaluationError> {
        let alpha = condition
            .require(IndependentVariable::AngleOfAttack)?
            .to_radians();
        let beta = condition.angle_of_sideslip().unwrap_or(0.0).to_radians();
        let cp_max = match condition.mach_number() {
            Some(mach) => self.stagnation_pressure_coefficient(mach)?,
            None => 2.0,
        };

        // Component of the free-stream velocity normal to the plate.
        let sin_theta = alpha.sin() * beta.cos();
        let normal = cp_max * sin_theta * sin_theta.abs() * self.plate_area / self.reference.area();

        // Body-axis force coefficients; the normal force acts along -z.
        let cz = -normal;

        let drag = alpha.sin() * beta.cos() * normal;
        let side = alpha.sin() * beta.sin() * normal;
        let lift = alpha.cos() * normal;

        let reference_point = self.reference.moment_reference_point();
        let dx = self.centroid[0] - reference_point[0];
        let dy = self.centroid[1] - reference_point[1];
        let length = self.reference.length();
        let roll = dy * cz / length;
        let pitch = -dx * cz / length;

        let mut coefficients = CoefficientVector::zeros(self.arity());
        coefficients
            .as_mut_slice()
            .copy_from_slice(&[drag, side, lift, roll, pitch, 0.0]);
        Ok(coefficients)
    }
}
