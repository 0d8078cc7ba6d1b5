//! Station-by-station transfer of the beam state from tip to root.

use uom::si::{
    angular_velocity::radian_per_second, f64::AngularVelocity, length::meter, mass::kilogram,
};

use crate::{
    error::{InputError, MyklestadError},
    section::BeamSection,
};

/// Massless field between two stations, in SI units.
#[derive(Debug, Clone, Copy)]
struct Field {
    length: f64,
    mass: f64,
    stiffness: f64,
    /// Centrifugal force carried by the field.
    tension: f64,
}

/// State of one trial solution at a station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TrialSolution {
    pub(crate) slope: f64,
    pub(crate) deflection: f64,
    pub(crate) centrifugal_force: f64,
    pub(crate) shear: f64,
    pub(crate) bending_moment: f64,
}

impl TrialSolution {
    /// Free-end state with the given slope and deflection.
    fn free_end(slope: f64, deflection: f64) -> Self {
        Self {
            slope,
            deflection,
            centrifugal_force: 0.0,
            shear: 0.0,
            bending_moment: 0.0,
        }
    }
}

/// Composite boundary residual and its pole-free counterpart at one trial frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Trial {
    pub(crate) frequency: f64,
    pub(crate) residual: f64,
    /// `y_A * theta_B - y_B * theta_A`, the residual scaled by `theta_B`.
    pub(crate) determinant: f64,
}

/// A validated beam spinning at a fixed rotor speed.
#[derive(Debug, Clone)]
pub(crate) struct Beam {
    fields: Vec<Field>,
}

impl Beam {
    /// Validates the sections and accumulates the centrifugal force.
    ///
    /// Each station's distance from the rotation axis is half the first
    /// section's length plus the lengths of the sections after it.
    pub(crate) fn new(
        sections: &[BeamSection],
        rotor_speed: AngularVelocity,
    ) -> Result<Self, InputError> {
        if sections.is_empty() {
            return Err(InputError::NoSections);
        }
        let speed = rotor_speed.get::<radian_per_second>();
        if !speed.is_finite() {
            return Err(InputError::RotorSpeed(speed));
        }

        let mut fields = Vec::with_capacity(sections.len());
        let mut distance = 0.0;
        let mut tension = 0.0;

        for (index, section) in sections.iter().enumerate() {
            let length = section.length.get::<meter>();
            let mass = section.mass.get::<kilogram>();
            let stiffness = section.stiffness.value;

            if !length.is_finite() || length <= 0.0 {
                return Err(InputError::Length {
                    index,
                    value: length,
                });
            }
            if !mass.is_finite() || mass < 0.0 {
                return Err(InputError::Mass { index, value: mass });
            }
            if !stiffness.is_finite() || stiffness <= 0.0 {
                return Err(InputError::Stiffness {
                    index,
                    value: stiffness,
                });
            }

            distance = if index == 0 {
                length / 2.0
            } else {
                distance + length
            };
            tension += speed * speed * mass * distance;

            let denominator = 1.0 - tension * length * length / (2.0 * stiffness);
            if denominator.abs() <= f64::EPSILON || !denominator.is_finite() {
                return Err(InputError::MomentTransfer { index });
            }

            fields.push(Field {
                length,
                mass,
                stiffness,
                tension,
            });
        }

        Ok(Self { fields })
    }

    /// Carries `tip` from the free end to the clamped root at `frequency` rad/s.
    ///
    /// Shear is taken normal to the undeformed axis, so it only collects the
    /// inertia loads `m * omega^2 * y`. The centrifugal tension acts along
    /// the axis and enters through the `T * theta * L` term of the moment.
    pub(crate) fn propagate(&self, frequency: f64, tip: TrialSolution) -> TrialSolution {
        let omega_squared = frequency * frequency;

        self.fields.iter().fold(tip, |state, field| {
            let Field {
                length: l,
                mass,
                stiffness: ei,
                tension,
            } = *field;

            let shear = state.shear + mass * omega_squared * state.deflection;
            let moment = (state.bending_moment
                + shear * l
                + tension * (state.slope * l - shear * l.powi(3) / (3.0 * ei)))
                / (1.0 - tension * l * l / (2.0 * ei));
            let slope = state.slope + moment * l / ei - shear * l * l / (2.0 * ei);
            let deflection = state.deflection + state.slope * l + moment * l * l / (2.0 * ei)
                - shear * l.powi(3) / (3.0 * ei);

            TrialSolution {
                slope,
                deflection,
                centrifugal_force: tension,
                shear,
                bending_moment: moment,
            }
        })
    }

    /// Evaluates the root boundary residual at `frequency` rad/s.
    pub(crate) fn trial(&self, frequency: f64) -> Result<Trial, MyklestadError> {
        let a = self.propagate(frequency, TrialSolution::free_end(0.0, 1.0));
        let b = self.propagate(frequency, TrialSolution::free_end(1.0, 0.0));
        combine(frequency, &a, &b)
    }
}

/// Combines two independent root states into the clamped-root residual.
fn combine(frequency: f64, a: &TrialSolution, b: &TrialSolution) -> Result<Trial, MyklestadError> {
    if b.slope == 0.0 {
        return Err(MyklestadError::SingularBoundary { frequency });
    }
    let residual = a.deflection - b.deflection * (a.slope / b.slope);
    if !residual.is_finite() {
        return Err(MyklestadError::SingularBoundary { frequency });
    }

    Ok(Trial {
        frequency,
        residual,
        determinant: a.deflection * b.slope - b.deflection * a.slope,
    })
}
