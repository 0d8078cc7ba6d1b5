//! Closed-form bending frequencies of a uniform cantilever.

use std::{convert::Infallible, f64::consts::PI};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uom::si::{
    angular_velocity::radian_per_second,
    f64::{AngularVelocity, Length, LinearMassDensity, Mass},
    length::meter,
    linear_mass_density::kilogram_per_meter,
};
use windtk_solvers::bisection;

use crate::{
    error::{EulerError, InputError},
    section::BeamSection,
    units::FlexuralRigidity,
};

/// Returns the `mode`-th positive root `(beta L)` of `cosh x cos x + 1 = 0`.
///
/// The root is bracketed in `[(mode - 1) pi, mode pi]` and solved on the
/// equivalent, bounded form `cos x + 1 / cosh x = 0`.
///
/// # Errors
///
/// Returns [`InputError::Mode`] for `mode == 0`.
pub fn characteristic_root(mode: usize) -> Result<f64, EulerError> {
    if mode == 0 {
        return Err(InputError::Mode.into());
    }
    #[allow(clippy::cast_precision_loss)]
    let upper = mode as f64 * PI;
    let residual = |x: f64| Ok::<_, Infallible>(x.cos() + 1.0 / x.cosh());

    bisection::solve_unobserved(&residual, [upper - PI, upper], &bisection::Config::default())
        .map(|solution| solution.x)
        .map_err(|source| EulerError::Root { mode, source })
}

/// A cantilever with constant cross-section.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UniformBeam {
    pub length: Length,
    pub linear_density: LinearMassDensity,
    pub stiffness: FlexuralRigidity,
}

/// One Euler bending mode.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EulerMode {
    pub mode: usize,
    /// Dimensionless root `(beta L)`.
    pub beta_l: f64,
    /// `beta`, in 1/m.
    pub wavenumber: f64,
    pub frequency: AngularVelocity,
}

impl UniformBeam {
    /// Natural frequency `(beta L)^2 sqrt(EI / mu) / L^2` of the given mode.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] for `mode == 0` or non-physical beam properties.
    pub fn natural_frequency(&self, mode: usize) -> Result<EulerMode, EulerError> {
        let (length, density, stiffness) = self.validated()?;
        let beta_l = characteristic_root(mode)?;

        let omega = beta_l * beta_l * (stiffness / density).sqrt() / (length * length);
        Ok(EulerMode {
            mode,
            beta_l,
            wavenumber: beta_l / length,
            frequency: AngularVelocity::new::<radian_per_second>(omega),
        })
    }

    /// Splits the beam into `count` equal lumped-mass sections.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NoSections`] for `count == 0`, or an error for
    /// non-physical beam properties.
    pub fn sections(&self, count: usize) -> Result<Vec<BeamSection>, InputError> {
        if count == 0 {
            return Err(InputError::NoSections);
        }
        self.validated()?;

        #[allow(clippy::cast_precision_loss)]
        let length = self.length / count as f64;
        let mass: Mass = self.linear_density * length;
        Ok(vec![BeamSection::new(length, mass, self.stiffness); count])
    }

    fn validated(&self) -> Result<(f64, f64, f64), InputError> {
        let length = self.length.get::<meter>();
        let density = self.linear_density.get::<kilogram_per_meter>();
        let stiffness = self.stiffness.value;

        if !length.is_finite() || length <= 0.0 {
            return Err(InputError::Length {
                index: 0,
                value: length,
            });
        }
        if !density.is_finite() || density <= 0.0 {
            return Err(InputError::Mass {
                index: 0,
                value: density,
            });
        }
        if !stiffness.is_finite() || stiffness <= 0.0 {
            return Err(InputError::Stiffness {
                index: 0,
                value: stiffness,
            });
        }
        Ok((length, density, stiffness))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::mass::kilogram;

    use crate::units::flexural_rigidity;

    fn beam() -> UniformBeam {
        UniformBeam {
            length: Length::new::<meter>(10.0),
            linear_density: LinearMassDensity::new::<kilogram_per_meter>(10.0),
            stiffness: flexural_rigidity(1e6),
        }
    }

    #[test]
    fn characteristic_roots_match_tabulated_values() {
        let expected = [1.875_104_068_7, 4.694_091_133_0, 7.854_757_438_2, 10.995_540_734_9];

        for (mode, value) in (1..).zip(expected) {
            assert_relative_eq!(characteristic_root(mode).unwrap(), value, epsilon = 1e-9);
        }
    }

    #[test]
    fn higher_roots_approach_odd_half_multiples_of_pi() {
        let root = characteristic_root(8).unwrap();

        assert_relative_eq!(root, 7.5 * PI, epsilon = 1e-6);
    }

    #[test]
    fn first_mode_frequency() {
        let mode = beam().natural_frequency(1).unwrap();

        // sqrt(EI / mu) / L^2 = sqrt(1e5) / 100
        let expected = 1.875_104_068_7_f64.powi(2) * 1e5_f64.sqrt() / 100.0;
        assert_relative_eq!(
            mode.frequency.get::<radian_per_second>(),
            expected,
            max_relative = 1e-9
        );
        assert_relative_eq!(mode.wavenumber, 0.187_510_406_87, epsilon = 1e-9);
    }

    #[test]
    fn mode_zero_is_invalid() {
        assert!(matches!(
            characteristic_root(0),
            Err(EulerError::Input(InputError::Mode))
        ));
        assert!(matches!(
            beam().natural_frequency(0),
            Err(EulerError::Input(InputError::Mode))
        ));
    }

    #[test]
    fn discretizes_into_equal_sections() {
        let sections = beam().sections(4).unwrap();

        assert_eq!(sections.len(), 4);
        for section in &sections {
            assert_relative_eq!(section.length.get::<meter>(), 2.5);
            assert_relative_eq!(section.mass.get::<kilogram>(), 25.0);
        }
        assert!(matches!(beam().sections(0), Err(InputError::NoSections)));
    }
}
