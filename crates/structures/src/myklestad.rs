//! Myklestad transfer method for rotating, nonuniform cantilevers.
//!
//! Two free-end solutions are carried from the tip to the root for every
//! trial frequency: one with unit deflection and one with unit slope. A
//! clamped root needs a combination of the two with zero deflection and zero
//! slope, which exists where the composite residual
//! `y_A - y_B * (theta_A / theta_B)` vanishes. Scanning a frequency grid for
//! sign changes of that residual brackets the natural frequencies.
//!
//! The residual also changes sign where `theta_B` crosses zero. Those poles
//! are told apart from roots by the determinant `y_A * theta_B - y_B * theta_A`,
//! which only changes sign at roots.

mod transfer;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::{debug, warn};
use uom::si::{
    angular_velocity::radian_per_second,
    f64::{AngularVelocity, MassDensity},
    mass_density::kilogram_per_cubic_meter,
};
use windtk_solvers::{
    Residual,
    bisection::{self, Sign, Status},
    scan::{Grid, Sample, sign_changes},
};

use crate::{
    error::{InputError, MyklestadError},
    section::BeamSection,
};

use self::transfer::{Beam, Trial};

/// Trial frequencies `start + k * step` below `stop`, plus optional bracket refinement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyScan {
    grid: Grid,
    refine: Option<bisection::Config>,
}

impl FrequencyScan {
    /// Creates a scan that reports the upper frequency of each bracket.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Scan`] if the bounds are non-finite, `step <= 0`,
    /// or `start >= stop`.
    pub fn new(
        start: AngularVelocity,
        stop: AngularVelocity,
        step: AngularVelocity,
    ) -> Result<Self, InputError> {
        let grid = Grid::new(
            start.get::<radian_per_second>(),
            stop.get::<radian_per_second>(),
            step.get::<radian_per_second>(),
        )?;
        Ok(Self { grid, refine: None })
    }

    /// Bisects every accepted bracket down to the given tolerances.
    #[must_use]
    pub fn with_refinement(mut self, config: bisection::Config) -> Self {
        self.refine = Some(config);
        self
    }

    /// Returns the number of trial frequencies.
    #[must_use]
    pub fn trials(&self) -> usize {
        self.grid.len()
    }

    #[must_use]
    pub fn refinement(&self) -> Option<&bisection::Config> {
        self.refine.as_ref()
    }
}

/// A natural frequency located by the scan.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct NaturalFrequency {
    /// Upper trial frequency of the bracket, or the refined root.
    pub frequency: AngularVelocity,
    pub lower: AngularVelocity,
    pub upper: AngularVelocity,
    pub refined: bool,
}

/// Result of a full frequency scan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ModeScan {
    pub density: MassDensity,
    pub rotor_speed: AngularVelocity,
    pub modes: Vec<NaturalFrequency>,
    /// Sign changes rejected as poles of the residual.
    pub poles: usize,
}

/// Finds the natural frequencies of a rotating cantilever within
/// `[start, stop)`, reported as the upper trial frequency of each bracket.
///
/// # Errors
///
/// Returns [`MyklestadError::Input`] before any trial is evaluated if the
/// sections, density, rotor speed or scan are invalid, and
/// [`MyklestadError::SingularBoundary`] if a trial hits a singular root boundary.
pub fn find_natural_frequencies(
    sections: &[BeamSection],
    density: MassDensity,
    rotor_speed: AngularVelocity,
    start: AngularVelocity,
    stop: AngularVelocity,
    step: AngularVelocity,
) -> Result<Vec<AngularVelocity>, MyklestadError> {
    let scan = FrequencyScan::new(start, stop, step)?;
    let result = scan_beam(sections, density, rotor_speed, &scan)?;
    Ok(result.modes.iter().map(|mode| mode.frequency).collect())
}

/// Scans a rotating cantilever for natural frequencies.
///
/// `density` is the blade material density. It is validated and recorded
/// on the result; the section masses drive the recurrence.
///
/// # Errors
///
/// See [`find_natural_frequencies`]. Refinement failures are reported as
/// [`MyklestadError::Refinement`].
pub fn scan_beam(
    sections: &[BeamSection],
    density: MassDensity,
    rotor_speed: AngularVelocity,
    scan: &FrequencyScan,
) -> Result<ModeScan, MyklestadError> {
    let rho = density.get::<kilogram_per_cubic_meter>();
    if !rho.is_finite() || rho <= 0.0 {
        return Err(InputError::Density(rho).into());
    }
    let beam = Beam::new(sections, rotor_speed)?;
    let grid = &scan.grid;

    #[cfg(feature = "parallel")]
    let trials = (0..grid.len())
        .into_par_iter()
        .map(|k| beam.trial(grid.point(k)))
        .collect::<Result<Vec<_>, _>>()?;
    #[cfg(not(feature = "parallel"))]
    let trials = grid
        .points()
        .map(|frequency| beam.trial(frequency))
        .collect::<Result<Vec<_>, _>>()?;

    let samples: Vec<Sample> = trials
        .iter()
        .map(|trial| Sample {
            x: trial.frequency,
            residual: trial.residual,
        })
        .collect();

    let mut modes = Vec::new();
    let mut poles = 0;

    for change in sign_changes(&samples) {
        let [lower, upper] = change.bracket();
        if is_pole(&trials[change.index - 1], &trials[change.index]) {
            warn!(lower, upper, "boundary residual changes sign at a pole, skipping");
            poles += 1;
            continue;
        }

        let (frequency, refined) = match scan.refinement() {
            Some(config) => {
                let residual = BoundaryResidual { beam: &beam };
                let solution = bisection::solve_unobserved(&residual, [lower, upper], config)
                    .map_err(|source| MyklestadError::Refinement {
                        lower,
                        upper,
                        source,
                    })?;
                if !matches!(solution.status, Status::Converged) {
                    warn!(
                        lower,
                        upper,
                        iters = solution.iters,
                        "refinement stopped before converging"
                    );
                }
                (solution.x, true)
            }
            None => (upper, false),
        };
        debug!(lower, upper, frequency, refined, "natural frequency bracketed");

        modes.push(NaturalFrequency {
            frequency: AngularVelocity::new::<radian_per_second>(frequency),
            lower: AngularVelocity::new::<radian_per_second>(lower),
            upper: AngularVelocity::new::<radian_per_second>(upper),
            refined,
        });
    }

    Ok(ModeScan {
        density,
        rotor_speed,
        modes,
        poles,
    })
}

/// Evaluates the composite boundary residual at a single trial frequency.
///
/// # Errors
///
/// Returns [`MyklestadError::Input`] for invalid sections and
/// [`MyklestadError::SingularBoundary`] if the second solution has zero
/// slope at the root.
pub fn boundary_residual(
    sections: &[BeamSection],
    rotor_speed: AngularVelocity,
    frequency: AngularVelocity,
) -> Result<f64, MyklestadError> {
    let beam = Beam::new(sections, rotor_speed)?;
    Ok(beam.trial(frequency.get::<radian_per_second>())?.residual)
}

/// A residual sign change without a matching determinant sign change.
fn is_pole(lower: &Trial, upper: &Trial) -> bool {
    Sign::of(lower.determinant) == Sign::of(upper.determinant)
}

struct BoundaryResidual<'a> {
    beam: &'a Beam,
}

impl Residual for BoundaryResidual<'_> {
    type Error = MyklestadError;

    fn residual(&self, frequency: f64) -> Result<f64, Self::Error> {
        Ok(self.beam.trial(frequency)?.residual)
    }
}
