//! Lift and drag characteristics of the blade airfoil.

use std::fmt;

use ndarray::Array1;
use ninterp::{
    error::ValidateError,
    interpolator::Extrapolate,
    prelude::{Interp1DOwned, Interpolator},
    strategy::Linear,
};
use thiserror::Error;
use uom::si::{angle::radian, f64::Angle};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A lift or drag coefficient as a function of angle of attack.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AeroCurve {
    /// `intercept + slope * alpha`, with `alpha` in radians.
    Linear { slope: f64, intercept: f64 },
    /// Linear interpolation between measured samples.
    Empirical(EmpiricalCurve),
}

impl AeroCurve {
    #[must_use]
    pub const fn linear(slope: f64, intercept: f64) -> Self {
        Self::Linear { slope, intercept }
    }

    /// Evaluates the coefficient at `angle_of_attack`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::OutsideCurve`] if an empirical curve is queried
    /// outside its sampled range.
    pub fn coefficient(&self, angle_of_attack: Angle) -> Result<f64, DomainError> {
        self.at(angle_of_attack.get::<radian>())
    }

    /// Returns `(slope, intercept)` for a linear curve.
    #[must_use]
    pub fn linear_terms(&self) -> Option<(f64, f64)> {
        match *self {
            Self::Linear { slope, intercept } => Some((slope, intercept)),
            Self::Empirical(_) => None,
        }
    }

    pub(crate) fn at(&self, alpha: f64) -> Result<f64, DomainError> {
        match self {
            Self::Linear { slope, intercept } => Ok(intercept + slope * alpha),
            Self::Empirical(curve) => curve.at(alpha),
        }
    }
}

impl From<EmpiricalCurve> for AeroCurve {
    fn from(curve: EmpiricalCurve) -> Self {
        Self::Empirical(curve)
    }
}

/// Errors that can occur when building an [`EmpiricalCurve`].
#[derive(Debug, Error)]
pub enum CurveError {
    #[error("an empirical curve needs at least two samples, got {0}")]
    TooFewSamples(usize),

    #[error("sample {index} is not finite")]
    NonFinite { index: usize },

    #[error("sample {index}: angles of attack must be strictly increasing")]
    NotIncreasing { index: usize },

    #[error(transparent)]
    Interpolator(#[from] ValidateError),
}

/// Coefficient samples at strictly increasing angles of attack.
///
/// Queries outside `[first angle, last angle]` are errors rather than
/// extrapolations.
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CurveSamples"))]
pub struct EmpiricalCurve {
    angles: Vec<f64>,
    coefficients: Vec<f64>,
    interp: Interp1DOwned<f64, Linear>,
}

impl EmpiricalCurve {
    /// Builds a curve from `(angle of attack, coefficient)` samples.
    ///
    /// # Errors
    ///
    /// Returns a [`CurveError`] if fewer than two samples are given, any
    /// value is non-finite, or the angles are not strictly increasing.
    pub fn new(samples: impl IntoIterator<Item = (Angle, f64)>) -> Result<Self, CurveError> {
        let (angles, coefficients): (Vec<f64>, Vec<f64>) = samples
            .into_iter()
            .map(|(angle, coefficient)| (angle.get::<radian>(), coefficient))
            .unzip();
        Self::from_radians(angles, coefficients)
    }

    fn from_radians(angles: Vec<f64>, coefficients: Vec<f64>) -> Result<Self, CurveError> {
        if angles.len() < 2 || angles.len() != coefficients.len() {
            return Err(CurveError::TooFewSamples(angles.len().min(coefficients.len())));
        }
        for (index, (angle, coefficient)) in angles.iter().zip(&coefficients).enumerate() {
            if !angle.is_finite() || !coefficient.is_finite() {
                return Err(CurveError::NonFinite { index });
            }
        }
        if let Some(index) = angles.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(CurveError::NotIncreasing { index: index + 1 });
        }

        let interp = Interp1DOwned::new(
            Array1::from(angles.clone()),
            Array1::from(coefficients.clone()),
            Linear,
            Extrapolate::Error,
        )?;

        Ok(Self {
            angles,
            coefficients,
            interp,
        })
    }

    /// Returns the sampled angle-of-attack range.
    #[must_use]
    pub fn domain(&self) -> (Angle, Angle) {
        let (lower, upper) = self.bounds();
        (Angle::new::<radian>(lower), Angle::new::<radian>(upper))
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    /// Always false; a curve holds at least two samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    fn bounds(&self) -> (f64, f64) {
        // Construction guarantees at least two samples.
        (self.angles[0], self.angles[self.angles.len() - 1])
    }

    fn at(&self, alpha: f64) -> Result<f64, DomainError> {
        self.interp.interpolate(&[alpha]).map_err(|source| {
            let (lower, upper) = self.bounds();
            DomainError::OutsideCurve {
                angle: alpha,
                lower,
                upper,
                source,
            }
        })
    }
}

impl fmt::Debug for EmpiricalCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmpiricalCurve")
            .field("angles", &self.angles)
            .field("coefficients", &self.coefficients)
            .finish_non_exhaustive()
    }
}

/// Serialized form of an [`EmpiricalCurve`], angles in radians.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct CurveSamples {
    angles: Vec<f64>,
    coefficients: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<CurveSamples> for EmpiricalCurve {
    type Error = CurveError;

    fn try_from(samples: CurveSamples) -> Result<Self, Self::Error> {
        Self::from_radians(samples.angles, samples.coefficients)
    }
}

#[cfg(feature = "serde")]
impl Serialize for EmpiricalCurve {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CurveSamples {
            angles: self.angles.clone(),
            coefficients: self.coefficients.clone(),
        }
        .serialize(serializer)
    }
}
