use thiserror::Error;
use windtk_solvers::{bisection, scan::GridError};

/// Malformed beam, rotor or scan parameters.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum InputError {
    #[error("a beam needs at least one section")]
    NoSections,

    #[error("section {index}: length must be finite and positive, got {value} m")]
    Length { index: usize, value: f64 },

    #[error("section {index}: mass must be finite and non-negative, got {value} kg")]
    Mass { index: usize, value: f64 },

    #[error("section {index}: stiffness must be finite and positive, got {value} N·m²")]
    Stiffness { index: usize, value: f64 },

    #[error("density must be finite and positive, got {0} kg/m³")]
    Density(f64),

    #[error("rotor speed must be finite, got {0} rad/s")]
    RotorSpeed(f64),

    #[error("section {index}: centrifugal force makes the moment transfer singular")]
    MomentTransfer { index: usize },

    #[error("invalid frequency scan: {0}")]
    Scan(#[from] GridError),

    #[error("mode numbers start at 1")]
    Mode,
}

/// Failure of a Myklestad frequency search.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MyklestadError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("root boundary is singular at {frequency} rad/s (slope of the second solution vanishes)")]
    SingularBoundary { frequency: f64 },

    #[error("refining the bracket [{lower}, {upper}] rad/s failed")]
    Refinement {
        lower: f64,
        upper: f64,
        #[source]
        source: bisection::Error,
    },
}

/// Failure of a closed-form Euler beam evaluation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EulerError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("characteristic root of mode {mode} was not found")]
    Root {
        mode: usize,
        #[source]
        source: bisection::Error,
    },
}
