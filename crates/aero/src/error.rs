use ninterp::error::InterpolateError;
use thiserror::Error;

use crate::rotor::Method;

/// Malformed station tables or rotor parameters, detected before any station is solved.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum InputError {
    #[error("a blade needs at least one station")]
    NoStations,

    #[error("station {index}: fractional radius must lie in (0, 1], got {value}")]
    FractionalRadius { index: usize, value: f64 },

    #[error("station {index}: fractional radius {value} does not exceed the previous station's {previous}")]
    RadiusOrder {
        index: usize,
        previous: f64,
        value: f64,
    },

    #[error("station {index}: chord must be finite and positive, got {value} m")]
    Chord { index: usize, value: f64 },

    #[error("station {index}: twist must be finite, got {value} rad")]
    Twist { index: usize, value: f64 },

    #[error("station {index}: local radius {local_radius} m lies inside the hub radius {hub_radius} m")]
    InsideHub {
        index: usize,
        local_radius: f64,
        hub_radius: f64,
    },

    #[error("tip speed ratio must be finite and positive, got {0}")]
    TipSpeedRatio(f64),

    #[error("number of blades must be at least 1")]
    NoBlades,

    #[error("pitch angle must be finite, got {0} rad")]
    Pitch(f64),

    #[error("blade radius must be finite and positive, got {0} m")]
    BladeRadius(f64),

    #[error("hub radius must satisfy 0 <= hub < blade radius (hub={hub} m, blade={blade} m)")]
    HubRadius { hub: f64, blade: f64 },

    #[error("the linear method requires a linear lift curve")]
    LinearLiftRequired,

    #[error("design needs at least one section")]
    NoSections,

    #[error("design lift coefficient must be finite and positive, got {0}")]
    DesignLift(f64),
}

/// A quantity evaluated outside the domain where it is defined.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DomainError {
    #[error("angle of attack {angle} rad lies outside the curve's range [{lower}, {upper}] rad")]
    OutsideCurve {
        angle: f64,
        lower: f64,
        upper: f64,
        #[source]
        source: InterpolateError,
    },

    #[error("angle of attack quadratic has a negative discriminant ({discriminant})")]
    Discriminant { discriminant: f64 },

    #[error("angle of attack quadratic is degenerate (q1 = 0)")]
    DegenerateQuadratic,

    #[error("{quantity} is not finite")]
    NonFinite { quantity: &'static str },
}

/// Failure of a single blade station.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{method} method did not converge within {iters} iterations")]
    Convergence { method: Method, iters: usize },
}

/// Failure of a whole-rotor analysis.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RotorError {
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    #[error("station {index} failed")]
    Station {
        index: usize,
        #[source]
        source: StationError,
    },
}
