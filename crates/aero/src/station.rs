use uom::si::f64::{Angle, Length};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One blade element, located by its fraction of the blade radius.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BladeStation {
    /// Station radius over blade radius, in `(0, 1]`.
    pub fractional_radius: f64,
    pub chord: Length,
    /// Twist relative to the tip; the local pitch is `twist + pitch_0`.
    pub twist: Angle,
}

impl BladeStation {
    #[must_use]
    pub fn new(fractional_radius: f64, chord: Length, twist: Angle) -> Self {
        Self {
            fractional_radius,
            chord,
            twist,
        }
    }
}

/// Why a station solver stopped iterating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Termination {
    /// Successive tip-loss factors agreed within tolerance.
    TipLossTolerance,
    /// Empirical and momentum lift coefficients agreed within tolerance.
    LiftTolerance,
    /// The angle-of-attack step shrank below its minimum.
    MinimumStep,
}

/// Solved aerodynamic state of a single blade station.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StationResult {
    pub local_radius: Length,
    pub local_solidity: f64,
    pub tip_loss_factor: f64,
    pub angle_of_attack: Angle,
    pub angle_of_relative_wind: Angle,
    pub lift_coefficient: f64,
    pub drag_coefficient: f64,
    pub axial_induction_factor: f64,
    pub angular_induction_factor: f64,
    pub local_power_coefficient: f64,
    pub iters: usize,
    pub termination: Termination,
}
