//! Optimum blade shapes for a chosen design point.

use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uom::si::{
    angle::radian,
    f64::{Angle, Length},
    length::meter,
};

use crate::{error::InputError, rotor::RotorConfig, station::BladeStation};

/// Airfoil operating point the blade is designed around.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DesignPoint {
    pub lift_coefficient: f64,
    pub angle_of_attack: Angle,
}

/// Momentum model used to size the blade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WakeModel {
    /// Ideal rotor without wake rotation (`a = 1/3` everywhere).
    Betz,
    /// Optimum rotor including wake rotation.
    WakeRotation,
}

/// Designs an optimum blade with one station at the center of each of
/// `sections` equal spans between hub and tip.
///
/// Twist is measured so that the blade reaches the design angle of attack
/// when pitched to `rotor.pitch_0`.
///
/// # Errors
///
/// Returns an [`InputError`] if the rotor is invalid, `sections` is zero, or
/// the design lift coefficient is not finite and positive.
pub fn optimum_blade(
    design: &DesignPoint,
    rotor: &RotorConfig,
    sections: usize,
    wake: WakeModel,
) -> Result<Vec<BladeStation>, InputError> {
    rotor.validate()?;
    if sections == 0 {
        return Err(InputError::NoSections);
    }
    let cl = design.lift_coefficient;
    if !cl.is_finite() || cl <= 0.0 {
        return Err(InputError::DesignLift(cl));
    }

    let blade = rotor.blade_radius.get::<meter>();
    let hub = rotor.hub_radius.get::<meter>();
    let blades = f64::from(rotor.blades);
    let offset = design.angle_of_attack.get::<radian>() + rotor.pitch_0.get::<radian>();
    #[allow(clippy::cast_precision_loss)]
    let span = (blade - hub) / sections as f64;

    let stations = (0..sections)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let radius = hub + (i as f64 + 0.5) * span;
            let fractional_radius = radius / blade;
            let local_tsr = rotor.tip_speed_ratio * fractional_radius;

            let (phi, chord) = match wake {
                WakeModel::Betz => {
                    let phi = (2.0 / (3.0 * local_tsr)).atan();
                    let chord = 8.0 * PI * radius * phi.sin() / (3.0 * blades * cl * local_tsr);
                    (phi, chord)
                }
                WakeModel::WakeRotation => {
                    let phi = (2.0 / 3.0) * (1.0 / local_tsr).atan();
                    let chord = 8.0 * PI * radius * (1.0 - phi.cos()) / (blades * cl);
                    (phi, chord)
                }
            };

            BladeStation::new(
                fractional_radius,
                Length::new::<meter>(chord),
                Angle::new::<radian>(phi - offset),
            )
        })
        .collect();

    Ok(stations)
}
