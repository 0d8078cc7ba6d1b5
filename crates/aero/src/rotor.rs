//! Per-station BEM analysis of a complete rotor.

mod linear;
mod nonlinear;

use std::{f64::consts::PI, fmt};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;
use uom::si::{
    angle::radian,
    f64::{Angle, Length},
    length::meter,
};

use crate::{
    airfoil::AeroCurve,
    config::Config,
    error::{DomainError, InputError, RotorError, StationError},
    station::{BladeStation, StationResult, Termination},
    tip_loss::prandtl,
};

/// Operating condition and overall geometry shared by every station.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RotorConfig {
    pub tip_speed_ratio: f64,
    pub blades: u32,
    /// Blade pitch at the tip.
    pub pitch_0: Angle,
    pub blade_radius: Length,
    pub hub_radius: Length,
}

impl RotorConfig {
    /// Checks the operating condition.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint as an [`InputError`].
    pub fn validate(&self) -> Result<(), InputError> {
        let blade = self.blade_radius.get::<meter>();
        let hub = self.hub_radius.get::<meter>();
        let pitch = self.pitch_0.get::<radian>();

        if !self.tip_speed_ratio.is_finite() || self.tip_speed_ratio <= 0.0 {
            return Err(InputError::TipSpeedRatio(self.tip_speed_ratio));
        }
        if self.blades == 0 {
            return Err(InputError::NoBlades);
        }
        if !pitch.is_finite() {
            return Err(InputError::Pitch(pitch));
        }
        if !blade.is_finite() || blade <= 0.0 {
            return Err(InputError::BladeRadius(blade));
        }
        if !hub.is_finite() || hub < 0.0 || hub >= blade {
            return Err(InputError::HubRadius { hub, blade });
        }
        Ok(())
    }
}

/// Lift model used to solve each station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Method {
    /// Closed-form angle of attack from a linear lift curve, iterated on tip loss.
    Linear,
    /// Damped search on the angle of attack against any lift curve.
    Nonlinear,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("linear"),
            Self::Nonlinear => f.write_str("nonlinear"),
        }
    }
}

/// Analyzes every station with the default solver settings.
///
/// # Errors
///
/// Returns [`RotorError::Input`] for malformed inputs, or
/// [`RotorError::Station`] for the first station that fails.
pub fn analyze_rotor(
    stations: &[BladeStation],
    rotor: &RotorConfig,
    lift: &AeroCurve,
    drag: &AeroCurve,
    method: Method,
) -> Result<Vec<StationResult>, RotorError> {
    analyze_rotor_with(stations, rotor, lift, drag, method, &Config::default())
}

/// Analyzes every station with explicit solver settings.
///
/// # Errors
///
/// See [`analyze_rotor`].
pub fn analyze_rotor_with(
    stations: &[BladeStation],
    rotor: &RotorConfig,
    lift: &AeroCurve,
    drag: &AeroCurve,
    method: Method,
    config: &Config,
) -> Result<Vec<StationResult>, RotorError> {
    analyze_stations(stations, rotor, lift, drag, method, config)?
        .into_iter()
        .enumerate()
        .map(|(index, result)| result.map_err(|source| RotorError::Station { index, source }))
        .collect()
}

/// Analyzes every station, keeping each station's outcome separate.
///
/// The returned vector has one entry per station, in input order. A failing
/// station does not prevent the others from being solved.
///
/// # Errors
///
/// Returns an [`InputError`] if the station table or rotor is malformed, or
/// if [`Method::Linear`] is paired with a non-linear lift curve.
pub fn analyze_stations(
    stations: &[BladeStation],
    rotor: &RotorConfig,
    lift: &AeroCurve,
    drag: &AeroCurve,
    method: Method,
    config: &Config,
) -> Result<Vec<Result<StationResult, StationError>>, InputError> {
    rotor.validate()?;
    validate_stations(stations, rotor)?;
    let linear_terms = match method {
        Method::Linear => Some(lift.linear_terms().ok_or(InputError::LinearLiftRequired)?),
        Method::Nonlinear => None,
    };

    let solve = |(index, station): (usize, &BladeStation)| {
        let element = Element::new(index, station, rotor, stations.len());
        let result = match linear_terms {
            Some((slope, intercept)) => {
                linear::solve(&element, slope, intercept, drag, &config.linear)
            }
            None => nonlinear::solve(&element, lift, drag, &config.nonlinear),
        };
        match &result {
            Ok(solved) => debug!(
                station = index,
                %method,
                iters = solved.iters,
                termination = ?solved.termination,
                "station solved"
            ),
            Err(error) => debug!(station = index, %method, %error, "station failed"),
        }
        result
    };

    #[cfg(feature = "parallel")]
    let results = stations.par_iter().enumerate().map(solve).collect();
    #[cfg(not(feature = "parallel"))]
    let results = stations.iter().enumerate().map(solve).collect();

    Ok(results)
}

fn validate_stations(stations: &[BladeStation], rotor: &RotorConfig) -> Result<(), InputError> {
    if stations.is_empty() {
        return Err(InputError::NoStations);
    }

    let blade = rotor.blade_radius.get::<meter>();
    let hub = rotor.hub_radius.get::<meter>();
    let mut previous: Option<f64> = None;

    for (index, station) in stations.iter().enumerate() {
        let value = station.fractional_radius;
        if !value.is_finite() || value <= 0.0 || value > 1.0 {
            return Err(InputError::FractionalRadius { index, value });
        }
        if let Some(previous) = previous.filter(|&previous| value <= previous) {
            return Err(InputError::RadiusOrder {
                index,
                previous,
                value,
            });
        }
        previous = Some(value);

        let chord = station.chord.get::<meter>();
        if !chord.is_finite() || chord <= 0.0 {
            return Err(InputError::Chord {
                index,
                value: chord,
            });
        }
        let twist = station.twist.get::<radian>();
        if !twist.is_finite() {
            return Err(InputError::Twist {
                index,
                value: twist,
            });
        }
        let local_radius = value * blade;
        if local_radius <= hub {
            return Err(InputError::InsideHub {
                index,
                local_radius,
                hub_radius: hub,
            });
        }
    }
    Ok(())
}

/// Station geometry in SI units, shared by both solvers.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Element {
    pub(crate) index: usize,
    fractional_radius: f64,
    local_radius: f64,
    /// Local pitch `twist + pitch_0`, in radians.
    pub(crate) pitch: f64,
    pub(crate) local_tsr: f64,
    pub(crate) solidity: f64,
    blades: u32,
    tip_speed_ratio: f64,
    station_count: usize,
}

impl Element {
    fn new(index: usize, station: &BladeStation, rotor: &RotorConfig, station_count: usize) -> Self {
        let fractional_radius = station.fractional_radius;
        let local_radius = fractional_radius * rotor.blade_radius.get::<meter>();
        let chord = station.chord.get::<meter>();

        Self {
            index,
            fractional_radius,
            local_radius,
            pitch: station.twist.get::<radian>() + rotor.pitch_0.get::<radian>(),
            local_tsr: rotor.tip_speed_ratio * fractional_radius,
            solidity: f64::from(rotor.blades) * chord / (2.0 * PI * local_radius),
            blades: rotor.blades,
            tip_speed_ratio: rotor.tip_speed_ratio,
            station_count,
        }
    }

    pub(crate) fn tip_loss(&self, relative_wind: f64) -> f64 {
        prandtl(self.blades, self.fractional_radius, relative_wind)
    }

    /// Lift coefficient that momentum theory requires at `relative_wind`.
    pub(crate) fn momentum_lift(&self, tip_loss: f64, relative_wind: f64) -> f64 {
        let (sin, cos) = relative_wind.sin_cos();
        (tip_loss / self.solidity) * 4.0 * sin * (cos - self.local_tsr * sin)
            / (sin + self.local_tsr * cos)
    }

    /// Builds the station result from a solved angle of attack.
    pub(crate) fn finish(
        &self,
        angle_of_attack: f64,
        tip_loss: f64,
        lift: f64,
        drag: f64,
        iters: usize,
        termination: Termination,
    ) -> Result<StationResult, DomainError> {
        let phi = self.pitch + angle_of_attack;
        let (sin, cos) = phi.sin_cos();
        let tan = sin / cos;

        let axial = 1.0 / (1.0 + 4.0 * tip_loss * sin * sin / (self.solidity * lift * cos));
        let angular = axial * tan / self.local_tsr;

        #[allow(clippy::cast_precision_loss)]
        let weight = 8.0 / (self.tip_speed_ratio * self.station_count as f64);
        let power = weight
            * tip_loss
            * self.local_tsr.powi(3)
            * angular
            * (1.0 - axial)
            * (1.0 - (drag / lift) / tan);

        for (quantity, value) in [
            ("angle of relative wind", phi),
            ("lift coefficient", lift),
            ("drag coefficient", drag),
            ("axial induction factor", axial),
            ("angular induction factor", angular),
            ("local power coefficient", power),
        ] {
            if !value.is_finite() {
                return Err(DomainError::NonFinite { quantity });
            }
        }

        Ok(StationResult {
            local_radius: Length::new::<meter>(self.local_radius),
            local_solidity: self.solidity,
            tip_loss_factor: tip_loss,
            angle_of_attack: Angle::new::<radian>(angle_of_attack),
            angle_of_relative_wind: Angle::new::<radian>(phi),
            lift_coefficient: lift,
            drag_coefficient: drag,
            axial_induction_factor: axial,
            angular_induction_factor: angular,
            local_power_coefficient: power,
            iters,
            termination,
        })
    }
}
