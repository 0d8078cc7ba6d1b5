#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::station::StationResult;

/// Whole-rotor coefficients summed over solved stations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RotorPerformance {
    pub power_coefficient: f64,
    /// `Cp / lambda`.
    pub torque_coefficient: f64,
    pub mean_axial_induction: f64,
    pub stations: usize,
}

impl RotorPerformance {
    /// Summarizes station results computed at `tip_speed_ratio`.
    ///
    /// The station power coefficients already carry their share of the
    /// span, so the rotor power coefficient is their sum.
    #[must_use]
    pub fn from_stations(results: &[StationResult], tip_speed_ratio: f64) -> Self {
        let power_coefficient: f64 = results.iter().map(|r| r.local_power_coefficient).sum();
        let induction: f64 = results.iter().map(|r| r.axial_induction_factor).sum();

        #[allow(clippy::cast_precision_loss)]
        let mean_axial_induction = if results.is_empty() {
            0.0
        } else {
            induction / results.len() as f64
        };

        Self {
            power_coefficient,
            torque_coefficient: power_coefficient / tip_speed_ratio,
            mean_axial_induction,
            stations: results.len(),
        }
    }
}
