use tracing::trace;

use crate::{
    airfoil::AeroCurve,
    config::LinearConfig,
    error::{DomainError, StationError},
    station::{StationResult, Termination},
};

use super::{Element, Method};

/// Solves one station with a linear lift curve `intercept + slope * alpha`.
///
/// Each pass solves the linearized momentum balance for the angle of attack
/// at the current tip-loss factor, then updates the factor from the new
/// relative wind. The result reports the tip-loss factor the final pass
/// was solved with.
pub(super) fn solve(
    element: &Element,
    slope: f64,
    intercept: f64,
    drag: &AeroCurve,
    config: &LinearConfig,
) -> Result<StationResult, StationError> {
    let mut tip_loss = 1.0;

    for iter in 1..=config.max_iters() {
        let alpha = angle_of_attack(element, slope, intercept, tip_loss)?;
        let updated = element.tip_loss(element.pitch + alpha);
        let change = (updated - tip_loss).abs();

        trace!(
            station = element.index,
            iter,
            alpha,
            tip_loss,
            change,
            "linear pass"
        );

        if change < config.tip_loss_tol() {
            let lift = intercept + slope * alpha;
            let drag = drag.at(alpha)?;
            let result = element.finish(
                alpha,
                tip_loss,
                lift,
                drag,
                iter,
                Termination::TipLossTolerance,
            )?;
            return Ok(result);
        }
        tip_loss = updated;
    }

    Err(StationError::Convergence {
        method: Method::Linear,
        iters: config.max_iters(),
    })
}

/// Quadratic coefficients `[q1, q2, q3]` of `q1 a^2 - q2 a + q3 = 0`.
fn q_terms(element: &Element, slope: f64, intercept: f64, tip_loss: f64) -> [f64; 3] {
    let (sin, cos) = element.pitch.sin_cos();
    let tsr = element.local_tsr;
    let d1 = cos - tsr * sin;
    let d2 = sin + tsr * cos;
    let k = 4.0 * tip_loss / element.solidity;

    let q1 = -(slope * d1 + k * cos * d2);
    let q2 = (slope * d2 + intercept * d1) - k * (d1 * cos - d2 * sin);
    let q3 = k * d1 * sin - intercept * d2;
    [q1, q2, q3]
}

/// Angle of attack, in radians, from the linearized momentum balance.
fn angle_of_attack(
    element: &Element,
    slope: f64,
    intercept: f64,
    tip_loss: f64,
) -> Result<f64, DomainError> {
    let [q1, q2, q3] = q_terms(element, slope, intercept, tip_loss);
    let discriminant = q2 * q2 - 4.0 * q1 * q3;

    if discriminant < 0.0 {
        return Err(DomainError::Discriminant { discriminant });
    }
    #[allow(clippy::float_cmp)]
    if q1 == 0.0 || !discriminant.is_finite() {
        return Err(DomainError::DegenerateQuadratic);
    }
    Ok(-(discriminant.sqrt() - q2) / (2.0 * q1))
}
