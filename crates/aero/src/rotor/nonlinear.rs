use tracing::trace;

use crate::{
    airfoil::AeroCurve,
    config::NonlinearConfig,
    error::{DomainError, StationError},
    station::{StationResult, Termination},
};

use super::{Element, Method};

/// Solves one station by searching for the angle of attack at which the
/// airfoil lift matches the lift momentum theory requires.
///
/// The search starts at zero and walks in fixed steps while the mismatch
/// keeps shrinking. Whenever it grows (or stalls) the walk reverses and the
/// step is scaled by the shrink factor.
pub(super) fn solve(
    element: &Element,
    lift: &AeroCurve,
    drag: &AeroCurve,
    config: &NonlinearConfig,
) -> Result<StationResult, StationError> {
    let mut alpha = 0.0;
    let mut step = config.initial_step();
    let mut direction = 1.0;
    let mut previous = f64::INFINITY;

    for iter in 1..=config.max_iters() {
        let phi = element.pitch + alpha;
        let tip_loss = element.tip_loss(phi);
        let airfoil = lift.at(alpha)?;
        let momentum = element.momentum_lift(tip_loss, phi);
        if !momentum.is_finite() {
            return Err(DomainError::NonFinite {
                quantity: "momentum lift coefficient",
            }
            .into());
        }
        let divergence = (airfoil - momentum).abs();

        trace!(
            station = element.index,
            iter,
            alpha,
            step,
            divergence,
            "nonlinear step"
        );

        let termination = if divergence < config.lift_tol() {
            Some(Termination::LiftTolerance)
        } else {
            if divergence >= previous {
                direction = -direction;
                step *= config.shrink();
            }
            (step < config.min_step()).then_some(Termination::MinimumStep)
        };

        if let Some(termination) = termination {
            let drag = drag.at(alpha)?;
            let result = element.finish(alpha, tip_loss, airfoil, drag, iter, termination)?;
            return Ok(result);
        }

        previous = divergence;
        alpha += direction * step;
    }

    Err(StationError::Convergence {
        method: Method::Nonlinear,
        iters: config.max_iters(),
    })
}
