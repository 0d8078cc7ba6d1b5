//! Bisection on a bracket with a residual sign change.
//!
//! Each iteration evaluates the bracket midpoint and keeps the half whose
//! endpoints still disagree in sign. The solver stops when the bracket width
//! or the midpoint residual meets the configured tolerances, when the
//! iteration budget is spent, or when an observer asks it to stop.
//!
//! The reported root is the evaluated point with the smallest residual
//! magnitude, which is always one of the endpoints or a midpoint.

mod bracket;
mod config;
mod error;
mod solution;

pub use bracket::{Bracket, BracketError, Sign};
pub use config::{Config, ConfigError};
pub use error::Error;
pub use solution::{Solution, Status};

use tracing::trace;

use crate::{Observer, Residual};

use bracket::ordered;
use solution::Best;

/// Control actions supported by the bisection solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver early and return the best point found so far.
    StopEarly,
}

/// Iteration event emitted by the bisection solver.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    /// Iteration counter (1-based).
    pub iter: usize,
    /// Bracket before the midpoint is applied.
    pub bracket: &'a Bracket,
    /// The evaluated midpoint.
    pub x: f64,
    /// Residual at the midpoint.
    pub residual: f64,
}

/// Finds a root of `residual` inside `bracket` using bisection.
///
/// Observers see every midpoint evaluation along with the current bracket.
///
/// # Errors
///
/// Returns an error if the bracket is invalid, the endpoint
/// residuals share a sign, or the residual fails or is non-finite at any
/// evaluated point.
pub fn solve<R, Obs>(
    residual: &R,
    bracket: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    R: Residual,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let endpoints = ordered(bracket)?;
    let [lower, upper] = endpoints;

    let lower_residual = evaluate(residual, lower)?;
    let upper_residual = evaluate(residual, upper)?;

    let mut best = Best::new(lower, lower_residual);
    best.update(upper, upper_residual);

    let tol = config.residual_tol();
    if lower_residual.abs() <= tol || upper_residual.abs() <= tol {
        return Ok(best.finish(Status::Converged, endpoints, 0));
    }

    let mut bracket = Bracket::new(endpoints, lower_residual, upper_residual)?;

    for iter in 1..=config.max_iters() {
        let mid = bracket.midpoint();
        let mid_residual = evaluate(residual, mid)?;
        best.update(mid, mid_residual);

        trace!(iter, x = mid, residual = mid_residual, "bisection step");

        let event = Event {
            iter,
            bracket: &bracket,
            x: mid,
            residual: mid_residual,
        };

        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(best.finish(Status::StoppedByObserver, bracket.bounds(), iter));
        }

        let residual_converged = mid_residual.abs() <= config.residual_tol();
        bracket.narrow(mid, mid_residual);

        if residual_converged || bracket.is_within(config.x_abs_tol(), config.x_rel_tol()) {
            return Ok(best.finish(Status::Converged, bracket.bounds(), iter));
        }
    }

    Ok(best.finish(Status::MaxIters, bracket.bounds(), config.max_iters()))
}

/// Runs bisection without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<R: Residual>(
    residual: &R,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution, Error> {
    solve(residual, bracket, config, ())
}

fn evaluate<R: Residual>(residual: &R, x: f64) -> Result<f64, Error> {
    let value = residual.residual(x).map_err(|source| Error::Residual {
        x,
        source: Box::new(source),
    })?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFiniteResidual { x, residual: value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use thiserror::Error;

    fn square_minus(target: f64) -> impl Fn(f64) -> Result<f64, Infallible> {
        move |x| Ok(x * x - target)
    }

    #[test]
    fn finds_square_root() {
        let solution = solve_unobserved(&square_minus(9.0), [0.0, 10.0], &Config::default())
            .expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.x, 3.0, epsilon = 1e-10);
    }

    #[test]
    fn finds_cosine_root() {
        let residual = |x: f64| Ok::<_, Infallible>(x.cos());

        let solution =
            solve_unobserved(&residual, [1.0, 2.0], &Config::default()).expect("should solve");

        assert_relative_eq!(solution.x, std::f64::consts::FRAC_PI_2, epsilon = 1e-10);
        let [left, right] = solution.bracket;
        assert!(left <= solution.x + 1e-10 && solution.x <= right + 1e-10);
    }

    #[test]
    fn normalizes_reversed_bracket() {
        let solution = solve_unobserved(&square_minus(36.0), [10.0, 0.0], &Config::default())
            .expect("should solve with reversed bracket");

        assert_relative_eq!(solution.x, 6.0, epsilon = 1e-10);
    }

    #[test]
    fn endpoint_root_returns_immediately() {
        let solution = solve_unobserved(&square_minus(4.0), [2.0, 5.0], &Config::default())
            .expect("endpoint is a root");

        assert_eq!(solution.status, Status::Converged);
        assert_eq!(solution.iters, 0);
        assert_relative_eq!(solution.x, 2.0);
    }

    #[test]
    fn observer_can_stop_iteration() {
        let mut calls = 0usize;
        let observer = |event: &Event<'_>| {
            calls += 1;
            (event.iter >= 3).then_some(Action::StopEarly)
        };

        let solution = solve(&square_minus(9.0), [0.0, 10.0], &Config::default(), observer)
            .expect("should stop cleanly");

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.iters, 3);
        assert_eq!(calls, 3);
    }

    #[test]
    fn zero_iters_returns_best_endpoint() {
        let config = Config::new(0, 1e-12, 1e-12, 1e-12).expect("valid config");

        let solution =
            solve_unobserved(&square_minus(9.0), [2.0, 10.0], &config).expect("best endpoint");

        assert_eq!(solution.status, Status::MaxIters);
        assert_eq!(solution.iters, 0);
        // |4 - 9| < |100 - 9|
        assert_relative_eq!(solution.x, 2.0);
    }

    #[test]
    fn errors_on_no_sign_change() {
        let result = solve_unobserved(&square_minus(9.0), [5.0, 10.0], &Config::default());

        assert!(matches!(
            result,
            Err(Error::InvalidBracket(BracketError::NoSignChange))
        ));
    }

    #[test]
    fn errors_on_zero_width_bracket() {
        let result = solve_unobserved(&square_minus(25.0), [5.0, 5.0], &Config::default());

        assert!(matches!(
            result,
            Err(Error::InvalidBracket(BracketError::ZeroWidth))
        ));
    }

    #[derive(Debug, Error)]
    #[error("undefined below zero")]
    struct Undefined;

    #[test]
    fn residual_errors_carry_the_failing_point() {
        let residual = |x: f64| {
            if x < 0.0 {
                Err(Undefined)
            } else {
                Ok(x.sqrt() - 1.0)
            }
        };

        let result = solve_unobserved(&residual, [-1.0, 4.0], &Config::default());

        match result {
            Err(Error::Residual { x, .. }) => assert_relative_eq!(x, -1.0),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn errors_on_non_finite_residual() {
        let residual = |x: f64| Ok::<_, Infallible>(1.0 / x);

        let result = solve_unobserved(&residual, [0.0, 1.0], &Config::default());

        assert!(matches!(result, Err(Error::NonFiniteResidual { .. })));
    }
}
