use thiserror::Error;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Settings for both station solvers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Config {
    pub linear: LinearConfig,
    pub nonlinear: NonlinearConfig,
}

/// Errors that can occur when validating a station solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tolerance must be finite and positive")]
    Tolerance,

    #[error("max_iters must be at least 1")]
    MaxIters,

    #[error("initial step must be finite and positive")]
    Step,

    #[error("shrink factor must lie in (0, 1)")]
    Shrink,

    #[error("minimum step must be finite, non-negative and below the initial step")]
    MinStep,
}

/// Fixed-point iteration on the tip-loss factor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LinearConfig {
    tip_loss_tol: f64,
    max_iters: usize,
}

impl Default for LinearConfig {
    fn default() -> Self {
        Self {
            tip_loss_tol: 0.01,
            max_iters: 100,
        }
    }
}

impl LinearConfig {
    /// Creates a validated config.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is not finite and positive, or if
    /// `max_iters` is zero.
    pub fn new(tip_loss_tol: f64, max_iters: usize) -> Result<Self, ConfigError> {
        if !tip_loss_tol.is_finite() || tip_loss_tol <= 0.0 {
            return Err(ConfigError::Tolerance);
        }
        if max_iters == 0 {
            return Err(ConfigError::MaxIters);
        }
        Ok(Self {
            tip_loss_tol,
            max_iters,
        })
    }

    /// Iteration stops once successive tip-loss factors differ by less than this.
    #[must_use]
    pub fn tip_loss_tol(&self) -> f64 {
        self.tip_loss_tol
    }

    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }
}

/// Damped search on the angle of attack against an empirical lift curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct NonlinearConfig {
    initial_step: f64,
    shrink: f64,
    lift_tol: f64,
    min_step: f64,
    max_iters: usize,
}

impl Default for NonlinearConfig {
    fn default() -> Self {
        Self {
            initial_step: 0.017_453_292_5,
            shrink: 0.707,
            lift_tol: 0.01,
            min_step: 0.001,
            max_iters: 1000,
        }
    }
}

impl NonlinearConfig {
    /// Creates a validated config. Angles are in radians.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first invalid setting.
    pub fn new(
        initial_step: f64,
        shrink: f64,
        lift_tol: f64,
        min_step: f64,
        max_iters: usize,
    ) -> Result<Self, ConfigError> {
        if !initial_step.is_finite() || initial_step <= 0.0 {
            return Err(ConfigError::Step);
        }
        if !(shrink > 0.0 && shrink < 1.0) {
            return Err(ConfigError::Shrink);
        }
        if !lift_tol.is_finite() || lift_tol <= 0.0 {
            return Err(ConfigError::Tolerance);
        }
        if !min_step.is_finite() || min_step < 0.0 || min_step >= initial_step {
            return Err(ConfigError::MinStep);
        }
        if max_iters == 0 {
            return Err(ConfigError::MaxIters);
        }
        Ok(Self {
            initial_step,
            shrink,
            lift_tol,
            min_step,
            max_iters,
        })
    }

    /// First angle-of-attack step, in radians.
    #[must_use]
    pub fn initial_step(&self) -> f64 {
        self.initial_step
    }

    /// Factor applied to the step on every reversal.
    #[must_use]
    pub fn shrink(&self) -> f64 {
        self.shrink
    }

    /// Search stops once empirical and momentum lift agree within this.
    #[must_use]
    pub fn lift_tol(&self) -> f64 {
        self.lift_tol
    }

    /// Search stops once the step falls below this, in radians.
    #[must_use]
    pub fn min_step(&self) -> f64 {
        self.min_step
    }

    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }
}
