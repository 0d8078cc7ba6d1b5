//! Uniform grids and sign-change detection.
//!
//! A [`Grid`] samples `[start, stop)` at a fixed step. Grid points are
//! computed from their index (`start + k * step`) so long scans do not
//! accumulate rounding drift. [`sign_changes`] walks consecutive samples and
//! reports every pair whose residuals disagree in sign; the first sample has
//! no predecessor and can only ever be the lower end of a pair.

use thiserror::Error;

use crate::bisection::Sign;

/// Errors that can occur when constructing a [`Grid`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GridError {
    #[error("grid bounds must be finite (start={start}, stop={stop})")]
    NonFiniteBounds { start: f64, stop: f64 },

    #[error("grid step must be finite and positive, got {step}")]
    Step { step: f64 },

    #[error("grid start must be below stop (start={start}, stop={stop})")]
    EmptyRange { start: f64, stop: f64 },

    #[error("grid would hold about {points} points, more than the limit of {max}")]
    TooManyPoints { points: f64, max: usize },
}

/// Largest number of points a [`Grid`] may hold.
pub const MAX_POINTS: usize = 10_000_000;

/// A uniform grid over the half-open range `[start, stop)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    start: f64,
    step: f64,
    len: usize,
}

impl Grid {
    /// Creates a validated grid.
    ///
    /// # Errors
    ///
    /// Returns a [`GridError`] if the bounds are non-finite, the step is not
    /// strictly positive, `start >= stop`, or the grid would hold more than
    /// [`MAX_POINTS`] points.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn new(start: f64, stop: f64, step: f64) -> Result<Self, GridError> {
        if !start.is_finite() || !stop.is_finite() {
            return Err(GridError::NonFiniteBounds { start, stop });
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(GridError::Step { step });
        }
        if start >= stop {
            return Err(GridError::EmptyRange { start, stop });
        }

        // Count of k >= 0 with start + k * step < stop.
        let span = (stop - start) / step;
        let too_many = GridError::TooManyPoints {
            points: span,
            max: MAX_POINTS,
        };
        if !span.is_finite() || span > MAX_POINTS as f64 {
            return Err(too_many);
        }

        let mut len = span.ceil() as usize;
        while len > 0 && start + (len - 1) as f64 * step >= stop {
            len -= 1;
        }
        while start + len as f64 * step < stop {
            if len == MAX_POINTS {
                return Err(too_many);
            }
            len += 1;
        }

        Ok(Self {
            start,
            step,
            len: len.max(1),
        })
    }

    /// Returns the number of grid points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; a valid grid holds at least its start point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the grid point at `index`.
    #[must_use]
    pub fn point(&self, index: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let k = index as f64;
        self.start + k * self.step
    }

    /// Iterates over the grid points in increasing order.
    pub fn points(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        (0..self.len).map(|index| self.point(index))
    }
}

/// A residual sampled at one grid point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub residual: f64,
}

/// Two consecutive samples whose residuals disagree in sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignChange {
    /// Index of `upper` in the sampled sequence.
    pub index: usize,
    pub lower: Sample,
    pub upper: Sample,
}

impl SignChange {
    /// Returns the bracket `[lower.x, upper.x]`.
    #[must_use]
    pub fn bracket(&self) -> [f64; 2] {
        [self.lower.x, self.upper.x]
    }
}

/// Returns every consecutive pair of samples whose residual signs differ.
///
/// Zero counts as positive, matching [`Sign::of`].
pub fn sign_changes(samples: &[Sample]) -> Vec<SignChange> {
    samples
        .windows(2)
        .enumerate()
        .filter_map(|(i, pair)| {
            let (lower, upper) = (pair[0], pair[1]);
            (Sign::of(lower.residual) != Sign::of(upper.residual)).then_some(SignChange {
                index: i + 1,
                lower,
                upper,
            })
        })
        .collect()
}
