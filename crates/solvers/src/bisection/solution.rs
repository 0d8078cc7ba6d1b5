/// Indicates how the bisection solver finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Converged according to the configured tolerances.
    Converged,
    /// Reached the iteration limit without converging.
    MaxIters,
    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a bisection solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// Final solver status.
    pub status: Status,
    /// Best estimate of the root.
    pub x: f64,
    /// Residual at the reported root estimate.
    pub residual: f64,
    /// Bracket that remained when the solver finished.
    pub bracket: [f64; 2],
    /// Number of midpoint evaluations performed.
    pub iters: usize,
}

/// Tracks the evaluation with the smallest residual magnitude.
#[derive(Debug, Clone, Copy)]
pub(super) struct Best {
    x: f64,
    residual: f64,
}

impl Best {
    pub(super) fn new(x: f64, residual: f64) -> Self {
        Self { x, residual }
    }

    /// Replaces the best point if `residual` is strictly smaller in magnitude.
    pub(super) fn update(&mut self, x: f64, residual: f64) {
        if residual.abs() < self.residual.abs() {
            self.x = x;
            self.residual = residual;
        }
    }

    pub(super) fn finish(self, status: Status, bracket: [f64; 2], iters: usize) -> Solution {
        Solution {
            status,
            x: self.x,
            residual: self.residual,
            bracket,
            iters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn update_keeps_smallest_magnitude() {
        let mut best = Best::new(1.0, 2.0);
        best.update(2.0, -1.5);
        best.update(3.0, 1.75);

        let solution = best.finish(Status::MaxIters, [0.0, 4.0], 3);

        assert_relative_eq!(solution.x, 2.0);
        assert_relative_eq!(solution.residual, -1.5);
        assert_eq!(solution.iters, 3);
    }
}
