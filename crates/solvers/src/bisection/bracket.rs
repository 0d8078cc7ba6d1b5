use thiserror::Error;

/// Reasons a pair of endpoints cannot start a bisection.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BracketError {
    #[error("bracket endpoints must be finite")]
    NonFinite,

    #[error("bracket endpoints coincide")]
    ZeroWidth,

    #[error("residual has the same sign at both endpoints")]
    NoSignChange,
}

/// Sign of a residual value. Zero counts as non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    NonNegative,
    Negative,
}

impl Sign {
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value < 0.0 {
            Self::Negative
        } else {
            Self::NonNegative
        }
    }
}

/// An interval `[lower, upper]` known to contain a sign change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    lower: f64,
    upper: f64,
    lower_sign: Sign,
}

impl Bracket {
    /// Checks that ordered endpoints span a sign change.
    pub(super) fn new(
        [lower, upper]: [f64; 2],
        lower_residual: f64,
        upper_residual: f64,
    ) -> Result<Self, BracketError> {
        let lower_sign = Sign::of(lower_residual);
        if lower_sign == Sign::of(upper_residual) {
            return Err(BracketError::NoSignChange);
        }
        Ok(Self {
            lower,
            upper,
            lower_sign,
        })
    }

    #[must_use]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    #[must_use]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    #[must_use]
    pub fn bounds(&self) -> [f64; 2] {
        [self.lower, self.upper]
    }

    #[must_use]
    pub fn midpoint(&self) -> f64 {
        self.lower + 0.5 * self.width()
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Whether the width is within `abs_tol + rel_tol * |midpoint|`.
    #[must_use]
    pub fn is_within(&self, abs_tol: f64, rel_tol: f64) -> bool {
        self.width() <= abs_tol + rel_tol * self.midpoint().abs()
    }

    /// Moves whichever endpoint has the same residual sign as `x`.
    pub(super) fn narrow(&mut self, x: f64, residual: f64) {
        if Sign::of(residual) == self.lower_sign {
            self.lower = x;
        } else {
            self.upper = x;
        }
    }
}

/// Returns finite, distinct endpoints in increasing order.
pub(super) fn ordered([a, b]: [f64; 2]) -> Result<[f64; 2], BracketError> {
    if !(a.is_finite() && b.is_finite()) {
        return Err(BracketError::NonFinite);
    }
    match a.partial_cmp(&b) {
        Some(std::cmp::Ordering::Less) => Ok([a, b]),
        Some(std::cmp::Ordering::Greater) => Ok([b, a]),
        _ => Err(BracketError::ZeroWidth),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn endpoints_are_ordered() {
        assert_eq!(ordered([3.0, 1.0]), Ok([1.0, 3.0]));
        assert_eq!(ordered([-1.0, 2.0]), Ok([-1.0, 2.0]));
    }

    #[test]
    fn invalid_endpoints() {
        assert_eq!(ordered([f64::NAN, 1.0]), Err(BracketError::NonFinite));
        assert_eq!(ordered([0.0, f64::INFINITY]), Err(BracketError::NonFinite));
        assert_eq!(ordered([2.0, 2.0]), Err(BracketError::ZeroWidth));
    }

    #[test]
    fn zero_is_non_negative() {
        assert_eq!(Sign::of(0.0), Sign::NonNegative);
        assert_eq!(Sign::of(-0.0), Sign::NonNegative);
        assert_eq!(Sign::of(-1e-300), Sign::Negative);
    }

    #[test]
    fn same_sign_is_rejected() {
        assert_eq!(
            Bracket::new([0.0, 1.0], 2.0, 0.5),
            Err(BracketError::NoSignChange)
        );
    }

    #[test]
    fn narrowing_keeps_the_sign_change() {
        let mut bracket = Bracket::new([0.0, 2.0], -1.0, 1.0).expect("sign change");

        bracket.narrow(1.0, -0.25);
        assert_eq!(bracket.bounds(), [1.0, 2.0]);

        bracket.narrow(1.5, 0.5);
        assert_eq!(bracket.bounds(), [1.0, 1.5]);
        assert_relative_eq!(bracket.width(), 0.5);
        assert_relative_eq!(bracket.midpoint(), 1.25);
        assert!(bracket.is_within(0.5, 0.0));
        assert!(!bracket.is_within(0.1, 0.1));
    }
}
