use std::f64::consts::FRAC_PI_2;

/// Prandtl tip-loss factor.
///
/// Evaluates `f = exp(-(B/2)(1 - r)/(r sin phi))` and returns
/// `atan(sqrt(1 - f^2)/f) / (pi/2)`. Where that expression is undefined
/// (`f` not in `(0, 1)`, which covers `r -> 0`, `sin phi <= 0` and the tip
/// itself) the factor is 1.
///
/// - `blades`: number of blades `B`
/// - `fractional_radius`: station radius over blade radius `r`
/// - `relative_wind`: angle of relative wind `phi`, in radians
#[must_use]
pub fn prandtl(blades: u32, fractional_radius: f64, relative_wind: f64) -> f64 {
    let exponent = -(f64::from(blades) / 2.0) * (1.0 - fractional_radius)
        / (fractional_radius * relative_wind.sin());
    let f = exponent.exp();
    let complement = 1.0 - f * f;

    if f > 0.0 && complement > 0.0 && f.is_finite() {
        ((complement.sqrt() / f).atan() / FRAC_PI_2).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn is_one_at_the_tip() {
        assert_relative_eq!(prandtl(3, 1.0, 0.2), 1.0);
    }

    #[test]
    fn drops_toward_the_tip() {
        let inner = prandtl(3, 0.5, 0.1);
        let outer = prandtl(3, 0.95, 0.1);

        assert!(inner > outer, "inner={inner}, outer={outer}");
        assert!((0.0..=1.0).contains(&outer));
    }

    #[test]
    fn matches_hand_calculation() {
        // f = exp(-1.5 * 0.1 / (0.9 * sin 0.1))
        let f = (-1.5 * 0.1 / (0.9 * 0.1_f64.sin())).exp();
        let expected = ((1.0 - f * f).sqrt() / f).atan() / FRAC_PI_2;

        assert_relative_eq!(prandtl(3, 0.9, 0.1), expected, epsilon = 1e-12);
    }

    #[test]
    fn falls_back_to_one_outside_its_domain() {
        assert_relative_eq!(prandtl(3, 0.5, 0.0), 1.0);
        assert_relative_eq!(prandtl(3, 0.5, -0.3), 1.0);
        assert_relative_eq!(prandtl(3, 0.0, 0.3), 1.0);
    }

    #[test]
    fn more_blades_lose_less() {
        assert!(prandtl(4, 0.9, 0.1) > prandtl(2, 0.9, 0.1));
    }
}
