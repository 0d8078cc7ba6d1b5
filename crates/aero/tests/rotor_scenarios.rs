use std::f64::consts::PI;

use approx::assert_relative_eq;
use uom::si::{
    angle::{degree, radian},
    f64::{Angle, Length},
    length::meter,
};
use windtk_aero::{
    AeroCurve, BladeStation, Config, DesignPoint, DomainError, EmpiricalCurve, Method,
    RotorConfig, RotorError, RotorPerformance, StationError, WakeModel, analyze_rotor,
    analyze_stations, optimum_blade,
};

fn demo_stations() -> Vec<BladeStation> {
    [
        [0.2, 2.0, 0.2],
        [0.4, 1.9, 0.4],
        [0.6, 1.9, 0.5],
        [0.8, 1.6, 0.7],
        [1.0, 1.4, 0.9],
    ]
    .iter()
    .map(|&[r, c, t]| BladeStation::new(r, Length::new::<meter>(c), Angle::new::<radian>(t)))
    .collect()
}

fn demo_rotor() -> RotorConfig {
    RotorConfig {
        tip_speed_ratio: 10.0,
        blades: 3,
        pitch_0: Angle::new::<radian>(0.2),
        blade_radius: Length::new::<meter>(10.0),
        hub_radius: Length::new::<meter>(0.5),
    }
}

fn design_rotor(blades: u32) -> RotorConfig {
    RotorConfig {
        tip_speed_ratio: 7.0,
        blades,
        pitch_0: Angle::new::<radian>(0.0),
        blade_radius: Length::new::<meter>(10.0),
        hub_radius: Length::new::<meter>(1.0),
    }
}

const LIFT_SLOPE: f64 = 2.0 * PI;
const LIFT_INTERCEPT: f64 = 0.2;

/// Wake-rotation optimum blade for 7 degrees angle of attack on a
/// `0.2 + 2 pi alpha` lift line.
fn design_blade() -> Vec<BladeStation> {
    let alpha = Angle::new::<degree>(7.0);
    let design = DesignPoint {
        lift_coefficient: LIFT_INTERCEPT + LIFT_SLOPE * alpha.get::<radian>(),
        angle_of_attack: alpha,
    };
    optimum_blade(&design, &design_rotor(3), 10, WakeModel::WakeRotation).expect("valid design")
}

fn sampled_curve(lower: i32, upper: i32, f: impl Fn(f64) -> f64) -> AeroCurve {
    EmpiricalCurve::new((lower..=upper).map(|deg| {
        let angle = Angle::new::<degree>(f64::from(deg));
        (angle, f(angle.get::<radian>()))
    }))
    .expect("valid curve")
    .into()
}

#[test]
fn demo_rotor_yields_one_result_per_station() {
    let stations = demo_stations();
    let lift = AeroCurve::linear(2.0, 0.3);
    let drag = AeroCurve::linear(0.01, 0.1);

    let results = analyze_rotor(&stations, &demo_rotor(), &lift, &drag, Method::Linear)
        .expect("demo rotor solves");

    assert_eq!(results.len(), 5);
    for (station, result) in stations.iter().zip(&results) {
        assert_relative_eq!(
            result.local_radius.get::<meter>(),
            station.fractional_radius * 10.0,
            epsilon = 1e-12
        );
        assert!((0.0..=1.0).contains(&result.tip_loss_factor));
        for value in [
            result.angle_of_attack.get::<radian>(),
            result.angle_of_relative_wind.get::<radian>(),
            result.lift_coefficient,
            result.drag_coefficient,
            result.axial_induction_factor,
            result.angular_induction_factor,
            result.local_power_coefficient,
        ] {
            assert!(value.is_finite());
        }
    }
}

#[test]
fn analysis_is_repeatable() {
    let stations = demo_stations();
    let lift = AeroCurve::linear(2.0, 0.3);
    let drag = AeroCurve::linear(0.01, 0.1);

    let first = analyze_rotor(&stations, &demo_rotor(), &lift, &drag, Method::Linear).unwrap();
    let second = analyze_rotor(&stations, &demo_rotor(), &lift, &drag, Method::Linear).unwrap();

    assert_eq!(first, second);
}

#[test]
fn linear_method_recovers_the_design_angle_of_attack() {
    let blade = design_blade();
    let lift = AeroCurve::linear(LIFT_SLOPE, LIFT_INTERCEPT);
    let drag = AeroCurve::linear(0.1, 0.008);

    let outcomes = analyze_stations(
        &blade,
        &design_rotor(3),
        &lift,
        &drag,
        Method::Linear,
        &Config::default(),
    )
    .expect("valid inputs");

    for outcome in &outcomes[..7] {
        let result = outcome.as_ref().expect("inner stations solve");
        assert_relative_eq!(result.angle_of_attack.get::<degree>(), 7.0, epsilon = 0.1);
        assert!(result.axial_induction_factor > 0.3 && result.axial_induction_factor < 0.4);
    }

    let solved: Vec<_> = outcomes.iter().filter_map(|o| o.as_ref().ok()).copied().collect();
    let summary = RotorPerformance::from_stations(&solved, 7.0);
    assert!(
        summary.power_coefficient > 0.4 && summary.power_coefficient < 0.5,
        "Cp = {}",
        summary.power_coefficient
    );
}

#[test]
fn failing_station_does_not_abort_the_others() {
    let blade = design_blade();
    let lift = AeroCurve::linear(LIFT_SLOPE, LIFT_INTERCEPT);
    let drag = AeroCurve::linear(0.1, 0.008);

    // Strong tip loss at the outermost station leaves the linearized
    // balance without a real root.
    let outcomes = analyze_stations(
        &blade,
        &design_rotor(3),
        &lift,
        &drag,
        Method::Linear,
        &Config::default(),
    )
    .unwrap();

    assert_eq!(outcomes.len(), 10);
    assert!(outcomes[..9].iter().all(Result::is_ok));
    assert!(matches!(
        outcomes[9],
        Err(StationError::Domain(DomainError::Discriminant { .. }))
    ));

    let error = analyze_rotor(&blade, &design_rotor(3), &lift, &drag, Method::Linear)
        .expect_err("outermost station fails");
    assert!(matches!(error, RotorError::Station { index: 9, .. }));
}

#[test]
fn more_blades_raise_solidity_and_induction() {
    let blade = design_blade();
    let lift = AeroCurve::linear(LIFT_SLOPE, LIFT_INTERCEPT);
    let drag = AeroCurve::linear(0.0, 0.01);
    let solve = |blades| {
        analyze_stations(
            &blade[..5],
            &design_rotor(blades),
            &lift,
            &drag,
            Method::Linear,
            &Config::default(),
        )
        .unwrap()
        .into_iter()
        .map(|outcome| outcome.expect("inner stations solve"))
        .collect::<Vec<_>>()
    };

    let (two, three, four) = (solve(2), solve(3), solve(4));

    for i in 0..5 {
        assert!(two[i].local_solidity < three[i].local_solidity);
        assert!(three[i].local_solidity < four[i].local_solidity);
        assert!(two[i].axial_induction_factor < three[i].axial_induction_factor);
        assert!(three[i].axial_induction_factor < four[i].axial_induction_factor);
    }
}

#[test]
fn nonlinear_method_tracks_an_empirical_lift_curve() {
    let blade = design_blade();
    let lift = sampled_curve(-10, 20, |alpha| LIFT_INTERCEPT + LIFT_SLOPE * alpha);
    let drag = sampled_curve(-10, 20, |_| 0.01);

    let outcomes = analyze_stations(
        &blade[..4],
        &design_rotor(3),
        &lift,
        &drag,
        Method::Nonlinear,
        &Config::default(),
    )
    .unwrap();

    for outcome in outcomes {
        let result = outcome.expect("inner stations solve");
        assert_relative_eq!(result.angle_of_attack.get::<degree>(), 7.0, epsilon = 0.25);
        assert_relative_eq!(result.drag_coefficient, 0.01, epsilon = 1e-12);
    }
}

#[test]
fn nonlinear_method_solves_a_wake_rotation_design_with_measured_curves() {
    let curve = |samples: &[(f64, f64)]| -> AeroCurve {
        EmpiricalCurve::new(
            samples
                .iter()
                .map(|&(alpha, coefficient)| (Angle::new::<degree>(alpha), coefficient)),
        )
        .expect("valid curve")
        .into()
    };
    let lift = curve(&[
        (-10.0, -0.8),
        (0.0, 0.3),
        (5.0, 0.85),
        (10.0, 1.3),
        (15.0, 1.45),
        (20.0, 1.2),
    ]);
    let drag = curve(&[(-10.0, 0.02), (0.0, 0.008), (10.0, 0.015), (20.0, 0.1)]);

    let rotor = demo_rotor();
    let angle_of_attack = Angle::new::<degree>(7.0);
    let design = DesignPoint {
        lift_coefficient: lift.coefficient(angle_of_attack).unwrap(),
        angle_of_attack,
    };
    let blade = optimum_blade(&design, &rotor, 10, WakeModel::WakeRotation).unwrap();

    let results: Vec<_> = analyze_stations(
        &blade,
        &rotor,
        &lift,
        &drag,
        Method::Nonlinear,
        &Config::default(),
    )
    .unwrap()
    .into_iter()
    .map(|outcome| outcome.expect("every station solves"))
    .collect();

    assert_eq!(results.len(), 10);
    for result in &results[..3] {
        assert_relative_eq!(result.angle_of_attack.get::<degree>(), 7.0, epsilon = 0.25);
    }
    for result in &results {
        let alpha = result.angle_of_attack.get::<degree>();
        assert!((-10.0..=20.0).contains(&alpha));
    }
}

#[test]
fn drag_lookup_outside_its_curve_is_a_domain_error() {
    let blade = design_blade();
    let lift = sampled_curve(-10, 20, |alpha| LIFT_INTERCEPT + LIFT_SLOPE * alpha);
    let drag = sampled_curve(-5, 5, |_| 0.01);

    let error = analyze_rotor(&blade[..1], &design_rotor(3), &lift, &drag, Method::Nonlinear)
        .expect_err("drag curve ends below the solved angle of attack");

    assert!(matches!(
        error,
        RotorError::Station {
            index: 0,
            source: StationError::Domain(DomainError::OutsideCurve { .. }),
        }
    ));
}

#[test]
fn empirical_curve_rejects_angles_beyond_its_samples() {
    let lift = sampled_curve(-5, 20, |alpha| LIFT_INTERCEPT + LIFT_SLOPE * alpha);

    assert!(matches!(
        lift.coefficient(Angle::new::<degree>(25.0)),
        Err(DomainError::OutsideCurve { .. })
    ));
}
