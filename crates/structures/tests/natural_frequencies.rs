use approx::assert_relative_eq;
use uom::si::{
    angular_velocity::radian_per_second,
    f64::{AngularVelocity, Length, LinearMassDensity, MassDensity},
    length::meter,
    linear_mass_density::kilogram_per_meter,
    mass_density::kilogram_per_cubic_meter,
};
use windtk_solvers::bisection;
use windtk_structures::{
    FrequencyScan, UniformBeam, find_natural_frequencies, flexural_rigidity, scan_beam,
};

fn rad_s(value: f64) -> AngularVelocity {
    AngularVelocity::new::<radian_per_second>(value)
}

fn density() -> MassDensity {
    MassDensity::new::<kilogram_per_cubic_meter>(1900.0)
}

fn beam() -> UniformBeam {
    UniformBeam {
        length: Length::new::<meter>(10.0),
        linear_density: LinearMassDensity::new::<kilogram_per_meter>(10.0),
        stiffness: flexural_rigidity(1e6),
    }
}

#[test]
fn uniform_beam_scan_finds_the_euler_first_mode() {
    let sections = beam().sections(200).unwrap();
    let euler = beam().natural_frequency(1).unwrap().frequency;

    let found = find_natural_frequencies(
        &sections,
        density(),
        rad_s(0.0),
        rad_s(0.1),
        rad_s(40.0),
        rad_s(0.1),
    )
    .unwrap();

    assert_eq!(found.len(), 1);
    let difference = (found[0] - euler).get::<radian_per_second>().abs();
    assert!(difference < 0.1, "found {:?}, Euler {:?}", found[0], euler);
}

#[test]
fn refined_modes_approach_euler_values() {
    let sections = beam().sections(200).unwrap();
    let scan = FrequencyScan::new(rad_s(0.5), rad_s(100.0), rad_s(0.5))
        .unwrap()
        .with_refinement(bisection::Config::default());

    let result = scan_beam(&sections, density(), rad_s(0.0), &scan).unwrap();

    assert_eq!(result.modes.len(), 2);
    for (mode, found) in (1..).zip(&result.modes) {
        let euler = beam().natural_frequency(mode).unwrap().frequency;
        assert!(found.refined);
        assert!(found.lower < found.frequency && found.frequency <= found.upper);
        assert_relative_eq!(
            found.frequency.get::<radian_per_second>(),
            euler.get::<radian_per_second>(),
            max_relative = 0.01
        );
    }
}

#[test]
fn rotation_stiffens_the_blade() {
    let sections = beam().sections(100).unwrap();
    let scan = FrequencyScan::new(rad_s(0.5), rad_s(40.0), rad_s(0.5))
        .unwrap()
        .with_refinement(bisection::Config::default());

    let first_mode = |speed: f64| {
        let result = scan_beam(&sections, density(), rad_s(speed), &scan).unwrap();
        result.modes[0].frequency.get::<radian_per_second>()
    };

    let (still, slow, fast) = (first_mode(0.0), first_mode(2.0), first_mode(5.0));

    assert!(still < slow && slow < fast, "{still} {slow} {fast}");
}

#[test]
fn scan_is_repeatable() {
    let sections = beam().sections(50).unwrap();
    let run = || {
        find_natural_frequencies(
            &sections,
            density(),
            rad_s(3.0),
            rad_s(0.5),
            rad_s(80.0),
            rad_s(0.5),
        )
        .unwrap()
    };

    assert_eq!(run(), run());
}
