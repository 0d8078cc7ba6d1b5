//! `windtk modes`: natural frequencies of a rotating uniform blade.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::info;
use uom::si::{
    angular_velocity::radian_per_second,
    f64::{AngularVelocity, Length, LinearMassDensity, MassDensity},
    length::meter,
    linear_mass_density::kilogram_per_meter,
    mass_density::kilogram_per_cubic_meter,
};
use windtk_solvers::bisection;
use windtk_structures::{
    EulerMode, FrequencyScan, ModeScan, UniformBeam, flexural_rigidity, scan_beam,
};

/// Blade vibration arguments
#[derive(Args)]
pub struct ModesArgs {
    /// Blade length [m]
    #[arg(short, long, default_value = "10.0")]
    pub length: f64,

    /// Mass per unit length [kg/m]
    #[arg(long, default_value = "10.0")]
    pub linear_density: f64,

    /// Flexural rigidity EI [N m^2]
    #[arg(long, default_value = "1e6")]
    pub stiffness: f64,

    /// Number of equal lumped sections
    #[arg(long, default_value = "100")]
    pub sections: usize,

    /// Blade material density [kg/m^3]
    #[arg(long, default_value = "1900.0")]
    pub density: f64,

    /// Rotor speed [rad/s]
    #[arg(long, default_value = "0.0")]
    pub rotor_speed: f64,

    /// First trial frequency [rad/s]
    #[arg(long, default_value = "0.5")]
    pub start: f64,

    /// Scan stops before this frequency [rad/s]
    #[arg(long, default_value = "100.0")]
    pub stop: f64,

    /// Trial frequency step [rad/s]
    #[arg(long, default_value = "0.5")]
    pub step: f64,

    /// Bisect each bracket instead of reporting its upper trial frequency
    #[arg(long)]
    pub refine: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Report {
    beam: UniformBeam,
    scan: ModeScan,
    euler: Vec<EulerMode>,
}

/// Run the frequency scan
pub fn execute(args: &ModesArgs) -> Result<()> {
    let beam = UniformBeam {
        length: Length::new::<meter>(args.length),
        linear_density: LinearMassDensity::new::<kilogram_per_meter>(args.linear_density),
        stiffness: flexural_rigidity(args.stiffness),
    };
    let sections = beam.sections(args.sections).context("invalid beam")?;

    let mut scan = FrequencyScan::new(
        AngularVelocity::new::<radian_per_second>(args.start),
        AngularVelocity::new::<radian_per_second>(args.stop),
        AngularVelocity::new::<radian_per_second>(args.step),
    )
    .context("invalid frequency scan")?;
    if args.refine {
        scan = scan.with_refinement(bisection::Config::default());
    }

    info!(
        sections = sections.len(),
        trials = scan.trials(),
        refine = args.refine,
        "scanning for natural frequencies"
    );
    let result = scan_beam(
        &sections,
        MassDensity::new::<kilogram_per_cubic_meter>(args.density),
        AngularVelocity::new::<radian_per_second>(args.rotor_speed),
        &scan,
    )
    .context("frequency scan failed")?;
    info!(modes = result.modes.len(), poles = result.poles, "scan complete");

    let euler = (1..=result.modes.len())
        .map(|mode| beam.natural_frequency(mode))
        .collect::<Result<Vec<_>, _>>()
        .context("Euler beam frequencies")?;

    if args.json {
        let report = Report {
            beam,
            scan: result,
            euler,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{:>5} {:>14} {:>14} {:>14}",
        "mode", "omega[rad/s]", "bracket", "Euler[rad/s]"
    );
    for (index, (mode, reference)) in result.modes.iter().zip(&euler).enumerate() {
        let bracket = format!(
            "{:.2}..{:.2}",
            mode.lower.get::<radian_per_second>(),
            mode.upper.get::<radian_per_second>()
        );
        println!(
            "{:>5} {:>14.4} {:>14} {:>14.4}",
            index + 1,
            mode.frequency.get::<radian_per_second>(),
            bracket,
            reference.frequency.get::<radian_per_second>(),
        );
    }
    if result.poles > 0 {
        println!("\n{} sign change(s) rejected as poles", result.poles);
    }
    Ok(())
}
