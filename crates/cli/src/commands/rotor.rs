//! `windtk rotor`: BEM analysis of a station table.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};
use uom::si::{
    angle::{degree, radian},
    f64::{Angle, Length},
    length::meter,
};
use windtk_aero::{
    AeroCurve, BladeStation, Config, DesignPoint, EmpiricalCurve, Method, RotorConfig,
    RotorPerformance, StationResult, WakeModel, analyze_stations, optimum_blade,
};

use super::parse_tuple;

/// Station table analyzed when none is given.
const DEMO_STATIONS: [[f64; 3]; 5] = [
    [0.2, 2.0, 0.2],
    [0.4, 1.9, 0.4],
    [0.6, 1.9, 0.5],
    [0.8, 1.6, 0.7],
    [1.0, 1.4, 0.9],
];

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MethodArg {
    Linear,
    Nonlinear,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum WakeArg {
    Betz,
    WakeRotation,
}

/// Rotor analysis arguments
#[derive(Args)]
pub struct RotorArgs {
    /// Station solver
    #[arg(short, long, value_enum, default_value_t = MethodArg::Linear)]
    pub method: MethodArg,

    /// Station as `fractional_radius,chord_m,twist_rad`; repeat for every station
    #[arg(long = "station", value_parser = parse_tuple::<3>)]
    pub stations: Vec<[f64; 3]>,

    /// Replace the station table with an optimum blade for this wake model
    #[arg(long, value_enum)]
    pub design: Option<WakeArg>,

    /// Number of sections of the optimum blade
    #[arg(long, default_value = "10")]
    pub sections: usize,

    /// Design angle of attack of the optimum blade [deg]
    #[arg(long, default_value = "7.0")]
    pub design_alpha: f64,

    /// Tip speed ratio
    #[arg(short, long, default_value = "10.0")]
    pub tip_speed_ratio: f64,

    /// Number of blades
    #[arg(short, long, default_value = "3")]
    pub blades: u32,

    /// Tip pitch [rad]
    #[arg(long, default_value = "0.2")]
    pub pitch: f64,

    /// Blade radius [m]
    #[arg(long, default_value = "10.0")]
    pub blade_radius: f64,

    /// Hub radius [m]
    #[arg(long, default_value = "0.5")]
    pub hub_radius: f64,

    /// Lift curve slope [1/rad]
    #[arg(long, default_value = "2.0")]
    pub lift_slope: f64,

    /// Lift coefficient at zero angle of attack
    #[arg(long, default_value = "0.3")]
    pub lift_intercept: f64,

    /// Drag curve slope [1/rad]
    #[arg(long, default_value = "0.01")]
    pub drag_slope: f64,

    /// Drag coefficient at zero angle of attack
    #[arg(long, default_value = "0.1")]
    pub drag_intercept: f64,

    /// Empirical lift sample `alpha_deg,cl`; replaces the lift line when given
    #[arg(long = "lift-sample", value_parser = parse_tuple::<2>)]
    pub lift_samples: Vec<[f64; 2]>,

    /// Empirical drag sample `alpha_deg,cd`; replaces the drag line when given
    #[arg(long = "drag-sample", value_parser = parse_tuple::<2>)]
    pub drag_samples: Vec<[f64; 2]>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct StationReport {
    index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<StationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct Report<'a> {
    rotor: &'a RotorConfig,
    method: Method,
    stations: Vec<StationReport>,
    performance: RotorPerformance,
}

/// Run the rotor analysis
pub fn execute(args: &RotorArgs) -> Result<()> {
    let rotor = RotorConfig {
        tip_speed_ratio: args.tip_speed_ratio,
        blades: args.blades,
        pitch_0: Angle::new::<radian>(args.pitch),
        blade_radius: Length::new::<meter>(args.blade_radius),
        hub_radius: Length::new::<meter>(args.hub_radius),
    };
    let method = match args.method {
        MethodArg::Linear => Method::Linear,
        MethodArg::Nonlinear => Method::Nonlinear,
    };
    let lift = curve("lift", &args.lift_samples, args.lift_slope, args.lift_intercept)
        .context("invalid lift curve")?;
    let drag = curve("drag", &args.drag_samples, args.drag_slope, args.drag_intercept)
        .context("invalid drag curve")?;
    let stations = stations(args, &rotor, &lift)?;

    info!(stations = stations.len(), %method, "analyzing rotor");
    let outcomes = analyze_stations(&stations, &rotor, &lift, &drag, method, &Config::default())
        .context("invalid rotor input")?;

    let reports: Vec<StationReport> = outcomes
        .into_iter()
        .enumerate()
        .map(|(index, outcome)| match outcome {
            Ok(result) => StationReport {
                index,
                result: Some(result),
                error: None,
            },
            Err(error) => {
                let error = format!("{:#}", anyhow::Error::new(error));
                warn!(station = index, %error, "station failed");
                StationReport {
                    index,
                    result: None,
                    error: Some(error),
                }
            }
        })
        .collect();

    let solved: Vec<StationResult> = reports.iter().filter_map(|r| r.result).collect();
    let performance = RotorPerformance::from_stations(&solved, rotor.tip_speed_ratio);

    if args.json {
        let report = Report {
            rotor: &rotor,
            method,
            stations: reports,
            performance,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_table(&reports, &performance);
    }
    Ok(())
}

fn curve(name: &str, samples: &[[f64; 2]], slope: f64, intercept: f64) -> Result<AeroCurve> {
    if samples.is_empty() {
        return Ok(AeroCurve::linear(slope, intercept));
    }
    let curve = EmpiricalCurve::new(
        samples
            .iter()
            .map(|&[alpha, coefficient]| (Angle::new::<degree>(alpha), coefficient)),
    )?;
    let (lower, upper) = curve.domain();
    info!(
        curve = name,
        samples = curve.len(),
        lower = lower.get::<degree>(),
        upper = upper.get::<degree>(),
        "empirical curve"
    );
    Ok(curve.into())
}

fn stations(args: &RotorArgs, rotor: &RotorConfig, lift: &AeroCurve) -> Result<Vec<BladeStation>> {
    if let Some(wake) = args.design {
        let angle_of_attack = Angle::new::<degree>(args.design_alpha);
        let design = DesignPoint {
            lift_coefficient: lift.coefficient(angle_of_attack)?,
            angle_of_attack,
        };
        let wake = match wake {
            WakeArg::Betz => WakeModel::Betz,
            WakeArg::WakeRotation => WakeModel::WakeRotation,
        };
        return optimum_blade(&design, rotor, args.sections, wake).context("invalid blade design");
    }

    let table: &[[f64; 3]] = if args.stations.is_empty() {
        &DEMO_STATIONS
    } else {
        &args.stations
    };
    Ok(table
        .iter()
        .map(|&[r, chord, twist]| {
            BladeStation::new(r, Length::new::<meter>(chord), Angle::new::<radian>(twist))
        })
        .collect())
}

fn print_table(reports: &[StationReport], performance: &RotorPerformance) {
    println!(
        "{:>10} {:>10} {:>12} {:>10} {:>10}",
        "radius[m]", "tip loss", "alpha[deg]", "Cl", "Cp"
    );
    for report in reports {
        match (&report.result, &report.error) {
            (Some(r), _) => println!(
                "{:>10.3} {:>10.4} {:>12.3} {:>10.4} {:>10.5}",
                r.local_radius.get::<meter>(),
                r.tip_loss_factor,
                r.angle_of_attack.get::<degree>(),
                r.lift_coefficient,
                r.local_power_coefficient,
            ),
            (None, Some(error)) => println!("station {}: {error}", report.index),
            (None, None) => {}
        }
    }
    println!();
    println!(
        "Cp = {:.4}  Cq = {:.4}  mean a = {:.4}  ({} stations)",
        performance.power_coefficient,
        performance.torque_coefficient,
        performance.mean_axial_induction,
        performance.stations,
    );
}
