//! Blade element momentum (BEM) analysis of horizontal-axis wind turbine rotors.
//!
//! A blade is described by an ordered table of [`BladeStation`]s. Each station
//! is solved independently against a shared [`RotorConfig`], using either the
//! closed-form linear lift model ([`Method::Linear`]) or a damped search on an
//! empirical lift curve ([`Method::Nonlinear`]).
//!
//! ```ignore
//! let results = analyze_rotor(&stations, &rotor, &lift, &drag, Method::Linear)?;
//! let summary = RotorPerformance::from_stations(&results, rotor.tip_speed_ratio);
//! ```

mod airfoil;
mod config;
mod design;
mod error;
mod performance;
mod rotor;
mod station;
mod tip_loss;

pub use airfoil::{AeroCurve, CurveError, EmpiricalCurve};
pub use config::{Config, ConfigError, LinearConfig, NonlinearConfig};
pub use design::{DesignPoint, WakeModel, optimum_blade};
pub use error::{DomainError, InputError, RotorError, StationError};
pub use performance::RotorPerformance;
pub use rotor::{Method, RotorConfig, analyze_rotor, analyze_rotor_with, analyze_stations};
pub use station::{BladeStation, StationResult, Termination};
pub use tip_loss::prandtl;
