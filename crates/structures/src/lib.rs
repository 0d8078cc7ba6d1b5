//! Bending vibration of cantilevered wind turbine blades.
//!
//! - [`find_natural_frequencies`] and [`scan_beam`] apply the Myklestad
//!   transfer method to a nonuniform, rotating blade described tip-first as
//!   a sequence of [`BeamSection`]s.
//! - [`UniformBeam`] gives the closed-form Euler frequencies of a uniform
//!   cantilever, useful as a reference for the transfer method.

mod error;
mod euler;
mod myklestad;
mod section;
mod units;

pub use error::{EulerError, InputError, MyklestadError};
pub use euler::{EulerMode, UniformBeam, characteristic_root};
pub use myklestad::{
    FrequencyScan, ModeScan, NaturalFrequency, boundary_residual, find_natural_frequencies,
    scan_beam,
};
pub use section::BeamSection;
pub use units::{FlexuralRigidity, flexural_rigidity};
