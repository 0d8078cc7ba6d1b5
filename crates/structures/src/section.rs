use uom::si::f64::{Length, Mass};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::units::FlexuralRigidity;

/// A lumped-mass beam section.
///
/// Sections are ordered from the free tip (index 0) to the clamped root.
/// The section's mass is lumped at its tip-side station and its length and
/// stiffness form the massless field toward the next station.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BeamSection {
    pub length: Length,
    pub mass: Mass,
    pub stiffness: FlexuralRigidity,
}

impl BeamSection {
    #[must_use]
    pub fn new(length: Length, mass: Mass, stiffness: FlexuralRigidity) -> Self {
        Self {
            length,
            mass,
            stiffness,
        }
    }
}
