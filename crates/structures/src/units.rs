use uom::{
    si::{
        ISQ, Quantity, SI,
        area::square_meter,
        f64::{Area, Force},
        force::newton,
    },
    typenum::{N2, P1, P3, Z0},
};

/// Flexural rigidity `EI`, N·m² in SI.
pub type FlexuralRigidity = Quantity<ISQ<P3, P1, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Creates a [`FlexuralRigidity`] from a value in N·m².
#[must_use]
pub fn flexural_rigidity(newton_square_meters: f64) -> FlexuralRigidity {
    Force::new::<newton>(newton_square_meters) * Area::new::<square_meter>(1.0)
}
