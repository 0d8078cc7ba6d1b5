//! Scalar root-finding building blocks shared by the aerodynamic and
//! structural solvers.
//!
//! - [`Residual`]: a scalar function whose zero crossings are sought
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`scan`]: uniform grids and sign-change detection between grid samples
//! - [`bisection`]: refinement of a single sign-change bracket

mod observer;
mod residual;

pub mod bisection;
pub mod scan;

pub use observer::Observer;
pub use residual::Residual;
