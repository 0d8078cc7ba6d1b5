use std::error::Error as StdError;

/// A scalar function whose sign changes mark the roots being sought.
///
/// Closures returning `Result<f64, E>` implement this trait directly, so
/// one-off residuals need no wrapper type.
pub trait Residual {
    type Error: StdError + Send + Sync + 'static;

    /// Evaluates the residual at `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying model cannot be evaluated at `x`.
    fn residual(&self, x: f64) -> Result<f64, Self::Error>;
}

impl<F, E> Residual for F
where
    F: Fn(f64) -> Result<f64, E>,
    E: StdError + Send + Sync + 'static,
{
    type Error = E;

    fn residual(&self, x: f64) -> Result<f64, E> {
        self(x)
    }
}
