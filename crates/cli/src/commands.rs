pub mod modes;
pub mod rotor;

use std::str::FromStr;

/// Parses a comma-separated list of exactly `N` numbers.
pub(crate) fn parse_tuple<const N: usize>(text: &str) -> Result<[f64; N], String> {
    let values = text
        .split(',')
        .map(|part| f64::from_str(part.trim()).map_err(|e| format!("`{part}`: {e}")))
        .collect::<Result<Vec<_>, _>>()?;

    values
        .try_into()
        .map_err(|values: Vec<f64>| format!("expected {N} comma-separated values, got {}", values.len()))
}
