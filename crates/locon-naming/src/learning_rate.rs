//! Compact scientific notation for learning rates.

use crate::NameError;

/// Render a learning rate as compact scientific notation.
///
/// One fractional mantissa digit, a `.0` fraction dropped, and a signed
/// exponent without leading zeros: `0.0001` becomes `1e-4`, `0.0012`
/// becomes `1.2e-3`, `2000.0` becomes `2e+3`.
pub fn format_learning_rate(lr: f64) -> Result<String, NameError> {
    if !lr.is_finite() {
        return Err(NameError::NonFiniteLearningRate(lr));
    }

    // Rust renders `{:.1e}` as e.g. "1.2e-3" / "2.0e3".
    let raw = format!("{:.1e}", lr);
    let (mantissa, exponent) = match raw.split_once('e') {
        Some(parts) => parts,
        None => (raw.as_str(), "0"),
    };

    let mantissa = mantissa.strip_suffix(".0").unwrap_or(mantissa);
    let exponent: i32 = exponent.parse().unwrap_or(0);

    Ok(format!("{}e{:+}", mantissa, exponent))
}
