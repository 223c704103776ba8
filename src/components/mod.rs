//! Visual widgets: the spinning globe and the particle fields.

pub mod globe;
pub mod starfield;
pub mod theme;

/// Formats a number with at most three decimals, dropping trailing zeros.
pub(crate) fn fmt_decimal(value: f64) -> String {
	let rounded = (value * 1000.0).round() / 1000.0;
	// `+ 0.0` folds negative zero into zero.
	format!("{}", rounded + 0.0)
}
