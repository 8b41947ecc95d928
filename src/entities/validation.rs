//! Boundary validation errors for worksheet, CSV and command-line input
//!
//! The pricing engine never fails; everything that can go wrong with user
//! input is caught here, before the engine runs.

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while accepting user input
#[derive(Debug, Error, Diagnostic)]
pub enum InputError {
    #[error("fixed cost must be zero or positive, got {0}")]
    #[diagnostic(
        code(pricecalc::input::negative_fixed_cost),
        help("enter the total monthly fixed cost, e.g. 100000")
    )]
    NegativeFixedCost(f64),

    #[error("target margin {value} is outside the allowed range 0 to {max}")]
    #[diagnostic(
        code(pricecalc::input::margin_out_of_range),
        help("worksheets take a fraction (0.40 = 40%), --margin takes a percentage (40)")
    )]
    MarginOutOfRange { value: f64, max: f64 },

    #[error("product {row} ({name}): {field} must be zero or positive, got {value}")]
    #[diagnostic(code(pricecalc::input::negative_value))]
    NegativeValue {
        row: usize,
        name: String,
        field: &'static str,
        value: f64,
    },

    #[error("{field} is not a finite number")]
    #[diagnostic(code(pricecalc::input::not_finite))]
    NotFinite { field: String },

    #[error("invalid product spec '{spec}': {reason}")]
    #[diagnostic(
        code(pricecalc::input::product_spec),
        help("use NAME:VOLUME:VARIABLE_COST[:PRICE], e.g. \"Widget:1000:50:0\"")
    )]
    ProductSpec { spec: String, reason: String },

    #[error("failed to read product CSV {path}: {message}")]
    #[diagnostic(
        code(pricecalc::input::csv),
        help("expected a header row with name, volume, variable_cost_per_unit, current_price_per_unit")
    )]
    Csv { path: String, message: String },
}

/// Reject NaN and infinities, then negative values
pub(crate) fn check_amount(
    value: f64,
    field: &str,
    on_negative: impl FnOnce(f64) -> InputError,
) -> Result<(), InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite {
            field: field.to_string(),
        });
    }
    if value < 0.0 {
        return Err(on_negative(value));
    }
    Ok(())
}
