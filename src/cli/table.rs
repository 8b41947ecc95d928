//! Table rendering for pricing results

use tabled::builder::Builder;
use tabled::settings::{Alignment, Style};

use crate::cli::helpers::{format_amount, format_percent, truncate_str};
use crate::core::ProductResult;

/// Longest product name shown before truncation
const NAME_WIDTH: usize = 32;

/// Column headers, in display order
pub const RESULT_COLUMNS: &[&str] = &[
    "Product",
    "Volume",
    "Variable cost/unit",
    "Price/unit",
    "Volume share",
    "Allocated fixed cost",
    "Fixed cost/unit",
    "Fully-loaded cost/unit",
    "Suggested price",
    "Profit/unit",
    "Monthly profit",
];

/// Format one result as table cells, in `RESULT_COLUMNS` order
pub fn result_cells(row: &ProductResult) -> Vec<String> {
    vec![
        truncate_str(&row.product.name, NAME_WIDTH),
        format_amount(row.product.volume, 0),
        format_amount(row.product.variable_cost_per_unit, 2),
        format_amount(row.product.current_price_per_unit, 2),
        format_percent(row.volume_share),
        format_amount(row.allocated_fixed_cost, 2),
        format_amount(row.fixed_cost_per_unit, 2),
        format_amount(row.fully_loaded_cost_per_unit, 2),
        format_amount(row.suggested_price, 2),
        format_amount(row.profit_per_unit, 2),
        format_amount(row.total_monthly_profit, 2),
    ]
}

/// Render results as a bordered table
pub fn render_results(rows: &[ProductResult]) -> String {
    let mut builder = Builder::default();
    builder.push_record(RESULT_COLUMNS.iter().map(|h| h.to_string()));
    for row in rows {
        builder.push_record(result_cells(row));
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.with(Alignment::right());
    table.to_string()
}
