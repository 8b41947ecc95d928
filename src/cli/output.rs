//! Output formatting for pricing reports

use console::style;
use miette::{IntoDiagnostic, Result};
use std::io::Write;

use crate::cli::helpers::{format_money, format_percent, smart_round};
use crate::cli::table::render_results;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::PricingReport;

/// Shown under the table: unset prices are reported as a loss, not hidden
pub const UNSET_PRICE_HINT: &str = "Products with a current price of 0 have no price set yet; \
their profit shows the full cost as a loss. Use the Suggested price column as the \
price-setting reference for them.";

/// Machine-readable column names for CSV/TSV, in display order
pub const CSV_HEADERS: &[&str] = &[
    "name",
    "volume",
    "variable_cost_per_unit",
    "current_price_per_unit",
    "volume_share",
    "allocated_fixed_cost",
    "fixed_cost_per_unit",
    "fully_loaded_cost_per_unit",
    "suggested_price",
    "profit_per_unit",
    "total_monthly_profit",
];

/// Resolve `auto` to the table view
pub fn effective_format(format: OutputFormat) -> OutputFormat {
    match format {
        OutputFormat::Auto => OutputFormat::Table,
        other => other,
    }
}

/// Print a report to stdout in the requested format
pub fn print_report(report: &PricingReport, global: &GlobalOpts, currency: Option<&str>) -> Result<()> {
    let format = effective_format(global.format);
    tracing::debug!(%format, rows = report.results.len(), "rendering report");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report).into_diagnostic()?;
            writeln!(out, "{}", json).into_diagnostic()?;
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(report).into_diagnostic()?;
            write!(out, "{}", yaml).into_diagnostic()?;
        }
        OutputFormat::Csv => write_delimited(report, b',', &mut out)?,
        OutputFormat::Tsv => write_delimited(report, b'\t', &mut out)?,
        OutputFormat::Auto | OutputFormat::Table => {
            write!(out, "{}", render_table_report(report, currency, global.quiet)).into_diagnostic()?;
        }
    }

    Ok(())
}

/// Table, headline and hint as one string
pub fn render_table_report(report: &PricingReport, currency: Option<&str>, quiet: bool) -> String {
    let mut text = String::new();

    if !quiet {
        text.push_str(&format!(
            "{} fixed cost {}, target margin {}\n",
            style("Settings:").bold(),
            format_money(report.settings.fixed_cost, currency),
            format_percent(report.settings.target_margin),
        ));
    }

    text.push_str(&render_results(&report.results));
    text.push('\n');

    text.push_str(&format!(
        "{} {}\n",
        style("Total monthly profit at current prices:").bold(),
        style(format_money(report.summary.total_profit, currency)).cyan(),
    ));

    if !quiet {
        text.push_str(&format!("{} {}\n", style("Hint:").yellow(), UNSET_PRICE_HINT));
        if report.has_unpriced() {
            text.push_str(&format!(
                "      {} of {} product(s) have no current price.\n",
                report.summary.unpriced_products,
                report.results.len()
            ));
        }
    }

    text
}

/// Write product rows as delimited text with a header row
pub fn write_delimited<W: Write>(report: &PricingReport, delimiter: u8, out: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().delimiter(delimiter).from_writer(out);

    wtr.write_record(CSV_HEADERS).into_diagnostic()?;
    for row in &report.results {
        let numbers = [
            row.product.volume,
            row.product.variable_cost_per_unit,
            row.product.current_price_per_unit,
            row.volume_share,
            row.allocated_fixed_cost,
            row.fixed_cost_per_unit,
            row.fully_loaded_cost_per_unit,
            row.suggested_price,
            row.profit_per_unit,
            row.total_monthly_profit,
        ];
        let mut record = vec![row.product.name.clone()];
        record.extend(numbers.iter().map(|v| smart_round(*v)));
        wtr.write_record(&record).into_diagnostic()?;
    }

    wtr.flush().into_diagnostic()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compute;
    use crate::entities::{GlobalSettings, ProductInput};

    fn scenario_a() -> PricingReport {
        compute(
            &GlobalSettings::new(100_000.0, 0.40),
            &[ProductInput::new("Widget", 1000.0, 50.0, 0.0)],
        )
    }

    #[test]
    fn test_effective_format() {
        assert_eq!(effective_format(OutputFormat::Auto), OutputFormat::Table);
        assert_eq!(effective_format(OutputFormat::Yaml), OutputFormat::Yaml);
        assert_eq!(effective_format(OutputFormat::Csv), OutputFormat::Csv);
    }

    #[test]
    fn test_csv_rendering_of_single_product() {
        let mut buf = Vec::new();
        write_delimited(&scenario_a(), b',', &mut buf).unwrap();
        let csv = String::from_utf8(buf).unwrap();

        insta::assert_snapshot!(csv, @r"
        name,volume,variable_cost_per_unit,current_price_per_unit,volume_share,allocated_fixed_cost,fixed_cost_per_unit,fully_loaded_cost_per_unit,suggested_price,profit_per_unit,total_monthly_profit
        Widget,1000,50,0,1,100000,100,150,250,-150,-150000
        ");
    }

    #[test]
    fn test_tsv_uses_tabs() {
        let mut buf = Vec::new();
        write_delimited(&scenario_a(), b'\t', &mut buf).unwrap();
        let tsv = String::from_utf8(buf).unwrap();
        assert!(tsv.lines().nth(1).unwrap().starts_with("Widget\t1000\t50"));
    }

    #[test]
    fn test_table_report_has_headline_and_hint() {
        console::set_colors_enabled(false);
        let text = render_table_report(&scenario_a(), Some("USD"), false);

        assert!(text.contains("Total monthly profit at current prices: -150,000 USD"));
        assert!(text.contains("Suggested price column"));
        assert!(text.contains("target margin 40.0%"));
        assert!(text.contains("1 of 1 product(s) have no current price."));
    }

    #[test]
    fn test_table_report_without_unpriced_rows_has_no_count() {
        console::set_colors_enabled(false);
        let report = compute(
            &GlobalSettings::new(1_000.0, 0.4),
            &[ProductInput::new("Priced", 100.0, 5.0, 30.0)],
        );
        let text = render_table_report(&report, None, false);

        assert!(text.contains("Hint:"));
        assert!(!text.contains("have no current price"));
    }

    #[test]
    fn test_quiet_table_report_omits_hint() {
        console::set_colors_enabled(false);
        let text = render_table_report(&scenario_a(), None, true);

        assert!(text.contains("Total monthly profit at current prices: -150,000"));
        assert!(!text.contains("Hint:"));
        assert!(!text.contains("Settings:"));
        assert!(!text.contains("have no current price"));
    }
}
