//! `pricecalc calc` command - compute the pricing table

use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};

use crate::cli::helpers::read_stdin;
use crate::cli::output::print_report;
use crate::cli::GlobalOpts;
use crate::core::{compute, Config};
use crate::entities::{margin_from_percent, read_products_csv_file, ProductInput, Worksheet};

#[derive(clap::Args, Debug)]
pub struct CalcArgs {
    /// Worksheet file (YAML or JSON); use "-" to read stdin
    pub worksheet: Option<PathBuf>,

    /// Append product rows from a CSV file (header row required)
    #[arg(long, value_name = "PATH")]
    pub products_csv: Option<PathBuf>,

    /// Append a product: NAME:VOLUME:VARIABLE_COST[:PRICE]
    #[arg(long = "product", short = 'p', value_name = "SPEC")]
    pub products: Vec<ProductInput>,

    /// Monthly fixed cost (overrides worksheet and config)
    #[arg(long, value_name = "AMOUNT")]
    pub fixed_cost: Option<f64>,

    /// Target gross margin in percent, e.g. 40 (overrides worksheet and config)
    #[arg(long, value_name = "PERCENT")]
    pub margin: Option<f64>,
}

pub fn run(args: CalcArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let sheet = assemble_worksheet(args)?;

    let max_margin = config.max_target_margin();
    sheet.validate(max_margin)?;

    let settings = sheet.settings(config.default_settings());
    settings.validate(max_margin)?;
    tracing::debug!(?settings, products = sheet.products.len(), "computing");

    let report = compute(&settings, &sheet.products);

    let currency = global
        .currency
        .as_deref()
        .or(sheet.currency.as_deref())
        .or(config.currency());

    print_report(&report, global, currency)
}

/// Collect every input source into one worksheet
///
/// Rows keep source order: worksheet, then CSV, then `--product` flags.
/// Command-line settings replace the worksheet's.
pub fn assemble_worksheet(args: CalcArgs) -> Result<Worksheet> {
    if args.worksheet.is_none() && args.products_csv.is_none() && args.products.is_empty() {
        return Err(miette::miette!(
            help = "pass a worksheet file, --products-csv <PATH> or --product NAME:VOLUME:VARIABLE_COST[:PRICE]",
            "nothing to compute"
        ));
    }

    let mut sheet = match &args.worksheet {
        Some(path) => load_worksheet(path)?,
        None => Worksheet::default(),
    };

    if let Some(path) = &args.products_csv {
        let rows = read_products_csv_file(path)?;
        tracing::info!(path = %path.display(), rows = rows.len(), "read product CSV");
        sheet.extend_products(rows);
    }

    sheet.extend_products(args.products);

    if let Some(fixed_cost) = args.fixed_cost {
        sheet.fixed_cost = Some(fixed_cost);
    }
    if let Some(percent) = args.margin {
        sheet.target_margin = Some(margin_from_percent(percent));
    }

    Ok(sheet)
}

fn load_worksheet(path: &Path) -> Result<Worksheet> {
    let sheet = if path == Path::new("-") {
        let content = read_stdin().into_diagnostic()?;
        Worksheet::parse(&content, "<stdin>")?
    } else {
        Worksheet::load(path)?
    };

    tracing::info!(
        source = %path.display(),
        products = sheet.products.len(),
        "loaded worksheet"
    );
    Ok(sheet)
}
