//! `pricecalc new` command - write a worksheet template

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::Config;
use crate::entities::{margin_from_percent, GlobalSettings};
use crate::schema::template::{TemplateContext, TemplateGenerator};

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// File to create (prints to stdout if omitted)
    pub path: Option<PathBuf>,

    /// Number of placeholder products (default from config, else 3)
    #[arg(long, short = 'n', value_name = "COUNT")]
    pub products: Option<usize>,

    /// Monthly fixed cost to pre-fill
    #[arg(long, value_name = "AMOUNT")]
    pub fixed_cost: Option<f64>,

    /// Target gross margin in percent to pre-fill
    #[arg(long, value_name = "PERCENT")]
    pub margin: Option<f64>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();

    let settings = GlobalSettings::new(
        args.fixed_cost.unwrap_or_else(|| config.fixed_cost()),
        args.margin
            .map(margin_from_percent)
            .unwrap_or_else(|| config.target_margin()),
    );
    settings.validate(config.max_target_margin())?;

    let mut ctx = TemplateContext::new(settings.fixed_cost, settings.target_margin)
        .with_product_count(args.products.unwrap_or_else(|| config.product_count()));
    if let Some(currency) = global.currency.as_deref().or(config.currency()) {
        ctx = ctx.with_currency(currency);
    }

    let generator = TemplateGenerator::new()?;
    let yaml = generator.generate_worksheet(&ctx)?;

    let Some(path) = args.path else {
        print!("{}", yaml);
        return Ok(());
    };

    if path.exists() && !args.force {
        return Err(miette::miette!(
            help = "use --force to overwrite it",
            "{} already exists",
            path.display()
        ));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).into_diagnostic()?;
    }
    fs::write(&path, &yaml).into_diagnostic()?;
    tracing::info!(path = %path.display(), products = ctx.product_count, "wrote worksheet");

    if !global.quiet {
        println!(
            "{} Created worksheet {} with {} product(s)",
            style("✓").green(),
            style(path.display()).cyan(),
            ctx.product_count
        );
        println!(
            "  Fill in volumes and costs, then run: {}",
            style(format!("pricecalc calc {}", path.display())).yellow()
        );
    }

    Ok(())
}
