//! `pricecalc interactive` command - enter a worksheet at prompts

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::output::print_report;
use crate::cli::GlobalOpts;
use crate::core::{compute, Config};
use crate::entities::{margin_from_percent, GlobalSettings, ProductInput, Worksheet};

/// Margin slider stops: 0% to 90% in 5% steps
const MARGIN_STEP: u32 = 5;

#[derive(clap::Args, Debug)]
pub struct InteractiveArgs {
    /// Save the entered worksheet to this file afterwards
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,
}

/// Selectable margin percentages up to `max_margin`
pub fn margin_choices(max_margin: f64) -> Vec<u32> {
    let max_percent = (max_margin * 100.0).round() as u32;
    (0..=max_percent).step_by(MARGIN_STEP as usize).collect()
}

/// Index of the choice closest to `margin`
fn nearest_choice(choices: &[u32], margin: f64) -> usize {
    let target = margin * 100.0;
    choices
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            let da = (f64::from(**a) - target).abs();
            let db = (f64::from(**b) - target).abs();
            da.total_cmp(&db)
        })
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

fn non_negative(value: &f64) -> std::result::Result<(), &'static str> {
    if value.is_finite() && *value >= 0.0 {
        Ok(())
    } else {
        Err("enter zero or a positive number")
    }
}

pub fn run(args: InteractiveArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let theme = ColorfulTheme::default();

    println!("{}", style("Global settings").bold());

    let fixed_cost: f64 = Input::with_theme(&theme)
        .with_prompt("Monthly fixed cost")
        .default(config.fixed_cost())
        .validate_with(non_negative)
        .interact_text()
        .into_diagnostic()?;

    let choices = margin_choices(config.max_target_margin());
    let labels: Vec<String> = choices.iter().map(|p| format!("{}%", p)).collect();
    let selection = Select::with_theme(&theme)
        .with_prompt("Target gross margin")
        .items(&labels)
        .default(nearest_choice(&choices, config.target_margin()))
        .interact()
        .into_diagnostic()?;
    let target_margin = margin_from_percent(f64::from(choices[selection]));

    let count: usize = Input::with_theme(&theme)
        .with_prompt("Number of products")
        .default(config.product_count().max(1))
        .validate_with(|n: &usize| if *n >= 1 { Ok(()) } else { Err("enter at least 1") })
        .interact_text()
        .into_diagnostic()?;

    let mut products = Vec::with_capacity(count);
    for row in 1..=count {
        println!("\n{}", style(format!("Product {}", row)).bold());
        products.push(prompt_product(&theme, row)?);
    }

    let currency = global.currency.as_deref().or(config.currency());
    let settings = GlobalSettings::new(fixed_cost, target_margin);
    let sheet = Worksheet::from_parts(settings, products, currency.map(str::to_string));
    sheet.validate(config.max_target_margin())?;

    let report = compute(&settings, &sheet.products);
    tracing::debug!(products = sheet.products.len(), "computed interactive worksheet");

    println!();
    print_report(&report, global, currency)?;

    let save_path = match args.save {
        Some(path) => Some(path),
        None => {
            let save = Confirm::with_theme(&theme)
                .with_prompt("Save this worksheet?")
                .default(false)
                .interact()
                .into_diagnostic()?;
            if save {
                let path: String = Input::with_theme(&theme)
                    .with_prompt("File name")
                    .default("worksheet.yaml".to_string())
                    .interact_text()
                    .into_diagnostic()?;
                Some(PathBuf::from(path))
            } else {
                None
            }
        }
    };

    if let Some(path) = save_path {
        let yaml = sheet.to_yaml().into_diagnostic()?;
        std::fs::write(&path, yaml).into_diagnostic()?;
        tracing::info!(path = %path.display(), "saved worksheet");
        println!(
            "{} Saved worksheet to {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    Ok(())
}

fn prompt_product(theme: &ColorfulTheme, row: usize) -> Result<ProductInput> {
    let name: String = Input::with_theme(theme)
        .with_prompt("Name")
        .default(ProductInput::placeholder_name(row))
        .interact_text()
        .into_diagnostic()?;

    let amount = |prompt: &str| -> Result<f64> {
        Input::with_theme(theme)
            .with_prompt(prompt)
            .default(0.0)
            .validate_with(non_negative)
            .interact_text()
            .into_diagnostic()
    };

    let volume = amount("Monthly volume (units)")?;
    let variable_cost = amount("Variable cost per unit")?;
    let price = amount("Current price per unit (0 if not set)")?;

    Ok(ProductInput::new(name, volume, variable_cost, price))
}
