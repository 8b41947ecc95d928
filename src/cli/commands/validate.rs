//! `pricecalc validate` command - check worksheet files before computing

use console::style;
use miette::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::cli::GlobalOpts;
use crate::core::Config;
use crate::schema::registry::SchemaRegistry;
use crate::schema::validator::Validator;

/// File extensions treated as worksheets when walking directories
const WORKSHEET_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Worksheet files or directories to validate
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Continue validation after first error
    #[arg(long)]
    pub keep_going: bool,

    /// Show summary only, don't show individual errors
    #[arg(long)]
    pub summary: bool,
}

/// Validation statistics
#[derive(Default)]
struct ValidationStats {
    files_checked: usize,
    files_passed: usize,
    files_failed: usize,
    total_errors: usize,
}

pub fn run(args: ValidateArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let registry = SchemaRegistry::default();
    let validator = Validator::new(&registry)?;
    let max_margin = config.max_target_margin();

    let files = expand_paths(&args.paths);
    if files.is_empty() {
        return Err(miette::miette!(
            help = "pass worksheet files (.yaml, .yml, .json) or directories containing them",
            "no worksheet files found"
        ));
    }

    let mut stats = ValidationStats::default();
    let mut had_error = false;
    let verbose = !args.summary && !global.quiet;

    if verbose {
        println!(
            "{} Validating {} file(s)...\n",
            style("→").blue(),
            files.len()
        );
    }

    for path in &files {
        stats.files_checked += 1;
        let filename = path.display().to_string();

        let outcome = match std::fs::read_to_string(path) {
            Ok(content) => validator
                .validate(&content, &filename, max_margin)
                .map_err(|e| (e.violation_count(), miette::Report::new(e))),
            Err(e) => Err((1, miette::miette!("{}: {}", filename, e))),
        };

        match outcome {
            Ok(sheet) => {
                stats.files_passed += 1;
                tracing::debug!(file = %filename, products = sheet.products.len(), "valid");
                if verbose {
                    println!(
                        "{} {} ({} product(s))",
                        style("✓").green(),
                        filename,
                        sheet.products.len()
                    );
                }
            }
            Err((error_count, report)) => {
                stats.files_failed += 1;
                stats.total_errors += error_count;
                had_error = true;

                if verbose {
                    println!("{} {}", style("✗").red(), filename);
                    println!("{:?}", report);
                }

                if !args.keep_going {
                    break;
                }
            }
        }
    }

    if !global.quiet {
        println!();
        println!("{}", style("─".repeat(60)).dim());
        println!("{}", style("Validation Summary").bold());
        println!("{}", style("─".repeat(60)).dim());
        println!("  Files checked:  {}", style(stats.files_checked).cyan());
        println!("  Files passed:   {}", style(stats.files_passed).green());
        println!("  Files failed:   {}", style(stats.files_failed).red());
        println!("  Total errors:   {}", style(stats.total_errors).red());
        println!();
    }

    if had_error {
        if stats.files_failed == 1 {
            Err(miette::miette!("Validation failed: 1 file has errors"))
        } else {
            Err(miette::miette!(
                "Validation failed: {} files have errors",
                stats.files_failed
            ))
        }
    } else {
        if !global.quiet {
            println!("{} All files passed validation!", style("✓").green().bold());
        }
        Ok(())
    }
}

fn is_worksheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| WORKSHEET_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Expand paths - if a directory is given, find all worksheet files in it
fn expand_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
            {
                if is_worksheet(entry.path()) {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else {
            // Explicit files are checked even without a known extension
            files.push(path.clone());
        }
    }

    files.sort();
    files.dedup();
    files
}
