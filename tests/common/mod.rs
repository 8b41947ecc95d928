//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get a pricecalc command isolated from the user's config and env
pub fn pricecalc() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("pricecalc"));
    cmd.env("PRICECALC_CONFIG", "/nonexistent/pricecalc/config.yaml")
        .env_remove("PRICECALC_CURRENCY")
        .env_remove("RUST_LOG");
    cmd
}

/// Two products, 700 and 300 units, one priced and one not
pub const TWO_PRODUCT_SHEET: &str = r#"
fixed_cost: 100000
target_margin: 0.4
products:
  - name: A
    volume: 700
    variable_cost_per_unit: 50
    current_price_per_unit: 0
  - name: B
    volume: 300
    variable_cost_per_unit: 20
    current_price_per_unit: 80
"#;

/// Helper to write a file into a temp directory
pub fn write_file(tmp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = tmp.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Helper to run `calc -f csv` and return stdout
pub fn calc_csv(args: &[&str]) -> String {
    let output = pricecalc()
        .arg("calc")
        .args(args)
        .args(["-f", "csv"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "calc failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}
