//! pricecalc: fixed-cost allocation and target-margin pricing
//!
//! Spreads a monthly fixed cost across products by sales volume, derives a
//! fully-loaded unit cost and the price that reaches a target gross margin,
//! and reports profit at current prices.

pub mod cli;
pub mod core;
pub mod entities;
pub mod schema;
pub mod yaml;
