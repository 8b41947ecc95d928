//! Core module - the pricing engine and configuration

pub mod config;
pub mod engine;

pub use config::Config;
pub use engine::{compute, suggested_price, PricingReport, ProductResult, Summary};
