//! CLI module - argument parsing, command dispatch and rendering

pub mod args;
pub mod commands;
pub mod helpers;
pub mod output;
pub mod table;

pub use args::{Cli, Commands, GlobalOpts, OutputFormat};
