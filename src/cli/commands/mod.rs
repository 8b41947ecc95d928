//! CLI command implementations

pub mod calc;
pub mod completions;
pub mod interactive;
pub mod new;
pub mod validate;
