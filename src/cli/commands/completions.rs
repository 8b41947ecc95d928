//! `pricecalc completions` command - print a shell completion script

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use miette::Result;
use std::io;

use crate::cli::{Cli, GlobalOpts};

#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn run(args: CompletionsArgs, _global: &GlobalOpts) -> Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "pricecalc", &mut io::stdout());
    Ok(())
}
