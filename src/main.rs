use clap::Parser;
use miette::Result;
use pricecalc::cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let global = &cli.global;
    match cli.command {
        Commands::Calc(args) => pricecalc::cli::commands::calc::run(args, global),
        Commands::New(args) => pricecalc::cli::commands::new::run(args, global),
        Commands::Validate(args) => pricecalc::cli::commands::validate::run(args, global),
        Commands::Interactive(args) => pricecalc::cli::commands::interactive::run(args, global),
        Commands::Completions(args) => pricecalc::cli::commands::completions::run(args, global),
    }
}

/// Logs go to stderr; RUST_LOG wins over -v
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
