//! vmviews CLI
//!
//! ## Usage
//!
//! ```bash
//! vmviews list                          # Registered views
//! vmviews show provision -a 5.6         # One outline for an appliance version
//! vmviews catalog --format json         # Every outline
//! vmviews config --config views.yaml    # Effective configuration
//! ```

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use vmviews_cli::{handlers, Cli, CliConfig, CliResult, Commands, Printer, Verbosity};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(config.verbosity);
    let printer = Printer::new(config.color);

    match run(&cli, &config, &printer) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            printer.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(cli.color.into())
        .with_config_path(cli.config.clone())
}

fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(cli: &Cli, config: &CliConfig, printer: &Printer) -> CliResult<()> {
    let text = match cli.command {
        Commands::List => handlers::execute_list(config, printer)?,
        Commands::Show(ref args) => handlers::execute_show(config, &args.view, &args.outline)?,
        Commands::Catalog(ref args) => handlers::execute_catalog(config, &args.outline)?,
        Commands::Config => handlers::execute_config(config)?,
    };
    printer.print(&text)?;
    Ok(())
}
