//! Tabview CLI - search, sort, page through and export tabular data.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    // RUST_LOG takes precedence over the verbosity flag
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Show { file, view, json } => {
            commands::show::run(file, view, json, cli.prefs, cli.verbose)
        }

        Commands::Export {
            file,
            view,
            format,
            output,
            page_only,
        } => commands::export::run(file, view, format, output, page_only, cli.prefs, cli.verbose),

        Commands::Columns {
            file,
            toggle,
            show_all,
            hide_all,
            move_to,
        } => commands::columns::run(
            file,
            commands::columns::ColumnChanges {
                toggle,
                show_all,
                hide_all,
                move_to,
            },
            cli.prefs,
            cli.verbose,
        ),

        Commands::Serve { file, port } => commands::serve::run(file, port, cli.prefs, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
