//! csvsheet CLI - import CSV files as spreadsheet sheets.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Import {
            files,
            output,
            format,
            config,
            encoding,
            strict,
        } => {
            let options = commands::import::ImportOptions {
                output,
                format,
                config,
                encoding,
                strict,
            };
            commands::import::run(files, options, cli.verbose).await
        }

        Commands::Inspect {
            file,
            json,
            config,
            encoding,
        } => commands::inspect::run(file, json, config, encoding, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
