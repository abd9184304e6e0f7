mod cli;
mod commands;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use commands::SyncOptions;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(1);
        }
        // --help and --version
        Err(e) => e.exit(),
    };

    init_tracing(&cli);

    if let Err(e) = dispatch(&cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn dispatch(cli: &Cli) -> anyhow::Result<()> {
    let options = SyncOptions {
        quiet: cli.quiet,
        dry_run: cli.dry_run,
        exclude: &cli.exclude,
        compare: cli.compare.map(Into::into),
        config_path: cli.config.as_deref(),
        no_config: cli.no_config,
    };

    if !matches!(cli.command, Commands::Run { .. }) {
        ctrlc::set_handler(|| {
            eprintln!("\n\nInterrupted by user (Ctrl+C)");
            std::process::exit(130); // Standard exit code for SIGINT
        })
        .context("Failed to set Ctrl+C handler")?;
    }

    match &cli.command {
        Commands::Run {
            source,
            target,
            log_file,
            interval,
        } => {
            commands::Run::execute(source, target, log_file.as_deref(), *interval, &options)
                .context("Failed to execute run command")?;
        }
        Commands::Once {
            source,
            target,
            log_file,
        } => {
            commands::Once::execute(source, target, log_file.as_deref(), &options)
                .context("Failed to execute once command")?;
        }
        Commands::Status { source, target } => {
            commands::Status::execute(source, target, &options)
                .context("Failed to execute status command")?;
        }
        Commands::Config => {
            commands::Config::execute(&options).context("Failed to execute config command")?;
        }
    }

    Ok(())
}
