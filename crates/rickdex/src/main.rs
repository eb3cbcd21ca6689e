mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rickdex_core::Catalog;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        mut global,
        command,
    } = cli;

    match command {
        // Local state commands don't need the catalog
        Command::Config(args) => {
            config::apply_defaults(&mut global, &config::load_config_or_default());
            commands::config_cmd::handle(args, &global)
        }
        Command::Session(args) => {
            config::apply_defaults(&mut global, &config::load_config_or_default());
            commands::session_cmd::handle(args, &global)
        }

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "rickdex", &mut std::io::stdout());
            Ok(())
        }

        // Everything else talks to the catalog
        cmd => {
            let cfg = config::load_config()?;
            config::apply_defaults(&mut global, &cfg);
            let catalog = Catalog::new(config::resolve_catalog_config(&cfg, &global)?)?;

            tracing::debug!(command = ?cmd, base_url = %catalog.config().base_url, "dispatching command");
            commands::dispatch(cmd, &catalog, &global).await
        }
    }
}
