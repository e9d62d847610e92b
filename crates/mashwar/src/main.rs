// SPDX-FileCopyrightText: 2026 Mashwar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mashwar - a limousine booking relay service.
//!
//! This is the binary entry point for the Mashwar service.

mod doctor;
mod serve;
mod shutdown;

use clap::{Parser, Subcommand};

use mashwar_core::MashwarError;

/// Mashwar - a limousine booking relay service.
#[derive(Parser, Debug)]
#[command(name = "mashwar", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the booking relay server.
    Serve,
    /// Run diagnostic checks against the environment.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Manage Mashwar configuration.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Print the effective configuration as TOML, secrets redacted.
    Show,
    /// Print config file search paths and whether each exists.
    Path,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // The service refuses to start on configuration errors.
    let config = match mashwar_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            mashwar_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Doctor { plain }) => doctor::run_doctor(&config, plain).await,
        Some(Commands::Config { command }) => run_config(&config, command),
        None => {
            println!("mashwar: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Runs the `mashwar config` subcommands.
fn run_config(
    config: &mashwar_config::MashwarConfig,
    command: ConfigCommands,
) -> Result<(), MashwarError> {
    match command {
        ConfigCommands::Show => {
            let rendered = config
                .to_redacted_toml()
                .map_err(|e| MashwarError::Internal(format!("failed to render config: {e}")))?;
            println!("{rendered}");
        }
        ConfigCommands::Path => {
            for (path, exists) in mashwar_config::config_search_paths() {
                let marker = if exists { "found" } else { "not found" };
                println!("{} ({marker})", path.display());
            }
        }
    }
    Ok(())
}
