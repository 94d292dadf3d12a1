// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Solace - an AI-companion journal.
//!
//! This is the binary entry point for the Solace journal service and its
//! interactive shell.

use clap::{Parser, Subcommand};
use colored::Colorize;

mod config;
mod serve;
mod shell;

/// Solace - an AI-companion journal.
#[derive(Parser, Debug)]
#[command(name = "solace", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Solace journal server.
    Serve,
    /// Launch an interactive journal conversation.
    Shell {
        /// Continue an existing entry instead of starting a new one.
        #[arg(long)]
        entry: Option<i64>,
    },
    /// Inspect or initialize Solace configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the merged active configuration as TOML.
    Show,
    /// Print the configuration file search paths.
    Path,
    /// Write a starter configuration file to the user config directory.
    Init,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match solace_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            solace_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Shell { entry }) => shell::run_shell(config, entry).await,
        Some(Commands::Config { action }) => config::run_config(config, action),
        None => {
            println!("solace: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}
