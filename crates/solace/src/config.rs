// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `solace config` command implementation.
//!
//! Inspection helpers for the layered configuration: print the merged
//! result, list the search paths, or write a commented starter file.

use std::path::PathBuf;

use colored::Colorize;
use solace_config::model::SolaceConfig;
use solace_core::SolaceError;

use crate::ConfigAction;

/// Starter configuration written by `solace config init`. Every key is
/// commented out at its default; only the API key needs filling in.
const CONFIG_TEMPLATE: &str = r#"# Solace configuration.
# All keys are optional and shown at their defaults. Uncomment to override.
# Environment variables with the SOLACE_ prefix override this file.

[service]
# name = "solace"
# log_level = "info"    # trace, debug, info, warn, error

[server]
# bind_address = "127.0.0.1"
# port = 3000

[storage]
# Defaults to solace.db under the platform data directory.
# database_path = "/path/to/solace.db"
# wal_mode = true

[qwen]
# Required before `solace serve` can start. Also settable via the
# SOLACE_QWEN_API_KEY environment variable.
# api_key = ""
# model = "qwen3-32b"
# base_url = "https://api-ap-southeast-1.modelarts-maas.com/v1"
# request_timeout_secs = 30

[exchange]
# completion_timeout_secs = 45

[client]
# server_url = "http://127.0.0.1:3000"
# owner_id = "local"
# request_timeout_secs = 60
"#;

/// Runs the `solace config` subcommand.
pub fn run_config(config: SolaceConfig, action: ConfigAction) -> Result<(), SolaceError> {
    match action {
        ConfigAction::Show => show(config),
        ConfigAction::Path => paths(),
        ConfigAction::Init => init(),
    }
}

/// Prints the merged active configuration as TOML, with the API key
/// masked so `config show` output is safe to paste into bug reports.
fn show(config: SolaceConfig) -> Result<(), SolaceError> {
    let rendered = toml::to_string_pretty(&redacted(config))
        .map_err(|e| SolaceError::Internal(format!("failed to render config: {e}")))?;
    print!("{rendered}");
    Ok(())
}

fn redacted(mut config: SolaceConfig) -> SolaceConfig {
    if config.qwen.api_key.is_some() {
        config.qwen.api_key = Some("<redacted>".to_string());
    }
    config
}

/// Prints the configuration search paths in merge order.
fn paths() -> Result<(), SolaceError> {
    println!("configuration files, later overrides earlier:");
    for path in search_paths() {
        let marker = if path.exists() {
            "found".green()
        } else {
            "absent".dimmed()
        };
        println!("  {} [{marker}]", path.display());
    }
    println!("environment overrides: SOLACE_* (e.g. SOLACE_QWEN_API_KEY)");
    Ok(())
}

fn search_paths() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from("/etc/solace/solace.toml")];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("solace/solace.toml"));
    }
    candidates.push(PathBuf::from("solace.toml"));
    candidates
}

/// Writes the starter configuration to the user config directory. Refuses
/// to overwrite an existing file.
fn init() -> Result<(), SolaceError> {
    let Some(config_dir) = dirs::config_dir() else {
        return Err(SolaceError::Internal(
            "no user config directory available on this platform".to_string(),
        ));
    };
    let dir = config_dir.join("solace");
    let path = dir.join("solace.toml");

    if path.exists() {
        println!(
            "{} already exists, leaving it untouched",
            path.display()
        );
        return Ok(());
    }

    std::fs::create_dir_all(&dir)
        .map_err(|e| SolaceError::Internal(format!("failed to create {}: {e}", dir.display())))?;
    std::fs::write(&path, CONFIG_TEMPLATE)
        .map_err(|e| SolaceError::Internal(format!("failed to write {}: {e}", path.display())))?;

    println!("wrote starter config to {}", path.display());
    Ok(())
}
