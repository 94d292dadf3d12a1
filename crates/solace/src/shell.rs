// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `solace shell` command implementation.
//!
//! Launches an interactive conversation against a running Solace server
//! with colored prompt and readline history. Each invocation opens a new
//! journal entry unless `--entry` continues an existing one. The shell is
//! a thin client: every message round-trips through the server's exchange
//! pipeline, and `/refresh` re-reads the authoritative history.

use std::sync::Arc;

use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use solace_client::{ConversationDriver, DisplayedMessage, JournalApi};
use solace_config::model::SolaceConfig;
use solace_core::SolaceError;
use solace_core::types::{EntryId, OwnerId, Role};

/// Runs the `solace shell` interactive REPL.
///
/// Connects to the configured server, opens or resumes an entry, and loops
/// over user input. Replies print when the server finishes the exchange;
/// failures stay dismissible and the optimistic message stays visible.
pub async fn run_shell(config: SolaceConfig, entry: Option<i64>) -> Result<(), SolaceError> {
    let api = Arc::new(JournalApi::new(&config.client)?);
    let owner = OwnerId(config.client.owner_id.clone());

    // Fail early with a readable message when the server is unreachable.
    if let Err(e) = api.health().await {
        eprintln!(
            "{}: cannot reach the solace server at {}",
            "error".red(),
            config.client.server_url
        );
        eprintln!("start it with {} first", "solace serve".yellow());
        return Err(e);
    }

    let entry_id = match entry {
        Some(id) => EntryId(id),
        None => {
            let entry = api.create_entry(&owner, None).await?;
            println!("{}", format!("opened entry {}", entry.id).dimmed());
            entry.id
        }
    };

    let mut driver = ConversationDriver::new(api, entry_id, owner);

    // Load history. Empty for a fresh entry; also validates --entry ids.
    driver.resync().await?;
    render_transcript(driver.conversation().messages());

    // Set up readline editor.
    let mut rl = DefaultEditor::new()
        .map_err(|e| SolaceError::Internal(format!("failed to initialize readline: {e}")))?;

    // Print welcome message.
    println!("{}", "solace shell".bold().green());
    println!(
        "Type {} to exit, {} to reload history.\n",
        "/quit".yellow(),
        "/refresh".yellow()
    );

    // REPL loop.
    let prompt = format!("{}> ", "you".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "/quit" || trimmed == "/exit" {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                if trimmed == "/refresh" {
                    match driver.resync().await {
                        Ok(()) => render_transcript(driver.conversation().messages()),
                        Err(e) => eprintln!("{}: {e}", "error".red()),
                    }
                    continue;
                }
                if trimmed == "/dismiss" {
                    driver.dismiss_failure();
                    continue;
                }

                // Send the message and wait for the companion's reply.
                if let Err(e) = driver.spawn_send(trimmed) {
                    eprintln!("{}: {e}", "error".red());
                    continue;
                }
                match driver.await_reply().await {
                    Ok(reply) => {
                        println!("{} {}\n", "solace>".cyan(), reply.content);
                    }
                    Err(failure) => {
                        eprintln!("{}: {}", "error".red(), failure.message);
                        if failure.retriable {
                            eprintln!(
                                "{}",
                                "(temporary failure; send again or /refresh to see what was saved)"
                                    .dimmed()
                            );
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C
                break;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D
                break;
            }
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    println!("{}", "goodbye".dimmed());
    Ok(())
}

/// Prints the conversation history with per-role prompts. Messages that
/// failed to confirm keep a visible marker.
fn render_transcript(messages: &[DisplayedMessage]) {
    for message in messages {
        match message.role {
            Role::User => {
                if message.durable {
                    println!("{} {}", "you>".green(), message.content);
                } else {
                    println!(
                        "{} {} {}",
                        "you>".green(),
                        message.content,
                        "(unconfirmed)".yellow()
                    );
                }
            }
            Role::Assistant => {
                println!("{} {}", "solace>".cyan(), message.content);
            }
        }
    }
    if !messages.is_empty() {
        println!();
    }
}
