// SPDX-FileCopyrightText: 2026 Uniprint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Uniprint - PIN-protected credential vault for remote printing logins.
//!
//! This is the binary entry point.

mod credentials;
mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::error;
use uniprint_config::UniprintConfig;
use uniprint_core::UniprintError;
use uniprint_vault::{TerminalPrompter, initialize_store, mask_secret};

/// Uniprint - PIN-protected credential vault for remote printing logins.
#[derive(Parser, Debug)]
#[command(name = "uniprint", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Create the vault, or check that the PIN unlocks it.
    Init,
    /// Ask for a login, reusing a stored one when possible.
    Resolve,
    /// Show the stored secret for a user.
    Lookup {
        username: String,
        /// Print the secret instead of a masked form.
        #[arg(long)]
        reveal: bool,
    },
    /// Store or replace the secret for a user.
    Remember { username: String },
    /// Delete the stored secret for a user.
    Forget { username: String },
    /// List stored users, most recently used first.
    List,
    /// Reseal the vault under a new PIN.
    ChangePin,
    /// Show vault location and state without unlocking.
    Status {
        /// Disable colors.
        #[arg(long)]
        plain: bool,
    },
    /// Print the effective configuration as TOML.
    Config,
}

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => uniprint_config::load_and_validate_path(path),
        None => uniprint_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            uniprint_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log.level);

    if let Err(e) = run(cli.command, &config) {
        error!(error = %e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(command: Commands, config: &UniprintConfig) -> Result<(), UniprintError> {
    match command {
        Commands::Status { plain } => return status::run_status(config, plain),
        Commands::Config => {
            let rendered = uniprint_config::to_toml(config)
                .map_err(|e| UniprintError::Config(e.to_string()))?;
            print!("{rendered}");
            return Ok(());
        }
        _ => {}
    }

    let mut prompter = TerminalPrompter::new();
    let mut store = initialize_store(&config.vault, &mut prompter)?;
    let account = &config.account;

    match command {
        Commands::Init => {
            println!("{} credential(s) in {}", store.len(), store.path().display());
        }
        Commands::Resolve => {
            let credential = credentials::resolve_credentials(&mut store, &mut prompter, account)?;
            println!("{}", credential.username());
        }
        Commands::Lookup { username, reveal } => {
            match credentials::lookup(&mut store, account, &username)? {
                Some(credential) if reveal => println!("{}", credential.secret()),
                Some(credential) => println!("{}", mask_secret(credential.secret())),
                None => {
                    return Err(UniprintError::NotFound {
                        username: account.qualify(&username),
                    });
                }
            }
        }
        Commands::Remember { username } => {
            let username = credentials::remember(&mut store, &mut prompter, account, &username)?;
            println!("stored {username}");
        }
        Commands::Forget { username } => {
            let username = credentials::forget(&mut store, account, &username)?;
            println!("removed {username}");
        }
        Commands::List => {
            for (username, masked) in credentials::list(&store) {
                println!("{username}\t{masked}");
            }
        }
        Commands::ChangePin => credentials::change_pin(&mut store, &mut prompter)?,
        Commands::Status { .. } | Commands::Config => {}
    }
    Ok(())
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("uniprint={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
