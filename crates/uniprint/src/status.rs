// SPDX-FileCopyrightText: 2026 Uniprint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `uniprint status` command implementation.
//!
//! Reports where the vault lives and whether it exists. Needs no PIN.

use std::io::IsTerminal;

use uniprint_config::UniprintConfig;
use uniprint_core::UniprintError;
use uniprint_vault::{VaultState, probe};

/// Run the `uniprint status` command.
///
/// Colors are used only when stdout is a terminal and `--plain` is not set.
pub fn run_status(config: &UniprintConfig, plain: bool) -> Result<(), UniprintError> {
    let path = config.vault.resolved_path()?;
    let state = probe(&path)?;
    let use_color = !plain && std::io::stdout().is_terminal();

    println!();
    println!("  uniprint status");
    println!("  {}", "-".repeat(35));
    println!("    Vault:    {}", path.display());
    print_state(state, use_color);
    println!("    Host:     {}", config.account.default_host);
    println!(
        "    Writes:   {}",
        if config.vault.atomic_write {
            "atomic"
        } else {
            "in place"
        }
    );
    println!();
    Ok(())
}

fn print_state(state: VaultState, use_color: bool) {
    let (label, ok) = match state {
        VaultState::Present => ("present (locked)", true),
        VaultState::Missing => ("not created yet, run `uniprint init`", false),
    };

    if use_color {
        use colored::Colorize;
        if ok {
            println!("    State:    {} {}", "✓".green(), label.green());
        } else {
            println!("    State:    {} {}", "-".yellow(), label.yellow());
        }
    } else if ok {
        println!("    State:    [OK] {label}");
    } else {
        println!("    State:    [--] {label}");
    }
}
