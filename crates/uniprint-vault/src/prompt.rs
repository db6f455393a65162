// SPDX-FileCopyrightText: 2026 Uniprint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PIN acquisition: `UNIPRINT_VAULT_PIN` environment variable or an
//! interactive prompt through a [`Prompter`].

use std::io::{BufRead, IsTerminal, Write};

use secrecy::{ExposeSecret, SecretString};
use uniprint_core::{Prompter, UniprintError};

/// Environment variable consulted before prompting, for headless runs.
pub const VAULT_PIN_ENV_VAR: &str = "UNIPRINT_VAULT_PIN";

/// A PIN must be non-empty ASCII letters and digits.
pub fn validate_pin(pin: &str) -> Result<(), UniprintError> {
    if pin.is_empty() || !pin.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(UniprintError::Validation("PIN must be alphanumeric.".to_string()));
    }
    Ok(())
}

/// PIN from [`VAULT_PIN_ENV_VAR`], if set and non-empty.
///
/// A set but invalid value is an error: there is nobody to re-prompt.
pub fn pin_from_env() -> Result<Option<SecretString>, UniprintError> {
    match std::env::var(VAULT_PIN_ENV_VAR) {
        Ok(value) if !value.trim().is_empty() => {
            let pin = value.trim().to_string();
            validate_pin(&pin)?;
            Ok(Some(SecretString::from(pin)))
        }
        _ => Ok(None),
    }
}

/// Ask for a PIN until a valid one is entered.
///
/// Input is trimmed. With `confirm`, a second entry must match the first.
/// Validation failures and mismatches are shown through
/// [`Prompter::notice`] and the question is asked again; only read failures
/// end the loop.
pub fn prompt_pin(
    prompter: &mut dyn Prompter,
    confirm: bool,
) -> Result<SecretString, UniprintError> {
    loop {
        let entered = prompter.read_secret("Enter PIN: ")?;
        let pin = entered.expose_secret().trim();

        if let Err(UniprintError::Validation(message)) = validate_pin(pin) {
            prompter.notice(&message);
            continue;
        }

        if confirm {
            let again = prompter.read_secret("Confirm PIN: ")?;
            if again.expose_secret().trim() != pin {
                prompter.notice("PINs do not match.");
                continue;
            }
        }

        return Ok(SecretString::from(pin.to_string()));
    }
}

/// Environment first, then [`prompt_pin`].
pub fn acquire_pin(
    prompter: &mut dyn Prompter,
    confirm: bool,
) -> Result<SecretString, UniprintError> {
    if let Some(pin) = pin_from_env()? {
        return Ok(pin);
    }
    prompt_pin(prompter, confirm)
}

/// [`Prompter`] backed by the controlling terminal.
///
/// Hidden input goes through `rpassword`; labels and notices are written to
/// stderr so stdout stays clean for command output.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for TerminalPrompter {
    fn read_secret(&mut self, label: &str) -> Result<SecretString, UniprintError> {
        if !std::io::stdin().is_terminal() {
            return Err(UniprintError::Prompt(format!(
                "stdin is not a terminal; set {VAULT_PIN_ENV_VAR} or run interactively"
            )));
        }
        rpassword::prompt_password(label)
            .map(SecretString::from)
            .map_err(|e| UniprintError::Prompt(format!("failed to read hidden input: {e}")))
    }

    fn read_line(&mut self, label: &str) -> Result<String, UniprintError> {
        let mut stderr = std::io::stderr();
        let _ = write!(stderr, "{label}");
        let _ = stderr.flush();

        let mut line = String::new();
        let read = std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| UniprintError::Prompt(format!("failed to read input: {e}")))?;
        if read == 0 {
            return Err(UniprintError::Prompt("input closed".to_string()));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn notice(&mut self, message: &str) {
        eprintln!("{message}");
    }
}
