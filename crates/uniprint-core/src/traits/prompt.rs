// SPDX-FileCopyrightText: 2026 Uniprint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interactive prompt trait.

use secrecy::SecretString;

use crate::error::UniprintError;

/// The interactive collaborator that reads operator input.
///
/// The vault never talks to a terminal directly; PIN entry, confirmation
/// and credential entry all go through this trait so that the lifecycle
/// state machine can be driven by a scripted implementation in tests.
pub trait Prompter {
    /// Reads one line of hidden input (PINs, passwords). The returned value
    /// is untrimmed.
    fn read_secret(&mut self, label: &str) -> Result<SecretString, UniprintError>;

    /// Reads one line of visible input, without the trailing newline.
    fn read_line(&mut self, label: &str) -> Result<String, UniprintError>;

    /// Shows a status or error message to the operator.
    fn notice(&mut self, message: &str);

    /// Asks a yes/no question. Empty input selects `default`; anything other
    /// than y/yes/n/no asks again.
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool, UniprintError> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            let answer = self.read_line(&format!("{question} {hint}: "))?;
            match answer.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                "" => return Ok(default),
                _ => self.notice("Please enter 'y' or 'n'."),
            }
        }
    }
}
