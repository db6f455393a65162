// SPDX-FileCopyrightText: 2026 Uniprint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted prompter for deterministic lifecycle tests.

use std::collections::VecDeque;

use secrecy::SecretString;
use uniprint_core::{Prompter, UniprintError};

/// A [`Prompter`] that answers from two queues.
///
/// Hidden reads pop from the secret queue, visible reads from the line
/// queue. Reading from an exhausted queue fails with
/// [`UniprintError::Prompt`], which is how tests detect an unexpected
/// extra prompt. Labels and notices are recorded for assertions.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    secrets: VecDeque<String>,
    lines: VecDeque<String>,
    labels: Vec<String>,
    notices: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue hidden answers in order.
    pub fn with_secrets<I, S>(mut self, secrets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.secrets.extend(secrets.into_iter().map(Into::into));
        self
    }

    /// Queue visible answers in order.
    pub fn with_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Every label shown so far, hidden and visible reads interleaved.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Whether any recorded notice contains `needle`.
    pub fn noticed(&self, needle: &str) -> bool {
        self.notices.iter().any(|n| n.contains(needle))
    }

    /// Answers not consumed yet, as `(secrets, lines)`.
    pub fn remaining(&self) -> (usize, usize) {
        (self.secrets.len(), self.lines.len())
    }
}

impl Prompter for ScriptedPrompter {
    fn read_secret(&mut self, label: &str) -> Result<SecretString, UniprintError> {
        self.labels.push(label.to_string());
        self.secrets
            .pop_front()
            .map(SecretString::from)
            .ok_or_else(|| UniprintError::Prompt(format!("no scripted secret for `{label}`")))
    }

    fn read_line(&mut self, label: &str) -> Result<String, UniprintError> {
        self.labels.push(label.to_string());
        self.lines
            .pop_front()
            .ok_or_else(|| UniprintError::Prompt(format!("no scripted line for `{label}`")))
    }

    fn notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn replays_in_order_then_fails() {
        let mut p = ScriptedPrompter::new()
            .with_secrets(["first", "second"])
            .with_lines(["line"]);

        assert_eq!(p.read_secret("PIN").unwrap().expose_secret(), "first");
        assert_eq!(p.read_line("User").unwrap(), "line");
        assert_eq!(p.read_secret("PIN").unwrap().expose_secret(), "second");
        assert!(p.read_secret("PIN").is_err());
        assert_eq!(p.labels(), ["PIN", "User", "PIN", "PIN"]);
    }
}
