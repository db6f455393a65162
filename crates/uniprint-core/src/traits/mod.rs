// SPDX-FileCopyrightText: 2026 Uniprint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the vault and its external collaborators.

pub mod prompt;

pub use prompt::Prompter;
