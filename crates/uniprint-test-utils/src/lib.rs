// SPDX-FileCopyrightText: 2026 Uniprint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for uniprint.
//!
//! - [`ScriptedPrompter`] replays canned operator input
//! - [`TempVault`] gives each test its own vault location

pub mod prompter;
pub mod temp_vault;

pub use prompter::ScriptedPrompter;
pub use temp_vault::TempVault;
