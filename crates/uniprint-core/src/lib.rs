// SPDX-FileCopyrightText: 2026 Uniprint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core types for the uniprint credential vault.
//!
//! This crate holds what every other crate in the workspace agrees on: the
//! error taxonomy, the credential record, and the [`Prompter`] trait through
//! which the vault reaches the operator.

pub mod error;
pub mod traits;
pub mod types;

pub use error::UniprintError;
pub use traits::Prompter;
pub use types::Credential;
