// SPDX-FileCopyrightText: 2026 Uniprint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CSV encoding of the credential list.
//!
//! The plaintext sealed inside the vault is a header row `username,password`
//! followed by one row per record, most recently used first.

use tracing::debug;
use uniprint_core::{Credential, UniprintError};
use zeroize::Zeroizing;

/// Header row written in front of every table.
pub const HEADER: [&str; 2] = ["username", "password"];

/// How rows that cannot become a record are treated on load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowPolicy {
    /// Skip rows with fewer than two fields, accept any header.
    #[default]
    Lenient,
    /// Reject short rows and a header other than [`HEADER`].
    Strict,
}

/// Encode records as a CSV table with header, `\n` line endings.
pub fn serialize(records: &[Credential]) -> Result<Zeroizing<Vec<u8>>, UniprintError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADER).map_err(format_err)?;
    for record in records {
        writer
            .write_record([record.username(), record.secret()])
            .map_err(format_err)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| UniprintError::Format(format!("failed to flush table: {}", e.error())))?;
    Ok(Zeroizing::new(bytes))
}

/// Decode a CSV table back into records, keeping row order.
///
/// Fails when there is no header row, when the CSV is malformed, or when a
/// row's field count differs from the header's.
pub fn deserialize(bytes: &[u8], policy: RowPolicy) -> Result<Vec<Credential>, UniprintError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(bytes);
    let mut rows = reader.records();

    let header = rows
        .next()
        .ok_or_else(|| UniprintError::Format("table has no header row".to_string()))?
        .map_err(format_err)?;
    if policy == RowPolicy::Strict && header.iter().ne(HEADER) {
        return Err(UniprintError::Format(format!(
            "unexpected header, expected `{}`",
            HEADER.join(",")
        )));
    }

    let mut records = Vec::new();
    for (index, row) in rows.enumerate() {
        let row = row.map_err(format_err)?;
        if row.len() < 2 {
            if policy == RowPolicy::Strict {
                return Err(UniprintError::Format(format!(
                    "row {} has {} field(s), expected 2",
                    index + 1,
                    row.len()
                )));
            }
            debug!(row = index + 1, "skipping short credential row");
            continue;
        }
        records.push(Credential::new(&row[0], &row[1]));
    }

    Ok(records)
}

fn format_err(e: csv::Error) -> UniprintError {
    UniprintError::Format(e.to_string())
}
