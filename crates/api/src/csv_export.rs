// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV serialization of export tables.

use campus_activity::ExportTable;
use std::io::Write;

use crate::error::DispatchError;

/// Writes an export table as CSV and returns the number of data rows.
///
/// The header row is always written, even for an empty table.
///
/// # Errors
///
/// Returns an error if the underlying writer fails.
pub fn write_csv<W: Write>(table: &ExportTable, writer: W) -> Result<usize, DispatchError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(&table.headers).map_err(export_error)?;
    for row in &table.rows {
        wtr.write_record(row).map_err(export_error)?;
    }
    wtr.flush().map_err(|e| DispatchError::Export {
        message: e.to_string(),
    })?;

    Ok(table.rows.len())
}

fn export_error(err: csv::Error) -> DispatchError {
    DispatchError::Export {
        message: err.to_string(),
    }
}
