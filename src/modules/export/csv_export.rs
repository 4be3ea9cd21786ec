//! CSV Export
//!
//! Flattens records to one column per field.

use std::path::Path;

use crate::core::record::{columns, display_value};
use crate::core::Record;

/// Write records to CSV file; missing fields become empty cells
pub fn write_records(path: &Path, records: &[Record]) -> Result<usize, Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    let columns = columns(records);

    let mut header = vec!["id".to_string()];
    header.extend(columns.iter().cloned());
    wtr.write_record(&header)?;

    for record in records {
        let mut row = vec![record.id.clone()];
        row.extend(columns.iter().map(|key| {
            record
                .fields
                .get(key)
                .map(display_value)
                .unwrap_or_default()
        }));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(records.len())
}
