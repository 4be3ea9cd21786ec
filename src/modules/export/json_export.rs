//! JSON Export

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::Record;

/// Write records to JSON file as an array of flat objects
pub fn write_records(path: &Path, records: &[Record]) -> Result<usize, Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(records)?;

    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;

    Ok(records.len())
}
