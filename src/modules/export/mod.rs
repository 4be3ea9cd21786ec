//! Export Module
//!
//! Writes the records of the active section to disk.
//!
//! - `:export csv` → one column per field, first-seen order
//! - `:export json` → pretty-printed record array
//! - Files saved to `<data dir>/exports/`

mod csv_export;
mod json_export;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::core::{Action, ExportFormat, NotifyLevel, Record, SectionId};

/// Generate a timestamped filename
fn generate_filename(prefix: &str, extension: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d-%H%M%S");
    format!("{}-{}.{}", prefix, timestamp, extension)
}

/// Export `records` of `section` into `export_dir`, creating it if needed
pub fn export_records(
    export_dir: &Path,
    section: SectionId,
    records: &[Record],
    format: ExportFormat,
) -> Action {
    if records.is_empty() {
        return Action::Notify(
            format!("No {} to export", section.title().to_lowercase()),
            NotifyLevel::Warning,
        );
    }

    if let Err(e) = fs::create_dir_all(export_dir) {
        return Action::Notify(
            format!("Failed to create export directory: {}", e),
            NotifyLevel::Error,
        );
    }

    let filename = generate_filename(section.as_str(), format.extension());
    let path: PathBuf = export_dir.join(&filename);

    let written = match format {
        ExportFormat::Csv => csv_export::write_records(&path, records),
        ExportFormat::Json => json_export::write_records(&path, records),
    };

    match written {
        Ok(count) => {
            tracing::info!(%section, count, path = %path.display(), "export written");
            Action::Notify(
                format!("Exported {} rows to {}", count, path.display()),
                NotifyLevel::Success,
            )
        }
        Err(e) => Action::Notify(format!("Export failed: {}", e), NotifyLevel::Error),
    }
}

pub fn parse_format(arg: Option<&str>) -> Option<ExportFormat> {
    match arg.map(str::to_lowercase).as_deref() {
        None | Some("csv") => Some(ExportFormat::Csv),
        Some("json") => Some(ExportFormat::Json),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coupons() -> Vec<Record> {
        vec![
            Record::new("c1").with("code", "SUMMER").with("discount", 10),
            Record::new("c2").with("code", "GROUP5").with("active", true),
        ]
    }

    #[test]
    fn csv_export_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let action = export_records(dir.path(), SectionId::Coupons, &coupons(), ExportFormat::Csv);
        assert!(matches!(action, Action::Notify(_, NotifyLevel::Success)));

        let file = fs::read_dir(dir.path()).unwrap().next().unwrap().unwrap();
        assert!(file.file_name().to_string_lossy().starts_with("coupons-"));
        let content = fs::read_to_string(file.path()).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("id,code,discount,active"));
        assert_eq!(lines.next(), Some("c1,SUMMER,10,"));
        assert_eq!(lines.next(), Some("c2,GROUP5,,yes"));
    }

    #[test]
    fn json_export_keeps_typed_values() {
        let dir = tempfile::tempdir().unwrap();
        export_records(dir.path(), SectionId::Coupons, &coupons(), ExportFormat::Json);

        let file = fs::read_dir(dir.path()).unwrap().next().unwrap().unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(file.path()).unwrap()).unwrap();
        assert_eq!(parsed[0]["discount"], serde_json::json!(10));
        assert_eq!(parsed[1]["active"], serde_json::json!(true));
    }

    #[test]
    fn nothing_to_export_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let action = export_records(dir.path(), SectionId::Tours, &[], ExportFormat::Csv);
        assert_eq!(
            action,
            Action::Notify("No tours to export".to_string(), NotifyLevel::Warning)
        );
    }

    #[test]
    fn format_defaults_to_csv() {
        assert_eq!(parse_format(None), Some(ExportFormat::Csv));
        assert_eq!(parse_format(Some("JSON")), Some(ExportFormat::Json));
        assert_eq!(parse_format(Some("xml")), None);
    }
}
