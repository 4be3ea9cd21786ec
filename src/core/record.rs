//! Generic records rendered by every section

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of a section: an id plus named fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

pub type RecordList = Vec<Record>;

impl Record {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// Field rendered as display text; strings are unquoted
    pub fn text(&self, key: &str) -> Option<String> {
        self.fields.get(key).map(display_value)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(Value::as_f64)
    }

    /// Best-effort human label: `name`, `title`, `code`, then the id
    pub fn label(&self) -> String {
        ["name", "title", "code", "email"]
            .iter()
            .find_map(|key| self.text(key))
            .unwrap_or_else(|| self.id.clone())
    }
}

/// Union of field names across records, in first-seen order
pub fn columns(records: &[Record]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for record in records {
        for key in record.fields.keys() {
            if !out.iter().any(|existing| existing == key) {
                out.push(key.clone());
            }
        }
    }
    out
}

pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "yes".to_string(),
        Value::Bool(false) => "no".to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    }
}

fn id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "record id must be a string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_are_accepted() {
        let raw = r#"[{"id": 7, "name": "Sintra day trip", "price": 59.5}]"#;
        let records: RecordList = serde_json::from_str(raw).unwrap();
        assert_eq!(records[0].id, "7");
        assert_eq!(records[0].label(), "Sintra day trip");
        assert_eq!(records[0].number("price"), Some(59.5));
    }

    #[test]
    fn columns_keep_first_seen_order_without_duplicates() {
        let records = vec![
            Record::new("1").with("name", "a").with("city", "Porto"),
            Record::new("2").with("name", "b").with("active", true),
        ];
        assert_eq!(columns(&records), vec!["city", "name", "active"]);
    }

    #[test]
    fn label_falls_back_to_id() {
        let record = Record::new("bk-19").with("status", "paid");
        assert_eq!(record.label(), "bk-19");
        assert_eq!(record.text("status").as_deref(), Some("paid"));
    }
}
