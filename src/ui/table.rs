//! Records table - the terminal [`Renderer`]

use crate::controller::Renderer;
use crate::core::record::columns;
use crate::core::{Record, RecordList, SectionId};

/// Last rendered section plus the list selection
#[derive(Debug, Default, Clone)]
pub struct TableView {
    section: Option<SectionId>,
    records: RecordList,
    columns: Vec<String>,
    selected: usize,
}

impl TableView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self) -> Option<SectionId> {
        self.section
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Records currently on screen, if they belong to `section`
    pub fn records_for(&self, section: SectionId) -> Option<&[Record]> {
        (self.section == Some(section)).then_some(self.records.as_slice())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.records.get(self.selected)
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.records.len() {
            self.selected += 1;
        }
    }

    /// Numeric column as a sparkline series; non-numbers count as zero
    pub fn series(&self, key: &str) -> Vec<u64> {
        self.records
            .iter()
            .map(|record| record.number(key).map(|n| n.max(0.0) as u64).unwrap_or(0))
            .collect()
    }
}

impl Renderer for TableView {
    fn render(&mut self, section: SectionId, records: &RecordList) {
        if self.section != Some(section) {
            self.selected = 0;
        }
        self.section = Some(section);
        self.records = records.clone();
        self.columns = columns(records);
        self.selected = self.selected.min(self.records.len().saturating_sub(1));
    }
}
