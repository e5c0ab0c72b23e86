use serde_derive::{Deserialize, Serialize};

use crate::sheet::Cell;

/// Fixed column positions of the ledger export. The account column is not
/// listed here as it is located by keyword.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct ColumnLayout {
    /// How many leading columns to scan for the category keyword.
    pub search_columns: usize,
    pub summary: usize,
    pub debit: usize,
    pub credit: usize,
    /// Columns joined with a space to form the text routes are classified
    /// from.
    pub route_text: Vec<usize>,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        ColumnLayout {
            search_columns: 10,
            summary: 5,
            debit: 6,
            credit: 7,
            route_text: vec![5],
        }
    }
}

impl ColumnLayout {
    /// The narrowest ledger that contains every configured column.
    pub fn required_width(&self) -> usize {
        [self.summary, self.debit, self.credit]
            .iter()
            .chain(self.route_text.iter())
            .max()
            .map_or(0, |max| max + 1)
    }

    pub fn route_text(&self, row: &[Cell]) -> String {
        self.route_text
            .iter()
            .filter_map(|&col| row.get(col))
            .map(|cell| cell.to_text())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
