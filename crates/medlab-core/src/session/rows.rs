use serde::Serialize;

use crate::format::format_currency;
use crate::models::{Record, Tone};
use crate::views::{CellFormat, ColumnSpec};

/// One rendered table cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub field: &'static str,
    pub text: String,
    /// Badge colour, status columns only.
    pub tone: Option<Tone>,
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub id: String,
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn build<T: Record>(record: &T, columns: &[ColumnSpec], currency: &str) -> Self {
        let cells = columns
            .iter()
            .map(|column| {
                let value = record.field(column.field);
                let (text, tone) = match (column.format, value) {
                    (_, None) => (String::new(), None),
                    (CellFormat::Currency, Some(v)) => match v.as_number() {
                        Some(n) => (format_currency(n, currency), None),
                        None => (v.display_text(), None),
                    },
                    (CellFormat::Status, Some(v)) => (v.display_text(), Some(record.status_tone())),
                    (CellFormat::Text, Some(v)) => (v.display_text(), None),
                };
                Cell {
                    field: column.field,
                    text,
                    tone,
                }
            })
            .collect();

        Self {
            id: record.id().to_string(),
            cells,
        }
    }

    pub fn cell(&self, field: &str) -> Option<&Cell> {
        self.cells.iter().find(|c| c.field == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::{EntityKind, InventoryItem};
    use crate::views::columns;

    #[test]
    fn test_inventory_row() {
        let db = Database::open_with_demo_data().unwrap();
        let item: InventoryItem = db.require("INV002").unwrap();
        let row = Row::build(&item, columns(EntityKind::InventoryItem), "₹");

        assert_eq!(row.id, "INV002");
        let status = row.cell("stockStatus").unwrap();
        assert_eq!(status.text, "Low");
        assert_eq!(status.tone, Some(Tone::Danger));
        assert!(row.cell("unitPrice").unwrap().text.starts_with('₹'));
    }
}
