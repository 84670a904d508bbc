//! Structured field export.
//!
//! The document editor posts a list of user-selected regions (a label plus
//! canvas coordinates); this module serializes them to a single-sheet
//! workbook through the same tabular boundary the invoice extraction uses.

use serde::{Deserialize, Serialize};

use crate::workbook::{Sheet, Workbook};

/// Sheet name for the field export.
pub const FIELDS_SHEET: &str = "Campos Seleccionados";

/// Column names of the field sheet, in output order.
pub const FIELD_COLUMNS: [&str; 6] = ["label", "value", "x", "y", "width", "height"];

/// One field selected in the editor.
///
/// The front end omits `value` when only a region was drawn, so it defaults
/// to empty on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectedField {
    /// User-assigned field name.
    pub label: String,
    /// Extracted or user-entered value, if any.
    #[serde(default)]
    pub value: String,
    /// Region origin, x coordinate.
    pub x: f64,
    /// Region origin, y coordinate.
    pub y: f64,
    /// Region width.
    pub width: f64,
    /// Region height.
    pub height: f64,
}

/// Assemble the single-sheet workbook for a field export.
pub fn fields_workbook(fields: &[SelectedField]) -> Workbook {
    let mut sheet = Sheet::new(FIELDS_SHEET, FIELD_COLUMNS);
    sheet.column_width = Some(20.0);
    for field in fields {
        sheet.add_row([
            field.label.clone(),
            field.value.clone(),
            field.x.to_string(),
            field.y.to_string(),
            field.width.to_string(),
            field.height.to_string(),
        ]);
    }
    Workbook::new(vec![sheet])
}
