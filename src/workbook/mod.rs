//! Spreadsheet artifact assembly.
//!
//! Extraction hands this module two flat tables; it produces the two-sheet
//! XLSX artifact ("Conceptos" + "Datos Generales") and a timestamped
//! suggested filename. The XLSX container is written directly as a ZIP of
//! OOXML parts; see [`writer`].

mod writer;

use crate::error::Result;
use crate::model::{ConceptRow, HeaderRow, CONCEPT_COLUMNS, HEADER_COLUMNS};

/// MIME type of the produced artifact.
pub const XLSX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Sheet name for line items.
pub const CONCEPTS_SHEET: &str = "Conceptos";

/// Sheet name for invoice-level data.
pub const GENERAL_SHEET: &str = "Datos Generales";

/// One worksheet: a header row of column names plus string-valued data rows.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    /// Worksheet name as shown on the tab.
    pub name: String,
    /// Column names, written as the first row.
    pub columns: Vec<String>,
    /// Data rows. Rows need not all have the same length; short rows simply
    /// produce fewer cells.
    pub rows: Vec<Vec<String>>,
    /// Uniform column width, cosmetic only.
    pub column_width: Option<f64>,
}

impl Sheet {
    /// Create an empty sheet with the given name and columns.
    pub fn new(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            column_width: None,
        }
    }

    /// Append a data row.
    pub fn add_row(&mut self, row: impl IntoIterator<Item = impl Into<String>>) {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }
}

/// An in-memory workbook, serialized with [`Workbook::to_bytes`].
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    /// Worksheets in tab order.
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Create a workbook from its sheets.
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// Serialize to XLSX bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        writer::write_workbook(self)
    }
}

/// Assemble the two-sheet invoice workbook from extracted rows.
///
/// In single-document mode `headers` holds one row; in batch mode one row per
/// surviving document.
pub fn invoice_workbook(concepts: &[ConceptRow], headers: &[HeaderRow]) -> Workbook {
    let mut conceptos = Sheet::new(CONCEPTS_SHEET, CONCEPT_COLUMNS);
    conceptos.column_width = Some(20.0);
    for row in concepts {
        conceptos.add_row(row.values());
    }

    let mut generales = Sheet::new(GENERAL_SHEET, HEADER_COLUMNS);
    generales.column_width = Some(20.0);
    for row in headers {
        generales.add_row(row.values());
    }

    Workbook::new(vec![conceptos, generales])
}

/// Kind of export, which decides the suggested filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// One invoice document.
    Single,
    /// Several invoice documents aggregated into one workbook.
    Batch,
    /// Structured field list from the editor.
    Fields,
}

impl ExportKind {
    fn stem(&self) -> &'static str {
        match self {
            ExportKind::Single => "resultado",
            ExportKind::Batch => "resultado_lote",
            ExportKind::Fields => "editor_pdf_campos",
        }
    }
}

/// Suggest a download filename for an export, stamped with the current local
/// time: `resultado_20240501_103000.xlsx`, `resultado_lote_…`,
/// `editor_pdf_campos_…`.
pub fn suggested_filename(kind: ExportKind) -> String {
    suggested_filename_at(kind, chrono::Local::now().naive_local())
}

fn suggested_filename_at(kind: ExportKind, when: chrono::NaiveDateTime) -> String {
    format!("{}_{}.xlsx", kind.stem(), when.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_workbook_shape() {
        let concepts = vec![
            ConceptRow {
                cantidad: "2".into(),
                importe: "100.00".into(),
                ..Default::default()
            },
            ConceptRow::default(),
        ];
        let headers = vec![HeaderRow {
            folio: "F-1".into(),
            ..Default::default()
        }];

        let wb = invoice_workbook(&concepts, &headers);
        assert_eq!(wb.sheets.len(), 2);
        assert_eq!(wb.sheets[0].name, "Conceptos");
        assert_eq!(wb.sheets[0].columns.len(), 9);
        assert_eq!(wb.sheets[0].rows.len(), 2);
        assert_eq!(wb.sheets[1].name, "Datos Generales");
        assert_eq!(wb.sheets[1].rows.len(), 1);
        assert_eq!(wb.sheets[1].rows[0][0], "F-1");
    }

    #[test]
    fn test_empty_tables_still_have_column_rows() {
        let wb = invoice_workbook(&[], &[]);
        assert_eq!(wb.sheets[0].rows.len(), 0);
        assert_eq!(wb.sheets[0].columns[0], "ClaveProdServ");
    }

    #[test]
    fn test_suggested_filename_format() {
        let when = chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(
            suggested_filename_at(ExportKind::Single, when),
            "resultado_20240501_103000.xlsx"
        );
        assert_eq!(
            suggested_filename_at(ExportKind::Batch, when),
            "resultado_lote_20240501_103000.xlsx"
        );
        assert_eq!(
            suggested_filename_at(ExportKind::Fields, when),
            "editor_pdf_campos_20240501_103000.xlsx"
        );
    }
}
