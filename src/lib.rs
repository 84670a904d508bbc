//! # cfdix
//!
//! CFDI (Mexican tax invoice) XML extraction to multi-sheet XLSX.
//!
//! This library parses CFDI 3.3 and 4.0 documents, pulls their line items
//! (`Concepto` elements) and invoice-level data into flat string rows, and
//! serializes the result as a two-sheet spreadsheet ("Conceptos" and
//! "Datos Generales"). Batches of documents aggregate into one workbook,
//! tolerating individual failures.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cfdix::{extract_file, workbook};
//!
//! // Extract one invoice
//! let result = extract_file("factura.xml")?;
//! println!("Line items: {}", result.concepts.len());
//! println!("Total: {}", result.header.total);
//!
//! // Serialize it to a two-sheet workbook
//! let wb = workbook::invoice_workbook(&result.concepts, std::slice::from_ref(&result.header));
//! std::fs::write("factura.xlsx", wb.to_bytes()?)?;
//! # Ok::<(), cfdix::Error>(())
//! ```
//!
//! ## Batch mode
//!
//! ```no_run
//! use cfdix::extract_batch;
//!
//! let docs: Vec<Vec<u8>> = vec![/* raw XML buffers */];
//! let batch = extract_batch(&docs);
//! println!(
//!     "{} of {} documents extracted",
//!     batch.extracted_count(),
//!     batch.outcomes.len()
//! );
//! ```
//!
//! ## Service facade
//!
//! Transports (the bundled CLI and its HTTP server) go through
//! [`ExtractorService`], which carries the payload ceiling and pairs each
//! artifact with a timestamped download filename.

pub mod batch;
pub mod cfdi;
pub mod error;
pub mod fields;
pub mod model;
pub mod namespace;
pub mod service;
pub mod workbook;

// Re-exports
pub use batch::extract_batch;
pub use cfdi::CfdiParser;
pub use error::{Error, Result};
pub use fields::SelectedField;
pub use model::{
    BatchResult, ConceptRow, DocumentOutcome, ExtractionResult, HeaderRow, CONCEPT_COLUMNS,
    HEADER_COLUMNS,
};
pub use namespace::NamespaceProfile;
pub use service::{Export, ExtractorService, ServiceConfig};
pub use workbook::{Sheet, Workbook};

use std::path::Path;

/// Extract one invoice document from raw bytes.
///
/// Fails with [`Error::MalformedDocument`] if the bytes are not well-formed
/// XML; everything else (missing elements, missing attributes) degrades to
/// empty strings.
///
/// # Example
///
/// ```no_run
/// use cfdix::extract_bytes;
///
/// let data = std::fs::read("factura.xml")?;
/// let result = extract_bytes(&data)?;
/// println!("Folio: {}", result.header.folio);
/// # Ok::<(), cfdix::Error>(())
/// ```
pub fn extract_bytes(data: &[u8]) -> Result<ExtractionResult> {
    CfdiParser::from_bytes(data).parse()
}

/// Extract one invoice document from a file.
pub fn extract_file(path: impl AsRef<Path>) -> Result<ExtractionResult> {
    let data = std::fs::read(path)?;
    extract_bytes(&data)
}
