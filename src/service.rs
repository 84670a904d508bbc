//! Configured processing service.
//!
//! The service owns request-independent configuration (currently the payload
//! ceiling) and pairs each produced artifact with its suggested filename.
//! Transports construct one instance at startup and call into it per
//! request; the extraction itself stays free of any transport concern.

use crate::batch::extract_batch;
use crate::cfdi::CfdiParser;
use crate::error::{Error, Result};
use crate::fields::{fields_workbook, SelectedField};
use crate::workbook::{invoice_workbook, suggested_filename, ExportKind};

/// Default payload ceiling: 5 MiB across all documents in one request.
pub const DEFAULT_MAX_PAYLOAD: usize = 5 * 1024 * 1024;

/// Service configuration, injected at construction.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Maximum combined document size accepted per request, in bytes.
    pub max_payload_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_payload_bytes: DEFAULT_MAX_PAYLOAD,
        }
    }
}

/// A finished spreadsheet artifact plus its suggested download filename.
#[derive(Debug, Clone)]
pub struct Export {
    /// Suggested filename, timestamped.
    pub filename: String,
    /// XLSX bytes.
    pub data: Vec<u8>,
}

/// Invoice processing service.
pub struct ExtractorService {
    config: ServiceConfig,
}

impl ExtractorService {
    /// Create a service with the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }

    /// The configuration this service was constructed with.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Process a single invoice document into a two-sheet workbook.
    ///
    /// Any failure aborts the whole request; no partial artifact is
    /// produced.
    pub fn process_document(&self, document: &[u8]) -> Result<Export> {
        self.check_payload(document.len())?;
        let result = CfdiParser::from_bytes(document).parse()?;
        let workbook = invoice_workbook(&result.concepts, std::slice::from_ref(&result.header));
        Ok(Export {
            filename: suggested_filename(ExportKind::Single),
            data: workbook.to_bytes()?,
        })
    }

    /// Process several invoice documents into one aggregate workbook.
    ///
    /// Per-document parse failures are skipped (and logged by the batch
    /// layer); only serialization failures surface. An empty document list
    /// is rejected as caller error.
    pub fn process_batch(&self, documents: &[Vec<u8>]) -> Result<Export> {
        if documents.is_empty() {
            return Err(Error::InvalidInput("no documents supplied".to_string()));
        }
        self.check_payload(documents.iter().map(Vec::len).sum())?;

        let batch = extract_batch(documents);
        let workbook = invoice_workbook(&batch.concept_rows(), &batch.header_rows());
        Ok(Export {
            filename: suggested_filename(ExportKind::Batch),
            data: workbook.to_bytes()?,
        })
    }

    /// Serialize an editor field list to a single-sheet workbook.
    pub fn export_fields(&self, fields: &[SelectedField]) -> Result<Export> {
        let workbook = fields_workbook(fields);
        Ok(Export {
            filename: suggested_filename(ExportKind::Fields),
            data: workbook.to_bytes()?,
        })
    }

    fn check_payload(&self, size: usize) -> Result<()> {
        if size > self.config.max_payload_bytes {
            return Err(Error::PayloadTooLarge {
                size,
                limit: self.config.max_payload_bytes,
            });
        }
        Ok(())
    }
}

impl Default for ExtractorService {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}
