//! Result containers for single-document and batch extraction.

use super::{ConceptRow, HeaderRow};

/// Everything extracted from one invoice document: its line items in document
/// order plus one assembled header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Line items in document order.
    pub concepts: Vec<ConceptRow>,
    /// Invoice-level data.
    pub header: HeaderRow,
}

/// Outcome of extracting one document within a batch.
///
/// Batch processing never aborts on a bad document; instead each input is
/// recorded as either its extracted rows or the reason it was skipped. This
/// makes the skip-on-failure policy an explicit data transformation rather
/// than suppressed errors.
#[derive(Debug, Clone)]
pub enum DocumentOutcome {
    /// The document parsed and contributed rows.
    Extracted(ExtractionResult),
    /// The document was skipped; carries a human-readable reason.
    Failed(String),
}

impl DocumentOutcome {
    /// Returns `true` if this document contributed rows.
    pub fn is_extracted(&self) -> bool {
        matches!(self, DocumentOutcome::Extracted(_))
    }
}

/// Aggregate result of a batch extraction: one [`DocumentOutcome`] per input
/// document, in input order.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    /// Per-document outcomes, index-aligned with the input sequence.
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchResult {
    /// All line items from successfully extracted documents, preserving input
    /// order across documents and document order within each.
    pub fn concept_rows(&self) -> Vec<ConceptRow> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                DocumentOutcome::Extracted(r) => Some(r.concepts.iter().cloned()),
                DocumentOutcome::Failed(_) => None,
            })
            .flatten()
            .collect()
    }

    /// One header row per successfully extracted document, in input order.
    pub fn header_rows(&self) -> Vec<HeaderRow> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                DocumentOutcome::Extracted(r) => Some(r.header.clone()),
                DocumentOutcome::Failed(_) => None,
            })
            .collect()
    }

    /// Number of documents that contributed rows.
    pub fn extracted_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_extracted()).count()
    }

    /// Skipped documents as `(input index, reason)` pairs.
    pub fn failures(&self) -> Vec<(usize, &str)> {
        self.outcomes
            .iter()
            .enumerate()
            .filter_map(|(i, o)| match o {
                DocumentOutcome::Failed(reason) => Some((i, reason.as_str())),
                DocumentOutcome::Extracted(_) => None,
            })
            .collect()
    }
}
