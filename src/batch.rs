//! Batch extraction across many documents.

use crate::cfdi::CfdiParser;
use crate::model::{BatchResult, DocumentOutcome};

/// Extract every document in the input sequence, tolerating individual
/// failures.
///
/// Documents are processed in input order. A document that fails to parse is
/// recorded as [`DocumentOutcome::Failed`] and contributes zero rows; it never
/// aborts the batch. The aggregate row order follows input order across
/// documents and document order within each.
///
/// Callers with exactly one document should use [`CfdiParser`] (or
/// [`crate::extract_bytes`]) directly to get an explicit error instead of a
/// silently thinner batch.
pub fn extract_batch<I, D>(documents: I) -> BatchResult
where
    I: IntoIterator<Item = D>,
    D: AsRef<[u8]>,
{
    let mut outcomes = Vec::new();

    for (index, document) in documents.into_iter().enumerate() {
        match CfdiParser::from_bytes(document.as_ref()).parse() {
            Ok(result) => {
                tracing::debug!(index, concepts = result.concepts.len(), "document extracted");
                outcomes.push(DocumentOutcome::Extracted(result));
            }
            Err(err) => {
                tracing::warn!(index, error = %err, "skipping document");
                outcomes.push(DocumentOutcome::Failed(err.to_string()));
            }
        }
    }

    BatchResult { outcomes }
}
