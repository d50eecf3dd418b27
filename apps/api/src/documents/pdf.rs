//! PDF text extraction for uploaded resumes and job descriptions.
//!
//! Page structure is read with `lopdf`; text comes from `pdf-extract`, which
//! walks every page in order and concatenates the result.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Could not read PDF: {0}")]
    Load(String),

    #[error("Could not extract text from PDF: {0}")]
    Extraction(String),

    #[error("The resume PDF exceeds the maximum allowable pages ({max}). It has {pages} pages. Please upload a shorter resume.")]
    TooManyPages { pages: usize, max: usize },
}

/// Page count and full text of a PDF.
#[derive(Debug, Clone, Serialize)]
pub struct PdfDocument {
    pub page_count: usize,
    pub text: String,
}

/// Parses `bytes` as a PDF and returns its page count and concatenated text.
pub fn extract_pdf(bytes: &[u8]) -> Result<PdfDocument, PdfError> {
    let page_count = count_pages(bytes)?;
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| PdfError::Extraction(e.to_string()))?;

    debug!("Extracted {} chars from {} page(s)", text.len(), page_count);
    Ok(PdfDocument { page_count, text })
}

/// Reads only the page tree; cheaper than full extraction.
pub fn count_pages(bytes: &[u8]) -> Result<usize, PdfError> {
    let document = lopdf::Document::load_mem(bytes).map_err(|e| PdfError::Load(e.to_string()))?;
    Ok(document.get_pages().len())
}

/// Rejects documents longer than `max_pages`.
pub fn ensure_page_limit(document: &PdfDocument, max_pages: usize) -> Result<(), PdfError> {
    if document.page_count > max_pages {
        return Err(PdfError::TooManyPages {
            pages: document.page_count,
            max: max_pages,
        });
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::fixtures::sample_pdf;
    use super::*;

    #[test]
    fn test_extracts_page_count_and_text() {
        let document = extract_pdf(&sample_pdf("AcmeResume", 1, 0)).unwrap();
        assert_eq!(document.page_count, 1);
        assert!(document.text.contains("AcmeResume"), "text was {:?}", document.text);
    }

    #[test]
    fn test_text_spans_every_page() {
        let document = extract_pdf(&sample_pdf("Posting", 2, 0)).unwrap();
        assert_eq!(document.page_count, 2);
        assert_eq!(document.text.matches("Posting").count(), 2);
    }

    #[test]
    fn test_four_page_document_breaks_default_limit() {
        let bytes = sample_pdf("Long", 4, 0);
        assert_eq!(count_pages(&bytes).unwrap(), 4);
        let document = extract_pdf(&bytes).unwrap();
        assert!(matches!(
            ensure_page_limit(&document, 3),
            Err(PdfError::TooManyPages { pages: 4, max: 3 })
        ));
    }

    #[test]
    fn test_garbage_bytes_fail_to_load() {
        let err = extract_pdf(b"this is not a pdf").unwrap_err();
        assert!(matches!(err, PdfError::Load(_)));
    }

    #[test]
    fn test_empty_input_fails_to_load() {
        assert!(count_pages(&[]).is_err());
    }

    #[test]
    fn test_page_limit_allows_boundary() {
        let doc = PdfDocument {
            page_count: 3,
            text: String::new(),
        };
        assert!(ensure_page_limit(&doc, 3).is_ok());
    }

    #[test]
    fn test_page_limit_rejects_longer_documents() {
        let doc = PdfDocument {
            page_count: 4,
            text: String::new(),
        };
        let err = ensure_page_limit(&doc, 3).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The resume PDF exceeds the maximum allowable pages (3). It has 4 pages. Please upload a shorter resume."
        );
    }
}
