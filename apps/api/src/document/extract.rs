//! PDF text extraction.
//!
//! A thin wrapper over `pdf-extract` that adds the format gate, converts parser
//! failures (including parser panics on malformed input) into `ReadError`, and
//! rejects documents that yield no text.

use std::any::Any;
use std::panic;

use bytes::Bytes;
use thiserror::Error;

/// The only accepted resume extension, compared ASCII case-insensitively.
pub const SUPPORTED_EXTENSION: &str = ".pdf";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file format: '{file_name}' is not a PDF")]
    UnsupportedFormat { file_name: String },

    #[error("Failed to read PDF: {0}")]
    ReadError(String),

    #[error("The document contains no extractable text")]
    EmptyDocument,
}

/// A user-supplied file as received from the upload.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: String,
    pub bytes: Bytes,
}

impl UploadedDocument {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn has_supported_extension(&self) -> bool {
        let name = self.file_name.trim();
        name.len() > SUPPORTED_EXTENSION.len()
            && name
                .get(name.len() - SUPPORTED_EXTENSION.len()..)
                .map(|ext| ext.eq_ignore_ascii_case(SUPPORTED_EXTENSION))
                .unwrap_or(false)
    }
}

/// Plain text pulled from every page of a document, in page order.
/// Only constructed by the extractor, so it is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText(String);

impl ExtractedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Extracts all page text from an uploaded PDF.
///
/// The extension check runs first; content of a non-PDF upload is never inspected.
pub fn extract_text(document: &UploadedDocument) -> Result<ExtractedText, ExtractError> {
    if !document.has_supported_extension() {
        return Err(ExtractError::UnsupportedFormat {
            file_name: document.file_name.clone(),
        });
    }

    let bytes: &[u8] = &document.bytes;
    let raw = match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => return Err(ExtractError::ReadError(e.to_string())),
        Err(payload) => return Err(ExtractError::ReadError(panic_message(payload.as_ref()))),
    };

    collect_text(raw)
}

/// Rejects whitespace-only output; otherwise keeps the text byte-for-byte.
fn collect_text(raw: String) -> Result<ExtractedText, ExtractError> {
    if raw.trim().is_empty() {
        return Err(ExtractError::EmptyDocument);
    }
    Ok(ExtractedText(raw))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("PDF parser aborted: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("PDF parser aborted: {s}")
    } else {
        "PDF parser aborted on malformed input".to_string()
    }
}
