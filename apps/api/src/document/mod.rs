// Document ingestion: PDF upload handling and text extraction.
// Extraction is synchronous and CPU-bound; handlers move it onto the blocking pool.

pub mod extract;
pub mod handlers;
pub mod upload;
