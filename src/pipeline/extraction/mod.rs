pub mod chunking;
pub mod pdf;
pub mod sanitize;
pub mod types;

pub use chunking::*;
pub use pdf::*;
pub use sanitize::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("Document contains no pages")]
    EmptyDocument,

    #[error("Document contains no extractable text")]
    NoTextLayer,

    #[error("Invalid chunking configuration: {0}")]
    InvalidChunking(String),
}
