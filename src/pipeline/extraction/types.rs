use serde::{Deserialize, Serialize};

use super::ExtractionError;

/// Text extracted from a single PDF page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageText {
    pub page_number: usize,
    pub text: String,
}

impl PageText {
    /// A page is blank when its text is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// PDF text extraction abstraction (allows mocking for tests).
pub trait PdfSource {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageText>, ExtractionError>;

    fn page_count(&self, pdf_bytes: &[u8]) -> Result<usize, ExtractionError>;
}

/// How a document is sliced into windows before generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkingStrategy {
    /// Fixed number of pages per window, joined with newlines.
    Pages { per_chunk: usize },
    /// Sliding character window; adjacent windows share `overlap` chars.
    Chars { size: usize, overlap: usize },
}

impl Default for ChunkingStrategy {
    fn default() -> Self {
        Self::Pages { per_chunk: 5 }
    }
}
