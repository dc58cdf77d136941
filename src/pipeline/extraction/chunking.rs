use tracing::debug;

use super::types::{ChunkingStrategy, PageText};
use super::ExtractionError;

/// Slice extracted pages into generation windows per the configured strategy.
pub fn chunk_pages(
    pages: &[PageText],
    strategy: ChunkingStrategy,
) -> Result<Vec<String>, ExtractionError> {
    match strategy {
        ChunkingStrategy::Pages { per_chunk } => page_windows(pages, per_chunk),
        ChunkingStrategy::Chars { size, overlap } => {
            let full_text = pages
                .iter()
                .filter(|p| !p.is_blank())
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            char_windows(&full_text, size, overlap)
        }
    }
}

/// Group pages into windows of `per_chunk` pages, joined with newlines.
/// Blank pages count toward the window size but contribute no text.
fn page_windows(pages: &[PageText], per_chunk: usize) -> Result<Vec<String>, ExtractionError> {
    if per_chunk == 0 {
        return Err(ExtractionError::InvalidChunking(
            "pages per chunk must be at least 1".into(),
        ));
    }

    let mut chunks = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();

    for (i, page) in pages.iter().enumerate() {
        if !page.is_blank() {
            buffer.push(&page.text);
        }

        if (i + 1) % per_chunk == 0 || i + 1 == pages.len() {
            if buffer.is_empty() {
                debug!(window_end = i + 1, "Skipping window of blank pages");
            } else {
                chunks.push(buffer.join("\n"));
            }
            buffer.clear();
        }
    }

    Ok(chunks)
}

/// Sliding character window: `size` chars per window, adjacent windows
/// sharing `overlap` chars so content near a boundary appears whole in
/// at least one window.
fn char_windows(text: &str, size: usize, overlap: usize) -> Result<Vec<String>, ExtractionError> {
    if size == 0 {
        return Err(ExtractionError::InvalidChunking(
            "chunk size must be at least 1 character".into(),
        ));
    }
    if overlap >= size {
        return Err(ExtractionError::InvalidChunking(format!(
            "overlap ({overlap}) must be smaller than chunk size ({size})"
        )));
    }

    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Ok(Vec::new());
    }

    let stride = size - overlap;
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += stride;
    }

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: usize, text: &str) -> PageText {
        PageText {
            page_number: n,
            text: text.to_string(),
        }
    }

    #[test]
    fn groups_pages_into_windows() {
        let pages = vec![
            page(1, "one"),
            page(2, "two"),
            page(3, "three"),
            page(4, "four"),
            page(5, "five"),
        ];
        let chunks = chunk_pages(&pages, ChunkingStrategy::Pages { per_chunk: 2 }).unwrap();
        assert_eq!(chunks, vec!["one\ntwo", "three\nfour", "five"]);
    }

    #[test]
    fn page_windows_lose_no_text() {
        let pages: Vec<PageText> = (1..=7).map(|n| page(n, &format!("page {n}"))).collect();
        let chunks = chunk_pages(&pages, ChunkingStrategy::Pages { per_chunk: 3 }).unwrap();

        let rejoined = chunks.join("\n");
        let expected = pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(rejoined, expected);
    }

    #[test]
    fn blank_pages_contribute_no_text() {
        let pages = vec![page(1, "content"), page(2, "   "), page(3, "more")];
        let chunks = chunk_pages(&pages, ChunkingStrategy::Pages { per_chunk: 2 }).unwrap();
        assert_eq!(chunks, vec!["content", "more"]);
    }

    #[test]
    fn all_blank_window_is_skipped() {
        let pages = vec![page(1, ""), page(2, "  "), page(3, "real text")];
        let chunks = chunk_pages(&pages, ChunkingStrategy::Pages { per_chunk: 2 }).unwrap();
        assert_eq!(chunks, vec!["real text"]);
    }

    #[test]
    fn zero_pages_per_chunk_rejected() {
        let pages = vec![page(1, "text")];
        let result = chunk_pages(&pages, ChunkingStrategy::Pages { per_chunk: 0 });
        assert!(matches!(result, Err(ExtractionError::InvalidChunking(_))));
    }

    #[test]
    fn char_windows_cover_every_character() {
        let pages = vec![page(1, "abcdefghij")];
        let chunks =
            chunk_pages(&pages, ChunkingStrategy::Chars { size: 4, overlap: 1 }).unwrap();

        // Stripping the shared prefix from every window after the first
        // must reproduce the input exactly.
        let mut rebuilt = chunks[0].clone();
        for chunk in &chunks[1..] {
            rebuilt.extend(chunk.chars().skip(1));
        }
        assert_eq!(rebuilt, "abcdefghij");
    }

    #[test]
    fn char_windows_share_overlap() {
        let pages = vec![page(1, "abcdefgh")];
        let chunks =
            chunk_pages(&pages, ChunkingStrategy::Chars { size: 4, overlap: 2 }).unwrap();
        assert_eq!(chunks, vec!["abcd", "cdef", "efgh"]);
    }

    #[test]
    fn char_windows_handle_multibyte() {
        let pages = vec![page(1, "ééééé")];
        let chunks =
            chunk_pages(&pages, ChunkingStrategy::Chars { size: 2, overlap: 0 }).unwrap();
        assert_eq!(chunks, vec!["éé", "éé", "é"]);
    }

    #[test]
    fn overlap_must_be_smaller_than_size() {
        let pages = vec![page(1, "text")];
        let result = chunk_pages(&pages, ChunkingStrategy::Chars { size: 4, overlap: 4 });
        assert!(matches!(result, Err(ExtractionError::InvalidChunking(_))));
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        let chunks = chunk_pages(&[], ChunkingStrategy::Pages { per_chunk: 5 }).unwrap();
        assert!(chunks.is_empty());

        let pages = vec![page(1, "")];
        let chunks =
            chunk_pages(&pages, ChunkingStrategy::Chars { size: 10, overlap: 2 }).unwrap();
        assert!(chunks.is_empty());
    }
}
