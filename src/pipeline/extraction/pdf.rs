use super::types::{PageText, PdfSource};
use super::ExtractionError;

/// PDF text extractor using the pdf-extract crate.
/// Handles digital PDFs with embedded text layers.
pub struct PdfTextExtractor;

impl PdfSource for PdfTextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageText>, ExtractionError> {
        let page_texts = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
            .map_err(|e| ExtractionError::PdfParsing(e.to_string()))?;

        if page_texts.is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        let pages = page_texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| PageText {
                page_number: i + 1,
                text,
            })
            .collect::<Vec<_>>();

        if pages.iter().all(PageText::is_blank) {
            return Err(ExtractionError::NoTextLayer);
        }

        Ok(pages)
    }

    fn page_count(&self, pdf_bytes: &[u8]) -> Result<usize, ExtractionError> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
            .map_err(|e| ExtractionError::PdfParsing(e.to_string()))?;
        Ok(pages.len())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Generate a valid PDF with text using lopdf (the library that pdf-extract uses internally).
    pub(crate) fn make_test_pdf(page_texts: &[&str]) -> Vec<u8> {
        use lopdf::dictionary;
        use lopdf::{Document, Object, Stream};

        let mut doc = Document::with_version("1.4");

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let mut page_ids = Vec::new();
        for text in page_texts {
            // Page content stream: BT /F1 12 Tf (text) Tj ET
            let content = format!("BT /F1 12 Tf 100 700 Td ({text}) Tj ET");
            let content_stream = Stream::new(dictionary! {}, content.into_bytes());
            let content_id = doc.add_object(content_stream);

            let resources = dictionary! {
                "Font" => dictionary! {
                    "F1" => font_id,
                },
            };

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
                "Resources" => resources,
            });
            page_ids.push(page_id);
        }

        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|&id| id.into()).collect::<Vec<Object>>(),
            "Count" => page_ids.len() as i64,
        });

        for &page_id in &page_ids {
            if let Ok(Object::Dictionary(ref mut dict)) = doc.get_object_mut(page_id) {
                dict.set("Parent", pages_id);
            }
        }

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });

        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn extract_pages_from_digital_pdf() {
        let extractor = PdfTextExtractor;
        let pdf_bytes = make_test_pdf(&["Operating the crane safely"]);
        let pages = extractor.extract_pages(&pdf_bytes).unwrap();

        assert!(!pages.is_empty(), "Should extract at least one page");
        assert_eq!(pages[0].page_number, 1);
        let full_text: String = pages.iter().map(|p| p.text.clone()).collect();
        assert!(
            full_text.contains("Operating") || full_text.contains("crane"),
            "Expected extracted text, got: {full_text}"
        );
    }

    #[test]
    fn page_numbers_are_sequential() {
        let extractor = PdfTextExtractor;
        let pdf_bytes = make_test_pdf(&["First page", "Second page", "Third page"]);
        let pages = extractor.extract_pages(&pdf_bytes).unwrap();

        let numbers: Vec<usize> = pages.iter().map(|p| p.page_number).collect();
        assert_eq!(numbers, (1..=pages.len()).collect::<Vec<_>>());
    }

    #[test]
    fn page_count_matches_extraction() {
        let extractor = PdfTextExtractor;
        let pdf_bytes = make_test_pdf(&["Test content", "More content"]);
        let count = extractor.page_count(&pdf_bytes).unwrap();
        let pages = extractor.extract_pages(&pdf_bytes).unwrap();
        assert_eq!(count, pages.len());
    }

    #[test]
    fn invalid_pdf_returns_error() {
        let extractor = PdfTextExtractor;
        let result = extractor.extract_pages(b"not a pdf");
        assert!(matches!(result, Err(ExtractionError::PdfParsing(_))));
    }
}
