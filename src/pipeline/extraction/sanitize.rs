// Sanitize extracted text before it reaches prompts.
// Strips control and invisible Unicode characters, trims lines, drops blanks.

/// Sanitize raw page text. Keeps standard whitespace; removes C0/C1 control
/// characters and zero-width/formatting characters that survive PDF text
/// layers and can silently distort model input.
pub fn sanitize_extracted_text(raw: &str) -> String {
    raw.chars()
        .filter(|c| {
            if matches!(*c, ' ' | '\n' | '\t' | '\r') {
                return true;
            }
            if matches!(
                *c,
                '\u{200B}'  // Zero-width space
                | '\u{200C}' // Zero-width non-joiner
                | '\u{200D}' // Zero-width joiner
                | '\u{200E}' // Left-to-right mark
                | '\u{200F}' // Right-to-left mark
                | '\u{202A}' // Left-to-right embedding
                | '\u{202B}' // Right-to-left embedding
                | '\u{202C}' // Pop directional formatting
                | '\u{202D}' // Left-to-right override
                | '\u{202E}' // Right-to-left override
                | '\u{2060}' // Word joiner
                | '\u{FEFF}' // BOM / zero-width no-break space
            ) {
                return false;
            }
            !c.is_control()
        })
        .collect::<String>()
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
