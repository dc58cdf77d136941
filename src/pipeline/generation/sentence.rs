// Sentence carryover between restructured chunks.
//
// The restructure prompt asks the model to leave a trailing incomplete
// sentence in place. That tail is held back here and prepended to the
// next chunk so no sentence is cut at a window boundary.

/// A trailing line shorter than this is treated as incomplete even when
/// it ends with terminal punctuation.
const MIN_COMPLETE_SENTENCE_LEN: usize = 20;

/// Split restructured text into the complete part and an incomplete tail.
///
/// The last line is incomplete when it is shorter than
/// `MIN_COMPLETE_SENTENCE_LEN` characters or does not end in `.`, `?` or `!`.
pub fn split_incomplete_tail(structured: &str) -> (String, Option<String>) {
    let trimmed = structured.trim_end();
    if trimmed.is_empty() {
        return (String::new(), None);
    }

    let lines: Vec<&str> = trimmed.lines().collect();
    let last = lines[lines.len() - 1].trim();

    let complete_sentence =
        last.len() >= MIN_COMPLETE_SENTENCE_LEN && last.ends_with(['.', '?', '!']);

    if complete_sentence {
        (trimmed.to_string(), None)
    } else {
        let head = lines[..lines.len() - 1].join("\n");
        (head, Some(last.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_text_has_no_tail() {
        let text = "The crane must stand on firm ground.\nOutriggers are extended fully before lifting.";
        let (complete, tail) = split_incomplete_tail(text);
        assert_eq!(complete, text);
        assert!(tail.is_none());
    }

    #[test]
    fn unterminated_last_line_is_carried() {
        let text = "The counterweight is mounted at the rear.\nThe telescoping boom can be";
        let (complete, tail) = split_incomplete_tail(text);
        assert_eq!(complete, "The counterweight is mounted at the rear.");
        assert_eq!(tail.as_deref(), Some("The telescoping boom can be"));
    }

    #[test]
    fn short_terminated_line_is_still_carried() {
        // Ends with '.' but too short to trust as a full sentence.
        let text = "A long complete sentence about hydraulic pressure limits.\nSee fig. 3.";
        let (complete, tail) = split_incomplete_tail(text);
        assert_eq!(
            complete,
            "A long complete sentence about hydraulic pressure limits."
        );
        assert_eq!(tail.as_deref(), Some("See fig. 3."));
    }

    #[test]
    fn question_terminator_counts_as_complete() {
        let text = "What is the maximum permissible axle load?";
        let (complete, tail) = split_incomplete_tail(text);
        assert_eq!(complete, text);
        assert!(tail.is_none());
    }

    #[test]
    fn single_incomplete_line_leaves_nothing_complete() {
        let (complete, tail) = split_incomplete_tail("The boom was");
        assert_eq!(complete, "");
        assert_eq!(tail.as_deref(), Some("The boom was"));
    }

    #[test]
    fn empty_input() {
        let (complete, tail) = split_incomplete_tail("   \n  ");
        assert_eq!(complete, "");
        assert!(tail.is_none());
    }

    #[test]
    fn trailing_whitespace_on_last_line_is_ignored() {
        let text = "Fully extend all four outriggers before operation.   ";
        let (complete, tail) = split_incomplete_tail(text);
        assert!(tail.is_none());
        assert_eq!(complete, "Fully extend all four outriggers before operation.");
    }
}
