use super::types::QaPair;
use super::GenerationError;

/// Recover question/answer pairs from a model reply.
///
/// The reply is split on literal `Q:` markers. Within each section the text
/// before the first `A:` is the question and the text up to any following
/// `A:` is the answer. Sections without an `A:` marker and pairs with an
/// empty question are dropped. A reply yielding no pair at all is malformed.
pub fn parse_qa_response(response: &str) -> Result<Vec<QaPair>, GenerationError> {
    let mut pairs = Vec::new();

    // The first split segment precedes any Q: marker and is never a pair.
    for section in response.split("Q:").skip(1) {
        let Some((question, rest)) = section.split_once("A:") else {
            continue;
        };

        let question = question.trim();
        if question.is_empty() {
            continue;
        }

        // Only the text up to the next A: marker belongs to this answer.
        let answer = rest.split("A:").next().unwrap_or(rest).trim();

        pairs.push(QaPair {
            question: question.to_string(),
            answer: answer.to_string(),
        });
    }

    if pairs.is_empty() {
        return Err(GenerationError::MalformedReply(
            "no Q/A pairs found in reply".into(),
        ));
    }

    Ok(pairs)
}
