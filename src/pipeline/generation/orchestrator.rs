use tracing::{info, warn};

use super::parser::parse_qa_response;
use super::prompt::{build_qa_messages, build_restructure_messages};
use super::sentence::split_incomplete_tail;
use super::types::{ChatMessage, GenerationOptions, LlmClient, QaPair};
use super::GenerationError;

/// Chunks shorter than this are skipped instead of sent to the model.
const MIN_CHUNK_LENGTH: usize = 10;

/// Maximum retry attempts per LLM call (transport and parse failures).
const MAX_LLM_RETRIES: usize = 2;

/// Outcome of a generation run over all chunks.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub pairs: Vec<QaPair>,
    pub chunks_processed: usize,
    pub chunks_skipped: usize,
}

/// Drives Q&A generation for one document:
/// carryover → restructure → generate → parse, chunk by chunk.
pub struct QaGenerator {
    llm: Box<dyn LlmClient + Send + Sync>,
    model: String,
    options: GenerationOptions,
    restructure: bool,
}

impl QaGenerator {
    pub fn new(llm: Box<dyn LlmClient + Send + Sync>, model: &str) -> Self {
        Self {
            llm,
            model: model.to_string(),
            options: GenerationOptions::default(),
            restructure: true,
        }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Feed raw chunks straight to Q&A generation, skipping the
    /// restructuring pass.
    pub fn without_restructure(mut self) -> Self {
        self.restructure = false;
        self
    }

    /// Process every chunk in order, accumulating parsed pairs.
    ///
    /// A chunk whose reply stays unparseable after retries is skipped and
    /// counted; transport errors that survive retries abort the run.
    pub fn generate(&self, chunks: &[String]) -> Result<GenerationOutcome, GenerationError> {
        let total = chunks.len();
        let mut pairs = Vec::new();
        let mut carry = String::new();
        let mut processed = 0;
        let mut skipped = 0;

        for (i, chunk) in chunks.iter().enumerate() {
            let is_last = i + 1 == total;
            let text = if carry.is_empty() {
                chunk.clone()
            } else {
                format!("{carry} {chunk}")
            };
            carry.clear();

            if text.trim().len() < MIN_CHUNK_LENGTH {
                warn!(chunk = i + 1, total, "Skipping chunk with too little text");
                skipped += 1;
                continue;
            }

            let content = if self.restructure {
                let structured = self.chat_with_retry(&build_restructure_messages(&text))?;
                if is_last {
                    // No next chunk to continue into; keep the tail.
                    structured
                } else {
                    let (complete, tail) = split_incomplete_tail(&structured);
                    if let Some(tail) = tail {
                        carry = tail;
                    }
                    complete
                }
            } else {
                text
            };

            if content.trim().is_empty() {
                warn!(chunk = i + 1, total, "Restructuring left no content");
                skipped += 1;
                continue;
            }

            match self.qa_pairs_with_retry(&content) {
                Ok(chunk_pairs) => {
                    info!(
                        chunk = i + 1,
                        total,
                        pairs = chunk_pairs.len(),
                        "Chunk complete"
                    );
                    pairs.extend(chunk_pairs);
                    processed += 1;
                }
                Err(GenerationError::MalformedReply(reason)) => {
                    warn!(chunk = i + 1, total, %reason, "No pairs recovered, skipping chunk");
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(GenerationOutcome {
            pairs,
            chunks_processed: processed,
            chunks_skipped: skipped,
        })
    }

    /// One chat call with retries on transport-level failures.
    fn chat_with_retry(&self, messages: &[ChatMessage]) -> Result<String, GenerationError> {
        let mut attempt = 0;
        loop {
            match self.llm.chat(&self.model, messages, &self.options) {
                Ok(reply) => return Ok(reply),
                Err(e) if is_retryable_error(&e) && attempt < MAX_LLM_RETRIES => {
                    attempt += 1;
                    warn!(attempt, error = %e, "LLM call failed, retrying");
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Q&A call plus parse, retrying malformed replies with a fresh call.
    fn qa_pairs_with_retry(&self, content: &str) -> Result<Vec<QaPair>, GenerationError> {
        let messages = build_qa_messages(content);
        let mut attempt = 0;
        loop {
            let reply = self.chat_with_retry(&messages)?;
            match parse_qa_response(&reply) {
                Ok(pairs) => return Ok(pairs),
                Err(e) if attempt < MAX_LLM_RETRIES => {
                    attempt += 1;
                    warn!(attempt, error = %e, "Reply parse failed, retrying");
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Transport-level failures worth a fresh attempt.
fn is_retryable_error(e: &GenerationError) -> bool {
    matches!(
        e,
        GenerationError::Connection(_)
            | GenerationError::HttpClient(_)
            | GenerationError::Api { .. }
    )
}
