use serde::{Deserialize, Serialize};

use crate::pipeline::generation::QaPair;

/// One fine-tuning example in instruction format.
///
/// Field names match the Alpaca-style JSONL convention consumed by common
/// fine-tuning toolchains. `input` stays empty for document-derived pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRecord {
    pub instruction: String,
    pub input: String,
    pub output: String,
}

impl From<QaPair> for TrainingRecord {
    fn from(pair: QaPair) -> Self {
        Self {
            instruction: pair.question,
            input: String::new(),
            output: pair.answer,
        }
    }
}
