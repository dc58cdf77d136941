pub mod jsonl;
pub mod record;

pub use jsonl::*;
pub use record::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Record has an empty instruction field")]
    EmptyInstruction,
}
