pub mod ollama;
pub mod orchestrator;
pub mod parser;
pub mod prompt;
pub mod sentence;
pub mod types;

pub use ollama::*;
pub use orchestrator::*;
pub use parser::*;
pub use prompt::*;
pub use sentence::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Model service is not running at {0}")]
    Connection(String),

    #[error("Model service returned error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Model '{0}' is not installed")]
    ModelNotFound(String),

    #[error("No model is installed on the service")]
    NoModelAvailable,

    #[error("Invalid model name: '{0}'")]
    InvalidModelName(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Malformed model reply: {0}")]
    MalformedReply(String),
}
