use std::sync::Mutex;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::types::{ChatMessage, GenerationOptions, LlmClient};
use super::GenerationError;

/// Models tried in order when the user does not name one.
/// The first installed match wins.
const DEFAULT_MODELS: &[&str] = &["llama3", "llama3.1", "llama3:latest", "mistral"];

/// Ollama HTTP client for local LLM inference.
pub struct OllamaClient {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OllamaClient {
    /// Create a new OllamaClient pointing at an Ollama instance.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, GenerationError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| GenerationError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        })
    }

    /// Default Ollama instance at localhost:11434 with 5-minute timeout.
    pub fn default_local() -> Result<Self, GenerationError> {
        Self::new("http://localhost:11434", 300)
    }
}

/// Request body for Ollama /api/chat
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    options: &'a GenerationOptions,
}

/// Response body from Ollama /api/chat
#[derive(Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Response body from Ollama /api/tags
#[derive(Deserialize)]
struct TagsResponse {
    models: Vec<TagModel>,
}

#[derive(Deserialize)]
struct TagModel {
    name: String,
}

impl LlmClient for OllamaClient {
    fn chat(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        let url = format!("{}/api/chat", self.base_url);
        let body = ChatRequest {
            model,
            messages,
            stream: false,
            options,
        };

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                GenerationError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                GenerationError::HttpClient(format!(
                    "Request timed out after {}s",
                    self.timeout_secs
                ))
            } else {
                GenerationError::HttpClient(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| GenerationError::ResponseParsing(e.to_string()))?;

        Ok(parsed.message.content)
    }

    fn is_model_available(&self, model: &str) -> Result<bool, GenerationError> {
        let models = self.list_models()?;
        Ok(models.iter().any(|m| m.starts_with(model)))
    }

    fn list_models(&self) -> Result<Vec<String>, GenerationError> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self.client.get(&url).send().map_err(|e| {
            if e.is_connect() {
                GenerationError::Connection(self.base_url.clone())
            } else {
                GenerationError::HttpClient(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TagsResponse = response
            .json()
            .map_err(|e| GenerationError::ResponseParsing(e.to_string()))?;

        Ok(parsed.models.into_iter().map(|m| m.name).collect())
    }
}

/// Pick the model for a run: a user-named model must be installed,
/// otherwise the first installed entry of `DEFAULT_MODELS` wins.
pub fn resolve_model(
    llm: &dyn LlmClient,
    requested: Option<&str>,
) -> Result<String, GenerationError> {
    if let Some(name) = requested {
        validate_model_name(name)?;
        if !llm.is_model_available(name)? {
            return Err(GenerationError::ModelNotFound(name.to_string()));
        }
        return Ok(name.to_string());
    }

    let installed = llm.list_models()?;
    for preferred in DEFAULT_MODELS {
        if installed.iter().any(|m| m.starts_with(preferred)) {
            return Ok(preferred.to_string());
        }
    }
    Err(GenerationError::NoModelAvailable)
}

/// Validate a model name against the Ollama naming convention.
///
/// Prevents path traversal, shell injection, and other malicious
/// characters in model names before any HTTP call.
///
/// Supports community namespace format: `namespace/model:tag`
/// Valid: `llama3:8b`, `library/llama3.1`, `mistral`
/// Invalid: `../etc/passwd`, `; rm -rf /`, `a/b/c` (double namespace)
pub fn validate_model_name(name: &str) -> Result<(), GenerationError> {
    if name.is_empty() {
        return Err(GenerationError::InvalidModelName(name.to_string()));
    }

    // Format: [namespace/]model[:tag]
    // Each segment must start with alphanumeric; at most ONE `/` allowed.
    let valid = Regex::new(
        r"^[a-zA-Z0-9][a-zA-Z0-9._-]*(/[a-zA-Z0-9][a-zA-Z0-9._-]*)?(:[a-zA-Z0-9._-]+)?$",
    )
    .expect("static regex");

    if !valid.is_match(name) {
        return Err(GenerationError::InvalidModelName(name.to_string()));
    }

    Ok(())
}

/// Mock LLM client for testing — returns scripted replies in sequence,
/// repeating the last one once exhausted.
pub struct MockLlmClient {
    replies: Vec<String>,
    next: Mutex<usize>,
    available_models: Vec<String>,
}

impl MockLlmClient {
    pub fn new(replies: Vec<&str>) -> Self {
        Self {
            replies: replies.into_iter().map(String::from).collect(),
            next: Mutex::new(0),
            available_models: vec!["llama3:latest".to_string()],
        }
    }

    pub fn with_models(mut self, models: Vec<String>) -> Self {
        self.available_models = models;
        self
    }

    /// Number of chat calls made so far.
    pub fn calls(&self) -> usize {
        *self.next.lock().expect("mock lock")
    }
}

impl LlmClient for MockLlmClient {
    fn chat(
        &self,
        _model: &str,
        _messages: &[ChatMessage],
        _options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        let mut next = self.next.lock().expect("mock lock");
        let idx = (*next).min(self.replies.len().saturating_sub(1));
        *next += 1;
        self.replies
            .get(idx)
            .cloned()
            .ok_or_else(|| GenerationError::MalformedReply("mock has no replies".into()))
    }

    fn is_model_available(&self, model: &str) -> Result<bool, GenerationError> {
        Ok(self.available_models.iter().any(|m| m.starts_with(model)))
    }

    fn list_models(&self) -> Result<Vec<String>, GenerationError> {
        Ok(self.available_models.clone())
    }
}
