//! End-to-end document processing orchestrator.
//!
//! Single entry point that drives the full pipeline:
//! extract → sanitize → chunk → generate → persist.
//!
//! The LLM client is passed in as a trait object so the whole run is
//! testable with mock implementations.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::dataset::{DatasetError, JsonlWriter, TrainingRecord};
use crate::pipeline::extraction::{
    chunk_pages, sanitize_extracted_text, ChunkingStrategy, ExtractionError, PdfSource,
    PdfTextExtractor,
};
use crate::pipeline::generation::{
    resolve_model, GenerationError, GenerationOptions, LlmClient, OllamaClient, QaGenerator,
};

/// Errors that can occur during a dataset run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Dataset write failed: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Could not read {path}: {source}")]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Everything one dataset run needs to know.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub pdf_path: PathBuf,
    pub output_path: PathBuf,
    pub base_url: String,
    /// Model to use; None resolves against the installed-model list.
    pub model: Option<String>,
    pub chunking: ChunkingStrategy,
    /// Restructure each chunk into clean sentences before Q&A generation.
    pub restructure: bool,
    pub options: GenerationOptions,
    pub timeout_secs: u64,
}

impl RunConfig {
    pub fn new(pdf_path: PathBuf, output_path: PathBuf) -> Self {
        Self {
            pdf_path,
            output_path,
            base_url: "http://localhost:11434".into(),
            model: None,
            chunking: ChunkingStrategy::default(),
            restructure: true,
            options: GenerationOptions::default(),
            timeout_secs: 300,
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub source: PathBuf,
    pub model: String,
    pub page_count: usize,
    pub chunk_count: usize,
    pub chunks_skipped: usize,
    pub record_count: usize,
    pub output_path: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Run the full pipeline against a live Ollama instance.
pub fn run(config: &RunConfig) -> Result<RunReport, PipelineError> {
    let client = OllamaClient::new(&config.base_url, config.timeout_secs)?;
    run_with_client(config, Box::new(client))
}

/// Run the full pipeline with a caller-supplied LLM client.
pub fn run_with_client(
    config: &RunConfig,
    llm: Box<dyn LlmClient + Send + Sync>,
) -> Result<RunReport, PipelineError> {
    let run_id = Uuid::new_v4();
    let _span = tracing::info_span!("dataset_run", %run_id).entered();
    let started_at = Utc::now();

    let pdf_bytes = std::fs::read(&config.pdf_path).map_err(|source| PipelineError::ReadInput {
        path: config.pdf_path.clone(),
        source,
    })?;

    let extractor = PdfTextExtractor;
    let mut pages = extractor.extract_pages(&pdf_bytes)?;
    for page in &mut pages {
        page.text = sanitize_extracted_text(&page.text);
    }
    tracing::info!(pages = pages.len(), "Extraction complete");

    let chunks = chunk_pages(&pages, config.chunking)?;
    tracing::info!(chunks = chunks.len(), "Chunking complete");

    let model = resolve_model(llm.as_ref(), config.model.as_deref())?;
    tracing::info!(%model, "Model resolved");

    let mut generator = QaGenerator::new(llm, &model).with_options(config.options.clone());
    if !config.restructure {
        generator = generator.without_restructure();
    }
    let outcome = generator.generate(&chunks)?;

    let mut writer = JsonlWriter::create(&config.output_path)?;
    for pair in outcome.pairs {
        writer.write(&TrainingRecord::from(pair))?;
    }
    let record_count = writer.finish()?;

    let report = RunReport {
        run_id,
        source: config.pdf_path.clone(),
        model,
        page_count: pages.len(),
        chunk_count: chunks.len(),
        chunks_skipped: outcome.chunks_skipped,
        record_count,
        output_path: config.output_path.clone(),
        started_at,
        finished_at: Utc::now(),
    };
    tracing::info!(
        records = report.record_count,
        skipped = report.chunks_skipped,
        output = %report.output_path.display(),
        "Run complete"
    );

    Ok(report)
}
