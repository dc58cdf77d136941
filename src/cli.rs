//! Command-line surface for qamill.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::pipeline::extraction::ChunkingStrategy;
use crate::pipeline::generation::{GenerationOptions, LlmClient, OllamaClient};
use crate::pipeline::processor::{run, RunConfig};

#[derive(Parser)]
#[command(name = "qamill")]
#[command(about = "Generate JSONL fine-tuning datasets from PDF documents with a local LLM")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a PDF, restructure it, and generate Q&A training pairs
    Generate {
        /// Path to the source PDF
        pdf: PathBuf,

        /// Output JSONL file
        #[arg(short, long, default_value = "train.jsonl")]
        output: PathBuf,

        /// Model name; defaults to the first installed model from the
        /// preferred list
        #[arg(short, long)]
        model: Option<String>,

        /// Base URL of the Ollama-compatible service
        #[arg(long, default_value = "http://localhost:11434")]
        base_url: String,

        /// Pages per chunk (page-window chunking, the default)
        #[arg(long, default_value_t = 5)]
        pages_per_chunk: usize,

        /// Chunk by characters instead of pages, with this window size
        #[arg(long)]
        chunk_chars: Option<usize>,

        /// Characters shared between adjacent windows (with --chunk-chars)
        #[arg(long, default_value_t = 200)]
        chunk_overlap: usize,

        /// Send raw chunks straight to Q&A generation, skipping the
        /// restructuring pass
        #[arg(long)]
        no_restructure: bool,

        /// Sampling temperature
        #[arg(long, default_value_t = 0.1)]
        temperature: f32,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = 300)]
        timeout_secs: u64,
    },
    /// List models installed on the local service
    Models {
        /// Base URL of the Ollama-compatible service
        #[arg(long, default_value = "http://localhost:11434")]
        base_url: String,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Generate {
                pdf,
                output,
                model,
                base_url,
                pages_per_chunk,
                chunk_chars,
                chunk_overlap,
                no_restructure,
                temperature,
                timeout_secs,
            } => {
                if !(0.0..=1.0).contains(&temperature) {
                    bail!("temperature must be between 0.0 and 1.0");
                }

                let chunking = match chunk_chars {
                    Some(size) => ChunkingStrategy::Chars {
                        size,
                        overlap: chunk_overlap,
                    },
                    None => ChunkingStrategy::Pages {
                        per_chunk: pages_per_chunk,
                    },
                };

                let config = RunConfig {
                    pdf_path: pdf,
                    output_path: output,
                    base_url,
                    model,
                    chunking,
                    restructure: !no_restructure,
                    options: GenerationOptions {
                        temperature,
                        ..GenerationOptions::default()
                    },
                    timeout_secs,
                };

                let report = run(&config).context("dataset run failed")?;
                println!(
                    "{} records from {} chunks ({} skipped) -> {}",
                    report.record_count,
                    report.chunk_count,
                    report.chunks_skipped,
                    report.output_path.display()
                );
                println!(
                    "model {}, {} pages, finished in {}s",
                    report.model,
                    report.page_count,
                    (report.finished_at - report.started_at).num_seconds()
                );
                Ok(())
            }
            Commands::Models { base_url } => {
                let client = OllamaClient::new(&base_url, 30)?;
                let models = client
                    .list_models()
                    .context("could not reach the model service")?;
                if models.is_empty() {
                    println!("No models installed.");
                } else {
                    for model in models {
                        println!("{model}");
                    }
                }
                Ok(())
            }
        }
    }
}
