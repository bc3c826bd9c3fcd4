//! askdoc CLI - ask questions about a document
//!
//! # Commands
//!
//! ```bash
//! # Chunk a document and show the segments and vocabulary size
//! askdoc chunk input.txt
//!
//! # Index a file and answer one question
//! askdoc ask report.pdf "who scored"
//!
//! # Index a file once, then answer questions read from stdin
//! askdoc chat report.pdf
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use askdoc_lib::{
    answer::OpenAiCompleter,
    chunk::{Chunker, ParagraphChunker},
    config::RagConfig,
    embed::{BagOfWords, Vectorizer},
    service::RagService,
};
use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "askdoc")]
#[command(about = "Answer questions about a document with retrieval-augmented generation")]
#[command(version)]
struct Cli {
    /// TOML file overriding chunking and retrieval settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chunk a document and show the resulting segments
    Chunk {
        /// Input text file to chunk
        input: PathBuf,
    },

    /// Index a document and answer a single question
    Ask {
        /// Input document (PDF or UTF-8 text)
        input: PathBuf,

        /// Question to answer
        question: String,

        /// Only print the rendered prompt (skip the completion call)
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        completion: CompletionArgs,
    },

    /// Index a document, then answer questions read line by line from stdin
    Chat {
        /// Input document (PDF or UTF-8 text)
        input: PathBuf,

        #[command(flatten)]
        completion: CompletionArgs,
    },
}

#[derive(Args)]
struct CompletionArgs {
    /// OpenAI-compatible API root
    #[arg(long, env = "ASKDOC_COMPLETION_URL", default_value = "https://api.openai.com/v1")]
    completion_url: String,

    /// Chat model used to write answers
    #[arg(long, env = "ASKDOC_MODEL", default_value = "gpt-4o-mini")]
    model: String,

    /// API key sent as a bearer token
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Sampling temperature
    #[arg(long, default_value_t = 0.2)]
    temperature: f32,

    /// Maximum tokens to request from the model
    #[arg(long, default_value_t = 500)]
    max_tokens: usize,
}

impl CompletionArgs {
    fn completer(&self) -> Result<OpenAiCompleter> {
        let completer = OpenAiCompleter::new(&self.completion_url, &self.model)?
            .with_sampling(self.temperature, self.max_tokens);
        Ok(match &self.api_key {
            Some(key) => completer.with_api_key(key),
            None => completer,
        })
    }
}

fn load_config(path: Option<&Path>) -> Result<RagConfig> {
    match path {
        Some(p) => RagConfig::load(p).with_context(|| format!("loading {}", p.display())),
        None => Ok(RagConfig::default()),
    }
}

async fn ingest(
    input: &Path,
    config: RagConfig,
    completion: &CompletionArgs,
) -> Result<(RagService<OpenAiCompleter>, String)> {
    let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let service = RagService::new(config, completion.completer()?)?;
    let report = service.ingest_document(Some(bytes)).await?;
    println!(
        "Indexed '{}': {} pages, {} segments (id: {})",
        input.display(),
        report.page_count,
        report.segment_count,
        report.document_id
    );
    Ok((service, report.document_id))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Chunk { input } => {
            let text = fs::read_to_string(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let chunker = ParagraphChunker::new(config.chunk_size, config.chunk_overlap);
            let segments = chunker.chunk(&text);

            let texts: Vec<&str> = segments.iter().map(|s| s.text.as_str()).collect();
            let vocabulary = BagOfWords::new(config.max_vocabulary).build_vocabulary(&texts);

            println!(
                "Chunked '{}' into {} segments, {} vocabulary terms:\n",
                input.display(),
                segments.len(),
                vocabulary.len()
            );
            for s in &segments {
                println!("--- Segment {} ({} chars) ---", s.index, s.text.chars().count());
                // Show preview (first 200 chars)
                let preview: String = s.text.chars().take(200).collect();
                let ellipsis = if s.text.chars().count() > 200 { "..." } else { "" };
                println!("{preview}{ellipsis}\n");
            }
        }

        Commands::Ask {
            input,
            question,
            dry_run,
            completion,
        } => {
            let (service, id) = ingest(&input, config, &completion).await?;
            if dry_run {
                println!("\n{}", service.preview_prompt(&id, &question)?);
                return Ok(());
            }

            let answer = service.ask_question(Some(&id), Some(&question)).await?;
            println!(
                "\n{}\n\n({} segments, {} context chars)",
                answer.answer, answer.segments_used, answer.context_chars
            );
        }

        Commands::Chat { input, completion } => {
            let (service, id) = ingest(&input, config, &completion).await?;
            println!("Ask a question (Ctrl-D to quit).");

            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                if line.trim().is_empty() {
                    continue;
                }
                match service.ask_question(Some(&id), Some(&line)).await {
                    Ok(answer) => println!("\n{}\n", answer.answer),
                    Err(e) => eprintln!("error: {e}"),
                }
            }
        }
    }

    Ok(())
}
