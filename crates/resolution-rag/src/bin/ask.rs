//! Command-line question answering over the resolution corpus
//!
//! Run with: cargo run -p resolution-rag --features cli --bin resolution-rag-ask -- "¿pregunta?"

use clap::Parser;
use console::style;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use resolution_rag::{
    config::RagConfig,
    providers,
    retrieval,
    types::{Citation, QueryResponse},
    RagPipeline,
};

#[derive(Parser)]
#[command(name = "resolution-rag-ask")]
#[command(about = "Ask questions about ministry resolutions")]
struct Cli {
    /// Question to answer; reads questions from stdin when omitted
    question: Option<String>,

    /// TOML configuration file (defaults to $RAG_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSONL file of resolutions (overrides configuration)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Chunks retrieved per question
    #[arg(short = 'k', long)]
    top_k: Option<usize>,

    /// Print the full text of every cited chunk
    #[arg(long, default_value_t = false)]
    show_sources: bool,

    /// Print the response as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "resolution_rag=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = RagConfig::load(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.data.path = data;
    }
    let k = cli
        .top_k
        .unwrap_or(config.retrieval.top_k)
        .min(config.retrieval.max_top_k);

    let embedder = providers::embedding_provider(&config.embeddings).await?;
    let llm = providers::llm_provider(&config.llm)?;
    llm.check_configured()?;

    eprintln!("{} {}", style("Indexing").cyan().bold(), config.data.path.display());
    let index = retrieval::build_corpus_index(&config, embedder.as_ref()).await?;
    let pipeline = RagPipeline::new(embedder, Arc::new(index), llm);

    match cli.question {
        Some(question) => ask(&pipeline, &question, k, cli.show_sources, cli.json).await?,
        None => {
            let stdin = std::io::stdin();
            loop {
                eprint!("{} ", style("?").green().bold());
                std::io::stderr().flush()?;

                let mut line = String::new();
                if stdin.lock().read_line(&mut line)? == 0 {
                    break;
                }
                let question = line.trim();
                if question.is_empty() {
                    continue;
                }

                // One failed question does not end the session
                if let Err(e) = ask(&pipeline, question, k, cli.show_sources, cli.json).await {
                    eprintln!("{} {}", style("error:").red().bold(), e);
                }
            }
        }
    }

    Ok(())
}

async fn ask(
    pipeline: &RagPipeline,
    question: &str,
    k: usize,
    show_sources: bool,
    json: bool,
) -> anyhow::Result<()> {
    let start = std::time::Instant::now();
    let result = pipeline.query(question, k).await?;
    let response = QueryResponse::from_result(&result, start.elapsed().as_millis() as u64);

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("\n{}\n", response.answer);
    println!(
        "{} ({} chunks, {}ms)",
        style("Fuentes").bold(),
        response.chunks_retrieved,
        response.processing_time_ms
    );
    for (i, source) in response.sources.iter().enumerate() {
        print_source(i + 1, source, show_sources);
    }
    println!();

    Ok(())
}

fn print_source(rank: usize, source: &Citation, full: bool) {
    println!(
        "  [{}] {} {}",
        rank,
        style(source.label()).yellow(),
        style(format!("({:.3})", source.similarity)).dim()
    );
    if full {
        for line in source.content.lines() {
            println!("      {}", line);
        }
    }
}
