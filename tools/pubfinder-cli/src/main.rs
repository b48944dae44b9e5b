//! Pubfinder command-line search
//!
//! Runs one search against either MongoDB Atlas or a local venue file and
//! prints the ranked results.

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use pubfinder_core::{
    init_logging, load_env, load_env_from_path, EmbeddingConfig, Logger, MongoConfig,
    RankedResult, ReviewSummarizer, SearchConfig, SearchPipeline, SummarizerConfig, VenueStore,
};
use pubfinder_provider_openai::OpenAIChatClient;
use pubfinder_provider_voyage::VoyageEmbeddingClient;
use pubfinder_storage_mongo::MongoVenueStore;
use pubfinder_storage_vector::LocalVenueStore;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// What to look for, e.g. "craft beer with outdoor seating"
    query: String,

    /// Reference latitude (defaults to PUBFINDER_REFERENCE_LAT or downtown Denver)
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Reference longitude (defaults to PUBFINDER_REFERENCE_LNG or downtown Denver)
    #[arg(long, allow_hyphen_values = true)]
    lng: Option<f64>,

    /// Venue store backend
    #[arg(short, long, value_enum, default_value = "mongo")]
    store: StoreKind,

    /// JSON venue file for the local store
    #[arg(short, long, required_if_eq("store", "local"))]
    data: Option<PathBuf>,

    /// Skip the summarization provider and truncate reviews instead
    #[arg(long)]
    no_summary: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Load environment from this file instead of ./.env
    #[arg(long)]
    env_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StoreKind {
    /// MongoDB Atlas vector search
    Mongo,
    /// JSON file searched in memory
    Local,
}

async fn open_store(cli: &Cli) -> anyhow::Result<Arc<dyn VenueStore>> {
    match cli.store {
        StoreKind::Mongo => {
            let config = MongoConfig::from_env().context("MONGODB_URI is not set")?;
            Ok(Arc::new(MongoVenueStore::connect(&config).await?))
        }
        StoreKind::Local => {
            let Some(path) = &cli.data else {
                bail!("--data is required with --store local");
            };
            Ok(Arc::new(LocalVenueStore::from_json_file(path)?))
        }
    }
}

fn build_summarizer(cli: &Cli, logger: &Logger) -> anyhow::Result<ReviewSummarizer> {
    if cli.no_summary {
        return Ok(ReviewSummarizer::disabled());
    }
    match SummarizerConfig::from_env() {
        Some(config) => {
            let client = OpenAIChatClient::new(&config)?;
            logger.debug(&format!("Summarizing with {}", client.model()));
            Ok(ReviewSummarizer::new(Arc::new(client), &config))
        }
        None => {
            logger.warn("OPENAI_API_KEY is not set, summaries fall back to truncated reviews");
            Ok(ReviewSummarizer::disabled())
        }
    }
}

fn print_table(results: &[RankedResult]) {
    if results.is_empty() {
        println!("No matching venues found.");
        return;
    }
    for (i, r) in results.iter().enumerate() {
        println!("{}. {}  ({:.1}/5, {})", i + 1, r.name, r.rating, r.distance);
        if !r.formatted_address.is_empty() {
            println!("   {}", r.formatted_address);
        }
        println!("   score {}  {}", r.similarity_score, r.map_uri);
        println!("   {}", r.summarized_review);
        println!();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.env_file {
        Some(path) => load_env_from_path(path)?,
        None => load_env()?,
    }
    init_logging();
    let logger = Logger::new("pubfinder-cli");

    let embedder = VoyageEmbeddingClient::new(&EmbeddingConfig::from_env()?)?;
    let store = open_store(&cli).await?;
    let summarizer = build_summarizer(&cli, &logger)?;

    let pipeline = SearchPipeline::new(Arc::new(embedder), store, SearchConfig::from_env())
        .with_summarizer(summarizer);

    let results = match pipeline.search(&cli.query, cli.lat, cli.lng).await {
        Ok(results) => results,
        Err(e) => {
            if !e.is_invalid_query() {
                logger.error(&e.to_string());
            }
            eprintln!("{}", e.user_message());
            std::process::exit(if e.is_invalid_query() { 2 } else { 1 });
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_table(&results);
    }
    logger.success(&format!("{} results", results.len()));

    Ok(())
}
