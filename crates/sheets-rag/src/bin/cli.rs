//! Search CLI over the persisted chunk store
//!
//! Run with: cargo run -p sheets-rag --features cli -- search "backlog rota"

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sheets_rag::{retrieve, Chunk, FileStore, RagConfig, RetrieveOptions, StoreOptions};

const MAX_SNIPPET_CHARS: usize = 200;

#[derive(Parser)]
#[command(name = "sheets-rag", about = "Keyword retrieval over indexed spreadsheet chunks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search the chunk store
    Search {
        query: String,
        /// Number of results to return
        #[arg(long)]
        top_k: Option<usize>,
    },
    /// Print store statistics
    Stats,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sheets_rag=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = RagConfig::from_env();

    let mut store = FileStore::new(StoreOptions {
        path: config.store.path.clone(),
        allow_temp_fallback: config.store.allow_temp_fallback,
    })?;
    store.load()?;

    match cli.command {
        Command::Search { query, top_k } => {
            let mut options = RetrieveOptions::from(&config.retrieval);
            if let Some(top_k) = top_k {
                options.top_k = top_k;
            }

            let results = retrieve(&query, &options, &store);
            if results.is_empty() {
                println!("No results found.");
                return Ok(());
            }

            println!("Search results:");
            for (position, chunk) in results.iter().enumerate() {
                println!("{}) {}", position + 1, snippet(&chunk.text));
                println!("Source: {}", source_label(chunk));
            }
        }
        Command::Stats => {
            println!("Store: {}", store.path().display());
            println!("Chunks: {}", store.len());
            println!("Indexed tokens: {}", store.inverted_index().len());
        }
    }

    Ok(())
}

fn snippet(text: &str) -> String {
    let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.chars().count() <= MAX_SNIPPET_CHARS {
        cleaned
    } else {
        let truncated: String = cleaned.chars().take(MAX_SNIPPET_CHARS).collect();
        format!("{truncated}...")
    }
}

fn source_label(chunk: &Chunk) -> String {
    let sheet = if !chunk.spreadsheet_name.is_empty() {
        &chunk.spreadsheet_name
    } else if !chunk.spreadsheet_id.is_empty() {
        &chunk.spreadsheet_id
    } else {
        "Unknown"
    };
    let tab = if chunk.tab_name.is_empty() {
        "Unknown"
    } else {
        &chunk.tab_name
    };
    let range = if !chunk.range_a1.is_empty() {
        &chunk.range_a1
    } else if !chunk.scan_range_a1.is_empty() {
        &chunk.scan_range_a1
    } else {
        "Unknown"
    };

    format!("{sheet} > {tab} > {range}")
}
