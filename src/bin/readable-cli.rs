use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use readable_urls::config::RewriterConfig;
use readable_urls::http::build_rewriter;
use readable_urls::resolve::Encoding;
use readable_urls::routing::RuleTable;
use readable_urls::store::MemoryStore;

#[derive(Parser)]
#[command(name = "readable-cli")]
#[command(about = "Inspect readable URL resolution offline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a path against a records file
    Resolve {
        /// Decoded request path, e.g. /books/OL1M/edit
        path: String,

        /// JSON file holding an array of records
        #[arg(short, long)]
        store: PathBuf,

        /// Request a structured encoding (json, rdf, yml)
        #[arg(short, long)]
        encoding: Option<Encoding>,
    },
    /// Print the compiled rule table in match order
    Rules,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            path,
            store,
            encoding,
        } => {
            let store = Arc::new(MemoryStore::load_from_file(&store)?);
            let rewriter = build_rewriter(&RewriterConfig::default(), store)?;
            let resolution = rewriter.resolver().resolve(&path, encoding);
            println!("{}", serde_json::to_string_pretty(&resolution)?);
        }
        Commands::Rules => {
            let table = RuleTable::builtin()?;
            let rules: Vec<_> = table.iter().map(|compiled| &compiled.rule).collect();
            println!("{}", serde_json::to_string_pretty(&rules)?);
        }
    }

    Ok(())
}
