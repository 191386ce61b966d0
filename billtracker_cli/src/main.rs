mod commands;
mod dashboard;
mod output;

use anyhow::Result;
use billtracker_lib::{ApiConfig, BillNormalizer, BillSearcher, CachedClient, Tracker};
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "billtracker")]
#[command(about = "Look up and track state and federal legislation")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the canonical search token for a bill number (offline)
    Normalize(commands::normalize::NormalizeArgs),
    /// Find one bill and show its summary
    Lookup(commands::lookup::LookupArgs),
    /// Keyword search across bills
    Search(commands::search::SearchArgs),
    /// Track several bills and render the dashboard
    Track(commands::track::TrackArgs),
    /// Start an interactive session
    Session,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("billtracker=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);

    let normalizer = BillNormalizer::new()?;
    if let Commands::Normalize(args) = &cli.command {
        return commands::normalize::run(args, &normalizer, &format);
    }

    let config = ApiConfig::from_env();
    let client = CachedClient::from_config(&config)?;
    let mut tracker = Tracker::new(BillSearcher::new(client, normalizer));

    match &cli.command {
        Commands::Normalize(_) => {}
        Commands::Lookup(args) => commands::lookup::run(args, &mut tracker, &format).await?,
        Commands::Search(args) => commands::search::run(args, tracker, &format).await?,
        Commands::Track(args) => commands::track::run(args, &mut tracker, &format).await?,
        Commands::Session => commands::session::run(tracker, &format).await?,
    }

    Ok(())
}
