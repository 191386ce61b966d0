use anyhow::Result;
use billtracker_lib::search::DEFAULT_MAX_RESULTS;
use billtracker_lib::{validation, Tracker};
use clap::Args;

use crate::output::{print_search_results, OutputFormat};

#[derive(Args)]
pub struct SearchArgs {
    /// Free-text keyword(s)
    pub keyword: String,

    /// Restrict to one jurisdiction; "All" or omitted searches everywhere
    #[arg(long, short)]
    pub jurisdiction: Option<String>,

    /// Session year; omit to search all years
    #[arg(long)]
    pub year: Option<i32>,

    /// Maximum number of results to show
    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
    pub max_results: usize,
}

pub async fn run(args: &SearchArgs, tracker: Tracker, format: &OutputFormat) -> Result<()> {
    let max_results = validation::validate_max_results(args.max_results)?;
    let mut tracker = tracker.with_max_results(max_results);

    let count = tracker
        .search_keyword(&args.keyword, args.jurisdiction.as_deref(), args.year)
        .await?;
    eprintln!("{} result(s)", count);

    if count > 0 {
        print_search_results(tracker.store().search_results(), format)?;
    }
    Ok(())
}
