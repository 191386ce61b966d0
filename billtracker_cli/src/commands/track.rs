use anyhow::{bail, Result};
use billtracker_lib::Tracker;
use clap::Args;

use crate::dashboard::render_dashboard;
use crate::output::{print_summaries, OutputFormat};

#[derive(Args)]
pub struct TrackArgs {
    /// Jurisdiction full name or abbreviation shared by every bill
    #[arg(long, short)]
    pub jurisdiction: String,

    /// Bill numbers to track (e.g. HB7 SB12)
    #[arg(required = true, num_args = 1..)]
    pub bills: Vec<String>,

    /// Session year; omit to search all years
    #[arg(long)]
    pub year: Option<i32>,
}

pub async fn run(args: &TrackArgs, tracker: &mut Tracker, format: &OutputFormat) -> Result<()> {
    for bill in &args.bills {
        match tracker.add_bill(&args.jurisdiction, bill, args.year).await {
            Ok(added) => eprintln!("Added {} {}", added.state, added.bill_number),
            Err(e) if e.is_transport() => return Err(e.into()),
            Err(e) => eprintln!("Skipping {}: {}", bill, e),
        }
    }

    if tracker.store().is_empty() {
        bail!("none of the requested bills could be tracked");
    }

    if *format == OutputFormat::Table {
        println!("{}\n", render_dashboard(tracker.store()));
    }
    print_summaries(&tracker.store().summary_views(), format)
}
