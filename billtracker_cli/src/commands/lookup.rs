use anyhow::{bail, Result};
use billtracker_lib::Tracker;
use clap::Args;

use crate::output::{print_summaries, OutputFormat};

#[derive(Args)]
pub struct LookupArgs {
    /// Jurisdiction full name or abbreviation (e.g. Texas, TX)
    #[arg(long, short)]
    pub jurisdiction: String,

    /// Bill number (e.g. HB7)
    pub bill: String,

    /// Session year; omit to search all years
    #[arg(long)]
    pub year: Option<i32>,
}

pub async fn run(args: &LookupArgs, tracker: &mut Tracker, format: &OutputFormat) -> Result<()> {
    let added = tracker
        .add_bill(&args.jurisdiction, &args.bill, args.year)
        .await?;
    eprintln!("Bill id {}", added.bill_id);

    let views = tracker.store().summary_views();
    if views.is_empty() {
        bail!("bill {} was found but produced no record", added.bill_id);
    }
    print_summaries(&views, format)
}
