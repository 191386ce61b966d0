use anyhow::Result;
use billtracker_lib::search::query_variants;
use billtracker_lib::validation;
use billtracker_lib::BillNormalizer;
use clap::Args;
use serde::Serialize;

use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct NormalizeArgs {
    /// Bill number as typed (e.g. "hb 007", "Texas (TX) HB7")
    pub bill: String,

    /// Jurisdiction full name or abbreviation (e.g. Iowa, IA)
    #[arg(long, short)]
    pub jurisdiction: String,
}

#[derive(Serialize)]
struct NormalizeOutput<'a> {
    jurisdiction: &'a str,
    input: &'a str,
    canonical: String,
    variants: Vec<String>,
}

pub fn run(args: &NormalizeArgs, normalizer: &BillNormalizer, format: &OutputFormat) -> Result<()> {
    let jurisdiction = validation::validate_jurisdiction(&args.jurisdiction)?;
    let bill = validation::validate_bill_text(&args.bill)?;

    let cleaned = normalizer.clean_and_normalize(&bill, jurisdiction.name);
    let canonical = normalizer.normalize(&cleaned, jurisdiction.name);
    let variants = query_variants(&cleaned, &canonical);

    match format {
        OutputFormat::Json => print_json(&NormalizeOutput {
            jurisdiction: jurisdiction.name,
            input: &bill,
            canonical,
            variants,
        }),
        _ => {
            println!("{}", canonical);
            eprintln!("Search variants: {}", variants.join(", "));
        }
    }
    Ok(())
}
