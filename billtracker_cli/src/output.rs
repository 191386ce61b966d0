use anyhow::Result;
use billtracker_lib::{KeywordResult, SummaryView};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    /// Unknown names fall back to `Table`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct SearchResultRow {
    #[tabled(rename = "#")]
    #[serde(rename = "#")]
    index: usize,
    #[tabled(rename = "State")]
    #[serde(rename = "State")]
    state: String,
    #[tabled(rename = "Bill")]
    #[serde(rename = "Bill")]
    bill_number: String,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Relevance")]
    #[serde(rename = "Relevance")]
    relevance: String,
    #[tabled(rename = "Last Action")]
    #[serde(rename = "Last Action")]
    last_action_date: String,
}

#[derive(Tabled, Serialize)]
struct SummaryRow {
    #[tabled(rename = "State")]
    #[serde(rename = "State")]
    state: String,
    #[tabled(rename = "Bill")]
    #[serde(rename = "Bill")]
    bill_number: String,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Dem")]
    #[serde(rename = "Dem")]
    dem_sponsors: u32,
    #[tabled(rename = "Rep")]
    #[serde(rename = "Rep")]
    rep_sponsors: u32,
    #[tabled(rename = "Start")]
    #[serde(rename = "Start")]
    start_date: String,
    #[tabled(rename = "End")]
    #[serde(rename = "End")]
    end_date: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Last Action")]
    #[serde(rename = "Last Action")]
    last_action: String,
}

// -- Row builders --

fn build_search_result_rows(results: &[KeywordResult]) -> Vec<SearchResultRow> {
    results
        .iter()
        .enumerate()
        .map(|(index, r)| SearchResultRow {
            index,
            state: r.state.clone(),
            bill_number: r.bill_number.clone().unwrap_or_default(),
            title: truncate(&r.title, 80),
            relevance: r.relevance.map(format_relevance).unwrap_or_default(),
            last_action_date: r.last_action_date.clone().unwrap_or_default(),
        })
        .collect()
}

fn build_summary_rows(views: &[SummaryView]) -> Vec<SummaryRow> {
    views
        .iter()
        .map(|v| SummaryRow {
            state: v.record.state.clone().unwrap_or_default(),
            bill_number: v.record.bill_number.clone().unwrap_or_default(),
            title: truncate(v.record.title.as_deref().unwrap_or_default(), 60),
            dem_sponsors: v.record.dem_sponsors,
            rep_sponsors: v.record.rep_sponsors,
            start_date: v.start_date.map(|d| d.to_string()).unwrap_or_default(),
            end_date: v.end_date.map(|d| d.to_string()).unwrap_or_default(),
            status: v.completion_label.to_string(),
            last_action: truncate(v.record.last_action.as_deref().unwrap_or_default(), 40),
        })
        .collect()
}

// -- Rendering --

fn render_table<R: Tabled>(rows: Vec<R>, markdown: bool) -> String {
    let mut table = Table::new(rows);
    if markdown {
        table.with(Style::markdown());
    }
    table.to_string()
}

fn write_csv<R: Serialize, W: std::io::Write>(rows: &[R], out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_search_results(results: &[KeywordResult], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_table(build_search_result_rows(results), false)),
        OutputFormat::Markdown => println!("{}", render_table(build_search_result_rows(results), true)),
        OutputFormat::Json => print_json(&results),
        OutputFormat::Csv => write_csv(&build_search_result_rows(results), std::io::stdout())?,
    }
    Ok(())
}

pub fn print_summaries(views: &[SummaryView], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_table(build_summary_rows(views), false)),
        OutputFormat::Markdown => println!("{}", render_table(build_summary_rows(views), true)),
        OutputFormat::Json => print_json(&views),
        OutputFormat::Csv => write_csv(&build_summary_rows(views), std::io::stdout())?,
    }
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn format_relevance(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// Cuts `text` to at most `max` characters, marking the cut with `...`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}
