//! Interactive session: a line-based loop over the tracker actions.

use anyhow::Result;
use billtracker_lib::{jurisdiction, validation, Tracker, ALL_YEARS};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::dashboard::render_dashboard;
use crate::output::{print_search_results, print_summaries, OutputFormat};

const HELP: &str = "\
Commands:
  add <jurisdiction>: <bill>      track one bill (e.g. add Texas: HB7, add TX HB7)
  search [<jurisdiction>:] <kw>   keyword search (e.g. search Iowa: water quality)
  results                         show pending search results
  select <n> [<n> ...]            add pending results by number
  year <yyyy|all>                 session year used by add and search
  dashboard                       KPIs, timeline and party distribution
  explorer                        table of tracked bills
  reset                           forget every tracked bill and pending result
  help                            this message
  quit                            leave the session";

#[derive(Debug, PartialEq)]
enum Command {
    Add { jurisdiction: String, bill: String },
    Search { jurisdiction: Option<String>, keyword: String },
    Results,
    Select(Vec<usize>),
    Year(Option<i32>),
    Dashboard,
    Explorer,
    Reset,
    Help,
    Quit,
}

/// `"Texas: HB7"`, `"TX HB7"`, `"New Hampshire HB 1"` or `"Texas (TX) HB7"`
/// into `(jurisdiction, bill)`.
///
/// Without a colon, the longest run of leading words naming a known
/// jurisdiction is taken, along with a following `(XX)` abbreviation. If no
/// prefix is recognised the first word is used, so validation can report it.
fn split_jurisdiction(input: &str) -> Option<(&str, &str)> {
    let input = input.trim();
    let (jurisdiction, rest) = match input.split_once(':') {
        Some(parts) => parts,
        None => split_known_jurisdiction(input)
            .or_else(|| input.split_once(char::is_whitespace))?,
    };
    let (jurisdiction, rest) = (jurisdiction.trim(), rest.trim());
    if jurisdiction.is_empty() || rest.is_empty() {
        None
    } else {
        Some((jurisdiction, rest))
    }
}

fn split_known_jurisdiction(input: &str) -> Option<(&str, &str)> {
    // Byte offsets where a word is followed by whitespace.
    let word_ends: Vec<usize> = input
        .char_indices()
        .zip(input.chars().skip(1))
        .filter(|((_, c), next)| !c.is_whitespace() && next.is_whitespace())
        .map(|((i, c), _)| i + c.len_utf8())
        .collect();

    word_ends.into_iter().rev().find_map(|end| {
        let head = &input[..end];
        let found = jurisdiction::lookup(head)?;
        let rest = input[end..].trim_start();
        Some((head, strip_abbreviation(rest, found.abbreviation)))
    })
}

/// Drops a leading `(XX)` when it names the same jurisdiction.
fn strip_abbreviation<'a>(rest: &'a str, abbreviation: &str) -> &'a str {
    match rest
        .strip_prefix('(')
        .and_then(|r| r.split_once(')'))
    {
        Some((inner, tail)) if inner.trim().eq_ignore_ascii_case(abbreviation) => tail.trim_start(),
        _ => rest,
    }
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    match word.to_ascii_lowercase().as_str() {
        "add" => split_jurisdiction(rest)
            .map(|(jurisdiction, bill)| Command::Add {
                jurisdiction: jurisdiction.to_string(),
                bill: bill.to_string(),
            })
            .ok_or_else(|| "usage: add <jurisdiction>: <bill>".to_string()),
        "search" => {
            if rest.is_empty() {
                return Err("usage: search [<jurisdiction>:] <keyword>".to_string());
            }
            Ok(match rest.split_once(':') {
                Some((jurisdiction, keyword)) => Command::Search {
                    jurisdiction: Some(jurisdiction.trim().to_string()),
                    keyword: keyword.trim().to_string(),
                },
                None => Command::Search {
                    jurisdiction: None,
                    keyword: rest.to_string(),
                },
            })
        }
        "results" => Ok(Command::Results),
        "select" => {
            let indices = rest
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty())
                .map(|s| s.parse::<usize>().map_err(|_| format!("'{}' is not a result number", s)))
                .collect::<Result<Vec<_>, _>>()?;
            if indices.is_empty() {
                return Err("usage: select <n> [<n> ...]".to_string());
            }
            Ok(Command::Select(indices))
        }
        "year" => match rest.to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Command::Year(None)),
            value => value
                .parse::<i32>()
                .map(|y| Command::Year(Some(y)))
                .map_err(|_| format!("'{}' is not a year", value)),
        },
        "dashboard" => Ok(Command::Dashboard),
        "explorer" => Ok(Command::Explorer),
        "reset" => Ok(Command::Reset),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("unknown command '{}', type 'help'", other)),
    }
}

pub async fn run(mut tracker: Tracker, format: &OutputFormat) -> Result<()> {
    println!("{}", HELP);
    let mut year: Option<i32> = None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        eprint!("> ");
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(msg) => {
                eprintln!("{}", msg);
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        if let Err(e) = execute(command, &mut tracker, &mut year, format).await {
            eprintln!("Error: {}", e);
        }
    }
    Ok(())
}

async fn execute(
    command: Command,
    tracker: &mut Tracker,
    year: &mut Option<i32>,
    format: &OutputFormat,
) -> Result<()> {
    match command {
        Command::Add { jurisdiction, bill } => {
            let added = tracker.add_bill(&jurisdiction, &bill, *year).await?;
            println!("Added {} {}", added.state, added.bill_number);
        }
        Command::Search {
            jurisdiction,
            keyword,
        } => {
            let count = tracker
                .search_keyword(&keyword, jurisdiction.as_deref(), *year)
                .await?;
            if count == 0 {
                println!("No results found.");
            } else {
                print_search_results(tracker.store().search_results(), format)?;
                println!("Use 'select <n> ...' to add results.");
            }
        }
        Command::Results => {
            let results = tracker.store().search_results();
            if results.is_empty() {
                println!("No pending results.");
            } else {
                print_search_results(results, format)?;
            }
        }
        Command::Select(indices) => {
            let pb = ProgressBar::new(indices.len() as u64);
            if let Ok(style) =
                ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            {
                pb.set_style(style);
            }
            pb.set_message("fetching bills");
            let result = tracker
                .add_selected_with_progress(&indices, |done, total| {
                    pb.set_length(total as u64);
                    pb.set_position(done as u64);
                })
                .await;
            pb.finish_and_clear();
            println!("Added {} bill(s).", result?);
        }
        Command::Year(value) => {
            *year = value.map(validation::validate_year).transpose()?;
            match *year {
                Some(y) if y != ALL_YEARS => println!("Year set to {}.", y),
                _ => println!("Searching all years."),
            }
        }
        Command::Dashboard => println!("{}", render_dashboard(tracker.store())),
        Command::Explorer => {
            if tracker.store().is_empty() {
                println!("{}", crate::dashboard::EMPTY_MESSAGE);
            } else {
                print_summaries(&tracker.store().summary_views(), format)?;
            }
        }
        Command::Reset => {
            tracker.reset();
            println!("All data reset.");
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
    Ok(())
}
