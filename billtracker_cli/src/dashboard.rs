//! Text rendering of the session dashboard: KPI counters, a Gantt-style
//! timeline and a waffle chart of sponsor parties.

use std::fmt::Write;

use billtracker_lib::session::COMPLETED_LABEL;
use billtracker_lib::{Kpis, PartyTotals, SessionStore, TimelineRow};

pub const EMPTY_MESSAGE: &str = "No bills yet. Add a bill or search by keyword to get started.";
pub const NO_SPONSOR_DATA: &str = "No sponsor data for the tracked bills.";

const TIMELINE_WIDTH: i64 = 48;
const WAFFLE_ROWS: u64 = 10;

const COMPLETED_BAR: char = '█';
const PENDING_BAR: char = '░';
const DEMOCRAT_CELL: char = 'D';
const REPUBLICAN_CELL: char = 'R';
const EMPTY_CELL: char = '·';

pub fn render_dashboard(store: &SessionStore) -> String {
    if store.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }
    format!(
        "{}\n\nTimeline\n{}\n\nParty distribution of sponsors\n{}",
        render_kpis(&store.kpis()),
        render_timeline(&store.timeline()),
        render_party_waffle(&store.party_totals())
    )
}

pub fn render_kpis(kpis: &Kpis) -> String {
    format!(
        "Total bills: {}   Completed: {}   Not completed: {}",
        kpis.total, kpis.completed, kpis.not_completed
    )
}

/// One bar per row, scaled between the earliest start and the latest end.
pub fn render_timeline(rows: &[TimelineRow]) -> String {
    let Some(first) = rows.iter().map(|r| r.start_date.min(r.end_date)).min() else {
        return "No bills with both a session year and a last action date.".to_string();
    };
    let last = rows
        .iter()
        .map(|r| r.start_date.max(r.end_date))
        .max()
        .unwrap_or(first);
    let span = (last - first).num_days().max(1);
    let label_width = rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);

    let column = |date: chrono::NaiveDate| (date - first).num_days() * (TIMELINE_WIDTH - 1) / span;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:label_width$}  {}{:>pad$}",
        "",
        first.to_string(),
        last.to_string(),
        pad = (TIMELINE_WIDTH as usize).saturating_sub(10)
    );
    for row in rows {
        let (from, to) = if row.start_date <= row.end_date {
            (column(row.start_date), column(row.end_date))
        } else {
            (column(row.end_date), column(row.start_date))
        };
        let bar = if row.completion_label == COMPLETED_LABEL {
            COMPLETED_BAR
        } else {
            PENDING_BAR
        };
        let line: String = (0..TIMELINE_WIDTH)
            .map(|i| if i >= from && i <= to { bar } else { ' ' })
            .collect();
        let _ = writeln!(
            out,
            "{:<label_width$} |{}| {} to {}",
            row.label, line, row.start_date, row.end_date
        );
    }
    let _ = write!(
        out,
        "{} Completed   {} Not Completed",
        COMPLETED_BAR, PENDING_BAR
    );
    out
}

/// Ten rows, one cell per sponsor, filled column by column.
pub fn render_party_waffle(totals: &PartyTotals) -> String {
    let total = totals.total();
    if total == 0 {
        return NO_SPONSOR_DATA.to_string();
    }
    let columns = total.div_ceil(WAFFLE_ROWS);

    let mut out = String::new();
    for row in 0..WAFFLE_ROWS {
        let line: String = (0..columns)
            .map(|col| {
                let cell = col * WAFFLE_ROWS + row;
                if cell < totals.democrats {
                    DEMOCRAT_CELL
                } else if cell < total {
                    REPUBLICAN_CELL
                } else {
                    EMPTY_CELL
                }
            })
            .collect();
        let _ = writeln!(out, "{}", line);
    }
    let _ = write!(
        out,
        "{} Democrats ({})   {} Republicans ({})",
        DEMOCRAT_CELL, totals.democrats, REPUBLICAN_CELL, totals.republicans
    );
    out
}
