use crate::error::BillTrackerError;
use crate::jurisdiction::{self, Jurisdiction, JURISDICTIONS};

pub const MAX_KEYWORD_LENGTH: usize = 100;
pub const MAX_BILL_LENGTH: usize = 60;
pub const MAX_RESULTS_LIMIT: usize = 2000;

/// Keyword-search filter value meaning "every jurisdiction".
pub const ALL_JURISDICTIONS: &str = "All";

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, BillTrackerError> {
    if input.len() > max_len {
        return Err(BillTrackerError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(BillTrackerError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a jurisdiction given as a full name or two-letter abbreviation.
pub fn validate_jurisdiction(input: &str) -> Result<&'static Jurisdiction, BillTrackerError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(BillTrackerError::InvalidInput(
            "please specify a jurisdiction".to_string(),
        ));
    }
    if let Some(found) = jurisdiction::lookup(trimmed) {
        return Ok(found);
    }

    let hint = suggest_jurisdiction(trimmed)
        .map(|j| format!(" Did you mean '{}' ({})?", j.name, j.abbreviation))
        .unwrap_or_default();
    Err(BillTrackerError::InvalidInput(format!(
        "unknown jurisdiction '{}'. Use a full name (e.g. 'New Hampshire') or abbreviation (e.g. NH).{}",
        trimmed, hint
    )))
}

/// Validate the keyword-search filter: empty or `All` means no restriction.
pub fn validate_jurisdiction_filter(
    input: Option<&str>,
) -> Result<Option<&'static Jurisdiction>, BillTrackerError> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) if s.eq_ignore_ascii_case(ALL_JURISDICTIONS) => Ok(None),
        Some(s) => validate_jurisdiction(s).map(Some),
    }
}

/// Closest jurisdiction name by Jaro-Winkler similarity, if close enough.
fn suggest_jurisdiction(input: &str) -> Option<&'static Jurisdiction> {
    let lower = input.to_lowercase();
    JURISDICTIONS
        .iter()
        .map(|j| (j, strsim::jaro_winkler(&lower, &j.name.to_lowercase())))
        .filter(|(_, score)| *score >= 0.85)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(j, _)| j)
}

/// Validate raw bill text entered by the user.
pub fn validate_bill_text(input: &str) -> Result<String, BillTrackerError> {
    if input.trim().is_empty() {
        return Err(BillTrackerError::InvalidInput(
            "please specify a bill number".to_string(),
        ));
    }
    sanitize_text(input, MAX_BILL_LENGTH)
}

pub fn validate_keyword(input: &str) -> Result<String, BillTrackerError> {
    if input.trim().is_empty() {
        return Err(BillTrackerError::InvalidInput(
            "enter a keyword to search".to_string(),
        ));
    }
    sanitize_text(input, MAX_KEYWORD_LENGTH)
}

/// Validate the search year filter (`1` = all years, `2`-`4` relative, or a calendar year).
pub fn validate_year(year: i32) -> Result<i32, BillTrackerError> {
    if (1..=4).contains(&year) || (1900..=2100).contains(&year) {
        Ok(year)
    } else {
        Err(BillTrackerError::InvalidInput(format!(
            "year must be 1 (all), 2 (current), 3 (recent), 4 (prior) or a calendar year, got {}",
            year
        )))
    }
}

pub fn validate_max_results(max: usize) -> Result<usize, BillTrackerError> {
    if !(1..=MAX_RESULTS_LIMIT).contains(&max) {
        return Err(BillTrackerError::InvalidInput(format!(
            "max results must be between 1 and {}",
            MAX_RESULTS_LIMIT
        )));
    }
    Ok(max)
}
