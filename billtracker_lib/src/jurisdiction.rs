//! Jurisdictions the tracker can query and their bill-prefix substitution rules.
//!
//! The prefix rules come from an embedded YAML seed file, loaded with the same
//! compile-time `include_str!` pattern used for other seed data.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

/// A state, the District of Columbia, or the federal government.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jurisdiction {
    pub name: &'static str,
    pub abbreviation: &'static str,
}

const fn j(name: &'static str, abbreviation: &'static str) -> Jurisdiction {
    Jurisdiction { name, abbreviation }
}

pub const JURISDICTIONS: &[Jurisdiction] = &[
    j("Alabama", "AL"),
    j("Alaska", "AK"),
    j("Arizona", "AZ"),
    j("Arkansas", "AR"),
    j("California", "CA"),
    j("Colorado", "CO"),
    j("Connecticut", "CT"),
    j("Delaware", "DE"),
    j("Florida", "FL"),
    j("Georgia", "GA"),
    j("Hawaii", "HI"),
    j("Idaho", "ID"),
    j("Illinois", "IL"),
    j("Indiana", "IN"),
    j("Iowa", "IA"),
    j("Kansas", "KS"),
    j("Kentucky", "KY"),
    j("Louisiana", "LA"),
    j("Maine", "ME"),
    j("Maryland", "MD"),
    j("Massachusetts", "MA"),
    j("Michigan", "MI"),
    j("Minnesota", "MN"),
    j("Mississippi", "MS"),
    j("Missouri", "MO"),
    j("Montana", "MT"),
    j("Nebraska", "NE"),
    j("Nevada", "NV"),
    j("New Hampshire", "NH"),
    j("New Jersey", "NJ"),
    j("New Mexico", "NM"),
    j("New York", "NY"),
    j("North Carolina", "NC"),
    j("North Dakota", "ND"),
    j("Ohio", "OH"),
    j("Oklahoma", "OK"),
    j("Oregon", "OR"),
    j("Pennsylvania", "PA"),
    j("Rhode Island", "RI"),
    j("South Carolina", "SC"),
    j("South Dakota", "SD"),
    j("Tennessee", "TN"),
    j("Texas", "TX"),
    j("Utah", "UT"),
    j("Vermont", "VT"),
    j("Virginia", "VA"),
    j("Washington", "WA"),
    j("West Virginia", "WV"),
    j("Wisconsin", "WI"),
    j("Wyoming", "WY"),
    j("District of Columbia", "DC"),
    j("United States", "US"),
];

/// Case-insensitive lookup by full name.
pub fn by_name(name: &str) -> Option<&'static Jurisdiction> {
    let name = name.trim();
    JURISDICTIONS
        .iter()
        .find(|j| j.name.eq_ignore_ascii_case(name))
}

/// Case-insensitive lookup by two-letter abbreviation.
pub fn by_abbreviation(abbreviation: &str) -> Option<&'static Jurisdiction> {
    let abbreviation = abbreviation.trim();
    JURISDICTIONS
        .iter()
        .find(|j| j.abbreviation.eq_ignore_ascii_case(abbreviation))
}

/// Accepts either a full name or an abbreviation.
pub fn lookup(input: &str) -> Option<&'static Jurisdiction> {
    by_abbreviation(input).or_else(|| by_name(input))
}

#[derive(Error, Debug)]
pub enum PrefixTableError {
    #[error("Failed to parse prefix table YAML: {0}")]
    YamlParse(#[from] serde_yml::Error),
    #[error("Unknown jurisdiction in prefix table: {0}")]
    UnknownJurisdiction(String),
    #[error("Duplicate jurisdiction in prefix table: {0}")]
    DuplicateJurisdiction(String),
    #[error("Empty prefix in rules for {0}")]
    EmptyPrefix(String),
}

/// Replace a leading `from` with `to`, e.g. `HB` -> `HF` in Iowa.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PrefixRule {
    pub from: String,
    pub to: String,
}

impl PrefixRule {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

#[derive(Deserialize, Debug)]
struct PrefixTableFile {
    jurisdictions: Vec<JurisdictionRules>,
}

#[derive(Deserialize, Debug)]
struct JurisdictionRules {
    name: String,
    rules: Vec<PrefixRule>,
}

/// Ordered rules keyed by jurisdiction full name.
pub type PrefixTable = HashMap<String, Vec<PrefixRule>>;

/// Parse and validate a prefix table from YAML content.
///
/// Names must be known jurisdictions; they are stored under their canonical
/// spelling. Prefixes are upper-cased since they are matched against
/// upper-cased bill text.
pub fn parse_prefix_table(yaml_content: &str) -> Result<PrefixTable, PrefixTableError> {
    let file: PrefixTableFile = serde_yml::from_str(yaml_content)?;

    let mut table = PrefixTable::new();
    for entry in file.jurisdictions {
        let jurisdiction = by_name(&entry.name)
            .ok_or_else(|| PrefixTableError::UnknownJurisdiction(entry.name.clone()))?;
        if table.contains_key(jurisdiction.name) {
            return Err(PrefixTableError::DuplicateJurisdiction(entry.name));
        }

        let mut rules = Vec::with_capacity(entry.rules.len());
        for rule in entry.rules {
            let from = rule.from.trim().to_uppercase();
            if from.is_empty() {
                return Err(PrefixTableError::EmptyPrefix(entry.name));
            }
            rules.push(PrefixRule {
                from,
                to: rule.to.trim().to_uppercase(),
            });
        }
        table.insert(jurisdiction.name.to_string(), rules);
    }

    Ok(table)
}

/// Load the prefix table from the embedded seed file.
pub fn load_prefix_table() -> Result<PrefixTable, PrefixTableError> {
    let yaml_content = include_str!("../../seed_data/prefix_substitutions.yml");
    parse_prefix_table(yaml_content)
}
