//! Canonicalisation of user-typed bill identifiers into the token format the
//! search API expects (`<PREFIX> <NUMBER><SUFFIX>`, e.g. `HB 7`, `SF 12A`).

use std::collections::HashMap;

use regex::Regex;
use thiserror::Error;

use crate::jurisdiction::{load_prefix_table, PrefixRule, PrefixTable, PrefixTableError};

/// Letter run, optional spaces, leading zeros, digits plus optional letter suffix.
const TOKEN_PATTERN: &str = r"([A-Z]+)\s*0*([0-9]+[A-Z]*)";

#[derive(Error, Debug)]
pub enum NormalizerError {
    #[error(transparent)]
    PrefixTable(#[from] PrefixTableError),
    #[error("Invalid bill token pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Turns free-form bill text into a canonical bill token.
///
/// Normalisation is pure and idempotent for every rule set where no
/// replacement prefix is itself a wrong prefix.
#[derive(Debug, Clone)]
pub struct BillNormalizer {
    /// Rules keyed by lower-cased jurisdiction name.
    prefixes: HashMap<String, Vec<PrefixRule>>,
    token: Regex,
}

impl BillNormalizer {
    /// Normalizer using the embedded prefix table.
    pub fn new() -> Result<Self, NormalizerError> {
        Self::with_prefix_rules(load_prefix_table()?)
    }

    /// Normalizer using an explicit prefix table.
    pub fn with_prefix_rules(table: PrefixTable) -> Result<Self, NormalizerError> {
        let prefixes = table
            .into_iter()
            .map(|(name, rules)| (name.trim().to_lowercase(), rules))
            .collect();
        Ok(Self {
            prefixes,
            token: Regex::new(TOKEN_PATTERN)?,
        })
    }

    /// Canonical token for `raw` in the given jurisdiction (full name).
    ///
    /// Empty input yields an empty string.
    pub fn normalize(&self, raw: &str, jurisdiction: &str) -> String {
        let mut bill = clean_text(raw);

        if let Some(rules) = self.prefixes.get(&jurisdiction.trim().to_lowercase()) {
            // First matching rule wins; later rules never see its output.
            if let Some(rule) = rules.iter().find(|r| bill.starts_with(r.from.as_str())) {
                bill = bill.replacen(rule.from.as_str(), rule.to.as_str(), 1);
            }
        }

        self.token
            .replace_all(&bill, "${1} ${2}")
            .trim()
            .to_string()
    }

    /// Like [`normalize`](Self::normalize), but first strips a leading copy of
    /// the jurisdiction label, e.g. `"Texas (TX) HB7"` -> `"HB 7"`.
    pub fn clean_and_normalize(&self, raw: &str, jurisdiction: &str) -> String {
        let stripped = strip_jurisdiction_label(raw.trim(), jurisdiction.trim());
        self.normalize(stripped, jurisdiction)
    }
}

/// Trim, upper-case, drop `.`, `(` and `)`, collapse whitespace runs.
fn clean_text(raw: &str) -> String {
    raw.trim()
        .to_uppercase()
        .chars()
        .filter(|c| !matches!(c, '.' | '(' | ')'))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove a case-insensitive leading `name`, then an optional `(XX)`
/// two-letter abbreviation, plus the whitespace around both.
fn strip_jurisdiction_label<'a>(input: &'a str, name: &str) -> &'a str {
    let rest = match input.get(..name.len()) {
        Some(head) if head.eq_ignore_ascii_case(name) => &input[name.len()..],
        _ => return input,
    };
    let rest = rest.trim_start();

    let bytes = rest.as_bytes();
    let has_abbreviation = bytes.len() >= 4
        && bytes[0] == b'('
        && bytes[1].is_ascii_alphabetic()
        && bytes[2].is_ascii_alphabetic()
        && bytes[3] == b')';
    if has_abbreviation {
        rest[4..].trim_start()
    } else {
        rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> BillNormalizer {
        BillNormalizer::new().unwrap()
    }

    #[test]
    fn strips_leading_zeros() {
        assert_eq!(normalizer().normalize("HB007", "Texas"), "HB 7");
    }

    #[test]
    fn keeps_letter_suffix() {
        assert_eq!(normalizer().normalize("SF 0012A", "Iowa"), "SF 12A");
    }

    #[test]
    fn all_zero_number_keeps_one_digit() {
        assert_eq!(normalizer().normalize("HB000", "Texas"), "HB 0");
    }

    #[test]
    fn cleans_punctuation_case_and_spacing() {
        let n = normalizer();
        assert_eq!(n.normalize("  h.b.   (12) ", "Texas"), "HB 12");
        assert_eq!(n.normalize("s.j.r. 3", "Texas"), "SJR 3");
    }

    #[test]
    fn empty_input_is_empty() {
        let n = normalizer();
        assert_eq!(n.normalize("", "Texas"), "");
        assert_eq!(n.normalize("   ", "Texas"), "");
        assert_eq!(n.clean_and_normalize("", "Texas"), "");
    }

    #[test]
    fn text_without_number_is_only_cleaned() {
        assert_eq!(normalizer().normalize("resolution", "Texas"), "RESOLUTION");
    }

    #[test]
    fn applies_embedded_prefix_rules() {
        let n = normalizer();
        assert_eq!(n.normalize("HB 12", "Iowa"), "HF 12");
        assert_eq!(n.normalize("sb45", "Nebraska"), "LB 45");
        assert_eq!(n.normalize("HB100", "New Jersey"), "A 100");
        assert_eq!(n.normalize("HB 5", "Texas"), "HB 5");
    }

    #[test]
    fn custom_prefix_table() {
        let mut table = PrefixTable::new();
        table.insert("Testland".to_string(), vec![PrefixRule::new("HB", "LB")]);
        let n = BillNormalizer::with_prefix_rules(table).unwrap();
        assert_eq!(n.normalize("HB45", "Testland"), "LB 45");
    }

    #[test]
    fn first_matching_rule_wins() {
        let mut table = PrefixTable::new();
        table.insert(
            "Testland".to_string(),
            vec![PrefixRule::new("HB", "SB"), PrefixRule::new("SB", "X")],
        );
        let n = BillNormalizer::with_prefix_rules(table).unwrap();
        assert_eq!(n.normalize("HB1", "Testland"), "SB 1");
    }

    #[test]
    fn prefix_only_replaced_at_start() {
        let mut table = PrefixTable::new();
        table.insert("Testland".to_string(), vec![PrefixRule::new("HB", "LB")]);
        let n = BillNormalizer::with_prefix_rules(table).unwrap();
        assert_eq!(n.normalize("SJR HB 2", "Testland"), "SJR HB 2");
    }

    #[test]
    fn normalization_is_idempotent() {
        let n = normalizer();
        let inputs = [
            "HB007", "hb 7", "SF 0012A", "H.B. 12", "(SB) 3", "LB45", "sjr0001", "", "HR 1234",
            "HB 7 and HB 8",
        ];
        for jurisdiction in ["Texas", "Iowa", "Nebraska", "New Jersey", "Maine", "Massachusetts"] {
            for raw in inputs {
                let once = n.normalize(raw, jurisdiction);
                assert_eq!(n.normalize(&once, jurisdiction), once, "{raw} in {jurisdiction}");
            }
        }
    }

    #[test]
    fn strips_jurisdiction_label() {
        let n = normalizer();
        assert_eq!(n.clean_and_normalize("Texas (TX) HB7", "Texas"), "HB 7");
        assert_eq!(n.clean_and_normalize("texas hb 0007", "Texas"), "HB 7");
        assert_eq!(n.clean_and_normalize("Iowa(ia)HB 3", "Iowa"), "HF 3");
        assert_eq!(n.clean_and_normalize("HB7", "Texas"), "HB 7");
    }

    #[test]
    fn label_for_other_jurisdiction_is_left_alone() {
        assert_eq!(
            normalizer().clean_and_normalize("Ohio HB7", "Texas"),
            "OHIO HB 7"
        );
    }
}
