//! Bill detail types returned by `getBill`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Full bill record from the `getBill` operation.
///
/// Nested blocks (session, sponsors) are frequently missing or null on
/// older bills, so they default to empty instead of failing the parse.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BillDetail {
    pub bill_id: Option<i64>,
    /// Two-letter jurisdiction abbreviation.
    pub state: Option<String>,
    pub bill_number: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub last_action: Option<String>,
    /// ISO `YYYY-MM-DD`.
    pub last_action_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub session: Option<Session>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sponsors: Vec<Sponsor>,
    /// `1` once the bill has completed its legislative path, `0` otherwise.
    #[serde(default, deserialize_with = "completion_flag")]
    pub completed: Option<i64>,
}

/// Legislative session a bill belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub session_id: Option<i64>,
    pub session_name: Option<String>,
    pub year_start: Option<i32>,
    pub year_end: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Sponsor {
    pub people_id: Option<i64>,
    pub name: Option<String>,
    /// Party code: `D`, `R`, `I`, ...
    pub party: Option<String>,
    pub role: Option<String>,
}

impl Sponsor {
    pub fn party_code(&self) -> Option<&str> {
        self.party.as_deref()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// The flag is documented as 0/1 but shows up as a bool or a string too.
fn completion_flag<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::Bool(b)) => Some(i64::from(b)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
