//! Fragella API response types.
//!
//! The API is loosely typed. Observed variations:
//!
//! - note and accord lists hold either plain strings (`"Rose"`) or objects
//!   (`{"name": "Rose", "type": "top"}`, `{"name": "woody", "percentage": 80}`);
//! - the gender flags `male` / `female` / `unisex` arrive as booleans, `0`/`1`,
//!   or strings;
//! - `id` is usually an integer but has been seen as a numeric string;
//! - any field may be absent or `null`;
//! - scalar text fields occasionally arrive as numbers.
//!
//! Every field is optional and any JSON object decodes, so normalization is
//! total.

use serde::{Deserialize, Deserializer};

/// A note or accord entry: a bare name or an object carrying `name`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NamedEntry {
    Name(String),
    Object {
        #[serde(default)]
        name: Option<String>,
    },
    /// Anything else (numbers, nested arrays). Carries no name.
    Other(serde_json::Value),
}

impl NamedEntry {
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            NamedEntry::Name(name) => Some(name.as_str()),
            NamedEntry::Object { name } => name.as_deref(),
            NamedEntry::Other(_) => None,
        }
    }
}

/// A boolean-ish gender flag.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl Flag {
    /// `true`, any non-zero number, or `"true"` / `"yes"` / `"1"`
    /// (case-insensitive).
    #[must_use]
    pub fn is_set(&self) -> bool {
        match self {
            Flag::Bool(b) => *b,
            Flag::Number(n) => *n != 0.0,
            Flag::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "true" | "yes" | "1"
            ),
            Flag::Other(_) => false,
        }
    }
}

/// Upstream record id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ExternalId {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl ExternalId {
    /// Numeric value of the id. Zero and non-numeric ids count as absent.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        let value = match self {
            ExternalId::Number(n) => Some(*n),
            ExternalId::Text(s) => s.trim().parse::<i64>().ok(),
            ExternalId::Other(_) => None,
        };
        value.filter(|n| *n != 0)
    }
}

/// A single fragrance record as returned by search or detail endpoints.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawFragrance {
    #[serde(default)]
    pub id: Option<ExternalId>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub image_url: Option<String>,

    #[serde(default)]
    pub male: Option<Flag>,
    #[serde(default)]
    pub female: Option<Flag>,
    #[serde(default)]
    pub unisex: Option<Flag>,

    #[serde(default, deserialize_with = "list_or_empty")]
    pub top_notes: Vec<NamedEntry>,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub middle_notes: Vec<NamedEntry>,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub base_notes: Vec<NamedEntry>,
    /// Generic note list without a pyramid tier.
    #[serde(default, deserialize_with = "list_or_empty")]
    pub notes: Vec<NamedEntry>,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub accords: Vec<NamedEntry>,
}

impl RawFragrance {
    pub(crate) fn flag(flag: Option<&Flag>) -> bool {
        flag.is_some_and(Flag::is_set)
    }
}

/// Non-string values (numbers, objects) read as absent rather than failing
/// the whole record.
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

/// `null`, a non-array, or a missing field reads as an empty list.
fn list_or_empty<'de, D>(deserializer: D) -> Result<Vec<NamedEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}
