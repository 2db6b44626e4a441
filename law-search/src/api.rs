//! Typed response shapes for the list and detail endpoints.
//!
//! The Open API speaks JSON with Korean field names. Every field the crate
//! reads is optional here; missing pieces are handled by the resolver and
//! fetcher rather than failing deserialization.

use serde::{Deserialize, Deserializer};

/// Top-level list endpoint response: `{"PrecSearch": {...}}`.
#[derive(Debug, Default, Deserialize)]
pub struct ListResponse {
    /// Result container; absent when the service reports an error page.
    #[serde(rename = "PrecSearch", default)]
    pub prec_search: Option<PrecSearch>,
}

/// Result container of the list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PrecSearch {
    /// Matches; an object for exactly one hit, an array otherwise.
    ///
    /// Entries stay raw so one malformed entry cannot reject the rest;
    /// [`PrecSummary::from_entry`] reads each one.
    #[serde(rename = "prec", default)]
    pub prec: Option<OneOrMany<serde_json::Value>>,
}

/// One match from the list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PrecSummary {
    /// Precedent serial number (`판례일련번호`).
    #[serde(rename = "판례일련번호", default, deserialize_with = "lenient_string")]
    pub serial_no: Option<String>,
}

impl PrecSummary {
    /// Read one list entry. Anything other than a JSON object is `None`.
    pub fn from_entry(entry: serde_json::Value) -> Option<Self> {
        if !entry.is_object() {
            return None;
        }
        serde_json::from_value(entry).ok()
    }
}

/// A JSON value that is either a single item or an array of items.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// Several items.
    Many(Vec<T>),
    /// Exactly one item, serialized without the array wrapper.
    One(T),
}

impl<T> OneOrMany<T> {
    /// Flatten into a uniform vector.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

/// Top-level detail endpoint response: `{"PrecService": {...}}`.
#[derive(Debug, Default, Deserialize)]
pub struct DetailResponse {
    /// The precedent body; absent or [blank](is_blank) when the identifier
    /// is unknown. Read with [`DetailResponse::service`].
    #[serde(rename = "PrecService", default)]
    pub prec_service: Option<serde_json::Value>,
}

impl DetailResponse {
    /// The detail fields, or `Ok(None)` when the service object is missing
    /// or blank.
    ///
    /// # Errors
    ///
    /// Returns a message when the service value is present but is not a
    /// JSON object, or its fields cannot be read.
    pub fn service(self) -> Result<Option<PrecService>, String> {
        let Some(raw) = self.prec_service.filter(|raw| !is_blank(raw)) else {
            return Ok(None);
        };
        if !raw.is_object() {
            return Err(format!("PrecService is not an object: {raw}"));
        }
        serde_json::from_value(raw).map(Some).map_err(|e| e.to_string())
    }
}

/// Precedent detail fields used to build a record.
#[derive(Debug, Default, Deserialize)]
pub struct PrecService {
    /// Case number (`사건번호`).
    #[serde(rename = "사건번호", default, deserialize_with = "lenient_string")]
    pub case_number: Option<String>,
    /// Case name (`사건명`).
    #[serde(rename = "사건명", default, deserialize_with = "lenient_string")]
    pub case_name: Option<String>,
    /// Holding summary (`판결요지`).
    #[serde(rename = "판결요지", default, deserialize_with = "lenient_string")]
    pub holding: Option<String>,
    /// Issues summary (`판시사항`).
    #[serde(rename = "판시사항", default, deserialize_with = "lenient_string")]
    pub issues: Option<String>,
    /// Full decision text (`판결내용`).
    #[serde(rename = "판결내용", default, deserialize_with = "lenient_string")]
    pub full_text: Option<String>,
}

impl PrecService {
    /// The first non-empty body field in priority order: holding summary,
    /// issues summary, full decision text.
    pub fn body(&self) -> Option<&str> {
        [&self.holding, &self.issues, &self.full_text]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|text| !text.is_empty())
    }
}

/// Whether a JSON value is empty in the sense of "nothing here": `null`,
/// `false`, zero, or an empty string, array or object.
pub fn is_blank(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Accept a string, number or bool and keep it as text; `null` and
/// containers become `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}
