use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Certificate verdict as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertStatus {
    Secure,
    Warning,
    Expired,
}

impl fmt::Display for CertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Secure => "secure",
            Self::Warning => "warning",
            Self::Expired => "expired",
        };
        f.write_str(s)
    }
}

/// One scan as returned by `POST /api/scan` and `GET /api/history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRecord {
    /// Stored records carry a numeric id, fresh ones a timestamp string.
    #[serde(default, deserialize_with = "id_as_string")]
    pub id: String,
    pub domain: String,
    pub status: CertStatus,
    #[serde(default)]
    pub issuer: String,
    #[serde(default)]
    pub expiry_date: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub timestamp: String,
}

impl ScanRecord {
    /// Case-insensitive substring match against the domain or the issuer.
    ///
    /// An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.domain.to_lowercase().contains(&query) || self.issuer.to_lowercase().contains(&query)
    }
}

/// Keeps the records that [`ScanRecord::matches`] `query`, in their original order.
pub fn filter<'a>(records: &'a [ScanRecord], query: &str) -> Vec<&'a ScanRecord> {
    records.iter().filter(|record| record.matches(query)).collect()
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number id, got {other}"
        ))),
    }
}
