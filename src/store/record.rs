use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// A single nurse entry.
///
/// Every field is optional. Keys missing from the source document stay absent
/// and are skipped again on serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Record {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// login and lookup key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// plaintext password, compared as is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
}

/// Records in source order. Duplicates are kept.
pub type RecordCollection = Vec<Record>;

impl Record {
    /// Maps a decoded JSON object into a record. A key holding a value of the
    /// wrong type is treated as missing.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let text = |key: &str| object.get(key).and_then(Value::as_str).map(String::from);

        Self {
            id: object.get("id").and_then(Value::as_i64),
            name: text("name"),
            user: text("user"),
            pw: text("pw"),
            specialty: text("specialty"),
        }
    }
}
