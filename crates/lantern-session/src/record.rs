//! Session record: the persisted data entity.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::flash::FlashBuffer;
use crate::id::generate_session_id;

/// Key-value payload of a session.
///
/// Serializes as a single JSON object: the reserved `old`/`new` flash
/// generations plus application keys at the top level. Records persisted
/// without the reserved keys normalize to empty generations on
/// deserialization, so downstream code never has to null-check them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(flatten)]
    pub(crate) flash: FlashBuffer,

    /// Application keys stored at the top level of the payload.
    #[serde(flatten)]
    pub(crate) values: Map<String, Value>,
}

impl SessionData {
    /// Look up a value: flash generations first, then application keys.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.flash.read(key).or_else(|| self.values.get(key))
    }

    /// Store an application value at the top level.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// Remove an application value. Flash entries are unaffected.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Whether `key` resolves through [`get`](Self::get).
    pub fn contains(&self, key: &str) -> bool {
        self.flash.contains(key) || self.values.contains_key(key)
    }

    /// Mutable top-level slot for `key`, inserting `Null` when absent.
    pub(crate) fn entry(&mut self, key: &str) -> &mut Value {
        self.values.entry(key.to_string()).or_insert(Value::Null)
    }

    /// The flash generations.
    pub fn flash(&self) -> &FlashBuffer {
        &self.flash
    }

    /// Whether the payload holds no values in any namespace.
    pub fn is_empty(&self) -> bool {
        self.flash.is_empty() && self.values.is_empty()
    }
}

/// A session record as stored by a persistence backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Unique 40-character identifier presented by the client as its token.
    pub id: String,

    /// Unix timestamp of the last request that used this record.
    ///
    /// Absent on a record that has never been persisted — its absence is
    /// what tells a locally built fresh record apart from an old one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_activity: Option<i64>,

    /// Key-value payload, flash generations included.
    #[serde(default)]
    pub data: SessionData,
}

impl SessionRecord {
    /// Build a blank record with a newly generated identifier.
    ///
    /// The record carries empty flash generations, no application values,
    /// and no activity timestamp.
    pub fn fresh() -> Self {
        Self {
            id: generate_session_id(),
            last_activity: None,
            data: SessionData::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SESSION_ID_LEN;
    use serde_json::json;

    #[test]
    fn test_fresh_record_invariants() {
        let record = SessionRecord::fresh();

        assert_eq!(record.id.len(), SESSION_ID_LEN);
        assert!(record.last_activity.is_none());
        assert!(record.data.flash.old.is_empty());
        assert!(record.data.flash.new.is_empty());
        assert!(record.data.values.is_empty());
    }

    #[test]
    fn test_serialized_layout() {
        let mut record = SessionRecord::fresh();
        record.data.insert("theme", json!("dark"));
        record.data.flash.flash("status", json!("saved"));

        let raw = serde_json::to_value(&record).unwrap();

        // Fresh records serialize without an activity timestamp at all.
        assert!(raw.get("last_activity").is_none());
        assert_eq!(raw["data"]["theme"], json!("dark"));
        assert_eq!(raw["data"]["new"]["status"], json!("saved"));
        assert_eq!(raw["data"]["old"], json!({}));
    }

    #[test]
    fn test_last_activity_serializes_when_set() {
        let mut record = SessionRecord::fresh();
        record.last_activity = Some(1_700_000_000);

        let raw = serde_json::to_value(&record).unwrap();
        assert_eq!(raw["last_activity"], json!(1_700_000_000));
    }

    #[test]
    fn test_missing_generations_normalize_to_empty() {
        let record: SessionRecord =
            serde_json::from_value(json!({ "id": "abc", "data": { "theme": "dark" } })).unwrap();

        assert!(record.data.flash.old.is_empty());
        assert!(record.data.flash.new.is_empty());
        assert_eq!(record.data.get("theme"), Some(&json!("dark")));
    }

    #[test]
    fn test_round_trip_preserves_all_namespaces() {
        let mut record = SessionRecord::fresh();
        record.last_activity = Some(1_700_000_000);
        record.data.insert("count", json!(3));
        record.data.flash.flash("notice", json!("ok"));
        record.data.flash.old.insert("prior".into(), json!(true));

        let raw = serde_json::to_string(&record).unwrap();
        let reloaded: SessionRecord = serde_json::from_str(&raw).unwrap();

        assert_eq!(reloaded, record);
    }
}
