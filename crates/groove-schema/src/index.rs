use crate::types::EntryId;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_STORE_NAME: &str = "Groove Web Store";

/// The `store.json` document published alongside the dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreIndex {
    pub store: StoreInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoreInfo {
    pub name: String,
    pub active: bool,
    /// Entry folder names, in the order the filesystem listed them.
    pub db: Vec<EntryId>,
    /// ISO-8601 UTC timestamp with millisecond precision.
    pub last_updated: String,
}

impl StoreIndex {
    pub fn new(name: impl Into<String>, db: Vec<EntryId>, generated_at: DateTime<Utc>) -> Self {
        Self {
            store: StoreInfo {
                name: name.into(),
                active: true,
                db,
                last_updated: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            },
        }
    }

    /// Two-space indented JSON, the on-disk form of the index.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn serializes_with_camel_case_timestamp() {
        let index = StoreIndex::new(
            DEFAULT_STORE_NAME,
            vec![EntryId::new("com.example.app")],
            fixed_time(),
        );
        let json: serde_json::Value =
            serde_json::from_str(&index.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["store"]["name"], "Groove Web Store");
        assert_eq!(json["store"]["active"], true);
        assert_eq!(json["store"]["db"][0], "com.example.app");
        assert_eq!(json["store"]["lastUpdated"], "2025-03-14T09:26:53.000Z");
    }

    #[test]
    fn pretty_output_uses_two_space_indent() {
        let index = StoreIndex::new("Test", Vec::new(), fixed_time());
        let out = index.to_json_pretty().unwrap();
        assert!(out.starts_with("{\n  \"store\": {\n    \"name\": \"Test\""));
    }

    #[test]
    fn keeps_db_order() {
        let db = vec![EntryId::new("zeta"), EntryId::new("alpha")];
        let index = StoreIndex::new("Test", db.clone(), fixed_time());
        assert_eq!(index.store.db, db);
    }
}
