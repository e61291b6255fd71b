use crate::types::{AssetPath, EntryId};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name every dataset entry keeps its manifest under.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Top-level fields that must be present (see [`is_present`]).
pub const REQUIRED_FIELDS: [&str; 12] = [
    "name",
    "displayName",
    "description",
    "fullDescription",
    "id",
    "author",
    "type",
    "entry",
    "versions",
    "icon",
    "featureGraphic",
    "category",
];

/// Description-like fields that must hold strings.
pub const TEXT_FIELDS: [&str; 4] = ["name", "displayName", "description", "fullDescription"];

/// Fields every version-detail record must carry.
pub const VERSION_DETAIL_FIELDS: [&str; 4] = ["version", "date", "changelog", "url"];

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse manifest: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error("manifest root must be a JSON object")]
    NotAnObject,
    #[error("missing required fields in manifest.json: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error(
        "name, displayName, description and fullDescription must be strings (offending: {})",
        .0.join(", ")
    )]
    NonStringText(Vec<&'static str>),
    #[error("manifest field has the wrong type: {0}")]
    FieldType(serde_json::Error),
}

/// Whether a manifest value counts as supplied.
///
/// `null`, `false`, `0` and `""` count as absent; arrays and objects are
/// always present, even when empty.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// A parsed but not yet schema-checked manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestDocument {
    fields: Map<String, Value>,
}

impl ManifestDocument {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Required fields that are absent, in [`REQUIRED_FIELDS`] order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|f| !is_present(self.fields.get(*f)))
            .collect()
    }

    /// Text fields holding something other than a string.
    pub fn non_string_text_fields(&self) -> Vec<&'static str> {
        TEXT_FIELDS
            .iter()
            .copied()
            .filter(|f| !matches!(self.fields.get(*f), Some(Value::String(_))))
            .collect()
    }

    /// Schema-checked decode into a typed manifest.
    ///
    /// Checks required-field presence first, then the text field types, then
    /// deserializes. Any other type mismatch surfaces as
    /// [`ManifestError::FieldType`].
    pub fn decode(&self) -> Result<ManifestV1, ManifestError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ManifestError::MissingFields(missing));
        }

        let non_string = self.non_string_text_fields();
        if !non_string.is_empty() {
            return Err(ManifestError::NonStringText(non_string));
        }

        serde_json::from_value(Value::Object(self.fields.clone()))
            .map_err(ManifestError::FieldType)
    }
}

/// A manifest whose field types have been checked.
///
/// Classification fields (`type`, `category`, `platform`) stay as raw strings:
/// membership in their vocabularies is a validation rule, not a decode step.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManifestV1 {
    pub name: String,
    pub id: EntryId,
    pub display_name: String,
    pub description: String,
    pub full_description: String,
    pub author: Author,
    #[serde(rename = "type")]
    pub app_type: String,
    pub entry: Value,
    pub versions: BTreeMap<String, VersionDetails>,
    pub icon: AssetPath,
    pub feature_graphic: AssetPath,
    pub category: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Manifest author: a bare name, or a profile object.
///
/// Any other JSON shape is kept as [`Author::Malformed`] so the author rule
/// can report it instead of the decode step.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Author {
    Name(String),
    Profile(AuthorProfile),
    Malformed(Value),
}

/// Profile fields are held raw; presence follows [`is_present`].
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct AuthorProfile {
    pub display: Option<Value>,
    pub link: Option<Value>,
}

impl AuthorProfile {
    pub fn is_complete(&self) -> bool {
        is_present(self.display.as_ref()) && is_present(self.link.as_ref())
    }
}

impl Author {
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Author::Name(name) => Some(name),
            Author::Profile(profile) => profile.display.as_ref().and_then(Value::as_str),
            Author::Malformed(_) => None,
        }
    }
}

impl From<Value> for Author {
    fn from(value: Value) -> Self {
        match value {
            Value::String(name) => Author::Name(name),
            Value::Object(mut fields) => Author::Profile(AuthorProfile {
                display: fields.remove("display"),
                link: fields.remove("link"),
            }),
            other => Author::Malformed(other),
        }
    }
}

impl<'de> Deserialize<'de> for Author {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Author::from)
    }
}

/// One record under `versions`.
///
/// Only a JSON object carries fields; any other value decodes with every
/// field absent.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct VersionDetails {
    pub version: Option<Value>,
    pub date: Option<Value>,
    pub changelog: Option<Value>,
    pub url: Option<Value>,
}

impl VersionDetails {
    /// Detail fields that are absent, in [`VERSION_DETAIL_FIELDS`] order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let values = [&self.version, &self.date, &self.changelog, &self.url];
        VERSION_DETAIL_FIELDS
            .iter()
            .zip(values)
            .filter(|(_, v)| !is_present(v.as_ref()))
            .map(|(name, _)| *name)
            .collect()
    }
}

impl From<Value> for VersionDetails {
    fn from(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return Self::default();
        };
        Self {
            version: fields.remove("version"),
            date: fields.remove("date"),
            changelog: fields.remove("changelog"),
            url: fields.remove("url"),
        }
    }
}

impl<'de> Deserialize<'de> for VersionDetails {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(VersionDetails::from)
    }
}

pub fn parse_manifest_str(input: &str) -> Result<ManifestDocument, ManifestError> {
    match serde_json::from_str(input)? {
        Value::Object(fields) => Ok(ManifestDocument { fields }),
        _ => Err(ManifestError::NotAnObject),
    }
}

pub fn parse_manifest_file(path: impl AsRef<Path>) -> Result<ManifestDocument, ManifestError> {
    let content = fs::read_to_string(path)?;
    parse_manifest_str(&content)
}
