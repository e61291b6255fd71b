//! Dataset-wide validation: one outcome per entry, gathered into a report.

use crate::assets::ImageProbe;
use crate::dataset::DatasetLayout;
use crate::rules::{validate_manifest, EntryContext, Rule, Verdict, Violation};
use crate::CoreError;
use groove_schema::{parse_manifest_file, EntryId, ManifestError, MANIFEST_FILE_NAME};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// Broad class of an entry failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Manifest missing, unparsable, or of the wrong shape.
    Structural,
    /// A field is missing, mistyped, or violates a value constraint.
    Field,
    /// A referenced image is missing, oversized, undecodable, or wrongly sized.
    Asset,
    /// The filesystem failed underneath an otherwise readable entry.
    Io,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Structural => write!(f, "structural"),
            FailureKind::Field => write!(f, "field"),
            FailureKind::Asset => write!(f, "asset"),
            FailureKind::Io => write!(f, "io"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryFailure {
    pub kind: FailureKind,
    /// Rule that failed; `None` when the manifest never reached the rules.
    pub rule: Option<Rule>,
    pub message: String,
}

impl EntryFailure {
    pub fn missing_manifest() -> Self {
        Self {
            kind: FailureKind::Structural,
            rule: None,
            message: format!("missing {MANIFEST_FILE_NAME}"),
        }
    }

    pub fn is_missing_manifest(&self) -> bool {
        *self == Self::missing_manifest()
    }
}

impl From<Violation> for EntryFailure {
    fn from(v: Violation) -> Self {
        Self {
            kind: v.rule.kind(),
            rule: Some(v.rule),
            message: v.message,
        }
    }
}

impl From<ManifestError> for EntryFailure {
    fn from(err: ManifestError) -> Self {
        let message = err.to_string();
        let (kind, rule) = match err {
            ManifestError::MissingFields(_) => (FailureKind::Field, Some(Rule::RequiredFields)),
            ManifestError::NonStringText(_) => (FailureKind::Field, Some(Rule::TextFields)),
            ManifestError::Io(_) => (FailureKind::Io, None),
            ManifestError::ParseJson(_)
            | ManifestError::NotAnObject
            | ManifestError::FieldType(_) => (FailureKind::Structural, None),
        };
        Self {
            kind,
            rule,
            message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryOutcome {
    Valid,
    Invalid(EntryFailure),
}

impl EntryOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, EntryOutcome::Valid)
    }

    pub fn failure(&self) -> Option<&EntryFailure> {
        match self {
            EntryOutcome::Valid => None,
            EntryOutcome::Invalid(f) => Some(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryReport {
    pub id: EntryId,
    #[serde(flatten)]
    pub outcome: EntryOutcome,
}

/// Accumulated outcomes of one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub entries: Vec<EntryReport>,
}

impl CheckReport {
    pub fn record(&mut self, id: EntryId, outcome: EntryOutcome) {
        self.entries.push(EntryReport { id, outcome });
    }

    /// True when every entry is valid. An empty dataset passes.
    pub fn passed(&self) -> bool {
        self.entries.iter().all(|e| e.outcome.is_valid())
    }

    pub fn failures(&self) -> impl Iterator<Item = &EntryReport> {
        self.entries.iter().filter(|e| !e.outcome.is_valid())
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    pub fn get(&self, id: &str) -> Option<&EntryReport> {
        self.entries.iter().find(|e| e.id == id)
    }
}

/// Validate a single entry. Every failure is folded into the outcome.
pub fn check_entry(layout: &DatasetLayout, id: &EntryId, probe: &dyn ImageProbe) -> EntryOutcome {
    let manifest_path = layout.manifest_path(id);
    if !manifest_path.exists() {
        return EntryOutcome::Invalid(EntryFailure::missing_manifest());
    }

    let manifest = match parse_manifest_file(&manifest_path).and_then(|doc| doc.decode()) {
        Ok(m) => m,
        Err(e) => return EntryOutcome::Invalid(e.into()),
    };

    let entry_dir = layout.entry_dir(id);
    let ctx = EntryContext {
        folder: id.as_str(),
        entry_dir: &entry_dir,
        probe,
    };
    match validate_manifest(&manifest, &ctx) {
        Verdict::Valid => EntryOutcome::Valid,
        Verdict::Invalid(v) => EntryOutcome::Invalid(v.into()),
    }
}

/// Validate every entry of the dataset.
///
/// Only a failure to list the dataset root is returned as an error; entry
/// failures are recorded in the report and never stop the run.
pub fn check_dataset(
    layout: &DatasetLayout,
    probe: &dyn ImageProbe,
) -> Result<CheckReport, CoreError> {
    let entries = layout.list_entries()?;
    info!(
        "checking {} entries in {}",
        entries.len(),
        layout.root().display()
    );

    let mut report = CheckReport::default();
    for id in entries {
        let outcome = check_entry(layout, &id, probe);
        debug!("{id}: {}", if outcome.is_valid() { "valid" } else { "invalid" });
        report.record(id, outcome);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{Dimensions, ProbeError};
    use std::fs;
    use std::path::Path;

    struct AlwaysValid;

    impl ImageProbe for AlwaysValid {
        fn dimensions(&self, path: &Path) -> Result<Dimensions, ProbeError> {
            if path.to_string_lossy().contains("feature") {
                Ok(Dimensions::new(1024, 500))
            } else {
                Ok(Dimensions::new(512, 512))
            }
        }
    }

    fn manifest_json(id: &str) -> String {
        serde_json::json!({
            "name": "example",
            "id": id,
            "displayName": "Example",
            "description": "Short",
            "fullDescription": "Long",
            "author": "Jane",
            "type": "pwa",
            "entry": "https://example.com",
            "versions": { "1": { "version": "1", "date": "2024-01-01", "changelog": "-", "url": "https://example.com" } },
            "icon": "icon.png",
            "featureGraphic": "feature.png",
            "category": "Games"
        })
        .to_string()
    }

    fn add_entry(root: &Path, folder: &str, manifest: Option<&str>) {
        let dir = root.join(folder);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("icon.png"), b"icon").unwrap();
        fs::write(dir.join("feature.png"), b"feature").unwrap();
        if let Some(m) = manifest {
            fs::write(dir.join(MANIFEST_FILE_NAME), m).unwrap();
        }
    }

    #[test]
    fn missing_manifest_is_structural() {
        let root = tempfile::tempdir().unwrap();
        add_entry(root.path(), "com.example.app", None);
        let layout = DatasetLayout::new(root.path());

        let outcome = check_entry(&layout, &EntryId::new("com.example.app"), &AlwaysValid);
        let failure = outcome.failure().unwrap();
        assert_eq!(failure.kind, FailureKind::Structural);
        assert_eq!(failure.rule, None);
        assert_eq!(failure.message, "missing manifest.json");
        assert!(failure.is_missing_manifest());
    }

    #[test]
    fn malformed_json_is_structural() {
        let root = tempfile::tempdir().unwrap();
        add_entry(root.path(), "com.example.app", Some("{ not json"));
        let layout = DatasetLayout::new(root.path());

        let outcome = check_entry(&layout, &EntryId::new("com.example.app"), &AlwaysValid);
        let failure = outcome.failure().unwrap();
        assert_eq!(failure.kind, FailureKind::Structural);
        assert!(failure.message.starts_with("failed to parse manifest"));
        assert!(!failure.is_missing_manifest());
    }

    #[test]
    fn missing_field_reports_required_fields_rule() {
        let root = tempfile::tempdir().unwrap();
        let without_entry = manifest_json("com.example.app").replace("\"entry\"", "\"_entry\"");
        add_entry(root.path(), "com.example.app", Some(&without_entry));
        let layout = DatasetLayout::new(root.path());

        let outcome = check_entry(&layout, &EntryId::new("com.example.app"), &AlwaysValid);
        let failure = outcome.failure().unwrap();
        assert_eq!(failure.rule, Some(Rule::RequiredFields));
        assert_eq!(failure.kind, FailureKind::Field);
        assert!(failure.message.contains("entry"));
    }

    #[test]
    fn one_failure_does_not_stop_the_run() {
        let root = tempfile::tempdir().unwrap();
        add_entry(root.path(), "a.valid", Some(&manifest_json("a.valid")));
        add_entry(root.path(), "b.missing", None);
        add_entry(root.path(), "c.mismatch", Some(&manifest_json("c.other")));
        add_entry(root.path(), "d.valid", Some(&manifest_json("d.valid")));
        let layout = DatasetLayout::new(root.path());

        let report = check_dataset(&layout, &AlwaysValid).unwrap();
        assert_eq!(report.entries.len(), 4);
        assert!(!report.passed());
        assert_eq!(report.failed_count(), 2);
        assert!(report.get("a.valid").unwrap().outcome.is_valid());
        assert!(report.get("d.valid").unwrap().outcome.is_valid());
        assert_eq!(
            report.get("c.mismatch").unwrap().outcome.failure().unwrap().rule,
            Some(Rule::Id)
        );
    }

    #[test]
    fn empty_dataset_passes() {
        let root = tempfile::tempdir().unwrap();
        let report = check_dataset(&DatasetLayout::new(root.path()), &AlwaysValid).unwrap();
        assert!(report.passed());
        assert!(report.entries.is_empty());
    }

    #[test]
    fn report_serializes_flat_entries() {
        let mut report = CheckReport::default();
        report.record(EntryId::new("ok.app"), EntryOutcome::Valid);
        report.record(
            EntryId::new("bad.app"),
            EntryOutcome::Invalid(EntryFailure::missing_manifest()),
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["entries"][0]["id"], "ok.app");
        assert_eq!(json["entries"][0]["status"], "valid");
        assert_eq!(json["entries"][1]["status"], "invalid");
        assert_eq!(json["entries"][1]["kind"], "structural");
        assert_eq!(json["entries"][1]["message"], "missing manifest.json");
    }
}
