//! Dataset checking and index building for the Groove store.
//!
//! This crate ties the schema layer to the filesystem: `DatasetLayout` names
//! the entries of a dataset root, the rule chain (`validate_manifest`) checks
//! one decoded manifest against its folder and assets, `check_dataset` runs
//! every entry through it and accumulates a `CheckReport`, and `build_index`
//! / `write_index` produce the published `store.json`.

pub mod assets;
pub mod check;
pub mod config;
pub mod dataset;
pub mod index;
pub mod rules;

pub use assets::{AssetKind, Dimensions, HeaderProbe, ImageProbe, ProbeError};
pub use check::{
    check_dataset, check_entry, CheckReport, EntryFailure, EntryOutcome, EntryReport, FailureKind,
};
pub use config::{ConfigError, StoreConfig, StoreSection, CONFIG_FILE_NAME};
pub use dataset::DatasetLayout;
pub use index::{build_index, write_index};
pub use rules::{validate_manifest, EntryContext, Rule, Verdict, Violation, RULE_CHAIN};

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fsync a directory so that a preceding `rename()` into it is durable.
pub(crate) fn fsync_dir(dir: &Path) -> Result<(), std::io::Error> {
    let f = std::fs::File::open(dir)?;
    f.sync_all()
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("cannot read dataset directory {}: {source}", .path.display())]
    DatasetUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write index {}: {source}", .path.display())]
    IndexWrite {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
