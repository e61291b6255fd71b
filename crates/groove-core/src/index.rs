use crate::dataset::DatasetLayout;
use crate::{fsync_dir, CoreError};
use chrono::{DateTime, Utc};
use groove_schema::StoreIndex;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// List the dataset and wrap it in a [`StoreIndex`].
///
/// Entries are included whether or not their manifests are valid.
pub fn build_index(
    layout: &DatasetLayout,
    name: &str,
    generated_at: DateTime<Utc>,
) -> Result<StoreIndex, CoreError> {
    let db = layout.list_entries()?;
    info!("indexing {} entries from {}", db.len(), layout.root().display());
    Ok(StoreIndex::new(name, db, generated_at))
}

/// Replace `dest` with the serialized index in a single atomic write.
pub fn write_index(dest: &Path, index: &StoreIndex) -> Result<(), CoreError> {
    let json = index.to_json_pretty()?;
    let dir = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

    let write_err = |source| CoreError::IndexWrite {
        path: dest.to_path_buf(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(&dir).map_err(write_err)?;
    tmp.write_all(json.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(dest).map_err(|e| write_err(e.error))?;
    if let Err(e) = fsync_dir(&dir) {
        warn!("failed to fsync {}: {e}", dir.display());
    }

    info!("wrote store index to {}", dest.display());
    Ok(())
}
