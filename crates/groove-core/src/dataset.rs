use crate::CoreError;
use groove_schema::{EntryId, MANIFEST_FILE_NAME};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directory layout of a Groove dataset.
///
/// Every immediate subdirectory of the root is one entry, named by its
/// folder, holding `manifest.json` and the assets it references.
#[derive(Debug, Clone)]
pub struct DatasetLayout {
    root: PathBuf,
}

impl DatasetLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    pub fn entry_dir(&self, entry: &str) -> PathBuf {
        self.root.join(entry)
    }

    #[inline]
    pub fn manifest_path(&self, entry: &str) -> PathBuf {
        self.entry_dir(entry).join(MANIFEST_FILE_NAME)
    }

    /// Entry folder names in filesystem enumeration order.
    ///
    /// Plain files in the root are skipped. Symlinks count as entries when
    /// they point at a directory. Names that are not valid UTF-8 are skipped
    /// with a warning.
    pub fn list_entries(&self) -> Result<Vec<EntryId>, CoreError> {
        let read = fs::read_dir(&self.root).map_err(|source| CoreError::DatasetUnreadable {
            path: self.root.clone(),
            source,
        })?;

        let mut entries = Vec::new();
        for item in read {
            let item = item.map_err(|source| CoreError::DatasetUnreadable {
                path: self.root.clone(),
                source,
            })?;
            let path = item.path();
            if !fs::metadata(&path).is_ok_and(|m| m.is_dir()) {
                debug!("skipping non-directory {}", path.display());
                continue;
            }
            match item.file_name().into_string() {
                Ok(name) => entries.push(EntryId::new(name)),
                Err(raw) => warn!("skipping entry with non UTF-8 name: {raw:?}"),
            }
        }
        Ok(entries)
    }
}
