//! Manifest parsing, vocabularies, and the store index document for Groove.
//!
//! This crate defines the schema layer: JSON manifest parsing
//! (`ManifestDocument`), the schema-checked decode into a typed manifest
//! (`ManifestV1`), the closed vocabularies a manifest draws from (`AppType`,
//! `Category`, `Platform`), and the `StoreIndex` document written by the
//! index builder.

pub mod index;
pub mod manifest;
pub mod types;
pub mod vocab;

pub use index::{StoreIndex, StoreInfo, DEFAULT_STORE_NAME};
pub use manifest::{
    is_present, parse_manifest_file, parse_manifest_str, Author, AuthorProfile,
    ManifestDocument, ManifestError, ManifestV1, VersionDetails, MANIFEST_FILE_NAME,
    REQUIRED_FIELDS, TEXT_FIELDS, VERSION_DETAIL_FIELDS,
};
pub use types::{AssetPath, EntryId, ASSET_EXTENSIONS};
pub use vocab::{AppType, Category, Platform, VocabularyError};
