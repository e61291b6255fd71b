//! Newtype wrappers for string identifiers, providing compile-time type safety.
//!
//! All newtypes serialize/deserialize as plain strings so manifests and the
//! store index keep their plain JSON shape.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::path::{Component, Path, PathBuf};

macro_rules! string_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new instance from a string.
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Return the inner string as a slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume self and return the inner `String`.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;
            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<String> for $name {
            fn eq(&self, other: &String) -> bool {
                self.0 == *other
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }
    };
}

string_newtype!(
    /// Identifier of a dataset entry: the entry's folder name, and the `id`
    /// its manifest must carry.
    EntryId
);

string_newtype!(
    /// Asset reference from a manifest, relative to the manifest's directory.
    AssetPath
);

/// Extensions accepted for presentation assets, compared case-insensitively.
pub const ASSET_EXTENSIONS: [&str; 4] = ["webp", "png", "jpeg", "jpg"];

impl AssetPath {
    /// Whether the reference contains a `..` sequence anywhere.
    ///
    /// Matches on the raw text rather than on path components, so names such
    /// as `icon..png` are rejected as well.
    pub fn has_parent_traversal(&self) -> bool {
        self.0.contains("..")
    }

    /// Lowercased extension of the final path component, if any.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.0)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }

    pub fn has_accepted_extension(&self) -> bool {
        self.extension()
            .is_some_and(|ext| ASSET_EXTENSIONS.contains(&ext.as_str()))
    }

    /// Resolve against the directory holding the manifest.
    pub fn resolve(&self, base: &Path) -> PathBuf {
        let relative: PathBuf = Path::new(&self.0)
            .components()
            .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
            .collect();
        base.join(relative)
    }
}
