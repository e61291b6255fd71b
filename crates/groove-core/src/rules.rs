//! The ordered rule chain applied to a decoded manifest.
//!
//! Required-field presence and text field types are enforced while decoding
//! (see [`ManifestDocument::decode`](groove_schema::ManifestDocument::decode));
//! they keep their own [`Rule`] identifiers so a report names them like any
//! other rule. Everything after that runs here, in [`RULE_CHAIN`] order, and
//! evaluation stops at the first rule that fails.

use crate::assets::{AssetKind, Dimensions, ImageProbe};
use crate::check::FailureKind;
use groove_schema::{AppType, AssetPath, Author, Category, ManifestV1, Platform, ASSET_EXTENSIONS};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

pub const MAX_TAGS: usize = 10;
/// Tag length limit, in UTF-16 code units.
pub const MAX_TAG_LEN: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    RequiredFields,
    TextFields,
    Tags,
    AssetPaths,
    AssetExtensions,
    AssetsExist,
    AssetSizes,
    AssetDimensions,
    Category,
    Id,
    Author,
    Type,
    Platform,
    Versions,
}

/// Rules evaluated against a decoded manifest, in order.
pub const RULE_CHAIN: [Rule; 12] = [
    Rule::Tags,
    Rule::AssetPaths,
    Rule::AssetExtensions,
    Rule::AssetsExist,
    Rule::AssetSizes,
    Rule::AssetDimensions,
    Rule::Category,
    Rule::Id,
    Rule::Author,
    Rule::Type,
    Rule::Platform,
    Rule::Versions,
];

impl Rule {
    pub fn as_str(self) -> &'static str {
        match self {
            Rule::RequiredFields => "required_fields",
            Rule::TextFields => "text_fields",
            Rule::Tags => "tags",
            Rule::AssetPaths => "asset_paths",
            Rule::AssetExtensions => "asset_extensions",
            Rule::AssetsExist => "assets_exist",
            Rule::AssetSizes => "asset_sizes",
            Rule::AssetDimensions => "asset_dimensions",
            Rule::Category => "category",
            Rule::Id => "id",
            Rule::Author => "author",
            Rule::Type => "type",
            Rule::Platform => "platform",
            Rule::Versions => "versions",
        }
    }

    pub fn kind(self) -> FailureKind {
        match self {
            Rule::AssetsExist | Rule::AssetSizes | Rule::AssetDimensions => FailureKind::Asset,
            _ => FailureKind::Field,
        }
    }

    fn check(self, manifest: &ManifestV1, ctx: &EntryContext<'_>) -> Result<(), String> {
        match self {
            // Enforced by the decode step; a decoded manifest always passes.
            Rule::RequiredFields | Rule::TextFields => Ok(()),
            Rule::Tags => check_tags(manifest.tags.as_deref()),
            Rule::AssetPaths => check_asset_paths(manifest),
            Rule::AssetExtensions => check_asset_extensions(manifest),
            Rule::AssetsExist => check_assets_exist(manifest, ctx),
            Rule::AssetSizes => check_asset_sizes(manifest, ctx),
            Rule::AssetDimensions => check_asset_dimensions(manifest, ctx),
            Rule::Category => check_category(manifest),
            Rule::Id => check_id(manifest, ctx),
            Rule::Author => check_author(&manifest.author),
            Rule::Type => check_type(manifest),
            Rule::Platform => check_platform(manifest),
            Rule::Versions => check_versions(manifest),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The first rule a manifest broke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub rule: Rule,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid(Violation),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }
}

/// Where a manifest lives, which is all the rules need beyond the manifest.
pub struct EntryContext<'a> {
    /// Folder name of the entry; the manifest `id` must equal it.
    pub folder: &'a str,
    /// Directory asset paths are resolved against.
    pub entry_dir: &'a Path,
    pub probe: &'a dyn ImageProbe,
}

/// Run [`RULE_CHAIN`] and report the first failing rule.
pub fn validate_manifest(manifest: &ManifestV1, ctx: &EntryContext<'_>) -> Verdict {
    for rule in RULE_CHAIN {
        if let Err(message) = rule.check(manifest, ctx) {
            debug!("{}: rule {rule} failed: {message}", ctx.folder);
            return Verdict::Invalid(Violation { rule, message });
        }
    }
    Verdict::Valid
}

fn asset(manifest: &ManifestV1, kind: AssetKind) -> &AssetPath {
    match kind {
        AssetKind::Icon => &manifest.icon,
        AssetKind::FeatureGraphic => &manifest.feature_graphic,
    }
}

fn check_tags(tags: Option<&[String]>) -> Result<(), String> {
    let Some(tags) = tags else {
        return Ok(());
    };
    if tags.len() > MAX_TAGS {
        return Err(format!(
            "maximum {MAX_TAGS} tags allowed, found {}",
            tags.len()
        ));
    }
    if let Some(tag) = tags.iter().find(|t| t.encode_utf16().count() > MAX_TAG_LEN) {
        return Err(format!(
            "tags must be strings with maximum length of {MAX_TAG_LEN} characters: '{tag}'"
        ));
    }
    Ok(())
}

fn check_asset_paths(manifest: &ManifestV1) -> Result<(), String> {
    for kind in AssetKind::ALL {
        let path = asset(manifest, kind);
        if path.has_parent_traversal() {
            return Err(format!(
                "{} path cannot use \"..\" and must be relative to the manifest location: '{path}'",
                kind.field()
            ));
        }
    }
    Ok(())
}

fn check_asset_extensions(manifest: &ManifestV1) -> Result<(), String> {
    for kind in AssetKind::ALL {
        let path = asset(manifest, kind);
        if !path.has_accepted_extension() {
            return Err(format!(
                "{} must be one of {} files: '{path}'",
                kind.label(),
                ASSET_EXTENSIONS.join(", ")
            ));
        }
    }
    Ok(())
}

fn check_assets_exist(manifest: &ManifestV1, ctx: &EntryContext<'_>) -> Result<(), String> {
    for kind in AssetKind::ALL {
        let resolved = asset(manifest, kind).resolve(ctx.entry_dir);
        if !resolved.exists() {
            return Err(format!(
                "{} file not found: {}",
                kind.label(),
                resolved.display()
            ));
        }
    }
    Ok(())
}

fn check_asset_sizes(manifest: &ManifestV1, ctx: &EntryContext<'_>) -> Result<(), String> {
    for kind in AssetKind::ALL {
        let resolved = asset(manifest, kind).resolve(ctx.entry_dir);
        let size = fs::metadata(&resolved)
            .map_err(|e| format!("cannot stat {} {}: {e}", kind.label(), resolved.display()))?
            .len();
        if size > kind.max_bytes() {
            return Err(format!(
                "{} file size must not exceed {} MiB, found {size} bytes",
                kind.label(),
                kind.max_bytes() / (1024 * 1024)
            ));
        }
    }
    Ok(())
}

fn check_asset_dimensions(manifest: &ManifestV1, ctx: &EntryContext<'_>) -> Result<(), String> {
    // Both images are probed before either is compared, so an undecodable
    // feature graphic is reported ahead of a wrongly sized icon.
    let mut probed: Vec<(AssetKind, Dimensions)> = Vec::with_capacity(AssetKind::ALL.len());
    for kind in AssetKind::ALL {
        let resolved = asset(manifest, kind).resolve(ctx.entry_dir);
        let dims = ctx
            .probe
            .dimensions(&resolved)
            .map_err(|e| format!("cannot read {} dimensions: {e}", kind.label()))?;
        probed.push((kind, dims));
    }
    for (kind, dims) in probed {
        let required = kind.required_dimensions();
        if dims != required {
            return Err(format!(
                "{} must be {required} pixels, found {dims}",
                kind.label()
            ));
        }
    }
    Ok(())
}

fn check_category(manifest: &ManifestV1) -> Result<(), String> {
    if manifest.app_type == AppType::Style.as_str() {
        if manifest.category != Category::Theming.as_str() {
            return Err(format!(
                "style entries must have category set to {}, found '{}'",
                Category::Theming,
                manifest.category
            ));
        }
        return Ok(());
    }
    manifest
        .category
        .parse::<Category>()
        .map(|_| ())
        .map_err(|e| e.to_string())
}

fn check_id(manifest: &ManifestV1, ctx: &EntryContext<'_>) -> Result<(), String> {
    if manifest.id != ctx.folder {
        return Err(format!(
            "manifest id \"{}\" does not match folder name \"{}\"",
            manifest.id, ctx.folder
        ));
    }
    Ok(())
}

fn check_author(author: &Author) -> Result<(), String> {
    match author {
        Author::Name(_) => Ok(()),
        Author::Profile(profile) if profile.is_complete() => Ok(()),
        Author::Profile(_) | Author::Malformed(_) => {
            Err("invalid author object: must have display and link properties".to_owned())
        }
    }
}

fn check_type(manifest: &ManifestV1) -> Result<(), String> {
    manifest
        .app_type
        .parse::<AppType>()
        .map(|_| ())
        .map_err(|e| e.to_string())
}

fn check_platform(manifest: &ManifestV1) -> Result<(), String> {
    if manifest.app_type != AppType::NativeApp.as_str() {
        return Ok(());
    }
    let Some(platform) = manifest.platform.as_deref().filter(|p| !p.is_empty()) else {
        return Err("platform is required for nativeapp type".to_owned());
    };
    platform
        .parse::<Platform>()
        .map(|_| ())
        .map_err(|e| e.to_string())
}

fn check_versions(manifest: &ManifestV1) -> Result<(), String> {
    for (code, details) in &manifest.versions {
        let missing = details.missing_fields();
        if !missing.is_empty() {
            return Err(format!(
                "invalid version details for version code {code}: missing {}",
                missing.join(", ")
            ));
        }
    }
    Ok(())
}
