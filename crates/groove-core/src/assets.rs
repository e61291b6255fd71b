//! Presentation assets: per-kind limits and pixel-dimension probing.

use image::{ImageError, ImageReader};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ICON_MAX_BYTES: u64 = 1024 * 1024;
pub const FEATURE_GRAPHIC_MAX_BYTES: u64 = 15 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// The two images every entry must ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Icon,
    FeatureGraphic,
}

impl AssetKind {
    pub const ALL: [AssetKind; 2] = [AssetKind::Icon, AssetKind::FeatureGraphic];

    /// Manifest field holding the asset path.
    pub fn field(self) -> &'static str {
        match self {
            AssetKind::Icon => "icon",
            AssetKind::FeatureGraphic => "featureGraphic",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AssetKind::Icon => "icon",
            AssetKind::FeatureGraphic => "feature graphic",
        }
    }

    pub fn max_bytes(self) -> u64 {
        match self {
            AssetKind::Icon => ICON_MAX_BYTES,
            AssetKind::FeatureGraphic => FEATURE_GRAPHIC_MAX_BYTES,
        }
    }

    pub fn required_dimensions(self) -> Dimensions {
        match self {
            AssetKind::Icon => Dimensions::new(512, 512),
            AssetKind::FeatureGraphic => Dimensions::new(1024, 500),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot decode image header of {}: {source}", .path.display())]
    Decode { path: PathBuf, source: ImageError },
}

/// Reads the pixel dimensions of an image file.
pub trait ImageProbe {
    fn dimensions(&self, path: &Path) -> Result<Dimensions, ProbeError>;
}

/// Probe that sniffs the format from the file's content and decodes only
/// the header.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderProbe;

impl ImageProbe for HeaderProbe {
    fn dimensions(&self, path: &Path) -> Result<Dimensions, ProbeError> {
        let open_err = |source| ProbeError::Open {
            path: path.to_path_buf(),
            source,
        };
        let reader = ImageReader::open(path)
            .map_err(open_err)?
            .with_guessed_format()
            .map_err(open_err)?;
        let (width, height) = reader.into_dimensions().map_err(|source| ProbeError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Dimensions::new(width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_per_kind() {
        assert_eq!(AssetKind::Icon.max_bytes(), 1_048_576);
        assert_eq!(AssetKind::FeatureGraphic.max_bytes(), 15_728_640);
        assert_eq!(AssetKind::Icon.required_dimensions(), Dimensions::new(512, 512));
        assert_eq!(
            AssetKind::FeatureGraphic.required_dimensions(),
            Dimensions::new(1024, 500)
        );
    }

    #[test]
    fn dimensions_display() {
        assert_eq!(Dimensions::new(1024, 500).to_string(), "1024x500");
    }

    #[test]
    fn header_probe_reads_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.png");
        image::RgbaImage::new(32, 16).save(&path).unwrap();

        let dims = HeaderProbe.dimensions(&path).unwrap();
        assert_eq!(dims, Dimensions::new(32, 16));
    }

    #[test]
    fn header_probe_ignores_misleading_extension() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("real.png");
        image::RgbImage::new(8, 4).save(&png).unwrap();
        let disguised = dir.path().join("icon.webp");
        std::fs::rename(&png, &disguised).unwrap();

        assert_eq!(
            HeaderProbe.dimensions(&disguised).unwrap(),
            Dimensions::new(8, 4)
        );
    }

    #[test]
    fn header_probe_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let err = HeaderProbe.dimensions(&path).unwrap_err();
        assert!(matches!(err, ProbeError::Decode { .. }));
    }

    #[test]
    fn header_probe_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = HeaderProbe
            .dimensions(&dir.path().join("absent.png"))
            .unwrap_err();
        assert!(matches!(err, ProbeError::Open { .. }));
    }
}
