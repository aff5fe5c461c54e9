//! Asset handling: slide manifests, decoded images, bundle naming.
//!
//! Slides reference images by path in a manifest. Images are decoded once
//! and identified by a content hash, so two slides showing the same file
//! share one decode. The renderer consumes decoded pixels, never paths.

mod bundle;
mod images;
mod manifest;
mod namer;

pub use bundle::{BundleReport, BundledAsset, bundle_manifest};
pub use images::{DecodedImage, ImageId, ImageStore};
pub use manifest::{ImageRef, Manifest, ManifestFormat, SlideDescriptor};
pub use namer::{Bundle, HashedNamer, ImageNamer, Namer, NamerChain, name_bundle};

use std::path::PathBuf;

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),
    #[error("manifest has no slides")]
    NoSlides,
    #[error("slide {index} has no image source")]
    MissingSource { index: usize },
    #[error("unsupported manifest format: {0}")]
    UnsupportedManifest(PathBuf),
    #[error("no namer produced a name for {0}")]
    Unnamed(PathBuf),
    #[error("two different assets would both be named {name}")]
    NameCollision { name: String },
    #[error("bundle output {0} is the manifest's own directory")]
    OutputIsSource(PathBuf),
}

pub fn crate_info() -> &'static str {
    "carousel-assets v0.1.0"
}
