//! Output names for bundled assets.
//!
//! A namer looks at one bundle and either names it or declines, leaving the
//! decision to the next namer in the chain.

use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use crate::AssetError;

/// One asset to be written out: its type and the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    /// Lowercased file extension, e.g. `png`.
    pub bundle_type: String,
    pub main_entry: PathBuf,
}

impl Bundle {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let main_entry = path.into();
        let bundle_type = main_entry
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        Self {
            bundle_type,
            main_entry,
        }
    }
}

pub trait Namer {
    /// `None` means "not mine".
    fn name(&self, bundle: &Bundle) -> Option<String>;
}

/// Images keep their original file name.
pub fn name_bundle(bundle: &Bundle) -> Option<String> {
    match bundle.bundle_type.as_str() {
        "png" | "jpg" => bundle
            .main_entry
            .file_name()
            .map(|n| n.to_string_lossy().into_owned()),
        _ => None,
    }
}

/// [`name_bundle`] as a chain member.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageNamer;

impl Namer for ImageNamer {
    fn name(&self, bundle: &Bundle) -> Option<String> {
        name_bundle(bundle)
    }
}

/// Fallback: `{stem}.{hash8}.{ext}`, hashing the entry path.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashedNamer;

impl Namer for HashedNamer {
    fn name(&self, bundle: &Bundle) -> Option<String> {
        let stem = bundle.main_entry.file_stem()?.to_string_lossy();
        let digest = Sha256::digest(bundle.main_entry.to_string_lossy().as_bytes());
        let hash: String = digest[..4].iter().map(|b| format!("{b:02x}")).collect();
        Some(if bundle.bundle_type.is_empty() {
            format!("{stem}.{hash}")
        } else {
            format!("{stem}.{hash}.{}", bundle.bundle_type)
        })
    }
}

/// Namers tried in order; the first `Some` wins.
pub struct NamerChain {
    namers: Vec<Box<dyn Namer>>,
}

impl Default for NamerChain {
    fn default() -> Self {
        Self::new()
            .with(Box::new(ImageNamer))
            .with(Box::new(HashedNamer))
    }
}

impl NamerChain {
    /// An empty chain. Names nothing.
    pub fn new() -> Self {
        Self { namers: Vec::new() }
    }

    pub fn with(mut self, namer: Box<dyn Namer>) -> Self {
        self.namers.push(namer);
        self
    }

    pub fn len(&self) -> usize {
        self.namers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namers.is_empty()
    }

    pub fn name(&self, bundle: &Bundle) -> Option<String> {
        self.namers.iter().find_map(|n| n.name(bundle))
    }

    pub fn name_path(&self, path: &Path) -> Result<String, AssetError> {
        self.name(&Bundle::from_path(path))
            .ok_or_else(|| AssetError::Unnamed(path.to_path_buf()))
    }
}
