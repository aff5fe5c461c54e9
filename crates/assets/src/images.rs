use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;

use crate::AssetError;
use crate::manifest::Manifest;

/// Content id of an image file: the first 8 bytes of its SHA-256.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u64);

impl ImageId {
    pub fn of(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        Self(u64::from_be_bytes(head))
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// RGBA8 pixels ready for texture upload.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    pub fn decode(bytes: &[u8]) -> Result<Self, AssetError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }
}

/// Decoded images keyed by content. Loading the same bytes twice decodes once.
#[derive(Debug, Default)]
pub struct ImageStore {
    images: BTreeMap<ImageId, DecodedImage>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<ImageId, AssetError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let id = ImageId::of(&bytes);
        if self.images.contains_key(&id) {
            tracing::debug!(path = %path.display(), %id, "image already decoded");
            return Ok(id);
        }
        let image = DecodedImage::decode(&bytes)?;
        tracing::debug!(
            path = %path.display(),
            %id,
            width = image.width,
            height = image.height,
            "image decoded"
        );
        self.images.insert(id, image);
        Ok(id)
    }

    /// Load every slide's image, returning ids in slide order.
    pub fn load_manifest(
        &mut self,
        manifest: &Manifest,
        base: &Path,
    ) -> Result<Vec<ImageId>, AssetError> {
        let ids = manifest
            .image_paths(base)?
            .iter()
            .map(|path| self.load(path))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::info!(
            slides = ids.len(),
            unique = self.images.len(),
            "slide images loaded"
        );
        Ok(ids)
    }

    pub fn get(&self, id: ImageId) -> Option<&DecodedImage> {
        self.images.get(&id)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::SlideDescriptor;
    use carousel_kernel::SliderConfig;

    fn write_png(path: &Path, width: u32, height: u32, shade: u8) {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([shade, 0, 0, 255]));
        img.save(path).unwrap();
    }

    #[test]
    fn id_is_stable_and_content_based() {
        assert_eq!(ImageId::of(b"abc"), ImageId::of(b"abc"));
        assert_ne!(ImageId::of(b"abc"), ImageId::of(b"abd"));
        assert_eq!(ImageId::of(b"abc").to_string().len(), 16);
    }

    #[test]
    fn load_decodes_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        write_png(&path, 4, 6, 200);

        let mut store = ImageStore::new();
        let id = store.load(&path).unwrap();
        let img = store.get(id).unwrap();
        assert_eq!((img.width, img.height), (4, 6));
        assert_eq!(img.rgba.len(), 4 * 6 * 4);
        assert_eq!(&img.rgba[..4], &[200, 0, 0, 255]);
    }

    #[test]
    fn identical_files_share_one_decode() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("a.png"), 2, 2, 10);
        write_png(&dir.path().join("b.png"), 2, 2, 10);
        write_png(&dir.path().join("c.png"), 2, 2, 99);

        let manifest = Manifest {
            slides: vec![
                SlideDescriptor::new("a.png"),
                SlideDescriptor::new("b.png"),
                SlideDescriptor::new("c.png"),
            ],
            options: SliderConfig::default(),
        };
        let mut store = ImageStore::new();
        let ids = store.load_manifest(&manifest, dir.path()).unwrap();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids[0], ids[1]);
        assert_ne!(ids[0], ids[2]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ImageStore::new();
        let err = store.load(dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, AssetError::Io(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"not an image").unwrap();
        let err = ImageStore::new().load(&path).unwrap_err();
        assert!(matches!(err, AssetError::Image(_)));
    }
}
