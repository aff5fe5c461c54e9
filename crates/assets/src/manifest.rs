use carousel_kernel::SliderConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::AssetError;

/// Where an image comes from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub src: String,
}

/// One slide, in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideDescriptor {
    #[serde(default)]
    pub image: Option<ImageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl SlideDescriptor {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            image: Some(ImageRef { src: src.into() }),
            alt: None,
        }
    }

    /// The image source, if present and non-empty.
    pub fn src(&self) -> Option<&str> {
        self.image
            .as_ref()
            .map(|i| i.src.trim())
            .filter(|s| !s.is_empty())
    }
}

/// Slides plus slider options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub slides: Vec<SlideDescriptor>,
    #[serde(default)]
    pub options: SliderConfig,
}

/// Manifest syntax, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Json,
    Yaml,
}

impl ManifestFormat {
    pub fn from_path(path: &Path) -> Result<Self, AssetError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(AssetError::UnsupportedManifest(path.to_path_buf())),
        }
    }
}

impl Manifest {
    pub fn parse(text: &str, format: ManifestFormat) -> Result<Self, AssetError> {
        let manifest: Self = match format {
            ManifestFormat::Json => serde_json::from_str(text)?,
            ManifestFormat::Yaml => serde_yaml::from_str(text)?,
        };
        manifest.validate()?;
        Ok(manifest)
    }

    /// Load and validate a manifest file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let format = ManifestFormat::from_path(path)?;
        let text = std::fs::read_to_string(path)?;
        let manifest = Self::parse(&text, format)?;
        tracing::info!(
            path = %path.display(),
            slides = manifest.slides.len(),
            "manifest loaded"
        );
        Ok(manifest)
    }

    /// Save the manifest in the format its extension names.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        let path = path.as_ref();
        let format = ManifestFormat::from_path(path)?;
        let file = std::fs::File::create(path)?;
        match format {
            ManifestFormat::Json => serde_json::to_writer_pretty(file, self)?,
            ManifestFormat::Yaml => serde_yaml::to_writer(file, self)?,
        }
        Ok(())
    }

    /// Every slide needs an image source.
    pub fn validate(&self) -> Result<(), AssetError> {
        if self.slides.is_empty() {
            return Err(AssetError::NoSlides);
        }
        for (index, slide) in self.slides.iter().enumerate() {
            if slide.src().is_none() {
                return Err(AssetError::MissingSource { index });
            }
        }
        Ok(())
    }

    /// Image paths in slide order. Relative sources resolve against `base`,
    /// normally the manifest's directory.
    pub fn image_paths(&self, base: &Path) -> Result<Vec<PathBuf>, AssetError> {
        self.slides
            .iter()
            .enumerate()
            .map(|(index, slide)| {
                let src = slide.src().ok_or(AssetError::MissingSource { index })?;
                let src = Path::new(src);
                Ok(if src.is_absolute() {
                    src.to_path_buf()
                } else {
                    base.join(src)
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carousel_kernel::{Sizing, WrapTrigger};

    #[test]
    fn parse_json_with_defaults() {
        let m = Manifest::parse(
            r#"{ "slides": [ { "image": { "src": "a.jpg" } }, { "image": { "src": "b.png" } } ] }"#,
            ManifestFormat::Json,
        )
        .unwrap();
        assert_eq!(m.slides.len(), 2);
        assert_eq!(m.slides[1].src(), Some("b.png"));
        assert_eq!(m.options, SliderConfig::default());
    }

    #[test]
    fn parse_yaml_with_options() {
        let text = "
slides:
  - image: { src: one.jpg }
    alt: first
options:
  ease: 0.08
  sizing: !scale_factor 0.5
  wrap: threshold
";
        let m = Manifest::parse(text, ManifestFormat::Yaml).unwrap();
        assert_eq!(m.slides[0].alt.as_deref(), Some("first"));
        assert_eq!(m.options.ease, 0.08);
        assert_eq!(m.options.sizing, Sizing::ScaleFactor(0.5));
        assert_eq!(m.options.wrap, WrapTrigger::Threshold);
    }

    #[test]
    fn missing_source_fails() {
        let err = Manifest::parse(
            r#"{ "slides": [ { "image": { "src": "a.jpg" } }, { "image": { "src": "  " } }, {} ] }"#,
            ManifestFormat::Json,
        )
        .unwrap_err();
        assert!(matches!(err, AssetError::MissingSource { index: 1 }));

        let err = Manifest::parse(r#"{ "slides": [ {} ] }"#, ManifestFormat::Json).unwrap_err();
        assert!(matches!(err, AssetError::MissingSource { index: 0 }));
    }

    #[test]
    fn empty_manifest_fails() {
        let err = Manifest::parse(r#"{ "slides": [] }"#, ManifestFormat::Json).unwrap_err();
        assert!(matches!(err, AssetError::NoSlides));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            ManifestFormat::from_path(Path::new("s.JSON")).unwrap(),
            ManifestFormat::Json
        );
        assert_eq!(
            ManifestFormat::from_path(Path::new("s.yml")).unwrap(),
            ManifestFormat::Yaml
        );
        assert!(ManifestFormat::from_path(Path::new("s.toml")).is_err());
    }

    #[test]
    fn relative_paths_resolve_against_base() {
        let m = Manifest {
            slides: vec![SlideDescriptor::new("img/a.jpg"), SlideDescriptor::new("/abs/b.png")],
            options: SliderConfig::default(),
        };
        let paths = m.image_paths(Path::new("/site")).unwrap();
        assert_eq!(paths[0], PathBuf::from("/site/img/a.jpg"));
        assert_eq!(paths[1], PathBuf::from("/abs/b.png"));
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slides.yaml");
        let m = Manifest {
            slides: vec![SlideDescriptor::new("a.jpg")],
            options: SliderConfig::default(),
        };
        m.save(&path).unwrap();
        assert_eq!(Manifest::load(&path).unwrap(), m);
    }

    #[test]
    fn save_with_unknown_extension_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slides.toml");
        let m = Manifest {
            slides: vec![SlideDescriptor::new("a.jpg")],
            options: SliderConfig::default(),
        };
        let err = m.save(&path).unwrap_err();
        assert!(matches!(err, AssetError::UnsupportedManifest(_)));
        assert!(!path.exists());
    }
}
