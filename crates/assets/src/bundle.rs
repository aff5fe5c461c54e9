use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::AssetError;
use crate::manifest::{ImageRef, Manifest};
use crate::namer::NamerChain;

/// One copied file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundledAsset {
    pub source: PathBuf,
    pub name: String,
}

/// Result of [`bundle_manifest`].
#[derive(Debug, Clone)]
pub struct BundleReport {
    /// Distinct files copied, in first-use order.
    pub assets: Vec<BundledAsset>,
    /// The rewritten manifest inside the output directory.
    pub manifest_path: PathBuf,
}

/// Copy a manifest's images into `out_dir` under the names the chain picks,
/// then write the manifest there with every `src` pointing at the copies.
///
/// Slides sharing one source share one copy. Two distinct sources that
/// would get the same name fail with [`AssetError::NameCollision`] before
/// anything is written, and so does an `out_dir` that resolves to the
/// manifest's own directory ([`AssetError::OutputIsSource`]). A source that
/// already sits at its destination is left in place.
pub fn bundle_manifest(
    manifest_path: &Path,
    out_dir: &Path,
    namer: &NamerChain,
) -> Result<BundleReport, AssetError> {
    let mut manifest = Manifest::load(manifest_path)?;
    let base = match manifest_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if same_file(base, out_dir) {
        return Err(AssetError::OutputIsSource(out_dir.to_path_buf()));
    }
    let sources = manifest.image_paths(base)?;

    let mut assets: Vec<BundledAsset> = Vec::new();
    let mut by_name: BTreeMap<String, PathBuf> = BTreeMap::new();
    let mut names = Vec::with_capacity(sources.len());
    for source in &sources {
        let name = namer.name_path(source)?;
        match by_name.get(&name) {
            Some(existing) if existing != source => {
                return Err(AssetError::NameCollision { name });
            }
            Some(_) => {}
            None => {
                by_name.insert(name.clone(), source.clone());
                assets.push(BundledAsset {
                    source: source.clone(),
                    name: name.clone(),
                });
            }
        }
        names.push(name);
    }

    std::fs::create_dir_all(out_dir)?;
    for asset in &assets {
        let dest = out_dir.join(&asset.name);
        if same_file(&asset.source, &dest) {
            tracing::debug!(name = %asset.name, "asset already in place");
            continue;
        }
        std::fs::copy(&asset.source, &dest)?;
        tracing::debug!(source = %asset.source.display(), name = %asset.name, "asset copied");
    }

    for (slide, name) in manifest.slides.iter_mut().zip(names) {
        slide.image = Some(ImageRef { src: name });
    }
    let file_name = manifest_path
        .file_name()
        .ok_or_else(|| AssetError::UnsupportedManifest(manifest_path.to_path_buf()))?;
    let out_manifest = out_dir.join(file_name);
    manifest.save(&out_manifest)?;

    tracing::info!(
        assets = assets.len(),
        out = %out_dir.display(),
        "bundle written"
    );
    Ok(BundleReport {
        assets,
        manifest_path: out_manifest,
    })
}

/// Both paths exist and resolve to the same file or directory.
fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(manifest: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("img/alt")).unwrap();
        for f in ["img/a.png", "img/b.jpg", "img/c.webp", "img/alt/a.png"] {
            std::fs::write(dir.path().join(f), f.as_bytes()).unwrap();
        }
        std::fs::write(dir.path().join("slides.json"), manifest).unwrap();
        dir
    }

    #[test]
    fn copies_and_rewrites() {
        let dir = setup(
            r#"{ "slides": [
                { "image": { "src": "img/a.png" } },
                { "image": { "src": "img/b.jpg" } },
                { "image": { "src": "img/c.webp" } },
                { "image": { "src": "img/a.png" } }
            ] }"#,
        );
        let out = dir.path().join("dist");
        let report =
            bundle_manifest(&dir.path().join("slides.json"), &out, &NamerChain::default())
                .unwrap();

        assert_eq!(report.assets.len(), 3);
        assert_eq!(report.assets[0].name, "a.png");
        assert_eq!(report.assets[1].name, "b.jpg");
        assert!(report.assets[2].name.starts_with("c."));
        assert!(report.assets[2].name.ends_with(".webp"));
        assert_eq!(
            std::fs::read(out.join("a.png")).unwrap(),
            b"img/a.png".to_vec()
        );

        let rewritten = Manifest::load(&report.manifest_path).unwrap();
        assert_eq!(rewritten.slides[0].src(), Some("a.png"));
        assert_eq!(rewritten.slides[3].src(), Some("a.png"));
        assert_eq!(
            rewritten.slides[2].src(),
            Some(report.assets[2].name.as_str())
        );
        assert_eq!(rewritten.image_paths(&out).unwrap()[1], out.join("b.jpg"));
    }

    #[test]
    fn same_basename_collides() {
        let dir = setup(
            r#"{ "slides": [
                { "image": { "src": "img/a.png" } },
                { "image": { "src": "img/alt/a.png" } }
            ] }"#,
        );
        let out = dir.path().join("dist");
        let err = bundle_manifest(&dir.path().join("slides.json"), &out, &NamerChain::default())
            .unwrap_err();
        assert!(matches!(err, AssetError::NameCollision { ref name } if name == "a.png"));
        assert!(!out.exists());
    }

    #[test]
    fn missing_image_fails() {
        let dir = setup(r#"{ "slides": [ { "image": { "src": "img/none.png" } } ] }"#);
        let err = bundle_manifest(
            &dir.path().join("slides.json"),
            &dir.path().join("dist"),
            &NamerChain::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AssetError::Io(_)));
    }

    #[test]
    fn bundling_into_source_dir_is_rejected() {
        let manifest = r#"{ "slides": [ { "image": { "src": "a.png" } } ] }"#;
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.png"), b"PIXELS").unwrap();
        std::fs::write(dir.path().join("slides.json"), manifest).unwrap();

        let err = bundle_manifest(
            &dir.path().join("slides.json"),
            dir.path(),
            &NamerChain::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AssetError::OutputIsSource(_)));

        // Same directory spelled differently.
        let err = bundle_manifest(
            &dir.path().join("slides.json"),
            &dir.path().join("."),
            &NamerChain::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AssetError::OutputIsSource(_)));

        assert_eq!(std::fs::read(dir.path().join("a.png")).unwrap(), b"PIXELS");
        assert_eq!(
            std::fs::read_to_string(dir.path().join("slides.json")).unwrap(),
            manifest
        );
    }

    #[test]
    fn source_already_in_output_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let site = dir.path().join("site");
        let out = dir.path().join("dist");
        std::fs::create_dir_all(&site).unwrap();
        std::fs::create_dir_all(&out).unwrap();
        std::fs::write(out.join("a.png"), b"PIXELS").unwrap();
        std::fs::write(
            site.join("slides.json"),
            r#"{ "slides": [ { "image": { "src": "../dist/a.png" } } ] }"#,
        )
        .unwrap();

        let report =
            bundle_manifest(&site.join("slides.json"), &out, &NamerChain::default()).unwrap();
        assert_eq!(report.assets[0].name, "a.png");
        assert_eq!(std::fs::read(out.join("a.png")).unwrap(), b"PIXELS");
        let rewritten = Manifest::load(&report.manifest_path).unwrap();
        assert_eq!(rewritten.slides[0].src(), Some("a.png"));
    }
}
