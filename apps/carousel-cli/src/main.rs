use anyhow::Context;
use carousel_assets::{Bundle, ImageStore, Manifest, NamerChain, bundle_manifest, name_bundle};
use carousel_input::{Action, WheelDelta, normalize_wheel};
use carousel_common::Viewport;
use carousel_kernel::{Slider, WrapTrigger};
use carousel_render::{
    PlaneBackend, RenderView, TextBackend, push_image_size, push_layout_uniforms, push_transforms,
};
use carousel_tools::SliderInspector;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "carousel-cli", about = "CLI tool for carousel operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Validate a manifest, decode its images and print the layout
    Check {
        manifest: PathBuf,
        #[command(flatten)]
        surface: Surface,
    },
    /// Run the slider headless and print frames and wraps
    Simulate {
        manifest: PathBuf,
        /// Number of frames to advance
        #[arg(short, long, default_value = "120")]
        frames: u64,
        /// Print a frame report every N frames (0 prints none)
        #[arg(long, default_value = "30")]
        every: u64,
        /// Wheel input as FRAME=PIXELS, repeatable
        #[arg(long, value_parser = parse_wheel)]
        wheel: Vec<(u64, f64)>,
        /// Override the wrap trigger
        #[arg(long, value_enum)]
        wrap: Option<WrapArg>,
        #[command(flatten)]
        surface: Surface,
    },
    /// Print the bundle name the namer chain picks for each path
    Name {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Copy a manifest and its images into a directory under bundle names
    Bundle {
        manifest: PathBuf,
        /// Output directory
        #[arg(short, long)]
        out: PathBuf,
    },
}

/// Surface size the viewport is derived from.
#[derive(clap::Args)]
struct Surface {
    #[arg(long, default_value = "1280")]
    width: u32,
    #[arg(long, default_value = "720")]
    height: u32,
}

impl Surface {
    fn viewport(&self, view: &RenderView) -> anyhow::Result<Viewport> {
        view.viewport_for_surface(self.width, self.height)
            .with_context(|| format!("surface {}x{} is empty", self.width, self.height))
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum WrapArg {
    Boundary,
    Threshold,
}

impl From<WrapArg> for WrapTrigger {
    fn from(arg: WrapArg) -> Self {
        match arg {
            WrapArg::Boundary => WrapTrigger::Boundary,
            WrapArg::Threshold => WrapTrigger::Threshold,
        }
    }
}

fn parse_wheel(s: &str) -> Result<(u64, f64), String> {
    let (frame, pixels) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FRAME=PIXELS, got {s:?}"))?;
    let frame = frame.trim().parse().map_err(|e| format!("frame: {e}"))?;
    let pixels = pixels.trim().parse().map_err(|e| format!("pixels: {e}"))?;
    Ok((frame, pixels))
}

fn manifest_base(manifest: &Path) -> PathBuf {
    manifest.parent().map(PathBuf::from).unwrap_or_default()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let view = RenderView::default();

    match cli.command {
        Commands::Info => {
            println!("carousel-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", carousel_render::crate_info());
            println!("assets: {}", carousel_assets::crate_info());
            println!("tools: {}", carousel_tools::crate_info());
            println!(
                "camera: z={} fov={} clear={:?}",
                view.eye_z, view.fov_degrees, view.clear_color
            );
        }
        Commands::Check { manifest, surface } => {
            let m = Manifest::load(&manifest)
                .with_context(|| format!("loading {}", manifest.display()))?;
            let mut images = ImageStore::new();
            let ids = images.load_manifest(&m, &manifest_base(&manifest))?;

            let viewport = surface.viewport(&view)?;
            let slider = Slider::new(ids.len(), viewport, m.options.clone())?;
            let mut backend = TextBackend::new();
            for (plane, id) in ids.iter().enumerate() {
                if let Some(image) = images.get(*id) {
                    push_image_size(&mut backend, plane, image.width, image.height);
                }
            }
            push_layout_uniforms(&slider, &mut backend);
            push_transforms(&slider, &mut backend);

            println!(
                "Manifest OK: {} slides, {} unique images",
                ids.len(),
                images.len()
            );
            println!("{}", SliderInspector::summary(&slider));
            print!("{}", backend.render_frame(&view));
        }
        Commands::Simulate {
            manifest,
            frames,
            every,
            mut wheel,
            wrap,
            surface,
        } => {
            let m = Manifest::load(&manifest)
                .with_context(|| format!("loading {}", manifest.display()))?;
            let mut config = m.options.clone();
            if let Some(wrap) = wrap {
                config.wrap = wrap.into();
            }
            let viewport = surface.viewport(&view)?;
            let mut slider = Slider::new(m.slides.len(), viewport, config)?;
            let mut backend = TextBackend::new();
            push_layout_uniforms(&slider, &mut backend);

            tracing::debug!(frames, wheel_events = wheel.len(), "simulation configured");
            wheel.sort_by_key(|(frame, _)| *frame);
            let mut input = wheel.into_iter().peekable();
            let mut wraps = 0usize;

            println!("Simulating {frames} frames over {} slides", slider.len());
            for frame in 0..frames {
                while let Some((_, pixels)) = input.next_if(|(f, _)| *f == frame) {
                    let delta = normalize_wheel(WheelDelta::Pixel { x: 0.0, y: pixels });
                    slider.apply(&Action::Wheel(delta));
                }
                slider.update();
                for event in slider.drain_events() {
                    wraps += 1;
                    println!(
                        "wrap: frame={} item={} base {:.3} -> {:.3} at current={:.3}",
                        event.frame, event.index, event.from_base_x, event.to_base_x, event.current
                    );
                }
                if every > 0 && (frame + 1) % every == 0 {
                    push_transforms(&slider, &mut backend);
                    print!("{}", backend.render_frame(&view));
                }
            }
            println!("{}", SliderInspector::summary(&slider));
            println!("Total wraps: {wraps}");
        }
        Commands::Name { paths } => {
            let chain = NamerChain::default();
            for path in paths {
                let bundle = Bundle::from_path(&path);
                let name = chain.name_path(&path)?;
                let rule = if name_bundle(&bundle).is_some() {
                    "image"
                } else {
                    "hashed"
                };
                println!("{} -> {name} ({rule})", path.display());
            }
        }
        Commands::Bundle { manifest, out } => {
            let report = bundle_manifest(&manifest, &out, &NamerChain::default())?;
            for asset in &report.assets {
                println!("{} -> {}", asset.source.display(), asset.name);
            }
            println!(
                "Bundled {} assets, manifest at {}",
                report.assets.len(),
                report.manifest_path.display()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_arg_parses() {
        assert_eq!(parse_wheel("10=50").unwrap(), (10, 50.0));
        assert_eq!(parse_wheel(" 3 = -12.5 ").unwrap(), (3, -12.5));
        assert!(parse_wheel("10").is_err());
        assert!(parse_wheel("x=1").is_err());
    }

    #[test]
    fn cli_parses_simulate() {
        let cli = Cli::try_parse_from([
            "carousel-cli",
            "simulate",
            "slides.json",
            "--frames",
            "10",
            "--wheel",
            "0=100",
            "--wheel",
            "5=-20",
            "--wrap",
            "threshold",
        ])
        .unwrap();
        match cli.command {
            Commands::Simulate {
                frames,
                wheel,
                wrap,
                surface,
                ..
            } => {
                assert_eq!(frames, 10);
                assert_eq!(wheel, vec![(0, 100.0), (5, -20.0)]);
                assert!(matches!(wrap, Some(WrapArg::Threshold)));
                assert_eq!((surface.width, surface.height), (1280, 720));
            }
            _ => panic!("expected simulate"),
        }
    }

    #[test]
    fn empty_surface_is_rejected() {
        let view = RenderView::default();
        let empty = Surface {
            width: 1280,
            height: 0,
        };
        assert!(empty.viewport(&view).is_err());
        let hd = Surface {
            width: 1280,
            height: 720,
        };
        assert!(hd.viewport(&view).unwrap().width > 0.0);
    }
}
