use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

const DEMO_MANIFEST: &str = "demos/slides.yaml";

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for the planar carousel")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: fmt, clippy, tests, doc, demo smoke run
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
    /// Time the slider frame update
    Bench,
    /// Check and simulate the demo manifest headless
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            fmt()?;
            clippy()?;
            test()?;
            doc()?;
            demo()?;
        }
        Commands::Fmt => fmt()?,
        Commands::Clippy => clippy()?,
        Commands::Test => test()?,
        Commands::Doc => doc()?,
        Commands::Build => cargo("build", &["build", "--workspace"])?,
        Commands::Bench => cargo(
            "bench",
            &["bench", "-p", "carousel-kernel", "--bench", "bench_frame_update"],
        )?,
        Commands::Demo => demo()?,
    }

    Ok(())
}

/// Run one cargo invocation, failing the task if it fails.
fn cargo(step: &str, args: &[&str]) -> Result<()> {
    println!("==> cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("{step} failed ({status})");
    }
    Ok(())
}

fn fmt() -> Result<()> {
    cargo("fmt check", &["fmt", "--all", "--", "--check"])
}

fn clippy() -> Result<()> {
    cargo(
        "clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )
}

fn test() -> Result<()> {
    cargo("tests", &["test", "--workspace"])
}

fn doc() -> Result<()> {
    cargo("doc", &["doc", "--workspace", "--no-deps"])
}

fn demo() -> Result<()> {
    let cli = ["run", "-q", "-p", "carousel-cli", "--"];
    cargo("demo check", &[&cli[..], &["check", DEMO_MANIFEST][..]].concat())?;
    cargo(
        "demo simulate",
        &[
            &cli[..],
            &[
                "simulate",
                DEMO_MANIFEST,
                "--frames",
                "600",
                "--every",
                "0",
                "--wheel",
                "10=400",
                "--wheel",
                "200=-800",
            ][..],
        ]
        .concat(),
    )
}
