use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for miplab")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run fmt, clippy and tests
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Write procedural stand-in assets
    Assets {
        #[arg(long, default_value = "./assets")]
        dir: PathBuf,
    },
    /// Launch the desktop lab, generating assets first if the directory is missing
    Run {
        #[arg(long, default_value = "./assets")]
        assets_dir: PathBuf,
        /// Extra arguments passed to miplab-desktop
        #[arg(last = true)]
        args: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            fmt()?;
            clippy()?;
            test()?;
        }
        Commands::Fmt => fmt()?,
        Commands::Clippy => clippy()?,
        Commands::Test => test()?,
        Commands::Doc => cargo("cargo doc", &["doc", "--workspace", "--no-deps"])?,
        Commands::Assets { dir } => generate_assets(&dir)?,
        Commands::Run { assets_dir, args } => {
            if !assets_dir.exists() {
                generate_assets(&assets_dir)?;
            }
            let dir = assets_dir.to_string_lossy().into_owned();
            let mut full = vec!["run", "-p", "miplab-desktop", "--", "--assets-dir", dir.as_str()];
            full.extend(args.iter().map(String::as_str));
            cargo("miplab-desktop", &full)?;
        }
    }

    Ok(())
}

fn fmt() -> Result<()> {
    cargo("cargo fmt --check", &["fmt", "--all", "--", "--check"])
}

fn clippy() -> Result<()> {
    cargo(
        "cargo clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )
}

fn test() -> Result<()> {
    cargo("cargo test", &["test", "--workspace"])
}

fn generate_assets(dir: &Path) -> Result<()> {
    let dir = dir.to_string_lossy().into_owned();
    cargo(
        "asset generation",
        &["run", "-p", "miplab-cli", "--", "generate", dir.as_str()],
    )
}

fn cargo(step: &str, args: &[&str]) -> Result<()> {
    println!("==> Running {step}");
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("{step} failed");
    }
    Ok(())
}
