// crates/rb_cli/src/args.rs
//
// CLI argument surface and validation.
//
// Rules:
// - Artifacts come from --base (directory or http(s) URL) XOR --manifest.
// - --manifest, --csv must be existing local files.
// - --out is a local directory (created if missing); no URL schemes.
// - --render picks html and/or json (default: html).
// - --hide takes container ids; hidden sections are left off the page.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use clap::Parser;
use rb_report::ContainerId;

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "riskboard",
    disable_help_subcommand = true,
    about = "Render the risk dashboard from coverage, effectiveness and residual artifacts"
)]
pub struct Args {
    /// Artifact base: a directory or an http(s) URL (default: dist).
    #[arg(long, conflicts_with = "manifest")]
    pub base: Option<String>,

    /// Dashboard manifest JSON (base, title, top_risks_cap, inputs_sha256).
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// How many top risks to list (default: 50).
    #[arg(long, value_parser = parse_cap)]
    pub top_risks: Option<usize>,

    /// Page title.
    #[arg(long)]
    pub title: Option<String>,

    /// Risk register CSV to show in the preview table.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Output directory (default: current directory).
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Output format(s): html, json.
    #[arg(long, value_parser = ["json", "html"], num_args = 1..=2, default_value = "html")]
    pub render: Vec<String>,

    /// Leave a container off the page (repeatable), e.g. --hide risk-heatmap.
    #[arg(long, value_parser = parse_container)]
    pub hide: Vec<ContainerId>,

    /// Only log warnings and errors.
    #[arg(long)]
    pub quiet: bool,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub log_json: bool,
}

impl Args {
    pub fn wants(&self, format: &str) -> bool {
        self.render.iter().any(|r| r == format)
    }
}

/// Errors surfaced by argument validation.
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    NotFound(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CliError::*;
        match self {
            NonLocalPath(p) => write!(f, "path must be local (no scheme): {p}"),
            NotFound(p) => write!(f, "file not found: {p}"),
        }
    }
}
impl std::error::Error for CliError {}

/// Top-risk cap: a positive integer.
pub fn parse_cap(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("must be at least 1".into()),
        Ok(n) => Ok(n),
        Err(_) => Err("must be a positive integer".into()),
    }
}

pub fn parse_container(s: &str) -> Result<ContainerId, String> {
    s.trim().parse()
}

#[inline]
fn has_scheme(s: &str) -> bool {
    s.trim().contains("://")
}

fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    if let Some(s) = p.to_str() {
        if has_scheme(s) {
            return Err(CliError::NonLocalPath(s.to_string()));
        }
    }
    Ok(())
}

fn ensure_local_file(p: &Path, label: &'static str) -> Result<(), CliError> {
    ensure_local_path(p)?;
    let meta = fs::metadata(p).map_err(|_| CliError::NotFound(format!("{label} {}", p.display())))?;
    if !meta.is_file() {
        return Err(CliError::NotFound(format!("{label} {}", p.display())));
    }
    Ok(())
}

/// Best-effort absolute path; falls back to CWD-joined when the path does not exist yet.
fn normalize_path(p: &Path) -> PathBuf {
    fs::canonicalize(p).unwrap_or_else(|_| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(p)
        }
    })
}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    validate(Args::parse())
}

pub fn validate(mut args: Args) -> Result<Args, CliError> {
    ensure_local_path(&args.out)?;
    if let Some(m) = &args.manifest {
        ensure_local_file(m, "--manifest")?;
    }
    if let Some(c) = &args.csv {
        ensure_local_file(c, "--csv")?;
    }
    args.manifest = args.manifest.take().map(|p| normalize_path(&p));
    args.csv = args.csv.take().map(|p| normalize_path(&p));
    args.out = normalize_path(&args.out);
    Ok(args)
}
